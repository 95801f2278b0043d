/// Keys the game reacts to. Everything else never reaches the core.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Enter,
    Escape,
    Space,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    KeyDown(Key),
    KeyUp(Key),
    /// Vertical stick position in `[-1, 1]`; negative is up.
    Axis(f32),
    /// Window closed or equivalent.
    Quit,
}

impl InputEvent {
    /// Whether this is a press of `key`.
    pub fn is_press(&self, key: Key) -> bool {
        matches!(self, InputEvent::KeyDown(k) if *k == key)
    }

    pub fn is_any_press(&self) -> bool {
        matches!(self, InputEvent::KeyDown(_))
    }
}
