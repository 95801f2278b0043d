//! SDL2 window, keyboard and controller input, and ttf text.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::rc::Rc;

use anyhow::{anyhow, Result};
use image::RgbaImage;
use sdl2::controller::{Axis, Button, GameController};
use sdl2::event::Event;
use sdl2::keyboard::Keycode;
use sdl2::pixels::PixelFormatEnum;
use sdl2::render::{Canvas, Texture};
use sdl2::ttf::{Font, Sdl2TtfContext};
use sdl2::video::Window;
use sdl2::EventPump;
use smallvec::SmallVec;
use tracing::{debug, info, warn};

use crate::app::{Autopilot, Events, Platform};
use crate::constants::{FONT_PATH, SCREEN_SIZE};
use crate::events::{InputEvent, Key};
use crate::session::GameState;
use crate::texture::{Color, FontFace, Surface};

/// Stick travel, out of `i16::MAX`, ignored around the center.
const AXIS_DEADZONE: i16 = 8000;

/// Maps SDL keycodes and controller buttons onto game keys.
#[derive(Debug, Clone)]
pub struct Bindings {
    key_bindings: HashMap<Keycode, Key>,
    button_bindings: HashMap<Button, Key>,
}

impl Default for Bindings {
    fn default() -> Self {
        let mut key_bindings = HashMap::new();

        key_bindings.insert(Keycode::Up, Key::Up);
        key_bindings.insert(Keycode::W, Key::Up);
        key_bindings.insert(Keycode::Down, Key::Down);
        key_bindings.insert(Keycode::S, Key::Down);
        key_bindings.insert(Keycode::Left, Key::Left);
        key_bindings.insert(Keycode::A, Key::Left);
        key_bindings.insert(Keycode::Right, Key::Right);
        key_bindings.insert(Keycode::D, Key::Right);

        key_bindings.insert(Keycode::Return, Key::Enter);
        key_bindings.insert(Keycode::KpEnter, Key::Enter);
        key_bindings.insert(Keycode::Escape, Key::Escape);
        key_bindings.insert(Keycode::Space, Key::Space);

        let mut button_bindings = HashMap::new();
        button_bindings.insert(Button::DPadUp, Key::Up);
        button_bindings.insert(Button::DPadDown, Key::Down);
        button_bindings.insert(Button::A, Key::Enter);
        button_bindings.insert(Button::Start, Key::Escape);

        Self {
            key_bindings,
            button_bindings,
        }
    }
}

impl Bindings {
    pub fn key(&self, keycode: Keycode) -> Option<Key> {
        self.key_bindings.get(&keycode).copied()
    }

    pub fn button(&self, button: Button) -> Option<Key> {
        self.button_bindings.get(&button).copied()
    }
}

/// Collapses a raw stick reading to -1, 0 or 1.
fn axis_direction(value: i16) -> i8 {
    if value < -AXIS_DEADZONE {
        -1
    } else if value > AXIS_DEADZONE {
        1
    } else {
        0
    }
}

/// A desktop window showing each frame, fed by keyboard and the first game controller.
pub struct SdlPlatform {
    canvas: Canvas<Window>,
    event_pump: EventPump,
    frame: Texture,
    bindings: Bindings,
    // Controller events only arrive while it is open.
    _controller: Option<GameController>,
    last_axis: i8,
    font: Option<Rc<dyn FontFace>>,
    autopilot: Option<Autopilot>,
}

impl SdlPlatform {
    /// Opens the window. With `autopilot`, the window only shows the run and
    /// every input except closing it is ignored.
    pub fn new(assets_dir: &Path, autopilot: Option<Autopilot>) -> Result<Self> {
        let sdl_context = sdl2::init().map_err(|e| anyhow!(e))?;
        let video_subsystem = sdl_context.video().map_err(|e| anyhow!(e))?;

        let window = video_subsystem
            .window("Pantaneiro", SCREEN_SIZE.x, SCREEN_SIZE.y)
            .resizable()
            .position_centered()
            .build()?;

        let mut canvas = window.into_canvas().build()?;
        canvas.set_logical_size(SCREEN_SIZE.x, SCREEN_SIZE.y)?;

        let texture_creator = canvas.texture_creator();
        let frame = texture_creator.create_texture_streaming(PixelFormatEnum::RGBA32, SCREEN_SIZE.x, SCREEN_SIZE.y)?;

        let controller = open_controller(&sdl_context);
        let event_pump = sdl_context.event_pump().map_err(|e| anyhow!(e))?;

        info!(width = SCREEN_SIZE.x, height = SCREEN_SIZE.y, "Window opened");

        Ok(Self {
            canvas,
            event_pump,
            frame,
            bindings: Bindings::default(),
            _controller: controller,
            last_axis: 0,
            font: load_font(&assets_dir.join(FONT_PATH)),
            autopilot,
        })
    }

    fn translate(&mut self, event: Event, events: &mut Events) {
        match event {
            Event::Quit { .. } => events.push(InputEvent::Quit),
            Event::KeyDown {
                keycode: Some(keycode),
                repeat: false,
                ..
            } => {
                if let Some(key) = self.bindings.key(keycode) {
                    events.push(InputEvent::KeyDown(key));
                }
            }
            Event::KeyUp {
                keycode: Some(keycode), ..
            } => {
                if let Some(key) = self.bindings.key(keycode) {
                    events.push(InputEvent::KeyUp(key));
                }
            }
            Event::ControllerButtonDown { button, .. } => {
                if let Some(key) = self.bindings.button(button) {
                    events.push(InputEvent::KeyDown(key));
                }
            }
            Event::ControllerButtonUp { button, .. } => {
                if let Some(key) = self.bindings.button(button) {
                    events.push(InputEvent::KeyUp(key));
                }
            }
            Event::ControllerAxisMotion {
                axis: Axis::LeftY, value, ..
            } => {
                let direction = axis_direction(value);
                if direction != self.last_axis {
                    self.last_axis = direction;
                    events.push(InputEvent::Axis(f32::from(direction)));
                }
            }
            _ => {}
        }
    }
}

impl Platform for SdlPlatform {
    fn poll(&mut self, state: GameState) -> Events {
        let mut events = SmallVec::new();
        let pending: Vec<Event> = self.event_pump.poll_iter().collect();
        for event in pending {
            self.translate(event, &mut events);
        }

        match self.autopilot.as_mut() {
            Some(autopilot) if !events.contains(&InputEvent::Quit) => autopilot.poll(state),
            Some(_) => smallvec::smallvec![InputEvent::Quit],
            None => events,
        }
    }

    fn present(&mut self, frame: &Surface) -> Result<()> {
        self.frame.update(None, frame.as_bytes(), frame.width() as usize * 4)?;
        self.canvas.clear();
        self.canvas.copy(&self.frame, None, None).map_err(|e| anyhow!(e))?;
        self.canvas.present();
        Ok(())
    }

    fn font(&self) -> Option<Rc<dyn FontFace>> {
        self.font.clone()
    }
}

fn open_controller(sdl_context: &sdl2::Sdl) -> Option<GameController> {
    let subsystem = match sdl_context.game_controller() {
        Ok(subsystem) => subsystem,
        Err(e) => {
            warn!(error = %e, "Game controllers unavailable");
            return None;
        }
    };
    let count = subsystem.num_joysticks().unwrap_or(0);
    let controller = (0..count)
        .filter(|&index| subsystem.is_game_controller(index))
        .find_map(|index| subsystem.open(index).ok());
    if let Some(controller) = &controller {
        info!(name = %controller.name(), "Game controller connected");
    }
    controller
}

/// Loads the ttf at `path`, or `None` to keep the built-in pixel font.
fn load_font(path: &Path) -> Option<Rc<dyn FontFace>> {
    if !path.is_file() {
        warn!(path = %path.display(), "Font not found, using the pixel font");
        return None;
    }
    let context = match sdl2::ttf::init() {
        Ok(context) => context,
        Err(e) => {
            warn!(error = %e, "Failed to start SDL_ttf, using the pixel font");
            return None;
        }
    };
    // Fonts borrow the context; it lives as long as the process anyway.
    let context: &'static Sdl2TtfContext = Box::leak(Box::new(context));
    Some(Rc::new(TtfFace::new(context, path)))
}

/// A ttf font opened once per pixel height, on first use.
pub struct TtfFace {
    context: &'static Sdl2TtfContext,
    path: Box<Path>,
    sizes: RefCell<HashMap<u16, Option<Font<'static, 'static>>>>,
}

impl fmt::Debug for TtfFace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TtfFace")
            .field("path", &self.path)
            .field("sizes", &self.sizes.borrow().len())
            .finish()
    }
}

impl TtfFace {
    pub fn new(context: &'static Sdl2TtfContext, path: &Path) -> Self {
        Self {
            context,
            path: path.into(),
            sizes: RefCell::new(HashMap::new()),
        }
    }

    fn with_font<R>(&self, height: u32, f: impl FnOnce(&Font<'static, 'static>) -> Option<R>) -> Option<R> {
        let size = u16::try_from(height.max(1)).unwrap_or(u16::MAX);
        let mut sizes = self.sizes.borrow_mut();
        let font = sizes.entry(size).or_insert_with(|| match self.context.load_font(&self.path, size) {
            Ok(font) => {
                debug!(size, "Opened font size");
                Some(font)
            }
            Err(e) => {
                warn!(path = %self.path.display(), size, error = %e, "Failed to open font");
                None
            }
        });
        font.as_ref().and_then(f)
    }
}

impl FontFace for TtfFace {
    fn render(&self, text: &str, height: u32, color: Color) -> Option<Surface> {
        let color = sdl2::pixels::Color::RGBA(color.r, color.g, color.b, color.a);
        let rendered = self.with_font(height, |font| font.render(text).blended(color).ok())?;
        let rendered = rendered.convert_format(PixelFormatEnum::RGBA32).ok()?;

        let (width, rows, pitch) = (rendered.width(), rendered.height(), rendered.pitch() as usize);
        let row_bytes = width as usize * 4;
        let bytes = rendered.with_lock(|pixels| {
            pixels
                .chunks(pitch)
                .take(rows as usize)
                .flat_map(|row| &row[..row_bytes.min(row.len())])
                .copied()
                .collect::<Vec<u8>>()
        });
        RgbaImage::from_raw(width, rows, bytes).map(Surface::from_image)
    }

    fn measure(&self, text: &str, height: u32) -> Option<(u32, u32)> {
        self.with_font(height, |font| font.size_of(text).ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axis_direction_ignores_the_deadzone() {
        assert_eq!(axis_direction(0), 0);
        assert_eq!(axis_direction(AXIS_DEADZONE), 0);
        assert_eq!(axis_direction(-AXIS_DEADZONE - 1), -1);
        assert_eq!(axis_direction(i16::MAX), 1);
    }

    #[test]
    fn test_default_bindings_cover_both_layouts() {
        let bindings = Bindings::default();
        assert_eq!(bindings.key(Keycode::W), Some(Key::Up));
        assert_eq!(bindings.key(Keycode::Down), Some(Key::Down));
        assert_eq!(bindings.key(Keycode::KpEnter), Some(Key::Enter));
        assert_eq!(bindings.key(Keycode::Q), None);
        assert_eq!(bindings.button(Button::Start), Some(Key::Escape));
    }
}
