//! Windowed platform layer. Compiled with the `sdl` feature; without it the
//! binary can only run headless under the autopilot.

#[cfg(feature = "sdl")]
mod desktop;
#[cfg(feature = "sdl")]
pub use desktop::*;
