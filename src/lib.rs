//! Side-scrolling arcade runner: scenes built from shared engine primitives.

pub mod app;
pub mod asset;
pub mod background;
pub mod collision;
pub mod config;
pub mod constants;
pub mod entity;
pub mod error;
pub mod events;
pub mod formatter;
pub mod menu;
pub mod platform;
pub mod resources;
pub mod scene;
pub mod score;
pub mod scroller;
pub mod session;
pub mod spawn;
pub mod texture;
pub mod timing;
