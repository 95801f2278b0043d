//! Game actors: the animated sprite every visible thing is built on, and the
//! store that owns a scene's actors and their group membership.

pub mod sprite;
pub mod store;

pub use sprite::{Anchor, AnimatedEntity};
pub use store::{EntityId, EntityStore, Groups};
