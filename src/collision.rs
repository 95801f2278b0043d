//! Pixel-accurate collision between actors.

use tracing::debug;

use crate::entity::{EntityId, EntityStore, Groups};
use crate::texture::{Mask, Rect};

/// Trait for actors that can participate in collision detection.
pub trait Collidable {
    /// Screen-space bounding rectangle of the displayed frame.
    fn rect(&self) -> Rect;

    /// Opacity mask of the displayed frame, aligned with [`Collidable::rect`].
    fn mask(&self) -> &Mask;

    /// Checks if this actor overlaps another at the pixel level.
    fn is_colliding_with(&self, other: &dyn Collidable) -> bool {
        collide_mask(self, other)
    }
}

/// Whether two actors share at least one opaque pixel.
///
/// Bounding boxes are rejected first, so touching but transparent regions
/// never register as a hit.
pub fn collide_mask<A, B>(a: &A, b: &B) -> bool
where
    A: Collidable + ?Sized,
    B: Collidable + ?Sized,
{
    let (ra, rb) = (a.rect(), b.rect());
    if !ra.intersects(&rb) {
        return false;
    }
    a.mask().overlaps(ra, b.mask(), rb)
}

/// Tests a reference actor against groups of actors and removes every match.
pub struct CollisionResolver;

impl CollisionResolver {
    /// Returns true iff at least one member of `group` overlaps `reference`.
    ///
    /// Every overlapping member is removed from the store, and therefore from
    /// every group it belonged to, whatever the caller does with the result.
    pub fn check<R, T>(reference: &R, store: &mut EntityStore<T>, group: Groups) -> bool
    where
        R: Collidable + ?Sized,
        T: Collidable,
    {
        !Self::take(reference, store, group).is_empty()
    }

    /// Same removal as [`CollisionResolver::check`], but hands the removed members back in spawn order.
    pub fn take<R, T>(reference: &R, store: &mut EntityStore<T>, group: Groups) -> Vec<T>
    where
        R: Collidable + ?Sized,
        T: Collidable,
    {
        let hits: Vec<EntityId> = store
            .iter_group(group)
            .filter(|(_, candidate)| collide_mask(reference, *candidate))
            .map(|(id, _)| id)
            .collect();

        if !hits.is_empty() {
            debug!(?group, count = hits.len(), "Collision removed actors");
        }
        hits.into_iter().filter_map(|id| store.despawn(id)).collect()
    }
}
