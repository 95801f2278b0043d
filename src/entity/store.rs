use bitflags::bitflags;
use tracing::trace;

bitflags! {
    /// Membership of an actor in the scene's groups.
    ///
    /// An actor can belong to several groups at once; removing it from the
    /// store removes it from all of them.
    #[derive(Default, Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
    pub struct Groups: u8 {
        const OBSTACLES = 1 << 0;
        const ENEMIES = 1 << 1;
        const COLLECTIBLES = 1 << 2;
        const EFFECTS = 1 << 3;
        const DECOR = 1 << 4;
    }
}

/// Unique identifier for an actor in an [`EntityStore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntityId(u32);

impl EntityId {
    pub fn raw(self) -> u32 {
        self.0
    }
}

#[derive(Debug)]
struct Slot<T> {
    id: EntityId,
    groups: Groups,
    value: T,
}

/// Owns a scene's actors in spawn order, each tagged with the groups it belongs to.
///
/// A "group" is a view: the live actors whose flags intersect a given mask.
#[derive(Debug)]
pub struct EntityStore<T> {
    slots: Vec<Slot<T>>,
    next_id: u32,
}

impl<T> Default for EntityStore<T> {
    fn default() -> Self {
        Self {
            slots: Vec::new(),
            next_id: 0,
        }
    }
}

impl<T> EntityStore<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an actor to the given groups and returns its ID.
    pub fn spawn(&mut self, value: T, groups: Groups) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        self.slots.push(Slot { id, groups, value });
        trace!(id = id.0, ?groups, "Spawned actor");
        id
    }

    /// Removes an actor from every group. Returns it if it was present.
    pub fn despawn(&mut self, id: EntityId) -> Option<T> {
        let index = self.slots.iter().position(|slot| slot.id == id)?;
        trace!(id = id.0, "Despawned actor");
        Some(self.slots.remove(index).value)
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.slots.iter().any(|slot| slot.id == id)
    }

    pub fn get(&self, id: EntityId) -> Option<&T> {
        self.slots.iter().find(|slot| slot.id == id).map(|slot| &slot.value)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut T> {
        self.slots.iter_mut().find(|slot| slot.id == id).map(|slot| &mut slot.value)
    }

    pub fn groups_of(&self, id: EntityId) -> Option<Groups> {
        self.slots.iter().find(|slot| slot.id == id).map(|slot| slot.groups)
    }

    pub fn iter(&self) -> impl Iterator<Item = (EntityId, &T)> {
        self.slots.iter().map(|slot| (slot.id, &slot.value))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (EntityId, &mut T)> {
        self.slots.iter_mut().map(|slot| (slot.id, &mut slot.value))
    }

    /// Actors belonging to any of the groups in `groups`.
    pub fn iter_group(&self, groups: Groups) -> impl Iterator<Item = (EntityId, &T)> {
        self.slots
            .iter()
            .filter(move |slot| slot.groups.intersects(groups))
            .map(|slot| (slot.id, &slot.value))
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn len_group(&self, groups: Groups) -> usize {
        self.iter_group(groups).count()
    }

    /// Keeps only the actors for which `keep` returns true.
    pub fn retain(&mut self, mut keep: impl FnMut(EntityId, &mut T) -> bool) {
        self.slots.retain_mut(|slot| keep(slot.id, &mut slot.value));
    }

    pub fn clear(&mut self) {
        self.slots.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_despawn_leaves_every_group() {
        let mut store = EntityStore::new();
        let both = store.spawn("bee", Groups::ENEMIES | Groups::OBSTACLES);
        let _other = store.spawn("log", Groups::OBSTACLES);

        assert_eq!(store.len_group(Groups::ENEMIES), 1);
        assert_eq!(store.len_group(Groups::OBSTACLES), 2);

        assert_eq!(store.despawn(both), Some("bee"));
        assert_eq!(store.len_group(Groups::ENEMIES), 0);
        assert_eq!(store.len_group(Groups::OBSTACLES), 1);
        assert_eq!(store.despawn(both), None);
    }

    #[test]
    fn test_ids_are_never_reused() {
        let mut store = EntityStore::new();
        let a = store.spawn(1, Groups::DECOR);
        store.despawn(a);
        let b = store.spawn(2, Groups::DECOR);
        assert_ne!(a, b);
    }
}
