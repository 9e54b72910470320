//! Entity creation for scripts.
//!
//! `createEntity()` hands scripts an opaque entity id. Ids are the `u64`
//! bit representation of an ECS [`Entity`], the same encoding the engine
//! uses whenever entity ids cross into Lua.

use bevy_ecs::prelude::*;
use std::cell::RefCell;

/// Host factory for new entities.
pub trait EntityFactory {
    /// Creates a new entity and returns its id.
    fn create_entity(&self) -> u64;
}

/// Entity factory backed by an ECS [`World`].
#[derive(Default)]
pub struct WorldEntityFactory {
    world: RefCell<World>,
}

impl WorldEntityFactory {
    pub fn new() -> Self {
        Self {
            world: RefCell::new(World::new()),
        }
    }

    /// Returns `true` if the id refers to a live entity of this world.
    pub fn contains(&self, entity_id: u64) -> bool {
        Entity::try_from_bits(entity_id)
            .is_some_and(|entity| self.world.borrow().get_entity(entity).is_ok())
    }

    /// Despawns an entity. Returns `false` if it did not exist.
    pub fn despawn(&self, entity_id: u64) -> bool {
        Entity::try_from_bits(entity_id)
            .is_some_and(|entity| self.world.borrow_mut().despawn(entity))
    }

    /// Number of live entities.
    pub fn len(&self) -> usize {
        let mut world = self.world.borrow_mut();
        let mut query = world.query::<Entity>();
        query.iter(&world).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl EntityFactory for WorldEntityFactory {
    fn create_entity(&self) -> u64 {
        self.world.borrow_mut().spawn_empty().id().to_bits()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_created_entities_are_distinct_and_live() {
        let factory = WorldEntityFactory::new();
        let a = factory.create_entity();
        let b = factory.create_entity();
        assert_ne!(a, b);
        assert!(factory.contains(a));
        assert!(factory.contains(b));
        assert_eq!(factory.len(), 2);
    }

    #[test]
    fn test_despawn() {
        let factory = WorldEntityFactory::new();
        let a = factory.create_entity();
        assert!(factory.despawn(a));
        assert!(!factory.contains(a));
        assert!(!factory.despawn(a));
    }

    #[test]
    fn test_invalid_ids_are_not_entities() {
        let factory = WorldEntityFactory::new();
        factory.create_entity();
        assert!(!factory.contains(0));
        assert!(!factory.despawn(0));
        assert!(!factory.contains(1 << 32));
        assert_eq!(factory.len(), 1);
    }
}
