//! ActorRegistry - scene-side owner of actor registration
//!
//! Generational arena: физическое тело хранит только `ActorHandle`
//! (index + generation). После retire слот освобождается и generation растёт,
//! поэтому старый handle перестаёт резолвиться вместо того чтобы "висеть".

use bevy::prelude::*;

/// Opaque weak reference to a registered actor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub struct ActorHandle {
    index: u32,
    generation: u32,
}

impl ActorHandle {
    pub fn index(&self) -> u32 {
        self.index
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }
}

/// What the scene knows about a registered actor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SceneEntry {
    pub entity: Entity,
    pub z_layer: i32,
}

#[derive(Debug, Default)]
struct Slot {
    generation: u32,
    entry: Option<SceneEntry>,
}

/// Registry всех живых акторов сцены (+ их z layer для отрисовки)
#[derive(Resource, Debug, Default)]
pub struct ActorRegistry {
    slots: Vec<Slot>,
    free: Vec<u32>,
    live: usize,
}

impl ActorRegistry {
    /// Registers an actor on a z layer. Called once, at actor construction.
    pub fn add_actor(&mut self, entity: Entity, z_layer: i32) -> ActorHandle {
        let entry = Some(SceneEntry { entity, z_layer });
        self.live += 1;

        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.entry = entry;
            return ActorHandle {
                index,
                generation: slot.generation,
            };
        }

        let index = self.slots.len() as u32;
        self.slots.push(Slot {
            generation: 0,
            entry,
        });
        ActorHandle {
            index,
            generation: 0,
        }
    }

    /// Unregisters an actor. Stale or already-released handles are a no-op.
    pub fn release(&mut self, handle: ActorHandle) -> Option<Entity> {
        let slot = self.slots.get_mut(handle.index as usize)?;
        if slot.generation != handle.generation {
            return None;
        }

        let entry = slot.entry.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(handle.index);
        self.live -= 1;
        Some(entry.entity)
    }

    pub fn get(&self, handle: ActorHandle) -> Option<SceneEntry> {
        let slot = self.slots.get(handle.index as usize)?;
        if slot.generation != handle.generation {
            return None;
        }
        slot.entry
    }

    pub fn resolve(&self, handle: ActorHandle) -> Option<Entity> {
        self.get(handle).map(|entry| entry.entity)
    }

    pub fn z_layer(&self, handle: ActorHandle) -> Option<i32> {
        self.get(handle).map(|entry| entry.z_layer)
    }

    pub fn len(&self) -> usize {
        self.live
    }

    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Registered actors back-to-front (ascending z layer).
    ///
    /// Ties keep slot order. Retired actors are never listed.
    pub fn render_order(&self) -> Vec<Entity> {
        let mut entries: Vec<SceneEntry> = self
            .slots
            .iter()
            .filter_map(|slot| slot.entry)
            .collect();

        entries.sort_by_key(|entry| entry.z_layer);
        entries.into_iter().map(|entry| entry.entity).collect()
    }
}
