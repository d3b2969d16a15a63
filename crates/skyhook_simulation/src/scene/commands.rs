//! Actor retirement (terminal removal)
//!
//! Retire = actor disabled + тело деактивировано (`RigidBodyDisabled`) +
//! handle освобождён в registry. Запрос идёт через Commands и применяется
//! на ближайшем sync point, поэтому до конца кадра тело может ещё числиться
//! present-but-inactive.

use bevy::prelude::*;
use bevy_rapier3d::prelude::RigidBodyDisabled;

use crate::components::{Actor, ActorKind, BodyOwner, RemovalMode, Retired};
use crate::scene::ActorRegistry;

/// Event: актор выведен из симуляции (для host: убрать визуал, звук и т.п.)
#[derive(Event, Debug, Clone, Copy)]
pub struct ActorRetired {
    pub actor: Entity,
    pub kind: ActorKind,
    pub mode: RemovalMode,
}

/// Retires an actor immediately.
///
/// Returns `false` when the entity is gone or already retired (no-op).
pub fn retire_actor(world: &mut World, entity: Entity, mode: RemovalMode) -> bool {
    let Ok(mut actor_entity) = world.get_entity_mut(entity) else {
        crate::log(&format!("Retire skipped: entity {:?} no longer exists", entity));
        return false;
    };

    // Повторный запрос (тот же кадр или позже): no-op
    if actor_entity.contains::<Retired>() {
        return false;
    }

    let owner = actor_entity.get::<BodyOwner>().copied();
    let kind = match actor_entity.get_mut::<Actor>() {
        Some(mut actor) => {
            actor.enabled = false;
            actor.kind
        }
        None => ActorKind::Generic,
    };

    actor_entity.insert((Retired { mode }, RigidBodyDisabled));

    if let Some(BodyOwner(handle)) = owner {
        if let Some(mut registry) = world.get_resource_mut::<ActorRegistry>() {
            registry.release(handle);
        }
    }

    world.send_event(ActorRetired {
        actor: entity,
        kind,
        mode,
    });

    crate::log(&format!("Retired {:?} actor {:?} ({:?})", kind, entity, mode));
    true
}

/// `Commands` entry point for retirement.
pub trait RetireCommandsExt {
    fn retire_actor(&mut self, entity: Entity, mode: RemovalMode);
}

impl RetireCommandsExt for Commands<'_, '_> {
    fn retire_actor(&mut self, entity: Entity, mode: RemovalMode) {
        self.queue(move |world: &mut World| {
            retire_actor(world, entity, mode);
        });
    }
}
