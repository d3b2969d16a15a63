//! Scene domain - регистрация акторов и их удаление
//!
//! Содержит:
//! - ActorRegistry (generational arena: ActorHandle → Entity + z layer)
//! - ActorIndex (резолв back-reference тела в актора)
//! - retire_actor / RetireCommandsExt (idempotent terminal removal)
//! - spawn (actor factories: body + fixtures + регистрация)

pub mod commands;
pub mod registry;
pub mod spawn;

pub use commands::{retire_actor, ActorRetired, RetireCommandsExt};
pub use registry::{ActorHandle, ActorRegistry, SceneEntry};
pub use spawn::{
    spawn_actor, spawn_in_world, spawn_obstacle, ActorSpec, FixtureShape, FixtureSpec,
};

use bevy::ecs::system::SystemParam;
use bevy::prelude::*;

use crate::components::{Actor, ActorKind};

/// Actor state as seen through a body back-reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedActor {
    pub entity: Entity,
    pub enabled: bool,
    pub kind: ActorKind,
}

/// Resolves body back-references to actors.
pub trait ActorIndex {
    /// `None` when the handle is stale or the actor component is missing.
    fn resolve(&self, handle: ActorHandle) -> Option<ResolvedActor>;
}

/// ECS implementation of [`ActorIndex`]: registry + `Actor` components.
#[derive(SystemParam)]
pub struct SceneActors<'w, 's> {
    registry: Res<'w, ActorRegistry>,
    actors: Query<'w, 's, &'static Actor>,
}

impl ActorIndex for SceneActors<'_, '_> {
    fn resolve(&self, handle: ActorHandle) -> Option<ResolvedActor> {
        let entity = self.registry.resolve(handle)?;
        let actor = self.actors.get(entity).ok()?;
        Some(ResolvedActor {
            entity,
            enabled: actor.enabled,
            kind: actor.kind,
        })
    }
}
