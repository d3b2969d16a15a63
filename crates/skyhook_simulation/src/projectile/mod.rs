//! Projectile domain - dispatch контактов + range cap
//!
//! Порядок в кадре (BridgeSet, Update):
//! 1. Dispatch: CollisionEvent прошлого physics step → outcome
//! 2. Lifecycle: range cap до отрисовки
//!
//! Retire всегда через Commands (deferred, idempotent).

use bevy::prelude::*;
use bevy_rapier3d::prelude::CollisionEvent;

pub mod dispatch;
pub mod lifecycle;
pub mod spawn;

#[cfg(test)]
mod dispatch_tests;

pub use dispatch::{decide, dispatch_projectile_contacts, reacting_side, ContactOutcome, OtherParticipant};
pub use lifecycle::{check_range, enforce_projectile_range, RangeCheck};
pub use spawn::{
    spawn_projectile, throw_in_world, throw_projectile, ProjectileShape, ProjectileSpec,
};

use crate::scene::{ActorRegistry, ActorRetired};
use crate::BridgeSet;

/// Projectile Plugin
///
/// Регистрирует dispatch и lifecycle системы в Update.
/// CollisionEvent регистрируем сами: без RapierPhysicsPlugin (headless)
/// события пишет host или тесты.
pub struct ProjectilePlugin;

impl Plugin for ProjectilePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ActorRegistry>()
            .add_event::<CollisionEvent>()
            .add_event::<ActorRetired>()
            .add_systems(
                Update,
                (
                    dispatch_projectile_contacts.in_set(BridgeSet::Dispatch),
                    enforce_projectile_range.in_set(BridgeSet::Lifecycle),
                ),
            );
    }
}
