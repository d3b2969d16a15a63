//! Collision dispatch для projectiles
//!
//! Архитектура:
//! - rapier пишет CollisionEvent::Started(fixture_a, fixture_b, flags)
//! - fixture → body → BodyOwner → актор (оба участника)
//! - реагирует projectile-сторона, решение: чистая функция `decide`
//! - remove идёт через Commands (применяется на sync point, idempotent)

use bevy::prelude::*;
use bevy_rapier3d::prelude::CollisionEvent;
use std::collections::HashSet;

use crate::components::{Actor, ActorKind, Obstacle, Projectile, RemovalMode, Retired};
use crate::physics::{fixture_owner, Contact, EcsPhysics, PhysicsWorld};
use crate::scene::{ResolvedActor, RetireCommandsExt, SceneActors};

/// What a projectile does about one contact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactOutcome {
    /// Obstacle handler решает сам, projectile не трогаем
    ForwardToHandler,
    /// Ничего не делаем (sensor, projectile с disappear_on_collide = false)
    Ignore,
    /// Audible remove реагирующего projectile
    Remove,
}

/// The other participant, as far as the decision needs it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OtherParticipant {
    pub kind: ActorKind,
    pub has_projectile_handler: bool,
    /// Sensor flag of the first fixture of the other body (`None`: no fixtures)
    pub first_fixture_is_sensor: Option<bool>,
}

/// Decision procedure for a projectile contact.
///
/// Order matters: obstacle handler, then projectile/projectile, then the
/// sensor check on the *first* fixture of the other body only.
pub fn decide(projectile: &Projectile, other: &OtherParticipant) -> ContactOutcome {
    if other.kind == ActorKind::Obstacle && other.has_projectile_handler {
        return ContactOutcome::ForwardToHandler;
    }

    if other.kind == ActorKind::Projectile && !projectile.disappear_on_collide {
        return ContactOutcome::Ignore;
    }

    match other.first_fixture_is_sensor {
        Some(false) => ContactOutcome::Remove,
        // Sensor никогда не удаляет; тело без fixtures тоже
        Some(true) | None => ContactOutcome::Ignore,
    }
}

/// Picks the reacting projectile of a contact pair.
///
/// Returns `(projectile, other)`. When both are projectiles the first
/// participant of the event reacts.
pub fn reacting_side(
    a: ResolvedActor,
    b: ResolvedActor,
) -> Option<(ResolvedActor, ResolvedActor)> {
    match (a.kind, b.kind) {
        (ActorKind::Projectile, _) => Some((a, b)),
        (_, ActorKind::Projectile) => Some((b, a)),
        _ => None,
    }
}

type ParticipantData = (
    &'static Actor,
    Option<&'static Projectile>,
    Option<&'static Obstacle>,
    Has<Retired>,
);

/// System: обработка collision events projectiles (после physics step)
pub fn dispatch_projectile_contacts(
    mut collisions: EventReader<CollisionEvent>,
    physics: EcsPhysics,
    actors: SceneActors,
    participants: Query<ParticipantData>,
    mut commands: Commands,
) {
    // Projectiles, удалённые в этом батче (retire ещё не применён)
    let mut removed: HashSet<Entity> = HashSet::new();

    for event in collisions.read() {
        let Some(contact) = Contact::from_started(event) else {
            continue;
        };
        let (fixture_a, fixture_b) = contact.fixtures;

        let Some(a) = fixture_owner(&physics, &actors, fixture_a) else {
            continue;
        };
        let Some(b) = fixture_owner(&physics, &actors, fixture_b) else {
            continue;
        };
        if a.entity == b.entity {
            continue;
        }

        let Some((projectile, other)) = reacting_side(a, b) else {
            continue;
        };

        if removed.contains(&projectile.entity) {
            continue;
        }

        let Ok((_, Some(projectile_data), _, retired)) = participants.get(projectile.entity) else {
            crate::log_warning(&format!(
                "Actor {:?} is tagged Projectile but has no Projectile data",
                projectile.entity
            ));
            continue;
        };
        if retired || !projectile.enabled {
            continue;
        }

        let obstacle = participants
            .get(other.entity)
            .ok()
            .and_then(|(_, _, obstacle, _)| obstacle);

        let other_side = OtherParticipant {
            kind: other.kind,
            has_projectile_handler: obstacle.is_some_and(Obstacle::has_projectile_handler),
            first_fixture_is_sensor: physics
                .first_fixture(other.entity)
                .map(|fixture| physics.is_sensor(fixture)),
        };

        match decide(projectile_data, &other_side) {
            ContactOutcome::ForwardToHandler => {
                if let Some(handler) = obstacle.and_then(|o| o.on_projectile_collision.as_ref()) {
                    crate::log(&format!(
                        "Projectile {:?} hit obstacle {:?}: forwarded to handler",
                        projectile.entity, other.entity
                    ));
                    handler(other.entity, projectile.entity, &contact, &mut commands);
                }
            }
            ContactOutcome::Ignore => {}
            ContactOutcome::Remove => {
                crate::log(&format!(
                    "Projectile {:?} hit {:?} {:?}: removing",
                    projectile.entity, other.kind, other.entity
                ));
                removed.insert(projectile.entity);
                commands.retire_actor(projectile.entity, RemovalMode::Audible);
            }
        }
    }
}
