//! Physics seam
//!
//! Физический мир: внешний (rapier владеет телами, fixtures, контактами).
//! Здесь только протокол, через который bridge его читает:
//! - `PhysicsWorld`: region query + доступ к fixture/body состоянию
//! - `QueryCallback`: report_fixture(fixture) → continue?
//! - `EcsPhysics`: реализация поверх rapier компонентов в Bevy World
//! - `motion`: headless интеграция Velocity → Transform (без rapier plugin)

pub mod ecs_world;
pub mod motion;

pub use ecs_world::EcsPhysics;
pub use motion::{integrate_headless_velocity, HeadlessMotionPlugin};

use bevy::math::bounding::Aabb2d;
use bevy::prelude::*;
use bevy_rapier3d::prelude::CollisionEvent;
use bevy_rapier3d::rapier::geometry::CollisionEventFlags;

use crate::scene::{ActorHandle, ActorIndex, ResolvedActor};

/// Axis-aligned box around a query point. Lives for one locator call.
#[derive(Debug, Clone, Copy)]
pub struct QueryRegion {
    pub point: Vec2,
    pub bounds: Aabb2d,
}

impl QueryRegion {
    /// Box of half-width/height `tolerance` centered on `point`.
    pub fn around(point: Vec2, tolerance: f32) -> Self {
        Self {
            point,
            bounds: Aabb2d::new(point, Vec2::splat(tolerance)),
        }
    }
}

/// Receives candidate fixtures from a region query.
pub trait QueryCallback {
    /// Return `true` to continue enumeration, `false` to stop.
    fn report_fixture(&mut self, fixture: Entity) -> bool;
}

impl<F> QueryCallback for F
where
    F: FnMut(Entity) -> bool,
{
    fn report_fixture(&mut self, fixture: Entity) -> bool {
        self(fixture)
    }
}

/// Read access to the physics world, as the bridge needs it.
///
/// Fixtures and bodies are addressed by their entities. Activation changes go
/// through `RetireCommandsExt` instead (deferred, like the engine's own
/// end-of-step cleanup).
pub trait PhysicsWorld {
    /// Calls `callback` once per fixture whose broad-phase bound intersects
    /// `region.bounds`, until it returns `false`. Visitation order is unspecified.
    fn query_region(&self, region: &QueryRegion, callback: &mut dyn QueryCallback);

    /// Exact point-in-shape test (not the broad-phase box).
    fn test_point(&self, fixture: Entity, point: Vec2) -> bool;

    fn is_sensor(&self, fixture: Entity) -> bool;

    fn fixture_body(&self, fixture: Entity) -> Option<Entity>;

    /// First fixture attached to `body`, in attachment order.
    fn first_fixture(&self, body: Entity) -> Option<Entity>;

    /// Back-reference to the owning actor. `None` if the body never had one.
    fn body_owner(&self, body: Entity) -> Option<ActorHandle>;

    fn is_body_active(&self, body: Entity) -> bool;

    fn body_position(&self, body: Entity) -> Option<Vec2>;
}

/// Resolves the actor owning `fixture`: fixture → body → back-reference → actor.
///
/// Any missing link (no body, no back-reference, stale handle) yields `None`
/// and is logged; callers skip the candidate.
pub fn fixture_owner<W, A>(world: &W, actors: &A, fixture: Entity) -> Option<ResolvedActor>
where
    W: PhysicsWorld + ?Sized,
    A: ActorIndex + ?Sized,
{
    let Some(body) = world.fixture_body(fixture) else {
        crate::log(&format!("Fixture {:?} has no body, skipped", fixture));
        return None;
    };
    let Some(handle) = world.body_owner(body) else {
        crate::log(&format!("Body {:?} has no actor back-reference, skipped", body));
        return None;
    };
    let resolved = actors.resolve(handle);
    if resolved.is_none() {
        crate::log(&format!(
            "Body {:?} refers to a released actor (handle {}:{}), skipped",
            body,
            handle.index(),
            handle.generation()
        ));
    }
    resolved
}

/// Contact metadata handed to obstacle handlers. Opaque to the dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Contact {
    /// Fixture пары в порядке события
    pub fixtures: (Entity, Entity),
    /// Хотя бы один из fixtures: sensor
    pub sensor: bool,
}

impl Contact {
    /// Contact of a `CollisionEvent::Started`; `None` for `Stopped`.
    pub fn from_started(event: &CollisionEvent) -> Option<Self> {
        match event {
            CollisionEvent::Started(a, b, flags) => Some(Self {
                fixtures: (*a, *b),
                sensor: flags.contains(CollisionEventFlags::SENSOR),
            }),
            CollisionEvent::Stopped(..) => None,
        }
    }
}
