//! Actor factories
//!
//! Создают entity с полным набором компонентов:
//! - body: Actor + Transform + RigidBody + BodyOwner (back-reference в registry)
//! - fixtures: дочерние entity с Collider (+ Sensor), порядок = порядок в ActorSpec::fixtures
//! - регистрация в ActorRegistry на нужном z layer (ровно один раз)

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use crate::components::{Actor, ActorKind, BodyOwner, Obstacle};
use crate::scene::ActorRegistry;

/// Толщина box fixtures по Z (игра плоская, глубина нужна только rapier)
pub const FIXTURE_DEPTH: f32 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FixtureShape {
    Circle { radius: f32 },
    Box { half_width: f32, half_height: f32 },
}

impl FixtureShape {
    pub fn collider(&self) -> Collider {
        match *self {
            FixtureShape::Circle { radius } => Collider::ball(radius),
            FixtureShape::Box {
                half_width,
                half_height,
            } => Collider::cuboid(half_width, half_height, FIXTURE_DEPTH),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixtureSpec {
    pub shape: FixtureShape,
    /// Offset от центра тела
    pub offset: Vec2,
    pub sensor: bool,
}

impl FixtureSpec {
    pub fn solid(shape: FixtureShape) -> Self {
        Self {
            shape,
            offset: Vec2::ZERO,
            sensor: false,
        }
    }

    pub fn sensor(shape: FixtureShape) -> Self {
        Self {
            sensor: true,
            ..Self::solid(shape)
        }
    }

    pub fn with_offset(mut self, offset: Vec2) -> Self {
        self.offset = offset;
        self
    }
}

/// Everything needed to build an actor and its single body.
#[derive(Debug, Clone)]
pub struct ActorSpec {
    pub kind: ActorKind,
    pub position: Vec2,
    pub z_layer: i32,
    pub body: RigidBody,
    pub fixtures: Vec<FixtureSpec>,
}

impl ActorSpec {
    pub fn new(kind: ActorKind, position: Vec2) -> Self {
        Self {
            kind,
            position,
            z_layer: 0,
            body: RigidBody::Fixed,
            fixtures: Vec::new(),
        }
    }

    pub fn circle(kind: ActorKind, position: Vec2, radius: f32) -> Self {
        Self::new(kind, position).with_fixture(FixtureSpec::solid(FixtureShape::Circle { radius }))
    }

    pub fn rect(kind: ActorKind, position: Vec2, half_width: f32, half_height: f32) -> Self {
        Self::new(kind, position).with_fixture(FixtureSpec::solid(FixtureShape::Box {
            half_width,
            half_height,
        }))
    }

    pub fn with_fixture(mut self, fixture: FixtureSpec) -> Self {
        self.fixtures.push(fixture);
        self
    }

    pub fn with_z_layer(mut self, z_layer: i32) -> Self {
        self.z_layer = z_layer;
        self
    }

    pub fn with_body(mut self, body: RigidBody) -> Self {
        self.body = body;
        self
    }
}

/// Spawn helper: actor + body + fixtures, registered with the scene.
pub fn spawn_actor(
    commands: &mut Commands,
    registry: &mut ActorRegistry,
    spec: &ActorSpec,
) -> Entity {
    let entity = commands.spawn_empty().id();
    let handle = registry.add_actor(entity, spec.z_layer);

    commands.entity(entity).insert((
        // Bevy transform (плоскость XY)
        Transform::from_translation(spec.position.extend(0.0)),

        // Наши компоненты
        Actor::new(spec.kind),
        BodyOwner(handle),

        // Rapier physics
        spec.body,
        ActiveEvents::COLLISION_EVENTS,
    ));

    for fixture in &spec.fixtures {
        let mut fixture_entity = commands.spawn((
            fixture.shape.collider(),
            Transform::from_translation(fixture.offset.extend(0.0)),
            ActiveEvents::COLLISION_EVENTS,
            ChildOf(entity),
        ));
        if fixture.sensor {
            fixture_entity.insert(Sensor);
        }
    }

    entity
}

/// Spawn helper for obstacles (kind is forced to `Obstacle`).
pub fn spawn_obstacle(
    commands: &mut Commands,
    registry: &mut ActorRegistry,
    spec: &ActorSpec,
    obstacle: Obstacle,
) -> Entity {
    let spec = ActorSpec {
        kind: ActorKind::Obstacle,
        ..spec.clone()
    };
    let entity = spawn_actor(commands, registry, &spec);
    commands.entity(entity).insert(obstacle);
    entity
}

/// Runs a factory against a `World` directly (host code, tests).
///
/// Commands are applied before returning.
pub fn spawn_in_world<F>(world: &mut World, factory: F) -> Entity
where
    F: FnOnce(&mut Commands, &mut ActorRegistry) -> Entity,
{
    world.init_resource::<ActorRegistry>();

    let entity = world.resource_scope(|world, mut registry: Mut<ActorRegistry>| {
        let mut commands = world.commands();
        factory(&mut commands, &mut *registry)
    });

    world.flush();
    entity
}
