//! Projectile factory + throw
//!
//! Снаряд = актор kind Projectile:
//! - dynamic body, CCD (быстрые снаряды не пролетают сквозь стены)
//! - gravity scale 0, вращение заблокировано
//! - собственный fixture: sensor (физического отклика нет, только события)
//! - circle (radius = max(w, h) / 2) или box

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use crate::components::{ActorKind, Projectile, Retired};
use crate::config::{BridgeConfig, DEFAULT_PROJECTILE_RANGE};
use crate::scene::{spawn_actor, ActorRegistry, ActorSpec, FixtureShape, FixtureSpec};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProjectileShape {
    #[default]
    Circle,
    Box,
}

/// Parameters of a new projectile.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectileSpec {
    pub width: f32,
    pub height: f32,
    pub shape: ProjectileShape,
    /// Стартовая позиция (= launch point до первого броска)
    pub position: Vec2,
    pub z_layer: i32,
    pub range: f32,
    pub damage: u32,
    pub disappear_on_collide: bool,
    /// false (default): fixture: sensor
    pub solid: bool,
}

impl ProjectileSpec {
    pub fn new(width: f32, height: f32, position: Vec2) -> Self {
        Self {
            width,
            height,
            shape: ProjectileShape::Circle,
            position,
            z_layer: 0,
            range: DEFAULT_PROJECTILE_RANGE,
            damage: 0,
            disappear_on_collide: true,
            solid: false,
        }
    }

    /// Range and damage taken from the bridge config.
    pub fn from_config(config: &BridgeConfig, width: f32, height: f32, position: Vec2) -> Self {
        Self {
            range: config.default_projectile_range,
            damage: config.default_projectile_damage,
            ..Self::new(width, height, position)
        }
    }

    pub fn with_shape(mut self, shape: ProjectileShape) -> Self {
        self.shape = shape;
        self
    }

    pub fn with_range(mut self, range: f32) -> Self {
        self.range = range;
        self
    }

    pub fn with_damage(mut self, damage: u32) -> Self {
        self.damage = damage;
        self
    }

    pub fn with_z_layer(mut self, z_layer: i32) -> Self {
        self.z_layer = z_layer;
        self
    }

    pub fn with_disappear_on_collide(mut self, disappear: bool) -> Self {
        self.disappear_on_collide = disappear;
        self
    }

    pub fn with_solid_fixture(mut self, solid: bool) -> Self {
        self.solid = solid;
        self
    }

    pub fn fixture_shape(&self) -> FixtureShape {
        match self.shape {
            ProjectileShape::Circle => FixtureShape::Circle {
                radius: self.width.max(self.height) / 2.0,
            },
            ProjectileShape::Box => FixtureShape::Box {
                half_width: self.width / 2.0,
                half_height: self.height / 2.0,
            },
        }
    }
}

/// Spawn helper: projectile actor, registered on its z layer.
pub fn spawn_projectile(
    commands: &mut Commands,
    registry: &mut ActorRegistry,
    spec: &ProjectileSpec,
) -> Entity {
    let fixture = if spec.solid {
        FixtureSpec::solid(spec.fixture_shape())
    } else {
        FixtureSpec::sensor(spec.fixture_shape())
    };

    let actor_spec = ActorSpec::new(ActorKind::Projectile, spec.position)
        .with_fixture(fixture)
        .with_z_layer(spec.z_layer)
        .with_body(RigidBody::Dynamic);

    let entity = spawn_actor(commands, registry, &actor_spec);

    commands.entity(entity).insert((
        Projectile {
            launch_point: spec.position,
            range: spec.range,
            disappear_on_collide: spec.disappear_on_collide,
            damage: spec.damage,
        },
        Velocity::zero(),
        Ccd::enabled(),
        GravityScale(0.0),
        LockedAxes::ROTATION_LOCKED,
    ));

    entity
}

/// Launches a projectile from `origin` with `velocity` (deferred).
pub fn throw_projectile(commands: &mut Commands, projectile: Entity, origin: Vec2, velocity: Vec2) {
    commands.queue(move |world: &mut World| {
        throw_in_world(world, projectile, origin, velocity);
    });
}

/// Immediate throw. Returns `false` for retired or non-projectile entities.
pub fn throw_in_world(world: &mut World, projectile: Entity, origin: Vec2, velocity: Vec2) -> bool {
    let Ok(mut entity) = world.get_entity_mut(projectile) else {
        return false;
    };

    // Retired: terminal, повторно не бросаем
    if entity.contains::<Retired>() {
        crate::log(&format!("Throw ignored: projectile {:?} is retired", projectile));
        return false;
    }

    match entity.get_mut::<Projectile>() {
        Some(mut data) => data.launch_point = origin,
        None => return false,
    }

    if let Some(mut transform) = entity.get_mut::<Transform>() {
        transform.translation = origin.extend(0.0);
    }
    entity.insert(Velocity::linear(velocity.extend(0.0)));

    true
}
