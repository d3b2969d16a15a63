//! Headless интеграция движения
//!
//! В игре тела двигает rapier (RapierPhysicsPlugin добавляет host).
//! Для headless прогонов и тестов rapier plugin не подключён, поэтому
//! Velocity интегрируем сами: position += linvel * dt.

use bevy::prelude::*;
use bevy_rapier3d::prelude::{RigidBodyDisabled, Velocity};

/// System: интеграция rapier Velocity → Transform (headless режим, без rapier)
///
/// Деактивированные тела не двигаются.
pub fn integrate_headless_velocity(
    mut bodies: Query<(&Velocity, &mut Transform), Without<RigidBodyDisabled>>,
    time: Res<Time<Fixed>>,
) {
    let delta = time.delta_secs();

    for (velocity, mut transform) in bodies.iter_mut() {
        transform.translation += velocity.linvel * delta;
    }
}

/// Plugin для headless движения (FixedUpdate, до Update-фаз bridge)
pub struct HeadlessMotionPlugin;

impl Plugin for HeadlessMotionPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(FixedUpdate, integrate_headless_velocity);
    }
}
