//! Projectile lifecycle - range cap
//!
//! Раз в кадр (до отрисовки) каждый активный projectile сравнивает
//! квадрат пройденной дистанции с range². Strictly greater → тихий retire.

use bevy::prelude::*;

use crate::components::{Projectile, RemovalMode, Retired};
use crate::physics::{EcsPhysics, PhysicsWorld};
use crate::scene::RetireCommandsExt;

/// Outcome of the per-tick range check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeCheck {
    /// Тело неактивно: ничего не делаем
    Inactive,
    InRange,
    /// Улетел дальше range → quiet retire
    Exceeded,
}

/// Pure per-tick check: inactive bodies are skipped before any distance math.
pub fn check_range(projectile: &Projectile, position: Vec2, body_active: bool) -> RangeCheck {
    if !body_active {
        return RangeCheck::Inactive;
    }

    if projectile.is_out_of_range(position) {
        RangeCheck::Exceeded
    } else {
        RangeCheck::InRange
    }
}

/// System: retire projectiles that travelled past their range
pub fn enforce_projectile_range(
    projectiles: Query<(Entity, &Projectile), Without<Retired>>,
    physics: EcsPhysics,
    mut commands: Commands,
) {
    for (entity, projectile) in projectiles.iter() {
        let Some(position) = physics.body_position(entity) else {
            continue;
        };
        let active = physics.is_body_active(entity);

        if check_range(projectile, position, active) == RangeCheck::Exceeded {
            crate::log(&format!(
                "Projectile {:?} out of range ({:.1} from {:?}): quiet retire",
                entity,
                position.distance(projectile.launch_point),
                projectile.launch_point
            ));
            commands.retire_actor(entity, RemovalMode::Quiet);
        }
    }
}
