//! Projectile - брошенный актор с ограниченной дальностью

use bevy::prelude::*;

use crate::config::DEFAULT_PROJECTILE_RANGE;

/// Данные снаряда (живут на акторе с `ActorKind::Projectile`)
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct Projectile {
    /// Точка броска (записывается при spawn/throw)
    pub launch_point: Vec2,

    /// Максимальная дистанция от launch_point, дальше: тихий retire.
    /// Без этого в side-scroller'ах снаряды улетают за экран навсегда.
    pub range: f32,

    /// При столкновении двух снарядов (не sensors) реагирующий исчезает.
    /// false: оба остаются на экране.
    pub disappear_on_collide: bool,

    /// Урон (читает host, bridge его не применяет)
    pub damage: u32,
}

impl Default for Projectile {
    fn default() -> Self {
        Self {
            launch_point: Vec2::ZERO,
            range: DEFAULT_PROJECTILE_RANGE,
            disappear_on_collide: true,
            damage: 0,
        }
    }
}

impl Projectile {
    pub fn new(launch_point: Vec2, range: f32) -> Self {
        Self {
            launch_point,
            range,
            ..default()
        }
    }

    pub fn with_damage(mut self, damage: u32) -> Self {
        self.damage = damage;
        self
    }

    pub fn with_disappear_on_collide(mut self, disappear: bool) -> Self {
        self.disappear_on_collide = disappear;
        self
    }

    /// True once `position` is strictly farther than `range` from the launch point.
    ///
    /// Squared comparison, runs for every live projectile every tick.
    pub fn is_out_of_range(&self, position: Vec2) -> bool {
        let dx = position.x - self.launch_point.x;
        let dy = position.y - self.launch_point.y;
        dx * dx + dy * dy > self.range * self.range
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_boundary_is_strict() {
        let projectile = Projectile::new(Vec2::ZERO, 5.0);

        // 3² + 4² = 25 = 5² → ещё в пределах
        assert!(!projectile.is_out_of_range(Vec2::new(3.0, 4.0)));
        // 3² + 5² = 34 > 25
        assert!(projectile.is_out_of_range(Vec2::new(3.0, 5.0)));
    }

    #[test]
    fn test_range_measured_from_launch_point() {
        let projectile = Projectile::new(Vec2::new(10.0, -2.0), 1.0);

        assert!(!projectile.is_out_of_range(Vec2::new(10.5, -2.5)));
        assert!(projectile.is_out_of_range(Vec2::new(8.0, -2.0)));
    }

    #[test]
    fn test_defaults() {
        let projectile = Projectile::default().with_damage(7);
        assert!(projectile.disappear_on_collide);
        assert_eq!(projectile.damage, 7);
        assert_eq!(projectile.range, DEFAULT_PROJECTILE_RANGE);
    }
}
