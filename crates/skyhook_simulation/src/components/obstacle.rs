//! Obstacle - статичный актор с опциональной реакцией на снаряды

use bevy::prelude::*;
use std::sync::Arc;

use crate::physics::Contact;

/// Custom reaction of an obstacle to a projectile hit.
///
/// Arguments: `(obstacle, projectile, contact, commands)`. When present the
/// handler owns the outcome: the dispatcher does not remove the projectile.
pub type ProjectileCollisionHandler =
    Arc<dyn Fn(Entity, Entity, &Contact, &mut Commands) + Send + Sync>;

/// Препятствие (стены, платформы, мишени)
#[derive(Component, Clone, Default)]
pub struct Obstacle {
    pub on_projectile_collision: Option<ProjectileCollisionHandler>,
}

impl Obstacle {
    pub fn with_projectile_handler<F>(handler: F) -> Self
    where
        F: Fn(Entity, Entity, &Contact, &mut Commands) + Send + Sync + 'static,
    {
        Self {
            on_projectile_collision: Some(Arc::new(handler)),
        }
    }

    pub fn has_projectile_handler(&self) -> bool {
        self.on_projectile_collision.is_some()
    }
}

impl std::fmt::Debug for Obstacle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Obstacle")
            .field("has_projectile_handler", &self.has_projectile_handler())
            .finish()
    }
}
