//! Базовые компоненты акторов: Actor, ActorKind, BodyOwner, Retired

use bevy::prelude::*;

use crate::scene::ActorHandle;

/// Closed set of actor kinds the bridge distinguishes.
///
/// Collision dispatch matches on this tag instead of probing components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Reflect)]
pub enum ActorKind {
    #[default]
    Generic,
    Hero,
    Enemy,
    Obstacle,
    Projectile,
}

/// Актор: игровая сущность с ровно одним физическим телом
///
/// Entity актора и есть его тело (несёт `RigidBody`); fixtures: дочерние entity.
/// Инвариант: disabled актор никогда не возвращается из spatial query.
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct Actor {
    pub enabled: bool,
    pub kind: ActorKind,
}

impl Default for Actor {
    fn default() -> Self {
        Self::new(ActorKind::Generic)
    }
}

impl Actor {
    pub fn new(kind: ActorKind) -> Self {
        Self { enabled: true, kind }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn is_projectile(&self) -> bool {
        self.kind == ActorKind::Projectile
    }
}

/// Weak back-reference from a physics body to the actor that owns it.
///
/// Lookup only: the handle is an index into `ActorRegistry` and stops
/// resolving once the actor is retired, it never dangles.
/// Set once at construction, never reassigned.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Reflect)]
#[reflect(Component)]
pub struct BodyOwner(pub ActorHandle);

/// How an actor leaves the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub enum RemovalMode {
    /// Без каких-либо side effects (range cap)
    Quiet,
    /// Обычное удаление по контакту (host может проиграть звук)
    Audible,
}

/// Маркер: актор выведен из симуляции (terminal state)
///
/// Тело деактивировано (`RigidBodyDisabled`), актор disabled, handle освобождён.
/// Деспавн не автоматический: entity остаётся до решения host'а.
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct Retired {
    pub mode: RemovalMode,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_actor_is_enabled() {
        let actor = Actor::new(ActorKind::Obstacle);
        assert!(actor.is_enabled());
        assert_eq!(actor.kind, ActorKind::Obstacle);
        assert!(!actor.is_projectile());
    }

    #[test]
    fn test_default_actor_is_generic() {
        let actor = Actor::default();
        assert_eq!(actor.kind, ActorKind::Generic);
        assert!(Actor::new(ActorKind::Projectile).is_projectile());
    }
}
