//! Tests for projectile contact decisions.

#[cfg(test)]
mod tests {
    use super::super::dispatch::{decide, reacting_side, ContactOutcome, OtherParticipant};
    use crate::components::{ActorKind, Projectile};
    use crate::scene::ResolvedActor;
    use bevy::prelude::*;

    fn other(kind: ActorKind, handler: bool, first_sensor: Option<bool>) -> OtherParticipant {
        OtherParticipant {
            kind,
            has_projectile_handler: handler,
            first_fixture_is_sensor: first_sensor,
        }
    }

    fn resolved(index: u32, kind: ActorKind) -> ResolvedActor {
        ResolvedActor {
            entity: Entity::from_raw(index),
            enabled: true,
            kind,
        }
    }

    #[test]
    fn test_obstacle_handler_takes_over() {
        let projectile = Projectile::default();

        // Даже solid obstacle: handler решает сам, projectile не удаляется
        let outcome = decide(&projectile, &other(ActorKind::Obstacle, true, Some(false)));
        assert_eq!(outcome, ContactOutcome::ForwardToHandler);

        let outcome = decide(&projectile, &other(ActorKind::Obstacle, true, Some(true)));
        assert_eq!(outcome, ContactOutcome::ForwardToHandler);
    }

    #[test]
    fn test_obstacle_without_handler_removes() {
        let projectile = Projectile::default();

        let outcome = decide(&projectile, &other(ActorKind::Obstacle, false, Some(false)));
        assert_eq!(outcome, ContactOutcome::Remove);
    }

    #[test]
    fn test_sensor_never_removes() {
        for disappear in [true, false] {
            let projectile = Projectile::default().with_disappear_on_collide(disappear);

            for kind in [
                ActorKind::Generic,
                ActorKind::Hero,
                ActorKind::Enemy,
                ActorKind::Obstacle,
                ActorKind::Projectile,
            ] {
                let outcome = decide(&projectile, &other(kind, false, Some(true)));
                assert_eq!(outcome, ContactOutcome::Ignore, "kind = {:?}", kind);
            }
        }
    }

    #[test]
    fn test_projectiles_persist_without_disappear() {
        let projectile = Projectile::default().with_disappear_on_collide(false);

        let outcome = decide(&projectile, &other(ActorKind::Projectile, false, Some(false)));
        assert_eq!(outcome, ContactOutcome::Ignore);

        // Не-projectile участник: флаг не влияет
        let outcome = decide(&projectile, &other(ActorKind::Enemy, false, Some(false)));
        assert_eq!(outcome, ContactOutcome::Remove);
    }

    #[test]
    fn test_projectile_pair_with_disappear_removes() {
        let projectile = Projectile::default();

        let outcome = decide(&projectile, &other(ActorKind::Projectile, false, Some(false)));
        assert_eq!(outcome, ContactOutcome::Remove);
    }

    #[test]
    fn test_handler_only_counts_for_obstacles() {
        let projectile = Projectile::default();

        // Флаг handler у не-obstacle игнорируется
        let outcome = decide(&projectile, &other(ActorKind::Enemy, true, Some(false)));
        assert_eq!(outcome, ContactOutcome::Remove);
    }

    #[test]
    fn test_body_without_fixtures_is_ignored() {
        let projectile = Projectile::default();

        let outcome = decide(&projectile, &other(ActorKind::Generic, false, None));
        assert_eq!(outcome, ContactOutcome::Ignore);
    }

    #[test]
    fn test_reacting_side_selection() {
        let projectile = resolved(1, ActorKind::Projectile);
        let wall = resolved(2, ActorKind::Obstacle);

        assert_eq!(reacting_side(projectile, wall), Some((projectile, wall)));
        assert_eq!(reacting_side(wall, projectile), Some((projectile, wall)));

        // Два projectile: реагирует первый участник события
        let second = resolved(3, ActorKind::Projectile);
        assert_eq!(reacting_side(second, projectile), Some((second, projectile)));

        // Без projectile: не наш контакт
        let hero = resolved(4, ActorKind::Hero);
        assert_eq!(reacting_side(hero, wall), None);
    }
}
