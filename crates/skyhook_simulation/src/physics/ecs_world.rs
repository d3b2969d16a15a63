//! EcsPhysics - PhysicsWorld поверх rapier компонентов
//!
//! Layout (создаётся factories в `spawn`):
//! - body: Transform + RigidBody + BodyOwner (+ RigidBodyDisabled после retire)
//! - fixture: дочерняя entity с Collider (+ Sensor), локальный Transform
//!
//! Collider прямо на body entity тоже поддерживается (body сам себе fixture).
//! Масштаб fixtures считаем единичным.

use bevy::ecs::system::SystemParam;
use bevy::math::bounding::{Aabb2d, IntersectsVolume};
use bevy::prelude::*;
use bevy_rapier3d::prelude::{Collider, ColliderDisabled, RigidBodyDisabled, Sensor};

use super::{PhysicsWorld, QueryCallback, QueryRegion};
use crate::components::BodyOwner;
use crate::scene::ActorHandle;

type FixtureData = (
    Entity,
    &'static Collider,
    &'static Transform,
    Option<&'static ChildOf>,
    Has<Sensor>,
    Has<ColliderDisabled>,
);

type BodyData = (
    &'static Transform,
    Option<&'static BodyOwner>,
    Option<&'static Children>,
    Has<RigidBodyDisabled>,
);

#[derive(SystemParam)]
pub struct EcsPhysics<'w, 's> {
    fixtures: Query<'w, 's, FixtureData>,
    bodies: Query<'w, 's, BodyData>,
}

/// Conservative broad-phase radius of a collider around its origin.
///
/// Unknown shapes get an unbounded radius: they always reach the exact test.
fn broad_radius(collider: &Collider) -> f32 {
    if let Some(ball) = collider.as_ball() {
        return ball.radius();
    }
    if let Some(cuboid) = collider.as_cuboid() {
        // Описанная окружность: покрывает любой поворот
        return cuboid.half_extents().length();
    }
    f32::INFINITY
}

impl EcsPhysics<'_, '_> {
    /// World pose of a fixture: body transform composed with the local one.
    fn fixture_pose(&self, local: &Transform, parent: Option<&ChildOf>) -> Option<Transform> {
        match parent {
            Some(child_of) => {
                let (body_transform, ..) = self.bodies.get(child_of.parent()).ok()?;
                Some(body_transform.mul_transform(*local))
            }
            None => Some(*local),
        }
    }

    /// Fixtures of disabled bodies are out of the broad phase, as in rapier.
    ///
    /// Без `ChildOf` fixture сам является телом.
    fn in_broad_phase(
        &self,
        fixture: Entity,
        parent: Option<&ChildOf>,
        collider_disabled: bool,
    ) -> bool {
        if collider_disabled {
            return false;
        }
        let body = parent.map_or(fixture, |child_of| child_of.parent());
        self.is_body_active(body)
    }
}

impl PhysicsWorld for EcsPhysics<'_, '_> {
    fn query_region(&self, region: &QueryRegion, callback: &mut dyn QueryCallback) {
        for (fixture, collider, local, parent, _, collider_disabled) in self.fixtures.iter() {
            if !self.in_broad_phase(fixture, parent, collider_disabled) {
                continue;
            }

            let Some(pose) = self.fixture_pose(local, parent) else {
                continue;
            };

            let bound = Aabb2d::new(
                pose.translation.truncate(),
                Vec2::splat(broad_radius(collider)),
            );
            if !bound.intersects(&region.bounds) {
                continue;
            }

            if !callback.report_fixture(fixture) {
                return;
            }
        }
    }

    fn test_point(&self, fixture: Entity, point: Vec2) -> bool {
        let Ok((_, collider, local, parent, ..)) = self.fixtures.get(fixture) else {
            return false;
        };
        let Some(pose) = self.fixture_pose(local, parent) else {
            return false;
        };

        // Плоская игра: точку кладём в плоскость fixture
        collider.contains_point(pose.translation, pose.rotation, point.extend(pose.translation.z))
    }

    fn is_sensor(&self, fixture: Entity) -> bool {
        self.fixtures
            .get(fixture)
            .map(|(.., sensor, _)| sensor)
            .unwrap_or(false)
    }

    fn fixture_body(&self, fixture: Entity) -> Option<Entity> {
        let (_, _, _, parent, ..) = self.fixtures.get(fixture).ok()?;
        if let Some(child_of) = parent {
            return Some(child_of.parent());
        }

        // Collider прямо на теле
        let (_, owner, ..) = self.bodies.get(fixture).ok()?;
        owner.map(|_| fixture)
    }

    fn first_fixture(&self, body: Entity) -> Option<Entity> {
        let (_, _, children, _) = self.bodies.get(body).ok()?;

        if let Some(children) = children {
            let children: &[Entity] = children;
            if let Some(first) = children
                .iter()
                .copied()
                .find(|child| self.fixtures.contains(*child))
            {
                return Some(first);
            }
        }

        self.fixtures.contains(body).then_some(body)
    }

    fn body_owner(&self, body: Entity) -> Option<ActorHandle> {
        let (_, owner, ..) = self.bodies.get(body).ok()?;
        owner.map(|owner| owner.0)
    }

    fn is_body_active(&self, body: Entity) -> bool {
        self.bodies
            .get(body)
            .map(|(.., disabled)| !disabled)
            .unwrap_or(false)
    }

    fn body_position(&self, body: Entity) -> Option<Vec2> {
        let (transform, ..) = self.bodies.get(body).ok()?;
        Some(transform.translation.truncate())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::ecs::system::SystemState;
    use bevy_rapier3d::prelude::RigidBody;

    fn fixtures_near(world: &mut World, point: Vec2) -> Vec<Entity> {
        let mut state: SystemState<EcsPhysics> = SystemState::new(world);
        let physics = state.get(world);

        let mut found = Vec::new();
        physics.query_region(&QueryRegion::around(point, 0.1), &mut |fixture: Entity| {
            found.push(fixture);
            true
        });
        found
    }

    #[test]
    fn test_disabled_body_with_own_collider_leaves_broad_phase() {
        let mut world = World::new();
        let body = world
            .spawn((
                Transform::from_xyz(2.0, 0.0, 0.0),
                RigidBody::Fixed,
                Collider::ball(0.5),
            ))
            .id();

        assert_eq!(fixtures_near(&mut world, Vec2::new(2.0, 0.0)), vec![body]);

        world.entity_mut(body).insert(RigidBodyDisabled);
        assert!(fixtures_near(&mut world, Vec2::new(2.0, 0.0)).is_empty());
    }

    #[test]
    fn test_disabled_parent_hides_child_fixture() {
        let mut world = World::new();
        let body = world
            .spawn((Transform::from_xyz(-1.0, 1.0, 0.0), RigidBody::Dynamic))
            .id();
        let fixture = world
            .spawn((Collider::ball(0.5), Transform::default(), ChildOf(body)))
            .id();

        assert_eq!(fixtures_near(&mut world, Vec2::new(-1.0, 1.0)), vec![fixture]);

        world.entity_mut(body).insert(RigidBodyDisabled);
        assert!(fixtures_near(&mut world, Vec2::new(-1.0, 1.0)).is_empty());
    }
}
