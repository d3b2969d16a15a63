//! Locator domain - point → активный актор под ним
//!
//! Один вызов `locate`:
//! 1. строим QueryRegion (квадрат half-width = tolerance вокруг точки)
//! 2. один region query в PhysicsWorld
//! 3. PointToActor: exact test_point → owner → enabled? → стоп
//!
//! Состояние запроса живёт только внутри вызова (никаких полей между вызовами).

use bevy::ecs::system::SystemState;
use bevy::prelude::*;

use crate::config::{BridgeConfig, DEFAULT_QUERY_TOLERANCE};
use crate::physics::{fixture_owner, EcsPhysics, PhysicsWorld, QueryCallback, QueryRegion};
use crate::scene::{ActorIndex, ActorRegistry, SceneActors};


/// Resolves world points to the enabled actor occupying them.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct SpatialActorLocator {
    tolerance: f32,
}

impl Default for SpatialActorLocator {
    fn default() -> Self {
        Self::new(DEFAULT_QUERY_TOLERANCE)
    }
}

impl SpatialActorLocator {
    pub fn new(tolerance: f32) -> Self {
        Self { tolerance }
    }

    pub fn from_config(config: &BridgeConfig) -> Self {
        Self::new(config.query_tolerance)
    }

    pub fn tolerance(&self) -> f32 {
        self.tolerance
    }

    /// Returns the enabled actor whose fixture contains `point`, if any.
    ///
    /// Fixtures are visited in the physics world's order; the first enabled
    /// hit wins. Disabled actors and missing back-references are skipped.
    pub fn locate<W, A>(&self, point: Vec2, world: &W, actors: &A) -> Option<Entity>
    where
        W: PhysicsWorld + ?Sized,
        A: ActorIndex + ?Sized,
    {
        let region = QueryRegion::around(point, self.tolerance);
        let mut callback = PointToActor {
            point,
            world,
            actors,
            found: None,
        };

        world.query_region(&region, &mut callback);
        callback.found
    }
}

/// Per-call query state.
struct PointToActor<'a, W: ?Sized, A: ?Sized> {
    point: Vec2,
    world: &'a W,
    actors: &'a A,
    found: Option<Entity>,
}

impl<W, A> QueryCallback for PointToActor<'_, W, A>
where
    W: PhysicsWorld + ?Sized,
    A: ActorIndex + ?Sized,
{
    fn report_fixture(&mut self, fixture: Entity) -> bool {
        // Broad phase отдаёт AABB кандидатов: проверяем точную форму
        if !self.world.test_point(fixture, self.point) {
            return true;
        }

        let Some(actor) = fixture_owner(self.world, self.actors, fixture) else {
            return true;
        };

        if !actor.enabled {
            return true;
        }

        self.found = Some(actor.entity);
        false
    }
}

/// Event: запрос "что под точкой?" (pointer, UI)
#[derive(Event, Debug, Clone, Copy)]
pub struct LocateActor {
    pub point: Vec2,
}

/// Event: ответ на `LocateActor` (actor = None, если под точкой пусто)
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct ActorLocated {
    pub point: Vec2,
    pub actor: Option<Entity>,
}

/// System: отвечает на все LocateActor запросы кадра
pub fn locate_requested_actors(
    mut requests: EventReader<LocateActor>,
    mut located: EventWriter<ActorLocated>,
    locator: Res<SpatialActorLocator>,
    physics: EcsPhysics,
    actors: SceneActors,
) {
    for request in requests.read() {
        let actor = locator.locate(request.point, &physics, &actors);

        located.write(ActorLocated {
            point: request.point,
            actor,
        });
    }
}

/// Immediate locate against a `World` (host code, tests).
///
/// Uses the `SpatialActorLocator` resource when present, the default
/// tolerance otherwise.
pub fn locate_in_world(world: &mut World, point: Vec2) -> Option<Entity> {
    world.init_resource::<ActorRegistry>();

    let mut state: SystemState<(Option<Res<SpatialActorLocator>>, EcsPhysics, SceneActors)> =
        SystemState::new(world);
    let (locator, physics, actors) = state.get(world);

    let locator = locator.map(|locator| *locator).unwrap_or_default();
    locator.locate(point, &physics, &actors)
}

/// Plugin для locator (resource + LocateActor → ActorLocated)
pub struct LocatorPlugin;

impl Plugin for LocatorPlugin {
    fn build(&self, app: &mut App) {
        let locator = app
            .world()
            .get_resource::<BridgeConfig>()
            .map(SpatialActorLocator::from_config)
            .unwrap_or_default();

        app.insert_resource(locator)
            .init_resource::<ActorRegistry>()
            .add_event::<LocateActor>()
            .add_event::<ActorLocated>()
            .add_systems(
                Update,
                locate_requested_actors.in_set(crate::BridgeSet::Locate),
            );
    }
}
