//! SKYHOOK Simulation Core
//!
//! ECS bridge между акторами игры и rapier физикой (Bevy 0.16).
//! Плоская игра: всё живёт в плоскости XY (z = 0).
//!
//! Домены:
//! - locator: точка мира → enabled актор под ней (region query)
//! - projectile: collision dispatch + range cap брошенных снарядов
//! - scene: registry акторов (z layers), factories, retire
//! - physics: PhysicsWorld протокол + адаптер поверх rapier компонентов
//!
//! Rapier (RapierPhysicsPlugin) подключает host. Headless прогоны и тесты
//! обходятся без него: HeadlessMotionPlugin двигает тела по Velocity.

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::time::Duration;

// Публичные модули
pub mod components;
pub mod config;
pub mod locator;
pub mod logger;
pub mod physics;
pub mod projectile;
pub mod scene;

// Re-export базовых типов для удобства
pub use components::*;
pub use config::{BridgeConfig, ConfigError};
pub use locator::{locate_in_world, ActorLocated, LocateActor, LocatorPlugin, SpatialActorLocator};
pub use logger::{init_logger, log, log_error, log_info, log_warning, LogLevel, LogPrinter};
pub use physics::{EcsPhysics, HeadlessMotionPlugin, PhysicsWorld};
pub use projectile::{
    spawn_projectile, throw_in_world, throw_projectile, ProjectilePlugin, ProjectileShape,
    ProjectileSpec,
};
pub use scene::{
    spawn_actor, spawn_in_world, spawn_obstacle, ActorHandle, ActorRegistry, ActorRetired,
    ActorSpec, FixtureShape, FixtureSpec, RetireCommandsExt,
};

/// Порядок bridge систем внутри Update
///
/// Dispatch (контакты прошлого physics step) → Lifecycle (range cap,
/// до отрисовки) → Locate (pointer/UI запросы видят уже удалённых).
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum BridgeSet {
    Dispatch,
    Lifecycle,
    Locate,
}

/// Главный plugin симуляции (объединяет все подсистемы)
///
/// `BridgeConfig` можно вставить до plugin'а, иначе берётся default.
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        let config = app
            .world()
            .get_resource::<BridgeConfig>()
            .cloned()
            .unwrap_or_default();

        logger::set_log_level(config.log_level);

        app.insert_resource(Time::<Fixed>::from_hz(config.fixed_hz))
            .insert_resource(config)
            .configure_sets(
                Update,
                (BridgeSet::Dispatch, BridgeSet::Lifecycle, BridgeSet::Locate).chain(),
            )
            .add_plugins((ProjectilePlugin, LocatorPlugin));
    }
}

/// Детерминистичный RNG resource (seeded)
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

/// Создаёт minimal Bevy App для headless симуляции
///
/// Время шагает фиксированно (1/60 s на update): прогоны воспроизводимы.
pub fn create_headless_app(seed: u64) -> App {
    let mut app = App::new();
    init_logger();
    app.add_plugins(MinimalPlugins)
        .insert_resource(DeterministicRng::new(seed))
        .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f64(
            1.0 / 60.0,
        )))
        .insert_resource(Time::<Fixed>::from_hz(60.0)); // 60Hz FixedUpdate

    app
}

/// Snapshot мира для сравнения детерминизма
pub fn world_snapshot<T: Component>(world: &mut World) -> Vec<u8>
where
    T: std::fmt::Debug,
{
    let mut snapshot = Vec::new();
    let mut query = world.query::<(Entity, &T)>();
    let mut entities: Vec<_> = query.iter(world).collect();

    // Сортируем по Entity ID для детерминизма
    entities.sort_by_key(|(entity, _)| entity.index());

    for (entity, component) in entities {
        snapshot.extend_from_slice(&entity.index().to_le_bytes());
        snapshot.extend_from_slice(format!("{:?}", component).as_bytes());
    }

    snapshot
}
