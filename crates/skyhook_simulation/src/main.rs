//! Headless симуляция SKYHOOK
//!
//! Бросает пачку снарядов со случайными скоростями (seeded RNG), гоняет
//! симуляцию без рендера и логирует retire / locate результаты.
//!
//! Usage: skyhook_simulation [config.ron]

use bevy::prelude::*;
use rand::Rng;
use skyhook_simulation::{
    create_headless_app, log, log_error, log_info, spawn_in_world, spawn_obstacle,
    spawn_projectile, throw_in_world, ActorKind, ActorLocated, ActorRegistry, ActorRetired,
    ActorSpec, BridgeConfig, DeterministicRng, HeadlessMotionPlugin, LocateActor, Obstacle,
    ProjectileSpec, SimulationPlugin,
};

const PROJECTILE_COUNT: usize = 16;
const TICK_COUNT: usize = 600;

fn log_retirements(mut retired: EventReader<ActorRetired>) {
    for event in retired.read() {
        log_info(&format!(
            "{:?} {:?} retired ({:?})",
            event.kind, event.actor, event.mode
        ));
    }
}

fn log_locates(mut located: EventReader<ActorLocated>) {
    for event in located.read() {
        log_info(&format!("Locate {:?} → {:?}", event.point, event.actor));
    }
}

fn main() {
    let seed = 42;
    let mut app = create_headless_app(seed);

    let config = match std::env::args().nth(1) {
        Some(path) => match BridgeConfig::load(&path) {
            Ok(config) => config,
            Err(err) => {
                log_error(&format!("Config error: {}", err));
                std::process::exit(1);
            }
        },
        None => BridgeConfig::default(),
    };

    log_info(&format!("Starting SKYHOOK headless simulation (seed: {})", seed));

    app.insert_resource(config.clone())
        .add_plugins((SimulationPlugin, HeadlessMotionPlugin))
        .add_systems(Update, (log_retirements, log_locates));

    let world = app.world_mut();

    spawn_in_world(world, |commands, registry| {
        let wall = ActorSpec::rect(ActorKind::Generic, Vec2::new(0.0, -5.0), 20.0, 0.5);
        spawn_obstacle(commands, registry, &wall, Obstacle::default())
    });

    for i in 0..PROJECTILE_COUNT {
        let velocity = {
            let mut rng = world.resource_mut::<DeterministicRng>();
            Vec2::new(rng.rng.gen_range(-40.0..40.0), rng.rng.gen_range(-40.0..40.0))
        };

        let spec = ProjectileSpec::from_config(&config, 0.5, 0.5, Vec2::ZERO)
            .with_range(50.0 + i as f32 * 10.0)
            .with_z_layer(1);
        let projectile = spawn_in_world(world, |commands, registry| {
            spawn_projectile(commands, registry, &spec)
        });
        throw_in_world(world, projectile, Vec2::ZERO, velocity);
    }

    for tick in 0..TICK_COUNT {
        if tick % 100 == 0 {
            app.world_mut().send_event(LocateActor {
                point: Vec2::new(0.0, -5.0),
            });

            let live = app.world().resource::<ActorRegistry>().len();
            log(&format!("Tick {}: {} live actors", tick, live));
        }

        app.update();
    }

    let live = app.world().resource::<ActorRegistry>().len();
    log_info(&format!("Simulation complete! {} live actors", live));
}
