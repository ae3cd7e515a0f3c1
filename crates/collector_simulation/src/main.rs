//! Headless симуляция Collector
//!
//! Запускает Bevy App без рендера: агент собирает targets, которые
//! появляются по таймеру в случайных точках плоскости.
//!
//! Использование: collector_simulation [config.json]

use std::time::Duration;

use bevy::time::TimeUpdateStrategy;
use collector_simulation::{
    create_headless_app, set_log_level, CollectorConfig, CollectorPlugin, Score, TargetRegistry,
};

const TICKS: usize = 3000;

fn main() {
    let mut config = match std::env::args().nth(1) {
        Some(path) => match CollectorConfig::load(&path) {
            Ok(config) => config,
            Err(err) => {
                eprintln!("Failed to load config {}: {}", path, err);
                std::process::exit(1);
            }
        },
        None => CollectorConfig::default(),
    };

    set_log_level(config.log_level);

    if config.spawn_interval_secs.is_none() {
        config.spawn_interval_secs = Some(1.5);
    }

    println!(
        "Starting Collector headless simulation (seed: {}, {}Hz)",
        config.seed, config.fixed_hz
    );

    let frame = Duration::from_secs_f64(1.0 / config.fixed_hz);
    let mut app = create_headless_app(config.seed);
    app.add_plugins(CollectorPlugin::new(config))
        // Один frame = один physics tick, независимо от wall clock
        .insert_resource(TimeUpdateStrategy::ManualDuration(frame));

    for tick in 0..TICKS {
        app.update();

        if tick % 250 == 0 {
            let world = app.world();
            let active = world.resource::<TargetRegistry>().len();
            let score = world.resource::<Score>();
            println!("Tick {}: {} active targets, {}", tick, active, score.label());
        }
    }

    let score = app.world().resource::<Score>();
    println!("Simulation complete! {}", score.label());
}
