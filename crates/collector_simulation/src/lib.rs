//! Collector Simulation Core
//!
//! ECS-симуляция на Bevy 0.16: один агент ("Cube") собирает targets ("Spheres")
//! на ограниченной плоскости.
//!
//! Core:
//! - TargetRegistry - активные targets + nearest-выбор (targeting)
//! - MotionController - поворот + профиль скорости (motion)
//!
//! Коллабораторы (тонкие адаптеры вокруг core):
//! - spawner: SpawnTargetRequest → позиция на плоскости
//! - physics: интеграция, proximity/Rapier контакт
//! - collection: очередь команд, Score, эффекты
//!
//! Два такта: motion в FixedUpdate (50Hz), orientation в Update (frame).

use bevy::prelude::*;
use bevy::transform::TransformPlugin;
use bevy_rapier3d::prelude::{
    CollisionEvent, NoUserData, PhysicsSet, RapierPhysicsPlugin, TimestepMode,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

// Публичные модули
pub mod collection;
pub mod config;
pub mod error;
pub mod logger;
pub mod motion;
pub mod physics;
pub mod spawner;
pub mod targeting;

// Re-export базовых типов для удобства
pub use collection::{
    CollectEffectRequested, CollectionSink, CollectorCommand, EffectSink, Score, TargetCollected,
};
pub use config::CollectorConfig;
pub use error::{ConfigError, EffectError, RegistryError};
pub use logger::{init_logger, log, log_error, log_info, log_warning, set_log_level, LogLevel};
pub use motion::{AgentState, Collector, MotionController, SpeedProfile};
pub use physics::{ContactDetection, ContactSettings};
pub use spawner::{AutoSpawner, PlayArea, SpawnTargetRequest};
pub use targeting::{CollectibleTarget, ReselectPolicy, Target, TargetRegistry};

/// Главный plugin симуляции
///
/// Порядок FixedUpdate (physics tick):
/// 1. apply_collector_commands - spawn/contact из очереди (атомарно)
/// 2. update_motion - шаг профиля скорости
/// 3. integrate_agent_velocity - position += velocity * dt
/// 4. sync_agent_transform - Transform агента для Rapier/визуала
/// 5. detect_proximity_contacts - контакт в очередь (Proximity)
/// 6. Rapier step → forward_rapier_contacts (Rapier)
///
/// Порядок Update (frame tick):
/// 1. auto_spawn_targets → process_spawn_requests - новые targets в очередь
/// 2. update_orientation → sync_agent_transform
/// 3. report_collections - счёт в лог
#[derive(Default)]
pub struct CollectorPlugin {
    pub config: CollectorConfig,
}

impl CollectorPlugin {
    pub fn new(config: CollectorConfig) -> Self {
        Self { config }
    }
}

impl Plugin for CollectorPlugin {
    fn build(&self, app: &mut App) {
        let config = &self.config;

        // create_headless_app уже мог поставить seeded RNG
        if !app.world().contains_resource::<DeterministicRng>() {
            app.insert_resource(DeterministicRng::new(config.seed));
        }

        app.insert_resource(Time::<Fixed>::from_hz(config.fixed_hz))
            .insert_resource(config.clone())
            .insert_resource(TargetRegistry::new(config.reselect_policy))
            .insert_resource(MotionController::new(config.agent_start(), config.speed))
            .insert_resource(config.play_area())
            .insert_resource(ContactSettings {
                detection: config.contact_detection,
                radius: config.contact_radius,
            })
            .init_resource::<Score>();

        if let Some(interval) = config.spawn_interval_secs {
            app.insert_resource(AutoSpawner::every(interval));
        }

        // Регистрация событий
        app.add_event::<CollectorCommand>()
            .add_event::<TargetCollected>()
            .add_event::<CollectEffectRequested>()
            .add_event::<SpawnTargetRequest>()
            // Регистрируем до RapierPhysicsPlugin: он только перезаписывает Events ресурс
            .add_event::<CollisionEvent>();

        if config.contact_detection == ContactDetection::Rapier {
            add_rapier_contacts(app, config.fixed_hz);
        }

        app.add_systems(Startup, physics::setup_collector_agent);

        app.add_systems(
            FixedUpdate,
            (
                collection::apply_collector_commands,
                motion::update_motion,
                physics::integrate_agent_velocity,
                motion::sync_agent_transform,
                physics::detect_proximity_contacts.run_if(physics::proximity_contacts_enabled),
            )
                .chain() // Последовательное выполнение для детерминизма
                .before(PhysicsSet::SyncBackend),
        );

        // Rapier step между sync и чтением событий (в Proximity режиме set пустой)
        app.add_systems(
            FixedUpdate,
            physics::forward_rapier_contacts
                .run_if(physics::rapier_contacts_enabled)
                .after(PhysicsSet::Writeback),
        );

        app.add_systems(
            Update,
            (
                spawner::auto_spawn_targets,
                spawner::process_spawn_requests,
                motion::update_orientation,
                motion::sync_agent_transform,
                collection::report_collections,
            )
                .chain(),
        );
    }
}

/// Rapier в FixedUpdate: sensor пересечения агент↔target → CollisionEvent
///
/// Шаг физики = один physics tick, без substeps. TransformPlugin нужен для
/// GlobalTransform коллайдеров (MinimalPlugins его не содержит).
fn add_rapier_contacts(app: &mut App, fixed_hz: f64) {
    if !app.is_plugin_added::<TransformPlugin>() {
        app.add_plugins(TransformPlugin);
    }

    if !app.is_plugin_added::<RapierPhysicsPlugin<NoUserData>>() {
        app.insert_resource(TimestepMode::Fixed {
            dt: (1.0 / fixed_hz) as f32,
            substeps: 1,
        })
        .add_plugins(RapierPhysicsPlugin::<NoUserData>::default().in_fixed_schedule());
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
pub fn create_headless_app(seed: u64) -> App {
    let mut app = App::new();
    init_logger();
    app.add_plugins(MinimalPlugins)
        .insert_resource(DeterministicRng::new(seed))
        .insert_resource(Time::<Fixed>::from_hz(50.0)); // 50Hz FixedUpdate

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

    // Сериализуем в байты через Debug (простейший способ)
    for (entity, component) in entities {
        snapshot.extend_from_slice(&entity.index().to_le_bytes());
        snapshot.extend_from_slice(format!("{:?}", component).as_bytes());
    }

    snapshot
}
