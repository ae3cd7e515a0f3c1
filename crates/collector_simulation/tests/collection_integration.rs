//! Collection integration test
//!
//! Полный headless App (CollectorPlugin): spawn → pursuit → contact → score.
//! Время ручное: каждый app.update() = ровно один physics tick (20ms).
//!
//! Проверяем:
//! - все targets собраны, агент уходит в Idle
//! - более близкий target перехватывает выбор
//! - Contact для неизвестного target только увеличивает счёт

use std::time::Duration;

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use collector_simulation::*;

/// Позиции запрошенных эффектов (rendering stand-in)
#[derive(Resource, Default)]
struct EffectLog {
    positions: Vec<Vec3>,
}

fn record_effects(mut requests: EventReader<CollectEffectRequested>, mut log: ResMut<EffectLog>) {
    for request in requests.read() {
        log.positions.push(request.position);
    }
}

/// Helper: headless App с CollectorPlugin и ручным временем
fn create_collector_app(config: CollectorConfig) -> App {
    let frame = Duration::from_secs_f64(1.0 / config.fixed_hz);
    let mut app = create_headless_app(config.seed);

    app.add_plugins(CollectorPlugin::new(config))
        .insert_resource(TimeUpdateStrategy::ManualDuration(frame))
        .init_resource::<EffectLog>()
        .add_systems(Update, record_effects);

    app
}

fn run_ticks(app: &mut App, ticks: usize) {
    for _ in 0..ticks {
        app.update();
    }
}

fn request_targets(app: &mut App, positions: &[Vec3]) {
    for position in positions {
        app.world_mut().send_event(SpawnTargetRequest::at(*position));
    }
}

/// Entity target'а в заданной позиции
fn target_at(app: &mut App, position: Vec3) -> Entity {
    let world = app.world_mut();
    let mut query = world.query_filtered::<(Entity, &Transform), With<CollectibleTarget>>();
    query
        .iter(world)
        .find(|(_, transform)| transform.translation.distance(position) < 1e-4)
        .map(|(entity, _)| entity)
        .expect("target should be spawned")
}

fn target_count(app: &mut App) -> usize {
    let world = app.world_mut();
    let mut query = world.query_filtered::<Entity, With<CollectibleTarget>>();
    query.iter(world).count()
}

/// Test: три target по курсу - все собраны, агент в Idle
#[test]
fn test_collects_all_targets_ahead() {
    let mut app = create_collector_app(CollectorConfig::default());
    request_targets(
        &mut app,
        &[
            Vec3::new(0.0, 0.0, -2.0),
            Vec3::new(0.0, 0.0, -3.5),
            Vec3::new(0.0, 0.0, -5.0),
        ],
    );

    run_ticks(&mut app, 3);
    assert_eq!(app.world().resource::<TargetRegistry>().len(), 3);
    assert_eq!(target_count(&mut app), 3);

    run_ticks(&mut app, 300);

    let world = app.world();
    let registry = world.resource::<TargetRegistry>();
    let controller = world.resource::<MotionController>();

    assert_eq!(world.resource::<Score>().collected, 3);
    assert!(registry.is_empty());
    assert_eq!(registry.selected(), None);
    assert_eq!(controller.current_speed(), 0.0);
    assert_eq!(controller.velocity(), Vec3::ZERO);
    assert_eq!(controller.agent_state(registry), AgentState::Idle);
    assert_eq!(world.resource::<EffectLog>().positions.len(), 3);
    assert_eq!(target_count(&mut app), 0);
}

/// Test: агент Transform следует за MotionController
#[test]
fn test_agent_transform_follows_controller() {
    let mut app = create_collector_app(CollectorConfig::default());
    request_targets(&mut app, &[Vec3::new(0.0, 0.0, -5.0)]);

    run_ticks(&mut app, 20);

    let expected = app.world().resource::<MotionController>().position();
    assert!(expected.z < 0.0, "agent did not move: {:?}", expected);

    let world = app.world_mut();
    let mut agents = world.query_filtered::<&Transform, With<Collector>>();
    let transforms: Vec<_> = agents.iter(world).collect();
    assert_eq!(transforms.len(), 1);
    assert!(transforms[0].translation.distance(expected) < 1e-5);
}

/// Test: более близкий target добавлен во время преследования
#[test]
fn test_closer_target_takes_over_pursuit() {
    let mut app = create_collector_app(CollectorConfig::default());
    let far = Vec3::new(0.0, 0.0, -5.0);
    let near = Vec3::new(0.0, 0.0, -2.0);

    request_targets(&mut app, &[far]);
    run_ticks(&mut app, 5);

    let far_entity = target_at(&mut app, far);
    {
        let registry = app.world().resource::<TargetRegistry>();
        assert_eq!(registry.selected(), Some(far_entity));
        assert!((registry.deceleration_threshold().unwrap() - 5.0 / 3.0).abs() < 1e-5);
    }

    request_targets(&mut app, &[near]);
    run_ticks(&mut app, 2);

    let near_entity = target_at(&mut app, near);
    let registry = app.world().resource::<TargetRegistry>();
    assert_eq!(registry.selected(), Some(near_entity));

    // Порог от позиции агента в момент выбора (агент уже проехал часть пути)
    let threshold = registry.deceleration_threshold().unwrap();
    assert!(threshold > 0.0 && threshold < 2.0 / 3.0, "threshold = {}", threshold);
}

/// Test: Contact для target, которого нет в registry
#[test]
fn test_unknown_contact_only_counts() {
    let mut app = create_collector_app(CollectorConfig::default());
    request_targets(&mut app, &[Vec3::new(4.0, 0.0, 4.0)]);
    run_ticks(&mut app, 3);

    let selection_before = app.world().resource::<TargetRegistry>().selection();
    assert!(selection_before.is_some());

    app.world_mut().send_event(CollectorCommand::Contact {
        target: Entity::from_raw(9_999),
    });
    run_ticks(&mut app, 1);

    let world = app.world();
    let registry = world.resource::<TargetRegistry>();
    assert_eq!(world.resource::<Score>().collected, 1);
    assert_eq!(registry.len(), 1);
    assert_eq!(registry.selection(), selection_before);
    assert!(world.resource::<EffectLog>().positions.is_empty());
}

/// Test: spawn вне плоскости прижимается к границе
#[test]
fn test_spawn_request_clamped_to_play_area() {
    let mut app = create_collector_app(CollectorConfig::default());
    request_targets(&mut app, &[Vec3::new(40.0, 2.0, -40.0)]);
    run_ticks(&mut app, 3);

    let registry = app.world().resource::<TargetRegistry>();
    let target = registry.iter().next().copied().expect("target registered");
    assert_eq!(target.position, Vec3::new(5.0, 0.0, -5.0));
}

/// Test: AutoSpawner создаёт targets только внутри плоскости
#[test]
fn test_auto_spawner_stays_in_bounds() {
    let config = CollectorConfig {
        spawn_interval_secs: Some(0.1),
        plane_size_x: 4.0,
        plane_size_z: 6.0,
        ..default()
    };
    let area = config.play_area();
    let mut app = create_collector_app(config);

    run_ticks(&mut app, 60);

    let world = app.world();
    let registry = world.resource::<TargetRegistry>();
    let spawned = registry.len() as u32 + world.resource::<Score>().collected;

    assert!(spawned >= 5, "only {} targets spawned", spawned);
    for target in registry.iter() {
        assert!(area.contains(target.position), "{:?} outside play area", target.position);
    }
}
