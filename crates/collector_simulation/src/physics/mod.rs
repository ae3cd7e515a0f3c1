//! Physics collaborator - интеграция позиции и детекция контакта
//!
//! Два режима контакта (ContactDetection):
//! - Proximity: headless, расстояние агент↔target ≤ contact_radius
//! - Rapier: sensor коллайдеры + CollisionEvent::Started от bevy_rapier3d
//!
//! В обоих режимах результат - CollectorCommand::Contact в очереди,
//! применяется в начале следующего physics тика.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;
use serde::{Deserialize, Serialize};

use crate::collection::CollectorCommand;
use crate::motion::{Collector, MotionController};
use crate::targeting::CollectibleTarget;

// Tests (separate files with _tests suffix)
#[cfg(test)]
mod rapier_contacts_tests;

/// Кто детектирует контакт
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Reflect)]
#[serde(rename_all = "snake_case")]
pub enum ContactDetection {
    #[default]
    Proximity,
    Rapier,
}

/// Параметры детекции контакта
#[derive(Resource, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Resource)]
pub struct ContactSettings {
    pub detection: ContactDetection,
    pub radius: f32,
}

impl Default for ContactSettings {
    fn default() -> Self {
        Self {
            detection: ContactDetection::Proximity,
            radius: 0.75,
        }
    }
}

/// Run condition: headless proximity детекция
pub fn proximity_contacts_enabled(settings: Res<ContactSettings>) -> bool {
    settings.detection == ContactDetection::Proximity
}

/// Run condition: контакт от Rapier
pub fn rapier_contacts_enabled(settings: Res<ContactSettings>) -> bool {
    settings.detection == ContactDetection::Rapier
}

/// Система интеграции velocity → position (FixedUpdate)
///
/// Агент - KinematicPositionBased: Rapier берёт позицию из Transform,
/// поэтому интегрируем сами в обоих режимах.
pub fn integrate_agent_velocity(time: Res<Time<Fixed>>, mut controller: ResMut<MotionController>) {
    controller.integrate(time.delta_secs());
}

/// Система: headless детекция контакта по дистанции
///
/// Target собирается один раз: после Contact он удаляется в начале
/// следующего тика, до повторной проверки.
pub fn detect_proximity_contacts(
    settings: Res<ContactSettings>,
    controller: Res<MotionController>,
    targets: Query<(Entity, &Transform), With<CollectibleTarget>>,
    mut queue: EventWriter<CollectorCommand>,
) {
    let agent = controller.position();

    for (entity, transform) in targets.iter() {
        if agent.distance(transform.translation) <= settings.radius {
            queue.write(CollectorCommand::Contact { target: entity });
        }
    }
}

/// Система: Rapier CollisionEvent → CollectorCommand::Contact
///
/// Реагируем только на Started между агентом и target (в любом порядке).
pub fn forward_rapier_contacts(
    mut collisions: EventReader<CollisionEvent>,
    agents: Query<(), With<Collector>>,
    targets: Query<(), With<CollectibleTarget>>,
    mut queue: EventWriter<CollectorCommand>,
) {
    for collision in collisions.read() {
        let CollisionEvent::Started(first, second, _) = *collision else {
            continue;
        };

        let target = if agents.contains(first) && targets.contains(second) {
            second
        } else if agents.contains(second) && targets.contains(first) {
            first
        } else {
            continue;
        };

        queue.write(CollectorCommand::Contact { target });
    }
}

/// Sensor коллайдер для target (сфера)
pub fn target_collider(radius: f32) -> impl Bundle {
    (
        Collider::ball(radius),
        Sensor,
        ActiveEvents::COLLISION_EVENTS,
        ActiveCollisionTypes::all(),
    )
}

/// Spawn helper для агента
///
/// - Collector marker + Transform (синхронизируется из MotionController)
/// - Rapier: KinematicPositionBased + куб 1x1x1 с collision events
pub fn spawn_collector_agent(commands: &mut Commands, transform: Transform) -> Entity {
    commands
        .spawn((
            Collector,
            transform,
            RigidBody::KinematicPositionBased,
            Collider::cuboid(0.5, 0.5, 0.5),
            ActiveEvents::COLLISION_EVENTS,
            ActiveCollisionTypes::all(),
        ))
        .id()
}

/// Startup система: агент в стартовой позиции контроллера
pub fn setup_collector_agent(mut commands: Commands, controller: Res<MotionController>) {
    let agent = spawn_collector_agent(&mut commands, controller.transform());
    crate::log_info(&format!(
        "Collector agent {:?} spawned at {:?}",
        agent,
        controller.position()
    ));
}
