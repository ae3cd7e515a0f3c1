//! Collection systems (применение очереди команд).

use bevy::prelude::*;

use crate::collection::{CollectEffectRequested, CollectorCommand, Score, TargetCollected};
use crate::motion::MotionController;
use crate::physics::target_collider;
use crate::targeting::{CollectibleTarget, Target, TargetRegistry};

/// Радиус сферы-target (коллайдер для Rapier режима)
pub const TARGET_RADIUS: f32 = 0.5;

/// Система: применить накопленные CollectorCommand
///
/// Первая система FixedUpdate цепочки: после неё registry стабилен
/// до конца тика (motion не увидит target, удалённый посреди тика).
pub fn apply_collector_commands(
    mut commands: Commands,
    mut queue: EventReader<CollectorCommand>,
    mut registry: ResMut<TargetRegistry>,
    mut controller: ResMut<MotionController>,
    mut score: ResMut<Score>,
    mut effects: EventWriter<CollectEffectRequested>,
    mut collected: EventWriter<TargetCollected>,
) {
    for command in queue.read() {
        match *command {
            CollectorCommand::SpawnTarget { position } => {
                let entity = commands
                    .spawn((
                        CollectibleTarget,
                        Transform::from_translation(position),
                        target_collider(TARGET_RADIUS),
                    ))
                    .id();

                if let Err(err) = registry.add_target(Target::new(entity, position), controller.position()) {
                    // Свежий entity не может быть дубликатом - но не роняем тик
                    crate::log_error(&format!("apply_collector_commands: {}", err));
                    commands.entity(entity).despawn();
                }
            }

            CollectorCommand::Contact { target } => {
                let outcome = controller.on_contact(&mut registry, target, &mut *score, &mut effects);

                if outcome.removed {
                    commands.entity(target).despawn();
                }

                crate::log(&format!(
                    "Contact with {:?} (removed: {}, was selected: {}) → next {:?}",
                    target, outcome.removed, outcome.was_selected, outcome.next_target
                ));

                collected.write(TargetCollected {
                    target,
                    removed: outcome.removed,
                    was_selected: outcome.was_selected,
                    agent_position: outcome.agent_position,
                });
            }
        }
    }
}

/// Система: лог счёта после сборов (UI stand-in)
pub fn report_collections(mut collected: EventReader<TargetCollected>, score: Res<Score>) {
    if collected.read().count() > 0 {
        crate::log_info(&score.label());
    }
}
