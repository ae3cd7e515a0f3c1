//! Collection events
//!
//! Асинхронные входы (spawn, contact) не мутируют registry посреди тика:
//! они ставятся в очередь как CollectorCommand и применяются атомарно
//! первой системой следующего FixedUpdate тика.

use bevy::prelude::*;

/// Команда для core (очередь, применяется в начале physics тика)
///
/// Генерируется:
/// - spawner (SpawnTargetRequest → SpawnTarget с позицией на плоскости)
/// - contact detection (proximity или Rapier CollisionEvent → Contact)
///
/// Обрабатывается:
/// - apply_collector_commands
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub enum CollectorCommand {
    /// Создать target в world coordinates (уже в пределах плоскости)
    SpawnTarget { position: Vec3 },
    /// Агент коснулся target (ровно один раз на overlap)
    Contact { target: Entity },
}

/// Event: target собран (наблюдатели: UI, аудио, статистика)
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct TargetCollected {
    pub target: Entity,
    /// Был ли target активным в момент контакта
    pub removed: bool,
    pub was_selected: bool,
    pub agent_position: Vec3,
}

/// Event: запрос косметического эффекта в позиции агента
///
/// Fire-and-forget - отсутствие обработчика ни на что не влияет.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct CollectEffectRequested {
    pub position: Vec3,
}
