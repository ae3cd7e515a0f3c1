//! Коллабораторы сбора: event sink (score) и visual effect sink.

use bevy::prelude::*;

use crate::collection::CollectEffectRequested;
use crate::error::EffectError;

/// Получатель события сбора (score tracker и т.п.)
///
/// Вызывается ровно один раз на каждый контакт; реализация должна
/// спокойно переносить вызов на каждом контакте.
pub trait CollectionSink {
    fn notify_collected(&mut self);
}

/// Визуальный коллаборатор: "эффект сбора в позиции агента"
///
/// Fire-and-forget. Ошибка только логируется.
pub trait EffectSink {
    fn spawn_collect_effect(&mut self, position: Vec3) -> Result<(), EffectError>;
}

/// Счёт собранных targets (UI читает `label()`)
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq, Reflect)]
#[reflect(Resource)]
pub struct Score {
    pub collected: u32,
}

impl Score {
    pub fn label(&self) -> String {
        format!("SCORE: {}", self.collected)
    }
}

impl CollectionSink for Score {
    fn notify_collected(&mut self) {
        self.collected = self.collected.saturating_add(1);
    }
}

/// ECS adapter: эффект = событие для rendering слоя
impl EffectSink for EventWriter<'_, CollectEffectRequested> {
    fn spawn_collect_effect(&mut self, position: Vec3) -> Result<(), EffectError> {
        self.write(CollectEffectRequested { position });
        Ok(())
    }
}
