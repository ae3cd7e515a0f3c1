//! Error types симуляции
//!
//! Ни одна из этих ошибок не пересекает границу тика: системы логируют
//! и продолжают (per-tick операции тотальны).

use bevy::prelude::Entity;
use thiserror::Error;

/// Ошибки TargetRegistry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// Повторный add с тем же id - отклоняем, состояние не меняется
    #[error("target {0:?} is already registered")]
    DuplicateTarget(Entity),

    /// remove/contact для target не из activeTargets - no-op
    #[error("target {0:?} is not an active target")]
    UnknownTarget(Entity),
}

/// Ошибки загрузки CollectorConfig
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Отказ визуального коллаборатора (effect spawn) - изолирован от core state
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("collect effect rejected: {reason}")]
pub struct EffectError {
    pub reason: String,
}
