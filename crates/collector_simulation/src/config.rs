//! CollectorConfig - параметры симуляции (JSON, все поля опциональны)

use std::path::Path;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::logger::LogLevel;
use crate::motion::SpeedProfile;
use crate::physics::ContactDetection;
use crate::spawner::PlayArea;
use crate::targeting::ReselectPolicy;

/// Параметры симуляции
///
/// Default = значения оригинальной сцены: плоскость 10x10, speed 3..6,
/// шаг скорости 0.1 за physics tick, физика 50Hz.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollectorConfig {
    pub speed: SpeedProfile,
    /// Размер плоскости по X (spawn в пределах ±size/2)
    pub plane_size_x: f32,
    /// Размер плоскости по Z
    pub plane_size_z: f32,
    /// Стартовая позиция агента (world coordinates)
    pub agent_start: [f32; 3],
    /// Дистанция контакта для headless proximity detection
    pub contact_radius: f32,
    /// Частота FixedUpdate (motion clock)
    pub fixed_hz: f64,
    pub seed: u64,
    pub reselect_policy: ReselectPolicy,
    pub contact_detection: ContactDetection,
    /// Автоспавн target каждые N секунд (None = только по SpawnTargetRequest)
    pub spawn_interval_secs: Option<f32>,
    /// Минимальный уровень логов (применяет хост через `set_log_level`)
    pub log_level: LogLevel,
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            speed: SpeedProfile::default(),
            plane_size_x: 10.0,
            plane_size_z: 10.0,
            agent_start: [0.0, 0.0, 0.0],
            contact_radius: 0.75,
            fixed_hz: 50.0,
            seed: 42,
            reselect_policy: ReselectPolicy::default(),
            contact_detection: ContactDetection::default(),
            spawn_interval_secs: None,
            log_level: LogLevel::Info,
        }
    }
}

impl CollectorConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let speed = &self.speed;

        if !(speed.min_speed >= 0.0 && speed.min_speed <= speed.max_speed) {
            return Err(ConfigError::Invalid(format!(
                "speed range [{}, {}] is empty or negative",
                speed.min_speed, speed.max_speed
            )));
        }
        if !(speed.speed_step > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "speed_step must be positive, got {}",
                speed.speed_step
            )));
        }
        if !(speed.rotation_rate > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "rotation_rate must be positive, got {}",
                speed.rotation_rate
            )));
        }
        if !(self.plane_size_x > 0.0 && self.plane_size_z > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "plane size {}x{} must be positive",
                self.plane_size_x, self.plane_size_z
            )));
        }
        if !(self.contact_radius > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "contact_radius must be positive, got {}",
                self.contact_radius
            )));
        }
        if !(self.fixed_hz > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "fixed_hz must be positive, got {}",
                self.fixed_hz
            )));
        }
        if let Some(interval) = self.spawn_interval_secs {
            if !(interval > 0.0) {
                return Err(ConfigError::Invalid(format!(
                    "spawn_interval_secs must be positive, got {}",
                    interval
                )));
            }
        }

        Ok(())
    }

    pub fn play_area(&self) -> PlayArea {
        PlayArea::new(self.plane_size_x, self.plane_size_z)
    }

    pub fn agent_start(&self) -> Vec3 {
        Vec3::from_array(self.agent_start)
    }
}
