//! Spawner - источник targets на плоскости
//!
//! Архитектура:
//! - Input слой (click, тест, AutoSpawner) пишет SpawnTargetRequest
//! - process_spawn_requests выбирает позицию (явную → clamp, иначе random
//!   из DeterministicRng) и ставит CollectorCommand::SpawnTarget в очередь
//! - Target появляется в registry в начале следующего physics тика

use bevy::prelude::*;
use rand::Rng;

use crate::collection::CollectorCommand;
use crate::DeterministicRng;

// Tests (separate files with _tests suffix)
#[cfg(test)]
mod spawner_tests;

/// Границы игровой плоскости (центр в origin, y = 0)
#[derive(Resource, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Resource)]
pub struct PlayArea {
    pub half_x: f32,
    pub half_z: f32,
}

impl Default for PlayArea {
    fn default() -> Self {
        Self::new(10.0, 10.0)
    }
}

impl PlayArea {
    /// `size_x`/`size_z` - полный размер плоскости
    pub fn new(size_x: f32, size_z: f32) -> Self {
        Self {
            half_x: size_x.abs() / 2.0,
            half_z: size_z.abs() / 2.0,
        }
    }

    /// Прижать позицию к плоскости (y обнуляется)
    pub fn clamp(&self, position: Vec3) -> Vec3 {
        Vec3::new(
            position.x.clamp(-self.half_x, self.half_x),
            0.0,
            position.z.clamp(-self.half_z, self.half_z),
        )
    }

    pub fn contains(&self, position: Vec3) -> bool {
        position.x.abs() <= self.half_x && position.z.abs() <= self.half_z
    }

    /// Случайная точка на плоскости (равномерно по X и Z)
    pub fn random_point(&self, rng: &mut impl Rng) -> Vec3 {
        let x = if self.half_x > 0.0 {
            rng.gen_range(-self.half_x..=self.half_x)
        } else {
            0.0
        };
        let z = if self.half_z > 0.0 {
            rng.gen_range(-self.half_z..=self.half_z)
        } else {
            0.0
        };
        Vec3::new(x, 0.0, z)
    }
}

/// Event: запрос нового target (аналог клика мышью)
#[derive(Event, Debug, Clone, Copy, Default, PartialEq)]
pub struct SpawnTargetRequest {
    /// None → случайная позиция на плоскости
    pub position: Option<Vec3>,
}

impl SpawnTargetRequest {
    pub fn random() -> Self {
        Self { position: None }
    }

    pub fn at(position: Vec3) -> Self {
        Self {
            position: Some(position),
        }
    }
}

/// Периодический спавн для headless прогонов
#[derive(Resource, Debug, Clone)]
pub struct AutoSpawner {
    pub timer: Timer,
}

impl AutoSpawner {
    pub fn every(seconds: f32) -> Self {
        Self {
            timer: Timer::from_seconds(seconds, TimerMode::Repeating),
        }
    }
}

/// Система: AutoSpawner → SpawnTargetRequest
pub fn auto_spawn_targets(
    time: Res<Time>,
    spawner: Option<ResMut<AutoSpawner>>,
    mut requests: EventWriter<SpawnTargetRequest>,
) {
    let Some(mut spawner) = spawner else {
        return;
    };

    spawner.timer.tick(time.delta());
    for _ in 0..spawner.timer.times_finished_this_tick() {
        requests.write(SpawnTargetRequest::random());
    }
}

/// Система: SpawnTargetRequest → CollectorCommand::SpawnTarget
pub fn process_spawn_requests(
    mut requests: EventReader<SpawnTargetRequest>,
    area: Res<PlayArea>,
    mut rng: ResMut<DeterministicRng>,
    mut queue: EventWriter<CollectorCommand>,
) {
    for request in requests.read() {
        let position = match request.position {
            Some(position) => area.clamp(position),
            None => area.random_point(&mut rng.rng),
        };

        crate::log(&format!("Spawner: target requested at {:?}", position));
        queue.write(CollectorCommand::SpawnTarget { position });
    }
}
