//! MotionController - позиция/ориентация агента и профиль скорости.
//!
//! Два логически независимых такта:
//! - `update_orientation(dt)` - frame clock (Update)
//! - `update_motion()` - physics clock (FixedUpdate), шаг скорости за тик
//!
//! Профиль: разгон на `speed_step` за тик пока distance > порога,
//! торможение на `speed_step` после; всё в пределах [min_speed, max_speed].

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::collection::{CollectionSink, EffectSink};
use crate::targeting::TargetRegistry;

/// Константы движения
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Reflect)]
#[serde(default)]
pub struct SpeedProfile {
    /// Верхняя граница скорости (m/s)
    pub max_speed: f32,
    /// Нижняя граница скорости во время преследования (m/s)
    pub min_speed: f32,
    /// Скорость поворота (rad/s)
    pub rotation_rate: f32,
    /// Изменение скорости за один physics tick
    pub speed_step: f32,
}

impl Default for SpeedProfile {
    fn default() -> Self {
        Self {
            max_speed: 6.0,
            min_speed: 3.0,
            rotation_rate: 3.0,
            speed_step: 0.1,
        }
    }
}

impl SpeedProfile {
    pub fn clamp(&self, speed: f32) -> f32 {
        speed.clamp(self.min_speed, self.max_speed)
    }
}

/// Состояние агента (выводится из выбора registry)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub enum AgentState {
    /// Нет цели, скорость 0 (начальное состояние)
    Idle,
    /// Есть выбранная цель, скорость в [min, max]
    Pursuing,
}

/// Результат `on_contact`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContactOutcome {
    pub target: Entity,
    /// Был ли target активным (false → no-op кроме события)
    pub removed: bool,
    pub was_selected: bool,
    /// Выбор после reselect
    pub next_target: Option<Entity>,
    /// Позиция агента в момент контакта (для эффекта)
    pub agent_position: Vec3,
}

/// Контроллер движения единственного агента
///
/// Инвариант: `current_speed == 0` и `velocity == 0` без выбранной цели.
#[derive(Resource, Debug, Clone)]
pub struct MotionController {
    position: Vec3,
    orientation: Quat,
    current_speed: f32,
    velocity: Vec3,
    profile: SpeedProfile,
}

impl Default for MotionController {
    fn default() -> Self {
        Self::new(Vec3::ZERO, SpeedProfile::default())
    }
}

impl MotionController {
    pub fn new(position: Vec3, profile: SpeedProfile) -> Self {
        Self {
            position,
            orientation: Quat::IDENTITY,
            current_speed: 0.0,
            velocity: Vec3::ZERO,
            profile,
        }
    }

    /// Frame tick: поворот к выбранной цели не больше `rotation_rate * dt`
    pub fn update_orientation(&mut self, registry: &TargetRegistry, dt: f32) {
        let Some(target) = registry.selected_target() else {
            return;
        };

        // Ground plane: поворачиваемся только по yaw
        let mut to_target = target.position - self.position;
        to_target.y = 0.0;
        if to_target.length_squared() <= f32::EPSILON {
            return;
        }

        let desired = heading_towards(to_target);
        self.orientation = rotate_towards(self.orientation, desired, self.profile.rotation_rate * dt);
    }

    /// Physics tick: шаг профиля скорости + velocity = forward * speed
    ///
    /// Скорость не опускается ниже `min_speed`, а поворот ограничен
    /// `rotation_rate`: радиус разворота от `min_speed / rotation_rate` до
    /// `max_speed / rotation_rate`. Target сбоку в пределах этого радиуса
    /// агент может облетать по орбите бесконечно, не входя в контакт.
    pub fn update_motion(&mut self, registry: &TargetRegistry) -> Vec3 {
        let (Some(target), Some(threshold)) =
            (registry.selected_target(), registry.deceleration_threshold())
        else {
            self.stop();
            return self.velocity;
        };

        let distance = self.position.distance(target.position);

        self.current_speed = if distance > threshold {
            self.profile.clamp(self.current_speed + self.profile.speed_step)
        } else {
            self.profile.clamp(self.current_speed - self.profile.speed_step)
        };

        // Velocity пересчитывается каждый тик, без накопления
        self.velocity = self.forward() * self.current_speed;
        self.velocity
    }

    /// Контакт с target (от collision коллаборатора)
    ///
    /// Порядок важен: событие сбора ВСЕГДА первым, ровно одно на вызов:
    /// даже если target не был выбран или уже удалён.
    pub fn on_contact(
        &mut self,
        registry: &mut TargetRegistry,
        target: Entity,
        sink: &mut impl CollectionSink,
        effects: &mut impl EffectSink,
    ) -> ContactOutcome {
        sink.notify_collected();

        let was_selected = registry.clear_selection_if(target);
        let removed = registry.remove_target(target).is_ok();

        registry.reselect(self.position);

        if removed {
            // Fire-and-forget: отказ эффекта не откатывает core state
            if let Err(err) = effects.spawn_collect_effect(self.position) {
                crate::log_warning(&format!("MotionController: {}", err));
            }
        }

        if registry.selected().is_none() {
            self.stop();
            crate::log_info("MotionController: no targets left → Idle");
        }

        ContactOutcome {
            target,
            removed,
            was_selected,
            next_target: registry.selected(),
            agent_position: self.position,
        }
    }

    /// Headless интеграция: position += velocity * dt
    pub fn integrate(&mut self, dt: f32) {
        self.position += self.velocity * dt;
    }

    pub fn stop(&mut self) {
        self.current_speed = 0.0;
        self.velocity = Vec3::ZERO;
    }

    pub fn agent_state(&self, registry: &TargetRegistry) -> AgentState {
        if registry.selected().is_some() {
            AgentState::Pursuing
        } else {
            AgentState::Idle
        }
    }

    /// Forward = -Z (Bevy convention)
    pub fn forward(&self) -> Vec3 {
        self.orientation * Vec3::NEG_Z
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn orientation(&self) -> Quat {
        self.orientation
    }

    pub fn current_speed(&self) -> f32 {
        self.current_speed
    }

    pub fn velocity(&self) -> Vec3 {
        self.velocity
    }

    /// Transform для визуала/коллайдера агента
    pub fn transform(&self) -> Transform {
        Transform::from_translation(self.position).with_rotation(self.orientation)
    }
}

/// Yaw-ориентация, у которой forward (-Z) смотрит вдоль `direction` (XZ)
pub fn heading_towards(direction: Vec3) -> Quat {
    Quat::from_rotation_y(f32::atan2(-direction.x, -direction.z))
}

/// Поворот `from` к `to` по кратчайшей дуге, не больше `max_angle`
///
/// Не перелетает цель: если остаток ≤ max_angle - возвращает ровно `to`.
pub fn rotate_towards(from: Quat, to: Quat, max_angle: f32) -> Quat {
    if max_angle <= 0.0 {
        return from;
    }

    let remaining = from.angle_between(to);
    if remaining <= max_angle {
        return to;
    }

    from.slerp(to, max_angle / remaining).normalize()
}
