//! Motion domain - движение агента к выбранной цели
//!
//! Содержит:
//! - MotionController (resource: позиция, ориентация, профиль скорости)
//! - Collector (marker для entity агента, Transform синхронизируется)
//! - системы orientation (Update) и motion (FixedUpdate)

use bevy::prelude::*;

pub mod controller;
pub mod systems;


pub use controller::*;
pub use systems::*;

/// Marker: entity агента-сборщика ("Cube")
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct Collector;
