//! Targeting domain - активные targets и выбор цели преследования
//!
//! Содержит:
//! - TargetRegistry (resource, nearest-выбор + порог торможения)
//! - CollectibleTarget (marker для target entities)

use bevy::prelude::*;

pub mod registry;


pub use registry::*;

/// Marker: entity является collectible target (сфера на плоскости)
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct CollectibleTarget;
