//! Motion systems.

use bevy::prelude::*;

use crate::motion::{Collector, MotionController};
use crate::targeting::TargetRegistry;

/// Система: поворот агента к цели (frame clock, Update)
///
/// dt = virtual frame delta, не fixed timestep.
pub fn update_orientation(
    time: Res<Time>,
    registry: Res<TargetRegistry>,
    mut controller: ResMut<MotionController>,
) {
    controller.update_orientation(&registry, time.delta_secs());
}

/// Система: шаг профиля скорости (physics clock, FixedUpdate)
pub fn update_motion(registry: Res<TargetRegistry>, mut controller: ResMut<MotionController>) {
    controller.update_motion(&registry);
}

/// Система: MotionController → Transform агента
///
/// Запускается в обоих расписаниях: после поворота (Update) и после
/// интеграции (FixedUpdate, чтобы Rapier видел актуальную позицию).
pub fn sync_agent_transform(
    controller: Res<MotionController>,
    mut agents: Query<&mut Transform, With<Collector>>,
) {
    for mut transform in agents.iter_mut() {
        transform.translation = controller.position();
        transform.rotation = controller.orientation();
    }
}
