//! TargetRegistry - активные targets + выбор ближайшего для преследования.
//!
//! Leaf-компонент: ничего не знает о motion. MotionController читает
//! `selected()` / `deceleration_threshold()` каждый тик и сообщает о контакте
//! через `remove_target` + `reselect`.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::RegistryError;

/// Collectible target (snapshot позиции на момент регистрации)
///
/// `id` - Entity target'а: стабильный handle, не индекс в массиве
/// (targets удаляются из произвольных позиций).
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub struct Target {
    pub id: Entity,
    pub position: Vec3,
}

impl Target {
    pub fn new(id: Entity, position: Vec3) -> Self {
        Self { id, position }
    }
}

/// Текущий выбор: target + порог торможения
///
/// Порог = 1/3 дистанции в момент выбора и дальше НЕ пересчитывается
/// (агент разгоняется первые 2/3 пути, тормозит последнюю 1/3).
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub struct Selection {
    pub target: Entity,
    pub deceleration_threshold: f32,
}

/// Как реагировать на add при уже существующем выборе
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Reflect)]
#[serde(rename_all = "snake_case")]
pub enum ReselectPolicy {
    /// Сравниваем только новый target с текущим выбором (O(1)).
    ///
    /// Может оставить выбор, который не является глобально ближайшим:
    /// агент сдвинулся, и target, добавленный раньше, стал ближе текущего.
    #[default]
    NewcomerOnly,
    /// Полный nearest-скан всего набора на каждом add
    FullRescan,
}

/// Registry активных targets
///
/// Порядок итерации = порядок вставки (tie-break при равных дистанциях:
/// побеждает добавленный раньше).
///
/// Инвариант: `selection.target ∈ active`, либо selection = None
/// (пустой набор или ожидание reselect).
#[derive(Resource, Debug, Clone, Default)]
pub struct TargetRegistry {
    active: Vec<Target>,
    selection: Option<Selection>,
    policy: ReselectPolicy,
}

impl TargetRegistry {
    pub fn new(policy: ReselectPolicy) -> Self {
        Self {
            active: Vec::new(),
            selection: None,
            policy,
        }
    }

    /// Добавить target и переоценить выбор
    ///
    /// Duplicate id отклоняется: `Err(DuplicateTarget)`, состояние не меняется.
    pub fn add_target(&mut self, target: Target, agent_position: Vec3) -> Result<(), RegistryError> {
        if self.contains(target.id) {
            crate::log_warning(&format!(
                "TargetRegistry: duplicate add of {:?} rejected",
                target.id
            ));
            return Err(RegistryError::DuplicateTarget(target.id));
        }

        self.active.push(target);
        crate::log(&format!(
            "TargetRegistry: added {:?} at {:?} ({} active)",
            target.id,
            target.position,
            self.active.len()
        ));

        let Some(current) = self.selection else {
            self.reselect(agent_position);
            return Ok(());
        };

        match self.policy {
            ReselectPolicy::NewcomerOnly => {
                let Some(current_target) = self.get(current.target) else {
                    // Выбор указывает на удалённый target - чиним полным сканом
                    self.selection = None;
                    self.reselect(agent_position);
                    return Ok(());
                };

                let current_distance = agent_position.distance(current_target.position);
                let new_distance = agent_position.distance(target.position);

                if new_distance < current_distance {
                    self.select(target, agent_position);
                }
            }
            ReselectPolicy::FullRescan => {
                if let Some(nearest) = self.nearest_to(agent_position).copied() {
                    if nearest.id != current.target {
                        self.select(nearest, agent_position);
                    }
                }
            }
        }

        Ok(())
    }

    /// Удалить target
    ///
    /// Если он был выбран - выбор и порог сбрасываются, reselect НЕ вызывается
    /// (это отдельный явный шаг).
    pub fn remove_target(&mut self, id: Entity) -> Result<Target, RegistryError> {
        let Some(index) = self.active.iter().position(|t| t.id == id) else {
            crate::log_warning(&format!(
                "TargetRegistry: remove of unknown target {:?} ignored",
                id
            ));
            return Err(RegistryError::UnknownTarget(id));
        };

        let removed = self.active.remove(index);
        self.clear_selection_if(id);

        crate::log(&format!(
            "TargetRegistry: removed {:?} ({} active)",
            id,
            self.active.len()
        ));

        Ok(removed)
    }

    /// Сбросить выбор, если выбран именно `id`
    pub fn clear_selection_if(&mut self, id: Entity) -> bool {
        if self.selected() == Some(id) {
            self.selection = None;
            true
        } else {
            false
        }
    }

    /// Переоценить выбор
    ///
    /// - пустой набор → None
    /// - живой выбор (target ещё активен) сохраняется вместе с порогом
    /// - иначе nearest-скан по всему набору
    pub fn reselect(&mut self, agent_position: Vec3) -> Option<Entity> {
        if self.active.is_empty() {
            self.selection = None;
            return None;
        }

        if let Some(current) = self.selection {
            if self.contains(current.target) {
                return Some(current.target);
            }
            self.selection = None;
        }

        let chosen = if self.active.len() == 1 {
            Some(self.active[0])
        } else {
            self.nearest_to(agent_position).copied()
        };

        if let Some(target) = chosen {
            self.select(target, agent_position);
        }

        self.selected()
    }

    /// Ближайший к `position` target (без мутации)
    ///
    /// Строгое `<`: при равных дистанциях остаётся первый по порядку вставки.
    pub fn nearest_to(&self, position: Vec3) -> Option<&Target> {
        let mut best: Option<(&Target, f32)> = None;

        for target in &self.active {
            let distance = position.distance(target.position);
            match best {
                Some((_, best_distance)) if distance >= best_distance => {}
                _ => best = Some((target, distance)),
            }
        }

        best.map(|(target, _)| target)
    }

    fn select(&mut self, target: Target, agent_position: Vec3) {
        let distance = agent_position.distance(target.position);
        self.selection = Some(Selection {
            target: target.id,
            deceleration_threshold: distance / 3.0,
        });

        crate::log(&format!(
            "TargetRegistry: selected {:?} (distance {:.2}, decelerate below {:.2})",
            target.id,
            distance,
            distance / 3.0
        ));
    }

    pub fn selected(&self) -> Option<Entity> {
        self.selection.map(|s| s.target)
    }

    pub fn selection(&self) -> Option<Selection> {
        self.selection
    }

    /// Выбранный target целиком (позиция для motion)
    pub fn selected_target(&self) -> Option<&Target> {
        self.selection.and_then(|s| self.get(s.target))
    }

    pub fn deceleration_threshold(&self) -> Option<f32> {
        self.selection.map(|s| s.deceleration_threshold)
    }

    pub fn get(&self, id: Entity) -> Option<&Target> {
        self.active.iter().find(|t| t.id == id)
    }

    pub fn contains(&self, id: Entity) -> bool {
        self.active.iter().any(|t| t.id == id)
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    /// Targets в порядке вставки
    pub fn iter(&self) -> impl Iterator<Item = &Target> {
        self.active.iter()
    }
}
