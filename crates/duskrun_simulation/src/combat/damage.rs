//! Damage capability + health events
//!
//! Архитектура:
//! - `HealthTarget` - capability "может получить урон" (единый контракт
//!   для игрока и врагов, оба используют Health)
//! - `HealthTargets` - lookup capability по Entity (Query или HashMap)
//! - Events: DamageDealt, EntityDied, HealthChanged (UI mirror),
//!   DamageRequest/HealRequest (внешние мутации Health)

use std::collections::HashMap;

use bevy::ecs::query::QueryFilter;
use bevy::prelude::*;

use crate::components::{Health, HealthChange};

/// Capability: entity может получать урон
pub trait HealthTarget {
    fn take_damage(&mut self, amount: u32) -> HealthChange;
}

impl HealthTarget for Health {
    fn take_damage(&mut self, amount: u32) -> HealthChange {
        Health::take_damage(self, amount)
    }
}

/// Lookup capability по entity. `None` - у entity нет Health (hit пропускается).
pub trait HealthTargets {
    fn as_health_target(&mut self, entity: Entity) -> Option<&mut dyn HealthTarget>;
}

impl<'a, F: QueryFilter> HealthTargets for Query<'_, '_, &'a mut Health, F> {
    fn as_health_target(&mut self, entity: Entity) -> Option<&mut dyn HealthTarget> {
        self.get_mut(entity)
            .ok()
            .map(|health| health.into_inner() as &mut dyn HealthTarget)
    }
}

impl HealthTargets for HashMap<Entity, Health> {
    fn as_health_target(&mut self, entity: Entity) -> Option<&mut dyn HealthTarget> {
        self.get_mut(&entity).map(|health| health as &mut dyn HealthTarget)
    }
}

/// Компонент-маркер: entity мертв (Health == 0)
///
/// Мёртвые не двигаются, не атакуют и исключены из PhysicsWorld.
/// Деспавн не автоматический - трупы остаются на месте.
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct Dead;

/// Событие: урон нанесен (Health реально уменьшился)
///
/// Используется для Hurt анимации, UI, звуков.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct DamageDealt {
    pub attacker: Option<Entity>,
    pub target: Entity,
    pub damage: u32,
    pub target_died: bool,
}

/// Событие: entity умер (ровно один раз за жизнь)
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntityDied {
    pub entity: Entity,
    pub killer: Option<Entity>,
}

/// Событие: HP изменился - зеркало для health bar (set_max / set_current)
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct HealthChanged {
    pub entity: Entity,
    pub current: u32,
    pub max: u32,
}

/// Запрос: нанести урон извне combat resolver (hazards, скрипты, тесты)
#[derive(Event, Debug, Clone, Copy)]
pub struct DamageRequest {
    pub target: Entity,
    pub amount: u32,
    pub source: Option<Entity>,
}

/// Запрос: вылечить (health potion, скрипты)
#[derive(Event, Debug, Clone, Copy)]
pub struct HealRequest {
    pub target: Entity,
    pub amount: u32,
}

/// Набор writer'ов для последствий мутации Health
#[derive(bevy::ecs::system::SystemParam)]
pub struct HealthEventWriters<'w> {
    pub damage_dealt: EventWriter<'w, DamageDealt>,
    pub died: EventWriter<'w, EntityDied>,
    pub changed: EventWriter<'w, HealthChanged>,
}

impl HealthEventWriters<'_> {
    /// Разослать events для `change`. Unchanged → ничего.
    pub fn report(&mut self, target: Entity, source: Option<Entity>, change: HealthChange, health: &Health) {
        match change {
            HealthChange::Unchanged => return,
            HealthChange::Damaged { amount, .. } => {
                self.damage_dealt.write(DamageDealt {
                    attacker: source,
                    target,
                    damage: amount,
                    target_died: false,
                });
            }
            HealthChange::Died { amount } => {
                self.damage_dealt.write(DamageDealt {
                    attacker: source,
                    target,
                    damage: amount,
                    target_died: true,
                });
                self.died.write(EntityDied {
                    entity: target,
                    killer: source,
                });
            }
            HealthChange::Healed { .. } => {}
        }

        self.changed.write(HealthChanged {
            entity: target,
            current: health.current(),
            max: health.max(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::ecs::system::SystemState;

    #[test]
    fn test_hashmap_lookup_skips_missing() {
        let mut targets: HashMap<Entity, Health> = HashMap::new();
        let present = Entity::from_raw(1);
        targets.insert(present, Health::new(50));

        assert!(targets.as_health_target(Entity::from_raw(2)).is_none());

        let change = targets
            .as_health_target(present)
            .map(|target| target.take_damage(20));
        assert_eq!(change, Some(HealthChange::Damaged { amount: 20, current: 30 }));
        assert_eq!(targets[&present].current(), 30);
    }

    #[test]
    fn test_query_lookup_only_sees_health() {
        let mut world = World::new();
        let with_health = world.spawn(Health::new(40)).id();
        let without = world.spawn(Transform::default()).id();

        let mut system_state: SystemState<Query<&mut Health>> = SystemState::new(&mut world);
        let mut query = system_state.get_mut(&mut world);

        assert!(query.as_health_target(without).is_none());
        let change = query
            .as_health_target(with_health)
            .map(|target| target.take_damage(40));
        assert_eq!(change, Some(HealthChange::Died { amount: 40 }));

        assert!(world.get::<Health>(with_health).is_some_and(Health::is_dead));
    }
}
