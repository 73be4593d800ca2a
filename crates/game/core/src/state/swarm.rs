//! Deployed fighter groups.
//!
//! Groups live in a generational side table so that abilities, relations and
//! status sources can hold [`SwarmHandle`]s without keeping a destroyed group
//! alive or aliasing a newer group that reused its slot.

use glam::Vec3;

use crate::combat::DamageResult;
use crate::config::GameRules;

use super::common::{Team, UnitId};

/// Generation-checked reference to a slot in the [`SwarmTable`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SwarmHandle {
    index: u32,
    generation: u32,
}

impl SwarmHandle {
    #[inline]
    pub fn index(&self) -> u32 {
        self.index
    }

    #[inline]
    pub fn generation(&self) -> u32 {
        self.generation
    }
}

/// One deployed group of fighters.
///
/// Fighters are damaged one at a time; the group is destroyed once the last
/// fighter falls.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FighterGroup {
    pub owner: UnitId,
    /// Ability slot on the owner that deployed this group.
    pub owner_slot: usize,
    pub team: Team,
    pub target: UnitId,
    pub position: Vec3,
    fighters: Vec<f32>,
    front: usize,
}

impl FighterGroup {
    pub fn new(
        owner: UnitId,
        owner_slot: usize,
        team: Team,
        position: Vec3,
        target: UnitId,
        rules: &GameRules,
    ) -> Self {
        Self {
            owner,
            owner_slot,
            team,
            target,
            position,
            fighters: vec![rules.swarm_fighter_health; rules.swarm_fighters_per_group],
            front: 0,
        }
    }

    pub fn fighters_left(&self) -> usize {
        self.fighters.len().saturating_sub(self.front)
    }

    pub fn is_destroyed(&self) -> bool {
        self.fighters_left() == 0
    }

    /// Health of the fighter currently absorbing fire.
    pub fn front_health(&self) -> f32 {
        self.fighters.get(self.front).copied().unwrap_or(0.0)
    }

    /// Damages the front fighter. Overkill does not carry to the next one.
    pub fn take_damage(&mut self, amount: f32) -> DamageResult {
        let Some(front) = self.fighters.get_mut(self.front) else {
            return DamageResult::NONE;
        };
        let dealt = amount.clamp(0.0, *front);
        *front -= dealt;
        if *front <= 0.0 {
            self.front += 1;
        }
        DamageResult {
            dealt,
            absorbed: 0.0,
            died: self.is_destroyed(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
struct SwarmSlot {
    generation: u32,
    group: Option<FighterGroup>,
}

/// Generational storage for fighter groups.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SwarmTable {
    slots: Vec<SwarmSlot>,
}

impl SwarmTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, group: FighterGroup) -> SwarmHandle {
        if let Some(index) = self.slots.iter().position(|slot| slot.group.is_none()) {
            let slot = &mut self.slots[index];
            slot.generation = slot.generation.wrapping_add(1);
            slot.group = Some(group);
            return SwarmHandle {
                index: index as u32,
                generation: slot.generation,
            };
        }

        self.slots.push(SwarmSlot {
            generation: 0,
            group: Some(group),
        });
        SwarmHandle {
            index: (self.slots.len() - 1) as u32,
            generation: 0,
        }
    }

    pub fn get(&self, handle: SwarmHandle) -> Option<&FighterGroup> {
        self.slots
            .get(handle.index as usize)
            .filter(|slot| slot.generation == handle.generation)
            .and_then(|slot| slot.group.as_ref())
    }

    pub fn get_mut(&mut self, handle: SwarmHandle) -> Option<&mut FighterGroup> {
        self.slots
            .get_mut(handle.index as usize)
            .filter(|slot| slot.generation == handle.generation)
            .and_then(|slot| slot.group.as_mut())
    }

    pub fn contains(&self, handle: SwarmHandle) -> bool {
        self.get(handle).is_some()
    }

    pub fn remove(&mut self, handle: SwarmHandle) -> Option<FighterGroup> {
        self.slots
            .get_mut(handle.index as usize)
            .filter(|slot| slot.generation == handle.generation)
            .and_then(|slot| slot.group.take())
    }

    pub fn iter(&self) -> impl Iterator<Item = (SwarmHandle, &FighterGroup)> {
        self.slots.iter().enumerate().filter_map(|(index, slot)| {
            slot.group.as_ref().map(|group| {
                (
                    SwarmHandle {
                        index: index as u32,
                        generation: slot.generation,
                    },
                    group,
                )
            })
        })
    }

    pub fn handles(&self) -> Vec<SwarmHandle> {
        self.iter().map(|(handle, _)| handle).collect()
    }

    /// Live groups deployed by `owner`.
    pub fn owned_by(&self, owner: UnitId) -> Vec<SwarmHandle> {
        self.iter()
            .filter(|(_, group)| group.owner == owner)
            .map(|(handle, _)| handle)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group(owner: u32) -> FighterGroup {
        FighterGroup::new(
            UnitId(owner),
            0,
            Team(0),
            Vec3::ZERO,
            UnitId(9),
            &GameRules::default(),
        )
    }

    #[test]
    fn stale_handle_does_not_alias_reused_slot() {
        let mut table = SwarmTable::new();
        let first = table.insert(group(1));
        table.remove(first);
        let second = table.insert(group(2));

        assert_eq!(first.index(), second.index());
        assert!(table.get(first).is_none());
        assert_eq!(table.get(second).map(|g| g.owner), Some(UnitId(2)));
    }

    #[test]
    fn fighters_fall_one_at_a_time() {
        let rules = GameRules::default();
        let mut g = group(1);
        let result = g.take_damage(rules.swarm_fighter_health + 50.0);
        assert_eq!(result.dealt, rules.swarm_fighter_health);
        assert_eq!(g.fighters_left(), rules.swarm_fighters_per_group - 1);
        assert!(!result.died);

        for _ in 1..rules.swarm_fighters_per_group {
            g.take_damage(rules.swarm_fighter_health);
        }
        assert!(g.is_destroyed());
        assert_eq!(g.take_damage(1.0), DamageResult::NONE);
    }

    #[test]
    fn owned_by_filters_on_owner() {
        let mut table = SwarmTable::new();
        table.insert(group(1));
        table.insert(group(2));
        table.insert(group(1));
        assert_eq!(table.owned_by(UnitId(1)).len(), 2);
        assert_eq!(table.len(), 3);
    }
}
