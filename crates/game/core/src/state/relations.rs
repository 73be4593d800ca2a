//! Cross-entity links that must not own their endpoints.

use std::collections::BTreeMap;

use super::common::UnitId;
use super::swarm::SwarmHandle;

/// A specific ability slot on a specific unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AbilityRef {
    pub unit: UnitId,
    pub slot: usize,
}

/// Attacker lists and shield projections, keyed by id.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Relations {
    /// Enemy fighter groups engaging a unit, in arrival order.
    attackers: BTreeMap<UnitId, Vec<SwarmHandle>>,
    /// Protected unit -> projecting ability.
    shields: BTreeMap<UnitId, AbilityRef>,
}

impl Relations {
    pub fn add_attacker(&mut self, unit: UnitId, swarm: SwarmHandle) {
        let list = self.attackers.entry(unit).or_default();
        if !list.contains(&swarm) {
            list.push(swarm);
        }
    }

    pub fn remove_attacker(&mut self, unit: UnitId, swarm: SwarmHandle) {
        if let Some(list) = self.attackers.get_mut(&unit) {
            list.retain(|h| *h != swarm);
            if list.is_empty() {
                self.attackers.remove(&unit);
            }
        }
    }

    pub fn attackers(&self, unit: UnitId) -> &[SwarmHandle] {
        self.attackers.get(&unit).map_or(&[], Vec::as_slice)
    }

    /// Drops a destroyed group from every attacker list.
    pub fn forget_swarm(&mut self, swarm: SwarmHandle) {
        self.attackers.retain(|_, list| {
            list.retain(|h| *h != swarm);
            !list.is_empty()
        });
    }

    /// Projects `projector`'s shield onto `protected`, replacing whatever
    /// that projector covered before.
    pub fn project_shield(&mut self, protected: UnitId, projector: AbilityRef) {
        self.release_shield(projector);
        self.shields.insert(protected, projector);
    }

    pub fn release_shield(&mut self, projector: AbilityRef) {
        self.shields.retain(|_, p| *p != projector);
    }

    pub fn shield_for(&self, unit: UnitId) -> Option<AbilityRef> {
        self.shields.get(&unit).copied()
    }

    /// Removes every link that starts or ends at `unit`.
    pub fn forget_unit(&mut self, unit: UnitId) {
        self.attackers.remove(&unit);
        self.shields
            .retain(|protected, projector| *protected != unit && projector.unit != unit);
    }
}
