//! Authoritative simulation state.
//!
//! This module owns units, deployed fighter groups and the non-owning links
//! between them. Runtime layers query this state but mutate it through the
//! engine.
mod common;
mod relations;
mod replication;
mod swarm;
mod unit;

pub use common::{Meter, SourceRef, TargetRef, Team, UnitId, Vitals};
pub use relations::{AbilityRef, Relations};
pub use replication::{AbilityReplica, ReplicationError, UnitReplica};
pub use swarm::{FighterGroup, SwarmHandle, SwarmTable};
pub use unit::{StatusView, Unit, UnitSnapshot, UnitSpec};

use std::collections::BTreeMap;

use glam::Vec3;

use crate::ability::{AbilityCatalog, AbilityInstance};
use crate::config::GameRules;
use crate::status::{ApplyOutcome, StatusEffects, StatusInstance};

/// Everything the simulation tracks.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WorldState {
    /// Sequential unit id allocator. Ids are never reused.
    next_unit_id: u32,
    units: BTreeMap<UnitId, Unit>,
    pub swarms: SwarmTable,
    pub relations: Relations,
    /// Scaled simulation time in seconds.
    elapsed: f32,
}

impl WorldState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a unit built from `spec` and returns its fresh id.
    pub fn spawn(&mut self, spec: &UnitSpec, catalog: &AbilityCatalog, rules: &GameRules) -> UnitId {
        let id = UnitId(self.next_unit_id);
        self.next_unit_id += 1;
        self.units.insert(id, Unit::new(id, spec, catalog, rules));
        id
    }

    /// Removes a unit and every link that mentions it.
    pub fn remove_unit(&mut self, id: UnitId) -> Option<Unit> {
        self.relations.forget_unit(id);
        self.units.remove(&id)
    }

    pub fn unit(&self, id: UnitId) -> Option<&Unit> {
        self.units.get(&id)
    }

    pub fn unit_mut(&mut self, id: UnitId) -> Option<&mut Unit> {
        self.units.get_mut(&id)
    }

    pub fn units(&self) -> impl Iterator<Item = &Unit> {
        self.units.values()
    }

    /// Ids in ascending order; the iteration order of every per-unit pass.
    pub fn unit_ids(&self) -> Vec<UnitId> {
        self.units.keys().copied().collect()
    }

    pub fn unit_count(&self) -> usize {
        self.units.len()
    }

    pub fn ability(&self, unit: UnitId, slot: usize) -> Option<&AbilityInstance> {
        self.units.get(&unit)?.ability(slot)
    }

    pub fn ability_mut(&mut self, unit: UnitId, slot: usize) -> Option<&mut AbilityInstance> {
        self.units.get_mut(&unit)?.ability_mut(slot)
    }

    pub fn apply_status(&mut self, unit: UnitId, status: StatusInstance) -> Option<ApplyOutcome> {
        self.units.get_mut(&unit)?.apply_status(status)
    }

    /// Living units whose centre lies within `radius` of `center`.
    pub fn units_within(&self, center: Vec3, radius: f32) -> impl Iterator<Item = &Unit> {
        let radius_sq = radius * radius;
        self.units()
            .filter(move |u| u.is_alive() && u.position.distance_squared(center) <= radius_sq)
    }

    /// Closest living unit within `radius`; ties go to the lower id.
    pub fn nearest_unit(&self, center: Vec3, radius: f32) -> Option<UnitId> {
        self.units_within(center, radius)
            .min_by(|a, b| {
                a.position
                    .distance_squared(center)
                    .total_cmp(&b.position.distance_squared(center))
            })
            .map(|u| u.id)
    }

    /// Points a fighter group at a new unit, dropping it from its old
    /// target's attacker list.
    pub fn retarget_swarm(&mut self, swarm: SwarmHandle, target: UnitId) {
        let Some(group) = self.swarms.get_mut(swarm) else {
            return;
        };
        let previous = std::mem::replace(&mut group.target, target);
        if previous != target {
            self.relations.remove_attacker(previous, swarm);
        }
    }

    /// Removes a fighter group along with its attacker registrations.
    pub fn remove_swarm(&mut self, swarm: SwarmHandle) -> Option<FighterGroup> {
        self.relations.forget_swarm(swarm);
        self.swarms.remove(swarm)
    }

    #[inline]
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub(crate) fn advance_clock(&mut self, dt: f32) {
        self.elapsed += dt;
    }

    // ========================================================================
    // Replication
    // ========================================================================

    pub fn replicate(&self, id: UnitId) -> Option<UnitReplica> {
        let unit = self.units.get(&id)?;
        Some(UnitReplica {
            id,
            position: unit.position,
            vitals: unit.vitals,
            abilities: unit
                .abilities()
                .iter()
                .map(|a| AbilityReplica {
                    kind: a.kind(),
                    cooldown: a.cooldown(),
                    active: a.is_active(),
                    stacks: a.stacks,
                    energy: a.energy(),
                })
                .collect(),
            statuses: unit.statuses.iter().copied().collect(),
        })
    }

    /// Overwrites the local copy of a unit with authority state.
    ///
    /// Slot layout must match; nothing is written when it does not.
    pub fn apply_replica(&mut self, replica: &UnitReplica) -> Result<(), ReplicationError> {
        let unit = self
            .units
            .get_mut(&replica.id)
            .ok_or(ReplicationError::UnitNotFound(replica.id))?;

        if unit.slot_count() != replica.abilities.len() {
            return Err(ReplicationError::SlotCountMismatch {
                unit: replica.id,
                local: unit.slot_count(),
                remote: replica.abilities.len(),
            });
        }
        for (slot, (local, remote)) in unit.abilities().iter().zip(&replica.abilities).enumerate() {
            if local.kind() != remote.kind {
                return Err(ReplicationError::KindMismatch {
                    unit: replica.id,
                    slot,
                    local: local.kind(),
                    remote: remote.kind,
                });
            }
        }

        unit.position = replica.position;
        unit.vitals = replica.vitals;
        for (slot, remote) in replica.abilities.iter().enumerate() {
            if let Some(local) = unit.ability_mut(slot) {
                local.restore(remote.cooldown, remote.active, remote.stacks, remote.energy);
            }
        }
        let mut statuses = StatusEffects::empty();
        for status in &replica.statuses {
            statuses.apply_instance(*status);
        }
        unit.statuses = statuses;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ability::AbilityKind;
    use crate::status::StatusKind;

    fn spawn(world: &mut WorldState, team: u8, x: f32, abilities: &[AbilityKind]) -> UnitId {
        let spec = UnitSpec::new(Team(team), Vec3::new(x, 0.0, 0.0)).with_abilities(abilities.iter().copied());
        world.spawn(&spec, &AbilityCatalog::new(), &GameRules::default())
    }

    #[test]
    fn ids_are_sequential_and_never_reused() {
        let mut world = WorldState::new();
        let a = spawn(&mut world, 0, 0.0, &[]);
        world.remove_unit(a);
        let b = spawn(&mut world, 0, 0.0, &[]);
        assert_eq!(a, UnitId(0));
        assert_eq!(b, UnitId(1));
    }

    #[test]
    fn nearest_unit_respects_radius() {
        let mut world = WorldState::new();
        spawn(&mut world, 0, 10.0, &[]);
        let near = spawn(&mut world, 1, 3.0, &[]);
        assert_eq!(world.nearest_unit(Vec3::ZERO, 5.0), Some(near));
        assert_eq!(world.nearest_unit(Vec3::new(-20.0, 0.0, 0.0), 5.0), None);
    }

    #[test]
    fn replica_round_trips_onto_a_fresh_copy() {
        let mut authority = WorldState::new();
        let id = spawn(&mut authority, 0, 0.0, &[AbilityKind::HealField, AbilityKind::ArmorDrain]);
        let unit = authority.unit_mut(id).unwrap();
        unit.ability_mut(0).unwrap().start_cooldown();
        unit.vitals.health.current = 42.0;
        unit.apply_status(StatusInstance::new(StatusKind::ArmorMelt, None));

        let mut replica = authority.clone();
        replica.unit_mut(id).unwrap().ability_mut(0).unwrap().reset_cooldown();
        replica.unit_mut(id).unwrap().statuses.clear();

        replica.apply_replica(&authority.replicate(id).unwrap()).unwrap();
        assert_eq!(replica.unit(id), authority.unit(id));
    }

    #[test]
    fn replica_with_different_layout_is_rejected() {
        let mut a = WorldState::new();
        let mut b = WorldState::new();
        let id = spawn(&mut a, 0, 0.0, &[AbilityKind::HealField]);
        spawn(&mut b, 0, 0.0, &[AbilityKind::Chain]);

        let err = b.apply_replica(&a.replicate(id).unwrap()).unwrap_err();
        assert!(matches!(err, ReplicationError::KindMismatch { slot: 0, .. }));
    }
}
