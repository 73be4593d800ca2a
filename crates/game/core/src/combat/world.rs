//! The world as seen by hit resolution.

use glam::Vec3;

use crate::env::SimEnv;
use crate::state::{TargetRef, Team, UnitId, WorldState};
use crate::status::{ApplyOutcome, StatusInstance, StatusKind};

use super::damage::{DamageResult, DamageType};

/// Target state read during hit resolution.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TargetInfo {
    pub position: Vec3,
    pub team: Team,
    /// Shield still standing between the target and its armor, projected
    /// shields included.
    pub shield: f32,
    pub alive: bool,
}

/// Operations hit resolution needs from the combat layer.
pub trait CombatWorld {
    /// `None` when the target no longer exists.
    fn target_info(&self, target: TargetRef) -> Option<TargetInfo>;

    /// Applies damage; missing or dead targets take none.
    fn damage(
        &mut self,
        target: TargetRef,
        amount: f32,
        range: f32,
        damage_type: DamageType,
    ) -> DamageResult;

    /// Attaches a status to a unit. `None` when the unit is missing or dead.
    fn attach_status(&mut self, unit: UnitId, status: StatusInstance) -> Option<ApplyOutcome>;
}

/// [`CombatWorld`] over the simulation's own [`WorldState`].
pub struct Battlefield<'a> {
    state: &'a mut WorldState,
    env: SimEnv<'a>,
}

impl<'a> Battlefield<'a> {
    pub fn new(state: &'a mut WorldState, env: SimEnv<'a>) -> Self {
        Self { state, env }
    }

    pub fn state(&self) -> &WorldState {
        self.state
    }

    fn damage_unit(&mut self, id: UnitId, amount: f32, range: f32) -> DamageResult {
        let rules = self.env.rules();
        let Some(unit) = self.state.unit(id).filter(|unit| unit.is_alive()) else {
            return DamageResult::NONE;
        };

        let mut amount = amount.max(0.0);
        if unit.statuses.has(StatusKind::SwarmResist) {
            amount *= rules.swarm_resist_damage_mult;
        }

        let mut projected = 0.0;
        if let Some(projector) = self.state.relations.shield_for(id)
            && let Some(ability) = self.state.ability_mut(projector.unit, projector.slot)
        {
            projected = amount.clamp(0.0, ability.pool.max(0.0));
            ability.pool -= projected;
            amount -= projected;
        }

        let Some(unit) = self.state.unit_mut(id) else {
            return DamageResult::NONE;
        };
        let mut result = unit.take_damage(amount, range, rules);
        result.absorbed += projected;
        if result.died {
            tracing::debug!(unit = %id, "unit destroyed");
        }
        result
    }
}

impl CombatWorld for Battlefield<'_> {
    fn target_info(&self, target: TargetRef) -> Option<TargetInfo> {
        match target {
            TargetRef::Unit(id) => {
                let unit = self.state.unit(id)?;
                let projected = self
                    .state
                    .relations
                    .shield_for(id)
                    .and_then(|p| self.state.ability(p.unit, p.slot))
                    .map_or(0.0, |ability| ability.pool.max(0.0));
                Some(TargetInfo {
                    position: unit.position,
                    team: unit.team,
                    shield: unit.vitals.shield.current + projected,
                    alive: unit.is_alive(),
                })
            }
            TargetRef::Swarm(handle) => {
                let group = self.state.swarms.get(handle)?;
                Some(TargetInfo {
                    position: group.position,
                    team: group.team,
                    shield: 0.0,
                    alive: !group.is_destroyed(),
                })
            }
        }
    }

    fn damage(
        &mut self,
        target: TargetRef,
        amount: f32,
        range: f32,
        damage_type: DamageType,
    ) -> DamageResult {
        tracing::trace!(?target, amount, range, %damage_type, "damage");
        match target {
            TargetRef::Unit(id) => self.damage_unit(id, amount, range),
            TargetRef::Swarm(handle) => self
                .state
                .swarms
                .get_mut(handle)
                .map_or(DamageResult::NONE, |group| group.take_damage(amount)),
        }
    }

    fn attach_status(&mut self, unit: UnitId, status: StatusInstance) -> Option<ApplyOutcome> {
        self.state.apply_status(unit, status)
    }
}
