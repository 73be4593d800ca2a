//! Tick scheduling and order execution.
//!
//! The [`SimEngine`] is the single writer of a [`WorldState`]. Orders,
//! status applications, shots and time all flow through it; collaborators
//! observe the results through snapshots and the [`EffectSink`].

mod intent;
mod swarms;

pub use intent::Intent;

use glam::Vec3;

use crate::ability::{
    AbilityContext, AbilityError, AbilityInstance, AbilitySnapshot, AbilityTarget, IgnoreReason,
    TargetRequirement, UseOutcome, behavior_for,
};
use crate::combat::{
    Battlefield, CollisionOracle, CombatWorld, HitResolution, Hitscan, resolve_direct,
    resolve_traced,
};
use crate::env::{EffectSink, SimEnv};
use crate::state::{
    ReplicationError, SourceRef, TargetRef, UnitId, UnitReplica, UnitSnapshot, UnitSpec,
    WorldState,
};
use crate::status::{ApplyOutcome, StatusInstance, StatusKind};

/// Simulation engine over a borrowed world.
pub struct SimEngine<'a> {
    state: &'a mut WorldState,
    env: SimEnv<'a>,
}

impl<'a> SimEngine<'a> {
    pub fn new(state: &'a mut WorldState, env: SimEnv<'a>) -> Self {
        Self { state, env }
    }

    pub fn state(&self) -> &WorldState {
        self.state
    }

    pub fn env(&self) -> SimEnv<'a> {
        self.env
    }

    pub fn spawn_unit(&mut self, spec: &UnitSpec) -> UnitId {
        let id = self
            .state
            .spawn(spec, self.env.abilities(), self.env.rules());
        tracing::debug!(unit = %id, team = spec.team.0, slots = spec.abilities.len(), "unit spawned");
        id
    }

    // ========================================================================
    // Orders
    // ========================================================================

    /// Routes a use order to the ability in `slot`.
    ///
    /// Premature orders (cooldown, suspension, passive kinds, dead units)
    /// are ignored without any state change. On activation the kind's
    /// behavior runs once and the instant window closes again.
    pub fn use_ability(
        &mut self,
        unit: UnitId,
        slot: usize,
        target: AbilityTarget,
        effects: &mut dyn EffectSink,
    ) -> Result<UseOutcome, AbilityError> {
        let (mut ability, suspended, alive) = {
            let u = self.state.unit(unit).ok_or(AbilityError::UnitNotFound(unit))?;
            let ability = *u.ability(slot).ok_or(AbilityError::SlotOutOfRange {
                unit,
                slot,
                slots: u.slot_count(),
            })?;
            (ability, u.statuses.suspends_abilities(), u.is_alive())
        };
        if !alive {
            return Ok(UseOutcome::Ignored(IgnoreReason::UnitDead));
        }

        let outcome = ability.begin_use(&target, suspended)?;
        if let UseOutcome::Ignored(reason) = outcome {
            tracing::trace!(unit = %unit, slot, ?reason, "ability order ignored");
            return Ok(outcome);
        }

        let mut ctx = AbilityContext::new(unit, slot, &mut *self.state, self.env, &mut *effects);
        behavior_for(ability.kind()).on_activate(&mut ctx, &mut ability, target);
        ability.finish_activation();
        self.store(unit, slot, ability);

        tracing::debug!(unit = %unit, slot, kind = %ability.kind(), ?target, "ability activated");
        Ok(outcome)
    }

    /// Routes a command wheel order, coercing the optional position to the
    /// slot's target requirement.
    ///
    /// Unit-targeted kinds pick the nearest living unit within
    /// `command_wheel_pick_radius` of the position.
    pub fn use_command_wheel(
        &mut self,
        unit: UnitId,
        slot: usize,
        position: Option<Vec3>,
        effects: &mut dyn EffectSink,
    ) -> Result<UseOutcome, AbilityError> {
        let ability = self
            .state
            .unit(unit)
            .ok_or(AbilityError::UnitNotFound(unit))
            .and_then(|u| {
                u.ability(slot).ok_or(AbilityError::SlotOutOfRange {
                    unit,
                    slot,
                    slots: u.slot_count(),
                })
            })?;
        let (kind, requirement) = (ability.kind(), ability.target_requirement());

        let target = match (requirement, position) {
            (TargetRequirement::None, _) => AbilityTarget::None,
            (TargetRequirement::Position, Some(p)) => AbilityTarget::Position(p),
            (TargetRequirement::Unit, Some(p)) => {
                let radius = self.env.rules().command_wheel_pick_radius;
                let picked = self
                    .state
                    .nearest_unit(p, radius)
                    .ok_or(AbilityError::NothingUnderCursor { radius })?;
                AbilityTarget::Unit(picked)
            }
            (expected, None) => {
                return Err(AbilityError::TargetMismatch {
                    kind,
                    expected,
                    found: TargetRequirement::None,
                });
            }
        };
        self.use_ability(unit, slot, target, effects)
    }

    /// Applies a forwarded client order.
    pub fn execute(
        &mut self,
        intent: Intent,
        effects: &mut dyn EffectSink,
    ) -> Result<UseOutcome, AbilityError> {
        match intent {
            Intent::UseAbility { unit, slot, target } => {
                self.use_ability(unit, slot, target, effects)
            }
            Intent::UseCommandWheel { unit, slot, target } => {
                self.use_command_wheel(unit, slot, target, effects)
            }
        }
    }

    /// Runs a slot's end hook: tears down its effect and releases any links.
    pub fn end_ability(
        &mut self,
        unit: UnitId,
        slot: usize,
        effects: &mut dyn EffectSink,
    ) -> Result<(), AbilityError> {
        let u = self.state.unit(unit).ok_or(AbilityError::UnitNotFound(unit))?;
        let mut ability = *u.ability(slot).ok_or(AbilityError::SlotOutOfRange {
            unit,
            slot,
            slots: u.slot_count(),
        })?;

        let mut ctx = AbilityContext::new(unit, slot, &mut *self.state, self.env, effects);
        behavior_for(ability.kind()).on_end(&mut ctx, &mut ability);
        self.store(unit, slot, ability);
        Ok(())
    }

    fn store(&mut self, unit: UnitId, slot: usize, ability: AbilityInstance) {
        debug_assert!(
            self.state.unit(unit).is_none()
                || self.state.ability(unit, slot).map(|a| a.kind()) == Some(ability.kind()),
            "ability written back to a slot of another kind"
        );
        if let Some(stored) = self.state.ability_mut(unit, slot) {
            *stored = ability;
        }
    }

    // ========================================================================
    // Statuses and combat
    // ========================================================================

    pub fn apply_status(
        &mut self,
        unit: UnitId,
        kind: StatusKind,
        source: Option<SourceRef>,
    ) -> Option<ApplyOutcome> {
        self.apply_status_instance(unit, StatusInstance::new(kind, source))
    }

    pub fn apply_status_instance(
        &mut self,
        unit: UnitId,
        status: StatusInstance,
    ) -> Option<ApplyOutcome> {
        let outcome = self.state.apply_status(unit, status);
        tracing::trace!(unit = %unit, kind = %status.kind, ?outcome, "status applied");
        outcome
    }

    /// Resolves a shot. A live `goal` is hit directly; otherwise the ray is
    /// traced through `collision`, or through the world's own unit spheres
    /// when no oracle is given.
    pub fn fire_hitscan(
        &mut self,
        scan: &Hitscan,
        goal: Option<TargetRef>,
        collision: Option<&dyn CollisionOracle>,
        effects: &mut dyn EffectSink,
    ) -> HitResolution {
        let rules = self.env.rules();

        if let Some(goal) = goal {
            let mut field = Battlefield::new(&mut *self.state, self.env);
            if field.target_info(goal).is_some() {
                return resolve_direct(scan, goal, &mut field, effects);
            }
        }

        let ray = scan.ray();
        let hit = match collision {
            Some(oracle) => oracle.raycast(&ray),
            None => self.state.raycast(&ray),
        };
        let mut field = Battlefield::new(&mut *self.state, self.env);
        resolve_traced(scan, hit, &mut field, effects, rules)
    }

    pub fn set_position(&mut self, unit: UnitId, position: Vec3) -> bool {
        match self.state.unit_mut(unit) {
            Some(u) => {
                u.position = position;
                true
            }
            None => false,
        }
    }

    /// Ends every ability of the unit and removes it from the world.
    pub fn destroy_unit(&mut self, unit: UnitId, effects: &mut dyn EffectSink) -> bool {
        let Some(slots) = self.state.unit(unit).map(|u| u.slot_count()) else {
            return false;
        };
        for slot in 0..slots {
            // slot is in range and the unit cannot vanish mid-loop
            let _ = self.end_ability(unit, slot, &mut *effects);
        }
        self.state.remove_unit(unit);
        tracing::info!(unit = %unit, "unit removed");
        true
    }

    // ========================================================================
    // Time
    // ========================================================================

    /// Advances the simulation by a frame delta.
    ///
    /// The global time scale is applied once here. Order of work: per unit
    /// (ascending id) statuses, critical burn, then each slot's timers and
    /// tick hook; then fighter groups; then dead units are removed.
    pub fn tick(&mut self, dt: f32, effects: &mut dyn EffectSink) {
        let dt = dt * self.env.rules().time_scale();
        if dt <= 0.0 {
            return;
        }
        self.state.advance_clock(dt);

        for unit in self.state.unit_ids() {
            self.tick_unit(unit, dt, &mut *effects);
        }
        swarms::tick_swarms(self.state, self.env, &mut *effects, dt);
        self.reap(effects);
    }

    fn tick_unit(&mut self, id: UnitId, dt: f32, effects: &mut dyn EffectSink) {
        let (rules, registry) = (self.env.rules(), self.env.statuses());
        let Some(unit) = self.state.unit_mut(id).filter(|u| u.is_alive()) else {
            return;
        };

        for kind in unit.statuses.tick(dt, registry) {
            tracing::debug!(unit = %id, %kind, "status expired");
        }
        if unit.burn(dt, rules).died {
            tracing::debug!(unit = %id, "unit burned out");
        }

        for slot in 0..unit.slot_count() {
            let Some(mut ability) = self.state.ability(id, slot).copied() else {
                continue;
            };
            let events = ability.tick_timers(dt);

            let mut ctx = AbilityContext::new(id, slot, &mut *self.state, self.env, &mut *effects);
            if events.exhausted {
                tracing::debug!(unit = %id, slot, kind = %ability.kind(), "toggle exhausted");
                ctx.set_active(ability.kind(), false);
            }
            behavior_for(ability.kind()).on_tick(&mut ctx, &mut ability, dt);
            self.store(id, slot, ability);
        }
    }

    fn reap(&mut self, effects: &mut dyn EffectSink) {
        let dead: Vec<UnitId> = self
            .state
            .units()
            .filter(|u| !u.is_alive())
            .map(|u| u.id)
            .collect();
        for unit in dead {
            self.destroy_unit(unit, &mut *effects);
        }
    }

    // ========================================================================
    // Queries and replication
    // ========================================================================

    pub fn snapshot(&self, unit: UnitId) -> Option<UnitSnapshot> {
        self.state.unit(unit).map(|u| u.snapshot())
    }

    pub fn ability_snapshot(&self, unit: UnitId, slot: usize) -> Option<AbilitySnapshot> {
        self.state.ability(unit, slot).map(AbilitySnapshot::of)
    }

    /// Movement speed multiplier for the movement collaborator.
    pub fn speed_multiplier(&self, unit: UnitId) -> Option<f32> {
        self.state
            .unit(unit)
            .map(|u| u.speed_multiplier(self.env.rules()))
    }

    pub fn replicate(&self, unit: UnitId) -> Option<UnitReplica> {
        self.state.replicate(unit)
    }

    pub fn apply_replica(&mut self, replica: &UnitReplica) -> Result<(), ReplicationError> {
        self.state.apply_replica(replica)
    }
}
