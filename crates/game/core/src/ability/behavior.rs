//! Per-kind ability effects.
//!
//! Each kind has one stateless [`AbilityBehavior`] record, selected by
//! [`behavior_for`]. Behaviors receive the ability being driven separately
//! from the world: the engine copies the slot out before dispatch and writes
//! it back afterwards, so a behavior may freely mutate other units.

use crate::combat::Battlefield;
use crate::config::GameRules;
use crate::env::{EffectRequest, EffectSink, SimEnv};
use crate::state::{Unit, UnitId, WorldState};

use super::instance::AbilityInstance;
use super::kind::{AbilityKind, AbilityTarget};
use super::kinds;

/// Everything a behavior may touch while running.
pub struct AbilityContext<'a> {
    pub user: UnitId,
    pub slot: usize,
    pub state: &'a mut WorldState,
    pub env: SimEnv<'a>,
    pub effects: &'a mut dyn EffectSink,
}

impl<'a> AbilityContext<'a> {
    pub fn new(
        user: UnitId,
        slot: usize,
        state: &'a mut WorldState,
        env: SimEnv<'a>,
        effects: &'a mut dyn EffectSink,
    ) -> Self {
        Self {
            user,
            slot,
            state,
            env,
            effects,
        }
    }

    #[inline]
    pub fn rules(&self) -> &'a GameRules {
        self.env.rules()
    }

    /// The using unit, if it still exists and is alive.
    pub fn user_unit(&self) -> Option<&Unit> {
        self.state.unit(self.user).filter(|u| u.is_alive())
    }

    /// The living unit named by `target`.
    pub fn target_unit(&self, target: AbilityTarget) -> Option<&Unit> {
        target
            .unit()
            .and_then(|id| self.state.unit(id))
            .filter(|u| u.is_alive())
    }

    pub fn battlefield(&mut self) -> Battlefield<'_> {
        Battlefield::new(&mut *self.state, self.env)
    }

    pub fn spawn_effect(&mut self, kind: AbilityKind, target: AbilityTarget) {
        self.effects.request(EffectRequest::Spawn {
            owner: self.user,
            slot: self.slot,
            kind,
            target,
        });
    }

    pub fn set_active(&mut self, kind: AbilityKind, active: bool) {
        self.effects.request(EffectRequest::SetActive {
            owner: self.user,
            slot: self.slot,
            kind,
            active,
        });
    }

    pub fn end_effect(&mut self, kind: AbilityKind) {
        self.effects.request(EffectRequest::End {
            owner: self.user,
            slot: self.slot,
            kind,
        });
    }
}

/// Kind-specific hooks around the shared ability state machine.
///
/// `on_activate` runs only after the state machine accepted a use order.
/// `on_tick` runs every tick while the user is alive, after timers advanced.
/// `on_end` must tolerate being called on an ability that was never used.
pub trait AbilityBehavior: Sync {
    /// Seeds kind-specific counters when the slot is created.
    fn init(&self, _ability: &mut AbilityInstance, _rules: &GameRules) {}

    fn on_activate(
        &self,
        ctx: &mut AbilityContext<'_>,
        ability: &mut AbilityInstance,
        target: AbilityTarget,
    );

    fn on_tick(&self, _ctx: &mut AbilityContext<'_>, _ability: &mut AbilityInstance, _dt: f32) {}

    fn on_end(&self, ctx: &mut AbilityContext<'_>, ability: &mut AbilityInstance) {
        ability.deactivate();
        ctx.end_effect(ability.kind());
    }
}

/// Behavior record for `kind`.
pub fn behavior_for(kind: AbilityKind) -> &'static dyn AbilityBehavior {
    match kind {
        AbilityKind::Default => &kinds::SelfDestruct,
        AbilityKind::ArmorDrain => &kinds::ArmorDrain,
        AbilityKind::ArmorRegen => &kinds::ArmorRegen,
        AbilityKind::SpawnSwarm => &kinds::SpawnSwarm,
        AbilityKind::MoveSwarm => &kinds::MoveSwarm,
        AbilityKind::ShieldProject => &kinds::ShieldProject,
        AbilityKind::HealField => &kinds::HealField,
        AbilityKind::Chain => &kinds::Chain,
        AbilityKind::Superlaser => &kinds::Superlaser,
    }
}
