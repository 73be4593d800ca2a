//! Per-unit, per-slot ability runtime.
//!
//! # States
//!
//! - `OnCooldown` / `Ready`: driven by the normalised cooldown timer (1.0 right
//!   after use, ticks down at the catalog cooldown rate, clamped at 0).
//! - Toggle kinds additionally carry an `Engaged` / `Disengaged` flag that is
//!   orthogonal to cooldown. Engaged toggles drain the energy pool at the
//!   active rate and drop out abruptly once it runs dry; disengaged toggles
//!   refill it at the reset rate.
//!
//! Passive kinds never engage; their behavior runs every tick regardless.

use crate::state::UnitId;

use super::catalog::{AbilityCatalog, Rates};
use super::error::AbilityError;
use super::kind::{AbilityKind, AbilityTarget, ActivationStyle, TargetRequirement};
use super::snapshot::AbilitySnapshot;

/// Cooldown state of an ability.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CooldownState {
    OnCooldown,
    Ready,
}

/// Engagement state of a toggle ability.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ToggleState {
    Engaged,
    Disengaged,
}

/// Why a use order was ignored. None of these change state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum IgnoreReason {
    OnCooldown,
    /// A status on the unit has its abilities offline.
    Suspended,
    Passive,
    UnitDead,
}

/// Result of a use order that was routed to an ability.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UseOutcome {
    /// The effect handler was dispatched.
    Activated,
    Ignored(IgnoreReason),
}

impl UseOutcome {
    pub fn is_activated(&self) -> bool {
        matches!(self, Self::Activated)
    }
}

/// Timer transitions observed during one tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TimerEvents {
    pub became_ready: bool,
    /// Toggle ran out of energy and was forced off.
    pub exhausted: bool,
}

/// Runtime state of one ability slot.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AbilityInstance {
    kind: AbilityKind,
    rates: Rates,
    cooldown: f32,
    active: bool,
    energy: f32,
    /// Kind-specific counter: deployments left, live groups, borrow flag.
    pub stacks: i32,
    /// Kind-specific pooled resource (shield projection).
    pub pool: f32,
    /// Non-owning link to the unit this ability currently acts on.
    pub link: Option<UnitId>,
}

impl AbilityInstance {
    pub fn new(kind: AbilityKind, catalog: &AbilityCatalog) -> Self {
        Self {
            kind,
            rates: catalog.rates(kind),
            cooldown: 0.0,
            active: false,
            energy: 1.0,
            stacks: 0,
            pool: 0.0,
            link: None,
        }
    }

    #[inline]
    pub fn kind(&self) -> AbilityKind {
        self.kind
    }

    #[inline]
    pub fn style(&self) -> ActivationStyle {
        AbilityCatalog::activation_style(self.kind)
    }

    #[inline]
    pub fn target_requirement(&self) -> TargetRequirement {
        AbilityCatalog::target_requirement(self.kind)
    }

    #[inline]
    pub fn rates(&self) -> Rates {
        self.rates
    }

    /// Remaining cooldown, 1.0 right after use and 0.0 when ready.
    #[inline]
    pub fn cooldown(&self) -> f32 {
        self.cooldown
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.active
    }

    #[inline]
    pub fn energy(&self) -> f32 {
        self.energy
    }

    pub fn cooldown_state(&self) -> CooldownState {
        if self.cooldown > 0.0 {
            CooldownState::OnCooldown
        } else {
            CooldownState::Ready
        }
    }

    /// Engagement state; `None` for non-toggle kinds.
    pub fn toggle_state(&self) -> Option<ToggleState> {
        (self.style() == ActivationStyle::Toggle).then_some(if self.active {
            ToggleState::Engaged
        } else {
            ToggleState::Disengaged
        })
    }

    /// Validates a use order and performs the activation bookkeeping.
    ///
    /// On `Activated` the cooldown restarts at 1.0, toggles flip and instant
    /// kinds are marked active until [`finish_activation`](Self::finish_activation).
    pub fn begin_use(
        &mut self,
        target: &AbilityTarget,
        suspended: bool,
    ) -> Result<UseOutcome, AbilityError> {
        if self.cooldown > 0.0 {
            return Ok(UseOutcome::Ignored(IgnoreReason::OnCooldown));
        }

        let style = self.style();
        if style == ActivationStyle::Passive {
            return Ok(UseOutcome::Ignored(IgnoreReason::Passive));
        }
        if suspended {
            return Ok(UseOutcome::Ignored(IgnoreReason::Suspended));
        }

        let expected = self.target_requirement();
        if target.class() != expected {
            return Err(AbilityError::TargetMismatch {
                kind: self.kind,
                expected,
                found: target.class(),
            });
        }

        self.start_cooldown();
        match style {
            ActivationStyle::Toggle => self.active = !self.active,
            ActivationStyle::Instant => self.active = true,
            ActivationStyle::Passive => {}
        }
        Ok(UseOutcome::Activated)
    }

    /// Ends the activation window of instant kinds.
    pub fn finish_activation(&mut self) {
        if self.style() == ActivationStyle::Instant {
            self.active = false;
        }
    }

    pub fn start_cooldown(&mut self) {
        self.cooldown = 1.0;
    }

    pub fn reset_cooldown(&mut self) {
        self.cooldown = 0.0;
    }

    /// Forces the ability off (toggle disengage, instant window closed).
    pub fn deactivate(&mut self) {
        self.active = false;
    }

    /// Advances cooldown and energy by an already time-scaled delta.
    pub fn tick_timers(&mut self, dt: f32) -> TimerEvents {
        let mut events = TimerEvents::default();

        if self.cooldown > 0.0 {
            self.cooldown = (self.cooldown - dt * self.rates.cooldown).max(0.0);
            events.became_ready = self.cooldown == 0.0;
        }

        if self.style() == ActivationStyle::Toggle {
            if self.active {
                self.energy -= dt * self.rates.active;
                if self.energy < 0.0 {
                    self.energy = 0.0;
                    self.active = false;
                    events.exhausted = true;
                }
            } else {
                self.energy = (self.energy + dt * self.rates.reset).clamp(0.0, 1.0);
            }
        }

        events
    }

    /// Read-only view for the display layer.
    pub fn snapshot(&self) -> AbilitySnapshot {
        AbilitySnapshot::of(self)
    }

    /// Overwrites replicated fields (kind must match).
    pub(crate) fn restore(&mut self, cooldown: f32, active: bool, stacks: i32, energy: f32) {
        self.cooldown = cooldown.max(0.0);
        self.active = active;
        self.stacks = stacks;
        self.energy = energy.clamp(0.0, 1.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ability(kind: AbilityKind) -> AbilityInstance {
        AbilityInstance::new(kind, &AbilityCatalog::new())
    }

    #[test]
    fn use_starts_cooldown_and_ticks_down_at_catalog_rate() {
        let mut chain = ability(AbilityKind::Chain);
        let outcome = chain.begin_use(&AbilityTarget::Unit(UnitId(2)), false).unwrap();
        assert_eq!(outcome, UseOutcome::Activated);
        assert_eq!(chain.cooldown(), 1.0);

        chain.tick_timers(5.0);
        assert!((chain.cooldown() - 0.75).abs() < 1e-6);
        assert_eq!(chain.cooldown_state(), CooldownState::OnCooldown);
    }

    #[test]
    fn cooldown_clamps_at_zero() {
        let mut heal = ability(AbilityKind::HealField);
        heal.begin_use(&AbilityTarget::None, false).unwrap();
        let events = heal.tick_timers(100.0);
        assert_eq!(heal.cooldown(), 0.0);
        assert!(events.became_ready);
        assert_eq!(heal.cooldown_state(), CooldownState::Ready);
    }

    #[test]
    fn second_use_inside_cooldown_window_is_ignored() {
        let mut heal = ability(AbilityKind::HealField);
        assert!(heal.begin_use(&AbilityTarget::None, false).unwrap().is_activated());
        heal.tick_timers(0.5);
        let before = heal;
        let outcome = heal.begin_use(&AbilityTarget::None, false).unwrap();
        assert_eq!(outcome, UseOutcome::Ignored(IgnoreReason::OnCooldown));
        assert_eq!(heal, before);
    }

    #[test]
    fn wrong_target_class_is_rejected_without_state_change() {
        let mut chain = ability(AbilityKind::Chain);
        let err = chain.begin_use(&AbilityTarget::None, false).unwrap_err();
        assert!(matches!(
            err,
            AbilityError::TargetMismatch { expected: TargetRequirement::Unit, found: TargetRequirement::None, .. }
        ));
        assert_eq!(chain.cooldown(), 0.0);
    }

    #[test]
    fn suspension_blocks_use() {
        let mut heal = ability(AbilityKind::HealField);
        let outcome = heal.begin_use(&AbilityTarget::None, true).unwrap();
        assert_eq!(outcome, UseOutcome::Ignored(IgnoreReason::Suspended));
        assert_eq!(heal.cooldown_state(), CooldownState::Ready);
    }

    #[test]
    fn passive_kinds_never_engage() {
        let mut regen = ability(AbilityKind::ArmorRegen);
        let outcome = regen.begin_use(&AbilityTarget::None, false).unwrap();
        assert_eq!(outcome, UseOutcome::Ignored(IgnoreReason::Passive));
        assert!(!regen.is_active());
        assert_eq!(regen.toggle_state(), None);
    }

    #[test]
    fn instant_kind_is_active_only_until_finished() {
        let mut heal = ability(AbilityKind::HealField);
        heal.begin_use(&AbilityTarget::None, false).unwrap();
        assert!(heal.is_active());
        heal.finish_activation();
        assert!(!heal.is_active());
    }

    #[test]
    fn toggle_flips_and_drains_energy() {
        let mut drain = ability(AbilityKind::ArmorDrain);
        drain.begin_use(&AbilityTarget::None, false).unwrap();
        drain.finish_activation();
        assert_eq!(drain.toggle_state(), Some(ToggleState::Engaged));

        drain.tick_timers(5.0);
        assert!((drain.energy() - 0.5).abs() < 1e-6);
        assert!(drain.is_active());
    }

    #[test]
    fn toggle_exhaustion_forces_abrupt_deactivation() {
        let mut drain = ability(AbilityKind::ArmorDrain);
        drain.begin_use(&AbilityTarget::None, false).unwrap();

        let events = drain.tick_timers(10.5);
        assert!(events.exhausted);
        assert!(!drain.is_active());
        assert_eq!(drain.energy(), 0.0);
    }

    #[test]
    fn disengaged_toggle_regenerates_up_to_full() {
        let mut drain = ability(AbilityKind::ArmorDrain);
        drain.begin_use(&AbilityTarget::None, false).unwrap();
        drain.tick_timers(10.5);

        drain.tick_timers(10.0);
        assert!((drain.energy() - 0.5).abs() < 1e-6);
        drain.tick_timers(100.0);
        assert_eq!(drain.energy(), 1.0);
    }

    #[test]
    fn energy_stays_in_unit_interval_over_arbitrary_ticks() {
        let mut drain = ability(AbilityKind::ArmorDrain);
        let deltas = [0.016, 3.0, 0.5, 12.0, 0.0, 7.25, 40.0, 0.1];
        for (i, dt) in deltas.iter().cycle().take(200).enumerate() {
            if i % 3 == 0 {
                let _ = drain.begin_use(&AbilityTarget::None, false);
            }
            drain.tick_timers(*dt);
            assert!((0.0..=1.0).contains(&drain.energy()), "energy {}", drain.energy());
            assert!(drain.cooldown() >= 0.0 && drain.cooldown().is_finite());
        }
    }
}
