//! Per-unit status collection.
//!
//! # Time-left
//!
//! Instances store a normalised time-left (1.0 = fresh) that countdown kinds
//! lose at `1 / duration` per second; an instance is dropped once it falls
//! below zero. Stacking kinds reuse the field as stored value, so it may grow
//! past 1.0 (the Superlaser mark keeps its collected damage there).

use arrayvec::ArrayVec;

use crate::config::GameRules;
use crate::state::SourceRef;

use super::kind::StatusKind;
use super::registry::StatusRegistry;

/// A single status attached to a unit.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusInstance {
    pub kind: StatusKind,
    /// Weak attribution; never dereferenced by the simulation.
    pub source: Option<SourceRef>,
    time_left: f32,
}

impl StatusInstance {
    pub fn new(kind: StatusKind, source: Option<SourceRef>) -> Self {
        Self {
            kind,
            source,
            time_left: 1.0,
        }
    }

    /// Instance carrying a preset value (e.g. a mark's stored charge).
    pub fn with_value(kind: StatusKind, source: Option<SourceRef>, value: f32) -> Self {
        Self {
            kind,
            source,
            time_left: value,
        }
    }

    #[inline]
    pub fn time_left(&self) -> f32 {
        self.time_left
    }

    pub fn set_time_left(&mut self, value: f32) {
        self.time_left = value;
    }

    pub fn refresh(&mut self) {
        self.time_left = 1.0;
    }

    pub fn add_time_left(&mut self, value: f32) {
        self.time_left += value;
    }

    /// Advances the countdown. Returns false once the instance has expired.
    pub fn update_time_left(&mut self, dt: f32, registry: &StatusRegistry) -> bool {
        self.time_left -= dt * registry.decay_rate(self.kind);
        self.time_left >= 0.0
    }
}

/// Result of applying a status.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ApplyOutcome {
    Added,
    Refreshed,
    Stacked,
    /// Collection full; the application was dropped.
    Dropped,
}

/// Active statuses on a unit.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusEffects {
    effects: ArrayVec<StatusInstance, { GameRules::MAX_STATUS_EFFECTS }>,
}

impl StatusEffects {
    pub fn empty() -> Self {
        Self {
            effects: ArrayVec::new(),
        }
    }

    /// Applies a fresh instance of `kind`.
    pub fn apply(&mut self, kind: StatusKind, source: Option<SourceRef>) -> ApplyOutcome {
        self.apply_instance(StatusInstance::new(kind, source))
    }

    /// Applies a prepared instance.
    ///
    /// - Non-stacking kind already present: refresh to 1.0, no duplicate.
    /// - Stacking kind from the same source: add the new value to it.
    /// - Otherwise: store a new instance.
    pub fn apply_instance(&mut self, status: StatusInstance) -> ApplyOutcome {
        if status.kind.stacks() {
            if let Some(existing) = self
                .effects
                .iter_mut()
                .find(|e| e.kind == status.kind && e.source == status.source)
            {
                existing.add_time_left(status.time_left);
                return ApplyOutcome::Stacked;
            }
        } else if let Some(existing) = self.effects.iter_mut().find(|e| e.kind == status.kind) {
            existing.refresh();
            return ApplyOutcome::Refreshed;
        }

        match self.effects.try_push(status) {
            Ok(()) => ApplyOutcome::Added,
            Err(_) => {
                tracing::warn!(kind = %status.kind, "status collection full, dropping application");
                ApplyOutcome::Dropped
            }
        }
    }

    /// Advances countdown kinds and removes the expired ones.
    ///
    /// Returns the kinds that expired during this tick.
    pub fn tick(&mut self, dt: f32, registry: &StatusRegistry) -> ArrayVec<StatusKind, { GameRules::MAX_STATUS_EFFECTS }> {
        let mut expired = ArrayVec::new();
        self.effects.retain(|status| {
            if !status.kind.counts_down() || status.update_time_left(dt, registry) {
                return true;
            }
            expired.push(status.kind);
            false
        });
        expired
    }

    pub fn has(&self, kind: StatusKind) -> bool {
        self.effects.iter().any(|e| e.kind == kind)
    }

    pub fn count(&self, kind: StatusKind) -> usize {
        self.effects.iter().filter(|e| e.kind == kind).count()
    }

    pub fn get(&self, kind: StatusKind) -> Option<&StatusInstance> {
        self.effects.iter().find(|e| e.kind == kind)
    }

    /// Removes every instance of `kind`.
    pub fn remove(&mut self, kind: StatusKind) {
        self.effects.retain(|e| e.kind != kind);
    }

    /// Removes every instance of `kind` and returns the sum of their values.
    pub fn consume(&mut self, kind: StatusKind) -> f32 {
        let mut total = 0.0;
        self.effects.retain(|e| {
            if e.kind == kind {
                total += e.time_left;
                false
            } else {
                true
            }
        });
        total
    }

    pub fn clear(&mut self) {
        self.effects.clear();
    }

    /// True if any active status blocks ability use.
    pub fn suspends_abilities(&self) -> bool {
        self.effects.iter().any(|e| e.kind.suspends_abilities())
    }

    pub fn is_stunned(&self) -> bool {
        self.effects.iter().any(|e| e.kind.stuns())
    }

    /// Statuses the UI should show.
    pub fn displayed(&self) -> impl Iterator<Item = &StatusInstance> {
        self.effects.iter().filter(|e| e.kind.should_display())
    }

    pub fn iter(&self) -> impl Iterator<Item = &StatusInstance> {
        self.effects.iter()
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{TargetRef, UnitId};

    fn from(id: u32) -> Option<SourceRef> {
        Some(TargetRef::Unit(UnitId(id)))
    }

    #[test]
    fn reapplying_non_stacking_kind_refreshes_single_instance() {
        let registry = StatusRegistry::new();
        let mut effects = StatusEffects::empty();
        effects.apply(StatusKind::ArmorMelt, from(1));
        effects.tick(2.5, &registry);
        assert!((effects.get(StatusKind::ArmorMelt).unwrap().time_left() - 0.5).abs() < 1e-5);

        assert_eq!(effects.apply(StatusKind::ArmorMelt, from(2)), ApplyOutcome::Refreshed);
        assert_eq!(effects.count(StatusKind::ArmorMelt), 1);
        assert_eq!(effects.get(StatusKind::ArmorMelt).unwrap().time_left(), 1.0);
    }

    #[test]
    fn stacking_kind_accumulates_value_from_same_source() {
        let mut effects = StatusEffects::empty();
        effects.apply_instance(StatusInstance::with_value(StatusKind::SuperlaserMark, from(1), 30.0));
        let outcome =
            effects.apply_instance(StatusInstance::with_value(StatusKind::SuperlaserMark, from(1), 12.0));

        assert_eq!(outcome, ApplyOutcome::Stacked);
        assert_eq!(effects.count(StatusKind::SuperlaserMark), 1);
        assert_eq!(effects.get(StatusKind::SuperlaserMark).unwrap().time_left(), 42.0);
    }

    #[test]
    fn stacking_kind_keeps_prior_instance_from_other_source() {
        let mut effects = StatusEffects::empty();
        effects.apply_instance(StatusInstance::with_value(StatusKind::SuperlaserMark, from(1), 30.0));
        effects.apply_instance(StatusInstance::with_value(StatusKind::SuperlaserMark, from(2), 10.0));

        assert_eq!(effects.count(StatusKind::SuperlaserMark), 2);
        assert_eq!(effects.consume(StatusKind::SuperlaserMark), 40.0);
        assert!(!effects.has(StatusKind::SuperlaserMark));
    }

    #[test]
    fn countdown_kind_expires_after_its_duration() {
        let registry = StatusRegistry::new();
        let mut effects = StatusEffects::empty();
        effects.apply(StatusKind::IonSuppressed, None);

        assert!(effects.tick(4.9, &registry).is_empty());
        assert!(effects.has(StatusKind::IonSuppressed));

        let expired = effects.tick(0.2, &registry);
        assert_eq!(expired.as_slice(), &[StatusKind::IonSuppressed]);
        assert!(effects.is_empty());
    }

    #[test]
    fn persistent_kind_survives_ticks() {
        let registry = StatusRegistry::new();
        let mut effects = StatusEffects::empty();
        effects.apply(StatusKind::SpawnSwarmSpeedNerf, None);
        for _ in 0..100 {
            effects.tick(1.0, &registry);
        }
        assert!(effects.has(StatusKind::SpawnSwarmSpeedNerf));
    }

    #[test]
    fn suspension_and_stun_queries() {
        let mut effects = StatusEffects::empty();
        assert!(!effects.suspends_abilities());
        effects.apply(StatusKind::IonSuppressed, None);
        assert!(effects.suspends_abilities());
        assert!(!effects.is_stunned());
        effects.apply(StatusKind::IonStunned, None);
        assert!(effects.is_stunned());
    }

    #[test]
    fn display_filter_hides_simulation_only_kinds() {
        let mut effects = StatusEffects::empty();
        effects.apply(StatusKind::SuperlaserMark, None);
        effects.apply(StatusKind::ArmorMelt, None);
        let shown: Vec<_> = effects.displayed().map(|s| s.kind).collect();
        assert_eq!(shown, vec![StatusKind::ArmorMelt]);
    }

    #[test]
    fn full_collection_drops_new_kinds() {
        let mut effects = StatusEffects::empty();
        for id in 0..GameRules::MAX_STATUS_EFFECTS as u32 {
            effects.apply_instance(StatusInstance::with_value(StatusKind::SuperlaserMark, from(id), 1.0));
        }
        assert_eq!(effects.apply(StatusKind::ArmorMelt, None), ApplyOutcome::Dropped);
        assert_eq!(effects.len(), GameRules::MAX_STATUS_EFFECTS);
    }
}
