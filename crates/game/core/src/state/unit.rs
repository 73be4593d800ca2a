//! Units and their damage model.

use arrayvec::ArrayVec;
use glam::Vec3;

use crate::ability::{AbilityCatalog, AbilityInstance, AbilityKind, AbilitySnapshot, behavior_for};
use crate::combat::DamageResult;
use crate::config::GameRules;
use crate::status::{ApplyOutcome, StatusColors, StatusEffects, StatusInstance, StatusKind};

use super::common::{Team, UnitId, Vitals};

/// Blueprint for spawning a unit.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct UnitSpec {
    pub team: Team,
    pub position: Vec3,
    /// Collider radius used by the built-in ray caster.
    pub radius: f32,
    pub health: f32,
    pub armor: f32,
    pub shield: f32,
    /// Ability kinds, one per slot. Slots past the limit are dropped.
    pub abilities: Vec<AbilityKind>,
}

impl Default for UnitSpec {
    fn default() -> Self {
        Self {
            team: Team(0),
            position: Vec3::ZERO,
            radius: 1.0,
            health: 100.0,
            armor: 0.0,
            shield: 0.0,
            abilities: Vec::new(),
        }
    }
}

impl UnitSpec {
    pub fn new(team: Team, position: Vec3) -> Self {
        Self {
            team,
            position,
            ..Self::default()
        }
    }

    pub fn with_vitals(mut self, health: f32, armor: f32, shield: f32) -> Self {
        self.health = health;
        self.armor = armor;
        self.shield = shield;
        self
    }

    pub fn with_radius(mut self, radius: f32) -> Self {
        self.radius = radius;
        self
    }

    pub fn with_abilities(mut self, abilities: impl IntoIterator<Item = AbilityKind>) -> Self {
        self.abilities = abilities.into_iter().collect();
        self
    }
}

/// A unit in the world.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Unit {
    pub id: UnitId,
    pub team: Team,
    pub position: Vec3,
    pub radius: f32,
    pub vitals: Vitals,
    abilities: ArrayVec<AbilityInstance, { GameRules::MAX_ABILITY_SLOTS }>,
    pub statuses: StatusEffects,
}

impl Unit {
    pub fn new(id: UnitId, spec: &UnitSpec, catalog: &AbilityCatalog, rules: &GameRules) -> Self {
        if spec.abilities.len() > GameRules::MAX_ABILITY_SLOTS {
            tracing::warn!(
                unit = %id,
                slots = spec.abilities.len(),
                max = GameRules::MAX_ABILITY_SLOTS,
                "too many ability slots, extra slots dropped"
            );
        }

        let abilities = spec
            .abilities
            .iter()
            .take(GameRules::MAX_ABILITY_SLOTS)
            .map(|kind| {
                let mut ability = AbilityInstance::new(*kind, catalog);
                behavior_for(*kind).init(&mut ability, rules);
                ability
            })
            .collect();

        Self {
            id,
            team: spec.team,
            position: spec.position,
            radius: spec.radius,
            vitals: Vitals::new(spec.health, spec.armor, spec.shield),
            abilities,
            statuses: StatusEffects::empty(),
        }
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.vitals.is_alive()
    }

    pub fn slot_count(&self) -> usize {
        self.abilities.len()
    }

    pub fn abilities(&self) -> &[AbilityInstance] {
        &self.abilities
    }

    pub fn ability(&self, slot: usize) -> Option<&AbilityInstance> {
        self.abilities.get(slot)
    }

    pub fn ability_mut(&mut self, slot: usize) -> Option<&mut AbilityInstance> {
        self.abilities.get_mut(slot)
    }

    /// First slot holding `kind`.
    pub fn slot_of(&self, kind: AbilityKind) -> Option<usize> {
        self.abilities.iter().position(|a| a.kind() == kind)
    }

    /// Attaches a status. Dead units take none.
    pub fn apply_status(&mut self, status: StatusInstance) -> Option<ApplyOutcome> {
        self.is_alive().then(|| self.statuses.apply_instance(status))
    }

    /// Shield, then armor (only when `range > 0`), then health.
    ///
    /// Projected shields and status multipliers are handled by the caller.
    pub fn take_damage(&mut self, amount: f32, range: f32, rules: &GameRules) -> DamageResult {
        if !self.is_alive() {
            return DamageResult::NONE;
        }

        let mut remaining = amount.max(0.0);
        let mut absorbed = self.vitals.shield.drain(remaining);
        remaining -= absorbed;

        if range > 0.0 && remaining > 0.0 {
            let mut fraction = rules.armor_absorption;
            if self.statuses.has(StatusKind::ArmorMelt) {
                fraction *= rules.armor_melt_absorption_mult;
            }
            let soaked = self.vitals.armor.drain(remaining * fraction);
            remaining -= soaked;
            absorbed += soaked;
        }

        let dealt = self.vitals.health.drain(remaining);
        DamageResult {
            dealt,
            absorbed,
            died: !self.is_alive(),
        }
    }

    /// Health lost to critical burn over `dt`. Bypasses shield and armor.
    pub fn burn(&mut self, dt: f32, rules: &GameRules) -> DamageResult {
        let burning = self.is_alive()
            && self.vitals.health.fraction() < rules.burn_health_threshold
            && !self.statuses.has(StatusKind::CriticalBurnImmune);
        if !burning {
            return DamageResult::NONE;
        }

        let dealt = self.vitals.health.drain(rules.burn_damage_per_second * dt);
        DamageResult {
            dealt,
            absorbed: 0.0,
            died: !self.is_alive(),
        }
    }

    /// Movement speed multiplier from statuses. 0 while stunned.
    pub fn speed_multiplier(&self, rules: &GameRules) -> f32 {
        if self.statuses.is_stunned() {
            return 0.0;
        }
        self.statuses.iter().fold(1.0, |mult, status| {
            mult * match status.kind {
                StatusKind::SpawnSwarmSpeedNerf => rules.spawn_swarm_speed_mult,
                StatusKind::SelfDestructSpeedBuff => rules.self_destruct_speed_mult,
                StatusKind::ModeSpeedNerf => rules.mode_speed_mult,
                _ => 1.0,
            }
        })
    }

    pub fn snapshot(&self) -> UnitSnapshot {
        UnitSnapshot {
            id: self.id,
            team: self.team,
            position: self.position,
            vitals: self.vitals,
            alive: self.is_alive(),
            abilities: self.abilities.iter().map(AbilitySnapshot::of).collect(),
            statuses: self
                .statuses
                .displayed()
                .map(|status| StatusView {
                    kind: status.kind,
                    name: status.kind.display_name(),
                    time_left: status.time_left(),
                    colors: status.kind.display_colors(),
                })
                .collect(),
        }
    }
}

/// Display row for one status.
#[derive(Clone, Debug, PartialEq)]
pub struct StatusView {
    pub kind: StatusKind,
    pub name: &'static str,
    pub time_left: f32,
    pub colors: Option<StatusColors>,
}

/// Read-only view of a unit for the display layer.
#[derive(Clone, Debug, PartialEq)]
pub struct UnitSnapshot {
    pub id: UnitId,
    pub team: Team,
    pub position: Vec3,
    pub vitals: Vitals,
    pub alive: bool,
    pub abilities: Vec<AbilitySnapshot>,
    /// Only kinds flagged for display.
    pub statuses: Vec<StatusView>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit(health: f32, armor: f32, shield: f32) -> Unit {
        let spec = UnitSpec::new(Team(0), Vec3::ZERO).with_vitals(health, armor, shield);
        Unit::new(UnitId(1), &spec, &AbilityCatalog::new(), &GameRules::default())
    }

    #[test]
    fn shield_absorbs_before_armor_and_health() {
        let rules = GameRules::default();
        let mut u = unit(100.0, 50.0, 30.0);
        let result = u.take_damage(50.0, 10.0, &rules);

        assert_eq!(u.vitals.shield.current, 0.0);
        // 20 left after shield; armor soaks half
        assert_eq!(u.vitals.armor.current, 40.0);
        assert_eq!(u.vitals.health.current, 90.0);
        assert_eq!(result.dealt, 10.0);
        assert_eq!(result.absorbed, 40.0);
    }

    #[test]
    fn point_blank_ignores_armor() {
        let rules = GameRules::default();
        let mut u = unit(100.0, 50.0, 0.0);
        u.take_damage(30.0, 0.0, &rules);
        assert_eq!(u.vitals.armor.current, 50.0);
        assert_eq!(u.vitals.health.current, 70.0);
    }

    #[test]
    fn armor_melt_weakens_absorption() {
        let rules = GameRules::default();
        let mut u = unit(100.0, 50.0, 0.0);
        u.apply_status(StatusInstance::new(StatusKind::ArmorMelt, None));
        u.take_damage(40.0, 5.0, &rules);
        assert_eq!(u.vitals.armor.current, 40.0);
        assert_eq!(u.vitals.health.current, 70.0);
    }

    #[test]
    fn lethal_damage_reports_death_and_further_damage_is_ignored() {
        let rules = GameRules::default();
        let mut u = unit(10.0, 0.0, 0.0);
        assert!(u.take_damage(25.0, 0.0, &rules).died);
        assert!(!u.is_alive());
        assert_eq!(u.take_damage(5.0, 0.0, &rules), DamageResult::NONE);
        assert_eq!(u.apply_status(StatusInstance::new(StatusKind::ArmorMelt, None)), None);
    }

    #[test]
    fn burn_only_below_threshold_and_without_immunity() {
        let rules = GameRules::default();
        let mut healthy = unit(100.0, 0.0, 0.0);
        assert_eq!(healthy.burn(1.0, &rules).dealt, 0.0);

        let mut critical = unit(100.0, 0.0, 0.0);
        critical.vitals.health.current = 10.0;
        assert_eq!(critical.burn(1.0, &rules).dealt, rules.burn_damage_per_second);

        critical.apply_status(StatusInstance::new(StatusKind::CriticalBurnImmune, None));
        assert_eq!(critical.burn(1.0, &rules).dealt, 0.0);
    }

    #[test]
    fn speed_multiplier_is_zero_when_stunned() {
        let rules = GameRules::default();
        let mut u = unit(100.0, 0.0, 0.0);
        u.apply_status(StatusInstance::new(StatusKind::SpawnSwarmSpeedNerf, None));
        assert_eq!(u.speed_multiplier(&rules), rules.spawn_swarm_speed_mult);

        u.apply_status(StatusInstance::new(StatusKind::IonStunned, None));
        assert_eq!(u.speed_multiplier(&rules), 0.0);
    }

    #[test]
    fn extra_ability_slots_are_dropped() {
        let spec = UnitSpec::default().with_abilities([AbilityKind::HealField; 6]);
        let u = Unit::new(UnitId(1), &spec, &AbilityCatalog::new(), &GameRules::default());
        assert_eq!(u.slot_count(), GameRules::MAX_ABILITY_SLOTS);
    }

    #[test]
    fn snapshot_lists_only_displayed_statuses() {
        let mut u = unit(100.0, 0.0, 0.0);
        u.apply_status(StatusInstance::new(StatusKind::ArmorMelt, None));
        u.apply_status(StatusInstance::new(StatusKind::CriticalBurnImmune, None));
        let snapshot = u.snapshot();
        assert_eq!(snapshot.statuses.len(), 1);
        assert_eq!(snapshot.statuses[0].name, "Disintegration");
    }
}
