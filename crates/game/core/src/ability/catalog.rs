//! Ability policy table.
//!
//! Pure lookups keyed by [`AbilityKind`]: duration triples and the per-second
//! rates derived from them, target requirement, activation style and display
//! data. Durations can be overridden by content; everything else is fixed.

use std::collections::BTreeMap;

use super::kind::{AbilityKind, ActivationStyle, TargetRequirement};

/// Configured durations of an ability, in seconds. Zero means "one second".
#[derive(Clone, Copy, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Durations {
    pub cooldown: f32,
    pub active: f32,
    pub reset: f32,
}

impl Durations {
    pub const fn new(cooldown: f32, active: f32, reset: f32) -> Self {
        Self {
            cooldown,
            active,
            reset,
        }
    }

    /// Converts durations into multipliers per second.
    pub fn rates(&self) -> Rates {
        Rates {
            cooldown: rate_of(self.cooldown),
            active: rate_of(self.active),
            reset: rate_of(self.reset),
        }
    }
}

/// Per-second rates: `1 / duration`, with non-positive durations treated as 1s.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rates {
    pub cooldown: f32,
    pub active: f32,
    pub reset: f32,
}

impl Default for Rates {
    fn default() -> Self {
        Durations::default().rates()
    }
}

fn rate_of(duration: f32) -> f32 {
    let duration = if duration > f32::EPSILON { duration } else { 1.0 };
    1.0 / duration
}

/// Icon resource used when a kind has nothing to show.
pub const EMPTY_ICON: &str = "IconEmpty";

/// Policy table for ability kinds.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AbilityCatalog {
    durations: BTreeMap<AbilityKind, Durations>,
}

impl AbilityCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the duration triple of a kind.
    pub fn with_durations(mut self, kind: AbilityKind, durations: Durations) -> Self {
        self.durations.insert(kind, durations);
        self
    }

    pub fn durations(&self, kind: AbilityKind) -> Durations {
        self.durations
            .get(&kind)
            .copied()
            .unwrap_or_else(|| Self::builtin_durations(kind))
    }

    pub fn rates(&self, kind: AbilityKind) -> Rates {
        self.durations(kind).rates()
    }

    pub fn overrides(&self) -> impl Iterator<Item = (AbilityKind, Durations)> + '_ {
        self.durations.iter().map(|(k, v)| (*k, *v))
    }

    /// Built-in duration triples (cooldown, active, reset).
    pub const fn builtin_durations(kind: AbilityKind) -> Durations {
        match kind {
            AbilityKind::ArmorDrain => Durations::new(2.0, 10.0, 20.0),
            AbilityKind::SpawnSwarm => Durations::new(10.0, 0.0, 0.0),
            AbilityKind::MoveSwarm => Durations::new(0.5, 0.0, 0.0),
            AbilityKind::ShieldProject => Durations::new(10.0, 0.0, 0.0),
            AbilityKind::HealField => Durations::new(2.0, 0.0, 0.0),
            AbilityKind::Chain => Durations::new(20.0, 0.0, 0.0),
            AbilityKind::Superlaser => Durations::new(40.0, 0.0, 0.0),
            AbilityKind::Default | AbilityKind::ArmorRegen => Durations::new(0.0, 0.0, 0.0),
        }
    }

    pub const fn target_requirement(kind: AbilityKind) -> TargetRequirement {
        match kind {
            AbilityKind::SpawnSwarm
            | AbilityKind::MoveSwarm
            | AbilityKind::ShieldProject
            | AbilityKind::Chain
            | AbilityKind::Superlaser => TargetRequirement::Unit,
            _ => TargetRequirement::None,
        }
    }

    pub const fn activation_style(kind: AbilityKind) -> ActivationStyle {
        match kind {
            AbilityKind::ArmorRegen => ActivationStyle::Passive,
            AbilityKind::ArmorDrain => ActivationStyle::Toggle,
            _ => ActivationStyle::Instant,
        }
    }

    pub const fn display_name(kind: AbilityKind) -> &'static str {
        match kind {
            AbilityKind::ArmorDrain => "Armor Well",
            AbilityKind::ArmorRegen => "Armor Regeneration",
            AbilityKind::SpawnSwarm => "Deploy Fighters",
            AbilityKind::MoveSwarm => "Order Fighters",
            AbilityKind::ShieldProject => "Project Shield",
            AbilityKind::HealField => "Metasteel Pool",
            AbilityKind::Chain => "Gravity Chain",
            AbilityKind::Superlaser => "Hellrazor",
            AbilityKind::Default => "default",
        }
    }

    /// Kinds whose stack counter is shown on the ability button.
    pub const fn displays_stacks(kind: AbilityKind) -> bool {
        matches!(kind, AbilityKind::SpawnSwarm | AbilityKind::MoveSwarm)
    }

    /// Kinds whose secondary icon depends on the stack counter.
    pub const fn secondary_icon_follows_stacks(kind: AbilityKind) -> bool {
        matches!(kind, AbilityKind::HealField)
    }

    /// Resource key of the primary icon, e.g. `IconAbility_Chain`.
    pub fn icon_key(kind: AbilityKind) -> String {
        format!("IconAbility_{kind}")
    }

    /// Resource key of the secondary icon, or `None` when it is suppressed.
    pub fn secondary_icon_key(kind: AbilityKind, stacks: i32) -> Option<String> {
        if Self::secondary_icon_follows_stacks(kind) && stacks == 0 {
            return None;
        }
        Some(format!("IconAbility_{kind}_B"))
    }
}
