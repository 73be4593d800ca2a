use super::catalog::AbilityCatalog;
use super::instance::AbilityInstance;
use super::kind::{AbilityKind, ActivationStyle};

/// What the UI should render for one ability slot. Purely derived.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AbilitySnapshot {
    pub kind: AbilityKind,
    /// Remaining cooldown for instant kinds, energy fill for toggles, 1.0 for passives.
    pub progress: f32,
    /// Stack count, for kinds that show one.
    pub stacks: Option<i32>,
    pub icon: String,
    /// Secondary icon resource, `None` when suppressed.
    pub secondary_icon: Option<String>,
    pub active: bool,
    /// Greyed out regardless of cooldown (nothing left to deploy or order).
    pub unusable: bool,
}

impl AbilitySnapshot {
    pub fn of(ability: &AbilityInstance) -> Self {
        let kind = ability.kind();
        let progress = match ability.style() {
            ActivationStyle::Toggle => ability.energy(),
            ActivationStyle::Instant => ability.cooldown(),
            ActivationStyle::Passive => 1.0,
        };

        Self {
            kind,
            progress,
            stacks: AbilityCatalog::displays_stacks(kind).then_some(ability.stacks.max(0)),
            icon: AbilityCatalog::icon_key(kind),
            secondary_icon: AbilityCatalog::secondary_icon_key(kind, ability.stacks),
            active: ability.is_active(),
            unusable: matches!(kind, AbilityKind::SpawnSwarm | AbilityKind::MoveSwarm) && ability.stacks <= 0,
        }
    }
}
