//! Ability kind enumeration and target classification.

use glam::Vec3;

use crate::state::UnitId;

/// Types of special abilities a unit slot can hold.
///
/// The kind only selects policy and behavior; per-instance state lives in
/// [`AbilityInstance`](super::AbilityInstance).
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
    strum::EnumCount,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(ascii_case_insensitive)]
pub enum AbilityKind {
    /// Reactor overload: heavy self-damage plus a detonation effect.
    #[default]
    Default,
    /// Toggle field that melts enemy armor nearby.
    ArmorDrain,
    /// Passive armor regeneration scaled by missing armor.
    ArmorRegen,
    /// Deploy a fighter group at a unit.
    SpawnSwarm,
    /// Retarget deployed fighter groups.
    MoveSwarm,
    /// Project a shield pool onto a unit.
    ShieldProject,
    /// Restore armor to nearby allies.
    HealField,
    /// Tether a unit with a gravity chain.
    Chain,
    /// Fire a charged beam that collects marks on the target.
    Superlaser,
}

/// How an ability is operated.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActivationStyle {
    /// Runs continuously; never enters an active state.
    Passive,
    /// Fires once per use.
    Instant,
    /// Switched on and off; drains energy while on.
    Toggle,
}

/// What a caller must supply when using an ability.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TargetRequirement {
    None,
    Unit,
    Position,
}

/// Target supplied with an order.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AbilityTarget {
    #[default]
    None,
    Unit(UnitId),
    Position(Vec3),
}

impl AbilityTarget {
    /// Requirement class this target satisfies.
    pub fn class(&self) -> TargetRequirement {
        match self {
            Self::None => TargetRequirement::None,
            Self::Unit(_) => TargetRequirement::Unit,
            Self::Position(_) => TargetRequirement::Position,
        }
    }

    pub fn unit(&self) -> Option<UnitId> {
        match self {
            Self::Unit(id) => Some(*id),
            _ => None,
        }
    }

    pub fn position(&self) -> Option<Vec3> {
        match self {
            Self::Position(p) => Some(*p),
            _ => None,
        }
    }
}
