//! Status kinds and their static policy.

use bitflags::bitflags;

/// Types of status effects a unit can carry.
#[derive(
    Clone,
    Copy,
    Debug,
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
pub enum StatusKind {
    /// Allied fighters absorb part of incoming damage.
    SwarmResist,
    /// No burn damage even below the burn threshold.
    CriticalBurnImmune,
    /// Hangars open while fighters remain to be deployed.
    SpawnSwarmSpeedNerf,
    /// Stored charge for a later Superlaser shot.
    SuperlaserMark,
    /// Armor soaks less damage.
    ArmorMelt,
    SelfDestructSpeedBuff,
    /// Abilities offline.
    IonSuppressed,
    /// Abilities offline, no movement, no turrets.
    IonStunned,
    ModeSpeedNerf,
}

bitflags! {
    /// Behavior switches for a status kind.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct StatusFlags: u8 {
        /// Time-left decays every tick and the status expires below zero.
        const COUNT_DOWN = 1 << 0;
        /// Reapplication adds to stored value instead of refreshing.
        const STACKS = 1 << 1;
        /// Blocks every non-passive ability use.
        const SUSPENDS_ABILITIES = 1 << 2;
        /// Blocks movement and targeting.
        const STUNS = 1 << 3;
        /// Surfaced to the UI.
        const DISPLAY = 1 << 4;
    }
}

/// RGBA colour used by the display layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rgba(pub u8, pub u8, pub u8, pub u8);

/// Background and icon colours for a displayed status.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusColors {
    pub background: Rgba,
    pub icon: Rgba,
}

const SWARM_COLORS: StatusColors = StatusColors {
    background: Rgba(0x90, 0x11, 0x11, 0xFF),
    icon: Rgba(0xFF, 0x70, 0x88, 0xFF),
};
const ION_COLORS: StatusColors = StatusColors {
    background: Rgba(0x6D, 0xE5, 0xE5, 0xFF),
    icon: Rgba(0xFF, 0xFF, 0xFF, 0xFF),
};

impl StatusKind {
    /// Built-in duration in seconds. Only meaningful for countdown kinds.
    pub const fn default_duration(self) -> f32 {
        match self {
            Self::ArmorMelt | Self::IonSuppressed => 5.0,
            Self::IonStunned => 10.0,
            _ => 1.0,
        }
    }

    pub const fn flags(self) -> StatusFlags {
        match self {
            Self::SwarmResist => StatusFlags::COUNT_DOWN.union(StatusFlags::DISPLAY),
            Self::CriticalBurnImmune => StatusFlags::COUNT_DOWN,
            Self::SpawnSwarmSpeedNerf => StatusFlags::DISPLAY,
            Self::SuperlaserMark => StatusFlags::STACKS,
            Self::ArmorMelt => StatusFlags::COUNT_DOWN.union(StatusFlags::DISPLAY),
            Self::SelfDestructSpeedBuff => StatusFlags::empty(),
            Self::IonSuppressed => StatusFlags::COUNT_DOWN
                .union(StatusFlags::SUSPENDS_ABILITIES)
                .union(StatusFlags::DISPLAY),
            Self::IonStunned => StatusFlags::COUNT_DOWN
                .union(StatusFlags::SUSPENDS_ABILITIES)
                .union(StatusFlags::STUNS)
                .union(StatusFlags::DISPLAY),
            Self::ModeSpeedNerf => StatusFlags::empty(),
        }
    }

    #[inline]
    pub const fn counts_down(self) -> bool {
        self.flags().contains(StatusFlags::COUNT_DOWN)
    }

    #[inline]
    pub const fn stacks(self) -> bool {
        self.flags().contains(StatusFlags::STACKS)
    }

    #[inline]
    pub const fn suspends_abilities(self) -> bool {
        self.flags().contains(StatusFlags::SUSPENDS_ABILITIES)
    }

    #[inline]
    pub const fn stuns(self) -> bool {
        self.flags().contains(StatusFlags::STUNS)
    }

    #[inline]
    pub const fn should_display(self) -> bool {
        self.flags().contains(StatusFlags::DISPLAY)
    }

    pub const fn display_name(self) -> &'static str {
        match self {
            Self::SwarmResist => "Fighter Support",
            Self::CriticalBurnImmune => "Burn Immune",
            Self::SpawnSwarmSpeedNerf => "Hangars Open",
            Self::SuperlaserMark => "Hellrazor Mark",
            Self::ArmorMelt => "Disintegration",
            Self::IonSuppressed => "Suppressed",
            Self::IonStunned => "Disabled",
            Self::SelfDestructSpeedBuff | Self::ModeSpeedNerf => "default",
        }
    }

    pub const fn description(self) -> &'static str {
        match self {
            Self::SwarmResist => {
                "Allied fighters will absorb some of all incoming damage and guard this unit from enemy fighters."
            }
            Self::CriticalBurnImmune => {
                "Even if this unit's health is below the burn threshold, it will not take burn damage over time."
            }
            Self::SpawnSwarmSpeedNerf => {
                "Once all fighters have been deployed, hangars will close and engines will return to full power."
            }
            Self::SuperlaserMark => {
                "Marked for reactor radiation collection by an enemy Hellrazor cannon."
            }
            Self::ArmorMelt => "Armor is weakened by corrosive chemicals.",
            Self::IonSuppressed => "Unit's special ability systems are offline.",
            Self::IonStunned => "Unable to move, fire turrets, or use special abilities.",
            Self::SelfDestructSpeedBuff | Self::ModeSpeedNerf => "default",
        }
    }

    /// Colours for displayed kinds; `None` for simulation-only kinds.
    pub const fn display_colors(self) -> Option<StatusColors> {
        match self {
            Self::SwarmResist | Self::SpawnSwarmSpeedNerf => Some(SWARM_COLORS),
            Self::ArmorMelt => Some(StatusColors {
                background: Rgba(0x61, 0x61, 0x61, 0xFF),
                icon: Rgba(0xFF, 0xFF, 0xFF, 0xFF),
            }),
            Self::IonSuppressed | Self::IonStunned => Some(ION_COLORS),
            _ => None,
        }
    }

    /// Resource key of the status icon, e.g. `IconStatus_ArmorMelt`.
    pub fn icon_key(self) -> String {
        format!("IconStatus_{self}")
    }
}
