//! Damage types and results.

// ============================================================================
// Damage Type
// ============================================================================

/// Damage type carried by a hit. Only tags the source for now; the damage
/// model treats every type alike apart from range.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DamageType {
    /// Projectile and cannon fire.
    #[default]
    Kinetic,
    /// Beam weapons.
    Laser,
    /// Ion weapons.
    Ion,
    /// Fighter group attacks.
    Swarm,
    /// Reactor overload.
    Reactor,
    /// Critical burn.
    Burn,
}

// ============================================================================
// Damage Result
// ============================================================================

/// Outcome of one damage application.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DamageResult {
    /// Health actually removed.
    pub dealt: f32,
    /// Damage soaked by shields and armor.
    pub absorbed: f32,
    /// The target died from this application.
    pub died: bool,
}

impl DamageResult {
    pub const NONE: Self = Self {
        dealt: 0.0,
        absorbed: 0.0,
        died: false,
    };
}
