use std::fmt;

use super::swarm::SwarmHandle;

/// Unique identifier for a unit tracked by the simulation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnitId(pub u32);

impl fmt::Display for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Team index. Units on the same team are allies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Team(pub u8);

impl Team {
    #[inline]
    pub fn is_allied_with(self, other: Team) -> bool {
        self == other
    }
}

/// Anything a shot or an ability can be aimed at.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TargetRef {
    Unit(UnitId),
    Swarm(SwarmHandle),
}

impl From<UnitId> for TargetRef {
    fn from(id: UnitId) -> Self {
        Self::Unit(id)
    }
}

/// Non-owning reference to whatever applied a status. Display attribution only.
pub type SourceRef = TargetRef;

/// Floating-point pool with a maximum (health, armor, shield).
#[derive(Clone, Copy, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Meter {
    pub current: f32,
    pub maximum: f32,
}

impl Meter {
    pub const EMPTY: Self = Self {
        current: 0.0,
        maximum: 0.0,
    };

    pub fn new(current: f32, maximum: f32) -> Self {
        Self { current, maximum }
    }

    pub fn full(maximum: f32) -> Self {
        Self::new(maximum, maximum)
    }

    /// Current value as a fraction of maximum. Empty meters report 0.
    pub fn fraction(&self) -> f32 {
        if self.maximum > 0.0 {
            (self.current / self.maximum).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    /// Removes up to `amount`, returning how much was actually taken.
    pub fn drain(&mut self, amount: f32) -> f32 {
        let taken = amount.clamp(0.0, self.current.max(0.0));
        self.current -= taken;
        taken
    }

    /// Adds `amount`, clamped to the maximum.
    pub fn restore(&mut self, amount: f32) {
        self.current = (self.current + amount.max(0.0)).min(self.maximum);
    }
}

/// Health, armor and shield pools of a unit.
///
/// The combat layer exposes these as a (current, max) triple; the shield check
/// in hit resolution and the armor regeneration passive read from here.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vitals {
    pub health: Meter,
    pub armor: Meter,
    pub shield: Meter,
}

impl Vitals {
    pub fn new(health: f32, armor: f32, shield: f32) -> Self {
        Self {
            health: Meter::full(health),
            armor: Meter::full(armor),
            shield: Meter::full(shield),
        }
    }

    pub fn is_alive(&self) -> bool {
        self.health.current > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drain_never_takes_more_than_available() {
        let mut meter = Meter::new(5.0, 10.0);
        assert_eq!(meter.drain(8.0), 5.0);
        assert_eq!(meter.current, 0.0);
        assert_eq!(meter.drain(1.0), 0.0);
    }

    #[test]
    fn restore_clamps_to_maximum() {
        let mut meter = Meter::new(9.0, 10.0);
        meter.restore(5.0);
        assert_eq!(meter.current, 10.0);
    }

    #[test]
    fn empty_meter_fraction_is_zero() {
        assert_eq!(Meter::EMPTY.fraction(), 0.0);
    }
}
