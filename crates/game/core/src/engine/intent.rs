use glam::Vec3;

use crate::ability::AbilityTarget;
use crate::state::UnitId;

/// A player order forwarded from a client to the authority.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Intent {
    /// Use the ability in `slot` with an explicit target.
    UseAbility {
        unit: UnitId,
        slot: usize,
        target: AbilityTarget,
    },
    /// Use the ability in `slot` from the command wheel, which can only
    /// supply a world position (or nothing).
    UseCommandWheel {
        unit: UnitId,
        slot: usize,
        target: Option<Vec3>,
    },
}

impl Intent {
    pub fn unit(&self) -> UnitId {
        match self {
            Self::UseAbility { unit, .. } | Self::UseCommandWheel { unit, .. } => *unit,
        }
    }

    pub fn slot(&self) -> usize {
        match self {
            Self::UseAbility { slot, .. } | Self::UseCommandWheel { slot, .. } => *slot,
        }
    }
}

#[cfg(feature = "serde")]
impl Intent {
    pub fn encode(&self) -> Result<Vec<u8>, crate::state::ReplicationError> {
        bincode::serialize(self).map_err(|e| crate::state::ReplicationError::Codec(e.to_string()))
    }

    pub fn decode(bytes: &[u8]) -> Result<Self, crate::state::ReplicationError> {
        bincode::deserialize(bytes).map_err(|e| crate::state::ReplicationError::Codec(e.to_string()))
    }
}
