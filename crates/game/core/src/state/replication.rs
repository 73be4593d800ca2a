//! Authority-to-replica state records.
//!
//! The authority produces a [`UnitReplica`] per unit; replicas overwrite
//! their local copy with it. Effect objects are not replicated.

use glam::Vec3;

use crate::ability::AbilityKind;
use crate::error::{ErrorSeverity, GameError};
use crate::status::StatusInstance;

use super::common::{UnitId, Vitals};

/// Replicated fields of one ability slot.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AbilityReplica {
    pub kind: AbilityKind,
    pub cooldown: f32,
    pub active: bool,
    pub stacks: i32,
    pub energy: f32,
}

/// Replicated state of one unit.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnitReplica {
    pub id: UnitId,
    pub position: Vec3,
    pub vitals: Vitals,
    pub abilities: Vec<AbilityReplica>,
    pub statuses: Vec<StatusInstance>,
}

#[cfg(feature = "serde")]
impl UnitReplica {
    /// Compact binary form for the wire.
    pub fn encode(&self) -> Result<Vec<u8>, ReplicationError> {
        bincode::serialize(self).map_err(|e| ReplicationError::Codec(e.to_string()))
    }

    pub fn decode(bytes: &[u8]) -> Result<Self, ReplicationError> {
        bincode::deserialize(bytes).map_err(|e| ReplicationError::Codec(e.to_string()))
    }
}

/// Errors raised while applying a replica.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ReplicationError {
    #[error("replica for unknown unit {0}")]
    UnitNotFound(UnitId),

    #[error("unit {unit} has {local} ability slots, replica has {remote}")]
    SlotCountMismatch {
        unit: UnitId,
        local: usize,
        remote: usize,
    },

    #[error("unit {unit} slot {slot} holds {local}, replica has {remote}")]
    KindMismatch {
        unit: UnitId,
        slot: usize,
        local: AbilityKind,
        remote: AbilityKind,
    },

    #[error("replica codec error: {0}")]
    Codec(String),
}

impl GameError for ReplicationError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::UnitNotFound(_) => ErrorSeverity::Recoverable,
            Self::SlotCountMismatch { .. } | Self::KindMismatch { .. } => ErrorSeverity::Internal,
            Self::Codec(_) => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnitNotFound(_) => "REPLICA_UNIT_NOT_FOUND",
            Self::SlotCountMismatch { .. } => "REPLICA_SLOT_COUNT_MISMATCH",
            Self::KindMismatch { .. } => "REPLICA_KIND_MISMATCH",
            Self::Codec(_) => "REPLICA_CODEC",
        }
    }
}
