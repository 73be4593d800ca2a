//! Ability order errors.

use crate::error::{ErrorSeverity, GameError};
use crate::state::UnitId;

use super::kind::{AbilityKind, TargetRequirement};

/// Errors raised while routing an ability order.
///
/// Orders that are merely premature (cooldown, suspension) are not errors;
/// see [`UseOutcome`](super::UseOutcome).
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AbilityError {
    #[error("unit {0} not found")]
    UnitNotFound(UnitId),

    #[error("unit {unit} has {slots} ability slots, slot {slot} requested")]
    SlotOutOfRange { unit: UnitId, slot: usize, slots: usize },

    #[error("{kind} requires a {expected} target, got {found}")]
    TargetMismatch {
        kind: AbilityKind,
        expected: TargetRequirement,
        found: TargetRequirement,
    },

    #[error("no unit within {radius} of the command wheel position")]
    NothingUnderCursor { radius: f32 },
}

impl GameError for AbilityError {
    fn severity(&self) -> ErrorSeverity {
        use AbilityError::*;
        match self {
            UnitNotFound(_) | SlotOutOfRange { .. } | TargetMismatch { .. } => {
                ErrorSeverity::Validation
            }
            NothingUnderCursor { .. } => ErrorSeverity::Recoverable,
        }
    }

    fn error_code(&self) -> &'static str {
        use AbilityError::*;
        match self {
            UnitNotFound(_) => "ABILITY_UNIT_NOT_FOUND",
            SlotOutOfRange { .. } => "ABILITY_SLOT_OUT_OF_RANGE",
            TargetMismatch { .. } => "ABILITY_TARGET_MISMATCH",
            NothingUnderCursor { .. } => "ABILITY_NOTHING_UNDER_CURSOR",
        }
    }
}
