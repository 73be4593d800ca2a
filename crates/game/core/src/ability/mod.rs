//! Unit special abilities.
//!
//! Policy (durations, target class, activation style, icons) lives in the
//! [`AbilityCatalog`]; runtime state lives in one [`AbilityInstance`] per slot;
//! kind-specific effects are [`AbilityBehavior`] records.
mod behavior;
mod catalog;
mod error;
mod instance;
mod kind;
pub mod kinds;
mod snapshot;

pub use behavior::{AbilityBehavior, AbilityContext, behavior_for};
pub use catalog::{AbilityCatalog, Durations, EMPTY_ICON, Rates};
pub use error::AbilityError;
pub use instance::{
    AbilityInstance, CooldownState, IgnoreReason, TimerEvents, ToggleState, UseOutcome,
};
pub use kind::{AbilityKind, AbilityTarget, ActivationStyle, TargetRequirement};
pub use snapshot::AbilitySnapshot;
