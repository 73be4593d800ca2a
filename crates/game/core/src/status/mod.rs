//! Status effect system for units.
//!
//! Statuses are timed or persistent conditions attached to a unit. They
//! modify combat (armor melt, fighter support), movement (speed nerfs, stun)
//! and ability availability (ion suppression).
//!
//! - [`StatusKind`]: closed set of kinds with a static policy ([`StatusFlags`])
//! - [`StatusRegistry`]: per-kind durations, overridable by content
//! - [`StatusEffects`]: the per-unit multiset with refresh/stack rules

mod effects;
mod kind;
mod registry;

pub use effects::{ApplyOutcome, StatusEffects, StatusInstance};
pub use kind::{Rgba, StatusColors, StatusFlags, StatusKind};
pub use registry::StatusRegistry;
