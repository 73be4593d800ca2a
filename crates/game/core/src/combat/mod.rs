//! Hit resolution.
//!
//! Shots are resolved against a [`CombatWorld`], which is the only way the
//! resolution code reads target state or applies damage and statuses.
//! Visual cues leave through an [`EffectSink`](crate::env::EffectSink).
//!
//! # Modes
//!
//! - **Direct**: a known goal is hit at exactly the distance to it.
//! - **Traced**: the first collider along the ray decides. Allied units take
//!   reduced damage; the firing unit's own collider is passed through.

pub mod damage;
pub mod hitscan;
pub mod trace;
pub mod world;

pub use damage::{DamageResult, DamageType};
pub use hitscan::{HitOutcome, HitResolution, Hitscan, resolve_direct, resolve_hitscan, resolve_traced};
pub use trace::{CollisionOracle, Ray, RayHit};
pub use world::{Battlefield, CombatWorld, TargetInfo};
