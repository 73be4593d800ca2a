//! Deterministic ability, status and hit-resolution logic for fleet battles.
//!
//! `armada-core` owns the per-unit ability state machines, the status effect
//! multiset and shot resolution. Everything else (rendering, physics,
//! movement, networking) is a collaborator reached through narrow seams:
//! [`env::SimEnv`] for rules, [`combat::CollisionOracle`] for ray casts and
//! [`env::EffectSink`] for visual effects. All state mutation flows through
//! [`engine::SimEngine`].
pub mod ability;
pub mod combat;
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod path;
pub mod state;
pub mod status;

pub use ability::{
    AbilityBehavior, AbilityCatalog, AbilityContext, AbilityError, AbilityInstance, AbilityKind,
    AbilitySnapshot, AbilityTarget, ActivationStyle, Durations, IgnoreReason, TargetRequirement,
    UseOutcome,
};
pub use combat::{
    Battlefield, CollisionOracle, CombatWorld, DamageResult, DamageType, HitOutcome,
    HitResolution, Hitscan, Ray, RayHit,
};
pub use config::GameRules;
pub use engine::{Intent, SimEngine};
pub use env::{EffectLog, EffectRequest, EffectSink, HitCue, NullEffects, SimContext, SimEnv};
pub use error::{ErrorSeverity, GameError};
pub use path::{HeapItem, OpenSet, PathGrid, PathNode};
pub use state::{
    AbilityReplica, FighterGroup, ReplicationError, SwarmHandle, TargetRef, Team, UnitId,
    UnitReplica, UnitSnapshot, UnitSpec, Vitals, WorldState,
};
pub use status::{ApplyOutcome, StatusEffects, StatusInstance, StatusKind, StatusRegistry};
