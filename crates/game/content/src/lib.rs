//! Data-driven content for armada battles.
//!
//! This crate provides loaders for the data files a simulation is built from:
//! - Game rules (TOML)
//! - Ability and status duration overrides (RON)
//! - Skirmish scenarios: unit rosters and scripted orders (RON)
//!
//! All loaders deserialize armada-core types directly through its `serde`
//! feature.

pub mod scenario;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use scenario::{
    OrderTarget, Scenario, ScenarioError, ScenarioUnit, ScheduledIntent, ScriptedOrder,
};

#[cfg(feature = "loaders")]
pub use loaders::{CatalogFile, CatalogLoader, ContentFactory, LoadResult, RulesLoader, ScenarioLoader};
