//! Read-only context and output seams of the simulation.
//!
//! Rules and policy tables are injected through [`SimEnv`] instead of being
//! looked up globally; visual and sub-entity side effects leave the core
//! through an [`EffectSink`].
mod effects;

pub use effects::{EffectLog, EffectRequest, EffectSink, HitCue, HitEvent, NullEffects};

use crate::ability::AbilityCatalog;
use crate::config::GameRules;
use crate::status::StatusRegistry;

/// Borrowed bundle of rules and policy tables.
#[derive(Clone, Copy, Debug)]
pub struct SimEnv<'a> {
    rules: &'a GameRules,
    abilities: &'a AbilityCatalog,
    statuses: &'a StatusRegistry,
}

impl<'a> SimEnv<'a> {
    pub fn new(
        rules: &'a GameRules,
        abilities: &'a AbilityCatalog,
        statuses: &'a StatusRegistry,
    ) -> Self {
        Self {
            rules,
            abilities,
            statuses,
        }
    }

    #[inline]
    pub fn rules(&self) -> &'a GameRules {
        self.rules
    }

    #[inline]
    pub fn abilities(&self) -> &'a AbilityCatalog {
        self.abilities
    }

    #[inline]
    pub fn statuses(&self) -> &'a StatusRegistry {
        self.statuses
    }
}

/// Owned rules and tables, typically produced by the content loaders.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SimContext {
    pub rules: GameRules,
    pub abilities: AbilityCatalog,
    pub statuses: StatusRegistry,
}

impl SimContext {
    pub fn new(rules: GameRules, abilities: AbilityCatalog, statuses: StatusRegistry) -> Self {
        Self {
            rules,
            abilities,
            statuses,
        }
    }

    pub fn env(&self) -> SimEnv<'_> {
        SimEnv::new(&self.rules, &self.abilities, &self.statuses)
    }
}
