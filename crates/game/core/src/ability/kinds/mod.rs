//! Behavior records, one per ability kind.
mod armor;
mod reactor;
mod support;
mod swarm;
mod weapons;

pub use armor::{ArmorDrain, ArmorRegen, regen_bracket};
pub use reactor::SelfDestruct;
pub use support::{HealField, ShieldProject};
pub use swarm::{MoveSwarm, SpawnSwarm};
pub use weapons::{Chain, Superlaser};

#[cfg(test)]
pub(crate) mod testing {
    use glam::Vec3;

    use crate::ability::{AbilityCatalog, AbilityContext, AbilityInstance, AbilityKind};
    use crate::config::GameRules;
    use crate::env::{EffectLog, SimEnv};
    use crate::state::{Team, UnitId, UnitSpec, WorldState};
    use crate::status::StatusRegistry;

    /// World plus owned tables for driving a behavior directly.
    pub struct Bench {
        pub state: WorldState,
        pub rules: GameRules,
        pub catalog: AbilityCatalog,
        pub statuses: StatusRegistry,
        pub effects: EffectLog,
    }

    impl Bench {
        pub fn new() -> Self {
            Self {
                state: WorldState::new(),
                rules: GameRules::default(),
                catalog: AbilityCatalog::new(),
                statuses: StatusRegistry::new(),
                effects: EffectLog::new(),
            }
        }

        pub fn unit(&mut self, team: u8, x: f32, abilities: &[AbilityKind]) -> UnitId {
            let spec = UnitSpec::new(Team(team), Vec3::new(x, 0.0, 0.0))
                .with_vitals(100.0, 100.0, 0.0)
                .with_abilities(abilities.iter().copied());
            self.state.spawn(&spec, &self.catalog, &self.rules)
        }

        pub fn ability(&self, unit: UnitId, slot: usize) -> AbilityInstance {
            *self.state.ability(unit, slot).unwrap()
        }

        /// Runs `f` against a context for `unit`'s `slot` on a copied-out ability,
        /// then writes the ability back.
        pub fn with<R>(
            &mut self,
            unit: UnitId,
            slot: usize,
            f: impl FnOnce(&mut AbilityContext<'_>, &mut AbilityInstance) -> R,
        ) -> R {
            let mut ability = self.ability(unit, slot);
            let env = SimEnv::new(&self.rules, &self.catalog, &self.statuses);
            let mut ctx = AbilityContext::new(unit, slot, &mut self.state, env, &mut self.effects);
            let result = f(&mut ctx, &mut ability);
            if let Some(slot) = self.state.ability_mut(unit, slot) {
                *slot = ability;
            }
            result
        }
    }
}
