//! Skirmish scenarios: a roster of named units and a script of timed orders.
//!
//! Orders refer to units by name. Names are resolved to [`UnitId`]s only
//! after the roster has been spawned, so the file format never depends on
//! id allocation.

use std::collections::{HashMap, HashSet};

use armada_core::{AbilityKind, AbilityTarget, Intent, Team, UnitId, UnitSpec};
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Errors raised while validating or resolving a scenario.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ScenarioError {
    #[error("unit name '{0}' is used more than once")]
    DuplicateUnit(String),

    #[error("order references unknown unit '{0}'")]
    UnknownUnit(String),

    #[error("order for '{0}' is scheduled before the battle starts")]
    NegativeTime(String),

    #[error("roster has {roster} units but {spawned} ids were supplied")]
    RosterMismatch { roster: usize, spawned: usize },
}

/// One unit on the roster.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioUnit {
    pub name: String,
    pub team: u8,
    pub position: (f32, f32, f32),
    pub radius: f32,
    pub health: f32,
    pub armor: f32,
    pub shield: f32,
    pub abilities: Vec<AbilityKind>,
}

impl Default for ScenarioUnit {
    fn default() -> Self {
        let spec = UnitSpec::default();
        Self {
            name: String::new(),
            team: spec.team.0,
            position: (0.0, 0.0, 0.0),
            radius: spec.radius,
            health: spec.health,
            armor: spec.armor,
            shield: spec.shield,
            abilities: Vec::new(),
        }
    }
}

impl ScenarioUnit {
    pub fn spec(&self) -> UnitSpec {
        let (x, y, z) = self.position;
        UnitSpec::new(Team(self.team), Vec3::new(x, y, z))
            .with_radius(self.radius)
            .with_vitals(self.health, self.armor, self.shield)
            .with_abilities(self.abilities.iter().copied())
    }
}

/// What a scripted order aims at.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum OrderTarget {
    NoTarget,
    Unit(String),
    Position((f32, f32, f32)),
    /// Routed through the command wheel with an optional cursor position.
    Wheel(Option<(f32, f32, f32)>),
}

/// A use order fired at `at` seconds of simulated time.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScriptedOrder {
    pub at: f32,
    pub unit: String,
    pub slot: usize,
    pub target: OrderTarget,
}

/// Order with names resolved to live ids.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScheduledIntent {
    pub at: f32,
    pub intent: Intent,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Scenario {
    pub name: String,
    pub units: Vec<ScenarioUnit>,
    pub orders: Vec<ScriptedOrder>,
}

impl Scenario {
    /// Checks roster names are unique and every order is well formed.
    pub fn validate(&self) -> Result<(), ScenarioError> {
        let mut seen = HashSet::with_capacity(self.units.len());
        for unit in &self.units {
            if !seen.insert(unit.name.as_str()) {
                return Err(ScenarioError::DuplicateUnit(unit.name.clone()));
            }
        }

        for order in &self.orders {
            if order.at < 0.0 {
                return Err(ScenarioError::NegativeTime(order.unit.clone()));
            }
            for name in std::iter::once(&order.unit).chain(match &order.target {
                OrderTarget::Unit(target) => Some(target),
                _ => None,
            }) {
                if !seen.contains(name.as_str()) {
                    return Err(ScenarioError::UnknownUnit(name.clone()));
                }
            }
        }
        Ok(())
    }

    pub fn unit_specs(&self) -> impl Iterator<Item = UnitSpec> + '_ {
        self.units.iter().map(ScenarioUnit::spec)
    }

    /// Resolves the script against the ids returned when the roster was
    /// spawned, in roster order. The result is sorted by time; orders
    /// sharing a timestamp keep their file order.
    pub fn resolve(&self, ids: &[UnitId]) -> Result<Vec<ScheduledIntent>, ScenarioError> {
        if ids.len() != self.units.len() {
            return Err(ScenarioError::RosterMismatch {
                roster: self.units.len(),
                spawned: ids.len(),
            });
        }

        let by_name: HashMap<&str, UnitId> = self
            .units
            .iter()
            .map(|u| u.name.as_str())
            .zip(ids.iter().copied())
            .collect();
        let lookup = |name: &str| {
            by_name
                .get(name)
                .copied()
                .ok_or_else(|| ScenarioError::UnknownUnit(name.to_owned()))
        };
        let point = |(x, y, z): (f32, f32, f32)| Vec3::new(x, y, z);

        let mut schedule = Vec::with_capacity(self.orders.len());
        for order in &self.orders {
            let unit = lookup(&order.unit)?;
            let intent = match &order.target {
                OrderTarget::NoTarget => Intent::UseAbility {
                    unit,
                    slot: order.slot,
                    target: AbilityTarget::None,
                },
                OrderTarget::Unit(name) => Intent::UseAbility {
                    unit,
                    slot: order.slot,
                    target: AbilityTarget::Unit(lookup(name)?),
                },
                OrderTarget::Position(p) => Intent::UseAbility {
                    unit,
                    slot: order.slot,
                    target: AbilityTarget::Position(point(*p)),
                },
                OrderTarget::Wheel(p) => Intent::UseCommandWheel {
                    unit,
                    slot: order.slot,
                    target: p.map(point),
                },
            };
            schedule.push(ScheduledIntent { at: order.at, intent });
        }
        schedule.sort_by(|a, b| a.at.total_cmp(&b.at));
        Ok(schedule)
    }
}
