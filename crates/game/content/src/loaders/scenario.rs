//! Scenario loader.

use std::path::Path;

use crate::loaders::{LoadResult, read_file};
use crate::scenario::Scenario;

/// Loader for skirmish [`Scenario`]s from RON files.
pub struct ScenarioLoader;

impl ScenarioLoader {
    /// Load and validate a scenario.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the RON file
    ///
    /// # Returns
    ///
    /// Returns a scenario whose unit names are unique and whose orders only
    /// reference units on the roster.
    pub fn load(path: &Path) -> LoadResult<Scenario> {
        let content = read_file(path)?;
        let scenario: Scenario = ron::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse scenario RON {}: {}", path.display(), e))?;
        scenario
            .validate()
            .map_err(|e| anyhow::anyhow!("Invalid scenario {}: {}", path.display(), e))?;

        tracing::debug!(
            name = %scenario.name,
            units = scenario.units.len(),
            orders = scenario.orders.len(),
            "scenario loaded"
        );
        Ok(scenario)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use crate::scenario::OrderTarget;
    use armada_core::AbilityKind;
    use tempfile::TempDir;

    const SKIRMISH: &str = r#"(
        name: "picket line",
        units: [
            (name: "carrier", team: 0, position: (0.0, 0.0, 0.0), abilities: [SpawnSwarm, MoveSwarm]),
            (name: "raider", team: 1, position: (25.0, 0.0, 0.0), health: 150.0),
        ],
        orders: [
            (at: 0.5, unit: "carrier", slot: 0, target: Unit("raider")),
            (at: 2.0, unit: "carrier", slot: 1, target: Wheel(Some((25.0, 0.0, 1.0)))),
        ],
    )"#;

    #[test]
    fn loads_roster_and_orders() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("picket.ron");
        fs::write(&path, SKIRMISH).unwrap();

        let scenario = ScenarioLoader::load(&path).unwrap();

        assert_eq!(scenario.name, "picket line");
        assert_eq!(scenario.units.len(), 2);
        assert_eq!(
            scenario.units[0].abilities,
            vec![AbilityKind::SpawnSwarm, AbilityKind::MoveSwarm]
        );
        assert_eq!(scenario.units[1].health, 150.0);
        assert_eq!(scenario.units[1].radius, 1.0);
        assert_eq!(scenario.orders[0].target, OrderTarget::Unit("raider".into()));
    }

    #[test]
    fn invalid_roster_is_rejected_at_load() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("broken.ron");
        fs::write(
            &path,
            r#"(units: [(name: "a")], orders: [(at: 1.0, unit: "b", slot: 0, target: NoTarget)])"#,
        )
        .unwrap();

        let err = ScenarioLoader::load(&path).unwrap_err();
        assert!(err.to_string().contains("unknown unit 'b'"));
    }
}
