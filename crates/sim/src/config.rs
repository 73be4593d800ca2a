//! Driver configuration read from the environment.

use std::env;
use std::path::PathBuf;

/// Settings for one headless run.
#[derive(Clone, Debug, PartialEq)]
pub struct SimConfig {
    /// Directory holding `rules.toml`, `catalog.ron` and `scenarios/`.
    pub data_dir: PathBuf,
    /// Fixed frame delta in seconds, before the rules' time scale.
    pub timestep: f32,
    /// Battle length in simulated seconds.
    pub duration: f32,
    pub scenario: String,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/data")),
            timestep: 1.0 / 30.0,
            duration: 30.0,
            scenario: "picket".to_owned(),
        }
    }
}

impl SimConfig {
    /// Environment variables:
    /// - `ARMADA_DATA_DIR`
    /// - `ARMADA_TIMESTEP` (seconds, must be positive)
    /// - `ARMADA_DURATION` (seconds)
    /// - `ARMADA_SCENARIO` (file stem under `scenarios/`)
    pub fn from_env() -> Self {
        Self::from_source(|key| env::var(key).ok())
    }

    pub fn from_source(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(dir) = lookup("ARMADA_DATA_DIR") {
            config.data_dir = PathBuf::from(dir);
        }
        if let Some(timestep) = parse::<f32>(&lookup, "ARMADA_TIMESTEP")
            && timestep > 0.0
        {
            config.timestep = timestep;
        }
        if let Some(duration) = parse::<f32>(&lookup, "ARMADA_DURATION") {
            config.duration = duration.max(0.0);
        }
        if let Some(scenario) = lookup("ARMADA_SCENARIO") {
            config.scenario = scenario;
        }

        config
    }
}

fn parse<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    lookup(key)?.parse().ok()
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn source(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn unset_variables_keep_defaults() {
        assert_eq!(SimConfig::from_source(source(&[])), SimConfig::default());
    }

    #[test]
    fn variables_override_defaults() {
        let config = SimConfig::from_source(source(&[
            ("ARMADA_DATA_DIR", "/srv/armada"),
            ("ARMADA_TIMESTEP", "0.05"),
            ("ARMADA_DURATION", "12"),
            ("ARMADA_SCENARIO", "siege"),
        ]));

        assert_eq!(config.data_dir, PathBuf::from("/srv/armada"));
        assert_eq!(config.timestep, 0.05);
        assert_eq!(config.duration, 12.0);
        assert_eq!(config.scenario, "siege");
    }

    #[test]
    fn unusable_numbers_are_ignored() {
        let config = SimConfig::from_source(source(&[
            ("ARMADA_TIMESTEP", "-1"),
            ("ARMADA_DURATION", "soon"),
        ]));
        assert_eq!(config.timestep, SimConfig::default().timestep);
        assert_eq!(config.duration, SimConfig::default().duration);
    }
}
