//! Game rules loader.

use std::path::Path;

use armada_core::GameRules;

use crate::loaders::{LoadResult, read_file};

/// Loader for [`GameRules`] from TOML files.
pub struct RulesLoader;

impl RulesLoader {
    /// Load rules from a TOML file.
    ///
    /// Keys missing from the file keep their default values, so a rules file
    /// only needs to list the tunables it changes.
    pub fn load(path: &Path) -> LoadResult<GameRules> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse rules {}: {}", path.display(), e))
    }

    pub fn parse(content: &str) -> LoadResult<GameRules> {
        let rules: GameRules = toml::from_str(content)?;
        if rules.use_test_values && rules.test_time_mult <= 0.0 {
            anyhow::bail!(
                "test_time_mult must be positive when use_test_values is set, got {}",
                rules.test_time_mult
            );
        }
        Ok(rules)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let rules = RulesLoader::parse(
            r#"
            friendly_fire_damage_mult = 0.5
            armor_regen_per_second = [1.0, 1.0, 1.0, 1.0, 1.0]
            "#,
        )
        .unwrap();

        assert_eq!(rules.friendly_fire_damage_mult, 0.5);
        assert_eq!(rules.armor_regen_per_second, [1.0; 5]);
        assert_eq!(rules.hit_offset, GameRules::default().hit_offset);
    }

    #[test]
    fn test_timing_needs_a_positive_multiplier() {
        let err = RulesLoader::parse("use_test_values = true\ntest_time_mult = 0.0\n").unwrap_err();
        assert!(err.to_string().contains("test_time_mult"));
    }

    #[test]
    fn missing_file_names_the_path() {
        let err = RulesLoader::load(Path::new("/nonexistent/rules.toml")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/rules.toml"));
    }
}
