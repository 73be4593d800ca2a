//! Ability and status duration overrides.
//!
//! The policy tables themselves are fixed in the core; content only tunes
//! durations. A catalog file looks like:
//!
//! ```ron
//! (
//!     abilities: {
//!         SpawnSwarm: (cooldown: 8.0),
//!         ArmorDrain: (cooldown: 2.0, active: 12.0, reset: 20.0),
//!     },
//!     statuses: {
//!         ArmorMelt: 4.0,
//!     },
//! )
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use armada_core::{AbilityCatalog, AbilityKind, Durations, StatusKind, StatusRegistry};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// On-disk shape of a catalog override file.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogFile {
    pub abilities: BTreeMap<AbilityKind, Durations>,
    /// Status durations in seconds.
    pub statuses: BTreeMap<StatusKind, f32>,
}

impl CatalogFile {
    pub fn build(&self) -> (AbilityCatalog, StatusRegistry) {
        let abilities = self
            .abilities
            .iter()
            .fold(AbilityCatalog::new(), |catalog, (kind, durations)| {
                catalog.with_durations(*kind, *durations)
            });
        let statuses = self
            .statuses
            .iter()
            .fold(StatusRegistry::new(), |registry, (kind, seconds)| {
                registry.with_duration(*kind, *seconds)
            });
        (abilities, statuses)
    }
}

/// Loader for catalog overrides from RON files.
pub struct CatalogLoader;

impl CatalogLoader {
    pub fn load(path: &Path) -> LoadResult<(AbilityCatalog, StatusRegistry)> {
        let content = read_file(path)?;
        let file: CatalogFile = ron::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse catalog RON {}: {}", path.display(), e))?;

        for (kind, durations) in &file.abilities {
            if durations.cooldown < 0.0 || durations.active < 0.0 || durations.reset < 0.0 {
                tracing::warn!(%kind, ?durations, "negative duration treated as one second");
            }
        }
        Ok(file.build())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn overrides_replace_builtin_durations() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            "(abilities: {{ SpawnSwarm: (cooldown: 8.0) }}, statuses: {{ ArmorMelt: 4.0 }})"
        )
        .unwrap();

        let (abilities, statuses) = CatalogLoader::load(file.path()).unwrap();

        assert_eq!(abilities.durations(AbilityKind::SpawnSwarm).cooldown, 8.0);
        assert_eq!(
            abilities.durations(AbilityKind::Chain),
            AbilityCatalog::builtin_durations(AbilityKind::Chain)
        );
        assert_eq!(statuses.duration(StatusKind::ArmorMelt), 4.0);
        assert_eq!(statuses.duration(StatusKind::IonStunned), 10.0);
    }

    #[test]
    fn empty_file_is_the_builtin_table() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "()").unwrap();

        let (abilities, statuses) = CatalogLoader::load(file.path()).unwrap();
        assert_eq!(abilities, AbilityCatalog::new());
        assert_eq!(statuses, StatusRegistry::new());
    }

    #[test]
    fn unknown_kind_is_an_error() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "(abilities: {{ Warp: (cooldown: 1.0) }})").unwrap();
        assert!(CatalogLoader::load(file.path()).is_err());
    }
}
