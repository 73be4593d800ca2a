//! Content loaders for reading rules, catalogs and scenarios from files.
//!
//! Rules are TOML, everything else is RON. All loaders return
//! [`LoadResult`] with the offending path in the error message.

pub mod catalog;
pub mod factory;
pub mod rules;
pub mod scenario;

pub use catalog::{CatalogFile, CatalogLoader};
pub use factory::ContentFactory;
pub use rules::RulesLoader;
pub use scenario::ScenarioLoader;

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
