//! Content loaders for reading combat data from files.
//!
//! Each loader turns one RON/TOML file into a core type or an oracle
//! implementation. [`ContentFactory`] ties them to a data directory layout.

pub mod actions;
pub mod archetypes;
pub mod config;
pub mod factory;

pub use actions::ActionCatalog;
pub use archetypes::ArchetypeCatalog;
pub use config::ConfigLoader;
pub use factory::ContentFactory;

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
