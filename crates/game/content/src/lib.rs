//! Data-driven content definitions and loaders.
//!
//! This crate houses static combat content and provides loaders for RON/TOML data files:
//! - Action catalog (data-driven via RON)
//! - Agent archetypes (data-driven via RON)
//! - Behavior configuration (data-driven via TOML)
//!
//! Content is consumed by runtime oracles and never appears in agent records.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{ActionCatalog, ArchetypeCatalog, ConfigLoader, ContentFactory, LoadResult};
