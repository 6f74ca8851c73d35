//! Configuration Management
//!
//! Unified configuration system with hierarchical resolution:
//! 1. Built-in defaults
//! 2. Global config (~/.config/sectorgen/config.toml)
//! 3. Project config (.sectorgen/config.toml)
//! 4. Environment variables (OPENAI_*, SANITY_*, SITE_URL, SECTORGEN_*)
//!
//! Loaded once at the process boundary and passed down explicitly; nothing
//! below the CLI reads the environment.

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::*;
