//! Config Command
//!
//! Manage sectorgen configuration.
//!
//! Usage:
//!   sectorgen config show [-f json]
//!   sectorgen config path
//!   sectorgen config init [--force]

use crate::cli::Output;
use crate::config::ConfigLoader;
use crate::types::Result;

/// Show merged effective configuration, secrets omitted
pub fn show(format: &str) -> Result<()> {
    ConfigLoader::show_config(format == "json")
}

/// Show configuration paths
pub fn path() -> Result<()> {
    ConfigLoader::show_path();
    Ok(())
}

/// Initialize project configuration
pub fn init(force: bool) -> Result<()> {
    let output = Output::new();
    let existed = ConfigLoader::project_config_path().exists();

    let config_path = ConfigLoader::init_project(force)?;
    if existed && !force {
        output.warning("Project configuration already exists (use --force to overwrite)");
    } else {
        output.success("Initialized project configuration");
    }
    output.detail("Config:", &config_path.display().to_string());
    Ok(())
}
