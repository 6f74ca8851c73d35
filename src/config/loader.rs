//! Configuration Loader (Figment-based)
//!
//! Loads and merges configuration from multiple sources using Figment:
//! 1. Built-in defaults (Serialized)
//! 2. Global config (~/.config/sectorgen/config.toml)
//! 3. Project config (.sectorgen/config.toml)
//! 4. Conventional environment variables (OPENAI_*, SANITY_*, SITE_URL),
//!    after `.env.local` and `.env` have been loaded
//! 5. Prefixed environment variables (SECTORGEN_LLM__MODEL -> llm.model)

use directories::BaseDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use super::types::Config;
use crate::types::{Result, SectorError};

/// Conventional variable names and the config keys they populate.
///
/// Order matters: a later entry for the same key wins.
const ENV_ALIASES: [(&str, &str); 10] = [
    ("OPENAI_API_KEY", "llm.api_key"),
    ("OPENAI_MODEL", "llm.model"),
    ("OPENAI_TEMPERATURE", "llm.temperature"),
    ("OPENAI_MAX_OUTPUT_TOKENS", "llm.max_output_tokens"),
    ("SANITY_PROJECT_ID", "store.project_id"),
    ("SANITY_DATASET", "store.dataset"),
    ("SANITY_API_VERSION", "store.api_version"),
    ("SANITY_API_READ_TOKEN", "store.token"),
    ("SANITY_API_WRITE_TOKEN", "store.token"),
    ("SITE_URL", "site.url"),
];

/// Configuration loader
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with full resolution chain:
    /// defaults → global → project → .env files → env vars
    pub fn load() -> Result<Config> {
        Self::load_dotenv();
        Self::figment().extract_config()
    }

    /// Load configuration from a specific file only
    pub fn load_from_file(path: &Path) -> Result<Config> {
        Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(path))
            .extract_config()
    }

    /// Build the merged provider chain without extracting it
    pub fn figment() -> Figment {
        let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));

        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            debug!("Loading global config from: {}", global_path.display());
            figment = figment.merge(Toml::file(&global_path));
        }

        let project_path = Self::project_config_path();
        if project_path.exists() {
            debug!("Loading project config from: {}", project_path.display());
            figment = figment.merge(Toml::file(&project_path));
        }

        for (var, key) in ENV_ALIASES {
            figment = figment.merge(Env::raw().only(&[var]).map(move |_| key.into()));
        }

        figment.merge(Env::prefixed("SECTORGEN_").split("__"))
    }

    /// Populate the process environment from `.env.local` then `.env`.
    /// Variables already set are left alone.
    fn load_dotenv() {
        if dotenv::from_filename(".env.local").is_ok() {
            debug!("Loaded .env.local");
        }
        if dotenv::dotenv().is_ok() {
            debug!("Loaded .env");
        }
    }

    // =========================================================================
    // Path Management
    // =========================================================================

    /// Get path to global config directory (~/.config/sectorgen/)
    pub fn global_dir() -> Option<PathBuf> {
        BaseDirs::new().map(|dirs| dirs.config_dir().join("sectorgen"))
    }

    /// Get path to global config file
    pub fn global_config_path() -> Option<PathBuf> {
        Self::global_dir().map(|dir| dir.join("config.toml"))
    }

    /// Get path to project config file
    pub fn project_config_path() -> PathBuf {
        Self::project_dir().join("config.toml")
    }

    /// Get project data directory
    pub fn project_dir() -> PathBuf {
        PathBuf::from(".sectorgen")
    }

    // =========================================================================
    // Config Commands
    // =========================================================================

    /// Show config file paths
    pub fn show_path() {
        println!("Configuration paths:");
        println!();

        if let Some(global) = Self::global_config_path() {
            let exists = if global.exists() { "✓" } else { "✗" };
            println!("  Global:  {} {}", exists, global.display());
        } else {
            println!("  Global:  (not available)");
        }

        let project = Self::project_config_path();
        let exists = if project.exists() { "✓" } else { "✗" };
        println!("  Project: {} {}", exists, project.display());
    }

    /// Show current effective configuration (secrets omitted)
    pub fn show_config(as_json: bool) -> Result<()> {
        let config = Self::load()?;

        if as_json {
            println!("{}", serde_json::to_string_pretty(&config)?);
        } else {
            println!(
                "{}",
                toml::to_string_pretty(&config).map_err(|e| SectorError::Config(e.to_string()))?
            );
        }

        Ok(())
    }

    // =========================================================================
    // Initialization
    // =========================================================================

    /// Write the default project config file, returning its path
    pub fn init_project(force: bool) -> Result<PathBuf> {
        let project_dir = Self::project_dir();
        fs::create_dir_all(&project_dir)?;

        let config_path = Self::project_config_path();
        if !config_path.exists() || force {
            fs::write(&config_path, Self::default_project_config())?;
            info!("Created project config: {}", config_path.display());
        } else {
            info!("Project config exists: {}", config_path.display());
        }

        Ok(config_path)
    }

    /// Generate default project config content (TOML)
    fn default_project_config() -> String {
        r#"# sectorgen project configuration
# Credentials belong in the environment (.env.local / .env), not here:
#   OPENAI_API_KEY, SANITY_PROJECT_ID, SANITY_DATASET, SANITY_API_WRITE_TOKEN

version = "1.0"

[llm]
provider = "openai"
model = "gpt-4o-mini"
temperature = 0.4
max_output_tokens = 1800
timeout_secs = 120

[store]
api_version = "2023-08-01"
timeout_secs = 30

[site]
url = "http://localhost:3000"

[ingest]
max_source_chars = 5000
summary_snippet_chars = 1200
link_timeout_secs = 15
"#
        .to_string()
    }
}

/// Extract and validate a `Config` from a figment
trait ExtractConfig {
    fn extract_config(self) -> Result<Config>;
}

impl ExtractConfig for Figment {
    fn extract_config(self) -> Result<Config> {
        let mut config: Config = self
            .extract()
            .map_err(|e| SectorError::Config(format!("Configuration error: {}", e)))?;

        config.site.url = config.site.url.trim_end_matches('/').to_string();
        config.validate()?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn test_default_project_config_parses() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, ConfigLoader::default_project_config()).unwrap();

        let config = ConfigLoader::load_from_file(&path).unwrap();
        assert_eq!(config.version, "1.0");
        assert_eq!(config.llm.max_output_tokens, 1800);
        assert_eq!(config.ingest.summary_snippet_chars, 1200);
    }

    #[test]
    fn test_conventional_env_vars() {
        Jail::expect_with(|jail| {
            jail.set_env("OPENAI_API_KEY", "sk-jail");
            jail.set_env("OPENAI_MODEL", "gpt-test");
            jail.set_env("SANITY_PROJECT_ID", "proj");
            jail.set_env("SANITY_DATASET", "production");
            jail.set_env("SANITY_API_READ_TOKEN", "read-token");
            jail.set_env("SANITY_API_WRITE_TOKEN", "write-token");
            jail.set_env("SITE_URL", "https://eduba.example/");

            let config = ConfigLoader::figment().extract_config().unwrap();
            assert_eq!(config.llm.api_key.as_deref(), Some("sk-jail"));
            assert_eq!(config.llm.model, "gpt-test");
            assert_eq!(config.store.token.as_deref(), Some("write-token"));
            assert_eq!(config.site.url, "https://eduba.example");
            assert!(config.require_credentials().is_ok());
            Ok(())
        });
    }

    #[test]
    fn test_prefixed_env_override() {
        Jail::expect_with(|jail| {
            jail.set_env("SECTORGEN_LLM__TIMEOUT_SECS", "45");
            jail.set_env("SECTORGEN_INGEST__MAX_SOURCE_CHARS", "800");

            let config = ConfigLoader::figment().extract_config().unwrap();
            assert_eq!(config.llm.timeout_secs, 45);
            assert_eq!(config.ingest.max_source_chars, 800);
            Ok(())
        });
    }

    #[test]
    fn test_project_file_is_merged() {
        Jail::expect_with(|jail| {
            jail.create_dir(".sectorgen")?;
            jail.create_file(
                ".sectorgen/config.toml",
                r#"
                [llm]
                temperature = 0.9

                [site]
                url = "https://from-file.example"
                "#,
            )?;

            let config = ConfigLoader::figment().extract_config().unwrap();
            assert!((config.llm.temperature - 0.9).abs() < f32::EPSILON);
            assert_eq!(config.site.url, "https://from-file.example");
            Ok(())
        });
    }
}
