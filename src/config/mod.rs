//! Configuration for the admin console
//!
//! Configuration is loaded in order of precedence:
//! 1. Environment variables (highest priority)
//! 2. Config file (~/.config/catalog-admin/config.toml)
//! 3. Built-in defaults (lowest priority)

use crate::table::is_hex_color;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::PathBuf;

// ─────────────────────────────────────────────────────────────────────────────
// Submodules
// ─────────────────────────────────────────────────────────────────────────────

mod observability;
pub mod resources;
mod serialization;

#[cfg(test)]
mod tests;

// ─────────────────────────────────────────────────────────────────────────────
// Re-exports
// ─────────────────────────────────────────────────────────────────────────────

pub use observability::{FileLogging, LogRotation, LoggingConfig};
pub use resources::{
    default_resources, Derive, FieldConfig, KindName, OptionList, OptionSource, ResourceConfig,
};

// ─────────────────────────────────────────────────────────────────────────────
// Constants
// ─────────────────────────────────────────────────────────────────────────────

/// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

const DEFAULT_API_URL: &str = "http://localhost:4000";
const DEFAULT_LOCALE: &str = "en";
const DEFAULT_RESULTS_ON_PAGE: usize = 20;
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_THEME: &str = "dark";

/// Swatches offered by color cells
pub fn default_palette() -> Vec<String> {
    [
        "#000000", "#ffffff", "#808080", "#c0392b", "#e67e22", "#f1c40f", "#27ae60", "#2980b9",
        "#8e44ad", "#8b4513", "#ff69b4", "#000080",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

// ─────────────────────────────────────────────────────────────────────────────
// Application Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Backend base URL, request paths are appended to it
    pub api_url: String,

    /// Admin token sent as the `token` header
    pub token: Option<String>,

    /// Locale used for `{locale}` placeholders in option text keys
    pub locale: String,

    /// Page size for paginated resources
    pub results_on_page: usize,

    /// Per-request timeout
    pub request_timeout_secs: u64,

    /// Theme name: "dark", "light"
    pub theme: String,

    /// Colors cycled through by color cells
    pub color_palette: Vec<String>,

    /// Logging configuration
    pub logging: LoggingConfig,

    /// Overrides for built-in UI strings
    pub strings: BTreeMap<String, String>,

    /// One tab per resource
    pub resources: Vec<ResourceConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            token: None,
            locale: DEFAULT_LOCALE.to_string(),
            results_on_page: DEFAULT_RESULTS_ON_PAGE,
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
            theme: DEFAULT_THEME.to_string(),
            color_palette: default_palette(),
            logging: LoggingConfig::default(),
            strings: BTreeMap::new(),
            resources: default_resources(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// File Configuration (deserialization layer)
// ─────────────────────────────────────────────────────────────────────────────

/// Config file structure
#[derive(Debug, Deserialize, Default)]
pub(crate) struct FileConfig {
    pub api_url: Option<String>,
    pub token: Option<String>,
    pub locale: Option<String>,
    pub results_on_page: Option<usize>,
    pub request_timeout_secs: Option<u64>,
    pub theme: Option<String>,
    pub color_palette: Option<Vec<String>>,

    /// Optional [logging] section
    pub logging: Option<FileLogging>,

    /// Optional [strings] section
    #[serde(default)]
    pub strings: BTreeMap<String, String>,

    /// Optional [[resources]] list; replaces the built-in resources
    pub resources: Option<Vec<ResourceConfig>>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Configuration Loading
// ─────────────────────────────────────────────────────────────────────────────

impl Config {
    /// Get the config file path: ~/.config/catalog-admin/config.toml
    pub fn config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|p| {
            p.join(".config")
                .join("catalog-admin")
                .join("config.toml")
        })
    }

    /// Create config file with defaults if it doesn't exist
    pub fn ensure_config_exists() {
        let Some(path) = Self::config_path() else {
            return;
        };

        if path.exists() {
            return;
        }

        if let Some(parent) = path.parent() {
            if std::fs::create_dir_all(parent).is_err() {
                return;
            }
        }

        // Config is optional, a failed write only loses the template
        let _ = std::fs::write(&path, Self::default().to_toml());
    }

    /// Overwrite the config file with defaults
    pub fn reset_config() -> std::io::Result<PathBuf> {
        let path = Self::config_path().ok_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::NotFound, "no home directory")
        })?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, Self::default().to_toml())?;
        Ok(path)
    }

    /// Load file config if it exists
    ///
    /// A config file that exists but cannot be parsed is fatal: the process
    /// prints the location and the parse error, then exits.
    fn load_file_config() -> FileConfig {
        let Some(path) = Self::config_path() else {
            return FileConfig::default();
        };

        match std::fs::read_to_string(&path) {
            Ok(contents) => match toml::from_str(&contents) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("\n╔══════════════════════════════════════════════════════════════╗");
                    eprintln!("║  CONFIG ERROR - Failed to parse configuration file          ║");
                    eprintln!("╚══════════════════════════════════════════════════════════════╝\n");
                    eprintln!("  File: {}\n", path.display());
                    eprintln!("  Error: {}\n", e);
                    eprintln!("  Tip: Check for:\n");
                    eprintln!("    - Missing quotes around string values");
                    eprintln!("    - Unknown field kinds (use text, select or color)");
                    eprintln!("    - [[resources.fields]] entries without key or label");
                    eprintln!("    - Typos in section names\n");
                    eprintln!("  To reset, run `catalog-admin config --reset`.\n");
                    std::process::exit(1);
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => FileConfig::default(),
            Err(e) => {
                eprintln!("\n╔══════════════════════════════════════════════════════════════╗");
                eprintln!("║  CONFIG ERROR - Cannot read configuration file              ║");
                eprintln!("╚══════════════════════════════════════════════════════════════╝\n");
                eprintln!("  File: {}\n", path.display());
                eprintln!("  Error: {}\n", e);
                std::process::exit(1);
            }
        }
    }

    /// Load configuration: file -> env vars -> defaults
    pub fn from_env() -> Self {
        Self::from_file(Self::load_file_config(), |key| std::env::var(key).ok())
    }

    /// Merge a parsed file with environment lookups
    pub(crate) fn from_file(file: FileConfig, env: impl Fn(&str) -> Option<String>) -> Self {
        // API URL: env > file > default
        let api_url = env("CATALOG_ADMIN_API_URL")
            .or(file.api_url)
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        // Token: env > file, empty means unset
        let token = env("CATALOG_ADMIN_TOKEN")
            .or(file.token)
            .filter(|t| !t.is_empty());

        let locale = env("CATALOG_ADMIN_LOCALE")
            .or(file.locale)
            .unwrap_or_else(|| DEFAULT_LOCALE.to_string());

        let results_on_page = file
            .results_on_page
            .filter(|n| *n > 0)
            .unwrap_or(DEFAULT_RESULTS_ON_PAGE);

        let request_timeout_secs = file
            .request_timeout_secs
            .filter(|n| *n > 0)
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        let theme = env("CATALOG_ADMIN_THEME")
            .or(file.theme)
            .unwrap_or_else(|| DEFAULT_THEME.to_string());

        let color_palette = file
            .color_palette
            .map(|p| p.into_iter().filter(|c| is_hex_color(c)).collect::<Vec<_>>())
            .filter(|p| !p.is_empty())
            .unwrap_or_else(default_palette);

        Self {
            api_url: api_url.trim_end_matches('/').to_string(),
            token,
            locale,
            results_on_page,
            request_timeout_secs,
            theme,
            color_palette,
            logging: LoggingConfig::from_file(file.logging),
            strings: file.strings,
            resources: file.resources.unwrap_or_else(default_resources),
        }
    }

    pub fn resource(&self, name: &str) -> Option<&ResourceConfig> {
        resources::find(&self.resources, name)
    }
}
