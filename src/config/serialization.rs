//! Config serialization to TOML
//!
//! Single source of truth for config file format.

use super::{Config, ResourceConfig};
use serde::Serialize;

/// TOML string literal with escaping
fn quote(s: &str) -> String {
    toml::Value::String(s.to_string()).to_string()
}

#[derive(Serialize)]
struct ResourcesDoc<'a> {
    resources: &'a [ResourceConfig],
}

impl Config {
    /// Serialize `[strings]` overrides (commented example when empty)
    pub(super) fn strings_to_toml(&self) -> String {
        if self.strings.is_empty() {
            return r#"
# [strings]
# "brands.title" = "Manufacturers"
# "notice.update-success" = "Saved"
"#
            .to_string();
        }

        let mut output = String::from("\n[strings]\n");
        for (key, value) in &self.strings {
            output.push_str(&format!("{} = {}\n", quote(key), quote(value)));
        }
        output
    }

    /// Serialize resource schemas as `[[resources]]` tables
    pub(super) fn resources_to_toml(&self) -> String {
        match toml::to_string(&ResourcesDoc {
            resources: &self.resources,
        }) {
            Ok(body) => format!("\n{body}"),
            Err(e) => {
                tracing::warn!("Could not serialize resources: {}", e);
                "\n# resources could not be serialized; built-in defaults apply\n".to_string()
            }
        }
    }

    /// Serialize config to TOML string (single source of truth for format)
    pub fn to_toml(&self) -> String {
        format!(
            r#"# catalog-admin configuration

# Backend base URL (CATALOG_ADMIN_API_URL overrides)
api_url = {api_url}

# Admin token sent as the `token` header (CATALOG_ADMIN_TOKEN overrides)
{token}
# Locale for option labels loaded from the backend (name_{{locale}})
locale = {locale}

# Rows per page for paginated resources
results_on_page = {results_on_page}

# Per-request timeout in seconds
request_timeout_secs = {timeout}

# Theme: dark, light
theme = {theme}

# Colors offered by color cells (Space / + / - cycle through them)
color_palette = {palette:?}

# Logging configuration (RUST_LOG env var overrides)
[logging]
level = {log_level}
# JSON file logging (in addition to the TUI log buffer or stderr)
file_enabled = {log_file_enabled}
file_dir = {log_file_dir}
file_rotation = "{log_file_rotation}"  # hourly, daily, never
file_prefix = {log_file_prefix}
{strings_section}
# ─────────────────────────────────────────────────────────────────────────────
# RESOURCES
# ─────────────────────────────────────────────────────────────────────────────
# One tab per resource. Field kinds: text, select, color.
# Select options are either listed inline or loaded with `options_from`.
# Remove this list to fall back to the built-in catalog resources.
{resources_section}"#,
            api_url = quote(&self.api_url),
            token = self
                .token
                .as_ref()
                .map(|t| format!("token = {}\n", quote(t)))
                .unwrap_or_else(|| "# token = \"...\"\n".to_string()),
            locale = quote(&self.locale),
            results_on_page = self.results_on_page,
            timeout = self.request_timeout_secs,
            theme = quote(&self.theme),
            palette = self.color_palette,
            log_level = quote(&self.logging.level),
            log_file_enabled = self.logging.file_enabled,
            log_file_dir = quote(&self.logging.file_dir.display().to_string()),
            log_file_rotation = self.logging.file_rotation.as_str(),
            log_file_prefix = quote(&self.logging.file_prefix),
            strings_section = self.strings_to_toml(),
            resources_section = self.resources_to_toml(),
        )
    }
}
