use serde::{Deserialize, Serialize};
use std::fs;
use tracing::debug;

use crate::error::{Error, Result};
use crate::violation::DEFAULT_PAGE_SIZE;

/// Header written at the top of a freshly initialized config file
const CONFIG_HEADER: &str = "# dtrack-violations configuration\n\
# The API key is read from --api-key or DTRACK_API_KEY, never from this file.\n\n";

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    pub server: ServerConfig,
    #[serde(default)]
    pub http: HttpConfig,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    /// Dependency-Track API server, e.g. http://localhost:8081
    pub base_url: String,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct HttpConfig {
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    /// Upper bound on non-empty pages when fetching all violations
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_pages: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                base_url: "http://localhost:8081".to_string(),
            },
            http: HttpConfig::default(),
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            max_pages: None,
            timeout_secs: None,
        }
    }
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

impl Config {
    /// Read a TOML config file and apply `key=value` overrides
    pub fn load(path: &str, overrides: &[String]) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| Error::config(format!("Failed to read {}: {}", path, e)))?;
        Self::parse(&content, overrides)
    }

    /// Parse TOML content and apply `key=value` overrides (dot notation, e.g. `http.page_size=50`)
    pub fn parse(content: &str, overrides: &[String]) -> Result<Self> {
        let mut table: toml::Table = toml::from_str(content)
            .map_err(|e| Error::config(format!("Invalid TOML: {}", e)))?;
        for item in overrides {
            apply_override(&mut table, item)?;
        }
        let config =
            Self::deserialize(toml::Value::Table(table)).map_err(|e| Error::config(e.to_string()))?;
        if config.http.max_pages == Some(0) {
            return Err(Error::config("http.max_pages must be at least 1"));
        }
        Ok(config)
    }

    /// Render the config as a commented TOML document
    pub fn to_toml(&self) -> Result<String> {
        let body = toml::to_string_pretty(self).map_err(|e| Error::config(e.to_string()))?;
        Ok(format!("{}{}", CONFIG_HEADER, body))
    }
}

fn apply_override(table: &mut toml::Table, item: &str) -> Result<()> {
    let (key, raw) = item
        .split_once('=')
        .ok_or_else(|| Error::config(format!("Override '{}' must be key=value", item)))?;
    let key = key.trim();
    let value = parse_override_value(raw.trim());
    debug!("Config override {} = {}", key, value);

    let mut parts: Vec<&str> = key.split('.').collect();
    let Some(leaf) = parts.pop().filter(|s| !s.is_empty()) else {
        return Err(Error::config(format!("Override '{}' has an empty key", item)));
    };

    let mut current = table;
    for part in parts {
        let entry = current
            .entry(part.to_string())
            .or_insert_with(|| toml::Value::Table(toml::Table::new()));
        current = entry
            .as_table_mut()
            .ok_or_else(|| Error::config(format!("'{}' in '{}' is not a table", part, key)))?;
    }
    current.insert(leaf.to_string(), value);
    Ok(())
}

/// Parse as a TOML scalar (number, bool, quoted string), falling back to a bare string
fn parse_override_value(raw: &str) -> toml::Value {
    format!("v = {}", raw)
        .parse::<toml::Table>()
        .ok()
        .and_then(|mut t| t.remove("v"))
        .unwrap_or_else(|| toml::Value::String(raw.to_string()))
}
