//! Configuration lookups and log client settings
//!
//! Settings are read through [`ConfigProvider`], a dotted-key lookup
//! interface. Two providers are included:
//!
//! - [`TomlConfig`]: a parsed TOML document, nested tables addressed as `a.b.c`
//! - [`MapConfig`]: flat `key -> value` pairs
//!
//! [`LogSettings`] validates the settings once; it is never mutated after
//! construction.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use runlogs_core::{Error, Result};

/// Key for the log driver option table
pub const LOG_DRIVER_OPTIONS: &str = "ecs.log.driver.options";
/// Key for the namespace name
pub const LOG_NAMESPACE: &str = "ecs.log.namespace";
/// Key for the retention period in days
pub const LOG_RETENTION_DAYS: &str = "ecs.log.retention_days";
/// Key for the fallback region
pub const DEFAULT_REGION: &str = "aws_default_region";
/// Key for the operating mode
pub const MODE: &str = "flotilla_mode";

const OPTION_REGION: &str = "awslogs-region";
const OPTION_GROUP: &str = "awslogs-group";
const OPTION_STREAM_PREFIX: &str = "awslogs-stream-prefix";

/// Retention used when none is configured
pub const DEFAULT_RETENTION_DAYS: u32 = 30;

/// Named configuration lookups
pub trait ConfigProvider {
    /// String value at `key`
    fn get_string(&self, key: &str) -> Option<String>;

    /// Integer value at `key`
    fn get_int(&self, key: &str) -> Option<i64>;

    /// String values of the table at `key`; empty if absent
    fn get_string_map(&self, key: &str) -> HashMap<String, String>;
}

/// Errors loading a configuration document
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Reading the file failed
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    /// The document is not valid TOML
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Configuration backed by a TOML document
#[derive(Debug, Clone, Default)]
pub struct TomlConfig {
    root: toml::Table,
}

impl TomlConfig {
    /// Parse a TOML document
    pub fn parse(contents: &str) -> std::result::Result<Self, ConfigError> {
        Ok(TomlConfig {
            root: toml::from_str(contents)?,
        })
    }

    /// Load and parse a TOML file
    pub fn load(path: impl AsRef<Path>) -> std::result::Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    fn lookup(&self, key: &str) -> Option<&toml::Value> {
        let mut parts = key.split('.');
        let mut value = self.root.get(parts.next()?)?;
        for part in parts {
            value = value.as_table()?.get(part)?;
        }
        Some(value)
    }
}

impl ConfigProvider for TomlConfig {
    fn get_string(&self, key: &str) -> Option<String> {
        match self.lookup(key)? {
            toml::Value::String(s) => Some(s.clone()),
            toml::Value::Integer(i) => Some(i.to_string()),
            toml::Value::Boolean(b) => Some(b.to_string()),
            _ => None,
        }
    }

    fn get_int(&self, key: &str) -> Option<i64> {
        match self.lookup(key)? {
            toml::Value::Integer(i) => Some(*i),
            toml::Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    fn get_string_map(&self, key: &str) -> HashMap<String, String> {
        let Some(table) = self.lookup(key).and_then(toml::Value::as_table) else {
            return HashMap::new();
        };
        table
            .iter()
            .filter_map(|(k, v)| match v {
                toml::Value::String(s) => Some((k.clone(), s.clone())),
                toml::Value::Integer(i) => Some((k.clone(), i.to_string())),
                _ => None,
            })
            .collect()
    }
}

/// Configuration backed by flat key/value pairs
///
/// `get_string_map("a.b")` collects every key of the form `a.b.<name>`.
#[derive(Debug, Clone, Default)]
pub struct MapConfig {
    values: HashMap<String, String>,
}

impl MapConfig {
    /// Create an empty configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a value
    pub fn set(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }
}

impl ConfigProvider for MapConfig {
    fn get_string(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn get_int(&self, key: &str) -> Option<i64> {
        self.values.get(key)?.trim().parse().ok()
    }

    fn get_string_map(&self, key: &str) -> HashMap<String, String> {
        let prefix = format!("{}.", key);
        self.values
            .iter()
            .filter_map(|(k, v)| k.strip_prefix(&prefix).map(|name| (name.to_string(), v.clone())))
            .collect()
    }
}

/// Whether the client talks to a real store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperatingMode {
    /// Use a store connection from the connector
    Live,
    /// Use an in-memory store; no connection is made
    Test,
}

impl OperatingMode {
    fn from_config(config: &dyn ConfigProvider) -> Self {
        match config.get_string(MODE).as_deref() {
            Some("test") => OperatingMode::Test,
            _ => OperatingMode::Live,
        }
    }
}

/// Validated settings for the managed cloud log client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSettings {
    /// Store region
    pub region: String,
    /// Namespace (log group) holding every run's streams
    pub namespace: String,
    /// Prefix the shipping agent puts in front of stream names
    pub stream_prefix: String,
    /// Namespace retention
    pub retention_days: u32,
    /// Operating mode
    pub mode: OperatingMode,
}

impl LogSettings {
    /// Read and validate settings
    ///
    /// Lookup order:
    /// - region: `ecs.log.driver.options.awslogs-region`, then `aws_default_region`
    /// - namespace: `ecs.log.namespace`, then `ecs.log.driver.options.awslogs-group`
    /// - stream prefix: `ecs.log.driver.options.awslogs-stream-prefix`
    /// - retention: `ecs.log.retention_days`, 0 or unset means 30
    ///
    /// Every missing setting is reported in one [`Error::Configuration`].
    pub fn from_config(client: &'static str, config: &dyn ConfigProvider) -> Result<Self> {
        let options = config.get_string_map(LOG_DRIVER_OPTIONS);
        let option = |name: &str| options.get(name).filter(|v| !v.is_empty()).cloned();
        let setting = |key: &str| config.get_string(key).filter(|v| !v.is_empty());

        let mut missing = Vec::new();

        let region = option(OPTION_REGION).or_else(|| setting(DEFAULT_REGION));
        if region.is_none() {
            missing.push(format!(
                "one of [{}.{}] or [{}]",
                LOG_DRIVER_OPTIONS, OPTION_REGION, DEFAULT_REGION
            ));
        }

        let namespace = setting(LOG_NAMESPACE).or_else(|| option(OPTION_GROUP));
        if namespace.is_none() {
            missing.push(format!(
                "one of [{}.{}] or [{}]",
                LOG_DRIVER_OPTIONS, OPTION_GROUP, LOG_NAMESPACE
            ));
        }

        let stream_prefix = option(OPTION_STREAM_PREFIX);
        if stream_prefix.is_none() {
            missing.push(format!("[{}.{}]", LOG_DRIVER_OPTIONS, OPTION_STREAM_PREFIX));
        }

        let retention_days = match config.get_int(LOG_RETENTION_DAYS) {
            None | Some(0) => Some(DEFAULT_RETENTION_DAYS),
            Some(days) => u32::try_from(days).ok(),
        };
        if retention_days.is_none() {
            missing.push(format!("[{}] as a positive number of days", LOG_RETENTION_DAYS));
        }

        match (region, namespace, stream_prefix, retention_days) {
            (Some(region), Some(namespace), Some(stream_prefix), Some(retention_days)) => {
                Ok(LogSettings {
                    region,
                    namespace,
                    stream_prefix,
                    retention_days,
                    mode: OperatingMode::from_config(config),
                })
            }
            _ => Err(Error::Configuration { client, missing }),
        }
    }
}
