use crate::core::ConfigProvider;
use crate::utils::error::ConfigError;
use crate::utils::validation::{
    validate_non_empty_string, validate_one_of, validate_path, Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::LazyLock;

static ENV_VAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("valid env var pattern"));

pub const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];
pub const LOG_FORMATS: [&str; 2] = ["compact", "json"];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub data_dir: String,
    pub hotels_file: String,
    pub customers_file: String,
    pub reservations_file: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: "./data".to_string(),
            hotels_file: "hotels.json".to_string(),
            customers_file: "customers.json".to_string(),
            reservations_file: "reservations.json".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: Option<String>,
    pub format: Option<String>,
}

impl TomlConfig {
    /// Loads a config file, substituting `${VAR}` references first.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(&path).map_err(|source| ConfigError::Io {
            path: path.as_ref().to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let processed_content = Self::substitute_env_vars(content);
        Ok(toml::from_str(&processed_content)?)
    }

    /// Expands `${VAR}` references. Unset variables are left as written.
    fn substitute_env_vars(content: &str) -> String {
        ENV_VAR
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    pub fn log_level(&self) -> Option<&str> {
        self.logging.level.as_deref()
    }

    pub fn json_logs(&self) -> bool {
        self.logging.format.as_deref() == Some("json")
    }
}

impl Validate for TomlConfig {
    type Error = ConfigError;

    fn validate(&self) -> Result<(), ConfigError> {
        validate_path("storage.data_dir", &self.storage.data_dir)?;
        for (field, name) in [
            ("storage.hotels_file", &self.storage.hotels_file),
            ("storage.customers_file", &self.storage.customers_file),
            ("storage.reservations_file", &self.storage.reservations_file),
        ] {
            validate_non_empty_string(field, name)?;
            validate_path(field, name)?;
        }

        if let Some(level) = &self.logging.level {
            validate_one_of("logging.level", level, &LOG_LEVELS)?;
        }
        if let Some(format) = &self.logging.format {
            validate_one_of("logging.format", format, &LOG_FORMATS)?;
        }
        Ok(())
    }
}

impl ConfigProvider for TomlConfig {
    fn data_dir(&self) -> &Path {
        Path::new(&self.storage.data_dir)
    }

    fn hotels_document(&self) -> &str {
        &self.storage.hotels_file
    }

    fn customers_document(&self) -> &str {
        &self.storage.customers_file
    }

    fn reservations_document(&self) -> &str {
        &self.storage.reservations_file
    }
}
