use config::{Config, File, FileFormat, Value};
use serde::de::DeserializeOwned;
use std::{collections::HashMap, fmt, path::Path};
use tracing::{debug, warn};

use crate::error::ConfigError;

pub const DEFAULT_CONFIG_PATH: &str = "config.ini";

pub const DEFAULT_MODEL: &str = "deepseek-chat";
pub const DEFAULT_MAX_TOKENS: u64 = 1000;
pub const DEFAULT_TEMPERATURE: f64 = 0.7;

const CONNECTION: &str = "deepseek";
const MODEL_PARAMS: &str = "model_params";

/// Connection settings and request defaults, resolved once.
///
/// Loaded from an INI file with a `[deepseek]` section (`api_key`,
/// `base_url`) and an optional `[model_params]` section (`model`,
/// `max_tokens`, `temperature`). Section names are matched exactly, option
/// names in any case.
#[derive(Clone, PartialEq)]
pub struct ClientConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub max_tokens: u64,
    pub temperature: f64,
}

impl ClientConfig {
    /// Reads the file at `path`. Every call reads the file again.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        debug!("Loading client configuration from {}", path.display());

        let settings = Config::builder()
            .add_source(File::from(path).format(FileFormat::Ini))
            .build()?;

        Self::from_settings(&settings)
    }

    pub fn from_ini_str(ini: &str) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from_str(ini, FileFormat::Ini))
            .build()?;

        Self::from_settings(&settings)
    }

    fn from_settings(settings: &Config) -> Result<Self, ConfigError> {
        let connection = Section::read(settings, CONNECTION)?;
        let api_key = connection.required("api_key", "deepseek.api_key")?;
        let base_url = connection
            .required("base_url", "deepseek.base_url")?
            .trim_end_matches('/')
            .to_string();

        let params = Section::read(settings, MODEL_PARAMS)?;
        let model = params
            .optional("model")
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());
        let max_tokens = params.optional("max_tokens").unwrap_or(DEFAULT_MAX_TOKENS);
        let temperature = params.optional("temperature").unwrap_or(DEFAULT_TEMPERATURE);

        debug!(
            "Resolved model defaults - model: {}, max_tokens: {}, temperature: {}",
            model, max_tokens, temperature
        );

        Ok(Self {
            api_key,
            base_url,
            model,
            max_tokens,
            temperature,
        })
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("max_tokens", &self.max_tokens)
            .field("temperature", &self.temperature)
            .finish()
    }
}

/// One INI section with its option names lowercased.
struct Section {
    name: &'static str,
    options: HashMap<String, Value>,
}

impl Section {
    /// A missing section reads as empty.
    fn read(settings: &Config, name: &'static str) -> Result<Self, ConfigError> {
        let options = match settings.get_table(name) {
            Ok(table) => table
                .into_iter()
                .map(|(key, value)| (key.to_lowercase(), value))
                .collect(),
            Err(config::ConfigError::NotFound(_)) => HashMap::new(),
            Err(err) => return Err(err.into()),
        };

        Ok(Self { name, options })
    }

    fn required(&self, option: &str, key: &'static str) -> Result<String, ConfigError> {
        match self.options.get(option) {
            Some(value) => Ok(value.clone().into_string()?),
            None => Err(ConfigError::MissingKey(key)),
        }
    }

    /// `None` when the option is absent or does not parse as `T`.
    fn optional<T: DeserializeOwned>(&self, option: &str) -> Option<T> {
        let value = self.options.get(option)?;
        match value.clone().try_deserialize::<T>() {
            Ok(value) => Some(value),
            Err(err) => {
                warn!("Ignoring {}.{}, using default: {}", self.name, option, err);
                None
            }
        }
    }
}
