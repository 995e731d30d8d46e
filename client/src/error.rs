use std::{error::Error, fmt};

/// Failure to build a [`crate::Client`] from its configuration.
///
/// There is no recovery path: a client without credentials is unusable, so
/// this is returned to the caller instead of being logged and swallowed.
#[derive(Debug)]
pub enum ConfigError {
    Load(config::ConfigError),
    MissingKey(&'static str),
    InvalidApiKey,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Load(err) => write!(f, "failed to load configuration: {err}"),
            ConfigError::MissingKey(key) => write!(f, "missing required setting: {key}"),
            ConfigError::InvalidApiKey => {
                write!(f, "api_key cannot be used in an Authorization header")
            }
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ConfigError::Load(err) => Some(err),
            ConfigError::MissingKey(_) | ConfigError::InvalidApiKey => None,
        }
    }
}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        Self::Load(err)
    }
}
