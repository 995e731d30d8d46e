//! # DeepSeek Client
//!
//! A small client for the DeepSeek chat completion API.
//!
//! Connection settings and request defaults are read once from an INI file;
//! the client then issues one HTTP request per call against two endpoints:
//! `GET {base_url}/models` and `POST {base_url}/chat/completions`.
//!
//! Request failures are routine here: they are logged and returned as
//! `None`, never as an error. Only configuration problems surface as
//! [`ConfigError`].
//!
//! ## Quick Start
//!
//! ```no_run
//! use client::{Client, config::DEFAULT_CONFIG_PATH};
//! use request::Message;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = Client::from_file(DEFAULT_CONFIG_PATH)?;
//!
//!     let messages = [
//!         Message::system("You are a helpful assistant."),
//!         Message::user("Hello, world!"),
//!     ];
//!
//!     if let Some(response) = client.chat_completion(&messages, None, Some(500), None).await {
//!         println!("{response}");
//!     }
//!
//!     Ok(())
//! }
//! ```

use anyhow::{Context, Result};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde_json::Value;
use std::path::Path;
use tracing::{debug, error, warn};

use request::{ChatCompletionsRequest, Message};

pub mod config;
mod error;

pub use config::ClientConfig;
pub use error::ConfigError;

/// Per-call overrides for a chat completion.
///
/// A field left as `None` takes the configured default. `Some(0)` and
/// `Some(0.0)` are sent as given.
#[derive(Clone, Copy, Debug, Default)]
pub struct ChatOptions<'a> {
    pub model: Option<&'a str>,
    pub max_tokens: Option<u64>,
    pub temperature: Option<f64>,
}

impl<'a> ChatOptions<'a> {
    pub fn model(mut self, model: &'a str) -> Self {
        self.model = Some(model);
        self
    }

    pub fn max_tokens(mut self, max_tokens: u64) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    pub fn temperature(mut self, temperature: f64) -> Self {
        self.temperature = Some(temperature);
        self
    }
}

#[derive(Debug)]
pub struct Client {
    config: ClientConfig,
    headers: HeaderMap,
}

impl Client {
    pub fn new(config: ClientConfig) -> Result<Self, ConfigError> {
        let mut authorization = HeaderValue::from_str(&format!("Bearer {}", config.api_key))
            .map_err(|_| ConfigError::InvalidApiKey)?;
        authorization.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(AUTHORIZATION, authorization);

        Ok(Self { config, headers })
    }

    /// Load the configuration file at `path` and build a client from it.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::new(ClientConfig::from_file(path)?)
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Send `messages` to the chat completions endpoint.
    ///
    /// Each of `model`, `max_tokens` and `temperature` overrides the
    /// configured default when given. Returns the parsed response body
    /// unmodified, or `None` if the request failed for any reason.
    pub async fn chat_completion(
        &self,
        messages: &[Message],
        model: Option<&str>,
        max_tokens: Option<u64>,
        temperature: Option<f64>,
    ) -> Option<Value> {
        let options = ChatOptions {
            model,
            max_tokens,
            temperature,
        };
        self.chat_completion_with(messages, options).await
    }

    pub async fn chat_completion_with(
        &self,
        messages: &[Message],
        options: ChatOptions<'_>,
    ) -> Option<Value> {
        if messages.is_empty() {
            warn!("No messages to send, skipping chat completion request");
            return None;
        }

        let request = ChatCompletionsRequest::builder(messages)
            .model(options.model.unwrap_or(&self.config.model))
            .max_tokens(options.max_tokens.unwrap_or(self.config.max_tokens))
            .temperature(options.temperature.unwrap_or(self.config.temperature))
            .build();

        debug!(
            "Sending chat completion request - model: {}, messages: {}, max_tokens: {}, temperature: {}",
            request.model,
            request.messages.len(),
            request.max_tokens,
            request.temperature
        );

        let http = reqwest::Client::new();
        let builder = http.post(self.endpoint("chat/completions")).json(&request);
        log_failure(self.send(builder).await)
    }

    /// Fetch the list of models available to this API key.
    pub async fn list_models(&self) -> Option<Value> {
        debug!("Requesting model list");

        let http = reqwest::Client::new();
        let builder = http.get(self.endpoint("models"));
        log_failure(self.send(builder).await)
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.config.base_url, path)
    }

    /// Send a request once and parse the body as JSON.
    async fn send(&self, builder: reqwest::RequestBuilder) -> Result<Value> {
        let response = builder
            .headers(self.headers.clone())
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .context("Request error")?;

        let body = response.bytes().await.context("Request error")?;
        serde_json::from_slice(&body).context("JSON parsing error")
    }
}

fn log_failure(result: Result<Value>) -> Option<Value> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            error!("{e:#}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> ClientConfig {
        ClientConfig {
            api_key: "sk-test".to_string(),
            base_url: "https://api.deepseek.com".to_string(),
            model: "deepseek-chat".to_string(),
            max_tokens: 1000,
            temperature: 0.7,
        }
    }

    #[test]
    fn authorization_header_is_derived_once() {
        let client = Client::new(config()).unwrap();
        let authorization = client.headers.get(AUTHORIZATION).unwrap();
        assert_eq!(authorization, "Bearer sk-test");
        assert!(authorization.is_sensitive());
        assert_eq!(
            client.headers.get(CONTENT_TYPE).unwrap(),
            "application/json"
        );
    }

    #[test]
    fn api_key_with_newline_is_rejected() {
        let mut config = config();
        config.api_key = "sk-test\nX-Injected: 1".to_string();
        let err = Client::new(config).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidApiKey));
    }

    #[test]
    fn endpoints_join_base_url() {
        let client = Client::new(config()).unwrap();
        assert_eq!(
            client.endpoint("chat/completions"),
            "https://api.deepseek.com/chat/completions"
        );
        assert_eq!(client.endpoint("models"), "https://api.deepseek.com/models");
    }

    #[test]
    fn options_builder_sets_overrides() {
        let options = ChatOptions::default()
            .model("deepseek-reasoner")
            .max_tokens(0)
            .temperature(0.0);
        assert_eq!(options.model, Some("deepseek-reasoner"));
        assert_eq!(options.max_tokens, Some(0));
        assert_eq!(options.temperature, Some(0.0));
    }

    #[test]
    fn client_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Client>();
    }
}
