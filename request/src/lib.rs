use serde::Serialize;

mod message;

pub use message::{Message, Role};

/// Body of `POST {base_url}/chat/completions`.
///
/// Borrows the caller's messages; a request only lives for the duration of
/// one call.
#[derive(Debug, Serialize)]
pub struct ChatCompletionsRequest<'a> {
    pub model: &'a str,
    pub messages: &'a [Message],
    pub max_tokens: u64,
    pub temperature: f64,
}

impl<'a> ChatCompletionsRequest<'a> {
    pub fn builder(messages: &'a [Message]) -> ChatCompletionsRequestBuilder<'a> {
        ChatCompletionsRequestBuilder::new(messages)
    }
}

pub struct ChatCompletionsRequestBuilder<'a> {
    messages: &'a [Message],
    model: &'a str,
    max_tokens: u64,
    temperature: f64,
}

impl<'a> ChatCompletionsRequestBuilder<'a> {
    fn new(messages: &'a [Message]) -> Self {
        Self {
            messages,
            model: "",
            max_tokens: 0,
            temperature: 0.0,
        }
    }

    pub fn model(mut self, model: &'a str) -> Self {
        self.model = model;
        self
    }

    pub fn max_tokens(mut self, max_tokens: u64) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn temperature(mut self, temperature: f64) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn build(self) -> ChatCompletionsRequest<'a> {
        ChatCompletionsRequest {
            model: self.model,
            messages: self.messages,
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        }
    }
}
