//! # Translation Backend
//!
//! Everything around a chat-completions call except the network itself:
//! prompt construction, request/response shapes, retry and failure policy.
//! The HTTP client is supplied by the caller as a [`ChatTransport`].
//!
//! ## Policy
//!
//! - Blank text is rejected before any call
//! - Missing endpoint URL or API key is a configuration error
//! - 401/403 fail immediately as authentication errors
//! - A reply without choices is retried after a pause, up to `max_attempts`

pub mod chat;

use std::time::Duration;

pub use chat::{ChatChoice, ChatMessage, ChatRequest, ChatResponse, ChoiceMessage};

/// Instruction placed before the text to translate.
pub const DEFAULT_PROMPT: &str = "You are a localisation assistant for a historical and political strategy game. \
Translate the following text into concise Simplified Chinese. Keep every format mark, symbol, tag, \
angle bracket, quote, line break, indentation and special character exactly as it is, and never \
translate or alter tags. Reply with the translated text only, without explanations.\n\
Text to translate:\n";

pub const DEFAULT_MODEL: &str = "gpt-4.1";

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("request timed out after {0:?}")]
    Timeout(Duration),
    #[error("transport failure: {0}")]
    Failed(String),
}

#[derive(Debug, thiserror::Error)]
pub enum TranslateError {
    #[error("Nothing to translate")]
    EmptyText,
    #[error("Translation backend not configured: missing API URL or API key")]
    NotConfigured,
    #[error("Translation backend rejected the credentials (HTTP {0})")]
    AuthFailed(u16),
    #[error("Translation backend returned HTTP {0}")]
    Http(u16),
    #[error("Translation backend gave no answer after {attempts} attempts")]
    NoResponse { attempts: u32 },
    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// Where and how to reach the backend for one call.
#[derive(Debug, Clone, Copy)]
pub struct Endpoint<'a> {
    pub url: &'a str,
    pub api_key: &'a str,
    pub timeout: Duration,
}

/// Status and decoded body of one backend reply.
#[derive(Debug, Clone, PartialEq)]
pub struct TransportReply {
    pub status: u16,
    /// `None` when the body was missing or not a chat response.
    pub body: Option<ChatResponse>,
}

impl TransportReply {
    pub fn ok(body: ChatResponse) -> Self {
        Self {
            status: 200,
            body: Some(body),
        }
    }

    pub fn status(status: u16) -> Self {
        Self { status, body: None }
    }
}

/// Performs a single chat-completions exchange.
pub trait ChatTransport {
    fn send(
        &self,
        endpoint: &Endpoint<'_>,
        request: &ChatRequest,
    ) -> Result<TransportReply, TransportError>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct TranslatorSettings {
    pub api_url: Option<String>,
    pub api_key: Option<String>,
    pub model: String,
    pub temperature: f32,
    pub max_attempts: u32,
    pub retry_delay: Duration,
    pub timeout: Duration,
    pub prompt: String,
}

impl Default for TranslatorSettings {
    fn default() -> Self {
        Self {
            api_url: None,
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            temperature: 0.3,
            max_attempts: 3,
            retry_delay: Duration::from_secs(2),
            timeout: Duration::from_secs(60),
            prompt: DEFAULT_PROMPT.to_string(),
        }
    }
}

/// Prompt sent for `text`: the instruction followed by the text.
pub fn build_prompt(prompt: &str, text: &str) -> String {
    format!("{prompt}{text}")
}

/// Translates single lines through a [`ChatTransport`].
pub struct Translator<T> {
    transport: T,
    settings: TranslatorSettings,
}

impl<T: ChatTransport> Translator<T> {
    pub fn new(transport: T, settings: TranslatorSettings) -> Self {
        Self {
            transport,
            settings,
        }
    }

    pub fn settings(&self) -> &TranslatorSettings {
        &self.settings
    }

    /// Translates one line and returns the trimmed answer.
    pub fn translate(&self, text: &str) -> Result<String, TranslateError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(TranslateError::EmptyText);
        }

        let endpoint = self.endpoint()?;
        let request = ChatRequest {
            model: self.settings.model.clone(),
            messages: vec![ChatMessage::user(build_prompt(&self.settings.prompt, text))],
            temperature: self.settings.temperature,
        };

        let attempts = self.settings.max_attempts.max(1);
        for attempt in 1..=attempts {
            let reply = self.transport.send(&endpoint, &request)?;
            match reply.status {
                401 | 403 => return Err(TranslateError::AuthFailed(reply.status)),
                200..=299 => {}
                status => return Err(TranslateError::Http(status)),
            }

            if let Some(content) = reply.body.as_ref().and_then(ChatResponse::first_content) {
                return Ok(content.trim().to_string());
            }

            log::warn!("translation attempt {attempt}/{attempts} returned no choices");
            if attempt < attempts && !self.settings.retry_delay.is_zero() {
                std::thread::sleep(self.settings.retry_delay);
            }
        }

        Err(TranslateError::NoResponse { attempts })
    }

    /// Translates every line in order. Blank lines are kept as they are and
    /// never reach the backend.
    pub fn translate_lines<S: AsRef<str>>(&self, lines: &[S]) -> Result<Vec<String>, TranslateError> {
        lines
            .iter()
            .map(|line| {
                let line = line.as_ref();
                if line.trim().is_empty() {
                    Ok(line.to_string())
                } else {
                    self.translate(line)
                }
            })
            .collect()
    }

    fn endpoint(&self) -> Result<Endpoint<'_>, TranslateError> {
        match (
            non_empty(&self.settings.api_url),
            non_empty(&self.settings.api_key),
        ) {
            (Some(url), Some(api_key)) => Ok(Endpoint {
                url,
                api_key,
                timeout: self.settings.timeout,
            }),
            _ => Err(TranslateError::NotConfigured),
        }
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}
