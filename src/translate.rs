//! Best-effort translation via a chat-completion endpoint
//!
//! Translation never blocks synthesis: any failure is logged and the caller
//! gets the original text back.

use serde::{Deserialize, Serialize};

use crate::config::TranslatorConfig;
use crate::{Error, Result};

/// Display names used in the translation prompt, per language code
const LANGUAGE_NAMES: &[(&str, &str)] = &[
    ("en", "English"),
    ("es", "Spanish"),
    ("fr", "French"),
    ("de", "German"),
    ("it", "Italian"),
    ("pt", "Portuguese"),
    ("ru", "Russian"),
    ("zh", "Chinese (Simplified)"),
    ("ja", "Japanese"),
    ("ko", "Korean"),
    ("hi", "Hindi"),
    ("ar", "Arabic"),
];

/// Token budget bounds for a translation request
const MIN_TOKENS: u32 = 100;
const MAX_TOKENS: u32 = 300;

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<Message<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: String,
}

/// Translates text ahead of synthesis
pub struct Translator {
    client: reqwest::blocking::Client,
    config: TranslatorConfig,
}

/// Display name for a language code, defaulting to English
fn language_name(code: &str) -> &'static str {
    let code = code.to_lowercase();
    LANGUAGE_NAMES
        .iter()
        .find(|(c, _)| *c == code)
        .map_or("English", |(_, name)| name)
}

/// Budget proportional to input length, clamped to bound remote cost
fn token_budget(text: &str) -> u32 {
    let words = u32::try_from(text.split_whitespace().count()).unwrap_or(u32::MAX);
    words.saturating_mul(2).clamp(MIN_TOKENS, MAX_TOKENS)
}

/// Strip one layer of surrounding quotes the model sometimes adds
fn strip_quotes(text: &str) -> &str {
    text.trim()
        .trim_matches('"')
        .trim_matches('\'')
        .trim()
}

impl Translator {
    /// Create a translator with the given configuration
    #[must_use]
    pub fn new(config: TranslatorConfig) -> Self {
        Self {
            client: reqwest::blocking::Client::new(),
            config,
        }
    }

    /// Create a translator configured from the environment
    #[must_use]
    pub fn from_env() -> Self {
        Self::new(TranslatorConfig::from_env())
    }

    /// Translate text into the target language, best-effort
    ///
    /// Input is sanitized first; the sanitized text comes back unchanged
    /// when the target is English, when no credential is configured, or
    /// when both model variants fail.
    #[must_use]
    pub fn translate(&self, text: &str, target_language: &str) -> String {
        let text = crate::text::sanitize(text);

        if target_language.eq_ignore_ascii_case("en") {
            return text;
        }

        let Some(api_key) = self.config.api_key.as_deref() else {
            tracing::debug!("no translation credential configured, skipping");
            return text;
        };

        match self.request_translation(&text, target_language, api_key) {
            Ok(translated) => translated,
            Err(e) => {
                tracing::warn!(error = %e, "translation failed, using original text");
                text
            }
        }
    }

    /// Try the fast model, then the fallback model once
    fn request_translation(&self, text: &str, target_language: &str, api_key: &str) -> Result<String> {
        let target_name = language_name(target_language);
        let system_prompt = format!(
            "You are a translation tool. Your ONLY job is to translate the given text to {target_name}.\n\
             Return ONLY the translation, nothing else."
        );
        let user_prompt = format!("Translate this text to {target_name}:\n\n{text}");
        let max_tokens = token_budget(text);

        let fast = self.call_model(
            &self.config.fast_model,
            &system_prompt,
            &user_prompt,
            max_tokens,
            self.config.fast_timeout,
            api_key,
        );

        match fast {
            Ok(translated) => Ok(translated),
            Err(e) => {
                tracing::debug!(error = %e, model = %self.config.fast_model, "fast model failed, retrying");
                self.call_model(
                    &self.config.model,
                    &system_prompt,
                    &user_prompt,
                    max_tokens,
                    self.config.fallback_timeout,
                    api_key,
                )
            }
        }
    }

    fn call_model(
        &self,
        model: &str,
        system_prompt: &str,
        user_prompt: &str,
        max_tokens: u32,
        timeout: std::time::Duration,
        api_key: &str,
    ) -> Result<String> {
        let request = ChatCompletionRequest {
            model,
            messages: vec![
                Message {
                    role: "system",
                    content: system_prompt,
                },
                Message {
                    role: "user",
                    content: user_prompt,
                },
            ],
            temperature: 0.0,
            max_tokens,
        };

        let response = self
            .client
            .post(&self.config.endpoint)
            .header("Authorization", format!("Bearer {api_key}"))
            .timeout(timeout)
            .json(&request)
            .send()?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().unwrap_or_default();
            return Err(Error::Translation(format!("{model} returned {status}: {body}")));
        }

        let body = response.text()?;
        let result: ChatCompletionResponse = serde_json::from_str(&body)
            .map_err(|e| Error::Translation(format!("malformed response: {e}")))?;

        let content = result
            .choices
            .first()
            .map(|c| c.message.content.as_str())
            .ok_or_else(|| Error::Translation("response had no choices".to_string()))?;

        let translated = strip_quotes(content);
        if translated.is_empty() {
            // An empty translation would defeat the non-empty-text invariant
            // downstream; treat it like any other failure
            return Err(Error::Translation("empty translation".to_string()));
        }

        Ok(translated.to_string())
    }
}
