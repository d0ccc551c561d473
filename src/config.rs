//! Configuration for the synthesis pipeline
//!
//! Engine settings are an explicit value object passed into each call rather
//! than process-wide engine state, so independent call sites cannot clobber
//! each other's rate or volume.

use std::env;
use std::time::Duration;

/// Default Groq-compatible chat-completion endpoint
pub const DEFAULT_TRANSLATION_ENDPOINT: &str = "https://api.groq.com/openai/v1/chat/completions";

/// Default high-quality translation model
pub const DEFAULT_TRANSLATION_MODEL: &str = "llama-3.3-70b-versatile";

/// Default low-latency translation model, tried first
pub const DEFAULT_FAST_TRANSLATION_MODEL: &str = "llama-3.1-8b-instant";

/// Local engine settings applied per synthesis call
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Speech rate in words per minute
    pub rate: u32,

    /// Output volume, 0.0 to 1.0
    pub volume: f32,

    /// Explicit voice id; skips language-based selection when set
    pub voice: Option<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            // Slightly slower than engine defaults for clarity
            rate: 180,
            volume: 0.9,
            voice: None,
        }
    }
}

/// Remote translation service configuration
#[derive(Debug, Clone)]
pub struct TranslatorConfig {
    /// Bearer credential; translation is silently skipped when absent
    pub api_key: Option<String>,

    /// Chat-completion endpoint URL
    pub endpoint: String,

    /// High-quality model used after a fast-model failure
    pub model: String,

    /// Low-latency model tried first
    pub fast_model: String,

    /// Request timeout for the fast model
    pub fast_timeout: Duration,

    /// Request timeout for the fallback model
    pub fallback_timeout: Duration,
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            endpoint: DEFAULT_TRANSLATION_ENDPOINT.to_string(),
            model: DEFAULT_TRANSLATION_MODEL.to_string(),
            fast_model: DEFAULT_FAST_TRANSLATION_MODEL.to_string(),
            fast_timeout: Duration::from_secs(10),
            fallback_timeout: Duration::from_secs(15),
        }
    }
}

impl TranslatorConfig {
    /// Build a configuration from environment variables
    ///
    /// Reads `GROQ_API_KEY`, `GROQ_API_ENDPOINT`, `GROQ_MODEL_NAME`, and
    /// `GROQ_FAST_MODEL_NAME`, falling back to the crate defaults for any
    /// that are unset.
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            api_key: env::var("GROQ_API_KEY").ok().filter(|k| !k.is_empty()),
            endpoint: env::var("GROQ_API_ENDPOINT").unwrap_or(defaults.endpoint),
            model: env::var("GROQ_MODEL_NAME").unwrap_or(defaults.model),
            fast_model: env::var("GROQ_FAST_MODEL_NAME").unwrap_or(defaults.fast_model),
            fast_timeout: defaults.fast_timeout,
            fallback_timeout: defaults.fallback_timeout,
        }
    }
}
