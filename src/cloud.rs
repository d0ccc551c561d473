//! Cloud text-to-speech backend

use std::time::Duration;

use crate::{Error, Result};

/// Endpoint serving the unauthenticated Google Translate TTS stream
const GOOGLE_TTS_URL: &str = "https://translate.google.com/translate_tts";

/// Request timeout for the cloud backend
const CLOUD_TIMEOUT: Duration = Duration::from_secs(10);

/// A remote text-to-speech service
///
/// Failures here are never fatal to a synthesis call: the dispatcher falls
/// back to the local engine.
pub trait CloudTts {
    /// Synthesize text in the given language
    ///
    /// Returns audio bytes in the service's native encoding (MP3 for the
    /// Google backend); the format is not normalized by this layer.
    ///
    /// # Errors
    ///
    /// Returns error on any transport or service failure.
    fn synthesize(&self, text: &str, language: &str) -> Result<Vec<u8>>;
}

/// Google Translate TTS backend (MP3 output)
pub struct GoogleTts {
    client: reqwest::blocking::Client,
}

impl GoogleTts {
    /// Create a new Google TTS backend
    #[must_use]
    pub fn new() -> Self {
        Self {
            client: reqwest::blocking::Client::new(),
        }
    }
}

impl Default for GoogleTts {
    fn default() -> Self {
        Self::new()
    }
}

impl CloudTts for GoogleTts {
    fn synthesize(&self, text: &str, language: &str) -> Result<Vec<u8>> {
        let url = format!(
            "{GOOGLE_TTS_URL}?ie=UTF-8&client=tw-ob&tl={}&q={}",
            urlencoding::encode(&language.to_lowercase()),
            urlencoding::encode(text)
        );

        let response = self.client.get(&url).timeout(CLOUD_TIMEOUT).send()?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(Error::SynthesisFailed(format!(
                "cloud TTS returned {status}"
            )));
        }

        let audio = response.bytes()?;
        if audio.is_empty() {
            return Err(Error::SynthesisFailed(
                "cloud TTS returned an empty stream".to_string(),
            ));
        }

        Ok(audio.to_vec())
    }
}
