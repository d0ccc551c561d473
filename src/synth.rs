//! Synthesis dispatch
//!
//! Routes sanitized (and possibly translated) text to the cloud backend,
//! falling back to the local engine on any cloud failure. Exactly one of
//! cloud bytes, local bytes, or an error comes out of each call.

use std::fs;
use std::path::{Path, PathBuf};

use crate::cloud::{CloudTts, GoogleTts};
use crate::config::EngineConfig;
use crate::engine::{EspeakEngine, LocalEngine};
use crate::text::sanitize;
use crate::translate::Translator;
use crate::voice::select_voice;
use crate::{Error, Result};

/// File extension matching an audio buffer's actual format
///
/// The buffer format is backend-dependent and a cloud failure silently
/// swaps backends mid-call, so callers naming a file must look at the
/// bytes: the local engine emits RIFF/WAV, the cloud backend MP3.
#[must_use]
pub fn audio_extension(audio: &[u8]) -> &'static str {
    if audio.starts_with(b"RIFF") {
        "wav"
    } else {
        "mp3"
    }
}

/// One synthesis request, immutable for the duration of a call
#[derive(Debug, Clone)]
pub struct SynthesisRequest {
    /// Text to synthesize
    pub text: String,

    /// Target language code (e.g. "en", "ar")
    pub language: String,

    /// Try the cloud backend first
    pub prefer_cloud: bool,

    /// Run the best-effort translation pre-pass
    pub translate: bool,
}

impl SynthesisRequest {
    /// Request with the default language ("en"), cloud preference, and
    /// translation enabled
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            language: "en".to_string(),
            prefer_cloud: true,
            translate: true,
        }
    }
}

/// Outcome of the cloud attempt
///
/// An explicit variant rather than caught-exception flow, so the fallback
/// is a visible branch.
enum CloudOutcome {
    Audio(Vec<u8>),
    Fallback,
}

/// Dispatches synthesis requests across the cloud and local backends
pub struct Synthesizer {
    engine: Box<dyn LocalEngine>,
    cloud: Box<dyn CloudTts>,
    translator: Translator,
    config: EngineConfig,
}

impl Synthesizer {
    /// Create a dispatcher over explicit backends
    #[must_use]
    pub fn new(
        engine: Box<dyn LocalEngine>,
        cloud: Box<dyn CloudTts>,
        translator: Translator,
        config: EngineConfig,
    ) -> Self {
        Self {
            engine,
            cloud,
            translator,
            config,
        }
    }

    /// Create a dispatcher with the default backends: espeak-ng locally,
    /// Google TTS in the cloud, translator configured from the environment
    ///
    /// # Errors
    ///
    /// Returns [`Error::EngineUnavailable`] if no local engine is installed.
    pub fn from_env() -> Result<Self> {
        Ok(Self::new(
            Box::new(EspeakEngine::new()?),
            Box::new(GoogleTts::new()),
            Translator::from_env(),
            EngineConfig::default(),
        ))
    }

    /// Synthesize a request into audio bytes
    ///
    /// Cloud output is in the service's native encoding (MP3 for Google);
    /// local output is WAV. A cloud failure falls back to the local engine
    /// once; local failures after that propagate.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] for empty text,
    /// [`Error::EngineUnavailable`] when the local path is needed and no
    /// voices exist, and [`Error::SynthesisFailed`] for zero-byte output.
    pub fn synthesize(&self, request: &SynthesisRequest) -> Result<Vec<u8>> {
        if request.text.trim().is_empty() {
            return Err(Error::InvalidInput("text is required".to_string()));
        }

        // Text must be non-empty at the point a backend is called, not just
        // on entry; emoji-only input sanitizes down to nothing
        let mut text = sanitize(&request.text);
        if text.is_empty() {
            return Err(Error::InvalidInput(
                "no speakable text after sanitization".to_string(),
            ));
        }

        if request.translate && !request.language.eq_ignore_ascii_case("en") {
            text = self.translator.translate(&text, &request.language);
        }

        if request.prefer_cloud {
            match self.try_cloud(&text, &request.language) {
                CloudOutcome::Audio(bytes) => return Ok(bytes),
                CloudOutcome::Fallback => {}
            }
        }

        self.synthesize_local(&text, &request.language)
    }

    /// Synthesize to a `.wav` file, returning the path written
    ///
    /// A unique `tts_<uuid>.wav` name is generated when `path` is `None`;
    /// a supplied path gets a `.wav` suffix appended if missing. Always
    /// uses the local engine.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] for empty text and
    /// [`Error::SynthesisFailed`] when the engine writes nothing; an empty
    /// output file is removed before the error is returned.
    pub fn synthesize_to_file(
        &self,
        text: &str,
        language: &str,
        path: Option<&Path>,
    ) -> Result<PathBuf> {
        if text.trim().is_empty() {
            return Err(Error::InvalidInput("text is required".to_string()));
        }

        let text = sanitize(text);
        if text.is_empty() {
            return Err(Error::InvalidInput(
                "no speakable text after sanitization".to_string(),
            ));
        }

        let path = match path {
            Some(p) if p.extension().is_some_and(|e| e == "wav") => p.to_path_buf(),
            Some(p) => {
                let mut name = p.as_os_str().to_os_string();
                name.push(".wav");
                PathBuf::from(name)
            }
            None => PathBuf::from(format!("tts_{}.wav", uuid::Uuid::new_v4())),
        };

        let voice_id = self.pick_voice(language)?;
        self.engine
            .synthesize_to_file(&text, &voice_id, &self.config, &path)?;

        match fs::metadata(&path) {
            Ok(meta) if meta.len() > 0 => Ok(path),
            Ok(_) => {
                fs::remove_file(&path).ok();
                Err(Error::SynthesisFailed(
                    "audio generation produced an empty file".to_string(),
                ))
            }
            Err(_) => Err(Error::SynthesisFailed(
                "audio generation failed, file not created".to_string(),
            )),
        }
    }

    /// Speak text immediately through the sound system, blocking until
    /// playback completes
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] for empty text and
    /// [`Error::EngineUnavailable`] when no engine or voice is present.
    pub fn speak(&self, text: &str) -> Result<()> {
        if text.trim().is_empty() {
            return Err(Error::InvalidInput("text is required".to_string()));
        }

        let text = sanitize(text);
        if text.is_empty() {
            return Err(Error::InvalidInput(
                "no speakable text after sanitization".to_string(),
            ));
        }

        let voice_id = self.pick_voice("en")?;
        self.engine.speak(&text, &voice_id, &self.config)
    }

    /// Cloud attempt mapped to an explicit outcome
    fn try_cloud(&self, text: &str, language: &str) -> CloudOutcome {
        match self.cloud.synthesize(text, language) {
            Ok(bytes) => CloudOutcome::Audio(bytes),
            Err(e) => {
                tracing::warn!(error = %e, "cloud TTS failed, falling back to local engine");
                CloudOutcome::Fallback
            }
        }
    }

    /// Resolve the voice id for a language, honoring an explicit override
    fn pick_voice(&self, language: &str) -> Result<String> {
        if let Some(voice) = &self.config.voice {
            return Ok(voice.clone());
        }

        let voices = self.engine.voices()?;
        Ok(select_voice(&voices, language)?.id.clone())
    }

    /// Local path: synthesize into a scoped temp file and read it back
    ///
    /// The temp file is deleted on every exit path, including errors.
    fn synthesize_local(&self, text: &str, language: &str) -> Result<Vec<u8>> {
        let voice_id = self.pick_voice(language)?;

        let temp = tempfile::Builder::new()
            .prefix("vaani_tts_")
            .suffix(".wav")
            .tempfile()?;

        self.engine
            .synthesize_to_file(text, &voice_id, &self.config, temp.path())?;

        let audio = fs::read(temp.path())?;
        if audio.is_empty() {
            return Err(Error::SynthesisFailed(
                "local engine produced an empty file".to_string(),
            ));
        }

        Ok(audio)
    }
}
