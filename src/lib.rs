//! Vaani TTS - text-to-speech pipeline with cloud and local backends
//!
//! A thin, synchronous layer over two synthesis backends plus an optional
//! machine-translation pre-pass:
//! - Cloud backend (Google Translate TTS, MP3 stream)
//! - Local engine (espeak-ng, WAV output or direct playback)
//! - Best-effort translation via a Groq-compatible chat-completion API
//!
//! # Pipeline
//!
//! ```text
//! text + language
//!       │
//!   sanitize (strip emoji, collapse whitespace)
//!       │
//!   translate (optional, best-effort, never fatal)
//!       │
//!   cloud backend ──failure──▶ local engine (voice selected by language)
//!       │                            │
//!     MP3 bytes                  WAV bytes
//! ```
//!
//! All calls are blocking. The local engine is a shared, stateful resource;
//! concurrent callers must serialize access to one [`Synthesizer`].

pub mod cloud;
pub mod config;
pub mod engine;
pub mod error;
pub mod prosody;
pub mod synth;
pub mod text;
pub mod translate;
pub mod voice;

pub use cloud::{CloudTts, GoogleTts};
pub use config::{EngineConfig, TranslatorConfig};
pub use engine::{EspeakEngine, LocalEngine};
pub use error::{Error, Result};
pub use prosody::{ProsodyHint, prosody_hint};
pub use synth::{SynthesisRequest, Synthesizer, audio_extension};
pub use text::sanitize;
pub use translate::Translator;
pub use voice::{Voice, select_voice};
