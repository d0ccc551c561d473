//! Synthesis pipeline integration tests
//!
//! Exercises the dispatcher against mock backends; no network, audio
//! hardware, or installed engine required.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use vaani_tts::{
    CloudTts, EngineConfig, Error, LocalEngine, Result, SynthesisRequest, Synthesizer, Translator,
    TranslatorConfig, Voice, audio_extension,
};

/// Shared record of what a fake backend was asked to do
#[derive(Default)]
struct CallLog {
    cloud_text: Option<String>,
    cloud_calls: u32,
    local_voice: Option<String>,
    local_path: Option<PathBuf>,
    spoken: Option<String>,
}

/// Cloud backend returning fixed bytes, or failing on demand
struct FakeCloud {
    audio: Option<Vec<u8>>,
    log: Arc<Mutex<CallLog>>,
}

impl CloudTts for FakeCloud {
    fn synthesize(&self, text: &str, _language: &str) -> Result<Vec<u8>> {
        let mut log = self.log.lock().unwrap();
        log.cloud_calls += 1;
        log.cloud_text = Some(text.to_string());

        self.audio.clone().ok_or_else(|| {
            Error::SynthesisFailed("cloud TTS returned 503".to_string())
        })
    }
}

/// Local engine writing fixed bytes to the requested file
struct FakeEngine {
    voices: Vec<Voice>,
    audio: Vec<u8>,
    log: Arc<Mutex<CallLog>>,
}

impl LocalEngine for FakeEngine {
    fn voices(&self) -> Result<Vec<Voice>> {
        Ok(self.voices.clone())
    }

    fn synthesize_to_file(
        &self,
        _text: &str,
        voice_id: &str,
        _config: &EngineConfig,
        path: &Path,
    ) -> Result<()> {
        let mut log = self.log.lock().unwrap();
        log.local_voice = Some(voice_id.to_string());
        log.local_path = Some(path.to_path_buf());

        std::fs::write(path, &self.audio)?;
        Ok(())
    }

    fn speak(&self, text: &str, _voice_id: &str, _config: &EngineConfig) -> Result<()> {
        self.log.lock().unwrap().spoken = Some(text.to_string());
        Ok(())
    }
}

fn voice(id: &str, name: &str) -> Voice {
    Voice {
        id: id.to_string(),
        name: name.to_string(),
    }
}

fn default_voices() -> Vec<Voice> {
    vec![
        voice("gmw/en-US", "English_(America)"),
        voice("semitic/ar", "Arabic"),
    ]
}

/// WAV-looking payload for the local engine
const LOCAL_WAV: &[u8] = b"RIFF....WAVEfmt fake local audio";

/// MP3-looking payload for the cloud backend
const CLOUD_MP3: &[u8] = b"\xff\xfb fake cloud audio";

fn synthesizer(
    cloud_audio: Option<Vec<u8>>,
    voices: Vec<Voice>,
    local_audio: Vec<u8>,
) -> (Synthesizer, Arc<Mutex<CallLog>>) {
    let log = Arc::new(Mutex::new(CallLog::default()));

    let synthesizer = Synthesizer::new(
        Box::new(FakeEngine {
            voices,
            audio: local_audio,
            log: Arc::clone(&log),
        }),
        Box::new(FakeCloud {
            audio: cloud_audio,
            log: Arc::clone(&log),
        }),
        Translator::new(TranslatorConfig::default()),
        EngineConfig::default(),
    );

    (synthesizer, log)
}

#[test]
fn test_empty_text_rejected_for_every_backend_combination() {
    let (synthesizer, _) = synthesizer(
        Some(CLOUD_MP3.to_vec()),
        default_voices(),
        LOCAL_WAV.to_vec(),
    );

    for (prefer_cloud, translate) in [(true, true), (true, false), (false, true), (false, false)] {
        let mut request = SynthesisRequest::new("   ");
        request.prefer_cloud = prefer_cloud;
        request.translate = translate;

        let err = synthesizer.synthesize(&request).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }
}

#[test]
fn test_emoji_only_text_never_reaches_a_backend() {
    let (synthesizer, log) = synthesizer(
        Some(CLOUD_MP3.to_vec()),
        default_voices(),
        LOCAL_WAV.to_vec(),
    );

    // Sanitization reduces this to ""; the call must fail up front rather
    // than hand an empty string to either backend
    let err = synthesizer
        .synthesize(&SynthesisRequest::new("🎉🎉🎉"))
        .unwrap_err();
    assert!(matches!(err, Error::InvalidInput(_)));

    let log = log.lock().unwrap();
    assert_eq!(log.cloud_calls, 0);
    assert!(log.cloud_text.is_none());
    assert!(log.local_path.is_none());
}

#[test]
fn test_emoji_only_text_rejected_on_file_and_speak_paths() {
    let (synthesizer, log) = synthesizer(None, default_voices(), LOCAL_WAV.to_vec());

    let err = synthesizer
        .synthesize_to_file("🚀 🚀", "en", None)
        .unwrap_err();
    assert!(matches!(err, Error::InvalidInput(_)));

    let err = synthesizer.speak("😀").unwrap_err();
    assert!(matches!(err, Error::InvalidInput(_)));

    let log = log.lock().unwrap();
    assert!(log.local_path.is_none());
    assert!(log.spoken.is_none());
}

#[test]
fn test_cloud_preferred_returns_cloud_bytes() {
    let (synthesizer, log) = synthesizer(
        Some(CLOUD_MP3.to_vec()),
        default_voices(),
        LOCAL_WAV.to_vec(),
    );

    let audio = synthesizer
        .synthesize(&SynthesisRequest::new("Hello world"))
        .unwrap();

    assert_eq!(audio, CLOUD_MP3);

    let log = log.lock().unwrap();
    assert_eq!(log.cloud_calls, 1);
    // Local engine never touched
    assert!(log.local_path.is_none());
}

#[test]
fn test_cloud_failure_falls_back_to_local() {
    let (synthesizer, log) = synthesizer(None, default_voices(), LOCAL_WAV.to_vec());

    let audio = synthesizer
        .synthesize(&SynthesisRequest::new("Hello world"))
        .unwrap();

    // Cloud error never propagates; local bytes come back instead
    assert_eq!(audio, LOCAL_WAV);

    let log = log.lock().unwrap();
    assert_eq!(log.cloud_calls, 1);
    assert!(log.local_path.is_some());
}

#[test]
fn test_temp_file_removed_after_local_synthesis() {
    let (synthesizer, log) = synthesizer(None, default_voices(), LOCAL_WAV.to_vec());

    synthesizer
        .synthesize(&SynthesisRequest::new("Hello world"))
        .unwrap();

    let path = log.lock().unwrap().local_path.clone().unwrap();
    assert!(path.extension().is_some_and(|e| e == "wav"));
    assert!(!path.exists());
}

#[test]
fn test_local_path_selects_voice_by_language() {
    let (synthesizer, log) = synthesizer(None, default_voices(), LOCAL_WAV.to_vec());

    let mut request = SynthesisRequest::new("ما هي الرياضيات؟");
    request.language = "ar".to_string();
    request.prefer_cloud = false;
    request.translate = false;

    let audio = synthesizer.synthesize(&request).unwrap();

    assert!(!audio.is_empty());
    let log = log.lock().unwrap();
    assert_eq!(log.cloud_calls, 0);
    assert_eq!(log.local_voice.as_deref(), Some("semitic/ar"));
}

#[test]
fn test_unmatched_language_uses_first_voice() {
    let (synthesizer, log) = synthesizer(None, default_voices(), LOCAL_WAV.to_vec());

    let mut request = SynthesisRequest::new("hello");
    request.language = "ko".to_string();
    request.prefer_cloud = false;
    request.translate = false;

    synthesizer.synthesize(&request).unwrap();

    assert_eq!(
        log.lock().unwrap().local_voice.as_deref(),
        Some("gmw/en-US")
    );
}

#[test]
fn test_zero_voices_is_engine_unavailable() {
    let (synthesizer, _) = synthesizer(None, Vec::new(), LOCAL_WAV.to_vec());

    let mut request = SynthesisRequest::new("hello");
    request.prefer_cloud = false;

    let err = synthesizer.synthesize(&request).unwrap_err();
    assert!(matches!(err, Error::EngineUnavailable(_)));
}

#[test]
fn test_zero_byte_local_output_is_synthesis_failed() {
    let (synthesizer, log) = synthesizer(None, default_voices(), Vec::new());

    let mut request = SynthesisRequest::new("hello");
    request.prefer_cloud = false;

    let err = synthesizer.synthesize(&request).unwrap_err();
    assert!(matches!(err, Error::SynthesisFailed(_)));

    // Scoped temp file is gone even on the failure path
    let path = log.lock().unwrap().local_path.clone().unwrap();
    assert!(!path.exists());
}

#[test]
fn test_text_sanitized_before_cloud_call() {
    let (synthesizer, log) = synthesizer(
        Some(CLOUD_MP3.to_vec()),
        default_voices(),
        LOCAL_WAV.to_vec(),
    );

    synthesizer
        .synthesize(&SynthesisRequest::new("Hello 😀  world 🚀"))
        .unwrap();

    assert_eq!(log.lock().unwrap().cloud_text.as_deref(), Some("Hello world"));
}

#[test]
fn test_synthesize_to_file_appends_wav_suffix() {
    let dir = tempfile::tempdir().unwrap();
    let (synthesizer, _) = synthesizer(None, default_voices(), LOCAL_WAV.to_vec());

    let requested = dir.path().join("greeting");
    let written = synthesizer
        .synthesize_to_file("Hello world", "en", Some(&requested))
        .unwrap();

    assert!(written.extension().is_some_and(|e| e == "wav"));
    assert!(written.exists());
    assert!(std::fs::metadata(&written).unwrap().len() > 0);
}

#[test]
fn test_synthesize_to_file_empty_output_removed() {
    let dir = tempfile::tempdir().unwrap();
    let (synthesizer, _) = synthesizer(None, default_voices(), Vec::new());

    let requested = dir.path().join("empty.wav");
    let err = synthesizer
        .synthesize_to_file("Hello", "en", Some(&requested))
        .unwrap_err();

    assert!(matches!(err, Error::SynthesisFailed(_)));
    assert!(!requested.exists());
}

#[test]
fn test_synthesize_to_file_rejects_empty_text() {
    let (synthesizer, _) = synthesizer(None, default_voices(), LOCAL_WAV.to_vec());

    let err = synthesizer.synthesize_to_file("", "en", None).unwrap_err();
    assert!(matches!(err, Error::InvalidInput(_)));
}

#[test]
fn test_speak_rejects_empty_text() {
    let (synthesizer, _) = synthesizer(None, default_voices(), LOCAL_WAV.to_vec());

    let err = synthesizer.speak("  ").unwrap_err();
    assert!(matches!(err, Error::InvalidInput(_)));
}

#[test]
fn test_speak_requires_a_voice() {
    let (synthesizer, _) = synthesizer(None, Vec::new(), LOCAL_WAV.to_vec());

    let err = synthesizer.speak("hello").unwrap_err();
    assert!(matches!(err, Error::EngineUnavailable(_)));
}

#[test]
fn test_speak_sanitizes_text() {
    let (synthesizer, log) = synthesizer(None, default_voices(), LOCAL_WAV.to_vec());

    synthesizer.speak("Welcome 🎉 to Vaani").unwrap();

    assert_eq!(
        log.lock().unwrap().spoken.as_deref(),
        Some("Welcome to Vaani")
    );
}

#[test]
fn test_audio_extension_tracks_producing_backend() {
    // Cloud bytes keep their MP3 shape
    let (cloud_first, _) = synthesizer(
        Some(CLOUD_MP3.to_vec()),
        default_voices(),
        LOCAL_WAV.to_vec(),
    );
    let audio = cloud_first
        .synthesize(&SynthesisRequest::new("Hello"))
        .unwrap();
    assert_eq!(audio_extension(&audio), "mp3");

    // After a fallback the same call yields WAV, and the extension follows
    let (fallback, _) = synthesizer(None, default_voices(), LOCAL_WAV.to_vec());
    let audio = fallback
        .synthesize(&SynthesisRequest::new("Hello"))
        .unwrap();
    assert_eq!(audio_extension(&audio), "wav");
}

#[test]
fn test_voice_override_skips_selection() {
    let log = Arc::new(Mutex::new(CallLog::default()));
    let config = EngineConfig {
        voice: Some("custom/voice".to_string()),
        ..EngineConfig::default()
    };

    let synthesizer = Synthesizer::new(
        Box::new(FakeEngine {
            voices: default_voices(),
            audio: LOCAL_WAV.to_vec(),
            log: Arc::clone(&log),
        }),
        Box::new(FakeCloud {
            audio: None,
            log: Arc::clone(&log),
        }),
        Translator::new(TranslatorConfig::default()),
        config,
    );

    let mut request = SynthesisRequest::new("hello");
    request.prefer_cloud = false;

    synthesizer.synthesize(&request).unwrap();
    assert_eq!(
        log.lock().unwrap().local_voice.as_deref(),
        Some("custom/voice")
    );
}
