//! Local synthesis engine
//!
//! The local backend shells out to espeak-ng (or espeak), the ubiquitous
//! on-device synthesizer. It is a single shared, stateful resource: callers
//! needing concurrent synthesis must serialize access themselves.

use std::path::Path;
use std::process::Command;

use crate::config::EngineConfig;
use crate::voice::Voice;
use crate::{Error, Result};

/// A local text-to-speech engine
///
/// Abstracts the installed engine so the dispatcher can be exercised
/// without audio hardware.
pub trait LocalEngine {
    /// Enumerate installed voices, in engine order
    ///
    /// # Errors
    ///
    /// Returns error if the engine cannot be queried.
    fn voices(&self) -> Result<Vec<Voice>>;

    /// Synthesize text into a WAV file at `path`
    ///
    /// # Errors
    ///
    /// Returns error if the engine invocation fails.
    fn synthesize_to_file(
        &self,
        text: &str,
        voice_id: &str,
        config: &EngineConfig,
        path: &Path,
    ) -> Result<()>;

    /// Speak text through the host's sound system, blocking until playback
    /// completes
    ///
    /// # Errors
    ///
    /// Returns error if the engine invocation fails.
    fn speak(&self, text: &str, voice_id: &str, config: &EngineConfig) -> Result<()>;
}

/// espeak-ng backed local engine
pub struct EspeakEngine {
    binary: std::path::PathBuf,
}

impl EspeakEngine {
    /// Locate espeak-ng (or espeak) on `PATH`
    ///
    /// # Errors
    ///
    /// Returns [`Error::EngineUnavailable`] if neither binary is installed.
    pub fn new() -> Result<Self> {
        let binary = which::which("espeak-ng")
            .or_else(|_| which::which("espeak"))
            .map_err(|_| {
                Error::EngineUnavailable(
                    "no local engine found on PATH (tried: espeak-ng, espeak)".to_string(),
                )
            })?;

        tracing::debug!(binary = %binary.display(), "local engine found");
        Ok(Self { binary })
    }

    fn base_command(&self, voice_id: &str, config: &EngineConfig) -> Command {
        let mut cmd = Command::new(&self.binary);
        cmd.arg("-v")
            .arg(voice_id)
            .arg("-s")
            .arg(config.rate.to_string())
            .arg("-a")
            .arg(amplitude(config.volume).to_string());
        cmd
    }
}

/// Map a 0.0–1.0 volume to espeak's amplitude scale (100 = default)
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn amplitude(volume: f32) -> u32 {
    (f64::from(volume.clamp(0.0, 1.0)) * 100.0).round() as u32
}

/// Parse `espeak-ng --voices` output into voice descriptors
///
/// Columns are `Pty Language Age/Gender VoiceName File [Other Languages]`;
/// the file column is the id accepted by `-v`.
fn parse_voices(output: &str) -> Vec<Voice> {
    output
        .lines()
        .skip(1)
        .filter_map(|line| {
            let fields: Vec<&str> = line.split_whitespace().collect();
            if fields.len() < 5 {
                return None;
            }
            Some(Voice {
                id: fields[4].to_string(),
                name: fields[3].to_string(),
            })
        })
        .collect()
}

impl LocalEngine for EspeakEngine {
    fn voices(&self) -> Result<Vec<Voice>> {
        let output = Command::new(&self.binary).arg("--voices").output()?;

        if !output.status.success() {
            return Err(Error::EngineUnavailable(format!(
                "voice enumeration failed: {}",
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        Ok(parse_voices(&String::from_utf8_lossy(&output.stdout)))
    }

    fn synthesize_to_file(
        &self,
        text: &str,
        voice_id: &str,
        config: &EngineConfig,
        path: &Path,
    ) -> Result<()> {
        let output = self
            .base_command(voice_id, config)
            .arg("-w")
            .arg(path)
            .arg(text)
            .output()?;

        if !output.status.success() {
            return Err(Error::SynthesisFailed(format!(
                "engine exited with {}: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        Ok(())
    }

    fn speak(&self, text: &str, voice_id: &str, config: &EngineConfig) -> Result<()> {
        // No -w flag: espeak plays through the sound system and blocks
        // until playback completes
        let output = self.base_command(voice_id, config).arg(text).output()?;

        if !output.status.success() {
            return Err(Error::SynthesisFailed(format!(
                "engine exited with {}: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        Ok(())
    }
}
