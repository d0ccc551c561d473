//! Advisory prosody hints
//!
//! Neither backend consumes these yet; they are computed for callers that
//! forward them to a prosody-capable engine.

/// Pitch and speed adjustments for a requested tone
#[derive(Debug, Clone, PartialEq)]
pub struct ProsodyHint {
    /// Tone label, echoed from the request
    pub tone: String,

    /// Relative pitch adjustment, 0.0 is neutral
    pub pitch: f32,

    /// Speed multiplier, 1.0 is neutral
    pub speed: f32,
}

/// Base adjustments per tone label
const TONE_TABLE: &[(&str, f32, f32)] = &[
    ("neutral", 0.0, 1.0),
    ("educational", -0.05, 0.95),
    ("cheerful", 0.1, 1.05),
    ("calm", -0.1, 0.9),
    ("storytelling", 0.05, 0.9),
];

/// Languages spoken slightly slower for clarity
const SLOWED_LANGUAGES: &[&str] = &["ar", "hi", "zh", "ja"];

/// Derive a prosody hint from language and tone
///
/// Unknown tone labels are echoed back with neutral adjustments. The text
/// argument is accepted for future content-aware tuning and is currently
/// unused.
#[must_use]
pub fn prosody_hint(_text: &str, language: &str, tone: &str) -> ProsodyHint {
    let tone_lower = tone.to_lowercase();

    let (pitch, mut speed) = TONE_TABLE
        .iter()
        .find(|(label, _, _)| *label == tone_lower)
        .map_or((0.0, 1.0), |(_, pitch, speed)| (*pitch, *speed));

    if SLOWED_LANGUAGES.contains(&language.to_lowercase().as_str()) {
        speed -= 0.05;
    }

    ProsodyHint {
        tone: tone.to_string(),
        pitch,
        speed,
    }
}
