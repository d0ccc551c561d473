//! Voice enumeration and language-based selection
//!
//! Selection is a fuzzy substring match against a static keyword table. The
//! table ordering and first-match-wins semantics are load-bearing: callers
//! depend on the same voice being picked for the same installed set.

use crate::{Error, Result};

/// An installed voice reported by the local engine
///
/// Enumerated at call time, never cached; installed voices can change
/// between calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Voice {
    /// Engine-specific identifier
    pub id: String,

    /// Human-readable display name
    pub name: String,
}

/// Keywords matched against voice names and ids, per language code
///
/// Keyword lists mix language names, representative voice names, and locale
/// tags; ordering within a list is significant.
const LANGUAGE_KEYWORDS: &[(&str, &[&str])] = &[
    ("en", &["english", "zira", "david", "mark", "en-us", "en_us", "en_gb"]),
    ("es", &["spanish", "helena", "sabina", "es-es", "es_es", "es-mx", "es_mx"]),
    ("fr", &["french", "hortense", "denis", "fr-fr", "fr_fr", "fr-ca", "fr_ca"]),
    ("de", &["german", "hedda", "stefan", "de-de", "de_de"]),
    ("it", &["italian", "elsa", "cosimo", "it-it", "it_it"]),
    ("pt", &["portuguese", "heloisa", "daniel", "pt-pt", "pt_pt", "pt-br", "pt_br"]),
    ("ru", &["russian", "irina", "pavel", "ru-ru", "ru_ru"]),
    ("zh", &["chinese", "huihui", "kangkang", "zh-cn", "zh_cn", "zh-tw", "zh_tw"]),
    ("ja", &["japanese", "haruka", "ichiro", "ja-jp", "ja_jp"]),
    ("ko", &["korean", "heami", "ko-kr", "ko_kr"]),
    ("hi", &["hindi", "kalpana", "hemant", "hi-in", "hi_in"]),
    ("ar", &["arabic", "hoda", "naayf", "ar-sa", "ar_sa", "ar-eg", "ar_eg"]),
];

/// Fallback keywords for unrecognized language codes
const DEFAULT_KEYWORDS: &[&str] = &["english", "zira", "en-us"];

/// Look up the keyword list for a language code (case-insensitive)
fn keywords_for(language: &str) -> &'static [&'static str] {
    let language = language.to_lowercase();
    LANGUAGE_KEYWORDS
        .iter()
        .find(|(code, _)| *code == language)
        .map_or(DEFAULT_KEYWORDS, |(_, keywords)| keywords)
}

/// Pick the voice matching a language code
///
/// Iterates voices in enumeration order and returns the first whose name or
/// id contains any keyword for the language; falls back to the first voice
/// when nothing matches or the code is unrecognized.
///
/// # Errors
///
/// Returns [`Error::EngineUnavailable`] when `voices` is empty.
pub fn select_voice<'a>(voices: &'a [Voice], language: &str) -> Result<&'a Voice> {
    let Some(first) = voices.first() else {
        return Err(Error::EngineUnavailable(
            "no voices installed".to_string(),
        ));
    };

    let keywords = keywords_for(language);

    for voice in voices {
        let name = voice.name.to_lowercase();
        let id = voice.id.to_lowercase();

        for keyword in keywords {
            if name.contains(keyword) || id.contains(keyword) {
                tracing::debug!(language, voice = %voice.name, "selected voice");
                return Ok(voice);
            }
        }
    }

    tracing::debug!(language, voice = %first.name, "no voice matched, using first");
    Ok(first)
}
