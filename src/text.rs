//! Text sanitization ahead of translation and synthesis
//!
//! Speech engines read emoji aloud by code point name, so anything in the
//! pictograph blocks is stripped before text reaches a backend.

/// Returns true for code points in the emoji and pictograph blocks
fn is_emoji(c: char) -> bool {
    matches!(
        c,
        '\u{1F600}'..='\u{1F64F}'   // emoticons
        | '\u{1F300}'..='\u{1F5FF}' // symbols & pictographs
        | '\u{1F680}'..='\u{1F6FF}' // transport & map symbols
        | '\u{1F1E6}'..='\u{1F1FF}' // regional indicators (flag pairs)
        | '\u{1F900}'..='\u{1F9FF}' // supplemental symbols & pictographs
        | '\u{1FA00}'..='\u{1FA6F}' // chess symbols
        | '\u{1FA70}'..='\u{1FAFF}' // symbols & pictographs extended-A
        | '\u{2600}'..='\u{26FF}'   // miscellaneous symbols
        | '\u{2700}'..='\u{27BF}'   // dingbats
        | '\u{24C2}'..='\u{24FF}'   // enclosed alphanumerics
        | '\u{1F000}'..='\u{1F2FF}' // enclosed ideographic / playing cards
    )
}

/// Strip emoji and collapse whitespace
///
/// Pure and idempotent; applying it to already-sanitized text is a no-op.
#[must_use]
pub fn sanitize(text: &str) -> String {
    let stripped: String = text.chars().filter(|c| !is_emoji(*c)).collect();

    let mut out = String::with_capacity(stripped.len());
    for word in stripped.split_whitespace() {
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(word);
    }
    out
}
