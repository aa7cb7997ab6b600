use lazy_static::lazy_static;
use regex::Regex;

/// Bullet glyph as it appears after a UTF-8 -> Windows-1252 round trip in
/// extracted resume text.
const MOJIBAKE_BULLET: &str = "\u{e2}\u{20ac}\u{a2}";

lazy_static! {
    // Either terminal punctuation followed by whitespace, or a newline run.
    static ref BOUNDARY_RE: Regex = Regex::new(r"[.?!]\s+|\n+").expect("valid regex");
}

/// Split raw text into trimmed sentence/line snippets.
///
/// Text breaks after `.`, `?` or `!` when followed by whitespace (the mark
/// stays with the preceding sentence) and on every run of newlines. Empty
/// pieces are dropped, so the result never holds blank entries.
pub fn split_sentences(text: &str) -> Vec<String> {
    if text.is_empty() {
        return Vec::new();
    }
    let normalized = text.replace("\r\n", "\n").replace(MOJIBAKE_BULLET, "\n-");

    let mut pieces = Vec::new();
    let mut start = 0;
    for m in BOUNDARY_RE.find_iter(&normalized) {
        let end = if m.as_str().starts_with(|c: char| matches!(c, '.' | '?' | '!')) { m.start() + 1 } else { m.start() };
        pieces.push(&normalized[start..end]);
        start = m.end();
    }
    pieces.push(&normalized[start..]);

    pieces
        .into_iter()
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect()
}
