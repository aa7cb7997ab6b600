//! PII scrubbing for non-privileged viewers.
//!
//! Passes run in a fixed order: email, phone, SSN, then personal names. The
//! structured patterns must go first: their placeholders are upper-case with
//! underscores, which the capitalized-word name pass never matches.
//!
//! The name pass is deliberately literal: any run of one or two capitalized
//! words (e.g. "New York", "Machine Learning") is treated as a name.
//! Word boundaries are ASCII-only, so an accented letter ends a word: the
//! ASCII stem of "José" is still caught.

use lazy_static::lazy_static;
use regex::{Captures, Regex};

pub const EMAIL_PLACEHOLDER: &str = "[REDACTED_EMAIL]";
pub const PHONE_PLACEHOLDER: &str = "[REDACTED_PHONE]";
pub const SSN_PLACEHOLDER: &str = "[REDACTED_SSN]";
pub const NAME_PLACEHOLDER: &str = "[REDACTED_NAME]";

lazy_static! {
    static ref EMAIL_RE: Regex =
        Regex::new(r"(?i)[A-Z0-9._%+-]+@[A-Z0-9.-]+\.[A-Z]{2,}").expect("valid regex");
    static ref PHONE_RE: Regex =
        Regex::new(r"(\+?[0-9]{1,3}[-.\s]?)?(\(?[0-9]{3}\)?[-.\s]?)?[0-9]{3}[-.\s]?[0-9]{4}").expect("valid regex");
    static ref SSN_RE: Regex = Regex::new(r"(?-u:\b)[0-9]{3}-[0-9]{2}-[0-9]{4}(?-u:\b)").expect("valid regex");
    static ref NAME_RE: Regex =
        Regex::new(r"(?-u:\b)([A-Z][a-z]+(?:\s+[A-Z][a-z]+){0,2})(?-u:\b)").expect("valid regex");
}

/// Redact personal information from `text` unless the caller is privileged.
pub fn redact(text: &str, privileged: bool) -> String {
    if text.is_empty() {
        return String::new();
    }
    if privileged {
        return text.to_string();
    }
    let t = EMAIL_RE.replace_all(text, EMAIL_PLACEHOLDER);
    let t = PHONE_RE.replace_all(&t, PHONE_PLACEHOLDER);
    let t = SSN_RE.replace_all(&t, SSN_PLACEHOLDER);
    let t = NAME_RE.replace_all(&t, |caps: &Captures| {
        let m = &caps[0];
        if m.len() > 2 && m.split(' ').count() <= 2 {
            NAME_PLACEHOLDER.to_string()
        } else {
            m.to_string()
        }
    });
    t.into_owned()
}
