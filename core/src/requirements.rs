use lazy_static::lazy_static;
use regex::Regex;

use crate::sentences::split_sentences;

pub const MAX_REQUIREMENTS: usize = 20;

lazy_static! {
    // Word stems that mark a hiring criterion: required/requirements, must,
    // experience, proficient/proficiency, skills, knowledge, responsibilities.
    static ref SIGNAL_RE: Regex =
        Regex::new(r"(?i)\b(require|must|experience|proficien|skill|knowledge|responsibil)").expect("valid regex");
}

/// Pull requirement sentences out of a job description, in order, keeping at
/// most [`MAX_REQUIREMENTS`].
pub fn extract_requirements(description: &str) -> Vec<String> {
    split_sentences(description)
        .into_iter()
        .filter(|s| SIGNAL_RE.is_match(s))
        .take(MAX_REQUIREMENTS)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_signal_sentences_in_order() {
        let jd = "We are a fintech startup. 5+ years experience with Rust required. \
                  Free snacks! Must know PostgreSQL.\nStrong communication skills.";
        assert_eq!(
            extract_requirements(jd),
            vec![
                "5+ years experience with Rust required.",
                "Must know PostgreSQL.",
                "Strong communication skills.",
            ]
        );
    }

    #[test]
    fn signals_anchor_at_word_start() {
        assert_eq!(extract_requirements("Proficiency in Go."), vec!["Proficiency in Go."]);
        // prefix match: "Mustard" counts, "Unrequired" does not
        assert_eq!(
            extract_requirements("Mustard lovers welcome? Unrequired."),
            vec!["Mustard lovers welcome?"]
        );
    }

    #[test]
    fn caps_at_twenty() {
        let jd = (0..30).map(|i| format!("Skill number {i}.")).collect::<Vec<_>>().join(" ");
        let reqs = extract_requirements(&jd);
        assert_eq!(reqs.len(), MAX_REQUIREMENTS);
        assert_eq!(reqs[0], "Skill number 0.");
        assert_eq!(reqs[19], "Skill number 19.");
    }

    #[test]
    fn empty_description() {
        assert!(extract_requirements("").is_empty());
    }
}
