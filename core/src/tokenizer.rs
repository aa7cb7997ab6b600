use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashSet;

lazy_static! {
    static ref WORD_RE: Regex = Regex::new(r"[A-Za-zА-Яа-я0-9_]+").expect("valid regex");
    static ref NON_WORD_RE: Regex = Regex::new(r"[^A-Za-z0-9_]+").expect("valid regex");
    static ref STOPWORDS: HashSet<&'static str> = {
        let words: &[&str] = &[
            "about","above","after","again","all","also","am","an","and","another","any","are","as","at",
            "be","because","been","before","being","between","both","but","by",
            "came","can","come","could",
            "did","do","does","doing","down","during",
            "each","few","for","from","further",
            "get","got","had","has","have","having","he","her","here","hers","herself","him","himself","his","how",
            "if","in","into","is","it","its","itself",
            "like","make","many","me","might","more","most","much","must","my","myself",
            "never","no","nor","not","now","of","off","on","once","only","or","other","our","ours","ourselves","out","over","own",
            "said","same","see","she","should","since","so","some","still","such",
            "take","than","that","the","their","theirs","them","themselves","then","there","these","they","this","those","through","to","too",
            "under","until","up","very",
            "was","way","we","well","were","what","when","where","which","while","who","whom","why","with","would",
            "you","your","yours","yourself","yourselves"
        ];
        words.iter().copied().collect()
    };
}

fn is_stopword(token: &str) -> bool {
    token.chars().count() < 2 || STOPWORDS.contains(token)
}

/// Tokenize text for term weighting: lowercase word runs with stopwords and
/// single characters removed. Order and repetitions are kept.
///
/// Word characters are ASCII letters, digits, `_` and the basic Cyrillic
/// alphabet; anything else (accented Latin letters included) splits a word.
pub fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    WORD_RE
        .find_iter(&lowered)
        .map(|m| m.as_str())
        .filter(|t| !is_stopword(t))
        .map(str::to_string)
        .collect()
}

/// Keywords of a requirement sentence: ASCII word pieces, lowercased, longer
/// than three characters.
pub fn requirement_keywords(requirement: &str) -> Vec<String> {
    NON_WORD_RE
        .split(requirement)
        .map(str::to_lowercase)
        .filter(|w| w.len() > 3)
        .collect()
}

/// Query tokens for the ask path: whitespace split, lowercased, verbatim.
pub fn query_terms(query: &str) -> Vec<String> {
    query.split_whitespace().map(str::to_lowercase).collect()
}

/// Query tokens stripped of non-word characters, used to pick evidence
/// snippets. Tokens that strip down to nothing are dropped.
pub fn stripped_query_terms(query: &str) -> Vec<String> {
    query
        .split_whitespace()
        .map(|t| NON_WORD_RE.replace_all(t, "").to_lowercase())
        .filter(|t| !t.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokenize_drops_stopwords_and_punctuation() {
        let t = tokenize("The React, and Node.js developer!");
        assert_eq!(t, vec!["react", "node", "js", "developer"]);
    }

    #[test]
    fn tokenize_splits_on_accented_letters_keeps_cyrillic() {
        assert_eq!(tokenize("Café au lait"), vec!["caf", "au", "lait"]);
        assert_eq!(tokenize("Привет мир"), vec!["привет", "мир"]);
    }

    #[test]
    fn requirement_keywords_keep_long_words() {
        let k = requirement_keywords("must know Node.js");
        assert_eq!(k, vec!["must", "know", "node"]);
    }

    #[test]
    fn stripped_terms_remove_symbols() {
        assert_eq!(stripped_query_terms("C++ react! ???"), vec!["c", "react"]);
    }
}
