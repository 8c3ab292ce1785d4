use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

/// Short Russian function words that survive the length filter but carry no
/// topical signal.
const STOP_WORDS: &[&str] = &["этой", "его", "она", "они", "это", "или", "для"];

const MIN_KEYWORD_CHARS: usize = 4;

static PARENTHESIZED: Lazy<Regex> = Lazy::new(|| Regex::new(r"\([^)]*\)").unwrap());

/// Reduce free text to its set of significant words: parentheticals are
/// treated as incidental and dropped, punctuation becomes whitespace, and the
/// remaining tokens are kept lowercased when long enough and not stop words.
pub fn keywords_from_text(text: &str) -> HashSet<String> {
    let text = PARENTHESIZED.replace_all(text, "");
    let cleaned: String = text
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '_' { c } else { ' ' })
        .collect();

    cleaned
        .split_whitespace()
        .filter(|word| word.chars().count() >= MIN_KEYWORD_CHARS)
        .map(|word| word.to_lowercase())
        .filter(|word| !STOP_WORDS.contains(&word.as_str()))
        .collect()
}

/// A topic's keyword set is the union over its title and every subtopic line.
pub fn topic_keywords(title: &str, subtopics: &[String]) -> HashSet<String> {
    let mut keywords = keywords_from_text(title);
    for subtopic in subtopics {
        keywords.extend(keywords_from_text(subtopic));
    }
    keywords
}
