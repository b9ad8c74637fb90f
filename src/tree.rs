use regex::{Regex, RegexBuilder};

use crate::error::Result;

// JSON Pointer token escape (~0, ~1)
pub fn escape_pointer_token(raw: &str) -> String {
    if !raw.contains('~') && !raw.contains('/') {
        return raw.to_string();
    }
    raw.replace('~', "~0").replace('/', "~1")
}

/// Pointer to the child `token` of the node at `parent`. The root pointer is "".
pub fn child_pointer(parent: &str, token: &str) -> String {
    format!("{}/{}", parent, escape_pointer_token(token))
}

/// Decides which object keys count as a match.
///
/// `Exact` is what a plain key search uses; the other modes mirror the
/// options of an interactive key filter.
#[derive(Debug, Clone)]
pub enum KeyMatcher {
    /// Byte-for-byte equality.
    Exact(String),
    /// Equality after lowercasing both sides. Holds the lowercased query.
    IgnoreCase(String),
    /// The words of `word` appear, in order and adjacent, among the
    /// alphanumeric words of the key.
    WholeWord { word: String, words: Vec<String>, ignore_case: bool },
    /// The key matches the expression anywhere.
    Regex(Regex),
}

impl KeyMatcher {
    pub fn exact(key: impl Into<String>) -> Self {
        KeyMatcher::Exact(key.into())
    }

    pub fn ignore_case(key: &str) -> Self {
        KeyMatcher::IgnoreCase(key.to_lowercase())
    }

    pub fn whole_word(word: &str, ignore_case: bool) -> Self {
        let word = if ignore_case { word.to_lowercase() } else { word.to_string() };
        let words = split_words(&word).map(str::to_string).collect();
        KeyMatcher::WholeWord { word, words, ignore_case }
    }

    pub fn regex(pattern: &str, ignore_case: bool) -> Result<Self> {
        let re = RegexBuilder::new(pattern)
            .case_insensitive(ignore_case)
            .build()?;
        Ok(KeyMatcher::Regex(re))
    }

    pub fn matches(&self, key: &str) -> bool {
        match self {
            KeyMatcher::Exact(target) => key == target,
            KeyMatcher::IgnoreCase(target) => key.to_lowercase() == *target,
            KeyMatcher::WholeWord { word, words, ignore_case } => {
                let key = if *ignore_case { key.to_lowercase() } else { key.to_string() };
                // A query with no alphanumerics (e.g. "" or "_") can only match itself.
                if words.is_empty() {
                    return key == *word;
                }
                text_has_words(&key, words)
            }
            KeyMatcher::Regex(re) => re.is_match(key),
        }
    }

    /// The query this matcher was built from, for log lines.
    pub fn describe(&self) -> &str {
        match self {
            KeyMatcher::Exact(target) | KeyMatcher::IgnoreCase(target) => target,
            KeyMatcher::WholeWord { word, .. } => word,
            KeyMatcher::Regex(re) => re.as_str(),
        }
    }
}

impl Default for KeyMatcher {
    fn default() -> Self {
        KeyMatcher::Exact(String::new())
    }
}

fn split_words(text: &str) -> impl Iterator<Item = &str> {
    text.split(|c: char| !c.is_alphanumeric()).filter(|w| !w.is_empty())
}

// Text and words should already be case-normalized if needed. `words` is non-empty.
fn text_has_words(text: &str, words: &[String]) -> bool {
    let text_words: Vec<&str> = split_words(text).collect();
    text_words
        .windows(words.len())
        .any(|window| window.iter().zip(words).all(|(a, b)| *a == b.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_pointer_token() {
        assert_eq!(escape_pointer_token("plain"), "plain");
        assert_eq!(escape_pointer_token("a/b"), "a~1b");
        assert_eq!(escape_pointer_token("m~n"), "m~0n");
        assert_eq!(escape_pointer_token("~/"), "~0~1");
        assert_eq!(escape_pointer_token(""), "");
    }

    #[test]
    fn test_child_pointer() {
        assert_eq!(child_pointer("", "response"), "/response");
        assert_eq!(child_pointer("/response", "0"), "/response/0");
        assert_eq!(child_pointer("", ""), "/");
        assert_eq!(child_pointer("/a", "x/y"), "/a/x~1y");
    }

    #[test]
    fn test_exact_matcher() {
        let m = KeyMatcher::exact("issueSummary");
        assert!(m.matches("issueSummary"));
        assert!(!m.matches("issuesummary"));
        assert!(!m.matches("issueSummary2"));
    }

    #[test]
    fn test_empty_key_is_ordinary() {
        let m = KeyMatcher::exact("");
        assert!(m.matches(""));
        assert!(!m.matches("a"));
    }

    #[test]
    fn test_ignore_case_matcher() {
        let m = KeyMatcher::ignore_case("IssueSummary");
        assert!(m.matches("issuesummary"));
        assert!(m.matches("ISSUESUMMARY"));
        assert!(!m.matches("issue_summary"));
    }

    #[test]
    fn test_whole_word_matcher() {
        let m = KeyMatcher::whole_word("token", false);
        assert!(m.matches("access_token"));
        assert!(m.matches("token"));
        assert!(!m.matches("tokens"));
        assert!(!m.matches("access_TOKEN"));

        let m = KeyMatcher::whole_word("TOKEN", true);
        assert!(m.matches("refresh-token"));
    }

    #[test]
    fn test_whole_word_query_with_separators() {
        let m = KeyMatcher::whole_word("access_token", false);
        assert!(m.matches("access_token"));
        assert!(m.matches("access-token"));
        assert!(m.matches("oauth.access_token.value"));
        assert!(!m.matches("token_access"));
        assert!(!m.matches("access_refresh_token"));
        assert!(!m.matches("accesstoken"));

        let m = KeyMatcher::whole_word("Access-Token", true);
        assert!(m.matches("ACCESS_TOKEN"));
    }

    #[test]
    fn test_whole_word_query_without_words() {
        let m = KeyMatcher::whole_word("_", false);
        assert!(m.matches("_"));
        assert!(!m.matches("a_b"));

        let m = KeyMatcher::whole_word("", false);
        assert!(m.matches(""));
        assert!(!m.matches("key"));
    }

    #[test]
    fn test_regex_matcher() {
        let m = KeyMatcher::regex("^expires_", false).unwrap();
        assert!(m.matches("expires_in"));
        assert!(!m.matches("refreshtokenexpires_in"));

        let m = KeyMatcher::regex("^EXPIRES", true).unwrap();
        assert!(m.matches("expires_in"));
        assert_eq!(m.describe(), "^EXPIRES");
    }

    #[test]
    fn test_invalid_regex_is_error() {
        assert!(KeyMatcher::regex("[", false).is_err());
    }
}
