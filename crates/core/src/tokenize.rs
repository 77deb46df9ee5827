//! Title tokenizing for provider search queries.
//!
//! Providers turn a free-text title into search terms before building a request.
//! The default tokenizer drops edition/format tags so that
//! `"Dune (Hardcover) [2010]"` searches for `Dune` only. Other punctuation stays
//! inside its token.

use std::sync::LazyLock;

use regex::Regex;

/// Splits a free-text title into search tokens.
pub trait TitleTokenizer: Send + Sync {
    fn tokens(&self, title: &str, strip_joiners: bool) -> Vec<String>;
}

static FORMAT_TAG_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)[({\[](\d{4}|omnibus|anthology|hardcover|audiobook|audio\scd|paperback|turtleback|mass\s*market|edition|ed\.)[\])}]",
    )
    .unwrap()
});

static EDITION_GROUP_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)[({\[].*?(edition|ed.).*?[\]})]").unwrap());

static NUMBER_SEPARATOR_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+),(\d+)").unwrap());

static SPACED_HYPHEN_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s-").unwrap());

const JOINERS: [&str; 4] = ["a", "and", "the", "&"];

/// The tokenizer used by the library's metadata providers.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultTitleTokenizer;

impl TitleTokenizer for DefaultTitleTokenizer {
    fn tokens(&self, title: &str, strip_joiners: bool) -> Vec<String> {
        let cleaned = FORMAT_TAG_PATTERN.replace_all(title, "");
        let cleaned = EDITION_GROUP_PATTERN.replace_all(&cleaned, "");
        let cleaned = NUMBER_SEPARATOR_PATTERN.replace_all(&cleaned, "${1}${2}");
        let cleaned = SPACED_HYPHEN_PATTERN.replace_all(&cleaned, " ");

        cleaned
            .split_whitespace()
            .map(|t| t.trim_matches('"').trim_matches('\''))
            .filter(|t| !t.is_empty())
            .filter(|t| !strip_joiners || !JOINERS.contains(&t.to_lowercase().as_str()))
            .map(String::from)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn tokens(title: &str, strip_joiners: bool) -> Vec<String> {
        DefaultTitleTokenizer.tokens(title, strip_joiners)
    }

    #[test]
    fn splits_on_whitespace() {
        assert_eq!(tokens("채식주의자 한강", false), vec!["채식주의자", "한강"]);
    }

    #[test]
    fn drops_format_and_year_tags() {
        assert_eq!(tokens("Dune (Hardcover) [2010]", false), vec!["Dune"]);
        assert_eq!(tokens("Dune {Omnibus}", false), vec!["Dune"]);
    }

    #[test]
    fn drops_edition_groups() {
        assert_eq!(tokens("Emma (Penguin Classics Edition) Austen", false), vec!["Emma", "Austen"]);
    }

    #[test]
    fn removes_number_separators() {
        assert_eq!(tokens("1,000 Places", false), vec!["1000", "Places"]);
    }

    #[test]
    fn keeps_punctuation_and_cjk_brackets() {
        assert_eq!(tokens("Title: Sub-title", false), vec!["Title:", "Sub-title"]);
        assert_eq!(tokens("Dr. Who", false), vec!["Dr.", "Who"]);
        assert_eq!(tokens("《소년이 온다》", false), vec!["《소년이", "온다》"]);
    }

    #[test]
    fn spaced_hyphen_becomes_space() {
        assert_eq!(tokens("Part one - two", false), vec!["Part", "one", "two"]);
    }

    #[test]
    fn trims_single_quotes() {
        assert_eq!(tokens("'quoted' word", false), vec!["quoted", "word"]);
    }

    #[test]
    fn joiners_kept_unless_stripped() {
        assert_eq!(tokens("The Lord and the Rings", false), vec!["The", "Lord", "and", "the", "Rings"]);
        assert_eq!(tokens("The Lord and the Rings", true), vec!["Lord", "Rings"]);
    }

    #[test]
    fn blank_title_yields_nothing() {
        assert!(tokens("   ", false).is_empty());
        assert!(tokens("", false).is_empty());
        assert!(tokens(" '' \"\" ", false).is_empty());
    }

    proptest! {
        #[test]
        fn tokens_are_never_empty_or_contain_whitespace(title in "\\PC{0,40}") {
            for t in tokens(&title, false) {
                prop_assert!(!t.is_empty());
                prop_assert!(!t.chars().any(char::is_whitespace));
            }
        }
    }
}
