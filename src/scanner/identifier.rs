//! Season and title extraction from directory names.
//!
//! A season directory is usually named like `Show Name Season 2` or
//! `Show Name - Series 3`. The text before the first `season`/`series`
//! token (case-insensitive) is the search title; the first run of digits
//! after the token is the season number. Anything that does not fit that
//! shape falls back to the whole name and season 1. Parsing never fails.

use once_cell::sync::Lazy;
use regex::Regex;

static SEASON_TOKEN_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)series|season").expect("season token regex should compile"));
static SEASON_NUMBER_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[0-9]+").expect("season number regex should compile"));

/// Title and season number derived from a directory name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeriesIdentity {
    /// Text preceding the season token, untrimmed.
    pub title: String,
    /// Season number, `1` when none could be read.
    pub season: u32,
}

impl SeriesIdentity {
    /// Parse a raw directory name.
    ///
    /// ```
    /// use mediashelf::scanner::identifier::SeriesIdentity;
    ///
    /// let id = SeriesIdentity::parse("Show Name Season 2");
    /// assert_eq!(id.title, "Show Name ");
    /// assert_eq!(id.season, 2);
    /// ```
    pub fn parse(raw: &str) -> Self {
        let Some(token) = SEASON_TOKEN_PATTERN.find(raw) else {
            return Self {
                title: raw.to_string(),
                season: 1,
            };
        };

        let season = SEASON_NUMBER_PATTERN
            .find(&raw[token.end()..])
            .and_then(|digits| digits.as_str().parse().ok())
            .unwrap_or(1);

        Self {
            title: raw[..token.start()].to_string(),
            season,
        }
    }

    /// Title with surrounding whitespace removed, for catalog searches.
    pub fn search_title(&self) -> &str {
        self.title.trim()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(raw: &str) -> (String, u32) {
        let id = SeriesIdentity::parse(raw);
        (id.title, id.season)
    }

    #[test]
    fn test_season_token_with_number() {
        assert_eq!(parse("Show Name Season 2"), ("Show Name ".into(), 2));
    }

    #[test]
    fn test_no_token_defaults_to_season_one() {
        assert_eq!(parse("Show Name"), ("Show Name".into(), 1));
    }

    #[test]
    fn test_token_without_digits() {
        assert_eq!(parse("Show Series"), ("Show ".into(), 1));
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(parse("Blackadder SERIES 4"), ("Blackadder ".into(), 4));
        assert_eq!(parse("the wire sEaSoN03"), ("the wire ".into(), 3));
    }

    #[test]
    fn test_skips_non_digits_after_token() {
        assert_eq!(parse("Foo Season - Part 12 (1080p)"), ("Foo ".into(), 12));
    }

    #[test]
    fn test_earliest_token_wins() {
        assert_eq!(parse("Season 2 of Series 5"), ("".into(), 2));
    }

    #[test]
    fn test_token_inside_word() {
        // "seasoned" still contains the token
        assert_eq!(parse("Seasoned Chefs 7"), ("".into(), 7));
    }

    #[test]
    fn test_oversized_number_falls_back() {
        assert_eq!(parse("Foo Season 99999999999"), ("Foo ".into(), 1));
    }

    #[test]
    fn test_non_ascii_title() {
        assert_eq!(parse("Café Société Season 3"), ("Café Société ".into(), 3));
    }

    #[test]
    fn test_search_title_trims() {
        assert_eq!(SeriesIdentity::parse("  Foo  Season 1").search_title(), "Foo");
    }
}
