//! Query Parser & Preprocessor
//!
//! Normalizes the raw query for substring checks and splits it into the
//! word tokens used by fuzzy matching.

/// Parsed and processed search query
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedQuery {
    /// Original unmodified query
    pub original: String,
    /// Lowercased, trimmed query for substring and prefix checks
    pub whole_query: String,
    /// Lowercased whitespace-delimited words longer than one character
    pub individual_words: Vec<String>,
}

impl ParsedQuery {
    /// Nothing left to match after trimming
    pub fn is_empty(&self) -> bool {
        self.whole_query.is_empty()
    }
}

/// Query parser and preprocessor
pub struct QueryParser;

impl QueryParser {
    /// Parse a search query into its components
    pub fn parse(query: &str) -> ParsedQuery {
        let whole_query = query.trim().to_lowercase();
        let individual_words = Self::tokenize(&whole_query);

        ParsedQuery {
            original: query.to_string(),
            whole_query,
            individual_words,
        }
    }

    /// Split on whitespace, dropping single-character tokens
    fn tokenize(text: &str) -> Vec<String> {
        text.split_whitespace()
            .filter(|w| w.chars().count() > 1)
            .map(str::to_string)
            .collect()
    }
}

/// Lowercased whitespace tokens of a field; empty fields yield no tokens
pub fn field_words(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_parsing() {
        let parsed = QueryParser::parse("Atomic Habits");
        assert_eq!(parsed.original, "Atomic Habits");
        assert_eq!(parsed.whole_query, "atomic habits");
        assert_eq!(parsed.individual_words, vec!["atomic", "habits"]);
    }

    #[test]
    fn test_single_characters_ignored() {
        let parsed = QueryParser::parse("f scott a gatsby");
        assert_eq!(parsed.individual_words, vec!["scott", "gatsby"]);
    }

    #[test]
    fn test_whitespace_runs_and_trim() {
        let parsed = QueryParser::parse("  project \t hail\n mary  ");
        assert_eq!(parsed.whole_query, "project \t hail\n mary");
        assert_eq!(parsed.individual_words, vec!["project", "hail", "mary"]);
    }

    #[test]
    fn test_empty_query() {
        let parsed = QueryParser::parse("");
        assert!(parsed.is_empty());
        assert!(parsed.individual_words.is_empty());

        let parsed = QueryParser::parse("   \t ");
        assert!(parsed.is_empty());
    }

    #[test]
    fn test_unicode_words() {
        let parsed = QueryParser::parse("Café Résumé");
        assert_eq!(parsed.individual_words, vec!["café", "résumé"]);
    }

    #[test]
    fn test_field_words() {
        assert_eq!(field_words("J.R.R. Tolkien"), vec!["j.r.r.", "tolkien"]);
        assert!(field_words("").is_empty());
    }
}
