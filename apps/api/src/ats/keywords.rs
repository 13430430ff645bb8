use std::collections::HashSet;

/// Words too common to count as job keywords even when longer than two characters.
const STOP_WORDS: &[&str] = &["and", "the", "or", "in", "at", "to", "for"];

/// Extracts the keyword set of a free-text passage.
///
/// Splits on anything that is not a word character, lower-cases, keeps tokens longer
/// than two characters that are not stop words, and drops repeats (first occurrence
/// wins the position). Order carries no weight; callers use the result for membership tests.
pub fn extract_keywords(text: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    text.split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .map(str::to_lowercase)
        .filter(|word| word.chars().count() > 2 && !STOP_WORDS.contains(&word.as_str()))
        .filter(|word| seen.insert(word.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lowercases_and_splits_on_punctuation() {
        let keywords = extract_keywords("React/Node.js, MongoDB!");
        assert_eq!(keywords, vec!["react", "node", "mongodb"]);
    }

    #[test]
    fn test_drops_short_tokens_and_stop_words() {
        let keywords = extract_keywords("The team and I work at scale for AI");
        assert_eq!(keywords, vec!["team", "work", "scale"]);
    }

    #[test]
    fn test_duplicates_collapse() {
        let keywords = extract_keywords("Rust rust RUST tokio");
        assert_eq!(keywords, vec!["rust", "tokio"]);
    }

    #[test]
    fn test_empty_and_symbol_only_input() {
        assert!(extract_keywords("").is_empty());
        assert!(extract_keywords("--- ** //").is_empty());
    }

    #[test]
    fn test_underscores_stay_inside_tokens() {
        assert_eq!(extract_keywords("snake_case ids"), vec!["snake_case", "ids"]);
    }
}
