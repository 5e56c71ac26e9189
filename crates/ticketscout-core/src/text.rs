//! Text normalization shared by the resolver, classifier and finder.

/// Lowercases, maps every non-alphanumeric character to a space and collapses runs.
///
/// Apostrophes and periods are dropped rather than split on, so "St. Louis" and
/// "Ol' Miss" read as "st louis" and "ol miss".
pub fn normalize(text: &str) -> String {
    let mut normalized = String::with_capacity(text.len());
    let mut pending_space = false;
    for c in text.chars() {
        if matches!(c, '\'' | '’' | '.') {
            continue;
        }
        if c.is_alphanumeric() {
            if pending_space && !normalized.is_empty() {
                normalized.push(' ');
            }
            pending_space = false;
            normalized.extend(c.to_lowercase());
        } else {
            pending_space = true;
        }
    }
    normalized
}

pub fn tokens(text: &str) -> Vec<String> {
    normalize(text)
        .split(' ')
        .filter(|token| !token.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Whole-word (or whole-phrase) containment on normalized text.
pub fn contains_term(normalized_haystack: &str, term: &str) -> bool {
    let term = normalize(term);
    if term.is_empty() {
        return false;
    }
    format!(" {normalized_haystack} ").contains(&format!(" {term} "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_punctuation_and_case() {
        assert_eq!(normalize("  St. Louis   CARDINALS!"), "st louis cardinals");
        assert_eq!(normalize("Red Sox vs. Yankees"), "red sox vs yankees");
        assert_eq!(tokens("49ers @ Giants"), vec!["49ers", "giants"]);
    }

    #[test]
    fn term_matching_respects_word_boundaries() {
        let haystack = normalize("Boston Red Sox at New York Yankees");
        assert!(contains_term(&haystack, "Red Sox"));
        assert!(contains_term(&haystack, "yankees"));
        assert!(!contains_term(&haystack, "sox at new york yank"));
        assert!(!contains_term(&haystack, "ton"));
        assert!(!contains_term(&haystack, ""));
    }
}
