//! Text normalization shared by all classifiers.

/// Lowercase `text`, collapse whitespace runs to a single space and trim.
///
/// Idempotent: `normalize(&normalize(x)) == normalize(x)`.
///
/// ```rust
/// use moodflow_core::text::normalize;
///
/// assert_eq!(normalize("  Bugün   ÇOK\tmutluyum \n"), "bugün çok mutluyum");
/// ```
pub fn normalize(text: &str) -> String {
    let lower = text.to_lowercase();
    let mut out = String::with_capacity(lower.len());
    for word in lower.split_whitespace() {
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(word);
    }
    out
}

/// Number of whitespace-separated tokens.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_collapses_and_trims() {
        assert_eq!(normalize("  Hello \t\n  World  "), "hello world");
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   "), "");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let samples = [
            "  Tabii TABİİ,  harika bir gün ",
            "İYİ değil\t\tama\nfena da değil",
            "ALREADY normal",
            "\u{00A0}non-breaking\u{2003}spaces ",
        ];
        for s in samples {
            let once = normalize(s);
            assert_eq!(normalize(&once), once, "not idempotent for {:?}", s);
        }
    }

    #[test]
    fn test_word_count() {
        assert_eq!(word_count("a  b\tc"), 3);
        assert_eq!(word_count(""), 0);
    }
}
