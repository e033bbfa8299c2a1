//! Answer normalization and comparison.

use std::sync::OnceLock;

use regex::Regex;

fn latex_wrapper_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(\$|\\\(|\\\)|\\\[|\\\])").unwrap())
}

fn text_macro_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\\text\{([^}]*)\}").unwrap())
}

fn full_int_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[+-]?\d+$").unwrap())
}

/// Strip thousands separators and common latex wrappers (`$`, `\(`, `\)`,
/// `\[`, `\]`, `\text{...}`) from an answer string.
pub fn strip_latex_and_commas(s: &str) -> String {
    let s = s.trim().replace(',', "");
    let s = latex_wrapper_re().replace_all(&s, "");
    let s = text_macro_re().replace_all(&s, "$1");
    s.trim().to_string()
}

/// Canonical lowercase form used for string comparison.
pub fn normalize(s: &str) -> String {
    strip_latex_and_commas(s).to_lowercase()
}

/// If `s` is a pure integer (after stripping), return its canonical decimal
/// form, so `+01` and `1` compare equal. `None` otherwise.
pub fn parse_full_int(s: &str) -> Option<String> {
    let stripped = strip_latex_and_commas(s);
    if !full_int_re().is_match(&stripped) {
        return None;
    }
    // i128 covers any answer a dataset realistically encodes; longer digit
    // strings fall back to string comparison.
    stripped.parse::<i128>().ok().map(|n| n.to_string())
}

/// Compare an extracted prediction against an extracted ground truth.
///
/// Pure integers compare numerically; everything else compares as
/// normalized strings.
pub fn compare_pred_gt(pred: &str, gt: &str) -> bool {
    if let (Some(p), Some(g)) = (parse_full_int(pred), parse_full_int(gt)) {
        return p == g;
    }
    normalize(pred) == normalize(gt)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_commas_and_dollars() {
        assert_eq!(strip_latex_and_commas("$1,234$"), "1234");
    }

    #[test]
    fn test_strip_latex_delimiters() {
        assert_eq!(strip_latex_and_commas(r"\(x+1\)"), "x+1");
        assert_eq!(strip_latex_and_commas(r"\[42\]"), "42");
    }

    #[test]
    fn test_unwrap_text_macro() {
        assert_eq!(strip_latex_and_commas(r"\text{blue}"), "blue");
    }

    #[test]
    fn test_normalize_case_folds() {
        assert_eq!(normalize("Blue"), "blue");
    }

    #[test]
    fn test_parse_full_int_canonicalizes() {
        assert_eq!(parse_full_int("+01").as_deref(), Some("1"));
        assert_eq!(parse_full_int("-0").as_deref(), Some("0"));
        assert_eq!(parse_full_int("1,000").as_deref(), Some("1000"));
    }

    #[test]
    fn test_parse_full_int_rejects_non_integers() {
        assert_eq!(parse_full_int("1.5"), None);
        assert_eq!(parse_full_int("x"), None);
        assert_eq!(parse_full_int("12 apples"), None);
        assert_eq!(parse_full_int(""), None);
    }

    #[test]
    fn test_compare_numeric_equivalence() {
        assert!(compare_pred_gt("+01", "1"));
        assert!(compare_pred_gt("1,000", "1000"));
        assert!(!compare_pred_gt("2", "3"));
    }

    #[test]
    fn test_compare_string_fallback() {
        assert!(compare_pred_gt("Blue", "blue"));
        assert!(compare_pred_gt(r"\text{yes}", "yes"));
        assert!(!compare_pred_gt("blue", "red"));
    }

    #[test]
    fn test_mixed_int_and_string_compares_as_string() {
        // "1.0" is not a pure integer, so "1" vs "1.0" is a string compare.
        assert!(!compare_pred_gt("1", "1.0"));
    }
}
