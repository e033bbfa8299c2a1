//! Answer extraction rules.
//!
//! Each data source declares exactly one way to locate the final answer in a
//! completion; there is deliberately no fallback chain inside a rule, so a
//! model that formats its answer wrong scores 0 rather than getting lucky.

use std::sync::OnceLock;

use regex::Regex;

fn answer_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)Answer:\s*(.+?)\s*$").unwrap())
}

fn boxed_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\\boxed\{([^}]*)\}").unwrap())
}

/// The last non-empty line of `text`, trimmed. Empty string if none exists.
pub fn last_nonempty_line(text: &str) -> &str {
    text.lines()
        .map(str::trim)
        .rev()
        .find(|line| !line.is_empty())
        .unwrap_or("")
}

/// Extract `Answer: XXX` from the last non-empty line only.
pub fn extract_answer_last_line(text: &str) -> Option<String> {
    let last = last_nonempty_line(text);
    if last.is_empty() {
        return None;
    }
    answer_re()
        .captures(last)
        .map(|caps| caps[1].trim().to_string())
}

/// Extract the contents of the last `\boxed{...}` anywhere in the text.
pub fn extract_boxed_anywhere(text: &str) -> Option<String> {
    boxed_re()
        .captures_iter(text)
        .last()
        .map(|caps| caps[1].trim().to_string())
}

/// Apply the extraction policy for a data source.
///
/// - `math-dapo`, `mcqa`: last-line `Answer:` rule.
/// - `openscience`: last `\boxed{...}` anywhere.
/// - anything else: best effort, boxed first then last-line.
pub fn extract_by_source(text: &str, data_source: &str) -> Option<String> {
    match data_source {
        "math-dapo" | "mcqa" => extract_answer_last_line(text),
        "openscience" => extract_boxed_anywhere(text),
        _ => extract_boxed_anywhere(text).or_else(|| extract_answer_last_line(text)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_nonempty_line() {
        assert_eq!(last_nonempty_line("a\nb\nc"), "c");
        assert_eq!(last_nonempty_line("a\nb\n\n  \n"), "b");
        assert_eq!(last_nonempty_line("  \n\n"), "");
        assert_eq!(last_nonempty_line(""), "");
    }

    #[test]
    fn test_answer_last_line_basic() {
        let text = "Working...\nAnswer: 42";
        assert_eq!(extract_answer_last_line(text).as_deref(), Some("42"));
    }

    #[test]
    fn test_answer_is_case_insensitive() {
        assert_eq!(
            extract_answer_last_line("answer:   x + 1").as_deref(),
            Some("x + 1")
        );
    }

    #[test]
    fn test_answer_only_last_line_counts() {
        // An Answer: on an earlier line must not be picked up.
        let text = "Answer: 1\nActually, let me reconsider.";
        assert_eq!(extract_answer_last_line(text), None);
    }

    #[test]
    fn test_answer_ignores_trailing_blank_lines() {
        let text = "Answer: 9\n\n   \n";
        assert_eq!(extract_answer_last_line(text).as_deref(), Some("9"));
    }

    #[test]
    fn test_boxed_takes_last_match() {
        let text = "First \\boxed{1}, then revised to \\boxed{2}.";
        assert_eq!(extract_boxed_anywhere(text).as_deref(), Some("2"));
    }

    #[test]
    fn test_boxed_none_when_absent() {
        assert_eq!(extract_boxed_anywhere("no box here"), None);
    }

    #[test]
    fn test_source_policies() {
        let text = "\\boxed{3}\nAnswer: 4";
        // Last-line sources ignore the box.
        assert_eq!(extract_by_source(text, "math-dapo").as_deref(), Some("4"));
        assert_eq!(extract_by_source(text, "mcqa").as_deref(), Some("4"));
        // Boxed source ignores the last line.
        assert_eq!(extract_by_source(text, "openscience").as_deref(), Some("3"));
        // Default prefers boxed.
        assert_eq!(extract_by_source(text, "other").as_deref(), Some("3"));
    }

    #[test]
    fn test_default_source_falls_back() {
        assert_eq!(
            extract_by_source("Answer: yes", "other").as_deref(),
            Some("yes")
        );
    }
}
