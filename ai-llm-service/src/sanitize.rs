//! Post-processing of raw model answers.
//!
//! Reasoning models (e.g. DeepSeek R1 distills) emit their scratchpad inline as
//! `<think>...</think>`. That text is not part of the review and is removed
//! before the answer leaves this crate.

use std::sync::LazyLock;

use regex::Regex;

/// Opening marker of a scratchpad span.
pub const THINK_OPEN: &str = "<think>";
/// Closing marker of a scratchpad span.
pub const THINK_CLOSE: &str = "</think>";

/// Shortest span from an opening to the next closing marker, across newlines.
static THINK_SPAN: LazyLock<Regex> = LazyLock::new(|| {
    let pattern = format!(
        "(?s){}.*?{}",
        regex::escape(THINK_OPEN),
        regex::escape(THINK_CLOSE)
    );
    Regex::new(&pattern).expect("static think-span regex")
});

/// Removes every `<think>...</think>` span from `input`.
///
/// Matching is non-greedy and global. Removal is repeated until no span is
/// left, so markup uncovered by a removal (`<thi<think>x</think>nk>y</think>`)
/// is removed too and the function is idempotent. Text without markup, or with
/// an unpaired marker, is returned unchanged.
pub fn strip_think_tags(input: &str) -> String {
    let mut out = input.to_string();
    while THINK_SPAN.is_match(&out) {
        out = THINK_SPAN.replace_all(&out, "").into_owned();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn removes_leading_scratchpad() {
        assert_eq!(
            strip_think_tags("<think>scratch</think>Looks fine."),
            "Looks fine."
        );
    }

    #[test]
    fn pattern_is_built_from_the_markers() {
        let raw = format!("{THINK_OPEN}a.b*c{THINK_CLOSE}answer");
        assert_eq!(strip_think_tags(&raw), "answer");
        assert!(THINK_SPAN.as_str().contains(THINK_OPEN));
    }

    #[test]
    fn removes_every_span_non_greedily() {
        let raw = "a<think>1</think>b<think>2</think>c";
        assert_eq!(strip_think_tags(raw), "abc");
    }

    #[test]
    fn spans_cross_newlines() {
        let raw = "<think>\nline one\nline two\n</think>\n\n## Review\nok";
        assert_eq!(strip_think_tags(raw), "\n\n## Review\nok");
    }

    #[test]
    fn text_without_markup_is_unchanged() {
        let raw = "No issues.\nUse `Vec<T>` here.";
        assert_eq!(strip_think_tags(raw), raw);
        assert_eq!(strip_think_tags(""), "");
    }

    #[test]
    fn unpaired_markers_are_kept() {
        assert_eq!(strip_think_tags("<think>never closed"), "<think>never closed");
        assert_eq!(strip_think_tags("stray </think> end"), "stray </think> end");
    }

    #[test]
    fn stripping_is_idempotent() {
        let inputs = [
            "<think>x</think>done",
            "<thi<think>x</think>nk>y</think>tail",
            "plain",
            "<think>a</think><think>b</think>",
            "keep <think>open",
        ];
        for raw in inputs {
            let once = strip_think_tags(raw);
            assert_eq!(strip_think_tags(&once), once, "input: {raw:?}");
        }
        assert_eq!(strip_think_tags("<thi<think>x</think>nk>y</think>tail"), "tail");
    }
}
