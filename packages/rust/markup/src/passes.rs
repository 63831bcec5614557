//! Normalization passes for generated category text.
//!
//! Each pass is a function `&str -> String` applied in sequence. Order is
//! significant: line-break markers must become newlines before the generic
//! tag stripper would delete them.

use std::sync::LazyLock;

use mailsplit_shared::trim_space;
use regex::Regex;

/// Run every pass, in order, over one category's text.
pub(crate) fn run_pipeline(text: &str) -> String {
    let mut result = text.to_string();

    result = replace_line_breaks(&result);
    result = replace_paragraph_ends(&result);
    result = strip_tags(&result);
    result = collapse_blank_lines(&result);

    trim_space(&result).to_string()
}

// ---------------------------------------------------------------------------
// Pass 1: <br> markers
// ---------------------------------------------------------------------------

/// `<br>`, `<br/>`, `<BR />` and friends become a single newline.
fn replace_line_breaks(text: &str) -> String {
    static BR_RE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"(?i)<br\s*/?>").expect("valid regex"));

    BR_RE.replace_all(text, "\n").to_string()
}

// ---------------------------------------------------------------------------
// Pass 2: paragraph ends
// ---------------------------------------------------------------------------

/// `</p>` becomes a blank line.
fn replace_paragraph_ends(text: &str) -> String {
    static P_END_RE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"(?i)</p>").expect("valid regex"));

    P_END_RE.replace_all(text, "\n\n").to_string()
}

// ---------------------------------------------------------------------------
// Pass 3: everything else that looks like a tag
// ---------------------------------------------------------------------------

/// Remove any `<...>` span. An unterminated `<` swallows the rest of the text.
fn strip_tags(text: &str) -> String {
    static TAG_RE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"</?[^>]+(?:>|$)").expect("valid regex"));

    TAG_RE.replace_all(text, "").to_string()
}

// ---------------------------------------------------------------------------
// Pass 4: blank line runs
// ---------------------------------------------------------------------------

/// Collapse 3+ consecutive newlines into exactly 2.
fn collapse_blank_lines(text: &str) -> String {
    static MULTI_NL_RE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"\n{3,}").expect("valid regex"));

    MULTI_NL_RE.replace_all(text, "\n\n").to_string()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_breaks_all_forms() {
        let input = "a<br>b<br/>c<BR />d<Br\t/>e";
        assert_eq!(replace_line_breaks(input), "a\nb\nc\nd\ne");
    }

    #[test]
    fn line_breaks_leave_other_tags() {
        let input = "a<brand>b";
        assert_eq!(replace_line_breaks(input), input);
    }

    #[test]
    fn paragraph_ends_case_insensitive() {
        assert_eq!(replace_paragraph_ends("A</p>B</P>"), "A\n\nB\n\n");
    }

    #[test]
    fn strip_tags_removes_open_close_and_unknown() {
        let input = "<p>Hi <strong>there</strong>, <custom-tag x=\"1\">friend</custom-tag></p>";
        assert_eq!(strip_tags(input), "Hi there, friend");
    }

    #[test]
    fn strip_tags_unterminated_runs_to_end() {
        assert_eq!(strip_tags("keep this <span class=\"oops"), "keep this ");
        assert_eq!(strip_tags("a < b\nstill gone"), "a ");
    }

    #[test]
    fn strip_tags_leaves_empty_brackets() {
        assert_eq!(strip_tags("<>"), "<>");
    }

    #[test]
    fn collapse_blank_lines_caps_at_two() {
        assert_eq!(collapse_blank_lines("a\n\n\n\n\nb"), "a\n\nb");
        assert_eq!(collapse_blank_lines("a\n\nb"), "a\n\nb");
        assert_eq!(collapse_blank_lines("a\n\n\nb\n\n\n\nc"), "a\n\nb\n\nc");
    }

    #[test]
    fn pipeline_paragraph_then_break_collapses() {
        // </p> then <br><br> would give four newlines before collapsing.
        let input = "<p>One</p><br><br>Two";
        assert_eq!(run_pipeline(input), "One\n\nTwo");
    }
}
