//! Heading-delimited segment scanner.
//!
//! A segment starts at a heading marker that is followed by a line break:
//!
//! - `###` + optional whitespace + title text up to the end of the line
//!   (the title may not contain `*`)
//! - `**title**` on a single line
//!
//! The body runs from just after that line break to the next `###` or `**`
//! anywhere in the text, or to the end of input. Markers may appear anywhere,
//! not only at line starts. A heading with no line break after it (typically
//! a bare heading on the last line) never starts a segment.

use mailsplit_shared::{is_space, trim_space};

/// A heading and the text following it, borrowed from the raw response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment<'a> {
    /// Heading text exactly as it appeared between the markers.
    pub heading: &'a str,
    /// Body text exactly as it appeared, including surrounding whitespace.
    pub body: &'a str,
}

impl<'a> Segment<'a> {
    /// Heading with surrounding whitespace removed.
    pub fn title(&self) -> &'a str {
        trim_space(self.heading)
    }

    /// Body with surrounding whitespace removed.
    pub fn content(&self) -> &'a str {
        trim_space(self.body)
    }
}

/// Collect every segment in `raw`, in order of appearance.
pub fn segments(raw: &str) -> Vec<Segment<'_>> {
    Segments::new(raw).collect()
}

/// Lazy iterator over the segments of a text.
///
/// Scanning resumes where the previous segment's body ended, so segments
/// never overlap.
#[derive(Debug, Clone)]
pub struct Segments<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> Segments<'a> {
    pub fn new(text: &'a str) -> Self {
        Self { text, pos: 0 }
    }
}

impl<'a> Iterator for Segments<'a> {
    type Item = Segment<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let text = self.text;

        while self.pos < text.len() {
            let start = self.pos;

            if let Some((heading, body_start)) = heading_at(text, start) {
                let body_end = body_end(text, body_start);
                self.pos = body_end;
                return Some(Segment {
                    heading,
                    body: &text[body_start..body_end],
                });
            }

            self.pos = start + text[start..].chars().next().map_or(1, char::len_utf8);
        }

        None
    }
}

// ---------------------------------------------------------------------------
// Heading markers
// ---------------------------------------------------------------------------

/// Try to read a heading starting exactly at `pos`.
///
/// Returns the heading text and the byte offset where its body begins.
fn heading_at(text: &str, pos: usize) -> Option<(&str, usize)> {
    let rest = &text[pos..];
    if rest.starts_with("###") {
        level3_heading(text, pos + 3)
    } else if rest.starts_with("**") {
        bold_heading(text, pos + 2)
    } else {
        None
    }
}

/// `###` form. `after` is the offset just past the hashes.
///
/// Whitespace after the hashes (newlines included) is skipped greedily; if the
/// title found there is not followed by a line break, shorter skips are tried,
/// which can only yield a whitespace-only title.
fn level3_heading(text: &str, after: usize) -> Option<(&str, usize)> {
    let ws_end = after + leading_space_len(&text[after..]);

    let starts = text[after..ws_end]
        .char_indices()
        .map(|(i, _)| after + i)
        .chain(std::iter::once(ws_end));

    for start in starts.rev() {
        let run_len = text[start..]
            .find(['*', '\n'])
            .unwrap_or(text.len() - start);
        if run_len == 0 {
            continue;
        }

        let run_end = start + run_len;
        if !text[run_end..].starts_with('\n') {
            continue;
        }
        if let Some(body_start) = line_break_end(text, run_end) {
            return Some((&text[start..run_end], body_start));
        }
    }

    None
}

/// `**title**` form. `open_end` is the offset just past the opening stars.
///
/// Takes the shortest title whose closing `**` is followed by a line break.
/// The title never spans a line terminator.
fn bold_heading(text: &str, open_end: usize) -> Option<(&str, usize)> {
    let mut close = open_end;

    loop {
        let rest = &text[close..];
        if rest.starts_with("**") {
            if let Some(body_start) = line_break_end(text, close + 2) {
                return Some((&text[open_end..close], body_start));
            }
        }

        let c = rest.chars().next()?;
        if is_line_terminator(c) {
            return None;
        }
        close += c.len_utf8();
    }
}

/// If the whitespace run at `from` contains a `\n`, the offset just past the
/// last one.
fn line_break_end(text: &str, from: usize) -> Option<usize> {
    let run = &text[from..from + leading_space_len(&text[from..])];
    run.rfind('\n').map(|i| from + i + 1)
}

/// First offset at or after `from` where another marker begins, else the end.
fn body_end(text: &str, from: usize) -> usize {
    let rest = &text[from..];
    let next = match (rest.find("###"), rest.find("**")) {
        (Some(a), Some(b)) => Some(a.min(b)),
        (a, b) => a.or(b),
    };
    next.map_or(text.len(), |i| from + i)
}

// ---------------------------------------------------------------------------
// Character classes
// ---------------------------------------------------------------------------

fn is_line_terminator(c: char) -> bool {
    matches!(c, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}

fn leading_space_len(s: &str) -> usize {
    s.find(|c: char| !is_space(c)).unwrap_or(s.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(raw: &str) -> Vec<(&str, &str)> {
        segments(raw)
            .into_iter()
            .map(|s| (s.title(), s.content()))
            .collect()
    }

    #[test]
    fn level3_headings_split_text() {
        let raw = "### Friendly Email\nHi there\n### Professional Email\nDear Sir";
        assert_eq!(
            pairs(raw),
            vec![("Friendly Email", "Hi there"), ("Professional Email", "Dear Sir")]
        );
    }

    #[test]
    fn bold_headings_split_text() {
        let raw = "Here you go:\n\n**Friendly Email**\nHey!\n\n**Subject Line Options**\n1. Hi\n2. Hello\n";
        assert_eq!(
            pairs(raw),
            vec![
                ("Friendly Email", "Hey!"),
                ("Subject Line Options", "1. Hi\n2. Hello"),
            ]
        );
    }

    #[test]
    fn raw_segment_keeps_whitespace() {
        let found = segments("###   Title  \n\n  body  \n");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].heading, "Title  ");
        assert_eq!(found[0].body, "  body  \n");
    }

    #[test]
    fn trailing_heading_without_newline_is_dropped() {
        let raw = "### Friendly Email\nHi\n### Follow-up Email";
        let found = pairs(raw);
        assert_eq!(found, vec![("Friendly Email", "Hi")]);
    }

    #[test]
    fn lone_heading_without_newline_yields_nothing() {
        assert!(segments("### Friendly Email").is_empty());
        assert!(segments("**Friendly Email**").is_empty());
        assert!(segments("**Friendly Email**   ").is_empty());
    }

    #[test]
    fn empty_and_marker_free_inputs() {
        assert!(segments("").is_empty());
        assert!(segments("Just a paragraph.\nAnd another.").is_empty());
    }

    #[test]
    fn bold_inside_body_ends_the_segment() {
        let raw = "### Sales Email\nWe **love** you\n";
        let found = segments(raw);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].content(), "We");
    }

    #[test]
    fn level3_title_cannot_contain_stars() {
        // The ### form fails, so the bold marker later on the line is used.
        let raw = "### **Friendly Email**\nHello\n";
        assert_eq!(pairs(raw), vec![("Friendly Email", "Hello")]);
    }

    #[test]
    fn level3_skips_newlines_before_title() {
        let raw = "###\nFriendly\nbody";
        assert_eq!(pairs(raw), vec![("Friendly", "body")]);
    }

    #[test]
    fn deeper_heading_keeps_extra_hash() {
        let raw = "#### Friendly\nbody";
        assert_eq!(pairs(raw), vec![("# Friendly", "body")]);
    }

    #[test]
    fn bold_title_extends_past_unfollowed_close() {
        let raw = "**a** b**\nbody";
        assert_eq!(pairs(raw), vec![("a** b", "body")]);
    }

    #[test]
    fn bold_title_stops_at_line_end() {
        // No closing stars on the first line, so the first ** never opens a heading.
        let raw = "**open\nclose**\nbody";
        assert!(segments(raw).is_empty());
    }

    #[test]
    fn heading_with_crlf() {
        let raw = "### Friendly Email\r\nHi\r\n";
        assert_eq!(pairs(raw), vec![("Friendly Email", "Hi")]);
    }

    #[test]
    fn multibyte_text_is_scanned_safely() {
        let raw = "Café ☕\n### Amical — friendly\nSalut ☺\n";
        assert_eq!(pairs(raw), vec![("Amical — friendly", "Salut ☺")]);
    }

    #[test]
    fn empty_body_between_headings() {
        let raw = "### Friendly\n### Professional\nDear Sir";
        assert_eq!(pairs(raw), vec![("Friendly", ""), ("Professional", "Dear Sir")]);
    }
}
