//! Character classes shared by the scanner and the markup normalizer.

/// Whitespace for heading scans and trimming: Unicode White_Space minus NEL,
/// plus BOM.
pub fn is_space(c: char) -> bool {
    c == '\u{feff}' || (c.is_whitespace() && c != '\u{85}')
}

/// Trim leading and trailing [`is_space`] characters.
pub fn trim_space(s: &str) -> &str {
    s.trim_matches(is_space)
}
