//! Markup normalization for generated email text.
//!
//! Model output sometimes carries a thin layer of HTML: `<br>` line breaks,
//! `<p>` paragraphs, the odd `<strong>`. [`normalize`] turns that into plain
//! text that can be printed verbatim. It is not an HTML parser; only line and
//! paragraph breaks are translated, every other tag is simply dropped.

mod passes;

/// Convert one category's text into plain, displayable text.
///
/// Applied in order:
/// 1. `<br>` / `<br/>` (any case, optional space before `/`) → `\n`
/// 2. `</p>` (any case) → `\n\n`
/// 3. any remaining `<...>` span, or an unterminated `<...` to the end → removed
/// 4. runs of three or more `\n` → `\n\n`
/// 5. surrounding whitespace trimmed (BOM counts as whitespace, NEL does not)
///
/// Total over all inputs, including the empty string.
pub fn normalize(text: &str) -> String {
    passes::run_pipeline(text)
}
