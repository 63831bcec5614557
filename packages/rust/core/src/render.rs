//! Display cards: one normalized, plain-text block per category.

use mailsplit_markup::normalize;
use mailsplit_shared::{Category, CategoryMapping};

/// A category ready to be shown to a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub category: Category,
    /// The category key, used as the card heading.
    pub title: &'static str,
    /// Normalized body text.
    pub body: String,
}

/// Build all six cards from a mapping.
///
/// With `subject_first`, subject line options lead and the five message
/// variants follow in canonical order; otherwise canonical order throughout.
pub fn cards(mapping: &CategoryMapping, subject_first: bool) -> Vec<Card> {
    display_order(subject_first)
        .map(|category| Card {
            category,
            title: category.key(),
            body: normalize(mapping.get(category)),
        })
        .collect()
}

fn display_order(subject_first: bool) -> impl Iterator<Item = Category> {
    let lead = subject_first.then_some(Category::SubjectLines);
    let rest = Category::ALL
        .into_iter()
        .filter(move |c| !(subject_first && *c == Category::SubjectLines));
    lead.into_iter().chain(rest)
}
