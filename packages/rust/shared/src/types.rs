//! Core domain types for mailsplit: the six categories and the mapping that
//! always carries all of them.

use std::collections::BTreeMap;

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

/// Placeholder stored for every category no segment was classified into.
pub const FALLBACK_TEXT: &str = "Not generated.";

// ---------------------------------------------------------------------------
// Category
// ---------------------------------------------------------------------------

/// One of the six fixed labels a generated variant is filed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    Friendly,
    Professional,
    SalesOutreach,
    FollowUp,
    WhatsApp,
    SubjectLines,
}

impl Category {
    /// All categories, in canonical display order.
    pub const ALL: [Category; 6] = [
        Category::Friendly,
        Category::Professional,
        Category::SalesOutreach,
        Category::FollowUp,
        Category::WhatsApp,
        Category::SubjectLines,
    ];

    /// The verbatim key used in the output mapping.
    pub fn key(&self) -> &'static str {
        match self {
            Self::Friendly => "1. Friendly Email",
            Self::Professional => "2. Professional Email",
            Self::SalesOutreach => "3. Sales Outreach Email",
            Self::FollowUp => "4. Follow-up Email",
            Self::WhatsApp => "5. WhatsApp-Style Message",
            Self::SubjectLines => "6. Subject Line Options",
        }
    }

    /// Position in [`Category::ALL`].
    pub fn index(&self) -> usize {
        match self {
            Self::Friendly => 0,
            Self::Professional => 1,
            Self::SalesOutreach => 2,
            Self::FollowUp => 3,
            Self::WhatsApp => 4,
            Self::SubjectLines => 5,
        }
    }

    /// Look up a category by its exact key literal.
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.key() == key)
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

// ---------------------------------------------------------------------------
// CategoryMapping
// ---------------------------------------------------------------------------

/// Content for every [`Category`]; never more, never fewer than six entries.
///
/// Built once per response and not mutated afterwards. Categories without
/// content hold [`FALLBACK_TEXT`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "BTreeMap<String, String>")]
pub struct CategoryMapping {
    entries: [String; 6],
}

impl CategoryMapping {
    /// Assemble a mapping from classified `(category, content)` pairs.
    ///
    /// Pairs are applied in order, so a later pair for the same category
    /// replaces an earlier one. A category whose final content is empty, or
    /// which never appears, gets [`FALLBACK_TEXT`].
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (Category, String)>,
    {
        let mut slots: [Option<String>; 6] = Default::default();
        for (category, content) in entries {
            slots[category.index()] = Some(content);
        }

        Self {
            entries: slots.map(|slot| match slot {
                Some(content) if !content.is_empty() => content,
                _ => FALLBACK_TEXT.to_string(),
            }),
        }
    }

    /// A mapping with every category set to the fallback.
    pub fn empty() -> Self {
        Self::from_entries(std::iter::empty())
    }

    /// Content stored for `category`.
    pub fn get(&self, category: Category) -> &str {
        &self.entries[category.index()]
    }

    /// Whether `category` holds real content rather than the fallback.
    pub fn is_generated(&self, category: Category) -> bool {
        self.get(category) != FALLBACK_TEXT
    }

    /// Number of categories holding real content.
    pub fn generated_count(&self) -> usize {
        Category::ALL
            .iter()
            .filter(|c| self.is_generated(**c))
            .count()
    }

    /// Iterate all six entries in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (Category, &str)> {
        Category::ALL
            .into_iter()
            .map(move |c| (c, self.entries[c.index()].as_str()))
    }
}

impl Default for CategoryMapping {
    fn default() -> Self {
        Self::empty()
    }
}

impl Serialize for CategoryMapping {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(Category::ALL.len()))?;
        for (category, content) in self.iter() {
            map.serialize_entry(category.key(), content)?;
        }
        map.end()
    }
}

impl TryFrom<BTreeMap<String, String>> for CategoryMapping {
    type Error = String;

    fn try_from(map: BTreeMap<String, String>) -> std::result::Result<Self, Self::Error> {
        let mut entries = Vec::with_capacity(map.len());
        for (key, content) in map {
            let category =
                Category::from_key(&key).ok_or_else(|| format!("unknown category key: {key:?}"))?;
            entries.push((category, content));
        }
        Ok(Self::from_entries(entries))
    }
}

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

/// Body POSTed to the generation endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateRequest {
    pub prompt: String,
}

/// Body returned by the generation endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateResponse {
    /// Whether the endpoint produced output.
    pub success: bool,
    /// Raw generated text; only meaningful when `success` is true.
    #[serde(default)]
    pub output: String,
}
