//! Map segment headings onto the six categories.

use mailsplit_shared::{Category, CategoryMapping, trim_space};
use tracing::{debug, instrument};

use crate::segment::Segments;

/// Keyword → category table, in declaration order.
///
/// Every keyword contained in a heading is applied in this order and each
/// match overwrites the previous one, so the last matching row decides.
/// `"Follow-up short note"` therefore lands in [`Category::WhatsApp`].
pub const KEYWORDS: &[(&str, Category)] = &[
    ("friendly", Category::Friendly),
    ("professional", Category::Professional),
    ("business", Category::Professional),
    ("sales", Category::SalesOutreach),
    ("outreach", Category::SalesOutreach),
    ("follow", Category::FollowUp),
    ("whatsapp", Category::WhatsApp),
    ("short", Category::WhatsApp),
    ("subject", Category::SubjectLines),
    ("line options", Category::SubjectLines),
];

/// Category for a heading, or `None` when no keyword occurs in it.
pub fn category_for_heading(heading: &str) -> Option<Category> {
    let lowered = trim_space(heading).to_lowercase();

    let mut category = None;
    for (keyword, target) in KEYWORDS {
        if lowered.contains(keyword) {
            category = Some(*target);
        }
    }
    category
}

/// Split a raw model response into the six-category mapping.
///
/// Segments whose heading matches no keyword are skipped. When several
/// segments land in the same category the one appearing last is kept.
/// Never fails: text without usable headings yields an all-fallback mapping.
#[instrument(skip_all, fields(raw_len = raw.len()))]
pub fn classify(raw: &str) -> CategoryMapping {
    let mut found = 0usize;
    let mut classified = Vec::new();

    for segment in Segments::new(raw) {
        found += 1;
        match category_for_heading(segment.heading) {
            Some(category) => {
                debug!(heading = segment.title(), %category, "segment classified");
                classified.push((category, segment.content().to_string()));
            }
            None => {
                debug!(heading = segment.title(), "segment heading matched no category");
            }
        }
    }

    let mapping = CategoryMapping::from_entries(classified);

    debug!(
        segments = found,
        generated = mapping.generated_count(),
        "classification complete"
    );

    mapping
}

#[cfg(test)]
mod tests {
    use super::*;
    use mailsplit_shared::FALLBACK_TEXT;

    #[test]
    fn marker_free_text_is_all_fallback() {
        for raw in ["", "hello", "Plain text\nwith lines\n", "# H1\n## H2\nbody"] {
            let mapping = classify(raw);
            assert_eq!(mapping.iter().count(), 6);
            assert!(mapping.iter().all(|(_, text)| text == FALLBACK_TEXT), "{raw:?}");
        }
    }

    #[test]
    fn two_level3_sections() {
        let mapping = classify("### Friendly Email\nHi there\n### Professional Email\nDear Sir");
        assert_eq!(mapping.get(Category::Friendly), "Hi there");
        assert_eq!(mapping.get(Category::Professional), "Dear Sir");
        for category in [
            Category::SalesOutreach,
            Category::FollowUp,
            Category::WhatsApp,
            Category::SubjectLines,
        ] {
            assert_eq!(mapping.get(category), FALLBACK_TEXT);
        }
    }

    #[test]
    fn last_matching_keyword_wins() {
        assert_eq!(
            category_for_heading("Follow-up short note"),
            Some(Category::WhatsApp)
        );
        // "professional" precedes "sales" in the table.
        assert_eq!(
            category_for_heading("Professional Sales Pitch"),
            Some(Category::SalesOutreach)
        );
        // "subject" is declared after "friendly".
        assert_eq!(
            category_for_heading("Friendly subject ideas"),
            Some(Category::SubjectLines)
        );
    }

    #[test]
    fn tie_break_applies_through_classify() {
        let mapping = classify("### Follow-up short note\nping!\n");
        assert_eq!(mapping.get(Category::WhatsApp), "ping!");
        assert_eq!(mapping.get(Category::FollowUp), FALLBACK_TEXT);
    }

    #[test]
    fn heading_match_is_case_insensitive_and_trimmed() {
        assert_eq!(category_for_heading("  WHATSAPP message  "), Some(Category::WhatsApp));
        assert_eq!(category_for_heading("Business Email"), Some(Category::Professional));
        assert_eq!(category_for_heading("Subject LINE OPTIONS"), Some(Category::SubjectLines));
        assert_eq!(category_for_heading("Cold Outreach"), Some(Category::SalesOutreach));
    }

    #[test]
    fn unmatched_heading_is_discarded() {
        assert_eq!(category_for_heading("Closing thoughts"), None);
        assert_eq!(category_for_heading(""), None);

        let mapping = classify("### Closing thoughts\nbye\n");
        assert_eq!(mapping.generated_count(), 0);
    }

    #[test]
    fn later_segment_overwrites_earlier() {
        let raw = "### Sales Email\nfirst pitch\n### Outreach Email\nsecond pitch\n";
        let mapping = classify(raw);
        assert_eq!(mapping.get(Category::SalesOutreach), "second pitch");
        assert_eq!(mapping.generated_count(), 1);
    }

    #[test]
    fn final_heading_without_newline_is_lost() {
        let raw = "### Friendly Email\nHi\n### Subject Line Options";
        let mapping = classify(raw);
        assert_eq!(mapping.get(Category::Friendly), "Hi");
        assert_eq!(mapping.get(Category::SubjectLines), FALLBACK_TEXT);
    }

    #[test]
    fn empty_section_falls_back() {
        let mapping = classify("### Friendly Email\n\n### Professional Email\nDear Sir");
        assert_eq!(mapping.get(Category::Friendly), FALLBACK_TEXT);
        assert_eq!(mapping.get(Category::Professional), "Dear Sir");
    }

    #[test]
    fn mixed_markers() {
        let raw = "**1. Friendly Email**\nHey!\n\n### 4. Follow-up Email\nJust checking in.\n";
        let mapping = classify(raw);
        assert_eq!(mapping.get(Category::Friendly), "Hey!");
        assert_eq!(mapping.get(Category::FollowUp), "Just checking in.");
    }

    #[derive(Clone, Default)]
    struct CapturedLog(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

    impl std::io::Write for CapturedLog {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }
        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn classification_decisions_log_at_debug() {
        let log = CapturedLog::default();
        let writer = log.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            classify("### Friendly Email\nHi\n### Closing thoughts\nbye\n");
        });

        let output = String::from_utf8(log.0.lock().unwrap().clone()).unwrap();
        assert!(output.contains("segment classified"), "{output}");
        assert!(output.contains("segment heading matched no category"), "{output}");
    }

    #[test]
    fn fixture_response_fills_all_six() {
        let raw = std::fs::read_to_string("../../../fixtures/responses/six-sections.txt")
            .expect("read fixture");
        let mapping = classify(&raw);
        assert_eq!(mapping.generated_count(), 6);
        assert!(mapping.get(Category::Friendly).starts_with("Hi Jordan"));
        assert!(mapping.get(Category::SubjectLines).contains("Quick question"));
        assert!(mapping.get(Category::WhatsApp).contains("<br>"));
    }

    #[test]
    fn fixture_bold_response_drops_trailing_heading() {
        let raw = std::fs::read_to_string("../../../fixtures/responses/bold-trailing.txt")
            .expect("read fixture");
        let mapping = classify(&raw);
        assert_eq!(mapping.generated_count(), 2);
        assert!(mapping.is_generated(Category::Professional));
        assert!(mapping.is_generated(Category::SalesOutreach));
        assert!(!mapping.is_generated(Category::SubjectLines));
    }
}
