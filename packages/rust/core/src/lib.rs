//! Core mailsplit pipeline.
//!
//! Splits one block of generated text into the six email/message categories,
//! renders display cards, and orchestrates the generate round-trip.

pub mod classify;
pub mod pipeline;
pub mod render;
pub mod segment;

pub use classify::{KEYWORDS, category_for_heading, classify};
pub use render::{Card, cards};
pub use segment::{Segment, Segments, segments};
