//! Shipping field extraction module.

mod parser;
pub mod rules;

pub use parser::{ExtractionResult, FallbackRule, FieldSource, ShippingParser, FALLBACK_RULES};

/// Trait for shipping data extractors.
pub trait ShippingExtractor {
    /// Extract shipping data from pasted text. Never fails: unmatched fields stay empty.
    fn extract_from_text(&self, text: &str) -> ExtractionResult;
}
