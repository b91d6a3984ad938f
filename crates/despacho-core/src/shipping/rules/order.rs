//! Pre-sale order number extraction.

use super::patterns::ORDER_NUMBER;
use super::{ExtractionMatch, FieldExtractor};

/// Order number extractor for "PREVENTA #27967" style headers.
#[derive(Debug, Clone, Copy, Default)]
pub struct OrderNumberExtractor;

impl OrderNumberExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl FieldExtractor for OrderNumberExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.extract_all(text).into_iter().next()
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        ORDER_NUMBER
            .captures_iter(text)
            .filter_map(|caps| {
                let full = caps.get(0)?;
                let number = caps.get(1)?;
                Some(
                    ExtractionMatch::new(number.as_str().to_string(), full.as_str())
                        .with_position(full.start(), full.end()),
                )
            })
            .collect()
    }
}

/// Extract the first pre-sale order number from text.
pub fn extract_order_number(text: &str) -> Option<String> {
    OrderNumberExtractor::new().extract(text).map(|m| m.value)
}
