//! Chilean phone number extraction and cleanup.

use super::patterns::{PHONE, PHONE_SEPARATORS};
use super::{ExtractionMatch, FieldExtractor};

/// Phone extractor.
///
/// Searches the text with spaces, parentheses and hyphens removed, so matches
/// carry no position in the original text.
#[derive(Debug, Clone, Copy, Default)]
pub struct PhoneExtractor;

impl PhoneExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl FieldExtractor for PhoneExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.extract_all(text).into_iter().next()
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        let compact = PHONE_SEPARATORS.replace_all(text, "");

        PHONE
            .find_iter(&compact)
            .map(|m| ExtractionMatch::new(m.as_str().to_string(), m.as_str()))
            .collect()
    }
}

/// Extract the first phone number from text.
pub fn extract_phone(text: &str) -> Option<String> {
    PhoneExtractor::new().extract(text).map(|m| m.value)
}

/// Keep only digits and plus signs.
pub fn clean_phone(phone: &str) -> String {
    phone
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '+')
        .collect()
}
