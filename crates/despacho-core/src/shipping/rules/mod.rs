//! Rule-based field extractors for pasted order text.

pub mod email;
pub mod flags;
pub mod labels;
pub mod normalize;
pub mod order;
pub mod patterns;
pub mod phone;
pub mod rut;
pub mod stacked;

pub use email::{extract_email, EmailExtractor};
pub use flags::{infer_flags, infer_flags_normalized, FlagRule, FLAG_RULES};
pub use labels::{field_for_label, is_label, is_skipped, LabelRule, LABEL_TABLE, SKIP_LINES};
pub use normalize::{normalize, trim_text};
pub use order::{extract_order_number, OrderNumberExtractor};
pub use phone::{clean_phone, extract_phone, PhoneExtractor};
pub use rut::{extract_rut, format_rut, RutExtractor};
pub use stacked::{PairMatch, StackedPairExtractor, StackedPairs};

use crate::models::record::Field;

/// Trait for field extractors.
pub trait FieldExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// Extract the field from text.
    fn extract(&self, text: &str) -> Option<Self::Output>;

    /// Extract all occurrences of the field.
    fn extract_all(&self, text: &str) -> Vec<Self::Output>;
}

/// A value matched in source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionMatch<T> {
    /// Extracted value.
    pub value: T,
    /// Byte range in the searched text, when it maps back to the input.
    pub position: Option<(usize, usize)>,
    /// Source text that was matched.
    pub source: String,
}

impl<T> ExtractionMatch<T> {
    pub fn new(value: T, source: impl Into<String>) -> Self {
        Self {
            value,
            position: None,
            source: source.into(),
        }
    }

    pub fn with_position(mut self, start: usize, end: usize) -> Self {
        self.position = Some((start, end));
        self
    }
}

/// Apply the per-field formatting used when a value is assigned.
///
/// RUTs are reformatted (unless disabled), phones keep digits and `+`, all
/// other fields are stored trimmed.
pub fn format_field_value(field: Field, raw: &str, format_national_id: bool) -> String {
    match field {
        Field::NationalId if format_national_id => format_rut(raw),
        Field::Phone => clean_phone(raw),
        _ => trim_text(raw).to_string(),
    }
}
