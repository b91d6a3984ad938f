//! RUT (Chilean national ID) extraction and formatting.

use super::patterns::RUT;
use super::{ExtractionMatch, FieldExtractor};

/// RUT field extractor.
///
/// Yields the matched text as written; formatting is applied when the value
/// is assigned to the record.
#[derive(Debug, Clone, Copy, Default)]
pub struct RutExtractor;

impl RutExtractor {
    /// Create a new RUT extractor.
    pub fn new() -> Self {
        Self
    }
}

impl FieldExtractor for RutExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.extract_all(text).into_iter().next()
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        RUT.captures_iter(text)
            .filter_map(|caps| caps.get(1))
            .map(|m| {
                ExtractionMatch::new(m.as_str().to_string(), m.as_str())
                    .with_position(m.start(), m.end())
            })
            .collect()
    }
}

/// Extract and format the first RUT found in text.
pub fn extract_rut(text: &str) -> Option<String> {
    RutExtractor::new().extract(text).map(|m| format_rut(&m.value))
}

/// Format a RUT as `XX.XXX.XXX-Y`.
///
/// Keeps digits and the `K` check character. Inputs with fewer than two
/// usable characters are returned trimmed but otherwise unchanged.
pub fn format_rut(rut: &str) -> String {
    let raw: Vec<char> = rut
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == 'k' || *c == 'K')
        .map(|c| c.to_ascii_uppercase())
        .collect();

    if raw.len() < 2 {
        return rut.trim().to_string();
    }

    let (body, check) = raw.split_at(raw.len() - 1);

    // Group from the right: the leading chunk takes the remainder.
    let lead = match body.len() % 3 {
        0 => 3,
        n => n,
    };
    let mut grouped = String::with_capacity(body.len() + body.len() / 3 + 2);
    for (i, c) in body.iter().enumerate() {
        if i >= lead && (i - lead) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(*c);
    }

    format!("{}-{}", grouped, check[0])
}
