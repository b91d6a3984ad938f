//! Stacked label/value pair extraction.
//!
//! The order UI copies each field as a label line followed by its value on
//! a later line, interleaved with icon names and section headers:
//!
//! ```text
//! person
//! Datos del cliente
//! Nombre
//! Juan Pérez
//! Teléfono
//! +56 9 1234 5678
//! ```

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::models::record::{Field, Record};

use super::labels::{field_for_label, is_label, is_skipped};
use super::{format_field_value, normalize, trim_text};

/// A label line paired with its value line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairMatch {
    /// Field the label resolved to.
    pub field: Field,
    /// Label line as written.
    pub label: String,
    /// Value after field formatting.
    pub value: String,
    /// Index of the value line among non-empty lines.
    pub line: usize,
}

/// Output of the stacked pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StackedPairs {
    /// Partially filled record.
    pub record: Record,
    /// Pairs that wrote a non-empty value, in input order.
    pub matches: Vec<PairMatch>,
}

/// Stacked label/value extractor.
#[derive(Debug, Clone, Copy)]
pub struct StackedPairExtractor {
    format_national_id: bool,
}

impl StackedPairExtractor {
    /// Create a new extractor that formats RUTs.
    pub fn new() -> Self {
        Self {
            format_national_id: true,
        }
    }

    /// Set whether to reformat RUT values.
    pub fn with_id_formatting(mut self, format: bool) -> Self {
        self.format_national_id = format;
        self
    }

    /// Pair label lines with their values.
    pub fn extract(&self, text: &str) -> StackedPairs {
        let lines = split_lines(text);
        let normalized: Vec<String> = lines.iter().map(|l| normalize(l)).collect();

        let mut out = StackedPairs::default();
        let mut used: HashSet<Field> = HashSet::new();

        let mut i = 0;
        while i < lines.len() {
            if is_skipped(&normalized[i]) {
                trace!("Skipping chrome line {:?}", lines[i]);
                i += 1;
                continue;
            }
            let Some(field) = field_for_label(&normalized[i]) else {
                i += 1;
                continue;
            };

            // Next line that is neither chrome nor another label.
            let mut j = i + 1;
            while j < lines.len() && (is_skipped(&normalized[j]) || is_label(&normalized[j])) {
                j += 1;
            }

            if j < lines.len() {
                let value = format_field_value(field, lines[j], self.format_national_id);
                let assigned = if used.insert(field) {
                    true
                } else {
                    // A repeated label only refills an empty phone.
                    field == Field::Phone && out.record.phone.is_empty()
                };

                if assigned {
                    trace!("Label {:?} -> {} = {:?}", lines[i], field, value);
                    if !value.is_empty() {
                        out.matches.push(PairMatch {
                            field,
                            label: lines[i].to_string(),
                            value: value.clone(),
                            line: j,
                        });
                    }
                    out.record.set(field, value);
                }
            }

            i = i.max(j - 1) + 1;
        }

        out
    }
}

impl Default for StackedPairExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Split on any line ending, trim, and drop blank lines.
fn split_lines(text: &str) -> Vec<&str> {
    text.split(['\r', '\n'])
        .map(trim_text)
        .filter(|l| !l.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn extract(text: &str) -> Record {
        StackedPairExtractor::new().extract(text).record
    }

    #[test]
    fn test_name_is_verbatim() {
        let record = extract("Nombre\nJuan Pérez");
        assert_eq!(record.full_name, "Juan Pérez");
    }

    #[test]
    fn test_phone_is_cleaned() {
        let record = extract("Teléfono\n+56 9 1234 5678");
        assert_eq!(record.phone, "+56912345678");
    }

    #[test]
    fn test_rut_is_formatted() {
        assert_eq!(extract("RUT\n123456785").national_id, "12.345.678-5");
        assert_eq!(
            StackedPairExtractor::new()
                .with_id_formatting(false)
                .extract("RUT\n123456785")
                .record
                .national_id,
            "123456785"
        );
    }

    #[test]
    fn test_full_block() {
        let text = "person\r\nDatos del cliente\r\nNombre\r\nJuan Pérez\r\n\r\nDocumento de identidad\r\n12345678-5\r\n\
                    Correo\r\njuan@correo.cl\r\nTeléfono\r\n+56 9 1234 5678\r\nlocal_shipping\r\nEnvío\r\n\
                    Dirección\r\nAv. Providencia 1234, depto 56\r\nComuna\r\nProvidencia\r\nRegión\r\n\
                    Metropolitana\r\nIndicaciones\r\n-\r\nQuién recibe\r\nMaría Soto";

        let record = extract(text);
        assert_eq!(
            record,
            Record {
                national_id: "12.345.678-5".to_string(),
                full_name: "Juan Pérez".to_string(),
                street_address: "Av. Providencia 1234, depto 56".to_string(),
                locality: "Providencia".to_string(),
                region: "Metropolitana".to_string(),
                phone: "+56912345678".to_string(),
                email: "juan@correo.cl".to_string(),
                // "-" is a placeholder, so the next real line is taken.
                notes: "María Soto".to_string(),
                ..Record::default()
            }
        );
    }

    #[test]
    fn test_skip_line_never_a_value() {
        let record = extract("Comuna\n-\nÑuñoa");
        assert_eq!(record.locality, "Ñuñoa");

        let record = extract("Comuna\n-");
        assert_eq!(record.locality, "");
    }

    #[test]
    fn test_stacked_labels_share_next_value() {
        // A label directly followed by another label takes the first real value,
        // and the skipped label is not processed on its own.
        let pairs = StackedPairExtractor::new().extract("Nombre\nRUT\nJuan Pérez\n12.345.678-5");
        assert_eq!(pairs.record.full_name, "Juan Pérez");
        assert_eq!(pairs.record.national_id, "");
        assert_eq!(pairs.matches.len(), 1);
    }

    #[test]
    fn test_repeated_phone_label_does_not_overwrite() {
        let record = extract("Teléfono\n+56 9 1111 1111\nNúmero\n+56 9 2222 2222");
        assert_eq!(record.phone, "+56911111111");
    }

    #[test]
    fn test_repeated_phone_label_fills_empty_phone() {
        let record = extract("Teléfono\nsin dato\nNúmero\n+56 9 8765 4321");
        assert_eq!(record.phone, "+56987654321");
    }

    #[test]
    fn test_repeated_label_other_fields_not_refilled() {
        let record = extract("Nombre\nJuan\nCliente\nPedro");
        assert_eq!(record.full_name, "Juan");
    }

    #[test]
    fn test_value_lines_are_not_labels() {
        let pairs = StackedPairExtractor::new().extract("Nombre\nJuan Pérez\nCiudad\nTemuco");
        let lines: Vec<_> = pairs.matches.iter().map(|m| (m.field, m.line)).collect();
        assert_eq!(lines, vec![(Field::FullName, 1), (Field::Locality, 3)]);
    }

    #[test]
    fn test_lone_carriage_returns_split_lines() {
        let record = extract("Nombre\rJuan Pérez\rComuna\rÑuñoa");
        assert_eq!(record.full_name, "Juan Pérez");
        assert_eq!(record.locality, "Ñuñoa");
    }

    #[test]
    fn test_leading_byte_order_mark() {
        let record = extract("\u{feff}Nombre\nJuan Pérez\nTeléfono\n+56 9 1234 5678");
        assert_eq!(record.full_name, "Juan Pérez");
        assert_eq!(record.phone, "+56912345678");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(StackedPairExtractor::new().extract(""), StackedPairs::default());
        assert_eq!(extract("\r\n\n  \r"), Record::default());
    }
}
