//! Shipping parser combining stacked pairs, fallback rules and flag inference.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::models::record::{Field, FlagSet, Record};

use super::rules::{
    format_field_value, infer_flags_normalized, normalize, EmailExtractor, ExtractionMatch,
    FieldExtractor, OrderNumberExtractor, PhoneExtractor, RutExtractor, StackedPairExtractor,
};
use super::ShippingExtractor;

/// Rule name recorded for values taken from label/value pairs.
pub const STACKED_PAIR_RULE: &str = "stacked_pair";

/// Which rule filled a field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldSource {
    /// Filled field.
    pub field: Field,
    /// `stacked_pair` or the fallback rule name.
    pub rule: String,
    /// Label line for pairs, matched text for fallbacks.
    pub matched: String,
    /// Value line index among non-empty lines (pairs only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
}

/// Result of shipping data extraction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionResult {
    /// Extracted fields.
    pub record: Record,
    /// Freshly inferred flags.
    pub flags: FlagSet,
    /// The pasted text.
    pub raw_text: String,
    /// Provenance of every filled field.
    pub sources: Vec<FieldSource>,
    /// Fields left empty.
    pub missing: Vec<Field>,
}

impl ExtractionResult {
    /// Provenance of a field, if it was filled.
    pub fn source_of(&self, field: Field) -> Option<&FieldSource> {
        self.sources.iter().find(|s| s.field == field)
    }
}

/// A whole-text rule that fills one field when the stacked pass left it empty.
pub struct FallbackRule {
    pub name: &'static str,
    pub field: Field,
    pub extractor: &'static (dyn FieldExtractor<Output = ExtractionMatch<String>> + Sync),
}

/// Fallback rules in application order.
pub static FALLBACK_RULES: [FallbackRule; 4] = [
    FallbackRule {
        name: "order_number",
        field: Field::OrderNumber,
        extractor: &OrderNumberExtractor,
    },
    FallbackRule {
        name: "email",
        field: Field::Email,
        extractor: &EmailExtractor,
    },
    FallbackRule {
        name: "national_id",
        field: Field::NationalId,
        extractor: &RutExtractor,
    },
    FallbackRule {
        name: "phone",
        field: Field::Phone,
        extractor: &PhoneExtractor,
    },
];

/// Shipping parser: stacked pairs first, then fallbacks, then flags.
#[derive(Debug, Clone, Copy)]
pub struct ShippingParser {
    /// Whether to reformat RUTs.
    format_national_id: bool,
    /// Whether to run the fallback rules.
    enable_fallbacks: bool,
}

impl ShippingParser {
    /// Create a new parser with default settings.
    pub fn new() -> Self {
        Self {
            format_national_id: true,
            enable_fallbacks: true,
        }
    }

    /// Set RUT formatting.
    pub fn with_id_formatting(mut self, format: bool) -> Self {
        self.format_national_id = format;
        self
    }

    /// Set whether fallback rules run.
    pub fn with_fallbacks(mut self, enable: bool) -> Self {
        self.enable_fallbacks = enable;
        self
    }

    /// Parse pasted text into a record and flag set.
    pub fn parse(&self, text: &str) -> ExtractionResult {
        info!("Parsing shipping data from {} characters of text", text.len());

        let pairs = StackedPairExtractor::new()
            .with_id_formatting(self.format_national_id)
            .extract(text);

        let mut record = pairs.record;
        let mut sources: Vec<FieldSource> = pairs
            .matches
            .into_iter()
            .map(|m| FieldSource {
                field: m.field,
                rule: STACKED_PAIR_RULE.to_string(),
                matched: m.label,
                line: Some(m.line),
            })
            .collect();

        debug!("Stacked pass filled {} fields", sources.len());

        if self.enable_fallbacks {
            self.apply_fallbacks(text, &mut record, &mut sources);
        }

        let flags = infer_flags_normalized(&normalize(text));
        let missing = record.missing();

        debug!(
            "Extracted {} fields, {} missing, flags {:?}",
            sources.len(),
            missing.len(),
            flags
        );

        ExtractionResult {
            record,
            flags,
            raw_text: text.to_string(),
            sources,
            missing,
        }
    }

    fn apply_fallbacks(&self, text: &str, record: &mut Record, sources: &mut Vec<FieldSource>) {
        for rule in &FALLBACK_RULES {
            if record.is_filled(rule.field) {
                continue;
            }

            let Some(found) = rule.extractor.extract(text) else {
                continue;
            };

            let value = format_field_value(rule.field, &found.value, self.format_national_id);
            if value.is_empty() {
                continue;
            }

            debug!("Fallback {} filled {} = {:?}", rule.name, rule.field, value);
            record.set(rule.field, value);
            sources.push(FieldSource {
                field: rule.field,
                rule: rule.name.to_string(),
                matched: found.source,
                line: None,
            });
        }
    }
}

impl Default for ShippingParser {
    fn default() -> Self {
        Self::new()
    }
}

impl ShippingExtractor for ShippingParser {
    fn extract_from_text(&self, text: &str) -> ExtractionResult {
        self.parse(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const ORDER_BLOCK: &str = "PREVENTA #27967
person
Datos del cliente
Nombre
Juan Pérez
Documento de identidad
12345678-5
Teléfono
+56 9 1234 5678
local_shipping
Envío
Tipo de pedido
Despacho a domicilio
Dirección
Av. Providencia 1234
Comuna
Providencia
Estado de pago
Por pagar
Contacto juan.perez@gmail.com
Indicaciones
-";

    #[test]
    fn test_parse_order_block() {
        let result = ShippingParser::new().parse(ORDER_BLOCK);

        assert_eq!(
            result.record,
            Record {
                national_id: "12.345.678-5".to_string(),
                full_name: "Juan Pérez".to_string(),
                street_address: "Av. Providencia 1234".to_string(),
                locality: "Providencia".to_string(),
                phone: "+56912345678".to_string(),
                email: "juan.perez@gmail.com".to_string(),
                order_number: "27967".to_string(),
                order_type: "Despacho a domicilio".to_string(),
                ..Record::default()
            }
        );
        assert_eq!(
            result.flags,
            FlagSet {
                cash_on_delivery: true,
                home_delivery: true,
                ..FlagSet::default()
            }
        );
        assert_eq!(result.missing, vec![Field::Region, Field::Notes, Field::Branch]);
    }

    #[test]
    fn test_sources() {
        let result = ShippingParser::new().parse(ORDER_BLOCK);

        let name = result.source_of(Field::FullName).unwrap();
        assert_eq!(name.rule, STACKED_PAIR_RULE);
        assert_eq!(name.matched, "Nombre");
        assert_eq!(name.line, Some(4));

        let order = result.source_of(Field::OrderNumber).unwrap();
        assert_eq!(order.rule, "order_number");
        assert_eq!(order.matched, "PREVENTA #27967");
        assert_eq!(order.line, None);

        assert!(result.source_of(Field::Notes).is_none());
    }

    #[test]
    fn test_order_number_fallback_only() {
        let result = ShippingParser::new().parse("PREVENTA #27967");
        assert_eq!(result.record.order_number, "27967");
        assert_eq!(result.record.filled(), vec![Field::OrderNumber]);
    }

    #[test]
    fn test_fallbacks_do_not_overwrite_pairs() {
        let text = "Correo\nventas@tienda.cl\nRUT\n11.111.111-1\n\
                    Copia a cliente@gmail.com, RUT 22.222.222-2\nTeléfono\n+56 9 1111 2222\nAlt 987654321";
        let record = ShippingParser::new().parse(text).record;

        assert_eq!(record.email, "ventas@tienda.cl");
        assert_eq!(record.national_id, "11.111.111-1");
        assert_eq!(record.phone, "+56911112222");
    }

    #[test]
    fn test_fallbacks_fill_missing_fields() {
        let text = "Cliente Pedro Díaz\nRUT: 9.876.543-k\nFono (+56) 9 5555-4444\nmail PEDRO@DIAZ.CL";
        let record = ShippingParser::new().parse(text).record;

        assert_eq!(record.national_id, "9.876.543-K");
        assert_eq!(record.phone, "+56955554444");
        assert_eq!(record.email, "PEDRO@DIAZ.CL");
        assert_eq!(record.full_name, "");
    }

    #[test]
    fn test_fallbacks_disabled() {
        let result = ShippingParser::new()
            .with_fallbacks(false)
            .parse("PREVENTA #27967 pagado");

        assert_eq!(result.record, Record::default());
        assert!(result.flags.prepaid);
    }

    #[test]
    fn test_id_formatting_disabled() {
        let record = ShippingParser::new()
            .with_id_formatting(false)
            .parse("Envío a 12345678-5")
            .record;
        assert_eq!(record.national_id, "12345678-5");
    }

    #[test]
    fn test_empty_and_garbage_input() {
        let result = ShippingParser::new().parse("");
        assert_eq!(result.record, Record::default());
        assert_eq!(result.flags, FlagSet::default());
        assert_eq!(result.missing.len(), Field::ALL.len());

        let result = ShippingParser::new().parse("-\n-\nperson\n\u{1F4E6}\n");
        assert_eq!(result.record, Record::default());
    }

    #[test]
    fn test_byte_order_mark_before_first_label() {
        let record = ShippingParser::new()
            .parse("\u{feff}Nombre\nJuan Pérez\nTeléfono\n+56 9 1234 5678")
            .record;
        assert_eq!(record.full_name, "Juan Pérez");
        assert_eq!(record.phone, "+56912345678");
    }

    #[test]
    fn test_fullwidth_digits_are_not_numbers() {
        let record = ShippingParser::new()
            .parse("PREVENTA #２７９６７\nRUT dato １２.３４５.６７８-5")
            .record;
        assert_eq!(record.order_number, "");
        assert_eq!(record.national_id, "");
    }

    #[test]
    fn test_thin_spaces_inside_phone() {
        let record = ShippingParser::new()
            .parse("Contacto +56\u{2009}9\u{202f}8765\u{202f}4321")
            .record;
        assert_eq!(record.phone, "+56987654321");
    }

    #[test]
    fn test_calls_are_independent() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ShippingParser>();

        let parser = ShippingParser::new();
        std::thread::scope(|s| {
            let a = s.spawn(|| parser.parse("Nombre\nAna\nsucursal"));
            let b = s.spawn(|| parser.parse("Nombre\nBeto\ndomicilio"));
            let (a, b) = (a.join().unwrap(), b.join().unwrap());

            assert_eq!(a.record.full_name, "Ana");
            assert!(a.flags.pickup_at_branch && !a.flags.home_delivery);
            assert_eq!(b.record.full_name, "Beto");
            assert!(b.flags.home_delivery && !b.flags.pickup_at_branch);
        });
    }

    #[test]
    fn test_extractor_trait() {
        let extractor: &dyn ShippingExtractor = &ShippingParser::new();
        let result = extractor.extract_from_text("Teléfono\n+56 9 1234 5678");
        assert_eq!(result.record.phone, "+56912345678");
        assert_eq!(result.raw_text, "Teléfono\n+56 9 1234 5678");
    }
}
