//! Label table and skip list for the order UI's stacked label/value dump.
//!
//! Entries are stored in normalized form and compared against normalized
//! lines by exact equality.

use crate::models::record::Field;

/// Labels recognized for one record field.
#[derive(Debug, Clone, Copy)]
pub struct LabelRule {
    pub field: Field,
    pub labels: &'static [&'static str],
}

/// Label lines in lookup order. The first rule containing a label wins.
pub static LABEL_TABLE: &[LabelRule] = &[
    LabelRule {
        field: Field::FullName,
        labels: &["nombre", "nombres", "cliente"],
    },
    LabelRule {
        field: Field::NationalId,
        labels: &["documento de identidad", "rut", "r.u.t", "r.u.t."],
    },
    LabelRule {
        field: Field::Phone,
        labels: &["telefono", "numero"],
    },
    LabelRule {
        field: Field::Email,
        labels: &["correo", "email", "e-mail"],
    },
    LabelRule {
        field: Field::Locality,
        labels: &["comuna", "ciudad"],
    },
    LabelRule {
        field: Field::StreetAddress,
        labels: &["direccion"],
    },
    LabelRule {
        field: Field::Notes,
        labels: &["indicaciones", "observaciones"],
    },
    LabelRule {
        field: Field::Region,
        labels: &["region"],
    },
    LabelRule {
        field: Field::OrderType,
        labels: &["tipo de pedido"],
    },
    LabelRule {
        field: Field::Branch,
        labels: &["sucursal"],
    },
    LabelRule {
        field: Field::OrderNumber,
        labels: &["numero de pedido", "n° de pedido", "nro de pedido", "numero de preventa"],
    },
];

/// UI chrome, section headers and empty-value placeholders.
pub static SKIP_LINES: &[&str] = &[
    "person",
    "local_shipping",
    "envio",
    "datos del cliente",
    "rango de despacho",
    "quien recibe",
    "-",
];

/// Whether a normalized line is never a label nor a value.
pub fn is_skipped(normalized: &str) -> bool {
    SKIP_LINES.contains(&normalized)
}

/// Resolve a normalized label line to its field.
pub fn field_for_label(normalized: &str) -> Option<Field> {
    LABEL_TABLE
        .iter()
        .find(|rule| rule.labels.contains(&normalized))
        .map(|rule| rule.field)
}

/// Whether a normalized line is a recognized label.
pub fn is_label(normalized: &str) -> bool {
    field_for_label(normalized).is_some()
}
