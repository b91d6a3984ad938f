//! Core library for turning pasted order text into shipping data.
//!
//! This crate provides:
//! - Diacritic-insensitive text normalization
//! - A stacked label/value pair extractor for order-management UI dumps
//! - Fallback rules for order number, email, RUT and phone
//! - Shipping flag inference (cash on delivery, prepaid, branch pickup, home delivery)
//! - An editable form state the presentation layer merges results into

pub mod error;
pub mod models;
pub mod shipping;

pub use error::{DespachoError, FormError, Result};
pub use models::config::DespachoConfig;
pub use models::form::FormState;
pub use models::record::{Field, Flag, FlagSet, Record};
pub use shipping::{ExtractionResult, FieldSource, ShippingExtractor, ShippingParser};
