//! Editable form state held by the presentation layer.
//!
//! The form is seeded from extraction results and then edited field by
//! field. Edits never go back through the extractor.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::FormError;
use crate::shipping::ExtractionResult;

use super::record::{Field, Flag, FlagSet, Record};

/// Live editable copy of the dispatch form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FormState {
    /// Current field values.
    pub record: Record,
    /// Current flag values.
    pub flags: FlagSet,
    /// The last pasted text.
    pub raw_text: String,
}

impl FormState {
    /// Create an empty form.
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge an extraction result into the form.
    ///
    /// Only fields the extractor filled are overwritten, so earlier edits to
    /// fields it left empty survive. Flags are replaced as a whole.
    pub fn apply(&mut self, result: &ExtractionResult) {
        for (field, value) in result.record.iter() {
            if !value.is_empty() {
                self.record.set(field, value);
            }
        }
        self.flags = result.flags;
        self.raw_text.clone_from(&result.raw_text);

        debug!(
            "Applied extraction with {} filled fields",
            result.record.filled().len()
        );
    }

    /// Overwrite a field with a user edit.
    pub fn set_field(&mut self, field: Field, value: impl Into<String>) {
        self.record.set(field, value);
    }

    /// Overwrite a flag with a user edit.
    pub fn set_flag(&mut self, flag: Flag, value: bool) {
        self.flags.set(flag, value);
    }

    /// Overwrite a field addressed by its key (e.g. `"fullName"`).
    pub fn set_by_key(&mut self, key: &str, value: impl Into<String>) -> Result<(), FormError> {
        let field: Field = key.parse()?;
        self.set_field(field, value);
        Ok(())
    }

    /// Overwrite a flag addressed by its key (e.g. `"onAccount"`).
    pub fn set_flag_by_key(&mut self, key: &str, value: bool) -> Result<(), FormError> {
        let flag: Flag = key.parse()?;
        self.set_flag(flag, value);
        Ok(())
    }

    /// Parse a `key=value` edit and apply it to a field.
    pub fn apply_field_edit(&mut self, edit: &str) -> Result<(), FormError> {
        let (key, value) = edit.split_once('=').unwrap_or((edit, ""));
        self.set_by_key(key, value.trim())
    }

    /// Parse a `key=bool` edit and apply it to a flag. A bare key sets the flag.
    pub fn apply_flag_edit(&mut self, edit: &str) -> Result<(), FormError> {
        let (key, raw) = edit.split_once('=').unwrap_or((edit, "true"));
        let value = parse_bool(raw).ok_or_else(|| FormError::InvalidFlagValue {
            flag: key.trim().to_string(),
            value: raw.trim().to_string(),
        })?;
        self.set_flag_by_key(key, value)
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "si" | "sí" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}
