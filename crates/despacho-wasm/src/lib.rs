//! WASM bindings for pasted order text extraction.
//!
//! The browser form calls into this crate on every paste event and keeps
//! its editable state in a [`DispatchForm`].

use wasm_bindgen::prelude::*;

use despacho_core::shipping::rules;
use despacho_core::{Field, Flag, FormState, ShippingParser};

/// Initialize panic hook for better error messages in console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Version information.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn to_js<T: serde::Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Extract shipping data from pasted text.
///
/// Returns `{ record, flags, rawText, sources, missing }`.
#[wasm_bindgen]
pub fn extract_shipping_from_text(text: &str) -> Result<JsValue, JsValue> {
    to_js(&ShippingParser::new().parse(text))
}

/// Fold text for comparison (lowercase, no diacritics, trimmed).
#[wasm_bindgen]
pub fn normalize_text(text: &str) -> String {
    rules::normalize(text)
}

/// Format a RUT as `XX.XXX.XXX-Y`.
#[wasm_bindgen]
pub fn format_rut(rut: &str) -> String {
    rules::format_rut(rut)
}

/// Record field keys in form order.
#[wasm_bindgen]
pub fn field_keys() -> js_sys::Array {
    Field::ALL.iter().map(|f| JsValue::from_str(f.key())).collect()
}

/// Flag keys in form order.
#[wasm_bindgen]
pub fn flag_keys() -> js_sys::Array {
    Flag::ALL.iter().map(|f| JsValue::from_str(f.key())).collect()
}

/// Shipping extractor class for browser use.
#[wasm_bindgen(js_name = ShippingExtractor)]
pub struct ShippingExtractorJs {
    parser: ShippingParser,
}

#[wasm_bindgen(js_class = ShippingExtractor)]
impl ShippingExtractorJs {
    /// Create a new extractor.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            parser: ShippingParser::new(),
        }
    }

    /// Configure RUT formatting.
    #[wasm_bindgen]
    pub fn set_format_national_id(&mut self, format: bool) {
        self.parser = self.parser.with_id_formatting(format);
    }

    /// Configure the whole-text fallback rules.
    #[wasm_bindgen]
    pub fn set_fallbacks(&mut self, enable: bool) {
        self.parser = self.parser.with_fallbacks(enable);
    }

    /// Extract record and flags from text.
    #[wasm_bindgen]
    pub fn extract(&self, text: &str) -> Result<JsValue, JsValue> {
        to_js(&self.parser.parse(text))
    }
}

impl Default for ShippingExtractorJs {
    fn default() -> Self {
        Self::new()
    }
}

/// Editable dispatch form state.
#[wasm_bindgen]
pub struct DispatchForm {
    parser: ShippingParser,
    state: FormState,
}

#[wasm_bindgen]
impl DispatchForm {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            parser: ShippingParser::new(),
            state: FormState::new(),
        }
    }

    /// Handle a paste: extract and merge into the current state.
    #[wasm_bindgen]
    pub fn paste(&mut self, text: &str) -> Result<JsValue, JsValue> {
        let result = self.parser.parse(text);
        self.state.apply(&result);
        self.state()
    }

    /// Apply a user edit to a field by key.
    #[wasm_bindgen]
    pub fn set_field(&mut self, key: &str, value: &str) -> Result<(), JsValue> {
        self.state
            .set_by_key(key, value)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Apply a user edit to a flag by key.
    #[wasm_bindgen]
    pub fn set_flag(&mut self, key: &str, checked: bool) -> Result<(), JsValue> {
        self.state
            .set_flag_by_key(key, checked)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Read a field value by key.
    #[wasm_bindgen]
    pub fn field(&self, key: &str) -> Result<String, JsValue> {
        let field: Field = key.parse().map_err(|e: despacho_core::FormError| {
            JsValue::from_str(&e.to_string())
        })?;
        Ok(self.state.record.get(field).to_string())
    }

    /// Whole state as `{ record, flags, rawText }`.
    #[wasm_bindgen]
    pub fn state(&self) -> Result<JsValue, JsValue> {
        to_js(&self.state)
    }

    /// Whole state as a JSON string.
    #[wasm_bindgen]
    pub fn to_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.state).map_err(|e| JsValue::from_str(&e.to_string()))
    }
}

impl Default for DispatchForm {
    fn default() -> Self {
        Self::new()
    }
}
