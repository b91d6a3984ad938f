//! Configuration structures for the extraction pipeline.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::shipping::ShippingParser;

/// Main configuration for despacho.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DespachoConfig {
    /// Field extraction configuration.
    pub extraction: ExtractionConfig,

    /// Output configuration.
    pub output: OutputConfig,
}

/// Field extraction configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Reformat RUTs as `XX.XXX.XXX-Y`.
    pub format_national_id: bool,

    /// Run the whole-text fallback rules after the stacked pass.
    pub enable_fallbacks: bool,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            format_national_id: true,
            enable_fallbacks: true,
        }
    }
}

/// Output configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Pretty-print JSON output.
    pub pretty_json: bool,

    /// Include which rule filled each field.
    pub include_sources: bool,
}

impl DespachoConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Build a parser configured from the extraction section.
    pub fn parser(&self) -> ShippingParser {
        ShippingParser::new()
            .with_id_formatting(self.extraction.format_national_id)
            .with_fallbacks(self.extraction.enable_fallbacks)
    }
}
