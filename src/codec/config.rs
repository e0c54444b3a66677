//! Rendering options for JSON text.

use serde_json::Value;

use crate::error::AcsetResult;

/// How documents are rendered to text.
#[derive(Debug, Clone, Default)]
pub struct CodecConfig {
    /// Indent output over several lines.
    pub pretty: bool,
}

impl CodecConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set pretty flag.
    pub fn pretty(mut self, value: bool) -> Self {
        self.pretty = value;
        self
    }

    /// Render a document to text.
    pub fn render(&self, doc: &Value) -> AcsetResult<String> {
        let text = if self.pretty {
            serde_json::to_string_pretty(doc)?
        } else {
            serde_json::to_string(doc)?
        };
        Ok(text)
    }
}
