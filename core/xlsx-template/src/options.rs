//! FILENAME: core/xlsx-template/src/options.rs
//! PURPOSE: Render configuration, loadable from JSON.

use serde::{Deserialize, Serialize};
use template_engine::EnvironmentOptions;

use crate::error::Result;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateOptions {
    /// Evaluator settings.
    pub environment: EnvironmentOptions,

    /// Sheets to render, by name. `None` renders every sheet.
    pub sheets: Option<Vec<String>>,
}

impl TemplateOptions {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Whether the named sheet is selected for rendering.
    pub fn includes(&self, sheet: &str) -> bool {
        match &self.sheets {
            Some(names) => names.iter().any(|n| n == sheet),
            None => true,
        }
    }
}
