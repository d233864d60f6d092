//! Export a validated site configuration in the generator's own format.
//!
//! The generator reads either a JSON document or a CommonJS config module.
//! Both keep field order and the generator's camelCase key names.

pub mod json;
pub mod module;

pub use json::{to_json, to_value};
pub use module::{to_module, ModuleLocation, ModuleRenderer};

use chrono::Datelike;

/// Settings that vary per export run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportOptions {
    /// Substituted for `{year}` in the footer copyright
    pub year: i32,
}

impl ExportOptions {
    /// Options for an export happening now.
    pub fn current() -> Self {
        Self {
            year: chrono::Local::now().year(),
        }
    }
}

/// Errors that can occur during export.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("Failed to serialize config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to render config module: {0}")]
    Template(#[from] minijinja::Error),
}

/// Replace the `{year}` placeholder in a copyright line.
pub fn expand_year(text: &str, year: i32) -> String {
    text.replace("{year}", &year.to_string())
}
