//! JSON export.

use docsite_config::SiteConfig;
use serde_json::{json, Value};

use crate::{expand_year, ExportError, ExportOptions};

/// Convert a config into the generator's JSON shape.
///
/// Presets become `[name, options]` pairs and `{year}` in the copyright is
/// expanded. Prism themes stay as names; the consumer maps them to theme
/// objects.
pub fn to_value(config: &SiteConfig, options: &ExportOptions) -> Result<Value, ExportError> {
    let mut value = serde_json::to_value(config)?;

    let presets = config
        .presets
        .iter()
        .map(|preset| Ok(json!([preset.name, serde_json::to_value(&preset.options)?])))
        .collect::<Result<Vec<_>, serde_json::Error>>()?;
    value["presets"] = Value::Array(presets);

    if let Some(Value::String(copyright)) = value.pointer_mut("/themeConfig/footer/copyright") {
        *copyright = expand_year(copyright, options.year);
    }

    Ok(value)
}

/// Pretty-printed JSON text, newline-terminated.
pub fn to_json(config: &SiteConfig, options: &ExportOptions) -> Result<String, ExportError> {
    let mut text = serde_json::to_string_pretty(&to_value(config, options)?)?;
    text.push('\n');
    Ok(text)
}
