//! Loading a site configuration from disk or memory.

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;

use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::model::SiteConfig;
use crate::validate::validate;

/// Supported config file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Toml,
    Json,
    Yaml,
}

impl Format {
    /// Pick a format from the file extension, defaulting to TOML.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::Json,
            Some("yaml") | Some("yml") => Self::Yaml,
            _ => Self::Toml,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Toml => "TOML",
            Self::Json => "JSON",
            Self::Yaml => "YAML",
        }
    }
}

/// A validated configuration together with where it came from.
#[derive(Debug, Clone)]
pub struct Loaded {
    pub config: SiteConfig,

    /// Directory containing the config file; relative paths resolve here
    pub root: PathBuf,

    /// Non-fatal findings, including unknown keys
    pub warnings: Vec<Diagnostic>,
}

impl Loaded {
    /// Resolve a config-relative path against the site root.
    pub fn resolve(&self, relative: &str) -> PathBuf {
        self.root.join(relative.trim_start_matches("./"))
    }
}

/// Errors that can occur when loading a config.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read {}", .0.display())]
    Io(PathBuf, #[source] std::io::Error),

    #[error("Invalid {format} config: {message}")]
    Parse {
        format: &'static str,
        message: String,
    },

    #[error("{0}")]
    Invalid(Diagnostics),
}

/// Load and validate a config file.
pub fn load(path: &Path) -> Result<Loaded, ConfigError> {
    let source =
        fs::read_to_string(path).map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;

    let mut loaded = parse_str(&source, Format::from_path(path))?;
    loaded.root = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));

    tracing::debug!("Loaded config from {}", path.display());
    Ok(loaded)
}

/// Parse and validate config text. The returned root is the current directory.
pub fn parse_str(source: &str, format: Format) -> Result<Loaded, ConfigError> {
    let (config, ignored) = match format {
        Format::Toml => deserialize_toml(source),
        Format::Json => deserialize_json(source),
        Format::Yaml => deserialize_yaml(source),
    }
    .map_err(|message| ConfigError::Parse {
        format: format.name(),
        message,
    })?;

    let mut warnings = validate(&config)
        .into_result()
        .map_err(ConfigError::Invalid)?;

    warnings.extend(
        ignored
            .into_iter()
            .map(|field| Diagnostic::new(field, "unknown field, ignored")),
    );

    Ok(Loaded {
        config,
        root: PathBuf::from("."),
        warnings,
    })
}

/// Render an ignored-field path the way validation diagnostics name fields,
/// e.g. `themeConfig.navbar.items[0].className`.
fn field_path(path: &serde_ignored::Path) -> String {
    use serde_ignored::Path;

    match path {
        Path::Root => String::new(),
        Path::Seq { parent, index } => format!("{}[{index}]", field_path(parent)),
        Path::Map { parent, key } => {
            let parent = field_path(parent);
            if parent.is_empty() {
                key.clone()
            } else {
                format!("{parent}.{key}")
            }
        }
        Path::Some { parent }
        | Path::NewtypeStruct { parent }
        | Path::NewtypeVariant { parent } => field_path(parent),
    }
}

fn deserialize_toml<T: DeserializeOwned>(source: &str) -> Result<(T, Vec<String>), String> {
    let mut ignored = Vec::new();
    let deserializer = toml::Deserializer::new(source);
    let value = serde_ignored::deserialize(deserializer, |path| ignored.push(field_path(&path)))
        .map_err(|e| e.to_string())?;
    Ok((value, ignored))
}

fn deserialize_json<T: DeserializeOwned>(source: &str) -> Result<(T, Vec<String>), String> {
    let mut ignored = Vec::new();
    let mut deserializer = serde_json::Deserializer::from_str(source);
    let value =
        serde_ignored::deserialize(&mut deserializer, |path| ignored.push(field_path(&path)))
            .map_err(|e| e.to_string())?;
    deserializer.end().map_err(|e| e.to_string())?;
    Ok((value, ignored))
}

fn deserialize_yaml<T: DeserializeOwned>(source: &str) -> Result<(T, Vec<String>), String> {
    let mut ignored = Vec::new();
    let deserializer = serde_yaml::Deserializer::from_str(source);
    let value = serde_ignored::deserialize(deserializer, |path| ignored.push(field_path(&path)))
        .map_err(|e| e.to_string())?;
    Ok((value, ignored))
}
