//! Presets: named bundles of generator behavior with their options.
//!
//! A preset can be written as the generator's own two-element array
//! (`["classic", { docs = { ... } }]`) or as a table with `name` and `options`
//! keys, which reads better in TOML:
//!
//! ```toml
//! [[presets]]
//! name = "classic"
//!
//! [presets.options.docs]
//! sidebarPath = "sidebars.js"
//! routeBasePath = "/"
//! ```

use std::fmt;

use serde::de::{self, IgnoredAny, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// A named preset and its options.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Preset {
    pub name: String,
    pub options: PresetOptions,
}

/// Options understood by the `classic` preset family.
///
/// Only `docs` and `theme` are checked; every other option (`blog`, `pages`,
/// `sitemap`, ...) is kept in `extra` and exported unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PresetOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub docs: Option<DocsOptions>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<ThemeOptions>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Docs plugin options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocsOptions {
    /// Docs source directory, relative to the site root
    #[serde(default = "default_docs_path")]
    pub path: String,

    /// Sidebar definition file, relative to the site root
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sidebar_path: Option<String>,

    /// URL prefix for doc routes
    #[serde(default = "default_route_base_path")]
    pub route_base_path: String,

    /// Base URL for "edit this page" links
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edit_url: Option<String>,

    /// Other docs plugin options, passed through
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn default_docs_path() -> String {
    "docs".to_string()
}

fn default_route_base_path() -> String {
    "docs".to_string()
}

impl Default for DocsOptions {
    fn default() -> Self {
        Self {
            path: default_docs_path(),
            sidebar_path: None,
            route_base_path: default_route_base_path(),
            edit_url: None,
            extra: Map::new(),
        }
    }
}

impl DocsOptions {
    /// Route prefix normalized to a leading and trailing slash.
    pub fn route_base(&self) -> String {
        let trimmed = self.route_base_path.trim_matches('/');
        if trimmed.is_empty() {
            "/".to_string()
        } else {
            format!("/{trimmed}/")
        }
    }
}

/// Theme plugin options.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeOptions {
    /// Stylesheet appended after the theme's own CSS
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_css: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl<'de> Deserialize<'de> for Preset {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(PresetVisitor)
    }
}

struct PresetVisitor;

impl<'de> Visitor<'de> for PresetVisitor {
    type Value = Preset;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a preset as [name, options] or { name, options }")
    }

    fn visit_str<E: de::Error>(self, name: &str) -> Result<Preset, E> {
        Ok(Preset {
            name: name.to_string(),
            options: PresetOptions::default(),
        })
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Preset, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let name: String = seq
            .next_element()?
            .ok_or_else(|| de::Error::invalid_length(0, &self))?;
        let options: PresetOptions = seq.next_element()?.unwrap_or_default();

        if seq.next_element::<IgnoredAny>()?.is_some() {
            return Err(de::Error::invalid_length(3, &self));
        }

        Ok(Preset { name, options })
    }

    fn visit_map<A>(self, mut map: A) -> Result<Preset, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut name = None;
        let mut options = None;

        while let Some(key) = map.next_key::<String>()? {
            match key.as_str() {
                "name" => {
                    if name.is_some() {
                        return Err(de::Error::duplicate_field("name"));
                    }
                    name = Some(map.next_value()?);
                }
                "options" => {
                    if options.is_some() {
                        return Err(de::Error::duplicate_field("options"));
                    }
                    options = Some(map.next_value()?);
                }
                _ => {
                    map.next_value::<IgnoredAny>()?;
                }
            }
        }

        Ok(Preset {
            name: name.ok_or_else(|| de::Error::missing_field("name"))?,
            options: options.unwrap_or_default(),
        })
    }
}
