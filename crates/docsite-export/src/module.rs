//! CommonJS config module export.
//!
//! Renders a `docusaurus.config.js`-style module. Plain values are emitted
//! as JSON literals; file references become `require.resolve` calls and
//! prism themes become `require`d theme modules.

use docsite_config::{Preset, SiteConfig};
use minijinja::{context, Environment};
use serde::Serialize;
use serde_json::Value;

use crate::json::to_value;
use crate::{ExportError, ExportOptions};

/// Keys rendered by dedicated template sections instead of the field loop.
const SECTION_KEYS: &[&str] = &["presets", "themeConfig"];

/// A preset, pre-rendered as JavaScript fragments.
#[derive(Debug, Serialize)]
struct PresetContext {
    name: String,
    options: Vec<OptionContext>,
}

/// One preset option: an object rendered key by key, or a plain literal.
#[derive(Debug, Serialize)]
struct OptionContext {
    key: String,
    entries: Option<Vec<(String, String)>>,
    literal: Option<String>,
}

/// Where a rendered module is written, relative to the site.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModuleLocation {
    /// Config file the module is generated from, named in the header comment
    pub source: Option<String>,

    /// `/`-separated path from the module's directory to the site root;
    /// empty when the module sits in the site root
    pub site_dir: String,
}

/// Renders config modules with minijinja.
pub struct ModuleRenderer {
    env: Environment<'static>,
}

impl ModuleRenderer {
    /// Create a renderer with the bundled module template.
    pub fn new() -> Self {
        let mut env = Environment::new();
        env.set_keep_trailing_newline(true);

        env.add_template("config.module", MODULE_TEMPLATE)
            .expect("Failed to add module template");

        Self { env }
    }

    /// Render `config` as a CommonJS module written at `location`.
    ///
    /// File references are rewritten relative to the module, so the generator
    /// resolves them to the same files the config names.
    pub fn render(
        &self,
        config: &SiteConfig,
        options: &ExportOptions,
        location: &ModuleLocation,
    ) -> Result<String, ExportError> {
        let value = to_value(config, options)?;

        let mut fields = Vec::new();
        if let Value::Object(map) = &value {
            for (key, field) in map {
                if !SECTION_KEYS.contains(&key.as_str()) {
                    fields.push((key.clone(), serde_json::to_string(field)?));
                }
            }
        }

        let presets = config
            .presets
            .iter()
            .map(|preset| preset_context(preset, &location.site_dir))
            .collect::<Result<Vec<_>, _>>()?;

        let theme = &value["themeConfig"];
        let footer = match theme.get("footer") {
            Some(footer) => Some(serde_json::to_string_pretty(footer)?),
            None => None,
        };
        let prism = &config.theme_config.prism;

        let tmpl = self.env.get_template("config.module")?;
        let rendered = tmpl.render(context! {
            source => location.source.as_deref(),
            light_theme => js_string(&format!("prism-react-renderer/themes/{}", prism.theme))?,
            dark_theme => js_string(&format!("prism-react-renderer/themes/{}", prism.dark_theme))?,
            fields => fields,
            presets => presets,
            navbar => serde_json::to_string_pretty(&theme["navbar"])?,
            footer => footer,
            additional_languages => serde_json::to_string(&prism.additional_languages)?,
        })?;

        Ok(rendered)
    }
}

impl Default for ModuleRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Render `config` as a CommonJS module with the default renderer.
pub fn to_module(config: &SiteConfig, options: &ExportOptions) -> Result<String, ExportError> {
    ModuleRenderer::new().render(config, options, &ModuleLocation::default())
}

fn preset_context(preset: &Preset, site_dir: &str) -> Result<PresetContext, serde_json::Error> {
    let mut options = Vec::new();

    if let Value::Object(map) = serde_json::to_value(&preset.options)? {
        for (key, value) in map {
            let context = match (key.as_str(), value) {
                ("docs" | "theme", Value::Object(fields)) => {
                    let mut entries = Vec::new();
                    for (field, value) in fields {
                        let rendered = match (&value, key.as_str(), field.as_str()) {
                            (Value::String(path), "docs", "sidebarPath")
                            | (Value::String(path), "theme", "customCss") => {
                                require_resolve(path, site_dir)?
                            }
                            _ => serde_json::to_string(&value)?,
                        };
                        entries.push((js_key(&field)?, rendered));
                    }
                    OptionContext {
                        key: js_key(&key)?,
                        entries: Some(entries),
                        literal: None,
                    }
                }
                (_, value) => OptionContext {
                    key: js_key(&key)?,
                    entries: None,
                    literal: Some(serde_json::to_string(&value)?),
                },
            };
            options.push(context);
        }
    }

    Ok(PresetContext {
        name: js_string(&preset.name)?,
        options,
    })
}

fn js_string(value: &str) -> Result<String, serde_json::Error> {
    serde_json::to_string(value)
}

/// Object key, quoted unless it is a plain identifier.
fn js_key(key: &str) -> Result<String, serde_json::Error> {
    let mut chars = key.chars();
    let identifier = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_' || c == '$')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$');

    if identifier {
        Ok(key.to_string())
    } else {
        js_string(key)
    }
}

/// `require.resolve(...)` for a site-relative path, as seen from the module.
fn require_resolve(path: &str, site_dir: &str) -> Result<String, serde_json::Error> {
    let path = if path.starts_with('/') {
        path.to_string()
    } else {
        let relative = path.trim_start_matches("./");
        let joined = if site_dir.is_empty() {
            relative.to_string()
        } else {
            format!("{}/{relative}", site_dir.trim_end_matches('/'))
        };
        if joined.starts_with("../") || joined.starts_with('/') {
            joined
        } else {
            format!("./{joined}")
        }
    };
    Ok(format!("require.resolve({})", js_string(&path)?))
}

const MODULE_TEMPLATE: &str = r#"// @ts-check
{%- if source %}
// Generated by docsite from {{ source }}; edit that file instead.
{%- endif %}

const lightCodeTheme = require({{ light_theme }});
const darkCodeTheme = require({{ dark_theme }});

/** @type {import('@docusaurus/types').Config} */
const config = {
{%- for key, value in fields %}
  {{ key }}: {{ value }},
{%- endfor %}

  presets: [
{%- for preset in presets %}
    [
      {{ preset.name }},
      /** @type {import('@docusaurus/preset-classic').Options} */
      ({
{%- for option in preset.options %}
{%- if option.entries is not none %}
        {{ option.key }}: {
{%- for key, value in option.entries %}
          {{ key }}: {{ value }},
{%- endfor %}
        },
{%- else %}
        {{ option.key }}: {{ option.literal }},
{%- endif %}
{%- endfor %}
      }),
    ],
{%- endfor %}
  ],

  themeConfig:
    /** @type {import('@docusaurus/preset-classic').ThemeConfig} */
    ({
      navbar: {{ navbar|indent(6) }},
{%- if footer %}
      footer: {{ footer|indent(6) }},
{%- endif %}
      prism: {
        additionalLanguages: {{ additional_languages }},
        theme: lightCodeTheme,
        darkTheme: darkCodeTheme,
      },
    }),
};

module.exports = config;
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use docsite_config::{parse_str, Format};

    const SITE: &str = r#"
title = "gx.cljc"
url = "https://gx.kepler16.com"
presets = [["classic", { docs = { sidebarPath = "sidebars.js", routeBasePath = "/" }, theme = { customCss = "./src/css/custom.css" } }]]

[themeConfig.footer]
copyright = "Copyright © {year} Kepler 16 Ltd."

[themeConfig.prism]
additionalLanguages = ["clojure"]
darkTheme = "vsDark"
"#;

    fn render_at(location: ModuleLocation) -> String {
        let loaded = parse_str(SITE, Format::Toml).unwrap();
        ModuleRenderer::new()
            .render(&loaded.config, &ExportOptions { year: 2024 }, &location)
            .unwrap()
    }

    fn render(source: Option<&str>) -> String {
        render_at(ModuleLocation {
            source: source.map(str::to_string),
            ..ModuleLocation::default()
        })
    }

    #[test]
    fn renders_scalar_fields_as_literals() {
        let module = render(None);

        assert!(module.starts_with("// @ts-check\n\nconst lightCodeTheme"));
        assert!(module.contains("  title: \"gx.cljc\",\n"));
        assert!(module.contains("  baseUrl: \"/\",\n"));
        assert!(module.contains("  i18n: {\"defaultLocale\":\"en\",\"locales\":[\"en\"]},\n"));
        assert!(module.ends_with("module.exports = config;\n"));
    }

    #[test]
    fn resolves_file_references() {
        let module = render(None);

        assert!(module.contains("sidebarPath: require.resolve(\"./sidebars.js\"),"));
        assert!(module.contains("customCss: require.resolve(\"./src/css/custom.css\"),"));
        assert!(module.contains("routeBasePath: \"/\","));
    }

    #[test]
    fn resolves_file_references_from_module_directory() {
        let module = render_at(ModuleLocation {
            source: None,
            site_dir: "..".to_string(),
        });

        assert!(module.contains("sidebarPath: require.resolve(\"../sidebars.js\"),"));
        assert!(module.contains("customCss: require.resolve(\"../src/css/custom.css\"),"));
    }

    #[test]
    fn passes_unchecked_preset_options_through() {
        let loaded = parse_str(
            r#"
title = "Docs"
url = "https://example.com"
presets = [["classic", { blog = false, docs = { showLastUpdateTime = true }, sitemap = { "change-freq" = "weekly" } }]]
"#,
            Format::Toml,
        )
        .unwrap();

        let module = to_module(&loaded.config, &ExportOptions { year: 2024 }).unwrap();

        assert!(module.contains("        blog: false,\n"));
        assert!(module.contains("          showLastUpdateTime: true,\n"));
        assert!(module.contains("        sitemap: {\"change-freq\":\"weekly\"},\n"));
    }

    #[test]
    fn requires_prism_themes() {
        let module = render(None);

        assert!(module.contains("require(\"prism-react-renderer/themes/github\");"));
        assert!(module.contains("require(\"prism-react-renderer/themes/vsDark\");"));
        assert!(module.contains("additionalLanguages: [\"clojure\"],"));
        assert!(module.contains("darkTheme: darkCodeTheme,"));
    }

    #[test]
    fn expands_year_in_footer() {
        let module = render(None);

        assert!(module.contains("Copyright © 2024 Kepler 16 Ltd."));
    }

    #[test]
    fn names_source_in_header() {
        let module = render(Some("site.toml"));

        assert!(module.contains("// Generated by docsite from site.toml; edit that file instead.\n"));
    }

    #[test]
    fn omits_footer_when_absent() {
        let loaded = parse_str("title = \"Docs\"\nurl = \"https://example.com\"\n", Format::Toml)
            .unwrap();

        let module = to_module(&loaded.config, &ExportOptions { year: 2024 }).unwrap();

        assert!(!module.contains("footer:"));
        assert!(module.contains("presets: [\n  ],"));
    }
}
