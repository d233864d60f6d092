//! The site configuration object.
//!
//! Field names follow the generator's camelCase contract (`baseUrl`,
//! `onBrokenLinks`, `themeConfig`, ...) so a config file reads the same in
//! every supported format.

use serde::{Deserialize, Serialize};

use crate::preset::{DocsOptions, Preset};

/// Root of the site configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteConfig {
    /// Site title, shown in the browser tab and navbar fallback
    pub title: String,

    /// One-line description of the site
    #[serde(default)]
    pub tagline: String,

    /// Canonical origin, e.g. `https://gx.kepler16.com`
    pub url: String,

    /// Path the site is served under; always starts and ends with `/`
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Reaction to broken links in navbar, footer and pages
    #[serde(default)]
    pub on_broken_links: BrokenLinkPolicy,

    /// Reaction to unresolvable links between markdown files
    #[serde(default = "default_markdown_policy")]
    pub on_broken_markdown_links: BrokenLinkPolicy,

    /// Favicon path relative to the static directory
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub favicon: Option<String>,

    #[serde(default)]
    pub i18n: I18n,

    /// Ordered preset list; order is significant to the generator
    #[serde(default)]
    pub presets: Vec<Preset>,

    #[serde(default)]
    pub theme_config: ThemeConfig,
}

fn default_base_url() -> String {
    "/".to_string()
}

fn default_markdown_policy() -> BrokenLinkPolicy {
    BrokenLinkPolicy::Warn
}

impl SiteConfig {
    /// Docs plugin options, taken from the first preset that configures docs.
    pub fn docs(&self) -> Option<&DocsOptions> {
        self.presets.iter().find_map(|p| p.options.docs.as_ref())
    }
}

/// How the generator reacts to a broken link.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BrokenLinkPolicy {
    /// Fail the build
    #[default]
    Throw,
    /// Report and continue
    Warn,
    /// Say nothing
    Ignore,
}

/// Localization settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct I18n {
    #[serde(default = "default_locale")]
    pub default_locale: String,

    /// Ordered locale codes; must include `default_locale`
    #[serde(default = "default_locales")]
    pub locales: Vec<String>,
}

fn default_locale() -> String {
    "en".to_string()
}

fn default_locales() -> Vec<String> {
    vec![default_locale()]
}

impl Default for I18n {
    fn default() -> Self {
        Self {
            default_locale: default_locale(),
            locales: default_locales(),
        }
    }
}

/// Presentation settings handed to the theme.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeConfig {
    #[serde(default)]
    pub navbar: Navbar,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub footer: Option<Footer>,

    #[serde(default)]
    pub prism: Prism,
}

/// Top navigation bar.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Navbar {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<Logo>,

    #[serde(default)]
    pub items: Vec<NavItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Logo {
    pub alt: String,
    pub src: String,

    /// Alternate image for dark mode
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub src_dark: Option<String>,
}

/// A navbar entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavItem {
    /// Item type; `doc` links to a document by id
    #[serde(rename = "type", default, skip_serializing_if = "NavItemKind::is_default")]
    pub kind: NavItemKind,

    #[serde(default)]
    pub label: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,

    #[serde(default)]
    pub position: Position,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NavItemKind {
    /// Plain link via `to` or `href`
    #[default]
    Default,
    /// Link to a document via `docId`
    Doc,
}

impl NavItemKind {
    pub fn is_default(&self) -> bool {
        *self == Self::Default
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    #[default]
    Left,
    Right,
}

/// Site footer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Footer {
    #[serde(default)]
    pub style: FooterStyle,

    /// Link columns, rendered in order
    #[serde(default)]
    pub links: Vec<LinkGroup>,

    /// Copyright line; `{year}` is replaced with the build year on export
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub copyright: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FooterStyle {
    #[default]
    Dark,
    Light,
}

/// A titled column of footer links.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkGroup {
    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub items: Vec<FooterLink>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FooterLink {
    #[serde(default)]
    pub label: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
}

/// Syntax highlighting settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prism {
    /// Languages loaded on top of the highlighter's defaults
    #[serde(default)]
    pub additional_languages: Vec<String>,

    /// Light-mode theme name
    #[serde(default = "default_light_theme")]
    pub theme: String,

    /// Dark-mode theme name
    #[serde(default = "default_dark_theme")]
    pub dark_theme: String,
}

fn default_light_theme() -> String {
    "github".to_string()
}

fn default_dark_theme() -> String {
    "dracula".to_string()
}

impl Default for Prism {
    fn default() -> Self {
        Self {
            additional_languages: Vec::new(),
            theme: default_light_theme(),
            dark_theme: default_dark_theme(),
        }
    }
}

/// Themes bundled with the highlighter.
pub const BUNDLED_PRISM_THEMES: &[&str] = &[
    "dracula",
    "duotoneDark",
    "duotoneLight",
    "github",
    "nightOwl",
    "nightOwlLight",
    "oceanicNext",
    "okaidia",
    "palenight",
    "shadesOfPurple",
    "synthwave84",
    "ultramin",
    "vsDark",
    "vsLight",
];
