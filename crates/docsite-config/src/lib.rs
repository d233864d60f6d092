//! Typed configuration for a documentation site.
//!
//! This crate models the site configuration object consumed by the static-site
//! generator: identity, broken-link policies, presets, navbar, footer and
//! syntax-highlighting settings. Configuration is loaded from TOML, JSON or YAML
//! and validated once, at load time.

pub mod diagnostics;
pub mod loader;
pub mod model;
pub mod preset;
pub mod validate;

pub use diagnostics::{Diagnostic, Diagnostics};
pub use loader::{load, parse_str, ConfigError, Format, Loaded};
pub use model::{
    BrokenLinkPolicy, Footer, FooterLink, FooterStyle, I18n, LinkGroup, Logo, NavItem,
    NavItemKind, Navbar, Position, Prism, SiteConfig, ThemeConfig,
};
pub use preset::{DocsOptions, Preset, PresetOptions, ThemeOptions};
pub use validate::validate;
