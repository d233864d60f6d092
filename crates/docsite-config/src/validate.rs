//! Load-time validation of a site configuration.
//!
//! Every check appends to a [`Diagnostics`] set instead of returning early, so
//! a single run reports every problem in the file.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use url::Url;

use crate::diagnostics::Diagnostics;
use crate::model::{
    Footer, I18n, NavItem, NavItemKind, Navbar, Prism, SiteConfig, BUNDLED_PRISM_THEMES,
};
use crate::preset::Preset;

static LOCALE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z]{2,3}(-[A-Za-z0-9]{2,8})*$").expect("Invalid locale regex")
});

static LANGUAGE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z][a-z0-9-]*$").expect("Invalid language regex"));

/// Validate a parsed configuration.
pub fn validate(config: &SiteConfig) -> Diagnostics {
    let mut diags = Diagnostics::new();

    if config.title.trim().is_empty() {
        diags.error("title", "must not be empty");
    }

    check_site_url(&config.url, &mut diags);

    if !config.base_url.starts_with('/') || !config.base_url.ends_with('/') {
        diags.error_with_hint(
            "baseUrl",
            format!("`{}` must start and end with `/`", config.base_url),
            "use `/` for a site served at the root",
        );
    }

    if let Some(favicon) = &config.favicon {
        require_non_empty("favicon", favicon, &mut diags);
    }

    check_i18n(&config.i18n, &mut diags);
    check_presets(&config.presets, &mut diags);
    check_navbar(&config.theme_config.navbar, &mut diags);
    if let Some(footer) = &config.theme_config.footer {
        check_footer(footer, &mut diags);
    }
    check_prism(&config.theme_config.prism, &mut diags);

    diags
}

fn require_non_empty(field: &str, value: &str, diags: &mut Diagnostics) -> bool {
    if value.trim().is_empty() {
        diags.error(field, "must not be empty");
        false
    } else {
        true
    }
}

fn check_site_url(url: &str, diags: &mut Diagnostics) {
    if !require_non_empty("url", url, diags) {
        return;
    }

    let parsed = match Url::parse(url) {
        Ok(parsed) => parsed,
        Err(e) => {
            diags.error("url", format!("`{url}` is not a valid URL: {e}"));
            return;
        }
    };

    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        diags.error("url", format!("scheme `{}` is not http or https", parsed.scheme()));
    }

    if parsed.path() != "/" || parsed.query().is_some() || parsed.fragment().is_some() {
        diags.error_with_hint(
            "url",
            format!("`{url}` must be an origin without a path"),
            format!("set url to `{}` and move the path into baseUrl", parsed.origin().ascii_serialization()),
        );
    }
}

fn check_i18n(i18n: &I18n, diags: &mut Diagnostics) {
    if i18n.locales.is_empty() {
        diags.error("i18n.locales", "must list at least one locale");
        return;
    }

    let mut seen = HashSet::new();
    for (i, locale) in i18n.locales.iter().enumerate() {
        let field = format!("i18n.locales[{i}]");
        if !LOCALE_RE.is_match(locale) {
            diags.error(&field, format!("`{locale}` is not a locale code"));
        }
        if !seen.insert(locale.as_str()) {
            diags.error(&field, format!("duplicate locale `{locale}`"));
        }
    }

    if !i18n.locales.contains(&i18n.default_locale) {
        diags.error_with_hint(
            "i18n.defaultLocale",
            format!("`{}` is not listed in i18n.locales", i18n.default_locale),
            format!("add \"{}\" to i18n.locales", i18n.default_locale),
        );
    }
}

fn check_presets(presets: &[Preset], diags: &mut Diagnostics) {
    let mut names = HashSet::new();
    let mut docs_preset: Option<&str> = None;

    for (i, preset) in presets.iter().enumerate() {
        let field = format!("presets[{i}]");

        if require_non_empty(&format!("{field}.name"), &preset.name, diags)
            && !names.insert(preset.name.as_str())
        {
            diags.error(format!("{field}.name"), format!("duplicate preset `{}`", preset.name));
        }

        if let Some(docs) = &preset.options.docs {
            let docs_field = format!("{field}.options.docs");

            if let Some(first) = docs_preset {
                diags.error(
                    &docs_field,
                    format!("docs are already configured by preset `{first}`"),
                );
            } else {
                docs_preset = Some(preset.name.as_str());
            }

            require_non_empty(&format!("{docs_field}.path"), &docs.path, diags);

            if docs.route_base_path.contains(['?', '#', ':']) {
                diags.error(
                    format!("{docs_field}.routeBasePath"),
                    format!("`{}` must be a plain path", docs.route_base_path),
                );
            }

            if let Some(sidebar) = &docs.sidebar_path {
                require_non_empty(&format!("{docs_field}.sidebarPath"), sidebar, diags);
            }

            if let Some(edit_url) = &docs.edit_url {
                if Url::parse(edit_url).is_err() {
                    diags.error(
                        format!("{docs_field}.editUrl"),
                        format!("`{edit_url}` is not an absolute URL"),
                    );
                }
            }
        }

        if let Some(css) = preset.options.theme.as_ref().and_then(|t| t.custom_css.as_ref()) {
            require_non_empty(&format!("{field}.options.theme.customCss"), css, diags);
        }
    }
}

fn check_navbar(navbar: &Navbar, diags: &mut Diagnostics) {
    if let Some(logo) = &navbar.logo {
        require_non_empty("themeConfig.navbar.logo.src", &logo.src, diags);
        if let Some(dark) = &logo.src_dark {
            require_non_empty("themeConfig.navbar.logo.srcDark", dark, diags);
        }
    }

    for (i, item) in navbar.items.iter().enumerate() {
        check_nav_item(&format!("themeConfig.navbar.items[{i}]"), item, diags);
    }
}

fn check_nav_item(field: &str, item: &NavItem, diags: &mut Diagnostics) {
    require_non_empty(&format!("{field}.label"), &item.label, diags);

    for (name, value) in [("docId", &item.doc_id), ("to", &item.to), ("href", &item.href)] {
        if let Some(value) = value {
            require_non_empty(&format!("{field}.{name}"), value, diags);
        }
    }

    match item.kind {
        NavItemKind::Doc => {
            if item.doc_id.is_none() {
                diags.error(field, "doc items need a docId");
            }
            if item.to.is_some() || item.href.is_some() {
                diags.error(field, "doc items link by docId only; remove to/href");
            }
        }
        NavItemKind::Default => {
            if item.doc_id.is_some() {
                diags.error_with_hint(field, "docId is only read on doc items", "set type = \"doc\"");
            }
            match (&item.to, &item.href) {
                (None, None) => diags.error(field, "link needs a target: to or href"),
                (Some(_), Some(_)) => diags.error(field, "set either to or href, not both"),
                _ => {}
            }
        }
    }
}

fn check_footer(footer: &Footer, diags: &mut Diagnostics) {
    for (g, group) in footer.links.iter().enumerate() {
        let group_field = format!("themeConfig.footer.links[{g}]");
        require_non_empty(&format!("{group_field}.title"), &group.title, diags);

        for (i, link) in group.items.iter().enumerate() {
            let field = format!("{group_field}.items[{i}]");
            require_non_empty(&format!("{field}.label"), &link.label, diags);

            match (&link.to, &link.href) {
                (None, None) => diags.error(&field, "link needs a target: to or href"),
                (Some(_), Some(_)) => diags.error(&field, "set either to or href, not both"),
                (Some(target), None) => {
                    require_non_empty(&format!("{field}.to"), target, diags);
                }
                (None, Some(target)) => {
                    require_non_empty(&format!("{field}.href"), target, diags);
                }
            }
        }
    }
}

fn check_prism(prism: &Prism, diags: &mut Diagnostics) {
    let mut seen = HashSet::new();
    for (i, lang) in prism.additional_languages.iter().enumerate() {
        let field = format!("themeConfig.prism.additionalLanguages[{i}]");
        if !LANGUAGE_RE.is_match(lang) {
            diags.error(&field, format!("`{lang}` is not a language identifier"));
        } else if !seen.insert(lang.as_str()) {
            diags.error(&field, format!("duplicate language `{lang}`"));
        }
    }

    for (field, theme) in [
        ("themeConfig.prism.theme", &prism.theme),
        ("themeConfig.prism.darkTheme", &prism.dark_theme),
    ] {
        if require_non_empty(field, theme, diags) && !BUNDLED_PRISM_THEMES.contains(&theme.as_str())
        {
            diags.warn(field, format!("`{theme}` is not a bundled prism theme"));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{FooterLink, LinkGroup, Logo, Position};
    use crate::preset::{DocsOptions, PresetOptions};

    fn base() -> SiteConfig {
        toml::from_str("title = \"Docs\"\nurl = \"https://example.com\"\n").unwrap()
    }

    fn error_fields(config: &SiteConfig) -> Vec<String> {
        validate(config)
            .errors()
            .iter()
            .map(|d| d.field.clone())
            .collect()
    }

    fn link(label: &str, to: Option<&str>, href: Option<&str>) -> FooterLink {
        FooterLink {
            label: label.to_string(),
            to: to.map(str::to_string),
            href: href.map(str::to_string),
        }
    }

    fn nav(kind: NavItemKind, doc_id: Option<&str>, href: Option<&str>) -> NavItem {
        NavItem {
            kind,
            label: "Docs".to_string(),
            doc_id: doc_id.map(str::to_string),
            to: None,
            href: href.map(str::to_string),
            position: Position::Left,
        }
    }

    #[test]
    fn accepts_minimal_config() {
        let diags = validate(&base());

        assert!(!diags.has_errors());
        assert!(diags.warnings().is_empty());
    }

    #[test]
    fn rejects_empty_and_malformed_url() {
        let mut config = base();
        config.url = String::new();
        assert_eq!(error_fields(&config), vec!["url"]);

        config.url = "not a url".to_string();
        assert_eq!(error_fields(&config), vec!["url"]);

        config.url = "ftp://example.com".to_string();
        assert_eq!(error_fields(&config), vec!["url"]);
    }

    #[test]
    fn rejects_url_with_path_and_hints_base_url() {
        let mut config = base();
        config.url = "https://example.com/docs/".to_string();

        let diags = validate(&config);

        let hint = diags.errors()[0].hint.as_deref().unwrap();
        assert!(hint.contains("https://example.com"));
    }

    #[test]
    fn requires_slashes_around_base_url() {
        let mut config = base();
        config.base_url = "docs/".to_string();

        assert_eq!(error_fields(&config), vec!["baseUrl"]);
    }

    #[test]
    fn requires_default_locale_in_locales() {
        let mut config = base();
        config.i18n.locales = vec!["fr".to_string()];

        assert_eq!(error_fields(&config), vec!["i18n.defaultLocale"]);
    }

    #[test]
    fn rejects_empty_and_duplicate_locales() {
        let mut config = base();
        config.i18n.locales = vec![];
        assert_eq!(error_fields(&config), vec!["i18n.locales"]);

        config.i18n.locales = vec!["en".to_string(), "en".to_string(), "EN".to_string()];
        assert_eq!(
            error_fields(&config),
            vec!["i18n.locales[1]", "i18n.locales[2]"]
        );
    }

    #[test]
    fn doc_items_need_doc_id_only() {
        let mut config = base();
        config.theme_config.navbar.items = vec![
            nav(NavItemKind::Doc, Some("intro"), None),
            nav(NavItemKind::Doc, None, None),
            nav(NavItemKind::Doc, Some("intro"), Some("https://x.dev")),
        ];

        assert_eq!(
            error_fields(&config),
            vec!["themeConfig.navbar.items[1]", "themeConfig.navbar.items[2]"]
        );
    }

    #[test]
    fn link_items_need_exactly_one_target() {
        let mut config = base();
        let mut both = nav(NavItemKind::Default, None, Some("https://x.dev"));
        both.to = Some("/".to_string());
        config.theme_config.navbar.items = vec![
            nav(NavItemKind::Default, None, Some("https://x.dev")),
            nav(NavItemKind::Default, None, None),
            both,
            nav(NavItemKind::Default, Some("intro"), Some("https://x.dev")),
        ];

        assert_eq!(
            error_fields(&config),
            vec![
                "themeConfig.navbar.items[1]",
                "themeConfig.navbar.items[2]",
                "themeConfig.navbar.items[3]",
            ]
        );
    }

    #[test]
    fn nav_items_need_labels() {
        let mut config = base();
        let mut item = nav(NavItemKind::Default, None, Some("https://x.dev"));
        item.label = " ".to_string();
        config.theme_config.navbar.items = vec![item];

        assert_eq!(error_fields(&config), vec!["themeConfig.navbar.items[0].label"]);
    }

    #[test]
    fn present_targets_must_not_be_empty() {
        let mut config = base();
        let mut empty_to = nav(NavItemKind::Default, None, None);
        empty_to.to = Some(String::new());
        config.theme_config.navbar.items = vec![empty_to, nav(NavItemKind::Doc, Some(" "), None)];

        assert_eq!(
            error_fields(&config),
            vec!["themeConfig.navbar.items[0].to", "themeConfig.navbar.items[1].docId"]
        );
    }

    #[test]
    fn logo_sources_must_not_be_empty() {
        let mut config = base();
        config.theme_config.navbar.logo = Some(Logo {
            alt: "Logo".to_string(),
            src: String::new(),
            src_dark: Some(" ".to_string()),
        });

        assert_eq!(
            error_fields(&config),
            vec!["themeConfig.navbar.logo.src", "themeConfig.navbar.logo.srcDark"]
        );
    }

    #[test]
    fn favicon_must_not_be_empty() {
        let mut config = base();
        config.favicon = Some(String::new());

        assert_eq!(error_fields(&config), vec!["favicon"]);

        config.favicon = Some("img/favicon.ico".to_string());
        assert!(error_fields(&config).is_empty());
    }

    #[test]
    fn footer_links_need_label_and_one_target() {
        let mut config = base();
        config.theme_config.footer = Some(Footer {
            links: vec![LinkGroup {
                title: "More".to_string(),
                items: vec![
                    link("Intro", Some("/"), None),
                    link("", None, Some("https://x.dev")),
                    link("Nowhere", None, None),
                    link("Empty", None, Some("")),
                ],
            }],
            ..Footer::default()
        });

        assert_eq!(
            error_fields(&config),
            vec![
                "themeConfig.footer.links[0].items[1].label",
                "themeConfig.footer.links[0].items[2]",
                "themeConfig.footer.links[0].items[3].href",
            ]
        );
    }

    #[test]
    fn footer_groups_need_titles() {
        let mut config = base();
        config.theme_config.footer = Some(Footer {
            links: vec![LinkGroup {
                title: String::new(),
                items: vec![],
            }],
            ..Footer::default()
        });

        assert_eq!(error_fields(&config), vec!["themeConfig.footer.links[0].title"]);
    }

    #[test]
    fn only_one_preset_may_configure_docs() {
        let mut config = base();
        let docs_preset = |name: &str| Preset {
            name: name.to_string(),
            options: PresetOptions {
                docs: Some(DocsOptions::default()),
                ..PresetOptions::default()
            },
        };
        config.presets = vec![docs_preset("classic"), docs_preset("other")];

        assert_eq!(error_fields(&config), vec!["presets[1].options.docs"]);
    }

    #[test]
    fn rejects_duplicate_presets_and_bad_docs_options() {
        let mut config = base();
        config.presets = vec![
            Preset {
                name: "classic".to_string(),
                options: PresetOptions {
                    docs: Some(DocsOptions {
                        route_base_path: "docs?v=2".to_string(),
                        edit_url: Some("tree/main/docs".to_string()),
                        ..DocsOptions::default()
                    }),
                    ..PresetOptions::default()
                },
            },
            Preset {
                name: "classic".to_string(),
                options: PresetOptions::default(),
            },
        ];

        assert_eq!(
            error_fields(&config),
            vec![
                "presets[0].options.docs.routeBasePath",
                "presets[0].options.docs.editUrl",
                "presets[1].name",
            ]
        );
    }

    #[test]
    fn prism_languages_are_a_set() {
        let mut config = base();
        config.theme_config.prism.additional_languages =
            vec!["clojure".to_string(), "clojure".to_string(), "Rust!".to_string()];

        assert_eq!(
            error_fields(&config),
            vec![
                "themeConfig.prism.additionalLanguages[1]",
                "themeConfig.prism.additionalLanguages[2]",
            ]
        );
    }

    #[test]
    fn unknown_prism_theme_is_a_warning() {
        let mut config = base();
        config.theme_config.prism.dark_theme = "solarized".to_string();

        let diags = validate(&config);

        assert!(!diags.has_errors());
        assert_eq!(diags.warnings()[0].field, "themeConfig.prism.darkTheme");
    }
}
