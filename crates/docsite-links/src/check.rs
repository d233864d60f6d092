//! Policy-driven broken-link checking.

use std::borrow::Cow;
use std::fmt;
use std::path::Path;

use docsite_config::{BrokenLinkPolicy, Loaded};
use percent_encoding::percent_decode_str;

use crate::index::{normalize_route, DocsIndex, IndexError};
use crate::target::{LinkTarget, Target};

/// A link that does not resolve.
#[derive(Debug, Clone, PartialEq)]
pub struct BrokenLink {
    /// Config field path or docs file the link came from
    pub source: String,

    /// The link as written
    pub target: String,

    pub reason: String,
}

impl fmt::Display for BrokenLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: `{}` {}", self.source, self.target, self.reason)
    }
}

/// Outcome of a link check, already sorted by policy.
#[derive(Debug, Default)]
pub struct LinkReport {
    /// Findings under a `throw` policy
    pub errors: Vec<BrokenLink>,

    /// Findings under a `warn` policy
    pub warnings: Vec<BrokenLink>,

    /// Number of links looked at, external ones included
    pub checked: usize,
}

impl LinkReport {
    fn file(&mut self, policy: BrokenLinkPolicy, broken: BrokenLink) {
        match policy {
            BrokenLinkPolicy::Throw => self.errors.push(broken),
            BrokenLinkPolicy::Warn => {
                tracing::warn!("Broken link {}", broken);
                self.warnings.push(broken);
            }
            BrokenLinkPolicy::Ignore => {
                tracing::debug!("Ignoring broken link {}", broken);
            }
        }
    }

    /// Fail if any finding falls under a `throw` policy.
    pub fn into_result(self) -> Result<Self, LinkError> {
        if self.errors.is_empty() {
            Ok(self)
        } else {
            Err(LinkError::Broken(self.errors.len()))
        }
    }
}

/// Errors that can occur during link checking.
#[derive(Debug, thiserror::Error)]
pub enum LinkError {
    #[error(transparent)]
    Index(#[from] IndexError),

    #[error("{field}: file not found: {path}")]
    FileNotFound { field: String, path: String },

    #[error("Found {0} broken link(s)")]
    Broken(usize),
}

/// Check every config and markdown link of a loaded site.
pub fn check(loaded: &Loaded) -> Result<LinkReport, LinkError> {
    let config = &loaded.config;

    check_referenced_files(loaded)?;

    let index = match config.docs() {
        Some(docs) => DocsIndex::scan(&loaded.resolve(&docs.path), &docs.route_base())?,
        None => DocsIndex::empty(),
    };

    let static_dir = loaded.root.join("static");
    let mut report = LinkReport::default();
    let mut targets = Vec::new();

    for (i, item) in config.theme_config.navbar.items.iter().enumerate() {
        if let Some(target) = Target::of_nav_item(item) {
            targets.push((format!("themeConfig.navbar.items[{i}]"), target));
        }
    }

    if let Some(footer) = &config.theme_config.footer {
        for (g, group) in footer.links.iter().enumerate() {
            for (i, link) in group.items.iter().enumerate() {
                if let Some(target) = Target::of_footer_link(link) {
                    targets.push((format!("themeConfig.footer.links[{g}].items[{i}]"), target));
                }
            }
        }
    }

    for (source, target) in targets {
        report.checked += 1;
        let broken = match target {
            Target::Doc(id) => (!index.contains_id(&id)).then(|| BrokenLink {
                source,
                reason: if config.docs().is_some() {
                    "does not match any doc id".to_string()
                } else {
                    "cannot resolve: no preset configures docs".to_string()
                },
                target: id,
            }),
            Target::Link(LinkTarget::External(_)) => None,
            Target::Link(LinkTarget::Internal(path)) => {
                (!internal_path_exists(&path, &config.base_url, &index, &static_dir)).then(|| {
                    BrokenLink {
                        source,
                        target: path,
                        reason: "does not match a doc route or static file".to_string(),
                    }
                })
            }
        };

        if let Some(broken) = broken {
            report.file(config.on_broken_links, broken);
        }
    }

    for doc in index.docs() {
        let doc_dir = doc.relative_path.parent().unwrap_or(Path::new(""));
        for link in &doc.links {
            report.checked += 1;
            let file = link_path(link);
            if !index.docs_dir().join(doc_dir).join(&*file).is_file() {
                report.file(
                    config.on_broken_markdown_links,
                    BrokenLink {
                        source: doc.relative_path.display().to_string(),
                        target: link.clone(),
                        reason: "does not resolve to a file".to_string(),
                    },
                );
            }
        }
    }

    tracing::debug!(
        "Checked {} links: {} errors, {} warnings",
        report.checked,
        report.errors.len(),
        report.warnings.len()
    );

    Ok(report)
}

/// Files the generator resolves when it loads the config.
fn check_referenced_files(loaded: &Loaded) -> Result<(), LinkError> {
    for (i, preset) in loaded.config.presets.iter().enumerate() {
        let options = &preset.options;
        let sidebar = options
            .docs
            .as_ref()
            .and_then(|d| d.sidebar_path.as_deref())
            .map(|p| (format!("presets[{i}].options.docs.sidebarPath"), p));
        let css = options
            .theme
            .as_ref()
            .and_then(|t| t.custom_css.as_deref())
            .map(|p| (format!("presets[{i}].options.theme.customCss"), p));

        for (field, relative) in sidebar.into_iter().chain(css) {
            let path = loaded.resolve(relative);
            if !path.is_file() {
                return Err(LinkError::FileNotFound {
                    field,
                    path: path.display().to_string(),
                });
            }
        }
    }

    Ok(())
}

/// Path part of a link with query and fragment removed, percent-decoded.
fn link_path(link: &str) -> Cow<'_, str> {
    let path = link.split(['?', '#']).next().unwrap_or("");
    percent_decode_str(path)
        .decode_utf8()
        .unwrap_or(Cow::Borrowed(path))
}

fn internal_path_exists(path: &str, base_url: &str, index: &DocsIndex, static_dir: &Path) -> bool {
    let path = link_path(path);
    let path = match path.strip_prefix(base_url) {
        Some(rest) if base_url != "/" => format!("/{rest}"),
        _ => path.to_string(),
    };
    let route = normalize_route(&path);

    route == "/"
        || index.contains_route(&route)
        || static_dir.join(route.trim_start_matches('/')).is_file()
}
