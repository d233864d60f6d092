//! Index of the docs directory: doc ids, routes and outgoing markdown links.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

use pulldown_cmark::{Event, Parser, Tag};
use walkdir::WalkDir;

use crate::frontmatter::{extract_frontmatter, DocFrontmatter};
use crate::target::LinkTarget;

/// A single indexed document.
#[derive(Debug, Clone, PartialEq)]
pub struct DocEntry {
    /// Id used by `docId` references, e.g. `guides/setup`
    pub id: String,

    /// Site route without base URL, e.g. `/docs/guides/setup`
    pub route: String,

    /// Path relative to the docs directory
    pub relative_path: PathBuf,

    /// Relative `.md`/`.mdx` link destinations found in the body
    pub links: Vec<String>,
}

/// All documents under a docs directory.
#[derive(Debug, Default)]
pub struct DocsIndex {
    docs_dir: PathBuf,
    docs: Vec<DocEntry>,
    by_id: HashMap<String, usize>,
    routes: HashSet<String>,
}

/// Errors that can occur while indexing.
#[derive(Debug, thiserror::Error)]
pub enum IndexError {
    #[error("Docs directory not found: {0}")]
    DirectoryNotFound(String),

    #[error("Failed to read {path}: {message}")]
    Read { path: String, message: String },
}

impl DocsIndex {
    /// An index with no documents.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Scan `docs_dir` for markdown documents.
    ///
    /// `route_base` is the docs route prefix, as returned by
    /// [`docsite_config::DocsOptions::route_base`].
    pub fn scan(docs_dir: &Path, route_base: &str) -> Result<Self, IndexError> {
        if !docs_dir.is_dir() {
            return Err(IndexError::DirectoryNotFound(
                docs_dir.display().to_string(),
            ));
        }

        let mut index = Self {
            docs_dir: docs_dir.to_path_buf(),
            ..Self::default()
        };

        for entry in WalkDir::new(docs_dir)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if !entry.file_type().is_file() || !is_markdown(path) {
                continue;
            }

            // Partials are included by other docs and get no route
            let filename = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
            if filename.starts_with('_') {
                continue;
            }

            let Ok(relative) = path.strip_prefix(docs_dir) else {
                continue;
            };

            let source = fs::read_to_string(path).map_err(|e| IndexError::Read {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

            let (frontmatter, body) = match extract_frontmatter(&source) {
                Ok((fm, body)) => (fm.unwrap_or_default(), body),
                Err(e) => {
                    tracing::warn!("{}: {}", path.display(), e);
                    (DocFrontmatter::default(), source.as_str())
                }
            };

            index.insert(DocEntry {
                id: doc_id(relative, &frontmatter),
                route: doc_route(relative, &frontmatter, route_base),
                relative_path: relative.to_path_buf(),
                links: markdown_links(body),
            });
        }

        tracing::debug!(
            "Indexed {} docs from {}",
            index.docs.len(),
            docs_dir.display()
        );

        Ok(index)
    }

    fn insert(&mut self, entry: DocEntry) {
        if let Some(existing) = self.by_id.get(&entry.id) {
            tracing::warn!(
                "Duplicate doc id `{}` in {} and {}",
                entry.id,
                self.docs[*existing].relative_path.display(),
                entry.relative_path.display()
            );
        }
        self.by_id.insert(entry.id.clone(), self.docs.len());
        self.routes.insert(entry.route.clone());
        self.docs.push(entry);
    }

    pub fn docs_dir(&self) -> &Path {
        &self.docs_dir
    }

    pub fn docs(&self) -> &[DocEntry] {
        &self.docs
    }

    pub fn get(&self, id: &str) -> Option<&DocEntry> {
        self.by_id.get(id).map(|&i| &self.docs[i])
    }

    pub fn contains_id(&self, id: &str) -> bool {
        self.by_id.contains_key(id)
    }

    pub fn contains_route(&self, route: &str) -> bool {
        self.routes.contains(&normalize_route(route))
    }

    pub fn len(&self) -> usize {
        self.docs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }
}

fn is_markdown(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("md") | Some("mdx")
    )
}

/// Directory part of a relative doc path as `/`-joined segments.
fn dir_segments(relative: &Path) -> Vec<String> {
    relative
        .parent()
        .map(|p| {
            p.components()
                .map(|c| c.as_os_str().to_string_lossy().into_owned())
                .collect()
        })
        .unwrap_or_default()
}

fn file_stem(relative: &Path) -> String {
    relative
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn doc_id(relative: &Path, frontmatter: &DocFrontmatter) -> String {
    let mut segments = dir_segments(relative);
    segments.push(frontmatter.id.clone().unwrap_or_else(|| file_stem(relative)));
    segments.join("/")
}

fn doc_route(relative: &Path, frontmatter: &DocFrontmatter, route_base: &str) -> String {
    let dir = dir_segments(relative).join("/");

    let path = match frontmatter.slug.as_deref() {
        Some(slug) if slug.starts_with('/') => slug.to_string(),
        Some(slug) => format!("{dir}/{slug}"),
        None => {
            let stem = file_stem(relative);
            if stem.eq_ignore_ascii_case("index") || stem.eq_ignore_ascii_case("readme") {
                dir
            } else {
                format!("{dir}/{stem}")
            }
        }
    };

    normalize_route(&format!("{route_base}/{path}"))
}

/// Collapse repeated slashes and drop the trailing slash (except for `/`).
pub(crate) fn normalize_route(route: &str) -> String {
    let segments: Vec<&str> = route.split('/').filter(|s| !s.is_empty()).collect();
    format!("/{}", segments.join("/"))
}

/// Relative links to other markdown files.
fn markdown_links(body: &str) -> Vec<String> {
    Parser::new(body)
        .filter_map(|event| match event {
            Event::Start(Tag::Link { dest_url, .. }) => Some(dest_url.into_string()),
            _ => None,
        })
        .filter(|dest| {
            let path = dest.split('#').next().unwrap_or("");
            !path.starts_with('/')
                && !LinkTarget::classify(path).is_external()
                && (path.ends_with(".md") || path.ends_with(".mdx"))
        })
        .collect()
}
