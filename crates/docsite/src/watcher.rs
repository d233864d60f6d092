//! File watching for `docsite watch`.

use std::path::{Path, PathBuf};
use std::sync::mpsc;

use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc as async_mpsc;

/// What changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WatchEvent {
    /// The site config file
    Config(PathBuf),

    /// A markdown file under the docs directory
    Doc(PathBuf),

    /// A file under the static directory
    Static(PathBuf),
}

impl WatchEvent {
    pub fn path(&self) -> &Path {
        match self {
            Self::Config(p) | Self::Doc(p) | Self::Static(p) => p,
        }
    }
}

/// The locations a site's checks depend on.
#[derive(Debug, Clone)]
pub struct WatchRoots {
    pub config: PathBuf,
    pub docs: PathBuf,
    pub assets: PathBuf,
}

impl WatchRoots {
    /// Canonicalize whatever exists so paths compare equal to notify's.
    fn canonical(&self) -> Self {
        let canon = |p: &Path| p.canonicalize().unwrap_or_else(|_| p.to_path_buf());
        Self {
            config: canon(&self.config),
            docs: canon(&self.docs),
            assets: canon(&self.assets),
        }
    }
}

/// File watcher for the config, docs and static directories.
pub struct FileWatcher {
    _watcher: RecommendedWatcher,
}

impl FileWatcher {
    /// Start watching.
    ///
    /// Returns the watcher and a channel to receive events. Events stop when
    /// the watcher is dropped.
    pub fn new(
        roots: &WatchRoots,
    ) -> Result<(Self, async_mpsc::Receiver<WatchEvent>), std::io::Error> {
        let roots = roots.canonical();
        let (sync_tx, sync_rx) = mpsc::channel();
        let (async_tx, async_rx) = async_mpsc::channel(100);

        let mut watcher = notify::recommended_watcher(move |res: Result<notify::Event, _>| {
            if let Ok(event) = res {
                let _ = sync_tx.send(event);
            }
        })
        .map_err(std::io::Error::other)?;

        // Editors replace the config file on save, so watch its directory
        if let Some(parent) = roots.config.parent().filter(|p| p.exists()) {
            watcher
                .watch(parent, RecursiveMode::NonRecursive)
                .map_err(std::io::Error::other)?;
        }
        for dir in [&roots.docs, &roots.assets] {
            if dir.exists() {
                watcher
                    .watch(dir, RecursiveMode::Recursive)
                    .map_err(std::io::Error::other)?;
            }
        }

        std::thread::spawn(move || {
            while let Ok(event) = sync_rx.recv() {
                for path in &event.paths {
                    if let Some(e) = classify_event(path, &event.kind, &roots) {
                        if async_tx.blocking_send(e).is_err() {
                            return;
                        }
                    }
                }
            }
        });

        Ok((Self { _watcher: watcher }, async_rx))
    }
}

/// Classify a notify event into a WatchEvent.
fn classify_event(path: &Path, kind: &EventKind, roots: &WatchRoots) -> Option<WatchEvent> {
    if !matches!(
        kind,
        EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_)
    ) {
        return None;
    }

    if path == roots.config {
        return Some(WatchEvent::Config(path.to_path_buf()));
    }

    if path.starts_with(&roots.docs) {
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        return (ext == "md" || ext == "mdx").then(|| WatchEvent::Doc(path.to_path_buf()));
    }

    if path.starts_with(&roots.assets) {
        return Some(WatchEvent::Static(path.to_path_buf()));
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use notify::event::{AccessKind, CreateKind, ModifyKind};
    use std::fs;
    use std::time::Duration;
    use tempfile::tempdir;

    fn roots(base: &Path) -> WatchRoots {
        WatchRoots {
            config: base.join("site.toml"),
            docs: base.join("docs"),
            assets: base.join("static"),
        }
    }

    #[test]
    fn classifies_paths_by_root() {
        let roots = roots(Path::new("/site"));
        let modify = EventKind::Modify(ModifyKind::Any);

        assert_eq!(
            classify_event(Path::new("/site/site.toml"), &modify, &roots),
            Some(WatchEvent::Config(PathBuf::from("/site/site.toml")))
        );
        assert_eq!(
            classify_event(Path::new("/site/docs/a/intro.mdx"), &modify, &roots),
            Some(WatchEvent::Doc(PathBuf::from("/site/docs/a/intro.mdx")))
        );
        assert_eq!(
            classify_event(Path::new("/site/static/img/logo.svg"), &modify, &roots),
            Some(WatchEvent::Static(PathBuf::from("/site/static/img/logo.svg")))
        );
        assert_eq!(classify_event(Path::new("/site/docs/.intro.md.swp"), &modify, &roots), None);
        assert_eq!(classify_event(Path::new("/site/README.md"), &modify, &roots), None);
    }

    #[test]
    fn ignores_access_events() {
        let roots = roots(Path::new("/site"));
        let access = EventKind::Access(AccessKind::Any);

        assert_eq!(classify_event(Path::new("/site/site.toml"), &access, &roots), None);
        assert!(classify_event(
            Path::new("/site/site.toml"),
            &EventKind::Create(CreateKind::File),
            &roots
        )
        .is_some());
    }

    #[tokio::test]
    async fn watches_doc_changes() {
        let temp = tempdir().unwrap();
        fs::create_dir_all(temp.path().join("docs")).unwrap();
        fs::write(temp.path().join("site.toml"), "").unwrap();

        let (watcher, mut rx) = FileWatcher::new(&roots(temp.path())).unwrap();

        // Give inotify time to set up
        tokio::time::sleep(Duration::from_millis(100)).await;

        fs::write(temp.path().join("docs/intro.md"), "# Intro").unwrap();

        let event = tokio::time::timeout(Duration::from_secs(3), rx.recv()).await;

        drop(watcher);

        assert!(event.is_ok(), "timeout waiting for file watch event");
        assert!(matches!(event.unwrap(), Some(WatchEvent::Doc(_))));
    }
}
