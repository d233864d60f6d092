//! Watch command: re-check the site on every change.

use std::future::Future;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::sync::mpsc;

use crate::commands::check::check_site;
use crate::watcher::{FileWatcher, WatchEvent, WatchRoots};

/// Quiet period that groups a burst of saves into one re-check.
const SETTLE: Duration = Duration::from_millis(200);

/// Locations to watch, taken from the config when it loads.
fn watch_roots(config_path: &Path) -> WatchRoots {
    let root = config_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));

    let docs = docsite_config::load(config_path)
        .ok()
        .and_then(|loaded| loaded.config.docs().map(|d| loaded.resolve(&d.path)))
        .unwrap_or_else(|| root.join("docs"));

    WatchRoots {
        config: config_path.to_path_buf(),
        docs,
        assets: root.join("static"),
    }
}

fn run_check(config_path: &Path) {
    match check_site(config_path, true) {
        Ok(()) => tracing::info!("All checks passed"),
        Err(e) => tracing::error!("{:#}", e),
    }
}

/// Run the watch command until interrupted.
pub async fn run(config_path: &Path) -> Result<()> {
    let roots = watch_roots(config_path);
    let (_watcher, mut rx) = FileWatcher::new(&roots).context("Failed to start file watcher")?;

    tracing::info!(
        "Watching {}, {} and {}",
        roots.config.display(),
        roots.docs.display(),
        roots.assets.display()
    );

    run_check(config_path);

    watch_loop(&mut rx, tokio::signal::ctrl_c(), || run_check(config_path)).await;

    Ok(())
}

/// Call `on_change` once per burst of events until `shutdown` completes or
/// the watcher goes away.
///
/// `shutdown` is polled across iterations, so it also fires if it completes
/// while `on_change` is running.
async fn watch_loop<S, F>(rx: &mut mpsc::Receiver<WatchEvent>, shutdown: S, mut on_change: F)
where
    S: Future,
    F: FnMut(),
{
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            biased;

            _ = &mut shutdown => {
                tracing::info!("Stopping watch");
                break;
            }
            event = rx.recv() => {
                let Some(event) = event else { break };
                tracing::debug!("Changed: {}", event.path().display());

                // Drain the rest of the burst
                while let Ok(Some(event)) = tokio::time::timeout(SETTLE, rx.recv()).await {
                    tracing::debug!("Changed: {}", event.path().display());
                }

                on_change();
            }
        }
    }
}
