//! Config validation and link check command.

use std::path::Path;

use anyhow::{Context, Result};
use docsite_config::Loaded;

/// Load and validate the config, logging every warning.
pub fn load(config_path: &Path) -> Result<Loaded> {
    let loaded = docsite_config::load(config_path)
        .with_context(|| format!("Failed to load {}", config_path.display()))?;

    for warning in &loaded.warnings {
        tracing::warn!("{}", warning);
    }

    Ok(loaded)
}

/// Validate the config and, if `links` is set, check its links.
pub fn check_site(config_path: &Path, links: bool) -> Result<()> {
    let loaded = load(config_path)?;
    tracing::info!("{} is valid", config_path.display());

    if !links {
        return Ok(());
    }

    let report = docsite_links::check(&loaded).context("Link check failed")?;
    for broken in &report.errors {
        tracing::error!("Broken link {}", broken);
    }

    tracing::info!(
        "Checked {} links: {} broken, {} warnings",
        report.checked,
        report.errors.len(),
        report.warnings.len()
    );

    report.into_result()?;
    Ok(())
}

/// Run the check command.
pub async fn run(config_path: &Path, links: bool) -> Result<()> {
    check_site(config_path, links)
}
