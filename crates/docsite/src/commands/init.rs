//! Initialize a documentation site config.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

/// Run the init command.
pub async fn run(config_path: &Path, yes: bool) -> Result<()> {
    tracing::info!("Initializing docsite...");

    let root = config_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));

    write_file(config_path, DEFAULT_CONFIG, yes)?;

    let docs_dir = root.join("docs");
    fs::create_dir_all(&docs_dir).context("Failed to create docs directory")?;
    write_file(&docs_dir.join("intro.md"), DEFAULT_INTRO, yes)?;

    let static_dir = root.join("static");
    fs::create_dir_all(&static_dir).context("Failed to create static directory")?;

    tracing::info!("Initialization complete!");
    tracing::info!("Run 'docsite check' to validate the site.");

    Ok(())
}

fn write_file(path: &Path, content: &str, overwrite: bool) -> Result<()> {
    if path.exists() && !overwrite {
        tracing::warn!("{} already exists. Use --yes to overwrite.", path.display());
        return Ok(());
    }

    fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))?;
    tracing::info!("Created {}", path.display());
    Ok(())
}

const DEFAULT_CONFIG: &str = r#"# docsite configuration

title = "My Project"
tagline = "Documentation for my project"
url = "https://example.com"
baseUrl = "/"

# throw | warn | ignore
onBrokenLinks = "throw"
onBrokenMarkdownLinks = "warn"

[i18n]
defaultLocale = "en"
locales = ["en"]

[[presets]]
name = "classic"

[presets.options.docs]
routeBasePath = "/"

[themeConfig.navbar]
title = "My Project"

[[themeConfig.navbar.items]]
type = "doc"
docId = "intro"
position = "left"
label = "Documentation"

[themeConfig.footer]
style = "dark"
# {year} is replaced with the current year on export
copyright = "Copyright © {year} My Project"

[[themeConfig.footer.links]]
title = "Documentation"
items = [{ label = "Intro", to = "/" }]

[themeConfig.prism]
additionalLanguages = []
theme = "github"
darkTheme = "dracula"
"#;

const DEFAULT_INTRO: &str = r#"---
slug: /
title: Introduction
---

# Introduction

Welcome to the documentation.
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::check::check_site;
    use tempfile::tempdir;

    #[tokio::test]
    async fn creates_a_site_that_passes_checks() {
        let temp = tempdir().unwrap();
        let config = temp.path().join("site.toml");

        run(&config, false).await.unwrap();

        assert!(temp.path().join("docs/intro.md").exists());
        assert!(temp.path().join("static").is_dir());
        check_site(&config, true).unwrap();
    }

    #[tokio::test]
    async fn keeps_existing_files_without_yes() {
        let temp = tempdir().unwrap();
        let config = temp.path().join("site.toml");
        fs::write(&config, "# mine").unwrap();

        run(&config, false).await.unwrap();
        assert_eq!(fs::read_to_string(&config).unwrap(), "# mine");

        run(&config, true).await.unwrap();
        assert!(fs::read_to_string(&config).unwrap().starts_with("# docsite"));
    }
}
