//! Export command.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use docsite_export::{to_json, ExportOptions, ModuleLocation, ModuleRenderer};

use crate::commands::check::load;
use crate::ExportFormat;

/// Render the config in the requested format.
///
/// `module_dir` is the directory the output will be written to; `None` means
/// the site root.
pub fn render(
    config_path: &Path,
    format: ExportFormat,
    year: Option<i32>,
    module_dir: Option<&Path>,
) -> Result<String> {
    let loaded = load(config_path)?;

    let options = match year {
        Some(year) => ExportOptions { year },
        None => ExportOptions::current(),
    };

    let rendered = match format {
        ExportFormat::Json => to_json(&loaded.config, &options)?,
        ExportFormat::Js => {
            let location = ModuleLocation {
                source: config_path
                    .file_name()
                    .and_then(|n| n.to_str())
                    .map(str::to_string),
                site_dir: match module_dir {
                    Some(dir) => site_dir(&loaded.root, dir)?,
                    None => String::new(),
                },
            };
            ModuleRenderer::new().render(&loaded.config, &options, &location)?
        }
    };

    Ok(rendered)
}

/// Path from `module_dir` to `root` as `/`-separated segments.
fn site_dir(root: &Path, module_dir: &Path) -> Result<String> {
    let canon = |p: &Path| {
        p.canonicalize()
            .with_context(|| format!("Failed to resolve {}", p.display()))
    };
    let root = canon(root)?;
    let module_dir = canon(module_dir)?;

    let common = root
        .components()
        .zip(module_dir.components())
        .take_while(|(a, b)| a == b)
        .count();

    let segments: Vec<String> = module_dir
        .components()
        .skip(common)
        .map(|_| "..".to_string())
        .chain(
            root.components()
                .skip(common)
                .map(|c| c.as_os_str().to_string_lossy().into_owned()),
        )
        .collect();

    Ok(segments.join("/"))
}

/// Run the export command.
pub async fn run(
    config_path: &Path,
    format: ExportFormat,
    output: Option<PathBuf>,
    year: Option<i32>,
) -> Result<()> {
    match output {
        Some(path) => {
            let parent = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or(Path::new("."));
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;

            let rendered = render(config_path, format, year, Some(parent))?;
            fs::write(&path, &rendered)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            tracing::info!("Wrote {}", path.display());
        }
        None => {
            let rendered = render(config_path, format, year, None)?;
            std::io::stdout()
                .lock()
                .write_all(rendered.as_bytes())
                .context("Failed to write to stdout")?;
        }
    }

    Ok(())
}
