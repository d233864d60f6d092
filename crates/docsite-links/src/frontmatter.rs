//! Front matter extraction for docs files.

use serde::Deserialize;

/// The front matter keys that affect a doc's id and route.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct DocFrontmatter {
    /// Overrides the file stem in the doc id
    #[serde(default)]
    pub id: Option<String>,

    /// Overrides the route; absolute slugs ignore the directory
    #[serde(default)]
    pub slug: Option<String>,
}

/// Extract front matter from a markdown document.
///
/// Returns the parsed front matter and the body after the closing fence.
pub fn extract_frontmatter(source: &str) -> Result<(Option<DocFrontmatter>, &str), FrontmatterError> {
    let trimmed = source.trim_start();

    if !trimmed.starts_with("---") {
        return Ok((None, source));
    }

    let after_open = &trimmed[3..];
    let Some(close_pos) = after_open.find("\n---") else {
        return Err(FrontmatterError::Unclosed);
    };

    let yaml_content = after_open[..close_pos].trim();
    let remaining = &after_open[close_pos + 4..];

    // An empty block is legal and means "no keys".
    let frontmatter = if yaml_content.is_empty() {
        DocFrontmatter::default()
    } else {
        serde_yaml::from_str(yaml_content)
            .map_err(|e| FrontmatterError::InvalidYaml(e.to_string()))?
    };

    Ok((Some(frontmatter), remaining.trim_start()))
}

/// Errors that can occur when parsing front matter.
#[derive(Debug, thiserror::Error)]
pub enum FrontmatterError {
    #[error("Unclosed front matter block - missing closing ---")]
    Unclosed,

    #[error("Invalid YAML in front matter: {0}")]
    InvalidYaml(String),
}
