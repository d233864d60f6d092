//! Broken-link checking for a documentation site.
//!
//! Indexes the docs directory named by the site configuration, then checks
//! navbar, footer and in-document links against it. Each finding is routed
//! through the configured `onBrokenLinks` / `onBrokenMarkdownLinks` policy.

pub mod check;
pub mod frontmatter;
pub mod index;
pub mod target;

pub use check::{check, BrokenLink, LinkError, LinkReport};
pub use frontmatter::{extract_frontmatter, DocFrontmatter, FrontmatterError};
pub use index::{DocEntry, DocsIndex, IndexError};
pub use target::{LinkTarget, Target};
