//! Classification of navbar and footer link targets.

use docsite_config::{FooterLink, NavItem, NavItemKind};

/// Where a link string points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkTarget {
    /// Has a scheme (`https:`, `mailto:`, ...) or is protocol-relative
    External(String),
    /// Path on this site
    Internal(String),
}

impl LinkTarget {
    /// Classify by value. Whether the string came from `to` or `href` does
    /// not matter.
    pub fn classify(value: &str) -> Self {
        if value.starts_with("//") || has_scheme(value) {
            Self::External(value.to_string())
        } else {
            Self::Internal(value.to_string())
        }
    }

    pub fn is_external(&self) -> bool {
        matches!(self, Self::External(_))
    }
}

/// RFC 3986 scheme: ALPHA *( ALPHA / DIGIT / "+" / "-" / "." ) ":"
fn has_scheme(value: &str) -> bool {
    let Some((scheme, _)) = value.split_once(':') else {
        return false;
    };
    let mut chars = scheme.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

/// A resolved config link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// Document id from a `doc` navbar item
    Doc(String),
    Link(LinkTarget),
}

impl Target {
    /// Target of a navbar item, or `None` if it has none.
    pub fn of_nav_item(item: &NavItem) -> Option<Self> {
        match item.kind {
            NavItemKind::Doc => item.doc_id.as_deref().map(|id| Self::Doc(id.to_string())),
            NavItemKind::Default => item
                .to
                .as_deref()
                .or(item.href.as_deref())
                .map(|v| Self::Link(LinkTarget::classify(v))),
        }
    }

    /// Target of a footer link, or `None` if it has none.
    pub fn of_footer_link(link: &FooterLink) -> Option<Self> {
        link.to
            .as_deref()
            .or(link.href.as_deref())
            .map(|v| Self::Link(LinkTarget::classify(v)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docsite_config::Position;

    #[test]
    fn classifies_by_value() {
        assert!(LinkTarget::classify("https://kepler16.com").is_external());
        assert!(LinkTarget::classify("mailto:team@kepler16.com").is_external());
        assert!(LinkTarget::classify("//cdn.example.com/a.js").is_external());
        assert_eq!(
            LinkTarget::classify("/docs/intro"),
            LinkTarget::Internal("/docs/intro".to_string())
        );
        assert!(!LinkTarget::classify("guide/setup:advanced").is_external());
        assert!(!LinkTarget::classify("1:2").is_external());
    }

    #[test]
    fn external_url_under_to_is_external() {
        let link = FooterLink {
            label: "Kepler 16".to_string(),
            to: Some("https://kepler16.com".to_string()),
            href: None,
        };

        assert_eq!(
            Target::of_footer_link(&link),
            Some(Target::Link(LinkTarget::External(
                "https://kepler16.com".to_string()
            )))
        );
    }

    #[test]
    fn doc_items_resolve_to_doc_ids() {
        let item = NavItem {
            kind: NavItemKind::Doc,
            label: "Documentation".to_string(),
            doc_id: Some("intro".to_string()),
            to: None,
            href: None,
            position: Position::Left,
        };

        assert_eq!(Target::of_nav_item(&item), Some(Target::Doc("intro".to_string())));
    }
}
