//! Page-scoped context for the toolbar shell.
//!
//! The board identifier, page kind and host are handed to the shell
//! explicitly. Nothing in this crate reads page globals.

use std::fmt;

use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

/// Kind of imageboard page the script runs on.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PageKind {
    Thread,
    Index,
    Catalog,
    Other(SmolStr),
}

impl PageKind {
    /// Parse an `active_page` value.
    pub fn parse(value: &str) -> Self {
        match value {
            "thread" => Self::Thread,
            "index" => Self::Index,
            "catalog" => Self::Catalog,
            other => Self::Other(other.into()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Thread => "thread",
            Self::Index => "index",
            Self::Catalog => "catalog",
            Self::Other(s) => s,
        }
    }

    /// Pages that carry a reply form.
    pub fn has_reply_form(&self) -> bool {
        matches!(self, Self::Thread | Self::Index)
    }
}

impl From<String> for PageKind {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<PageKind> for String {
    fn from(kind: PageKind) -> Self {
        kind.as_str().to_string()
    }
}

impl fmt::Display for PageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything the shell needs to know about the current page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageContext {
    /// Board identifier, e.g. `"tech"`.
    pub board: SmolStr,
    pub page: PageKind,
    /// `location.host` of the page.
    pub host: SmolStr,
}

impl PageContext {
    pub fn new(board: impl Into<SmolStr>, page: PageKind, host: impl Into<SmolStr>) -> Self {
        Self {
            board: board.into(),
            page,
            host: host.into(),
        }
    }

    /// Whether the toolbar should be installed on this page.
    pub fn toolbar_enabled(&self) -> bool {
        self.page.has_reply_form()
    }

    /// Protocol-relative URL of the board catalog.
    pub fn catalog_url(&self) -> String {
        format!("//{}/{}/catalog.html", self.host, self.board)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_page_kind() {
        assert_eq!(PageKind::parse("thread"), PageKind::Thread);
        assert_eq!(PageKind::parse("index"), PageKind::Index);
        assert_eq!(PageKind::parse("catalog"), PageKind::Catalog);
        assert_eq!(PageKind::parse("ukko"), PageKind::Other("ukko".into()));
        assert_eq!(PageKind::parse("ukko").as_str(), "ukko");
    }

    #[test]
    fn test_toolbar_only_on_reply_pages() {
        let ctx = |page| PageContext::new("tech", page, "example.net");
        assert!(ctx(PageKind::Thread).toolbar_enabled());
        assert!(ctx(PageKind::Index).toolbar_enabled());
        assert!(!ctx(PageKind::Catalog).toolbar_enabled());
        assert!(!ctx(PageKind::Other("".into())).toolbar_enabled());
    }

    #[test]
    fn test_catalog_url() {
        let ctx = PageContext::new("tech", PageKind::Thread, "example.net:8080");
        assert_eq!(ctx.catalog_url(), "//example.net:8080/tech/catalog.html");
    }

    #[test]
    fn test_page_kind_serde() {
        let kind: PageKind = serde_json::from_str("\"index\"").unwrap();
        assert_eq!(kind, PageKind::Index);
        assert_eq!(serde_json::to_string(&PageKind::Thread).unwrap(), "\"thread\"");
    }
}
