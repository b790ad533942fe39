//! Single-hop redirect following.
//!
//! A redirect article's body starts with `#REDIRECT [[Target]]`. The target is
//! looked up by exact title and replaces the redirect. The substituted document
//! is never inspected for a further redirect.

use super::index::SearchIndex;
use super::types::CandidateDocument;
use crate::error::Result;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{info, warn};

const REDIRECT_MARKER: &str = "#redirect";

static REDIRECT_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)#redirect\s*\[\[(.+?)\]\]").expect("redirect pattern is valid")
});

pub fn is_redirect(doc: &CandidateDocument) -> bool {
    doc.body_text.trim().to_lowercase().starts_with(REDIRECT_MARKER)
}

/// `#REDIRECT [[Target Title]]` → `Target Title`.
pub fn redirect_target(body: &str) -> Option<&str> {
    REDIRECT_PATTERN
        .captures(body)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

pub struct RedirectResolver<'a, I: SearchIndex + ?Sized> {
    index: &'a I,
}

impl<'a, I: SearchIndex + ?Sized> RedirectResolver<'a, I> {
    pub fn new(index: &'a I) -> Self {
        Self { index }
    }

    /// Non-redirects pass through. A redirect becomes its target, or `None`
    /// when the marker is malformed or the target does not exist.
    pub fn resolve(&self, doc: CandidateDocument) -> Result<Option<CandidateDocument>> {
        if !is_redirect(&doc) {
            info!("Found '{}'", doc.title.trim());
            return Ok(Some(doc));
        }

        let Some(target) = redirect_target(&doc.body_text) else {
            warn!("'{}' is a redirect, but the target can't be read", doc.title.trim());
            return Ok(None);
        };

        match self.index.exact_title(target)?.into_iter().next() {
            Some(resolved) => {
                info!("'{}' redirects to '{}'", doc.title.trim(), target);
                if is_redirect(&resolved) {
                    warn!("'{}' is itself a redirect; chained redirects are not followed", target);
                }
                Ok(Some(resolved))
            }
            None => {
                warn!("'{}' redirects to '{}', which was not found", doc.title.trim(), target);
                Ok(None)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::place::index::MemoryIndex;

    fn index() -> MemoryIndex {
        [
            CandidateDocument::new("Massachusetts Institute of Technology")
                .with_body("The '''Massachusetts Institute of Technology''' is a private university")
                .with_categories(["Universities and colleges in Massachusetts"])
                .with_coordinates("42|21|36|N|71|05|31|W"),
            CandidateDocument::new("Old Name").with_body("#REDIRECT [[Newer Name]]"),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_is_redirect() {
        assert!(is_redirect(&CandidateDocument::new("MIT").with_body("  #REDIRECT [[X]]")));
        assert!(is_redirect(&CandidateDocument::new("MIT").with_body("#redirect[[X]]")));
        assert!(!is_redirect(&CandidateDocument::new("MIT").with_body("See #REDIRECT [[X]]")));
    }

    #[test]
    fn test_redirect_target() {
        assert_eq!(redirect_target("#REDIRECT [[Target Title]]"), Some("Target Title"));
        assert_eq!(redirect_target("#Redirect[[A]] {{R from move}} [[B]]"), Some("A"));
        assert_eq!(redirect_target("#REDIRECT Target"), None);
    }

    #[test]
    fn test_non_redirect_passes_through() {
        let index = index();
        let doc = CandidateDocument::new("Boston").with_body("Boston is a city");
        let resolved = RedirectResolver::new(&index).resolve(doc.clone()).unwrap();
        assert_eq!(resolved, Some(doc));
    }

    #[test]
    fn test_redirect_substitutes_target() {
        let index = index();
        let doc = CandidateDocument::new("MIT")
            .with_body("#REDIRECT [[Massachusetts Institute of Technology]]");
        let resolved = RedirectResolver::new(&index).resolve(doc).unwrap().unwrap();
        assert_eq!(resolved.title, "Massachusetts Institute of Technology");
        assert_eq!(resolved.coordinates_raw, "42|21|36|N|71|05|31|W");
    }

    #[test]
    fn test_missing_target_is_dropped() {
        let index = index();
        let doc = CandidateDocument::new("Gone").with_body("#REDIRECT [[Nowhere]]");
        assert_eq!(RedirectResolver::new(&index).resolve(doc).unwrap(), None);
    }

    #[test]
    fn test_malformed_redirect_is_dropped() {
        let index = index();
        let doc = CandidateDocument::new("Broken").with_body("#REDIRECT somewhere");
        assert_eq!(RedirectResolver::new(&index).resolve(doc).unwrap(), None);
    }

    #[test]
    fn test_single_hop_only() {
        let index = index();
        let doc = CandidateDocument::new("Older Name").with_body("#REDIRECT [[Old Name]]");
        let resolved = RedirectResolver::new(&index).resolve(doc).unwrap().unwrap();
        // The substituted document is itself a redirect and is returned as-is.
        assert_eq!(resolved.title, "Old Name");
        assert!(is_redirect(&resolved));
    }
}
