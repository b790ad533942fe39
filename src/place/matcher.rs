//! Title matching with a Jaro-Winkler similarity gate.

use super::index::SearchIndex;
use super::types::CandidateDocument;
use crate::error::Result;
use tracing::debug;

/// Similarity between the query and a candidate title, in `[0, 1]`.
pub fn similarity(query: &str, title: &str) -> f64 {
    strsim::jaro_winkler(query, title.trim())
}

pub struct TitleMatcher<'a, I: SearchIndex + ?Sized> {
    index: &'a I,
    threshold: f64,
}

impl<'a, I: SearchIndex + ?Sized> TitleMatcher<'a, I> {
    pub fn new(index: &'a I, threshold: f64) -> Self {
        Self { index, threshold }
    }

    /// Hits whose title scores at least `threshold`, in the index's order.
    pub fn find(&self, query: &str) -> Result<Vec<CandidateDocument>> {
        let hits = self.index.match_title(query)?;
        Ok(hits
            .into_iter()
            .filter(|doc| {
                let score = similarity(query, &doc.title);
                if score < self.threshold {
                    debug!(
                        "Skipping '{}' for '{}': similarity {:.3} below {}",
                        doc.title.trim(),
                        query,
                        score,
                        self.threshold
                    );
                    return false;
                }
                true
            })
            .collect())
    }
}
