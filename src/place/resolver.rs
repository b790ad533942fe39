//! Place resolver — orchestrates the pipeline.
//!
//! Flow:  title match (similarity gate) → redirect (single hop) → classify → first survivor → normalize

use super::classifier::PlaceClassifier;
use super::coordinates;
use super::index::SearchIndex;
use super::matcher::TitleMatcher;
use super::redirect::RedirectResolver;
use super::types::{CandidateDocument, ResolvedPlace};
use crate::config::ResolverConfig;
use crate::error::Result;
use crate::reader::PlaceRecord;
use tracing::info;

/// Stateless across calls; every resolution re-queries the index.
pub struct PlaceResolver<I: SearchIndex> {
    index: I,
    classifier: PlaceClassifier,
    config: ResolverConfig,
}

impl<I: SearchIndex> PlaceResolver<I> {
    pub fn new(index: I) -> Self {
        Self::with_config(index, ResolverConfig::default())
    }

    pub fn with_config(index: I, config: ResolverConfig) -> Self {
        Self {
            index,
            classifier: PlaceClassifier::new(&config.place_indicators),
            config,
        }
    }

    pub fn index(&self) -> &I {
        &self.index
    }

    /// All surviving candidates in relevance order. The first one wins.
    pub fn candidates(&self, place_name: &str) -> Result<Vec<CandidateDocument>> {
        info!("Searching for '{}'", place_name);

        let hits = TitleMatcher::new(&self.index, self.config.similarity_threshold).find(place_name)?;
        if hits.is_empty() {
            return Ok(vec![]);
        }

        let redirects = RedirectResolver::new(&self.index);
        let resolved = hits
            .into_iter()
            .map(|doc| redirects.resolve(doc))
            .collect::<Result<Vec<_>>>()?;

        let survivors = self.classifier.filter(resolved);
        info!("Found {} potential place entries", survivors.len());
        Ok(survivors)
    }

    /// Resolve a name to its best entry. A miss is a blank record, not an error;
    /// only index failures are returned as `Err`.
    pub fn resolve(&self, place_name: &str) -> Result<ResolvedPlace> {
        let Some(best) = self.candidates(place_name)?.into_iter().next() else {
            info!("No place entry for '{}'", place_name);
            return Ok(ResolvedPlace::blank(place_name));
        };

        info!("Selecting '{}' at {}", best.title, best.coordinates_raw);
        let coordinates = coordinates::normalize(&best.coordinates_raw);
        Ok(ResolvedPlace {
            place_name: place_name.to_string(),
            wikipedia_entry_url: format!("{}{}", self.config.wiki_base_url, best.title),
            wikipedia_entry_title: best.title,
            coordinates,
            id: None,
        })
    }

    /// Resolve an input record, carrying its id through.
    pub fn resolve_record(&self, record: &PlaceRecord) -> Result<ResolvedPlace> {
        Ok(self.resolve(&record.place_name)?.with_id(record.id.clone()))
    }
}
