//! Decides whether a candidate is a place or institution with coordinates.

use super::types::CandidateDocument;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

/// Substrings (not whole words) that mark a category as geographic or
/// institutional: "countr" covers both "country" and "countries".
pub const PLACE_INDICATORS: &[&str] = &[
    "republic", "land", "state", "countr", "place", "cit", "park", "region",
    "continent", "district", "metro", "town", "capital", "village", "settlement",
    "universit", "organization", "institut", "academy", "hospital",
];

static COORD_TEMPLATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)\{\{\s*coord\s*\|(.*?)\}\}").expect("coord template pattern is valid")
});

/// Inner content of the first `{{coord|...}}` template in an article body.
pub fn extract_coord_template(body: &str) -> Option<&str> {
    COORD_TEMPLATE
        .captures(body)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
        .filter(|s| !s.is_empty())
}

pub struct PlaceClassifier {
    indicators: Vec<String>,
}

impl Default for PlaceClassifier {
    fn default() -> Self {
        Self::new(PLACE_INDICATORS.iter().copied())
    }
}

impl PlaceClassifier {
    pub fn new<S: AsRef<str>>(indicators: impl IntoIterator<Item = S>) -> Self {
        Self {
            indicators: indicators
                .into_iter()
                .map(|s| s.as_ref().to_lowercase())
                .collect(),
        }
    }

    pub fn has_place_category(&self, doc: &CandidateDocument) -> bool {
        doc.categories.iter().any(|category| {
            let category = category.to_lowercase();
            self.indicators.iter().any(|ind| category.contains(ind.as_str()))
        })
    }

    /// Fills `coordinates_raw` from a `{{coord|...}}` template when it is
    /// empty. Returns whether coordinates are available afterwards.
    pub fn ensure_coordinates(doc: &mut CandidateDocument) -> bool {
        if doc.coordinates_raw.trim().is_empty() {
            if let Some(raw) = extract_coord_template(&doc.body_text) {
                debug!("Recovered coordinates for '{}' from article body", doc.title.trim());
                doc.coordinates_raw = raw.to_string();
            }
        }
        !doc.coordinates_raw.trim().is_empty()
    }

    /// Both a place-like category and coordinates are required.
    pub fn classify(&self, doc: &mut CandidateDocument) -> bool {
        if !self.has_place_category(doc) {
            debug!("Excluding '{}': no place or institution category", doc.title.trim());
            return false;
        }
        if !Self::ensure_coordinates(doc) {
            debug!("Excluding '{}': no coordinates", doc.title.trim());
            return false;
        }
        true
    }

    /// Drops unresolved (`None`) and non-qualifying candidates, keeping order.
    pub fn filter(&self, candidates: Vec<Option<CandidateDocument>>) -> Vec<CandidateDocument> {
        candidates
            .into_iter()
            .flatten()
            .filter_map(|mut doc| self.classify(&mut doc).then_some(doc))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn university() -> CandidateDocument {
        CandidateDocument::new("Arizona State University")
            .with_categories(["Public universities in Arizona", "1885 establishments"])
            .with_coordinates("33|25|11|N|111|56|1|W")
    }

    #[test]
    fn test_qualifying_candidate() {
        let classifier = PlaceClassifier::default();
        assert!(classifier.classify(&mut university()));
    }

    #[test]
    fn test_indicator_is_substring_and_case_insensitive() {
        let classifier = PlaceClassifier::default();
        let doc = CandidateDocument::new("X").with_categories(["COUNTRIES in Europe"]);
        assert!(classifier.has_place_category(&doc));
        let doc = CandidateDocument::new("X").with_categories(["Member states of the EU"]);
        assert!(classifier.has_place_category(&doc));
    }

    #[test]
    fn test_no_place_category_excluded() {
        let classifier = PlaceClassifier::default();
        let mut doc = CandidateDocument::new("Photosynthesis")
            .with_categories(["Plant physiology", "Metabolism"])
            .with_coordinates("10|N|10|E");
        assert!(!classifier.classify(&mut doc));
    }

    #[test]
    fn test_absent_categories_excluded() {
        let classifier = PlaceClassifier::default();
        let mut doc = CandidateDocument::new("X").with_coordinates("10|N|10|E");
        assert!(!classifier.classify(&mut doc));
    }

    #[test]
    fn test_missing_coordinates_excluded() {
        let classifier = PlaceClassifier::default();
        let mut doc = university().with_coordinates("").with_body("No template here.");
        assert!(!classifier.classify(&mut doc));
    }

    #[test]
    fn test_coordinates_recovered_from_template() {
        let classifier = PlaceClassifier::default();
        let mut doc = university()
            .with_coordinates("")
            .with_body("Tempe campus {{Coord|33|25|11|N|111|56|1|W|type:edu|display=inline,title}} more");
        assert!(classifier.classify(&mut doc));
        assert_eq!(doc.coordinates_raw, "33|25|11|N|111|56|1|W|type:edu|display=inline,title");
    }

    #[test]
    fn test_extract_coord_template() {
        assert_eq!(extract_coord_template("{{coord|45|N|4|E}}"), Some("45|N|4|E"));
        assert_eq!(extract_coord_template("{{ COORD |1|N}}"), Some("1|N"));
        assert_eq!(extract_coord_template("{{coordinates|1|N}}"), None);
        assert_eq!(extract_coord_template("{{coord|}}"), None);
    }

    #[test]
    fn test_custom_indicators() {
        let classifier = PlaceClassifier::new(["Museum"]);
        let doc = CandidateDocument::new("Louvre").with_categories(["Art museums in Paris"]);
        assert!(classifier.has_place_category(&doc));
    }

    #[test]
    fn test_filter_drops_none_and_keeps_order() {
        let classifier = PlaceClassifier::default();
        let second = CandidateDocument::new("Tempe, Arizona")
            .with_categories(["Cities in Arizona"])
            .with_coordinates("33|24|N|111|56|W");
        let survivors = classifier.filter(vec![
            None,
            Some(university()),
            Some(CandidateDocument::new("ASU (disambiguation)")),
            Some(second),
        ]);
        let titles: Vec<_> = survivors.iter().map(|d| d.title.as_str()).collect();
        assert_eq!(titles, vec!["Arizona State University", "Tempe, Arizona"]);
    }
}
