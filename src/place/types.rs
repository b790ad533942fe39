//! Core types for the resolution pipeline.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A document as stored in the search index (`_source` of a hit).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CandidateDocument {
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    /// Full article markup, including any `#REDIRECT` marker or `{{coord|...}}` template.
    #[serde(rename = "complete_text", default, deserialize_with = "null_as_default")]
    pub body_text: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub categories: Vec<String>,
    /// Pipe-delimited coordinate annotation, e.g. `33|25|11|N|111|56|1|W`.
    #[serde(rename = "coordinates", default, deserialize_with = "null_as_default")]
    pub coordinates_raw: String,
}

impl CandidateDocument {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body_text = body.into();
        self
    }

    pub fn with_categories<S: Into<String>>(mut self, categories: impl IntoIterator<Item = S>) -> Self {
        self.categories = categories.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_coordinates(mut self, raw: impl Into<String>) -> Self {
        self.coordinates_raw = raw.into();
        self
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Normalized coordinates of a resolved place.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Coordinates {
    /// No candidate survived.
    #[default]
    Blank,
    /// Signed decimal degrees, latitude first when both are present.
    Decimal(Vec<f64>),
    /// Numbers left in the buffer without a closing N/S/E/W marker.
    /// The annotation was not understood; treat the values as unreliable.
    Raw(Vec<f64>),
}

impl Coordinates {
    pub fn is_degenerate(&self) -> bool {
        matches!(self, Self::Raw(_))
    }

    pub fn values(&self) -> &[f64] {
        match self {
            Self::Blank => &[],
            Self::Decimal(v) | Self::Raw(v) => v.as_slice(),
        }
    }
}

/// `;`-joined values, empty for [`Coordinates::Blank`].
impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, v) in self.values().iter().enumerate() {
            if i > 0 {
                write!(f, ";")?;
            }
            write!(f, "{}", v)?;
        }
        Ok(())
    }
}

impl Serialize for Coordinates {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Blank => serializer.serialize_str(""),
            Self::Decimal(v) | Self::Raw(v) => v.serialize(serializer),
        }
    }
}

/// One output record per input name. Always fully populated: fields are
/// blank when nothing matched.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedPlace {
    pub place_name: String,
    pub wikipedia_entry_title: String,
    pub coordinates: Coordinates,
    pub wikipedia_entry_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl ResolvedPlace {
    pub fn blank(place_name: impl Into<String>) -> Self {
        Self {
            place_name: place_name.into(),
            wikipedia_entry_title: String::new(),
            coordinates: Coordinates::Blank,
            wikipedia_entry_url: String::new(),
            id: None,
        }
    }

    pub fn with_id(mut self, id: Option<String>) -> Self {
        self.id = id;
        self
    }

    pub fn is_match(&self) -> bool {
        !self.wikipedia_entry_title.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_document_from_index_source() {
        let source = json!({
            "title": "Arizona State University",
            "complete_text": "'''Arizona State University''' is a public university",
            "categories": ["Public universities in Arizona"],
            "coordinates": "33|25|11|N|111|56|1|W"
        });
        let doc: CandidateDocument = serde_json::from_value(source).unwrap();
        assert_eq!(doc.title, "Arizona State University");
        assert_eq!(doc.categories.len(), 1);
        assert_eq!(doc.coordinates_raw, "33|25|11|N|111|56|1|W");
    }

    #[test]
    fn test_document_missing_and_null_fields() {
        let doc: CandidateDocument = serde_json::from_value(json!({
            "title": "Somewhere",
            "complete_text": "text",
            "coordinates": null
        }))
        .unwrap();
        assert!(doc.categories.is_empty());
        assert!(doc.coordinates_raw.is_empty());
    }

    #[test]
    fn test_blank_place_serializes_empty_strings() {
        let place = ResolvedPlace::blank("Nowhere Really");
        let value = serde_json::to_value(&place).unwrap();
        assert_eq!(
            value,
            json!({
                "place_name": "Nowhere Really",
                "wikipedia_entry_title": "",
                "coordinates": "",
                "wikipedia_entry_url": ""
            })
        );
        assert!(!place.is_match());
    }

    #[test]
    fn test_coordinates_serialize_as_numbers() {
        let coords = Coordinates::Decimal(vec![33.419722, -111.933611]);
        assert_eq!(serde_json::to_value(&coords).unwrap(), json!([33.419722, -111.933611]));
        assert_eq!(coords.to_string(), "33.419722;-111.933611");
    }

    #[test]
    fn test_raw_coordinates_are_degenerate() {
        let coords = Coordinates::Raw(vec![12.0, 34.0]);
        assert!(coords.is_degenerate());
        assert_eq!(coords.to_string(), "12;34");
        assert_eq!(Coordinates::Blank.to_string(), "");
    }

    #[test]
    fn test_with_id() {
        let place = ResolvedPlace::blank("Paris").with_id(Some("42".into()));
        assert_eq!(place.id.as_deref(), Some("42"));
        assert_eq!(serde_json::to_value(&place).unwrap()["id"], json!("42"));
    }
}
