//! Resolution pipeline for place and institution names.
//!
//! Flow: title match (similarity gate) → single-hop redirect → place
//! classification → first survivor → coordinate normalization.

pub mod classifier;
pub mod coordinates;
pub mod index;
pub mod matcher;
pub mod redirect;
pub mod resolver;
pub mod types;

pub use classifier::PlaceClassifier;
pub use coordinates::normalize;
pub use index::{ElasticsearchIndex, MemoryIndex, SearchIndex};
pub use matcher::TitleMatcher;
pub use redirect::RedirectResolver;
pub use resolver::PlaceResolver;
pub use types::{CandidateDocument, Coordinates, ResolvedPlace};
