//! Place and institution name resolution against an encyclopedia search index.
//!
//! Given a free-text name, the resolver queries a full-text index, drops weak
//! title matches, follows single-hop redirects, keeps candidates that look like
//! places or institutions, and converts the winner's coordinate annotation into
//! signed decimal degrees.

pub mod batch;
pub mod config;
pub mod error;
pub mod logging;
pub mod output;
pub mod place;
pub mod reader;

pub use config::{IndexConfig, ResolverConfig};
pub use error::{ResolveError, Result};
pub use place::{CandidateDocument, Coordinates, PlaceResolver, ResolvedPlace};
pub use reader::PlaceRecord;
