//! Search index providers: Elasticsearch over HTTP and an in-memory index.

use super::types::CandidateDocument;
use crate::config::IndexConfig;
use crate::error::{ResolveError, Result};
use base64::Engine;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::warn;

/// The two query shapes the pipeline needs from an index.
pub trait SearchIndex {
    /// Full-text match on `title`, hits in the engine's relevance order.
    fn match_title(&self, title: &str) -> Result<Vec<CandidateDocument>>;

    /// Exact lookup on `title_keyword`.
    fn exact_title(&self, title: &str) -> Result<Vec<CandidateDocument>>;
}

impl<T: SearchIndex + ?Sized> SearchIndex for &T {
    fn match_title(&self, title: &str) -> Result<Vec<CandidateDocument>> {
        (**self).match_title(title)
    }

    fn exact_title(&self, title: &str) -> Result<Vec<CandidateDocument>> {
        (**self).exact_title(title)
    }
}

// ─── Elasticsearch provider ─────────────────────────────────────

#[derive(Deserialize)]
struct SearchResponse {
    hits: HitList,
}

#[derive(Deserialize)]
struct HitList {
    #[serde(default)]
    hits: Vec<Hit>,
}

#[derive(Deserialize)]
struct Hit {
    #[serde(rename = "_source")]
    source: CandidateDocument,
}

pub struct ElasticsearchIndex {
    agent: ureq::Agent,
    search_url: String,
    authorization: Option<String>,
    retries: u32,
}

impl ElasticsearchIndex {
    pub fn new(config: &IndexConfig) -> Result<Self> {
        config.validate()?;

        let agent = ureq::AgentBuilder::new()
            .timeout(config.timeout)
            .user_agent(concat!("place-resolver/", env!("CARGO_PKG_VERSION")))
            .build();

        let authorization = config.credentials().map(|(user, pwd)| {
            let token = base64::engine::general_purpose::STANDARD.encode(format!("{}:{}", user, pwd));
            format!("Basic {}", token)
        });

        Ok(Self {
            agent,
            search_url: config.search_url(),
            authorization,
            retries: config.retries,
        })
    }

    fn search(&self, body: &Value) -> Result<Vec<CandidateDocument>> {
        with_retries(self.retries, || self.search_once(body))
    }

    fn search_once(&self, body: &Value) -> Result<Vec<CandidateDocument>> {
        let mut request = self
            .agent
            .post(&self.search_url)
            .set("Content-Type", "application/json");
        if let Some(auth) = &self.authorization {
            request = request.set("Authorization", auth);
        }

        let response = request.send_json(body).map_err(map_transport_error)?;

        let parsed: SearchResponse = response
            .into_json()
            .map_err(|e| ResolveError::InvalidResponse(e.to_string()))?;

        Ok(parsed.hits.hits.into_iter().map(|h| h.source).collect())
    }
}

/// Runs `op` once, then up to `retries` more times while it fails with a retryable error.
fn with_retries<T>(retries: u32, mut op: impl FnMut() -> Result<T>) -> Result<T> {
    let mut attempt = 0;
    loop {
        match op() {
            Err(e) if e.is_retryable() && attempt < retries => {
                attempt += 1;
                warn!("Search request failed ({}), retry {}/{}", e, attempt, retries);
            }
            other => return other,
        }
    }
}

/// Server-side failures and transport errors are worth retrying; client errors are not.
fn map_transport_error(err: ureq::Error) -> ResolveError {
    match err {
        ureq::Error::Status(code, response) if code < 500 => ResolveError::InvalidResponse(format!(
            "HTTP {} from {}",
            code,
            response.get_url()
        )),
        ureq::Error::Status(code, response) => {
            ResolveError::Network(format!("HTTP {} from {}", code, response.get_url()))
        }
        ureq::Error::Transport(t) => ResolveError::Network(t.to_string()),
    }
}

pub fn match_query(title: &str) -> Value {
    json!({ "query": { "match": { "title": title } } })
}

pub fn exact_query(title: &str) -> Value {
    json!({ "query": { "match": { "title_keyword": title } } })
}

impl SearchIndex for ElasticsearchIndex {
    fn match_title(&self, title: &str) -> Result<Vec<CandidateDocument>> {
        self.search(&match_query(title))
    }

    fn exact_title(&self, title: &str) -> Result<Vec<CandidateDocument>> {
        self.search(&exact_query(title))
    }
}

// ─── In-memory provider ─────────────────────────────────────────

/// Small index held in memory. Title matching is case-insensitive word
/// overlap and keeps insertion order as the relevance order.
#[derive(Debug, Clone, Default)]
pub struct MemoryIndex {
    documents: Vec<CandidateDocument>,
}

impl MemoryIndex {
    pub fn new() -> Self {
        Self::default()
    }
}

impl FromIterator<CandidateDocument> for MemoryIndex {
    fn from_iter<I: IntoIterator<Item = CandidateDocument>>(iter: I) -> Self {
        Self {
            documents: iter.into_iter().collect(),
        }
    }
}

fn words(s: &str) -> Vec<String> {
    s.split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(|w| w.to_lowercase())
        .collect()
}

impl SearchIndex for MemoryIndex {
    fn match_title(&self, title: &str) -> Result<Vec<CandidateDocument>> {
        let query = words(title);
        Ok(self
            .documents
            .iter()
            .filter(|doc| words(&doc.title).iter().any(|w| query.contains(w)))
            .cloned()
            .collect())
    }

    fn exact_title(&self, title: &str) -> Result<Vec<CandidateDocument>> {
        Ok(self
            .documents
            .iter()
            .filter(|doc| doc.title == title)
            .cloned()
            .collect())
    }
}
