//! HTTP implementation of [`SearchBackend`] against the hosted hybrid
//! search RPC.

use serde::Serialize;
use tracing::debug;

use super::error::RetrieverError;
use super::{SearchBackend, sanitize_candidates};
use crate::model::Candidate;

/// How much of an error body to keep in diagnostics.
const ERROR_BODY_SNIPPET: usize = 256;

#[derive(Debug, Serialize)]
struct SearchRequest<'a> {
    query: &'a str,
    firm_scope: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    category_filter: Option<&'a [String]>,
    k: usize,
}

/// Client for the hosted lexical+vector search function.
///
/// No retries and no client-side timeout here: both are orchestrator policy,
/// applied around the call so cancellation propagates through one place.
#[derive(Debug, Clone)]
pub struct HybridSearchClient {
    http: reqwest::Client,
    url: String,
    api_key: Option<String>,
    firm_scope: String,
    category_filter: Option<Vec<String>>,
}

impl HybridSearchClient {
    /// Creates a client for the search endpoint, scoped to one firm.
    pub fn new(url: impl Into<String>, firm_scope: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            url: url.into(),
            api_key: None,
            firm_scope: firm_scope.into(),
            category_filter: None,
        }
    }

    /// Attaches a bearer token sent with every request.
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Restricts retrieval to the given FAQ categories.
    pub fn with_category_filter(mut self, categories: Vec<String>) -> Self {
        self.category_filter = Some(categories);
        self
    }

    /// The configured endpoint URL.
    pub fn url(&self) -> &str {
        &self.url
    }
}

impl SearchBackend for HybridSearchClient {
    async fn search(&self, query: &str, k: usize) -> Result<Vec<Candidate>, RetrieverError> {
        let body = SearchRequest {
            query,
            firm_scope: &self.firm_scope,
            category_filter: self.category_filter.as_deref(),
            k,
        };

        let mut request = self.http.post(&self.url).json(&body);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| RetrieverError::RequestFailed {
                url: self.url.clone(),
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .map(|t| t.chars().take(ERROR_BODY_SNIPPET).collect())
                .unwrap_or_else(|e| e.to_string());
            return Err(RetrieverError::BadStatus {
                status: status.as_u16(),
                message,
            });
        }

        let rows: Vec<Candidate> =
            response
                .json()
                .await
                .map_err(|e| RetrieverError::MalformedResponse {
                    message: e.to_string(),
                })?;

        debug!(rows = rows.len(), k, "search backend responded");

        Ok(sanitize_candidates(rows, k))
    }
}
