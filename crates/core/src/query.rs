//! Search query construction: normalizing the form input and encoding it as
//! the `/search` request path. The same parameter names are parsed back by
//! the HTTP layer via [`SearchParams`].

use serde::Deserialize;

use crate::types::INTERNATIONAL_CODE;

/// Path of the search endpoint.
pub const SEARCH_PATH: &str = "/search";

/// A validated search request as submitted from the search form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    /// Trimmed, lowercased free-text term. Never empty.
    pub term: String,
    /// State filter as selected (empty = all locations).
    pub state: String,
    pub international_only: bool,
}

impl SearchQuery {
    /// Build a query from raw form values.
    ///
    /// Returns `None` when the term is empty after trimming; no request should
    /// be made in that case.
    pub fn from_form(raw_term: &str, state: &str, international_only: bool) -> Option<Self> {
        let term = raw_term.trim().to_lowercase();
        if term.is_empty() {
            return None;
        }
        Some(Self { term, state: state.to_string(), international_only })
    }

    /// Form-urlencoded query string: `q=..&state=..&international_only=..`.
    pub fn query_string(&self) -> String {
        url::form_urlencoded::Serializer::new(String::new())
            .append_pair("q", &self.term)
            .append_pair("state", &self.state)
            .append_pair("international_only", if self.international_only { "true" } else { "false" })
            .finish()
    }

    /// Request path relative to the page origin.
    pub fn request_path(&self) -> String {
        format!("{SEARCH_PATH}?{}", self.query_string())
    }
}

// ---------------------------------------------------------------------------
// Server-side parameters
// ---------------------------------------------------------------------------

/// Raw query parameters of `GET /search`, as received.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub international_only: Option<String>,
}

/// Which datasets a request searches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchScope {
    International,
    State(String),
    All,
}

/// Normalized backend request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendQuery {
    /// Trimmed, lowercased term. May be empty, in which case nothing matches.
    pub term: String,
    pub scope: SearchScope,
}

impl From<&SearchParams> for BackendQuery {
    fn from(p: &SearchParams) -> Self {
        let term = p.q.trim().to_lowercase();
        let state = p.state.trim().to_uppercase();
        let international_only = p
            .international_only
            .as_deref()
            .is_some_and(|v| v.trim().eq_ignore_ascii_case("true"));

        let scope = if state == INTERNATIONAL_CODE || international_only {
            SearchScope::International
        } else if !state.is_empty() {
            SearchScope::State(state)
        } else {
            SearchScope::All
        };
        Self { term, scope }
    }
}

impl From<&SearchQuery> for BackendQuery {
    fn from(q: &SearchQuery) -> Self {
        BackendQuery::from(&SearchParams {
            q: q.term.clone(),
            state: q.state.clone(),
            international_only: Some(q.international_only.to_string()),
        })
    }
}
