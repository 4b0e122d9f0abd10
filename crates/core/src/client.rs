//! HTTP transport for the search controller. Uses the browser's fetch on
//! wasm32 and a native client elsewhere.

use crate::controller::{FetchError, SearchTransport};
use crate::types::SearchResult;

/// Path of the location code listing.
pub const STATES_PATH: &str = "/api/states";

/// Sends search requests to a server rooted at `base_url`.
#[derive(Clone, Debug)]
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTransport {
    /// `base_url` is the scheme + host (+ port) of the server, e.g. the page origin.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client: reqwest::Client::new(), base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T, FetchError> {
        let response = self
            .client
            .get(self.url(path))
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }
        response.json::<T>().await.map_err(|e| FetchError::Decode(e.to_string()))
    }

    /// Location codes offered by the state filter.
    pub async fn fetch_states(&self) -> Result<Vec<String>, FetchError> {
        self.get_json(STATES_PATH).await
    }
}

impl SearchTransport for HttpTransport {
    async fn get_results(&self, path: &str) -> Result<Vec<SearchResult>, FetchError> {
        self.get_json(path).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_trailing_slash_is_dropped() {
        let t = HttpTransport::new("http://localhost:8432/");
        assert_eq!(t.base_url(), "http://localhost:8432");
        assert_eq!(t.url("/search?q=a"), "http://localhost:8432/search?q=a");
    }
}
