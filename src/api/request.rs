//! Search request construction.
//!
//! The plugin cannot open sockets itself; it asks the Zellij host to perform
//! the GET and receives the answer later as a `WebRequestResult` event. A
//! [`SearchRequest`] is therefore plain data: the URL, the headers, and a
//! context map that the host echoes back verbatim with the result. The
//! context carries the request's sequence number so the completion can be
//! matched to the submission that caused it.

use std::collections::BTreeMap;

use url::Url;

use crate::domain::error::{CinesearchError, Result};

/// Default TMDB v3 API root.
pub const DEFAULT_API_BASE_URL: &str = "https://api.themoviedb.org/3";

/// Context key holding the request sequence number.
pub const CONTEXT_SEQUENCE: &str = "cinesearch.seq";

/// Context key holding the query the request was issued for.
pub const CONTEXT_QUERY: &str = "cinesearch.query";

/// Connection settings for the movie database search endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchEndpoint {
    pub base_url: String,
    pub api_key: Option<String>,
    pub language: String,
    pub include_adult: bool,
}

impl Default for SearchEndpoint {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_string(),
            api_key: None,
            language: "en-US".to_string(),
            include_adult: false,
        }
    }
}

/// A fully built GET request ready to hand to the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub url: String,
    pub headers: BTreeMap<String, String>,
    pub context: BTreeMap<String, String>,
}

impl SearchEndpoint {
    fn url(&self, path: &str) -> Result<Url> {
        let raw = format!("{}{}", self.base_url.trim_end_matches('/'), path);
        Url::parse(&raw).map_err(|e| CinesearchError::Config(format!("invalid api_base_url {raw:?}: {e}")))
    }

    /// Builds the `/search/movie` request for `query`, tagged with `sequence`.
    ///
    /// # Errors
    ///
    /// Returns [`CinesearchError::Config`] if the configured base URL does not
    /// parse.
    ///
    /// ```
    /// use cinesearch::api::SearchEndpoint;
    ///
    /// let endpoint = SearchEndpoint { api_key: Some("k".into()), ..Default::default() };
    /// let request = endpoint.search_movies("the matrix", 1)?;
    /// assert!(request.url.starts_with("https://api.themoviedb.org/3/search/movie?"));
    /// assert!(request.url.contains("query=the+matrix"));
    /// # Ok::<(), cinesearch::CinesearchError>(())
    /// ```
    pub fn search_movies(&self, query: &str, sequence: u64) -> Result<SearchRequest> {
        let mut url = self.url("/search/movie")?;
        {
            let mut pairs = url.query_pairs_mut();
            if let Some(key) = &self.api_key {
                pairs.append_pair("api_key", key);
            }
            pairs
                .append_pair("query", query)
                .append_pair("language", &self.language)
                .append_pair("include_adult", if self.include_adult { "true" } else { "false" })
                .append_pair("page", "1");
        }

        let mut headers = BTreeMap::new();
        headers.insert("Accept".to_string(), "application/json".to_string());

        let mut context = BTreeMap::new();
        context.insert(CONTEXT_SEQUENCE.to_string(), sequence.to_string());
        context.insert(CONTEXT_QUERY.to_string(), query.to_string());

        Ok(SearchRequest {
            url: url.to_string(),
            headers,
            context,
        })
    }
}

/// Reads the sequence number back out of an echoed context map.
///
/// Returns `None` for results that did not originate from
/// [`SearchEndpoint::search_movies`].
#[must_use]
pub fn sequence_from_context(context: &BTreeMap<String, String>) -> Option<u64> {
    context.get(CONTEXT_SEQUENCE)?.parse().ok()
}
