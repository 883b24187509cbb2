//! Shareable page address and its change listener.
//!
//! The address's `query` parameter is the single source of truth for which
//! search is active. The search form never touches it; the search page writes
//! it on submission, and the host may write it through plugin configuration
//! or a pipe message. Fetching is driven only by observing the address, never
//! by the submission itself.
//!
//! Only a write that changes the value counts: writing the current value
//! again leaves the revision alone, and the watcher stays quiet.
//!
//! ```
//! use cinesearch::app::location::{Location, LocationWatcher};
//!
//! let mut location = Location::default();
//! let mut watcher = LocationWatcher::new();
//!
//! // The first poll mirrors an effect running on mount.
//! assert_eq!(watcher.poll(&location).unwrap().query, None);
//! assert!(watcher.poll(&location).is_none());
//!
//! location.set_query("matrix");
//! assert_eq!(watcher.poll(&location).unwrap().query.as_deref(), Some("matrix"));
//! assert_eq!(location.href(), "movies?query=matrix");
//! ```

use url::form_urlencoded;

/// The only recognized address parameter.
pub const QUERY_PARAM: &str = "query";

const DEFAULT_PATH: &str = "movies";

/// The page's address: a path plus an optional `query` parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    path: String,
    query: Option<String>,
    revision: u64,
}

impl Default for Location {
    fn default() -> Self {
        Self {
            path: DEFAULT_PATH.to_string(),
            query: None,
            revision: 0,
        }
    }
}

impl Location {
    /// Current `query` parameter, `None` if no search has been requested.
    #[must_use]
    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    /// Number of value changes so far.
    #[must_use]
    pub const fn revision(&self) -> u64 {
        self.revision
    }

    /// Writes the `query` parameter. See [`Location::replace_query`].
    pub fn set_query(&mut self, query: impl Into<String>) -> bool {
        self.replace_query(Some(query.into()))
    }

    /// Writes or removes the `query` parameter.
    ///
    /// Returns `false` when the address already held this value.
    pub fn replace_query(&mut self, query: Option<String>) -> bool {
        if self.query == query {
            tracing::debug!(query = ?self.query, "address unchanged");
            return false;
        }
        self.query = query;
        self.revision += 1;
        tracing::debug!(query = ?self.query, revision = self.revision, "address updated");
        true
    }

    /// Renders the address as `path?query=...` (or just `path`).
    #[must_use]
    pub fn href(&self) -> String {
        self.query.as_ref().map_or_else(
            || self.path.clone(),
            |query| {
                let search = form_urlencoded::Serializer::new(String::new())
                    .append_pair(QUERY_PARAM, query)
                    .finish();
                format!("{}?{search}", self.path)
            },
        )
    }
}

/// Extracts the `query` parameter from an address or search string.
///
/// Accepts `movies?query=x`, `?query=x` and `query=x`. Returns `None` when the
/// parameter is missing; an empty value is returned as `Some("")`.
///
/// ```
/// use cinesearch::app::location::parse_query_param;
///
/// assert_eq!(parse_query_param("movies?query=the+matrix").as_deref(), Some("the matrix"));
/// assert_eq!(parse_query_param("page=2"), None);
/// ```
#[must_use]
pub fn parse_query_param(address: &str) -> Option<String> {
    let search = address.split_once('?').map_or(address, |(_, search)| search);
    form_urlencoded::parse(search.as_bytes())
        .find(|(key, _)| key == QUERY_PARAM)
        .map(|(_, value)| value.into_owned())
}

/// Reads an address write sent from outside the plugin.
///
/// The payload is either a search string (`query=alien`, `?query=alien`) or a
/// bare term. The value is normalized like a submitted query: trimmed and
/// lower-cased. A blank bare payload removes the `query` parameter.
///
/// ```
/// use cinesearch::app::location::query_from_payload;
///
/// assert_eq!(query_from_payload("query=Alien").as_deref(), Some("alien"));
/// assert_eq!(query_from_payload("  Blade Runner ").as_deref(), Some("blade runner"));
/// assert_eq!(query_from_payload(""), None);
/// ```
#[must_use]
pub fn query_from_payload(payload: &str) -> Option<String> {
    let payload = payload.trim();
    let raw = if payload.contains('=') {
        parse_query_param(payload)?
    } else if payload.is_empty() {
        return None;
    } else {
        payload.to_string()
    };
    Some(raw.trim().to_lowercase())
}

/// A change observed by [`LocationWatcher::poll`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationChange {
    pub query: Option<String>,
    pub revision: u64,
}

/// Change listener for a [`Location`].
///
/// Remembers the last value it reported and fires only when the current
/// value differs from it. Writes that end on the reported value between two
/// polls are not a change. The first poll always reports the current value.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LocationWatcher {
    seen: Option<Option<String>>,
}

impl LocationWatcher {
    #[must_use]
    pub const fn new() -> Self {
        Self { seen: None }
    }

    /// Returns the address if its value changed since the previous poll.
    pub fn poll(&mut self, location: &Location) -> Option<LocationChange> {
        if self.seen.as_ref() == Some(&location.query) {
            return None;
        }
        self.seen = Some(location.query.clone());
        Some(LocationChange {
            query: location.query.clone(),
            revision: location.revision,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rewriting_same_value_is_not_a_change() {
        let mut location = Location::default();
        let mut watcher = LocationWatcher::new();
        watcher.poll(&location);

        assert!(location.set_query("batman"));
        assert_eq!(watcher.poll(&location).unwrap().revision, 1);

        assert!(!location.set_query("batman"));
        assert_eq!(location.revision(), 1);
        assert!(watcher.poll(&location).is_none());

        assert!(!location.replace_query(Some("batman".to_string())));
        assert!(watcher.poll(&location).is_none());
    }

    #[test]
    fn writes_returning_to_seen_value_are_not_a_change() {
        let mut location = Location::default();
        let mut watcher = LocationWatcher::new();
        location.set_query("alien");
        watcher.poll(&location);

        location.set_query("aliens");
        location.set_query("alien");
        assert_eq!(location.revision(), 3);
        assert!(watcher.poll(&location).is_none());
    }

    #[test]
    fn removing_query_is_a_change() {
        let mut location = Location::default();
        let mut watcher = LocationWatcher::new();
        location.set_query("alien");
        watcher.poll(&location);

        assert!(location.replace_query(None));
        let change = watcher.poll(&location).unwrap();
        assert_eq!(change.query, None);
    }

    #[test]
    fn multiple_writes_between_polls_coalesce() {
        let mut location = Location::default();
        let mut watcher = LocationWatcher::new();
        watcher.poll(&location);

        location.set_query("alien");
        location.set_query("aliens");
        assert_eq!(watcher.poll(&location).unwrap().query.as_deref(), Some("aliens"));
        assert!(watcher.poll(&location).is_none());
    }

    #[test]
    fn href_encodes_query() {
        let mut location = Location::default();
        assert_eq!(location.href(), "movies");
        location.set_query("amélie & co");
        assert_eq!(location.href(), "movies?query=am%C3%A9lie+%26+co");
        assert_eq!(parse_query_param(&location.href()).as_deref(), Some("amélie & co"));
    }

    #[test]
    fn parses_search_forms() {
        assert_eq!(parse_query_param("query=alien").as_deref(), Some("alien"));
        assert_eq!(parse_query_param("?query=alien&page=3").as_deref(), Some("alien"));
        assert_eq!(parse_query_param("query=").as_deref(), Some(""));
        assert_eq!(parse_query_param(""), None);
    }

    #[test]
    fn payload_forms() {
        assert_eq!(query_from_payload("movies?query=The+Thing").as_deref(), Some("the thing"));
        assert_eq!(query_from_payload("query=").as_deref(), Some(""));
        assert_eq!(query_from_payload("page=2"), None);
        assert_eq!(query_from_payload("   "), None);
    }
}
