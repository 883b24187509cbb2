//! Side effects requested by the event handler.
//!
//! The handler never talks to the host. It mutates [`AppState`](super::AppState)
//! and returns a list of [`Action`]s; the plugin runtime in `main.rs` turns
//! each one into Zellij API calls.
//!
//! ```rust
//! use cinesearch::app::Action;
//!
//! let actions = vec![
//!     Action::FetchMovies { query: "batman".to_string(), sequence: 1 },
//!     Action::ReflectAddress { href: "movies?query=batman".to_string() },
//! ];
//! assert_eq!(actions.len(), 2);
//! ```

/// Commands executed by the plugin runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Hides the plugin pane.
    CloseFocus,

    /// Issues one search request.
    ///
    /// `sequence` must travel with the request and come back with its result
    /// so stale completions can be recognized.
    FetchMovies {
        /// Trimmed, lower-cased search term taken from the address.
        query: String,
        /// Monotonic request number.
        sequence: u64,
    },

    /// Shows the current address in the pane title.
    ReflectAddress {
        /// Rendered address, e.g. `movies?query=matrix`.
        href: String,
    },

    /// Follows a result card's link.
    OpenDetail {
        /// Relative link, e.g. `./603`.
        href: String,
    },
}
