//! Status and focus enums for the search page.
//!
//! [`SearchStatus`] is the request lifecycle the page renders from.
//! [`SearchFocus`] decides whether keys edit the query or move through cards.

use std::fmt;

/// Lifecycle state of the current search.
///
/// `Pending` holds strictly while the most recently issued request is
/// outstanding. The machine has no terminal state: after the first search it
/// cycles among `Pending`, `Resolved` and `Rejected` for the plugin's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchStatus {
    /// No address query yet; nothing has been searched.
    #[default]
    Idle,
    /// A request for the current address query is in flight.
    Pending,
    /// The latest request succeeded (possibly with zero results).
    Resolved,
    /// The latest request failed.
    Rejected,
}

impl fmt::Display for SearchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::Pending => "pending",
            Self::Resolved => "resolved",
            Self::Rejected => "rejected",
        };
        f.write_str(name)
    }
}

/// Which part of the page receives key input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchFocus {
    /// Keys edit the query in the search form.
    #[default]
    Typing,

    /// Keys move the highlight through result cards.
    ///
    /// Only reachable while cards are on screen.
    Navigating,
}
