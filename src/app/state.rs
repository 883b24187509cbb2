//! Search page state container and view model computation.
//!
//! [`AppState`] owns everything the page knows: the query being typed, the
//! last applied result set, the request status, the shareable address and
//! the bookkeeping that ties request completions back to the submission that
//! caused them. All mutation goes through the methods below; the event
//! handler only sequences them.
//!
//! # Request ordering
//!
//! Every fetch gets the next sequence number. Only a completion carrying the
//! latest number is applied, so a slow response for an earlier query can
//! never overwrite the page after a newer submission.
//!
//! # Example
//!
//! ```rust
//! use cinesearch::app::{AppState, SearchStatus};
//! use cinesearch::ui::Theme;
//!
//! let mut state = AppState::new(Theme::default(), Default::default());
//! state.handle_query_change("Matrix");
//! assert_eq!(state.query, "matrix");
//! assert!(state.submit_query());
//! assert_eq!(state.location.query(), Some("matrix"));
//! assert_eq!(state.status, SearchStatus::Idle);
//! ```

use fuzzy_matcher::skim::SkimMatcherV2;

use super::actions::Action;
use super::handler::SearchOutcome;
use super::location::{Location, LocationWatcher};
use super::modes::{SearchFocus, SearchStatus};
use crate::domain::{ImageHost, Movie};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{
    EmptyState, FooterInfo, HeaderInfo, MessageTone, MovieCard, PageBody, SearchBarInfo, StatusMessage,
    UIViewModel, CARD_TITLE_MARGIN,
};

/// Rows used by everything except the card list: blank line, header, border,
/// three-line search box, blank line, border and footer.
const CHROME_ROWS: usize = 9;

/// Each card takes a title line and a detail line.
const ROWS_PER_CARD: usize = 2;

/// Page heading.
pub const PAGE_TITLE: &str = "Movie Search";

/// Shown before the first search.
pub const IDLE_MESSAGE: &str = "We can find any movie you want!";

/// Shown while the latest request is in flight.
pub const LOADING_MESSAGE: &str = "Loading...";

/// Shown after the latest request failed.
pub const REJECTED_MESSAGE: &str = "Sorry. However, you can be sure, minions are working to fix";

/// Central search page state.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Text in the search input. Lower-cased on every edit.
    pub query: String,

    /// Result set of the last applied successful fetch.
    ///
    /// Replaced wholesale on success, left alone on failure.
    pub results: Vec<Movie>,

    /// Lifecycle of the latest search.
    pub status: SearchStatus,

    /// Shareable address; its `query` parameter drives fetching.
    pub location: Location,

    /// Whether keys go to the input or to the cards.
    pub focus: SearchFocus,

    /// Highlighted card within `results`.
    pub selected_index: usize,

    /// Poster host used when building card image URLs.
    pub images: ImageHost,

    /// Color scheme for rendering.
    pub theme: Theme,

    watcher: LocationWatcher,
    latest_sequence: u64,
    in_flight_query: Option<String>,
}

impl AppState {
    /// Creates an idle page with an empty query, no results and no address
    /// query.
    #[must_use]
    pub fn new(theme: Theme, images: ImageHost) -> Self {
        Self {
            query: String::new(),
            results: Vec::new(),
            status: SearchStatus::Idle,
            location: Location::default(),
            focus: SearchFocus::Typing,
            selected_index: 0,
            images,
            theme,
            watcher: LocationWatcher::new(),
            latest_sequence: 0,
            in_flight_query: None,
        }
    }

    /// Sequence number of the most recently issued request (0 before any).
    #[must_use]
    pub const fn latest_sequence(&self) -> u64 {
        self.latest_sequence
    }

    /// Stores the raw input value from the search form, lower-cased.
    pub fn handle_query_change(&mut self, raw: &str) {
        self.query = raw.to_lowercase();
        tracing::trace!(query = %self.query, "query changed");
    }

    /// Writes the trimmed query into the address.
    ///
    /// Returns `false` without touching the address when the trimmed query is
    /// empty. Status is not changed here; the address watcher does that, and
    /// only if the value differs from the current address.
    pub fn submit_query(&mut self) -> bool {
        let trimmed = self.query.trim();
        if trimmed.is_empty() {
            tracing::debug!("ignoring empty submission");
            return false;
        }
        let trimmed = trimmed.to_string();
        self.location.set_query(trimmed);
        true
    }

    /// Runs the address watcher.
    ///
    /// When the address value changed since the last run, reflects it and, if
    /// it carries a `query`, moves to `Pending` and requests exactly one
    /// fetch for it.
    pub fn run_effects(&mut self) -> Vec<Action> {
        let Some(change) = self.watcher.poll(&self.location) else {
            return vec![];
        };

        let mut actions = vec![Action::ReflectAddress {
            href: self.location.href(),
        }];

        if let Some(query) = change.query {
            self.latest_sequence += 1;
            self.status = SearchStatus::Pending;
            self.in_flight_query = Some(query.clone());

            tracing::debug!(
                query = %query,
                sequence = self.latest_sequence,
                revision = change.revision,
                "address changed, fetching"
            );

            actions.push(Action::FetchMovies {
                query,
                sequence: self.latest_sequence,
            });
        }

        actions
    }

    /// Applies a request completion.
    ///
    /// Returns `false` (and changes nothing) for completions of superseded
    /// requests.
    pub fn apply_search_result(&mut self, sequence: u64, outcome: SearchOutcome) -> bool {
        if sequence != self.latest_sequence || self.status != SearchStatus::Pending {
            tracing::debug!(
                sequence = sequence,
                latest_sequence = self.latest_sequence,
                "discarding stale search result"
            );
            return false;
        }

        let submitted = self.in_flight_query.take();

        match outcome {
            SearchOutcome::Resolved(movies) => {
                tracing::debug!(count = movies.len(), results = ?movies, "search resolved");
                self.results = movies;
                self.status = SearchStatus::Resolved;
                self.selected_index = 0;
                if self.results.is_empty() {
                    self.focus = SearchFocus::Typing;
                }

                if submitted.as_deref() == Some(self.query.trim()) {
                    self.query.clear();
                } else {
                    tracing::debug!(query = %self.query, "input edited while pending, keeping it");
                }
            }
            SearchOutcome::Rejected(reason) => {
                tracing::debug!(error = %reason, "search rejected");
                self.status = SearchStatus::Rejected;
                self.focus = SearchFocus::Typing;
            }
        }

        true
    }

    /// Whether result cards are currently on screen.
    #[must_use]
    pub fn shows_cards(&self) -> bool {
        self.status == SearchStatus::Resolved && !self.results.is_empty()
    }

    /// Moves the card highlight down, wrapping to the top.
    pub fn move_selection_down(&mut self) {
        if !self.shows_cards() {
            return;
        }
        self.selected_index = (self.selected_index + 1) % self.results.len();
    }

    /// Moves the card highlight up, wrapping to the bottom.
    pub fn move_selection_up(&mut self) {
        if !self.shows_cards() {
            return;
        }
        if self.selected_index == 0 {
            self.selected_index = self.results.len() - 1;
        } else {
            self.selected_index -= 1;
        }
    }

    /// The highlighted movie, if cards are shown.
    #[must_use]
    pub fn selected_movie(&self) -> Option<&Movie> {
        if !self.shows_cards() {
            return None;
        }
        self.results.get(self.selected_index)
    }

    /// Computes the renderable view model for a terminal of `rows` x `cols`.
    #[must_use]
    pub fn compute_viewmodel(&self, rows: usize, cols: usize) -> UIViewModel {
        UIViewModel {
            header: HeaderInfo {
                title: PAGE_TITLE.to_string(),
                address: self.location.href(),
            },
            search_bar: SearchBarInfo {
                query: self.query.clone(),
                focused: self.focus == SearchFocus::Typing,
            },
            body: self.compute_body(rows, cols),
            footer: self.compute_footer(),
        }
    }

    fn compute_body(&self, rows: usize, cols: usize) -> PageBody {
        let message = |text: &str, tone| {
            PageBody::Message(StatusMessage {
                text: text.to_string(),
                tone,
            })
        };

        match self.status {
            SearchStatus::Idle => message(IDLE_MESSAGE, MessageTone::Info),
            SearchStatus::Pending => message(LOADING_MESSAGE, MessageTone::Loading),
            SearchStatus::Rejected => message(REJECTED_MESSAGE, MessageTone::Error),
            SearchStatus::Resolved if self.results.is_empty() => PageBody::NotFound(EmptyState {
                message: "Nothing found".to_string(),
                subtitle: self.location.query().map_or_else(
                    || "Try another title".to_string(),
                    |query| format!("No movies match \"{query}\". Try another title."),
                ),
            }),
            SearchStatus::Resolved => self.compute_cards(rows, cols),
        }
    }

    fn compute_cards(&self, rows: usize, cols: usize) -> PageBody {
        let capacity = (rows.saturating_sub(CHROME_ROWS) / ROWS_PER_CARD).max(1);
        let total = self.results.len();

        let mut start = self.selected_index.saturating_sub(capacity / 2);
        let end = (start + capacity).min(total);
        if end - start < capacity && total >= capacity {
            start = end.saturating_sub(capacity);
        }

        let matcher = self
            .location
            .query()
            .filter(|q| !q.is_empty())
            .map(|_| SkimMatcherV2::default());

        let cards = self.results[start..end]
            .iter()
            .enumerate()
            .map(|(offset, movie)| {
                self.compute_card(movie, start + offset, cols, matcher.as_ref())
            })
            .collect();

        PageBody::Results {
            cards,
            total,
            first_index: start,
        }
    }

    fn compute_card(&self, movie: &Movie, index: usize, cols: usize, matcher: Option<&SkimMatcherV2>) -> MovieCard {
        let title = truncate_chars(movie.display_title(), cols.saturating_sub(CARD_TITLE_MARGIN));
        let highlight_ranges = match (matcher, self.location.query()) {
            (Some(m), Some(query)) => highlight_ranges(&title, query, m),
            _ => vec![],
        };

        MovieCard {
            position: index + 1,
            href: movie.detail_href(),
            poster_url: movie.poster_url(&self.images),
            alt: movie.alt_text().to_string(),
            title,
            year: movie.release_year(),
            is_selected: index == self.selected_index,
            highlight_ranges,
        }
    }

    fn compute_footer(&self) -> FooterInfo {
        let keybindings = match self.focus {
            SearchFocus::Typing if self.shows_cards() => {
                "Enter: search  Tab: results  Ctrl+n/p: navigate  Esc: close"
            }
            SearchFocus::Typing => "Type a title  Enter: search  Esc: close",
            SearchFocus::Navigating => {
                "j/k or Ctrl+n/p: navigate  Enter: open  Tab or /: edit query  q: close"
            }
        };
        FooterInfo {
            keybindings: keybindings.to_string(),
        }
    }
}

/// Cuts `text` to at most `max` characters, marking the cut with `...`.
fn truncate_chars(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let keep = max.saturating_sub(3);
    let mut cut: String = text.chars().take(keep).collect();
    cut.push_str("...");
    cut
}

/// Character ranges of `text` matched by `query`, coalesced into runs.
fn highlight_ranges(text: &str, query: &str, matcher: &SkimMatcherV2) -> Vec<(usize, usize)> {
    use fuzzy_matcher::FuzzyMatcher;

    let Some((_score, indices)) = matcher.fuzzy_indices(text, query) else {
        return vec![];
    };

    let mut ranges: Vec<(usize, usize)> = Vec::new();
    for idx in indices {
        match ranges.last_mut() {
            Some((_, end)) if *end == idx => *end = idx + 1,
            _ => ranges.push((idx, idx + 1)),
        }
    }
    ranges
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::movie::{DEFAULT_POSTER_URL, YEAR_PLACEHOLDER};

    fn state() -> AppState {
        AppState::new(Theme::default(), ImageHost::default())
    }

    fn movie(id: i64, title: &str) -> Movie {
        Movie::new(id, title)
    }

    fn pending(state: &mut AppState, query: &str) -> u64 {
        state.handle_query_change(query);
        assert!(state.submit_query());
        state.run_effects();
        state.latest_sequence()
    }

    #[test]
    fn typing_lowercases() {
        let mut state = state();
        state.handle_query_change("BaTMaN");
        assert_eq!(state.query, "batman");
    }

    #[test]
    fn submit_writes_trimmed_query_to_address() {
        let mut state = state();
        state.handle_query_change("  blade runner ");
        assert!(state.submit_query());
        assert_eq!(state.location.query(), Some("blade runner"));
    }

    #[test]
    fn blank_submit_is_noop() {
        for input in ["", "   ", "\t"] {
            let mut state = state();
            state.run_effects();
            state.handle_query_change(input);
            assert!(!state.submit_query());
            assert_eq!(state.location.query(), None);
            assert_eq!(state.location.revision(), 0);
            assert!(state.run_effects().is_empty());
        }
    }

    #[test]
    fn mount_without_query_stays_idle() {
        let mut state = state();
        let actions = state.run_effects();
        assert_eq!(actions, vec![Action::ReflectAddress { href: "movies".to_string() }]);
        assert_eq!(state.status, SearchStatus::Idle);
    }

    #[test]
    fn address_write_issues_one_fetch() {
        let mut state = state();
        state.run_effects();
        state.handle_query_change("batman");
        state.submit_query();

        let actions = state.run_effects();
        assert_eq!(state.status, SearchStatus::Pending);
        assert_eq!(
            actions,
            vec![
                Action::ReflectAddress { href: "movies?query=batman".to_string() },
                Action::FetchMovies { query: "batman".to_string(), sequence: 1 },
            ]
        );
        assert!(state.run_effects().is_empty());
    }

    #[test]
    fn success_replaces_results_and_resets_query() {
        let mut state = state();
        let seq = pending(&mut state, "batman");

        assert!(state.apply_search_result(seq, SearchOutcome::Resolved(vec![movie(1, "Batman")])));
        assert_eq!(state.status, SearchStatus::Resolved);
        assert_eq!(state.results.len(), 1);
        assert_eq!(state.query, "");
    }

    #[test]
    fn success_keeps_query_edited_while_pending() {
        let mut state = state();
        let seq = pending(&mut state, "batman");
        state.handle_query_change("batman returns");

        state.apply_search_result(seq, SearchOutcome::Resolved(vec![]));
        assert_eq!(state.query, "batman returns");
    }

    #[test]
    fn failure_keeps_previous_results() {
        let mut state = state();
        let seq = pending(&mut state, "batman");
        state.apply_search_result(seq, SearchOutcome::Resolved(vec![movie(1, "Batman")]));

        let seq = pending(&mut state, "superman");
        assert!(state.apply_search_result(seq, SearchOutcome::Rejected("boom".to_string())));
        assert_eq!(state.status, SearchStatus::Rejected);
        assert_eq!(state.results, vec![movie(1, "Batman")]);
    }

    #[test]
    fn stale_completion_is_discarded() {
        let mut state = state();
        let first = pending(&mut state, "alien");
        let second = pending(&mut state, "aliens");
        assert_eq!(second, first + 1);

        assert!(!state.apply_search_result(first, SearchOutcome::Resolved(vec![movie(1, "Alien")])));
        assert_eq!(state.status, SearchStatus::Pending);
        assert!(state.results.is_empty());

        assert!(state.apply_search_result(second, SearchOutcome::Resolved(vec![movie(2, "Aliens")])));
        assert_eq!(state.results, vec![movie(2, "Aliens")]);
    }

    #[test]
    fn duplicate_completion_is_ignored() {
        let mut state = state();
        let seq = pending(&mut state, "heat");
        assert!(state.apply_search_result(seq, SearchOutcome::Resolved(vec![movie(1, "Heat")])));
        assert!(!state.apply_search_result(seq, SearchOutcome::Rejected("late".to_string())));
        assert_eq!(state.status, SearchStatus::Resolved);
    }

    #[test]
    fn selection_wraps_over_results() {
        let mut state = state();
        let seq = pending(&mut state, "alien");
        state.apply_search_result(seq, SearchOutcome::Resolved(vec![movie(1, "A"), movie(2, "B")]));

        state.move_selection_up();
        assert_eq!(state.selected_movie().map(|m| m.id), Some(2));
        state.move_selection_down();
        assert_eq!(state.selected_movie().map(|m| m.id), Some(1));
    }

    #[test]
    fn viewmodel_body_follows_status() {
        let mut state = state();
        assert!(matches!(
            state.compute_viewmodel(24, 80).body,
            PageBody::Message(StatusMessage { tone: MessageTone::Info, .. })
        ));

        let seq = pending(&mut state, "zzzz");
        assert!(matches!(
            state.compute_viewmodel(24, 80).body,
            PageBody::Message(StatusMessage { tone: MessageTone::Loading, .. })
        ));

        state.apply_search_result(seq, SearchOutcome::Resolved(vec![]));
        assert!(matches!(state.compute_viewmodel(24, 80).body, PageBody::NotFound(_)));

        let seq = pending(&mut state, "yyyy");
        state.apply_search_result(seq, SearchOutcome::Rejected("down".to_string()));
        match state.compute_viewmodel(24, 80).body {
            PageBody::Message(message) => assert_eq!(message.text, REJECTED_MESSAGE),
            other => panic!("unexpected body {other:?}"),
        }
    }

    #[test]
    fn cards_carry_fallbacks_and_links() {
        let mut state = state();
        let seq = pending(&mut state, "matrix");
        let mut dated = movie(603, "The Matrix");
        dated.release_date = Some("1999-03-31".to_string());
        state.apply_search_result(seq, SearchOutcome::Resolved(vec![dated, movie(604, "Matrix Extras")]));

        let PageBody::Results { cards, total, .. } = state.compute_viewmodel(40, 100).body else {
            panic!("expected cards");
        };
        assert_eq!(total, 2);
        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0].href, "./603");
        assert_eq!(cards[0].year, "1999");
        assert_eq!(cards[1].year, YEAR_PLACEHOLDER);
        assert_eq!(cards[1].poster_url, DEFAULT_POSTER_URL);
        assert!(!cards[0].highlight_ranges.is_empty());
    }

    #[test]
    fn card_window_follows_selection() {
        let mut state = state();
        let seq = pending(&mut state, "film");
        let movies = (1..=20).map(|id| movie(id, "Film")).collect();
        state.apply_search_result(seq, SearchOutcome::Resolved(movies));
        state.selected_index = 19;

        // 15 rows leave room for 3 cards.
        let PageBody::Results { cards, first_index, .. } = state.compute_viewmodel(15, 80).body else {
            panic!("expected cards");
        };
        assert_eq!(cards.len(), 3);
        assert_eq!(first_index, 17);
        assert!(cards[2].is_selected);
    }

    #[test]
    fn long_titles_fit_the_card_title_column() {
        let mut state = state();
        let seq = pending(&mut state, "amelie");
        let long = "Le fabuleux destin d'Amélie Poulain, version longue et restaurée";
        state.apply_search_result(seq, SearchOutcome::Resolved(vec![movie(194, long)]));

        let cards = state.compute_viewmodel(24, 40).body.cards().to_vec();
        assert_eq!(cards[0].title.chars().count(), 40 - CARD_TITLE_MARGIN);
        assert!(cards[0].title.ends_with("..."));
        assert_eq!(cards[0].alt, long);
    }

    #[test]
    fn truncation_is_char_safe() {
        assert_eq!(truncate_chars("Amélie", 10), "Amélie");
        assert_eq!(truncate_chars("Le fabuleux destin d'Amélie Poulain", 10), "Le fabu...");
    }

    #[test]
    fn highlight_ranges_coalesce() {
        let matcher = SkimMatcherV2::default();
        assert_eq!(highlight_ranges("The Matrix", "matrix", &matcher), vec![(4, 10)]);
        assert!(highlight_ranges("Heat", "matrix", &matcher).is_empty());
    }
}
