//! Event handling and state transition logic.
//!
//! The handler turns key input, address writes from the host and request
//! completions into [`AppState`] mutations and a list of [`Action`]s for the
//! plugin runtime to execute.
//!
//! # Flow
//!
//! 1. Key events reach the [`SearchForm`], which reports edits and
//!    submissions through its callbacks.
//! 2. Submissions write the address; they never fetch directly.
//! 3. After every event the address watcher runs, and only it issues
//!    [`Action::FetchMovies`].
//! 4. Completions come back as [`Event::SearchCompleted`] with the sequence
//!    number of the request they answer.
//!
//! # Example
//!
//! ```rust
//! use cinesearch::app::{handle_event, mount, Action, AppState, Event};
//! use cinesearch::app::form::FormKey;
//! use cinesearch::ui::Theme;
//!
//! let mut state = AppState::new(Theme::default(), Default::default());
//! mount(&mut state);
//!
//! handle_event(&mut state, &Event::Input(FormKey::Char('x')))?;
//! let (_, actions) = handle_event(&mut state, &Event::Input(FormKey::Submit))?;
//! assert!(actions.contains(&Action::FetchMovies { query: "x".to_string(), sequence: 1 }));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use std::collections::BTreeMap;

use super::form::{FormKey, SearchForm, SubmitEvent};
use super::modes::SearchFocus;
use crate::api::{handle_response, sequence_from_context, CONTEXT_QUERY};
use crate::app::{Action, AppState};
use crate::domain::error::Result;
use crate::domain::Movie;

/// How a search request ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// The service answered with this result list (possibly empty).
    Resolved(Vec<Movie>),
    /// Transport, HTTP status or decoding failure, with a description.
    Rejected(String),
}

/// Events the search page reacts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A key for the search form.
    Input(FormKey),
    /// Moves the card highlight down (wraps to top).
    KeyDown,
    /// Moves the card highlight up (wraps to bottom).
    KeyUp,
    /// Moves key focus from the input to the cards.
    FocusResults,
    /// Moves key focus back to the input.
    FocusSearchBar,
    /// Follows the highlighted card's link.
    OpenSelected,
    /// Hides the plugin pane.
    CloseFocus,

    /// The host wrote the address, through a pipe message or configuration.
    ///
    /// `None` removes the `query` parameter.
    Navigate {
        query: Option<String>,
    },

    /// A search request finished.
    SearchCompleted {
        /// Sequence number the request was issued with.
        sequence: u64,
        outcome: SearchOutcome,
    },
}

/// Turns the host's answer to a search request into a completion event.
///
/// Returns `None` for answers without a sequence number in their context,
/// which were not issued by this plugin.
#[must_use]
pub fn search_completed(status: u16, body: &[u8], context: &BTreeMap<String, String>) -> Option<Event> {
    let Some(sequence) = sequence_from_context(context) else {
        tracing::debug!(status = status, "web request result without sequence, ignoring");
        return None;
    };

    let outcome = match handle_response(status, body) {
        Ok(movies) => SearchOutcome::Resolved(movies),
        Err(e) => {
            tracing::debug!(
                status = status,
                query = context.get(CONTEXT_QUERY).map(String::as_str),
                error = %e,
                body = %String::from_utf8_lossy(body),
                "search request failed"
            );
            SearchOutcome::Rejected(e.to_string())
        }
    };

    Some(Event::SearchCompleted { sequence, outcome })
}

/// Runs the address watcher once, as on first render.
///
/// Returns the actions for an address present at load time (the pane title
/// and, when it carries a `query`, the initial fetch).
pub fn mount(state: &mut AppState) -> Vec<Action> {
    let _span = tracing::debug_span!("mount", address = %state.location.href()).entered();
    state.run_effects()
}

/// Processes an event, mutates state, and returns whether to re-render along
/// with the actions to execute.
///
/// # Errors
///
/// Currently infallible; the signature leaves room for state methods that
/// can fail.
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = ?event).entered();

    let (mut should_render, mut actions) = dispatch(state, event);

    let effects = state.run_effects();
    if !effects.is_empty() {
        should_render = true;
        actions.extend(effects);
    }

    Ok((should_render, actions))
}

fn dispatch(state: &mut AppState, event: &Event) -> (bool, Vec<Action>) {
    match event {
        Event::Input(key) => {
            if state.focus == SearchFocus::Navigating {
                if *key == FormKey::Submit {
                    return open_selected(state);
                }
                state.focus = SearchFocus::Typing;
            }
            handle_form_key(state, *key);
            (true, vec![])
        }
        Event::KeyDown => {
            state.move_selection_down();
            (true, vec![])
        }
        Event::KeyUp => {
            state.move_selection_up();
            (true, vec![])
        }
        Event::FocusResults => {
            if !state.shows_cards() {
                tracing::debug!(status = %state.status, "no cards to focus");
                return (false, vec![]);
            }
            state.focus = SearchFocus::Navigating;
            (true, vec![])
        }
        Event::FocusSearchBar => {
            state.focus = SearchFocus::Typing;
            (true, vec![])
        }
        Event::OpenSelected => open_selected(state),
        Event::CloseFocus => (false, vec![Action::CloseFocus]),
        Event::Navigate { query } => {
            tracing::debug!(query = ?query, "address written by host");
            state.location.replace_query(query.clone());
            (true, vec![])
        }
        Event::SearchCompleted { sequence, outcome } => {
            let applied = state.apply_search_result(*sequence, outcome.clone());
            (applied, vec![])
        }
    }
}

/// Feeds one key through the search form bound to the page's query.
fn handle_form_key(state: &mut AppState, key: FormKey) {
    let mut changed: Option<String> = None;
    let mut submitted = false;

    let submission = {
        let mut on_submit = |event: &mut SubmitEvent| {
            event.prevent_default();
            submitted = true;
        };
        let mut on_change = |raw: String| changed = Some(raw);

        SearchForm::new(&state.query, &mut on_submit)
            .on_change(&mut on_change)
            .handle_key(key)
    };

    if let Some(raw) = changed {
        state.handle_query_change(&raw);
    }

    if submitted {
        if let Some(action) = submission.as_ref().and_then(SubmitEvent::default_action) {
            tracing::warn!(action = %action, "form submission was not prevented");
        }
        state.submit_query();
    }
}

fn open_selected(state: &AppState) -> (bool, Vec<Action>) {
    let Some(movie) = state.selected_movie() else {
        tracing::debug!("no movie selected");
        return (false, vec![]);
    };

    tracing::debug!(movie_id = movie.id, title = %movie.display_title(), "opening movie");
    (false, vec![Action::OpenDetail {
        href: movie.detail_href(),
    }])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::SearchStatus;
    use crate::ui::Theme;

    fn mounted() -> AppState {
        let mut state = AppState::new(Theme::default(), Default::default());
        mount(&mut state);
        state
    }

    fn type_text(state: &mut AppState, text: &str) {
        for c in text.chars() {
            handle_event(state, &Event::Input(FormKey::Char(c))).unwrap();
        }
    }

    fn fetches(actions: &[Action]) -> Vec<(String, u64)> {
        actions
            .iter()
            .filter_map(|action| match action {
                Action::FetchMovies { query, sequence } => Some((query.clone(), *sequence)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn typing_never_fetches() {
        let mut state = mounted();
        for c in "Matrix".chars() {
            let (render, actions) = handle_event(&mut state, &Event::Input(FormKey::Char(c))).unwrap();
            assert!(render);
            assert!(actions.is_empty());
        }
        assert_eq!(state.query, "matrix");
        assert_eq!(state.status, SearchStatus::Idle);
    }

    #[test]
    fn submit_fetches_through_address() {
        let mut state = mounted();
        type_text(&mut state, " Matrix ");

        let (_, actions) = handle_event(&mut state, &Event::Input(FormKey::Submit)).unwrap();
        assert_eq!(fetches(&actions), vec![("matrix".to_string(), 1)]);
        assert!(actions.contains(&Action::ReflectAddress {
            href: "movies?query=matrix".to_string()
        }));
        assert_eq!(state.status, SearchStatus::Pending);
    }

    #[test]
    fn blank_submit_does_nothing() {
        let mut state = mounted();
        type_text(&mut state, "   ");
        let (_, actions) = handle_event(&mut state, &Event::Input(FormKey::Submit)).unwrap();
        assert!(actions.is_empty());
        assert_eq!(state.status, SearchStatus::Idle);
        assert_eq!(state.location.query(), None);
    }

    #[test]
    fn resubmitting_same_term_does_not_refetch() {
        let mut state = mounted();
        type_text(&mut state, "heat");
        handle_event(&mut state, &Event::Input(FormKey::Submit)).unwrap();
        handle_event(
            &mut state,
            &Event::SearchCompleted {
                sequence: 1,
                outcome: SearchOutcome::Resolved(vec![Movie::new(949, "Heat")]),
            },
        )
        .unwrap();
        assert_eq!(state.query, "");

        type_text(&mut state, "heat");
        let (_, actions) = handle_event(&mut state, &Event::Input(FormKey::Submit)).unwrap();
        assert!(fetches(&actions).is_empty());

        let (_, actions) = handle_event(
            &mut state,
            &Event::Navigate {
                query: Some("heat".to_string()),
            },
        )
        .unwrap();
        assert!(actions.is_empty());

        assert_eq!(state.latest_sequence(), 1);
        assert_eq!(state.status, SearchStatus::Resolved);
        assert_eq!(state.location.query(), Some("heat"));
    }

    #[test]
    fn navigate_from_host_fetches() {
        let mut state = mounted();
        let (render, actions) = handle_event(
            &mut state,
            &Event::Navigate {
                query: Some("alien".to_string()),
            },
        )
        .unwrap();
        assert!(render);
        assert_eq!(fetches(&actions), vec![("alien".to_string(), 1)]);
    }

    #[test]
    fn navigate_without_query_reflects_only() {
        let mut state = mounted();
        handle_event(&mut state, &Event::Navigate { query: Some("alien".to_string()) }).unwrap();

        let (_, actions) = handle_event(&mut state, &Event::Navigate { query: None }).unwrap();
        assert_eq!(actions, vec![Action::ReflectAddress { href: "movies".to_string() }]);
        assert_eq!(state.latest_sequence(), 1);
    }

    #[test]
    fn stale_completion_does_not_render() {
        let mut state = mounted();
        handle_event(&mut state, &Event::Navigate { query: Some("a".to_string()) }).unwrap();
        handle_event(&mut state, &Event::Navigate { query: Some("b".to_string()) }).unwrap();

        let (render, _) = handle_event(
            &mut state,
            &Event::SearchCompleted {
                sequence: 1,
                outcome: SearchOutcome::Resolved(vec![Movie::new(1, "A")]),
            },
        )
        .unwrap();
        assert!(!render);
        assert_eq!(state.status, SearchStatus::Pending);
    }

    #[test]
    fn focus_results_requires_cards() {
        let mut state = mounted();
        let (render, _) = handle_event(&mut state, &Event::FocusResults).unwrap();
        assert!(!render);
        assert_eq!(state.focus, SearchFocus::Typing);

        handle_event(&mut state, &Event::Navigate { query: Some("up".to_string()) }).unwrap();
        handle_event(
            &mut state,
            &Event::SearchCompleted {
                sequence: 1,
                outcome: SearchOutcome::Resolved(vec![Movie::new(14160, "Up")]),
            },
        )
        .unwrap();
        handle_event(&mut state, &Event::FocusResults).unwrap();
        assert_eq!(state.focus, SearchFocus::Navigating);

        let (_, actions) = handle_event(&mut state, &Event::Input(FormKey::Submit)).unwrap();
        assert_eq!(actions, vec![Action::OpenDetail { href: "./14160".to_string() }]);
    }

    #[test]
    fn typing_while_navigating_returns_to_input() {
        let mut state = mounted();
        handle_event(&mut state, &Event::Navigate { query: Some("up".to_string()) }).unwrap();
        handle_event(
            &mut state,
            &Event::SearchCompleted {
                sequence: 1,
                outcome: SearchOutcome::Resolved(vec![Movie::new(1, "Up")]),
            },
        )
        .unwrap();
        handle_event(&mut state, &Event::FocusResults).unwrap();

        handle_event(&mut state, &Event::Input(FormKey::Char('c'))).unwrap();
        assert_eq!(state.focus, SearchFocus::Typing);
        assert_eq!(state.query, "c");
    }

    #[test]
    fn open_without_selection_is_noop() {
        let mut state = mounted();
        let (render, actions) = handle_event(&mut state, &Event::OpenSelected).unwrap();
        assert!(!render);
        assert!(actions.is_empty());
    }

    #[test]
    fn web_results_map_to_completions() {
        let mut context = BTreeMap::new();
        assert_eq!(search_completed(200, b"{}", &context), None);

        context.insert(crate::api::CONTEXT_SEQUENCE.to_string(), "4".to_string());
        let body = br#"{"page":1,"results":[{"id":603,"title":"The Matrix"}],"total_pages":1,"total_results":1}"#;
        assert_eq!(
            search_completed(200, body, &context),
            Some(Event::SearchCompleted {
                sequence: 4,
                outcome: SearchOutcome::Resolved(vec![Movie::new(603, "The Matrix")]),
            })
        );

        let Some(Event::SearchCompleted { outcome, .. }) =
            search_completed(401, br#"{"status_message":"Invalid API key"}"#, &context)
        else {
            panic!("expected completion");
        };
        assert!(matches!(outcome, SearchOutcome::Rejected(reason) if reason.contains("401")));
    }

    #[test]
    fn close_focus_emits_action() {
        let mut state = mounted();
        let (_, actions) = handle_event(&mut state, &Event::CloseFocus).unwrap();
        assert_eq!(actions, vec![Action::CloseFocus]);
    }
}
