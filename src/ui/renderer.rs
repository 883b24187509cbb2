//! Top-level rendering coordinator.
//!
//! Computes the view model from `AppState`, renders it into one frame buffer
//! and writes the frame to stdout.

use crate::app::AppState;
use crate::ui::components;
use crate::ui::viewmodel::UIViewModel;
use crate::ui::theme::Theme;

/// Renders the plugin UI for a pane of `rows` x `cols` to stdout.
pub fn render(state: &AppState, rows: usize, cols: usize) {
    let viewmodel = state.compute_viewmodel(rows, cols);
    print!("{}", render_to_string(&viewmodel, &state.theme, rows, cols));
}

/// Renders a view model into an ANSI frame without printing it.
#[must_use]
pub fn render_to_string(vm: &UIViewModel, theme: &Theme, rows: usize, cols: usize) -> String {
    let mut out = String::new();
    components::render_page(&mut out, vm, theme, cols, rows);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::{AppState, SearchOutcome};
    use crate::app::state::{IDLE_MESSAGE, LOADING_MESSAGE, REJECTED_MESSAGE};
    use crate::domain::Movie;

    fn frame(state: &AppState) -> String {
        render_to_string(&state.compute_viewmodel(24, 90), &state.theme, 24, 90)
    }

    fn searching(query: &str) -> AppState {
        let mut state = AppState::new(Theme::default(), Default::default());
        state.run_effects();
        state.handle_query_change(query);
        state.submit_query();
        state.run_effects();
        state
    }

    #[test]
    fn idle_frame() {
        let state = AppState::new(Theme::default(), Default::default());
        let out = frame(&state);
        assert!(out.contains("Movie Search"));
        assert!(out.contains(IDLE_MESSAGE));
        assert!(out.contains(components::SEARCH_BUTTON));
    }

    #[test]
    fn pending_frame() {
        let state = searching("alien");
        assert!(frame(&state).contains(LOADING_MESSAGE));
    }

    #[test]
    fn rejected_frame() {
        let mut state = searching("alien");
        state.apply_search_result(state.latest_sequence(), SearchOutcome::Rejected("boom".to_string()));
        assert!(frame(&state).contains(REJECTED_MESSAGE));
    }

    #[test]
    fn not_found_frame_names_query() {
        let mut state = searching("qwxz");
        state.apply_search_result(state.latest_sequence(), SearchOutcome::Resolved(vec![]));
        let out = frame(&state);
        assert!(out.contains("Nothing found"));
        assert!(out.contains("qwxz"));
    }

    #[test]
    fn results_frame_shows_every_card() {
        let mut state = searching("matrix");
        let movies = vec![Movie::new(603, "The Matrix"), Movie::new(604, "The Matrix Reloaded")];
        state.apply_search_result(state.latest_sequence(), SearchOutcome::Resolved(movies));
        let out = frame(&state);
        assert!(out.contains("./603"));
        assert!(out.contains("./604"));
        assert!(out.contains("movies?query=matrix"));
        assert!(out.contains("1-2 of 2"));
    }

    #[test]
    fn windowed_results_show_their_position() {
        let mut state = searching("film");
        let movies = (1..=20).map(|id| Movie::new(id, "Film")).collect();
        state.apply_search_result(state.latest_sequence(), SearchOutcome::Resolved(movies));
        for _ in 0..10 {
            state.move_selection_down();
        }

        // 24 rows leave room for 7 cards, centered on the 11th.
        let out = frame(&state);
        assert!(out.contains(" 8-14 of 20 "));
        assert!(out.contains("./11"));
        assert!(!out.contains("./20"));
    }
}
