//! Composable UI component renderers.
//!
//! # Components
//!
//! - [`header`]: Page heading and current address
//! - [`search`]: Search form box with the input and the search control
//! - [`cards`]: Result cards (title, year, link, poster)
//! - [`empty`]: Status messages and the not-found view
//! - [`footer`]: Keybinding hints
//!
//! # Layout
//!
//! ```text
//! [blank line]
//! [Header]
//! [Border]
//! [Search form - 3 lines]
//! [blank line]
//! [Body: status message, not-found view or cards]
//! [Blank padding to fill screen]
//! [Border, with the visible card range on the right]
//! [Footer]
//! ```

mod cards;
mod empty;
mod footer;
mod header;
mod search;

pub use search::SEARCH_BUTTON;

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{PageBody, UIViewModel};

use cards::{render_cards, render_position};
use empty::{render_empty_state, render_status_message};
use footer::render_footer;
use header::render_header;
use search::render_search_bar;

/// Renders a horizontal border line at `row` and returns the next row.
fn render_border(out: &mut String, row: usize, color: &str, cols: usize) -> usize {
    position_cursor(out, row, 1);
    out.push_str(&Theme::fg(color));
    out.push_str(&"─".repeat(cols));
    out.push_str(Theme::reset());
    row + 1
}

/// Renders a full frame into `out`.
pub fn render_page(out: &mut String, vm: &UIViewModel, theme: &Theme, cols: usize, rows: usize) {
    let mut current_row = 2; // row 1 stays blank

    current_row = render_header(out, current_row, &vm.header, theme, cols);
    current_row = render_border(out, current_row, &theme.colors.border, cols);
    current_row = render_search_bar(out, current_row, &vm.search_bar, theme, cols);
    current_row += 1;

    let footer_start = rows.saturating_sub(1).max(current_row + 1);
    let border_row = footer_start.saturating_sub(1);

    match &vm.body {
        PageBody::Message(message) => {
            render_status_message(out, current_row + 1, message, theme, cols);
        }
        PageBody::NotFound(empty) => render_empty_state(out, current_row + 1, empty, theme, cols),
        PageBody::Results { cards, .. } => {
            render_cards(out, current_row, cards, theme, cols);
        }
    }

    render_border(out, border_row, &theme.colors.border, cols);
    if let Some(label) = vm.body.position_label() {
        render_position(out, border_row, &label, theme, cols);
    }
    render_footer(out, footer_start, &vm.footer, theme, cols);
}
