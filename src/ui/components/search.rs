//! Search form renderer.
//!
//! Draws the form as a three-line box: the input on the left (or its
//! placeholder while empty) and the search control on the right.
//!
//! ```text
//!      ┌──────────────────────────────────────────┐
//!      │ movie search                  [ search ] │
//!      └──────────────────────────────────────────┘
//! ```

use crate::app::form::PLACEHOLDER;
use crate::ui::helpers::{clip, position_cursor, text_width};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::SearchBarInfo;

/// Horizontal margin for the search box (spaces on left and right).
const SEARCH_BOX_MARGIN: usize = 5;

/// Label of the submit control.
pub const SEARCH_BUTTON: &str = "[ search ]";

/// Shown after the input text while it has key focus.
const CURSOR: char = '▏';

/// Renders the search box starting at `row`.
///
/// Returns the row after the box.
pub fn render_search_bar(out: &mut String, row: usize, search: &SearchBarInfo, theme: &Theme, cols: usize) -> usize {
    let margin = if cols > SEARCH_BOX_MARGIN * 2 + 20 { SEARCH_BOX_MARGIN } else { 0 };
    let box_width = cols.saturating_sub(margin * 2);
    let inner_width = box_width.saturating_sub(2);

    render_edge(out, row, margin, inner_width, ('┌', '┐'), theme);

    // " {input}{cursor} ... {button} "
    let button_width = text_width(SEARCH_BUTTON) + 1;
    let input_width = inner_width.saturating_sub(button_width + 2);
    let (input, input_color) = if search.query.is_empty() {
        (PLACEHOLDER.to_string(), &theme.colors.placeholder_fg)
    } else {
        (tail(&search.query, input_width.saturating_sub(1)), &theme.colors.text_normal)
    };

    position_cursor(out, row + 1, 1);
    out.push_str(&" ".repeat(margin));
    out.push_str(&Theme::fg(&theme.colors.search_bar_border));
    out.push('│');
    out.push(' ');

    let mut used = 1;
    if search.focused {
        out.push_str(&Theme::fg(&theme.colors.text_normal));
        if search.query.is_empty() {
            out.push(CURSOR);
            used += 1;
        }
    }

    let input = clip(&input, input_width.saturating_sub(used - 1));
    out.push_str(&Theme::fg(input_color));
    out.push_str(&input);
    used += text_width(&input);

    if search.focused && !search.query.is_empty() {
        out.push_str(&Theme::fg(&theme.colors.text_normal));
        out.push(CURSOR);
        used += 1;
    }

    let remaining = inner_width.saturating_sub(used);
    if remaining >= button_width {
        out.push_str(&" ".repeat(remaining - button_width));
        out.push_str(Theme::bold());
        out.push_str(&Theme::fg(&theme.colors.button_fg));
        out.push_str(SEARCH_BUTTON);
        out.push_str(Theme::reset());
        out.push(' ');
    } else {
        out.push_str(&" ".repeat(remaining));
    }

    out.push_str(&Theme::fg(&theme.colors.search_bar_border));
    out.push('│');
    out.push_str(Theme::reset());

    render_edge(out, row + 2, margin, inner_width, ('└', '┘'), theme);

    row + 3
}

fn render_edge(out: &mut String, row: usize, margin: usize, inner_width: usize, corners: (char, char), theme: &Theme) {
    position_cursor(out, row, 1);
    out.push_str(&" ".repeat(margin));
    out.push_str(&Theme::fg(&theme.colors.search_bar_border));
    out.push(corners.0);
    out.push_str(&"─".repeat(inner_width));
    out.push(corners.1);
    out.push_str(Theme::reset());
}

/// The last `max` characters of `text`, so the end being typed stays visible.
fn tail(text: &str, max: usize) -> String {
    let len = text_width(text);
    text.chars().skip(len.saturating_sub(max)).collect()
}
