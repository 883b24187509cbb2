//! Status message and not-found renderers.

use crate::ui::helpers::{position_cursor, push_centered};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{EmptyState, MessageTone, StatusMessage};

/// Renders a one-line status message centered at `row`, colored by tone.
pub fn render_status_message(out: &mut String, row: usize, message: &StatusMessage, theme: &Theme, cols: usize) {
    let color = match message.tone {
        MessageTone::Info => &theme.colors.empty_state_fg,
        MessageTone::Loading => &theme.colors.loading_fg,
        MessageTone::Error => &theme.colors.error_fg,
    };

    position_cursor(out, row, 1);
    if message.tone == MessageTone::Error {
        out.push_str(Theme::bold());
    }
    out.push_str(&Theme::fg(color));
    push_centered(out, &message.text, cols);
    out.push_str(Theme::reset());
}

/// Renders the not-found message at `row` and its dimmed subtitle below it.
pub fn render_empty_state(out: &mut String, row: usize, empty: &EmptyState, theme: &Theme, cols: usize) {
    position_cursor(out, row, 1);
    out.push_str(&Theme::fg(&theme.colors.empty_state_fg));
    push_centered(out, &empty.message, cols);
    out.push_str(Theme::reset());

    position_cursor(out, row + 1, 1);
    out.push_str(Theme::dim());
    out.push_str(&Theme::fg(&theme.colors.text_dim));
    push_centered(out, &empty.subtitle, cols);
    out.push_str(Theme::reset());
}
