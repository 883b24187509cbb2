//! Header component renderer.

use crate::ui::helpers::{clip, position_cursor, text_width};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::HeaderInfo;

/// Gap kept between the centered title and the address.
const ADDRESS_GAP: usize = 2;

/// Renders the page heading centered at `row`, with the current address
/// right-aligned when there is room for it.
///
/// Returns the next available row.
pub fn render_header(out: &mut String, row: usize, header: &HeaderInfo, theme: &Theme, cols: usize) -> usize {
    let title = clip(&header.title, cols);
    let title_len = text_width(&title);
    let padding = cols.saturating_sub(title_len) / 2;
    let right_space = cols.saturating_sub(padding + title_len);

    position_cursor(out, row, 1);
    out.push_str(Theme::bold());
    out.push_str(&Theme::fg(&theme.colors.header_fg));
    if let Some(bg) = &theme.colors.header_bg {
        out.push_str(&Theme::bg(bg));
    }

    out.push_str(&" ".repeat(padding));
    out.push_str(&title);

    let address_len = text_width(&header.address);
    if address_len + ADDRESS_GAP + 1 <= right_space {
        out.push_str(&" ".repeat(right_space - address_len - 1));
        out.push_str(&Theme::fg(&theme.colors.address_fg));
        out.push_str(&header.address);
        out.push(' ');
    } else {
        out.push_str(&" ".repeat(right_space));
    }

    out.push_str(Theme::reset());
    row + 1
}
