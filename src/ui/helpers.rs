//! Shared rendering utilities.
//!
//! Components append ANSI-styled text to a frame buffer instead of printing
//! directly, so a whole frame can be checked in tests and written to stdout
//! in one go. Widths are measured in characters, never bytes.

use crate::ui::theme::Theme;

/// Appends a cursor move to `row`, `col` (both 1-indexed).
///
/// # Example
///
/// ```
/// use cinesearch::ui::helpers::position_cursor;
///
/// let mut out = String::new();
/// position_cursor(&mut out, 3, 1);
/// assert_eq!(out, "\u{1b}[3;1H");
/// ```
pub fn position_cursor(out: &mut String, row: usize, col: usize) {
    out.push_str(&format!("\u{1b}[{row};{col}H"));
}

/// Display width of `text` in characters.
///
/// Counts `char`s rather than bytes, so `Amélie` is six columns wide. Wide
/// glyphs (CJK, emoji) are counted as one column.
#[must_use]
pub fn text_width(text: &str) -> usize {
    text.chars().count()
}

/// Cuts `text` to `max` characters without an ellipsis.
///
/// Used where running off the pane edge is the only concern. Titles are
/// shortened with an ellipsis earlier, in the view model.
#[must_use]
pub fn clip(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}

/// Appends `text` centered in `cols` columns, padding both sides.
///
/// Text wider than `cols` is clipped. The odd padding column goes to the
/// right.
///
/// # Parameters
///
/// * `out` - Frame buffer to append to
/// * `text` - Plain text, without ANSI sequences
/// * `cols` - Width to fill
pub fn push_centered(out: &mut String, text: &str, cols: usize) {
    let text = clip(text, cols);
    let len = text_width(&text);
    let padding = cols.saturating_sub(len) / 2;

    out.push_str(&" ".repeat(padding));
    out.push_str(&text);
    out.push_str(&" ".repeat(cols.saturating_sub(padding + len)));
}

/// Appends text with highlighted character ranges for query matches.
///
/// Ranges are `(start, end)` character indices, start inclusive. When
/// `is_selected` is set the selection colors win and no match highlight is
/// drawn.
///
/// # Parameters
///
/// * `out` - Frame buffer to append to
/// * `text` - Text to draw
/// * `ranges` - Sorted, non-overlapping ranges; overlapping or out-of-bounds
///   ranges are skipped or clamped
/// * `theme` - Supplies the match highlight colors
/// * `is_selected` - Whether the line carries the selection colors
///
/// After each highlighted run the normal text color is restored, so callers
/// set the base color before calling.
pub fn push_highlighted(out: &mut String, text: &str, ranges: &[(usize, usize)], theme: &Theme, is_selected: bool) {
    if ranges.is_empty() || is_selected {
        out.push_str(text);
        return;
    }

    let chars: Vec<char> = text.chars().collect();
    let mut current_pos = 0;

    for &(start, end) in ranges {
        let start = start.min(chars.len());
        let end = end.min(chars.len());
        if start < current_pos || start >= end {
            continue;
        }

        out.extend(&chars[current_pos..start]);

        out.push_str(&Theme::fg(&theme.colors.match_highlight_fg));
        out.push_str(&Theme::bg(&theme.colors.match_highlight_bg));
        out.extend(&chars[start..end]);
        out.push_str(Theme::reset());
        out.push_str(&Theme::fg(&theme.colors.text_normal));

        current_pos = end;
    }

    out.extend(&chars[current_pos..]);
}
