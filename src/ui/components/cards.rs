//! Result card list renderer.
//!
//! Each card takes two rows: the position, highlighted title and release
//! year on the first, and the link target and the labelled poster URL on
//! the second. A position line on the bottom border tells which part of the
//! result set is visible.
//!
//! ```text
//!   1. The Matrix                                            1999
//!      ./603  [The Matrix] https://image.tmdb.org/t/p/w500/f89U3ADr1oiB1s9GkdPOEpXUk5H.jpg
//! ```

use crate::ui::helpers::{clip, position_cursor, push_highlighted, text_width};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{MovieCard, CARD_TITLE_MARGIN, POSITION_PREFIX_WIDTH};

/// Indent of the detail line, aligned with the title.
const DETAIL_INDENT: usize = 6;

/// Renders all cards starting at `row`.
///
/// Returns the next available row.
pub fn render_cards(out: &mut String, row: usize, cards: &[MovieCard], theme: &Theme, cols: usize) -> usize {
    let mut current_row = row;
    for card in cards {
        current_row = render_card(out, current_row, card, theme, cols);
    }
    current_row
}

/// Renders one card. The highlighted card gets the selection colors across
/// the whole title line.
fn render_card(out: &mut String, row: usize, card: &MovieCard, theme: &Theme, cols: usize) -> usize {
    position_cursor(out, row, 1);

    if card.is_selected {
        out.push_str(&Theme::fg(&theme.colors.selection_fg));
        out.push_str(&Theme::bg(&theme.colors.selection_bg));
    } else {
        out.push_str(&Theme::fg(&theme.colors.text_normal));
    }

    let prefix = format!("{:>width$}. ", card.position, width = POSITION_PREFIX_WIDTH - 2);
    let title = clip(&card.title, cols.saturating_sub(CARD_TITLE_MARGIN));
    out.push_str(&prefix);
    push_highlighted(out, &title, &card.highlight_ranges, theme, card.is_selected);

    let used = prefix.len() + text_width(&title);
    let year_len = text_width(&card.year);
    let gap = cols.saturating_sub(used + year_len + 1);
    out.push_str(&" ".repeat(gap));

    if !card.is_selected {
        out.push_str(&Theme::fg(&theme.colors.year_fg));
    }
    out.push_str(&card.year);
    out.push(' ');
    out.push_str(Theme::reset());

    position_cursor(out, row + 1, 1);
    out.push_str(&Theme::fg(&theme.colors.text_dim));
    let detail = format!(
        "{}{}  [{}] {}",
        " ".repeat(DETAIL_INDENT),
        card.href,
        card.alt,
        card.poster_url
    );
    let detail = clip(&detail, cols);
    let detail_len = text_width(&detail);
    out.push_str(&detail);
    out.push_str(&" ".repeat(cols.saturating_sub(detail_len)));
    out.push_str(Theme::reset());

    row + 2
}

/// Draws `label` near the right end of the border line at `row`.
pub fn render_position(out: &mut String, row: usize, label: &str, theme: &Theme, cols: usize) {
    let text = format!(" {label} ");
    let width = text_width(&text);
    if width + 2 > cols {
        return;
    }
    position_cursor(out, row, cols - width - 1);
    out.push_str(&Theme::fg(&theme.colors.text_dim));
    out.push_str(&text);
    out.push_str(Theme::reset());
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(position: usize, title: &str, selected: bool) -> MovieCard {
        MovieCard {
            position,
            href: format!("./{position}"),
            poster_url: "https://example.com/p.jpg".to_string(),
            alt: title.to_string(),
            title: title.to_string(),
            year: "1999".to_string(),
            is_selected: selected,
            highlight_ranges: vec![],
        }
    }

    #[test]
    fn each_card_takes_two_rows() {
        let mut out = String::new();
        let cards = vec![card(1, "The Matrix", false), card(2, "Heat", true)];
        assert_eq!(render_cards(&mut out, 8, &cards, &Theme::default(), 80), 12);
        assert!(out.contains("  1. The Matrix"));
        assert!(out.contains("./2  [Heat] https://example.com/p.jpg"));
        assert!(out.contains(&Theme::bg(&Theme::default().colors.selection_bg)));
    }

    #[test]
    fn title_fills_its_column_unclipped() {
        let mut out = String::new();
        let title = "T".repeat(80 - CARD_TITLE_MARGIN);
        render_cards(&mut out, 8, &[card(1, &title, false)], &Theme::default(), 80);
        assert!(out.contains(&format!("  1. {title}")));
    }

    #[test]
    fn position_sits_on_the_border() {
        let mut out = String::new();
        render_position(&mut out, 22, "8-14 of 20", &Theme::default(), 80);
        assert!(out.starts_with("\u{1b}[22;67H"));
        assert!(out.contains(" 8-14 of 20 "));

        let mut out = String::new();
        render_position(&mut out, 22, "8-14 of 20", &Theme::default(), 10);
        assert!(out.is_empty());
    }

    #[test]
    fn narrow_pane_clips_detail() {
        let mut out = String::new();
        render_cards(&mut out, 8, &[card(1, "Heat", false)], &Theme::default(), 20);
        assert!(!out.contains("example.com/p.jpg"));
        assert!(out.contains("1999"));
    }
}
