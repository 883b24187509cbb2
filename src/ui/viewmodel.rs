//! View model types representing renderable UI state.
//!
//! View models are computed by `AppState::compute_viewmodel()` and consumed by
//! the renderer. They hold display-ready data only: fallbacks are already
//! applied, titles are already truncated, and highlight ranges are already
//! computed.
//!
//! # Example
//!
//! ```rust
//! use cinesearch::ui::viewmodel::{
//!     FooterInfo, HeaderInfo, MessageTone, PageBody, SearchBarInfo, StatusMessage, UIViewModel,
//! };
//!
//! let vm = UIViewModel {
//!     header: HeaderInfo { title: "Movie Search".to_string(), address: "movies".to_string() },
//!     search_bar: SearchBarInfo { query: String::new(), focused: true },
//!     body: PageBody::Message(StatusMessage {
//!         text: "We can find any movie you want!".to_string(),
//!         tone: MessageTone::Info,
//!     }),
//!     footer: FooterInfo { keybindings: "Enter: search".to_string() },
//! };
//! assert!(vm.body.cards().is_empty());
//! ```

/// Width of a card's `  1. ` position prefix.
pub const POSITION_PREFIX_WIDTH: usize = 5;

/// Columns reserved on the right of a card's title line for the year.
pub const YEAR_COLUMN_WIDTH: usize = 8;

/// Columns of a card's title line not available to the title.
pub const CARD_TITLE_MARGIN: usize = POSITION_PREFIX_WIDTH + YEAR_COLUMN_WIDTH;

/// Complete UI view model for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UIViewModel {
    /// Page heading and current address.
    pub header: HeaderInfo,

    /// Search form contents.
    pub search_bar: SearchBarInfo,

    /// What the page shows below the form, chosen by request status.
    pub body: PageBody,

    /// Keybinding hints.
    pub footer: FooterInfo,
}

/// The region below the search form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageBody {
    /// A single line for the idle, pending and rejected states.
    Message(StatusMessage),

    /// The latest search succeeded with zero results.
    NotFound(EmptyState),

    /// The visible window of result cards.
    Results {
        cards: Vec<MovieCard>,
        /// Size of the full result set.
        total: usize,
        /// Index in the result set of the first visible card.
        first_index: usize,
    },
}

impl PageBody {
    /// Visible cards, empty for every other body.
    #[must_use]
    pub fn cards(&self) -> &[MovieCard] {
        match self {
            Self::Results { cards, .. } => cards,
            Self::Message(_) | Self::NotFound(_) => &[],
        }
    }

    /// Which part of the result set is on screen, e.g. `8-14 of 20`.
    ///
    /// `None` for every body without cards.
    ///
    /// ```
    /// use cinesearch::ui::viewmodel::PageBody;
    ///
    /// let body = PageBody::Results { cards: vec![], total: 0, first_index: 0 };
    /// assert_eq!(body.position_label(), None);
    /// ```
    #[must_use]
    pub fn position_label(&self) -> Option<String> {
        match self {
            Self::Results {
                cards,
                total,
                first_index,
            } if !cards.is_empty() => {
                let last = first_index + cards.len();
                Some(format!("{}-{last} of {total}", first_index + 1))
            }
            _ => None,
        }
    }
}

/// A status line and how to color it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub tone: MessageTone,
}

/// Color role of a [`StatusMessage`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageTone {
    Info,
    Loading,
    Error,
}

/// One result card.
///
/// Each card is a link to `href`, shows the poster URL, the title and the
/// release year.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovieCard {
    /// 1-based position in the full result set.
    pub position: usize,

    /// Relative link to the movie's detail page, e.g. `./603`.
    pub href: String,

    /// Full poster URL, or the default poster.
    pub poster_url: String,

    /// Poster alternative text, shown as the poster's label.
    pub alt: String,

    /// Display title, truncated to `cols - CARD_TITLE_MARGIN` characters.
    pub title: String,

    /// Four-digit release year or the placeholder.
    pub year: String,

    /// Whether the card carries the keyboard highlight.
    pub is_selected: bool,

    /// Character ranges of `title` matched by the address query.
    ///
    /// Each tuple is `(start_index, end_index)` in character indices.
    pub highlight_ranges: Vec<(usize, usize)>,
}

/// Header display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    /// Page heading.
    pub title: String,

    /// Current address, e.g. `movies?query=matrix`.
    pub address: String,
}

/// Footer display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterInfo {
    /// Keybinding help text.
    pub keybindings: String,
}

/// Empty result message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    /// Primary message.
    pub message: String,

    /// Secondary explanatory text.
    pub subtitle: String,
}

/// Search form display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchBarInfo {
    /// Current input value.
    pub query: String,

    /// Whether keys go to the input.
    pub focused: bool,
}
