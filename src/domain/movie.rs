//! Movie domain model and display fallbacks.
//!
//! A [`Movie`] is one record of a search result set as returned by the movie
//! database. Every field except `id` may be missing or null, so the display
//! accessors here resolve each one to something renderable: a title from the
//! fallback chain, a poster URL from the configured [`ImageHost`], and a
//! release year or placeholder glyph.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Poster shown when a movie has no `poster_path`.
pub const DEFAULT_POSTER_URL: &str =
    "https://ik.imagekit.io/tc8jxffbcvf/default-movie-portrait_EmJUj9Tda5wa.jpg?tr=fo-auto,di-";

/// Image host prefix for poster paths returned by TMDB.
pub const DEFAULT_IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p/w500";

/// Title shown when neither `title` nor `original_title` is usable.
pub const TITLE_PLACEHOLDER: &str = "Title coming soon";

/// Year shown when `release_date` is absent or unreadable.
pub const YEAR_PLACEHOLDER: &str = "---";

/// A single movie record from the search endpoint.
///
/// Only the fields the search page renders are kept; the rest of the TMDB
/// payload is ignored during decoding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movie {
    pub id: i64,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub original_title: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
}

/// Where poster images are fetched from.
///
/// Poster URLs are built by plain concatenation of `base_url` and the
/// record's `poster_path` (which already starts with `/`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageHost {
    pub base_url: String,
    pub fallback_url: String,
}

impl Default for ImageHost {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_IMAGE_BASE_URL.to_string(),
            fallback_url: DEFAULT_POSTER_URL.to_string(),
        }
    }
}

/// TMDB sends `""` as often as `null` for unknown values.
fn present(value: Option<&String>) -> Option<&str> {
    value.map(String::as_str).filter(|s| !s.trim().is_empty())
}

impl Movie {
    /// Creates a record with only an identifier and a title.
    #[must_use]
    pub fn new(id: i64, title: impl Into<String>) -> Self {
        Self {
            id,
            title: Some(title.into()),
            original_title: None,
            poster_path: None,
            release_date: None,
        }
    }

    /// Title for the card heading: `title`, then `original_title`, then the
    /// placeholder.
    ///
    /// ```
    /// use cinesearch::Movie;
    ///
    /// let mut movie = Movie::new(603, "");
    /// movie.original_title = Some("The Matrix".to_string());
    /// assert_eq!(movie.display_title(), "The Matrix");
    /// ```
    #[must_use]
    pub fn display_title(&self) -> &str {
        present(self.title.as_ref())
            .or_else(|| present(self.original_title.as_ref()))
            .unwrap_or(TITLE_PLACEHOLDER)
    }

    /// Alternative text for the poster image: `title` or the placeholder.
    #[must_use]
    pub fn alt_text(&self) -> &str {
        present(self.title.as_ref()).unwrap_or(TITLE_PLACEHOLDER)
    }

    /// Full poster URL, or the host's fallback image when there is no poster.
    #[must_use]
    pub fn poster_url(&self, images: &ImageHost) -> String {
        present(self.poster_path.as_ref()).map_or_else(
            || images.fallback_url.clone(),
            |path| format!("{}{}", images.base_url, path),
        )
    }

    /// Four-digit release year, or [`YEAR_PLACEHOLDER`].
    ///
    /// Accepts full `YYYY-MM-DD` dates and bare leading years such as
    /// `"1999"`; anything else renders as the placeholder.
    ///
    /// ```
    /// use cinesearch::Movie;
    ///
    /// let mut movie = Movie::new(603, "The Matrix");
    /// assert_eq!(movie.release_year(), "---");
    /// movie.release_date = Some("1999-03-31".to_string());
    /// assert_eq!(movie.release_year(), "1999");
    /// ```
    #[must_use]
    pub fn release_year(&self) -> String {
        let Some(date) = present(self.release_date.as_ref()) else {
            return YEAR_PLACEHOLDER.to_string();
        };
        let date = date.trim();

        if let Ok(parsed) = NaiveDate::parse_from_str(date, "%Y-%m-%d") {
            return parsed.year().to_string();
        }

        match date.get(..4) {
            Some(year) if year.chars().all(|c| c.is_ascii_digit()) => year.to_string(),
            _ => YEAR_PLACEHOLDER.to_string(),
        }
    }

    /// Relative link to the movie's detail page.
    #[must_use]
    pub fn detail_href(&self) -> String {
        format!("./{}", self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bare(id: i64) -> Movie {
        Movie {
            id,
            title: None,
            original_title: None,
            poster_path: None,
            release_date: None,
        }
    }

    #[test]
    fn title_falls_back_to_original_then_placeholder() {
        let mut movie = bare(1);
        assert_eq!(movie.display_title(), TITLE_PLACEHOLDER);

        movie.original_title = Some("Matrix".to_string());
        assert_eq!(movie.display_title(), "Matrix");
        assert_eq!(movie.alt_text(), TITLE_PLACEHOLDER);

        movie.title = Some("The Matrix".to_string());
        assert_eq!(movie.display_title(), "The Matrix");
        assert_eq!(movie.alt_text(), "The Matrix");
    }

    #[test]
    fn missing_poster_uses_fixed_default() {
        let movie = bare(1);
        assert_eq!(movie.poster_url(&ImageHost::default()), DEFAULT_POSTER_URL);
    }

    #[test]
    fn empty_poster_path_counts_as_missing() {
        let mut movie = bare(1);
        movie.poster_path = Some(String::new());
        assert_eq!(movie.poster_url(&ImageHost::default()), DEFAULT_POSTER_URL);
    }

    #[test]
    fn poster_path_is_concatenated_onto_host() {
        let mut movie = bare(1);
        movie.poster_path = Some("/f89U3ADr1oiB1s9GkdPOEpXUk5H.jpg".to_string());
        assert_eq!(
            movie.poster_url(&ImageHost::default()),
            "https://image.tmdb.org/t/p/w500/f89U3ADr1oiB1s9GkdPOEpXUk5H.jpg"
        );
    }

    #[test]
    fn release_year_handles_dates_and_gaps() {
        let mut movie = bare(1);
        assert_eq!(movie.release_year(), "---");

        movie.release_date = Some("1999-03-31".to_string());
        assert_eq!(movie.release_year(), "1999");

        movie.release_date = Some(String::new());
        assert_eq!(movie.release_year(), "---");

        movie.release_date = Some("2031".to_string());
        assert_eq!(movie.release_year(), "2031");

        movie.release_date = Some("soon".to_string());
        assert_eq!(movie.release_year(), "---");
    }

    #[test]
    fn detail_href_is_relative() {
        assert_eq!(bare(603).detail_href(), "./603");
    }

    #[test]
    fn decodes_nulls_and_missing_fields() {
        let movie: Movie = serde_json::from_str(
            r#"{"id": 7, "title": null, "poster_path": null, "adult": false}"#,
        )
        .unwrap();
        assert_eq!(movie, bare(7));
    }
}
