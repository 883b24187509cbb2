//! Cinesearch: a Zellij plugin for searching a movie database.
//!
//! The plugin is a single search page: a search form, a shareable address
//! whose `query` parameter drives fetching, and a result list rendered from a
//! four-state request lifecycle (idle, pending, resolved, rejected).
//!
//! - Submitting the form writes the trimmed query into the address
//! - Every address write issues exactly one search request
//! - Only the latest request's completion is applied
//! - Results render as cards with title, year and poster fallbacks

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Zellij Plugin Shim (main.rs)                       │  ← Entry point
//! │  - keys, pipe messages, web request results         │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← State machine
//! │  - Search form, address watcher                     │
//! │  - Event handling, action dispatching               │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                                     │
//! ┌───────────────┐                     ┌───────────────┐
//! │ UI Layer      │                     │ API Layer     │
//! │ (ui/)         │                     │ (api/)        │
//! │ - Rendering   │                     │ - URL builder │
//! │ - Theming     │                     │ - Decoding    │
//! └───────────────┘                     └───────────────┘
//!         │                                     │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain, Infrastructure & Observability             │
//! │  - Movie record and fallbacks (domain/)             │
//! │  - Sandbox paths (infrastructure/)                  │
//! │  - OTLP file tracing (observability/)               │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Plugin Lifecycle
//!
//! 1. **Load**: parse configuration, start tracing, build state, request
//!    permissions
//! 2. **Mount**: the address watcher runs once; a `query` given in the
//!    configuration starts the first search once web access is granted
//! 3. **Update**: keys, pipe messages and request results become events
//! 4. **Render**: the view model is computed and drawn as ANSI text
//!
//! # Configuration
//!
//! ```kdl
//! plugin location="file:/path/to/cinesearch.wasm" {
//!     api_key "your-tmdb-v3-key"
//!     language "en-US"
//!     query "the matrix"
//!     detail_url "https://www.themoviedb.org/movie/"
//!     theme "catppuccin-mocha"
//!     trace_level "debug"
//! }
//! ```

pub mod api;
pub mod app;
pub mod domain;
pub mod infrastructure;
pub mod observability;
pub mod ui;

pub use app::{handle_event, mount, Action, AppState, Event, SearchFocus, SearchOutcome, SearchStatus};
pub use domain::{CinesearchError, ImageHost, Movie, Result};
pub use ui::Theme;

use std::collections::BTreeMap;

use api::SearchEndpoint;
use domain::movie::{DEFAULT_IMAGE_BASE_URL, DEFAULT_POSTER_URL};

/// Command used to open detail links when none is configured.
pub const DEFAULT_OPEN_COMMAND: &str = "xdg-open";

/// Plugin configuration parsed from Zellij's configuration map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// TMDB v3 API key, sent as the `api_key` query parameter.
    ///
    /// Without it every search is rejected by the service.
    pub api_key: Option<String>,

    /// API root. Default: `https://api.themoviedb.org/3`
    pub api_base_url: String,

    /// Prefix joined with a record's `poster_path`.
    pub image_base_url: String,

    /// Poster shown for records without a `poster_path`.
    pub fallback_poster_url: String,

    /// Result language. Default: `"en-US"`
    pub language: String,

    /// Whether adult titles are included. Default: `false`
    pub include_adult: bool,

    /// Address query present when the plugin loads.
    pub initial_query: Option<String>,

    /// Base URL card links (`./{id}`) are resolved against.
    ///
    /// When unset, opening a card only logs its link.
    pub detail_url: Option<String>,

    /// Host command that opens a resolved detail link.
    pub open_command: String,

    /// Built-in theme name. Ignored if `theme_file` is set.
    pub theme_name: Option<String>,

    /// Path to a custom TOML theme file. See [`ui::theme`] for the format.
    pub theme_file: Option<String>,

    /// `EnvFilter` directive for traces. Default: `"info"`
    pub trace_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        let endpoint = SearchEndpoint::default();
        Self {
            api_key: None,
            api_base_url: endpoint.base_url,
            image_base_url: DEFAULT_IMAGE_BASE_URL.to_string(),
            fallback_poster_url: DEFAULT_POSTER_URL.to_string(),
            language: endpoint.language,
            include_adult: endpoint.include_adult,
            initial_query: None,
            detail_url: None,
            open_command: DEFAULT_OPEN_COMMAND.to_string(),
            theme_name: None,
            theme_file: None,
            trace_level: None,
        }
    }
}

impl Config {
    /// Parses the configuration map, falling back to defaults for missing,
    /// blank or unparsable values.
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use cinesearch::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("api_key".to_string(), "abc".to_string());
    /// map.insert("include_adult".to_string(), "true".to_string());
    /// map.insert("query".to_string(), "alien".to_string());
    ///
    /// let config = Config::from_zellij(&map);
    /// assert_eq!(config.api_key.as_deref(), Some("abc"));
    /// assert!(config.include_adult);
    /// assert_eq!(config.initial_query.as_deref(), Some("alien"));
    /// ```
    #[must_use]
    pub fn from_zellij(config: &BTreeMap<String, String>) -> Self {
        let defaults = Self::default();
        let text = |key: &str| {
            config
                .get(key)
                .map(|value| value.trim())
                .filter(|value| !value.is_empty())
                .map(String::from)
        };

        let include_adult = config
            .get("include_adult")
            .and_then(|s| s.trim().parse::<bool>().ok())
            .unwrap_or(defaults.include_adult);

        Self {
            api_key: text("api_key"),
            api_base_url: text("api_base_url").unwrap_or(defaults.api_base_url),
            image_base_url: text("image_base_url").unwrap_or(defaults.image_base_url),
            fallback_poster_url: text("fallback_poster_url").unwrap_or(defaults.fallback_poster_url),
            language: text("language").unwrap_or(defaults.language),
            include_adult,
            initial_query: config.get("query").map(|q| q.trim().to_lowercase()),
            detail_url: text("detail_url"),
            open_command: text("open_command").unwrap_or(defaults.open_command),
            theme_name: text("theme"),
            theme_file: text("theme_file"),
            trace_level: text("trace_level"),
        }
    }

    /// Search endpoint settings.
    #[must_use]
    pub fn endpoint(&self) -> SearchEndpoint {
        SearchEndpoint {
            base_url: self.api_base_url.clone(),
            api_key: self.api_key.clone(),
            language: self.language.clone(),
            include_adult: self.include_adult,
        }
    }

    /// Poster image settings.
    #[must_use]
    pub fn image_host(&self) -> ImageHost {
        ImageHost {
            base_url: self.image_base_url.clone(),
            fallback_url: self.fallback_poster_url.clone(),
        }
    }

    /// Resolves a card link such as `./603` against `detail_url`.
    ///
    /// # Errors
    ///
    /// Returns [`CinesearchError::Config`] when `detail_url` is unset or not a
    /// valid base URL.
    ///
    /// ```rust
    /// use cinesearch::Config;
    ///
    /// let config = Config {
    ///     detail_url: Some("https://www.themoviedb.org/movie".to_string()),
    ///     ..Default::default()
    /// };
    /// assert_eq!(config.detail_link("./603")?, "https://www.themoviedb.org/movie/603");
    /// # Ok::<(), cinesearch::CinesearchError>(())
    /// ```
    pub fn detail_link(&self, href: &str) -> Result<String> {
        let base = self
            .detail_url
            .as_deref()
            .ok_or_else(|| CinesearchError::Config("detail_url is not set".to_string()))?;

        let base = if base.ends_with('/') {
            base.to_string()
        } else {
            format!("{base}/")
        };

        url::Url::parse(&base)
            .and_then(|base| base.join(href))
            .map(String::from)
            .map_err(|e| CinesearchError::Config(format!("invalid detail_url {base:?}: {e}")))
    }
}

/// Builds the page state from the configuration.
///
/// Loads the theme (file, then name, then default) and seeds the address with
/// `initial_query`. Nothing is fetched until [`mount`] runs the address
/// watcher.
#[must_use]
pub fn initialize(config: &Config) -> AppState {
    tracing::debug!("initializing cinesearch plugin");

    if config.api_key.is_none() {
        tracing::warn!("no api_key configured, searches will be rejected by the service");
    }

    let mut state = AppState::new(load_theme(config), config.image_host());
    if let Some(query) = &config.initial_query {
        state.location.set_query(query.clone());
    }
    state
}

fn load_theme(config: &Config) -> Theme {
    if let Some(theme_file) = &config.theme_file {
        let path = infrastructure::expand_tilde(theme_file);
        match Theme::from_file(&path) {
            Ok(theme) => return theme,
            Err(e) => tracing::warn!(theme_file = %path, error = %e, "failed to load theme from file, using default"),
        }
    }

    config.theme_name.as_ref().map_or_else(Theme::default, |theme_name| {
        Theme::from_name(theme_name).unwrap_or_else(|| {
            tracing::warn!(theme_name = %theme_name, "unknown theme, using default");
            Theme::default()
        })
    })
}
