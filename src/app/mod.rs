//! Application layer: the search page's state, events and actions.
//!
//! Sits between the plugin runtime (`main.rs`) and the domain/api layers.
//!
//! ```text
//! Keys / pipe / responses → Events → handle_event → AppState → Actions → Zellij API
//!                                          ↑                              ↓
//!                                          └──── SearchCompleted ─────────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`form`]: Stateless search form with submit and change callbacks
//! - [`handler`]: Event processing and effect sequencing
//! - [`location`]: Shareable address and its change listener
//! - [`modes`]: Request status and key focus
//! - [`state`]: Search page state container and view model computation

pub mod actions;
pub mod form;
pub mod handler;
pub mod location;
pub mod modes;
pub mod state;

pub use actions::Action;
pub use handler::{handle_event, mount, Event, SearchOutcome};
pub use location::Location;
pub use modes::{SearchFocus, SearchStatus};
pub use state::AppState;
