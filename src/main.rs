//! Zellij plugin entry point.
//!
//! A thin shim between the Zellij runtime and the library: host events
//! become [`cinesearch::Event`]s, and the [`Action`]s the handler returns are
//! executed with Zellij API calls. All page logic lives in the library.
//!
//! # Permissions
//!
//! - `WebAccess`: the search request
//! - `ChangeApplicationState`: pane title and hiding the pane
//! - `RunCommands`: opening detail links
//!
//! Actions produced before the permissions are granted (for example the
//! first search for a `query` given in the configuration) are queued and run
//! on grant.
//!
//! # Pipe
//!
//! ```text
//! zellij pipe --name cinesearch -- "query=the matrix"
//! ```

#![allow(clippy::multiple_crate_versions)]

use std::collections::BTreeMap;
use zellij_tile::prelude::*;

use cinesearch::api::SearchEndpoint;
use cinesearch::app::form::FormKey;
use cinesearch::app::handler::search_completed;
use cinesearch::app::location::query_from_payload;
use cinesearch::{handle_event, mount, Action, Config, Event, SearchFocus, SearchOutcome};

register_plugin!(State);

/// Pipe name the plugin listens on.
const PIPE_NAME: &str = "cinesearch";

/// Plugin state held by the Zellij runtime.
struct State {
    app: cinesearch::AppState,
    config: Config,
    endpoint: SearchEndpoint,
    permissions: Permissions,
    queued: Vec<Action>,
}

/// Outcome of the permission request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Permissions {
    Pending,
    Granted,
    Denied,
}

impl Default for State {
    fn default() -> Self {
        let config = Config::default();
        Self {
            app: cinesearch::initialize(&config),
            endpoint: config.endpoint(),
            config,
            permissions: Permissions::Pending,
            queued: Vec::new(),
        }
    }
}

impl ZellijPlugin for State {
    fn load(&mut self, configuration: BTreeMap<String, String>) {
        let config = Config::from_zellij(&configuration);
        cinesearch::observability::init_tracing(&config);

        let _guard = tracing::debug_span!("plugin_load").entered();

        tracing::debug!(
            api_base_url = %config.api_base_url,
            language = %config.language,
            initial_query = ?config.initial_query,
            "parsed configuration"
        );
        self.app = cinesearch::initialize(&config);
        self.endpoint = config.endpoint();
        self.config = config;

        request_permission(&[
            PermissionType::WebAccess,
            PermissionType::ChangeApplicationState,
            PermissionType::RunCommands,
        ]);
        subscribe(&[
            EventType::Key,
            EventType::WebRequestResult,
            EventType::PermissionRequestResult,
        ]);

        let actions = mount(&mut self.app);
        self.dispatch(actions);

        tracing::debug!("plugin load complete - waiting for permissions");
    }

    fn update(&mut self, event: zellij_tile::prelude::Event) -> bool {
        let event_name = Self::get_event_name(&event);
        let span = tracing::debug_span!("plugin_update_event", otel.name = %format!("plugin_update::{event_name}"));
        let _guard = span.entered();

        let our_event = match event {
            zellij_tile::prelude::Event::Key(ref key) => match self.map_key_event(key) {
                Some(event) => event,
                None => return false,
            },
            zellij_tile::prelude::Event::WebRequestResult(status, _headers, body, context) => {
                match search_completed(status, &body, &context) {
                    Some(event) => event,
                    None => return false,
                }
            }
            zellij_tile::prelude::Event::PermissionRequestResult(permissions) => {
                return self.handle_permission_result(permissions);
            }
            _ => return false,
        };

        self.apply(&our_event)
    }

    fn pipe(&mut self, pipe_message: PipeMessage) -> bool {
        if pipe_message.name != PIPE_NAME {
            return false;
        }

        let _guard = tracing::debug_span!("plugin_pipe", source = ?pipe_message.source).entered();

        let query = pipe_message
            .payload
            .as_deref()
            .map(query_from_payload)
            .unwrap_or_else(|| pipe_message.args.get("query").and_then(|q| query_from_payload(q)));

        self.apply(&Event::Navigate { query })
    }

    fn render(&mut self, rows: usize, cols: usize) {
        cinesearch::ui::render(&self.app, rows, cols);
    }
}

impl State {
    /// Runs an event through the handler and executes its actions.
    fn apply(&mut self, event: &Event) -> bool {
        match handle_event(&mut self.app, event) {
            Ok((should_render, actions)) => {
                tracing::debug!(
                    action_count = actions.len(),
                    should_render = should_render,
                    status = %self.app.status,
                    "event handled successfully"
                );
                self.dispatch(actions) || should_render
            }
            Err(e) => {
                tracing::error!(error = %e, "error handling event");
                false
            }
        }
    }

    /// Executes actions now, or queues them until permissions are granted.
    ///
    /// Returns whether a follow-up event changed the page.
    fn dispatch(&mut self, actions: Vec<Action>) -> bool {
        let mut changed = false;
        for action in actions {
            let follow_up = match self.permissions {
                Permissions::Pending => {
                    tracing::debug!(action = ?action, "queueing action until permissions are granted");
                    self.queued.push(action);
                    None
                }
                Permissions::Granted => self.execute_action(&action),
                Permissions::Denied => Self::reject_without_permission(&action),
            };
            if let Some(event) = follow_up {
                changed |= self.apply(&event);
            }
        }
        changed
    }

    /// Searches cannot run without web access; everything else is dropped.
    fn reject_without_permission(action: &Action) -> Option<Event> {
        match action {
            Action::FetchMovies { sequence, .. } => Some(Event::SearchCompleted {
                sequence: *sequence,
                outcome: SearchOutcome::Rejected("web access denied".to_string()),
            }),
            _ => {
                tracing::debug!(action = ?action, "dropping action, permissions denied");
                None
            }
        }
    }

    fn get_event_name(event: &zellij_tile::prelude::Event) -> String {
        match event {
            zellij_tile::prelude::Event::Key(key) => format!("Key({:?})", key.bare_key),
            zellij_tile::prelude::Event::WebRequestResult(status, ..) => format!("WebRequestResult({status})"),
            zellij_tile::prelude::Event::PermissionRequestResult(..) => "PermissionRequestResult".to_string(),
            _ => "Other".to_string(),
        }
    }

    fn map_key_event(&self, key: &KeyWithModifier) -> Option<Event> {
        tracing::trace!(bare_key = ?key.bare_key, "key event");

        if key.has_modifiers(&[KeyModifier::Ctrl]) {
            return match key.bare_key {
                BareKey::Char('n') => Some(Event::KeyDown),
                BareKey::Char('p') => Some(Event::KeyUp),
                _ => None,
            };
        }

        let typing = self.app.focus == SearchFocus::Typing;

        Some(match key.bare_key {
            BareKey::Enter => Event::Input(FormKey::Submit),
            BareKey::Tab => match self.app.focus {
                SearchFocus::Typing => Event::FocusResults,
                SearchFocus::Navigating => Event::FocusSearchBar,
            },
            BareKey::Esc => match self.app.focus {
                SearchFocus::Typing => Event::CloseFocus,
                SearchFocus::Navigating => Event::FocusSearchBar,
            },
            BareKey::Down => Event::KeyDown,
            BareKey::Up => Event::KeyUp,
            BareKey::Char('j') if !typing => Event::KeyDown,
            BareKey::Char('k') if !typing => Event::KeyUp,
            BareKey::Char('q') if !typing => Event::CloseFocus,
            BareKey::Char('/') if !typing => Event::FocusSearchBar,
            BareKey::Backspace => Event::Input(FormKey::Backspace),
            BareKey::Char(c) => Event::Input(FormKey::Char(c)),
            _ => return None,
        })
    }

    fn handle_permission_result(&mut self, permissions: PermissionStatus) -> bool {
        self.permissions = match permissions {
            PermissionStatus::Granted => Permissions::Granted,
            PermissionStatus::Denied => {
                tracing::warn!("permissions denied - searches cannot be performed");
                Permissions::Denied
            }
        };

        let queued = std::mem::take(&mut self.queued);
        tracing::debug!(queued = queued.len(), permissions = ?self.permissions, "flushing queued actions");
        self.dispatch(queued);
        true
    }

    /// Executes one action. Returns an event when the action fails in a way
    /// the page has to reflect.
    #[tracing::instrument(level = "debug", skip(self))]
    fn execute_action(&self, action: &Action) -> Option<Event> {
        match action {
            Action::CloseFocus => {
                hide_self();
                None
            }
            Action::FetchMovies { query, sequence } => match self.endpoint.search_movies(query, *sequence) {
                Ok(request) => {
                    tracing::debug!(url = %request.url, "issuing search request");
                    web_request(request.url, HttpVerb::Get, request.headers, vec![], request.context);
                    None
                }
                Err(e) => {
                    tracing::error!(error = %e, "failed to build search request");
                    Some(Event::SearchCompleted {
                        sequence: *sequence,
                        outcome: SearchOutcome::Rejected(e.to_string()),
                    })
                }
            },
            Action::ReflectAddress { href } => {
                rename_plugin_pane(get_plugin_ids().plugin_id, href);
                None
            }
            Action::OpenDetail { href } => {
                match self.config.detail_link(href) {
                    Ok(link) => {
                        tracing::debug!(link = %link, command = %self.config.open_command, "opening detail page");
                        run_command(&[self.config.open_command.as_str(), link.as_str()], BTreeMap::new());
                    }
                    Err(e) => tracing::info!(href = %href, reason = %e, "detail link not opened"),
                }
                None
            }
        }
    }
}
