//! Stateless search form.
//!
//! The form is bound to a query value owned by its caller and reports input
//! through two callbacks: a required submit callback and an optional change
//! callback. It never stores the query and never writes the page address.
//!
//! Submission works like an HTML `GET` form whose input is named `query`:
//! unless the submit callback calls [`SubmitEvent::prevent_default`], the
//! default action is to navigate to the raw input value. The search page
//! always prevents it and applies its own validation instead.
//!
//! ```
//! use cinesearch::app::form::{FormKey, SearchForm};
//!
//! let mut changes = Vec::new();
//! let mut on_submit = |event: &mut cinesearch::app::form::SubmitEvent| event.prevent_default();
//! let mut on_change = |raw: String| changes.push(raw);
//!
//! SearchForm::new("matri", &mut on_submit)
//!     .on_change(&mut on_change)
//!     .handle_key(FormKey::Char('X'));
//! assert_eq!(changes, vec!["matriX".to_string()]);
//! ```

use url::form_urlencoded;

/// Name of the form's single input, which is also the address parameter a
/// default submission navigates to.
pub const INPUT_NAME: &str = "query";

/// Placeholder shown while the input is empty.
pub const PLACEHOLDER: &str = "movie search";

/// Key input the form understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormKey {
    Char(char),
    Backspace,
    Submit,
}

/// The submission event passed to the submit callback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitEvent {
    value: String,
    default_prevented: bool,
}

impl SubmitEvent {
    /// Raw input value at the moment of submission.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Suppresses the default navigation.
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    #[must_use]
    pub const fn default_prevented(&self) -> bool {
        self.default_prevented
    }

    /// The search string a default submission would navigate to
    /// (`query=<raw value>`), if not prevented.
    #[must_use]
    pub fn default_action(&self) -> Option<String> {
        (!self.default_prevented).then(|| {
            form_urlencoded::Serializer::new(String::new())
                .append_pair(INPUT_NAME, &self.value)
                .finish()
        })
    }
}

/// A search form bound to `query`.
pub struct SearchForm<'a> {
    query: &'a str,
    on_submit: &'a mut dyn FnMut(&mut SubmitEvent),
    on_change: Option<&'a mut dyn FnMut(String)>,
}

impl<'a> SearchForm<'a> {
    /// Binds a form to the caller's query and submit callback.
    pub fn new(query: &'a str, on_submit: &'a mut dyn FnMut(&mut SubmitEvent)) -> Self {
        Self {
            query,
            on_submit,
            on_change: None,
        }
    }

    /// Registers the change callback, invoked with the raw input value after
    /// every edit.
    #[must_use]
    pub fn on_change(mut self, on_change: &'a mut dyn FnMut(String)) -> Self {
        self.on_change = Some(on_change);
        self
    }

    /// The bound value.
    #[must_use]
    pub const fn value(&self) -> &str {
        self.query
    }

    /// Applies one key to the form.
    ///
    /// Edits produce a change callback with the new raw value; `Submit`
    /// invokes the submit callback and returns the event so the caller can
    /// inspect whether the default action still applies.
    pub fn handle_key(self, key: FormKey) -> Option<SubmitEvent> {
        match key {
            FormKey::Char(c) => {
                let mut raw = String::with_capacity(self.query.len() + c.len_utf8());
                raw.push_str(self.query);
                raw.push(c);
                self.emit_change(raw);
                None
            }
            FormKey::Backspace => {
                let mut raw = self.query.to_string();
                if raw.pop().is_some() {
                    self.emit_change(raw);
                }
                None
            }
            FormKey::Submit => {
                let mut event = SubmitEvent {
                    value: self.query.to_string(),
                    default_prevented: false,
                };
                (self.on_submit)(&mut event);
                Some(event)
            }
        }
    }

    fn emit_change(self, raw: String) {
        if let Some(on_change) = self.on_change {
            on_change(raw);
        }
    }
}
