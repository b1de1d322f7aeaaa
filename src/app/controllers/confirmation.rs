//! Decides whether an export needs the "are you sure" prompt, and remembers
//! "don't ask again".

use tracing::{debug, warn};

use crate::app::infrastructure::storage::KeyValueStore;

/// Persistence key for the skip-confirmation preference.
pub const SKIP_CONFIRMATION_KEY: &str = "presspad.print.skip-confirmation";

/// An open confirmation prompt. Consumed by `confirm` or `cancel`.
#[derive(Debug, Default, PartialEq, Eq)]
#[must_use = "a prompt must be confirmed or cancelled"]
pub struct ConfirmationPrompt {
    dont_ask_again: bool,
}

impl ConfirmationPrompt {
    pub fn dont_ask_again(&self) -> bool {
        self.dont_ask_again
    }

    pub fn set_dont_ask_again(&mut self, checked: bool) {
        self.dont_ask_again = checked;
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum ExportDecision {
    /// Go straight to the print session.
    Proceed,
    /// Show this prompt and wait for the user.
    Prompt(ConfirmationPrompt),
}

/// Sole owner of the skip-confirmation preference.
pub struct UserConfirmationGate<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> UserConfirmationGate<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn should_confirm(&self) -> bool {
        !self.skip_confirmation()
    }

    fn skip_confirmation(&self) -> bool {
        self.store.get(SKIP_CONFIRMATION_KEY).as_deref() == Some("true")
    }

    pub fn request_export(&self) -> ExportDecision {
        if self.should_confirm() {
            debug!("asking for print confirmation");
            ExportDecision::Prompt(ConfirmationPrompt::default())
        } else {
            ExportDecision::Proceed
        }
    }

    /// Accept the prompt. Persists the preference if the box was ticked.
    pub fn confirm(&mut self, prompt: ConfirmationPrompt) -> ExportDecision {
        if prompt.dont_ask_again {
            self.write_skip(true);
        }
        ExportDecision::Proceed
    }

    /// Dismiss the prompt. Nothing is written.
    pub fn cancel(&mut self, prompt: ConfirmationPrompt) {
        debug!(dont_ask_again = prompt.dont_ask_again, "print confirmation cancelled");
    }

    /// Turn the prompt back on after "don't ask again".
    pub fn reset(&mut self) {
        self.write_skip(false);
    }

    pub fn into_store(self) -> S {
        self.store
    }

    fn write_skip(&mut self, skip: bool) {
        let value = if skip { "true" } else { "false" };
        if let Err(e) = self.store.set(SKIP_CONFIRMATION_KEY, value) {
            warn!(error = %e, "failed to persist print confirmation preference");
        }
    }
}
