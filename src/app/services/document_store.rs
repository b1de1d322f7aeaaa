//! Canonical markup text and its persisted copy.

use tracing::{debug, warn};

use super::text_ops;
use crate::app::domain::document::{DEFAULT_MARKDOWN, Document};
use crate::app::infrastructure::storage::KeyValueStore;

/// Persistence key for the document text.
pub const DOCUMENT_KEY: &str = "presspad.document";

/// Sole owner and writer of the [`Document`].
///
/// Every mutation is written through to the store immediately. A failing
/// store is logged and otherwise ignored; the in-memory text stays usable.
pub struct DocumentStore<S: KeyValueStore> {
    store: S,
    document: Document,
}

impl<S: KeyValueStore> DocumentStore<S> {
    /// Start a session from whatever the store holds.
    pub fn open(store: S) -> Self {
        let document = Document::new(Self::load_from(&store));
        Self { store, document }
    }

    /// Persisted text if present, otherwise the built-in default.
    pub fn load(&self) -> String {
        Self::load_from(&self.store)
    }

    fn load_from(store: &S) -> String {
        match store.get(DOCUMENT_KEY) {
            Some(text) => text,
            None => {
                debug!("no persisted document, using built-in default");
                DEFAULT_MARKDOWN.to_string()
            }
        }
    }

    pub fn text(&self) -> &str {
        &self.document.markup_text
    }

    /// Replace the text. Anything is accepted, including the empty string.
    pub fn set(&mut self, text: impl Into<String>) {
        self.document.markup_text = text.into();
        self.persist();
    }

    /// Back to the built-in default ("Clear"). Only the document key is written.
    pub fn reset(&mut self) -> &str {
        self.set(DEFAULT_MARKDOWN);
        self.text()
    }

    /// See [`text_ops::insert_directive`].
    pub fn insert_directive(text: &str, caret_start: usize, caret_end: usize) -> (String, usize) {
        text_ops::insert_directive(text, caret_start, caret_end)
    }

    /// Insert a page break into the held text, persist, and return the new caret.
    pub fn insert_page_break(&mut self, caret_start: usize, caret_end: usize) -> usize {
        let (text, caret) = Self::insert_directive(self.text(), caret_start, caret_end);
        self.set(text);
        caret
    }

    pub fn into_store(self) -> S {
        self.store
    }

    fn persist(&mut self) {
        if let Err(e) = self.store.set(DOCUMENT_KEY, &self.document.markup_text) {
            warn!(error = %e, "failed to persist document, keeping in-memory copy");
        }
    }
}
