//! Main application coordinator.
//!
//! `AppState` wires the document store, the confirmation gate and the print
//! session to one shared key-value store and drives them from user actions.
//! It holds no widgets; the host is passed in per call.

use std::path::PathBuf;
use std::rc::Rc;

use tracing::{debug, info, warn};

use super::controllers::confirmation::{ConfirmationPrompt, ExportDecision, UserConfirmationGate};
use super::controllers::preview::PreviewController;
use super::controllers::print_session::{ExportOutcome, PrintPhase, PrintSession};
use super::domain::margin::PageMargin;
use super::domain::settings::AppSettings;
use super::domain::theme::ThemeMode;
use super::infrastructure::error::Result;
use super::infrastructure::host::{PrintHost, ThemeHost};
use super::infrastructure::storage::{KeyValueStore, SharedStore};
use super::services::document_store::DocumentStore;
use super::services::renderer::{MarkdownRenderer, RenderedTree};
use super::services::snapshot::RenderSnapshotBuilder;

/// Where an export request ended up.
#[derive(Debug, PartialEq, Eq)]
pub enum ExportFlow {
    /// The print session ran (or found nothing to print).
    Exported(ExportOutcome),
    /// The user has to answer this prompt first.
    AwaitingConfirmation(ConfirmationPrompt),
}

pub struct AppState<S: KeyValueStore> {
    settings: AppSettings,
    settings_path: Option<PathBuf>,
    documents: DocumentStore<SharedStore<S>>,
    confirmation: UserConfirmationGate<SharedStore<S>>,
    panels: PreviewController,
    renderer: Rc<MarkdownRenderer>,
    snapshots: RenderSnapshotBuilder,
    session: PrintSession,
}

impl<S: KeyValueStore> AppState<S> {
    /// Build the coordinator. The document is loaded from `store` right away.
    pub fn new(settings: AppSettings, store: SharedStore<S>) -> Self {
        let renderer = Rc::new(MarkdownRenderer::new());
        let panels = PreviewController::new(settings.show_editor, settings.show_preview);
        Self {
            documents: DocumentStore::open(Rc::clone(&store)),
            confirmation: UserConfirmationGate::new(store),
            panels,
            snapshots: RenderSnapshotBuilder::new(Rc::clone(&renderer)),
            renderer,
            session: PrintSession::new(),
            settings,
            settings_path: None,
        }
    }

    /// Write settings changes to `path` from now on.
    pub fn with_settings_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.settings_path = Some(path.into());
        self
    }

    pub fn settings(&self) -> &AppSettings {
        &self.settings
    }

    pub fn panels(&self) -> &PreviewController {
        &self.panels
    }

    pub fn print_phase(&self) -> PrintPhase {
        self.session.phase()
    }

    pub fn text(&self) -> &str {
        self.documents.text()
    }

    /// The editor changed; take its text as the new document.
    pub fn edit(&mut self, text: impl Into<String>) {
        self.documents.set(text);
    }

    /// Insert a page break over the selection and return the caret to set.
    pub fn insert_page_break(&mut self, caret_start: usize, caret_end: usize) -> usize {
        let caret = self.documents.insert_page_break(caret_start, caret_end);
        debug!(caret, "page break inserted");
        caret
    }

    /// Reset the document to the built-in template.
    pub fn clear(&mut self) -> &str {
        self.documents.reset()
    }

    /// Advance the host theme Light -> Dark -> SystemDefault and remember it.
    pub fn cycle_theme<H: ThemeHost + ?Sized>(&mut self, host: &mut H) -> ThemeMode {
        let next = host.theme_mode().next();
        host.set_theme_mode(next);
        self.settings.theme_mode = next;
        self.save_settings();
        next
    }

    pub fn set_page_margin(&mut self, spec: &str) -> Result<()> {
        self.settings.page_margin = PageMargin::parse(spec)?;
        self.save_settings();
        Ok(())
    }

    /// Returns whether the editor is now visible.
    pub fn toggle_editor(&mut self) -> bool {
        let visible = self.panels.toggle_editor();
        self.sync_panels();
        visible
    }

    /// Returns whether the preview is now visible.
    pub fn toggle_preview(&mut self) -> bool {
        let visible = self.panels.toggle_preview();
        self.sync_panels();
        visible
    }

    /// Render the preview panel in the host's current colour mode.
    pub fn live_preview<H: ThemeHost + ?Sized>(&self, host: &H) -> Option<RenderedTree> {
        self.panels
            .render_live(&*self.renderer, self.documents.text(), host.resolved_color_mode())
    }

    /// Start an export. Runs the print session straight away unless the user
    /// still has to confirm.
    pub fn request_export<H: PrintHost + ?Sized>(&mut self, host: &mut H) -> Result<ExportFlow> {
        match self.confirmation.request_export() {
            ExportDecision::Proceed => self.export(host).map(ExportFlow::Exported),
            ExportDecision::Prompt(prompt) => Ok(ExportFlow::AwaitingConfirmation(prompt)),
        }
    }

    /// The user accepted the prompt.
    pub fn confirm_export<H: PrintHost + ?Sized>(
        &mut self,
        prompt: ConfirmationPrompt,
        host: &mut H,
    ) -> Result<ExportOutcome> {
        self.confirmation.confirm(prompt);
        self.export(host)
    }

    /// The user dismissed the prompt. Nothing changes.
    pub fn cancel_export(&mut self, prompt: ConfirmationPrompt) {
        self.confirmation.cancel(prompt);
    }

    /// Show the confirmation prompt again on the next export.
    pub fn reset_print_confirmation(&mut self) {
        self.confirmation.reset();
        info!("print confirmation re-enabled");
    }

    pub fn confirmation_required(&self) -> bool {
        self.confirmation.should_confirm()
    }

    fn export<H: PrintHost + ?Sized>(&mut self, host: &mut H) -> Result<ExportOutcome> {
        if !self.panels.preview_visible() {
            debug!("preview panel hidden, nothing to export");
            return Ok(ExportOutcome::NoTarget);
        }
        self.session.export(
            host,
            &self.snapshots,
            self.documents.text(),
            &self.settings.page_margin,
        )
    }

    fn sync_panels(&mut self) {
        self.settings.show_editor = self.panels.editor_visible();
        self.settings.show_preview = self.panels.preview_visible();
        self.save_settings();
    }

    fn save_settings(&self) {
        let Some(path) = &self.settings_path else {
            return;
        };
        if let Err(e) = self.settings.save_to(path) {
            warn!(error = %e, "failed to save settings");
        }
    }
}
