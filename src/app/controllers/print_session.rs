//! The export transaction: freeze visual state, swap in a print snapshot,
//! run the host print dialog, then put everything back.
//!
//! Restoration is owned by [`RestoreGuard`], so it runs whether the host
//! print call returns normally, reports an error, or unwinds.

use tracing::{debug, info, warn};

use crate::app::domain::margin::PageMargin;
use crate::app::domain::theme::{ColorMode, ThemeMode};
use crate::app::domain::visual_state::VisualState;
use crate::app::infrastructure::error::{AppError, Result};
use crate::app::infrastructure::host::{DisplayContent, PrintHost};
use crate::app::services::renderer::RenderBackend;
use crate::app::services::snapshot::RenderSnapshotBuilder;

/// Title shown while printing. Non-empty so the host does not fall back to
/// the application name in the page header.
pub const TITLE_PLACEHOLDER: &str = " ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrintPhase {
    Idle,
    Capturing,
    Substituting,
    Printing,
    Restoring,
}

/// How an export request ended. Accepted and cancelled dialogs both report
/// `Printed`; the host cannot tell them apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportOutcome {
    Printed {
        /// The colour mode the user was looking at before the export.
        original_color_mode: ColorMode,
    },
    /// Nothing to export (preview panel hidden). No state was touched.
    NoTarget,
}

#[derive(Debug)]
struct PhaseTracker {
    phase: PrintPhase,
    trace: Vec<PrintPhase>,
}

impl PhaseTracker {
    fn enter(&mut self, phase: PrintPhase) {
        debug!(from = ?self.phase, to = ?phase, "print phase");
        self.phase = phase;
        self.trace.push(phase);
    }
}

/// Everything captured in the `Capturing` phase.
struct CapturedState {
    visual: VisualState,
    content: DisplayContent,
}

/// Owns the host for the duration of a transaction and restores it on drop.
struct RestoreGuard<'a, H: PrintHost + ?Sized> {
    host: &'a mut H,
    tracker: &'a mut PhaseTracker,
    captured: Option<CapturedState>,
}

impl<H: PrintHost + ?Sized> Drop for RestoreGuard<'_, H> {
    fn drop(&mut self) {
        if let Some(captured) = self.captured.take() {
            self.tracker.enter(PrintPhase::Restoring);
            self.host.set_title(&captured.visual.title);
            self.host.restore_content(captured.content);
            self.host.set_theme_mode(captured.visual.theme_mode);
        }
        self.tracker.enter(PrintPhase::Idle);
    }
}

/// Runs one export at a time. Requests while a transaction is in flight are
/// rejected with [`AppError::SessionBusy`].
#[derive(Debug)]
pub struct PrintSession {
    tracker: PhaseTracker,
}

impl Default for PrintSession {
    fn default() -> Self {
        Self::new()
    }
}

impl PrintSession {
    pub fn new() -> Self {
        Self {
            tracker: PhaseTracker {
                phase: PrintPhase::Idle,
                trace: Vec::new(),
            },
        }
    }

    pub fn phase(&self) -> PrintPhase {
        self.tracker.phase
    }

    /// Phases visited by the most recent transaction, in order.
    pub fn last_trace(&self) -> &[PrintPhase] {
        &self.tracker.trace
    }

    /// Run a full export of `markup` against `host`.
    ///
    /// Once capturing has begun the transaction always runs to `Idle` and the
    /// host's title, content and theme mode are restored to what they were.
    pub fn export<H, R>(
        &mut self,
        host: &mut H,
        builder: &RenderSnapshotBuilder<R>,
        markup: &str,
        margin: &PageMargin,
    ) -> Result<ExportOutcome>
    where
        H: PrintHost + ?Sized,
        R: RenderBackend,
    {
        if self.tracker.phase != PrintPhase::Idle {
            return Err(AppError::SessionBusy(self.tracker.phase));
        }
        if !host.has_render_target() {
            debug!("export requested with no render target, ignoring");
            return Ok(ExportOutcome::NoTarget);
        }

        self.tracker.trace.clear();
        self.tracker.enter(PrintPhase::Capturing);
        let original_color_mode = host.resolved_color_mode();
        let captured = CapturedState {
            visual: VisualState::capture(&*host),
            content: host.capture_content(),
        };

        let guard = RestoreGuard {
            host,
            tracker: &mut self.tracker,
            captured: Some(captured),
        };
        run_transaction(guard, builder, markup, margin);

        info!(%original_color_mode, margin = %margin, "export finished");
        Ok(ExportOutcome::Printed {
            original_color_mode,
        })
    }
}

/// Substituting and Printing. Restoring happens when `guard` drops.
fn run_transaction<H, R>(
    guard: RestoreGuard<'_, H>,
    builder: &RenderSnapshotBuilder<R>,
    markup: &str,
    margin: &PageMargin,
) where
    H: PrintHost + ?Sized,
    R: RenderBackend,
{
    guard.tracker.enter(PrintPhase::Substituting);
    guard.host.set_theme_mode(ThemeMode::Light);
    guard.host.await_render_pass();

    let snapshot = builder.build(markup, ColorMode::Light, margin);
    guard.host.show_snapshot(&snapshot);
    guard.host.set_title(TITLE_PLACEHOLDER);

    guard.tracker.enter(PrintPhase::Printing);
    if let Err(e) = guard.host.print() {
        warn!(error = %e, "host print failed, restoring anyway");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    use crate::app::infrastructure::host::{DisplayHost, ThemeHost};
    use crate::app::services::renderer::MarkdownRenderer;
    use crate::app::services::snapshot::RenderSnapshot;

    #[derive(Default)]
    struct StubHost {
        theme: Option<ThemeMode>,
        title: String,
        content: String,
        hidden_preview: bool,
        fail_print: bool,
        printed: Vec<(ThemeMode, String, String)>,
    }

    impl ThemeHost for StubHost {
        fn theme_mode(&self) -> ThemeMode {
            self.theme.unwrap_or(ThemeMode::SystemDefault)
        }
        fn set_theme_mode(&mut self, mode: ThemeMode) {
            self.theme = Some(mode);
        }
        fn system_prefers_dark(&self) -> bool {
            true
        }
    }

    impl DisplayHost for StubHost {
        fn title(&self) -> String {
            self.title.clone()
        }
        fn set_title(&mut self, title: &str) {
            self.title = title.to_string();
        }
        fn has_render_target(&self) -> bool {
            !self.hidden_preview
        }
        fn capture_content(&self) -> DisplayContent {
            DisplayContent::new(self.content.clone())
        }
        fn restore_content(&mut self, content: DisplayContent) {
            self.content = content.into_inner();
        }
        fn show_snapshot(&mut self, snapshot: &RenderSnapshot) {
            self.content = snapshot.to_html();
        }
        fn await_render_pass(&mut self) {}
        fn print(&mut self) -> Result<()> {
            self.printed
                .push((self.theme_mode(), self.title.clone(), self.content.clone()));
            if self.fail_print {
                Err(AppError::Platform("printer on fire".to_string()))
            } else {
                Ok(())
            }
        }
    }

    fn builder() -> RenderSnapshotBuilder {
        RenderSnapshotBuilder::new(Rc::new(MarkdownRenderer::new()))
    }

    fn host() -> StubHost {
        StubHost {
            theme: Some(ThemeMode::Dark),
            title: "PressPad".to_string(),
            content: "<live editor/>".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_phases_in_order() {
        let mut session = PrintSession::new();
        let mut host = host();
        session
            .export(&mut host, &builder(), "# Doc", &PageMargin::default())
            .unwrap();

        assert_eq!(
            session.last_trace(),
            &[
                PrintPhase::Capturing,
                PrintPhase::Substituting,
                PrintPhase::Printing,
                PrintPhase::Restoring,
                PrintPhase::Idle,
            ]
        );
        assert_eq!(session.phase(), PrintPhase::Idle);
    }

    #[test]
    fn test_print_sees_light_snapshot_and_placeholder_title() {
        let mut session = PrintSession::new();
        let mut host = host();
        session
            .export(&mut host, &builder(), "# Doc", &PageMargin::default())
            .unwrap();

        let (theme, title, content) = &host.printed[0];
        assert_eq!(*theme, ThemeMode::Light);
        assert_eq!(title, TITLE_PLACEHOLDER);
        assert!(content.contains("data-color-mode=\"light\""));
        assert!(content.contains("<h1>Doc</h1>"));
    }

    #[test]
    fn test_state_restored_after_print() {
        let mut session = PrintSession::new();
        let mut host = host();
        let outcome = session
            .export(&mut host, &builder(), "# Doc", &PageMargin::default())
            .unwrap();

        assert_eq!(
            outcome,
            ExportOutcome::Printed {
                original_color_mode: ColorMode::Dark
            }
        );
        assert_eq!(host.theme, Some(ThemeMode::Dark));
        assert_eq!(host.title, "PressPad");
        assert_eq!(host.content, "<live editor/>");
    }

    #[test]
    fn test_state_restored_after_print_failure() {
        let mut session = PrintSession::new();
        let mut host = StubHost {
            fail_print: true,
            ..host()
        };
        let outcome = session.export(&mut host, &builder(), "x", &PageMargin::default());

        assert!(outcome.is_ok());
        assert_eq!(host.printed.len(), 1);
        assert_eq!(host.theme, Some(ThemeMode::Dark));
        assert_eq!(host.title, "PressPad");
        assert_eq!(host.content, "<live editor/>");
    }

    #[test]
    fn test_system_default_is_restored_as_system_default() {
        let mut session = PrintSession::new();
        let mut host = StubHost {
            theme: Some(ThemeMode::SystemDefault),
            ..host()
        };
        let outcome = session
            .export(&mut host, &builder(), "x", &PageMargin::default())
            .unwrap();

        // The stub's system preference is dark.
        assert_eq!(
            outcome,
            ExportOutcome::Printed {
                original_color_mode: ColorMode::Dark
            }
        );
        assert_eq!(host.theme, Some(ThemeMode::SystemDefault));
    }

    #[test]
    fn test_missing_target_is_a_no_op() {
        let mut session = PrintSession::new();
        let mut host = StubHost {
            hidden_preview: true,
            ..host()
        };
        let outcome = session
            .export(&mut host, &builder(), "x", &PageMargin::default())
            .unwrap();

        assert_eq!(outcome, ExportOutcome::NoTarget);
        assert!(host.printed.is_empty());
        assert_eq!(host.theme, Some(ThemeMode::Dark));
        assert!(session.last_trace().is_empty());
    }

    #[test]
    fn test_busy_session_rejects_export() {
        let mut session = PrintSession::new();
        session.tracker.phase = PrintPhase::Printing;
        let mut host = host();

        let result = session.export(&mut host, &builder(), "x", &PageMargin::default());
        assert!(matches!(result, Err(AppError::SessionBusy(PrintPhase::Printing))));
        assert!(host.printed.is_empty());
    }

    #[test]
    fn test_margin_reaches_snapshot() {
        let mut session = PrintSession::new();
        let mut host = host();
        let margin = PageMargin::parse("25mm").unwrap();
        session.export(&mut host, &builder(), "x", &margin).unwrap();

        assert!(host.printed[0].2.contains("margin: 25mm"));
    }
}
