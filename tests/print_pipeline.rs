use std::panic::{AssertUnwindSafe, catch_unwind};
use std::rc::Rc;

use press_pad::app::controllers::confirmation::SKIP_CONFIRMATION_KEY;
use press_pad::app::domain::document::PAGE_BREAK_TOKEN;
use press_pad::app::{
    AppError, AppSettings, AppState, ColorMode, DisplayContent, DisplayHost, ExportFlow,
    ExportOutcome, JsonFileStore, KeyValueStore, MemoryStore, PrintPhase, RenderSnapshot, Result,
    ThemeHost, ThemeMode, shared,
};

#[derive(Debug, Clone, PartialEq)]
enum Event {
    Theme(ThemeMode),
    Title(String),
    RenderPass,
    Snapshot { pages: usize, html: String },
    Print { theme: ThemeMode, title: String },
    Restore(String),
}

#[derive(Clone, Copy, PartialEq)]
enum PrintBehaviour {
    Ok,
    Fail,
    Panic,
}

struct RecordingHost {
    theme: ThemeMode,
    title: String,
    content: String,
    system_dark: bool,
    behaviour: PrintBehaviour,
    events: Vec<Event>,
}

impl RecordingHost {
    fn new(theme: ThemeMode) -> Self {
        Self {
            theme,
            title: "Notes - PressPad".to_string(),
            content: "<live preview/>".to_string(),
            system_dark: true,
            behaviour: PrintBehaviour::Ok,
            events: Vec::new(),
        }
    }

    fn prints(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, Event::Print { .. }))
            .count()
    }

    fn assert_untouched(&self, theme: ThemeMode) {
        assert_eq!(self.theme, theme);
        assert_eq!(self.title, "Notes - PressPad");
        assert_eq!(self.content, "<live preview/>");
    }
}

impl ThemeHost for RecordingHost {
    fn theme_mode(&self) -> ThemeMode {
        self.theme
    }

    fn set_theme_mode(&mut self, mode: ThemeMode) {
        self.theme = mode;
        self.events.push(Event::Theme(mode));
    }

    fn system_prefers_dark(&self) -> bool {
        self.system_dark
    }
}

impl DisplayHost for RecordingHost {
    fn title(&self) -> String {
        self.title.clone()
    }

    fn set_title(&mut self, title: &str) {
        self.title = title.to_string();
        self.events.push(Event::Title(title.to_string()));
    }

    fn has_render_target(&self) -> bool {
        true
    }

    fn capture_content(&self) -> DisplayContent {
        DisplayContent::new(self.content.clone())
    }

    fn restore_content(&mut self, content: DisplayContent) {
        self.events.push(Event::Restore(content.as_str().to_string()));
        self.content = content.into_inner();
    }

    fn show_snapshot(&mut self, snapshot: &RenderSnapshot) {
        let html = snapshot.to_html();
        self.events.push(Event::Snapshot {
            pages: snapshot.pages().len(),
            html: html.clone(),
        });
        self.content = html;
    }

    fn await_render_pass(&mut self) {
        self.events.push(Event::RenderPass);
    }

    fn print(&mut self) -> Result<()> {
        self.events.push(Event::Print {
            theme: self.theme,
            title: self.title.clone(),
        });
        match self.behaviour {
            PrintBehaviour::Ok => Ok(()),
            PrintBehaviour::Fail => Err(AppError::Platform("no printer".to_string())),
            PrintBehaviour::Panic => panic!("print backend crashed"),
        }
    }
}

fn new_state() -> AppState<MemoryStore> {
    AppState::new(AppSettings::default(), shared(MemoryStore::new()))
}

fn skipping_state() -> AppState<MemoryStore> {
    let mut store = MemoryStore::new();
    store.set(SKIP_CONFIRMATION_KEY, "true").unwrap();
    AppState::new(AppSettings::default(), shared(store))
}

#[test]
fn test_accepted_export_runs_in_order_and_restores() {
    let mut state = new_state();
    state.edit("# Report\n\nBody");
    let mut host = RecordingHost::new(ThemeMode::Dark);

    let ExportFlow::AwaitingConfirmation(prompt) = state.request_export(&mut host).unwrap() else {
        panic!("first export should ask");
    };
    let outcome = state.confirm_export(prompt, &mut host).unwrap();

    assert_eq!(
        outcome,
        ExportOutcome::Printed {
            original_color_mode: ColorMode::Dark
        }
    );
    host.assert_untouched(ThemeMode::Dark);
    assert_eq!(state.print_phase(), PrintPhase::Idle);

    // Light is applied and given a render pass before the snapshot goes in.
    assert_eq!(host.events[0], Event::Theme(ThemeMode::Light));
    assert_eq!(host.events[1], Event::RenderPass);
    let Event::Snapshot { html, .. } = &host.events[2] else {
        panic!("expected the snapshot third, got {:?}", host.events[2]);
    };
    assert!(html.contains("data-color-mode=\"light\""));
    assert!(html.contains("margin: 10mm"));
    assert!(html.contains("<h1>Report</h1>"));
    assert_eq!(host.events[3], Event::Title(" ".to_string()));
    assert_eq!(
        host.events[4],
        Event::Print {
            theme: ThemeMode::Light,
            title: " ".to_string()
        }
    );
    assert_eq!(
        &host.events[5..],
        &[
            Event::Title("Notes - PressPad".to_string()),
            Event::Restore("<live preview/>".to_string()),
            Event::Theme(ThemeMode::Dark),
        ]
    );
}

#[test]
fn test_cancelled_confirmation_touches_nothing() {
    let store = shared(MemoryStore::new());
    let mut state = AppState::new(AppSettings::default(), Rc::clone(&store));
    let before = state.text().to_string();
    let mut host = RecordingHost::new(ThemeMode::Light);

    let ExportFlow::AwaitingConfirmation(mut prompt) = state.request_export(&mut host).unwrap() else {
        panic!("first export should ask");
    };
    prompt.set_dont_ask_again(true);
    state.cancel_export(prompt);

    assert!(host.events.is_empty());
    host.assert_untouched(ThemeMode::Light);
    assert_eq!(state.text(), before);
    assert!(store.get(SKIP_CONFIRMATION_KEY).is_none());
    assert!(state.confirmation_required());
}

#[test]
fn test_failed_print_still_restores() {
    let mut state = skipping_state();
    let mut host = RecordingHost::new(ThemeMode::SystemDefault);
    host.behaviour = PrintBehaviour::Fail;

    let flow = state.request_export(&mut host).unwrap();

    assert_eq!(
        flow,
        ExportFlow::Exported(ExportOutcome::Printed {
            original_color_mode: ColorMode::Dark
        })
    );
    assert_eq!(host.prints(), 1);
    host.assert_untouched(ThemeMode::SystemDefault);
}

#[test]
fn test_panicking_print_still_restores() {
    let mut state = skipping_state();
    let mut host = RecordingHost::new(ThemeMode::Dark);
    host.behaviour = PrintBehaviour::Panic;

    let result = catch_unwind(AssertUnwindSafe(|| state.request_export(&mut host)));
    assert!(result.is_err());

    host.assert_untouched(ThemeMode::Dark);
    assert_eq!(state.print_phase(), PrintPhase::Idle);

    // The session is usable again afterwards.
    host.behaviour = PrintBehaviour::Ok;
    host.events.clear();
    state.request_export(&mut host).unwrap();
    assert_eq!(host.prints(), 1);
}

#[test]
fn test_page_breaks_split_the_snapshot() {
    let mut state = skipping_state();
    state.edit("# One");
    let end = state.text().len();
    state.insert_page_break(end, end);
    let mut text = state.text().to_string();
    text.push_str("# Two");
    state.edit(text);
    let end = state.text().len();
    state.insert_page_break(end, end);
    let mut text = state.text().to_string();
    text.push_str("# Three");
    state.edit(text);
    assert_eq!(state.text().matches(PAGE_BREAK_TOKEN).count(), 2);

    let mut host = RecordingHost::new(ThemeMode::Light);
    state.request_export(&mut host).unwrap();

    let pages = host.events.iter().find_map(|e| match e {
        Event::Snapshot { pages, .. } => Some(*pages),
        _ => None,
    });
    assert_eq!(pages, Some(3));
}

#[test]
fn test_custom_margin_reaches_print() {
    let mut state = skipping_state();
    state.set_page_margin("0.5in 1in").unwrap();
    let mut host = RecordingHost::new(ThemeMode::Light);

    state.request_export(&mut host).unwrap();

    let html = host.events.iter().find_map(|e| match e {
        Event::Snapshot { html, .. } => Some(html.clone()),
        _ => None,
    });
    assert!(html.unwrap().contains("margin: 0.5in 1in"));
}

#[test]
fn test_session_state_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("storage.json");

    {
        let mut state = AppState::new(AppSettings::default(), shared(JsonFileStore::open(&path)));
        state.edit("persisted *text*");
        let mut host = RecordingHost::new(ThemeMode::Light);
        let ExportFlow::AwaitingConfirmation(mut prompt) = state.request_export(&mut host).unwrap()
        else {
            panic!("first export should ask");
        };
        prompt.set_dont_ask_again(true);
        state.confirm_export(prompt, &mut host).unwrap();
    }

    let mut state = AppState::new(AppSettings::default(), shared(JsonFileStore::open(&path)));
    assert_eq!(state.text(), "persisted *text*");
    assert!(!state.confirmation_required());

    let mut host = RecordingHost::new(ThemeMode::Light);
    let flow = state.request_export(&mut host).unwrap();
    assert!(matches!(flow, ExportFlow::Exported(ExportOutcome::Printed { .. })));
}
