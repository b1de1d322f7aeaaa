use fltk::{app, enums::CallbackTrigger, prelude::*, text::TextBuffer};
use tracing::{info, warn};

use press_pad::app::infrastructure::host::ThemeHost;
use press_pad::app::infrastructure::storage::{JsonFileStore, KeyValueStore, shared};
use press_pad::app::{AppSettings, AppState, ExportFlow, ExportOutcome};
use press_pad::init_logging;
use press_pad::ui::buffer::buffer_text;
use press_pad::ui::dialogs::page_margin::show_page_margin_dialog;
use press_pad::ui::dialogs::print_confirm::show_print_confirm_dialog;
use press_pad::ui::host::FltkHost;
use press_pad::ui::main_window::build_main_window;
use press_pad::ui::menu::build_menu;
use press_pad::ui::messages::Message;

fn main() {
    init_logging();

    let app = app::App::default();
    let settings = AppSettings::load();
    let store = shared(JsonFileStore::open_default());
    let mut state = AppState::new(settings, store).with_settings_path(AppSettings::get_config_path());

    let (sender, receiver) = app::channel::<Message>();
    let mut widgets = build_main_window(state.settings());
    build_menu(&mut widgets.menu, &sender);

    let mut buffer = TextBuffer::default();
    buffer.set_text(state.text());
    widgets.text_editor.set_buffer(buffer.clone());
    widgets.text_editor.set_trigger(CallbackTrigger::Changed);
    widgets.text_editor.set_callback({
        let s = sender;
        move |_| s.send(Message::TextChanged)
    });

    let mut host = FltkHost::new(&widgets, state.settings().theme_mode);
    host.sync_panels(state.panels());
    refresh_preview(&state, &mut host);

    widgets.wind.set_callback({
        let s = sender;
        move |_| {
            if app::event() == fltk::enums::Event::Close {
                s.send(Message::FileQuit);
            }
        }
    });
    widgets.wind.end();
    widgets.wind.show();

    while app.wait() {
        let Some(msg) = receiver.recv() else {
            continue;
        };
        match msg {
            Message::TextChanged => {
                state.edit(buffer_text(&buffer));
                refresh_preview(&state, &mut host);
            }
            Message::InsertPageBreak => {
                let caret = widgets.text_editor.insert_position();
                let (start, end) = buffer.selection_position().unwrap_or((caret, caret));
                let caret = state.insert_page_break(start.max(0) as usize, end.max(0) as usize);
                buffer.set_text(state.text());
                widgets.text_editor.set_insert_position(caret as i32);
                widgets.text_editor.show_insert_position();
                let _ = widgets.text_editor.take_focus();
                refresh_preview(&state, &mut host);
            }
            Message::ClearDocument => {
                buffer.set_text(state.clear());
                refresh_preview(&state, &mut host);
            }
            Message::ToggleEditor => {
                state.toggle_editor();
                host.sync_panels(state.panels());
            }
            Message::TogglePreview => {
                state.toggle_preview();
                host.sync_panels(state.panels());
                refresh_preview(&state, &mut host);
            }
            Message::CycleTheme => {
                let mode = state.cycle_theme(&mut host);
                info!(mode = mode.display_name(), "theme changed");
                refresh_preview(&state, &mut host);
            }
            Message::ExportPdf => {
                export(&mut state, &mut host);
                refresh_preview(&state, &mut host);
            }
            Message::SetPageMargin => {
                if let Some(margin) = show_page_margin_dialog(&state.settings().page_margin) {
                    match state.set_page_margin(margin.as_str()) {
                        Ok(()) => info!(margin = %margin, "page margin changed"),
                        Err(e) => {
                            warn!(error = %e, "page margin rejected");
                            fltk::dialog::alert_default(&e.to_string());
                        }
                    }
                }
            }
            Message::ResetPrintConfirmation => state.reset_print_confirmation(),
            Message::FileQuit => app.quit(),
        }
    }
}

fn refresh_preview<S: KeyValueStore>(state: &AppState<S>, host: &mut FltkHost) {
    host.show_preview(state.live_preview(&*host));
}

fn export<S: KeyValueStore>(state: &mut AppState<S>, host: &mut FltkHost) {
    let outcome = match state.request_export(host) {
        Ok(ExportFlow::Exported(outcome)) => Ok(outcome),
        Ok(ExportFlow::AwaitingConfirmation(mut prompt)) => {
            let answer = show_print_confirm_dialog();
            prompt.set_dont_ask_again(answer.dont_ask_again);
            if answer.accepted {
                state.confirm_export(prompt, host)
            } else {
                state.cancel_export(prompt);
                return;
            }
        }
        Err(e) => Err(e),
    };

    match outcome {
        Ok(ExportOutcome::Printed { original_color_mode }) => {
            info!(%original_color_mode, theme = host.theme_mode().display_name(), "export done");
        }
        Ok(ExportOutcome::NoTarget) => info!("preview hidden, nothing exported"),
        Err(e) => warn!(error = %e, "export failed"),
    }
}
