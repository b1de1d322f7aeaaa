use fltk::{
    enums::{Color, FrameType},
    group::{Flex, FlexType},
    menu::MenuBar,
    misc::HelpView,
    prelude::*,
    text::{TextBuffer, TextEditor, WrapMode},
    window::Window,
};

use crate::app::domain::settings::AppSettings;

pub const APP_TITLE: &str = "PressPad";

pub struct MainWidgets {
    pub wind: Window,
    pub menu: MenuBar,
    /// Row holding the editor and preview panels.
    pub panes: Flex,
    pub text_editor: TextEditor,
    pub preview: HelpView,
}

pub fn build_main_window(settings: &AppSettings) -> MainWidgets {
    let mut wind = Window::new(100, 100, 1100, 720, APP_TITLE);
    wind.set_xclass(APP_TITLE);

    let mut flex = Flex::new(0, 0, 1100, 720, None);
    flex.set_type(FlexType::Column);

    let menu = MenuBar::new(0, 0, 0, 30, "");
    flex.fixed(&menu, 30);

    let mut panes = Flex::default();
    panes.set_type(FlexType::Row);
    panes.set_pad(4);

    let mut text_editor = TextEditor::new(0, 0, 0, 0, "");
    text_editor.set_buffer(TextBuffer::default());
    text_editor.wrap_mode(WrapMode::AtBounds, 0);
    text_editor.set_text_size(settings.font_size as i32);
    text_editor.set_linenumber_bgcolor(Color::from_rgb(240, 240, 240));
    text_editor.set_linenumber_fgcolor(Color::from_rgb(100, 100, 100));

    let mut preview = HelpView::new(0, 0, 0, 0, "");
    preview.set_frame(FrameType::FlatBox);
    preview.set_text_size(settings.font_size as i32);

    panes.end();
    flex.end();
    wind.resizable(&flex);

    MainWidgets {
        wind,
        menu,
        panes,
        text_editor,
        preview,
    }
}
