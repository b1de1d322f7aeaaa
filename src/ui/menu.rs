use fltk::{
    app::Sender,
    enums::{Key, Shortcut},
    menu::{MenuBar, MenuFlag},
    prelude::*,
};

use super::messages::Message;

pub fn build_menu(menu: &mut MenuBar, sender: &Sender<Message>) {
    let s = sender;

    // File
    menu.add("File/Export PDF...", Shortcut::Ctrl | 'p', MenuFlag::Normal, { let s = *s; move |_| s.send(Message::ExportPdf) });
    menu.add("File/Page Margin...", Shortcut::None, MenuFlag::MenuDivider, { let s = *s; move |_| s.send(Message::SetPageMargin) });
    menu.add("File/Quit", Shortcut::Ctrl | 'q', MenuFlag::Normal, { let s = *s; move |_| s.send(Message::FileQuit) });

    // Edit
    menu.add("Edit/Insert Page Break", Shortcut::Ctrl | Key::Enter, MenuFlag::Normal, { let s = *s; move |_| s.send(Message::InsertPageBreak) });
    menu.add("Edit/Clear", Shortcut::None, MenuFlag::Normal, { let s = *s; move |_| s.send(Message::ClearDocument) });

    // View
    menu.add("View/Toggle Editor", Shortcut::Ctrl | 'e', MenuFlag::Normal, { let s = *s; move |_| s.send(Message::ToggleEditor) });
    menu.add("View/Toggle Preview", Shortcut::Ctrl | 'm', MenuFlag::Normal, { let s = *s; move |_| s.send(Message::TogglePreview) });
    menu.add("View/Cycle Theme", Shortcut::Ctrl | Shortcut::Shift | 't', MenuFlag::Normal, { let s = *s; move |_| s.send(Message::CycleTheme) });
    menu.add("View/Re-enable Print Confirmation", Shortcut::None, MenuFlag::Normal, { let s = *s; move |_| s.send(Message::ResetPrintConfirmation) });
}
