use std::cell::RefCell;
use std::rc::Rc;

use fltk::{
    button::{Button, ReturnButton},
    dialog,
    enums::CallbackTrigger,
    frame::Frame,
    input::Input,
    prelude::*,
    window::Window,
};

use crate::app::domain::margin::PageMargin;

/// Ask for a new print margin, pre-filled with `current`.
/// Returns `None` when cancelled.
pub fn show_page_margin_dialog(current: &PageMargin) -> Option<PageMargin> {
    let mut dialog = Window::default()
        .with_size(340, 150)
        .with_label("Page Margin")
        .center_screen();
    dialog.make_modal(true);

    Frame::default()
        .with_pos(20, 15)
        .with_size(300, 25)
        .with_label("CSS margin, e.g. 10mm or 0.5in 1in:");
    let mut margin_input = Input::default().with_pos(20, 45).with_size(300, 30);
    margin_input.set_value(current.as_str());

    let mut cancel_btn = Button::default()
        .with_pos(130, 100)
        .with_size(90, 30)
        .with_label("Cancel");
    let mut ok_btn = ReturnButton::default()
        .with_pos(230, 100)
        .with_size(90, 30)
        .with_label("OK");

    dialog.end();
    dialog.make_resizable(false);
    dialog.show();

    let chosen = Rc::new(RefCell::new(None));

    let chosen_ok = chosen.clone();
    let input_ok = margin_input.clone();
    let dialog_ok = dialog.clone();
    ok_btn.set_callback(move |_| match PageMargin::parse(&input_ok.value()) {
        Ok(margin) => {
            *chosen_ok.borrow_mut() = Some(margin);
            dialog_ok.clone().hide();
        }
        Err(e) => dialog::message_default(&e.to_string()),
    });

    // Enter key on input triggers OK
    let mut ok_btn2 = ok_btn.clone();
    margin_input.set_trigger(CallbackTrigger::EnterKey);
    margin_input.set_callback(move |_| ok_btn2.do_callback());

    let dialog_cancel = dialog.clone();
    cancel_btn.set_callback(move |_| {
        dialog_cancel.clone().hide();
    });

    dialog.set_callback(move |w| {
        w.hide();
    });

    super::run_dialog(&dialog);

    chosen.borrow_mut().take()
}
