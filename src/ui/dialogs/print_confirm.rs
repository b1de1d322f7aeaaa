use std::cell::Cell;
use std::rc::Rc;

use fltk::{
    button::{Button, CheckButton, ReturnButton},
    enums::Align,
    frame::Frame,
    prelude::*,
    window::Window,
};

/// What the user picked in the print confirmation dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrintConfirmAnswer {
    pub accepted: bool,
    pub dont_ask_again: bool,
}

/// Ask before opening the print dialog. Closing the window counts as Cancel.
pub fn show_print_confirm_dialog() -> PrintConfirmAnswer {
    let mut dialog = Window::default()
        .with_size(380, 170)
        .with_label("Export PDF")
        .center_screen();
    dialog.make_modal(true);

    let mut message = Frame::default().with_pos(20, 15).with_size(340, 60);
    message.set_label(
        "The preview will be printed in light mode.\nChoose \"Save as PDF\" in the print dialog to export.",
    );
    message.set_align(Align::Left | Align::Inside | Align::Wrap);

    let check_dont_ask = CheckButton::default()
        .with_pos(20, 85)
        .with_size(340, 25)
        .with_label("Don't ask again");

    let mut cancel_btn = Button::default()
        .with_pos(170, 125)
        .with_size(90, 30)
        .with_label("Cancel");
    let mut print_btn = ReturnButton::default()
        .with_pos(270, 125)
        .with_size(90, 30)
        .with_label("Print");

    dialog.end();
    dialog.make_resizable(false);
    dialog.show();

    let accepted = Rc::new(Cell::new(false));

    let accepted_print = accepted.clone();
    let dialog_print = dialog.clone();
    print_btn.set_callback(move |_| {
        accepted_print.set(true);
        dialog_print.clone().hide();
    });

    let dialog_cancel = dialog.clone();
    cancel_btn.set_callback(move |_| {
        dialog_cancel.clone().hide();
    });

    dialog.set_callback(move |w| {
        w.hide();
    });

    super::run_dialog(&dialog);

    PrintConfirmAnswer {
        accepted: accepted.get(),
        dont_ask_again: check_dont_ask.value(),
    }
}
