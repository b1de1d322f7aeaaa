/// All messages that can be sent through the FLTK channel.
/// Each menu callback sends one of these; the dispatch loop in main handles them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    // File
    ExportPdf,
    SetPageMargin,
    FileQuit,

    // Edit
    TextChanged,
    InsertPageBreak,
    ClearDocument,

    // View
    ToggleEditor,
    TogglePreview,
    CycleTheme,
    ResetPrintConfirmation,
}
