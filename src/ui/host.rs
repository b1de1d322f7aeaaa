//! FLTK side of the print pipeline.

use fltk::{
    app,
    group::Flex,
    menu::MenuBar,
    misc::HelpView,
    prelude::*,
    printer::Printer,
    text::TextEditor,
    window::Window,
};
use tracing::debug;

use super::main_window::MainWidgets;
use super::theme::apply_theme;
use crate::app::controllers::preview::PreviewController;
use crate::app::domain::margin::{MarginBox, PageMargin};
use crate::app::domain::theme::ThemeMode;
use crate::app::infrastructure::error::{AppError, Result};
use crate::app::infrastructure::host::{DisplayContent, DisplayHost, ThemeHost};
use crate::app::infrastructure::platform::detect_system_dark_mode;
use crate::app::services::page_layout::SheetLayout;
use crate::app::services::renderer::RenderedTree;
use crate::app::services::snapshot::RenderSnapshot;

/// Widget handles the print session drives. FLTK widgets are reference
/// handles, so these are clones of the ones in [`MainWidgets`].
pub struct FltkHost {
    wind: Window,
    menu: MenuBar,
    panes: Flex,
    editor: TextEditor,
    preview: HelpView,
    theme_mode: ThemeMode,
    system_dark: bool,
    /// Page bodies of the snapshot on display, empty outside a print.
    pages: Vec<String>,
    /// Margin of the snapshot on display.
    margin: MarginBox,
    /// Editor visibility from before a snapshot took over the view.
    editor_shown: Option<bool>,
}

impl FltkHost {
    pub fn new(widgets: &MainWidgets, theme_mode: ThemeMode) -> Self {
        let mut host = Self {
            wind: widgets.wind.clone(),
            menu: widgets.menu.clone(),
            panes: widgets.panes.clone(),
            editor: widgets.text_editor.clone(),
            preview: widgets.preview.clone(),
            theme_mode,
            system_dark: detect_system_dark_mode(),
            pages: Vec::new(),
            margin: PageMargin::default().to_points(),
            editor_shown: None,
        };
        host.apply_theme();
        host
    }

    /// Show a freshly rendered live preview. `None` leaves the panel alone.
    pub fn show_preview(&mut self, tree: Option<RenderedTree>) {
        if let Some(tree) = tree {
            self.preview.set_value(&tree.to_html());
        }
    }

    /// Show or hide the two panels to match `panels`.
    pub fn sync_panels(&mut self, panels: &PreviewController) {
        set_visible(&mut self.editor, panels.editor_visible());
        set_visible(&mut self.preview, panels.preview_visible());
        self.panes.layout();
        self.wind.redraw();
    }

    fn apply_theme(&mut self) {
        let is_dark = self.resolved_color_mode().is_dark();
        apply_theme(
            &mut self.editor,
            &mut self.preview,
            &mut self.wind,
            &mut self.menu,
            is_dark,
        );
    }

    fn print_pages(&mut self) -> Result<()> {
        let pages = if self.pages.is_empty() {
            vec![self.preview.value().unwrap_or_default()]
        } else {
            self.pages.clone()
        };

        let mut printer = Printer::default();
        printer
            .begin_job(pages.len() as i32)
            .map_err(|e| AppError::Platform(format!("print job not started: {e}")))?;

        let mut result = Ok(());
        for (index, page) in pages.iter().enumerate() {
            debug!(page = index + 1, total = pages.len(), "printing page");
            result = self.print_page(&mut printer, page, index + 1);
            if result.is_err() {
                break;
            }
        }

        printer.end_job();
        result
    }

    /// One page fragment, spread over as many sheets as its height needs.
    fn print_page(&mut self, printer: &mut Printer, page: &str, number: usize) -> Result<()> {
        self.preview.set_value(page);
        self.preview.set_topline(0);
        self.preview.redraw();

        loop {
            let top = self.preview.topline();
            printer
                .begin_page()
                .map_err(|e| AppError::Platform(format!("page {number} not started: {e}")))?;
            let layout = SheetLayout::fit(
                printer.printable_rect(),
                &self.margin,
                (self.preview.w(), self.preview.h()),
            );
            printer.scale(layout.scale as f32, layout.scale as f32);
            printer.set_origin(layout.origin_x, layout.origin_y);
            printer.print_widget(&self.preview, 0, 0);
            printer
                .end_page()
                .map_err(|e| AppError::Platform(format!("page {number} not finished: {e}")))?;

            // HelpView clamps the top line, so it stops moving at the end.
            self.preview.set_topline(top + layout.slice_height);
            if self.preview.topline() <= top {
                return Ok(());
            }
            self.preview.redraw();
        }
    }
}

fn set_visible<W: WidgetExt>(widget: &mut W, visible: bool) {
    if visible {
        widget.show();
    } else {
        widget.hide();
    }
}

impl ThemeHost for FltkHost {
    fn theme_mode(&self) -> ThemeMode {
        self.theme_mode
    }

    fn set_theme_mode(&mut self, mode: ThemeMode) {
        if mode == ThemeMode::SystemDefault {
            self.system_dark = detect_system_dark_mode();
        }
        self.theme_mode = mode;
        self.apply_theme();
    }

    fn system_prefers_dark(&self) -> bool {
        self.system_dark
    }
}

impl DisplayHost for FltkHost {
    fn title(&self) -> String {
        self.wind.label()
    }

    fn set_title(&mut self, title: &str) {
        self.wind.set_label(title);
    }

    fn has_render_target(&self) -> bool {
        self.preview.visible()
    }

    fn capture_content(&self) -> DisplayContent {
        DisplayContent::new(self.preview.value().unwrap_or_default())
    }

    fn restore_content(&mut self, content: DisplayContent) {
        self.pages.clear();
        self.preview.set_topline(0);
        if let Some(shown) = self.editor_shown.take() {
            set_visible(&mut self.editor, shown);
        }
        self.preview.set_value(content.as_str());
        self.panes.layout();
    }

    fn show_snapshot(&mut self, snapshot: &RenderSnapshot) {
        self.pages = snapshot.pages().iter().map(RenderedTree::to_html).collect();
        self.margin = snapshot.margin().to_points();
        // The snapshot replaces the whole view, editor included.
        self.editor_shown.get_or_insert(self.editor.visible());
        self.editor.hide();
        self.preview.set_value(&snapshot.to_html());
        self.panes.layout();
        self.wind.redraw();
    }

    fn await_render_pass(&mut self) {
        app::redraw();
        app::flush();
        if let Err(e) = app::wait_for(0.0) {
            debug!(error = %e, "render pass wait failed");
        }
    }

    fn print(&mut self) -> Result<()> {
        self.print_pages()
    }
}
