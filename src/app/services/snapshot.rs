//! Detached, printable copies of the rendered preview.

use std::rc::Rc;

use super::renderer::{MarkdownRenderer, RenderBackend, RenderOptions, RenderedTree};
use crate::app::domain::margin::PageMargin;
use crate::app::domain::theme::ColorMode;

/// Screen styling shared by the preview and exported documents.
pub const BASE_STYLE: &str = r#".markdown-body { font-family: -apple-system, "Segoe UI", Helvetica, Arial, sans-serif; line-height: 1.6; padding: 0 8px; }
.markdown-body[data-color-mode="light"] { color: #1f2328; background: #ffffff; }
.markdown-body[data-color-mode="dark"] { color: #e6edf3; background: #0d1117; }
.markdown-body table { border-collapse: collapse; }
.markdown-body th, .markdown-body td { border: 1px solid #d0d7de; padding: 4px 12px; }
.markdown-body pre { padding: 12px; overflow-x: auto; }
.markdown-body img { max-width: 100%; }
"#;

/// Print-only style: page margin, no body margin, honoured page breaks.
pub fn print_style(margin: &PageMargin) -> String {
    format!(
        "@media print {{\n  @page {{ margin: {margin}; }}\n  body {{ margin: 0; }}\n  .page-break {{ break-after: page; page-break-after: always; }}\n}}\n"
    )
}

/// One export's worth of rendered output. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderSnapshot {
    tree: RenderedTree,
    style: String,
    margin: PageMargin,
}

impl RenderSnapshot {
    pub fn color_mode(&self) -> ColorMode {
        self.tree.color_mode
    }

    /// The injected print style.
    pub fn style(&self) -> &str {
        &self.style
    }

    pub fn margin(&self) -> &PageMargin {
        &self.margin
    }

    /// Standalone HTML document for hosts with a full HTML engine.
    pub fn to_html(&self) -> String {
        format!(
            "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<style>\n{BASE_STYLE}</style>\n<style>\n{}</style>\n</head>\n<body>\n{}</body>\n</html>\n",
            self.style,
            self.tree.to_html()
        )
    }

    /// Body split at each top-level page break, for hosts that print one
    /// widget per page.
    ///
    /// Markers nested in a list, quote or table are left in place, so every
    /// fragment is balanced HTML. Fragments holding only whitespace are
    /// dropped; there is always at least one page.
    pub fn pages(&self) -> Vec<RenderedTree> {
        let body = &self.tree.body_html;
        let mut fragments = Vec::with_capacity(self.tree.page_breaks.len() + 1);
        let mut start = 0;
        for range in &self.tree.page_breaks {
            fragments.push(&body[start..range.start]);
            start = range.end;
        }
        fragments.push(&body[start..]);

        let mut pages: Vec<RenderedTree> = fragments
            .into_iter()
            .filter(|fragment| !fragment.trim().is_empty())
            .map(|fragment| self.page(fragment.trim_start_matches('\n')))
            .collect();

        if pages.is_empty() {
            pages.push(self.page(""));
        }
        pages
    }

    fn page(&self, body_html: &str) -> RenderedTree {
        RenderedTree {
            color_mode: self.tree.color_mode,
            body_html: body_html.to_string(),
            page_breaks: Vec::new(),
        }
    }
}

/// Renders markup into a [`RenderSnapshot`] with the colour mode forced.
pub struct RenderSnapshotBuilder<R: RenderBackend = MarkdownRenderer> {
    renderer: Rc<R>,
}

impl<R: RenderBackend> RenderSnapshotBuilder<R> {
    pub fn new(renderer: Rc<R>) -> Self {
        Self { renderer }
    }

    /// Same inputs always give an identical snapshot.
    pub fn build(&self, markup: &str, color_mode: ColorMode, margin: &PageMargin) -> RenderSnapshot {
        let mut tree = self.renderer.render(
            markup,
            color_mode,
            RenderOptions {
                raw_layout_tags: true,
            },
        );
        // The backend may tag the tree with whatever it considers live.
        tree.color_mode = color_mode;

        RenderSnapshot {
            tree,
            style: print_style(margin),
            margin: margin.clone(),
        }
    }
}
