//! Markdown to HTML rendering for the live preview and for export snapshots.

use std::ops::Range;

use pulldown_cmark::{CodeBlockKind, Event, Options, Parser, Tag, TagEnd, html};
use syntect::highlighting::{Theme, ThemeSet};
use syntect::html::highlighted_html_for_string;
use syntect::parsing::SyntaxSet;
use tracing::trace;

use crate::app::domain::document::PAGE_BREAK_MARKER;
use crate::app::domain::theme::ColorMode;

const LIGHT_CODE_THEME: &str = "InspiredGitHub";
const DARK_CODE_THEME: &str = "base16-ocean.dark";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Pass raw HTML (including the page-break marker) through untouched.
    /// When off, raw HTML is shown as literal text.
    pub raw_layout_tags: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            raw_layout_tags: true,
        }
    }
}

/// Rendered markup plus the colour mode it was rendered for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedTree {
    pub color_mode: ColorMode,
    pub body_html: String,
    /// Byte ranges of `body_html` holding a page-break marker that sits
    /// directly in the document, outside any list, quote or table.
    pub page_breaks: Vec<Range<usize>>,
}

impl RenderedTree {
    /// Wrap the body in the element carrying `data-color-mode`.
    pub fn to_html(&self) -> String {
        format!(
            "<div class=\"markdown-body\" data-color-mode=\"{}\">\n{}</div>\n",
            self.color_mode, self.body_html
        )
    }
}

/// Anything that can turn markup into a [`RenderedTree`].
///
/// Implementations must be deterministic and must never fail: constructs
/// they do not understand come out as literal text.
pub trait RenderBackend {
    fn render(&self, markup: &str, color_mode: ColorMode, options: RenderOptions) -> RenderedTree;
}

/// pulldown-cmark renderer with syntect highlighting for fenced code.
pub struct MarkdownRenderer {
    syntax_set: SyntaxSet,
    theme_set: ThemeSet,
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkdownRenderer {
    pub fn new() -> Self {
        Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme_set: ThemeSet::load_defaults(),
        }
    }

    fn markdown_options() -> Options {
        let mut options = Options::empty();
        options.insert(Options::ENABLE_TABLES);
        options.insert(Options::ENABLE_STRIKETHROUGH);
        options.insert(Options::ENABLE_TASKLISTS);
        options
    }

    fn code_theme(&self, color_mode: ColorMode) -> Option<&Theme> {
        let key = if color_mode.is_dark() {
            DARK_CODE_THEME
        } else {
            LIGHT_CODE_THEME
        };
        self.theme_set.themes.get(key)
    }

    /// Highlight one fenced block, falling back to escaped plain code.
    fn highlight_block(&self, lang: &str, code: &str, color_mode: ColorMode) -> String {
        let lang_attr = escape_html(lang);
        let highlighted = self
            .syntax_set
            .find_syntax_by_token(lang)
            .zip(self.code_theme(color_mode))
            .and_then(|(syntax, theme)| {
                highlighted_html_for_string(code, &self.syntax_set, syntax, theme).ok()
            });

        match highlighted {
            Some(pre) => format!(
                "<div class=\"code-block language-{lang_attr}\" data-lang=\"{lang_attr}\">\n{pre}</div>\n"
            ),
            None => {
                trace!(lang, "no highlighter for fenced block");
                format!(
                    "<div class=\"code-block language-{lang_attr}\" data-lang=\"{lang_attr}\">\n<pre><code class=\"language-{lang_attr}\">{}</code></pre>\n</div>\n",
                    escape_html(code)
                )
            }
        }
    }
}

impl RenderBackend for MarkdownRenderer {
    fn render(&self, markup: &str, color_mode: ColorMode, options: RenderOptions) -> RenderedTree {
        let parser = Parser::new_ext(markup, Self::markdown_options());

        let mut body_html = String::with_capacity(markup.len() * 3 / 2);
        let mut page_breaks = Vec::new();
        let mut events = Vec::new();
        // (language, collected source) while inside a tagged fenced block
        let mut fenced: Option<(String, String)> = None;
        // Open Start tags; raw HTML lines of a top-level HTML block sit at 1.
        let mut depth = 0usize;

        for event in parser {
            let top_level_break = options.raw_layout_tags
                && depth == 1
                && matches!(&event, Event::Html(raw) if raw.trim() == PAGE_BREAK_MARKER);
            match &event {
                Event::Start(_) => depth += 1,
                Event::End(_) => depth = depth.saturating_sub(1),
                _ => {}
            }

            if top_level_break {
                html::push_html(&mut body_html, events.drain(..));
                let start = body_html.len();
                if let Event::Html(raw) = &event {
                    body_html.push_str(raw);
                }
                page_breaks.push(start..body_html.len());
                continue;
            }

            match event {
                Event::Start(Tag::CodeBlock(CodeBlockKind::Fenced(info))) if !info.trim().is_empty() => {
                    fenced = Some((fence_language(&info).to_string(), String::new()));
                }
                Event::Text(text) if fenced.is_some() => {
                    if let Some((_, source)) = fenced.as_mut() {
                        source.push_str(&text);
                    }
                }
                Event::End(TagEnd::CodeBlock) if fenced.is_some() => {
                    if let Some((lang, source)) = fenced.take() {
                        let block = self.highlight_block(&lang, &source, color_mode);
                        events.push(Event::Html(block.into()));
                    }
                }
                Event::Html(raw) | Event::InlineHtml(raw) if !options.raw_layout_tags => {
                    events.push(Event::Text(raw));
                }
                other => events.push(other),
            }
        }

        html::push_html(&mut body_html, events.into_iter());

        RenderedTree {
            color_mode,
            body_html,
            page_breaks,
        }
    }
}

/// First word of a fence info string: "rust,ignore" and "rust title" give "rust".
fn fence_language(info: &str) -> &str {
    info.trim()
        .split(|c: char| c.is_whitespace() || c == ',')
        .next()
        .unwrap_or("")
}

pub(crate) fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
