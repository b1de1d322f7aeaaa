/// Literal marker forcing a page break in exported output.
pub const PAGE_BREAK_MARKER: &str = r#"<div class="page-break"></div>"#;

/// What actually gets inserted at the caret: the marker on a line of its own.
pub const PAGE_BREAK_TOKEN: &str = "\n<div class=\"page-break\"></div>\n";

/// Built-in document shown on first launch and after "Clear".
pub const DEFAULT_MARKDOWN: &str = r#"# PressPad

Write **markdown** on the left, watch it render on the right, and export the
preview to paper or PDF when you are done.

## What renders

- Emphasis: **bold**, *italic*, ~~strikethrough~~ and `inline code`
- Fenced code with a language tag:

```rust
fn main() {
    println!("Hello, PressPad!");
}
```

- Tables:

| Feature | Status | Notes |
| :--- | :---: | ---: |
| Live preview | Yes | Split view |
| Print / PDF | Yes | Margins in settings |
| Dark mode | Yes | Light, dark or system |

- Lists:
  1. Ordered item
  2. Another item
  - [x] Finished task
  - [ ] Open task
- Blockquotes:
  > Simplicity is prerequisite for reliability.

- Links and images: [pulldown-cmark](https://github.com/pulldown-cmark/pulldown-cmark)

  ![Placeholder](https://picsum.photos/400/200)

Use **Insert Page Break** to start a new page in the exported document.
"#;

/// The markup being edited. Freeform UTF-8, no structural constraints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub markup_text: String,
}

impl Document {
    pub fn new(markup_text: impl Into<String>) -> Self {
        Self {
            markup_text: markup_text.into(),
        }
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new(DEFAULT_MARKDOWN)
    }
}
