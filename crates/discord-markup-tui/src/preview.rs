use crate::theme::PreviewTheme;
use discord_markup::Block;
use discord_markup::Document;
use discord_markup::Inline;
use discord_markup::MarkupRenderer;
use discord_markup::Theme;
use discord_markup::extended::Mention;
use ratatui::style::Modifier;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::text::Span;
use ratatui::text::Text;
use unicode_width::UnicodeWidthStr;

const SPOILER_CELL: char = '█';

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LinkDestinationStyle {
    /// `label (url)`
    #[default]
    Paren,
    /// `label url`
    Space,
}

#[derive(Clone, Debug)]
pub struct PreviewOptions {
    /// Show spoiler contents instead of masking them.
    pub reveal_spoilers: bool,
    pub show_link_destinations: bool,
    pub link_destination_style: LinkDestinationStyle,
    /// Drawn at the start of every quoted line.
    pub quote_prefix: String,
    pub code_block_indent: u16,
}

impl Default for PreviewOptions {
    fn default() -> Self {
        Self {
            reveal_spoilers: false,
            show_link_destinations: false,
            link_destination_style: LinkDestinationStyle::Paren,
            quote_prefix: "▎ ".to_string(),
            code_block_indent: 4,
        }
    }
}

/// Lays `doc` out as terminal lines.
///
/// Every block starts a new line, every quoted line carries the quote bar, and fenced code
/// gets one indented line per source line. Hidden spoilers keep their display width so the
/// layout does not shift when they are revealed.
pub fn render_preview(
    doc: &Document,
    theme: &PreviewTheme,
    options: &PreviewOptions,
) -> Text<'static> {
    let mut writer = PreviewWriter::new(theme, options);
    for block in doc.blocks() {
        writer.block(block);
    }
    Text::from(writer.lines)
}

/// Parses `input` with `renderer` and lays it out with the palette for `theme`.
pub fn preview_text(
    renderer: &MarkupRenderer,
    input: &str,
    theme: Theme,
    options: &PreviewOptions,
) -> Text<'static> {
    let doc = renderer.parse(input);
    render_preview(&doc, &PreviewTheme::for_theme(theme), options)
}

struct PreviewWriter<'a> {
    theme: &'a PreviewTheme,
    options: &'a PreviewOptions,
    lines: Vec<Line<'static>>,
    spans: Vec<Span<'static>>,
    prefix: Option<Span<'static>>,
    /// Nothing but the prefix has been written on the current line.
    fresh: bool,
    /// The current line ends in fenced code; further content starts a new line.
    after_code_block: bool,
}

impl<'a> PreviewWriter<'a> {
    fn new(theme: &'a PreviewTheme, options: &'a PreviewOptions) -> Self {
        Self {
            theme,
            options,
            lines: Vec::new(),
            spans: Vec::new(),
            prefix: None,
            fresh: true,
            after_code_block: false,
        }
    }

    fn block(&mut self, block: &Block) {
        match block {
            Block::Line(inlines) => {
                self.prefix = None;
                self.line(inlines);
            }
            Block::Quote(lines) => {
                self.prefix = Some(Span::styled(
                    self.options.quote_prefix.clone(),
                    self.theme.quote_bar,
                ));
                for inlines in lines {
                    self.line(inlines);
                }
                self.prefix = None;
            }
        }
    }

    fn line(&mut self, inlines: &[Inline]) {
        self.begin_line();
        self.inlines(inlines, self.theme.text, false);
        self.finish_line();
    }

    fn begin_line(&mut self) {
        self.spans.clear();
        if let Some(prefix) = &self.prefix {
            self.spans.push(prefix.clone());
        }
        self.fresh = true;
        self.after_code_block = false;
    }

    fn finish_line(&mut self) {
        let spans = std::mem::take(&mut self.spans);
        self.lines.push(Line::from(spans));
    }

    fn break_line(&mut self) {
        self.finish_line();
        self.begin_line();
    }

    fn inlines(&mut self, inlines: &[Inline], style: Style, masked: bool) {
        for inline in inlines {
            self.inline(inline, style, masked);
        }
    }

    fn inline(&mut self, inline: &Inline, style: Style, masked: bool) {
        match inline {
            Inline::Text(text) => self.text(text, style, masked),
            Inline::Code(code) => self.text(code, style.patch(self.theme.code_inline), masked),
            Inline::CodeBlock { code, .. } => self.code_block(code, masked),
            Inline::Spoiler(children) => {
                let masked = masked || !self.options.reveal_spoilers;
                self.inlines(children, style, masked);
            }
            Inline::Link { label, url } => {
                let link_style = style
                    .patch(self.theme.link)
                    .add_modifier(Modifier::UNDERLINED);
                self.inlines(label, link_style, masked);
                if self.options.show_link_destinations {
                    let label_text: String = label.iter().map(Inline::plain_text).collect();
                    let bare = url.strip_prefix("mailto:").unwrap_or(url);
                    if label_text.trim() != url && label_text.trim() != bare {
                        let suffix = match self.options.link_destination_style {
                            LinkDestinationStyle::Paren => format!(" ({url})"),
                            LinkDestinationStyle::Space => format!(" {url}"),
                        };
                        self.text(&suffix, self.theme.muted, masked);
                    }
                }
            }
            Inline::Strikethrough(children) => {
                self.inlines(children, style.add_modifier(Modifier::CROSSED_OUT), masked);
            }
            Inline::Bold(children) => {
                self.inlines(children, style.add_modifier(Modifier::BOLD), masked);
            }
            Inline::Underline(children) => {
                self.inlines(children, style.add_modifier(Modifier::UNDERLINED), masked);
            }
            Inline::Italic(children) => {
                self.inlines(children, style.add_modifier(Modifier::ITALIC), masked);
            }
            Inline::Mention(mention) => {
                let mention_style = match mention {
                    Mention::Everyone | Mention::Here => {
                        self.theme.mention.add_modifier(Modifier::BOLD)
                    }
                    _ => self.theme.mention,
                };
                self.text(mention.label(), style.patch(mention_style), masked);
            }
            Inline::Emoji(emoji) => {
                let name = format!(":{}:", emoji.name);
                self.text(&name, style.patch(self.theme.emoji), masked);
            }
            Inline::Timestamp(ts) => {
                self.text(&ts.display, style.patch(self.theme.timestamp), masked);
            }
        }
    }

    fn text(&mut self, text: &str, style: Style, masked: bool) {
        for (i, part) in text.split('\n').enumerate() {
            if i > 0 {
                self.break_line();
            }
            if masked {
                self.push(mask(part), self.theme.spoiler);
            } else {
                self.push(part.to_string(), style);
            }
        }
    }

    fn push(&mut self, content: String, style: Style) {
        if content.is_empty() {
            return;
        }
        if self.after_code_block {
            self.break_line();
        }
        self.spans.push(Span::styled(content, style));
        self.fresh = false;
    }

    fn code_block(&mut self, code: &str, masked: bool) {
        if !self.fresh {
            self.break_line();
        }
        let indent = " ".repeat(usize::from(self.options.code_block_indent));
        for (i, code_line) in code.split('\n').enumerate() {
            if i > 0 {
                self.break_line();
            }
            if !indent.is_empty() {
                self.spans.push(Span::raw(indent.clone()));
            }
            let (content, style) = if masked {
                (mask(code_line), self.theme.spoiler)
            } else {
                (code_line.to_string(), self.theme.code_block)
            };
            if !content.is_empty() {
                self.spans.push(Span::styled(content, style));
            }
        }
        self.fresh = false;
        self.after_code_block = true;
    }
}

fn mask(text: &str) -> String {
    std::iter::repeat_n(SPOILER_CELL, text.width()).collect()
}
