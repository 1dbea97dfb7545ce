//! HTML output for a [`Document`].
//!
//! Class names match the stylesheet of the preview pane (`discord-bold`, `discord-quote`,
//! ...). Every line boundary, including the ones inside fenced code, is written as `<br>`, so
//! the output never contains a raw newline.

use crate::document::Block;
use crate::document::Document;
use crate::document::Inline;
use crate::escape::push_escaped;
use crate::extended::CustomEmoji;
use crate::extended::Mention;
use crate::options::MarkupOptions;
use crate::theme::Theme;
use crate::timestamp::TimestampToken;
use std::fmt::Write as _;

pub const LINE_BREAK: &str = "<br>";

const SPOILER_OPEN: &str = r#"<span class="discord-spoiler" onclick="this.classList.toggle('revealed')" title="Click to reveal spoiler">"#;
const EMOJI_STYLE: &str = "width: 22px; height: 22px; vertical-align: -4px;";

/// Writes `doc` as HTML.
pub fn write_document(doc: &Document, theme: Theme, options: &MarkupOptions) -> String {
    let mut writer = HtmlWriter::new(theme, options);
    writer.document(doc);
    writer.into_string()
}

pub struct HtmlWriter<'o> {
    out: String,
    theme: Theme,
    options: &'o MarkupOptions,
}

impl<'o> HtmlWriter<'o> {
    pub fn new(theme: Theme, options: &'o MarkupOptions) -> Self {
        Self {
            out: String::new(),
            theme,
            options,
        }
    }

    pub fn into_string(self) -> String {
        self.out
    }

    pub fn document(&mut self, doc: &Document) {
        for (i, block) in doc.blocks().iter().enumerate() {
            if i > 0 {
                self.out.push_str(LINE_BREAK);
            }
            self.block(block);
        }
    }

    pub fn block(&mut self, block: &Block) {
        match block {
            Block::Line(line) => self.inlines(line),
            Block::Quote(lines) => {
                self.out.push_str(if self.theme.is_light() {
                    r#"<div class="discord-quote light">"#
                } else {
                    r#"<div class="discord-quote">"#
                });
                for (i, line) in lines.iter().enumerate() {
                    if i > 0 {
                        self.out.push_str(LINE_BREAK);
                    }
                    self.inlines(line);
                }
                self.out.push_str("</div>");
            }
        }
    }

    pub fn inlines(&mut self, inlines: &[Inline]) {
        for inline in inlines {
            self.inline(inline);
        }
    }

    fn inline(&mut self, inline: &Inline) {
        match inline {
            Inline::Text(text) => self.text(text),
            Inline::Code(code) => {
                self.out.push_str(r#"<span class="discord-code-inline">"#);
                self.text(code);
                self.out.push_str("</span>");
            }
            Inline::CodeBlock { language, code } => {
                self.out.push_str(r#"<div class="discord-code-block">"#);
                match language {
                    Some(lang) => {
                        self.out.push_str(r#"<code class="language-"#);
                        push_escaped(&mut self.out, lang);
                        self.out.push_str(r#"">"#);
                    }
                    None => self.out.push_str("<code>"),
                }
                self.text(code);
                self.out.push_str("</code></div>");
            }
            Inline::Spoiler(children) => self.wrap(SPOILER_OPEN, "</span>", children),
            Inline::Link { label, url } => {
                self.out.push_str(r#"<a href=""#);
                push_escaped(&mut self.out, url);
                self.out
                    .push_str(r#"" class="discord-link" target="_blank" rel="noopener noreferrer">"#);
                self.inlines(label);
                self.out.push_str("</a>");
            }
            Inline::Strikethrough(children) => self.wrap(
                r#"<span class="discord-strikethrough">"#,
                "</span>",
                children,
            ),
            Inline::Bold(children) => {
                self.wrap(r#"<strong class="discord-bold">"#, "</strong>", children);
            }
            Inline::Underline(children) => {
                self.wrap(r#"<u class="discord-underline">"#, "</u>", children);
            }
            Inline::Italic(children) => {
                self.wrap(r#"<em class="discord-italic">"#, "</em>", children);
            }
            Inline::Mention(mention) => self.mention(mention),
            Inline::Emoji(emoji) => self.emoji(emoji),
            Inline::Timestamp(ts) => self.timestamp(ts),
        }
    }

    fn wrap(&mut self, open: &str, close: &str, children: &[Inline]) {
        self.out.push_str(open);
        self.inlines(children);
        self.out.push_str(close);
    }

    /// Escaped text; embedded newlines (fenced code) become `<br>`.
    fn text(&mut self, text: &str) {
        for (i, line) in text.split('\n').enumerate() {
            if i > 0 {
                self.out.push_str(LINE_BREAK);
            }
            push_escaped(&mut self.out, line);
        }
    }

    fn mention(&mut self, mention: &Mention) {
        self.out.push_str(if mention.is_role() {
            r#"<span class="discord-mention discord-role-mention">"#
        } else {
            r#"<span class="discord-mention">"#
        });
        self.out.push_str(mention.label());
        self.out.push_str("</span>");
    }

    fn emoji(&mut self, emoji: &CustomEmoji) {
        self.out.push_str(r#"<img src=""#);
        push_escaped(&mut self.out, &emoji.image_url(&self.options.emoji_cdn_base));
        self.out.push_str(r#"" alt=":"#);
        push_escaped(&mut self.out, &emoji.name);
        self.out.push_str(r#":" class="discord-emoji" style=""#);
        self.out.push_str(EMOJI_STYLE);
        self.out.push_str(r#"">"#);
    }

    /// `data-timestamp`/`data-style` let the page re-render relative times as they age.
    fn timestamp(&mut self, ts: &TimestampToken) {
        let _ = write!(
            self.out,
            r#"<span class="discord-timestamp-mention" data-timestamp="{}" data-style="{}" title=""#,
            ts.seconds,
            ts.style.as_char(),
        );
        push_escaped(&mut self.out, &ts.full);
        self.out.push_str(r#"">"#);
        push_escaped(&mut self.out, &ts.display);
        self.out.push_str("</span>");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::parse_document;

    fn html(s: &str, theme: Theme) -> String {
        let options = MarkupOptions::default();
        write_document(&parse_document(s, &options), theme, &options)
    }

    #[test]
    fn quote_class_follows_theme() {
        assert_eq!(
            html("> a", Theme::Dark),
            r#"<div class="discord-quote">a</div>"#
        );
        assert_eq!(
            html("> a", Theme::Light),
            r#"<div class="discord-quote light">a</div>"#
        );
    }

    #[test]
    fn code_block_lines_become_breaks() {
        assert_eq!(
            html("```rs\nlet a = 1;\nlet b = a < 2;\n```", Theme::Dark),
            r#"<div class="discord-code-block"><code class="language-rs">let a = 1;<br>let b = a &lt; 2;</code></div>"#
        );
    }

    #[test]
    fn link_href_is_escaped() {
        assert_eq!(
            html("[q](https://e.com/?a=1&b=\"2\")", Theme::Dark),
            r#"<a href="https://e.com/?a=1&amp;b=&quot;2&quot;" class="discord-link" target="_blank" rel="noopener noreferrer">q</a>"#
        );
    }

    #[test]
    fn spoiler_markup() {
        assert_eq!(
            html("||s||", Theme::Dark),
            format!("{SPOILER_OPEN}s</span>")
        );
    }
}
