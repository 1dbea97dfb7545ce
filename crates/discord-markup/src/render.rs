use crate::block;
use crate::document::Document;
use crate::html;
use crate::options::MarkupOptions;
use crate::theme::Theme;

/// Renders Discord message markup to HTML.
///
/// The renderer holds only its options, so one instance can be built at startup and shared by
/// every input field (it is `Send + Sync` and cheap to clone).
///
/// Stages run in a fixed order on every call: fenced blocks are cut out, lines are grouped into
/// quotes, each line is tokenized and paired into spans, and the tree is written as HTML with
/// all user text escaped exactly once.
#[derive(Clone, Debug, Default)]
pub struct MarkupRenderer {
    options: MarkupOptions,
}

impl MarkupRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: MarkupOptions) -> Self {
        Self { options }
    }

    /// A renderer that also substitutes mentions, custom emoji and timestamps.
    pub fn extended() -> Self {
        Self::with_options(MarkupOptions::extended())
    }

    pub fn options(&self) -> &MarkupOptions {
        &self.options
    }

    pub fn parse(&self, input: &str) -> Document {
        block::parse_document(input, &self.options)
    }

    /// Renders `input`. Empty or absent input renders as an empty string.
    ///
    /// The result is final markup: insert it as-is, never escape it again. Rendering is not
    /// idempotent; feeding the output back in escapes the inserted tags.
    pub fn render<'a>(&self, input: impl Into<Option<&'a str>>, theme: Theme) -> String {
        let Some(input) = input.into().filter(|s| !s.is_empty()) else {
            return String::new();
        };
        let doc = self.parse(input);
        if doc.is_empty() {
            tracing::trace!(input_len = input.len(), "nothing to render after blank lines");
            return String::new();
        }
        tracing::debug!(
            input_len = input.len(),
            blocks = doc.blocks().len(),
            %theme,
            "rendered message markup"
        );
        self.render_document(&doc, theme)
    }

    pub fn render_document(&self, doc: &Document, theme: Theme) -> String {
        html::write_document(doc, theme, &self.options)
    }
}

/// Renders with default options.
pub fn render_html(input: &str, theme: Theme) -> String {
    MarkupRenderer::new().render(input, theme)
}

/// Renders with mentions, custom emoji and timestamps enabled.
pub fn render_html_extended(input: &str, theme: Theme) -> String {
    MarkupRenderer::extended().render(input, theme)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_and_empty_input_render_empty() {
        let r = MarkupRenderer::new();
        assert_eq!(r.render(None::<&str>, Theme::Dark), "");
        assert_eq!(r.render("", Theme::Light), "");
    }

    #[test]
    fn whitespace_only_input_renders_empty() {
        assert_eq!(render_html("  \n\t\n ", Theme::Dark), "");
    }

    #[test]
    fn blocks_are_joined_with_breaks() {
        assert_eq!(render_html("a\nb\n\nc", Theme::Dark), "a<br>b<br>c");
    }

    #[test]
    fn quote_then_plain_line() {
        assert_eq!(
            render_html("> q\nplain", Theme::Dark),
            r#"<div class="discord-quote">q</div><br>plain"#
        );
    }

    #[test]
    fn extended_mentions_emoji_and_timestamps() {
        let opts = MarkupOptions {
            reference_time: Some(1_543_392_060 - 7_200),
            ..MarkupOptions::extended()
        };
        let r = MarkupRenderer::with_options(opts);
        let html = r.render("hi <@1> <@&2> <#3> <:wave:9> <t:1543392060:R>", Theme::Dark);
        assert_eq!(
            html,
            concat!(
                r#"hi <span class="discord-mention">@User</span> "#,
                r#"<span class="discord-mention discord-role-mention">@Role</span> "#,
                r#"<span class="discord-mention">#channel</span> "#,
                r#"<img src="https://cdn.discordapp.com/emojis/9.png" alt=":wave:" class="discord-emoji" style="width: 22px; height: 22px; vertical-align: -4px;"> "#,
                r#"<span class="discord-timestamp-mention" data-timestamp="1543392060" data-style="R" title="Wednesday, November 28, 2018 8:01 AM">in 2 hours</span>"#,
            )
        );
    }

    #[test]
    fn extended_tokens_are_escaped_text_by_default() {
        assert_eq!(render_html("<@1>", Theme::Dark), "&lt;@1&gt;");
    }

    #[test]
    fn renderer_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<MarkupRenderer>();
    }
}
