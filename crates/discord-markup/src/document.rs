//! The parsed form of a message.
//!
//! A [`Document`] is renderer-independent: the HTML writer in [`crate::html`] and terminal
//! previews walk the same tree. Text stored here is raw (unescaped); escaping is the job of
//! whichever backend emits it.

use crate::extended::CustomEmoji;
use crate::extended::Mention;
use crate::timestamp::TimestampToken;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Document {
    blocks: Vec<Block>,
}

impl Document {
    pub(crate) fn new(blocks: Vec<Block>) -> Self {
        Self { blocks }
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Concatenated visible text, without any markup. Quote and block boundaries become `\n`.
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        for (i, block) in self.blocks.iter().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            match block {
                Block::Line(line) => push_plain(&mut out, line),
                Block::Quote(lines) => {
                    for (j, line) in lines.iter().enumerate() {
                        if j > 0 {
                            out.push('\n');
                        }
                        push_plain(&mut out, line);
                    }
                }
            }
        }
        out
    }
}

/// A top-level unit of output.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Block {
    /// An ordinary, non-blank line.
    Line(Vec<Inline>),
    /// Consecutive quoted lines, merged into one container.
    Quote(Vec<Vec<Inline>>),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Inline {
    Text(String),
    Code(String),
    CodeBlock {
        language: Option<String>,
        code: String,
    },
    Spoiler(Vec<Inline>),
    Link {
        label: Vec<Inline>,
        url: String,
    },
    Strikethrough(Vec<Inline>),
    Bold(Vec<Inline>),
    Underline(Vec<Inline>),
    Italic(Vec<Inline>),
    Mention(Mention),
    Emoji(CustomEmoji),
    Timestamp(TimestampToken),
}

impl Inline {
    /// Child nodes of container spans; empty for leaves.
    pub fn children(&self) -> &[Inline] {
        match self {
            Inline::Spoiler(c)
            | Inline::Strikethrough(c)
            | Inline::Bold(c)
            | Inline::Underline(c)
            | Inline::Italic(c) => c,
            Inline::Link { label, .. } => label,
            _ => &[],
        }
    }

    /// Visible text of this node and its children.
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        push_plain(&mut out, std::slice::from_ref(self));
        out
    }
}

fn push_plain(out: &mut String, inlines: &[Inline]) {
    for inline in inlines {
        match inline {
            Inline::Text(s) | Inline::Code(s) => out.push_str(s),
            Inline::CodeBlock { code, .. } => out.push_str(code),
            Inline::Mention(m) => out.push_str(m.label()),
            Inline::Emoji(e) => {
                out.push(':');
                out.push_str(&e.name);
                out.push(':');
            }
            Inline::Timestamp(t) => out.push_str(&t.display),
            other => push_plain(out, other.children()),
        }
    }
}
