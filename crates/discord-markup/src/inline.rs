//! Stack-based pairing of the token stream into inline spans.
//!
//! Openers are pushed as frames; a closing run pops the innermost frame it matches and any
//! unclosed frames above it fold back into literal text. Precedence between `*`/`**` and
//! `_`/`__` comes from exact-length matching: a run only closes a frame opened with the same
//! delimiter length, except runs of three or more, which close innermost-first.
//!
//! Overlapping spans resolve by rule order: spoiler, link, strikethrough, `**`/`__`, then
//! `*`/`_`. A closer whose frame has a higher-ranked frame open above it, which can still
//! close later on the line, is left as text. Link labels are a boundary for everything except
//! spoilers.

use crate::document::Inline;
use crate::lexer;
use crate::lexer::DelimKind;
use crate::lexer::DelimRun;
use crate::lexer::Piece;
use crate::lexer::Token;
use crate::options::MarkupOptions;
use url::Url;

/// Tokenizes and pairs one line.
pub(crate) fn parse_line(pieces: &[Piece<'_>], options: &MarkupOptions) -> Vec<Inline> {
    let tokens = lexer::tokenize(pieces, options);
    let runs: Vec<Option<DelimRun>> = tokens
        .iter()
        .map(|token| match token {
            Token::Delim(run) => Some(*run),
            _ => None,
        })
        .collect();

    let mut matcher = Matcher::new(options);
    for (i, token) in tokens.into_iter().enumerate() {
        matcher.push_token(token, &runs[i + 1..]);
    }
    matcher.finish()
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum FrameKind {
    Root,
    Link,
    Delim { kind: DelimKind, len: usize },
}

impl FrameKind {
    /// Lower ranks win overlaps.
    fn rank(self) -> u8 {
        match self {
            FrameKind::Delim {
                kind: DelimKind::Pipe,
                ..
            } => 0,
            FrameKind::Link => 1,
            FrameKind::Delim {
                kind: DelimKind::Tilde,
                ..
            } => 2,
            FrameKind::Delim { len, .. } if len >= 2 => 3,
            FrameKind::Delim { .. } => 4,
            FrameKind::Root => 5,
        }
    }

    /// Whether one of the `later` runs on this line could close a frame of this kind.
    fn closable_by(self, later: &[Option<DelimRun>]) -> bool {
        let FrameKind::Delim { kind, len } = self else {
            return false;
        };
        later
            .iter()
            .flatten()
            .any(|run| run.kind == kind && run.len >= len && (len >= 2 || run.can_close))
    }

    /// The span a closed frame becomes, if this delimiter forms one.
    fn span(self, children: Vec<Inline>) -> Result<Inline, Vec<Inline>> {
        let FrameKind::Delim { kind, len } = self else {
            return Err(children);
        };
        Ok(match (kind, len) {
            (DelimKind::Star, 2) => Inline::Bold(children),
            (DelimKind::Underscore, 2) => Inline::Underline(children),
            (DelimKind::Star | DelimKind::Underscore, 1) => Inline::Italic(children),
            (DelimKind::Tilde, 2) => Inline::Strikethrough(children),
            (DelimKind::Pipe, 2) => Inline::Spoiler(children),
            _ => return Err(children),
        })
    }
}

#[derive(Debug)]
struct Frame {
    kind: FrameKind,
    children: Vec<Inline>,
}

impl Frame {
    fn new(kind: FrameKind) -> Self {
        Self {
            kind,
            children: Vec::new(),
        }
    }

    fn opener_text(&self) -> String {
        match self.kind {
            FrameKind::Root => String::new(),
            FrameKind::Link => "[".to_string(),
            FrameKind::Delim { kind, len } => std::iter::repeat_n(kind.ch(), len).collect(),
        }
    }
}

struct Matcher<'o> {
    stack: Vec<Frame>,
    options: &'o MarkupOptions,
}

impl<'o> Matcher<'o> {
    fn new(options: &'o MarkupOptions) -> Self {
        Self {
            stack: vec![Frame::new(FrameKind::Root)],
            options,
        }
    }

    fn push_token(&mut self, token: Token, later: &[Option<DelimRun>]) {
        match token {
            Token::Text(s) => self.push_text(&s),
            Token::Code(code) => self.push_node(Inline::Code(code)),
            Token::CodeBlock { language, code } => {
                self.push_node(Inline::CodeBlock { language, code });
            }
            Token::Mention(m) => self.push_node(Inline::Mention(m)),
            Token::Emoji(e) => self.push_node(Inline::Emoji(e)),
            Token::Timestamp(t) => self.push_node(Inline::Timestamp(t)),
            Token::Delim(run) => match run.kind {
                DelimKind::Tilde | DelimKind::Pipe => self.pair_run(run, later),
                DelimKind::Star | DelimKind::Underscore => self.emphasis_run(run, later),
            },
            Token::LinkOpen => {
                if self.link_frame().is_some() {
                    self.push_text("[");
                } else {
                    self.stack.push(Frame::new(FrameKind::Link));
                }
            }
            Token::LinkClose => {
                if let Some(idx) = self.link_frame() {
                    self.dissolve(idx);
                }
                self.push_text("]");
            }
            Token::LinkTail { url } => self.link_tail(url, later),
        }
    }

    fn finish(mut self) -> Vec<Inline> {
        if self.stack.len() > 1 {
            tracing::trace!(
                unclosed = self.stack.len() - 1,
                "unbalanced delimiters left as text"
            );
        }
        self.fold_above(0);
        self.stack.pop().map(|root| root.children).unwrap_or_default()
    }

    fn top(&mut self) -> &mut Vec<Inline> {
        let last = self.stack.len() - 1;
        &mut self.stack[last].children
    }

    fn push_node(&mut self, node: Inline) {
        self.top().push(node);
    }

    fn push_text(&mut self, s: &str) {
        push_text_to(self.top(), s);
    }

    /// Pops every frame above `depth`, turning each back into its literal opener + content.
    fn fold_above(&mut self, depth: usize) {
        while self.stack.len() > depth + 1 {
            let Some(frame) = self.stack.pop() else {
                return;
            };
            let top = self.top();
            push_text_to(top, &frame.opener_text());
            append_children(top, frame.children);
        }
    }

    /// Removes the frame at `idx` (never the root), leaving the frames above it open. Its
    /// opener and content become literal text in the frame below.
    fn dissolve(&mut self, idx: usize) {
        if idx == 0 || idx >= self.stack.len() {
            return;
        }
        let frame = self.stack.remove(idx);
        let below = &mut self.stack[idx - 1].children;
        push_text_to(below, &frame.opener_text());
        append_children(below, frame.children);
    }

    fn link_frame(&self) -> Option<usize> {
        self.stack
            .iter()
            .rposition(|f| f.kind == FrameKind::Link)
    }

    /// Innermost open frame for `kind` whose delimiter length satisfies `fits`. Only spoilers
    /// look past a link label.
    fn find_delim(&self, kind: DelimKind, fits: impl Fn(usize) -> bool) -> Option<(usize, usize)> {
        for (idx, frame) in self.stack.iter().enumerate().rev() {
            match frame.kind {
                FrameKind::Root => return None,
                FrameKind::Link if kind != DelimKind::Pipe => return None,
                FrameKind::Delim { kind: k, len } if k == kind && fits(len) => {
                    return Some((idx, len));
                }
                FrameKind::Link | FrameKind::Delim { .. } => {}
            }
        }
        None
    }

    /// A frame above `idx` outranks `closing` and can still close later on the line.
    fn yields_to_inner(&self, idx: usize, closing: FrameKind, later: &[Option<DelimRun>]) -> bool {
        self.stack[idx + 1..]
            .iter()
            .any(|f| f.kind.rank() < closing.rank() && f.kind.closable_by(later))
    }

    /// Closes the frame at `idx`. Refuses (returns `false`) when the span would be empty.
    fn close(&mut self, idx: usize) -> bool {
        let is_top = idx + 1 == self.stack.len();
        if is_top && self.stack[idx].children.is_empty() {
            return false;
        }
        self.fold_above(idx);
        let Some(frame) = self.stack.pop() else {
            return false;
        };
        match frame.kind.span(frame.children) {
            Ok(node) => {
                self.push_node(node);
                true
            }
            Err(children) => {
                self.stack.push(Frame {
                    kind: frame.kind,
                    children,
                });
                false
            }
        }
    }

    fn open(&mut self, kind: DelimKind, len: usize) {
        self.stack.push(Frame::new(FrameKind::Delim { kind, len }));
    }

    /// `~~` and `||`: each pair opens or closes; an odd leftover character is text.
    fn pair_run(&mut self, run: DelimRun, later: &[Option<DelimRun>]) {
        let pair: String = std::iter::repeat_n(run.kind.ch(), 2).collect();
        let closing = FrameKind::Delim {
            kind: run.kind,
            len: 2,
        };
        for _ in 0..run.len / 2 {
            match self.find_delim(run.kind, |len| len == 2) {
                Some((idx, _)) if self.yields_to_inner(idx, closing, later) => {
                    self.push_text(&pair);
                }
                Some((idx, _)) if self.close(idx) => {}
                _ => self.open(run.kind, 2),
            }
        }
        if run.len % 2 == 1 {
            self.push_text(&run.kind.ch().to_string());
        }
    }

    fn emphasis_run(&mut self, run: DelimRun, later: &[Option<DelimRun>]) {
        let ch = run.kind.ch();

        if run.len <= 2 {
            let may_close = run.len == 2 || run.can_close;
            let target = if may_close {
                self.find_delim(run.kind, |len| len == run.len)
            } else {
                None
            };
            if let Some((idx, len)) = target {
                let closing = FrameKind::Delim {
                    kind: run.kind,
                    len,
                };
                if self.yields_to_inner(idx, closing, later) {
                    self.push_text(&std::iter::repeat_n(ch, run.len).collect::<String>());
                    return;
                }
                if self.close(idx) {
                    return;
                }
            }
            if run.len == 2 || run.can_open {
                self.open(run.kind, run.len);
            } else {
                self.push_text(&ch.to_string());
            }
            return;
        }

        let mut remaining = run.len;
        while remaining > 0 {
            let closable = self.find_delim(run.kind, |len| {
                len <= remaining && (len == 2 || run.can_close)
            });
            let Some((idx, len)) = closable else {
                break;
            };
            let closing = FrameKind::Delim {
                kind: run.kind,
                len,
            };
            if self.yields_to_inner(idx, closing, later) {
                self.push_text(&std::iter::repeat_n(ch, remaining).collect::<String>());
                return;
            }
            if !self.close(idx) {
                break;
            }
            remaining -= len;
        }
        while remaining > 0 {
            if remaining >= 2 {
                self.open(run.kind, 2);
                remaining -= 2;
            } else if run.can_open {
                self.open(run.kind, 1);
                remaining -= 1;
            } else {
                self.push_text(&ch.to_string());
                remaining -= 1;
            }
        }
    }

    fn link_tail(&mut self, url: String, later: &[Option<DelimRun>]) {
        let tail = format!("]({url})");
        let Some(idx) = self.link_frame() else {
            self.push_text(&tail);
            return;
        };

        if self.yields_to_inner(idx, FrameKind::Link, later) {
            self.push_text(&tail);
            return;
        }

        if is_allowed_url(&url, self.options) {
            self.fold_above(idx);
            if let Some(frame) = self.stack.pop() {
                if frame.children.is_empty() {
                    self.push_text("[");
                } else {
                    self.push_node(Inline::Link {
                        label: frame.children,
                        url,
                    });
                    return;
                }
            }
        } else {
            self.dissolve(idx);
        }
        self.push_text(&tail);
    }
}

fn push_text_to(children: &mut Vec<Inline>, s: &str) {
    if s.is_empty() {
        return;
    }
    if let Some(Inline::Text(prev)) = children.last_mut() {
        prev.push_str(s);
    } else {
        children.push(Inline::Text(s.to_string()));
    }
}

fn append_children(children: &mut Vec<Inline>, more: Vec<Inline>) {
    for child in more {
        match child {
            Inline::Text(s) => push_text_to(children, &s),
            other => children.push(other),
        }
    }
}

fn is_allowed_url(url: &str, options: &MarkupOptions) -> bool {
    match Url::parse(url) {
        Ok(parsed) if options.allows_scheme(parsed.scheme()) => true,
        Ok(parsed) => {
            tracing::trace!(scheme = parsed.scheme(), "link scheme not allowed; left as text");
            false
        }
        Err(err) => {
            tracing::trace!(%err, "link destination is not an absolute URL; left as text");
            false
        }
    }
}
