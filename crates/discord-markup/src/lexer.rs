//! Single-pass tokenizer.
//!
//! Fenced blocks are cut out of the raw text first (they may span lines). The block stage then
//! splits the rest into lines, and each line is tokenized here into a flat stream: literal text,
//! code spans, delimiter runs, link pieces and (in extended mode) mention/emoji/timestamp
//! tokens. Pairing delimiters is left to [`crate::inline`].

use crate::extended;
use crate::extended::CustomEmoji;
use crate::extended::Mention;
use crate::options::MarkupOptions;
use crate::timestamp;
use crate::timestamp::TimestampToken;

const FENCE: &str = "```";

/// A slice of input before line splitting: plain text, or an already-extracted fenced block.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Piece<'a> {
    Text(&'a str),
    Fence {
        language: Option<String>,
        code: String,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum DelimKind {
    Star,
    Underscore,
    Tilde,
    Pipe,
}

impl DelimKind {
    pub(crate) fn ch(self) -> char {
        match self {
            DelimKind::Star => '*',
            DelimKind::Underscore => '_',
            DelimKind::Tilde => '~',
            DelimKind::Pipe => '|',
        }
    }

    fn from_char(c: char) -> Option<Self> {
        match c {
            '*' => Some(DelimKind::Star),
            '_' => Some(DelimKind::Underscore),
            '~' => Some(DelimKind::Tilde),
            '|' => Some(DelimKind::Pipe),
            _ => None,
        }
    }
}

/// A run of identical delimiter characters.
///
/// The flanking flags only constrain single-character delimiters (`*x*`, `_x_`); doubled
/// delimiters pair with anything non-empty.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct DelimRun {
    pub kind: DelimKind,
    pub len: usize,
    pub can_open: bool,
    pub can_close: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Token {
    Text(String),
    Code(String),
    CodeBlock {
        language: Option<String>,
        code: String,
    },
    Delim(DelimRun),
    /// `[`
    LinkOpen,
    /// `]` not followed by a destination.
    LinkClose,
    /// `](url)`
    LinkTail {
        url: String,
    },
    Mention(Mention),
    Emoji(CustomEmoji),
    Timestamp(TimestampToken),
}

/// Cuts ```` ```…``` ```` regions out of `input`. Matching is lazy: each fence closes at the
/// next triple backtick. An unclosed fence stays in the surrounding text.
pub(crate) fn split_fences(input: &str, detect_language: bool) -> Vec<Piece<'_>> {
    let mut pieces = Vec::new();
    let mut rest = input;

    while let Some(open) = rest.find(FENCE) {
        let body_start = open + FENCE.len();
        let Some(close) = rest[body_start..].find(FENCE) else {
            break;
        };
        if open > 0 {
            pieces.push(Piece::Text(&rest[..open]));
        }
        let (language, code) = fence_body(&rest[body_start..body_start + close], detect_language);
        pieces.push(Piece::Fence { language, code });
        rest = &rest[body_start + close + FENCE.len()..];
    }

    if !rest.is_empty() {
        pieces.push(Piece::Text(rest));
    }
    pieces
}

fn fence_body(body: &str, detect_language: bool) -> (Option<String>, String) {
    if detect_language {
        if let Some((first, code)) = body.split_once('\n') {
            let first = first.trim();
            if !first.is_empty() && first.chars().all(is_language_char) {
                return (Some(first.to_string()), code.trim().to_string());
            }
        }
    }
    (None, body.trim().to_string())
}

fn is_language_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '+' | '#' | '.' | '-')
}

/// Tokenizes one line (no `\n` inside text pieces).
pub(crate) fn tokenize(pieces: &[Piece<'_>], options: &MarkupOptions) -> Vec<Token> {
    let mut tokens = Vec::new();
    for piece in pieces {
        match piece {
            Piece::Text(text) => Lexer::new(text, options, &mut tokens).run(),
            Piece::Fence { language, code } => tokens.push(Token::CodeBlock {
                language: language.clone(),
                code: code.clone(),
            }),
        }
    }
    tokens
}

struct Lexer<'a, 'o> {
    src: &'a str,
    options: &'o MarkupOptions,
    out: &'o mut Vec<Token>,
    pos: usize,
    text: String,
}

impl<'a, 'o> Lexer<'a, 'o> {
    fn new(src: &'a str, options: &'o MarkupOptions, out: &'o mut Vec<Token>) -> Self {
        Self {
            src,
            options,
            out,
            pos: 0,
            text: String::new(),
        }
    }

    fn run(mut self) {
        while let Some(ch) = self.peek() {
            let consumed = match ch {
                '\\' => self.escape(),
                '`' => self.code_span(),
                '*' | '_' | '~' | '|' => self.delim_run(ch),
                '[' => self.emit(Token::LinkOpen, 1),
                ']' => self.link_tail(),
                '<' if self.options.extended => self.angle_token(),
                '@' if self.options.extended && !self.prev_is_alphanumeric() => self.everyone(),
                _ => None,
            };
            if consumed.is_none() {
                self.text.push(ch);
                self.pos += ch.len_utf8();
            }
        }
        self.flush_text();
    }

    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn rest(&self) -> &'a str {
        &self.src[self.pos..]
    }

    fn prev_is_alphanumeric(&self) -> bool {
        self.src[..self.pos]
            .chars()
            .next_back()
            .is_some_and(char::is_alphanumeric)
    }

    fn flush_text(&mut self) {
        if !self.text.is_empty() {
            self.out.push(Token::Text(std::mem::take(&mut self.text)));
        }
    }

    fn emit(&mut self, token: Token, len: usize) -> Option<()> {
        self.flush_text();
        self.out.push(token);
        self.pos += len;
        Some(())
    }

    /// `\*` and friends: the punctuation character is kept as plain text.
    fn escape(&mut self) -> Option<()> {
        let next = self.rest()[1..].chars().next()?;
        if !next.is_ascii_punctuation() {
            return None;
        }
        self.text.push(next);
        self.pos += 1 + next.len_utf8();
        Some(())
    }

    fn code_span(&mut self) -> Option<()> {
        let rest = self.rest();
        let n = run_len(rest, '`');
        let body = &rest[n..];
        match closing_backticks(body, n) {
            Some(at) => {
                let code = body[..at].to_string();
                self.emit(Token::Code(code), n + at + n)
            }
            None => self.literal_run('`', n),
        }
    }

    fn literal_run(&mut self, ch: char, n: usize) -> Option<()> {
        for _ in 0..n {
            self.text.push(ch);
        }
        self.pos += n * ch.len_utf8();
        Some(())
    }

    fn delim_run(&mut self, ch: char) -> Option<()> {
        let kind = DelimKind::from_char(ch)?;
        let n = run_len(self.rest(), ch);
        if matches!(kind, DelimKind::Tilde | DelimKind::Pipe) && n < 2 {
            return None;
        }

        let prev = self.src[..self.pos].chars().next_back();
        let next = self.src[self.pos + n..].chars().next();
        let next_solid = next.is_some_and(|c| !c.is_whitespace());
        let prev_solid = prev.is_some_and(|c| !c.is_whitespace());
        let (can_open, can_close) = match kind {
            DelimKind::Underscore => (
                next_solid && !prev.is_some_and(char::is_alphanumeric),
                prev_solid && !next.is_some_and(char::is_alphanumeric),
            ),
            DelimKind::Star => (next_solid, prev_solid),
            DelimKind::Tilde | DelimKind::Pipe => (true, true),
        };

        self.emit(
            Token::Delim(DelimRun {
                kind,
                len: n,
                can_open,
                can_close,
            }),
            n,
        )
    }

    /// `]` followed by `(url)`. Parentheses inside the destination must balance, and a
    /// backtick that opens a code span ends the scan: the code span wins.
    fn link_tail(&mut self) -> Option<()> {
        let rest = self.rest();
        let Some(dest) = rest[1..].strip_prefix('(') else {
            return self.emit(Token::LinkClose, 1);
        };

        let mut depth = 0usize;
        let mut i = 0;
        while let Some(c) = dest[i..].chars().next() {
            match c {
                '`' => {
                    let n = run_len(&dest[i..], '`');
                    if closing_backticks(&dest[i + n..], n).is_some() {
                        break;
                    }
                    i += n;
                    continue;
                }
                '(' => depth += 1,
                ')' if depth == 0 => {
                    let url = &dest[..i];
                    if url.trim().is_empty() {
                        break;
                    }
                    return self.emit(
                        Token::LinkTail {
                            url: url.to_string(),
                        },
                        2 + i + 1,
                    );
                }
                ')' => depth -= 1,
                _ => {}
            }
            i += c.len_utf8();
        }
        self.emit(Token::LinkClose, 1)
    }

    fn angle_token(&mut self) -> Option<()> {
        let rest = self.rest();
        if let Some((emoji, n)) = extended::parse_custom_emoji(rest) {
            return self.emit(Token::Emoji(emoji), n);
        }
        if let Some((ts, n)) = timestamp::parse_timestamp(rest, self.options.reference_time) {
            return self.emit(Token::Timestamp(ts), n);
        }
        let (mention, n) = extended::parse_mention(rest)?;
        self.emit(Token::Mention(mention), n)
    }

    fn everyone(&mut self) -> Option<()> {
        let (mention, n) = extended::parse_mention(self.rest())?;
        self.emit(Token::Mention(mention), n)
    }
}

fn run_len(s: &str, ch: char) -> usize {
    s.chars().take_while(|&c| c == ch).count()
}

/// Byte offset in `body` of the next backtick run of exactly `n`.
fn closing_backticks(body: &str, n: usize) -> Option<usize> {
    let mut search = 0;
    while let Some(off) = body[search..].find('`') {
        let at = search + off;
        let m = run_len(&body[at..], '`');
        if m == n {
            return Some(at);
        }
        search = at + m;
    }
    None
}
