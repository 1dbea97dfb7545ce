//! Line grouping: consecutive `> ` lines merge into one quote, blank lines drop out.

use crate::document::Block;
use crate::document::Document;
use crate::document::Inline;
use crate::inline;
use crate::lexer;
use crate::lexer::Piece;
use crate::options::MarkupOptions;
use std::borrow::Cow;

const QUOTE_PREFIX: &str = "> ";
const MULTILINE_QUOTE_PREFIX: &str = ">>> ";

type Line<'a> = Vec<Piece<'a>>;

enum QuoteState {
    Outside,
    /// Collecting `> ` lines.
    Inside(Vec<Vec<Inline>>),
    /// After `>>> `: every remaining line belongs to the quote.
    Rest(Vec<Vec<Inline>>),
}

pub(crate) fn parse_document(input: &str, options: &MarkupOptions) -> Document {
    let input = normalize_newlines(input);
    let pieces = lexer::split_fences(&input, options.detect_code_languages);

    let mut blocks = Vec::new();
    let mut state = QuoteState::Outside;

    for mut line in split_lines(pieces) {
        if let QuoteState::Rest(lines) = &mut state {
            lines.push(inline::parse_line(&line, options));
            continue;
        }

        if options.multiline_quotes && strip_line_prefix(&mut line, MULTILINE_QUOTE_PREFIX) {
            let mut lines = take_quote(&mut state);
            lines.push(inline::parse_line(&line, options));
            state = QuoteState::Rest(lines);
            continue;
        }

        if strip_line_prefix(&mut line, QUOTE_PREFIX) {
            let mut lines = take_quote(&mut state);
            lines.push(inline::parse_line(&line, options));
            state = QuoteState::Inside(lines);
            continue;
        }

        if let QuoteState::Inside(lines) = std::mem::replace(&mut state, QuoteState::Outside) {
            blocks.push(Block::Quote(lines));
        }
        if !is_blank(&line) {
            blocks.push(Block::Line(inline::parse_line(&line, options)));
        }
    }

    // A quote still open at end of input is flushed here; the loop only flushes on a
    // following non-quote line.
    match state {
        QuoteState::Inside(lines) | QuoteState::Rest(lines) => blocks.push(Block::Quote(lines)),
        QuoteState::Outside => {}
    }

    Document::new(blocks)
}

fn take_quote(state: &mut QuoteState) -> Vec<Vec<Inline>> {
    match std::mem::replace(state, QuoteState::Outside) {
        QuoteState::Inside(lines) | QuoteState::Rest(lines) => lines,
        QuoteState::Outside => Vec::new(),
    }
}

fn normalize_newlines(input: &str) -> Cow<'_, str> {
    if input.contains('\r') {
        Cow::Owned(input.replace("\r\n", "\n").replace('\r', "\n"))
    } else {
        Cow::Borrowed(input)
    }
}

/// Splits pieces on `\n` inside text. A fenced block stays on the line where it starts.
fn split_lines<'a>(pieces: Vec<Piece<'a>>) -> Vec<Line<'a>> {
    let mut lines = Vec::new();
    let mut current = Vec::new();

    for piece in pieces {
        match piece {
            Piece::Text(text) => {
                let mut parts = text.split('\n');
                if let Some(first) = parts.next() {
                    if !first.is_empty() {
                        current.push(Piece::Text(first));
                    }
                }
                for part in parts {
                    lines.push(std::mem::take(&mut current));
                    if !part.is_empty() {
                        current.push(Piece::Text(part));
                    }
                }
            }
            fence @ Piece::Fence { .. } => current.push(fence),
        }
    }
    lines.push(current);
    lines
}

fn strip_line_prefix<'a>(line: &mut Line<'a>, prefix: &str) -> bool {
    let Some(Piece::Text(first)) = line.first_mut() else {
        return false;
    };
    let text: &'a str = *first;
    match text.strip_prefix(prefix) {
        Some(rest) => {
            *first = rest;
            true
        }
        None => false,
    }
}

fn is_blank(line: &Line<'_>) -> bool {
    line.iter().all(|piece| match piece {
        Piece::Text(text) => text.trim().is_empty(),
        Piece::Fence { .. } => false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(s: &str) -> Vec<Block> {
        parse_document(s, &MarkupOptions::default()).blocks().to_vec()
    }

    fn line(s: &str) -> Vec<Inline> {
        vec![Inline::Text(s.to_string())]
    }

    #[test]
    fn merges_consecutive_quote_lines() {
        assert_eq!(
            parse("> quoted\n> also quoted\nplain"),
            vec![
                Block::Quote(vec![line("quoted"), line("also quoted")]),
                Block::Line(line("plain")),
            ]
        );
    }

    #[test]
    fn flushes_quote_at_end_of_input() {
        assert_eq!(
            parse("a\n> b"),
            vec![Block::Line(line("a")), Block::Quote(vec![line("b")])]
        );
    }

    #[test]
    fn separate_quotes_stay_separate() {
        assert_eq!(
            parse("> a\nx\n> b"),
            vec![
                Block::Quote(vec![line("a")]),
                Block::Line(line("x")),
                Block::Quote(vec![line("b")]),
            ]
        );
    }

    #[test]
    fn drops_blank_lines_outside_quotes() {
        assert_eq!(
            parse("a\n\n   \nb"),
            vec![Block::Line(line("a")), Block::Line(line("b"))]
        );
    }

    #[test]
    fn blank_line_ends_a_quote() {
        assert_eq!(
            parse("> a\n\n> b"),
            vec![
                Block::Quote(vec![line("a")]),
                Block::Quote(vec![line("b")]),
            ]
        );
    }

    #[test]
    fn empty_quote_line_is_kept() {
        assert_eq!(
            parse("> a\n> \n> b"),
            vec![Block::Quote(vec![line("a"), vec![], line("b")])]
        );
    }

    #[test]
    fn prefix_needs_a_space() {
        assert_eq!(parse(">nope"), vec![Block::Line(line(">nope"))]);
    }

    #[test]
    fn multiline_quote_takes_the_rest() {
        assert_eq!(
            parse("intro\n>>> a\n\nb"),
            vec![
                Block::Line(line("intro")),
                Block::Quote(vec![line("a"), vec![], line("b")]),
            ]
        );

        let opts = MarkupOptions {
            multiline_quotes: false,
            ..MarkupOptions::default()
        };
        let doc = parse_document(">>> a", &opts);
        assert_eq!(doc.blocks(), &[Block::Line(line(">>> a"))]);
    }

    #[test]
    fn fenced_block_spanning_lines_stays_on_its_line() {
        assert_eq!(
            parse("x ```a\n\nb``` y\nz"),
            vec![
                Block::Line(vec![
                    Inline::Text("x ".to_string()),
                    Inline::CodeBlock {
                        language: Some("a".to_string()),
                        code: "b".to_string(),
                    },
                    Inline::Text(" y".to_string()),
                ]),
                Block::Line(line("z")),
            ]
        );
    }

    #[test]
    fn crlf_is_normalized() {
        assert_eq!(
            parse("> a\r\n> b\r\nc"),
            vec![
                Block::Quote(vec![line("a"), line("b")]),
                Block::Line(line("c")),
            ]
        );
    }

    #[test]
    fn empty_input_is_empty_document() {
        assert!(parse("").is_empty());
        assert!(parse("\n\n").is_empty());
    }
}
