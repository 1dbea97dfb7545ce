use discord_markup::{Block, Inline, MarkupRenderer, Theme, render_html};

const THEMES: [Theme; 2] = [Theme::Dark, Theme::Light];

fn only_line(input: &str) -> Vec<Inline> {
    let doc = MarkupRenderer::new().parse(input);
    match doc.blocks() {
        [Block::Line(line)] => line.clone(),
        other => panic!("expected a single line, got {other:?}"),
    }
}

#[test]
fn plain_text_with_html_characters_is_fully_escaped() {
    for theme in THEMES {
        let html = render_html("1 < 2 && 3 > 2", theme);
        assert_eq!(html, "1 &lt; 2 &amp;&amp; 3 &gt; 2");
        assert!(!html.contains('<'));
        assert!(!html.contains('>'));
        assert!(!html.replace("&lt;", "").replace("&gt;", "").replace("&amp;", "").contains('&'));
    }
}

#[test]
fn script_tags_never_survive() {
    let html = render_html("<script>alert('x')</script>", Theme::Dark);
    assert_eq!(
        html,
        "&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt;"
    );
}

#[test]
fn double_star_is_a_bold_region() {
    assert_eq!(
        only_line("**bold**"),
        vec![Inline::Bold(vec![Inline::Text("bold".to_string())])]
    );
    assert_eq!(
        render_html("**bold**", Theme::Dark),
        r#"<strong class="discord-bold">bold</strong>"#
    );
}

#[test]
fn lone_star_is_unchanged() {
    assert_eq!(render_html("*only one star", Theme::Dark), "*only one star");
}

#[test]
fn consecutive_quote_lines_merge() {
    let input = "> quoted\n> also quoted\nplain";
    assert_eq!(
        render_html(input, Theme::Dark),
        r#"<div class="discord-quote">quoted<br>also quoted</div><br>plain"#
    );
    assert_eq!(
        render_html(input, Theme::Light),
        r#"<div class="discord-quote light">quoted<br>also quoted</div><br>plain"#
    );
}

#[test]
fn links_require_a_valid_url() {
    assert_eq!(
        render_html("[label](not a url)", Theme::Dark),
        "[label](not a url)"
    );
    assert_eq!(
        render_html("[label](https://example.com)", Theme::Dark),
        r#"<a href="https://example.com" class="discord-link" target="_blank" rel="noopener noreferrer">label</a>"#
    );
}

#[test]
fn script_urls_are_not_links() {
    assert_eq!(
        render_html("[x](javascript:alert(1))", Theme::Dark),
        "[x](javascript:alert(1))"
    );
}

#[test]
fn empty_and_absent_input_render_empty() {
    let renderer = MarkupRenderer::new();
    for theme in THEMES {
        assert_eq!(renderer.render("", theme), "");
        assert_eq!(renderer.render(None::<&str>, theme), "");
    }
}

#[test]
fn rendering_is_not_idempotent() {
    for input in ["**bold**", "> quote", "a\nb", "1 < 2"] {
        let once = render_html(input, Theme::Dark);
        let twice = render_html(&once, Theme::Dark);
        assert_ne!(twice, once, "input: {input:?}");
    }
}

#[test]
fn inserted_markup_is_not_escaped_again() {
    let html = render_html("[**a** & b](https://e.com/?x=1&y=2)", Theme::Dark);
    assert_eq!(
        html,
        concat!(
            r#"<a href="https://e.com/?x=1&amp;y=2" class="discord-link" target="_blank" rel="noopener noreferrer">"#,
            r#"<strong class="discord-bold">a</strong> &amp; b</a>"#,
        )
    );
    assert!(!html.contains("&amp;amp;"));
    assert!(!html.contains("&lt;strong"));
}

#[test]
fn crossing_spans_resolve_by_rule_order() {
    let html = render_html("**a ||b** c||", Theme::Dark);
    assert!(html.starts_with(r#"**a <span class="discord-spoiler""#), "{html}");
    assert!(html.ends_with(">b** c</span>"), "{html}");
    assert!(!html.contains("<strong"), "{html}");

    assert_eq!(
        render_html("**a ~~b** c~~", Theme::Dark),
        r#"**a <span class="discord-strikethrough">b** c</span>"#
    );

    assert_eq!(
        render_html("[a](https://e.com/`x) y`", Theme::Dark),
        r#"[a](https://e.com/<span class="discord-code-inline">x) y</span>"#
    );
}

#[test]
fn mailto_links_render_by_default() {
    assert_eq!(
        render_html("[mail](mailto:a@example.com)", Theme::Dark),
        r#"<a href="mailto:a@example.com" class="discord-link" target="_blank" rel="noopener noreferrer">mail</a>"#
    );
}

#[test]
fn output_never_contains_raw_newlines() {
    let html = render_html("a\n> b\n> c\n```\nx\ny\n```\nd", Theme::Dark);
    assert!(!html.contains('\n'));
}

#[test]
fn malformed_markup_does_not_panic() {
    let samples = [
        "**", "*", "__", "~~", "||", "`", "```", "[", "](", "[a](", "***a", "a***", "_*_*",
        "||a**b||c**", "[a](b)(c)", "\\", "\\*", "> ", ">>> ", "\r\n\r", "<t:", "<@", "<:a:",
        "é*é*", "🎉__🎉__",
    ];
    let renderer = MarkupRenderer::extended();
    for s in samples {
        let _ = renderer.render(s, Theme::Dark);
        let _ = render_html(s, Theme::Light);
    }
}
