//! HTML escaping for user-supplied text.
//!
//! Every text run and attribute value that originates from the input goes through
//! [`escape_html`] exactly once, when the HTML writer emits it. Nothing the renderer inserts
//! itself is ever passed through here.

use std::borrow::Cow;

/// Escapes `&`, `<`, `>`, `"` and `'`. No other character is touched.
pub fn escape_html(s: &str) -> Cow<'_, str> {
    let Some(first) = s.find(needs_escape) else {
        return Cow::Borrowed(s);
    };

    let mut out = String::with_capacity(s.len() + 16);
    out.push_str(&s[..first]);
    for ch in s[first..].chars() {
        push_escaped_char(&mut out, ch);
    }
    Cow::Owned(out)
}

/// Appends `s` to `out`, escaped.
pub fn push_escaped(out: &mut String, s: &str) {
    out.push_str(&escape_html(s));
}

fn needs_escape(ch: char) -> bool {
    matches!(ch, '&' | '<' | '>' | '"' | '\'')
}

fn push_escaped_char(out: &mut String, ch: char) {
    match ch {
        '&' => out.push_str("&amp;"),
        '<' => out.push_str("&lt;"),
        '>' => out.push_str("&gt;"),
        '"' => out.push_str("&quot;"),
        '\'' => out.push_str("&#39;"),
        _ => out.push(ch),
    }
}
