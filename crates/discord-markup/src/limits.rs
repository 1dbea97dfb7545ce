//! Discord's documented message and embed limits.
//!
//! The renderer never enforces these: a preview shows whatever the user typed. They are here
//! for the composer, which truncates before sending.

pub const CONTENT: usize = 2000;
pub const USERNAME: usize = 80;
pub const EMBED_TITLE: usize = 256;
pub const EMBED_DESCRIPTION: usize = 4096;
pub const EMBED_FIELD_NAME: usize = 256;
pub const EMBED_FIELD_VALUE: usize = 1024;
pub const EMBED_FOOTER: usize = 2048;
pub const EMBED_AUTHOR_NAME: usize = 256;
pub const EMBED_FIELDS: usize = 25;
pub const EMBEDS_PER_MESSAGE: usize = 10;
/// Sum of every text field across all embeds of one message.
pub const EMBED_TOTAL: usize = 6000;

/// Longest prefix of `s` with at most `max` chars.
pub fn truncate_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

pub fn exceeds(s: &str, max: usize) -> bool {
    s.chars().nth(max).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncates_on_char_boundaries() {
        assert_eq!(truncate_chars("héllo", 2), "hé");
        assert_eq!(truncate_chars("🎉🎉🎉", 1), "🎉");
        assert_eq!(truncate_chars("abc", 10), "abc");
        assert_eq!(truncate_chars("abc", 0), "");
    }

    #[test]
    fn exceeds_counts_chars_not_bytes() {
        assert!(!exceeds("éé", 2));
        assert!(exceeds("ééé", 2));
        assert!(!exceeds(&"a".repeat(CONTENT), CONTENT));
        assert!(exceeds(&"a".repeat(CONTENT + 1), CONTENT));
    }
}
