//! Mention and custom emoji tokens (extended mode).
//!
//! No identity directory is available while previewing, so mentions always render as a
//! generic placeholder for their kind. The parsers here take the text starting at a `<` (or
//! `@`) and report how many bytes the token spans.

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Mention {
    /// `<@id>` or `<@!id>`.
    User(u64),
    /// `<@&id>`.
    Role(u64),
    /// `<#id>`.
    Channel(u64),
    Everyone,
    Here,
}

impl Mention {
    /// Placeholder text shown for the mention.
    pub fn label(&self) -> &'static str {
        match self {
            Mention::User(_) => "@User",
            Mention::Role(_) => "@Role",
            Mention::Channel(_) => "#channel",
            Mention::Everyone => "@everyone",
            Mention::Here => "@here",
        }
    }

    pub fn is_role(&self) -> bool {
        matches!(self, Mention::Role(_))
    }
}

/// `<:name:id>` or `<a:name:id>`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CustomEmoji {
    pub name: String,
    pub id: u64,
    pub animated: bool,
}

impl CustomEmoji {
    /// Image URL on the emoji CDN. Animated emoji are served as GIF.
    pub fn image_url(&self, cdn_base: &str) -> String {
        let ext = if self.animated { "gif" } else { "png" };
        format!("{}/{}.{ext}", cdn_base.trim_end_matches('/'), self.id)
    }
}

/// Parses a mention at the start of `s`. Returns the mention and its byte length.
pub(crate) fn parse_mention(s: &str) -> Option<(Mention, usize)> {
    if let Some(rest) = s.strip_prefix('@') {
        let (mention, word) = if rest.starts_with("everyone") {
            (Mention::Everyone, "everyone")
        } else if rest.starts_with("here") {
            (Mention::Here, "here")
        } else {
            return None;
        };
        let ends_word = rest[word.len()..]
            .chars()
            .next()
            .is_none_or(|c| !c.is_alphanumeric());
        return ends_word.then_some((mention, 1 + word.len()));
    }

    let body = s.strip_prefix('<')?;
    let prefix = ["@&", "@!", "@", "#"]
        .into_iter()
        .find(|p| body.starts_with(*p))?;

    let (id, digits) = leading_id(&body[prefix.len()..])?;
    let end = 1 + prefix.len() + digits;
    if !s[end..].starts_with('>') {
        return None;
    }
    let mention = match prefix {
        "@&" => Mention::Role(id),
        "#" => Mention::Channel(id),
        _ => Mention::User(id),
    };
    Some((mention, end + 1))
}

/// Parses a custom emoji at the start of `s`. Returns the emoji and its byte length.
pub(crate) fn parse_custom_emoji(s: &str) -> Option<(CustomEmoji, usize)> {
    let (animated, body) = if let Some(b) = s.strip_prefix("<a:") {
        (true, b)
    } else if let Some(b) = s.strip_prefix("<:") {
        (false, b)
    } else {
        return None;
    };

    let name_len = body
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
        .unwrap_or(body.len());
    if name_len == 0 || !body[name_len..].starts_with(':') {
        return None;
    }
    let name = &body[..name_len];
    let after_name = &body[name_len + 1..];
    let (id, digits) = leading_id(after_name)?;
    if !after_name[digits..].starts_with('>') {
        return None;
    }

    let consumed = (s.len() - body.len()) + name_len + 1 + digits + 1;
    Some((
        CustomEmoji {
            name: name.to_string(),
            id,
            animated,
        },
        consumed,
    ))
}

/// Leading ASCII-digit run parsed as an id. Overlong runs do not parse.
pub(crate) fn leading_id(s: &str) -> Option<(u64, usize)> {
    let digits = s.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    s[..digits].parse().ok().map(|id| (id, digits))
}
