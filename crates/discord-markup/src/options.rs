use crate::error::Result;
use serde::Deserialize;
use serde::Serialize;

pub const DEFAULT_EMOJI_CDN_BASE: &str = "https://cdn.discordapp.com/emojis";
pub const DEFAULT_LINK_SCHEMES: [&str; 3] = ["http", "https", "mailto"];

/// Renderer configuration.
///
/// Every field has a default matching what the Discord client does, so a partial JSON object
/// (or `{}`) is a valid configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkupOptions {
    /// Recognize mentions, custom emoji and `<t:…>` timestamps.
    pub extended: bool,
    /// Schemes a `[label](url)` destination may use. Anything else stays literal text, even
    /// when it is a well-formed absolute URL: `javascript:` and `data:` never become links
    /// unless listed here.
    pub allowed_link_schemes: Vec<String>,
    /// Treat a lone word on the first line of a fenced block as its language.
    pub detect_code_languages: bool,
    /// `>>> ` quotes the rest of the message.
    pub multiline_quotes: bool,
    /// Unix seconds used as "now" by relative (`R`) timestamps.
    pub reference_time: Option<i64>,
    pub emoji_cdn_base: String,
}

impl Default for MarkupOptions {
    fn default() -> Self {
        Self {
            extended: false,
            allowed_link_schemes: DEFAULT_LINK_SCHEMES.iter().map(|s| s.to_string()).collect(),
            detect_code_languages: true,
            multiline_quotes: true,
            reference_time: None,
            emoji_cdn_base: DEFAULT_EMOJI_CDN_BASE.to_string(),
        }
    }
}

impl MarkupOptions {
    /// Default options with extended tokens turned on.
    pub fn extended() -> Self {
        Self {
            extended: true,
            ..Self::default()
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub(crate) fn allows_scheme(&self, scheme: &str) -> bool {
        self.allowed_link_schemes
            .iter()
            .any(|s| s.eq_ignore_ascii_case(scheme))
    }
}
