use discord_markup::Theme;
use ratatui::style::Color;
use ratatui::style::Style;

/// Styles for a terminal preview, one per kind of node.
#[derive(Clone, Debug)]
pub struct PreviewTheme {
    pub text: Style,
    pub muted: Style,
    pub link: Style,
    pub code_inline: Style,
    pub code_block: Style,
    pub quote_bar: Style,
    pub spoiler: Style,
    pub mention: Style,
    pub emoji: Style,
    pub timestamp: Style,
}

impl PreviewTheme {
    /// The Discord client palette for `theme`, in truecolor.
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Dark => Self {
                text: Style::default().fg(Color::Rgb(0xdc, 0xdd, 0xde)),
                muted: Style::default().fg(Color::Rgb(0x72, 0x76, 0x7d)),
                link: Style::default().fg(Color::Rgb(0x00, 0xaf, 0xf4)),
                code_inline: Style::default()
                    .fg(Color::Rgb(0xdc, 0xdd, 0xde))
                    .bg(Color::Rgb(0x2f, 0x31, 0x36)),
                code_block: Style::default()
                    .fg(Color::Rgb(0xb9, 0xbb, 0xbe))
                    .bg(Color::Rgb(0x2f, 0x31, 0x36)),
                quote_bar: Style::default().fg(Color::Rgb(0x4f, 0x54, 0x5c)),
                spoiler: Style::default()
                    .fg(Color::Rgb(0x20, 0x22, 0x25))
                    .bg(Color::Rgb(0x20, 0x22, 0x25)),
                mention: Style::default()
                    .fg(Color::Rgb(0xde, 0xe0, 0xfc))
                    .bg(Color::Rgb(0x3c, 0x42, 0x70)),
                emoji: Style::default().fg(Color::Rgb(0xfa, 0xa6, 0x1a)),
                timestamp: Style::default().bg(Color::Rgb(0x3a, 0x3c, 0x42)),
            },
            Theme::Light => Self {
                text: Style::default().fg(Color::Rgb(0x2e, 0x33, 0x38)),
                muted: Style::default().fg(Color::Rgb(0x74, 0x7f, 0x8d)),
                link: Style::default().fg(Color::Rgb(0x00, 0x68, 0xe0)),
                code_inline: Style::default()
                    .fg(Color::Rgb(0x2e, 0x33, 0x38))
                    .bg(Color::Rgb(0xe3, 0xe5, 0xe8)),
                code_block: Style::default()
                    .fg(Color::Rgb(0x4f, 0x56, 0x60))
                    .bg(Color::Rgb(0xf2, 0xf3, 0xf5)),
                quote_bar: Style::default().fg(Color::Rgb(0xc7, 0xcc, 0xd1)),
                spoiler: Style::default()
                    .fg(Color::Rgb(0xb9, 0xbb, 0xbe))
                    .bg(Color::Rgb(0xb9, 0xbb, 0xbe)),
                mention: Style::default()
                    .fg(Color::Rgb(0x58, 0x65, 0xf2))
                    .bg(Color::Rgb(0xe6, 0xe8, 0xfd)),
                emoji: Style::default().fg(Color::Rgb(0xc2, 0x7c, 0x0e)),
                timestamp: Style::default().bg(Color::Rgb(0xe3, 0xe5, 0xe8)),
            },
        }
    }
}

impl Default for PreviewTheme {
    fn default() -> Self {
        Self::for_theme(Theme::default())
    }
}
