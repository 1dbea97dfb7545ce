//! Terminal previews of Discord message markup.
//!
//! Lays a parsed [`discord_markup::Document`] out as ratatui [`Text`](ratatui::text::Text),
//! styled with the Discord client palette. Use it for composers that run in a terminal; the
//! HTML path lives in `discord-markup` itself.
//!
//! ```rust
//! use discord_markup::{MarkupRenderer, Theme};
//! use discord_markup_tui::{PreviewOptions, preview_text};
//!
//! let text = preview_text(&MarkupRenderer::new(), "> hi", Theme::Dark, &PreviewOptions::default());
//! assert_eq!(text.lines.len(), 1);
//! ```
pub mod preview;
pub mod theme;

pub use preview::{LinkDestinationStyle, PreviewOptions, preview_text, render_preview};
pub use theme::PreviewTheme;
