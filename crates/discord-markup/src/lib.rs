//! Discord-flavored message markup, rendered to HTML for live previews.
//!
//! This crate turns the text a user types into a webhook message (content, embed description,
//! field values) into the HTML a Discord-styled preview pane displays.
//!
//! ## Two layers
//!
//! - [`render::MarkupRenderer`]: the facade. One stateless instance, passed to whoever needs
//!   it, turns raw text into a `String` of HTML.
//! - [`document`]: the parsed form (blocks of inline nodes). Parse once and hand the
//!   [`document::Document`] to any backend (the HTML writer here, or a terminal preview).
//!
//! ## Minimal example
//!
//! ```rust
//! use discord_markup::{render_html, Theme};
//!
//! let html = render_html("**hi** <there>", Theme::Dark);
//! assert_eq!(html, r#"<strong class="discord-bold">hi</strong> &lt;there&gt;"#);
//! ```
//!
//! ## Failure model
//!
//! Rendering never fails. Unbalanced delimiters, links whose URL does not validate and
//! unknown tokens are left as (escaped) literal text. The output is meant to be inserted into
//! the page as-is; do not escape it again.
pub mod document;
pub mod error;
pub mod escape;
pub mod extended;
pub mod html;
pub mod limits;
pub mod options;
pub mod render;
pub mod theme;
pub mod timestamp;

mod block;
mod inline;
mod lexer;

pub use document::{Block, Document, Inline};
pub use error::MarkupError;
pub use options::MarkupOptions;
pub use render::{MarkupRenderer, render_html, render_html_extended};
pub use theme::Theme;
