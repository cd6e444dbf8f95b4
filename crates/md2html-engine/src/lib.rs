//! # md2html engine
//!
//! Converts Markdown-like text to HTML in three stages:
//!
//! ```text
//! text ──lex_lines──▶ tokens per line ──parse──▶ Structure forest ──render──▶ HTML
//! ```
//!
//! Lexing lives in `md2html-syntax`; this crate owns the structural parser
//! and the renderer. Each conversion owns fresh state, so calls are
//! independent of one another.
//!
//! ## Modules
//!
//! - **`parsing`**: line-by-line state machine building the structure tree
//! - **`render`**: HTML output and escaping
//! - **`io`**: reading sources and writing output files
//! - **`error`**: parse, render and conversion errors

pub mod error;
pub mod io;
pub mod parsing;
pub mod render;

pub use error::{ConvertError, ParseError, RenderError};
pub use parsing::{Structure, StructureKind, parse};
pub use render::{Page, render};

use md2html_syntax::lex_lines;

/// Convert a whole document to an HTML fragment.
///
/// ```
/// let html = md2html_engine::convert("Hello world.").unwrap();
/// assert_eq!(html, "<p>Hello world.</p>");
/// ```
pub fn convert(markdown: &str) -> Result<String, ConvertError> {
    let structures = parse(lex_lines(markdown))?;
    Ok(render(&structures)?)
}
