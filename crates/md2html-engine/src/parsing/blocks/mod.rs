//! # Block Markers
//!
//! Token-level recognisers for the line prefixes that open or continue
//! block structures. Each construct owns its delimiter knowledge in its own
//! module; the parser state machine only asks "does this line start with
//! your marker, and how many tokens does it take".
//!
//! ## Modules
//!
//! - **`block_quote`**: `> ` prefixes
//! - **`code_block`**: four-column indented code
//! - **`list`**: bullet and numbered item markers, continuation indent
//! - **`heading`**: ATX `#` headings and setext underlines
//! - **`rule`**: thematic breaks
//! - **`html_block`**: lines starting with a tag
//!
//! ## Key Invariants
//!
//! - Recognisers are pure functions of the tokens they are given
//! - Indented code and HTML blocks are raw zones: no markup inside

pub mod block_quote;
pub mod code_block;
pub mod heading;
pub mod html_block;
pub mod list;
pub mod rule;

pub use block_quote::BlockQuote;
pub use code_block::CodeBlock;
pub use heading::{AtxHeading, SetextUnderline};
pub use html_block::HtmlBlock;
pub use list::{List, ListMarker};
pub use rule::ThematicBreak;

use md2html_syntax::Token;

/// A line is blank when it holds nothing but spaces.
pub fn is_blank(tokens: &[Token]) -> bool {
    tokens.iter().all(Token::is_space)
}

/// Remove `columns` columns of leading indentation.
///
/// Succeeds only when a leading SPACE token is at least that wide and
/// something follows it; any extra indentation is kept.
pub fn strip_columns(tokens: &mut Vec<Token>, columns: usize) -> bool {
    let indented = tokens.len() >= 2 && tokens[0].is_space() && tokens[0].width() >= columns;
    if !indented {
        return false;
    }
    if tokens[0].width() == columns {
        tokens.remove(0);
    } else {
        tokens[0].text.drain(..columns);
    }
    true
}
