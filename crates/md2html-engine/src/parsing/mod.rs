//! # Parsing
//!
//! Turns lines of tokens into a forest of [`Structure`] trees.
//!
//! ## Modules
//!
//! - **`structure`**: `Structure`, `StructureKind`, `ScopeKind`, `LinkTarget`
//! - **`builder`**: `StructureBuilder`, the open-structure stack over an arena
//! - **`blocks`**: line-prefix recognisers (blockquote, code, list, heading, rule, HTML)
//! - **`inline`**: emphasis run and link recognition helpers
//! - **`parser`**: `Parser`, the line-by-line state machine
//!
//! ## Key Invariants
//!
//! - The bottom of the open stack is the root and is never finished
//! - Every open LIST_ITEM sits directly under a list
//! - HR and LINE_BREAK are appended finished and never hold content
//! - After [`parse`] returns, no scope is open

pub mod blocks;
pub mod builder;
pub mod inline;
pub mod parser;
pub mod structure;

#[cfg(test)]
mod tests;

pub use builder::StructureBuilder;
pub use parser::Parser;
pub use structure::{Content, LinkTarget, ScopeKind, Structure, StructureKind};

use md2html_syntax::Token;

use crate::error::ParseError;

/// Parse lexed lines into top-level structures.
pub fn parse<I>(lines: I) -> Result<Vec<Structure>, ParseError>
where
    I: IntoIterator<Item = Vec<Token>>,
{
    let mut parser = Parser::new();
    for line in lines {
        parser.parse_line(line)?;
    }
    parser.finish()
}
