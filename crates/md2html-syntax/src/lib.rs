//! # md2html-syntax
//!
//! Token model and per-line lexer for md2html, built on [Logos].
//!
//! [Logos]: https://docs.rs/logos
//!
//! ## Where this fits
//!
//! ```text
//! Source Text → lex_lines → [[Token]] → parse → [Structure] → render → HTML
//!               (this crate)            (md2html-engine)
//! ```
//!
//! The lexer is context-free. It does not know whether `*` starts a list,
//! emphasis, or a thematic break; that is decided by the structural parser
//! in `md2html-engine`, which sees one line of tokens at a time.
//!
//! ## Module Structure
//!
//! ```text
//! md2html-syntax/
//! ├── lib.rs          # This file - public API
//! ├── token_kind.rs   # TokenKind enum and kind predicates
//! └── lexer.rs        # Logos lexer, Token, lex/lex_lines/detokenize
//! ```

pub mod lexer;
pub mod token_kind;

pub use lexer::{Token, detokenize, lex, lex_lines};
pub use token_kind::TokenKind;
