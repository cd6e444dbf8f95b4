//! # Lexer - Tokenizing One Line at a Time
//!
//! The first stage of conversion: each source line is broken into typed
//! tokens using the [Logos] lexer generator. Lines never share state, so
//! [`lex`] is a pure function of its input.
//!
//! [Logos]: https://docs.rs/logos
//!
//! ## Reconstruction
//!
//! Concatenating the text of every token gives back the line, with one
//! exception: tabs inside a SPACE run are expanded to four spaces.
//!
//! ```
//! use md2html_syntax::lexer::{detokenize, lex};
//!
//! let line = "# Hello, *world*!";
//! assert_eq!(detokenize(&lex(line)), line);
//! ```
//!
//! ## Grouping
//!
//! Runs of `#`, `*`, `_` and `` ` `` become a single token because their
//! length is meaningful (heading level, emphasis strength, code fence
//! width). Every other special character, `-` included, is its own token.
//! Digits group into NUMBER, whitespace into SPACE, and everything else
//! into TEXT.

use logos::Logos;

use crate::token_kind::TokenKind;

const TAB_EXPANSION: &str = "    ";

/// Raw token classes recognised by Logos.
///
/// Mapped onto [`TokenKind`] by [`RawKind::to_token_kind`]; Logos needs its
/// own enum to derive on.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
enum RawKind {
    #[regex(r"[ \t]+")]
    Space,

    #[regex(r"[0-9]+")]
    Number,

    #[regex(r"#+")]
    Hash,

    #[regex(r"\*+")]
    Asterisk,

    #[regex(r"_+")]
    Underscore,

    #[regex(r"`+")]
    Backtick,

    #[token(">")]
    Gt,

    #[token("<")]
    Lt,

    #[token("!")]
    Bang,

    #[token("-")]
    Dash,

    #[token("+")]
    Plus,

    #[token("~")]
    Tilde,

    #[token("=")]
    Equals,

    #[token("(")]
    LParen,

    #[token(")")]
    RParen,

    #[token("[")]
    LBracket,

    #[token("]")]
    RBracket,

    #[token("{")]
    LBrace,

    #[token("}")]
    RBrace,

    #[token("\"")]
    DoubleQuote,

    #[token("'")]
    SingleQuote,

    #[token(":")]
    Colon,

    #[token(".")]
    Period,

    #[token(";")]
    Semicolon,

    #[token("\\")]
    Backslash,

    /// Anything not matched above
    #[regex(r#"[^ \t0-9#*_`><!+~=()\[\]{}"':.;\\-]+"#)]
    Text,
}

impl RawKind {
    fn to_token_kind(self) -> TokenKind {
        match self {
            RawKind::Space => TokenKind::SPACE,
            RawKind::Number => TokenKind::NUMBER,
            RawKind::Hash => TokenKind::HASH,
            RawKind::Asterisk => TokenKind::ASTERISK,
            RawKind::Underscore => TokenKind::UNDERSCORE,
            RawKind::Backtick => TokenKind::BACKTICK,
            RawKind::Gt => TokenKind::GT,
            RawKind::Lt => TokenKind::LT,
            RawKind::Bang => TokenKind::BANG,
            RawKind::Dash => TokenKind::DASH,
            RawKind::Plus => TokenKind::PLUS,
            RawKind::Tilde => TokenKind::TILDE,
            RawKind::Equals => TokenKind::EQUALS,
            RawKind::LParen => TokenKind::LPAREN,
            RawKind::RParen => TokenKind::RPAREN,
            RawKind::LBracket => TokenKind::LBRACKET,
            RawKind::RBracket => TokenKind::RBRACKET,
            RawKind::LBrace => TokenKind::LBRACE,
            RawKind::RBrace => TokenKind::RBRACE,
            RawKind::DoubleQuote => TokenKind::DOUBLE_QUOTE,
            RawKind::SingleQuote => TokenKind::SINGLE_QUOTE,
            RawKind::Colon => TokenKind::COLON,
            RawKind::Period => TokenKind::PERIOD,
            RawKind::Semicolon => TokenKind::SEMICOLON,
            RawKind::Backslash => TokenKind::BACKSLASH,
            RawKind::Text => TokenKind::TEXT,
        }
    }
}

/// A lexed token with its kind and text.
///
/// Tokens own their text because the parser rewrites it in place (stripping
/// indentation, splitting escaped runs).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }

    /// A single space.
    pub fn space() -> Self {
        Self::new(TokenKind::SPACE, " ")
    }

    /// The end-of-line sentinel, which stringifies as a newline.
    pub fn eol() -> Self {
        Self::new(TokenKind::EOL, "\n")
    }

    /// Width of the token in characters.
    pub fn width(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_space(&self) -> bool {
        self.kind == TokenKind::SPACE
    }
}

/// Lex one line (without its line ending) into tokens.
///
/// Never fails: unrecognised characters become TEXT.
pub fn lex(line: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut lexer = RawKind::lexer(line);

    while let Some(result) = lexer.next() {
        let kind = match result {
            Ok(raw) => raw.to_token_kind(),
            Err(()) => TokenKind::TEXT,
        };
        let slice = lexer.slice();
        let text = if kind == TokenKind::SPACE {
            slice.replace('\t', TAB_EXPANSION)
        } else {
            slice.to_owned()
        };
        tokens.push(Token { kind, text });
    }

    tokens
}

/// Split a whole document into lines and lex each of them.
pub fn lex_lines(text: &str) -> Vec<Vec<Token>> {
    text.lines().map(lex).collect()
}

/// Concatenate the text of `tokens` back into a string.
pub fn detokenize(tokens: &[Token]) -> String {
    tokens.iter().map(|t| t.text.as_str()).collect()
}
