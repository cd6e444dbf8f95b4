use md2html_syntax::{Token, TokenKind};

use crate::parsing::StructureKind;

/// Classification of `*` and `_` delimiter runs.
pub struct EmphasisRun;

impl EmphasisRun {
    /// EMPHASIS for a single character run, STRONG for a double one.
    ///
    /// Longer runs have no meaning and stay literal.
    pub fn strength(token: &Token) -> Option<StructureKind> {
        if !matches!(token.kind, TokenKind::ASTERISK | TokenKind::UNDERSCORE) {
            return None;
        }
        match token.width() {
            1 => Some(StructureKind::Emphasis),
            2 => Some(StructureKind::Strong),
            _ => None,
        }
    }

    /// A run opens only when text follows it directly.
    pub fn can_open(next: Option<&Token>) -> bool {
        next.is_some_and(|t| !t.is_space())
    }

    /// A run closes only when text precedes it directly.
    pub fn can_close(previous: Option<&Token>) -> bool {
        previous.is_some_and(|t| !t.is_space())
    }
}
