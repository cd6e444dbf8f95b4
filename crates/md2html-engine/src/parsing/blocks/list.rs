use md2html_syntax::{Token, TokenKind};

use super::strip_columns;
use crate::parsing::StructureKind;

/// Which kind of list an item marker starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListMarker {
    /// `-`, `+` or `*` followed by a space
    Bullet,
    /// Digits, a period and a space
    Numbered,
}

impl ListMarker {
    pub fn structure_kind(self) -> StructureKind {
        match self {
            ListMarker::Bullet => StructureKind::UnorderedList,
            ListMarker::Numbered => StructureKind::OrderedList,
        }
    }

    /// Tokens the marker occupies, trailing space included.
    pub fn token_count(self) -> usize {
        match self {
            ListMarker::Bullet => 2,
            ListMarker::Numbered => 3,
        }
    }
}

/// List block type with owned marker knowledge.
pub struct List;

impl List {
    /// Columns of indentation that continue a list item.
    pub const CONTINUATION_INDENT: usize = 2;

    /// The item marker at the start of `tokens`, if any.
    ///
    /// Item content must follow the marker.
    pub fn marker(tokens: &[Token]) -> Option<ListMarker> {
        if tokens.len() > 2 && Self::is_bullet(&tokens[0]) && tokens[1].is_space() {
            return Some(ListMarker::Bullet);
        }
        if tokens.len() > 3
            && tokens[0].kind == TokenKind::NUMBER
            && tokens[1].kind == TokenKind::PERIOD
            && tokens[2].is_space()
        {
            return Some(ListMarker::Numbered);
        }
        None
    }

    /// Strip the continuation indent of an open item.
    pub fn strip_continuation(tokens: &mut Vec<Token>) -> bool {
        strip_columns(tokens, Self::CONTINUATION_INDENT)
    }

    fn is_bullet(token: &Token) -> bool {
        match token.kind {
            TokenKind::DASH | TokenKind::PLUS => true,
            TokenKind::ASTERISK => token.text == "*",
            _ => false,
        }
    }
}
