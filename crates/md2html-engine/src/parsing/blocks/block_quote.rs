use md2html_syntax::{Token, TokenKind};

/// Blockquote block type with owned delimiter constant.
pub struct BlockQuote;

impl BlockQuote {
    /// The blockquote marker token.
    pub const MARKER: TokenKind = TokenKind::GT;

    /// Tokens taken by a `> ` prefix at the start of `tokens`, if present.
    ///
    /// A bare `>` without the space is not a blockquote line.
    pub fn prefix_len(tokens: &[Token]) -> Option<usize> {
        let matches =
            tokens.len() >= 2 && tokens[0].kind == Self::MARKER && tokens[1].is_space();
        matches.then_some(2)
    }
}
