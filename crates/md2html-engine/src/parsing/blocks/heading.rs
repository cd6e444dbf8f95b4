use md2html_syntax::{Token, TokenKind};

/// ATX heading (`# Title`) with owned marker constants.
pub struct AtxHeading;

impl AtxHeading {
    pub const MARKER: TokenKind = TokenKind::HASH;
    pub const MAX_LEVEL: usize = 6;

    /// Heading level when `tokens` start with a hash run and a space.
    pub fn level(tokens: &[Token]) -> Option<u8> {
        if tokens.len() <= 2 || tokens[0].kind != Self::MARKER || !tokens[1].is_space() {
            return None;
        }
        let level = tokens[0].width();
        (level <= Self::MAX_LEVEL).then_some(level as u8)
    }

    /// Remove trailing spaces and a closing hash run from heading content.
    pub fn strip_closing(tokens: &mut Vec<Token>) {
        trim_end(tokens);
        if tokens.last().is_some_and(|t| t.kind == Self::MARKER) {
            tokens.pop();
            trim_end(tokens);
        }
    }
}

/// Setext underline (`===` or `---` under a paragraph line).
pub struct SetextUnderline;

impl SetextUnderline {
    /// Heading level the underline promotes to: `=` gives 1, `-` gives 2.
    pub fn level(tokens: &[Token]) -> Option<u8> {
        let mut end = tokens.len();
        while end > 0 && tokens[end - 1].is_space() {
            end -= 1;
        }
        let line = &tokens[..end];
        let first = line.first()?;
        let level = match first.kind {
            TokenKind::EQUALS => 1,
            TokenKind::DASH => 2,
            _ => return None,
        };
        line.iter().all(|t| t.kind == first.kind).then_some(level)
    }
}

fn trim_end(tokens: &mut Vec<Token>) {
    while tokens.last().is_some_and(Token::is_space) {
        tokens.pop();
    }
}
