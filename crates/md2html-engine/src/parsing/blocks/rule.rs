use md2html_syntax::{Token, TokenKind};

use super::CodeBlock;

/// Thematic break (`***`, `- - -`, `___`).
pub struct ThematicBreak;

impl ThematicBreak {
    /// Minimum number of rule characters on the line.
    pub const MIN_CHARS: usize = 3;

    /// Whether `tokens` form a thematic break: only one rule character kind,
    /// optionally separated by spaces, at least [`Self::MIN_CHARS`] of them.
    ///
    /// Characters are counted, not tokens, so `---` (three DASH tokens) and
    /// `***` (one ASTERISK run) are treated alike.
    pub fn matches(tokens: &[Token]) -> bool {
        // Indented that far it is code.
        if tokens
            .first()
            .is_some_and(|t| t.is_space() && t.width() >= CodeBlock::INDENT)
        {
            return false;
        }
        let mut kind: Option<TokenKind> = None;
        let mut count = 0;
        for token in tokens.iter().filter(|t| !t.is_space()) {
            if !token.kind.is_rule_char() || kind.is_some_and(|k| k != token.kind) {
                return false;
            }
            kind = Some(token.kind);
            count += token.width();
        }
        count >= Self::MIN_CHARS
    }
}
