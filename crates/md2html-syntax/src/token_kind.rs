//! TokenKind enum shared by the lexer and the structural parser.
//!
//! Every markup-significant character has its own kind. Runs of characters
//! whose repeat count matters (`#`, `*`, `_`, `` ` ``) lex into one token;
//! every other special character is a token on its own.

/// All token kinds a line of Markdown can lex into.
///
/// We use SCREAMING_CASE following the rust-analyzer convention for syntax kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(non_camel_case_types)]
pub enum TokenKind {
    /// Run of characters with no markup meaning
    TEXT,
    /// Run of ASCII digits (ordered list numbers)
    NUMBER,
    /// Run of spaces, tabs already expanded to four spaces
    SPACE,
    /// Run of `#` (ATX headings)
    HASH,
    /// `>` (blockquotes)
    GT,
    /// `<` (HTML blocks)
    LT,
    /// `!` (images)
    BANG,
    /// `-` (bullets, rules, setext underlines), one token per character
    DASH,
    /// Run of `*` (bullets, emphasis, rules)
    ASTERISK,
    /// Run of `_` (emphasis, rules)
    UNDERSCORE,
    /// `+` (bullets)
    PLUS,
    /// `~`
    TILDE,
    /// `=` (setext underlines)
    EQUALS,
    /// `(` (link address start)
    LPAREN,
    /// `)` (link address end)
    RPAREN,
    /// `[` (link text start)
    LBRACKET,
    /// `]` (link text end)
    RBRACKET,
    /// `{`
    LBRACE,
    /// `}`
    RBRACE,
    /// `"` (link titles)
    DOUBLE_QUOTE,
    /// `'`
    SINGLE_QUOTE,
    /// `:`
    COLON,
    /// Run of backticks (code spans)
    BACKTICK,
    /// `.` (ordered list markers)
    PERIOD,
    /// `;`
    SEMICOLON,
    /// `\` (escapes)
    BACKSLASH,

    // === Sentinels ===
    /// End of a source line
    EOL,
    /// End of input. Reserved: `lex` never emits it, since the parser
    /// learns that input ended when `Parser::finish` is called.
    EOF,
}

impl TokenKind {
    /// Kinds that a preceding backslash turns into literal text.
    pub fn is_escapable(self) -> bool {
        matches!(
            self,
            TokenKind::BACKSLASH
                | TokenKind::BACKTICK
                | TokenKind::ASTERISK
                | TokenKind::UNDERSCORE
                | TokenKind::LBRACE
                | TokenKind::RBRACE
                | TokenKind::LBRACKET
                | TokenKind::RBRACKET
                | TokenKind::LPAREN
                | TokenKind::RPAREN
                | TokenKind::HASH
                | TokenKind::PLUS
                | TokenKind::DASH
                | TokenKind::PERIOD
                | TokenKind::BANG
        )
    }

    /// Kinds that can make up a thematic break (`---`, `***`, `___`).
    pub fn is_rule_char(self) -> bool {
        matches!(
            self,
            TokenKind::DASH | TokenKind::ASTERISK | TokenKind::UNDERSCORE
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(TokenKind::BACKSLASH, true)]
    #[case(TokenKind::ASTERISK, true)]
    #[case(TokenKind::BANG, true)]
    #[case(TokenKind::DASH, true)]
    #[case(TokenKind::TEXT, false)]
    #[case(TokenKind::SPACE, false)]
    #[case(TokenKind::GT, false)]
    #[case(TokenKind::DOUBLE_QUOTE, false)]
    fn escapable_kinds(#[case] kind: TokenKind, #[case] expected: bool) {
        assert_eq!(kind.is_escapable(), expected);
    }

    #[test]
    fn rule_chars_are_dash_asterisk_underscore() {
        assert!(TokenKind::DASH.is_rule_char());
        assert!(TokenKind::ASTERISK.is_rule_char());
        assert!(TokenKind::UNDERSCORE.is_rule_char());
        assert!(!TokenKind::EQUALS.is_rule_char());
        assert!(!TokenKind::PLUS.is_rule_char());
    }
}
