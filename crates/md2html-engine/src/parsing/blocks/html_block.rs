use md2html_syntax::{Token, TokenKind};

/// HTML block: a line starting with a tag, copied through unescaped.
pub struct HtmlBlock;

impl HtmlBlock {
    pub const OPEN: TokenKind = TokenKind::LT;

    /// Whether `tokens` start with `<tag`, `</tag` or `<!`.
    pub fn starts(tokens: &[Token]) -> bool {
        let [open, name, ..] = tokens else {
            return false;
        };
        if open.kind != Self::OPEN {
            return false;
        }
        match name.kind {
            TokenKind::BANG => true,
            TokenKind::TEXT => name
                .text
                .chars()
                .next()
                .is_some_and(|c| c.is_ascii_alphabetic() || c == '/'),
            _ => false,
        }
    }
}
