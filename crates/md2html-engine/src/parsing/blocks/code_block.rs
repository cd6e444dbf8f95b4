use md2html_syntax::Token;

use super::strip_columns;

/// Indented code block with owned indent width.
///
/// Code blocks are raw zones: lines inside are copied verbatim.
pub struct CodeBlock;

impl CodeBlock {
    /// Columns of indentation that open and continue a code block.
    pub const INDENT: usize = 4;

    /// Strip one code-block indent, keeping anything deeper as content.
    pub fn strip_indent(tokens: &mut Vec<Token>) -> bool {
        strip_columns(tokens, Self::INDENT)
    }
}
