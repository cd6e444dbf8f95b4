use std::mem;

use md2html_syntax::{Token, TokenKind, detokenize};

use crate::parsing::LinkTarget;

/// Progress through `[text](address)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LinkStage {
    #[default]
    None,
    /// After `[`
    InText,
    /// After `]`; only `(` may follow
    TextDone,
    /// After `(`
    InAddress,
}

/// Buffers a link while it is being recognised.
///
/// Every token also goes to the parser's pending buffer, so abandoning a
/// candidate leaves the source characters as plain text. Completing one
/// truncates the pending buffer back to `cut`.
#[derive(Debug, Default)]
pub struct LinkCandidate {
    pub stage: LinkStage,
    pub text: Vec<Token>,
    pub address: Vec<Token>,
    /// Pending buffer length where the link starts
    pub cut: usize,
    /// Preceded by `!`
    pub image: bool,
}

impl LinkCandidate {
    /// Start a candidate at `[`.
    pub fn begin(cut: usize, image: bool) -> Self {
        Self {
            stage: LinkStage::InText,
            cut,
            image,
            ..Self::default()
        }
    }

    pub fn is_active(&self) -> bool {
        self.stage != LinkStage::None
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Take the candidate, leaving an inactive one behind.
    pub fn take(&mut self) -> Self {
        mem::take(self)
    }

    /// Copy a plain token into whichever part is being buffered.
    pub fn mirror(&mut self, token: &Token) {
        match self.stage {
            LinkStage::InText => self.text.push(token.clone()),
            LinkStage::InAddress => self.address.push(token.clone()),
            LinkStage::None | LinkStage::TextDone => {}
        }
    }

    /// Destination and optional `"title"` from the buffered address.
    pub fn target(&self) -> LinkTarget {
        if let Some(split) = self.address.iter().position(Token::is_space) {
            let (address, rest) = self.address.split_at(split);
            let rest = trim(rest);
            if let [open, title @ .., close] = rest
                && open.kind == TokenKind::DOUBLE_QUOTE
                && close.kind == TokenKind::DOUBLE_QUOTE
            {
                return LinkTarget {
                    address: detokenize(address),
                    title: Some(detokenize(title)),
                };
            }
        }
        LinkTarget {
            address: detokenize(&self.address),
            title: None,
        }
    }
}

fn trim(tokens: &[Token]) -> &[Token] {
    let start = tokens.iter().position(|t| !t.is_space()).unwrap_or(tokens.len());
    let end = tokens.iter().rposition(|t| !t.is_space()).map_or(start, |i| i + 1);
    &tokens[start..end]
}
