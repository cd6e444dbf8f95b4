//! # Structural Parser
//!
//! Consumes one line of tokens at a time and drives a [`StructureBuilder`].
//!
//! ## Per-line algorithm
//!
//! 1. A blank line closes every open scope.
//! 2. Each open scope, outermost first, strips its line prefix. A scope
//!    whose prefix is missing closes together with everything inside it,
//!    except that blockquotes and list items continue lazily. An item
//!    marker closes everything inside its list and starts the next item.
//! 3. A thematic break or setext underline takes the whole line.
//! 4. Block markers at the start of the line open new structures; with no
//!    scope open, a paragraph opens.
//! 5. What is left is parsed according to the innermost scope.
//!
//! ## Cross-line state
//!
//! Besides the builder, the parser keeps a `ParserState`: the pending
//! escape, whether the previous line was blank, whether the next line joins
//! the current one with a space, and the link being recognised.

use std::mem;

use log::{debug, trace};
use md2html_syntax::{Token, TokenKind, detokenize};

use super::blocks::{
    self, AtxHeading, BlockQuote, CodeBlock, HtmlBlock, List, ListMarker, SetextUnderline,
    ThematicBreak,
};
use super::builder::StructureBuilder;
use super::inline::{EmphasisRun, LinkCandidate, LinkStage};
use super::structure::{ScopeKind, Structure, StructureKind};
use crate::error::ParseError;

/// Outcome of stripping one open scope's prefix from a line.
enum Continuation {
    /// The scope continues; parse the rest
    Continues(Vec<Token>),
    /// A list met an item marker; every scope inside that list ends
    NewItem(ListMarker, Vec<Token>),
    /// The scope ends before this line
    Ends(Vec<Token>),
}

#[derive(Debug, Default)]
struct ParserState {
    escaped: bool,
    last_line_blank: bool,
    /// The last line ended without trailing spaces inside joinable text
    soft_break: bool,
    /// The next line continues the last line's text, so its indentation goes
    trim_indent: bool,
    link: LinkCandidate,
}

/// Line-driven structural parser.
///
/// ```
/// use md2html_engine::parsing::{Parser, Structure, StructureKind};
/// use md2html_syntax::lex;
///
/// let mut parser = Parser::new();
/// parser.parse_line(lex("Hello world.")).unwrap();
/// let structures = parser.finish().unwrap();
///
/// assert_eq!(
///     structures,
///     vec![Structure::container(
///         StructureKind::Paragraph,
///         vec![Structure::text("Hello world.")]
///     )]
/// );
/// ```
#[derive(Debug, Default)]
pub struct Parser {
    tree: StructureBuilder,
    state: ParserState,
}

impl Parser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open scopes, outermost first.
    pub fn scope_hierarchy(&self) -> Vec<ScopeKind> {
        self.tree.scope_hierarchy()
    }

    pub fn parse_line(&mut self, tokens: Vec<Token>) -> Result<(), ParseError> {
        trace!(
            "line {:?} in scopes {:?}",
            detokenize(&tokens),
            self.tree.scope_hierarchy()
        );
        let after_blank = mem::replace(&mut self.state.last_line_blank, false);

        if blocks::is_blank(&tokens) {
            let scopes = self.tree.scope_hierarchy();
            self.finish_scopes(&scopes)?;
            self.state.last_line_blank = true;
            return Ok(());
        }

        let mut tokens = self.continue_scopes(tokens)?;

        if !self.in_raw_zone() {
            if ThematicBreak::matches(&tokens) {
                return self.thematic_break();
            }
            if let Some(level) = SetextUnderline::level(&tokens)
                && self.promote_setext(level, after_blank)?
            {
                return Ok(());
            }
        }

        self.open_blocks(&mut tokens)?;
        self.parse_tokens(tokens)
    }

    /// Close everything still open after the last line.
    pub fn close_document(&mut self) -> Result<(), ParseError> {
        let scopes = self.tree.scope_hierarchy();
        self.finish_scopes(&scopes)?;
        self.tree.finish_all()
    }

    /// Close the document and return its top-level structures.
    pub fn finish(mut self) -> Result<Vec<Structure>, ParseError> {
        self.close_document()?;
        Ok(self.tree.into_structures())
    }

    fn in_raw_zone(&self) -> bool {
        matches!(
            self.tree.current_scope(),
            Some(ScopeKind::Codeblock | ScopeKind::Html | ScopeKind::Code)
        )
    }

    // === Scope continuation ===

    fn continue_scopes(&mut self, mut tokens: Vec<Token>) -> Result<Vec<Token>, ParseError> {
        let scopes = self.tree.scope_hierarchy();

        for (i, &scope) in scopes.iter().enumerate() {
            match continue_scope(tokens, scope) {
                Continuation::Continues(rest) => tokens = rest,
                Continuation::NewItem(marker, line) => {
                    self.finish_scopes(&scopes[i + 1..])?;
                    return self.next_item(marker, line);
                }
                Continuation::Ends(line) => {
                    debug!("line ends {scope:?} scope");
                    self.finish_scopes(&scopes[i..])?;
                    return Ok(line);
                }
            }
        }
        Ok(tokens)
    }

    /// Finish the current item of the innermost open list and open the
    /// next one, returning what follows the marker.
    fn next_item(
        &mut self,
        marker: ListMarker,
        mut tokens: Vec<Token>,
    ) -> Result<Vec<Token>, ParseError> {
        self.finish_until(StructureKind::ListItem)?;
        self.open(StructureKind::ListItem, vec![tokens[0].clone()])?;
        tokens.drain(..marker.token_count());
        Ok(tokens)
    }

    // === Whole-line constructs ===

    fn thematic_break(&mut self) -> Result<(), ParseError> {
        if self.tree.is_open(StructureKind::Paragraph) {
            self.finish_until(StructureKind::Paragraph)?;
        }
        self.open(StructureKind::HorizontalRule, Vec::new())
    }

    /// Turn the open paragraph into a heading. Returns false when there is
    /// no paragraph directly above the underline.
    fn promote_setext(&mut self, level: u8, after_blank: bool) -> Result<bool, ParseError> {
        if after_blank || self.tree.top_kind() != StructureKind::Paragraph {
            return Ok(false);
        }
        debug!("promoting paragraph to setext heading level {level}");
        self.tree.trim_buffer_end();
        self.tree.retag_top(StructureKind::Heading(level));
        self.finish_top()?;
        Ok(true)
    }

    // === Block openers ===

    /// Open block structures for the markers at the start of `tokens`,
    /// removing the markers.
    fn open_blocks(&mut self, tokens: &mut Vec<Token>) -> Result<(), ParseError> {
        loop {
            let scope = self.tree.current_scope();
            if matches!(
                scope,
                Some(
                    ScopeKind::Paragraph
                        | ScopeKind::Codeblock
                        | ScopeKind::Code
                        | ScopeKind::Html
                        | ScopeKind::Heading
                )
            ) {
                return Ok(());
            }

            if let Some(len) = BlockQuote::prefix_len(tokens) {
                self.open(StructureKind::Blockquote, Vec::new())?;
                tokens.drain(..len);
                continue;
            }
            if CodeBlock::strip_indent(tokens) {
                self.open(StructureKind::Codeblock, Vec::new())?;
                return self.open(StructureKind::Text, Vec::new());
            }
            if let Some(marker) = List::marker(tokens) {
                self.open(marker.structure_kind(), vec![tokens[0].clone()])?;
                tokens.drain(..marker.token_count());
                continue;
            }
            if let Some(level) = AtxHeading::level(tokens) {
                let hashes: Vec<Token> = tokens.drain(..2).take(1).collect();
                return self.open(StructureKind::Heading(level), hashes);
            }

            if scope.is_none() {
                if HtmlBlock::starts(tokens) {
                    debug!("opening HTML block");
                    self.open(StructureKind::Html, Vec::new())?;
                    return self.open(StructureKind::Text, Vec::new());
                }
                return self.open(StructureKind::Paragraph, Vec::new());
            }
            return Ok(());
        }
    }

    // === Content ===

    fn parse_tokens(&mut self, tokens: Vec<Token>) -> Result<(), ParseError> {
        match self.tree.current_scope() {
            Some(ScopeKind::Codeblock | ScopeKind::Html) => {
                self.tree.extend(tokens);
                self.tree.push(Token::eol());
                Ok(())
            }
            Some(ScopeKind::Heading) => self.parse_heading(tokens),
            _ => self.parse_inline(tokens),
        }
    }

    fn parse_heading(&mut self, mut tokens: Vec<Token>) -> Result<(), ParseError> {
        let heading = self.tree.top_kind();
        AtxHeading::strip_closing(&mut tokens);
        self.parse_inline(tokens)?;
        self.finish_until(heading)
    }

    fn parse_inline(&mut self, mut tokens: Vec<Token>) -> Result<(), ParseError> {
        let trailing = trim_trailing_spaces(&mut tokens);
        if tokens.is_empty() {
            return Ok(());
        }

        if mem::take(&mut self.state.trim_indent) {
            let indent = tokens.iter().take_while(|t| t.is_space()).count();
            tokens.drain(..indent);
        }
        if mem::take(&mut self.state.soft_break) {
            self.join_lines();
        }

        for i in 0..tokens.len() {
            let mut token = tokens[i].clone();

            if self.tree.current_scope() == Some(ScopeKind::Code) {
                if self.closes_code_span(&token) {
                    self.finish_top()?;
                } else {
                    self.tree.push(token);
                }
                continue;
            }

            if mem::take(&mut self.state.escaped) {
                if token.kind.is_escapable() {
                    let first = token.text.chars().next().map_or(0, char::len_utf8);
                    let rest = token.text.split_off(first);
                    self.push_plain(Token::new(TokenKind::TEXT, token.text));
                    if rest.is_empty() {
                        continue;
                    }
                    token.text = rest;
                } else {
                    self.push_plain(Token::new(TokenKind::TEXT, "\\"));
                }
            }

            let previous = i.checked_sub(1).map(|j| &tokens[j]);
            self.inline_token(token, previous, tokens.get(i + 1))?;
        }

        self.end_line(trailing)
    }

    fn inline_token(
        &mut self,
        token: Token,
        previous: Option<&Token>,
        next: Option<&Token>,
    ) -> Result<(), ParseError> {
        if self.state.link.stage == LinkStage::TextDone && token.kind != TokenKind::LPAREN {
            debug!("abandoning link: no address after link text");
            self.state.link.reset();
        }
        let stage = self.state.link.stage;

        match token.kind {
            TokenKind::BACKSLASH => self.state.escaped = true,
            TokenKind::ASTERISK | TokenKind::UNDERSCORE => {
                return self.delimiter_run(token, previous, next);
            }
            TokenKind::BACKTICK => return self.open(StructureKind::Code, vec![token]),
            TokenKind::LBRACKET if stage != LinkStage::InAddress => {
                let image = self
                    .tree
                    .last_buffered()
                    .is_some_and(|t| t.kind == TokenKind::BANG);
                let cut = self.tree.buffered() - usize::from(image);
                self.state.link = LinkCandidate::begin(cut, image);
                self.tree.push(token);
            }
            TokenKind::RBRACKET if stage == LinkStage::InText => {
                self.state.link.stage = LinkStage::TextDone;
                self.tree.push(token);
            }
            TokenKind::LPAREN if stage == LinkStage::TextDone => {
                let link = &mut self.state.link;
                if link.text.is_empty() && !link.image {
                    link.reset();
                } else {
                    link.stage = LinkStage::InAddress;
                }
                self.tree.push(token);
            }
            TokenKind::RPAREN if stage == LinkStage::InAddress => return self.complete_link(),
            _ => self.push_plain(token),
        }
        Ok(())
    }

    /// `*`/`_` runs close a matching open span, open a new one, or stay text.
    fn delimiter_run(
        &mut self,
        token: Token,
        previous: Option<&Token>,
        next: Option<&Token>,
    ) -> Result<(), ParseError> {
        let Some(kind) = EmphasisRun::strength(&token) else {
            self.push_plain(token);
            return Ok(());
        };

        let matches_opener = self
            .tree
            .delimiter(kind)
            .is_some_and(|opener| opener.text == token.text);
        if matches_opener && EmphasisRun::can_close(previous) {
            self.finish_until(kind)
        } else if EmphasisRun::can_open(next) {
            self.open(kind, vec![token])
        } else {
            self.push_plain(token);
            Ok(())
        }
    }

    fn closes_code_span(&self, token: &Token) -> bool {
        token.kind == TokenKind::BACKTICK
            && self
                .tree
                .delimiter(StructureKind::Code)
                .is_some_and(|opener| opener.text == token.text)
    }

    fn complete_link(&mut self) -> Result<(), ParseError> {
        let candidate = self.state.link.take();
        let kind = if candidate.image {
            StructureKind::Image
        } else {
            StructureKind::Link
        };
        let target = candidate.target();
        debug!("recognised {kind} to {:?}", target.address);

        self.tree.truncate_buffer(candidate.cut);
        self.tree.open(kind, Vec::new())?;
        self.tree.set_link_target(target);
        self.tree.extend(candidate.text);
        self.tree.finish_top()?;
        Ok(())
    }

    /// Trailing-space rules and pending state at the end of a line.
    fn end_line(&mut self, trailing: usize) -> Result<(), ParseError> {
        if mem::take(&mut self.state.escaped) {
            self.push_plain(Token::new(TokenKind::TEXT, "\\"));
        }
        if self.state.link.stage == LinkStage::TextDone {
            self.state.link.reset();
        }

        let scope = self.tree.current_scope();
        let breakable = matches!(
            scope,
            Some(ScopeKind::Paragraph | ScopeKind::Blockquote | ScopeKind::List)
        );
        if trailing >= 2 && breakable {
            self.open(StructureKind::LineBreak, Vec::new())?;
        } else if trailing > 0 {
            self.push_plain(Token::space());
        } else {
            self.state.soft_break = breakable || scope == Some(ScopeKind::Code);
        }
        // Code spans keep the next line's indentation.
        self.state.trim_indent = breakable;
        Ok(())
    }

    /// Separate a continuation line from the previous one.
    fn join_lines(&mut self) {
        let space = Token::space();
        if self.state.link.stage == LinkStage::InText {
            self.state.link.text.push(space.clone());
        }
        self.tree.push(space);
    }

    fn push_plain(&mut self, token: Token) {
        self.state.link.mirror(&token);
        self.tree.push(token);
    }

    // === Stack operations ===
    //
    // Structural changes cancel a pending line join or indent trim, and any structure other
    // than the link itself or raw text abandons a link being recognised.

    fn interrupt(&mut self, keeps_link: bool) {
        self.state.soft_break = false;
        self.state.trim_indent = false;
        if !keeps_link && self.state.link.is_active() {
            debug!("abandoning link: interrupted by a structure change");
            self.state.link.reset();
        }
    }

    fn open(&mut self, kind: StructureKind, metadata: Vec<Token>) -> Result<(), ParseError> {
        self.interrupt(matches!(
            kind,
            StructureKind::Text | StructureKind::Link | StructureKind::Image
        ));
        self.tree.open(kind, metadata)
    }

    fn finish_top(&mut self) -> Result<(), ParseError> {
        self.interrupt(false);
        self.tree.finish_top().map(drop)
    }

    fn finish_until(&mut self, kind: StructureKind) -> Result<(), ParseError> {
        self.interrupt(false);
        self.tree.finish_until(kind)
    }

    fn finish_scopes(&mut self, scopes: &[ScopeKind]) -> Result<(), ParseError> {
        self.interrupt(false);
        self.tree.finish_scopes(scopes)
    }
}

fn continue_scope(mut tokens: Vec<Token>, scope: ScopeKind) -> Continuation {
    match scope {
        ScopeKind::Blockquote => match BlockQuote::prefix_len(&tokens) {
            Some(len) => {
                tokens.drain(..len);
                Continuation::Continues(tokens)
            }
            None if blocks::is_blank(&tokens) => Continuation::Ends(tokens),
            None => Continuation::Continues(tokens),
        },
        ScopeKind::Codeblock => {
            if CodeBlock::strip_indent(&mut tokens) {
                Continuation::Continues(tokens)
            } else {
                Continuation::Ends(tokens)
            }
        }
        ScopeKind::List => continue_list(tokens),
        ScopeKind::Html if blocks::is_blank(&tokens) => Continuation::Ends(tokens),
        ScopeKind::Html | ScopeKind::Paragraph | ScopeKind::Code | ScopeKind::Heading => {
            Continuation::Continues(tokens)
        }
    }
}

fn continue_list(mut tokens: Vec<Token>) -> Continuation {
    if let Some(marker) = List::marker(&tokens) {
        return Continuation::NewItem(marker, tokens);
    }
    if blocks::is_blank(&tokens) {
        return Continuation::Ends(tokens);
    }
    // Unindented lines continue the item lazily.
    List::strip_continuation(&mut tokens);
    Continuation::Continues(tokens)
}

/// Remove trailing SPACE tokens, returning how many columns they spanned.
fn trim_trailing_spaces(tokens: &mut Vec<Token>) -> usize {
    let mut columns = 0;
    while let Some(token) = tokens.pop_if(|t| t.is_space()) {
        columns += token.width();
    }
    columns
}
