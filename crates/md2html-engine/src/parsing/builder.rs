//! Open-structure stack over an index arena.
//!
//! Every structure, open or finished, lives in one `Vec<Node>`. The open
//! stack holds indices with the root at the bottom; a node's parent index is
//! fixed when it is pushed and only used for scope lookups. Finishing a node
//! appends its index to the parent's children, so ownership stays a tree.

use std::mem;

use md2html_syntax::{Token, detokenize};

use super::structure::{Content, LinkTarget, ScopeKind, Structure, StructureKind};
use crate::error::ParseError;

type NodeId = usize;

const ROOT: NodeId = 0;

#[derive(Debug, Default)]
enum NodeContent {
    Children(Vec<NodeId>),
    Text(String),
    #[default]
    Empty,
}

#[derive(Debug)]
struct Node {
    kind: StructureKind,
    content: NodeContent,
    scope: Option<ScopeKind>,
    metadata: Vec<Token>,
    parent: Option<NodeId>,
    link: Option<LinkTarget>,
}

/// Builds the structure tree from open/finish operations and a pending
/// token buffer.
#[derive(Debug)]
pub struct StructureBuilder {
    nodes: Vec<Node>,
    stack: Vec<NodeId>,
    buffer: Vec<Token>,
}

impl Default for StructureBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl StructureBuilder {
    pub fn new() -> Self {
        let root = Node {
            kind: StructureKind::Root,
            content: NodeContent::Children(Vec::new()),
            scope: None,
            metadata: Vec::new(),
            parent: None,
            link: None,
        };
        Self {
            nodes: vec![root],
            stack: vec![ROOT],
            buffer: Vec::new(),
        }
    }

    fn top(&self) -> NodeId {
        self.stack.last().copied().unwrap_or(ROOT)
    }

    fn top_node(&self) -> &Node {
        &self.nodes[self.top()]
    }

    pub fn top_kind(&self) -> StructureKind {
        self.top_node().kind
    }

    /// Number of open structures above the root.
    pub fn depth(&self) -> usize {
        self.stack.len() - 1
    }

    /// Scope governing the next token: the one the top structure opens, or
    /// the one it inherited.
    pub fn current_scope(&self) -> Option<ScopeKind> {
        let top = self.top_node();
        top.kind.defined_scope().or(top.scope)
    }

    /// Open scopes, outermost first.
    pub fn scope_hierarchy(&self) -> Vec<ScopeKind> {
        let mut scopes = Vec::new();
        let mut id = self.top();

        if let Some(current) = self.current_scope()
            && self.nodes[id].kind.is_scope_boundary(current)
        {
            scopes.push(current);
        }

        while let (Some(scope), Some(parent)) = (self.nodes[id].scope, self.nodes[id].parent) {
            if self.nodes[parent].kind.defined_scope().is_some() {
                scopes.push(scope);
            }
            id = parent;
        }

        scopes.reverse();
        scopes
    }

    pub fn is_open(&self, kind: StructureKind) -> bool {
        self.stack.iter().any(|&id| self.nodes[id].kind == kind)
    }

    /// Opening delimiter of the innermost open structure of `kind`.
    pub fn delimiter(&self, kind: StructureKind) -> Option<&Token> {
        self.stack
            .iter()
            .rev()
            .map(|&id| &self.nodes[id])
            .find(|node| node.kind == kind)
            .and_then(|node| node.metadata.first())
    }

    pub fn push(&mut self, token: Token) {
        self.buffer.push(token);
    }

    pub fn extend(&mut self, tokens: impl IntoIterator<Item = Token>) {
        self.buffer.extend(tokens);
    }

    /// Number of tokens waiting in the pending buffer.
    pub fn buffered(&self) -> usize {
        self.buffer.len()
    }

    pub fn last_buffered(&self) -> Option<&Token> {
        self.buffer.last()
    }

    pub fn truncate_buffer(&mut self, len: usize) {
        self.buffer.truncate(len);
    }

    /// Drop trailing SPACE tokens from the pending buffer.
    pub fn trim_buffer_end(&mut self) {
        while self.buffer.last().is_some_and(Token::is_space) {
            self.buffer.pop();
        }
    }

    /// Push a new structure under the current top.
    ///
    /// TEXT merges into an already open TEXT. Anything else first closes an
    /// open TEXT and flushes the pending buffer into a TEXT child. Leaves are
    /// appended finished; lists open their first item.
    pub fn open(&mut self, kind: StructureKind, metadata: Vec<Token>) -> Result<(), ParseError> {
        let scope = self.current_scope();

        if kind == StructureKind::Text {
            if self.top_kind() != StructureKind::Text {
                self.push_node(kind, NodeContent::Text(String::new()), scope, metadata);
            }
            return Ok(());
        }

        if self.top_kind() == StructureKind::Text {
            self.finish_top()?;
        }
        self.flush_into(self.top());

        if kind.is_leaf() {
            let id = self.new_node(kind, NodeContent::Empty, scope, metadata);
            self.append_child(self.top(), id);
            return Ok(());
        }

        let item_metadata = kind.is_list().then(|| metadata.clone());
        self.push_node(kind, NodeContent::Children(Vec::new()), scope, metadata);
        if let Some(item_metadata) = item_metadata {
            self.push_node(
                StructureKind::ListItem,
                NodeContent::Children(Vec::new()),
                Some(ScopeKind::List),
                item_metadata,
            );
        }
        Ok(())
    }

    /// Attach a destination to the top structure (a LINK or IMAGE).
    pub fn set_link_target(&mut self, target: LinkTarget) {
        let top = self.top();
        self.nodes[top].link = Some(target);
    }

    /// Change the kind of the top structure, used for setext promotion.
    pub fn retag_top(&mut self, kind: StructureKind) {
        let top = self.top();
        self.nodes[top].kind = kind;
    }

    /// Flush the buffer into the top structure and move it into its parent.
    ///
    /// Returns the kind that was finished.
    pub fn finish_top(&mut self) -> Result<StructureKind, ParseError> {
        let id = self.top();
        let parent = self.nodes[id].parent.ok_or(ParseError::RootFinished)?;
        self.flush_into(id);
        self.stack.pop();
        self.append_child(parent, id);
        Ok(self.nodes[id].kind)
    }

    /// Finish structures until one of `kind` has been finished.
    pub fn finish_until(&mut self, kind: StructureKind) -> Result<(), ParseError> {
        if !self.is_open(kind) {
            return Err(ParseError::MalformedClose(kind));
        }
        while self.finish_top()? != kind {}
        Ok(())
    }

    /// Close `scopes` (outermost first), working from the innermost one.
    ///
    /// Structures that merely inherited a scope are finished until the
    /// scope's own opener is on top, which is finished too.
    pub fn finish_scopes(&mut self, scopes: &[ScopeKind]) -> Result<(), ParseError> {
        for &scope in scopes.iter().rev() {
            loop {
                let top = self.top_node();
                if top.scope != Some(scope) || top.kind.is_scope_boundary(scope) {
                    break;
                }
                self.finish_top()?;
            }
            self.finish_top()?;
        }
        Ok(())
    }

    /// Finish everything above the root.
    pub fn finish_all(&mut self) -> Result<(), ParseError> {
        while self.depth() > 0 {
            self.finish_top()?;
        }
        Ok(())
    }

    /// Consume the builder and return the finished top-level structures.
    pub fn into_structures(mut self) -> Vec<Structure> {
        self.flush_into(ROOT);
        match mem::take(&mut self.nodes[ROOT].content) {
            NodeContent::Children(children) => {
                children.into_iter().map(|id| self.detach(id)).collect()
            }
            _ => Vec::new(),
        }
    }

    fn detach(&mut self, id: NodeId) -> Structure {
        let content = match mem::take(&mut self.nodes[id].content) {
            NodeContent::Children(children) => {
                Content::Children(children.into_iter().map(|c| self.detach(c)).collect())
            }
            NodeContent::Text(text) => Content::Text(text),
            NodeContent::Empty => Content::Empty,
        };
        let node = &mut self.nodes[id];
        Structure {
            kind: node.kind,
            content,
            scope: node.scope,
            metadata: mem::take(&mut node.metadata),
            link: node.link.take(),
        }
    }

    fn new_node(
        &mut self,
        kind: StructureKind,
        content: NodeContent,
        scope: Option<ScopeKind>,
        metadata: Vec<Token>,
    ) -> NodeId {
        let id = self.nodes.len();
        self.nodes.push(Node {
            kind,
            content,
            scope,
            metadata,
            parent: Some(self.top()),
            link: None,
        });
        id
    }

    fn push_node(
        &mut self,
        kind: StructureKind,
        content: NodeContent,
        scope: Option<ScopeKind>,
        metadata: Vec<Token>,
    ) {
        let id = self.new_node(kind, content, scope, metadata);
        self.stack.push(id);
    }

    fn append_child(&mut self, parent: NodeId, child: NodeId) {
        if let NodeContent::Children(children) = &mut self.nodes[parent].content {
            children.push(child);
        }
    }

    /// Move the pending buffer into `id`: appended to TEXT content, or as a
    /// new TEXT child of a container.
    fn flush_into(&mut self, id: NodeId) {
        if self.buffer.is_empty() {
            return;
        }
        let text = detokenize(&mem::take(&mut self.buffer));
        if let NodeContent::Text(existing) = &mut self.nodes[id].content {
            existing.push_str(&text);
            return;
        }
        let scope = self.current_scope();
        let child = self.nodes.len();
        self.nodes.push(Node {
            kind: StructureKind::Text,
            content: NodeContent::Text(text),
            scope,
            metadata: Vec::new(),
            parent: Some(id),
            link: None,
        });
        self.append_child(id, child);
    }
}
