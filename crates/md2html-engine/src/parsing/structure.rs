use std::fmt;

use md2html_syntax::Token;

/// Kind of a node in the structure tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StructureKind {
    /// ATX or setext heading, level 1..=6
    Heading(u8),
    Link,
    Image,
    Paragraph,
    Blockquote,
    Codeblock,
    Emphasis,
    Strong,
    Text,
    HorizontalRule,
    Html,
    LineBreak,
    /// Inline code span
    Code,
    OrderedList,
    UnorderedList,
    ListItem,
    /// Synthetic top of the tree; never rendered
    Root,
}

/// Block or inline context governing which line prefixes and continuation
/// rules apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScopeKind {
    Paragraph,
    Blockquote,
    List,
    Codeblock,
    Html,
    Code,
    Heading,
}

impl StructureKind {
    /// The scope this kind opens for everything nested inside it.
    pub fn defined_scope(self) -> Option<ScopeKind> {
        match self {
            StructureKind::Blockquote => Some(ScopeKind::Blockquote),
            StructureKind::Codeblock => Some(ScopeKind::Codeblock),
            StructureKind::Code => Some(ScopeKind::Code),
            StructureKind::Html => Some(ScopeKind::Html),
            StructureKind::Paragraph => Some(ScopeKind::Paragraph),
            StructureKind::OrderedList | StructureKind::UnorderedList => Some(ScopeKind::List),
            StructureKind::Heading(_) => Some(ScopeKind::Heading),
            _ => None,
        }
    }

    /// Whether a structure of this kind is itself the opener of `scope`.
    ///
    /// Closing `scope` must not stop early at such a structure when it only
    /// inherited the scope from an enclosing opener of the same kind.
    pub fn is_scope_boundary(self, scope: ScopeKind) -> bool {
        matches!(
            (self, scope),
            (StructureKind::Blockquote, ScopeKind::Blockquote)
                | (StructureKind::Paragraph, ScopeKind::Paragraph)
                | (
                    StructureKind::OrderedList | StructureKind::UnorderedList,
                    ScopeKind::List
                )
        )
    }

    /// HR and LINE_BREAK hold no content and are never open.
    pub fn is_leaf(self) -> bool {
        matches!(self, StructureKind::HorizontalRule | StructureKind::LineBreak)
    }

    pub fn is_list(self) -> bool {
        matches!(self, StructureKind::OrderedList | StructureKind::UnorderedList)
    }
}

impl fmt::Display for StructureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StructureKind::Heading(level) => write!(f, "HEADING_{level}"),
            StructureKind::Link => f.write_str("LINK"),
            StructureKind::Image => f.write_str("IMAGE"),
            StructureKind::Paragraph => f.write_str("PARAGRAPH"),
            StructureKind::Blockquote => f.write_str("BLOCKQUOTE"),
            StructureKind::Codeblock => f.write_str("CODEBLOCK"),
            StructureKind::Emphasis => f.write_str("EMPHASIS"),
            StructureKind::Strong => f.write_str("STRONG"),
            StructureKind::Text => f.write_str("TEXT"),
            StructureKind::HorizontalRule => f.write_str("HR"),
            StructureKind::Html => f.write_str("HTML"),
            StructureKind::LineBreak => f.write_str("LINE_BREAK"),
            StructureKind::Code => f.write_str("CODE"),
            StructureKind::OrderedList => f.write_str("ORDERED_LIST"),
            StructureKind::UnorderedList => f.write_str("UNORDERED_LIST"),
            StructureKind::ListItem => f.write_str("LIST_ITEM"),
            StructureKind::Root => f.write_str("ROOT"),
        }
    }
}

/// Content of a finished structure.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Content {
    Children(Vec<Structure>),
    Text(String),
    #[default]
    Empty,
}

/// Destination of a LINK or IMAGE.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LinkTarget {
    pub address: String,
    pub title: Option<String>,
}

/// A finished node of the output tree.
///
/// Equality compares kind, content and link target only; scope and
/// metadata describe how the node was parsed, not what it renders to.
#[derive(Debug, Clone)]
pub struct Structure {
    pub kind: StructureKind,
    pub content: Content,
    pub scope: Option<ScopeKind>,
    /// Delimiter token(s) that opened this structure
    pub metadata: Vec<Token>,
    pub link: Option<LinkTarget>,
}

impl PartialEq for Structure {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind && self.content == other.content && self.link == other.link
    }
}

impl Eq for Structure {}

impl Structure {
    fn bare(kind: StructureKind, content: Content) -> Self {
        Self {
            kind,
            content,
            scope: None,
            metadata: Vec::new(),
            link: None,
        }
    }

    /// A TEXT leaf.
    pub fn text(text: impl Into<String>) -> Self {
        Self::bare(StructureKind::Text, Content::Text(text.into()))
    }

    /// A container holding `children`.
    pub fn container(kind: StructureKind, children: Vec<Structure>) -> Self {
        Self::bare(kind, Content::Children(children))
    }

    /// An HR or LINE_BREAK.
    pub fn leaf(kind: StructureKind) -> Self {
        Self::bare(kind, Content::Empty)
    }

    /// A LINK (or IMAGE) whose sole child is `text`.
    pub fn link(kind: StructureKind, target: LinkTarget, text: impl Into<String>) -> Self {
        Self {
            link: Some(target),
            ..Self::container(kind, vec![Self::text(text)])
        }
    }

    /// Children of a container, empty for leaves and TEXT.
    pub fn children(&self) -> &[Structure] {
        match &self.content {
            Content::Children(children) => children,
            _ => &[],
        }
    }

    /// String content of a TEXT structure.
    pub fn as_text(&self) -> Option<&str> {
        match &self.content {
            Content::Text(text) => Some(text),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use md2html_syntax::TokenKind;

    #[test]
    fn scope_of_block_kinds() {
        assert_eq!(
            StructureKind::UnorderedList.defined_scope(),
            Some(ScopeKind::List)
        );
        assert_eq!(
            StructureKind::Heading(3).defined_scope(),
            Some(ScopeKind::Heading)
        );
        assert_eq!(StructureKind::Emphasis.defined_scope(), None);
        assert_eq!(StructureKind::ListItem.defined_scope(), None);
    }

    #[test]
    fn scope_boundaries() {
        assert!(StructureKind::Blockquote.is_scope_boundary(ScopeKind::Blockquote));
        assert!(StructureKind::OrderedList.is_scope_boundary(ScopeKind::List));
        assert!(!StructureKind::ListItem.is_scope_boundary(ScopeKind::List));
        assert!(!StructureKind::Codeblock.is_scope_boundary(ScopeKind::Codeblock));
    }

    #[test]
    fn equality_ignores_scope_and_metadata() {
        let mut parsed = Structure::container(StructureKind::Emphasis, vec![Structure::text("a")]);
        parsed.scope = Some(ScopeKind::Paragraph);
        parsed.metadata = vec![Token::new(TokenKind::ASTERISK, "*")];

        assert_eq!(
            parsed,
            Structure::container(StructureKind::Emphasis, vec![Structure::text("a")])
        );
    }

    #[test]
    fn display_names() {
        assert_eq!(StructureKind::Heading(2).to_string(), "HEADING_2");
        assert_eq!(StructureKind::LineBreak.to_string(), "LINE_BREAK");
    }
}
