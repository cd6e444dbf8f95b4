//! # Rendering
//!
//! Walks a finished structure forest depth-first and emits HTML.
//!
//! ## Modules
//!
//! - **`escape`**: minimal, entity-preserving and attribute escaping
//! - **`page`**: `Page`, the standalone document wrapper
//!
//! ## Escaping
//!
//! - TEXT uses [`escape_text`], which leaves `&name;` entities alone
//! - CODE, CODEBLOCK and link text use [`escape_minimal`]
//! - HTML blocks are emitted verbatim
//! - href, src, alt and title values use [`escape_attribute`]

pub mod escape;
pub mod page;

pub use escape::{escape_attribute, escape_minimal, escape_text};
pub use page::Page;

use crate::error::RenderError;
use crate::parsing::{Content, LinkTarget, Structure, StructureKind};

/// Render top-level structures to HTML, concatenated in order.
pub fn render(structures: &[Structure]) -> Result<String, RenderError> {
    let mut out = String::new();
    for structure in structures {
        render_into(&mut out, structure)?;
    }
    Ok(out)
}

fn render_into(out: &mut String, structure: &Structure) -> Result<(), RenderError> {
    match structure.kind {
        StructureKind::Root => return Err(RenderError::UnexpectedRoot),
        StructureKind::HorizontalRule => out.push_str("<hr />"),
        StructureKind::LineBreak => out.push_str("<br />"),
        StructureKind::Text => match &structure.content {
            Content::Text(text) => out.push_str(&escape_text(text)),
            _ => return Err(RenderError::MissingContent(StructureKind::Text)),
        },
        StructureKind::Html => out.push_str(&leaf_text(structure)?),
        StructureKind::Code => {
            out.push_str("<code>");
            out.push_str(&escape_minimal(&leaf_text(structure)?));
            out.push_str("</code>");
        }
        StructureKind::Codeblock => {
            out.push_str("<pre><code>");
            out.push_str(&escape_minimal(&leaf_text(structure)?));
            out.push_str("</code></pre>");
        }
        StructureKind::Link => {
            let text = leaf_text(structure)?;
            let target = structure.link.clone().unwrap_or_default();
            out.push_str(&format!("<a href=\"{}\"", escape_attribute(&target.address)));
            push_title(out, &target);
            out.push('>');
            out.push_str(&escape_minimal(&text));
            out.push_str("</a>");
        }
        StructureKind::Image => {
            let alt = leaf_text(structure)?;
            let target = structure.link.clone().unwrap_or_default();
            out.push_str(&format!(
                "<img src=\"{}\" alt=\"{}\"",
                escape_attribute(&target.address),
                escape_attribute(&alt)
            ));
            push_title(out, &target);
            out.push_str(" />");
        }
        kind => {
            let Content::Children(children) = &structure.content else {
                return Err(RenderError::MissingContent(kind));
            };
            out.push_str(&open_tag(structure));
            for child in children {
                render_into(out, child)?;
            }
            out.push_str(&close_tag(kind));
        }
    }
    Ok(())
}

fn push_title(out: &mut String, target: &LinkTarget) {
    if let Some(title) = &target.title {
        out.push_str(&format!(" title=\"{}\"", escape_attribute(title)));
    }
}

/// Raw text of a structure whose children may only be TEXT.
fn leaf_text(structure: &Structure) -> Result<String, RenderError> {
    let Content::Children(children) = &structure.content else {
        return Err(RenderError::MissingContent(structure.kind));
    };
    let mut text = String::new();
    for child in children {
        match child.as_text() {
            Some(part) if child.kind == StructureKind::Text => text.push_str(part),
            _ => {
                return Err(RenderError::UnexpectedChild {
                    parent: structure.kind,
                    child: child.kind,
                });
            }
        }
    }
    Ok(text)
}

fn open_tag(structure: &Structure) -> String {
    match structure.kind {
        StructureKind::OrderedList => match ordered_list_start(structure) {
            Some(start) if start != 1 => format!("<ol start=\"{start}\">"),
            _ => "<ol>".to_string(),
        },
        kind => format!("<{}>", tag_name(kind)),
    }
}

fn close_tag(kind: StructureKind) -> String {
    format!("</{}>", tag_name(kind))
}

fn tag_name(kind: StructureKind) -> &'static str {
    match kind {
        StructureKind::Heading(1) => "h1",
        StructureKind::Heading(2) => "h2",
        StructureKind::Heading(3) => "h3",
        StructureKind::Heading(4) => "h4",
        StructureKind::Heading(5) => "h5",
        StructureKind::Heading(_) => "h6",
        StructureKind::Paragraph => "p",
        StructureKind::Blockquote => "blockquote",
        StructureKind::Emphasis => "em",
        StructureKind::Strong => "strong",
        StructureKind::OrderedList => "ol",
        StructureKind::UnorderedList => "ul",
        _ => "li",
    }
}

/// The number that opened an ordered list, kept as its metadata.
fn ordered_list_start(structure: &Structure) -> Option<u64> {
    structure.metadata.first()?.text.parse().ok()
}
