use crate::parsing::StructureKind;

/// Parser contract violations. Any input text parses; these only surface
/// when the open-structure stack is driven into an impossible state.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("cannot finish {0}: no structure of that kind is open")]
    MalformedClose(StructureKind),
    #[error("the document root cannot be finished")]
    RootFinished,
}

/// Structures the renderer cannot turn into markup.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RenderError {
    #[error("the document root reached the renderer")]
    UnexpectedRoot,
    #[error("{0} structure is missing its content")]
    MissingContent(StructureKind),
    #[error("{parent} structure cannot contain {child}")]
    UnexpectedChild {
        parent: StructureKind,
        child: StructureKind,
    },
}

/// Failure anywhere in the text to HTML pipeline.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConvertError {
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),
    #[error("render error: {0}")]
    Render(#[from] RenderError),
}
