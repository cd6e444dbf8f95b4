//! # Inline Recognition Helpers
//!
//! Inline markup is recognised token by token inside the parser state
//! machine, with one token of lookbehind and lookahead. The pieces that do
//! not need the open-structure stack live here:
//!
//! - **`emphasis`**: classifying `*`/`_` runs and their flanking rules
//! - **`link`**: the staged buffer that recognises `[text](address "title")`
//!
//! Code spans need the stack (their closing run must equal the opener's
//! metadata), so they are handled directly by the parser.

pub mod emphasis;
pub mod link;

pub use emphasis::EmphasisRun;
pub use link::{LinkCandidate, LinkStage};
