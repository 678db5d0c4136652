//! Debug serialization of AST nodes.
//!
//! The format is a JSON-like string with the fields `type`, `text`, `body` and `location`,
//!     in that order.
//! The text is omitted if it is absent or empty,
//!     the body if the node has no children,
//!     and the location if it is unknown.
//! Each child in the body starts on a new line indented by two spaces.
//!
//! ```text
//! { "type": "text", "body": [
//!   { "type": "textord", "text": "hello", "location": "line 1, col 7, offset 6, length 5" }
//! ], "location": "line 1, col 1, offset 0, length 5" }
//! ```
//!
//! Text is written verbatim without escaping,
//!     so the output is not always valid JSON.
//! Use the `serde` feature for real JSON.

use super::{Forest, NodeId};
use std::fmt::{self, Display, Write};

/// Value that formats a node of a forest using the debug serialization.
///
/// Returned by [Forest::display].
pub struct NodeDisplay<'a> {
    forest: &'a Forest,
    id: NodeId,
}

impl<'a> NodeDisplay<'a> {
    pub(super) fn new(forest: &'a Forest, id: NodeId) -> NodeDisplay<'a> {
        NodeDisplay { forest, id }
    }
}

impl Display for NodeDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let node = &self.forest[self.id];
        write!(f, r#"{{ "type": "{}""#, node.node_type())?;
        if let Some(text) = node.text() {
            if !text.is_empty() {
                write!(f, r#", "text": "{text}""#)?;
            }
        }
        let children = node.children();
        if !children.is_empty() {
            f.write_str(r#", "body": ["#)?;
            for (i, child) in children.into_iter().enumerate() {
                if i > 0 {
                    f.write_char(',')?;
                }
                write!(f, "\n  {}", self.forest.display(child))?;
            }
            f.write_str("\n]")?;
        }
        if let Some(location) = node.location() {
            write!(f, r#", "location": "{location}""#)?;
        }
        f.write_str(" }")
    }
}
