//! Roots
use super::*;

pub const SQRT_DOC: &str = "Build a square root, or an n-th root with an optional index argument";

/// Get the `\sqrt` command.
pub fn get_sqrt() -> BuiltIn {
    BuiltIn::new(sqrt_handler).with_doc(SQRT_DOC)
}

/// `\sqrt{x}` builds a [sqrt](NodeType::Sqrt) node with the radicand as its only child.
/// `\sqrt[n]{x}` builds a [root](NodeType::Root) node.
fn sqrt_handler(tokens: &[Token], cursor: &mut usize, parser: &mut Parser) -> Option<NodeId> {
    *cursor = 1;
    let index = read_optional_argument(tokens, cursor, parser);
    let radicand = read_argument(tokens, cursor, parser, 1);
    let attrs = Attrs {
        location: consumed_location(tokens, *cursor),
        original_text: Some(tokens[0].text.clone()),
        ..Default::default()
    };
    Some(match index {
        None => parser.builder().list(NodeType::Sqrt, vec![radicand], attrs),
        Some(index) => parser.builder().root(index, radicand, attrs),
    })
}
