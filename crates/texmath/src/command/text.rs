//! The `\text` command
use super::*;
use crate::ast::Mode;

pub const TEXT_DOC: &str = "Typeset the argument as upright text";

/// Get the `\text` command.
pub fn get_text() -> BuiltIn {
    BuiltIn::new(text_handler).with_doc(TEXT_DOC)
}

/// The argument of `\text` must be a brace group.
/// The group is not parsed as math: the literal text of every token inside it,
///     including whitespace, is joined with single spaces into one
///     [textord](NodeType::Textord) node in text mode.
///
/// If the command is not followed by a brace group no node is built
///     and only the command token is consumed.
fn text_handler(tokens: &[Token], cursor: &mut usize, parser: &mut Parser) -> Option<NodeId> {
    let command = &tokens[0];
    let open = *cursor + 1;
    if tokens.get(open).map(|t| t.kind) != Some(TokenKind::LeftBrace) {
        log::trace!("`{}` is not followed by a brace group", command.text);
        *cursor += 1;
        return None;
    }
    let (body, close) =
        match find_closing(tokens, open, TokenKind::LeftBrace, TokenKind::RightBrace) {
            Some(close) => (&tokens[open + 1..close], Some(close)),
            None => {
                let end = end_of_input(tokens).max(open + 1);
                (&tokens[open + 1..end], None)
            }
        };
    let content = body
        .iter()
        .map(|t| t.text.as_str())
        .collect::<Vec<&str>>()
        .join(" ");
    let textord = parser.builder().leaf(
        NodeType::Textord,
        Attrs {
            text: Some(content.clone()),
            location: body.first().map(|t| t.location),
            original_text: Some(content),
            mode: Some(Mode::Text),
        },
    );
    let attrs = Attrs {
        location: Some(command.location),
        original_text: Some(command.text.clone()),
        ..Default::default()
    };
    match close {
        Some(close) => {
            *cursor = close + 1;
            Some(parser.builder().list(NodeType::Text, vec![textord], attrs))
        }
        None => {
            *cursor = open + 1 + body.len();
            parser.errs().add(Error::UnterminatedGroup {
                command: command.text.clone(),
                location: command.location,
                open: tokens[open].location,
            });
            Some(parser.builder().list(NodeType::Error, vec![textord], attrs))
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::ast::{Mode, NodeType};
    use crate::error::Error;
    use crate::Engine;

    #[test]
    fn hello() {
        let forest = crate::parse(r"\text{hello}");
        assert_eq!(
            forest.to_string(),
            r#"{ "type": "text", "body": [
  { "type": "textord", "text": "hello", "location": "line 1, col 7, offset 6, length 5" }
], "location": "line 1, col 1, offset 0, length 5" }"#
        );
        let textord = forest[forest.roots()[0]].children()[0];
        assert_eq!(forest[textord].mode(), Mode::Text);
        assert_eq!(forest[forest.roots()[0]].mode(), Mode::Math);
    }

    #[test]
    fn inner_tokens_are_joined_with_spaces() {
        let forest = crate::parse(r"\text{a+b}");
        let textord = forest[forest.roots()[0]].children()[0];
        assert_eq!(forest[textord].text(), Some("a + b"));
    }

    #[test]
    fn nested_braces_are_kept() {
        let forest = crate::parse(r"\text{a{b}c}d");
        assert_eq!(forest.root_types(), vec![NodeType::Text, NodeType::Mathord]);
        let textord = forest[forest.roots()[0]].children()[0];
        assert_eq!(forest[textord].text(), Some("a { b } c"));
    }

    #[test]
    fn empty_group() {
        let forest = crate::parse(r"\text{}x");
        assert_eq!(forest.root_types(), vec![NodeType::Text, NodeType::Mathord]);
        let textord = forest[forest.roots()[0]].children()[0];
        assert_eq!(forest[textord].text(), Some(""));
        assert_eq!(forest[textord].location(), None);
    }

    #[test]
    fn no_brace_group() {
        let forest = crate::parse(r"\text x");
        assert_eq!(forest.root_types(), vec![NodeType::Mathord]);
    }

    #[test]
    fn unterminated_group() {
        let (forest, errs) = Engine::default().run(r"\text{ab c");
        assert_eq!(forest.root_types(), vec![NodeType::Error]);
        let textord = forest[forest.roots()[0]].children()[0];
        assert_eq!(forest[textord].text(), Some("ab   c"));
        assert_eq!(errs.len(), 1);
        assert!(matches!(&errs[0], Error::UnterminatedGroup { command, .. } if command == r"\text"));
    }
}
