//! Texmath commands API
//!
//! Most control sequences in math source are symbols like `\alpha` or `\leq`.
//! The parser turns these into leaf nodes without any special handling.
//! Control sequences that take arguments, like `\frac{a}{b}`,
//!     need to read more tokens and build composite nodes.
//! This is done by *command handlers*.
//!
//! A handler is a plain Rust function of type [Handler].
//! It is invoked by the parser when the parser reaches a command token whose name
//!     is registered in the [Map].
//! The handler receives the remaining tokens, starting with the command token itself,
//!     and a cursor that initially points at the command token.
//! It reads as many tokens as it needs, builds nodes using the parser,
//!     and leaves the cursor just after the last token it consumed.
//!
//! Handlers never fail.
//! If the source is malformed a handler builds an [error node](NodeType::Error)
//!     and records a diagnostic in the parser's error accumulator.
//!
//! ## Arguments
//!
//! Most handlers read their arguments using [read_argument].
//! An argument is either a brace group, which is parsed recursively into an
//!     [ordgroup](NodeType::Ordgroup), or a single token.
//! [read_optional_argument] reads a bracket group like the `[3]` in `\sqrt[3]{x}`.

use crate::ast::{Attrs, NodeId, NodeType};
use crate::error::Error;
use crate::parse::Parser;
use crate::token::{SourceLocation, Token, TokenKind};

mod frac;
pub(crate) mod map;
mod sqrt;
mod text;

pub use frac::{get_binom, get_dfrac, get_frac, get_tfrac};
pub use map::Map;
pub use sqrt::get_sqrt;
pub use text::get_text;

/// The Rust type of command handlers.
///
/// The token slice starts at the command token, and the cursor is relative to the slice.
/// The handler must advance the cursor past every token it consumed.
pub type Handler =
    fn(tokens: &[Token], cursor: &mut usize, parser: &mut Parser) -> Option<NodeId>;

/// A built-in command.
///
/// This is a [Handler] together with an optional documentation string.
#[derive(Clone, Copy)]
pub struct BuiltIn {
    handler: Handler,
    doc: Option<&'static str>,
}

impl BuiltIn {
    pub fn new(handler: Handler) -> BuiltIn {
        BuiltIn { handler, doc: None }
    }

    // Set the doc for this built-in command.
    pub fn with_doc(mut self, doc: &'static str) -> BuiltIn {
        self.doc = Some(doc);
        self
    }

    #[inline]
    pub fn handler(&self) -> Handler {
        self.handler
    }

    pub fn doc(&self) -> Option<&'static str> {
        self.doc
    }
}

impl From<Handler> for BuiltIn {
    fn from(handler: Handler) -> Self {
        BuiltIn::new(handler)
    }
}

impl std::fmt::Debug for BuiltIn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BuiltIn")
            .field("handler", &(self.handler as usize))
            .field("doc", &self.doc)
            .finish()
    }
}

/// Advances the cursor past whitespace and comments.
pub fn skip_whitespace(tokens: &[Token], cursor: &mut usize) {
    while let Some(token) = tokens.get(*cursor) {
        match token.kind {
            TokenKind::Whitespace | TokenKind::Comment => *cursor += 1,
            _ => return,
        }
    }
}

/// Returns the index of the token that closes the group opened at `open`.
///
/// The group is opened by a token of kind `open_kind` and closed by a token of kind `close_kind`.
/// Groups of the same kinds nested inside are skipped.
/// Returns [None] if the group is never closed.
pub fn find_closing(
    tokens: &[Token],
    open: usize,
    open_kind: TokenKind,
    close_kind: TokenKind,
) -> Option<usize> {
    let mut depth = 0_usize;
    for (i, token) in tokens.iter().enumerate().skip(open) {
        if token.kind == open_kind {
            depth += 1;
        } else if token.kind == close_kind {
            depth = depth.saturating_sub(1);
            if depth == 0 {
                return Some(i);
            }
        }
    }
    None
}

/// Returns the index one past the last token that is not the end of the input.
fn end_of_input(tokens: &[Token]) -> usize {
    tokens
        .iter()
        .position(|t| t.kind == TokenKind::Eof)
        .unwrap_or(tokens.len())
}

/// Location spanning all of the tokens consumed so far.
pub fn consumed_location(tokens: &[Token], cursor: usize) -> Option<SourceLocation> {
    let first = tokens.first()?;
    let last = tokens.get(cursor.checked_sub(1)?)?;
    Some(SourceLocation::merge(first.location, last.location))
}

/// Parses the body of a group that is an argument of `command`.
///
/// Returns [None] and records [Error::NestingTooDeep] if the parser's maximum depth was reached.
fn parse_group_body(
    parser: &mut Parser,
    command: &Token,
    body: &[Token],
) -> Option<Vec<NodeId>> {
    let nodes = parser.parse_nested(body);
    if nodes.is_none() {
        parser.errs().add(Error::NestingTooDeep {
            command: command.text.clone(),
            location: command.location,
        });
    }
    nodes
}

/// Reads a mandatory argument of the command at the start of the slice.
///
/// The cursor must point just after the command or the previous argument.
/// Whitespace before the argument is skipped.
///
/// - If the next token opens a brace group, the group is parsed recursively
///     and returned as an [ordgroup](NodeType::Ordgroup).
///     If the group is not terminated, everything up to the end of the input is parsed
///     into an [error node](NodeType::Error) and [Error::UnterminatedGroup] is recorded.
///     A group nested deeper than the parser's maximum depth is skipped over
///     and becomes an empty error node.
/// - If the input ends, or the next token closes a group or is an error token,
///     the argument is missing.
///     An empty error node is returned and [Error::MissingArgument] is recorded.
///     Nothing is consumed.
/// - Otherwise the next token alone is the argument.
///
/// `position` is the 1-based index of the argument, used in diagnostics.
pub fn read_argument(
    tokens: &[Token],
    cursor: &mut usize,
    parser: &mut Parser,
    position: usize,
) -> NodeId {
    skip_whitespace(tokens, cursor);
    let command = &tokens[0];
    let next = match tokens.get(*cursor) {
        None => None,
        Some(token) => match token.kind {
            TokenKind::Eof
            | TokenKind::Error
            | TokenKind::RightBrace
            | TokenKind::RightBracket
            | TokenKind::CustomDelimiterRight => None,
            _ => Some(token),
        },
    };
    let Some(next) = next else {
        parser.errs().add(Error::MissingArgument {
            command: command.text.clone(),
            location: command.location,
            position,
        });
        return parser.builder().list(
            NodeType::Error,
            vec![],
            Attrs {
                location: Some(command.location),
                original_text: Some(command.text.clone()),
                ..Default::default()
            },
        );
    };
    if next.kind != TokenKind::LeftBrace {
        let start = *cursor;
        *cursor += 1;
        let mut nodes = parser.parse_slice(&tokens[start..*cursor]);
        if nodes.len() == 1 {
            if let Some(node) = nodes.pop() {
                return node;
            }
        }
        return parser.builder().list(
            NodeType::Ordgroup,
            nodes,
            Attrs {
                location: Some(next.location),
                original_text: Some(next.text.clone()),
                ..Default::default()
            },
        );
    }
    let open = *cursor;
    match find_closing(tokens, open, TokenKind::LeftBrace, TokenKind::RightBrace) {
        Some(close) => {
            *cursor = close + 1;
            let body = parse_group_body(parser, command, &tokens[open + 1..close]);
            let (node_type, body) = match body {
                Some(body) => (NodeType::Ordgroup, body),
                None => (NodeType::Error, vec![]),
            };
            parser.builder().list(
                node_type,
                body,
                Attrs::default().with_location(SourceLocation::merge(
                    tokens[open].location,
                    tokens[close].location,
                )),
            )
        }
        None => {
            let end = end_of_input(tokens).max(open + 1);
            *cursor = end;
            parser.errs().add(Error::UnterminatedGroup {
                command: command.text.clone(),
                location: command.location,
                open: tokens[open].location,
            });
            let body =
                parse_group_body(parser, command, &tokens[open + 1..end]).unwrap_or_default();
            parser.builder().list(
                NodeType::Error,
                body,
                Attrs::default().with_location(SourceLocation::merge(
                    tokens[open].location,
                    tokens[end - 1].location,
                )),
            )
        }
    }
}

/// Reads an optional bracket argument, like the `[3]` in `\sqrt[3]{x}`.
///
/// Returns [None] and consumes nothing if the next token is not an opening bracket,
///     or if the bracket is never closed.
/// Otherwise the contents of the brackets are parsed into an [ordgroup](NodeType::Ordgroup).
pub fn read_optional_argument(
    tokens: &[Token],
    cursor: &mut usize,
    parser: &mut Parser,
) -> Option<NodeId> {
    let mut i = *cursor;
    skip_whitespace(tokens, &mut i);
    if tokens.get(i)?.kind != TokenKind::LeftBracket {
        return None;
    }
    let close = find_closing(tokens, i, TokenKind::LeftBracket, TokenKind::RightBracket)?;
    *cursor = close + 1;
    let body = parse_group_body(parser, &tokens[0], &tokens[i + 1..close]);
    let (node_type, body) = match body {
        Some(body) => (NodeType::Ordgroup, body),
        None => (NodeType::Error, vec![]),
    };
    Some(parser.builder().list(
        node_type,
        body,
        Attrs::default().with_location(SourceLocation::merge(
            tokens[i].location,
            tokens[close].location,
        )),
    ))
}
