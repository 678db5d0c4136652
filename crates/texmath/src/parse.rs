//! The Texmath parser, which converts tokens into an AST forest.
//!
//! The parser makes a single left-to-right pass over the tokens.
//! Whitespace, the end of input token and error tokens are skipped.
//! A command token whose name is registered in the [command::Map] is passed to its handler,
//!     which may consume more tokens.
//! Every other token becomes a leaf node, with a type determined by [classify].
//!
//! Parsing never fails and always terminates:
//!     every step consumes at least one token.

use crate::ast::{self, Attrs, Forest, Mode, NodeId, NodeType, SourceFormat};
use crate::command;
use crate::error;
use crate::token::{Token, TokenKind};

/// Options for the parser.
///
/// The mode and source format are stamped onto every node the parser builds,
///     except for nodes that a command handler builds in a different mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Options {
    pub mode: Mode,
    pub source_format: SourceFormat,
    /// Maximum number of command arguments that may be nested inside each other.
    ///
    /// An argument nested deeper than this is not parsed.
    /// It becomes an [error node](NodeType::Error) and
    ///     [Error::NestingTooDeep](error::Error::NestingTooDeep) is recorded.
    pub max_depth: usize,
}

impl Options {
    pub const DEFAULT_MAX_DEPTH: usize = 128;
}

impl Default for Options {
    fn default() -> Self {
        Options {
            mode: Default::default(),
            source_format: Default::default(),
            max_depth: Options::DEFAULT_MAX_DEPTH,
        }
    }
}

/// Parses tokens using the built-in commands and the default options.
pub fn parse(tokens: &[Token]) -> Forest {
    let commands = command::Map::default();
    Parser::new(&commands, Default::default()).parse(tokens)
}

/// Returns the type of the leaf node built for a token with no command handler.
pub fn classify(token: &Token) -> NodeType {
    use TokenKind::*;
    match token.kind {
        Identifier | Number | Verbatim => NodeType::Mathord,
        OperatorSymbol => match token.text.as_str() {
            "+" | "-" | "*" | "/" => NodeType::Bin,
            "=" | "<" | ">" | "<=" | ">=" => NodeType::Rel,
            _ => NodeType::Bin,
        },
        LeftParen | LeftBracket | LeftBrace | CustomDelimiterLeft => NodeType::Open,
        RightParen | RightBracket | RightBrace | CustomDelimiterRight => NodeType::Close,
        Command => NodeType::Textord,
        _ => NodeType::Mathord,
    }
}

/// The Texmath parser.
///
/// A parser builds a single forest.
/// Command handlers receive a mutable reference to the parser,
///     and use it to build nodes, parse nested token slices, and record errors.
pub struct Parser<'a> {
    commands: &'a command::Map,
    builder: ast::Builder,
    errs: error::Accumulator,
    depth: usize,
    max_depth: usize,
}

impl<'a> Parser<'a> {
    pub fn new(commands: &'a command::Map, options: Options) -> Parser<'a> {
        Parser::with_errs(commands, options, Default::default())
    }

    /// Creates a parser that records errors in the provided accumulator.
    pub fn with_errs(
        commands: &'a command::Map,
        options: Options,
        errs: error::Accumulator,
    ) -> Parser<'a> {
        Parser {
            commands,
            builder: ast::Builder::new(options.mode, options.source_format),
            errs,
            depth: 0,
            max_depth: options.max_depth,
        }
    }

    /// Parses the tokens and returns the forest.
    pub fn parse(mut self, tokens: &[Token]) -> Forest {
        let roots = self.parse_slice(tokens);
        log::debug!(
            "parsed {} tokens into {} top-level nodes",
            tokens.len(),
            roots.len()
        );
        self.finish(roots)
    }

    /// Parses a slice of tokens, returning the top-level nodes built.
    ///
    /// The nodes are added to this parser's forest but are not roots of it;
    ///     the caller is expected to adopt them into a composite node.
    /// Command handlers use this to parse arguments.
    pub fn parse_slice(&mut self, tokens: &[Token]) -> Vec<NodeId> {
        let mut nodes = vec![];
        let mut i = 0;
        while let Some(token) = tokens.get(i) {
            if matches!(
                token.kind,
                TokenKind::Whitespace | TokenKind::Eof | TokenKind::Error
            ) {
                i += 1;
                continue;
            }
            if token.kind == TokenKind::Command {
                if let Some(handler) = self.commands.get(&token.text) {
                    let mut cursor = 0;
                    if let Some(node) = handler(&tokens[i..], &mut cursor, self) {
                        nodes.push(node);
                    }
                    debug_assert!(
                        cursor > 0,
                        "the handler for `{}` did not consume any tokens",
                        token.text
                    );
                    i += cursor.max(1);
                    continue;
                }
            }
            let node_type = classify(token);
            log::trace!("{token} => {node_type}");
            nodes.push(self.builder.leaf(node_type, Attrs::from_token(token)));
            i += 1;
        }
        nodes
    }

    /// Parses the body of a group nested one level deeper than the current slice.
    ///
    /// Returns [None] without looking at the tokens if the maximum depth has been reached.
    /// Command handlers use this for the contents of brace and bracket groups.
    pub fn parse_nested(&mut self, tokens: &[Token]) -> Option<Vec<NodeId>> {
        if self.depth >= self.max_depth {
            log::debug!("not parsing a group nested {} levels deep", self.depth + 1);
            return None;
        }
        self.depth += 1;
        let nodes = self.parse_slice(tokens);
        self.depth -= 1;
        Some(nodes)
    }

    /// Number of groups enclosing the slice currently being parsed.
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn builder(&mut self) -> &mut ast::Builder {
        &mut self.builder
    }

    pub fn errs(&self) -> &error::Accumulator {
        &self.errs
    }

    /// The commands available to this parser.
    pub fn commands(&self) -> &'a command::Map {
        self.commands
    }

    /// Finishes parsing, returning a forest with the provided roots.
    pub fn finish(self, roots: Vec<NodeId>) -> Forest {
        self.builder.finish(roots)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token;
    use crate::Engine;
    use NodeType::*;

    fn parse_test(input: &str, want: Vec<NodeType>) {
        let forest = parse(&token::tokenize(input));
        assert_eq!(forest.root_types(), want, "{forest}");
    }

    macro_rules! parse_tests {
        ($( ( $name: ident, $input: expr, $ ( $expected : expr, ) * ), )+) => {
            $(
            #[test]
            fn $name() {
                parse_test($input, vec!( $( $expected ),* ));
            }
            )+
        };
    }

    parse_tests![
        (
            arithmetic,
            "a + b - 3 = 4",
            Mathord,
            Bin,
            Mathord,
            Bin,
            Mathord,
            Rel,
            Mathord,
        ),
        (
            whitespace_is_skipped,
            "a   +    b",
            Mathord,
            Bin,
            Mathord,
        ),
        (
            brackets,
            "(a) [b] {c}",
            Open,
            Mathord,
            Close,
            Open,
            Mathord,
            Close,
            Open,
            Mathord,
            Close,
        ),
        (
            unscannable_input_is_truncated,
            "$ a + b",
        ),
        (
            text_command,
            r"\text{hello}",
            Text,
        ),
        (
            text_command_then_math,
            r"\text{ x } + [ y ]",
            Text,
            Bin,
            Open,
            Mathord,
            Close,
        ),
        (
            active_char,
            "x~y",
            Mathord,
            Mathord,
            Mathord,
        ),
        (
            unregistered_command,
            r"\alpha + \beta",
            Textord,
            Bin,
            Textord,
        ),
        (
            custom_delimiters,
            r"\left( x \right)",
            Open,
            Mathord,
            Close,
        ),
        (
            other_operators_are_binary,
            "a ^ b _ c * d / e | f",
            Mathord,
            Bin,
            Mathord,
            Bin,
            Mathord,
            Bin,
            Mathord,
            Bin,
            Mathord,
            Bin,
            Mathord,
        ),
        (
            control_symbol,
            r"a \, b",
            Mathord,
            Textord,
            Mathord,
        ),
        (
            comments_are_skipped,
            "a % comment\n+ b",
            Mathord,
            Bin,
            Mathord,
        ),
        (
            empty_input,
            "",
        ),
    ];

    #[test]
    fn strict_mode_skips_error_tokens() {
        let engine = Engine {
            lexer_options: token::lexer::Options::strict(),
            ..Default::default()
        };
        let (forest, errs) = engine.run("$ a + b");
        assert_eq!(forest.root_types(), vec![Mathord, Bin, Mathord]);
        assert_eq!(errs.len(), 1);
    }

    #[test]
    fn leaves_carry_token_data() {
        let tokens = token::tokenize(r"x \leq 2");
        let forest = parse(&tokens);
        let leq = &forest[forest.roots()[1]];
        assert_eq!(leq.text(), Some(r"\leq"));
        assert_eq!(leq.original_text(), Some(r"\leq"));
        assert_eq!(leq.location(), Some(tokens[2].location));
        assert_eq!(leq.mode(), Mode::Math);
        assert_eq!(leq.source_format(), SourceFormat::Latex);
        assert!(leq.is_leaf());
        assert_eq!(leq.parent(), None);
    }

    #[test]
    fn options_are_stamped_on_nodes() {
        let commands = command::Map::default();
        let options = Options {
            mode: Mode::Text,
            source_format: SourceFormat::Asciimath,
            ..Default::default()
        };
        let forest = Parser::new(&commands, options).parse(&token::tokenize(r"a \frac{b}{c}"));
        for id in forest.descendants() {
            assert_eq!(forest[id].mode(), Mode::Text);
            assert_eq!(forest[id].source_format(), SourceFormat::Asciimath);
        }
    }

    #[test]
    fn empty_map_parses_commands_as_symbols() {
        let commands = command::Map::empty();
        let forest = Parser::new(&commands, Default::default())
            .parse(&token::tokenize(r"\text{a}"));
        assert_eq!(forest.root_types(), vec![Textord, Open, Mathord, Close]);
    }

    fn always_op(_: &[Token], cursor: &mut usize, parser: &mut Parser) -> Option<NodeId> {
        *cursor += 1;
        Some(parser.builder().leaf(Op, Attrs::text("op")))
    }

    #[test]
    fn registered_handler_is_used() {
        let mut commands = command::Map::default();
        commands.register(r"\sum", always_op);
        commands.register(r"\text", always_op);
        let forest =
            Parser::new(&commands, Default::default()).parse(&token::tokenize(r"\sum \text"));
        assert_eq!(forest.root_types(), vec![Op, Op]);
    }

    fn nothing(_: &[Token], _: &mut usize, _: &mut Parser) -> Option<NodeId> {
        None
    }

    #[test]
    #[cfg(not(debug_assertions))]
    fn handler_that_consumes_nothing_still_advances() {
        let mut commands = command::Map::empty();
        commands.register(r"\stuck", nothing);
        let forest =
            Parser::new(&commands, Default::default()).parse(&token::tokenize(r"\stuck x"));
        assert_eq!(forest.root_types(), vec![Mathord]);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "did not consume any tokens")]
    fn handler_that_consumes_nothing_is_flagged() {
        let mut commands = command::Map::empty();
        commands.register(r"\stuck", nothing);
        Parser::new(&commands, Default::default()).parse(&token::tokenize(r"\stuck x"));
    }

    #[test]
    fn nested_groups_up_to_the_limit_are_parsed() {
        let commands = command::Map::default();
        let options = Options {
            max_depth: 3,
            ..Default::default()
        };
        let errs = error::Accumulator::default();
        let forest = Parser::with_errs(&commands, options, errs.clone())
            .parse(&token::tokenize(r"\sqrt{\sqrt{\sqrt{x}}}"));
        assert!(errs.is_empty(), "{:?}", errs.take());
        assert!(forest.iter().all(|node| node.node_type() != Error));
    }

    #[test]
    fn nested_groups_past_the_limit_are_errors() {
        let commands = command::Map::default();
        let options = Options {
            max_depth: 2,
            ..Default::default()
        };
        let errs = error::Accumulator::default();
        let forest = Parser::with_errs(&commands, options, errs.clone())
            .parse(&token::tokenize(r"\sqrt{\sqrt{\sqrt{x}}} + y"));
        assert_eq!(forest.root_types(), vec![Sqrt, Bin, Mathord]);
        let errs = errs.take();
        assert_eq!(errs.len(), 1);
        assert!(matches!(
            &errs[0],
            error::Error::NestingTooDeep { command, .. } if command == r"\sqrt"
        ));
        assert_eq!(
            forest.iter().filter(|node| node.node_type() == Error).count(),
            1
        );
        assert!(forest.iter().all(|node| node.text() != Some("x")));
    }

    #[test]
    fn round_trip_of_leaves() {
        let source = r"a + 42 = \alpha ( [ ) ] x~y - \left( \right|";
        let forest = parse(&token::tokenize(source));
        for node in forest.iter() {
            let original = node.original_text().unwrap();
            let reparsed = parse(&token::tokenize(original));
            assert_eq!(reparsed.root_types(), vec![node.node_type()], "{original}");
        }
    }
}
