//! # Texmath
//!
//! This crate tokenizes and parses LaTeX math source into an abstract syntax tree.
//! The node types follow KaTeX's parse nodes: `mathord`, `bin`, `rel`, `frac`, and so on.
//!
//! Parsing happens in three stages:
//!
//! 1. The [tokenizer](token::lexer) reads the source string and outputs raw tokens.
//!     Like TeX, it consults a table of category codes to decide what each character does.
//! 1. The [delimiter combiner](token::combine) fuses `\left` and `\right`
//!     with the delimiter that follows them.
//! 1. The [parser](parse) converts the tokens into a [forest](ast::Forest) of nodes.
//!     Commands with arguments, like `\frac`, are handled by [command handlers](command),
//!     and the set of handlers can be extended.
//!
//! None of the stages fail on malformed input.
//! They return a best-effort result and record [errors](error::Error) on the side.
//!
//! ```
//! use texmath::ast::NodeType;
//!
//! let forest = texmath::parse(r"a + \frac{1}{2} = \text{half}");
//! assert_eq!(
//!     forest.root_types(),
//!     vec![
//!         NodeType::Mathord,
//!         NodeType::Bin,
//!         NodeType::Frac,
//!         NodeType::Rel,
//!         NodeType::Text,
//!     ],
//! );
//! ```
//!
//! To keep the diagnostics or to customize the stages, use an [Engine]:
//!
//! ```
//! use texmath::ast::NodeType;
//! use texmath::token::lexer;
//!
//! let engine = texmath::Engine {
//!     lexer_options: lexer::Options::strict(),
//!     ..Default::default()
//! };
//! let (forest, errs) = engine.run("a + $b");
//! assert_eq!(forest.root_types(), vec![NodeType::Mathord, NodeType::Bin, NodeType::Mathord]);
//! assert_eq!(errs.len(), 1);
//! ```

pub mod ast;
pub mod command;
pub mod error;
pub mod parse;
pub mod token;

use token::Token;

/// Tokenizes and parses the source using the built-in commands and default options.
///
/// Diagnostics are discarded.
pub fn parse(source: &str) -> ast::Forest {
    Engine::default().run(source).0
}

/// Bundle of options and commands for running all of the stages.
#[derive(Debug, Clone, Default)]
pub struct Engine {
    pub lexer_options: token::lexer::Options,
    pub parse_options: parse::Options,
    /// Command handlers used by the parser.
    pub commands: command::Map,
}

impl Engine {
    /// Tokenizes the source and combines delimiters,
    ///     recording diagnostics in the provided accumulator.
    pub fn tokenize_with_errs(&self, source: &str, errs: &error::Accumulator) -> Vec<Token> {
        let raw: Vec<Token> =
            token::lexer::Lexer::new(source, self.lexer_options, errs.clone()).collect();
        token::combine::combine(raw)
    }

    /// Tokenizes the source and combines delimiters.
    pub fn tokenize(&self, source: &str) -> (Vec<Token>, Vec<error::Error>) {
        let errs: error::Accumulator = Default::default();
        let tokens = self.tokenize_with_errs(source, &errs);
        (tokens, errs.take())
    }

    /// Runs all of the stages on the source.
    ///
    /// Returns the forest and every diagnostic recorded along the way.
    pub fn run(&self, source: &str) -> (ast::Forest, Vec<error::Error>) {
        let errs: error::Accumulator = Default::default();
        let tokens = self.tokenize_with_errs(source, &errs);
        let forest =
            parse::Parser::with_errs(&self.commands, self.parse_options, errs.clone())
                .parse(&tokens);
        (forest, errs.take())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ast::{Mode, NodeType, SourceFormat};

    #[test]
    fn parse_discards_diagnostics() {
        let forest = parse(r"a \frac{b}");
        assert_eq!(forest.root_types(), vec![NodeType::Mathord, NodeType::Frac]);
    }

    #[test]
    fn run_collects_diagnostics_from_every_stage() {
        let engine = Engine {
            lexer_options: token::lexer::Options::strict(),
            ..Default::default()
        };
        let (forest, errs) = engine.run(r"\frac{a} $");
        assert_eq!(forest.root_types(), vec![NodeType::Frac]);
        assert_eq!(errs.len(), 2);
        assert!(matches!(errs[0], error::Error::Unscannable { truncated: false, .. }));
        assert!(matches!(errs[1], error::Error::MissingArgument { position: 2, .. }));
    }

    #[test]
    fn engine_options() {
        let engine = Engine {
            parse_options: parse::Options {
                mode: Mode::Text,
                source_format: SourceFormat::Asciimath,
                ..Default::default()
            },
            commands: command::Map::empty(),
            ..Default::default()
        };
        let (forest, errs) = engine.run(r"\frac{a}");
        assert!(errs.is_empty());
        assert_eq!(forest.len(), 4);
        let first = &forest[forest.roots()[0]];
        assert_eq!(first.node_type(), NodeType::Textord);
        assert_eq!(first.mode(), Mode::Text);
        assert_eq!(first.source_format(), SourceFormat::Asciimath);
    }

    #[test]
    fn tokenize_combines_delimiters() {
        let (tokens, errs) = Engine::default().tokenize(r"\left\{ x \right\}");
        assert!(errs.is_empty());
        assert_eq!(tokens[0].text, r"\left{");
        assert_eq!(tokens.last().map(|t| t.kind), Some(token::TokenKind::Eof));
    }

    static FRAGMENTS: [&str; 36] = [
        "a", "xy", "42", "+", "=", "<", " ", "\n", "\t", "{", "}", "[", "]", "(", ")", "~",
        "%", "$", "#", "&", "é", "😀", "\\", r"\,", r"\{", r"\}", r"\alpha", r"\text",
        r"\frac", r"\dfrac", r"\binom", r"\sqrt", r"\left", r"\right", r"\left(", r"\right)",
    ];

    fn random_source(rng: &mut rand::rngs::StdRng) -> String {
        use rand::Rng;
        let len = rng.gen_range(0..60);
        (0..len)
            .map(|_| FRAGMENTS[rng.gen_range(0..FRAGMENTS.len())])
            .collect()
    }

    /// Runs the engine and checks the properties that hold for every input.
    fn check_invariants(engine: &Engine, source: &str) {
        let num_chars = source.chars().count();
        let (tokens, _) = engine.tokenize(source);
        assert_eq!(
            tokens.iter().filter(|t| t.kind == token::TokenKind::Eof).count(),
            1,
            "{source:?}"
        );
        assert_eq!(tokens.last().map(|t| t.kind), Some(token::TokenKind::Eof));
        for pair in tokens.windows(2) {
            assert!(pair[0].location.end() <= pair[1].location.offset, "{source:?}");
        }
        for t in &tokens {
            assert!(t.location.end() <= num_chars, "{t} in {source:?}");
        }
        if engine.lexer_options.on_unscannable == token::lexer::Unscannable::Truncate {
            assert!(tokens.iter().all(|t| t.kind != token::TokenKind::Error));
        }

        let (forest, _) = engine.run(source);
        for id in forest.descendants() {
            let node = &forest[id];
            if let Some(location) = node.location() {
                assert!(location.end() <= num_chars, "{id:?} in {source:?}");
            }
            for child in node.children() {
                assert_eq!(forest[child].parent(), Some(id), "{source:?}");
            }
        }
        for root in forest.roots() {
            assert_eq!(forest[*root].parent(), None);
        }
    }

    #[test]
    fn invariants_hold_for_random_input() {
        use rand::SeedableRng;
        let mut rng = rand::rngs::StdRng::seed_from_u64(1729);
        let strict = Engine {
            lexer_options: token::lexer::Options::strict(),
            ..Default::default()
        };
        for _ in 0..2000 {
            let source = random_source(&mut rng);
            check_invariants(&Engine::default(), &source);
            check_invariants(&strict, &source);
        }
    }

    #[test]
    fn invariants_hold_for_deeply_nested_input() {
        let source = format!("{}x{} + $", r"\frac{".repeat(3000), "}{y}".repeat(2999));
        check_invariants(&Engine::default(), &source);
        check_invariants(
            &Engine {
                lexer_options: token::lexer::Options::strict(),
                ..Default::default()
            },
            &source,
        );
    }

    #[cfg(feature = "serde")]
    #[test]
    fn forest_serializes_to_json() {
        let forest = parse(r"\frac{a}{b}");
        let json = serde_json::to_value(&forest).unwrap();
        assert_eq!(json["nodes"].as_array().map(Vec::len), Some(forest.len()));
        let round_trip: ast::Forest = serde_json::from_value(json).unwrap();
        assert_eq!(round_trip, forest);
    }
}
