#![no_main]

use libfuzzer_sys::fuzz_target;
use texmath::token::{lexer, TokenKind};

#[derive(Debug, arbitrary::Arbitrary)]
struct Input {
    source: String,
    strict: bool,
    max_depth: u8,
}

fuzz_target!(|input: Input| {
    let engine = texmath::Engine {
        lexer_options: if input.strict {
            lexer::Options::strict()
        } else {
            Default::default()
        },
        parse_options: texmath::parse::Options {
            max_depth: input.max_depth as usize,
            ..Default::default()
        },
        ..Default::default()
    };
    let num_chars = input.source.chars().count();

    let (tokens, _) = engine.tokenize(&input.source);
    assert_eq!(
        tokens.iter().filter(|t| t.kind == TokenKind::Eof).count(),
        1
    );
    assert_eq!(tokens.last().map(|t| t.kind), Some(TokenKind::Eof));
    for pair in tokens.windows(2) {
        assert!(pair[0].location.end() <= pair[1].location.offset);
    }
    for token in &tokens {
        assert!(token.location.end() <= num_chars);
    }
    if !input.strict {
        assert!(tokens.iter().all(|t| t.kind != TokenKind::Error));
    }

    let (forest, _) = engine.run(&input.source);
    for id in forest.descendants() {
        if let Some(location) = forest[id].location() {
            assert!(location.end() <= num_chars);
        }
        for child in forest[id].children() {
            assert_eq!(forest[child].parent(), Some(id));
        }
    }
});
