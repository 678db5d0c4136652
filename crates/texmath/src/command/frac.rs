//! Fractions and binomial coefficients
use super::*;
use crate::ast::{Frac, FracSize};

pub const FRAC_DOC: &str = "Build a fraction from a numerator and a denominator";
pub const DFRAC_DOC: &str = "Build a fraction in display style";
pub const TFRAC_DOC: &str = "Build a fraction in text style";
pub const BINOM_DOC: &str = "Build a binomial coefficient";

/// Get the `\frac` command.
pub fn get_frac() -> BuiltIn {
    BuiltIn::new(frac_handler).with_doc(FRAC_DOC)
}

/// Get the `\dfrac` command.
pub fn get_dfrac() -> BuiltIn {
    BuiltIn::new(dfrac_handler).with_doc(DFRAC_DOC)
}

/// Get the `\tfrac` command.
pub fn get_tfrac() -> BuiltIn {
    BuiltIn::new(tfrac_handler).with_doc(TFRAC_DOC)
}

/// Get the `\binom` command.
pub fn get_binom() -> BuiltIn {
    BuiltIn::new(binom_handler).with_doc(BINOM_DOC)
}

fn frac_handler(tokens: &[Token], cursor: &mut usize, parser: &mut Parser) -> Option<NodeId> {
    build(tokens, cursor, parser, |numerator, denominator| {
        Frac::new(numerator, denominator)
    })
}

fn dfrac_handler(tokens: &[Token], cursor: &mut usize, parser: &mut Parser) -> Option<NodeId> {
    build(tokens, cursor, parser, |numerator, denominator| Frac {
        size: FracSize::Display,
        ..Frac::new(numerator, denominator)
    })
}

fn tfrac_handler(tokens: &[Token], cursor: &mut usize, parser: &mut Parser) -> Option<NodeId> {
    build(tokens, cursor, parser, |numerator, denominator| Frac {
        size: FracSize::Text,
        ..Frac::new(numerator, denominator)
    })
}

fn binom_handler(tokens: &[Token], cursor: &mut usize, parser: &mut Parser) -> Option<NodeId> {
    build(tokens, cursor, parser, |numerator, denominator| Frac {
        has_bar_line: false,
        left_delim: Some("(".into()),
        right_delim: Some(")".into()),
        ..Frac::new(numerator, denominator)
    })
}

fn build(
    tokens: &[Token],
    cursor: &mut usize,
    parser: &mut Parser,
    frac_fn: fn(NodeId, NodeId) -> Frac,
) -> Option<NodeId> {
    *cursor = 1;
    let numerator = read_argument(tokens, cursor, parser, 1);
    let denominator = read_argument(tokens, cursor, parser, 2);
    let attrs = Attrs {
        location: consumed_location(tokens, *cursor),
        original_text: Some(tokens[0].text.clone()),
        ..Default::default()
    };
    Some(parser.builder().frac(frac_fn(numerator, denominator), attrs))
}
