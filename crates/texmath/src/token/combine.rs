//! Second tokenizer pass that fuses `\left` and `\right` with their delimiters.
//!
//! A `\left` command immediately followed by an opening delimiter token
//!     becomes a single [TokenKind::CustomDelimiterLeft] token, e.g. `\left(`.
//! The same happens for `\right` and closing delimiters.
//! The pass is greedy and does not backtrack: each `\left` or `\right` is
//!     combined with at most one following token.
//! The escaped braces `\{` and `\}` are accepted as delimiters and contribute
//!     the bare brace to the combined text, so `\left\{` becomes `\left{`.

use super::{SourceLocation, Token, TokenKind};

const LEFT: &str = r"\left";
const RIGHT: &str = r"\right";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Left,
    Right,
}

impl Side {
    fn of(token: &Token) -> Option<Side> {
        if token.is_command(LEFT) {
            Some(Side::Left)
        } else if token.is_command(RIGHT) {
            Some(Side::Right)
        } else {
            None
        }
    }

    fn kind(self) -> TokenKind {
        match self {
            Side::Left => TokenKind::CustomDelimiterLeft,
            Side::Right => TokenKind::CustomDelimiterRight,
        }
    }

    /// Returns the delimiter text contributed by the token, if it is a valid delimiter for this side.
    fn delimiter(self, token: &Token) -> Option<&str> {
        use TokenKind::*;
        match (self, token.kind) {
            (Side::Left, LeftParen | LeftBracket | LeftBrace)
            | (Side::Right, RightParen | RightBracket | RightBrace)
            | (_, OperatorSymbol) => Some(token.text.as_str()),
            (Side::Left, Command) if token.text == r"\{" => Some("{"),
            (Side::Right, Command) if token.text == r"\}" => Some("}"),
            _ => None,
        }
    }
}

/// Combines `\left`/`\right` commands with the delimiter tokens that follow them.
pub fn combine(tokens: Vec<Token>) -> Vec<Token> {
    let mut result = Vec::with_capacity(tokens.len());
    let mut iter = tokens.into_iter().peekable();
    while let Some(token) = iter.next() {
        let Some(side) = Side::of(&token) else {
            result.push(token);
            continue;
        };
        let combined = iter.peek().and_then(|next| {
            side.delimiter(next).map(|delimiter| {
                Token::new(
                    side.kind(),
                    format!["{}{}", token.text, delimiter],
                    SourceLocation::merge(token.location, next.location),
                )
            })
        });
        match combined {
            None => result.push(token),
            Some(combined) => {
                log::trace!("combined into {combined}");
                iter.next();
                result.push(combined);
            }
        }
    }
    result
}
