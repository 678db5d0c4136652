//! Tokens, source locations and category codes.

mod catcode;
pub mod combine;
pub mod lexer;
pub use catcode::{catcode_of, CatCode, CatCodeFn, DefaultCatCodes};
use std::fmt::Display;

/// Location of a token or AST node in the source.
///
/// Offsets and lengths are measured in characters, not bytes.
/// Lines and columns start at 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SourceLocation {
    /// Number of characters before the start of the location.
    pub offset: usize,
    /// Number of characters covered by the location.
    pub length: usize,
    /// Line of the first character.
    pub line: usize,
    /// Column of the first character.
    pub column: usize,
}

impl SourceLocation {
    pub fn new(offset: usize, length: usize, line: usize, column: usize) -> SourceLocation {
        SourceLocation {
            offset,
            length,
            line,
            column,
        }
    }

    /// Offset of the first character after the location.
    #[inline]
    pub fn end(&self) -> usize {
        self.offset + self.length
    }

    /// The half-open character range covered by the location.
    pub fn span(&self) -> std::ops::Range<usize> {
        self.offset..self.end()
    }

    /// Location that starts at `first` and ends where `last` ends.
    ///
    /// The line and column are those of `first`.
    pub fn merge(first: SourceLocation, last: SourceLocation) -> SourceLocation {
        SourceLocation {
            offset: first.offset,
            length: last.end().saturating_sub(first.offset),
            line: first.line,
            column: first.column,
        }
    }
}

impl Display for SourceLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "line {}, col {}, offset {}, length {}",
            self.line, self.column, self.offset, self.length
        )
    }
}

/// Kind of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum TokenKind {
    /// A run of whitespace characters.
    Whitespace,
    /// A control word like `\frac` or a control symbol like `\{`.
    Command,
    /// A run of letters.
    Identifier,
    /// A run of ASCII digits.
    Number,
    /// One of `+ - * / ^ _ = |`.
    OperatorSymbol,
    LeftBrace,
    RightBrace,
    LeftParen,
    RightParen,
    LeftBracket,
    RightBracket,
    /// A `\left` command fused with its delimiter, e.g. `\left(`.
    CustomDelimiterLeft,
    /// A `\right` command fused with its delimiter, e.g. `\right)`.
    CustomDelimiterRight,
    Verbatim,
    Comment,
    /// A character with the active category code, e.g. `~`.
    ActiveChar,
    /// The end of the input.
    Eof,
    /// A character that the tokenizer could not classify.
    Error,
}

impl TokenKind {
    /// Name of the kind, as used in debug output.
    pub fn name(&self) -> &'static str {
        use TokenKind::*;
        match self {
            Whitespace => "whitespace",
            Command => "command",
            Identifier => "identifier",
            Number => "number",
            OperatorSymbol => "operatorSymbol",
            LeftBrace => "leftBrace",
            RightBrace => "rightBrace",
            LeftParen => "leftParen",
            RightParen => "rightParen",
            LeftBracket => "leftBracket",
            RightBracket => "rightBracket",
            CustomDelimiterLeft => "customDelimiterLeft",
            CustomDelimiterRight => "customDelimiterRight",
            Verbatim => "verbatim",
            Comment => "comment",
            ActiveChar => "activeChar",
            Eof => "eof",
            Error => "error",
        }
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A Texmath token.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Token {
    pub kind: TokenKind,
    /// Text of the token.
    ///
    /// For most tokens this is exactly the source text at the token's location.
    /// The exceptions are control words, whose location also covers the whitespace
    ///     that the tokenizer absorbed after them,
    ///     and compound delimiters, whose text is the concatenation of their parts.
    pub text: String,
    pub location: SourceLocation,
}

impl Token {
    pub fn new<S: Into<String>>(kind: TokenKind, text: S, location: SourceLocation) -> Token {
        Token {
            kind,
            text: text.into(),
            location,
        }
    }

    /// Returns true if this is a command token with the provided name.
    ///
    /// The name includes the escape character, e.g. `\left`.
    #[inline]
    pub fn is_command(&self, name: &str) -> bool {
        self.kind == TokenKind::Command && self.text == name
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}({:?}) @ {}",
            self.kind,
            self.text,
            self.location
        )
    }
}

/// Tokenizes and combines the input using the default options.
///
/// This is the raw token stream that the parser consumes.
/// Diagnostics are discarded; use [lexer::Lexer] directly to keep them.
pub fn tokenize(source: &str) -> Vec<Token> {
    combine::combine(lexer::tokenize(source))
}
