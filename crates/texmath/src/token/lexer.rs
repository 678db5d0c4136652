//! The Texmath tokenizer, which reads a string of math source and outputs raw tokens.
//!
//! At each position the tokenizer takes the longest match among the following classes,
//!     tried in this order:
//!
//! 1. A run of whitespace.
//! 1. A control word: an escape character followed by a run of letters.
//!     Following TeX, whitespace after a control word is absorbed into the token.
//!     The absorbed whitespace is part of the token's location but not its text.
//! 1. A control symbol: an escape character followed by exactly one non-letter.
//! 1. A run of letters, giving an identifier.
//! 1. A run of ASCII digits, giving a number.
//! 1. One of the operator characters `+ - * / ^ _ = |`.
//! 1. One of the grouping characters `{ } ( ) [ ]`.
//!
//! Before any of this the category code of the current character is consulted.
//! A comment character discards everything up to and including the next line terminator.
//! An active character becomes a single [TokenKind::ActiveChar] token.
//!
//! If nothing matches the tokenizer either stops or emits an error token and continues,
//!     depending on [Options::on_unscannable].
//! In both cases the stream ends with a single [TokenKind::Eof] token of zero length.

use super::catcode::{CatCode, CatCodeFn, DefaultCatCodes};
use super::{SourceLocation, Token, TokenKind};
use crate::error;

/// What the tokenizer does with a character that starts no token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Unscannable {
    /// Stop tokenizing; the rest of the input is dropped.
    #[default]
    Truncate,
    /// Emit a [TokenKind::Error] token for the character and keep tokenizing.
    ErrorToken,
}

/// Options for the tokenizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Options {
    pub on_unscannable: Unscannable,
}

impl Options {
    /// Options for the strict mode, in which unexpected characters become error tokens.
    pub fn strict() -> Options {
        Options {
            on_unscannable: Unscannable::ErrorToken,
        }
    }
}

/// Tokenizes the input using the default options, discarding diagnostics.
///
/// The result is the raw token stream;
///     compound delimiters have not been combined yet.
pub fn tokenize(source: &str) -> Vec<Token> {
    Lexer::new(source, Options::default(), Default::default()).collect()
}

/// The Texmath tokenizer.
///
/// The tokenizer is an iterator over raw tokens.
/// The last item it returns is always an [TokenKind::Eof] token.
pub struct Lexer<F = DefaultCatCodes> {
    raw_lexer: RawLexer,
    cat_code_fn: F,
    options: Options,
    errs: error::Accumulator,
    finished: bool,
}

impl Lexer<DefaultCatCodes> {
    /// Creates a tokenizer that uses the fixed Texmath category code table.
    pub fn new(source: &str, options: Options, errs: error::Accumulator) -> Self {
        Lexer::with_cat_codes(source, options, errs, DefaultCatCodes)
    }
}

impl<F: CatCodeFn> Lexer<F> {
    /// Creates a tokenizer that uses a custom category code table.
    pub fn with_cat_codes(
        source: &str,
        options: Options,
        errs: error::Accumulator,
        cat_code_fn: F,
    ) -> Self {
        Lexer {
            raw_lexer: RawLexer::new(source),
            cat_code_fn,
            options,
            errs,
            finished: false,
        }
    }

    fn finish(&mut self) -> Token {
        self.finished = true;
        let mark = self.raw_lexer.mark();
        self.raw_lexer.token(TokenKind::Eof, mark, mark.pos)
    }

    /// Consumes the longest match at the cursor.
    ///
    /// Returns the kind of the token and the end of its text,
    ///     or [None] if no class matches, in which case nothing is consumed.
    fn scan(&mut self, c: char) -> Option<(TokenKind, usize)> {
        let raw = &mut self.raw_lexer;
        if c.is_whitespace() {
            raw.advance_while(char::is_whitespace);
            return Some((TokenKind::Whitespace, raw.pos));
        }
        let kind = match self.cat_code_fn.cat_code(c) {
            CatCode::Escape => {
                let n = raw.peek_nth(1)?;
                raw.advance();
                raw.advance();
                if !n.is_alphabetic() {
                    return Some((TokenKind::Command, raw.pos));
                }
                raw.advance_while(char::is_alphabetic);
                let text_end = raw.pos;
                raw.advance_while(char::is_whitespace);
                return Some((TokenKind::Command, text_end));
            }
            CatCode::BeginGroup => TokenKind::LeftBrace,
            CatCode::EndGroup => TokenKind::RightBrace,
            _ => {
                if c.is_alphabetic() {
                    raw.advance_while(char::is_alphabetic);
                    return Some((TokenKind::Identifier, raw.pos));
                }
                if c.is_ascii_digit() {
                    raw.advance_while(|c| c.is_ascii_digit());
                    return Some((TokenKind::Number, raw.pos));
                }
                match c {
                    '+' | '-' | '*' | '/' | '^' | '_' | '=' | '|' => TokenKind::OperatorSymbol,
                    '(' => TokenKind::LeftParen,
                    ')' => TokenKind::RightParen,
                    '[' => TokenKind::LeftBracket,
                    ']' => TokenKind::RightBracket,
                    // Only reachable with a table in which ~ is not active.
                    '~' => TokenKind::ActiveChar,
                    _ => return None,
                }
            }
        };
        raw.advance();
        Some((kind, raw.pos))
    }

    fn skip_comment(&mut self) {
        while let Some(c) = self.raw_lexer.peek() {
            self.raw_lexer.advance();
            if c == '\n' {
                break;
            }
        }
    }
}

impl<F: CatCodeFn> Iterator for Lexer<F> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        if self.finished {
            return None;
        }
        loop {
            let Some(c) = self.raw_lexer.peek() else {
                return Some(self.finish());
            };
            let mark = self.raw_lexer.mark();
            let scanned = match self.cat_code_fn.cat_code(c) {
                CatCode::Comment => {
                    self.skip_comment();
                    continue;
                }
                CatCode::Ignored => {
                    self.raw_lexer.advance();
                    continue;
                }
                CatCode::Active => {
                    self.raw_lexer.advance();
                    Some((TokenKind::ActiveChar, self.raw_lexer.pos))
                }
                CatCode::Invalid => None,
                _ => self.scan(c),
            };
            if let Some((kind, text_end)) = scanned {
                let token = self.raw_lexer.token(kind, mark, text_end);
                log::trace!("scanned {token}");
                return Some(token);
            }
            self.raw_lexer.advance();
            let location = self.raw_lexer.location(mark);
            match self.options.on_unscannable {
                Unscannable::Truncate => {
                    log::warn!("unexpected character {c:?} at {location}; ignoring the rest of the input");
                    self.errs.add(error::Error::Unscannable {
                        char: c,
                        location,
                        truncated: true,
                    });
                    self.raw_lexer.reset(mark);
                    return Some(self.finish());
                }
                Unscannable::ErrorToken => {
                    self.errs.add(error::Error::Unscannable {
                        char: c,
                        location,
                        truncated: false,
                    });
                    return Some(self.raw_lexer.token(TokenKind::Error, mark, self.raw_lexer.pos));
                }
            }
        }
    }
}

/// Cursor position in the raw input.
#[derive(Debug, Clone, Copy)]
struct Mark {
    pos: usize,
    line: usize,
    column: usize,
}

/// Character-level cursor over the input that tracks lines and columns.
struct RawLexer {
    chars: Vec<char>,
    pos: usize,
    line: usize,
    column: usize,
}

impl RawLexer {
    fn new(source: &str) -> RawLexer {
        RawLexer {
            chars: source.chars().collect(),
            pos: 0,
            line: 1,
            column: 1,
        }
    }

    #[inline]
    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    #[inline]
    fn peek_nth(&self, n: usize) -> Option<char> {
        self.chars.get(self.pos + n).copied()
    }

    fn advance(&mut self) {
        if let Some(c) = self.peek() {
            self.pos += 1;
            if c == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
    }

    fn advance_while<P: Fn(char) -> bool>(&mut self, p: P) {
        while let Some(c) = self.peek() {
            if !p(c) {
                break;
            }
            self.advance();
        }
    }

    fn mark(&self) -> Mark {
        Mark {
            pos: self.pos,
            line: self.line,
            column: self.column,
        }
    }

    fn reset(&mut self, mark: Mark) {
        self.pos = mark.pos;
        self.line = mark.line;
        self.column = mark.column;
    }

    /// Location from the mark to the cursor.
    fn location(&self, mark: Mark) -> SourceLocation {
        SourceLocation::new(mark.pos, self.pos - mark.pos, mark.line, mark.column)
    }

    fn token(&self, kind: TokenKind, mark: Mark, text_end: usize) -> Token {
        let text: String = self.chars[mark.pos..text_end].iter().collect();
        Token::new(kind, text, self.location(mark))
    }
}
