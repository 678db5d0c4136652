//! Category codes and the fixed category code table used by the tokenizer.
//!
//! In TeX every character is assigned a category code that determines its lexical role.
//! TeX allows these codes to be changed at runtime; Texmath does not.
//! Instead there is a single small table: every character has category code [Other]
//! except for the five characters listed in [CatCode::of].
use std::collections::HashMap;

use CatCode::*;

/// A TeX category code.
///
/// The numeric value of each variant is the code TeX uses for it.
/// The Texmath table only assigns [Escape], [BeginGroup], [EndGroup], [Active], [Comment]
///     and [Other].
/// The lexer also honours [Ignored] and [Invalid] when a custom table assigns them;
///     any other code is scanned like [Other].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CatCode {
    Escape = 0,
    BeginGroup = 1,
    EndGroup = 2,
    MathShift = 3,
    AlignmentTab = 4,
    EndOfLine = 5,
    Parameter = 6,
    Superscript = 7,
    Subscript = 8,
    /// Dropped by the lexer.
    Ignored = 9,
    Space = 10,
    Letter = 11,
    #[default]
    Other = 12,
    /// Scanned as a single [`TokenKind::ActiveChar`](super::TokenKind::ActiveChar) token.
    Active = 13,
    /// Starts a comment that runs through the next `\n`.
    Comment = 14,
    /// Never starts a token.
    Invalid = 15,
}

impl CatCode {
    /// Every category code, indexed by its numeric value.
    pub const ALL: [CatCode; 16] = [
        Escape,
        BeginGroup,
        EndGroup,
        MathShift,
        AlignmentTab,
        EndOfLine,
        Parameter,
        Superscript,
        Subscript,
        Ignored,
        Space,
        Letter,
        Other,
        Active,
        Comment,
        Invalid,
    ];
}

impl TryFrom<u8> for CatCode {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, u8> {
        CatCode::ALL.get(value as usize).copied().ok_or(value)
    }
}

impl std::fmt::Display for CatCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?} ({})", *self as u8)
    }
}

impl CatCode {
    /// Returns the category code of a character in the Texmath table.
    ///
    /// | Character | Category code |
    /// |-----------|---------------|
    /// | `\`       | [Escape]      |
    /// | `{`       | [BeginGroup]  |
    /// | `}`       | [EndGroup]    |
    /// | `~`       | [Active]      |
    /// | `%`       | [Comment]     |
    /// | anything else | [Other]   |
    ///
    /// This is a pure lookup and can be called from any thread.
    #[inline]
    pub const fn of(c: char) -> CatCode {
        match c {
            '\\' => Escape,
            '{' => BeginGroup,
            '}' => EndGroup,
            '~' => Active,
            '%' => Comment,
            _ => Other,
        }
    }
}

/// Returns the category code of a character in the Texmath table.
///
/// Equivalent to [CatCode::of].
#[inline]
pub const fn catcode_of(c: char) -> CatCode {
    CatCode::of(c)
}

/// Source of category codes for the tokenizer.
pub trait CatCodeFn {
    fn cat_code(&self, c: char) -> CatCode;
}

/// The fixed Texmath category code table.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultCatCodes;

impl CatCodeFn for DefaultCatCodes {
    #[inline]
    fn cat_code(&self, c: char) -> CatCode {
        CatCode::of(c)
    }
}

impl CatCodeFn for HashMap<char, CatCode> {
    fn cat_code(&self, c: char) -> CatCode {
        self.get(&c).copied().unwrap_or_default()
    }
}
