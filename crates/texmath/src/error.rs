//! Diagnostics produced while tokenizing and parsing.
//!
//! Nothing in Texmath fails on bad input.
//! The tokenizer and parser always return a best-effort result,
//!     and record what went wrong as [Error] values in an [Accumulator].
//! Callers decide whether the diagnostics matter.

use crate::token::SourceLocation;
use std::cell::RefCell;
use std::rc::Rc;

/// Error encountered when tokenizing or parsing math source.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The tokenizer could not classify a character.
    ///
    /// If `truncated` is true the tokenizer stopped at this character
    ///     and the rest of the input was dropped.
    /// Otherwise an error token was emitted for the character and tokenizing continued.
    #[error("unexpected character {char:?} at {location}")]
    Unscannable {
        char: char,
        location: SourceLocation,
        truncated: bool,
    },

    /// A group opened by a command argument was never closed.
    #[error("unterminated group for `{command}` at {location}")]
    UnterminatedGroup {
        command: String,
        /// Location of the command.
        location: SourceLocation,
        /// Location of the unmatched opening brace.
        open: SourceLocation,
    },

    /// A command reached the end of the input before reading all of its arguments.
    #[error("`{command}` at {location} is missing argument {position}")]
    MissingArgument {
        command: String,
        location: SourceLocation,
        /// 1-based index of the missing argument.
        position: usize,
    },

    /// An argument of a command is nested inside too many other arguments.
    ///
    /// The argument was skipped without being parsed.
    #[error("argument of `{command}` at {location} is nested too deeply")]
    NestingTooDeep {
        command: String,
        location: SourceLocation,
    },
}

impl Error {
    pub fn message(&self) -> String {
        use Error::*;
        match self {
            Unscannable {
                char,
                truncated: true,
                ..
            } => format!["Unexpected character {char:?}; the rest of the input was ignored"],
            Unscannable {
                char,
                truncated: false,
                ..
            } => format!["Unexpected character {char:?}"],
            UnterminatedGroup { command, .. } => {
                format!["The argument to `{command}` is not terminated"]
            }
            MissingArgument { command, .. } => format!["`{command}` is missing an argument"],
            NestingTooDeep { command, .. } => {
                format!["The argument to `{command}` is nested too deeply"]
            }
        }
    }

    /// Location of the source that caused the error.
    pub fn location(&self) -> SourceLocation {
        use Error::*;
        match self {
            Unscannable { location, .. }
            | UnterminatedGroup { location, .. }
            | MissingArgument { location, .. }
            | NestingTooDeep { location, .. } => *location,
        }
    }

    /// Character range of the source that caused the error.
    pub fn main_span(&self) -> std::ops::Range<usize> {
        self.location().span()
    }

    pub fn labels(&self) -> Vec<ErrorLabel> {
        use Error::*;
        match self {
            Unscannable { char, .. } => vec![ErrorLabel {
                span: self.main_span(),
                text: format!["{char:?} does not start any token"],
            }],
            UnterminatedGroup { command, open, .. } => vec![
                ErrorLabel {
                    span: open.span(),
                    text: "this brace is never closed".into(),
                },
                ErrorLabel {
                    span: self.main_span(),
                    text: format!["the group is the argument to `{command}`"],
                },
            ],
            MissingArgument {
                command, position, ..
            } => vec![ErrorLabel {
                span: self.main_span(),
                text: format!["argument {position} of `{command}` should appear after this"],
            }],
            NestingTooDeep { .. } => vec![ErrorLabel {
                span: self.main_span(),
                text: "the argument of this command was skipped".into(),
            }],
        }
    }

    pub fn notes(&self) -> Vec<String> {
        use Error::*;
        match self {
            Unscannable {
                truncated: true, ..
            } => vec!["Tokenize in strict mode to keep scanning after unexpected characters".into()],
            Unscannable { .. } | MissingArgument { .. } => vec![],
            NestingTooDeep { .. } => {
                vec!["The maximum depth can be raised in the parser options".into()]
            }
            UnterminatedGroup { .. } => {
                vec!["Everything after the opening brace was treated as part of the argument".into()]
            }
        }
    }
}

/// Label on an error message.
///
/// A label identifies a particular piece of source code and some
/// information about it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorLabel {
    pub span: std::ops::Range<usize>,
    pub text: String,
}

impl Error {
    #[cfg(feature = "ariadne")]
    pub fn ariadne_report<'a>(
        &self,
        file_name: &'a str,
    ) -> ariadne::Report<'static, (&'a str, std::ops::Range<usize>)> {
        let mut report =
            ariadne::Report::build(ariadne::ReportKind::Error, (file_name, self.main_span()))
                .with_message(self.message());
        let mut color = ariadne::Color::BrightRed;
        for label in self.labels() {
            report = report.with_label(
                ariadne::Label::new((file_name, label.span))
                    .with_message(label.text)
                    .with_color(color),
            );
            color = ariadne::Color::BrightYellow;
        }
        for note in self.notes() {
            report = report.with_note(note);
        }
        report.finish()
    }
}

/// Shared collection of errors.
///
/// Cloning an accumulator returns a handle to the same collection,
///     so the tokenizer and the parser can both write to one accumulator.
#[derive(Debug, Default, Clone)]
pub struct Accumulator(Rc<RefCell<Vec<Error>>>);

impl Accumulator {
    pub fn add(&self, err: Error) {
        log::debug!("recorded error: {err}");
        self.0.borrow_mut().push(err);
    }

    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Removes and returns all of the accumulated errors.
    pub fn take(&self) -> Vec<Error> {
        std::mem::take(&mut *self.0.borrow_mut())
    }

    /// Returns an error if any errors have been accumulated.
    pub fn check(&self) -> Result<(), Vec<Error>> {
        let errs = self.take();
        if errs.is_empty() {
            Ok(())
        } else {
            Err(errs)
        }
    }
}
