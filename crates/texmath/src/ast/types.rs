//! Tags attached to AST nodes.

use std::fmt::Display;

/// Type of an AST node.
///
/// The set of types follows the parse node types of KaTeX.
/// Every node has exactly one type.
/// The type determines the [shape](super::Shape) of the node:
///     [NodeType::Frac] nodes are always [Shape::Frac](super::Shape::Frac),
///     [NodeType::Root] nodes are always [Shape::Root](super::Shape::Root),
///     and other nodes are leaves or lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum NodeType {
    /// Ordinary math symbol, letter, or number, e.g. `x`, `2`.
    Mathord,
    /// Ordinary text symbol, e.g. the contents of `\text{foo}`.
    Textord,
    /// Binary operator, e.g. `+`.
    Bin,
    /// Relation, e.g. `=`.
    Rel,
    /// Opening delimiter, e.g. `(`.
    Open,
    /// Closing delimiter, e.g. `)`.
    Close,
    /// Punctuation, e.g. `,`.
    Punct,
    Inner,
    /// Large operator, e.g. `\sum`.
    Op,
    /// Spacing command, e.g. `\,`.
    Spacing,
    /// Accent over a base, e.g. `\hat{x}`.
    Accent,
    /// Accent under a base.
    AccentUnder,
    /// Superscript and/or subscript.
    Supsub,
    /// Fraction, e.g. `\frac{a}{b}`.
    Frac,
    /// Generalized fraction.
    Genfrac,
    /// Square root, e.g. `\sqrt{x}`.
    Sqrt,
    /// N-th root, e.g. `\sqrt[3]{x}`.
    Root,
    /// Group of nodes, e.g. `{xyz}`.
    Ordgroup,
    /// Paired delimiters, e.g. `\left( ... \right)`.
    Leftright,
    /// Middle delimiter, e.g. `\middle|`.
    Middle,
    Color,
    /// Font style, e.g. `\mathbb{x}`.
    Styling,
    /// Math style, e.g. `\displaystyle`.
    Sizing,
    Array,
    /// General environment, e.g. `align`.
    Environment,
    /// Text mode group, e.g. `\text{abc}`.
    Text,
    Font,
    /// Equation tag, e.g. `\tag{1}`.
    Tag,
    Operatorname,
    /// Infix command, e.g. `\over`.
    Infix,
    Hbox,
    Kern,
    Rule,
    Phantom,
    Raw,
    Verb,
    /// Source that could not be parsed.
    Error,
}

impl NodeType {
    pub fn name(&self) -> &'static str {
        use NodeType::*;
        match self {
            Mathord => "mathord",
            Textord => "textord",
            Bin => "bin",
            Rel => "rel",
            Open => "open",
            Close => "close",
            Punct => "punct",
            Inner => "inner",
            Op => "op",
            Spacing => "spacing",
            Accent => "accent",
            AccentUnder => "accentUnder",
            Supsub => "supsub",
            Frac => "frac",
            Genfrac => "genfrac",
            Sqrt => "sqrt",
            Root => "root",
            Ordgroup => "ordgroup",
            Leftright => "leftright",
            Middle => "middle",
            Color => "color",
            Styling => "styling",
            Sizing => "sizing",
            Array => "array",
            Environment => "environment",
            Text => "text",
            Font => "font",
            Tag => "tag",
            Operatorname => "operatorname",
            Infix => "infix",
            Hbox => "hbox",
            Kern => "kern",
            Rule => "rule",
            Phantom => "phantom",
            Raw => "raw",
            Verb => "verb",
            Error => "error",
        }
    }
}

impl Display for NodeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Mode in which a node was parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Mode {
    #[default]
    Math,
    Text,
}

impl Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Mode::Math => write!(f, "math"),
            Mode::Text => write!(f, "text"),
        }
    }
}

/// Format of the source a node came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum SourceFormat {
    #[default]
    Latex,
    Asciimath,
}

impl Display for SourceFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceFormat::Latex => write!(f, "latex"),
            SourceFormat::Asciimath => write!(f, "asciimath"),
        }
    }
}
