//! The Texmath abstract syntax tree.
//!
//! The parser outputs a [Forest]: an ordered sequence of independent trees,
//!     because top-level math is a sequence of atoms rather than a single root.
//!
//! All nodes of a forest are stored in a single flat arena and referenced by [NodeId].
//! Parents own their children.
//! Each node also records the ID of its parent, which is used for upward lookups
//!     like reporting the context of an error.
//! Because the parent is just an index there are no reference cycles.
//!
//! Nodes are created using a [Builder] and are immutable once the builder is finished.
//! The only field that the builder changes after a node is created is the parent,
//!     which is set exactly once when a composite node adopts the child.
//!
//! ```
//! use texmath::ast::{Attrs, Builder, Frac, NodeType, Mode, SourceFormat};
//!
//! let mut builder = Builder::new(Mode::Math, SourceFormat::Latex);
//! let a = builder.leaf(NodeType::Mathord, Attrs::text("a"));
//! let b = builder.leaf(NodeType::Mathord, Attrs::text("b"));
//! let frac = builder.frac(Frac::new(a, b), Attrs::default());
//! let forest = builder.finish(vec![frac]);
//!
//! assert_eq!(forest[a].parent(), Some(frac));
//! assert_eq!(forest.frac(frac).unwrap().denominator, b);
//! ```

mod debug;
mod types;

pub use debug::NodeDisplay;
pub use types::{Mode, NodeType, SourceFormat};

use crate::token::{SourceLocation, Token};
use std::num;

/// Index of a node in a [Forest].
///
/// IDs are only meaningful for the forest (or builder) that created them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeId(num::NonZeroU32);

impl NodeId {
    #[inline]
    fn index(self) -> usize {
        self.0.get() as usize - 1
    }

    fn from_index(index: usize) -> NodeId {
        NodeId(num::NonZeroU32::MIN.saturating_add(index as u32))
    }
}

/// Size at which a fraction is typeset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum FracSize {
    /// The size follows the surrounding style, as for `\frac`.
    #[default]
    Auto,
    /// Always display style, as for `\dfrac`.
    Display,
    /// Always text style, as for `\tfrac`.
    Text,
}

/// A fraction, with its two named parts.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Frac {
    pub numerator: NodeId,
    pub denominator: NodeId,
    /// Whether the fraction bar is drawn. False for binomial coefficients.
    pub has_bar_line: bool,
    pub left_delim: Option<String>,
    pub right_delim: Option<String>,
    /// Thickness of the fraction bar. Never negative.
    pub bar_size: Option<f64>,
    pub size: FracSize,
}

impl Frac {
    /// A regular fraction with a bar line and no delimiters.
    pub fn new(numerator: NodeId, denominator: NodeId) -> Frac {
        Frac {
            numerator,
            denominator,
            has_bar_line: true,
            left_delim: None,
            right_delim: None,
            bar_size: None,
            size: FracSize::Auto,
        }
    }
}

/// Shape of a node.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Shape {
    /// A node without children.
    Leaf,
    /// A node with an ordered list of children.
    List(Vec<NodeId>),
    /// A fraction.
    Frac(Frac),
    /// An n-th root.
    Root { index: NodeId, radicand: NodeId },
}

/// An AST node.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Node {
    node_type: NodeType,
    text: Option<String>,
    mode: Mode,
    source_format: SourceFormat,
    location: Option<SourceLocation>,
    original_text: Option<String>,
    shape: Shape,
    parent: Option<NodeId>,
}

impl Node {
    #[inline]
    pub fn node_type(&self) -> NodeType {
        self.node_type
    }

    /// Value of the node, for simple nodes like symbols and operators.
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    #[inline]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    #[inline]
    pub fn source_format(&self) -> SourceFormat {
        self.source_format
    }

    #[inline]
    pub fn location(&self) -> Option<SourceLocation> {
        self.location
    }

    /// The source text that generated this node.
    pub fn original_text(&self) -> Option<&str> {
        self.original_text.as_deref()
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    #[inline]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// All children of the node.
    ///
    /// For fractions this is the numerator followed by the denominator.
    /// For roots this is the index followed by the radicand.
    pub fn children(&self) -> Vec<NodeId> {
        match &self.shape {
            Shape::Leaf => vec![],
            Shape::List(children) => children.clone(),
            Shape::Frac(frac) => vec![frac.numerator, frac.denominator],
            Shape::Root { index, radicand } => vec![*index, *radicand],
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self.shape, Shape::Leaf)
    }
}

/// Fields shared by all nodes, provided when building a node.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attrs {
    pub text: Option<String>,
    pub location: Option<SourceLocation>,
    pub original_text: Option<String>,
    /// Mode of the node. If [None], the builder's mode is used.
    pub mode: Option<Mode>,
}

impl Attrs {
    /// Attributes of a node built directly from a token.
    pub fn from_token(token: &Token) -> Attrs {
        Attrs {
            text: Some(token.text.clone()),
            location: Some(token.location),
            original_text: Some(token.text.clone()),
            mode: None,
        }
    }

    /// Attributes with just a text value.
    pub fn text<S: Into<String>>(text: S) -> Attrs {
        Attrs {
            text: Some(text.into()),
            ..Default::default()
        }
    }

    pub fn with_location(mut self, location: SourceLocation) -> Attrs {
        self.location = Some(location);
        self
    }

    pub fn with_original_text<S: Into<String>>(mut self, original_text: S) -> Attrs {
        self.original_text = Some(original_text.into());
        self
    }

    pub fn with_mode(mut self, mode: Mode) -> Attrs {
        self.mode = Some(mode);
        self
    }
}

/// Data structure for building a [Forest].
#[derive(Debug, Clone)]
pub struct Builder {
    nodes: Vec<Node>,
    mode: Mode,
    source_format: SourceFormat,
}

impl Default for Builder {
    fn default() -> Self {
        Builder::new(Default::default(), Default::default())
    }
}

impl Builder {
    /// Creates a builder whose nodes have the provided mode and source format by default.
    pub fn new(mode: Mode, source_format: SourceFormat) -> Builder {
        Builder {
            nodes: vec![],
            mode,
            source_format,
        }
    }

    #[inline]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    #[inline]
    pub fn source_format(&self) -> SourceFormat {
        self.source_format
    }

    /// Returns a node that has already been built.
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// Builds a node without children.
    pub fn leaf(&mut self, node_type: NodeType, attrs: Attrs) -> NodeId {
        debug_assert!(
            !matches!(node_type, NodeType::Frac | NodeType::Root),
            "{node_type} nodes have named children"
        );
        self.push(node_type, Shape::Leaf, attrs)
    }

    /// Builds a node with an ordered list of children.
    pub fn list(&mut self, node_type: NodeType, children: Vec<NodeId>, attrs: Attrs) -> NodeId {
        debug_assert!(
            !matches!(node_type, NodeType::Frac | NodeType::Root),
            "{node_type} nodes have named children"
        );
        let id = self.push(node_type, Shape::List(vec![]), attrs);
        for child in &children {
            self.adopt(id, *child);
        }
        self.nodes[id.index()].shape = Shape::List(children);
        id
    }

    /// Builds a fraction node.
    ///
    /// The parent of both the numerator and the denominator is set to the new node.
    pub fn frac(&mut self, frac: Frac, attrs: Attrs) -> NodeId {
        debug_assert!(
            frac.bar_size.map_or(true, |size| size >= 0.0),
            "invalid fraction bar size {:?}",
            frac.bar_size
        );
        let (numerator, denominator) = (frac.numerator, frac.denominator);
        let id = self.push(NodeType::Frac, Shape::Frac(frac), attrs);
        self.adopt(id, numerator);
        self.adopt(id, denominator);
        id
    }

    /// Builds an n-th root node.
    pub fn root(&mut self, index: NodeId, radicand: NodeId, attrs: Attrs) -> NodeId {
        let id = self.push(NodeType::Root, Shape::Root { index, radicand }, attrs);
        self.adopt(id, index);
        self.adopt(id, radicand);
        id
    }

    /// Finishes building, returning a forest with the provided roots.
    pub fn finish(self, roots: Vec<NodeId>) -> Forest {
        debug_assert!(roots.iter().all(|id| self.nodes[id.index()].parent.is_none()));
        Forest {
            nodes: self.nodes,
            roots,
        }
    }

    fn push(&mut self, node_type: NodeType, shape: Shape, attrs: Attrs) -> NodeId {
        let id = NodeId::from_index(self.nodes.len());
        self.nodes.push(Node {
            node_type,
            text: attrs.text,
            mode: attrs.mode.unwrap_or(self.mode),
            source_format: self.source_format,
            location: attrs.location,
            original_text: attrs.original_text,
            shape,
            parent: None,
        });
        id
    }

    fn adopt(&mut self, parent: NodeId, child: NodeId) {
        let child = &mut self.nodes[child.index()];
        debug_assert!(child.parent.is_none(), "a node can only have one parent");
        child.parent = Some(parent);
    }
}

/// An ordered sequence of AST trees.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Forest {
    nodes: Vec<Node>,
    roots: Vec<NodeId>,
}

impl Forest {
    /// The top-level nodes, in source order.
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// The total number of nodes in the forest.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterator over the top-level nodes.
    pub fn iter(&self) -> impl Iterator<Item = &Node> {
        self.roots.iter().map(|id| &self[*id])
    }

    /// The types of the top-level nodes.
    pub fn root_types(&self) -> Vec<NodeType> {
        self.iter().map(Node::node_type).collect()
    }

    /// Returns the fraction data for a fraction node.
    pub fn frac(&self, id: NodeId) -> Option<&Frac> {
        match self.get(id).map(Node::shape) {
            Some(Shape::Frac(frac)) => Some(frac),
            _ => None,
        }
    }

    /// Iterator over the ancestors of a node, starting with its parent.
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.get(id).and_then(Node::parent), |id| {
            self.get(*id).and_then(Node::parent)
        })
    }

    /// Returns the IDs of all nodes in depth-first pre-order.
    pub fn descendants(&self) -> Vec<NodeId> {
        let mut result = Vec::with_capacity(self.nodes.len());
        let mut stack: Vec<NodeId> = self.roots.iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            result.push(id);
            stack.extend(self[id].children().into_iter().rev());
        }
        result
    }

    /// Returns a value that formats a node using the debug serialization.
    pub fn display(&self, id: NodeId) -> NodeDisplay<'_> {
        NodeDisplay::new(self, id)
    }
}

impl std::ops::Index<NodeId> for Forest {
    type Output = Node;

    fn index(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }
}

impl std::fmt::Display for Forest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, id) in self.roots.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", self.display(*id))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ord(builder: &mut Builder, text: &str) -> NodeId {
        builder.leaf(NodeType::Mathord, Attrs::text(text))
    }

    #[test]
    fn frac_sets_parents() {
        let mut builder = Builder::default();
        let x = ord(&mut builder, "x");
        let y = ord(&mut builder, "y");
        let frac = builder.frac(Frac::new(x, y), Attrs::default());
        let forest = builder.finish(vec![frac]);

        assert_eq!(forest[x].parent(), Some(frac));
        assert_eq!(forest[y].parent(), Some(frac));
        assert_eq!(forest[frac].parent(), None);
        assert_eq!(forest[frac].node_type(), NodeType::Frac);
        assert_eq!(forest[frac].children(), vec![x, y]);
        assert_eq!(forest[x].text(), Some("x"));
        assert_eq!(forest[y].text(), Some("y"));
    }

    #[test]
    fn frac_defaults() {
        let mut builder = Builder::default();
        let a = ord(&mut builder, "a");
        let b = ord(&mut builder, "b");
        let id = builder.frac(Frac::new(a, b), Attrs::default());
        let forest = builder.finish(vec![id]);
        let frac = forest.frac(id).unwrap();
        assert!(frac.has_bar_line);
        assert_eq!(frac.left_delim, None);
        assert_eq!(frac.right_delim, None);
        assert_eq!(frac.bar_size, None);
        assert_eq!(frac.size, FracSize::Auto);
        assert_eq!(forest.frac(a), None);
    }

    #[test]
    fn frac_with_delimiters_and_bar_size() {
        let mut builder = Builder::default();
        let n = ord(&mut builder, "n");
        let k = ord(&mut builder, "k");
        let id = builder.frac(
            Frac {
                has_bar_line: false,
                left_delim: Some("(".into()),
                right_delim: Some(")".into()),
                bar_size: Some(0.5),
                ..Frac::new(n, k)
            },
            Attrs::default(),
        );
        let forest = builder.finish(vec![id]);
        let frac = forest.frac(id).unwrap();
        assert!(!frac.has_bar_line);
        assert_eq!(frac.left_delim.as_deref(), Some("("));
        assert_eq!(frac.right_delim.as_deref(), Some(")"));
        assert_eq!(frac.bar_size, Some(0.5));
    }

    fn frac_with_bar_size(bar_size: f64) {
        let mut builder = Builder::default();
        let a = ord(&mut builder, "a");
        let b = ord(&mut builder, "b");
        builder.frac(
            Frac {
                bar_size: Some(bar_size),
                ..Frac::new(a, b)
            },
            Attrs::default(),
        );
    }

    #[test]
    fn zero_bar_size() {
        frac_with_bar_size(0.0);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "invalid fraction bar size")]
    fn negative_bar_size() {
        frac_with_bar_size(-1.0);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "invalid fraction bar size")]
    fn nan_bar_size() {
        frac_with_bar_size(f64::NAN);
    }

    #[test]
    fn nested_fractions() {
        let mut builder = Builder::default();
        let a = ord(&mut builder, "a");
        let b = ord(&mut builder, "b");
        let inner = builder.frac(Frac::new(a, b), Attrs::default());
        let c = ord(&mut builder, "c");
        let outer = builder.frac(Frac::new(inner, c), Attrs::default());
        let forest = builder.finish(vec![outer]);

        assert_eq!(forest[inner].parent(), Some(outer));
        assert_eq!(forest[c].parent(), Some(outer));
        assert_eq!(forest.ancestors(a).collect::<Vec<_>>(), vec![inner, outer]);
        let inner_frac = forest.frac(inner).unwrap();
        assert_eq!(forest[inner_frac.numerator].text(), Some("a"));
        assert_eq!(forest[inner_frac.denominator].text(), Some("b"));
        assert_eq!(forest.descendants(), vec![outer, inner, a, b, c]);
    }

    #[test]
    fn defaults_and_overrides() {
        let mut builder = Builder::new(Mode::Math, SourceFormat::Asciimath);
        let location = SourceLocation::new(5, 1, 1, 6);
        let plain = builder.leaf(NodeType::Mathord, Attrs::default());
        let text = builder.leaf(
            NodeType::Textord,
            Attrs::text("α")
                .with_location(location)
                .with_original_text(r"\alpha")
                .with_mode(Mode::Text),
        );
        let forest = builder.finish(vec![plain, text]);

        assert_eq!(forest[plain].mode(), Mode::Math);
        assert_eq!(forest[plain].source_format(), SourceFormat::Asciimath);
        assert_eq!(forest[plain].location(), None);
        assert_eq!(forest[plain].original_text(), None);
        assert_eq!(forest[text].mode(), Mode::Text);
        assert_eq!(forest[text].location(), Some(location));
        assert_eq!(forest[text].original_text(), Some(r"\alpha"));
        assert_eq!(forest.root_types(), vec![NodeType::Mathord, NodeType::Textord]);
    }

    #[test]
    fn list_sets_parents() {
        let mut builder = Builder::default();
        let children = vec![ord(&mut builder, "a"), ord(&mut builder, "b")];
        let group = builder.list(NodeType::Ordgroup, children.clone(), Attrs::default());
        let forest = builder.finish(vec![group]);
        assert_eq!(forest[group].children(), children);
        for child in children {
            assert_eq!(forest[child].parent(), Some(group));
        }
        assert_eq!(forest.len(), 3);
    }

    #[test]
    fn root_sets_parents() {
        let mut builder = Builder::default();
        let index = ord(&mut builder, "3");
        let radicand = ord(&mut builder, "x");
        let root = builder.root(index, radicand, Attrs::default());
        let forest = builder.finish(vec![root]);
        assert_eq!(
            forest[root].shape(),
            &Shape::Root { index, radicand }
        );
        assert_eq!(forest[index].parent(), Some(root));
        assert_eq!(forest[radicand].parent(), Some(root));
    }
}
