use super::{ContentMatch, Fragment, Mark, MarkSet, MarkType, Node, NodeType, Text};
use derivative::Derivative;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt::Debug;

/// This type represents a schema.
///
/// The associated types describe the nodes and marks that may appear in a document, the
/// methods on a schema value act as the registry that resolves type names.
pub trait Schema: Sized + Debug + 'static {
    /// This type represents any of the marks that are valid in the schema.
    type Mark: Mark<Self>;
    /// This type represents any of the mark types that are valid in the schema.
    type MarkType: MarkType<Self>;
    /// This type represents any of the nodes that are valid in the schema.
    type Node: Node<Self>;
    /// This type represents any of the node types that are valid in the schema.
    type NodeType: NodeType<Self>;
    /// This type represents the `ContentMatch` impl
    type ContentMatch: ContentMatch<Self>;

    /// Look up a mark type by its name.
    fn mark_type(&self, name: &str) -> Option<Self::MarkType> {
        Self::MarkType::from_name(name)
    }

    /// Look up a node type by its name.
    fn node_type(&self, name: &str) -> Option<Self::NodeType> {
        Self::NodeType::all()
            .iter()
            .copied()
            .find(|t| t.name() == name)
    }

    /// The smallest valid document of this schema.
    fn empty_doc(&self) -> Self::Node;
}

/// Implemented for model data containers
pub trait NodeImpl<S: Schema> {
    /// Copy the data using the mapping function for child content
    fn copy<F>(&self, map: F) -> Self
    where
        F: FnOnce(&Fragment<S>) -> Fragment<S>;

    /// Get the content of this node
    fn content(&self) -> Option<&Fragment<S>>;
}

/// A simple block node
#[derive(Derivative, Deserialize, Serialize)]
#[derivative(
    Debug(bound = ""),
    Clone(bound = ""),
    Default(bound = ""),
    PartialEq(bound = ""),
    Eq(bound = "")
)]
#[serde(bound = "")]
pub struct Block<S: Schema> {
    /// The content.
    #[serde(default)]
    pub content: Fragment<S>,
}

impl<S: Schema> NodeImpl<S> for Block<S> {
    /// Copies this block, mapping the content
    fn copy<F>(&self, map: F) -> Self
    where
        F: FnOnce(&Fragment<S>) -> Fragment<S>,
    {
        Block {
            content: map(&self.content),
        }
    }

    fn content(&self) -> Option<&Fragment<S>> {
        Some(&self.content)
    }
}

/// A node with attributes
#[derive(Derivative, Deserialize, Serialize)]
#[derivative(
    Debug(bound = "A: Debug"),
    Clone(bound = "A: Clone"),
    Default(bound = "A: Default"),
    PartialEq(bound = "A: PartialEq"),
    Eq(bound = "A: Eq")
)]
#[serde(bound = "A: for<'d> Deserialize<'d> + Serialize + Default")]
pub struct AttrNode<S: Schema, A> {
    /// Attributes
    #[serde(default)]
    pub attrs: A,

    /// The content.
    #[serde(default)]
    pub content: Fragment<S>,
}

impl<S: Schema, A: Clone> NodeImpl<S> for AttrNode<S, A> {
    /// Copies this node, mapping the content
    fn copy<F>(&self, map: F) -> Self
    where
        F: FnOnce(&Fragment<S>) -> Fragment<S>,
    {
        AttrNode {
            content: map(&self.content),
            attrs: self.attrs.clone(),
        }
    }

    fn content(&self) -> Option<&Fragment<S>> {
        Some(&self.content)
    }
}

/// A text node
#[derive(Derivative, Deserialize, Serialize)]
#[derivative(
    Debug(bound = ""),
    Clone(bound = ""),
    PartialEq(bound = ""),
    Eq(bound = "")
)]
#[serde(bound = "")]
pub struct TextNode<S: Schema> {
    /// Marks on this node
    #[serde(default, skip_serializing_if = "HashSet::is_empty")]
    pub marks: MarkSet<S>,
    /// The actual text
    pub text: Text,
}

impl<S: Schema> NodeImpl<S> for TextNode<S> {
    fn copy<F>(&self, _: F) -> Self
    where
        F: FnOnce(&Fragment<S>) -> Fragment<S>,
    {
        self.clone()
    }

    fn content(&self) -> Option<&Fragment<S>> {
        None
    }
}

impl<S: Schema> TextNode<S> {
    /// Check whether the marks are identical
    pub fn same_markup<'o>(&self, other: &'o S::Node) -> Option<&'o TextNode<S>> {
        other.text_node().filter(|x| x.marks == self.marks)
    }

    /// Create a new `TextNode` with the given text
    pub fn with_text(&self, text: Text) -> Self {
        TextNode {
            marks: self.marks.clone(),
            text,
        }
    }
}

/// A leaf node (just attributes)
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(bound = "A: for<'d> Deserialize<'d> + Serialize + Default")]
pub struct Leaf<A> {
    /// Attributes
    #[serde(default)]
    pub attrs: A,
}

impl<S: Schema, A: Clone> NodeImpl<S> for Leaf<A> {
    fn copy<F>(&self, _: F) -> Self
    where
        F: FnOnce(&Fragment<S>) -> Fragment<S>,
    {
        self.clone()
    }

    fn content(&self) -> Option<&Fragment<S>> {
        None
    }
}
