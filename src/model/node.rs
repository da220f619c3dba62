use super::{
    util, ContentMatch, Fragment, Mark, MarkSet, MarkType, NodesBetween, ResolveErr, ResolvedPos,
    Schema, SchemaError, TextNode,
};
use serde::{Deserialize, Serialize, Serializer};
use std::borrow::Cow;
use std::collections::HashSet;
use std::fmt::Debug;
use std::ops::{ControlFlow, RangeBounds};

/// This class represents a node in the tree that makes up a ProseMirror document. So a document is
/// an instance of Node, with children that are also instances of Node.
pub trait Node<S: Schema<Node = Self> + 'static>:
    Serialize + for<'de> Deserialize<'de> + Clone + Debug + PartialEq + Eq
{
    /// The type of this node
    fn r#type(&self) -> S::NodeType;

    /// Get the text and marks if this is a text node
    fn text_node(&self) -> Option<&TextNode<S>>;

    /// Create a new text node
    fn new_text_node(node: TextNode<S>) -> Self;

    /// A container holding the node's children.
    fn content(&self) -> Option<&Fragment<S>>;

    /// The marks (things like whether it is emphasized or part of a link) applied to this node.
    fn marks(&self) -> Option<&MarkSet<S>>;

    /// Create a copy of this node with the given set of marks instead of the node's own marks.
    /// Nodes that can't carry marks are returned unchanged.
    fn mark(&self, set: MarkSet<S>) -> Self;

    /// Create a new node with the same markup as this node, containing the given content (or
    /// empty, if no content is given).
    fn copy<F>(&self, map: F) -> Self
    where
        F: FnOnce(&Fragment<S>) -> Fragment<S>;

    /// Creates a new text node
    fn text<A: Into<String>>(text: A) -> Self {
        Self::new_text_node(TextNode {
            text: Text::from(text.into()),
            marks: MarkSet::<S>::default(),
        })
    }

    /// Create a copy of this node with only the content between the given positions.
    fn cut<R: RangeBounds<usize>>(&self, range: R) -> Cow<Self> {
        let from = util::from(&range);

        if let Some(text_node) = self.text_node() {
            let len = text_node.text.len_utf16();
            let to = util::to(&range, len);

            if from == 0 && to == len {
                return Cow::Borrowed(self);
            }
            let (_, rest) = util::split_at_utf16(text_node.text.as_str(), from);
            let (rest, _) = util::split_at_utf16(rest, to - from);

            Cow::Owned(Self::new_text_node(
                text_node.with_text(Text::from(rest.to_owned())),
            ))
        } else {
            let content_size = self.content_size();
            let to = util::to(&range, content_size);

            if from == 0 && to == content_size {
                Cow::Borrowed(self)
            } else {
                Cow::Owned(self.copy(|c| c.cut(from..to)))
            }
        }
    }

    /// Resolve the given position in the document, returning a struct with information about its
    /// context.
    fn resolve(&self, pos: usize) -> Result<ResolvedPos<S>, ResolveErr> {
        ResolvedPos::resolve(self, pos)
    }

    /// Iterate over all descendant nodes that overlap the given range, in document order.
    /// Atoms are yielded, but never entered.
    fn descendants_between(&self, from: usize, to: usize) -> NodesBetween<S> {
        NodesBetween::new(self, from, to)
    }

    /// Invoke a callback for all descendant nodes between the given two positions. The
    /// callback receives the node, its absolute position and its parent. Returning
    /// `ControlFlow::Break` stops the traversal.
    fn nodes_between<B, F>(&self, from: usize, to: usize, mut f: F) -> ControlFlow<B>
    where
        F: FnMut(&Self, usize, &Self) -> ControlFlow<B>,
    {
        for entry in self.descendants_between(from, to) {
            f(entry.node, entry.pos, entry.parent)?;
        }
        ControlFlow::Continue(())
    }

    /// Get all text between positions `from` and `to`. When `block_separator` is given, it
    /// is inserted to separate text from different block nodes.
    fn text_between(&self, from: usize, to: usize, block_separator: Option<&str>) -> String {
        let mut text = String::new();
        if from >= to {
            return text;
        }
        let mut separated = true;
        for entry in self.descendants_between(from, to) {
            if let Some(text_node) = entry.node.text_node() {
                let skip = from.saturating_sub(entry.pos);
                let end = usize::min(text_node.text.len_utf16(), to - entry.pos);
                let (_, rest) = util::split_at_utf16(text_node.text.as_str(), skip);
                text.push_str(util::split_at_utf16(rest, end - skip).0);
                separated = block_separator.is_none();
            } else if entry.node.is_leaf() {
                separated = block_separator.is_none();
            } else if !separated && entry.node.is_block() {
                text.push_str(block_separator.unwrap_or(""));
                separated = true;
            }
        }
        text
    }

    /// Concatenates all the text nodes found in this node and its children.
    fn text_content(&self) -> String {
        match self.text_node() {
            Some(text_node) => text_node.text.as_str().to_owned(),
            None => self.text_between(0, self.content_size(), None),
        }
    }

    /// Represents `.content.size` in JS
    fn content_size(&self) -> usize {
        self.content().map(Fragment::size).unwrap_or(0)
    }

    /// Get the child node at the given index, if it exists.
    fn child(&self, index: usize) -> Option<&Self> {
        self.content().and_then(|c| c.child(index))
    }

    /// The first child of this node, if any.
    fn first_child(&self) -> Option<&Self> {
        self.content().and_then(Fragment::first_child)
    }

    /// The number of children that the node has.
    fn child_count(&self) -> usize {
        self.content().map_or(0, Fragment::child_count)
    }

    /// True when this is a leaf node.
    fn is_leaf(&self) -> bool {
        self.content().is_none()
    }

    /// True when this is a block (non-inline node)
    fn is_block(&self) -> bool {
        self.r#type().is_block()
    }

    /// True when this is an inline node (a text node or a node that can appear among text).
    fn is_inline(&self) -> bool {
        self.r#type().is_inline()
    }

    /// True when this is a text node.
    fn is_text(&self) -> bool {
        self.text_node().is_some()
    }

    /// True when this is an atom, i.e. when it does not have directly editable content.
    fn is_atom(&self) -> bool {
        self.r#type().is_atom()
    }

    /// True when this node allows inline content.
    fn inline_content(&self) -> bool {
        self.r#type().inline_content()
    }

    /// True when this is a block node with inline content.
    fn is_textblock(&self) -> bool {
        self.is_block() && self.inline_content()
    }

    /// The size of this node, as defined by the integer-based indexing scheme. For text nodes,
    /// this is the amount of characters. For other leaf nodes, it is one. For non-leaf nodes, it
    /// is the size of the content plus two (the start and end token).
    fn node_size(&self) -> usize {
        match self.content() {
            Some(c) => c.size() + 2,
            None => {
                if let Some(text_node) = self.text_node() {
                    text_node.text.len_utf16()
                } else {
                    1
                }
            }
        }
    }

    /// Check whether this node and its descendants conform to the schema.
    fn check(&self) -> Result<(), SchemaError> {
        if let Some(marks) = self.marks() {
            let mut seen = HashSet::new();
            for mark in marks {
                if !seen.insert(mark.r#type()) {
                    return Err(SchemaError::DuplicateMark {
                        mark_type: mark.r#type().name(),
                    });
                }
            }
        }
        if let Some(content) = self.content() {
            let node_type = self.r#type();
            if !node_type.valid_content(content) {
                return Err(SchemaError::InvalidContent {
                    node_type: node_type.name(),
                });
            }
            for child in content.children() {
                child.check()?;
            }
        }
        Ok(())
    }
}

/// Node types are objects allocated once per `Schema` and used to
/// tag `Node` instances. They contain information about the node
/// type, such as its name and what kind of node it represents.
pub trait NodeType<S: Schema<NodeType = Self>>:
    Copy + Clone + Debug + PartialEq + Eq + 'static
{
    /// The name the node type has in this schema.
    fn name(self) -> &'static str;

    /// All node types of the schema.
    fn all() -> &'static [Self];

    /// The starting match of the node type's content expression.
    fn content_match(self) -> S::ContentMatch;

    /// True if this is an inline type.
    fn is_inline(self) -> bool;

    /// True if this is a block type
    fn is_block(self) -> bool {
        !self.is_inline()
    }

    /// True if this node type has inline content.
    fn inline_content(self) -> bool {
        self.content_match().inline_content()
    }

    /// True for node types that allow no content, or are otherwise opaque to editing.
    fn is_atom(self) -> bool {
        false
    }

    /// The mark types that this node type explicitly excludes from its content.
    fn excluded_marks(self) -> &'static [S::MarkType] {
        &[]
    }

    /// Check whether the given mark type is allowed in this node.
    fn allows_mark_type(self, mark_type: S::MarkType) -> bool {
        self.inline_content() && !self.excluded_marks().contains(&mark_type)
    }

    /// Test whether the given set of marks are allowed in this node.
    fn allow_marks(self, marks: &MarkSet<S>) -> bool {
        marks.iter().all(|m| self.allows_mark_type(m.r#type()))
    }

    /// Returns true if the given fragment is valid content for this node type.
    fn valid_content(self, fragment: &Fragment<S>) -> bool {
        match self.content_match().match_fragment(fragment) {
            Some(m) if m.valid_end() => fragment
                .children()
                .iter()
                .all(|child| child.marks().map_or(true, |m| self.allow_marks(m))),
            _ => false,
        }
    }
}

/// A string that stores its length in utf-16
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub struct Text {
    len_utf16: usize,
    content: String,
}

impl Text {
    /// Return the contained string
    pub fn as_str(&self) -> &str {
        &self.content
    }

    /// The length of this string if it were encoded in utf-16
    pub fn len_utf16(&self) -> usize {
        self.len_utf16
    }
}

impl From<String> for Text {
    fn from(src: String) -> Text {
        Text {
            len_utf16: src.encode_utf16().count(),
            content: src,
        }
    }
}

impl Serialize for Text {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.content.serialize(serializer)
    }
}
