use super::{util, Index, Node, Schema, Text};
use derivative::Derivative;
use displaydoc::Display;
use serde::{Deserialize, Serialize, Serializer};
use std::iter::FromIterator;
use std::ops::RangeBounds;
use std::slice;
use thiserror::Error;

/// A fragment represents a node's collection of child nodes.
///
/// Like nodes, fragments are persistent data structures, and you should not mutate them or their
/// content. Rather, you create new instances whenever needed. The API tries to make this easy.
#[derive(Derivative, Deserialize)]
#[derivative(
    Debug(bound = ""),
    Clone(bound = ""),
    PartialEq(bound = ""),
    Eq(bound = "")
)]
#[serde(bound = "", from = "Vec<S::Node>")]
pub struct Fragment<S: Schema> {
    inner: Vec<S::Node>,
    size: usize,
}

/// Error when searching for a child index
#[derive(Debug, Copy, Clone, PartialEq, Eq, Display, Error)]
pub enum IndexError {
    /// Position {pos} outside of fragment of size {size}
    OutOfRange {
        /// The position
        pos: usize,
        /// The size of the fragment
        size: usize,
    },
}

impl<S: Schema> Fragment<S> {
    /// Create a new empty fragment
    pub fn new() -> Self {
        Self::default()
    }

    /// The size of the fragment, which is the total of the size of its content nodes.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Get a slice to all child nodes
    pub fn children(&self) -> &[S::Node] {
        &self.inner[..]
    }

    /// The first child of the fragment wrapped in `Some`, or `None` if it is empty.
    pub fn first_child(&self) -> Option<&S::Node> {
        self.inner.first()
    }

    /// The last child of the fragment wrapped in `Some`, or `None` if it is empty.
    pub fn last_child(&self) -> Option<&S::Node> {
        self.inner.last()
    }

    /// The number of child nodes in this fragment.
    pub fn child_count(&self) -> usize {
        self.inner.len()
    }

    /// Get the child node at the given index, if it exists.
    pub fn child(&self, index: usize) -> Option<&S::Node> {
        self.inner.get(index)
    }

    /// Add a node at the end of this fragment. Empty text nodes are dropped, and a text node
    /// with the same marks as the current last child is joined with it.
    pub fn push(&mut self, node: S::Node) {
        if let Some(next) = node.text_node() {
            if next.text.len_utf16() == 0 {
                return;
            }
            if let Some(last) = self.inner.last_mut() {
                let joined = next.same_markup(last).map(|prev| {
                    let text = prev.text.as_str().to_owned() + next.text.as_str();
                    prev.with_text(Text::from(text))
                });
                if let Some(joined) = joined {
                    self.size += next.text.len_utf16();
                    *last = S::Node::new_text_node(joined);
                    return;
                }
            }
        }
        self.size += node.node_size();
        self.inner.push(node);
    }

    /// Cut out the sub-fragment between the two given positions.
    pub fn cut<R: RangeBounds<usize>>(&self, range: R) -> Self {
        let from = util::from(&range);
        let to = util::to(&range, self.size);

        if from == 0 && to == self.size {
            return self.clone();
        }

        let mut result = Fragment::new();
        if to > from {
            let mut pos = 0;
            for child in &self.inner {
                if pos >= to {
                    break;
                }
                let end = pos + child.node_size();
                if end > from {
                    if pos < from || end > to {
                        let (start, inner_end) = if child.is_text() {
                            (from.saturating_sub(pos), usize::min(child.node_size(), to - pos))
                        } else {
                            let t = pos + 1;
                            (
                                from.saturating_sub(t),
                                usize::min(child.content_size(), to.saturating_sub(t)),
                            )
                        };
                        result.push(child.cut(start..inner_end).into_owned());
                    } else {
                        result.push(child.clone());
                    }
                }
                pos = end;
            }
        }
        result
    }

    /// Find the index and inner offset corresponding to a given relative position in this
    /// fragment. When `round` is true, positions inside a child are rounded to the end of it.
    pub(crate) fn find_index(&self, pos: usize, round: bool) -> Result<Index, IndexError> {
        let len = self.inner.len();
        match pos {
            0 => Ok(Index::new(0, pos)),
            p if p == self.size => Ok(Index::new(len, pos)),
            p if p > self.size => Err(IndexError::OutOfRange {
                pos,
                size: self.size,
            }),
            p => {
                let mut cur_pos = 0;
                for (i, cur) in self.inner.iter().enumerate() {
                    let end = cur_pos + cur.node_size();
                    if end >= p {
                        if (end == p) || round {
                            return Ok(Index::new(i + 1, end));
                        } else {
                            return Ok(Index::new(i, cur_pos));
                        }
                    }
                    cur_pos = end;
                }
                Err(IndexError::OutOfRange {
                    pos,
                    size: self.size,
                })
            }
        }
    }
}

impl<S: Schema> Default for Fragment<S> {
    fn default() -> Self {
        Self {
            inner: Vec::new(),
            size: 0,
        }
    }
}

impl<S: Schema> Serialize for Fragment<S> {
    fn serialize<Sr>(&self, serializer: Sr) -> Result<Sr::Ok, Sr::Error>
    where
        Sr: Serializer,
    {
        self.inner.serialize(serializer)
    }
}

impl<S: Schema> From<Vec<S::Node>> for Fragment<S> {
    fn from(src: Vec<S::Node>) -> Fragment<S> {
        src.into_iter().collect()
    }
}

impl<S: Schema> From<Fragment<S>> for Vec<S::Node> {
    fn from(src: Fragment<S>) -> Vec<S::Node> {
        src.inner
    }
}

impl<S: Schema> FromIterator<S::Node> for Fragment<S> {
    fn from_iter<I: IntoIterator<Item = S::Node>>(iter: I) -> Self {
        let mut fragment = Fragment::new();
        for node in iter {
            fragment.push(node);
        }
        fragment
    }
}

/// A node visited by [`NodesBetween`]
#[derive(Derivative, new)]
#[derivative(Debug(bound = ""))]
pub struct NodeEntry<'a, S: Schema> {
    /// The node
    pub node: &'a S::Node,
    /// The absolute position directly before the node
    pub pos: usize,
    /// The node that contains it
    pub parent: &'a S::Node,
    /// The index of the node in its parent
    pub index: usize,
}

impl<'a, S: Schema> Clone for NodeEntry<'a, S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, S: Schema> Copy for NodeEntry<'a, S> {}

struct Frame<'a, S: Schema> {
    parent: &'a S::Node,
    children: std::iter::Enumerate<slice::Iter<'a, S::Node>>,
    pos: usize,
}

/// An iterator over all nodes that overlap a range, in document order (pre-order).
///
/// A node is included if it starts before `to` and ends after `from`. Text nodes and
/// atoms are leaves of the traversal.
pub struct NodesBetween<'a, S: Schema> {
    stack: Vec<Frame<'a, S>>,
    from: usize,
    to: usize,
}

impl<'a, S: Schema> NodesBetween<'a, S> {
    pub(crate) fn new(root: &'a S::Node, from: usize, to: usize) -> Self {
        let stack = root
            .content()
            .map(|content| Frame {
                parent: root,
                children: content.children().iter().enumerate(),
                pos: 0,
            })
            .into_iter()
            .collect();
        Self { stack, from, to }
    }
}

impl<'a, S: Schema> Iterator for NodesBetween<'a, S> {
    type Item = NodeEntry<'a, S>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let frame = self.stack.last_mut()?;
            let (index, child) = match frame.children.next() {
                Some(next) if frame.pos < self.to => next,
                _ => {
                    self.stack.pop();
                    continue;
                }
            };
            let pos = frame.pos;
            let end = pos + child.node_size();
            let parent = frame.parent;
            frame.pos = end;
            if end <= self.from {
                continue;
            }
            if !child.is_atom() {
                if let Some(content) = child.content() {
                    self.stack.push(Frame {
                        parent: child,
                        children: content.children().iter().enumerate(),
                        pos: pos + 1,
                    });
                }
            }
            return Some(NodeEntry::new(child, pos, parent, index));
        }
    }
}
