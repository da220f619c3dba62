//! # The document model
//!
//! This module is derived from the `prosemirror-model` package and the
//! general JSON serialization of nodes.
mod content;
mod fragment;
mod marks;
mod node;
mod resolved_pos;
mod schema;
pub(crate) mod util;

pub use content::{ContentMatch, SchemaError};
pub use fragment::{Fragment, IndexError, NodeEntry, NodesBetween};
pub use marks::{Attrs, Mark, MarkSet, MarkType};
pub use node::{Node, NodeType, Text};
pub use resolved_pos::{ResolveErr, ResolvedNode, ResolvedPos};
pub use schema::{AttrNode, Block, Leaf, NodeImpl, Schema, TextNode};

pub(crate) use resolved_pos::Index;
