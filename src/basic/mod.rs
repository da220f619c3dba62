//! # The basic editor schema
//!
//! Paragraphs, headings and blockquotes with text and inline date pickers, plus the
//! `bold`, `em` and `link` marks. Documents use the general JSON serialization of nodes.
mod attrs;
mod content;
pub mod helper;
mod schema;

use crate::commands::{CommandError, MarkTypeRef};
use crate::model::{
    AttrNode, Block, Fragment, Leaf, Mark, MarkSet, MarkType, Node, NodeImpl, TextNode,
};
pub use attrs::{DatetimeAttrs, HeadingAttrs, LinkAttrs};
pub use content::BasicContentMatch;
pub use schema::{Basic, BasicNodeType, Group};

use derivative::Derivative;
use serde::{Deserialize, Serialize};

/// The node type for the basic schema
#[derive(Debug, Derivative, Deserialize, Serialize, PartialEq, Eq)]
#[derivative(Clone(bound = ""))]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BasicNode {
    /// The document root
    Doc(Block<Basic>),
    /// A paragraph
    Paragraph(Block<Basic>),
    /// A heading, e.g. `<h1>`
    Heading(AttrNode<Basic, HeadingAttrs>),
    /// A blockquote
    Blockquote(Block<Basic>),
    /// A text node
    Text(TextNode<Basic>),
    /// An inline date picker
    Datetime(Leaf<DatetimeAttrs>),
}

impl From<TextNode<Basic>> for BasicNode {
    fn from(text_node: TextNode<Basic>) -> Self {
        Self::Text(text_node)
    }
}

impl From<&str> for BasicNode {
    fn from(text: &str) -> Self {
        Self::text(text)
    }
}

impl Node<Basic> for BasicNode {
    fn r#type(&self) -> BasicNodeType {
        match self {
            Self::Doc { .. } => BasicNodeType::Doc,
            Self::Paragraph { .. } => BasicNodeType::Paragraph,
            Self::Heading { .. } => BasicNodeType::Heading,
            Self::Blockquote { .. } => BasicNodeType::Blockquote,
            Self::Text { .. } => BasicNodeType::Text,
            Self::Datetime { .. } => BasicNodeType::Datetime,
        }
    }

    fn text_node(&self) -> Option<&TextNode<Basic>> {
        if let Self::Text(node) = self {
            Some(node)
        } else {
            None
        }
    }

    fn new_text_node(node: TextNode<Basic>) -> Self {
        Self::Text(node)
    }

    fn content(&self) -> Option<&Fragment<Basic>> {
        match self {
            Self::Doc(Block { content }) => Some(content),
            Self::Paragraph(Block { content }) => Some(content),
            Self::Heading(AttrNode { content, .. }) => Some(content),
            Self::Blockquote(Block { content }) => Some(content),
            Self::Text { .. } => None,
            Self::Datetime { .. } => None,
        }
    }

    fn marks(&self) -> Option<&MarkSet<Basic>> {
        self.text_node().map(|node| &node.marks)
    }

    fn mark(&self, set: MarkSet<Basic>) -> Self {
        // Only text carries marks in this schema
        if let Some(text_node) = self.text_node() {
            Self::Text(TextNode {
                marks: set,
                text: text_node.text.clone(),
            })
        } else {
            self.clone()
        }
    }

    fn copy<F>(&self, map: F) -> Self
    where
        F: FnOnce(&Fragment<Basic>) -> Fragment<Basic>,
    {
        match self {
            Self::Doc(block) => Self::Doc(block.copy(map)),
            Self::Paragraph(block) => Self::Paragraph(block.copy(map)),
            Self::Heading(node) => Self::Heading(node.copy(map)),
            Self::Blockquote(block) => Self::Blockquote(block.copy(map)),
            Self::Text(node) => Self::Text(node.clone()),
            Self::Datetime(leaf) => Self::Datetime(leaf.clone()),
        }
    }
}

/// The marks that can be on some span
#[derive(Debug, Hash, Eq, Clone, PartialEq, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BasicMark {
    /// bold
    #[serde(alias = "strong")]
    Bold,
    /// italics
    Em,
    /// hyper-linked
    Link {
        /// The attributes
        attrs: LinkAttrs,
    },
}

impl Mark<Basic> for BasicMark {
    fn r#type(&self) -> BasicMarkType {
        match self {
            Self::Bold => BasicMarkType::Bold,
            Self::Em => BasicMarkType::Em,
            Self::Link { .. } => BasicMarkType::Link,
        }
    }
}

/// The type of a basic mark.
#[derive(Debug, Hash, Eq, Copy, Clone, PartialEq, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BasicMarkType {
    /// bold
    #[serde(alias = "strong")]
    Bold,
    /// italics
    Em,
    /// hyper-linked
    Link,
}

impl MarkType<Basic> for BasicMarkType {
    fn name(self) -> &'static str {
        match self {
            Self::Bold => "bold",
            Self::Em => "em",
            Self::Link => "link",
        }
    }

    fn all() -> &'static [Self] {
        &[Self::Bold, Self::Em, Self::Link]
    }

    fn from_name(name: &str) -> Option<Self> {
        match name {
            "bold" | "strong" => Some(Self::Bold),
            "em" => Some(Self::Em),
            "link" => Some(Self::Link),
            _ => None,
        }
    }

    /// Typing at the end of a link does not extend it.
    fn inclusive(self) -> bool {
        !matches!(self, Self::Link)
    }
}

impl MarkTypeRef<Basic> for BasicMarkType {
    fn resolve(&self, _schema: &Basic) -> Result<BasicMarkType, CommandError> {
        Ok(*self)
    }
}
