use super::{BasicContentMatch, BasicMark, BasicMarkType, BasicNode};
use crate::model::{Block, Schema};

/// The basic schema type
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct Basic;

impl Schema for Basic {
    type Node = BasicNode;
    type Mark = BasicMark;
    type MarkType = BasicMarkType;
    type NodeType = BasicNodeType;
    type ContentMatch = BasicContentMatch;

    /// A document with a single empty paragraph
    fn empty_doc(&self) -> BasicNode {
        BasicNode::Doc(Block {
            content: vec![BasicNode::Paragraph(Block::default())].into(),
        })
    }
}

/// The groups that node types can be members of
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Group {
    /// Top-level content, like paragraphs
    Block,
    /// Content of paragraphs and headings
    Inline,
}

/// The node-spec type for the basic schema
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BasicNodeType {
    /// The document root
    Doc,
    /// A paragraph
    Paragraph,
    /// A heading, e.g. `<h1>`
    Heading,
    /// A blockquote
    Blockquote,
    /// A text node
    Text,
    /// A date picker
    Datetime,
}

impl BasicNodeType {
    /// The groups this node type is a member of
    pub fn groups(self) -> &'static [Group] {
        match self {
            Self::Paragraph | Self::Heading | Self::Blockquote => &[Group::Block],
            Self::Text | Self::Datetime => &[Group::Inline],
            Self::Doc => &[],
        }
    }

    /// Whether this node type is a member of the given group
    pub fn in_group(self, group: Group) -> bool {
        self.groups().contains(&group)
    }
}

impl crate::model::NodeType<Basic> for BasicNodeType {
    fn name(self) -> &'static str {
        match self {
            Self::Doc => "doc",
            Self::Paragraph => "paragraph",
            Self::Heading => "heading",
            Self::Blockquote => "blockquote",
            Self::Text => "text",
            Self::Datetime => "datetime",
        }
    }

    fn all() -> &'static [Self] {
        &[
            Self::Doc,
            Self::Paragraph,
            Self::Heading,
            Self::Blockquote,
            Self::Text,
            Self::Datetime,
        ]
    }

    fn content_match(self) -> BasicContentMatch {
        match self {
            Self::Doc => BasicContentMatch::BlockPlus,
            Self::Paragraph => BasicContentMatch::InlineStar,
            Self::Heading => BasicContentMatch::InlineStar,
            Self::Blockquote => BasicContentMatch::ParagraphPlus,
            Self::Text => BasicContentMatch::Empty,
            Self::Datetime => BasicContentMatch::Empty,
        }
    }

    fn is_inline(self) -> bool {
        self.in_group(Group::Inline)
    }

    fn is_atom(self) -> bool {
        matches!(self, Self::Datetime)
    }
}
