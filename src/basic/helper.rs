//! # Helpers
//!
//! This module contains some functions to create nodes programmatically.
//!
//! See also: <https://github.com/prosemirror/prosemirror-test-builder>
use super::{Basic, BasicMark, BasicNode, DatetimeAttrs, HeadingAttrs, LinkAttrs};
use crate::model::{self, AttrNode, Block, Leaf, MarkSet, Text, TextNode};

type Fragment = model::Fragment<Basic>;

impl From<()> for Fragment {
    fn from(_: ()) -> Fragment {
        Fragment::new()
    }
}

impl From<&str> for Fragment {
    fn from(s: &str) -> Fragment {
        Fragment::from(vec![BasicNode::from(s)])
    }
}

impl From<BasicNode> for Fragment {
    fn from(node: BasicNode) -> Fragment {
        Fragment::from(vec![node])
    }
}

impl<A: Into<BasicNode>> From<(A,)> for Fragment {
    fn from((a,): (A,)) -> Fragment {
        Fragment::from(vec![a.into()])
    }
}

impl<A: Into<BasicNode>, B: Into<BasicNode>> From<(A, B)> for Fragment {
    fn from((a, b): (A, B)) -> Fragment {
        Fragment::from(vec![a.into(), b.into()])
    }
}

impl<A: Into<BasicNode>, B: Into<BasicNode>, C: Into<BasicNode>> From<(A, B, C)> for Fragment {
    fn from((a, b, c): (A, B, C)) -> Fragment {
        Fragment::from(vec![a.into(), b.into(), c.into()])
    }
}

impl<A, B, C, D> From<(A, B, C, D)> for Fragment
where
    A: Into<BasicNode>,
    B: Into<BasicNode>,
    C: Into<BasicNode>,
    D: Into<BasicNode>,
{
    fn from((a, b, c, d): (A, B, C, D)) -> Fragment {
        Fragment::from(vec![a.into(), b.into(), c.into(), d.into()])
    }
}

/// Create a document node.
pub fn doc<A: Into<Fragment>>(content: A) -> BasicNode {
    BasicNode::Doc(Block {
        content: content.into(),
    })
}

/// Create a paragraph node.
pub fn p<A: Into<Fragment>>(content: A) -> BasicNode {
    BasicNode::Paragraph(Block {
        content: content.into(),
    })
}

/// Create a heading node.
pub fn h<A: Into<Fragment>>(level: u8, content: A) -> BasicNode {
    BasicNode::Heading(AttrNode {
        attrs: HeadingAttrs { level },
        content: content.into(),
    })
}

/// Create a heading (level 1) node.
pub fn h1<A: Into<Fragment>>(content: A) -> BasicNode {
    h(1, content)
}

/// Create a blockquote node.
pub fn blockquote<A: Into<Fragment>>(content: A) -> BasicNode {
    BasicNode::Blockquote(Block {
        content: content.into(),
    })
}

/// Create a date picker node.
pub fn datetime(timestamp: Option<i64>) -> BasicNode {
    BasicNode::Datetime(Leaf {
        attrs: DatetimeAttrs { timestamp },
    })
}

/// Create a text node with the given marks.
pub fn marked<I: IntoIterator<Item = BasicMark>>(content: &str, marks: I) -> BasicNode {
    BasicNode::Text(TextNode {
        text: Text::from(content.to_string()),
        marks: marks.into_iter().collect::<MarkSet<Basic>>(),
    })
}

/// Create a bold text node.
pub fn bold(content: &str) -> BasicNode {
    marked(content, vec![BasicMark::Bold])
}

/// Create an emphasized text node.
pub fn em(content: &str) -> BasicNode {
    marked(content, vec![BasicMark::Em])
}

/// Create a linked text node.
pub fn link(href: &str, content: &str) -> BasicNode {
    marked(content, vec![link_mark(href)])
}

/// Create a link mark without a title.
pub fn link_mark(href: &str) -> BasicMark {
    BasicMark::Link {
        attrs: LinkAttrs {
            href: href.to_owned(),
            title: String::new(),
        },
    }
}

/// Create a node.
pub fn node<A: Into<BasicNode>>(src: A) -> BasicNode {
    src.into()
}
