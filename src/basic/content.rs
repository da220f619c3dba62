use super::{schema::Group, Basic, BasicNodeType};
use crate::model::ContentMatch;
use crate::util::then_some;

/// The content match type for the basic schema
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum BasicContentMatch {
    /// `inline*`
    InlineStar,
    /// `block+`
    BlockPlus,
    /// `block*`
    BlockStar,
    /// `paragraph+`
    ParagraphPlus,
    /// `paragraph*`
    ParagraphStar,
    /// empty
    Empty,
}

impl ContentMatch<Basic> for BasicContentMatch {
    fn match_type(self, r#type: BasicNodeType) -> Option<Self> {
        match self {
            Self::InlineStar => then_some(r#type.in_group(Group::Inline), Self::InlineStar),
            Self::BlockPlus | Self::BlockStar => {
                then_some(r#type.in_group(Group::Block), Self::BlockStar)
            }
            Self::ParagraphPlus | Self::ParagraphStar => then_some(
                matches!(r#type, BasicNodeType::Paragraph),
                Self::ParagraphStar,
            ),
            Self::Empty => None,
        }
    }

    fn valid_end(self) -> bool {
        matches!(
            self,
            Self::InlineStar | Self::BlockStar | Self::ParagraphStar | Self::Empty
        )
    }

    fn inline_content(self) -> bool {
        matches!(self, Self::InlineStar)
    }
}
