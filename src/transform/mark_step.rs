use super::{util::Span, StepError, StepKind, StepResult};
use crate::model::{Fragment, Mark, MarkSet, MarkType, Node, NodeType, Schema};
use derivative::Derivative;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// Rebuild `fragment` (whose content starts at `start`), passing every inline
/// node inside `span` to `f` together with its parent. Text nodes are split at
/// the span boundaries, atoms are passed through unchanged.
fn map_inline<S: Schema, F>(
    fragment: &Fragment<S>,
    start: usize,
    span: Span,
    parent: &S::Node,
    f: &F,
) -> Fragment<S>
where
    F: Fn(&S::Node, &S::Node) -> S::Node,
{
    let mut mapped = Fragment::new();
    let mut pos = start;
    for child in fragment.children() {
        let size = child.node_size();
        let end = pos + size;
        if end <= span.from || pos >= span.to || child.is_atom() {
            mapped.push(child.clone());
        } else if child.is_text() {
            let cut_from = span.from.saturating_sub(pos);
            let cut_to = usize::min(size, span.to - pos);
            if cut_from > 0 {
                mapped.push(child.cut(..cut_from).into_owned());
            }
            mapped.push(f(&*child.cut(cut_from..cut_to), parent));
            if cut_to < size {
                mapped.push(child.cut(cut_to..).into_owned());
            }
        } else if child.is_inline() {
            mapped.push(f(child, parent));
        } else {
            mapped.push(child.copy(|c| map_inline(c, pos + 1, span, child, f)));
        }
        pos = end;
    }
    mapped
}

fn map_doc<S: Schema, F>(doc: &S::Node, span: Span, f: F) -> StepResult<S>
where
    F: Fn(&S::Node, &S::Node) -> S::Node,
{
    if span.from > span.to {
        return Err(StepError::InvalidSpan {
            from: span.from,
            to: span.to,
        });
    }
    doc.resolve(span.to)?;
    Ok(doc.copy(|c| map_inline(c, 0, span, doc, &f)))
}

/// Adding a mark on some part of the document
#[derive(Derivative, Deserialize, Serialize, new)]
#[derivative(
    Debug(bound = ""),
    Clone(bound = ""),
    PartialEq(bound = ""),
    Eq(bound = "")
)]
#[serde(bound = "", rename_all = "camelCase")]
pub struct AddMarkStep<S: Schema> {
    /// The affected part of the document
    #[serde(flatten)]
    pub span: Span,
    /// The mark to add
    pub mark: S::Mark,
}

/// Removing a mark on some part of the document
///
/// Serialized with a `"markType"` name rather than a full `"mark"` object, since marks
/// are removed by type.
#[derive(Derivative, Deserialize, Serialize, new)]
#[derivative(
    Debug(bound = ""),
    Clone(bound = ""),
    PartialEq(bound = ""),
    Eq(bound = "")
)]
#[serde(bound = "", rename_all = "camelCase")]
pub struct RemoveMarkStep<S: Schema> {
    /// The affected part of the document
    #[serde(flatten)]
    pub span: Span,
    /// The type of the marks to remove
    pub mark_type: S::MarkType,
}

impl<S: Schema> StepKind<S> for AddMarkStep<S> {
    fn apply(&self, doc: &S::Node) -> StepResult<S> {
        let mark_type = self.mark.r#type();
        map_doc::<S, _>(doc, self.span, |node, parent| {
            if parent.r#type().allows_mark_type(mark_type) {
                let marks: Cow<MarkSet<S>> = node.marks().map(Cow::Borrowed).unwrap_or_default();
                node.mark(self.mark.add_to_set(marks).into_owned())
            } else {
                node.clone()
            }
        })
    }
}

impl<S: Schema> StepKind<S> for RemoveMarkStep<S> {
    fn apply(&self, doc: &S::Node) -> StepResult<S> {
        map_doc::<S, _>(doc, self.span, |node, _parent| match node.marks() {
            Some(marks) => node.mark(
                self.mark_type
                    .remove_from_set(Cow::Borrowed(marks))
                    .into_owned(),
            ),
            None => node.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{AddMarkStep, RemoveMarkStep};
    use crate::basic::helper::{bold, datetime, doc, em, link, link_mark, marked, node, p};
    use crate::basic::{Basic, BasicMark, BasicMarkType};
    use crate::model::Node;
    use crate::transform::{Span, StepError, StepKind};

    #[test]
    fn test_add_mark() {
        let d1 = doc(p("Hello World!"));
        let step1 = AddMarkStep::<Basic>::new(Span::new(1, 9), BasicMark::Bold);
        let d2 = step1.apply(&d1).unwrap();
        assert_eq!(d2, doc(p((bold("Hello Wo"), node("rld!")))));
    }

    #[test]
    fn test_add_mark_is_idempotent() {
        let d1 = doc(p(("a", bold("bc"), "d")));
        let step = AddMarkStep::<Basic>::new(Span::new(2, 4), BasicMark::Bold);
        assert_eq!(step.apply(&d1).unwrap(), d1);

        let widen = AddMarkStep::<Basic>::new(Span::new(1, 5), BasicMark::Bold);
        assert_eq!(widen.apply(&d1).unwrap(), doc(p(bold("abcd"))));
    }

    #[test]
    fn test_add_mark_keeps_other_marks() {
        let d1 = doc(p(em("abc")));
        let d2 = AddMarkStep::<Basic>::new(Span::new(2, 3), BasicMark::Bold)
            .apply(&d1)
            .unwrap();
        assert_eq!(
            d2,
            doc(p((
                em("a"),
                marked("b", vec![BasicMark::Em, BasicMark::Bold]),
                em("c")
            )))
        );
    }

    #[test]
    fn test_add_mark_replaces_same_type() {
        let d1 = doc(p(link("/a", "ab")));
        let d2 = AddMarkStep::<Basic>::new(Span::new(1, 3), link_mark("/b"))
            .apply(&d1)
            .unwrap();
        assert_eq!(d2, doc(p(link("/b", "ab"))));
    }

    #[test]
    fn test_add_mark_skips_atoms() {
        let d1 = doc(p(("a", datetime(Some(7)), "b")));
        let d2 = AddMarkStep::<Basic>::new(Span::new(1, 4), BasicMark::Em)
            .apply(&d1)
            .unwrap();
        assert_eq!(d2, doc(p((em("a"), datetime(Some(7)), em("b")))));
        assert_eq!(d2.node_size(), d1.node_size());
    }

    #[test]
    fn test_add_mark_across_blocks() {
        let d1 = doc((p("ab"), p("cd")));
        let d2 = AddMarkStep::<Basic>::new(Span::new(2, 6), BasicMark::Bold)
            .apply(&d1)
            .unwrap();
        assert_eq!(d2, doc((p(("a", bold("b"))), p((bold("c"), "d")))));
    }

    #[test]
    fn test_remove_mark() {
        let d1 = doc(p((bold("abc"), marked("d", vec![BasicMark::Bold, BasicMark::Em]))));
        let d2 = RemoveMarkStep::<Basic>::new(Span::new(2, 5), BasicMarkType::Bold)
            .apply(&d1)
            .unwrap();
        assert_eq!(d2, doc(p((bold("a"), node("bc"), em("d")))));

        let d3 = RemoveMarkStep::<Basic>::new(Span::new(1, 5), BasicMarkType::Link)
            .apply(&d1)
            .unwrap();
        assert_eq!(d3, d1);
    }

    #[test]
    fn test_invalid_span() {
        let d1 = doc(p("ab"));
        assert_eq!(
            AddMarkStep::<Basic>::new(Span::new(3, 1), BasicMark::Bold).apply(&d1),
            Err(StepError::InvalidSpan { from: 3, to: 1 })
        );
        assert!(RemoveMarkStep::<Basic>::new(Span::new(1, 9), BasicMarkType::Bold)
            .apply(&d1)
            .is_err());
    }
}
