use prosemirror_marks::basic::helper::{bold, datetime, doc, p};
use prosemirror_marks::basic::{Basic, BasicMarkType, BasicNode};
use prosemirror_marks::commands::{can_set_mark, is_mark_active, set_mark, toggle_mark, unset_mark};
use prosemirror_marks::model::Node;
use prosemirror_marks::state::{EditorState, Selection, StateConfig};
use prosemirror_marks::transform::{Span, Step};
use rstest::rstest;
use std::sync::Arc;

fn create(doc: BasicNode, selection: Selection) -> EditorState<Basic> {
    let config = StateConfig::<Basic>::default()
        .with_doc(doc)
        .with_selection(selection);
    EditorState::create(Arc::new(Basic), config).unwrap()
}

fn range(from: usize, to: usize) -> Selection {
    Selection::Text {
        ranges: vec![Span { from, to }],
    }
}

#[test]
fn set_mark_at_empty_cursor() {
    let state = create(doc(p("hello")), Selection::Cursor { pos: 3 });
    assert_eq!(state.stored_marks(), None);
    assert!(!is_mark_active(&state, "bold").unwrap());

    let tr = set_mark(&state, "bold", None).unwrap();
    let next = state.apply(tr).unwrap();
    assert!(is_mark_active(&next, "bold").unwrap());
    assert_eq!(next.doc(), state.doc());
    assert_eq!(next.doc().node_size(), state.doc().node_size());
}

#[rstest]
#[case::cursor(doc(p("hello")), Selection::Cursor { pos: 3 })]
#[case::plain_range(doc(p("hello")), range(1, 6))]
#[case::marked_range(doc(p(bold("hello"))), range(2, 4))]
#[case::mixed_range(doc((p(bold("ab")), p("cd"))), range(1, 7))]
fn toggle_twice_restores_activity(#[case] content: BasicNode, #[case] selection: Selection) {
    let state = create(content, selection);
    let before = is_mark_active(&state, BasicMarkType::Bold).unwrap();

    let once = state.apply(toggle_mark(&state, "bold").unwrap()).unwrap();
    assert_ne!(is_mark_active(&once, "bold").unwrap(), before);

    let twice = once.apply(toggle_mark(&once, "bold").unwrap()).unwrap();
    assert_eq!(is_mark_active(&twice, "bold").unwrap(), before);
}

#[test]
fn unset_then_set_on_wrapped_range() {
    let state = create(doc(p(("a", bold("bcd"), "e"))), range(2, 5));
    assert!(is_mark_active(&state, "bold").unwrap());

    let unset = state.apply(unset_mark(&state, "bold").unwrap()).unwrap();
    assert!(!is_mark_active(&unset, "bold").unwrap());
    assert_eq!(unset.doc(), &doc(p("abcde")));

    let set = unset.apply(set_mark(&unset, "bold", None).unwrap()).unwrap();
    assert!(is_mark_active(&set, "bold").unwrap());
    assert_eq!(set.doc(), state.doc());
}

#[test]
fn atoms_can_not_be_marked() {
    let d = doc(p(("a", datetime(Some(1_600_000_000_000)), "b")));
    let selection = Selection::node::<Basic>(&d, 2).unwrap();
    let state = create(d, selection);
    assert_eq!(state.selection(), &Selection::Node { from: 2, to: 3 });
    assert!(!can_set_mark(&state, "bold").unwrap());
    assert!(!is_mark_active(&state, "bold").unwrap());
    assert!(!toggle_mark(&state, "bold").unwrap().doc_changed());
}

#[test]
fn add_mark_twice_is_idempotent() {
    let state = create(doc((p("hello"), p("world"))), range(3, 10));
    let once = state.apply(set_mark(&state, "em", None).unwrap()).unwrap();
    let twice = once.apply(set_mark(&once, "em", None).unwrap()).unwrap();
    assert_eq!(once.doc(), twice.doc());

    let steps: Vec<_> = set_mark(&once, "em", None)
        .unwrap()
        .steps()
        .iter()
        .map(Step::span)
        .collect();
    assert_eq!(steps, vec![Span { from: 3, to: 10 }]);
}

#[test]
fn scenario_bold_hello() {
    let state = create(doc(p("hello world")), range(1, 6));
    assert!(!is_mark_active(&state, "bold").unwrap());

    let bolded = state.apply(set_mark(&state, "bold", None).unwrap()).unwrap();
    assert!(is_mark_active(&bolded, "bold").unwrap());
    assert_eq!(bolded.doc(), &doc(p((bold("hello"), " world"))));

    let plain = bolded.apply(unset_mark(&bolded, "bold").unwrap()).unwrap();
    assert!(!is_mark_active(&plain, "bold").unwrap());
    assert_eq!(plain.doc(), state.doc());
}

#[test]
fn scenario_empty_paragraph() {
    let state = EditorState::create(Arc::new(Basic), StateConfig::default()).unwrap();
    assert_eq!(state.selection(), &Selection::Cursor { pos: 1 });
    assert_eq!(state.stored_marks(), None);
    assert!(can_set_mark(&state, "bold").unwrap());

    let next = state.apply(set_mark(&state, "bold", None).unwrap()).unwrap();
    assert!(is_mark_active(&next, "bold").unwrap());
    assert_eq!(next.doc(), state.doc());
    let inline = next
        .doc()
        .descendants_between(0, 2)
        .filter(|entry| entry.node.is_inline())
        .count();
    assert_eq!(inline, 0);
}

#[test]
fn scenario_two_paragraphs_partially_bold() {
    let state = create(doc((p(bold("first")), p("second"))), range(1, 15));
    assert!(!is_mark_active(&state, "bold").unwrap());
    assert!(can_set_mark(&state, "bold").unwrap());

    let first_only = create(doc((p(bold("first")), p("second"))), range(1, 6));
    assert!(is_mark_active(&first_only, "bold").unwrap());
}

#[test]
fn multi_range_selection() {
    let d = doc((p("one"), p("two"), p("six")));
    let ranges = vec![Span { from: 11, to: 14 }, Span { from: 1, to: 4 }];
    let selection = Selection::text::<Basic, _>(&d, ranges).unwrap();
    let state = create(d, selection);

    let next = state.apply(set_mark(&state, "bold", None).unwrap()).unwrap();
    assert_eq!(next.doc(), &doc((p(bold("one")), p("two"), p(bold("six")))));
    assert!(is_mark_active(&next, "bold").unwrap());

    let cursor = Selection::Cursor { pos: 7 };
    let mut tr = next.tr();
    tr.set_selection(cursor).unwrap();
    let moved = next.apply(tr).unwrap();
    assert!(!is_mark_active(&moved, "bold").unwrap());
}

#[test]
fn stored_marks_are_cleared_when_moving() {
    let state = create(doc(p("hello")), Selection::Cursor { pos: 2 });
    let stored = state.apply(set_mark(&state, "em", None).unwrap()).unwrap();
    assert!(stored.stored_marks().is_some());

    let mut tr = stored.tr();
    tr.set_selection(range(1, 3)).unwrap();
    let ranged = stored.apply(tr).unwrap();
    assert_eq!(ranged.stored_marks(), None);
    assert!(!is_mark_active(&ranged, "em").unwrap());
}

#[test]
fn out_of_range_positions_are_rejected() {
    let d = doc(p("hello"));
    assert!(Selection::cursor::<Basic>(&d, 8).is_err());

    let config = StateConfig::<Basic>::default()
        .with_doc(d)
        .with_selection(range(2, 40));
    assert!(EditorState::create(Arc::new(Basic), config).is_err());
}
