use prosemirror_marks::basic::helper::{bold, datetime, doc, p};
use prosemirror_marks::basic::{Basic, BasicMarkType, BasicNode};
use prosemirror_marks::commands::{CommandError, SetMark};
use prosemirror_marks::state::{ApplyError, EditorState, Selection, StateConfig, Transaction};
use prosemirror_marks::transform::Span;
use prosemirror_marks::view::{
    can_set_mark, is_bold, set_bold, toggle_bold, unset_bold, EditorView, MenuBar, MenuItem,
    ViewError,
};
use std::cell::Cell;
use std::rc::Rc;
use std::sync::Arc;

fn view(doc: BasicNode, selection: Selection) -> EditorView<Basic> {
    let config = StateConfig::<Basic>::default()
        .with_doc(doc)
        .with_selection(selection);
    EditorView::new(EditorState::create(Arc::new(Basic), config).unwrap())
}

fn range(from: usize, to: usize) -> Selection {
    Selection::Text {
        ranges: vec![Span { from, to }],
    }
}

#[test]
fn test_toolbar_functions() {
    let mut v = view(doc(p("hello world")), range(1, 6));
    assert!(!is_bold(&v).unwrap());
    assert!(can_set_mark(&v, "bold").unwrap());

    set_bold(&mut v).unwrap();
    assert!(is_bold(&v).unwrap());
    assert_eq!(v.state().doc(), &doc(p((bold("hello"), " world"))));

    unset_bold(&mut v).unwrap();
    assert!(!is_bold(&v).unwrap());
    assert_eq!(v.state().doc(), &doc(p("hello world")));

    toggle_bold(&mut v).unwrap();
    assert!(is_bold(&v).unwrap());
    toggle_bold(&mut v).unwrap();
    assert!(!is_bold(&v).unwrap());
}

#[test]
fn test_listeners() {
    let mut v = view(doc(p("hello")), Selection::Cursor { pos: 2 });
    let calls = Rc::new(Cell::new(0));
    let bold_seen = Rc::new(Cell::new(false));

    let counter = calls.clone();
    let seen = bold_seen.clone();
    v.on_update(move |state| {
        counter.set(counter.get() + 1);
        seen.set(prosemirror_marks::commands::is_mark_active(state, "bold").unwrap());
    });

    set_bold(&mut v).unwrap();
    assert_eq!(calls.get(), 1);
    assert!(bold_seen.get());

    let tr = v.state().tr();
    v.dispatch(tr).unwrap();
    assert_eq!(calls.get(), 2);
    // an empty transaction does not touch stored marks
    assert!(bold_seen.get());
}

#[test]
fn test_stale_transaction() {
    let mut v = view(doc(p("hello")), range(1, 3));
    let calls = Rc::new(Cell::new(0));
    let counter = calls.clone();
    v.on_update(move |_| counter.set(counter.get() + 1));

    let stale = v.state().tr();
    set_bold(&mut v).unwrap();
    assert_eq!(calls.get(), 1);

    let err = v.dispatch(stale).unwrap_err();
    assert!(matches!(err, ApplyError::Mismatch));
    assert_eq!(calls.get(), 1);
    assert!(is_bold(&v).unwrap());
}

#[test]
fn test_execute() {
    let mut v = view(doc(p("hello")), range(1, 3));

    let select_all = |state: &EditorState<Basic>| -> Result<Transaction<Basic>, CommandError> {
        let mut tr = state.tr();
        tr.set_selection(range(1, 6))?;
        Ok(tr)
    };
    v.execute(&select_all).unwrap();
    assert_eq!(v.state().selection(), &range(1, 6));

    let state = v.execute(&SetMark::new("em", None)).unwrap();
    assert!(prosemirror_marks::commands::is_mark_active(state, BasicMarkType::Em).unwrap());

    let err = v.execute(&SetMark::new("underline", None)).unwrap_err();
    assert!(matches!(
        err,
        ViewError::Command(CommandError::UnknownMarkType { .. })
    ));
}

#[test]
fn test_menu_bar() {
    let mut v = view(doc(p(("ab", datetime(None), "cd"))), range(1, 3));
    let mut menu = MenuBar::new();
    menu.push(MenuItem::mark("Bold", "bold"))
        .push(MenuItem::mark("Italic", BasicMarkType::Em));
    menu.update(v.state()).unwrap();

    let status: Vec<_> = menu
        .items()
        .iter()
        .map(|item| (item.label(), item.active(), item.enabled()))
        .collect();
    assert_eq!(status, vec![("Bold", false, true), ("Italic", false, true)]);

    assert!(menu.click(0, &mut v).unwrap());
    assert!(menu.items()[0].active());
    assert!(!menu.items()[1].active());
    assert!(!menu.click(5, &mut v).unwrap());

    // a node selection of the date picker can not be marked
    let mut tr = v.state().tr();
    tr.set_selection(Selection::Node { from: 3, to: 4 }).unwrap();
    v.dispatch(tr).unwrap();
    menu.update(v.state()).unwrap();
    assert!(!menu.items()[0].enabled());
    assert!(!menu.click(0, &mut v).unwrap());
}

#[test]
fn test_menu_item() {
    let mut v = view(doc(p("hello")), Selection::Cursor { pos: 3 });
    let mut item = MenuItem::mark("Bold", "bold");
    item.update(v.state()).unwrap();
    assert!(!item.active());

    item.click(&mut v).unwrap();
    assert!(item.active());
    assert!(v.state().stored_marks().is_some());

    let mut custom = MenuItem::new("Bold", SetMark::new("bold", None)).with_enabled(|_| Ok(false));
    custom.update(v.state()).unwrap();
    assert!(!custom.enabled());
    assert!(!custom.active());
}
