use prosemirror_marks::basic::helper::{bold, doc, em, node, p};
use prosemirror_marks::basic::{Basic, BasicMark, BasicMarkType};
use prosemirror_marks::transform::{AddMarkStep, RemoveMarkStep, Span, Step, StepKind};

#[test]
fn test_apply() {
    let d1 = doc(p("Hello World!"));
    let step1 = AddMarkStep::<Basic> {
        span: Span { from: 1, to: 9 },
        mark: BasicMark::Bold,
    };
    let d2 = step1.apply(&d1).unwrap();
    assert_eq!(d2, doc(p((bold("Hello Wo"), node("rld!")))));

    let step2 = Step::<Basic>::RemoveMark(RemoveMarkStep {
        span: Span { from: 3, to: 12 },
        mark_type: BasicMarkType::Bold,
    });
    let d3 = step2.apply(&d2).unwrap();
    assert_eq!(d3, doc(p((bold("He"), node("llo World!")))));
}

#[test]
fn test_deserialize() {
    let s1: Step<Basic> =
        serde_json::from_str(r#"{"stepType":"addMark","mark":{"type":"em"},"from":61,"to":648}"#)
            .unwrap();

    assert_eq!(
        s1,
        Step::AddMark(AddMarkStep {
            span: Span { from: 61, to: 648 },
            mark: BasicMark::Em,
        })
    );

    let s2: Step<Basic> =
        serde_json::from_str(r#"{"stepType":"removeMark","markType":"strong","from":1,"to":2}"#)
            .unwrap();

    assert_eq!(
        s2,
        Step::RemoveMark(RemoveMarkStep {
            span: Span { from: 1, to: 2 },
            mark_type: BasicMarkType::Bold,
        })
    );
}

#[test]
fn test_serialize() {
    let step = Step::<Basic>::AddMark(AddMarkStep {
        span: Span { from: 1, to: 3 },
        mark: BasicMark::Em,
    });
    assert_eq!(
        serde_json::to_value(&step).unwrap(),
        serde_json::json!({"stepType": "addMark", "from": 1, "to": 3, "mark": {"type": "em"}})
    );

    let d1 = doc(p("abc"));
    assert_eq!(step.apply(&d1).unwrap(), doc(p((em("ab"), "c"))));

    let remove = Step::<Basic>::RemoveMark(RemoveMarkStep {
        span: Span { from: 1, to: 2 },
        mark_type: BasicMarkType::Em,
    });
    assert_eq!(
        serde_json::to_value(&remove).unwrap(),
        serde_json::json!({"stepType": "removeMark", "from": 1, "to": 2, "markType": "em"})
    );
}
