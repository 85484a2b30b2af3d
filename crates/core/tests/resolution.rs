use galah_core::extract::path_at;
use galah_core::resolve::resolve;
use galah_core::{NeverCancel, Position, Settings, Span, TextDocument};
use tokio_util::sync::CancellationToken;

fn doc(text: &str) -> TextDocument {
    TextDocument::new(text.to_string(), 0)
}

#[test]
fn enum_on_first_line() {
    let d = doc("enum \"Foo\" { }\n");
    let span = resolve(&d, "Foo", &NeverCancel, &Settings::default());
    assert_eq!(span, Some(Span::new(0, 6, 9)));
}

#[test]
fn nested_path_resolves_to_last_component() {
    let d = doc("struct \"Foo\"\n\n\n\n\nstruct \"Bar\"\n");
    let span = resolve(&d, "Foo/Bar", &NeverCancel, &Settings::default());
    assert_eq!(span, Some(Span::new(5, 8, 11)));
}

#[test]
fn declarations_in_reverse_order_do_not_resolve() {
    let d = doc("class \"Bar\"\n\n\n\n\nclass \"Foo\"\n");
    assert_eq!(
        resolve(&d, "Foo/Bar", &NeverCancel, &Settings::default()),
        None
    );
}

#[test]
fn hover_token_then_definition_round_trip() {
    let d = doc(concat!(
        "enum \"Shape\" {\n",
        "  struct \"Circle\" {\n",
        "    radius: f32\n",
        "  }\n",
        "}\n",
        "field: <Shape/Square> and <Shape/Circle>\n",
    ));
    let settings = Settings::default();

    let token = path_at(&d, Position::new(5, 30), &settings).expect("token under cursor");
    assert_eq!(token.text, "Shape/Circle");
    assert_eq!(token.span, Span::new(5, 27, 39));

    let target = resolve(&d, &token.text, &NeverCancel, &settings);
    assert_eq!(target, Some(Span::new(1, 10, 16)));

    let other = path_at(&d, Position::new(5, 10), &settings).expect("first token");
    assert_eq!(other.text, "Shape/Square");
    assert_eq!(resolve(&d, &other.text, &NeverCancel, &settings), None);
}

#[test]
fn cancelled_token_is_a_soft_miss() {
    let d = doc("enum \"Foo\"\n");
    let token = CancellationToken::new();
    token.cancel();
    assert_eq!(resolve(&d, "Foo", &token, &Settings::default()), None);
}

#[test]
fn edits_are_seen_by_the_next_request() {
    let mut d = doc("enum \"Foo\"\n");
    let settings = Settings::default();
    assert!(resolve(&d, "Bar", &NeverCancel, &settings).is_none());

    d.apply_change(
        Some((Position::new(0, 6), Position::new(0, 9))),
        "Bar",
    );
    assert_eq!(
        resolve(&d, "Bar", &NeverCancel, &settings),
        Some(Span::new(0, 6, 9))
    );
}
