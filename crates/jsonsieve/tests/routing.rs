#![allow(missing_docs)]

mod common;

use common::{Trace, record, run, run_chunks, run_per_char};
use jsonsieve::{ArrayNode, CallbackError, Interest, LexerOptions, ObjectNode, Sieve, Value};

fn mark_begin(
    tag: &'static str,
) -> impl Fn(&mut Trace, Option<&str>) -> Result<(), CallbackError> + Send + Sync + 'static {
    move |trace: &mut Trace, key: Option<&str>| {
        trace.push(format!("{tag}:begin({})", key.unwrap_or("-")));
        Ok(())
    }
}

fn mark_end(
    tag: &'static str,
) -> impl Fn(&mut Trace) -> Result<(), CallbackError> + Send + Sync + 'static {
    move |trace: &mut Trace| {
        trace.push(format!("{tag}:end"));
        Ok(())
    }
}

#[test]
fn wildcard_batch_is_delivered_once_before_end() {
    let root = || {
        ObjectNode::new()
            .wildcard(record("batch"))
            .on_end(mark_end("root"))
    };
    let expected = [r#"batch={"a":1,"b":2}"#, "root:end"];

    assert_eq!(run(root(), r#"{"a":1,"b":2}"#).unwrap(), expected);
    assert_eq!(run_per_char(root(), r#"{"a":1,"b":2}"#).unwrap(), expected);
}

#[test]
fn named_children_are_excluded_from_the_batch() {
    let root = || {
        ObjectNode::new()
            .on_begin(mark_begin("root"))
            .child(
                "rows",
                ArrayNode::new(record("row"))
                    .on_begin(mark_begin("rows"))
                    .on_end(mark_end("rows")),
            )
            .wildcard(record("rest"))
            .on_end(mark_end("root"))
    };
    let src = r#"{"total_rows":2,"rows":[{"id":1},{"id":2}]}"#;
    let expected = [
        "root:begin(-)",
        "rows:begin(rows)",
        r#"row={"id":1}"#,
        r#"row={"id":2}"#,
        "rows:end",
        r#"rest={"total_rows":2}"#,
        "root:end",
    ];

    assert_eq!(run(root(), src).unwrap(), expected);
    assert_eq!(run_per_char(root(), src).unwrap(), expected);
}

#[test]
fn wildcard_batch_materializes_containers_in_document_order() {
    let root = ObjectNode::new()
        .child("skip_me_not", record("named"))
        .wildcard(record("rest"));
    let trace = run(
        root,
        r#"{"z": {"deep": [1, {"x": null}]}, "skip_me_not": 0, "a": [], "m": "s"}"#,
    )
    .unwrap();
    assert_eq!(
        trace,
        [
            "named=0",
            r#"rest={"z":{"deep":[1,{"x":null}]},"a":[],"m":"s"}"#
        ]
    );
}

#[test]
fn scalars_and_escapes_reach_callbacks_decoded() {
    let src = r#"[3.14, -0, 1e10, NaN, Infinity, "A", "café", "\t", "😀"]"#;
    let expected = [
        "v=3.14",
        "v=-0",
        "v=10000000000",
        "v=NaN",
        "v=Infinity",
        r#"v="A""#,
        r#"v="café""#,
        r#"v="\t""#,
        r#"v="😀""#,
    ];
    assert_eq!(run(ArrayNode::new(record("v")), src).unwrap(), expected);
    assert_eq!(run_per_char(ArrayNode::new(record("v")), src).unwrap(), expected);
}

#[test]
fn subtrees_nobody_asked_for_are_skipped() {
    let root = ObjectNode::new().child("wanted", record("wanted"));
    let trace = run(
        root,
        r#"{"noise": {"wanted": 1, "deeper": [[{"wanted": 2}]]}, "more": [1, 2, 3], "wanted": 3}"#,
    )
    .unwrap();
    assert_eq!(trace, ["wanted=3"]);
}

#[test]
fn shared_subtree_drives_several_members() {
    let person: Interest<Trace> = ObjectNode::new()
        .on_begin(mark_begin("person"))
        .child("name", record("name"))
        .into();
    let root = ObjectNode::new()
        .child("author", person.clone())
        .child("editor", person);

    let trace = run(
        root,
        r#"{"author": {"name": "Ada", "age": 36}, "title": "Notes", "editor": {"name": "Grace"}}"#,
    )
    .unwrap();
    assert_eq!(
        trace,
        [
            "person:begin(author)",
            r#"name="Ada""#,
            "person:begin(editor)",
            r#"name="Grace""#,
        ]
    );
}

#[test]
fn node_wildcard_recurses_into_each_member() {
    let root = ObjectNode::new().wildcard(
        ObjectNode::new()
            .on_begin(mark_begin("entry"))
            .child("v", record("v")),
    );
    let trace = run(root, r#"{"a": {"v": 1}, "b": 2, "c": {"v": [true]}}"#).unwrap();
    assert_eq!(
        trace,
        ["entry:begin(a)", "v=1", "entry:begin(c)", "v=[true]"]
    );
}

#[test]
fn nested_array_nodes() {
    let root = ArrayNode::new(
        ArrayNode::new(record("cell"))
            .on_begin(mark_begin("row"))
            .on_end(mark_end("row")),
    );
    let trace = run(root, "[[1, 2], [], [3]]").unwrap();
    assert_eq!(
        trace,
        [
            "row:begin(-)",
            "cell=1",
            "cell=2",
            "row:end",
            "row:begin(-)",
            "row:end",
            "row:begin(-)",
            "cell=3",
            "row:end",
        ]
    );
}

#[test]
fn shape_mismatch_is_skipped() {
    let root = ObjectNode::new()
        .child("list", ArrayNode::new(record("item")))
        .child("obj", ObjectNode::new().wildcard(record("members")))
        .child("after", record("after"));
    let trace = run(
        root,
        r#"{"list": {"not": "a list"}, "obj": [1, 2], "after": "ok"}"#,
    )
    .unwrap();
    assert_eq!(trace, [r#"after="ok""#]);
}

#[test]
fn newline_delimited_documents() {
    let options = LexerOptions {
        allow_multiple_json_values: true,
        ..Default::default()
    };
    let root = ObjectNode::new().child("id", record("id"));
    let trace = run_chunks(
        root,
        &["{\"id\": 1}\n{\"id\"", ": 2}\n", "{\"other\": 3}\n"],
        options,
    )
    .unwrap();
    assert_eq!(trace, ["id=1", "id=2"]);
}

#[test]
fn context_is_available_between_chunks() {
    let root = ArrayNode::new(Interest::leaf(|seen: &mut Vec<Value>, v| {
        seen.push(v);
        Ok(())
    }));
    let mut sieve = Sieve::new(root.into(), Vec::new()).unwrap();

    sieve.feed("[1, 2, 3").unwrap();
    assert_eq!(sieve.context().len(), 2, "3 is not terminated yet");
    sieve.context_mut().clear();
    sieve.feed("]").unwrap();

    assert_eq!(sieve.finish().unwrap(), [Value::Number(3.0)]);
}
