//! Benchmark – `jsonsieve::Lexer` and `jsonsieve::Sieve`
#![allow(missing_docs)]

use std::{convert::Infallible, time::Duration};

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use jsonsieve::{ArrayNode, Interest, Lexer, ObjectNode, ParseEvent, Sieve};

type Totals = (f64, usize);

/// Produce a deterministic ASCII document of `rows` records wrapped with some
/// metadata, so the benchmarks can either select or skip parts of it.
fn make_json_payload(rows: usize) -> String {
    let mut s = String::with_capacity(rows * 96);
    s.push_str(r#"{"total_rows": "#);
    s.push_str(&rows.to_string());
    s.push_str(r#", "offset": 0, "rows": ["#);
    for i in 0..rows {
        if i > 0 {
            s.push_str(", ");
        }
        s.push_str(&format!(
            r#"{{"id": {i}, "key": "row-{i}\tA", "value": {{"rev": "{}-x", "ok": true, "score": {}.25e1}}}}"#,
            i % 7,
            i % 100
        ));
    }
    s.push_str("]}");
    s
}

/// Feed `payload` in `parts` chunks and count the events the lexer emits.
fn run_lexer(payload: &str, parts: usize) -> usize {
    assert!(parts > 0);
    let chunk_size = payload.len().div_ceil(parts);
    let mut produced = 0usize;
    let mut lexer = Lexer::new(|_: ParseEvent| {
        produced += 1;
        Ok::<_, Infallible>(())
    });

    for chunk in payload.as_bytes().chunks(chunk_size) {
        lexer
            .process(std::str::from_utf8(chunk).expect("chunk is valid UTF-8"))
            .unwrap();
    }
    lexer.finish().unwrap();
    drop(lexer);

    produced
}

/// Sums every row's id and materializes every row's value.
fn selective_tree() -> Interest<Totals> {
    let row = ObjectNode::new()
        .child(
            "id",
            Interest::leaf(|acc: &mut Totals, v| {
                acc.0 += v.as_f64().unwrap_or_default();
                Ok(())
            }),
        )
        .child(
            "value",
            Interest::leaf(|acc: &mut Totals, v| {
                acc.1 += v.as_object().map_or(0, |m| m.len());
                Ok(())
            }),
        );
    ObjectNode::new().child("rows", ArrayNode::new(row)).into()
}

/// Skips everything: pure routing overhead.
fn skipping_tree() -> Interest<Totals> {
    ObjectNode::new().into()
}

fn run_sieve(payload: &str, parts: usize, root: &Interest<Totals>) -> Totals {
    let chunk_size = payload.len().div_ceil(parts);
    let mut sieve = Sieve::new(root.clone(), (0.0, 0)).unwrap();
    for chunk in payload.as_bytes().chunks(chunk_size) {
        sieve
            .feed(std::str::from_utf8(chunk).expect("chunk is valid UTF-8"))
            .unwrap();
    }
    sieve.finish().unwrap()
}

fn bench_lexer(c: &mut Criterion) {
    let payload = make_json_payload(1_000);

    let mut group = c.benchmark_group("lexer_split");
    for &parts in &[1usize, 100, 10_000] {
        group.bench_with_input(BenchmarkId::from_parameter(parts), &parts, |b, &p| {
            b.iter(|| black_box(run_lexer(black_box(&payload), p)));
        });
    }
    group.finish();
}

fn bench_sieve(c: &mut Criterion) {
    let payload = make_json_payload(1_000);
    let trees = [("selective", selective_tree()), ("skipping", skipping_tree())];

    let mut group = c.benchmark_group("sieve_split");
    for &parts in &[1usize, 100, 10_000] {
        for (name, root) in &trees {
            group.bench_with_input(BenchmarkId::new(parts.to_string(), name), root, |b, r| {
                b.iter(|| black_box(run_sieve(black_box(&payload), parts, r)));
            });
        }
    }
    group.finish();
}

fn criterion() -> Criterion {
    let mut c = Criterion::default();
    if cfg!(feature = "bench-fast") {
        c = c
            .warm_up_time(Duration::from_millis(10))
            .measurement_time(Duration::from_millis(100))
            .sample_size(10);
    } else {
        c = c
            .warm_up_time(Duration::from_secs(5))
            .measurement_time(Duration::from_secs(10));
    }
    c
}

criterion_group! { name = benches; config = criterion(); targets = bench_lexer, bench_sieve }
criterion_main!(benches);
