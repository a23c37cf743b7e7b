#![no_main]
//! Chunking must never change what the lexer reports, and the router must
//! never panic on whatever the lexer lets through.
//!
//! Input layout: one option byte, four bytes of split seed, then the
//! document. The custom mutator usually keeps the header and regenerates the
//! document from an arbitrary [`Value`], so most runs reach deep into the
//! grammar instead of failing on the first byte.

use std::{cell::RefCell, convert::Infallible};

use arbitrary::{Arbitrary, Unstructured};
use jsonsieve::{
    Array, ArrayNode, Interest, Lexer, LexerOptions, Map, ObjectNode, ParseEvent, Sieve, Value,
};
use libfuzzer_sys::{fuzz_mutator, fuzz_target, fuzzer_mutate};
use rand::{Rng, SeedableRng, rngs::SmallRng};

const HEADER: usize = 5;
const MAX_NESTING: u32 = 6;

thread_local! {
    static RNG: RefCell<SmallRng> = RefCell::new(SmallRng::from_os_rng());
}

/// Separators placed between generated values; the non-ASCII ones only pass
/// when `allow_unicode_whitespace` is set.
const SEPARATORS: &[&str] = &[" ", "\t", "\n", "\r\n", "\u{00A0}", "\u{2003}", "\u{3000}"];

fn rng<R>(f: impl FnOnce(&mut SmallRng) -> R) -> R {
    RNG.with(|cell| f(&mut cell.borrow_mut()))
}

/// A [`Value`] built from fuzzer bytes, bounded in nesting.
struct Generated(Value);

impl<'a> Arbitrary<'a> for Generated {
    fn arbitrary(u: &mut Unstructured<'a>) -> arbitrary::Result<Self> {
        generate(u, 0).map(Generated)
    }
}

fn generate(u: &mut Unstructured<'_>, depth: u32) -> arbitrary::Result<Value> {
    let choices = if depth >= MAX_NESTING { 5 } else { 7 };
    Ok(match u.choose_index(choices)? {
        0 => Value::Null,
        1 => Value::Boolean(u.arbitrary()?),
        2 => Value::Number(u.arbitrary()?),
        3 => Value::Number(f64::from(u.arbitrary::<i32>()?)),
        4 => Value::String(u.arbitrary()?),
        5 => {
            let len = u.int_in_range(0..=4)?;
            let items: Array = (0..len)
                .map(|_| generate(u, depth + 1))
                .collect::<arbitrary::Result<_>>()?;
            Value::Array(items)
        }
        _ => {
            let len = u.int_in_range(0..=4)?;
            let mut members = Map::new();
            for _ in 0..len {
                members.insert(u.arbitrary()?, generate(u, depth + 1)?);
            }
            Value::Object(members)
        }
    })
}

/// Regenerate the document behind a fresh header: one or more rendered
/// values, separated and surrounded by whitespace.
fn regenerate(data: &mut [u8], max_size: usize) -> usize {
    let mut text = String::new();
    let documents = rng(|r| r.random_range(1..=3));
    for _ in 0..documents {
        text.push_str(SEPARATORS[rng(|r| r.random_range(0..SEPARATORS.len()))]);
        let entropy: Vec<u8> = rng(|r| (0..r.random_range(8..256)).map(|_| r.random()).collect());
        if let Ok(Generated(value)) = Generated::arbitrary(&mut Unstructured::new(&entropy)) {
            text.push_str(&value.to_string());
        }
    }

    data[0] = rng(|r| r.random::<u8>() & 0b111);
    data[1..HEADER].copy_from_slice(&rng(|r| r.random::<u32>()).to_le_bytes());

    // Truncation may cut a code point; the target decodes lossily.
    let len = text.len().min(max_size - HEADER);
    data[HEADER..HEADER + len].copy_from_slice(&text.as_bytes()[..len]);
    HEADER + len
}

fuzz_mutator!(|data: &mut [u8], size: usize, max_size: usize, seed: u32| {
    if max_size > HEADER && (size < HEADER || seed % 8 == 0) {
        regenerate(data, max_size)
    } else {
        fuzzer_mutate(data, size, max_size)
    }
});

/// Events rendered with `Debug` (NaN never compares equal) and the failure
/// as (kind, line, column). The chunk offset is left out since it depends
/// on the split.
type Outcome = (Vec<String>, Option<(String, usize, usize)>);

fn lex(chunks: &[&str], options: LexerOptions) -> Outcome {
    let mut events = Vec::new();
    let mut lexer = Lexer::with_options(
        |e: ParseEvent| {
            events.push(format!("{e:?}"));
            Ok::<_, Infallible>(())
        },
        options,
    );

    let mut failure = chunks.iter().find_map(|chunk| lexer.process(chunk).err());
    if failure.is_none() {
        failure = lexer.finish().err();
    }
    drop(lexer);

    let failure = failure.map(|e| (format!("{:?}", e.kind()), e.line(), e.column()));
    (events, failure)
}

fn route(chunks: &[&str], options: LexerOptions, root: Interest<usize>) {
    let Ok(mut sieve) = Sieve::with_options(root, 0, options) else {
        return;
    };
    if chunks.iter().all(|chunk| sieve.feed(chunk).is_ok()) {
        let _ = sieve.finish();
    }
}

/// Split `text` into non-empty chunks on char boundaries, with sizes drawn
/// from `seed`.
fn split(text: &str, seed: u32) -> Vec<&str> {
    let mut rng = SmallRng::seed_from_u64(u64::from(seed));
    let mut chunks = Vec::new();
    let mut rest = text;
    while !rest.is_empty() {
        let mut at = rng.random_range(1..=rest.len());
        while !rest.is_char_boundary(at) {
            at += 1;
        }
        let (head, tail) = rest.split_at(at);
        chunks.push(head);
        rest = tail;
    }
    chunks
}

fuzz_target!(|data: &[u8]| {
    let Some((header, body)) = data.split_first_chunk::<HEADER>() else {
        return;
    };
    let flags = header[0];
    let seed = u32::from_le_bytes([header[1], header[2], header[3], header[4]]);
    let options = LexerOptions {
        allow_multiple_json_values: flags & 1 != 0,
        allow_unicode_whitespace: flags & 2 != 0,
        max_depth: (flags & 4 != 0).then_some(8),
    };

    let text = String::from_utf8_lossy(body);
    let chunks = split(&text, seed);

    let whole = lex(&[text.as_ref()], options);
    let chunked = lex(&chunks, options);
    assert_eq!(whole, chunked, "chunking changed the outcome");

    // Every strict single document serde_json accepts must lex cleanly too.
    if options == LexerOptions::default()
        && serde_json::from_str::<serde_json::Value>(&text).is_ok()
    {
        assert_eq!(whole.1, None, "rejected a document serde_json accepts");
    }

    let count = || {
        Interest::leaf(|n: &mut usize, _: Value| {
            *n += 1;
            Ok(())
        })
    };
    route(&chunks, options, ObjectNode::new().wildcard(count()).into());
    route(&chunks, options, ArrayNode::new(count()).into());
});
