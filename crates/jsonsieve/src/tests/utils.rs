use alloc::{string::String, vec::Vec};
use core::convert::Infallible;

use crate::{LexError, Lexer, LexerOptions, ParseEvent, Value};

/// Lexes `chunks` in order and returns every event, `Stop` included.
pub(crate) fn lex_chunks<'a>(
    chunks: impl IntoIterator<Item = &'a str>,
    options: LexerOptions,
) -> Result<Vec<ParseEvent>, LexError<Infallible>> {
    let mut events = Vec::new();
    let mut lexer = Lexer::with_options(
        |e: ParseEvent| {
            events.push(e);
            Ok::<_, Infallible>(())
        },
        options,
    );
    for chunk in chunks {
        lexer.process(chunk)?;
    }
    lexer.finish()?;
    drop(lexer);
    Ok(events)
}

pub(crate) fn lex(src: &str) -> Result<Vec<ParseEvent>, LexError<Infallible>> {
    lex_chunks([src], LexerOptions::default())
}

/// Splits `src` into non-empty chunks whose sizes (in characters) are derived
/// from `splits`. Whatever is left over becomes the last chunk.
pub(crate) fn split_chunks(src: &str, splits: &[usize]) -> Vec<String> {
    let chars: Vec<char> = src.chars().collect();
    let mut chunks = Vec::new();
    let mut idx = 0;
    for s in splits {
        let remaining = chars.len() - idx;
        if remaining == 0 {
            break;
        }
        let size = 1 + (s % remaining);
        chunks.push(chars[idx..idx + size].iter().collect());
        idx += size;
    }
    if idx < chars.len() {
        chunks.push(chars[idx..].iter().collect::<String>());
    }
    chunks
}

/// Rebuilds the top-level values an event stream describes.
pub(crate) fn reconstruct(events: &[ParseEvent]) -> Vec<Value> {
    let mut roots = Vec::new();
    let mut stack: Vec<(Option<String>, Value)> = Vec::new();
    for event in events {
        let (key, value) = match event {
            ParseEvent::Stop => continue,
            ParseEvent::Descend { key, kind } => {
                stack.push((key.clone(), kind.empty_value()));
                continue;
            }
            ParseEvent::Value { key, value } => (key.clone(), value.clone()),
            ParseEvent::Ascend { .. } => stack.pop().expect("unbalanced event stream"),
        };
        match stack.last_mut() {
            None => roots.push(value),
            Some((_, Value::Array(items))) => items.push(value),
            Some((_, Value::Object(map))) => {
                map.insert(key.expect("member without key"), value);
            }
            Some((_, other)) => panic!("scalar {other} on the container stack"),
        }
    }
    roots
}

/// Renders one event per line, for plain-text snapshots.
pub(crate) fn render(events: &[ParseEvent]) -> String {
    events
        .iter()
        .map(|e| alloc::format!("{e:?}"))
        .collect::<Vec<_>>()
        .join("\n")
}
