#![allow(missing_docs)]
#![allow(dead_code)]

use jsonsieve::{Interest, LexerOptions, Sieve, SieveError};

/// Context used by most tests: every callback appends one line.
pub type Trace = Vec<String>;

/// A leaf that records `tag=<value as JSON>`.
pub fn record(tag: &'static str) -> Interest<Trace> {
    Interest::leaf(move |trace: &mut Trace, v| {
        trace.push(format!("{tag}={v}"));
        Ok(())
    })
}

/// Feeds `chunks` in order and returns the trace.
pub fn run_chunks(
    root: impl Into<Interest<Trace>>,
    chunks: &[&str],
    options: LexerOptions,
) -> Result<Trace, SieveError> {
    let mut sieve = Sieve::with_options(root.into(), Trace::new(), options)
        .expect("root must be an array or object node");
    for chunk in chunks {
        sieve.feed(chunk)?;
    }
    sieve.finish()
}

/// Feeds `src` whole.
pub fn run(root: impl Into<Interest<Trace>>, src: &str) -> Result<Trace, SieveError> {
    run_chunks(root, &[src], LexerOptions::default())
}

/// Feeds `src` one character at a time.
pub fn run_per_char(root: impl Into<Interest<Trace>>, src: &str) -> Result<Trace, SieveError> {
    let chars: Vec<String> = src.chars().map(String::from).collect();
    let chunks: Vec<&str> = chars.iter().map(String::as_str).collect();
    run_chunks(root, &chunks, LexerOptions::default())
}
