/// Configuration options for the [`Lexer`](crate::Lexer).
///
/// # Examples
///
/// ```rust
/// use std::convert::Infallible;
///
/// use jsonsieve::{Lexer, LexerOptions, ParseEvent};
///
/// let options = LexerOptions {
///     allow_multiple_json_values: true,
///     max_depth: Some(64),
///     ..Default::default()
/// };
/// let lexer = Lexer::with_options(|_: ParseEvent| Ok::<_, Infallible>(()), options);
/// ```
///
/// # Default
///
/// Flags default to `false` and there is no depth limit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LexerOptions {
    /// Whether to accept more than one top-level value in a single stream.
    ///
    /// When `true`, documents may be concatenated or separated by whitespace,
    /// as in JSON Lines (JSONL) and newline-delimited JSON (ND-JSON). Each
    /// top-level value is reported with its own `Descend`/`Ascend` (or
    /// `Value`) events; `Stop` is still emitted once, at `finish`.
    ///
    /// # Default
    ///
    /// `false`
    pub allow_multiple_json_values: bool,

    /// Whether to treat any Unicode whitespace as a separator.
    ///
    /// By default only the four whitespace characters defined by JSON are
    /// separators: space (U+0020), line feed (U+000A), carriage return
    /// (U+000D), and horizontal tab (U+0009). Anything else becomes part of a
    /// literal and is rejected when that literal is classified.
    ///
    /// # Default
    ///
    /// `false`
    pub allow_unicode_whitespace: bool,

    /// Maximum nesting depth. Opening a container beyond it fails with
    /// [`SyntaxError::DepthLimitExceeded`](crate::SyntaxError::DepthLimitExceeded).
    ///
    /// # Default
    ///
    /// `None` (unlimited)
    pub max_depth: Option<usize>,
}
