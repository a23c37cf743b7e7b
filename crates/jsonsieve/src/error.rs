use alloc::{boxed::Box, string::String};

use thiserror::Error;

/// Error type consumer callbacks return. Any error type converts into it with
/// `?` or `.into()`.
pub type CallbackError = Box<dyn core::error::Error + Send + Sync + 'static>;

/// Failure reported by [`Lexer::process`](crate::Lexer::process) and
/// [`Lexer::finish`](crate::Lexer::finish).
///
/// `line` and `column` are 1-based and count characters over the whole
/// stream. `offset` is the character index of the offending character inside
/// the chunk that was being processed; it is `None` for failures detected at
/// end of input.
#[derive(Error, Debug, PartialEq)]
#[error("{kind} at {line}:{column}")]
pub struct LexError<E> {
    pub(crate) kind: ErrorSource<E>,
    pub(crate) line: usize,
    pub(crate) column: usize,
    pub(crate) offset: Option<usize>,
}

impl<E> LexError<E> {
    /// What went wrong.
    #[must_use]
    pub fn kind(&self) -> &ErrorSource<E> {
        &self.kind
    }

    /// The syntax error, if the document itself was malformed.
    #[must_use]
    pub fn syntax_error(&self) -> Option<&SyntaxError> {
        match &self.kind {
            ErrorSource::Syntax(e) => Some(e),
            _ => None,
        }
    }

    /// The sink's error, if the sink rejected an event.
    #[must_use]
    pub fn sink_error(&self) -> Option<&E> {
        match &self.kind {
            ErrorSource::Sink(e) => Some(e),
            _ => None,
        }
    }

    /// Consumes the error, returning the sink's error if there is one.
    #[must_use]
    pub fn into_sink_error(self) -> Option<E> {
        match self.kind {
            ErrorSource::Sink(e) => Some(e),
            _ => None,
        }
    }

    /// 1-based line of the failure.
    #[must_use]
    pub fn line(&self) -> usize {
        self.line
    }

    /// 1-based column of the failure.
    #[must_use]
    pub fn column(&self) -> usize {
        self.column
    }

    /// Character index of the failure inside the chunk being processed.
    #[must_use]
    pub fn offset(&self) -> Option<usize> {
        self.offset
    }
}

/// Origin of a [`LexError`].
#[derive(Error, Debug, PartialEq)]
pub enum ErrorSource<E> {
    /// The event sink rejected an event.
    #[error("sink error: {0}")]
    Sink(E),
    /// The document is malformed.
    #[error("syntax error: {0}")]
    Syntax(#[from] SyntaxError),
    /// The lexer already finished or failed and accepts no more input.
    #[error("lexer is closed")]
    Closed,
}

/// Ways a document can be malformed. The lexer never resynchronizes after
/// one of these.
#[derive(Debug, Error, PartialEq, Clone)]
pub enum SyntaxError {
    /// A close bracket does not match the innermost open container.
    #[error("mismatched bracket: expected '{expected}', found '{found}'")]
    MismatchedBracket {
        /// Close character of the innermost open container.
        expected: char,
        /// Close character that was read.
        found: char,
    },
    /// A close bracket with no container open.
    #[error("unbalanced '{0}' with no open container")]
    StackUnderflow(char),
    /// A bare token that is neither a keyword nor a complete number.
    #[error("unrecognized literal '{0}'")]
    UnrecognizedLiteral(String),
    /// An unknown short escape, or a non-hex digit inside `\uXXXX`.
    #[error("invalid escape character '{0}'")]
    InvalidEscape(char),
    /// Input ended inside a string or an escape sequence.
    #[error("unterminated string or escape sequence")]
    UnterminatedEscape,
    /// A UTF-16 surrogate escape without its partner.
    #[error("unbalanced UTF-16 surrogate pair")]
    UnbalancedSurrogatePair,
    /// Two separators in a row, or a separator with nothing before it.
    #[error("extra comma")]
    ExtraComma,
    /// Two values without a separator between them.
    #[error("expected ',' between values")]
    MissingComma,
    /// A member name that is not followed by `:`.
    #[error("expected ':' after member name")]
    MissingColon,
    /// A character that cannot appear at this position.
    #[error("unexpected character '{0}'")]
    UnexpectedCharacter(char),
    /// Nesting exceeded [`LexerOptions::max_depth`](crate::LexerOptions::max_depth).
    #[error("nesting depth exceeds limit of {0}")]
    DepthLimitExceeded(usize),
    /// Input ended with containers still open.
    #[error("unexpected end of input")]
    UnexpectedEndOfInput,
}

/// Failure reported by the [`Router`](crate::Router).
#[derive(Debug, Error)]
pub enum RouterError {
    /// An `Ascend` or `Value` arrived with no open container. This means the
    /// event stream and the router are out of step, not that the document is
    /// malformed.
    #[error("event arrived with an empty navigation stack")]
    EmptyNavigationStack,
    /// The interest-tree root is a leaf; it must be an array or object node.
    #[error("interest-tree root must be an array or object node")]
    InvalidRootShape,
    /// An object member event arrived without a member key.
    #[error("object member event without a key")]
    MissingMemberKey,
    /// `Stop` arrived while containers or an accumulation were still open.
    #[error("stream stopped with {0} container(s) still open")]
    IncompleteDocument(usize),
    /// A consumer callback failed.
    #[error("callback failed: {0}")]
    Callback(#[source] CallbackError),
}
