//! Incremental JSON lexer.
//!
//! The [`Lexer`] accepts a document as a sequence of text chunks split at
//! arbitrary character boundaries (inside strings, escapes, numbers, or
//! whitespace runs) and pushes [`ParseEvent`]s into an [`EventSink`] as soon
//! as each one is decided. Feeding a document in any partition yields exactly
//! the same events as feeding it whole.
//!
//! There is no recursion: the nesting of the document lives in an explicit
//! frame stack, and everything a half-read token needs (pending literal,
//! string under construction, escape digits, a high surrogate waiting for its
//! partner) lives in the lexer itself. `process` can therefore return at any
//! character and resume later.
//!
//! ```rust
//! use std::convert::Infallible;
//!
//! use jsonsieve::{Lexer, ParseEvent, Value};
//!
//! let mut values = Vec::new();
//! let mut lexer = Lexer::new(|e: ParseEvent| {
//!     if let ParseEvent::Value { value, .. } = e {
//!         values.push(value);
//!     }
//!     Ok::<_, Infallible>(())
//! });
//! for chunk in ["[1", "2.5, \"caf\\u00", "e9\", nu", "ll]"] {
//!     lexer.process(chunk).unwrap();
//! }
//! lexer.finish().unwrap();
//! drop(lexer);
//!
//! assert_eq!(
//!     values,
//!     vec![Value::Number(12.5), Value::String("café".into()), Value::Null]
//! );
//! ```

mod escape;
mod frame;
mod literal;

use alloc::{string::String, vec::Vec};

use escape::{HIGH_SURROGATES, LOW_SURROGATES, UnicodeEscapeBuffer};
use frame::{ArrayState, Frame, ObjectState};

use crate::{
    error::{ErrorSource, LexError, SyntaxError},
    event::ParseEvent,
    options::LexerOptions,
    sink::EventSink,
    value::{ContainerKind, Value},
};

/// What the next character means.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    /// Between tokens, or inside a bare literal.
    Scanning,
    /// Inside a quoted string.
    String,
    /// Just after a backslash.
    Escape,
    /// Collecting the four digits of `\uXXXX`. `high` is set when these
    /// digits must form the low half of a surrogate pair.
    Unicode { high: Option<u16> },
    /// A high surrogate was decoded; its partner must start with `\`.
    SurrogateBackslash(u16),
    /// ... followed by `u`.
    SurrogateU(u16),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Status {
    Open,
    Finished,
    Failed,
}

type Step<E> = Result<(), ErrorSource<E>>;

/// The incremental JSON lexer.
///
/// See the [module documentation](self) for an overview.
#[derive(Debug)]
pub struct Lexer<S: EventSink> {
    sink: S,
    options: LexerOptions,
    status: Status,

    mode: Mode,
    /// Bare token being collected; survives across `process` calls.
    literal: String,
    /// String being collected; survives across `process` calls.
    string: String,
    /// Whether `string` is a member name rather than a value.
    string_is_name: bool,
    unicode_escape: UnicodeEscapeBuffer,

    frames: Vec<Frame>,
    /// A complete top-level value has been read.
    top_level_done: bool,

    line: usize,
    column: usize,
}

impl<S: EventSink> Lexer<S> {
    /// Creates a lexer with default [`LexerOptions`] that reports to `sink`.
    #[must_use]
    pub fn new(sink: S) -> Self {
        Self::with_options(sink, LexerOptions::default())
    }

    /// Creates a lexer that reports to `sink`.
    #[must_use]
    pub fn with_options(sink: S, options: LexerOptions) -> Self {
        Self {
            sink,
            options,
            status: Status::Open,
            mode: Mode::Scanning,
            literal: String::new(),
            string: String::new(),
            string_is_name: false,
            unicode_escape: UnicodeEscapeBuffer::new(),
            frames: Vec::with_capacity(16),
            top_level_done: false,
            line: 1,
            column: 1,
        }
    }

    /// Ingests one fragment of the document, emitting every event it
    /// completes before returning.
    ///
    /// # Errors
    ///
    /// Fails on the first malformed character or the first sink error. The
    /// lexer is then closed; any later call returns [`ErrorSource::Closed`].
    pub fn process(&mut self, chunk: &str) -> Result<(), LexError<S::Error>> {
        self.ensure_open()?;

        for (offset, c) in chunk.chars().enumerate() {
            if let Err(kind) = self.step(c) {
                return Err(self.fail(kind, Some(offset)));
            }
            if c == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }

        Ok(())
    }

    /// Signals end of input: terminates a pending literal, checks that the
    /// document is complete, and emits [`ParseEvent::Stop`].
    ///
    /// # Errors
    ///
    /// [`SyntaxError::UnterminatedEscape`] inside a string,
    /// [`SyntaxError::UnexpectedEndOfInput`] with containers still open, or a
    /// sink error.
    pub fn finish(&mut self) -> Result<(), LexError<S::Error>> {
        self.ensure_open()?;

        match self.finish_inner() {
            Ok(()) => {
                self.status = Status::Finished;
                log::debug!("lexer finished at {}:{}", self.line, self.column);
                Ok(())
            }
            Err(kind) => Err(self.fail(kind, None)),
        }
    }

    /// Current nesting depth.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// The sink events are pushed into.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Mutable access to the sink.
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Consumes the lexer, returning its sink.
    pub fn into_sink(self) -> S {
        self.sink
    }

    fn ensure_open(&self) -> Result<(), LexError<S::Error>> {
        if self.status == Status::Open {
            Ok(())
        } else {
            Err(LexError {
                kind: ErrorSource::Closed,
                line: self.line,
                column: self.column,
                offset: None,
            })
        }
    }

    fn fail(&mut self, kind: ErrorSource<S::Error>, offset: Option<usize>) -> LexError<S::Error> {
        self.status = Status::Failed;
        if let ErrorSource::Syntax(err) = &kind {
            log::debug!("syntax error at {}:{}: {err}", self.line, self.column);
        }
        LexError {
            kind,
            line: self.line,
            column: self.column,
            offset,
        }
    }

    fn finish_inner(&mut self) -> Step<S::Error> {
        if self.mode != Mode::Scanning {
            return Err(SyntaxError::UnterminatedEscape.into());
        }
        self.flush_literal()?;
        if !self.frames.is_empty() {
            return Err(SyntaxError::UnexpectedEndOfInput.into());
        }
        self.emit(ParseEvent::Stop)
    }

    #[inline]
    fn emit(&mut self, event: ParseEvent) -> Step<S::Error> {
        self.sink.on_event(event).map_err(ErrorSource::Sink)
    }

    #[inline]
    fn is_whitespace(&self, c: char) -> bool {
        matches!(c, ' ' | '\n' | '\r' | '\t')
            || (self.options.allow_unicode_whitespace && c.is_whitespace())
    }

    fn step(&mut self, c: char) -> Step<S::Error> {
        match self.mode {
            Mode::Scanning => self.scan(c),
            Mode::String => {
                match c {
                    '"' => self.close_string()?,
                    '\\' => self.mode = Mode::Escape,
                    _ => self.string.push(c),
                }
                Ok(())
            }
            Mode::Escape => {
                if c == 'u' {
                    self.unicode_escape.reset();
                    self.mode = Mode::Unicode { high: None };
                } else {
                    let decoded = escape::short_escape(c).ok_or(SyntaxError::InvalidEscape(c))?;
                    self.string.push(decoded);
                    self.mode = Mode::String;
                }
                Ok(())
            }
            Mode::Unicode { high } => {
                if let Some(unit) = self.unicode_escape.feed(c)? {
                    self.code_unit(unit, high)?;
                }
                Ok(())
            }
            Mode::SurrogateBackslash(high) => {
                if c != '\\' {
                    return Err(SyntaxError::UnbalancedSurrogatePair.into());
                }
                self.mode = Mode::SurrogateU(high);
                Ok(())
            }
            Mode::SurrogateU(high) => {
                if c != 'u' {
                    return Err(SyntaxError::UnbalancedSurrogatePair.into());
                }
                self.unicode_escape.reset();
                self.mode = Mode::Unicode { high: Some(high) };
                Ok(())
            }
        }
    }

    /// Handles one decoded `\uXXXX` code unit.
    fn code_unit(&mut self, unit: u16, high: Option<u16>) -> Result<(), SyntaxError> {
        let decoded = match high {
            Some(high) => escape::combine_surrogates(high, unit),
            None if HIGH_SURROGATES.contains(&unit) => {
                self.mode = Mode::SurrogateBackslash(unit);
                return Ok(());
            }
            None if LOW_SURROGATES.contains(&unit) => None,
            None => char::from_u32(u32::from(unit)),
        };
        let c = decoded.ok_or(SyntaxError::UnbalancedSurrogatePair)?;
        self.string.push(c);
        self.mode = Mode::String;
        Ok(())
    }

    fn scan(&mut self, c: char) -> Step<S::Error> {
        match c {
            '{' => self.open(ContainerKind::Object, c),
            '[' => self.open(ContainerKind::Array, c),
            '}' => self.close(ContainerKind::Object, c),
            ']' => self.close(ContainerKind::Array, c),
            ':' => {
                self.flush_literal()?;
                self.colon()?;
                Ok(())
            }
            ',' => {
                self.flush_literal()?;
                self.comma()?;
                Ok(())
            }
            '"' => {
                self.flush_literal()?;
                self.open_string(c)?;
                Ok(())
            }
            c if self.is_whitespace(c) => self.flush_literal(),
            c => {
                if self.literal.is_empty() {
                    self.check_value_slot(c)?;
                }
                self.literal.push(c);
                Ok(())
            }
        }
    }

    /// Checks that a value may start here. `found` is the character that
    /// starts it, for error reporting.
    fn check_value_slot(&self, found: char) -> Result<(), SyntaxError> {
        match self.frames.last() {
            None if self.top_level_done && !self.options.allow_multiple_json_values => {
                Err(SyntaxError::UnexpectedCharacter(found))
            }
            None => Ok(()),
            Some(Frame::Array { state }) => match state {
                ArrayState::Empty | ArrayState::AfterComma => Ok(()),
                ArrayState::AfterValue => Err(SyntaxError::MissingComma),
            },
            Some(Frame::Object { state, .. }) => match state {
                ObjectState::AfterColon => Ok(()),
                ObjectState::AfterName => Err(SyntaxError::MissingColon),
                ObjectState::AfterValue => Err(SyntaxError::MissingComma),
                ObjectState::Empty | ObjectState::AfterComma => {
                    Err(SyntaxError::UnexpectedCharacter(found))
                }
            },
        }
    }

    /// Marks the current slot as filled and returns the member key the value
    /// belongs to, if any.
    fn fill_value_slot(&mut self) -> Option<String> {
        match self.frames.last_mut() {
            None => {
                self.top_level_done = true;
                None
            }
            Some(Frame::Array { state }) => {
                *state = ArrayState::AfterValue;
                None
            }
            Some(Frame::Object { state, pending_key }) => {
                *state = ObjectState::AfterValue;
                pending_key.take()
            }
        }
    }

    fn emit_value(&mut self, value: Value) -> Step<S::Error> {
        let key = self.fill_value_slot();
        self.emit(ParseEvent::Value { key, value })
    }

    fn flush_literal(&mut self) -> Step<S::Error> {
        if self.literal.is_empty() {
            return Ok(());
        }
        let value = literal::parse_literal(&self.literal)?;
        self.literal.clear();
        self.emit_value(value)
    }

    fn open(&mut self, kind: ContainerKind, c: char) -> Step<S::Error> {
        self.flush_literal()?;
        self.check_value_slot(c)?;
        if let Some(limit) = self.options.max_depth {
            if self.frames.len() >= limit {
                return Err(SyntaxError::DepthLimitExceeded(limit).into());
            }
        }
        let key = self.fill_value_slot();
        self.frames.push(Frame::new(kind));
        self.emit(ParseEvent::Descend { key, kind })
    }

    fn close(&mut self, kind: ContainerKind, c: char) -> Step<S::Error> {
        self.flush_literal()?;
        let Some(top) = self.frames.last() else {
            return Err(SyntaxError::StackUnderflow(c).into());
        };
        if top.kind() != kind {
            return Err(SyntaxError::MismatchedBracket {
                expected: top.kind().close_char(),
                found: c,
            }
            .into());
        }
        match top {
            Frame::Array {
                state: ArrayState::AfterComma,
            }
            | Frame::Object {
                state: ObjectState::AfterComma,
                ..
            } => return Err(SyntaxError::ExtraComma.into()),
            Frame::Object {
                state: ObjectState::AfterName,
                ..
            } => return Err(SyntaxError::MissingColon.into()),
            Frame::Object {
                state: ObjectState::AfterColon,
                ..
            } => return Err(SyntaxError::UnexpectedCharacter(c).into()),
            _ => {}
        }
        self.frames.pop();
        self.emit(ParseEvent::Ascend { kind })
    }

    fn colon(&mut self) -> Result<(), SyntaxError> {
        match self.frames.last_mut() {
            Some(Frame::Object { state, .. }) if *state == ObjectState::AfterName => {
                *state = ObjectState::AfterColon;
                Ok(())
            }
            _ => Err(SyntaxError::UnexpectedCharacter(':')),
        }
    }

    fn comma(&mut self) -> Result<(), SyntaxError> {
        match self.frames.last_mut() {
            None => Err(SyntaxError::UnexpectedCharacter(',')),
            Some(Frame::Array { state }) => match state {
                ArrayState::AfterValue => {
                    *state = ArrayState::AfterComma;
                    Ok(())
                }
                ArrayState::Empty | ArrayState::AfterComma => Err(SyntaxError::ExtraComma),
            },
            Some(Frame::Object { state, pending_key }) => match state {
                ObjectState::AfterValue => {
                    *state = ObjectState::AfterComma;
                    *pending_key = None;
                    Ok(())
                }
                ObjectState::AfterName => Err(SyntaxError::MissingColon),
                ObjectState::Empty | ObjectState::AfterComma | ObjectState::AfterColon => {
                    Err(SyntaxError::ExtraComma)
                }
            },
        }
    }

    fn open_string(&mut self, c: char) -> Result<(), SyntaxError> {
        let is_name = self.frames.last().is_some_and(Frame::expects_name);
        if !is_name {
            self.check_value_slot(c)?;
        }
        self.string_is_name = is_name;
        self.string.clear();
        self.mode = Mode::String;
        Ok(())
    }

    fn close_string(&mut self) -> Step<S::Error> {
        self.mode = Mode::Scanning;
        let s = core::mem::take(&mut self.string);
        if self.string_is_name {
            if let Some(Frame::Object { state, pending_key }) = self.frames.last_mut() {
                *state = ObjectState::AfterName;
                *pending_key = Some(s);
            }
            Ok(())
        } else {
            self.emit_value(Value::String(s))
        }
    }
}

