use crate::event::ParseEvent;

/// Receiver of the lexer's event stream.
///
/// The lexer hands every event to its sink synchronously, in document order,
/// before [`Lexer::process`](crate::Lexer::process) returns. A sink error
/// aborts the stream: the lexer reports it as
/// [`ErrorSource::Sink`](crate::ErrorSource::Sink) and refuses further input.
///
/// Closures of the shape `FnMut(ParseEvent) -> Result<(), E>` are sinks, and
/// so is [`Router`](crate::Router).
pub trait EventSink {
    /// Error returned when the sink rejects an event.
    type Error;

    /// Consumes one event.
    ///
    /// # Errors
    ///
    /// Any error aborts the enclosing `process` / `finish` call.
    fn on_event(&mut self, event: ParseEvent) -> Result<(), Self::Error>;
}

impl<E, F> EventSink for F
where
    F: FnMut(ParseEvent) -> Result<(), E>,
{
    type Error = E;

    #[inline]
    fn on_event(&mut self, event: ParseEvent) -> Result<(), E> {
        self(event)
    }
}
