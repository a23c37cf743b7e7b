//! Streaming JSON deserialization that only materializes what you ask for.
//!
//! A document is fed in text chunks of any size, split anywhere. The
//! [`Lexer`] turns them into a flat stream of [`ParseEvent`]s; the [`Router`]
//! matches that stream against an [`Interest`] tree and calls back with the
//! scalars and subtrees the tree names. Everything else passes through
//! without being kept in memory. [`Sieve`] wires the two together.

#![no_std]
extern crate alloc;

#[cfg(test)]
extern crate std;

mod event;
mod options;
mod sink;
mod value;

mod error;
mod interest;
mod lexer;
mod router;
mod sieve;

#[cfg(test)]
mod tests;

pub use error::{CallbackError, ErrorSource, LexError, RouterError, SyntaxError};
pub use event::ParseEvent;
pub use interest::{ArrayNode, BeginFn, EndFn, ErrorFn, Interest, LeafFn, ObjectNode};
pub use lexer::Lexer;
pub use options::LexerOptions;
pub use router::Router;
pub use sieve::{Sieve, SieveError};
pub use sink::EventSink;
pub use value::{Array, ContainerKind, Map, Value};
