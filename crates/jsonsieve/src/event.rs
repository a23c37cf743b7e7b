//! Events emitted by the lexer.
//!
//! A document is reported as a strictly nested sequence of
//! [`ParseEvent::Descend`] / [`ParseEvent::Ascend`] pairs with scalar
//! [`ParseEvent::Value`]s in between, terminated by [`ParseEvent::Stop`] once
//! the caller signals end of input.
//!
//! # Examples
//!
//! ```
//! use std::convert::Infallible;
//!
//! use jsonsieve::{ContainerKind, Lexer, ParseEvent, Value};
//!
//! let mut events = Vec::new();
//! let mut lexer = Lexer::new(|e: ParseEvent| {
//!     events.push(e);
//!     Ok::<_, Infallible>(())
//! });
//! lexer.process(r#"{"a": [tr"#).unwrap();
//! lexer.process("ue]}").unwrap();
//! lexer.finish().unwrap();
//! drop(lexer);
//!
//! assert_eq!(
//!     events,
//!     vec![
//!         ParseEvent::Descend { key: None, kind: ContainerKind::Object },
//!         ParseEvent::Descend { key: Some("a".into()), kind: ContainerKind::Array },
//!         ParseEvent::Value { key: None, value: Value::Boolean(true) },
//!         ParseEvent::Ascend { kind: ContainerKind::Array },
//!         ParseEvent::Ascend { kind: ContainerKind::Object },
//!         ParseEvent::Stop,
//!     ]
//! );
//! ```
use alloc::string::String;

use crate::value::{ContainerKind, Value};

/// An event generated by the [`Lexer`](crate::Lexer).
///
/// `key` is set only when the event belongs to a member of an open object; it
/// is the member name parsed before the `:`.
#[cfg_attr(
    any(test, feature = "serde"),
    derive(serde::Serialize, serde::Deserialize)
)]
#[cfg_attr(any(test, feature = "serde"), serde(tag = "event"))]
#[derive(Debug, Clone, PartialEq)]
pub enum ParseEvent {
    /// End of the document. Emitted once, by [`Lexer::finish`](crate::Lexer::finish).
    Stop,
    /// A complete scalar value.
    Value {
        /// Member name when the value sits directly inside an object.
        #[cfg_attr(
            any(test, feature = "serde"),
            serde(skip_serializing_if = "Option::is_none", default)
        )]
        key: Option<String>,
        /// The scalar itself.
        value: Value,
    },
    /// A container was opened.
    Descend {
        /// Member name under which the container is embedded, if any.
        #[cfg_attr(
            any(test, feature = "serde"),
            serde(skip_serializing_if = "Option::is_none", default)
        )]
        key: Option<String>,
        /// Shape of the container.
        kind: ContainerKind,
    },
    /// The most recently opened container was closed.
    Ascend {
        /// Shape of the container; always equals the matching `Descend`.
        kind: ContainerKind,
    },
}

impl ParseEvent {
    /// The member key carried by `Value` and `Descend` events.
    #[must_use]
    pub fn key(&self) -> Option<&str> {
        match self {
            ParseEvent::Value { key, .. } | ParseEvent::Descend { key, .. } => key.as_deref(),
            ParseEvent::Stop | ParseEvent::Ascend { .. } => None,
        }
    }
}
