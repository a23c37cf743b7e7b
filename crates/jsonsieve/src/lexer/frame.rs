use alloc::string::String;

use crate::value::ContainerKind;

/// Position inside an open array.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ArrayState {
    /// Just after `[`.
    Empty,
    AfterValue,
    AfterComma,
}

/// Position inside an open object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ObjectState {
    /// Just after `{`.
    Empty,
    /// A member name has been read, `:` comes next.
    AfterName,
    AfterColon,
    AfterValue,
    AfterComma,
}

/// Stack entry, one per open container.
#[derive(Debug, Clone)]
pub(crate) enum Frame {
    Array {
        state: ArrayState,
    },
    Object {
        state: ObjectState,
        /// Member name waiting for its value.
        pending_key: Option<String>,
    },
}

impl Frame {
    pub(crate) fn new(kind: ContainerKind) -> Self {
        match kind {
            ContainerKind::Array => Frame::Array {
                state: ArrayState::Empty,
            },
            ContainerKind::Object => Frame::Object {
                state: ObjectState::Empty,
                pending_key: None,
            },
        }
    }

    pub(crate) fn kind(&self) -> ContainerKind {
        match self {
            Frame::Array { .. } => ContainerKind::Array,
            Frame::Object { .. } => ContainerKind::Object,
        }
    }

    /// Whether a string opened in this frame is a member name rather than a
    /// value.
    pub(crate) fn expects_name(&self) -> bool {
        matches!(
            self,
            Frame::Object {
                state: ObjectState::Empty | ObjectState::AfterComma,
                ..
            }
        )
    }
}
