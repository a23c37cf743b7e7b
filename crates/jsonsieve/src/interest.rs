//! The interest tree: a declarative description of which parts of a document
//! a consumer wants and what to do with them.
//!
//! A tree is built once, before streaming, from three kinds of node:
//!
//! - [`Interest::leaf`] wraps a callback. At a scalar position it receives
//!   the scalar; at a container position the whole subtree is materialized
//!   and handed over once, when the container closes.
//! - [`ArrayNode`] describes an array: begin/end hooks, the interest that
//!   applies to every element, and an optional hook that may recover from a
//!   failing element callback.
//! - [`ObjectNode`] describes an object: begin/end hooks, interests for
//!   specific member names, and an optional wildcard for every other member.
//!
//! Members and elements nobody asked for are skipped without being buffered.
//!
//! Nodes live behind [`Arc`], so an [`Interest`] is cheap to clone, a subtree
//! may be reused under several parents, and one tree may drive many
//! [`Router`](crate::Router)s on different threads at once. Callbacks get
//! mutable access to the router's context `C` instead of capturing mutable
//! state themselves.
//!
//! ```rust
//! use jsonsieve::{ArrayNode, Interest, ObjectNode, Value};
//!
//! #[derive(Default)]
//! struct Totals {
//!     ids: Vec<f64>,
//!     rows_seen: bool,
//! }
//!
//! let row = ObjectNode::new().child(
//!     "id",
//!     Interest::leaf(|t: &mut Totals, v: Value| {
//!         t.ids.extend(v.as_f64());
//!         Ok(())
//!     }),
//! );
//! let root: Interest<Totals> = ObjectNode::new()
//!     .child(
//!         "rows",
//!         ArrayNode::new(row).on_end(|t: &mut Totals| {
//!             t.rows_seen = true;
//!             Ok(())
//!         }),
//!     )
//!     .into();
//! # let _ = root;
//! ```

use alloc::{collections::BTreeMap, string::String, sync::Arc};

use crate::{error::CallbackError, value::Value};

/// Callback receiving a scalar or a materialized subtree.
pub type LeafFn<C> = dyn Fn(&mut C, Value) -> Result<(), CallbackError> + Send + Sync;
/// Callback run when a container opens. Receives the member key the container
/// is embedded under, if any.
pub type BeginFn<C> = dyn Fn(&mut C, Option<&str>) -> Result<(), CallbackError> + Send + Sync;
/// Callback run when a container closes.
pub type EndFn<C> = dyn Fn(&mut C) -> Result<(), CallbackError> + Send + Sync;
/// Callback run when an array element's leaf callback fails. Returning `Ok`
/// recovers and streaming continues.
pub type ErrorFn<C> =
    dyn Fn(&mut C, CallbackError) -> Result<(), CallbackError> + Send + Sync;

/// A node of the interest tree.
pub enum Interest<C> {
    /// A plain callback.
    Leaf(Arc<LeafFn<C>>),
    /// An array description.
    Array(Arc<ArrayNode<C>>),
    /// An object description.
    Object(Arc<ObjectNode<C>>),
}

impl<C> Interest<C> {
    /// Wraps a callback as a leaf.
    pub fn leaf<F>(f: F) -> Self
    where
        F: Fn(&mut C, Value) -> Result<(), CallbackError> + Send + Sync + 'static,
    {
        Interest::Leaf(Arc::new(f))
    }

    /// Whether this is a [`Interest::Leaf`].
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        matches!(self, Interest::Leaf(_))
    }
}

impl<C> Clone for Interest<C> {
    fn clone(&self) -> Self {
        match self {
            Interest::Leaf(f) => Interest::Leaf(Arc::clone(f)),
            Interest::Array(n) => Interest::Array(Arc::clone(n)),
            Interest::Object(n) => Interest::Object(Arc::clone(n)),
        }
    }
}

impl<C> core::fmt::Debug for Interest<C> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Interest::Leaf(_) => f.write_str("Leaf"),
            Interest::Array(n) => n.fmt(f),
            Interest::Object(n) => n.fmt(f),
        }
    }
}

impl<C> From<ArrayNode<C>> for Interest<C> {
    fn from(node: ArrayNode<C>) -> Self {
        Interest::Array(Arc::new(node))
    }
}

impl<C> From<ObjectNode<C>> for Interest<C> {
    fn from(node: ObjectNode<C>) -> Self {
        Interest::Object(Arc::new(node))
    }
}

/// Interest in an array.
pub struct ArrayNode<C> {
    pub(crate) element: Interest<C>,
    pub(crate) on_begin: Option<Arc<BeginFn<C>>>,
    pub(crate) on_end: Option<Arc<EndFn<C>>>,
    pub(crate) on_error: Option<Arc<ErrorFn<C>>>,
}

impl<C> ArrayNode<C> {
    /// Creates a node whose elements are all governed by `element`.
    pub fn new(element: impl Into<Interest<C>>) -> Self {
        Self {
            element: element.into(),
            on_begin: None,
            on_end: None,
            on_error: None,
        }
    }

    /// Sets the callback run when the array opens.
    #[must_use]
    pub fn on_begin<F>(mut self, f: F) -> Self
    where
        F: Fn(&mut C, Option<&str>) -> Result<(), CallbackError> + Send + Sync + 'static,
    {
        self.on_begin = Some(Arc::new(f));
        self
    }

    /// Sets the callback run when the array closes, after every element
    /// callback.
    #[must_use]
    pub fn on_end<F>(mut self, f: F) -> Self
    where
        F: Fn(&mut C) -> Result<(), CallbackError> + Send + Sync + 'static,
    {
        self.on_end = Some(Arc::new(f));
        self
    }

    /// Sets the hook run when the element leaf callback fails.
    ///
    /// It receives the callback's error. Returning `Ok(())` drops the element
    /// and continues with the next one; returning an error aborts the stream
    /// with [`RouterError::Callback`](crate::RouterError::Callback).
    #[must_use]
    pub fn on_error<F>(mut self, f: F) -> Self
    where
        F: Fn(&mut C, CallbackError) -> Result<(), CallbackError> + Send + Sync + 'static,
    {
        self.on_error = Some(Arc::new(f));
        self
    }
}

impl<C> core::fmt::Debug for ArrayNode<C> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ArrayNode")
            .field("element", &self.element)
            .field("on_begin", &self.on_begin.is_some())
            .field("on_end", &self.on_end.is_some())
            .field("on_error", &self.on_error.is_some())
            .finish()
    }
}

/// Interest in an object.
pub struct ObjectNode<C> {
    pub(crate) on_begin: Option<Arc<BeginFn<C>>>,
    pub(crate) on_end: Option<Arc<EndFn<C>>>,
    pub(crate) children: BTreeMap<String, Interest<C>>,
    pub(crate) wildcard: Option<Interest<C>>,
}

impl<C> ObjectNode<C> {
    /// Creates a node with no hooks and no member interests; every member is
    /// skipped until some are added.
    #[must_use]
    pub fn new() -> Self {
        Self {
            on_begin: None,
            on_end: None,
            children: BTreeMap::new(),
            wildcard: None,
        }
    }

    /// Sets the callback run when the object opens.
    #[must_use]
    pub fn on_begin<F>(mut self, f: F) -> Self
    where
        F: Fn(&mut C, Option<&str>) -> Result<(), CallbackError> + Send + Sync + 'static,
    {
        self.on_begin = Some(Arc::new(f));
        self
    }

    /// Sets the callback run when the object closes. A wildcard batch is
    /// delivered before it.
    #[must_use]
    pub fn on_end<F>(mut self, f: F) -> Self
    where
        F: Fn(&mut C) -> Result<(), CallbackError> + Send + Sync + 'static,
    {
        self.on_end = Some(Arc::new(f));
        self
    }

    /// Governs the member called `name`. Replaces an earlier interest for the
    /// same name.
    ///
    /// Pass a clone of an existing [`Interest`] to share one subtree between
    /// several members or parents.
    #[must_use]
    pub fn child(mut self, name: impl Into<String>, interest: impl Into<Interest<C>>) -> Self {
        self.children.insert(name.into(), interest.into());
        self
    }

    /// Governs every member without a [`child`](Self::child) entry.
    ///
    /// A leaf wildcard does not see members one at a time: their values are
    /// gathered, in document order, and delivered once as a
    /// [`Value::Object`] right before the object's end callback. Nothing is
    /// delivered if no member matched. A node wildcard is applied to each
    /// unmatched member individually.
    #[must_use]
    pub fn wildcard(mut self, interest: impl Into<Interest<C>>) -> Self {
        self.wildcard = Some(interest.into());
        self
    }
}

impl<C> Default for ObjectNode<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> core::fmt::Debug for ObjectNode<C> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ObjectNode")
            .field("children", &self.children)
            .field("wildcard", &self.wildcard)
            .field("on_begin", &self.on_begin.is_some())
            .field("on_end", &self.on_end.is_some())
            .finish()
    }
}
