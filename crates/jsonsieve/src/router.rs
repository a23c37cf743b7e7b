//! Routing of lexer events through an interest tree.
//!
//! The [`Router`] keeps two stacks that never recurse:
//!
//! - the navigation stack mirrors the document's nesting. Every open
//!   container has an entry: the array or object node that governs it, or an
//!   `Ignored` marker when nobody asked for it, so that its `Ascend` can be
//!   recognized and dropped.
//! - the accumulator exists only while a subtree is being materialized for a
//!   leaf callback or a wildcard batch. While it is active every event goes
//!   into it, whatever the navigation stack says, until the container that
//!   started it closes. A leaf inside a subtree that is already being
//!   captured has nothing to do, so accumulations never nest.

use alloc::{string::String, sync::Arc, vec, vec::Vec};

use crate::{
    error::{CallbackError, RouterError},
    event::ParseEvent,
    interest::{ArrayNode, Interest, LeafFn, ObjectNode},
    sink::EventSink,
    value::{ContainerKind, Map, Value},
};

enum NavFrame<C> {
    Array(Arc<ArrayNode<C>>),
    Object {
        node: Arc<ObjectNode<C>>,
        /// Values of members matched only by a leaf wildcard.
        batch: Map,
    },
    Ignored,
}

/// Where a finished value goes.
enum Delivery<C> {
    Leaf {
        callback: Arc<LeafFn<C>>,
        /// Set when the leaf governs array elements, for `on_error`.
        element_of: Option<Arc<ArrayNode<C>>>,
    },
    /// Into the wildcard batch of the innermost object, under this key.
    Batch(String),
}

/// What the interest tree says about one child event.
enum Target<C> {
    Deliver(Delivery<C>),
    Array(Arc<ArrayNode<C>>),
    Object(Arc<ObjectNode<C>>),
    Skip,
}

struct Accumulator<C> {
    target: Delivery<C>,
    /// Containers under construction, innermost last, each with the key it
    /// attaches under in its parent.
    frames: Vec<(Option<String>, Value)>,
}

impl<C> Accumulator<C> {
    fn new(target: Delivery<C>, kind: ContainerKind) -> Self {
        Self {
            target,
            frames: vec![(None, kind.empty_value())],
        }
    }

    fn attach(&mut self, key: Option<String>, value: Value) -> Result<(), RouterError> {
        match self.frames.last_mut() {
            Some((_, Value::Array(items))) => items.push(value),
            Some((_, Value::Object(map))) => {
                let key = key.ok_or(RouterError::MissingMemberKey)?;
                map.insert(key, value);
            }
            _ => return Err(RouterError::EmptyNavigationStack),
        }
        Ok(())
    }

    /// Feeds one event. Returns the finished value once the outermost
    /// container closes.
    fn push(&mut self, event: ParseEvent) -> Result<Option<Value>, RouterError> {
        match event {
            ParseEvent::Value { key, value } => self.attach(key, value)?,
            ParseEvent::Descend { key, kind } => self.frames.push((key, kind.empty_value())),
            ParseEvent::Ascend { .. } => {
                let (key, value) = self.frames.pop().ok_or(RouterError::EmptyNavigationStack)?;
                if self.frames.is_empty() {
                    return Ok(Some(value));
                }
                self.attach(key, value)?;
            }
            ParseEvent::Stop => return Err(RouterError::IncompleteDocument(self.frames.len())),
        }
        Ok(None)
    }
}

/// Dispatches a [`ParseEvent`] stream against an [`Interest`] tree, invoking
/// consumer callbacks with scalars and materialized subtrees.
///
/// A router serves one document stream. It owns the consumer context `C` that
/// every callback receives; retrieve it with [`into_context`](Self::into_context)
/// when the stream is done.
///
/// ```rust
/// use jsonsieve::{Interest, Lexer, ObjectNode, Router, Value};
///
/// let root: Interest<Vec<Value>> = ObjectNode::new()
///     .child("name", Interest::leaf(|out: &mut Vec<Value>, v| {
///         out.push(v);
///         Ok(())
///     }))
///     .into();
/// let router = Router::new(root, Vec::new()).unwrap();
///
/// let mut lexer = Lexer::new(router);
/// lexer.process(r#"{"id": 7, "name": "Ada"}"#).unwrap();
/// lexer.finish().unwrap();
///
/// assert_eq!(lexer.into_sink().into_context(), vec![Value::from("Ada")]);
/// ```
pub struct Router<C> {
    root: Interest<C>,
    nav: Vec<NavFrame<C>>,
    acc: Option<Accumulator<C>>,
    context: C,
}

impl<C> Router<C> {
    /// Creates a router for `root`.
    ///
    /// # Errors
    ///
    /// [`RouterError::InvalidRootShape`] if `root` is a leaf.
    pub fn new(root: Interest<C>, context: C) -> Result<Self, RouterError> {
        if root.is_leaf() {
            return Err(RouterError::InvalidRootShape);
        }
        Ok(Self {
            root,
            nav: Vec::new(),
            acc: None,
            context,
        })
    }

    /// The consumer context.
    pub fn context(&self) -> &C {
        &self.context
    }

    /// Mutable access to the consumer context.
    pub fn context_mut(&mut self) -> &mut C {
        &mut self.context
    }

    /// Consumes the router, returning the consumer context.
    pub fn into_context(self) -> C {
        self.context
    }

    /// Number of open containers, including those being materialized.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.nav.len() + self.acc.as_ref().map_or(0, |acc| acc.frames.len())
    }

    fn resolve(&self, key: Option<&str>) -> Result<Target<C>, RouterError> {
        let Some(frame) = self.nav.last() else {
            return Err(RouterError::EmptyNavigationStack);
        };
        let (interest, element_of) = match frame {
            NavFrame::Ignored => return Ok(Target::Skip),
            NavFrame::Array(node) => (&node.element, Some(node)),
            NavFrame::Object { node, .. } => {
                let key = key.ok_or(RouterError::MissingMemberKey)?;
                match (node.children.get(key), &node.wildcard) {
                    (Some(child), _) => (child, None),
                    (None, Some(Interest::Leaf(_))) => {
                        return Ok(Target::Deliver(Delivery::Batch(key.into())));
                    }
                    (None, Some(wildcard)) => (wildcard, None),
                    (None, None) => return Ok(Target::Skip),
                }
            }
        };
        Ok(match interest {
            Interest::Leaf(callback) => Target::Deliver(Delivery::Leaf {
                callback: Arc::clone(callback),
                element_of: element_of.cloned(),
            }),
            Interest::Array(node) => Target::Array(Arc::clone(node)),
            Interest::Object(node) => Target::Object(Arc::clone(node)),
        })
    }

    fn descend(&mut self, key: Option<String>, kind: ContainerKind) -> Result<(), RouterError> {
        let target = if self.nav.is_empty() {
            log::debug!("entering document root ({kind:?})");
            match &self.root {
                Interest::Array(node) => Target::Array(Arc::clone(node)),
                Interest::Object(node) => Target::Object(Arc::clone(node)),
                Interest::Leaf(_) => return Err(RouterError::InvalidRootShape),
            }
        } else {
            self.resolve(key.as_deref())?
        };

        let frame = match (target, kind) {
            (Target::Array(node), ContainerKind::Array) => {
                if let Some(on_begin) = &node.on_begin {
                    on_begin(&mut self.context, key.as_deref()).map_err(RouterError::Callback)?;
                }
                NavFrame::Array(node)
            }
            (Target::Object(node), ContainerKind::Object) => {
                if let Some(on_begin) = &node.on_begin {
                    on_begin(&mut self.context, key.as_deref()).map_err(RouterError::Callback)?;
                }
                NavFrame::Object {
                    node,
                    batch: Map::new(),
                }
            }
            (Target::Deliver(delivery), kind) => {
                log::trace!("materializing {kind:?} under {key:?}");
                self.acc = Some(Accumulator::new(delivery, kind));
                return Ok(());
            }
            (Target::Array(_) | Target::Object(_), kind) => {
                log::trace!("skipping {kind:?} under {key:?}: shape does not match interest");
                NavFrame::Ignored
            }
            (Target::Skip, _) => NavFrame::Ignored,
        };
        self.nav.push(frame);
        Ok(())
    }

    fn ascend(&mut self) -> Result<(), RouterError> {
        match self.nav.pop().ok_or(RouterError::EmptyNavigationStack)? {
            NavFrame::Ignored => Ok(()),
            NavFrame::Array(node) => match &node.on_end {
                Some(on_end) => on_end(&mut self.context).map_err(RouterError::Callback),
                None => Ok(()),
            },
            NavFrame::Object { node, batch } => {
                if !batch.is_empty() {
                    if let Some(Interest::Leaf(callback)) = &node.wildcard {
                        log::debug!("delivering wildcard batch of {} member(s)", batch.len());
                        callback(&mut self.context, Value::Object(batch))
                            .map_err(RouterError::Callback)?;
                    }
                }
                match &node.on_end {
                    Some(on_end) => on_end(&mut self.context).map_err(RouterError::Callback),
                    None => Ok(()),
                }
            }
        }
    }

    fn value(&mut self, key: Option<String>, value: Value) -> Result<(), RouterError> {
        match self.resolve(key.as_deref())? {
            Target::Deliver(delivery) => self.deliver(delivery, value),
            Target::Array(_) | Target::Object(_) => {
                log::trace!("skipping scalar under {key:?}: interest expects a container");
                Ok(())
            }
            Target::Skip => Ok(()),
        }
    }

    fn deliver(&mut self, delivery: Delivery<C>, value: Value) -> Result<(), RouterError> {
        match delivery {
            Delivery::Leaf {
                callback,
                element_of,
            } => {
                let Err(err) = callback(&mut self.context, value) else {
                    return Ok(());
                };
                self.element_failed(element_of.as_deref(), err)
            }
            Delivery::Batch(key) => match self.nav.last_mut() {
                Some(NavFrame::Object { batch, .. }) => {
                    log::trace!("batching member {key:?}");
                    batch.insert(key, value);
                    Ok(())
                }
                _ => Err(RouterError::EmptyNavigationStack),
            },
        }
    }

    fn element_failed(
        &mut self,
        element_of: Option<&ArrayNode<C>>,
        err: CallbackError,
    ) -> Result<(), RouterError> {
        let Some(on_error) = element_of.and_then(|node| node.on_error.as_ref()) else {
            return Err(RouterError::Callback(err));
        };
        log::warn!("array element callback failed: {err}");
        on_error(&mut self.context, err).map_err(RouterError::Callback)
    }
}

impl<C> EventSink for Router<C> {
    type Error = RouterError;

    fn on_event(&mut self, event: ParseEvent) -> Result<(), RouterError> {
        if let Some(acc) = &mut self.acc {
            if let ParseEvent::Stop = event {
                return Err(RouterError::IncompleteDocument(self.depth()));
            }
            let Some(value) = acc.push(event)? else {
                return Ok(());
            };
            if let Some(acc) = self.acc.take() {
                log::debug!("materialized subtree complete");
                return self.deliver(acc.target, value);
            }
            return Ok(());
        }

        match event {
            ParseEvent::Stop => {
                if !self.nav.is_empty() {
                    return Err(RouterError::IncompleteDocument(self.nav.len()));
                }
                log::debug!("document stream stopped");
                Ok(())
            }
            ParseEvent::Descend { key, kind } => self.descend(key, kind),
            ParseEvent::Ascend { .. } => self.ascend(),
            ParseEvent::Value { key, value } => self.value(key, value),
        }
    }
}
