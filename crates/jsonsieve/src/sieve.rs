use crate::{
    error::{LexError, RouterError},
    interest::Interest,
    lexer::Lexer,
    options::LexerOptions,
    router::Router,
};

/// Error returned by [`Sieve`]: a lexer error whose sink errors are router
/// errors.
pub type SieveError = LexError<RouterError>;

/// A [`Lexer`] wired to a [`Router`]: text chunks in, consumer callbacks out.
///
/// # Examples
///
/// ```rust
/// use jsonsieve::{ArrayNode, Interest, ObjectNode, Sieve, Value};
///
/// #[derive(Default)]
/// struct Report {
///     meta: Option<Value>,
///     ids: Vec<f64>,
/// }
///
/// let row = ObjectNode::new().child(
///     "id",
///     Interest::leaf(|r: &mut Report, v: Value| {
///         r.ids.extend(v.as_f64());
///         Ok(())
///     }),
/// );
/// let root = ObjectNode::new()
///     .child("rows", ArrayNode::new(row))
///     .wildcard(Interest::leaf(|r: &mut Report, v: Value| {
///         r.meta = Some(v);
///         Ok(())
///     }));
///
/// let mut sieve = Sieve::new(root.into(), Report::default()).unwrap();
/// for chunk in [r#"{"total_rows": 2, "ro"#, r#"ws": [{"id": 1}, {"id""#, ": 2}]}"] {
///     sieve.feed(chunk).unwrap();
/// }
/// let report = sieve.finish().unwrap();
///
/// assert_eq!(report.ids, [1.0, 2.0]);
/// assert_eq!(report.meta.unwrap().to_string(), r#"{"total_rows":2}"#);
/// ```
pub struct Sieve<C> {
    lexer: Lexer<Router<C>>,
}

impl<C> Sieve<C> {
    /// Creates a sieve with default [`LexerOptions`].
    ///
    /// # Errors
    ///
    /// [`RouterError::InvalidRootShape`] if `root` is a leaf.
    pub fn new(root: Interest<C>, context: C) -> Result<Self, RouterError> {
        Self::with_options(root, context, LexerOptions::default())
    }

    /// Creates a sieve whose lexer uses `options`.
    ///
    /// # Errors
    ///
    /// [`RouterError::InvalidRootShape`] if `root` is a leaf.
    pub fn with_options(
        root: Interest<C>,
        context: C,
        options: LexerOptions,
    ) -> Result<Self, RouterError> {
        let router = Router::new(root, context)?;
        Ok(Self {
            lexer: Lexer::with_options(router, options),
        })
    }

    /// Feeds the next chunk of the document. Every callback the chunk
    /// completes runs before this returns.
    ///
    /// # Errors
    ///
    /// Syntax errors, router errors, and callback failures, all reported with
    /// their position. The sieve is unusable afterwards.
    pub fn feed(&mut self, chunk: &str) -> Result<(), SieveError> {
        self.lexer.process(chunk)
    }

    /// Ends the document and returns the consumer context.
    ///
    /// # Errors
    ///
    /// As for [`feed`](Self::feed), plus errors for a document that ends
    /// early.
    pub fn finish(mut self) -> Result<C, SieveError> {
        self.lexer.finish()?;
        Ok(self.lexer.into_sink().into_context())
    }

    /// The consumer context.
    pub fn context(&self) -> &C {
        self.lexer.sink().context()
    }

    /// Mutable access to the consumer context between chunks.
    pub fn context_mut(&mut self) -> &mut C {
        self.lexer.sink_mut().context_mut()
    }
}
