//! Contracts between the schema type system and an execution engine.
//!
//! The type system stores the callbacks defined here and invokes them on
//! request; driving a whole query is left to the engine.

use std::{fmt::Display, sync::Arc};

use indexmap::IndexMap;

use crate::{
    ast,
    parser::LexerError,
    schema::meta::{self, Object},
    value::{Value, Variables},
};

/// Error type for errors that occur during field resolution
///
/// Field errors are represented by a human-readable error message and an
/// optional `Value` structure containing additional information.
///
/// They can be converted to from any type that implements `std::fmt::Display`,
/// which makes error chaining with the `?` operator a breeze:
///
/// ```rust
/// # use graphql_frontend::FieldError;
/// fn get_string(data: Vec<u8>) -> Result<String, FieldError> {
///     let s = String::from_utf8(data)?;
///     Ok(s)
/// }
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct FieldError {
    message: String,
    extensions: Value,
}

impl<T: Display> From<T> for FieldError {
    fn from(e: T) -> Self {
        Self {
            message: e.to_string(),
            extensions: Value::null(),
        }
    }
}

impl FieldError {
    /// Construct a new [`FieldError`] with additional data.
    ///
    /// The `extensions` parameter will be added to the `"extensions"` field of
    /// the error object in the JSON response. If it's [`Value::Null`], no extra
    /// data will be included.
    #[must_use]
    pub fn new<T: Display>(e: T, extensions: Value) -> Self {
        Self {
            message: e.to_string(),
            extensions,
        }
    }

    /// Returns the `"message"` field of this [`FieldError`].
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the `"extensions"` field of this [`FieldError`].
    ///
    /// If there is no `"extensions"`, then [`Value::Null`] will be returned.
    #[must_use]
    pub fn extensions(&self) -> &Value {
        &self.extensions
    }
}

/// The result of resolving the value of a field of type `T`
pub type FieldResult<T> = Result<T, FieldError>;

/// Field argument container
///
/// Holds an entry for every declared argument: the provided value, or the
/// declared default, or null.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Arguments {
    args: IndexMap<String, Value>,
}

impl Arguments {
    #[doc(hidden)]
    pub fn new<CtxT>(
        mut args: IndexMap<String, Value>,
        meta_args: &IndexMap<arcstr::ArcStr, meta::Argument<CtxT>>,
    ) -> Self {
        for arg in meta_args.values() {
            if args.get(arg.name.as_str()).is_none_or(Value::is_null) {
                args.insert(
                    arg.name.to_string(),
                    arg.default_value.clone().unwrap_or_default(),
                );
            }
        }

        Self { args }
    }

    /// Converts the arguments written in a document into their runtime values,
    /// substituting `vars` and filling in declared defaults.
    ///
    /// # Errors
    ///
    /// If a string literal holds an invalid escape sequence.
    pub fn from_literals<CtxT>(
        literals: Option<&ast::Arguments<'_>>,
        meta_args: &IndexMap<arcstr::ArcStr, meta::Argument<CtxT>>,
        vars: &Variables,
    ) -> Result<Self, LexerError> {
        let args = literals
            .into_iter()
            .flat_map(ast::Arguments::iter)
            .map(|arg| {
                Value::from_literal(&arg.item.value.item, vars)
                    .map(|v| (arg.item.name.item.to_owned(), v))
            })
            .collect::<Result<_, _>>()?;

        Ok(Self::new(args, meta_args))
    }

    /// Returns the value of the argument of the provided name.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.args.get(key)
    }

    /// Iterates over the argument values in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.args.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// Resolution callback of a [`meta::Field`].
///
/// Invoked concurrently across requests, so it must not hold per-call
/// mutable state.
pub trait FieldResolve<CtxT = ()>: Send + Sync {
    /// Computes the field value out of its parent `source` value.
    ///
    /// # Errors
    ///
    /// If the value cannot be computed.
    fn resolve(&self, ctx: &CtxT, source: &Value, args: &Arguments) -> FieldResult<Value>;
}

impl<CtxT, F> FieldResolve<CtxT> for F
where
    F: Fn(&CtxT, &Value, &Arguments) -> FieldResult<Value> + Send + Sync,
{
    fn resolve(&self, ctx: &CtxT, source: &Value, args: &Arguments) -> FieldResult<Value> {
        self(ctx, source, args)
    }
}

/// Type-resolution callback of an [`meta::Interface`] or [`meta::Union`],
/// picking the concrete [`Object`] type of a runtime value.
pub trait TypeResolve<CtxT = ()>: Send + Sync {
    /// Picks the concrete type of `value`.
    ///
    /// # Errors
    ///
    /// If no concrete type matches.
    fn resolve_type(&self, ctx: &CtxT, value: &Value) -> FieldResult<Arc<Object<CtxT>>>;
}

impl<CtxT, F> TypeResolve<CtxT> for F
where
    F: Fn(&CtxT, &Value) -> FieldResult<Arc<Object<CtxT>>> + Send + Sync,
{
    fn resolve_type(&self, ctx: &CtxT, value: &Value) -> FieldResult<Arc<Object<CtxT>>> {
        self(ctx, value)
    }
}

/// Hook run before a field is resolved, e.g. for authorization.
pub trait Handler<CtxT = ()>: Send + Sync {
    /// # Errors
    ///
    /// To abort the resolution of the field.
    fn handle(&self, ctx: &CtxT) -> FieldResult<()>;
}

impl<CtxT, F> Handler<CtxT> for F
where
    F: Fn(&CtxT) -> FieldResult<()> + Send + Sync,
{
    fn handle(&self, ctx: &CtxT) -> FieldResult<()> {
        self(ctx)
    }
}

/// Ordered [`Handler`]s of a field.
pub struct HandlersChain<CtxT = ()> {
    handlers: Vec<Arc<dyn Handler<CtxT>>>,
}

impl<CtxT> HandlersChain<CtxT> {
    /// Creates an empty chain.
    #[must_use]
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }

    /// Appends a [`Handler`] at the end of this chain.
    #[must_use]
    pub fn with(mut self, handler: impl Handler<CtxT> + 'static) -> Self {
        self.handlers.push(Arc::new(handler));
        self
    }

    /// Number of handlers in this chain.
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Checks whether this chain has no handlers.
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Runs the handlers in order.
    ///
    /// # Errors
    ///
    /// With the first handler error, in which case the remaining handlers are
    /// not run.
    pub fn run(&self, ctx: &CtxT) -> FieldResult<()> {
        __frontend_trace!("running {} field handlers", self.handlers.len());

        self.handlers.iter().try_for_each(|h| h.handle(ctx))
    }
}

impl<CtxT> Clone for HandlersChain<CtxT> {
    fn clone(&self) -> Self {
        Self {
            handlers: self.handlers.clone(),
        }
    }
}

impl<CtxT> Default for HandlersChain<CtxT> {
    fn default() -> Self {
        Self::new()
    }
}

impl<CtxT> std::fmt::Debug for HandlersChain<CtxT> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HandlersChain")
            .field("len", &self.handlers.len())
            .finish()
    }
}
