//! Types used to describe a `GraphQL` schema

use std::{
    fmt,
    sync::{Arc, OnceLock},
};

use arcstr::ArcStr;
use derive_more::with_trait::Debug;
use indexmap::IndexMap;

use crate::{
    ast,
    executor::{
        Arguments, FieldError, FieldResolve, FieldResult, Handler, HandlersChain, TypeResolve,
    },
    schema::SchemaError,
    value::{Value, Variables},
};

/// Whether an item is deprecated, with context.
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub enum DeprecationStatus {
    /// The field/variant is not deprecated.
    #[default]
    Current,
    /// The field/variant is deprecated, with an optional reason
    Deprecated(Option<ArcStr>),
}

impl DeprecationStatus {
    /// If this deprecation status indicates the item is deprecated.
    pub fn is_deprecated(&self) -> bool {
        matches!(self, Self::Deprecated(_))
    }

    /// An optional reason for the deprecation, or none if `Current`.
    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Current => None,
            Self::Deprecated(rsn) => rsn.as_deref(),
        }
    }
}

/// Shortcut for a [`Value`] coercion function of a [`Scalar`].
pub type CoerceFn = dyn Fn(&Value) -> Option<Value> + Send + Sync;

/// Shortcut for a value literal parsing function of a [`Scalar`].
pub type ParseLiteralFn = dyn Fn(&ast::Value<'_>) -> Option<Value> + Send + Sync;

/// Scalar type metadata
///
/// Leaf type whose values are converted through custom coercion functions.
/// Every function returns [`None`] when the value cannot be coerced.
#[derive(Debug)]
pub struct Scalar {
    #[doc(hidden)]
    pub name: ArcStr,
    #[doc(hidden)]
    pub description: Option<ArcStr>,
    #[debug(skip)]
    serialize_fn: Arc<CoerceFn>,
    #[debug(skip)]
    parse_value_fn: Arc<CoerceFn>,
    #[debug(skip)]
    parse_literal_fn: Arc<ParseLiteralFn>,
}

impl Scalar {
    /// Builds a new [`Scalar`] type with the specified `name`.
    ///
    /// Values pass through unchanged, and literals are converted with
    /// [`Value::from_literal()`], until other functions are set.
    pub fn new(name: impl Into<ArcStr>) -> Self {
        Self {
            name: name.into(),
            description: None,
            serialize_fn: Arc::new(|v: &Value| Some(v.clone())),
            parse_value_fn: Arc::new(|v: &Value| Some(v.clone())),
            parse_literal_fn: Arc::new(|l: &ast::Value<'_>| {
                l.is_const()
                    .then(|| Value::from_literal(l, &Variables::default()).ok())
                    .flatten()
            }),
        }
    }

    /// Sets the `description` of this [`Scalar`] type.
    ///
    /// Overwrites any previously set description.
    #[must_use]
    pub fn description(mut self, description: impl Into<ArcStr>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the function converting internal values into response values.
    #[must_use]
    pub fn serialize_with(
        mut self,
        f: impl Fn(&Value) -> Option<Value> + Send + Sync + 'static,
    ) -> Self {
        self.serialize_fn = Arc::new(f);
        self
    }

    /// Sets the function converting variable values into internal values.
    #[must_use]
    pub fn parse_value_with(
        mut self,
        f: impl Fn(&Value) -> Option<Value> + Send + Sync + 'static,
    ) -> Self {
        self.parse_value_fn = Arc::new(f);
        self
    }

    /// Sets the function converting value literals into internal values.
    #[must_use]
    pub fn parse_literal_with(
        mut self,
        f: impl Fn(&ast::Value<'_>) -> Option<Value> + Send + Sync + 'static,
    ) -> Self {
        self.parse_literal_fn = Arc::new(f);
        self
    }

    /// Converts an internal value into a response value.
    pub fn serialize(&self, value: &Value) -> Option<Value> {
        (self.serialize_fn)(value)
    }

    /// Converts a variable value into an internal value.
    pub fn parse_value(&self, value: &Value) -> Option<Value> {
        (self.parse_value_fn)(value)
    }

    /// Converts a value literal into an internal value.
    pub fn parse_literal(&self, literal: &ast::Value<'_>) -> Option<Value> {
        (self.parse_literal_fn)(literal)
    }
}

/// Metadata for an argument to a field
#[derive(Debug)]
pub struct Argument<CtxT = ()> {
    #[doc(hidden)]
    pub name: ArcStr,
    #[doc(hidden)]
    pub description: Option<ArcStr>,
    #[doc(hidden)]
    pub arg_type: Type<CtxT>,
    #[doc(hidden)]
    pub default_value: Option<Value>,
}

impl<CtxT> Argument<CtxT> {
    /// Builds a new [`Argument`] of the given [`Type`] with the given `name`.
    pub fn new(name: impl Into<ArcStr>, arg_type: impl Into<Type<CtxT>>) -> Self {
        Self {
            name: name.into(),
            description: None,
            arg_type: arg_type.into(),
            default_value: None,
        }
    }

    /// Sets the `description` of this [`Argument`].
    ///
    /// Overwrites any previously set description.
    #[must_use]
    pub fn description(mut self, description: impl Into<ArcStr>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the default value of this [`Argument`].
    ///
    /// Overwrites any previously set default value.
    #[must_use]
    pub fn default_value(mut self, val: impl Into<Value>) -> Self {
        self.default_value = Some(val.into());
        self
    }
}

/// Metadata for a field of an [`Object`] or [`Interface`].
#[derive(Debug)]
pub struct Field<CtxT = ()> {
    #[doc(hidden)]
    pub name: ArcStr,
    #[doc(hidden)]
    pub description: Option<ArcStr>,
    #[doc(hidden)]
    pub arguments: IndexMap<ArcStr, Argument<CtxT>>,
    #[doc(hidden)]
    pub field_type: Type<CtxT>,
    #[doc(hidden)]
    pub deprecation_status: DeprecationStatus,
    #[debug(skip)]
    resolver: Option<Arc<dyn FieldResolve<CtxT>>>,
    handlers: HandlersChain<CtxT>,
}

impl<CtxT> Field<CtxT> {
    /// Builds a new [`Field`] of the given [`Type`] with the given `name`.
    pub fn new(name: impl Into<ArcStr>, field_type: impl Into<Type<CtxT>>) -> Self {
        Self {
            name: name.into(),
            description: None,
            arguments: IndexMap::new(),
            field_type: field_type.into(),
            deprecation_status: DeprecationStatus::Current,
            resolver: None,
            handlers: HandlersChain::new(),
        }
    }

    /// Set the `description` of this [`Field`].
    ///
    /// Overwrites any previously set description.
    #[must_use]
    pub fn description(mut self, description: impl Into<ArcStr>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Adds an `argument` to this [`Field`].
    ///
    /// An argument with the same name is replaced, keeping its position.
    #[must_use]
    pub fn argument(mut self, argument: Argument<CtxT>) -> Self {
        self.arguments.insert(argument.name.clone(), argument);
        self
    }

    /// Sets this [`Field`] as deprecated with an optional `reason`.
    ///
    /// Overwrites any previously set deprecation reason.
    #[must_use]
    pub fn deprecated(mut self, reason: Option<ArcStr>) -> Self {
        self.deprecation_status = DeprecationStatus::Deprecated(reason);
        self
    }

    /// Sets the resolution callback of this [`Field`].
    #[must_use]
    pub fn resolver(mut self, resolver: impl FieldResolve<CtxT> + 'static) -> Self {
        self.resolver = Some(Arc::new(resolver));
        self
    }

    /// Appends a [`Handler`] to run before this [`Field`] is resolved.
    #[must_use]
    pub fn handler(mut self, handler: impl Handler<CtxT> + 'static) -> Self {
        self.handlers = self.handlers.with(handler);
        self
    }

    /// [`HandlersChain`] run before this [`Field`] is resolved.
    pub fn handlers(&self) -> &HandlersChain<CtxT> {
        &self.handlers
    }

    /// Looks up the declared argument of the provided name.
    pub fn argument_by_name(&self, name: &str) -> Option<&Argument<CtxT>> {
        self.arguments.get(name)
    }

    /// Resolves the value of this [`Field`] out of its parent `source` value.
    ///
    /// Runs the [`HandlersChain`] first. Without a resolution callback, the
    /// entry named after this field is read out of an object `source`.
    ///
    /// # Errors
    ///
    /// With the first handler error, or the resolution callback error.
    pub fn resolve(&self, ctx: &CtxT, source: &Value, args: &Arguments) -> FieldResult<Value> {
        self.handlers.run(ctx)?;

        match &self.resolver {
            Some(resolver) => resolver.resolve(ctx, source, args),
            None => Ok(source
                .as_object_value()
                .and_then(|o| o.get_field_value(&self.name))
                .cloned()
                .unwrap_or_default()),
        }
    }
}

fn index_by_name<T>(
    items: impl IntoIterator<Item = T>,
    name: impl Fn(&T) -> &ArcStr,
) -> IndexMap<ArcStr, T> {
    items
        .into_iter()
        .map(|item| (name(&item).clone(), item))
        .collect()
}

/// Object type metadata
///
/// Fields may be provided at construction, or later through
/// [`Object::define_fields()`], which allows types to refer to each other.
#[derive(Debug)]
pub struct Object<CtxT = ()> {
    #[doc(hidden)]
    pub name: ArcStr,
    #[doc(hidden)]
    pub description: Option<ArcStr>,
    interfaces: Vec<Arc<Interface<CtxT>>>,
    fields: OnceLock<IndexMap<ArcStr, Field<CtxT>>>,
}

impl<CtxT> Object<CtxT> {
    /// Build a new [`Object`] type with the specified `name` and no fields
    /// defined yet.
    pub fn new(name: impl Into<ArcStr>) -> Self {
        Self {
            name: name.into(),
            description: None,
            interfaces: Vec::new(),
            fields: OnceLock::new(),
        }
    }

    /// Sets the `description` of this [`Object`] type.
    ///
    /// Overwrites any previously set description.
    #[must_use]
    pub fn description(mut self, description: impl Into<ArcStr>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the `interfaces` this [`Object`] type implements.
    ///
    /// Overwrites any previously set list of interfaces.
    #[must_use]
    pub fn interfaces(
        mut self,
        interfaces: impl IntoIterator<Item = Arc<Interface<CtxT>>>,
    ) -> Self {
        self.interfaces = interfaces.into_iter().collect();
        self
    }

    /// Set the `fields` of this [`Object`] type.
    ///
    /// Overwrites any previously set fields.
    #[must_use]
    pub fn fields(mut self, fields: impl IntoIterator<Item = Field<CtxT>>) -> Self {
        self.fields = OnceLock::from(index_by_name(fields, |f| &f.name));
        self
    }

    /// Defines the `fields` of an already shared [`Object`] type.
    ///
    /// # Errors
    ///
    /// If the fields are already defined.
    pub fn define_fields(
        &self,
        fields: impl IntoIterator<Item = Field<CtxT>>,
    ) -> Result<(), SchemaError> {
        self.fields
            .set(index_by_name(fields, |f| &f.name))
            .map_err(|_| SchemaError::AlreadyDefined(self.name.clone()))
    }

    /// Interfaces implemented by this [`Object`] type.
    pub fn implemented_interfaces(&self) -> &[Arc<Interface<CtxT>>] {
        &self.interfaces
    }

    /// Iterates over the fields in declaration order.
    pub fn field_list(&self) -> impl Iterator<Item = &Field<CtxT>> {
        self.fields.get().into_iter().flat_map(IndexMap::values)
    }

    /// Looks up the field of the provided name.
    pub fn field_by_name(&self, name: &str) -> Option<&Field<CtxT>> {
        self.fields.get()?.get(name)
    }

    /// Wraps this [`Object`] type into a generic [`Type`].
    pub fn into_type(self) -> Type<CtxT> {
        Type::Object(Arc::new(self))
    }
}

/// Interface type metadata
#[derive(Debug)]
pub struct Interface<CtxT = ()> {
    #[doc(hidden)]
    pub name: ArcStr,
    #[doc(hidden)]
    pub description: Option<ArcStr>,
    fields: OnceLock<IndexMap<ArcStr, Field<CtxT>>>,
    #[debug(skip)]
    type_resolver: Option<Arc<dyn TypeResolve<CtxT>>>,
}

impl<CtxT> Interface<CtxT> {
    /// Build a new [`Interface`] type with the specified `name` and no fields
    /// defined yet.
    pub fn new(name: impl Into<ArcStr>) -> Self {
        Self {
            name: name.into(),
            description: None,
            fields: OnceLock::new(),
            type_resolver: None,
        }
    }

    /// Sets the `description` of this [`Interface`] type.
    ///
    /// Overwrites any previously set description.
    #[must_use]
    pub fn description(mut self, description: impl Into<ArcStr>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the `fields` of this [`Interface`] type.
    ///
    /// Overwrites any previously set fields.
    #[must_use]
    pub fn fields(mut self, fields: impl IntoIterator<Item = Field<CtxT>>) -> Self {
        self.fields = OnceLock::from(index_by_name(fields, |f| &f.name));
        self
    }

    /// Sets the callback picking the concrete type of a runtime value.
    #[must_use]
    pub fn type_resolver(mut self, resolver: impl TypeResolve<CtxT> + 'static) -> Self {
        self.type_resolver = Some(Arc::new(resolver));
        self
    }

    /// Defines the `fields` of an already shared [`Interface`] type.
    ///
    /// # Errors
    ///
    /// If the fields are already defined.
    pub fn define_fields(
        &self,
        fields: impl IntoIterator<Item = Field<CtxT>>,
    ) -> Result<(), SchemaError> {
        self.fields
            .set(index_by_name(fields, |f| &f.name))
            .map_err(|_| SchemaError::AlreadyDefined(self.name.clone()))
    }

    /// Iterates over the fields in declaration order.
    pub fn field_list(&self) -> impl Iterator<Item = &Field<CtxT>> {
        self.fields.get().into_iter().flat_map(IndexMap::values)
    }

    /// Looks up the field of the provided name.
    pub fn field_by_name(&self, name: &str) -> Option<&Field<CtxT>> {
        self.fields.get()?.get(name)
    }

    /// Picks the concrete [`Object`] type of `value`.
    ///
    /// # Errors
    ///
    /// If no type resolver is set, or it fails.
    pub fn resolve_type(&self, ctx: &CtxT, value: &Value) -> FieldResult<Arc<Object<CtxT>>> {
        resolve_type_with(&self.name, self.type_resolver.as_deref(), ctx, value)
    }

    /// Wraps this [`Interface`] type into a generic [`Type`].
    pub fn into_type(self) -> Type<CtxT> {
        Type::Interface(Arc::new(self))
    }
}

fn resolve_type_with<CtxT>(
    type_name: &str,
    resolver: Option<&dyn TypeResolve<CtxT>>,
    ctx: &CtxT,
    value: &Value,
) -> FieldResult<Arc<Object<CtxT>>> {
    match resolver {
        Some(resolver) => resolver.resolve_type(ctx, value),
        None => Err(FieldError::from(format!(
            "Abstract type \"{type_name}\" has no type resolver",
        ))),
    }
}

/// Union type metadata
#[derive(Debug)]
pub struct Union<CtxT = ()> {
    #[doc(hidden)]
    pub name: ArcStr,
    #[doc(hidden)]
    pub description: Option<ArcStr>,
    types: IndexMap<ArcStr, Arc<Object<CtxT>>>,
    #[debug(skip)]
    type_resolver: Option<Arc<dyn TypeResolve<CtxT>>>,
}

impl<CtxT> Union<CtxT> {
    /// Build a new [`Union`] type with the specified `name` and possible
    /// `types`.
    pub fn new(
        name: impl Into<ArcStr>,
        types: impl IntoIterator<Item = Arc<Object<CtxT>>>,
    ) -> Self {
        Self {
            name: name.into(),
            description: None,
            types: index_by_name(types, |o| &o.name),
            type_resolver: None,
        }
    }

    /// Sets the `description` of this [`Union`] type.
    ///
    /// Overwrites any previously set description.
    #[must_use]
    pub fn description(mut self, description: impl Into<ArcStr>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the callback picking the concrete type of a runtime value.
    #[must_use]
    pub fn type_resolver(mut self, resolver: impl TypeResolve<CtxT> + 'static) -> Self {
        self.type_resolver = Some(Arc::new(resolver));
        self
    }

    /// Iterates over the possible types in declaration order.
    pub fn possible_types(&self) -> impl Iterator<Item = &Arc<Object<CtxT>>> {
        self.types.values()
    }

    /// Looks up the possible type of the provided name.
    pub fn possible_type_by_name(&self, name: &str) -> Option<&Arc<Object<CtxT>>> {
        self.types.get(name)
    }

    /// Picks the concrete [`Object`] type of `value`.
    ///
    /// # Errors
    ///
    /// If no type resolver is set, or it fails.
    pub fn resolve_type(&self, ctx: &CtxT, value: &Value) -> FieldResult<Arc<Object<CtxT>>> {
        resolve_type_with(&self.name, self.type_resolver.as_deref(), ctx, value)
    }

    /// Wraps this [`Union`] type into a generic [`Type`].
    pub fn into_type(self) -> Type<CtxT> {
        Type::Union(Arc::new(self))
    }
}

/// Metadata for a single value in an enum
#[derive(Clone, Debug, PartialEq)]
pub struct EnumValue {
    /// The name of the enum value
    ///
    /// This is the string literal representation of the enum in responses.
    pub name: ArcStr,
    /// The optional description of the enum value.
    ///
    /// Note: this is not the description of the enum itself; it's the
    /// description of this enum _value_.
    pub description: Option<ArcStr>,
    /// Whether the field is deprecated or not, with an optional reason.
    pub deprecation_status: DeprecationStatus,
    /// Internal representation of the enum value.
    pub value: Value,
}

impl EnumValue {
    /// Constructs a new [`EnumValue`] with the provided `name`, represented
    /// internally by its name as a string.
    pub fn new(name: impl Into<ArcStr>) -> Self {
        let name = name.into();
        Self {
            value: Value::String(name.to_string()),
            name,
            description: None,
            deprecation_status: DeprecationStatus::Current,
        }
    }

    /// Sets the `description` of this [`EnumValue`].
    ///
    /// Overwrites any previously set description.
    #[must_use]
    pub fn description(mut self, description: impl Into<ArcStr>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets this [`EnumValue`] as deprecated with an optional `reason`.
    ///
    /// Overwrites any previously set deprecation reason.
    #[must_use]
    pub fn deprecated(mut self, reason: Option<ArcStr>) -> Self {
        self.deprecation_status = DeprecationStatus::Deprecated(reason);
        self
    }

    /// Sets the internal representation of this [`EnumValue`].
    #[must_use]
    pub fn value(mut self, value: impl Into<Value>) -> Self {
        self.value = value.into();
        self
    }
}

/// Enum type metadata
#[derive(Debug)]
pub struct Enum {
    #[doc(hidden)]
    pub name: ArcStr,
    #[doc(hidden)]
    pub description: Option<ArcStr>,
    values: Vec<EnumValue>,
    reverse_map: Vec<(Value, ArcStr)>,
}

impl Enum {
    /// Build a new [`Enum`] type with the specified `name` and possible
    /// `values`.
    ///
    /// The reverse mapping from internal representations to names is built
    /// out of the `values`.
    pub fn new(name: impl Into<ArcStr>, values: impl IntoIterator<Item = EnumValue>) -> Self {
        let values = values.into_iter().collect::<Vec<_>>();
        let reverse_map = values
            .iter()
            .map(|v| (v.value.clone(), v.name.clone()))
            .collect();

        Self {
            name: name.into(),
            description: None,
            values,
            reverse_map,
        }
    }

    /// Sets the `description` of this [`Enum`] type.
    ///
    /// Overwrites any previously set description.
    #[must_use]
    pub fn description(mut self, description: impl Into<ArcStr>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Replaces the mapping from internal representations back to value names.
    #[must_use]
    pub fn reverse_map<N: Into<ArcStr>>(
        mut self,
        entries: impl IntoIterator<Item = (Value, N)>,
    ) -> Self {
        self.reverse_map = entries.into_iter().map(|(v, n)| (v, n.into())).collect();
        self
    }

    /// Values of this [`Enum`] type, in declaration order.
    pub fn values(&self) -> &[EnumValue] {
        &self.values
    }

    /// Name of the enum value represented internally by `value`.
    pub fn name_of(&self, value: &Value) -> Option<&str> {
        self.reverse_map
            .iter()
            .find(|(v, _)| v == value)
            .map(|(_, n)| n.as_str())
    }

    /// Internal representation of the enum value of the provided `name`.
    pub fn value_of(&self, name: &str) -> Option<&Value> {
        self.values
            .iter()
            .find(|v| v.name.as_str() == name)
            .map(|v| &v.value)
    }

    /// Wraps this [`Enum`] type into a generic [`Type`].
    pub fn into_type<CtxT>(self) -> Type<CtxT> {
        Type::Enum(Arc::new(self))
    }
}

/// Metadata for a field of an [`InputObject`]
#[derive(Debug)]
pub struct InputField<CtxT = ()> {
    #[doc(hidden)]
    pub name: ArcStr,
    #[doc(hidden)]
    pub description: Option<ArcStr>,
    #[doc(hidden)]
    pub field_type: Type<CtxT>,
    #[doc(hidden)]
    pub default_value: Option<Value>,
}

impl<CtxT> InputField<CtxT> {
    /// Builds a new [`InputField`] of the given [`Type`] with the given `name`.
    pub fn new(name: impl Into<ArcStr>, field_type: impl Into<Type<CtxT>>) -> Self {
        Self {
            name: name.into(),
            description: None,
            field_type: field_type.into(),
            default_value: None,
        }
    }

    /// Sets the `description` of this [`InputField`].
    ///
    /// Overwrites any previously set description.
    #[must_use]
    pub fn description(mut self, description: impl Into<ArcStr>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the default value of this [`InputField`].
    ///
    /// Overwrites any previously set default value.
    #[must_use]
    pub fn default_value(mut self, val: impl Into<Value>) -> Self {
        self.default_value = Some(val.into());
        self
    }
}

/// Input object metadata
#[derive(Debug)]
pub struct InputObject<CtxT = ()> {
    #[doc(hidden)]
    pub name: ArcStr,
    #[doc(hidden)]
    pub description: Option<ArcStr>,
    fields: OnceLock<IndexMap<ArcStr, InputField<CtxT>>>,
}

impl<CtxT> InputObject<CtxT> {
    /// Build a new [`InputObject`] type with the specified `name` and no fields
    /// defined yet.
    pub fn new(name: impl Into<ArcStr>) -> Self {
        Self {
            name: name.into(),
            description: None,
            fields: OnceLock::new(),
        }
    }

    /// Sets the `description` of this [`InputObject`] type.
    ///
    /// Overwrites any previously set description.
    #[must_use]
    pub fn description(mut self, description: impl Into<ArcStr>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the input `fields` of this [`InputObject`] type.
    ///
    /// Overwrites any previously set fields.
    #[must_use]
    pub fn fields(mut self, fields: impl IntoIterator<Item = InputField<CtxT>>) -> Self {
        self.fields = OnceLock::from(index_by_name(fields, |f| &f.name));
        self
    }

    /// Defines the input `fields` of an already shared [`InputObject`] type.
    ///
    /// # Errors
    ///
    /// If the fields are already defined.
    pub fn define_fields(
        &self,
        fields: impl IntoIterator<Item = InputField<CtxT>>,
    ) -> Result<(), SchemaError> {
        self.fields
            .set(index_by_name(fields, |f| &f.name))
            .map_err(|_| SchemaError::AlreadyDefined(self.name.clone()))
    }

    /// Iterates over the input fields in declaration order.
    pub fn field_list(&self) -> impl Iterator<Item = &InputField<CtxT>> {
        self.fields.get().into_iter().flat_map(IndexMap::values)
    }

    /// Looks up the input field of the provided name.
    pub fn field_by_name(&self, name: &str) -> Option<&InputField<CtxT>> {
        self.fields.get()?.get(name)
    }

    /// Wraps this [`InputObject`] type into a generic [`Type`].
    pub fn into_type(self) -> Type<CtxT> {
        Type::InputObject(Arc::new(self))
    }
}

/// Schema type: a named type shared by reference, or a structural wrapper.
///
/// The set of variants is closed, so every match over it is exhaustive.
pub enum Type<CtxT = ()> {
    #[expect(missing_docs, reason = "self-explanatory")]
    Scalar(Arc<Scalar>),
    #[expect(missing_docs, reason = "self-explanatory")]
    Object(Arc<Object<CtxT>>),
    #[expect(missing_docs, reason = "self-explanatory")]
    Interface(Arc<Interface<CtxT>>),
    #[expect(missing_docs, reason = "self-explanatory")]
    Union(Arc<Union<CtxT>>),
    #[expect(missing_docs, reason = "self-explanatory")]
    Enum(Arc<Enum>),
    #[expect(missing_docs, reason = "self-explanatory")]
    InputObject(Arc<InputObject<CtxT>>),
    /// A list of the inner type, e.g. `[String]`.
    List(Box<Type<CtxT>>),
    /// A non-null wrapper of the inner type, e.g. `String!`.
    NonNull(Box<Type<CtxT>>),
}

impl<CtxT> Type<CtxT> {
    /// Wraps `of_type` into a list.
    pub fn list(of_type: impl Into<Self>) -> Self {
        Self::List(Box::new(of_type.into()))
    }

    /// Wraps `of_type` into a non-null, unless it is non-null already.
    pub fn non_null(of_type: impl Into<Self>) -> Self {
        match of_type.into() {
            t @ Self::NonNull(_) => t,
            t => Self::NonNull(Box::new(t)),
        }
    }

    /// Access the name of the type, if applicable
    ///
    /// Lists and non-null wrappers don't have names.
    pub fn name(&self) -> Option<&str> {
        Some(match self {
            Self::Scalar(s) => s.name.as_str(),
            Self::Object(o) => o.name.as_str(),
            Self::Interface(i) => i.name.as_str(),
            Self::Union(u) => u.name.as_str(),
            Self::Enum(e) => e.name.as_str(),
            Self::InputObject(io) => io.name.as_str(),
            Self::List(_) | Self::NonNull(_) => return None,
        })
    }

    /// Access the description of the type, if applicable
    pub fn description(&self) -> Option<&str> {
        match self {
            Self::Scalar(s) => s.description.as_deref(),
            Self::Object(o) => o.description.as_deref(),
            Self::Interface(i) => i.description.as_deref(),
            Self::Union(u) => u.description.as_deref(),
            Self::Enum(e) => e.description.as_deref(),
            Self::InputObject(io) => io.description.as_deref(),
            Self::List(_) | Self::NonNull(_) => None,
        }
    }

    /// Inner type of a list or non-null wrapper.
    pub fn of_type(&self) -> Option<&Self> {
        match self {
            Self::List(t) | Self::NonNull(t) => Some(t),
            _ => None,
        }
    }

    /// Converts into a [`NamedType`], unless this is a wrapper.
    pub fn as_named(&self) -> Option<NamedType<CtxT>> {
        match self {
            Self::List(_) | Self::NonNull(_) => None,
            named => Some(named.named_type()),
        }
    }

    /// Innermost [`NamedType`], unwrapping all lists and non-null wrappers.
    pub fn named_type(&self) -> NamedType<CtxT> {
        match self {
            Self::Scalar(s) => NamedType::Scalar(Arc::clone(s)),
            Self::Object(o) => NamedType::Object(Arc::clone(o)),
            Self::Interface(i) => NamedType::Interface(Arc::clone(i)),
            Self::Union(u) => NamedType::Union(Arc::clone(u)),
            Self::Enum(e) => NamedType::Enum(Arc::clone(e)),
            Self::InputObject(io) => NamedType::InputObject(Arc::clone(io)),
            Self::List(of) | Self::NonNull(of) => of.named_type(),
        }
    }

    /// Determines if this type only can represent non-null values.
    pub fn is_non_null(&self) -> bool {
        matches!(self, Self::NonNull(_))
    }

    /// See [`is_scalar_type()`].
    pub fn is_scalar(&self) -> bool {
        is_scalar_type(self)
    }

    /// See [`is_argument_type()`].
    pub fn is_argument(&self) -> bool {
        is_argument_type(self)
    }

    /// Checks whether the innermost named type is a scalar or an enum.
    pub fn is_leaf(&self) -> bool {
        matches!(self.named_type(), NamedType::Scalar(_) | NamedType::Enum(_))
    }

    /// Checks whether the innermost named type is an object, interface or
    /// union.
    pub fn is_composite(&self) -> bool {
        matches!(
            self.named_type(),
            NamedType::Object(_) | NamedType::Interface(_) | NamedType::Union(_),
        )
    }

    /// Checks whether the innermost named type is an interface or union.
    pub fn is_abstract(&self) -> bool {
        matches!(
            self.named_type(),
            NamedType::Interface(_) | NamedType::Union(_),
        )
    }
}

/// Checks whether `t` is a [`Scalar`], once all list and non-null wrappers
/// are removed.
///
/// Enums are __not__ considered scalars here, even though they are leaf types.
pub fn is_scalar_type<CtxT>(t: &Type<CtxT>) -> bool {
    match t {
        Type::List(of) | Type::NonNull(of) => is_scalar_type(of),
        Type::Scalar(_) => true,
        Type::Object(_)
        | Type::Interface(_)
        | Type::Union(_)
        | Type::Enum(_)
        | Type::InputObject(_) => false,
    }
}

/// Checks whether `t` may type a field argument, a directive argument or an
/// input object field: a [`Scalar`], [`InputObject`] or [`Enum`], once all
/// list and non-null wrappers are removed.
pub fn is_argument_type<CtxT>(t: &Type<CtxT>) -> bool {
    match t {
        Type::List(of) | Type::NonNull(of) => is_argument_type(of),
        Type::Scalar(_) | Type::InputObject(_) | Type::Enum(_) => true,
        Type::Object(_) | Type::Interface(_) | Type::Union(_) => false,
    }
}

impl<CtxT> Clone for Type<CtxT> {
    fn clone(&self) -> Self {
        match self {
            Self::Scalar(s) => Self::Scalar(Arc::clone(s)),
            Self::Object(o) => Self::Object(Arc::clone(o)),
            Self::Interface(i) => Self::Interface(Arc::clone(i)),
            Self::Union(u) => Self::Union(Arc::clone(u)),
            Self::Enum(e) => Self::Enum(Arc::clone(e)),
            Self::InputObject(io) => Self::InputObject(Arc::clone(io)),
            Self::List(t) => Self::List(t.clone()),
            Self::NonNull(t) => Self::NonNull(t.clone()),
        }
    }
}

/// Named types are equal when they are the very same shared instance.
impl<CtxT> PartialEq for Type<CtxT> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::List(t1), Self::List(t2)) | (Self::NonNull(t1), Self::NonNull(t2)) => t1 == t2,
            _ => match (self.as_named(), other.as_named()) {
                (Some(n1), Some(n2)) => n1 == n2,
                _ => false,
            },
        }
    }
}

impl<CtxT> fmt::Display for Type<CtxT> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::List(t) => write!(f, "[{t}]"),
            Self::NonNull(t) => write!(f, "{t}!"),
            named => f.write_str(named.name().unwrap_or_default()),
        }
    }
}

// Shallow, as types may refer to each other.
impl<CtxT> fmt::Debug for Type<CtxT> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Type({self})")
    }
}

/// Identity-bearing subset of [`Type`], excluding the structural wrappers.
#[expect(missing_docs, reason = "self-explanatory")]
pub enum NamedType<CtxT = ()> {
    Scalar(Arc<Scalar>),
    Object(Arc<Object<CtxT>>),
    Interface(Arc<Interface<CtxT>>),
    Union(Arc<Union<CtxT>>),
    Enum(Arc<Enum>),
    InputObject(Arc<InputObject<CtxT>>),
}

impl<CtxT> NamedType<CtxT> {
    /// Name of this type.
    pub fn name(&self) -> &ArcStr {
        match self {
            Self::Scalar(s) => &s.name,
            Self::Object(o) => &o.name,
            Self::Interface(i) => &i.name,
            Self::Union(u) => &u.name,
            Self::Enum(e) => &e.name,
            Self::InputObject(io) => &io.name,
        }
    }

    /// Description of this type, if any.
    pub fn description(&self) -> Option<&str> {
        match self {
            Self::Scalar(s) => s.description.as_deref(),
            Self::Object(o) => o.description.as_deref(),
            Self::Interface(i) => i.description.as_deref(),
            Self::Union(u) => u.description.as_deref(),
            Self::Enum(e) => e.description.as_deref(),
            Self::InputObject(io) => io.description.as_deref(),
        }
    }

    /// Wraps this [`NamedType`] back into a generic [`Type`].
    pub fn as_type(&self) -> Type<CtxT> {
        self.clone().into()
    }
}

impl<CtxT> Clone for NamedType<CtxT> {
    fn clone(&self) -> Self {
        match self {
            Self::Scalar(s) => Self::Scalar(Arc::clone(s)),
            Self::Object(o) => Self::Object(Arc::clone(o)),
            Self::Interface(i) => Self::Interface(Arc::clone(i)),
            Self::Union(u) => Self::Union(Arc::clone(u)),
            Self::Enum(e) => Self::Enum(Arc::clone(e)),
            Self::InputObject(io) => Self::InputObject(Arc::clone(io)),
        }
    }
}

impl<CtxT> PartialEq for NamedType<CtxT> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Scalar(a), Self::Scalar(b)) => Arc::ptr_eq(a, b),
            (Self::Object(a), Self::Object(b)) => Arc::ptr_eq(a, b),
            (Self::Interface(a), Self::Interface(b)) => Arc::ptr_eq(a, b),
            (Self::Union(a), Self::Union(b)) => Arc::ptr_eq(a, b),
            (Self::Enum(a), Self::Enum(b)) => Arc::ptr_eq(a, b),
            (Self::InputObject(a), Self::InputObject(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl<CtxT> fmt::Display for NamedType<CtxT> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl<CtxT> fmt::Debug for NamedType<CtxT> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NamedType({})", self.name())
    }
}

impl<CtxT> From<NamedType<CtxT>> for Type<CtxT> {
    fn from(t: NamedType<CtxT>) -> Self {
        match t {
            NamedType::Scalar(s) => Self::Scalar(s),
            NamedType::Object(o) => Self::Object(o),
            NamedType::Interface(i) => Self::Interface(i),
            NamedType::Union(u) => Self::Union(u),
            NamedType::Enum(e) => Self::Enum(e),
            NamedType::InputObject(io) => Self::InputObject(io),
        }
    }
}

impl<CtxT> From<Arc<Scalar>> for Type<CtxT> {
    fn from(s: Arc<Scalar>) -> Self {
        Self::Scalar(s)
    }
}

impl<CtxT> From<Arc<Object<CtxT>>> for Type<CtxT> {
    fn from(o: Arc<Object<CtxT>>) -> Self {
        Self::Object(o)
    }
}

impl<CtxT> From<Arc<Interface<CtxT>>> for Type<CtxT> {
    fn from(i: Arc<Interface<CtxT>>) -> Self {
        Self::Interface(i)
    }
}

impl<CtxT> From<Arc<Union<CtxT>>> for Type<CtxT> {
    fn from(u: Arc<Union<CtxT>>) -> Self {
        Self::Union(u)
    }
}

impl<CtxT> From<Arc<Enum>> for Type<CtxT> {
    fn from(e: Arc<Enum>) -> Self {
        Self::Enum(e)
    }
}

impl<CtxT> From<Arc<InputObject<CtxT>>> for Type<CtxT> {
    fn from(io: Arc<InputObject<CtxT>>) -> Self {
        Self::InputObject(io)
    }
}

impl<CtxT> From<&Arc<Scalar>> for Type<CtxT> {
    fn from(s: &Arc<Scalar>) -> Self {
        Self::Scalar(Arc::clone(s))
    }
}

impl<CtxT> From<&Arc<Object<CtxT>>> for Type<CtxT> {
    fn from(o: &Arc<Object<CtxT>>) -> Self {
        Self::Object(Arc::clone(o))
    }
}

impl<CtxT> From<&Arc<Interface<CtxT>>> for Type<CtxT> {
    fn from(i: &Arc<Interface<CtxT>>) -> Self {
        Self::Interface(Arc::clone(i))
    }
}

impl<CtxT> From<&Arc<Union<CtxT>>> for Type<CtxT> {
    fn from(u: &Arc<Union<CtxT>>) -> Self {
        Self::Union(Arc::clone(u))
    }
}

impl<CtxT> From<&Arc<Enum>> for Type<CtxT> {
    fn from(e: &Arc<Enum>) -> Self {
        Self::Enum(Arc::clone(e))
    }
}

impl<CtxT> From<&Arc<InputObject<CtxT>>> for Type<CtxT> {
    fn from(io: &Arc<InputObject<CtxT>>) -> Self {
        Self::InputObject(Arc::clone(io))
    }
}

crate::sa::assert_impl_all!(Type: Send, Sync);
crate::sa::assert_impl_all!(NamedType: Send, Sync);
