use std::{fmt, slice};

use itertools::Itertools as _;

use crate::parser::{Location, Spanning, StringLiteral};

/// A type literal in the syntax tree
///
/// This enum carries no semantic information and might refer to types that do
/// not exist.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Type<'a> {
    /// A nullable named type, e.g. `String`
    Named(&'a str),
    /// A nullable list type, e.g. `[String]`
    ///
    /// The list itself is what's nullable, the containing type might be non-null.
    List(Box<Spanning<Type<'a>>>),
    /// A non-null wrapper around a named or list type, e.g. `String!` or
    /// `[String]!`.
    ///
    /// Never wraps another [`Type::NonNull`].
    NonNull(Box<Spanning<Type<'a>>>),
}

impl<'a> Type<'a> {
    /// Get the name of a named type.
    ///
    /// Only applies to named types; lists will return `None`.
    pub fn name(&self) -> Option<&'a str> {
        match self {
            Self::Named(n) => Some(*n),
            Self::NonNull(t) => t.item.name(),
            Self::List(_) => None,
        }
    }

    /// Get the innermost name by unpacking lists
    ///
    /// All type literals contain exactly one named type.
    pub fn innermost_name(&self) -> &'a str {
        match self {
            Self::Named(n) => *n,
            Self::List(t) | Self::NonNull(t) => t.item.innermost_name(),
        }
    }

    /// Determines if a type only can represent non-null values.
    pub fn is_non_null(&self) -> bool {
        matches!(self, Self::NonNull(_))
    }

    /// Compares equality with another [`Type`] ignoring any source position
    /// information.
    pub fn unlocated_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Named(n1), Self::Named(n2)) => n1 == n2,
            (Self::List(t1), Self::List(t2)) | (Self::NonNull(t1), Self::NonNull(t2)) => {
                t1.item.unlocated_eq(&t2.item)
            }
            _ => false,
        }
    }
}

impl fmt::Display for Type<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(n) => write!(f, "{n}"),
            Self::List(t) => write!(f, "[{}]", t.item),
            Self::NonNull(t) => write!(f, "{}!", t.item),
        }
    }
}

/// A value literal as written in the source.
///
/// Scalar literals keep their raw text: numbers are not converted and strings
/// keep their escape sequences undecoded. Use
/// [`Value::from_literal()`](crate::Value::from_literal) to obtain a runtime
/// value out of it.
///
/// Lists and objects variants are _spanned_, i.e. they contain a reference to
/// their position in the source file.
#[expect(missing_docs, reason = "self-explanatory")]
#[derive(Clone, Debug, PartialEq)]
pub enum Value<'a> {
    Null,
    Int(&'a str),
    Float(&'a str),
    String(StringLiteral<'a>),
    Boolean(bool),
    Enum(&'a str),
    Variable(&'a str),
    List(Vec<Spanning<Value<'a>>>),
    Object(Vec<Spanning<ObjectField<'a>>>),
}

/// A single `name: value` entry of an object literal.
#[expect(missing_docs, reason = "self-explanatory")]
#[derive(Clone, Debug, PartialEq)]
pub struct ObjectField<'a> {
    pub name: Spanning<&'a str>,
    pub value: Spanning<Value<'a>>,
}

impl<'a> Value<'a> {
    /// Returns the literal text of a scalar-like value.
    ///
    /// Gives `null`, `true`, `false`, the digits of a number, the content of a
    /// string (escapes undecoded), the name of an enum value or of a variable.
    /// Lists and objects have no raw text and return [`None`].
    pub fn raw_value(&self) -> Option<&'a str> {
        match self {
            Self::Null => Some("null"),
            Self::Boolean(true) => Some("true"),
            Self::Boolean(false) => Some("false"),
            Self::Int(s) | Self::Float(s) | Self::Enum(s) | Self::Variable(s) => Some(*s),
            Self::String(StringLiteral::Quoted(s) | StringLiteral::Block(s)) => Some(*s),
            Self::List(_) | Self::Object(_) => None,
        }
    }

    /// Returns the items of a list literal.
    pub fn as_list(&self) -> Option<&[Spanning<Value<'a>>]> {
        match self {
            Self::List(l) => Some(l),
            _ => None,
        }
    }

    /// Returns the fields of an object literal.
    pub fn as_object(&self) -> Option<&[Spanning<ObjectField<'a>>]> {
        match self {
            Self::Object(o) => Some(o),
            _ => None,
        }
    }

    /// Does the value represent a `null`?
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Recursively finds all variables
    pub fn referenced_variables(&self) -> Vec<&'a str> {
        match self {
            Self::Variable(name) => vec![*name],
            Self::List(l) => l
                .iter()
                .flat_map(|v| v.item.referenced_variables())
                .collect(),
            Self::Object(o) => o
                .iter()
                .flat_map(|f| f.item.value.item.referenced_variables())
                .collect(),
            _ => vec![],
        }
    }

    /// Checks whether this literal is allowed in a constant position, i.e.
    /// contains no variables at any depth.
    pub fn is_const(&self) -> bool {
        match self {
            Self::Variable(_) => false,
            Self::List(l) => l.iter().all(|v| v.item.is_const()),
            Self::Object(o) => o.iter().all(|f| f.item.value.item.is_const()),
            _ => true,
        }
    }

    /// Compares equality with another [`Value`] ignoring any source position
    /// information.
    pub fn unlocated_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::List(l1), Self::List(l2)) => {
                l1.len() == l2.len()
                    && l1
                        .iter()
                        .zip(l2)
                        .all(|(v1, v2)| v1.item.unlocated_eq(&v2.item))
            }
            (Self::Object(o1), Self::Object(o2)) => {
                o1.len() == o2.len()
                    && o1.iter().zip(o2).all(|(f1, f2)| {
                        f1.item.name.item == f2.item.name.item
                            && f1.item.value.item.unlocated_eq(&f2.item.value.item)
                    })
            }
            _ => self == other,
        }
    }
}

impl fmt::Display for Value<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            Self::Int(s) | Self::Float(s) | Self::Enum(s) => write!(f, "{s}"),
            Self::Boolean(b) => write!(f, "{b}"),
            Self::String(StringLiteral::Quoted(s)) => write!(f, "\"{s}\""),
            Self::String(StringLiteral::Block(s)) => write!(f, "\"\"\"{s}\"\"\""),
            Self::Variable(v) => write!(f, "${v}"),
            Self::List(l) => write!(f, "[{}]", l.iter().map(|v| &v.item).format(", ")),
            Self::Object(o) => write!(
                f,
                "{{{}}}",
                o.iter()
                    .map(|fld| format!("{}: {}", fld.item.name.item, fld.item.value.item))
                    .format(", "),
            ),
        }
    }
}

/// A single `name: value` argument of a field or directive.
#[expect(missing_docs, reason = "self-explanatory")]
#[derive(Clone, Debug, PartialEq)]
pub struct Argument<'a> {
    pub name: Spanning<&'a str>,
    pub value: Spanning<Value<'a>>,
}

/// Parenthesized argument list, e.g. `(first: 10, after: $cursor)`.
#[expect(missing_docs, reason = "self-explanatory")]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Arguments<'a> {
    pub items: Vec<Spanning<Argument<'a>>>,
}

impl<'a> Arguments<'a> {
    /// Iterates over the arguments in source order.
    pub fn iter(&self) -> slice::Iter<'_, Spanning<Argument<'a>>> {
        self.items.iter()
    }

    /// Number of arguments.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Checks whether there are no arguments.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Looks up the value of the argument with the provided name.
    pub fn get(&self, key: &str) -> Option<&Spanning<Value<'a>>> {
        self.items
            .iter()
            .find(|arg| arg.item.name.item == key)
            .map(|arg| &arg.item.value)
    }
}

/// A single variable definition, e.g. `$id: ID! = 4 @dir`.
#[derive(Clone, Debug, PartialEq)]
pub struct VariableDefinition<'a> {
    /// Name of the variable, spanned from the leading `$`.
    pub variable: Spanning<&'a str>,
    /// Declared type of the variable.
    pub var_type: Spanning<Type<'a>>,
    /// Constant default value.
    pub default_value: Option<Spanning<Value<'a>>>,
    /// Directives attached to the definition.
    pub directives: Vec<Spanning<Directive<'a>>>,
}

/// Parenthesized variable definitions of an operation.
#[expect(missing_docs, reason = "self-explanatory")]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct VariableDefinitions<'a> {
    pub items: Vec<Spanning<VariableDefinition<'a>>>,
}

impl<'a> VariableDefinitions<'a> {
    /// Iterates over the definitions in source order.
    pub fn iter(&self) -> slice::Iter<'_, Spanning<VariableDefinition<'a>>> {
        self.items.iter()
    }

    /// Looks up the definition of the variable with the provided name.
    pub fn get(&self, name: &str) -> Option<&Spanning<VariableDefinition<'a>>> {
        self.items.iter().find(|def| def.item.variable.item == name)
    }
}

#[expect(missing_docs, reason = "self-explanatory")]
#[derive(Clone, Debug, PartialEq)]
pub struct Directive<'a> {
    pub name: Spanning<&'a str>,
    pub arguments: Option<Spanning<Arguments<'a>>>,
}

/// A field selection, e.g. `smallPic: profilePic(size: 64) @skip(if: $x)`.
#[derive(Clone, Debug, PartialEq)]
pub struct Field<'a> {
    /// Response key of the field.
    ///
    /// Equals `name` (span included) when no explicit alias was written.
    pub alias: Spanning<&'a str>,
    /// Name of the selected field.
    pub name: Spanning<&'a str>,
    /// Arguments of the field, if any were written.
    pub arguments: Option<Spanning<Arguments<'a>>>,
    /// Directives attached to the field.
    pub directives: Vec<Spanning<Directive<'a>>>,
    /// Nested selections of the field, if any were written.
    pub selection_set: Option<Spanning<SelectionSet<'a>>>,
}

impl Field<'_> {
    /// Checks whether an explicit `alias:` was written for this field.
    pub fn has_alias(&self) -> bool {
        self.alias != self.name
    }
}

#[expect(missing_docs, reason = "self-explanatory")]
#[derive(Clone, Debug, PartialEq)]
pub struct FragmentSpread<'a> {
    pub name: Spanning<&'a str>,
    pub directives: Vec<Spanning<Directive<'a>>>,
}

#[expect(missing_docs, reason = "self-explanatory")]
#[derive(Clone, Debug, PartialEq)]
pub struct InlineFragment<'a> {
    pub type_condition: Option<Spanning<&'a str>>,
    pub directives: Vec<Spanning<Directive<'a>>>,
    pub selection_set: Spanning<SelectionSet<'a>>,
}

/// Entry in a GraphQL selection set
///
/// This enum represents one of the three variants of a selection that exists
/// in GraphQL: a field, a fragment spread, or an inline fragment. Each of the
/// variants references their location in the query source.
///
/// ```text
/// {
///   field(withArg: 123) { subField }
///   ...fragmentSpread
///   ...on User {
///     inlineFragmentField
///   }
/// }
/// ```
#[expect(missing_docs, reason = "self-explanatory")]
#[derive(Clone, Debug, PartialEq)]
pub enum Selection<'a> {
    Field(Spanning<Field<'a>>),
    FragmentSpread(Spanning<FragmentSpread<'a>>),
    InlineFragment(Spanning<InlineFragment<'a>>),
}

impl Selection<'_> {
    /// [`Location`] of the first token of this selection.
    pub fn location(&self) -> Location {
        match self {
            Self::Field(f) => f.location(),
            Self::FragmentSpread(s) => s.location(),
            Self::InlineFragment(i) => i.location(),
        }
    }
}

/// Brace-delimited, non-empty list of selections.
#[expect(missing_docs, reason = "self-explanatory")]
#[derive(Clone, Debug, PartialEq)]
pub struct SelectionSet<'a> {
    pub selections: Vec<Selection<'a>>,
}

#[expect(missing_docs, reason = "self-explanatory")]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum OperationType {
    Query,
    Mutation,
    Subscription,
}

impl fmt::Display for OperationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Query => "query",
            Self::Mutation => "mutation",
            Self::Subscription => "subscription",
        })
    }
}

#[expect(missing_docs, reason = "self-explanatory")]
#[derive(Clone, Debug, PartialEq)]
pub struct Operation<'a> {
    pub operation_type: OperationType,
    pub name: Option<Spanning<&'a str>>,
    pub variable_definitions: Option<Spanning<VariableDefinitions<'a>>>,
    pub directives: Vec<Spanning<Directive<'a>>>,
    pub selection_set: Spanning<SelectionSet<'a>>,
}

#[expect(missing_docs, reason = "self-explanatory")]
#[derive(Clone, Debug, PartialEq)]
pub struct Fragment<'a> {
    pub name: Spanning<&'a str>,
    pub type_condition: Spanning<&'a str>,
    pub directives: Vec<Spanning<Directive<'a>>>,
    pub selection_set: Spanning<SelectionSet<'a>>,
}

#[expect(missing_docs, reason = "self-explanatory")]
#[derive(Clone, Debug, PartialEq)]
pub enum Definition<'a> {
    Operation(Spanning<Operation<'a>>),
    Fragment(Spanning<Fragment<'a>>),
}

impl Definition<'_> {
    /// [`Location`] of the first token of this definition.
    pub fn location(&self) -> Location {
        match self {
            Self::Operation(o) => o.location(),
            Self::Fragment(f) => f.location(),
        }
    }
}

/// Root of a parsed executable document.
#[derive(Clone, Debug, PartialEq)]
pub struct Document<'a> {
    /// Operation and fragment definitions, in source order.
    pub definitions: Vec<Definition<'a>>,

    /// Always the zero [`Location`]: the document itself is not attributed a
    /// position, only its definitions are.
    pub location: Location,
}

impl<'a> Document<'a> {
    /// Iterates over the operation definitions.
    pub fn operations(&self) -> impl Iterator<Item = &Spanning<Operation<'a>>> {
        self.definitions.iter().filter_map(|d| match d {
            Definition::Operation(o) => Some(o),
            Definition::Fragment(_) => None,
        })
    }

    /// Iterates over the fragment definitions.
    pub fn fragments(&self) -> impl Iterator<Item = &Spanning<Fragment<'a>>> {
        self.definitions.iter().filter_map(|d| match d {
            Definition::Fragment(f) => Some(f),
            Definition::Operation(_) => None,
        })
    }

    /// Selects the operation to run.
    ///
    /// With a `name`, returns the operation of that name. Without one, returns
    /// the single operation of the document, or [`None`] if the document holds
    /// zero or several operations.
    pub fn operation_by_name(&self, name: Option<&str>) -> Option<&Spanning<Operation<'a>>> {
        match name {
            Some(name) => self
                .operations()
                .find(|o| o.item.name.as_ref().is_some_and(|n| n.item == name)),
            None => self.operations().exactly_one().ok(),
        }
    }

    /// Returns the fragment of the provided name.
    pub fn fragment_by_name(&self, name: &str) -> Option<&Spanning<Fragment<'a>>> {
        self.fragments().find(|f| f.item.name.item == name)
    }
}

/// Tag of every syntax tree node.
#[expect(missing_docs, reason = "self-explanatory")]
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Kind {
    Document,
    OperationDefinition,
    FragmentDefinition,
    SelectionSet,
    Field,
    FragmentSpread,
    InlineFragment,
    Argument,
    VariableDefinition,
    Directive,
    Name,
    Variable,
    IntValue,
    FloatValue,
    StringValue,
    BooleanValue,
    NullValue,
    EnumValue,
    ListValue,
    ObjectValue,
    ObjectField,
    NamedType,
    ListType,
    NonNullType,
}

impl Kind {
    /// Name of this kind as used by GraphQL tooling, e.g. `OperationDefinition`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Document => "Document",
            Self::OperationDefinition => "OperationDefinition",
            Self::FragmentDefinition => "FragmentDefinition",
            Self::SelectionSet => "SelectionSet",
            Self::Field => "Field",
            Self::FragmentSpread => "FragmentSpread",
            Self::InlineFragment => "InlineFragment",
            Self::Argument => "Argument",
            Self::VariableDefinition => "VariableDefinition",
            Self::Directive => "Directive",
            Self::Name => "Name",
            Self::Variable => "Variable",
            Self::IntValue => "IntValue",
            Self::FloatValue => "FloatValue",
            Self::StringValue => "StringValue",
            Self::BooleanValue => "BooleanValue",
            Self::NullValue => "NullValue",
            Self::EnumValue => "EnumValue",
            Self::ListValue => "ListValue",
            Self::ObjectValue => "ObjectValue",
            Self::ObjectField => "ObjectField",
            Self::NamedType => "NamedType",
            Self::ListType => "ListType",
            Self::NonNullType => "NonNullType",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Uniform access to the [`Kind`] of a syntax tree node.
///
/// Implemented by every node type and, transparently, by [`Spanning`]
/// wrappers around them, whose [`Spanning::location()`] gives the node's
/// position.
pub trait Node {
    /// Tag of this node.
    fn kind(&self) -> Kind;
}

impl<T: Node> Node for Spanning<T> {
    fn kind(&self) -> Kind {
        self.item.kind()
    }
}

impl Node for &str {
    fn kind(&self) -> Kind {
        Kind::Name
    }
}

impl Node for Document<'_> {
    fn kind(&self) -> Kind {
        Kind::Document
    }
}

impl Node for Definition<'_> {
    fn kind(&self) -> Kind {
        match self {
            Self::Operation(o) => o.kind(),
            Self::Fragment(f) => f.kind(),
        }
    }
}

impl Node for Operation<'_> {
    fn kind(&self) -> Kind {
        Kind::OperationDefinition
    }
}

impl Node for Fragment<'_> {
    fn kind(&self) -> Kind {
        Kind::FragmentDefinition
    }
}

impl Node for SelectionSet<'_> {
    fn kind(&self) -> Kind {
        Kind::SelectionSet
    }
}

impl Node for Selection<'_> {
    fn kind(&self) -> Kind {
        match self {
            Self::Field(_) => Kind::Field,
            Self::FragmentSpread(_) => Kind::FragmentSpread,
            Self::InlineFragment(_) => Kind::InlineFragment,
        }
    }
}

impl Node for Field<'_> {
    fn kind(&self) -> Kind {
        Kind::Field
    }
}

impl Node for FragmentSpread<'_> {
    fn kind(&self) -> Kind {
        Kind::FragmentSpread
    }
}

impl Node for InlineFragment<'_> {
    fn kind(&self) -> Kind {
        Kind::InlineFragment
    }
}

impl Node for Argument<'_> {
    fn kind(&self) -> Kind {
        Kind::Argument
    }
}

impl Node for VariableDefinition<'_> {
    fn kind(&self) -> Kind {
        Kind::VariableDefinition
    }
}

impl Node for Directive<'_> {
    fn kind(&self) -> Kind {
        Kind::Directive
    }
}

impl Node for ObjectField<'_> {
    fn kind(&self) -> Kind {
        Kind::ObjectField
    }
}

impl Node for Value<'_> {
    fn kind(&self) -> Kind {
        match self {
            Self::Null => Kind::NullValue,
            Self::Int(_) => Kind::IntValue,
            Self::Float(_) => Kind::FloatValue,
            Self::String(_) => Kind::StringValue,
            Self::Boolean(_) => Kind::BooleanValue,
            Self::Enum(_) => Kind::EnumValue,
            Self::Variable(_) => Kind::Variable,
            Self::List(_) => Kind::ListValue,
            Self::Object(_) => Kind::ObjectValue,
        }
    }
}

impl Node for Type<'_> {
    fn kind(&self) -> Kind {
        match self {
            Self::Named(_) => Kind::NamedType,
            Self::List(_) => Kind::ListType,
            Self::NonNull(_) => Kind::NonNullType,
        }
    }
}
