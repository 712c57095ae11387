use fnv::FnvHashSet;

use arcstr::ArcStr;

use crate::schema::meta::{Field, NamedType, Type};

/// Root of a schema
///
/// Brings the query, mutation and subscription root types together. Every
/// root is optional.
pub struct Schema<CtxT = ()> {
    query: Option<Type<CtxT>>,
    mutation: Option<Type<CtxT>>,
    subscription: Option<Type<CtxT>>,
}

impl<CtxT> Schema<CtxT> {
    /// Creates a new [`Schema`] with no root types.
    #[must_use]
    pub fn new() -> Self {
        Self {
            query: None,
            mutation: None,
            subscription: None,
        }
    }

    /// Sets the query root type.
    #[must_use]
    pub fn query(mut self, t: impl Into<Type<CtxT>>) -> Self {
        let t = t.into();
        __frontend_trace!("schema query root: {}", t);
        self.query = Some(t);
        self
    }

    /// Sets the mutation root type.
    #[must_use]
    pub fn mutation(mut self, t: impl Into<Type<CtxT>>) -> Self {
        let t = t.into();
        __frontend_trace!("schema mutation root: {}", t);
        self.mutation = Some(t);
        self
    }

    /// Sets the subscription root type.
    #[must_use]
    pub fn subscription(mut self, t: impl Into<Type<CtxT>>) -> Self {
        let t = t.into();
        __frontend_trace!("schema subscription root: {}", t);
        self.subscription = Some(t);
        self
    }

    /// The query root type, if any.
    pub fn query_type(&self) -> Option<&Type<CtxT>> {
        self.query.as_ref()
    }

    /// The mutation root type, if any.
    pub fn mutation_type(&self) -> Option<&Type<CtxT>> {
        self.mutation.as_ref()
    }

    /// The subscription root type, if any.
    pub fn subscription_type(&self) -> Option<&Type<CtxT>> {
        self.subscription.as_ref()
    }

    /// All named types reachable from the roots, in discovery order.
    ///
    /// Walks roots, interfaces, field and argument types, possible types of
    /// unions and input fields. Each name is listed once.
    pub fn types(&self) -> Vec<NamedType<CtxT>> {
        let mut seen = FnvHashSet::default();
        let mut types = Vec::new();
        for root in [&self.query, &self.mutation, &self.subscription]
            .into_iter()
            .flatten()
        {
            collect_types(root, &mut seen, &mut types);
        }
        types
    }

    /// Looks up a reachable named type by its name.
    pub fn type_by_name(&self, name: &str) -> Option<NamedType<CtxT>> {
        self.types().into_iter().find(|t| t.name().as_str() == name)
    }
}

fn collect_types<CtxT>(
    t: &Type<CtxT>,
    seen: &mut FnvHashSet<ArcStr>,
    types: &mut Vec<NamedType<CtxT>>,
) {
    let named = t.named_type();
    if !seen.insert(named.name().clone()) {
        return;
    }
    types.push(named.clone());

    match &named {
        NamedType::Object(o) => {
            for i in o.implemented_interfaces() {
                collect_types(&Type::from(i), seen, types);
            }
            for f in o.field_list() {
                collect_field_types(f, seen, types);
            }
        }
        NamedType::Interface(i) => {
            for f in i.field_list() {
                collect_field_types(f, seen, types);
            }
        }
        NamedType::Union(u) => {
            for o in u.possible_types() {
                collect_types(&Type::from(o), seen, types);
            }
        }
        NamedType::InputObject(io) => {
            for f in io.field_list() {
                collect_types(&f.field_type, seen, types);
            }
        }
        NamedType::Scalar(_) | NamedType::Enum(_) => {}
    }
}

fn collect_field_types<CtxT>(
    field: &Field<CtxT>,
    seen: &mut FnvHashSet<ArcStr>,
    types: &mut Vec<NamedType<CtxT>>,
) {
    collect_types(&field.field_type, seen, types);
    for arg in field.arguments.values() {
        collect_types(&arg.arg_type, seen, types);
    }
}

impl<CtxT> Default for Schema<CtxT> {
    fn default() -> Self {
        Self::new()
    }
}

impl<CtxT> std::fmt::Debug for Schema<CtxT> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Schema")
            .field("query", &self.query)
            .field("mutation", &self.mutation)
            .field("subscription", &self.subscription)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use pretty_assertions::assert_eq;

    use crate::{
        schema::meta::{
            Argument, Enum, EnumValue, Field, InputField, InputObject, Interface, Object, Type,
            Union,
        },
        types::scalars::{BOOLEAN, ID, INT, STRING},
    };

    use super::Schema;

    #[test]
    fn types_are_discovered_once_in_order() {
        let node =
            Arc::new(Interface::new("Node").fields([Field::new("id", Type::non_null(&*ID))]));
        let filter = Arc::new(InputObject::new("Filter"));
        filter
            .define_fields([
                InputField::new("first", &*INT),
                InputField::new("and", Type::list(&filter)),
            ])
            .unwrap();
        let color = Arc::new(Enum::new("Color", [EnumValue::new("RED")]));

        let user = Arc::new(Object::new("User").interfaces([Arc::clone(&node)]));
        user.define_fields([
            Field::new("id", Type::non_null(&*ID)),
            Field::new("friends", Type::list(&user))
                .argument(Argument::new("filter", &filter)),
            Field::new("color", &color),
        ])
        .unwrap();
        let search = Arc::new(Union::new("Search", [Arc::clone(&user)]));

        let query = Object::new("Query").fields([
            Field::new("me", &user),
            Field::new("search", Type::list(Type::from(search))),
        ]);
        let mutation = Object::new("Mutation")
            .fields([Field::new("ok", Type::non_null(&*BOOLEAN))]);

        let schema = Schema::<()>::new()
            .query(query.into_type())
            .mutation(mutation.into_type());

        assert_eq!(
            schema
                .types()
                .iter()
                .map(|t| t.name().as_str())
                .collect::<Vec<_>>(),
            [
                "Query", "User", "Node", "ID", "Filter", "Int", "Color", "Search", "Mutation",
                "Boolean",
            ],
        );
        assert!(schema.type_by_name("Filter").is_some());
        assert!(schema.type_by_name("String").is_none());
        assert!(schema.subscription_type().is_none());
    }

    #[test]
    fn empty_schema_has_no_types() {
        let schema = Schema::<()>::default();

        assert!(schema.query_type().is_none());
        assert!(schema.types().is_empty());
    }

    #[test]
    fn root_may_be_a_wrapped_type() {
        let schema = Schema::<()>::new().query(Type::non_null(&*STRING));

        assert_eq!(schema.query_type().unwrap().to_string(), "String!");
        assert_eq!(schema.types().len(), 1);
    }
}
