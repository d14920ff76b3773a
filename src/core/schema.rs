use async_graphql::parser::types::{
    BaseType, ConstDirective, FieldDefinition, OperationType, SchemaDefinition, ServiceDocument,
    Type, TypeKind, TypeSystemDefinition,
};
use async_graphql::parser::Positioned;
use async_graphql_value::ConstValue;
use indexmap::IndexMap;

use crate::core::Result;

const BUILTIN_SCALARS: [&str; 5] = ["Int", "Float", "String", "Boolean", "ID"];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Kind {
    Object,
    Interface,
    Union,
    Scalar,
    Enum,
    InputObject,
}

impl Kind {
    /// Object, interface and union types carry a nested selection set.
    pub fn is_composite(&self) -> bool {
        matches!(self, Kind::Object | Kind::Interface | Kind::Union)
    }
}

impl From<&TypeKind> for Kind {
    fn from(kind: &TypeKind) -> Self {
        match kind {
            TypeKind::Scalar => Kind::Scalar,
            TypeKind::Object(_) => Kind::Object,
            TypeKind::Interface(_) => Kind::Interface,
            TypeKind::Union(_) => Kind::Union,
            TypeKind::Enum(_) => Kind::Enum,
            TypeKind::InputObject(_) => Kind::InputObject,
        }
    }
}

#[derive(Clone, Debug)]
pub struct ArgDef {
    pub name: String,
    pub default_value: Option<ConstValue>,
}

#[derive(Clone, Debug)]
pub struct FieldDef {
    pub name: String,
    /// Innermost named type, with list and non-null wrappers removed.
    pub type_of: String,
    pub args: IndexMap<String, ArgDef>,
    pub directives: Vec<ConstDirective>,
}

impl FieldDef {
    pub fn get_directive(&self, name: &str) -> Option<&ConstDirective> {
        self.directives
            .iter()
            .find(|directive| directive.name.node.as_str() == name)
    }
}

#[derive(Clone, Debug)]
pub struct TypeDef {
    pub name: String,
    pub kind: Kind,
    pub fields: IndexMap<String, FieldDef>,
    pub possible_types: Vec<String>,
}

impl TypeDef {
    fn new(name: impl Into<String>, kind: Kind) -> Self {
        Self {
            name: name.into(),
            kind,
            fields: IndexMap::new(),
            possible_types: Vec::new(),
        }
    }
}

///
/// A read optimized index of the type graph of a GraphQL schema. Built once
/// when the schema is loaded and shared read-only between estimations.
#[derive(Clone, Debug)]
pub struct SchemaIndex {
    types: IndexMap<String, TypeDef>,
    query: String,
    mutation: Option<String>,
    subscription: Option<String>,
}

impl SchemaIndex {
    pub fn from_sdl(sdl: &str) -> Result<Self> {
        let document = async_graphql::parser::parse_schema(sdl)?;
        Ok(Self::from(&document))
    }

    pub fn get_type(&self, type_name: &str) -> Option<&TypeDef> {
        self.types.get(type_name)
    }

    pub fn type_kind(&self, type_name: &str) -> Option<Kind> {
        self.get_type(type_name).map(|def| def.kind)
    }

    pub fn is_composite(&self, type_name: &str) -> bool {
        self.type_kind(type_name)
            .map(|kind| kind.is_composite())
            .unwrap_or_default()
    }

    pub fn get_field(&self, type_name: &str, field_name: &str) -> Option<&FieldDef> {
        self.get_type(type_name)
            .and_then(|def| def.fields.get(field_name))
    }

    /// Concrete object types an abstract type can resolve to: the
    /// implementors of an interface or the members of a union.
    pub fn possible_types(&self, type_name: &str) -> &[String] {
        self.get_type(type_name)
            .map(|def| def.possible_types.as_slice())
            .unwrap_or_default()
    }

    pub fn root_type(&self, operation: OperationType) -> Option<&str> {
        let name = match operation {
            OperationType::Query => Some(self.query.as_str()),
            OperationType::Mutation => self.mutation.as_deref(),
            OperationType::Subscription => self.subscription.as_deref(),
        }?;
        self.types.contains_key(name).then_some(name)
    }

    pub fn types(&self) -> impl Iterator<Item = &TypeDef> {
        self.types.values()
    }
}

impl From<&ServiceDocument> for SchemaIndex {
    fn from(document: &ServiceDocument) -> Self {
        let mut types: IndexMap<String, TypeDef> = BUILTIN_SCALARS
            .iter()
            .map(|name| (name.to_string(), TypeDef::new(*name, Kind::Scalar)))
            .collect();
        let mut implements: Vec<(String, String)> = Vec::new();
        let mut schema: Option<&SchemaDefinition> = None;

        for definition in document.definitions.iter() {
            match definition {
                TypeSystemDefinition::Schema(schema_definition) => {
                    schema = Some(&schema_definition.node);
                }
                TypeSystemDefinition::Type(type_definition) => {
                    let type_definition = &type_definition.node;
                    let type_name = type_definition.name.node.to_string();
                    let entry = types
                        .entry(type_name.clone())
                        .or_insert_with(|| TypeDef::new(&type_name, Kind::from(&type_definition.kind)));

                    match &type_definition.kind {
                        TypeKind::Object(object) => {
                            entry.fields.extend(to_fields(&object.fields));
                            implements.extend(
                                object
                                    .implements
                                    .iter()
                                    .map(|name| (name.node.to_string(), type_name.clone())),
                            );
                        }
                        TypeKind::Interface(interface) => {
                            entry.fields.extend(to_fields(&interface.fields));
                        }
                        TypeKind::Union(union) => {
                            entry
                                .possible_types
                                .extend(union.members.iter().map(|name| name.node.to_string()));
                        }
                        TypeKind::Scalar | TypeKind::Enum(_) | TypeKind::InputObject(_) => {}
                    }
                }
                TypeSystemDefinition::Directive(_) => {}
            }
        }

        for (interface, object) in implements {
            if let Some(def) = types.get_mut(&interface) {
                if def.kind == Kind::Interface && !def.possible_types.contains(&object) {
                    def.possible_types.push(object);
                }
            }
        }

        let root = |name: Option<&Positioned<async_graphql_value::Name>>, default: &str| {
            name.map(|name| name.node.to_string())
                .or_else(|| types.contains_key(default).then(|| default.to_string()))
        };
        let query = root(schema.and_then(|s| s.query.as_ref()), "Query")
            .unwrap_or_else(|| "Query".to_string());
        let mutation = root(schema.and_then(|s| s.mutation.as_ref()), "Mutation");
        let subscription = root(schema.and_then(|s| s.subscription.as_ref()), "Subscription");

        Self { types, query, mutation, subscription }
    }
}

fn to_fields(
    fields: &[Positioned<FieldDefinition>],
) -> impl Iterator<Item = (String, FieldDef)> + '_ {
    fields.iter().map(|field| {
        let field = &field.node;
        let name = field.name.node.to_string();
        let args = field
            .arguments
            .iter()
            .map(|arg| {
                let arg = &arg.node;
                let name = arg.name.node.to_string();
                let def = ArgDef {
                    name: name.clone(),
                    default_value: arg.default_value.as_ref().map(|pos| pos.node.clone()),
                };
                (name, def)
            })
            .collect();
        let def = FieldDef {
            name: name.clone(),
            type_of: to_type_of(&field.ty.node),
            args,
            directives: field.directives.iter().map(|d| d.node.clone()).collect(),
        };
        (name, def)
    })
}

fn to_type_of(type_: &Type) -> String {
    match &type_.base {
        BaseType::Named(name) => name.to_string(),
        BaseType::List(ty) => to_type_of(ty),
    }
}
