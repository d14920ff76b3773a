use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::convert::Infallible;

use async_graphql::parser::types::{
    ExecutableDocument, Field, FragmentDefinition, OperationDefinition, Selection, SelectionSet,
    VariableDefinition,
};
use async_graphql::Positioned;
use async_graphql_value::{ConstValue, Name, Value};

use super::{bounded_add, bounded_multiply, MAX_NODES};
use crate::core::cost::FieldCost;
use crate::core::operation::find_operation;
use crate::core::schema::{FieldDef, Kind, SchemaIndex};
use crate::core::variables::{Arguments, Variables};
use crate::core::{Error, Result};

/// Projects the number of result nodes an operation of `document` would
/// produce. Errors only when the operation or its root type can not be
/// found; the walk itself is total.
pub fn compute<C: FieldCost + ?Sized>(
    schema: &SchemaIndex,
    document: &ExecutableDocument,
    operation_name: Option<&str>,
    variables: &Variables,
    cost: &C,
) -> Result<i64> {
    let operation = find_operation(document, operation_name)?;
    let walker = NodeWalker::new(schema, &document.fragments, variables, cost);
    walker.operation(operation)
}

/// Recursive traversal of a selection tree. Holds only read references and
/// can be reused for any operation of the same document.
pub struct NodeWalker<'a, C: ?Sized> {
    schema: &'a SchemaIndex,
    fragments: &'a HashMap<Name, Positioned<FragmentDefinition>>,
    variables: &'a Variables,
    variable_definitions: &'a [Positioned<VariableDefinition>],
    cost: &'a C,
    // fragments entered on the current spread path
    active_fragments: RefCell<HashSet<&'a Name>>,
}

impl<'a, C: FieldCost + ?Sized> NodeWalker<'a, C> {
    pub fn new(
        schema: &'a SchemaIndex,
        fragments: &'a HashMap<Name, Positioned<FragmentDefinition>>,
        variables: &'a Variables,
        cost: &'a C,
    ) -> Self {
        Self {
            schema,
            fragments,
            variables,
            variable_definitions: &[],
            cost,
            active_fragments: RefCell::default(),
        }
    }

    pub fn operation(&self, operation: &'a OperationDefinition) -> Result<i64> {
        let root = self
            .schema
            .root_type(operation.ty)
            .ok_or_else(|| Error::RootTypeNotFound(operation.ty.to_string()))?;
        let walker = NodeWalker {
            variable_definitions: &operation.variable_definitions,
            ..NodeWalker::new(self.schema, self.fragments, self.variables, self.cost)
        };
        let nodes = walker.selection_set(&operation.selection_set.node, root);
        tracing::debug!(nodes, operation = %operation.ty, "projected result nodes");

        Ok(nodes)
    }

    /// Sums the nodes of every selection in `selection_set`, selected against
    /// `type_name`.
    pub fn selection_set(&self, selection_set: &SelectionSet, type_name: &str) -> i64 {
        let mut nodes = 0;
        for selection in &selection_set.items {
            match &selection.node {
                Selection::Field(Positioned { node: field, .. }) => {
                    nodes = bounded_add(nodes, self.field(field, type_name));
                }
                Selection::FragmentSpread(Positioned { node: spread, .. }) => {
                    nodes = bounded_add(nodes, self.fragment_spread(&spread.fragment_name.node));
                }
                Selection::InlineFragment(Positioned { node: fragment, .. }) => {
                    let type_name = fragment
                        .type_condition
                        .as_ref()
                        .map(|condition| condition.node.on.node.as_str())
                        .unwrap_or(type_name);
                    nodes = bounded_add(
                        nodes,
                        self.selection_set(&fragment.selection_set.node, type_name),
                    );
                }
            }
        }

        nodes
    }

    /// A spread of a fragment that is already being expanded further up the
    /// path contributes nothing, so cyclic fragments terminate.
    fn fragment_spread(&self, name: &Name) -> i64 {
        let Some((name, fragment)) = self.fragments.get_key_value(name) else {
            return 0;
        };
        if !self.active_fragments.borrow_mut().insert(name) {
            tracing::debug!(fragment = %name, "fragment cycle ignored");
            return 0;
        }

        let fragment = &fragment.node;
        let nodes = self.selection_set(
            &fragment.selection_set.node,
            fragment.type_condition.node.on.node.as_str(),
        );
        self.active_fragments.borrow_mut().remove(name);

        nodes
    }

    fn field(&self, field: &Field, type_name: &str) -> i64 {
        let field_name = field.name.node.as_str();
        let definition = self.schema.get_field(type_name, field_name);

        let child_nodes = definition
            .filter(|def| self.schema.is_composite(&def.type_of))
            .map(|def| self.selection_set(&field.selection_set.node, &def.type_of))
            .unwrap_or_default();

        let args = self.arguments(field, definition);
        let nodes = if self.schema.type_kind(type_name) == Some(Kind::Interface) {
            self.interface_field_nodes(type_name, field_name, child_nodes, &args)
        } else {
            self.field_nodes(type_name, field_name, child_nodes, &args)
        };

        tracing::trace!(
            type_name,
            field_name,
            child_nodes,
            nodes,
            "field nodes"
        );

        nodes
    }

    // The concrete type behind an interface is only known at execution, so
    // the most expensive implementor is assumed.
    fn interface_field_nodes(
        &self,
        interface: &str,
        field_name: &str,
        child_nodes: i64,
        args: &Arguments,
    ) -> i64 {
        self.schema
            .possible_types(interface)
            .iter()
            .map(|type_name| self.field_nodes(type_name, field_name, child_nodes, args))
            .fold(0, i64::max)
    }

    fn field_nodes(
        &self,
        type_name: &str,
        field_name: &str,
        child_nodes: i64,
        args: &Arguments,
    ) -> i64 {
        match self.cost.cost(type_name, field_name, child_nodes, args) {
            // a saturated declaration no longer holds its multiplier
            Some(MAX_NODES) => MAX_NODES,
            // the declared cost already includes the child nodes
            Some(declared) => bounded_multiply(declared.saturating_sub(child_nodes), child_nodes),
            None => child_nodes,
        }
    }

    fn arguments(&self, field: &Field, definition: Option<&FieldDef>) -> Arguments {
        let mut args = Arguments::new();
        for (name, value) in &field.arguments {
            if let Some(value) = self.argument_value(&value.node) {
                args.insert(name.node.to_string(), value);
            }
        }

        if let Some(definition) = definition {
            for arg in definition.args.values() {
                if args.contains_key(&arg.name) {
                    continue;
                }
                if let Some(default_value) = &arg.default_value {
                    args.insert(arg.name.clone(), default_value.clone());
                }
            }
        }

        args
    }

    fn argument_value(&self, value: &Value) -> Option<ConstValue> {
        match value {
            // an unbound variable leaves the argument unset
            Value::Variable(name) => self.variable(name),
            value => value
                .clone()
                .into_const_with(|name| {
                    Ok::<_, Infallible>(self.variable(&name).unwrap_or(ConstValue::Null))
                })
                .ok(),
        }
    }

    fn variable(&self, name: &str) -> Option<ConstValue> {
        self.variables.get(name).cloned().or_else(|| {
            self.variable_definitions
                .iter()
                .find(|def| def.node.name.node.as_str() == name)
                .and_then(|def| def.node.default_value.as_ref())
                .map(|value| value.node.clone())
        })
    }
}

#[cfg(test)]
mod tests {
    use async_graphql::parser::parse_query;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::core::cost::{CostTable, ListSize, NoCost};

    const SDL: &str = r#"
        interface Node { id: ID! }
        type User implements Node {
            id: ID!
            name: String
            friends(first: Int = 5): [User]
        }
        type Bot implements Node { id: ID! }
        type Query {
            users(first: Int = 10): [User]
            node: Node
        }
    "#;

    fn table() -> CostTable {
        let mut table = CostTable::default();
        let first = ListSize { slicing_argument: Some("first".to_string()), assumed_size: None };
        table.insert("Query", "users", first.clone());
        table.insert("User", "friends", first);
        table
    }

    fn nodes(query: &str, variables: Variables) -> i64 {
        let schema = SchemaIndex::from_sdl(SDL).unwrap();
        let document = parse_query(query).unwrap();
        compute(&schema, &document, None, &variables, &table()).unwrap()
    }

    #[test]
    fn test_scalar_leaves_are_free() {
        let schema = SchemaIndex::from_sdl(SDL).unwrap();
        let document = parse_query("{ users { id name } }").unwrap();
        let actual = compute(&schema, &document, None, &Variables::default(), &NoCost).unwrap();
        assert_eq!(actual, 0);
    }

    #[test]
    fn test_schema_default_argument() {
        assert_eq!(nodes("{ users { name } }", Variables::default()), 10);
    }

    #[test]
    fn test_nested_lists_multiply() {
        let actual = nodes(
            "{ users(first: 3) { friends { friends(first: 2) { name } } } }",
            Variables::default(),
        );
        assert_eq!(actual, 3 * 5 * 2);
    }

    #[test]
    fn test_bound_variable() {
        let variables = Variables::from_iter([("n".to_string(), ConstValue::Number(4.into()))]);
        let actual = nodes("query ($n: Int) { users(first: $n) { name } }", variables);
        assert_eq!(actual, 4);
    }

    #[test]
    fn test_variable_default() {
        let actual = nodes(
            "query ($n: Int = 7) { users(first: $n) { name } }",
            Variables::default(),
        );
        assert_eq!(actual, 7);
    }

    #[test]
    fn test_unbound_variable_falls_back_to_schema_default() {
        let actual = nodes(
            "query ($n: Int) { users(first: $n) { name } }",
            Variables::default(),
        );
        assert_eq!(actual, 10);
    }

    #[test]
    fn test_typename_is_free() {
        assert_eq!(nodes("{ __typename users(first: 2) { __typename } }", Variables::default()), 2);
    }

    #[test]
    fn test_inline_fragment_switches_type() {
        let actual = nodes(
            "{ node { ... on User { friends(first: 6) { id } } ... on Bot { id } } }",
            Variables::default(),
        );
        assert_eq!(actual, 6);
    }

    #[test]
    fn test_self_referencing_fragment_terminates() {
        let schema = SchemaIndex::from_sdl("type Query { s: Int }").unwrap();
        let document = parse_query("{ ...A } fragment A on Query { ...A }").unwrap();
        let actual = compute(&schema, &document, None, &Variables::default(), &NoCost).unwrap();
        assert_eq!(actual, 0);
    }

    #[test]
    fn test_mutually_recursive_fragments_count_once() {
        let actual = nodes(
            r#"
            { users(first: 2) { ...A } }
            fragment A on User { friends(first: 3) { name } ...B }
            fragment B on User { ...A }
            "#,
            Variables::default(),
        );
        assert_eq!(actual, 2 * 3);
    }

    #[test]
    fn test_repeated_fragment_outside_a_cycle_counts_twice() {
        let actual = nodes(
            r#"
            { a: users(first: 1) { ...F } b: users(first: 1) { ...F } }
            fragment F on User { friends(first: 4) { name } }
            "#,
            Variables::default(),
        );
        assert_eq!(actual, 8);
    }

    #[test]
    fn test_missing_root_type() {
        let schema = SchemaIndex::from_sdl(SDL).unwrap();
        let document = parse_query("mutation { users { id } }").unwrap();
        let actual = compute(&schema, &document, None, &Variables::default(), &NoCost);
        assert!(matches!(actual, Err(Error::RootTypeNotFound(ty)) if ty == "mutation"));
    }
}
