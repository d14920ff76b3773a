use async_graphql::parser::types::ConstDirective;
use async_graphql_value::ConstValue;
use indexmap::IndexMap;

use crate::core::merge_right::MergeRight;
use crate::core::schema::SchemaIndex;
use crate::core::variables::Arguments;

pub const LIST_SIZE_DIRECTIVE: &str = "listSize";

/// Per-field cost declaration consulted once for every field occurrence.
///
/// Returning `None` declines the field and the walker falls back to
/// counting only the field's children.
///
/// A returned value must be the field's own multiplier *added* to
/// `child_nodes`: a paginated field of page size `n` reports
/// `n + child_nodes`. The walker subtracts `child_nodes` back out and
/// multiplies the remainder with it, so a declaration that ignores
/// `child_nodes` yields a different projected count. This cannot be
/// detected by the walker.
pub trait FieldCost {
    fn cost(
        &self,
        type_name: &str,
        field_name: &str,
        child_nodes: i64,
        args: &Arguments,
    ) -> Option<i64>;
}

impl<F> FieldCost for F
where
    F: Fn(&str, &str, i64, &Arguments) -> Option<i64>,
{
    fn cost(
        &self,
        type_name: &str,
        field_name: &str,
        child_nodes: i64,
        args: &Arguments,
    ) -> Option<i64> {
        self(type_name, field_name, child_nodes, args)
    }
}

/// Declines every field.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoCost;

impl FieldCost for NoCost {
    fn cost(&self, _: &str, _: &str, _: i64, _: &Arguments) -> Option<i64> {
        None
    }
}

/// Page size of a list field, read from one of its arguments or assumed
/// when the argument is absent.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ListSize {
    pub slicing_argument: Option<String>,
    pub assumed_size: Option<i64>,
}

impl ListSize {
    pub fn size(&self, args: &Arguments) -> Option<i64> {
        self.slicing_argument
            .as_ref()
            .and_then(|name| args.get(name))
            .and_then(as_i64)
            .or(self.assumed_size)
    }

    fn from_directive(directive: &ConstDirective) -> Self {
        let slicing_argument = directive
            .get_argument("slicingArgument")
            .and_then(|value| match &value.node {
                ConstValue::String(name) => Some(name.clone()),
                _ => None,
            });
        let assumed_size = directive
            .get_argument("assumedSize")
            .and_then(|value| as_i64(&value.node));

        Self { slicing_argument, assumed_size }
    }
}

// A later declaration for the same field replaces the earlier one whole.
impl MergeRight for ListSize {
    fn merge_right(self, other: Self) -> Self {
        other
    }
}

fn as_i64(value: &ConstValue) -> Option<i64> {
    match value {
        ConstValue::Number(number) => number.as_i64(),
        _ => None,
    }
}

/// Declarative [`FieldCost`] keyed by owning type and field name.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CostTable(IndexMap<String, IndexMap<String, ListSize>>);

impl CostTable {
    pub fn insert(
        &mut self,
        type_name: impl Into<String>,
        field_name: impl Into<String>,
        list_size: ListSize,
    ) {
        self.0
            .entry(type_name.into())
            .or_default()
            .insert(field_name.into(), list_size);
    }

    pub fn get(&self, type_name: &str, field_name: &str) -> Option<&ListSize> {
        self.0
            .get(type_name)
            .and_then(|fields| fields.get(field_name))
    }

    pub fn len(&self) -> usize {
        self.0.values().map(|fields| fields.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Collects every `@listSize` directive declared on a field of the schema.
    pub fn from_schema(schema: &SchemaIndex) -> Self {
        let mut table = CostTable::default();
        for type_def in schema.types() {
            for field in type_def.fields.values() {
                if let Some(directive) = field.get_directive(LIST_SIZE_DIRECTIVE) {
                    table.insert(
                        &type_def.name,
                        &field.name,
                        ListSize::from_directive(directive),
                    );
                }
            }
        }
        table
    }
}

impl MergeRight for CostTable {
    /// Entries of `other` replace entries of `self` for the same field.
    fn merge_right(self, other: Self) -> Self {
        Self(self.0.merge_right(other.0))
    }
}

impl FieldCost for CostTable {
    fn cost(
        &self,
        type_name: &str,
        field_name: &str,
        child_nodes: i64,
        args: &Arguments,
    ) -> Option<i64> {
        self.get(type_name, field_name)
            .and_then(|list_size| list_size.size(args))
            .map(|size| size.saturating_add(child_nodes))
    }
}
