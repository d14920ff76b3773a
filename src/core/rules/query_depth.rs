use std::collections::HashSet;

use async_graphql::parser::types::{Selection, SelectionSet};
use async_graphql_value::Name;

use super::{Rule, RuleContext};
use crate::core::cost::FieldCost;
use crate::core::operation::find_operation;
use crate::core::valid::{Valid, ValidExtensions};

pub struct QueryDepth(usize);

impl QueryDepth {
    pub fn new(depth: usize) -> Self {
        Self(depth)
    }
}

impl Rule for QueryDepth {
    type Error = String;

    fn validate<C: FieldCost + ?Sized>(&self, ctx: &RuleContext<'_, C>) -> Valid<(), String> {
        let operation = match find_operation(ctx.document, ctx.operation_name) {
            Ok(operation) => operation,
            Err(error) => return Valid::fail(error.to_string()),
        };

        let depth = depth(ctx, &operation.selection_set.node, &mut HashSet::new());
        if depth > self.0 {
            tracing::warn!(depth, limit = self.0, "query rejected by depth limit");
            Valid::fail("Query Depth validation failed.".into())
        } else {
            Valid::succeed(())
        }
    }
}

/// Field nesting depth. Fragments do not add a level of their own, and a
/// fragment already expanded on the current path adds nothing.
fn depth<'a, C: ?Sized>(
    ctx: &RuleContext<'a, C>,
    selection_set: &SelectionSet,
    active_fragments: &mut HashSet<&'a Name>,
) -> usize {
    let mut max = 0;
    for selection in &selection_set.items {
        let selection_depth = match &selection.node {
            Selection::Field(field) => {
                1 + depth(ctx, &field.node.selection_set.node, active_fragments)
            }
            Selection::FragmentSpread(spread) => {
                match ctx.document.fragments.get_key_value(&spread.node.fragment_name.node) {
                    Some((name, fragment)) if active_fragments.insert(name) => {
                        let nested = depth(ctx, &fragment.node.selection_set.node, active_fragments);
                        active_fragments.remove(name);
                        nested
                    }
                    _ => 0,
                }
            }
            Selection::InlineFragment(fragment) => {
                depth(ctx, &fragment.node.selection_set.node, active_fragments)
            }
        };
        max = max.max(selection_depth);
    }
    max
}
