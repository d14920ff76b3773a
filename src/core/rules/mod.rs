use std::cell::OnceCell;

use async_graphql::parser::types::ExecutableDocument;

use crate::core::cost::FieldCost;
use crate::core::node::compute;
use crate::core::schema::SchemaIndex;
use crate::core::valid::Valid;
use crate::core::variables::Variables;
use crate::core::Result;

mod query_depth;
mod query_node_limit;

pub use query_depth::QueryDepth;
pub use query_node_limit::QueryNodeLimit;

/// Everything a rule needs to inspect one incoming request.
pub struct RuleContext<'a, C: ?Sized> {
    pub schema: &'a SchemaIndex,
    pub document: &'a ExecutableDocument,
    pub operation_name: Option<&'a str>,
    pub variables: &'a Variables,
    pub cost: &'a C,
    nodes: OnceCell<i64>,
}

impl<'a, C: FieldCost + ?Sized> RuleContext<'a, C> {
    pub fn new(
        schema: &'a SchemaIndex,
        document: &'a ExecutableDocument,
        operation_name: Option<&'a str>,
        variables: &'a Variables,
        cost: &'a C,
    ) -> Self {
        Self {
            schema,
            document,
            operation_name,
            variables,
            cost,
            nodes: OnceCell::new(),
        }
    }

    /// Projected node count of the selected operation. The walk runs at most
    /// once per context.
    pub fn nodes(&self) -> Result<i64> {
        if let Some(nodes) = self.nodes.get() {
            return Ok(*nodes);
        }
        let nodes = compute(
            self.schema,
            self.document,
            self.operation_name,
            self.variables,
            self.cost,
        )?;
        Ok(*self.nodes.get_or_init(|| nodes))
    }
}

pub trait Rule {
    type Error;

    fn validate<C: FieldCost + ?Sized>(&self, ctx: &RuleContext<'_, C>) -> Valid<(), Self::Error>;
}

pub trait RuleOps: Sized + Rule {
    fn pipe<Other: Rule<Error = Self::Error>>(self, other: Other) -> Pipe<Self, Other> {
        Pipe(self, other)
    }
}

impl<T: Rule> RuleOps for T {}

pub struct Pipe<A, B>(A, B);

impl<A, B> Rule for Pipe<A, B>
where
    A: Rule,
    B: Rule<Error = A::Error>,
{
    type Error = A::Error;

    fn validate<C: FieldCost + ?Sized>(&self, ctx: &RuleContext<'_, C>) -> Valid<(), Self::Error> {
        self.0.validate(ctx).and_then(|_| self.1.validate(ctx))
    }
}

impl<A: Rule> Rule for Option<A> {
    type Error = A::Error;

    fn validate<C: FieldCost + ?Sized>(&self, ctx: &RuleContext<'_, C>) -> Valid<(), Self::Error> {
        match self {
            Some(rule) => rule.validate(ctx),
            None => Ok(()),
        }
    }
}
