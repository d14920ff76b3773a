use super::{Rule, RuleContext};
use crate::core::cost::FieldCost;
use crate::core::valid::{Valid, ValidExtensions};

/// Rejects operations whose projected node count meets or exceeds the limit.
pub struct QueryNodeLimit(i64);

impl QueryNodeLimit {
    pub fn new(limit: i64) -> Self {
        Self(limit)
    }
}

impl Rule for QueryNodeLimit {
    type Error = String;

    fn validate<C: FieldCost + ?Sized>(&self, ctx: &RuleContext<'_, C>) -> Valid<(), String> {
        let nodes = match ctx.nodes() {
            Ok(nodes) => nodes,
            Err(error) => return Valid::fail(error.to_string()),
        };

        if nodes >= self.0 {
            tracing::warn!(nodes, limit = self.0, "query rejected by node limit");
            Valid::fail("Query Node Limit validation failed.".into())
        } else {
            Valid::succeed(())
        }
    }
}

#[cfg(test)]
mod tests {
    use async_graphql::parser::parse_query;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::core::cost::{CostTable, ListSize};
    use crate::core::schema::SchemaIndex;
    use crate::core::valid::{Cause, ValidationError};
    use crate::core::variables::Variables;

    fn validate(limit: i64, query: &str) -> Valid<(), String> {
        let schema =
            SchemaIndex::from_sdl("type Query { items: [Item] } type Item { name: String }")
                .unwrap();
        let document = parse_query(query).unwrap();
        let mut cost = CostTable::default();
        cost.insert("Query", "items", ListSize { slicing_argument: None, assumed_size: Some(25) });
        let variables = Variables::default();
        let ctx = RuleContext::new(&schema, &document, None, &variables, &cost);
        QueryNodeLimit::new(limit).validate(&ctx)
    }

    #[test]
    fn test_below_limit() {
        assert_eq!(validate(26, "{ items { name } }"), Ok(()));
    }

    #[test]
    fn test_limit_is_exclusive() {
        assert_eq!(
            validate(25, "{ items { name } }"),
            Err(ValidationError::from(Cause::new(
                "Query Node Limit validation failed.".to_string()
            )))
        );
    }

    #[test]
    fn test_unknown_operation() {
        let actual = validate(100, "query A { items { name } }\nquery B { items { name } }");
        insta::assert_snapshot!(actual.unwrap_err().to_string().trim_end(), @r###"
        Validation Error
        • Operation name is required when the document contains multiple operations
        "###);
    }
}
