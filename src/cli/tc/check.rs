use std::fs;
use std::io::Write;

use anyhow::{anyhow, Context, Result};

use crate::core::config::NodeLimitConfig;
use crate::core::cost::CostTable;
use crate::core::merge_right::MergeRight;
use crate::core::rules::{QueryDepth, QueryNodeLimit, Rule, RuleContext, RuleOps};
use crate::core::schema::SchemaIndex;
use crate::core::variables::Variables;

pub struct CheckParams {
    pub schema: String,
    pub query: String,
    pub variables: Option<String>,
    pub operation: Option<String>,
    pub config: Option<String>,
    pub limit: Option<i64>,
}

pub fn check_command(params: CheckParams, write_buf: &mut dyn Write) -> Result<()> {
    let CheckParams { schema, query, variables, operation, config, limit } = params;

    let sdl = fs::read_to_string(&schema).with_context(|| format!("Failed to read {}", schema))?;
    let query =
        fs::read_to_string(&query).with_context(|| format!("Failed to read {}", query))?;
    let variables = match variables {
        Some(path) => Variables::from_json(
            &fs::read_to_string(&path).with_context(|| format!("Failed to read {}", path))?,
        )?,
        None => Variables::default(),
    };
    let mut config = match config {
        Some(path) => NodeLimitConfig::from_file(&path)?,
        None => NodeLimitConfig::default(),
    };
    if limit.is_some() {
        config.limit = limit;
    }

    check(&sdl, &query, &variables, operation.as_deref(), &config, write_buf)
}

fn check(
    sdl: &str,
    query: &str,
    variables: &Variables,
    operation_name: Option<&str>,
    config: &NodeLimitConfig,
    write_buf: &mut dyn Write,
) -> Result<()> {
    let schema = SchemaIndex::from_sdl(sdl)?;
    let document = async_graphql::parser::parse_query(query)?;
    let cost = CostTable::from_schema(&schema).merge_right(config.cost_table());
    tracing::debug!(declarations = cost.len(), "field cost declarations loaded");

    let ctx = RuleContext::new(&schema, &document, operation_name, variables, &cost);
    writeln!(write_buf, "Projected nodes: {}", ctx.nodes()?)?;

    let rules = config
        .depth
        .map(QueryDepth::new)
        .pipe(config.limit.map(QueryNodeLimit::new));

    match rules.validate(&ctx) {
        Ok(()) => {
            writeln!(write_buf, "Query ... ok")?;
            Ok(())
        }
        Err(error) => {
            write!(write_buf, "{}", error)?;
            Err(anyhow!("Query rejected"))
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const SDL: &str = r#"
        type Query {
            users(first: Int = 10): [User] @listSize(slicingArgument: "first")
        }
        type User { name: String friends: [User] }
    "#;

    fn run(query: &str, config: NodeLimitConfig) -> (bool, String) {
        let mut buf = Vec::new();
        let result = check(SDL, query, &Variables::default(), None, &config, &mut buf);
        (result.is_ok(), String::from_utf8(buf).unwrap())
    }

    #[test]
    fn test_check_without_limits() {
        let (ok, output) = run("{ users { name } }", NodeLimitConfig::default());
        assert!(ok);
        assert_eq!(output, "Projected nodes: 10\nQuery ... ok\n");
    }

    #[test]
    fn test_check_rejects() {
        let config = NodeLimitConfig { limit: Some(10), ..Default::default() };
        let (ok, output) = run("{ users { name } }", config);
        assert!(!ok);
        assert_eq!(
            output,
            "Projected nodes: 10\nValidation Error\n• Query Node Limit validation failed.\n"
        );
    }

    #[test]
    fn test_config_costs_override_schema_directives() {
        let config = NodeLimitConfig::from_source(
            r#"{"costs": [{"type": "User", "field": "friends", "assumedSize": 3}]}"#,
            crate::core::config::Source::Json,
        )
        .unwrap();
        let (ok, output) = run("{ users(first: 2) { friends { name } } }", config);
        assert!(ok);
        assert_eq!(output, "Projected nodes: 6\nQuery ... ok\n");
    }
}
