use async_graphql::parser::types::{DocumentOperations, ExecutableDocument, OperationDefinition};

use crate::core::{Error, Result};

/// Picks the operation to estimate. A document with a single operation
/// needs no name.
pub fn find_operation<'a>(
    document: &'a ExecutableDocument,
    operation_name: Option<&str>,
) -> Result<&'a OperationDefinition> {
    match &document.operations {
        DocumentOperations::Single(single) => Ok(&single.node),
        DocumentOperations::Multiple(multiple) => match operation_name {
            Some(name) => multiple
                .iter()
                .find(|(key, _)| key.as_str() == name)
                .map(|(_, operation)| &operation.node)
                .ok_or_else(|| Error::OperationNotFound(name.to_string())),
            None if multiple.len() == 1 => multiple
                .values()
                .next()
                .map(|operation| &operation.node)
                .ok_or(Error::NoOperation),
            None if multiple.is_empty() => Err(Error::NoOperation),
            None => Err(Error::OperationNameRequired),
        },
    }
}

#[cfg(test)]
mod tests {
    use async_graphql::parser::parse_query;
    use async_graphql::parser::types::OperationType;
    use pretty_assertions::assert_eq;

    use super::find_operation;
    use crate::core::Error;

    #[test]
    fn test_anonymous_operation() {
        let document = parse_query("{ a }").unwrap();
        let operation = find_operation(&document, None).unwrap();
        assert_eq!(operation.ty, OperationType::Query);
    }

    #[test]
    fn test_single_named_operation() {
        let document = parse_query("mutation Create { a }").unwrap();
        let operation = find_operation(&document, None).unwrap();
        assert_eq!(operation.ty, OperationType::Mutation);
    }

    #[test]
    fn test_operation_by_name() {
        let document = parse_query("query A { a } mutation B { b }").unwrap();
        let operation = find_operation(&document, Some("B")).unwrap();
        assert_eq!(operation.ty, OperationType::Mutation);
    }

    #[test]
    fn test_missing_name() {
        let document = parse_query("query A { a } query B { b }").unwrap();
        assert!(matches!(
            find_operation(&document, None),
            Err(Error::OperationNameRequired)
        ));
        assert!(matches!(
            find_operation(&document, Some("C")),
            Err(Error::OperationNotFound(name)) if name == "C"
        ));
    }
}
