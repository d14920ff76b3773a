use derive_more::From;

use super::config::UnsupportedConfigFormat;

#[derive(From, thiserror::Error, Debug)]
pub enum Error {
    #[error("Std IO Error")]
    StdIO(std::io::Error),

    #[error("Parsing Error: {}", _0)]
    Parse(async_graphql::parser::Error),

    #[error("Serde Json Error")]
    SerdeJson(serde_json::Error),

    #[error("Serde Yaml Error")]
    SerdeYaml(serde_yaml::Error),

    #[error("{}", _0)]
    UnsupportedConfigFormat(UnsupportedConfigFormat),

    #[error("Unknown operation named \"{}\"", _0)]
    #[from(ignore)]
    OperationNotFound(String),

    #[error("Operation name is required when the document contains multiple operations")]
    #[from(ignore)]
    OperationNameRequired,

    #[error("Document does not contain any operation")]
    #[from(ignore)]
    NoOperation,

    #[error("Root operation type not defined for {}", _0)]
    #[from(ignore)]
    RootTypeNotFound(String),
}

pub type Result<A> = std::result::Result<A, Error>;
