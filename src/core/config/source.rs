use thiserror::Error;

use super::NodeLimitConfig;
use crate::core::Result;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Source {
    #[default]
    Json,
    Yml,
}

const JSON_EXT: &str = "json";
const YML_EXT: &str = "yml";
const YAML_EXT: &str = "yaml";

#[derive(Debug, Error, PartialEq)]
#[error("Unsupported config extension: {0}")]
pub struct UnsupportedConfigFormat(pub String);

impl std::str::FromStr for Source {
    type Err = UnsupportedConfigFormat;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            JSON_EXT => Ok(Source::Json),
            YML_EXT | YAML_EXT => Ok(Source::Yml),
            _ => Err(UnsupportedConfigFormat(s.to_string())),
        }
    }
}

impl Source {
    /// Detect the config format from the file name
    pub fn detect(name: &str) -> std::result::Result<Source, UnsupportedConfigFormat> {
        name.rsplit_once('.')
            .and_then(|(_, ext)| ext.parse().ok())
            .ok_or(UnsupportedConfigFormat(name.to_string()))
    }

    /// Decode the config from the given data
    pub fn decode(&self, data: &str) -> Result<NodeLimitConfig> {
        match self {
            Source::Yml => Ok(serde_yaml::from_str(data)?),
            Source::Json => Ok(serde_json::from_str(data)?),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_detect() {
        assert_eq!(Source::detect("limits.json"), Ok(Source::Json));
        assert_eq!(Source::detect("./conf/limits.yml"), Ok(Source::Yml));
        assert_eq!(Source::detect("limits.YAML"), Ok(Source::Yml));
        assert_eq!(
            Source::detect("limits.graphql"),
            Err(UnsupportedConfigFormat("limits.graphql".to_string()))
        );
        assert_eq!(
            Source::detect("limits"),
            Err(UnsupportedConfigFormat("limits".to_string()))
        );
    }
}
