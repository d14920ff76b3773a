use std::path::Path;

use serde::{Deserialize, Serialize};

use super::Source;
use crate::core::cost::{CostTable, ListSize};
use crate::core::Result;

fn is_default<T: Default + PartialEq>(value: &T) -> bool {
    *value == T::default()
}

#[derive(
    Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq, schemars::JsonSchema,
)]
#[serde(deny_unknown_fields)]
#[serde(rename_all = "camelCase")]
/// Limits applied to every incoming operation before it is executed.
pub struct NodeLimitConfig {
    #[serde(default, skip_serializing_if = "is_default")]
    /// `limit` rejects operations whose projected result node count meets or
    /// exceeds this value.
    pub limit: Option<i64>,

    #[serde(default, skip_serializing_if = "is_default")]
    /// `depth` rejects operations whose fields nest deeper than this value.
    pub depth: Option<usize>,

    #[serde(default, skip_serializing_if = "is_default")]
    /// `costs` declares the page size of list fields.
    pub costs: Vec<FieldCostEntry>,
}

#[derive(
    Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq, schemars::JsonSchema,
)]
#[serde(deny_unknown_fields)]
#[serde(rename_all = "camelCase")]
pub struct FieldCostEntry {
    #[serde(rename = "type")]
    pub type_name: String,

    pub field: String,

    #[serde(default, skip_serializing_if = "is_default")]
    /// Argument of the field holding the page size.
    pub slicing_argument: Option<String>,

    #[serde(default, skip_serializing_if = "is_default")]
    /// Page size used when the slicing argument is absent.
    pub assumed_size: Option<i64>,
}

impl NodeLimitConfig {
    pub fn from_source(content: &str, source: Source) -> Result<Self> {
        source.decode(content)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = Source::detect(&path.to_string_lossy())?;
        let content = std::fs::read_to_string(path)?;
        tracing::debug!(path = %path.display(), "loaded node limit config");
        Self::from_source(&content, source)
    }

    pub fn cost_table(&self) -> CostTable {
        let mut table = CostTable::default();
        for entry in self.costs.iter() {
            table.insert(
                &entry.type_name,
                &entry.field,
                ListSize {
                    slicing_argument: entry.slicing_argument.clone(),
                    assumed_size: entry.assumed_size,
                },
            );
        }
        table
    }
}
