use std::collections::HashMap;

use async_graphql_value::ConstValue;
use indexmap::IndexMap;
use serde::Deserialize;

/// Arguments of a single field occurrence, after variables and schema
/// defaults have been applied.
pub type Arguments = IndexMap<String, ConstValue>;

/// Variables store
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Variables(HashMap<String, ConstValue>);

impl Variables {
    pub fn get(&self, name: &str) -> Option<&ConstValue> {
        self.0.get(name)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

impl FromIterator<(String, ConstValue)> for Variables {
    fn from_iter<T: IntoIterator<Item = (String, ConstValue)>>(iter: T) -> Self {
        Self(HashMap::from_iter(iter))
    }
}
