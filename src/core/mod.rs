pub mod config;
pub mod cost;
pub mod error;
pub mod merge_right;
pub mod node;
pub mod operation;
pub mod rules;
pub mod schema;
pub mod tracing;
pub mod valid;
pub mod variables;

pub use error::{Error, Result};
