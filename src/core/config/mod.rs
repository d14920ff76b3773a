mod node_limit;
mod source;

pub use node_limit::*;
pub use source::*;
