mod bounded;
mod walker;

pub use bounded::*;
pub use walker::*;
