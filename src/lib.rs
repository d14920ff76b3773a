pub mod core;

#[cfg(feature = "cli")]
pub mod cli;
