mod command;
mod tc;

pub use command::{Cli, Command};
pub use tc::run;
