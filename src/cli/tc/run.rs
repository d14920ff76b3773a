use anyhow::Result;
use clap::Parser;

use super::check::{self, CheckParams};
use crate::cli::command::{Cli, Command};

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Check { schema, query, variables, operation, config, limit } => {
            let params = CheckParams { schema, query, variables, operation, config, limit };
            check::check_command(params, &mut std::io::stdout())?;
        }
    }

    Ok(())
}
