use clap::{Parser, Subcommand};

const VERSION: &str = match option_env!("APP_VERSION") {
    Some(version) => version,
    _ => "0.1.0-dev",
};

#[derive(Parser)]
#[command(name = "node-limit", author, version = VERSION, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Projects the result node count of an operation and checks it against
    /// the configured limits
    Check {
        /// Path of the GraphQL schema (SDL)
        #[arg(short, long)]
        schema: String,

        /// Path of the file holding the GraphQL operation
        #[arg(short, long)]
        query: String,

        /// Path of a JSON file with variable bindings
        #[arg(long)]
        variables: Option<String>,

        /// Name of the operation to check when the document holds several
        #[arg(short, long)]
        operation: Option<String>,

        /// Path of the limits configuration (json or yml)
        #[arg(short, long)]
        config: Option<String>,

        /// Node limit, overrides the one from the configuration
        #[arg(short, long)]
        limit: Option<i64>,
    },
}
