use tailcall_node_limit::core::tracing::default_tracing;

fn main() -> anyhow::Result<()> {
    tracing::subscriber::set_global_default(default_tracing())?;
    tailcall_node_limit::cli::run()
}
