//! # grc CLI Entry Point
//!
//! Assembles subcommands and dispatches to handler modules.

use clap::Parser;

/// GRC Stack CLI — multi-tenant compliance management toolchain.
///
/// Runs the HTTP API, inspects per-tenant audit trails, and seeds demo
/// tenants for local development.
#[derive(Parser, Debug)]
#[command(name = "grc", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Run the HTTP API server.
    Serve(grc_cli::serve::ServeArgs),
    /// Print a tenant's audit trail from the snapshot store.
    Audit(grc_cli::audit::AuditArgs),
    /// Create and persist a demo tenant.
    Seed(grc_cli::seed::SeedArgs),
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Serve(args) => grc_cli::serve::run(args),
        Commands::Audit(args) => grc_cli::audit::run(args),
        Commands::Seed(args) => grc_cli::seed::run(args),
    }
}
