//! dockaudit - Docker daemon security benchmark auditing
//!
//! Runs benchmark checks against a Docker daemon and ships the results to
//! a collector over an authenticated channel.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use dockaudit::cli::commands;

/// dockaudit - benchmark auditing for Docker daemons
#[derive(Parser)]
#[command(
    name = "dockaudit",
    version,
    about = "Run security benchmark checks against a Docker daemon",
    long_about = "dockaudit runs a profile-selected set of security benchmark checks\n\
                  against a Docker daemon, reports the results locally, and submits\n\
                  them to a collector over mutual TLS with a bearer token."
)]
struct Cli {
    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the audit checklist on a node
    Check {
        /// Remote profile identifier (requires --server)
        remote_id: Option<String>,

        /// Local TOML profile file
        #[arg(short = 'f', long)]
        profile: Option<PathBuf>,

        /// Output format: json, xml, anything else prints to console
        #[arg(short, long, default_value = "")]
        output: String,

        /// Write the rendered report to this file
        #[arg(long)]
        report_file: Option<PathBuf>,

        /// Path to load Docker daemon certificates from
        #[arg(short = 't', long)]
        tls_path: Option<PathBuf>,

        /// Collector server for aggregating results
        #[arg(short, long)]
        server: Option<String>,

        /// Docker daemon to connect to, tcp://<host>:<port>
        #[arg(short = 'd', long)]
        docker_host: Option<String>,
    },

    /// List the built-in checks
    Checks {
        /// Filter by category
        #[arg(short, long)]
        category: Option<String>,

        /// Show check descriptions
        #[arg(short = 'd', long)]
        details: bool,
    },
}

fn init_logging(verbosity: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbosity {
            0 => EnvFilter::new("dockaudit=info"),
            1 => EnvFilter::new("dockaudit=debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.quiet);

    match cli.command {
        Commands::Check {
            remote_id,
            profile,
            output,
            report_file,
            tls_path,
            server,
            docker_host,
        } => {
            commands::check::run(commands::check::CheckArgs {
                remote_id,
                profile,
                output,
                report_file,
                tls_path,
                server,
                docker_host,
            })
            .await?;
        }
        Commands::Checks { category, details } => {
            commands::checks::run(category.as_deref(), details)?;
        }
    }

    Ok(())
}
