//! Wireless-netem command-line entry point.
//!
//! Thin dispatch over the library crates: `deploy`/`destroy`/`validate`
//! operate on a topology file, `status` queries a running controller,
//! `channel-server` runs the channel service in-process, and `info` prints
//! an example topology descriptor.

mod commands;
mod error;

use clap::{Parser, Subcommand};
use error::CliError;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Deploy a topology and apply every link's impairment parameters
    Deploy {
        /// Path to the topology YAML file
        topology: String,

        /// Keep running and serve the mobility HTTP API after deploying
        #[arg(long)]
        enable_mobility: bool,
    },

    /// Tear down a previously deployed topology
    Destroy {
        /// Path to the topology YAML file
        topology: String,
    },

    /// Statically validate a topology without deploying it
    Validate {
        /// Path to the topology YAML file
        topology: String,
    },

    /// Query a running controller's node/interface positions
    Status {
        /// Base URL of the running controller
        #[arg(long, default_value = "http://127.0.0.1:7700")]
        controller_url: String,
    },

    /// Run the channel service in this process
    ChannelServer {
        /// Ray-tracing worker binary to invoke
        #[arg(long, default_value = "wn-raytrace-worker")]
        worker_binary: String,
    },

    /// Print an example topology descriptor
    Info,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    wn_observability::init_tracing_cli(cli.verbose);

    if let Err(e) = run(cli.command).await {
        eprintln!("error: {e}");
        std::process::exit(e.exit_code());
    }
    Ok(())
}

async fn run(command: Commands) -> Result<(), CliError> {
    match command {
        Commands::Deploy { topology, enable_mobility } => commands::cmd_deploy(&topology, enable_mobility).await,
        Commands::Destroy { topology } => commands::cmd_destroy(&topology).await,
        Commands::Validate { topology } => commands::cmd_validate(&topology),
        Commands::Status { controller_url } => commands::cmd_status(&controller_url).await,
        Commands::ChannelServer { worker_binary } => commands::cmd_channel_server(&worker_binary).await,
        Commands::Info => commands::cmd_info(),
    }
}
