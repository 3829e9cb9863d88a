use crate::identify::{run_catalog, run_identify, IdentifyArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use mineral_id::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Mineral Identifier",
    about = "Rank likely minerals from partial field observations",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Rank the reference catalog against an observation
    Identify(IdentifyArgs),
    /// List the loaded reference catalog
    Catalog,
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Identify(args) => run_identify(args),
        Command::Catalog => run_catalog(),
    }
}
