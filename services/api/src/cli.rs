use crate::server;
use crate::stress;
use clap::{Args, Parser, Subcommand};
use econ_risk::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Economic Risk Dashboard",
    about = "Serve economic indicator risk tiers and portfolio stress analytics",
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
    /// Print a portfolio stress report for one scenario without starting the server
    Stress(stress::StressArgs),
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
        Command::Stress(args) => stress::run(args),
    }
}
