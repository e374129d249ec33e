use crate::demo::{run_demo, run_slot_search, DemoArgs, SearchArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use slotwise::error::AppError;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "Slotwise Dispatch Optimizer",
    about = "Run and exercise the appointment slot optimization engine from the command line",
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
    /// Query ranked arrival windows without starting the server
    Slots {
        #[command(subcommand)]
        command: SlotsCommand,
    },
    /// Run an end-to-end CLI demo covering standard and full-day searches
    Demo(DemoArgs),
}

#[derive(Subcommand, Debug)]
enum SlotsCommand {
    /// Search bookable arrival windows for a service type and location
    Search(SearchArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// Zone directory CSV export (name,zip_codes,cities) replacing the
    /// built-in demo zones
    #[arg(long)]
    pub(crate) zones_csv: Option<PathBuf>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Slots {
            command: SlotsCommand::Search(args),
        } => run_slot_search(args).await,
        Command::Demo(args) => run_demo(args).await,
    }
}
