use crate::report::{run_compare, run_evaluate, CompareArgs, EvaluateArgs};
use crate::server;
use clap::{Args, Parser, Subcommand, ValueEnum};
use cut_audit::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Cut Audit",
    about = "Grade diamond cut proportions against a fixed rubric, or serve the grading API",
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
    /// Evaluate one record from a JSON file
    Evaluate(EvaluateArgs),
    /// Compare two records from JSON files
    Compare(CompareArgs),
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

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    Json,
    #[default]
    Text,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Evaluate(args) => run_evaluate(args),
        Command::Compare(args) => run_compare(args),
    }
}
