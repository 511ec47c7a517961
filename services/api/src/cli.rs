use crate::demo::{run_demo, run_history, run_questions, run_score, HistoryArgs, ScoreArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use vitality::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Vitality Check-in",
    about = "Serve and explore the daily lifestyle check-in from the command line",
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
    /// Print the daily check-in question catalog
    Questions,
    /// Score a set of answers given as question_id=value pairs
    Score(ScoreArgs),
    /// Score an exported check-in history and report the latest trend
    History(HistoryArgs),
    /// Run a scripted two-day check-in through the service with in-memory storage
    Demo,
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
        Command::Questions => {
            run_questions();
            Ok(())
        }
        Command::Score(args) => {
            run_score(args);
            Ok(())
        }
        Command::History(args) => run_history(args),
        Command::Demo => run_demo(),
    }
}
