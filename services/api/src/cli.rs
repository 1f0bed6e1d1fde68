use crate::demo::{run_calendar, run_demo, CalendarArgs, DemoArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use society_admin::error::AppError;
use society_admin::i18n::Locale;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "Society Admin",
    about = "Run the admissions interview service or inspect a roster from the command line",
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
    /// Print one interview from a roster as an iCalendar document
    Calendar(CalendarArgs),
    /// Walk through an interview update session against a sample roster
    Demo(DemoArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// Roster CSV to seed the interview store with
    #[arg(long)]
    pub(crate) roster: Option<PathBuf>,
    /// Override the configured locale (no, en)
    #[arg(long, value_parser = crate::infra::parse_locale)]
    pub(crate) locale: Option<Locale>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Calendar(args) => run_calendar(args),
        Command::Demo(args) => run_demo(args),
    }
}
