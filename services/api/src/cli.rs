use crate::demo::{run_color, run_plan, run_templates, ColorArgs, PlanArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use landing_page::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Landing Page Studio",
    about = "Serve and inspect tenant landing pages from the command line",
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
    /// Reconcile a stored page document and print its render plan
    Plan(PlanArgs),
    /// List the built-in page templates
    Templates,
    /// Convert a hex color or HSL triple into theme token form
    Color(ColorArgs),
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
        Command::Plan(args) => run_plan(args),
        Command::Templates => run_templates(),
        Command::Color(args) => run_color(args),
    }
}
