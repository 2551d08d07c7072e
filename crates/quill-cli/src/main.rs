//! quill CLI - file-based SQL migrations and seeds

use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;
mod context;

use cli::{Cli, Commands};
use commands::{down, init, new, seed, seed_init, seed_new, seed_status, status, up};

/// Route `log` output to stderr. `RUST_LOG` wins when set; otherwise
/// `--verbose` selects debug and the default is info.
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .format_target(false)
        .init();
}

/// Load `./.env` into the process environment. Variables already set win.
fn load_dotenv() -> Option<dotenvy::Error> {
    match dotenvy::from_path(".env") {
        Err(e) if !e.not_found() => Some(e),
        _ => None,
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let dotenv_error = load_dotenv();
    let cli = Cli::parse();
    init_logging(cli.global.verbose);
    if let Some(e) = dotenv_error {
        log::warn!("Ignoring .env: {e}");
    }

    match &cli.command {
        Commands::Init => init::execute(&cli.global).await,
        Commands::New(args) => new::execute(args, &cli.global).await,
        Commands::Up => up::execute(&cli.global).await,
        Commands::Down(args) => down::execute(args, &cli.global).await,
        Commands::Status(args) => status::execute(args, &cli.global).await,
        Commands::SeedInit => seed_init::execute(&cli.global).await,
        Commands::SeedNew(args) => seed_new::execute(args, &cli.global).await,
        Commands::Seed => seed::execute(&cli.global).await,
        Commands::SeedStatus(args) => seed_status::execute(args, &cli.global).await,
    }
}
