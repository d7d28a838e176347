mod browse;
mod error;
mod output;
mod paths;
mod session;
mod settings;
#[cfg(test)]
mod stub;

use std::fs::File;
use std::process::ExitCode;

use clap::Parser;
use clap::Subcommand;
use fintera_lib::collection::Collection;
use simplelog::Config;
use simplelog::LevelFilter;
use simplelog::WriteLogger;
use tokio::io::BufReader;

use crate::error::CliError;
use crate::session::ListArgs;
use crate::session::Session;
use crate::settings::Settings;

#[derive(Debug, Parser)]
#[command(name = "fintera", about = "Browse Fintera's paginated collections.", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List the known collections
    Collections,
    /// Fetch and print one page of a collection
    List(ListArgs),
    /// Page through a collection interactively
    Browse(ListArgs),
}

#[tokio::main]
async fn main() -> ExitCode {
    init_logging();
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::Collections => {
            for collection in Collection::ALL {
                println!("{:<12} {}", collection, collection.default_sort());
            }
            Ok(())
        }
        Command::List(args) => {
            let mut session = Session::open(&args, &load_settings()?)?;
            session.list.refresh().await;
            for line in session.draw() {
                println!("{}", line);
            }
            match session.list.error() {
                Some(e) => Err(CliError::ListFailed(e.message())),
                None => Ok(()),
            }
        }
        Command::Browse(args) => {
            let session = Session::open(&args, &load_settings()?)?;
            let stdin = BufReader::new(tokio::io::stdin());
            browse::run(session, stdin, &mut std::io::stdout()).await
        }
    }
}

fn load_settings() -> Result<Settings, CliError> {
    match paths::settings_file() {
        Some(path) => Settings::load(&path),
        None => Ok(Settings::default()),
    }
}

/// Logs to `latest.log` in the cache directory; without one, logging stays off.
fn init_logging() {
    paths::rotate_logs();
    let Some(path) = paths::log_file() else { return };
    if let Some(parent) = path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }
    let Ok(file) = File::create(&path) else { return };
    let _ = WriteLogger::init(LevelFilter::Debug, Config::default(), file);
}
