use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use ccs_guard::{check_guardedness, config::GuardConfig, Error};
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Process term to check; read from stdin when omitted
    #[arg(short, long)]
    process: Option<String>,

    /// Path to config file
    #[arg(short, long, default_value = "ccs-guard.json")]
    config: PathBuf,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn read_process() -> Result<String, Error> {
    print!("Enter process: ");
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line)
}

async fn run(cli: &Cli) -> Result<bool, Error> {
    let config = if cli.config.exists() {
        GuardConfig::from_file(&cli.config)?
    } else {
        GuardConfig::default()
    };
    info!("config loaded.");
    debug!("config: {:?}", config);

    let source = match &cli.process {
        Some(process) => process.clone(),
        None => read_process()?,
    };

    check_guardedness(&source, &config).await
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    match run(&cli).await {
        Ok(true) => println!("Entered process is guarded"),
        Ok(false) => println!("Entered process is not guarded"),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
