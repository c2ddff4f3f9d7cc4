use std::error::Error;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use sqlgen::cli::Args;
use sqlgen::config::ConfigFile;

fn main() -> ExitCode {
    // Logs go to stderr so dry-run scripts can be piped from stdout
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "sqlgen=warn".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match run(Args::parse()) {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<String, Box<dyn Error>> {
    let config = ConfigFile::load_or_default(&args.config)?;
    args.command.run(&config, args.format)
}
