use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::error;

use phishguard::api::start_server;
use phishguard::config::AppConfig;
use phishguard::detector::{error_message, Detector, Outcome};
use phishguard::utils::init_logger;

#[derive(Parser, Debug)]
#[command(name = "phishguard", version, about = "Classify URLs as phishing or legitimate")]
struct Cli {
    /// Path to a TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP API
    Serve {
        #[arg(long)]
        host: Option<String>,
        #[arg(long)]
        port: Option<u16>,
    },
    /// Classify one URL and print the result
    Classify { url: String },
    /// Print the feature vector of one URL as JSON
    Features { url: String },
}

#[actix_web::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    let mut config = AppConfig::load(cli.config.as_deref())?;
    init_logger(&config.logging)?;

    // Missing or incompatible data files stop the process here
    let detector = Detector::from_config(&config.data)?;

    match cli.command {
        Command::Serve { host, port } => {
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            start_server(&config.server, detector).await?;
        }
        Command::Classify { url } => match detector.render(&url) {
            Outcome::Success(assessment) => println!("{}", assessment.message()),
            Outcome::Error(message) => {
                eprintln!("{}", message);
                return Ok(ExitCode::FAILURE);
            }
        },
        Command::Features { url } => match detector.features(&url) {
            Ok(features) => println!("{}", serde_json::to_string_pretty(&features)?),
            Err(e) => {
                error!("Feature extraction failed for '{}': {}", url, e);
                eprintln!("{}", error_message(&e));
                return Ok(ExitCode::FAILURE);
            }
        },
    }

    Ok(ExitCode::SUCCESS)
}
