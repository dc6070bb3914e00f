//! confparser
//!
//! Loads a config file through the extension registry and prints the
//! ingested values as JSON.
//!
//! ```text
//! confparser settings.json              # all values
//! confparser settings.json --key PORT   # one value
//! confparser --list-formats             # registered extensions
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use serde_json::Value;

use confparser::config::registry::global_registry;
use confparser::observability::logging;
use confparser::{ConfigError, ConfigFactory};

#[derive(Parser)]
#[command(name = "confparser")]
#[command(about = "Load a config file and print its values", long_about = None)]
struct Cli {
    /// Config file to load
    #[arg(required_unless_present = "list_formats")]
    path: Option<PathBuf>,

    /// Print only this key (case-insensitive)
    #[arg(short, long)]
    key: Option<String>,

    /// List the registered file extensions and exit
    #[arg(long)]
    list_formats: bool,
}

fn main() -> ExitCode {
    logging::init("confparser=info");

    let cli = Cli::parse();

    if cli.list_formats {
        for extension in global_registry().extensions() {
            println!("{}", extension);
        }
        return ExitCode::SUCCESS;
    }

    match run(&cli) {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<String, Box<dyn std::error::Error>> {
    let path = cli.path.as_ref().ok_or(ConfigError::PathNotSet)?;
    let conf = ConfigFactory::get_conf(path, None)?;

    tracing::info!(
        path = %path.display(),
        extension = conf.extension(),
        keys = conf.values().len(),
        "Configuration loaded"
    );

    let value = match &cli.key {
        Some(key) => conf
            .values()
            .get(key)
            .cloned()
            .ok_or_else(|| format!("key {} not found", key))?,
        None => Value::Object(conf.values().as_map().clone()),
    };

    Ok(serde_json::to_string_pretty(&value)?)
}
