//! partwire - Entry Point
//!
//! | Command | Description |
//! |---------|-------------|
//! | `serve` | Host the configured services over HTTP |
//! | `call` | Invoke an operation on a remote endpoint |
//! | `selfhost` | Host `MyService` in process and call it twice |
//! | `parts` | List the parts linked into this binary |
//! | `config` | Print the effective configuration |

// Force-link partwire-providers so its linkme registrations are included
extern crate partwire_providers;

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use partwire_application::registry::list_parts;
use partwire_infrastructure::ConfigLoader;
use partwire_server::ServiceClient;
use partwire_server::init::load_config;

/// Command line interface for partwire
#[derive(Parser, Debug)]
#[command(name = "partwire")]
#[command(about = "partwire - configuration-selected parts composed into per-call service instances")]
#[command(version)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Host the configured services over HTTP
    Serve,

    /// Invoke an operation on a remote endpoint
    Call {
        /// Endpoint address, e.g. http://127.0.0.1:8080/data
        endpoint: String,

        /// Operation name, e.g. GetData
        operation: String,

        /// Operation arguments as a JSON object
        #[arg(short, long, default_value = "{}")]
        params: String,
    },

    /// Host MyService in process and call GetData over HTTP
    Selfhost {
        /// Values passed to GetData, one call each
        #[arg(default_values_t = [1, 2])]
        values: Vec<i32>,
    },

    /// List the parts linked into this binary
    Parts,

    /// Print the effective configuration as TOML
    Config,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config_path = cli.config.as_deref();

    match cli.command {
        Command::Serve => partwire_server::run_server(config_path).await?,
        Command::Call {
            endpoint,
            operation,
            params,
        } => {
            let params: serde_json::Value =
                serde_json::from_str(&params).context("--params must be valid JSON")?;
            let result = ServiceClient::new(&endpoint)?.call(&operation, params).await?;
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        Command::Selfhost { values } => {
            for line in partwire_server::run_selfhost(config_path, &values).await? {
                println!("{line}");
            }
        }
        Command::Parts => {
            for (type_name, module, description) in list_parts() {
                println!("{type_name}\t{module}\t{description}");
            }
        }
        Command::Config => {
            let config = load_config(config_path)?;
            print!("{}", ConfigLoader::render(&config)?);
        }
    }
    Ok(())
}
