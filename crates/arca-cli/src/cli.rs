use std::path::PathBuf;

use arca_store::BackendKind;
use clap::{Args, Parser, Subcommand};

use crate::ops::StoreOp;

#[derive(Parser)]
#[command(
    name = "arca",
    about = "In-memory storage backends with operation history",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// TOML file with store defaults
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run storage operations against a fresh backend
    Store(StoreArgs),
    /// Compare overridden and separately named operations
    Dispatch,
    /// Send one email and one SMS through the same service
    Notify(NotifyArgs),
    /// Acquire and release resources, printing the lifecycle
    Resources,
}

#[derive(Args)]
pub struct StoreArgs {
    /// Backend to use (overrides the config file)
    #[arg(short, long, value_parser = parse_backend)]
    pub backend: Option<BackendKind>,

    /// Operations: save:NAME:TEXT, file:NAME:TEXT, load:NAME, delete:NAME, list
    #[arg(required = true)]
    pub ops: Vec<StoreOp>,
}

#[derive(Args)]
pub struct NotifyArgs {
    #[arg(long, default_value = "ops@example.com")]
    pub to: String,
    #[arg(long, default_value = "Status")]
    pub subject: String,
    #[arg(long, default_value = "All systems nominal")]
    pub body: String,
    #[arg(long, default_value = "+15550100")]
    pub phone: String,
    #[arg(long, default_value = "All systems nominal")]
    pub message: String,
}

fn parse_backend(s: &str) -> Result<BackendKind, String> {
    s.parse().map_err(|e: arca_store::StoreError| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_store_command() {
        let cli = Cli::try_parse_from([
            "arca", "--format", "json", "store", "--backend", "cloud", "save:a:hi", "load:a",
        ])
        .unwrap();
        assert_eq!(cli.format, OutputFormat::Json);
        match cli.command {
            Command::Store(args) => {
                assert_eq!(args.backend, Some(BackendKind::Cloud));
                assert_eq!(args.ops.len(), 2);
            }
            _ => panic!("expected store command"),
        }
    }

    #[test]
    fn store_requires_operations() {
        assert!(Cli::try_parse_from(["arca", "store"]).is_err());
    }

    #[test]
    fn rejects_unknown_backend() {
        assert!(Cli::try_parse_from(["arca", "store", "-b", "tape", "list"]).is_err());
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
