use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "klr",
    about = "KLR -- locate and resolve ledger entries",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Classify a locator and derive its key without a ledger
    Key(KeyArgs),
    /// Resolve a request against a ledger fixture
    Entry(EntryArgs),
    /// Start the KLR server
    Serve(ServeArgs),
}

#[derive(Args)]
pub struct KeyArgs {
    /// Locator request as a JSON object
    pub request: String,
}

#[derive(Args)]
pub struct EntryArgs {
    /// Ledger fixture file (JSON)
    #[arg(short, long)]
    pub ledger: PathBuf,
    /// Request as a JSON object
    pub request: String,
    /// Ask for the binary rendering
    #[arg(long)]
    pub binary: bool,
}

#[derive(Args)]
pub struct ServeArgs {
    /// TOML config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    /// Overrides `bind_addr`
    #[arg(long)]
    pub bind: Option<String>,
    /// Overrides `ledger_fixtures`
    #[arg(long = "ledger")]
    pub ledgers: Vec<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_key() {
        let cli = Cli::try_parse_from(["klr", "key", r#"{"index":"00"}"#]).unwrap();
        if let Command::Key(args) = cli.command {
            assert_eq!(args.request, r#"{"index":"00"}"#);
        } else { panic!("wrong command"); }
        assert_eq!(cli.format, OutputFormat::Text);
    }

    #[test]
    fn parse_entry_binary() {
        let cli = Cli::try_parse_from(["klr", "entry", "--ledger", "l.json", "{}", "--binary"]).unwrap();
        if let Command::Entry(args) = cli.command {
            assert_eq!(args.ledger, PathBuf::from("l.json"));
            assert!(args.binary);
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_entry_requires_ledger() {
        assert!(Cli::try_parse_from(["klr", "entry", "{}"]).is_err());
    }

    #[test]
    fn parse_serve_overrides() {
        let cli = Cli::try_parse_from([
            "klr", "serve", "--bind", "0.0.0.0:6000", "--ledger", "a.json", "--ledger", "b.json",
        ])
        .unwrap();
        if let Command::Serve(args) = cli.command {
            assert_eq!(args.bind.as_deref(), Some("0.0.0.0:6000"));
            assert_eq!(args.ledgers.len(), 2);
            assert!(args.config.is_none());
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_global_flags() {
        let cli = Cli::try_parse_from(["klr", "key", "{}", "--format", "json", "-v"]).unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.format, OutputFormat::Json);
    }

    #[test]
    fn reject_unknown_format() {
        assert!(Cli::try_parse_from(["klr", "--format", "yaml", "key", "{}"]).is_err());
    }
}
