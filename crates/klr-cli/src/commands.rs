use std::slice;

use anyhow::Context;
use colored::Colorize;
use serde_json::{Map, Value};

use klr_keylet::StandardKeyDeriver;
use klr_locator::{Locator, LocatorRequest, ValidationOutcome, BINARY_FIELD};
use klr_rpc::resolve::field;
use klr_server::{KlrServer, ServerConfig};
use klr_store::load_source;

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Key(args) => cmd_key(args, cli.format),
        Command::Entry(args) => cmd_entry(args, cli.format),
        Command::Serve(args) => cmd_serve(args),
    }
}

fn cmd_key(args: KeyArgs, format: OutputFormat) -> anyhow::Result<()> {
    let request = LocatorRequest::new(parse_object(&args.request)?);
    let outcome = Locator::standard().classify(&request);

    if format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
        return Ok(());
    }
    match outcome {
        ValidationOutcome::Resolved { shape, key, expected } => {
            println!("{} {}", "✓".green().bold(), shape.to_string().bold());
            println!("  Key: {}", key.to_hex().yellow());
            println!("  Expected type: {}", expected.to_string().cyan());
        }
        ValidationOutcome::Rejected { shape, error } => {
            println!("{} {}", "✗".red().bold(), shape.to_string().bold());
            println!("  Error: {} ({})", error.wire_name().red(), error);
        }
    }
    Ok(())
}

fn cmd_entry(args: EntryArgs, format: OutputFormat) -> anyhow::Result<()> {
    let response = entry_response(&args)?;

    if format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&response)?);
        return Ok(());
    }
    if let Some(error) = response.get(field::ERROR).and_then(Value::as_str) {
        let message = response
            .get(field::ERROR_MESSAGE)
            .and_then(Value::as_str)
            .unwrap_or_default();
        println!("{} {} {}", "✗".red().bold(), error.red(), message);
        return Ok(());
    }

    let validated = response
        .get(field::VALIDATED)
        .and_then(Value::as_bool)
        .unwrap_or(false);
    println!(
        "Ledger {} ({})",
        response[field::LEDGER_INDEX].to_string().bold(),
        if validated { "validated".green() } else { "not validated".yellow() }
    );
    if let Some(index) = response.get(field::INDEX).and_then(Value::as_str) {
        println!("  Index: {}", index.yellow());
    }
    if let Some(blob) = response.get(field::NODE_BINARY).and_then(Value::as_str) {
        println!("  Binary: {blob}");
    } else if let Some(node) = response.get(field::NODE) {
        println!("{}", serde_json::to_string_pretty(node)?);
    } else {
        println!("  {}", "zero key, nothing looked up".dimmed());
    }
    Ok(())
}

fn entry_response(args: &EntryArgs) -> anyhow::Result<Value> {
    let mut params = parse_object(&args.request)?;
    if args.binary {
        params.insert(BINARY_FIELD.into(), Value::Bool(true));
    }
    let source = load_source(slice::from_ref(&args.ledger))
        .with_context(|| format!("loading ledger {}", args.ledger.display()))?;
    Ok(klr_rpc::ledger_entry(&params, &source, &StandardKeyDeriver))
}

fn cmd_serve(args: ServeArgs) -> anyhow::Result<()> {
    let config = serve_config(args)?;
    let bind = config.bind_addr;
    let server = KlrServer::from_config(config)?;
    println!("KLR server on {}", bind.to_string().bold());

    tokio::runtime::Runtime::new()?.block_on(server.serve())?;
    Ok(())
}

fn serve_config(args: ServeArgs) -> anyhow::Result<ServerConfig> {
    let mut config = match &args.config {
        Some(path) => ServerConfig::from_file(path)
            .with_context(|| format!("reading config {}", path.display()))?,
        None => ServerConfig::default(),
    };
    if let Some(bind) = &args.bind {
        config.bind_addr = bind
            .parse()
            .with_context(|| format!("invalid bind address {bind}"))?;
    }
    if !args.ledgers.is_empty() {
        config.ledger_fixtures = args.ledgers;
    }
    Ok(config)
}

fn parse_object(text: &str) -> anyhow::Result<Map<String, Value>> {
    match serde_json::from_str::<Value>(text).context("request is not valid JSON")? {
        Value::Object(map) => Ok(map),
        _ => anyhow::bail!("request must be a JSON object"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    const KEY: &str = "AB00000000000000000000000000000000000000000000000000000000000001";

    fn fixture(dir: &tempfile::TempDir) -> PathBuf {
        let path = dir.path().join("ledger.json");
        let body = format!(
            r#"{{"ledger_index": 9, "validated": true,
                "entries": [{{"index": "{KEY}", "LedgerEntryType": "Offer", "Sequence": 4}}]}}"#
        );
        std::fs::write(&path, body).unwrap();
        path
    }

    fn entry(ledger: PathBuf, request: &str, binary: bool) -> EntryArgs {
        EntryArgs {
            ledger,
            request: request.into(),
            binary,
        }
    }

    #[test]
    fn parse_object_rejects_non_objects() {
        assert!(parse_object("[1, 2]").is_err());
        assert!(parse_object("not json").is_err());
        assert!(parse_object(r#"{"index": "00"}"#).is_ok());
    }

    #[test]
    fn entry_finds_object_by_index() {
        let dir = tempfile::tempdir().unwrap();
        let args = entry(fixture(&dir), &format!(r#"{{"index": "{KEY}"}}"#), false);
        let response = entry_response(&args).unwrap();
        assert_eq!(response[field::INDEX], KEY);
        assert_eq!(response[field::NODE]["Sequence"], 4);
        assert_eq!(response[field::LEDGER_INDEX], 9);
    }

    #[test]
    fn entry_binary_flag_switches_rendering() {
        let dir = tempfile::tempdir().unwrap();
        let args = entry(fixture(&dir), &format!(r#"{{"index": "{KEY}"}}"#), true);
        let response = entry_response(&args).unwrap();
        assert!(response[field::NODE_BINARY].is_string());
        assert!(response.get(field::NODE).is_none());
    }

    #[test]
    fn entry_reports_in_band_errors() {
        let dir = tempfile::tempdir().unwrap();
        let args = entry(fixture(&dir), r#"{"offer": 12}"#, false);
        let response = entry_response(&args).unwrap();
        assert_eq!(response[field::ERROR], "malformedRequest");
    }

    #[test]
    fn entry_missing_fixture_is_an_error() {
        let args = entry("/no/such/ledger.json".into(), "{}", false);
        assert!(entry_response(&args).is_err());
    }

    #[test]
    fn serve_config_overrides() {
        let args = ServeArgs {
            config: None,
            bind: Some("0.0.0.0:7000".into()),
            ledgers: vec!["a.json".into()],
        };
        let config = serve_config(args).unwrap();
        assert_eq!(config.bind_addr.port(), 7000);
        assert_eq!(config.ledger_fixtures, vec![PathBuf::from("a.json")]);
    }

    #[test]
    fn serve_config_rejects_bad_bind() {
        let args = ServeArgs {
            config: None,
            bind: Some("nowhere".into()),
            ledgers: vec![],
        };
        assert!(serve_config(args).is_err());
    }

    #[test]
    fn serve_config_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("klr.toml");
        std::fs::write(&path, "ledger_fixtures = [\"l.json\"]\ndefault_binary = true\n").unwrap();
        let args = ServeArgs {
            config: Some(path),
            bind: None,
            ledgers: vec![],
        };
        let config = serve_config(args).unwrap();
        assert!(config.default_binary);
        assert_eq!(config.ledger_fixtures, vec![dir.path().join("l.json")]);
    }
}
