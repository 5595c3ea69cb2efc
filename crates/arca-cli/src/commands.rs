use anyhow::Context;
use arca_patterns::{
    dispatch_all, scoped, BaseRecord, Connection, DatabaseResource, Delivery, EventLog,
    FileResource, Guard, HidingRecord, NotificationService, OverridingRecord,
};
use arca_store::{Backend, BackendKind, FileManager, HistoryRecord, StoreConfig};
use colored::Colorize;
use serde::Serialize;
use tracing::info;

use crate::cli::*;
use crate::ops::StoreOp;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let format = cli.format;
    match cli.command {
        Command::Store(args) => cmd_store(args, cli.config.as_deref(), format),
        Command::Dispatch => cmd_dispatch(format),
        Command::Notify(args) => cmd_notify(args, format),
        Command::Resources => cmd_resources(format),
    }
}

// ---------------------------------------------------------------------------
// store
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
#[serde(tag = "op", rename_all = "lowercase")]
enum Outcome {
    Save { name: String, saved: bool },
    File { name: String },
    Load { name: String, data: Option<String> },
    Delete { name: String, removed: bool },
    List { names: Vec<String> },
}

#[derive(Debug, Serialize)]
struct StoreReport {
    backend: BackendKind,
    outcomes: Vec<Outcome>,
    #[serde(skip_serializing_if = "Option::is_none")]
    history: Option<Vec<HistoryRecord>>,
}

fn resolve_backend(
    requested: Option<BackendKind>,
    config: Option<&std::path::Path>,
) -> anyhow::Result<BackendKind> {
    if let Some(kind) = requested {
        return Ok(kind);
    }
    let config = match config {
        Some(path) => StoreConfig::load(path)
            .with_context(|| format!("reading config {}", path.display()))?,
        None => StoreConfig::default(),
    };
    Ok(config.backend)
}

fn run_ops(backend: &Backend, ops: &[StoreOp]) -> anyhow::Result<StoreReport> {
    let storage = backend.storage();
    let manager = FileManager::new(storage.clone());
    let mut outcomes = Vec::with_capacity(ops.len());

    for op in ops {
        let outcome = match op {
            StoreOp::Save { name, text } => Outcome::Save {
                name: name.clone(),
                saved: storage.save(name, text.as_bytes())?,
            },
            StoreOp::File { name, text } => {
                manager.save_file(name, text.as_bytes())?;
                Outcome::File { name: name.clone() }
            }
            StoreOp::Load { name } => Outcome::Load {
                name: name.clone(),
                data: storage
                    .load(name)?
                    .map(|bytes| String::from_utf8_lossy(&bytes).into_owned()),
            },
            StoreOp::Delete { name } => Outcome::Delete {
                name: name.clone(),
                removed: storage.delete(name)?,
            },
            StoreOp::List => Outcome::List {
                names: storage.list()?,
            },
        };
        outcomes.push(outcome);
    }

    let history = backend.trackable().map(|t| t.records()).transpose()?;
    Ok(StoreReport {
        backend: backend.kind(),
        outcomes,
        history,
    })
}

fn cmd_store(args: StoreArgs, config: Option<&std::path::Path>, format: OutputFormat) -> anyhow::Result<()> {
    let kind = resolve_backend(args.backend, config)?;
    info!(backend = %kind, ops = args.ops.len(), "running store operations");
    let backend = Backend::new(kind);
    let report = run_ops(&backend, &args.ops)?;

    if format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("Backend: {}", report.backend.to_string().cyan().bold());
    for outcome in &report.outcomes {
        match outcome {
            Outcome::Save { name, saved } => {
                let mark = if *saved { "✓".green() } else { "✗".red() };
                println!("  {} save {}", mark, name.yellow());
            }
            Outcome::File { name } => println!("  {} file {}", "✓".green(), name.yellow()),
            Outcome::Load { name, data: Some(text) } => {
                println!("  {} load {}: {}", "✓".green(), name.yellow(), text)
            }
            Outcome::Load { name, data: None } => {
                println!("  {} load {}: {}", "✗".red(), name.yellow(), "not found".dimmed())
            }
            Outcome::Delete { name, removed } => {
                let mark = if *removed { "✓".green() } else { "✗".red() };
                println!("  {} delete {}", mark, name.yellow());
            }
            Outcome::List { names } if names.is_empty() => {
                println!("  list: {}", "(empty)".dimmed())
            }
            Outcome::List { names } => println!("  list: {}", names.join(", ")),
        }
    }

    if let Some(history) = &report.history {
        println!("\n{}", "History:".bold());
        for record in history {
            println!("  {record}");
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// dispatch
// ---------------------------------------------------------------------------

fn cmd_dispatch(format: OutputFormat) -> anyhow::Result<()> {
    let hiding = HidingRecord;
    let dynamic = dispatch_all(&[&BaseRecord, &OverridingRecord, &hiding]);

    if format == OutputFormat::Json {
        let value = serde_json::json!({
            "dynamic": dynamic,
            "save_base": hiding.save_base(),
            "save_hidden": hiding.save_hidden(),
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    println!("{}", "Through &dyn Record:".bold());
    for (label, out) in ["base", "overriding", "hiding"].iter().zip(&dynamic) {
        println!("  {:<11} {}", label.cyan(), out);
    }
    println!("{}", "Called by name on HidingRecord:".bold());
    println!("  {:<11} {}", "save_base".cyan(), hiding.save_base());
    println!("  {:<11} {}", "save_hidden".cyan(), hiding.save_hidden());
    Ok(())
}

// ---------------------------------------------------------------------------
// notify
// ---------------------------------------------------------------------------

fn cmd_notify(args: NotifyArgs, format: OutputFormat) -> anyhow::Result<()> {
    let service = NotificationService::new();
    service.send_as_email(&args.to, &args.subject, &args.body);
    service.send_as_sms(&args.phone, &args.message);
    let sent: Vec<Delivery> = service.sent();

    if format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&sent)?);
        return Ok(());
    }
    for delivery in &sent {
        println!("{} [{}] {}", "✓".green(), delivery.channel.to_string().cyan(), delivery);
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// resources
// ---------------------------------------------------------------------------

fn cmd_resources(format: OutputFormat) -> anyhow::Result<()> {
    let log = EventLog::new();

    {
        let mut conn = Connection::open(&log);
        conn.dispose();
    }
    {
        let _file = Guard::new(FileResource::new("report.csv", &log));
        let _db = Guard::new(DatabaseResource::new("postgres://localhost/app", &log));
    }
    let failed: Result<(), String> = scoped(FileResource::new("partial.tmp", &log), |file| {
        Err(format!("write to {} failed", file.path()))
    });
    if let Err(reason) = failed {
        log.push(format!("scope ended early: {reason}"));
    }

    let events = log.events();
    if format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&events)?);
        return Ok(());
    }
    for (i, event) in events.iter().enumerate() {
        println!("{:>3}. {}", (i + 1).to_string().dimmed(), event);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ops(tokens: &[&str]) -> Vec<StoreOp> {
        tokens.iter().map(|s| s.parse().unwrap()).collect()
    }

    #[test]
    fn cloud_report_includes_history() {
        let backend = Backend::new(BackendKind::Cloud);
        let report = run_ops(&backend, &ops(&["save:x:data", "load:x", "delete:x"])).unwrap();

        let history: Vec<String> = report
            .history
            .unwrap()
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(history, vec!["Salvar - x", "Carregar - x", "Excluir - x"]);
    }

    #[test]
    fn local_report_has_no_history() {
        let backend = Backend::new(BackendKind::Local);
        let report = run_ops(&backend, &ops(&["file:a:1", "list"])).unwrap();

        assert!(report.history.is_none());
        assert!(matches!(
            &report.outcomes[1],
            Outcome::List { names } if names == &vec!["a".to_string()]
        ));
    }

    #[test]
    fn missing_load_reports_none() {
        let backend = Backend::new(BackendKind::Local);
        let report = run_ops(&backend, &ops(&["load:nope", "delete:nope"])).unwrap();

        assert!(matches!(&report.outcomes[0], Outcome::Load { data: None, .. }));
        assert!(matches!(&report.outcomes[1], Outcome::Delete { removed: false, .. }));
    }

    #[test]
    fn report_serializes_tagged_outcomes() {
        let backend = Backend::new(BackendKind::Cloud);
        let report = run_ops(&backend, &ops(&["save:k:v"])).unwrap();
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["backend"], "cloud");
        assert_eq!(json["outcomes"][0]["op"], "save");
        assert_eq!(json["outcomes"][0]["saved"], true);
        assert_eq!(json["history"][0]["operation"], "Salvar");
    }

    #[test]
    fn explicit_backend_beats_config() {
        let kind = resolve_backend(Some(BackendKind::Cloud), None).unwrap();
        assert_eq!(kind, BackendKind::Cloud);
        assert_eq!(resolve_backend(None, None).unwrap(), BackendKind::Local);
    }
}
