//! # CLI Layer
//!
//! The **only** place in the codebase that:
//! - Knows about terminal I/O (stdout, stderr)
//! - Installs a log subscriber
//! - Handles argument parsing
//!
//! Handlers take parsed arguments plus the loaded [`RetsMetaConfig`] and
//! return the text to print.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::Parser;
use retsmeta::attributes::name_of;
use retsmeta::config::{ConfigChangedMonitor, FileConfigDao, PollingScheduler, RetsMetaConfig};
use retsmeta::dmql::{SqlClause, ToSql};
use retsmeta::format::{FormatContext, FormatMode, Formatter};
use retsmeta::metadata::{AttributeRegistry, DocumentCollector, MetaObject, MetadataDocument, MetadataKind};
use std::fmt::Write;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tracing::{debug, warn};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use super::setup::{Cli, Commands, FormatArgs};

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = RetsMetaConfig::load(cli.config.as_deref())?;
    debug!(?config, "loaded config");

    match cli.command {
        Commands::Format(args) => print!("{}", format_document(&config, &args)?),
        Commands::Columns { kind, strict } => print!("{}", columns(&kind, strict)?),
        Commands::Sql { clause } => print!("{}", compile_sql(&clause)?),
        Commands::Watch { file, interval } => {
            let interval = interval.map(Duration::from_secs).unwrap_or_else(|| config.poll_interval());
            watch(&file, interval)?
        }
    }
    Ok(())
}

/// Logs go to stderr so stdout stays clean for output.
fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("retsmeta=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("retsmeta=info"))
    };
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}

fn format_document(config: &RetsMetaConfig, args: &FormatArgs) -> Result<String> {
    let mode: FormatMode = match &args.mode {
        Some(code) => code.parse()?,
        None => config.format_mode()?,
    };
    let date = match &args.date {
        Some(text) => DateTime::parse_from_rfc3339(text)
            .with_context(|| format!("invalid --date {text:?}"))?
            .with_timezone(&Utc),
        None => Utc::now(),
    };
    let version = args
        .metadata_version
        .clone()
        .unwrap_or_else(|| config.metadata_version.clone());

    let mut ctx = FormatContext::new(version, date);
    for (key, value) in [
        ("Resource", &args.resource),
        ("Class", &args.class),
        ("Lookup", &args.lookup),
    ] {
        if let Some(value) = value {
            ctx.set(key, value.as_str());
        }
    }

    let document = MetadataDocument::load(&args.document)
        .with_context(|| format!("couldn't load {}", args.document.display()))?;
    let strict = args.strict || config.strict_parsing;
    let formatter = Formatter::new(document.kind, mode);

    let (_collector, mut root) = DocumentCollector::bind(&document, strict);
    root.materialize();
    if strict {
        for (path, missing) in missing_required(&root) {
            warn!(%path, missing = %missing.join(","), "entity lacks required attributes");
        }
    }
    Ok(formatter.format(&ctx, std::slice::from_ref(&root)))
}

/// Paths of entities in the resolved tree that lack required attributes.
fn missing_required(root: &MetaObject) -> Vec<(String, Vec<&'static str>)> {
    let mut found = Vec::new();
    let missing = root.missing_required();
    if !missing.is_empty() {
        found.push((root.path(), missing));
    }
    for kind in root.kind().child_kinds() {
        for child in root.resolved_children(*kind) {
            found.extend(missing_required(child));
        }
    }
    found
}

fn columns(kind: &str, strict: bool) -> Result<String> {
    let kind: MetadataKind = kind.parse()?;
    let map = AttributeRegistry::global().attribute_map(kind, strict);
    let mut out = String::new();
    for spec in map.specs() {
        let grammar = name_of(&spec.attr_type).unwrap_or_else(|| spec.attr_type.name());
        let flag = if spec.required { "required" } else { "" };
        writeln!(out, "{:<28} {:<22} {}", spec.name, grammar, flag)?;
    }
    Ok(out
        .lines()
        .map(str::trim_end)
        .collect::<Vec<_>>()
        .join("\n")
        + "\n")
}

fn compile_sql(path: &Path) -> Result<String> {
    let json = fs::read_to_string(path).with_context(|| format!("couldn't read {}", path.display()))?;
    let clause: SqlClause = serde_json::from_str(&json).context("invalid clause tree")?;
    let statement = clause.compile();

    let mut out = String::new();
    writeln!(out, "{}", statement.text)?;
    for (i, param) in statement.params.iter().enumerate() {
        writeln!(out, "  ?{} = {}", i + 1, param)?;
    }
    Ok(out)
}

fn watch(path: &Path, interval: Duration) -> Result<()> {
    let monitor = Arc::new(ConfigChangedMonitor::new(Arc::new(FileConfigDao::new(path))));
    let shown = path.display().to_string();
    monitor.add_listener(Arc::new(move |at: DateTime<Utc>| {
        println!("{} changed at {}", shown, at.to_rfc3339());
    }));

    println!("Watching {} every {}s (Ctrl-C to stop)", path.display(), interval.as_secs());
    let _scheduler = PollingScheduler::start(monitor, interval).context("couldn't start the monitor thread")?;
    loop {
        thread::park();
    }
}
