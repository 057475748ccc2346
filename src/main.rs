//! propr CLI - inspect props and state as the UI runtime receives them
//!
//! Commands:
//!   propr inspect <json>  - Display the keys and value kinds of a component snapshot

use clap::{Parser, Subcommand, ValueEnum};
use propr::{json_unmarshal, to_json, try_to_map, JsonHost, Map, Snapshot, Value};
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "propr")]
#[command(about = "Inspect component props and state maps", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a JSON snapshot and display its props/state maps
    Inspect {
        /// Path to a JSON file (`-` for stdin). Either
        /// `{"props": {..}, "state": {..}}` or a bare map.
        file: PathBuf,

        /// Only show one section of a snapshot
        #[arg(long, value_enum)]
        key: Option<Section>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Section {
    Props,
    State,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive("propr=info".parse()?))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Inspect { file, key, json } => inspect_command(&file, key, json),
    }
}

fn inspect_command(file: &Path, key: Option<Section>, json: bool) -> anyhow::Result<()> {
    let text = read_input(file)?;
    let parsed = json_unmarshal(&JsonHost, &text)
        .map_err(|e| anyhow::anyhow!("Failed to parse {}: {}", file.display(), e))?;

    let sections = split_sections(parsed, key)?;
    tracing::info!("inspecting {} section(s) from {}", sections.len(), file.display());

    for (name, value) in sections {
        // Same dispatch the converter applies to a component's input.
        let map = try_to_map(&value)
            .map_err(|e| anyhow::anyhow!("Section {} is not convertible: {}", name, e))?
            .unwrap_or_default();

        if json {
            let out = to_json(&Value::Map(map))?;
            println!("{}: {}", name, serde_json::to_string_pretty(&out)?);
        } else {
            println!("{}:", name);
            print_map(&map, 1);
        }
    }

    Ok(())
}

fn read_input(file: &Path) -> anyhow::Result<String> {
    if file.as_os_str() == "-" {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text)?;
        return Ok(text);
    }
    std::fs::read_to_string(file).map_err(|e| anyhow::anyhow!("Failed to read {}: {}", file.display(), e))
}

/// A snapshot yields its props/state; anything else is shown as one map.
fn split_sections(parsed: Value, key: Option<Section>) -> anyhow::Result<Vec<(&'static str, Value)>> {
    let is_snapshot = parsed
        .as_map()
        .is_some_and(|m| m.contains_key(propr::PROPS_KEY) || m.contains_key(propr::STATE_KEY));

    if !is_snapshot {
        if key.is_some() {
            anyhow::bail!("--key needs a snapshot with props/state sections");
        }
        return Ok(vec![("map", parsed)]);
    }

    let snapshot = Snapshot::from_value(parsed)?;
    let mut sections = Vec::new();
    if key != Some(Section::State) {
        sections.push((propr::PROPS_KEY, Value::Map(snapshot.props)));
    }
    if key != Some(Section::Props) {
        sections.push((propr::STATE_KEY, Value::Map(snapshot.state)));
    }
    Ok(sections)
}

fn print_map(map: &Map, depth: usize) {
    let mut keys: Vec<_> = map.keys().collect();
    keys.sort();

    for key in keys {
        let value = &map[key];
        let indent = "  ".repeat(depth);
        match value {
            Value::Map(nested) => {
                println!("{}{}: map", indent, key);
                print_map(nested, depth + 1);
            }
            Value::List(items) => println!("{}{}: list[{}]", indent, key, items.len()),
            other => println!("{}{}: {}", indent, key, other.kind()),
        }
    }
}
