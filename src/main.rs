#![forbid(unsafe_code)]

mod bom;
mod codec;
mod constants;
mod geometry;
mod icons;
mod preview;
mod resolver;
mod store;
mod types;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::{error, info, Level as TraceLevel};
use tracing_subscriber::FmtSubscriber;

use codec::DecodeMode;
use icons::IconLookup;
use preview::RenderPlan;
use store::DesignStore;

#[derive(Parser)]
#[command(name = "keypad-configurator", version, about = "Validate, normalize and lay out PKP keypad slot configurations")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Validate a configuration file and report the first problem found
    Validate {
        /// JSON configuration file
        file: PathBuf,
        /// Use the closed-set validation applied before persisting a design
        #[arg(long)]
        strict: bool,
        /// Keypad model code (e.g. PKP-2400-SI)
        #[arg(long)]
        model: Option<String>,
    },
    /// Print the canonical normalized form of a configuration
    Normalize {
        file: PathBuf,
        #[arg(long)]
        model: Option<String>,
    },
    /// Print the renderable layout plan as JSON
    Plan {
        file: PathBuf,
        #[arg(long)]
        model: Option<String>,
        /// Icon catalog JSON file for display names and matte assets
        #[arg(long)]
        catalog: Option<PathBuf>,
    },
    /// Print the technical-specification table (slot / icon / glow)
    Spec {
        file: PathBuf,
        #[arg(long)]
        model: Option<String>,
        #[arg(long)]
        catalog: Option<PathBuf>,
    },
    /// List the known keypad models and their slot counts
    Models,
    /// Manage the saved-design store
    Design {
        /// Store file override (defaults to the platform data dir)
        #[arg(long)]
        store: Option<PathBuf>,
        #[command(subcommand)]
        command: DesignCommand,
    },
}

#[derive(Subcommand)]
enum DesignCommand {
    /// List all saved designs
    List,
    /// Show one saved design
    Show { id: u64 },
    /// Validate and save a new design
    Save {
        #[arg(long)]
        name: String,
        #[arg(long)]
        model: String,
        file: PathBuf,
    },
    /// Replace an existing design's name and configuration
    Update {
        id: u64,
        #[arg(long)]
        name: String,
        file: PathBuf,
    },
    /// Delete a saved design
    Delete { id: u64 },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse log level from environment variable
    let log_level = match std::env::var("LOG_LEVEL")
        .unwrap_or_else(|_| "warn".to_string())
        .to_lowercase()
        .as_str()
    {
        "trace" => TraceLevel::TRACE,
        "debug" => TraceLevel::DEBUG,
        "info" => TraceLevel::INFO,
        "error" => TraceLevel::ERROR,
        _ => TraceLevel::WARN,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let cli = Cli::parse();
    match cli.command {
        Command::Validate { file, strict, model } => validate(&file, strict, model.as_deref()),
        Command::Normalize { file, model } => normalize(&file, model.as_deref()),
        Command::Plan { file, model, catalog } => plan(&file, model.as_deref(), catalog.as_deref()),
        Command::Spec { file, model, catalog } => spec(&file, model.as_deref(), catalog.as_deref()),
        Command::Models => {
            for code in geometry::known_model_codes() {
                let entry = geometry::geometry_for(code);
                println!(
                    "{:<14} {:>2} slots  aspect {:.3}",
                    code,
                    entry.slot_count(),
                    entry.aspect_ratio
                );
            }
            Ok(())
        }
        Command::Design { store, command } => {
            let store = DesignStore::open(store.unwrap_or_else(DesignStore::default_path));
            design(&store, command)
        }
    }
}

fn read_configuration_text(file: &Path) -> anyhow::Result<String> {
    fs::read_to_string(file).with_context(|| format!("Failed to read configuration from {file:?}"))
}

fn load_lookup(catalog: Option<&Path>) -> anyhow::Result<Option<IconLookup>> {
    match catalog {
        Some(path) => {
            let entries = icons::load_catalog(path)?;
            let lookup = IconLookup::build(&entries);
            if lookup.is_empty() {
                tracing::warn!(path = %path.display(), "icon catalog is empty");
            }
            info!(icons = lookup.len(), "icon lookup ready");
            Ok(Some(lookup))
        }
        None => Ok(None),
    }
}

fn validate(
    file: &Path,
    strict: bool,
    model: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let raw = read_configuration_text(file)?;

    let result = if strict {
        codec::decode_str(&raw, DecodeMode::Strict)
    } else {
        preview::decode_for_preview(&raw, model)
    };

    match result {
        Ok(configuration) => {
            info!(slots = configuration.slots.len(), "configuration is valid");
            println!(
                "OK: {} configured slot(s), rotation {} deg",
                configuration.slots.len(),
                configuration.rotation.degrees()
            );
            Ok(())
        }
        Err(config_error) => {
            error!(%config_error, "configuration rejected");
            eprintln!("INVALID: {config_error}");
            std::process::exit(1);
        }
    }
}

fn normalize(file: &Path, model: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    let raw = read_configuration_text(file)?;
    let configuration = preview::decode_for_preview(&raw, model)?;
    println!("{}", codec::encode(&configuration));
    Ok(())
}

fn plan(
    file: &Path,
    model: Option<&str>,
    catalog: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let raw = read_configuration_text(file)?;
    let lookup = load_lookup(catalog)?;
    let configuration = preview::parse_for_preview(&raw, model);
    let plan = RenderPlan::build(&configuration, model, lookup.as_ref());
    println!("{}", serde_json::to_string_pretty(&plan)?);
    Ok(())
}

fn spec(
    file: &Path,
    model: Option<&str>,
    catalog: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let raw = read_configuration_text(file)?;
    let lookup = load_lookup(catalog)?;
    let configuration = preview::parse_for_preview(&raw, model);
    let rows = bom::bom_rows(&configuration, model, lookup.as_ref());
    print!("{}", bom::format_table(&rows));
    Ok(())
}

fn design(store: &DesignStore, command: DesignCommand) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        DesignCommand::List => {
            let designs = store.list()?;
            if designs.is_empty() {
                println!("No saved designs in {:?}", store.path());
            }
            for design in designs {
                println!("{:>4}  {:<24} {}", design.id, design.keypad_model, design.name);
            }
        }
        DesignCommand::Show { id } => {
            let design = store.get(id)?;
            println!("{}", serde_json::to_string_pretty(&design)?);
        }
        DesignCommand::Save { name, model, file } => {
            let raw = read_configuration_text(&file)?;
            let design = store.save(&name, &model, &raw)?;
            println!("Saved design {} ({})", design.id, design.name);
        }
        DesignCommand::Update { id, name, file } => {
            let raw = read_configuration_text(&file)?;
            let design = store.update(id, &name, &raw)?;
            println!("Updated design {} ({})", design.id, design.name);
        }
        DesignCommand::Delete { id } => {
            store.delete(id)?;
            println!("Deleted design {id}");
        }
    }
    Ok(())
}
