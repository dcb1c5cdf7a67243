//! pcbuild - build desk command line
//!
//! Keeps a quoting session in a JSON file and evaluates it against a catalog.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{info, warn};

use pcbuild::session::default_session_path;
use pcbuild::sync::FilterField;
use pcbuild::{default_config, load_config, BuildSession, Catalog, Category};

/// Compatibility checks and quotes for custom PC builds
#[derive(Parser, Debug)]
#[command(name = "pcbuild")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Session file (defaults to the platform data directory)
    #[arg(short, long, global = true)]
    session: Option<PathBuf>,

    /// Engine config used when a new session is started
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print compatibility, filters, candidates and quote as JSON
    Evaluate {
        /// Catalog JSON file
        #[arg(short, long)]
        catalog: PathBuf,
    },

    /// Put a catalog part into its base slot
    Select {
        #[arg(short, long)]
        catalog: PathBuf,
        part_id: String,
    },

    /// Empty a base slot
    Deselect { category: Category },

    /// Add an add-on product (merges with an existing line)
    Addon {
        #[arg(short, long)]
        catalog: PathBuf,
        part_id: String,
        #[arg(short, long, default_value_t = 1)]
        qty: u32,
    },

    /// Change the quantity of an add-on line
    SetQty { id: String, qty: u32 },

    /// Remove an add-on line
    RemoveAddon { id: String },

    /// Derive filters from the chosen parts now
    Sync,

    /// Clear one filter, or all filters when no field is given
    ClearFilter { field: Option<FilterField> },

    /// Turn automatic filter derivation on or off
    SmartSync {
        #[arg(action = clap::ArgAction::Set)]
        enabled: bool,
    },

    /// Start the build over
    Reset,
}

fn open_session(path: &Path, config: Option<&Path>) -> Result<BuildSession> {
    if path.exists() {
        if let Some(config) = config {
            warn!(
                "Config {:?} only applies to new sessions; keeping the settings saved in {:?}",
                config, path
            );
        }
        return BuildSession::load(path);
    }
    let config = match config {
        Some(p) => load_config(p)?,
        None => default_config(),
    };
    info!("Starting new session at {:?}", path);
    Ok(BuildSession::new(&config))
}

fn find_part(catalog_path: &Path, part_id: &str) -> Result<pcbuild::Part> {
    let catalog = Catalog::load(catalog_path)?;
    catalog
        .get(part_id)
        .cloned()
        .with_context(|| format!("No part '{}' in catalog", part_id))
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn main() -> Result<()> {
    pcbuild::init_tracing();
    let cli = Cli::parse();

    let session_path = match cli.session {
        Some(path) => path,
        None => default_session_path()?,
    };
    let mut session = open_session(&session_path, cli.config.as_deref())?;

    match cli.command {
        Commands::Evaluate { catalog } => {
            let catalog = Catalog::load(&catalog)?;
            return print_json(&session.evaluate(&catalog));
        }
        Commands::Select { catalog, part_id } => {
            let part = find_part(&catalog, &part_id)?;
            if let Some(previous) = session.select(part)? {
                info!("Replaced {} ({})", previous.name, previous.id);
            }
        }
        Commands::Deselect { category } => {
            if session.deselect(category).is_none() {
                info!("{} was already empty", category);
            }
        }
        Commands::Addon {
            catalog,
            part_id,
            qty,
        } => {
            let part = find_part(&catalog, &part_id)?;
            session.add_addon(part, qty)?;
        }
        Commands::SetQty { id, qty } => session.update_addon_qty(&id, qty)?,
        Commands::RemoveAddon { id } => {
            if session.remove_addon(&id).is_none() {
                info!("No add-on '{}' to remove", id);
            }
        }
        Commands::Sync => session.sync_filters(),
        Commands::ClearFilter { field: Some(field) } => session.clear_filter(field),
        Commands::ClearFilter { field: None } => session.clear_filters(),
        Commands::SmartSync { enabled } => session.set_smart_sync(enabled),
        Commands::Reset => session.reset(),
    }

    session.save(&session_path)?;
    print_json(&session)
}
