//! StoreDesk CLI - Settings and seed data tools.
//!
//! # Usage
//!
//! ```bash
//! # Show the stored sidebar settings (or the defaults)
//! sd-cli settings show
//!
//! # Change theme and position, keeping the other fields
//! sd-cli settings set --theme dark --position right
//!
//! # Remove the stored settings
//! sd-cli settings reset
//!
//! # Dump the demo seed as YAML
//! sd-cli seed export --collection products
//! ```
//!
//! # Commands
//!
//! - `settings` - Inspect and edit the persisted sidebar settings
//! - `seed export` - Print the data every collection starts with

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use storedesk_admin::config::AdminConfig;

mod commands;

use commands::seed::CollectionName;
use commands::settings::{PositionArg, ThemeArg};

#[derive(Parser)]
#[command(name = "sd-cli")]
#[command(author, version, about = "StoreDesk CLI tools")]
struct Cli {
    /// Settings directory (defaults to `STOREDESK_SETTINGS_DIR` or ./data/settings)
    #[arg(long, global = true)]
    settings_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage the persisted sidebar settings
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },
    /// Work with the demo seed data
    Seed {
        #[command(subcommand)]
        action: SeedAction,
    },
}

#[derive(Subcommand)]
enum SettingsAction {
    /// Print the stored settings as JSON
    Show,
    /// Delete the stored settings so the defaults apply
    Reset,
    /// Update and save individual fields
    Set {
        #[arg(short, long, value_enum)]
        theme: Option<ThemeArg>,

        #[arg(short, long, value_enum)]
        position: Option<PositionArg>,

        #[arg(short, long)]
        collapsed: Option<bool>,
    },
}

#[derive(Subcommand)]
enum SeedAction {
    /// Print seed data as YAML
    Export {
        /// Only export this collection
        #[arg(short, long, value_enum)]
        collection: Option<CollectionName>,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "storedesk_cli=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let settings_dir = match cli.settings_dir {
        Some(dir) => dir,
        None => AdminConfig::from_env()?.settings_dir,
    };
    let mut out = std::io::stdout().lock();

    match cli.command {
        Commands::Settings { action } => match action {
            SettingsAction::Show => commands::settings::show(&settings_dir, &mut out)?,
            SettingsAction::Reset => commands::settings::reset(&settings_dir)?,
            SettingsAction::Set {
                theme,
                position,
                collapsed,
            } => {
                commands::settings::set(&settings_dir, theme, position, collapsed, &mut out)?;
            }
        },
        Commands::Seed { action } => match action {
            SeedAction::Export { collection } => commands::seed::export(collection, &mut out)?,
        },
    }
    Ok(())
}
