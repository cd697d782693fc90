use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use willowrune_app::modules::site::views::{render, RenderOptions};
use wrp_kernel::settings::{Settings, TelemetrySettings};
use wrp_kernel::PageId;

/// Maintenance tool for the Willow Rune content store
#[derive(Debug, Parser)]
#[command(name = "wrp", version, about)]
struct Cli {
    /// Directory holding the persisted snapshot; overrides `storage.data_dir`
    #[arg(long, global = true, env = "WRP_DATA_DIR")]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the persisted snapshot, or the bundled default when none is stored
    Show,
    /// Discard the persisted snapshot
    Reset,
    /// Render the page a navigation fragment points at
    Render {
        #[arg(long, default_value = "")]
        fragment: String,
        /// Genre filter for the books page
        #[arg(long)]
        genre: Option<String>,
    },
    /// Check the persisted snapshot for duplicate ids and bad prices
    Validate,
    /// List page identifiers and their fragments
    Pages,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut settings = Settings::load().context("failed to load settings")?;
    // Keep stdout for command output; only warnings and errors are logged.
    wrp_telemetry::init(&TelemetrySettings {
        filter: Some("warn".to_string()),
        ..settings.telemetry.clone()
    });

    if let Some(data_dir) = cli.data_dir {
        settings.storage.data_dir = data_dir;
    }

    match cli.command {
        Command::Show => {
            let store = willowrune_app::open_store(&settings)?;
            println!("{}", serde_json::to_string_pretty(&store.load())?);
        }
        Command::Reset => {
            let store = willowrune_app::open_store(&settings)?;
            store.reset().context("failed to reset content")?;
            println!("reset {}", store.key());
        }
        Command::Render { fragment, genre } => {
            let store = willowrune_app::open_store(&settings)?;
            let page = PageId::from_fragment(&fragment);
            let options = RenderOptions {
                genre,
                can_edit: false,
            };
            let view = render(page, &store.load(), &options);
            println!("{}", serde_json::to_string_pretty(&view)?);
        }
        Command::Validate => {
            let store = willowrune_app::open_store(&settings)?;
            let issues = store.load().validate();
            if issues.is_empty() {
                println!("ok");
            } else {
                for issue in &issues {
                    println!("{} {}: {}", issue.collection, issue.id, issue.problem);
                }
                bail!("{} validation issue(s)", issues.len());
            }
        }
        Command::Pages => {
            for page in PageId::ALL {
                println!("{page}\t{}", page.fragment());
            }
        }
    }

    Ok(())
}
