//! vfdocs CLI - regenerate the GraphQL API reference pages

use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use vfdocs::config::{self, VfdocsConfig};
use vfdocs::ui;

#[derive(Parser)]
#[command(name = "vfdocs")]
#[command(version)]
#[command(about = "Generate ValueFlows GraphQL reference docs with resolver implementation status")]
#[command(long_about = r#"
vfdocs scans the query and mutation resolvers of vf-graphql-holochain,
works out which ones are implemented, and writes one markdown reference
page per ValueFlows module.

Paths come from vfdocs.toml in the working directory when present:
  resolvers  = "../hrea/modules/vf-graphql-holochain"
  schema     = "../vf-graphql/lib/schemas"
  extensions = ["associate-my-agent.gql"]
  output     = "../graphql-developer-docs/reference/graphql-api-reference"
"#)]
struct Cli {
    /// Path to the config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Print implemented/total counts per module
    #[arg(long)]
    summary: bool,

    /// Print the per-module report as JSON
    #[arg(long, conflicts_with = "summary")]
    json: bool,

    /// Write a config file with the default paths and exit
    #[arg(long)]
    init: bool,

    /// Overwrite an existing config file with --init
    #[arg(long, requires = "init")]
    force: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let config_path = cli.config.clone().unwrap_or_else(config::default_config_path);

    if cli.init {
        config::write_config(&config_path, &VfdocsConfig::defaults(), cli.force)?;
        ui::success(&format!("Wrote {}", config_path.display()));
        return Ok(());
    }

    let config = match config::load_config(Some(config_path.as_path()))? {
        Some(config) => {
            tracing::debug!("Using config {}", config_path.display());
            config
        }
        None if cli.config.is_some() => {
            anyhow::bail!("config file {} not found", config_path.display());
        }
        None => VfdocsConfig::default(),
    };
    let paths = config.resolve(&config::config_base(&config_path));

    let report = vfdocs::generate(&paths)?;

    if report.modules.iter().all(|m| m.queries == 0 && m.mutations == 0) {
        ui::warn("No resolvers found for any module");
    }

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else if cli.summary {
        ui::header("Resolver implementation status");
        println!("{}", ui::summary_table(&report));
        ui::summary_row("Output:", &paths.output.display().to_string());
        ui::success(&format!("Wrote {} reference pages", report.files_written()));
    }

    Ok(())
}
