use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use nebula_installed::banner::{BannerLabels, UpgradeBanner};
use nebula_installed::installed::{Boundary, InstalledPage, ListedRow, Section, SectionLabels};
use nebula_installed::settings::{load_app_settings, load_section_labels};
use nebula_installed::snapshot::load_snapshot;
use nebula_installed::types::{ApplicationRecord, ComponentKind};

#[derive(Parser)]
#[command(
    name = "nebula-installed",
    version,
    about = "Print a snapshot of installed apps as the Installed page lists them"
)]
struct Cli {
    /// Snapshot file with the installed applications
    snapshot: PathBuf,

    /// Snapshot file with applications that have pending operations
    #[arg(long)]
    pending: Option<PathBuf>,

    /// TOML file with section header texts
    #[arg(long)]
    labels: Option<PathBuf>,

    /// Also print rows the page keeps hidden
    #[arg(long)]
    all: bool,

    /// Print JSON instead of text
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct RowOutput<'a> {
    id: String,
    name: Option<&'a str>,
    state: &'static str,
    section: Section,
    boundary: Boundary,
    header: Option<&'a str>,
    visible: bool,
}

#[derive(Serialize)]
struct PageOutput<'a> {
    pending: usize,
    upgrade: Option<UpgradeBanner>,
    rows: Vec<RowOutput<'a>>,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let settings = load_app_settings();
    let labels = load_section_labels(&settings, cli.labels.as_deref())
        .context("Failed to load section labels")?;

    let installed = load_snapshot(&cli.snapshot)
        .with_context(|| format!("Failed to load {}", cli.snapshot.display()))?;
    let pending = match &cli.pending {
        Some(path) => {
            load_snapshot(path)
                .with_context(|| format!("Failed to load {}", path.display()))?
                .records
        }
        None => Vec::new(),
    };

    let upgrade = upgrade_banner(&pending, &BannerLabels::default())?;

    let mut page = InstalledPage::new(&settings);
    page.begin_load();
    page.finish_load(Ok(installed.records), &pending);

    let show_hidden = cli.all || settings.show_hidden_rows;
    let rows: Vec<ListedRow<'_>> = page
        .rows()
        .into_iter()
        .filter(|listed| show_hidden || listed.row.visible)
        .collect();

    if cli.json {
        let output = PageOutput {
            pending: page.pending_apps_counter(),
            upgrade,
            rows: rows
                .iter()
                .map(|listed| RowOutput {
                    id: listed.row.record.unique_id(),
                    name: listed.row.record.name(),
                    state: listed.row.record.state.as_str(),
                    section: listed.section,
                    boundary: listed.boundary,
                    header: listed.boundary.label(&labels),
                    visible: listed.row.visible,
                })
                .collect(),
        };
        let data = serde_json::to_string_pretty(&output).context("Failed to encode listing")?;
        println!("{}", data);
        return Ok(());
    }

    if let Some(banner) = &upgrade {
        println!("[{}]", banner.title_text);
        println!();
    }
    print_rows(&rows, &labels);
    if page.pending_apps_counter() > 0 {
        println!();
        println!("{} pending operation(s)", page.pending_apps_counter());
    }

    Ok(())
}

/// The first OS upgrade among pending apps drives the banner.
fn upgrade_banner(
    pending: &[ApplicationRecord],
    labels: &BannerLabels,
) -> Result<Option<UpgradeBanner>> {
    let Some(upgrade) = pending
        .iter()
        .find(|record| record.kind == ComponentKind::OperatingSystem)
    else {
        return Ok(None);
    };

    Ok(UpgradeBanner::for_upgrade(upgrade, labels)?)
}

fn print_rows(rows: &[ListedRow<'_>], labels: &SectionLabels) {
    for listed in rows {
        match listed.boundary {
            Boundary::Header(_) => {
                if let Some(label) = listed.boundary.label(labels) {
                    println!("{}", label);
                }
            }
            Boundary::Divider => println!("  {}", "-".repeat(32)),
            Boundary::None => {}
        }

        let record = &listed.row.record;
        let name = record.name().unwrap_or(record.id.as_str());
        let marker = if listed.row.visible { "" } else { " (hidden)" };
        println!("  {:<32} {}{}", name, record.state.as_str(), marker);
    }
}
