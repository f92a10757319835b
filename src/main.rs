// Entry point and high-level CLI flow.
//
// One run is one page load: fetch the call report, validate it, group and
// rank it by project, then write the dashboard page with one table per
// project. Optional exports (CSV of records, JSON summary) and a terminal
// preview follow a successful render.
mod config;
mod controller;
mod error;
mod fetch;
mod html;
mod loader;
mod output;
mod reports;
mod types;
mod util;

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use config::{DashboardConfig, Layout, API_URL, CONTAINER_ID};
use controller::{Dashboard, PageController, PageState};
use fetch::HttpSource;
use html::Page;
use types::{DashboardSummary, Record};

#[derive(Parser)]
#[command(name = "call-report")]
#[command(about = "Render the call performance report as per-project HTML tables", long_about = None)]
struct Cli {
    /// Endpoint returning the JSON array of call records
    #[arg(long, default_value = API_URL)]
    url: String,
    /// Column set and ordering of the project tables
    #[arg(long, value_enum, default_value_t = Layout::Ranked)]
    layout: Layout,
    /// Id of the element that receives the tables
    #[arg(long, default_value = CONTAINER_ID)]
    container_id: String,
    /// Where to write the dashboard page
    #[arg(long, default_value = "dashboard.html")]
    out: PathBuf,
    /// HTML page to render into instead of the built-in one
    #[arg(long)]
    template: Option<PathBuf>,
    /// Export validated records, in display order, as CSV
    #[arg(long)]
    csv: Option<PathBuf>,
    /// Write a JSON summary of project totals
    #[arg(long)]
    summary: Option<PathBuf>,
    /// Rows per project shown in the terminal preview
    #[arg(long, default_value_t = 3)]
    preview: usize,
}

impl From<Cli> for DashboardConfig {
    fn from(cli: Cli) -> Self {
        DashboardConfig {
            url: cli.url,
            layout: cli.layout,
            container_id: cli.container_id,
            out: cli.out,
            template: cli.template,
            csv: cli.csv,
            summary: cli.summary,
            preview_rows: cli.preview,
        }
    }
}

fn load_page(config: &DashboardConfig) -> anyhow::Result<Page> {
    match &config.template {
        Some(path) => {
            let template = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read template {}", path.display()))?;
            Ok(Page::from_template(template))
        }
        None => Ok(Page::builtin()),
    }
}

/// Print the console summary and the markdown previews.
fn print_overview(config: &DashboardConfig, dash: &Dashboard) {
    let report = &dash.report;
    println!(
        "Processing dataset... ({} records fetched, {} projects)",
        util::format_int(report.total_rows),
        util::format_int(dash.tables.len())
    );
    if !report.rejected.is_empty() {
        println!(
            "Note: {} records skipped due to validation errors.",
            util::format_int(report.rejected.len())
        );
    }
    println!();

    // Totals only exist for the ranked layout.
    if !dash.totals.is_empty() {
        println!("Projects by total Calls Dialed/Hour\n");
        output::preview_totals(&dash.totals);
    }
    for table in &dash.tables {
        output::preview_project(table, config.preview_rows);
    }
}

/// Write the optional CSV and JSON exports. A failed write is an error for
/// the whole run, so the process exits non-zero.
fn write_exports(config: &DashboardConfig, dash: &Dashboard) -> anyhow::Result<()> {
    if let Some(path) = &config.csv {
        // Records go out in display order, group by group.
        let records: Vec<Record> = dash
            .groups
            .iter()
            .flat_map(|g| g.records.iter().cloned())
            .collect();
        output::write_csv(path, &records)
            .map_err(|e| anyhow::anyhow!("failed to write {}: {}", path.display(), e))?;
        println!("(Records exported to {})", path.display());
    }

    if let Some(path) = &config.summary {
        let summary = DashboardSummary {
            generated_at: chrono::Utc::now(),
            layout: config.layout,
            total_records: dash.report.total_rows,
            rejected_records: dash.report.rejected.len(),
            projects: dash.totals.clone(),
        };
        output::write_json(path, &summary)
            .map_err(|e| anyhow::anyhow!("failed to write {}: {}", path.display(), e))?;
        println!("(Summary written to {})", path.display());
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let config = DashboardConfig::from(Cli::parse());

    let page = load_page(&config)?;
    let container = page.mount(&config.container_id)?;
    log::info!("Fetching call report from {}", config.url);

    let dash = PageController::new(HttpSource::new(&config.url), config.layout, container)
        .run()
        .await;
    debug_assert!(dash.state.is_terminal());

    output::write_html(&config.out, &dash.container.document())
        .map_err(|e| anyhow::anyhow!("failed to write {}: {}", config.out.display(), e))?;

    match &dash.state {
        PageState::Errored { message } => {
            anyhow::bail!("{} (page written to {})", message, config.out.display());
        }
        _ => {
            print_overview(&config, &dash);
            write_exports(&config, &dash)?;
            println!("Dashboard written to {}.", config.out.display());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::LoadReport;
    use crate::reports::{compute_project_totals, ordered_groups, tests::record};

    fn config(layout: Layout) -> DashboardConfig {
        DashboardConfig {
            url: API_URL.to_string(),
            layout,
            container_id: CONTAINER_ID.to_string(),
            out: PathBuf::from("dashboard.html"),
            template: None,
            csv: None,
            summary: None,
            preview_rows: 3,
        }
    }

    fn rendered(layout: Layout) -> Dashboard {
        let records = vec![record("A", "a1", 5.0), record("B", "b1", 10.0)];
        let groups = ordered_groups(&records, layout);
        let totals = match layout {
            Layout::Ranked => compute_project_totals(&groups),
            Layout::Roster => Vec::new(),
        };
        Dashboard {
            state: PageState::Rendered { projects: groups.len() },
            container: Page::builtin().mount(CONTAINER_ID).unwrap(),
            report: LoadReport {
                total_rows: 2,
                accepted_rows: 2,
                rejected: vec![],
            },
            tables: reports::build_project_tables(&groups, layout),
            groups,
            totals,
        }
    }

    #[test]
    fn failed_export_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut cfg = config(Layout::Ranked);
        cfg.csv = Some(dir.path().join("missing").join("records.csv"));
        let err = write_exports(&cfg, &rendered(Layout::Ranked)).unwrap_err();
        assert!(err.to_string().starts_with("failed to write"));

        let mut cfg = config(Layout::Ranked);
        cfg.summary = Some(dir.path().join("missing").join("summary.json"));
        assert!(write_exports(&cfg, &rendered(Layout::Ranked)).is_err());
    }

    #[test]
    fn exports_are_written_in_display_order() {
        let dir = tempfile::tempdir().unwrap();
        let mut cfg = config(Layout::Ranked);
        cfg.csv = Some(dir.path().join("records.csv"));
        cfg.summary = Some(dir.path().join("summary.json"));
        write_exports(&cfg, &rendered(Layout::Ranked)).unwrap();

        let csv_text = std::fs::read_to_string(dir.path().join("records.csv")).unwrap();
        let projects: Vec<&str> = csv_text
            .lines()
            .skip(1)
            .map(|l| l.split(',').next().unwrap())
            .collect();
        assert_eq!(projects, vec!["B", "A"]);

        let summary: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(dir.path().join("summary.json")).unwrap())
                .unwrap();
        assert_eq!(summary["layout"], "ranked");
        assert_eq!(summary["projects"][0]["project"], "B");
    }

    #[test]
    fn roster_summary_has_no_totals() {
        let dir = tempfile::tempdir().unwrap();
        let mut cfg = config(Layout::Roster);
        cfg.summary = Some(dir.path().join("summary.json"));
        write_exports(&cfg, &rendered(Layout::Roster)).unwrap();

        let summary: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(dir.path().join("summary.json")).unwrap())
                .unwrap();
        assert_eq!(summary["layout"], "roster");
        assert_eq!(summary["projects"], serde_json::json!([]));
        assert_eq!(summary["total_records"], 2);
    }
}
