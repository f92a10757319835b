use std::path::PathBuf;

use clap::ValueEnum;
use serde::Serialize;

pub const API_URL: &str = "https://app.sheetlabs.com/K3/call_rprt";
pub const CONTAINER_ID: &str = "tables-container";

/// Which column set the project tables use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    /// Eight columns with Connected %, projects and rows sorted by Calls Dialed/Hour.
    #[default]
    Ranked,
    /// Seven columns with a Project column, input order, no totals.
    Roster,
}

/// Everything one dashboard run needs, resolved from the command line.
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    pub url: String,
    pub layout: Layout,
    pub container_id: String,
    pub out: PathBuf,
    pub template: Option<PathBuf>,
    pub csv: Option<PathBuf>,
    pub summary: Option<PathBuf>,
    pub preview_rows: usize,
}
