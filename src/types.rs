use serde::{Deserialize, Serialize};
use serde_json::Value;
use tabled::Tabled;

/// One element of the fetched array, before validation. Fields stay as raw
/// JSON so numbers delivered as strings can still be accepted.
#[derive(Debug, Deserialize)]
pub struct RawRecord {
    #[serde(rename = "Project")]
    pub project: Option<Value>,
    #[serde(rename = "SDR")]
    pub sdr: Option<Value>,
    #[serde(rename = "TotalCallsDialed")]
    pub total_calls_dialed: Option<Value>,
    #[serde(rename = "CallsAnswered")]
    pub calls_answered: Option<Value>,
    #[serde(rename = "Connected")]
    pub connected: Option<Value>,
    #[serde(rename = "Noofworkingdays")]
    pub working_days: Option<Value>,
    #[serde(rename = "Noofworkinghours")]
    pub working_hours: Option<Value>,
    #[serde(rename = "CallsDialedDay")]
    pub calls_dialed_day: Option<Value>,
    #[serde(rename = "CallsDialedHour")]
    pub calls_dialed_hour: Option<Value>,
}

/// A validated call performance record for one agent on one project.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    #[serde(rename = "Project")]
    pub project: String,
    #[serde(rename = "SDR")]
    pub sdr: String,
    #[serde(rename = "TotalCallsDialed")]
    pub total_calls_dialed: Option<i64>,
    #[serde(rename = "CallsAnswered")]
    pub calls_answered: Option<i64>,
    #[serde(rename = "Connected")]
    pub connected: Option<f64>,
    #[serde(rename = "Noofworkingdays")]
    pub working_days: Option<i64>,
    #[serde(rename = "Noofworkinghours")]
    pub working_hours: Option<i64>,
    #[serde(rename = "CallsDialedDay")]
    pub calls_dialed_day: Option<f64>,
    #[serde(rename = "CallsDialedHour")]
    pub calls_dialed_hour: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProjectGroup {
    pub project: String,
    pub records: Vec<Record>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectTotal {
    pub project: String,
    pub total_calls_dialed_hour: f64,
}

/// Row of the sorted eight-column layout.
#[derive(Debug, Serialize, Tabled, Clone, PartialEq)]
pub struct RankedRow {
    #[tabled(rename = "SDR")]
    pub sdr: String,
    #[tabled(rename = "Total Calls Dialed")]
    pub total_calls_dialed: String,
    #[tabled(rename = "Calls Answered")]
    pub calls_answered: String,
    #[tabled(rename = "Connected %")]
    pub connected_pct: String,
    #[tabled(rename = "No. of working days")]
    pub working_days: String,
    #[tabled(rename = "No. of working hours")]
    pub working_hours: String,
    #[tabled(rename = "Calls Dialed/Day")]
    pub calls_dialed_day: String,
    #[tabled(rename = "Calls Dialed/Hour")]
    pub calls_dialed_hour: String,
}

/// Row of the unsorted seven-column layout.
#[derive(Debug, Serialize, Tabled, Clone, PartialEq)]
pub struct RosterRow {
    #[tabled(rename = "Project")]
    pub project: String,
    #[tabled(rename = "SDR")]
    pub sdr: String,
    #[tabled(rename = "Total Calls")]
    pub total_calls: String,
    #[tabled(rename = "Working Days")]
    pub working_days: String,
    #[tabled(rename = "Working Hours")]
    pub working_hours: String,
    #[tabled(rename = "Calls Dialed/Day")]
    pub calls_dialed_day: String,
    #[tabled(rename = "Calls Dialed/Hour")]
    pub calls_dialed_hour: String,
}

/// The rows of one project table, typed by layout.
#[derive(Debug, Clone, PartialEq)]
pub enum TableRows {
    Ranked(Vec<RankedRow>),
    Roster(Vec<RosterRow>),
}

impl TableRows {
    pub fn headers(&self) -> Vec<String> {
        match self {
            TableRows::Ranked(_) => RankedRow::headers().into_iter().map(|h| h.into_owned()).collect(),
            TableRows::Roster(_) => RosterRow::headers().into_iter().map(|h| h.into_owned()).collect(),
        }
    }

    pub fn cells(&self) -> Vec<Vec<String>> {
        fn collect<T: Tabled>(rows: &[T]) -> Vec<Vec<String>> {
            rows.iter()
                .map(|r| r.fields().into_iter().map(|f| f.into_owned()).collect())
                .collect()
        }
        match self {
            TableRows::Ranked(rows) => collect(rows),
            TableRows::Roster(rows) => collect(rows),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            TableRows::Ranked(rows) => rows.len(),
            TableRows::Roster(rows) => rows.len(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProjectTable {
    pub project: String,
    pub rows: TableRows,
}

#[derive(Debug, Serialize)]
pub struct DashboardSummary {
    pub generated_at: chrono::DateTime<chrono::Utc>,
    pub layout: crate::config::Layout,
    pub total_records: usize,
    pub rejected_records: usize,
    pub projects: Vec<ProjectTotal>,
}
