use serde::Serialize;
use std::error::Error;
use std::path::Path;
use tabled::{settings::Style, Table, Tabled};

use crate::types::{ProjectTable, ProjectTotal, TableRows};
use crate::util::format_number;

pub fn write_csv<T: Serialize>(path: &Path, rows: &[T]) -> Result<(), Box<dyn Error>> {
    let mut wtr = csv::Writer::from_path(path)?;
    for r in rows {
        wtr.serialize(r)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), Box<dyn Error>> {
    let s = serde_json::to_string_pretty(value)?;
    std::fs::write(path, s)?;
    Ok(())
}

pub fn write_html(path: &Path, document: &str) -> Result<(), Box<dyn Error>> {
    std::fs::write(path, document)?;
    Ok(())
}

pub fn preview_table_rows<T>(rows: &[T], max_rows: usize)
where
    T: Tabled + Clone,
{
    let slice: Vec<T> = rows.iter().take(max_rows).cloned().collect();
    if slice.is_empty() {
        println!("(no rows)\n");
        return;
    }
    let table_str = Table::new(slice).with(Style::markdown()).to_string();
    println!("{}\n", table_str);
}

pub fn preview_project(table: &ProjectTable, max_rows: usize) {
    println!("{} ({} rows)\n", table.project, table.rows.len());
    match &table.rows {
        TableRows::Ranked(rows) => preview_table_rows(rows, max_rows),
        TableRows::Roster(rows) => preview_table_rows(rows, max_rows),
    }
}

#[derive(Tabled, Clone)]
struct TotalRow {
    #[tabled(rename = "Rank")]
    rank: usize,
    #[tabled(rename = "Project")]
    project: String,
    #[tabled(rename = "Total Calls Dialed/Hour")]
    total: String,
}

/// Markdown preview of the project ranking.
pub fn preview_totals(totals: &[ProjectTotal]) {
    let rows: Vec<TotalRow> = totals
        .iter()
        .enumerate()
        .map(|(idx, t)| TotalRow {
            rank: idx + 1,
            project: t.project.clone(),
            total: format_number(t.total_calls_dialed_hour, 2),
        })
        .collect();
    preview_table_rows(&rows, rows.len());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::tests::record;

    #[test]
    fn csv_export_writes_header_and_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("records.csv");
        let mut r = record("Acme", "dana", 7.5);
        r.connected = None;
        write_csv(&path, &[r]).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next().unwrap(),
            "Project,SDR,TotalCallsDialed,CallsAnswered,Connected,Noofworkingdays,Noofworkinghours,CallsDialedDay,CallsDialedHour"
        );
        assert_eq!(lines.next().unwrap(), "Acme,dana,200,40,,5,40,40.0,7.5");
    }

    #[test]
    fn json_summary_is_pretty_printed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("summary.json");
        let totals = vec![ProjectTotal {
            project: "B".to_string(),
            total_calls_dialed_hour: 10.0,
        }];
        write_json(&path, &totals).unwrap();
        let parsed: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(parsed[0]["project"], "B");
        assert_eq!(parsed[0]["total_calls_dialed_hour"], 10.0);
    }
}
