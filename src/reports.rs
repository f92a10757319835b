use crate::config::Layout;
use crate::types::{ProjectGroup, ProjectTable, ProjectTotal, RankedRow, Record, RosterRow, TableRows};
use crate::util::{format_cell, format_percentage};
use std::cmp::Ordering;
use std::collections::HashMap;

/// Partition records by project. Groups appear in first-occurrence order
/// and records keep their input order inside a group.
pub fn group_by_project(records: &[Record]) -> Vec<ProjectGroup> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<ProjectGroup> = Vec::new();
    for r in records {
        let slot = *index.entry(r.project.as_str()).or_insert_with(|| {
            groups.push(ProjectGroup {
                project: r.project.clone(),
                records: vec![],
            });
            groups.len() - 1
        });
        groups[slot].records.push(r.clone());
    }
    groups
}

pub fn compute_project_totals(groups: &[ProjectGroup]) -> Vec<ProjectTotal> {
    groups
        .iter()
        .map(|g| ProjectTotal {
            project: g.project.clone(),
            total_calls_dialed_hour: g.records.iter().map(|r| r.calls_dialed_hour).sum(),
        })
        .collect()
}

/// Project names by descending total. `sort_by` is stable, so equal totals
/// keep their first-occurrence order.
pub fn order_projects(totals: &[ProjectTotal]) -> Vec<String> {
    let mut sorted: Vec<&ProjectTotal> = totals.iter().collect();
    sorted.sort_by(|a, b| {
        b.total_calls_dialed_hour
            .partial_cmp(&a.total_calls_dialed_hour)
            .unwrap_or(Ordering::Equal)
    });
    sorted.into_iter().map(|t| t.project.clone()).collect()
}

/// Records by descending Calls Dialed/Hour, stable on ties.
pub fn order_records_by_metric(records: &[Record]) -> Vec<Record> {
    let mut sorted = records.to_vec();
    sorted.sort_by(|a, b| {
        b.calls_dialed_hour
            .partial_cmp(&a.calls_dialed_hour)
            .unwrap_or(Ordering::Equal)
    });
    sorted
}

/// Groups in display order for the given layout. The ranked layout sorts
/// projects and the records inside them; the roster layout keeps input order.
pub fn ordered_groups(records: &[Record], layout: Layout) -> Vec<ProjectGroup> {
    let groups = group_by_project(records);
    match layout {
        Layout::Roster => groups,
        Layout::Ranked => {
            let order = order_projects(&compute_project_totals(&groups));
            let mut by_name: HashMap<String, ProjectGroup> =
                groups.into_iter().map(|g| (g.project.clone(), g)).collect();
            order
                .into_iter()
                .filter_map(|name| by_name.remove(&name))
                .map(|g| ProjectGroup {
                    records: order_records_by_metric(&g.records),
                    project: g.project,
                })
                .collect()
        }
    }
}

pub fn ranked_row(r: &Record) -> RankedRow {
    RankedRow {
        sdr: r.sdr.clone(),
        total_calls_dialed: format_cell(r.total_calls_dialed),
        calls_answered: format_cell(r.calls_answered),
        connected_pct: r.connected.map(format_percentage).unwrap_or_default(),
        working_days: format_cell(r.working_days),
        working_hours: format_cell(r.working_hours),
        calls_dialed_day: format_cell(r.calls_dialed_day),
        calls_dialed_hour: r.calls_dialed_hour.to_string(),
    }
}

pub fn roster_row(r: &Record) -> RosterRow {
    RosterRow {
        project: r.project.clone(),
        sdr: r.sdr.clone(),
        total_calls: format_cell(r.total_calls_dialed),
        working_days: format_cell(r.working_days),
        working_hours: format_cell(r.working_hours),
        calls_dialed_day: format_cell(r.calls_dialed_day),
        calls_dialed_hour: r.calls_dialed_hour.to_string(),
    }
}

pub fn project_table(group: &ProjectGroup, layout: Layout) -> ProjectTable {
    let rows = match layout {
        Layout::Ranked => TableRows::Ranked(group.records.iter().map(ranked_row).collect()),
        Layout::Roster => TableRows::Roster(group.records.iter().map(roster_row).collect()),
    };
    ProjectTable {
        project: group.project.clone(),
        rows,
    }
}

/// One table per project, taking the groups in the order given (normally
/// the output of `ordered_groups`).
pub fn build_project_tables(groups: &[ProjectGroup], layout: Layout) -> Vec<ProjectTable> {
    groups.iter().map(|g| project_table(g, layout)).collect()
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn record(project: &str, sdr: &str, per_hour: f64) -> Record {
        Record {
            project: project.to_string(),
            sdr: sdr.to_string(),
            total_calls_dialed: Some(200),
            calls_answered: Some(40),
            connected: Some(0.2),
            working_days: Some(5),
            working_hours: Some(40),
            calls_dialed_day: Some(40.0),
            calls_dialed_hour: per_hour,
        }
    }

    fn sample() -> Vec<Record> {
        vec![
            record("A", "a1", 5.0),
            record("B", "b1", 10.0),
            record("A", "a2", 3.0),
        ]
    }

    #[test]
    fn grouping_partitions_input() {
        let input = vec![
            record("A", "1", 1.0),
            record("B", "2", 2.0),
            record("A", "3", 3.0),
            record("C", "4", 4.0),
            record("B", "5", 5.0),
        ];
        let groups = group_by_project(&input);
        let names: Vec<&str> = groups.iter().map(|g| g.project.as_str()).collect();
        assert_eq!(names, vec!["A", "B", "C"]);

        let mut flattened: Vec<String> = groups
            .iter()
            .flat_map(|g| {
                assert!(g.records.iter().all(|r| r.project == g.project));
                g.records.iter().map(|r| r.sdr.clone())
            })
            .collect();
        flattened.sort();
        let mut expected: Vec<String> = input.iter().map(|r| r.sdr.clone()).collect();
        expected.sort();
        assert_eq!(flattened, expected);

        let a: Vec<&str> = groups[0].records.iter().map(|r| r.sdr.as_str()).collect();
        assert_eq!(a, vec!["1", "3"]);
    }

    #[test]
    fn empty_input_has_no_groups() {
        assert!(group_by_project(&[]).is_empty());
        assert!(ordered_groups(&[], Layout::Ranked).is_empty());
        assert!(build_project_tables(&[], Layout::Ranked).is_empty());
    }

    #[test]
    fn totals_are_sums() {
        let groups = group_by_project(&sample());
        let totals = compute_project_totals(&groups);
        assert_eq!(totals[0].project, "A");
        assert!((totals[0].total_calls_dialed_hour - 8.0).abs() < 1e-9);
        assert!((totals[1].total_calls_dialed_hour - 10.0).abs() < 1e-9);

        let empty = vec![ProjectGroup { project: "Z".to_string(), records: vec![] }];
        assert_eq!(compute_project_totals(&empty)[0].total_calls_dialed_hour, 0.0);
    }

    #[test]
    fn projects_order_is_non_increasing_and_stable() {
        let totals: Vec<ProjectTotal> = [("P", 3.0), ("Q", 9.0), ("R", 3.0), ("S", 0.0), ("T", 9.0)]
            .iter()
            .map(|(p, t)| ProjectTotal {
                project: p.to_string(),
                total_calls_dialed_hour: *t,
            })
            .collect();
        let order = order_projects(&totals);
        assert_eq!(order, vec!["Q", "T", "P", "R", "S"]);
    }

    #[test]
    fn records_sorted_descending_and_stable() {
        let rows = vec![
            record("A", "x", 2.0),
            record("A", "y", 6.0),
            record("A", "z", 2.0),
        ];
        let sorted = order_records_by_metric(&rows);
        let sdrs: Vec<&str> = sorted.iter().map(|r| r.sdr.as_str()).collect();
        assert_eq!(sdrs, vec!["y", "x", "z"]);
    }

    #[test]
    fn ranked_layout_orders_projects_and_rows() {
        let tables = build_project_tables(&ordered_groups(&sample(), Layout::Ranked), Layout::Ranked);
        assert_eq!(tables.len(), 2);
        assert_eq!(tables[0].project, "B");
        assert_eq!(tables[1].project, "A");
        let TableRows::Ranked(rows) = &tables[1].rows else {
            panic!("expected ranked rows");
        };
        assert_eq!(rows[0].sdr, "a1");
        assert_eq!(rows[0].calls_dialed_hour, "5");
        assert_eq!(rows[1].sdr, "a2");
        assert_eq!(rows[0].connected_pct, "20.00%");
    }

    #[test]
    fn roster_layout_keeps_input_order() {
        let tables = build_project_tables(&ordered_groups(&sample(), Layout::Roster), Layout::Roster);
        assert_eq!(tables[0].project, "A");
        assert_eq!(tables[1].project, "B");
        let TableRows::Roster(rows) = &tables[0].rows else {
            panic!("expected roster rows");
        };
        assert_eq!(rows[0].project, "A");
        assert_eq!(rows[0].sdr, "a1");
        assert_eq!(rows[1].sdr, "a2");
        assert_eq!(tables[0].rows.headers().len(), 7);
    }

    #[test]
    fn missing_values_render_empty() {
        let mut r = record("A", "x", 1.5);
        r.connected = None;
        r.calls_answered = None;
        let row = ranked_row(&r);
        assert_eq!(row.connected_pct, "");
        assert_eq!(row.calls_answered, "");
        assert_eq!(row.calls_dialed_hour, "1.5");
    }
}
