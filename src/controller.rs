// Page controller: drives one fetch -> aggregate -> render cycle.
//
// `Idle -> Loading -> Rendered | Errored`. The controller is consumed by
// `PageController::run`, so a finished page cannot be driven again; a
// reload means building a new controller.

use crate::config::Layout;
use crate::fetch::RecordSource;
use crate::html::{render_sections, Container};
use crate::loader::{load_records, LoadReport};
use crate::reports::{build_project_tables, compute_project_totals, ordered_groups};
use crate::types::{ProjectGroup, ProjectTable, ProjectTotal};

#[derive(Debug, Clone, PartialEq)]
pub enum PageState {
    Idle,
    Loading,
    Rendered { projects: usize },
    Errored { message: String },
}

impl PageState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, PageState::Rendered { .. } | PageState::Errored { .. })
    }
}

/// Result of a finished run. `groups` and `tables` are empty when the fetch
/// failed; `totals` is also empty for the roster layout.
#[derive(Debug, Clone)]
pub struct Dashboard {
    pub state: PageState,
    pub container: Container,
    pub report: LoadReport,
    pub groups: Vec<ProjectGroup>,
    pub totals: Vec<ProjectTotal>,
    pub tables: Vec<ProjectTable>,
}

pub struct PageController<S: RecordSource> {
    source: S,
    layout: Layout,
    container: Container,
    state: PageState,
}

impl<S: RecordSource> PageController<S> {
    pub fn new(source: S, layout: Layout, container: Container) -> Self {
        Self {
            source,
            layout,
            container,
            state: PageState::Idle,
        }
    }

    fn transition(&mut self, next: PageState) {
        log::debug!("page #{}: {:?} -> {:?}", self.container.id(), self.state, next);
        self.state = next;
    }

    pub async fn run(mut self) -> Dashboard {
        debug_assert_eq!(self.state, PageState::Idle);
        self.container.show_loading();
        self.transition(PageState::Loading);

        let rows = match self.source.fetch_data().await {
            Ok(rows) => rows,
            Err(e) => {
                log::error!("Fetch error: {}", e);
                let message = format!("Failed to fetch data: {}", e);
                self.container.show_error(&message);
                self.transition(PageState::Errored { message });
                return Dashboard {
                    state: self.state,
                    container: self.container,
                    report: LoadReport::default(),
                    groups: Vec::new(),
                    totals: Vec::new(),
                    tables: Vec::new(),
                };
            }
        };

        let (records, report) = load_records(rows);
        // Group and sort once; tables, totals and the CSV export all read
        // the same ordered groups.
        let groups = ordered_groups(&records, self.layout);
        let totals = match self.layout {
            Layout::Ranked => compute_project_totals(&groups),
            // The roster layout has no summed total.
            Layout::Roster => Vec::new(),
        };
        let tables = build_project_tables(&groups, self.layout);

        self.container.show_sections(&render_sections(&tables));
        self.transition(PageState::Rendered {
            projects: tables.len(),
        });

        Dashboard {
            state: self.state,
            container: self.container,
            report,
            groups,
            totals,
            tables,
        }
    }
}
