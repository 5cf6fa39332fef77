use std::collections::BTreeMap;

use serde::Serialize;

/// How the transform treats the values of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    /// Copied verbatim.
    Text,
    /// Parsed and re-rendered in the legacy timestamp form.
    Timestamp,
    /// A user identifier resolved through the identity map.
    Identity,
}

/// One entry of the Plane → Linear column table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnSpec {
    /// Header in the Plane export.
    pub source: &'static str,
    /// Header in the Linear import file.
    pub destination: &'static str,
    pub kind: ColumnKind,
}

const fn column(source: &'static str, destination: &'static str, kind: ColumnKind) -> ColumnSpec {
    ColumnSpec {
        source,
        destination,
        kind,
    }
}

/// Source column of the creation timestamp.
pub const CREATED_AT: &str = "Created At";
/// Source column of the completion timestamp.
pub const COMPLETED_AT: &str = "Completed At";

/// The fixed column table. Its order is the output column order.
pub const COLUMNS: [ColumnSpec; 17] = [
    column("Name", "Title", ColumnKind::Text),
    column("Description", "Description", ColumnKind::Text),
    column("State", "Status", ColumnKind::Text),
    column("Start Date", "Started", ColumnKind::Timestamp),
    column("Target Date", "Due Date", ColumnKind::Timestamp),
    column("Priority", "Priority", ColumnKind::Text),
    column("Created By", "Creator", ColumnKind::Identity),
    column("Assignee", "Assignee", ColumnKind::Identity),
    column("Labels", "Labels", ColumnKind::Text),
    column("Cycle Name", "Cycle Name", ColumnKind::Text),
    column("Cycle Start Date", "Cycle Start", ColumnKind::Timestamp),
    column("Cycle End Date", "Cycle End", ColumnKind::Timestamp),
    column(CREATED_AT, "Created", ColumnKind::Timestamp),
    column("Updated At", "Updated", ColumnKind::Timestamp),
    column(COMPLETED_AT, "Completed", ColumnKind::Timestamp),
    column("Archived At", "Archived", ColumnKind::Timestamp),
    column("Project", "Project", ColumnKind::Text),
];

/// Returns the position of a source column in [`COLUMNS`].
pub fn source_index(source: &str) -> Option<usize> {
    COLUMNS.iter().position(|spec| spec.source == source)
}

/// Returns the position of a destination column in [`COLUMNS`].
pub fn destination_index(destination: &str) -> Option<usize> {
    COLUMNS.iter().position(|spec| spec.destination == destination)
}

/// Output header row, in column order.
pub fn destination_headers() -> impl Iterator<Item = &'static str> {
    COLUMNS.iter().map(|spec| spec.destination)
}

/// One row of the Plane export keyed by header. Extra columns are kept so
/// diagnostics can show the whole row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SourceRecord {
    fields: BTreeMap<String, String>,
}

impl SourceRecord {
    /// Returns the raw value of a column, if the row has one.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields.get(column).map(String::as_str)
    }

    /// Renders the row as a JSON object for warning messages.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| format!("{:?}", self.fields))
    }
}

impl<K, V> FromIterator<(K, V)> for SourceRecord
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }
}

/// One row of the Linear import file. Always holds one cell per entry of
/// [`COLUMNS`], in the same order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DestinationRecord {
    cells: Vec<String>,
}

impl Default for DestinationRecord {
    fn default() -> Self {
        Self {
            cells: vec![String::new(); COLUMNS.len()],
        }
    }
}

impl DestinationRecord {
    /// Returns the value stored under a destination header.
    pub fn get(&self, destination: &str) -> Option<&str> {
        destination_index(destination).map(|index| self.cells[index].as_str())
    }

    /// Cells in output column order.
    pub fn cells(&self) -> &[String] {
        &self.cells
    }

    pub(crate) fn set(&mut self, index: usize, value: String) {
        self.cells[index] = value;
    }

    pub(crate) fn cell(&self, index: usize) -> &str {
        &self.cells[index]
    }
}
