//! Conversion of Plane export rows into Linear import rows.
//!
//! The transform is pure: anything worth telling the operator about is
//! returned as a [`Diagnostic`] next to the converted row, and the caller
//! decides how to report it.

pub mod timestamp;

use std::fmt;

use crate::config::IdentityMap;
use crate::model::{
    COLUMNS, COMPLETED_AT, CREATED_AT, ColumnKind, DestinationRecord, SourceRecord, source_index,
};

pub use timestamp::{format_legacy_timestamp, parse_legacy_timestamp, parse_timestamp};

/// A recoverable problem found while converting a row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// A non-empty date cell could not be parsed; the output cell is empty.
    InvalidDate {
        field: &'static str,
        value: String,
        row: String,
    },
    /// The formatted created/completed values could not be read back, so the
    /// ordering check was skipped.
    UnreadableTimestamps { row: String },
    /// The row was completed before it was created; the completion date was
    /// cleared.
    CompletedBeforeCreated {
        created: String,
        completed: String,
        row: String,
    },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::InvalidDate { field, value, row } => write!(
                f,
                "invalid date value for field \"{field}\" (\"{value}\") in input; setting to empty. Input row: {row}"
            ),
            Diagnostic::UnreadableTimestamps { row } => write!(
                f,
                "could not re-parse formatted Created/Completed dates for comparison. Input row: {row}"
            ),
            Diagnostic::CompletedBeforeCreated {
                created,
                completed,
                row,
            } => write!(
                f,
                "record has \"{COMPLETED_AT}\" ({completed}) before \"{CREATED_AT}\" ({created}); clearing \"{COMPLETED_AT}\" for this record. Input row: {row}"
            ),
        }
    }
}

/// A converted row together with the problems found while converting it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transformed {
    pub record: DestinationRecord,
    pub diagnostics: Vec<Diagnostic>,
}

/// Converts one Plane row into a Linear row.
pub fn transform_record(source: &SourceRecord, identities: &IdentityMap) -> Transformed {
    let mut record = DestinationRecord::default();
    let mut diagnostics = Vec::new();

    for (index, spec) in COLUMNS.iter().enumerate() {
        let raw = source.get(spec.source).unwrap_or_default();
        let value = match spec.kind {
            ColumnKind::Text => raw.to_string(),
            ColumnKind::Identity if raw.is_empty() => String::new(),
            ColumnKind::Identity => identities.resolve(raw).to_string(),
            ColumnKind::Timestamp if raw.trim().is_empty() => String::new(),
            ColumnKind::Timestamp => match parse_timestamp(raw) {
                Some(instant) => format_legacy_timestamp(&instant),
                None => {
                    diagnostics.push(Diagnostic::InvalidDate {
                        field: spec.source,
                        value: raw.to_string(),
                        row: source.to_json(),
                    });
                    String::new()
                }
            },
        };
        record.set(index, value);
    }

    if let Some(diagnostic) = clear_completed_before_created(&mut record, source) {
        diagnostics.push(diagnostic);
    }

    Transformed {
        record,
        diagnostics,
    }
}

/// Converts a batch of rows, preserving their order.
pub fn transform_records<'a, I>(sources: I, identities: &IdentityMap) -> Vec<Transformed>
where
    I: IntoIterator<Item = &'a SourceRecord>,
{
    sources
        .into_iter()
        .map(|source| transform_record(source, identities))
        .collect()
}

fn clear_completed_before_created(
    record: &mut DestinationRecord,
    source: &SourceRecord,
) -> Option<Diagnostic> {
    let created_index = source_index(CREATED_AT)?;
    let completed_index = source_index(COMPLETED_AT)?;

    let created = record.cell(created_index);
    let completed = record.cell(completed_index);
    if created.is_empty() || completed.is_empty() {
        return None;
    }

    let (Some(created_at), Some(completed_at)) = (
        parse_legacy_timestamp(created),
        parse_legacy_timestamp(completed),
    ) else {
        return Some(Diagnostic::UnreadableTimestamps {
            row: source.to_json(),
        });
    };

    if completed_at >= created_at {
        return None;
    }

    let diagnostic = Diagnostic::CompletedBeforeCreated {
        created: created.to_string(),
        completed: completed.to_string(),
        row: source.to_json(),
    };
    record.set(completed_index, String::new());
    Some(diagnostic)
}
