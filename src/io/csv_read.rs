use std::path::Path;

use csv::ReaderBuilder;

use crate::error::{Result, ToolError};
use crate::model::SourceRecord;

const BYTE_ORDER_MARK: char = '\u{feff}';

/// Reads every row of a Plane export keyed by its header.
///
/// Values are kept verbatim. Short rows are accepted; their trailing columns
/// are simply absent from the record.
pub fn read_records(path: &Path) -> Result<Vec<SourceRecord>> {
    let read_error = |source| ToolError::ReadInput {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .map_err(read_error)?;

    let headers: Vec<String> = reader
        .headers()
        .map_err(read_error)?
        .iter()
        .map(|header| header.trim_start_matches(BYTE_ORDER_MARK).to_string())
        .collect();

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row.map_err(read_error)?;
        let record = headers
            .iter()
            .zip(row.iter())
            .map(|(header, value)| (header.as_str(), value))
            .collect::<SourceRecord>();
        records.push(record);
    }

    Ok(records)
}
