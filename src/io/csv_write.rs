use std::path::Path;

use csv::WriterBuilder;

use crate::error::{Result, ToolError};
use crate::model::{DestinationRecord, destination_headers};

/// Writes the Linear import file. The header row is always written, even
/// when there are no records.
pub fn write_records(path: &Path, records: &[DestinationRecord]) -> Result<()> {
    let write_error = |source| ToolError::WriteOutput {
        path: path.to_path_buf(),
        source,
    };

    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .map_err(write_error)?;

    writer
        .write_record(destination_headers())
        .map_err(write_error)?;
    for record in records {
        writer.write_record(record.cells()).map_err(write_error)?;
    }

    writer
        .flush()
        .map_err(|error| write_error(csv::Error::from(error)))?;
    Ok(())
}
