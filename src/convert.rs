use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument, warn};

use crate::config::{self, DEFAULT_CONFIG_PATH};
use crate::error::{Result, ToolError};
use crate::io::{csv_read, csv_write};
use crate::model::DestinationRecord;
use crate::transform::{Transformed, transform_records};

/// Paths for a single conversion run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertOptions {
    /// Plane CSV export to read.
    pub input: PathBuf,
    /// Linear CSV file to create.
    pub output: PathBuf,
    /// JSON file with the `users` identifier → email mapping.
    pub config: PathBuf,
}

impl ConvertOptions {
    pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
            config: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    pub fn with_config(mut self, config: impl Into<PathBuf>) -> Self {
        self.config = config.into();
        self
    }
}

/// Summary of a finished run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConvertReport {
    pub records_written: usize,
    pub warnings: usize,
}

/// Converts a Plane export into a Linear import file.
///
/// The config is loaded before the input is touched and the whole input is
/// read before the output is created, so a fatal error in either leaves no
/// output file behind.
#[instrument(
    level = "info",
    skip_all,
    fields(input = %options.input.display(), output = %options.output.display())
)]
pub fn convert(options: &ConvertOptions) -> Result<ConvertReport> {
    let identities = config::load_identity_map(&options.config)?;

    if !options.input.exists() {
        return Err(ToolError::MissingInput(options.input.clone()));
    }

    let sources = csv_read::read_records(&options.input)?;
    info!(record_count = sources.len(), "read records from Plane export");

    let transformed = transform_records(&sources, &identities);
    let (records, warnings) = report_diagnostics(transformed);
    debug!(warnings, "rows transformed");

    write_output(&options.output, &records)?;
    Ok(ConvertReport {
        records_written: records.len(),
        warnings,
    })
}

fn report_diagnostics(transformed: Vec<Transformed>) -> (Vec<DestinationRecord>, usize) {
    let mut warnings = 0;
    let records = transformed
        .into_iter()
        .map(|Transformed { record, diagnostics }| {
            for diagnostic in &diagnostics {
                warn!("{diagnostic}");
            }
            warnings += diagnostics.len();
            record
        })
        .collect();
    (records, warnings)
}

fn write_output(path: &Path, records: &[DestinationRecord]) -> Result<()> {
    csv_write::write_records(path, records)?;
    info!(
        "Successfully wrote {} records to {}",
        records.len(),
        path.display()
    );
    Ok(())
}
