//! CSV readers for migration input lists and the permission export.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use mailshift_core::{AppError, AppResult};
use mailshift_domain::PermissionRecord;
use tracing::{debug, warn};

/// Reads single-column identity lists and six-column permission exports.
///
/// Rows may be short or long; the permission export is never rejected for
/// its shape.
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvInputReader {
    has_headers: bool,
}

impl CsvInputReader {
    /// Creates a reader. When `has_headers` is set the first row of every
    /// file is skipped.
    #[must_use]
    pub fn new(has_headers: bool) -> Self {
        Self { has_headers }
    }

    /// Reads the first column of every row, skipping blank values.
    pub fn read_identities(&self, path: &Path) -> AppResult<Vec<String>> {
        let identities = self.identities_from_reader(open(path)?)?;
        debug!(path = %path.display(), count = identities.len(), "identity list loaded");
        Ok(identities)
    }

    /// Reads every row of a permission export.
    pub fn read_permission_records(&self, path: &Path) -> AppResult<Vec<PermissionRecord>> {
        let records = self.permission_records_from_reader(open(path)?)?;
        debug!(path = %path.display(), count = records.len(), "permission export loaded");
        Ok(records)
    }

    /// Reads identities from any byte source.
    pub fn identities_from_reader<R: Read>(&self, reader: R) -> AppResult<Vec<String>> {
        let mut identities = Vec::new();

        for row in self.csv_reader(reader).records() {
            let row = row.map_err(csv_error)?;
            match row.get(0).map(str::trim) {
                Some(value) if !value.is_empty() => identities.push(value.to_owned()),
                _ => {}
            }
        }

        Ok(identities)
    }

    /// Reads permission records from any byte source.
    pub fn permission_records_from_reader<R: Read>(
        &self,
        reader: R,
    ) -> AppResult<Vec<PermissionRecord>> {
        let mut records = Vec::new();

        for row in self.csv_reader(reader).records() {
            let row = row.map_err(csv_error)?;
            if row.iter().all(|field| field.trim().is_empty()) {
                continue;
            }

            if row.len() < mailshift_domain::PERMISSION_FIELD_COUNT {
                warn!(
                    line = row.position().map_or(0, |position| position.line()),
                    fields = row.len(),
                    "short permission row, missing fields treated as empty"
                );
            }

            let fields: Vec<&str> = row.iter().collect();
            records.push(PermissionRecord::from_fields(&fields));
        }

        Ok(records)
    }

    fn csv_reader<R: Read>(&self, reader: R) -> csv::Reader<R> {
        csv::ReaderBuilder::new()
            .has_headers(self.has_headers)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader)
    }
}

fn open(path: &Path) -> AppResult<File> {
    File::open(path).map_err(|error| match error.kind() {
        std::io::ErrorKind::NotFound => {
            AppError::NotFound(format!("input file '{}' does not exist", path.display()))
        }
        _ => AppError::Internal(format!(
            "failed to open input file '{}': {error}",
            path.display()
        )),
    })
}

fn csv_error(error: csv::Error) -> AppError {
    AppError::Internal(format!("failed to read CSV row: {error}"))
}
