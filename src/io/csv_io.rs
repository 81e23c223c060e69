use std::path::Path;

use crate::error::ProjectionError;
use crate::models::DisplayWindow;
use crate::projection::Projection;

use super::{export_rows, ExportRow};

/// Write the in-window months of a projection to a CSV file.
pub fn write_csv(
    projection: &Projection,
    window: &DisplayWindow,
    path: impl AsRef<Path>,
) -> Result<(), ProjectionError> {
    let mut wtr = csv::Writer::from_path(path.as_ref())?;
    for row in export_rows(projection, window) {
        wtr.serialize(&row)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Render the in-window months of a projection as CSV bytes.
pub fn write_csv_to_bytes(
    projection: &Projection,
    window: &DisplayWindow,
) -> Result<Vec<u8>, ProjectionError> {
    let mut wtr = csv::Writer::from_writer(Vec::new());
    for row in export_rows(projection, window) {
        wtr.serialize(&row)?;
    }
    wtr.into_inner()
        .map_err(|e| ProjectionError::Io(std::io::Error::other(e.to_string())))
}

/// Read rows previously written by [`write_csv`].
pub fn read_csv(path: impl AsRef<Path>) -> Result<Vec<ExportRow>, ProjectionError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path.as_ref())?;

    let mut rows = Vec::new();
    for result in rdr.deserialize() {
        let row: ExportRow = result?;
        rows.push(row);
    }
    Ok(rows)
}
