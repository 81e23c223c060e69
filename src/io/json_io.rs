use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::analysis::ProjectionSummary;
use crate::error::ProjectionError;
use crate::models::DisplayWindow;
use crate::projection::Projection;

use super::{export_rows, ExportRow};

/// JSON export document: headline summary plus the monthly rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonExport {
    pub start_date: NaiveDate,
    pub display_years: u32,
    pub summary: ProjectionSummary,
    pub rows: Vec<ExportRow>,
}

impl JsonExport {
    pub fn new(projection: &Projection, window: &DisplayWindow) -> Self {
        Self {
            start_date: projection.start_date,
            display_years: window.years(),
            summary: ProjectionSummary::from_projection(projection, window),
            rows: export_rows(projection, window),
        }
    }
}

/// Render a projection as a JSON document.
pub fn write_json_to_string(
    projection: &Projection,
    window: &DisplayWindow,
    pretty: bool,
) -> Result<String, ProjectionError> {
    let doc = JsonExport::new(projection, window);
    let content = if pretty {
        serde_json::to_string_pretty(&doc)?
    } else {
        serde_json::to_string(&doc)?
    };
    Ok(content)
}

/// Write a projection to a JSON file.
pub fn write_json(
    projection: &Projection,
    window: &DisplayWindow,
    path: impl AsRef<Path>,
    pretty: bool,
) -> Result<(), ProjectionError> {
    let content = write_json_to_string(projection, window, pretty)?;
    std::fs::write(path.as_ref(), content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::test_support::small_projection;

    #[test]
    fn test_json_document_fields() {
        let json = write_json_to_string(&small_projection(), &DisplayWindow::default(), false)
            .unwrap();
        let doc: JsonExport = serde_json::from_str(&json).unwrap();
        assert_eq!(doc.start_date, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(doc.display_years, 10);
        assert_eq!(doc.rows.len(), 4);
        assert_eq!(doc.summary.lead_acid_total, 214.0);
        assert_eq!(doc.summary.lithium_total, 402.0);
    }

    #[test]
    fn test_json_dates_are_iso_strings() {
        let json = write_json_to_string(&small_projection(), &DisplayWindow::default(), false)
            .unwrap();
        assert!(json.contains("\"date\":\"2024-03-01\""));
    }

    #[test]
    fn test_pretty_json_is_multiline() {
        let json =
            write_json_to_string(&small_projection(), &DisplayWindow::default(), true).unwrap();
        assert!(json.lines().count() > 10);
    }

    #[test]
    fn test_write_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("projection.json");
        write_json(&small_projection(), &DisplayWindow::default(), &path, true).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        let doc: JsonExport = serde_json::from_str(&content).unwrap();
        assert_eq!(doc.rows[3].lithium_cumulative, 402.0);
    }
}
