mod csv_io;
mod excel_io;
mod inputs_io;
mod json_io;

use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::ProjectionError;
use crate::models::{DisplayWindow, ProjectionInputs};
use crate::projection::Projection;

pub use csv_io::{read_csv, write_csv, write_csv_to_bytes};
pub use excel_io::{write_excel, write_excel_to_bytes};
pub use inputs_io::{parse_inputs, read_inputs, InputFormat};
pub use json_io::{write_json, write_json_to_string, JsonExport};

/// One exported month: both technologies' components and running totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportRow {
    pub month: u32,
    pub date: NaiveDate,
    pub lead_acid_purchase: f64,
    pub lead_acid_maintenance: f64,
    pub lead_acid_salvage: f64,
    pub lead_acid_electricity: f64,
    pub lead_acid_cumulative: f64,
    pub lithium_purchase: f64,
    pub lithium_electricity: f64,
    pub lithium_cumulative: f64,
}

/// Flatten the in-window months of a projection into export rows.
pub fn export_rows(projection: &Projection, window: &DisplayWindow) -> Vec<ExportRow> {
    let months = projection.window_len(window);
    projection
        .lead_acid_ledger
        .iter()
        .zip(projection.lithium_ledger.iter())
        .zip(projection.lead_acid.points.iter().zip(&projection.lithium.points))
        .take(months)
        .map(|((la, li), (la_cum, li_cum))| ExportRow {
            month: la.month,
            date: la.date,
            lead_acid_purchase: la.purchase,
            lead_acid_maintenance: la.maintenance,
            lead_acid_salvage: la.salvage,
            lead_acid_electricity: la.electricity,
            lead_acid_cumulative: la_cum.total,
            lithium_purchase: li.purchase,
            lithium_electricity: li.electricity,
            lithium_cumulative: li_cum.total,
        })
        .collect()
}

/// Both cumulative curves over the display window, shaped for charting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartData {
    pub start_date: NaiveDate,
    pub display_years: u32,
    pub dates: Vec<NaiveDate>,
    pub lead_acid: Vec<f64>,
    pub lithium: Vec<f64>,
}

impl ChartData {
    pub fn from_projection(projection: &Projection, window: &DisplayWindow) -> Self {
        let lead_acid = projection.lead_acid.within(window);
        let lithium = projection.lithium.within(window);
        Self {
            start_date: projection.start_date,
            display_years: window.years(),
            dates: lead_acid.iter().map(|p| p.date).collect(),
            lead_acid: lead_acid.iter().map(|p| p.total).collect(),
            lithium: lithium.iter().map(|p| p.total).collect(),
        }
    }
}

/// Trait for loading projection inputs from a file.
pub trait InputsReader {
    fn read(&self, path: &Path) -> Result<ProjectionInputs, ProjectionError>;
}

/// Trait for writing a projection, cut to a display window, to a file.
pub trait SeriesWriter {
    fn write(
        &self,
        projection: &Projection,
        window: &DisplayWindow,
        path: &Path,
    ) -> Result<(), ProjectionError>;
}

/// CSV writer.
pub struct CsvFormat;

impl SeriesWriter for CsvFormat {
    fn write(
        &self,
        projection: &Projection,
        window: &DisplayWindow,
        path: &Path,
    ) -> Result<(), ProjectionError> {
        write_csv(projection, window, path)
    }
}

/// JSON reader/writer.
#[derive(Default)]
pub struct JsonFormat {
    pub pretty: bool,
}

impl InputsReader for JsonFormat {
    fn read(&self, path: &Path) -> Result<ProjectionInputs, ProjectionError> {
        let content = std::fs::read_to_string(path)?;
        parse_inputs(&content, InputFormat::Json)
    }
}

impl SeriesWriter for JsonFormat {
    fn write(
        &self,
        projection: &Projection,
        window: &DisplayWindow,
        path: &Path,
    ) -> Result<(), ProjectionError> {
        write_json(projection, window, path, self.pretty)
    }
}

/// TOML input reader.
pub struct TomlFormat;

impl InputsReader for TomlFormat {
    fn read(&self, path: &Path) -> Result<ProjectionInputs, ProjectionError> {
        let content = std::fs::read_to_string(path)?;
        parse_inputs(&content, InputFormat::Toml)
    }
}

/// Excel (.xlsx) writer.
pub struct ExcelFormat;

impl SeriesWriter for ExcelFormat {
    fn write(
        &self,
        projection: &Projection,
        window: &DisplayWindow,
        path: &Path,
    ) -> Result<(), ProjectionError> {
        write_excel(projection, window, path)
    }
}

/// Pick an inputs reader from a file extension.
pub fn reader_for(path: &Path) -> Result<Box<dyn InputsReader>, ProjectionError> {
    match InputFormat::from_path(path)? {
        InputFormat::Toml => Ok(Box::new(TomlFormat)),
        InputFormat::Json => Ok(Box::new(JsonFormat::default())),
    }
}

/// Pick a writer from a file extension.
pub fn writer_for(path: &Path, pretty: bool) -> Result<Box<dyn SeriesWriter>, ProjectionError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    match ext.as_str() {
        "csv" => Ok(Box::new(CsvFormat)),
        "json" => Ok(Box::new(JsonFormat { pretty })),
        "xlsx" => Ok(Box::new(ExcelFormat)),
        _ => Err(ProjectionError::ParseError(format!(
            "Unsupported output format: .{ext}. Use .csv, .json, or .xlsx"
        ))),
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::small_projection;
    use super::*;
    use crate::projection::ProjectionEngine;

    #[test]
    fn test_export_rows_small() {
        let rows = export_rows(&small_projection(), &DisplayWindow::default());
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0].lead_acid_cumulative, 106.0);
        assert_eq!(rows[2].lead_acid_salvage, -10.0);
        assert_eq!(rows[2].lead_acid_cumulative, 208.0);
        assert_eq!(rows[3].lithium_purchase, 200.0);
        assert_eq!(rows[3].lithium_cumulative, 402.0);
    }

    #[test]
    fn test_export_rows_truncated_to_window() {
        let projection = ProjectionEngine::default()
            .run(
                &ProjectionInputs::default(),
                NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            )
            .unwrap();
        let rows = export_rows(&projection, &DisplayWindow::new(5).unwrap());
        assert_eq!(rows.len(), 60);
        assert_eq!(rows[59].date, NaiveDate::from_ymd_opt(2028, 12, 1).unwrap());
    }

    #[test]
    fn test_chart_data_alignment() {
        let data = ChartData::from_projection(&small_projection(), &DisplayWindow::default());
        assert_eq!(data.dates.len(), 4);
        assert_eq!(data.lead_acid, vec![106.0, 112.0, 208.0, 214.0]);
        assert_eq!(data.lithium, vec![200.5, 201.0, 201.5, 402.0]);
        assert_eq!(data.display_years, 10);
    }

    #[test]
    fn test_writer_for_extensions() {
        assert!(writer_for(Path::new("out.csv"), false).is_ok());
        assert!(writer_for(Path::new("out.JSON"), true).is_ok());
        assert!(writer_for(Path::new("out.xlsx"), false).is_ok());
        let err = writer_for(Path::new("out.txt"), false).err().unwrap();
        assert!(err.to_string().contains("Unsupported output format"));
    }

    #[test]
    fn test_csv_trait_write() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("series.csv");
        let writer: &dyn SeriesWriter = &CsvFormat;
        writer
            .write(&small_projection(), &DisplayWindow::default(), &path)
            .unwrap();
        let rows = read_csv(&path).unwrap();
        assert_eq!(rows.len(), 4);
    }

    #[test]
    fn test_json_trait_reads_inputs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("inputs.json");
        std::fs::write(&path, r#"{"lithium": {"lifespan_years": 10}}"#).unwrap();
        let reader: &dyn InputsReader = &JsonFormat::default();
        let inputs = reader.read(&path).unwrap();
        assert_eq!(inputs.lithium.lifespan_years, 10);
        assert_eq!(inputs.lead_acid.lifespan_years, 4);
    }

    #[test]
    fn test_toml_trait_reads_inputs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("inputs.toml");
        std::fs::write(&path, "[electricity]\nusage_kwh_per_month = 120.0\n").unwrap();
        let inputs = TomlFormat.read(&path).unwrap();
        assert_eq!(inputs.electricity.usage_kwh_per_month, 120.0);
    }

    #[test]
    fn test_reader_for_extensions() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("inputs.TOML");
        std::fs::write(&path, "display_years = 12\n").unwrap();
        let inputs = reader_for(&path).unwrap().read(&path).unwrap();
        assert_eq!(inputs.display_years, 12);

        assert!(reader_for(Path::new("inputs.json")).is_ok());
        let err = reader_for(Path::new("inputs.yaml")).err().unwrap();
        assert!(err.to_string().contains("Unsupported input format"));
    }

    #[test]
    fn test_json_format_default() {
        let fmt = JsonFormat::default();
        assert!(!fmt.pretty);
    }
}
