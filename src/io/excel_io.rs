use std::path::Path;

use rust_xlsxwriter::{Format, Workbook};

use crate::error::ProjectionError;
use crate::models::DisplayWindow;
use crate::projection::Projection;

use super::export_rows;

const HEADERS: [&str; 10] = [
    "month",
    "date",
    "lead_acid_purchase",
    "lead_acid_maintenance",
    "lead_acid_salvage",
    "lead_acid_electricity",
    "lead_acid_cumulative",
    "lithium_purchase",
    "lithium_electricity",
    "lithium_cumulative",
];

fn build_workbook(
    projection: &Projection,
    window: &DisplayWindow,
) -> Result<Workbook, ProjectionError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name("Projection")?;

    let bold = Format::new().set_bold();
    let money = Format::new().set_num_format("#,##0.00");

    for (col, header) in HEADERS.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *header, &bold)?;
    }

    for (i, row) in export_rows(projection, window).iter().enumerate() {
        let r = i as u32 + 1;
        worksheet.write_number(r, 0, row.month as f64)?;
        worksheet.write_string(r, 1, row.date.format("%Y-%m-%d").to_string())?;
        let values = [
            row.lead_acid_purchase,
            row.lead_acid_maintenance,
            row.lead_acid_salvage,
            row.lead_acid_electricity,
            row.lead_acid_cumulative,
            row.lithium_purchase,
            row.lithium_electricity,
            row.lithium_cumulative,
        ];
        for (offset, value) in values.iter().enumerate() {
            worksheet.write_number_with_format(r, offset as u16 + 2, *value, &money)?;
        }
    }

    Ok(workbook)
}

/// Write the in-window months of a projection to an Excel (.xlsx) file.
pub fn write_excel(
    projection: &Projection,
    window: &DisplayWindow,
    path: impl AsRef<Path>,
) -> Result<(), ProjectionError> {
    let mut workbook = build_workbook(projection, window)?;
    workbook.save(path.as_ref())?;
    Ok(())
}

/// Render the in-window months of a projection as .xlsx bytes.
pub fn write_excel_to_bytes(
    projection: &Projection,
    window: &DisplayWindow,
) -> Result<Vec<u8>, ProjectionError> {
    let mut workbook = build_workbook(projection, window)?;
    Ok(workbook.save_to_buffer()?)
}
