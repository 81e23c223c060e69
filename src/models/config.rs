use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::ProjectionError;

/// Years covered by every projection, whatever window is displayed.
pub const DEFAULT_HORIZON_YEARS: u32 = 30;
/// Longest horizon a configuration may ask for.
pub const MAX_HORIZON_YEARS: u32 = 100;
/// Turkish lira to US dollar, fixed for the life of a run.
pub const DEFAULT_CONVERSION_RATE: f64 = 1.0 / 28.0;

pub const MIN_DISPLAY_YEARS: u32 = 5;
pub const MAX_DISPLAY_YEARS: u32 = 30;

/// Run-wide settings shared by both technologies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectionConfig {
    /// Projection length in years; the ledger holds `years * 12 + 1` months
    pub horizon_years: u32,
    /// Multiplier taking maintenance and electricity prices into the purchase currency
    pub conversion_rate: f64,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            horizon_years: DEFAULT_HORIZON_YEARS,
            conversion_rate: DEFAULT_CONVERSION_RATE,
        }
    }
}

impl ProjectionConfig {
    /// Number of monthly records, month 0 and the final anniversary included.
    ///
    /// Saturates for horizons that `validate` rejects.
    pub fn horizon_months(&self) -> u32 {
        self.horizon_years.saturating_mul(12).saturating_add(1)
    }

    pub fn validate(&self) -> Result<(), ProjectionError> {
        if !(1..=MAX_HORIZON_YEARS).contains(&self.horizon_years) {
            return Err(ProjectionError::ValidationError(format!(
                "Projection horizon must be between 1 and {MAX_HORIZON_YEARS} years, got {}",
                self.horizon_years
            )));
        }
        if !self.conversion_rate.is_finite() || self.conversion_rate <= 0.0 {
            return Err(ProjectionError::ValidationError(format!(
                "Currency conversion rate must be positive, got {}",
                self.conversion_rate
            )));
        }
        Ok(())
    }
}

/// How many years of the projection to show.
///
/// Filtering to a window only truncates an already computed series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayWindow {
    years: u32,
}

impl DisplayWindow {
    pub fn new(years: u32) -> Result<Self, ProjectionError> {
        if !(MIN_DISPLAY_YEARS..=MAX_DISPLAY_YEARS).contains(&years) {
            return Err(ProjectionError::InvalidWindow(format!(
                "{years} years is outside {MIN_DISPLAY_YEARS}-{MAX_DISPLAY_YEARS}"
            )));
        }
        Ok(Self { years })
    }

    pub fn years(&self) -> u32 {
        self.years
    }

    /// First date excluded from the window.
    ///
    /// # Panics
    ///
    /// Panics if the end date is outside the calendar chrono can represent.
    pub fn end_date(&self, start_date: NaiveDate) -> NaiveDate {
        start_date
            .checked_add_months(Months::new(self.years * 12))
            .unwrap_or_else(|| panic!("display window end overflows from {start_date}"))
    }
}

impl Default for DisplayWindow {
    fn default() -> Self {
        Self { years: 10 }
    }
}
