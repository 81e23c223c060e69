mod config;
mod inputs;
mod interval;
mod ledger;
mod params;
mod series;

pub use config::{
    DisplayWindow, ProjectionConfig, DEFAULT_CONVERSION_RATE, DEFAULT_HORIZON_YEARS,
    MAX_DISPLAY_YEARS, MAX_HORIZON_YEARS, MIN_DISPLAY_YEARS,
};
pub use inputs::{ElectricityInputs, LeadAcidInputs, LithiumInputs, ProjectionInputs, ValidationIssue};
pub use interval::MonthInterval;
pub use ledger::{MonthlyCost, MonthlyLedger};
pub use params::{LeadAcidParameters, LithiumParameters, ProjectionParameters, Technology};
pub use series::{CumulativePoint, CumulativeSeries};
