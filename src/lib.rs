pub mod analysis;
pub mod error;
pub mod io;
pub mod models;
pub mod projection;
pub mod visualization;

#[cfg(feature = "web")]
pub mod web;

pub use analysis::{Analyzer, ProjectionSummary};
pub use error::ProjectionError;
pub use io::{InputsReader, SeriesWriter};
pub use models::{
    DisplayWindow, LeadAcidParameters, LithiumParameters, MonthInterval, MonthlyLedger,
    ProjectionConfig, ProjectionInputs, Technology,
};
pub use projection::{Projection, ProjectionEngine};
