mod engine;

pub use engine::{
    build_monthly_ledger, month_date, project, to_cumulative_series, validate_start_date,
    Projection, ProjectionEngine,
};
