mod analyzer;
mod summary;

pub use analyzer::Analyzer;
pub use summary::{find_break_even, yearly_snapshots, BreakEven, ProjectionSummary, YearlySnapshot};
