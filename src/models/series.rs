use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::config::DisplayWindow;
use super::params::Technology;

/// Running total of cost up to and including a month.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CumulativePoint {
    pub month: u32,
    pub date: NaiveDate,
    pub total: f64,
}

/// Cumulative cost of one technology, aligned month for month with its ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CumulativeSeries {
    pub technology: Technology,
    pub start_date: NaiveDate,
    pub points: Vec<CumulativePoint>,
}

impl CumulativeSeries {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn get(&self, month: usize) -> Option<&CumulativePoint> {
        self.points.get(month)
    }

    /// Cumulative cost at the last month of the series.
    pub fn final_total(&self) -> f64 {
        self.points.last().map(|p| p.total).unwrap_or(0.0)
    }

    /// The points dated strictly before the end of `window`.
    ///
    /// Always a prefix of the full series; values are never touched.
    pub fn within(&self, window: &DisplayWindow) -> &[CumulativePoint] {
        let end = window.end_date(self.start_date);
        let cut = self.points.partition_point(|p| p.date < end);
        &self.points[..cut]
    }

    pub fn totals(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(|p| p.total)
    }
}
