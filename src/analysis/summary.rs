use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{CumulativePoint, DisplayWindow, Technology};
use crate::projection::Projection;

/// The month lithium stops being the more expensive option.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BreakEven {
    pub month: u32,
    pub date: NaiveDate,
}

/// Headline comparison of both technologies over a display window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionSummary {
    pub display_years: u32,
    pub start_date: NaiveDate,
    /// Date of the last month inside the window
    pub end_date: NaiveDate,
    pub lead_acid_total: f64,
    pub lithium_total: f64,
    /// Lead-acid total minus lithium total; positive when lithium is cheaper
    pub savings: f64,
    /// `None` when both totals are equal
    pub cheaper: Option<Technology>,
    pub break_even: Option<BreakEven>,
    pub lead_acid_purchases: usize,
    pub lithium_purchases: usize,
}

impl ProjectionSummary {
    /// Summarize `projection` over the months inside `window`.
    pub fn from_projection(projection: &Projection, window: &DisplayWindow) -> Self {
        let lead_acid = projection.lead_acid.within(window);
        let lithium = projection.lithium.within(window);

        let last = |points: &[CumulativePoint]| points.last().map(|p| p.total).unwrap_or(0.0);
        let lead_acid_total = last(lead_acid);
        let lithium_total = last(lithium);
        let savings = lead_acid_total - lithium_total;

        let cheaper = if savings > 0.0 {
            Some(Technology::Lithium)
        } else if savings < 0.0 {
            Some(Technology::LeadAcid)
        } else {
            None
        };

        let months = lead_acid.len();
        let purchases = |tech: Technology| {
            projection
                .ledger(tech)
                .iter()
                .take(months)
                .filter(|e| e.purchase != 0.0)
                .count()
        };

        Self {
            display_years: window.years(),
            start_date: projection.start_date,
            end_date: lead_acid.last().map(|p| p.date).unwrap_or(projection.start_date),
            lead_acid_total,
            lithium_total,
            savings,
            cheaper,
            break_even: find_break_even(lead_acid, lithium),
            lead_acid_purchases: purchases(Technology::LeadAcid),
            lithium_purchases: purchases(Technology::Lithium),
        }
    }
}

/// First month at which lithium's cumulative cost falls to or below
/// lead-acid's after having been above it the month before.
pub fn find_break_even(lead_acid: &[CumulativePoint], lithium: &[CumulativePoint]) -> Option<BreakEven> {
    lead_acid
        .windows(2)
        .zip(lithium.windows(2))
        .find(|(la, li)| li[0].total > la[0].total && li[1].total <= la[1].total)
        .map(|(la, _)| BreakEven {
            month: la[1].month,
            date: la[1].date,
        })
}

/// Cumulative totals at one anniversary of the start date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearlySnapshot {
    pub year: u32,
    pub date: NaiveDate,
    pub lead_acid: f64,
    pub lithium: f64,
    /// Lead-acid minus lithium
    pub difference: f64,
}

/// Totals at month 0, 12, 24... for every anniversary inside `window`.
pub fn yearly_snapshots(projection: &Projection, window: &DisplayWindow) -> Vec<YearlySnapshot> {
    let lead_acid = projection.lead_acid.within(window);
    let lithium = projection.lithium.within(window);

    lead_acid
        .iter()
        .zip(lithium)
        .step_by(12)
        .map(|(la, li)| YearlySnapshot {
            year: la.month / 12,
            date: la.date,
            lead_acid: la.total,
            lithium: li.total,
            difference: la.total - li.total,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ProjectionInputs;
    use crate::projection::ProjectionEngine;

    fn start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    fn default_projection() -> Projection {
        ProjectionEngine::default()
            .run(&ProjectionInputs::default(), start())
            .unwrap()
    }

    fn points(totals: &[f64]) -> Vec<CumulativePoint> {
        totals
            .iter()
            .enumerate()
            .map(|(n, &total)| CumulativePoint {
                month: n as u32,
                date: crate::projection::month_date(start(), n as u32),
                total,
            })
            .collect()
    }

    #[test]
    fn test_break_even_found() {
        let la = points(&[100.0, 110.0, 120.0, 130.0]);
        let li = points(&[150.0, 140.0, 120.0, 100.0]);
        let be = find_break_even(&la, &li).unwrap();
        assert_eq!(be.month, 2);
        assert_eq!(be.date, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
    }

    #[test]
    fn test_break_even_none_when_lithium_never_above() {
        let la = points(&[200.0, 210.0, 220.0]);
        let li = points(&[150.0, 155.0, 160.0]);
        assert!(find_break_even(&la, &li).is_none());
    }

    #[test]
    fn test_break_even_none_when_never_catches_up() {
        let la = points(&[100.0, 101.0, 102.0]);
        let li = points(&[150.0, 151.0, 152.0]);
        assert!(find_break_even(&la, &li).is_none());
    }

    #[test]
    fn test_break_even_empty() {
        assert!(find_break_even(&[], &[]).is_none());
    }

    #[test]
    fn test_default_summary_lithium_cheaper_over_ten_years() {
        let projection = default_projection();
        let summary = ProjectionSummary::from_projection(&projection, &DisplayWindow::new(10).unwrap());
        assert_eq!(summary.display_years, 10);
        assert_eq!(summary.end_date, NaiveDate::from_ymd_opt(2033, 12, 1).unwrap());
        assert_eq!(summary.cheaper, Some(Technology::Lithium));
        assert!(summary.savings > 0.0);
        assert_eq!(summary.lead_acid_purchases, 3);
        assert_eq!(summary.lithium_purchases, 2);
        assert!(summary.break_even.is_some());
    }

    #[test]
    fn test_default_break_even_early_in_second_year() {
        // Lithium starts ~125 above; the month 12 maintenance visit leaves a
        // gap of ~6.7 that the 30% electricity saving closes by month 14.
        let projection = default_projection();
        let summary = ProjectionSummary::from_projection(&projection, &DisplayWindow::new(5).unwrap());
        let be = summary.break_even.unwrap();
        assert_eq!(be.month, 14);
        assert_eq!(be.date, NaiveDate::from_ymd_opt(2025, 3, 1).unwrap());
    }

    #[test]
    fn test_summary_totals_match_series() {
        let projection = default_projection();
        let window = DisplayWindow::new(20).unwrap();
        let summary = ProjectionSummary::from_projection(&projection, &window);
        assert_eq!(summary.lead_acid_total, projection.lead_acid.points[239].total);
        assert_eq!(summary.lithium_total, projection.lithium.points[239].total);
        assert_eq!(summary.savings, summary.lead_acid_total - summary.lithium_total);
    }

    #[test]
    fn test_yearly_snapshots() {
        let projection = default_projection();
        let snaps = yearly_snapshots(&projection, &DisplayWindow::new(10).unwrap());
        assert_eq!(snaps.len(), 10);
        assert_eq!(snaps[0].year, 0);
        assert_eq!(snaps[9].year, 9);
        assert_eq!(snaps[1].date, NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
        assert_eq!(snaps[1].lead_acid, projection.lead_acid.points[12].total);
        assert_eq!(snaps[1].difference, snaps[1].lead_acid - snaps[1].lithium);
    }

    #[test]
    fn test_summary_json_roundtrip() {
        let projection = default_projection();
        let summary = ProjectionSummary::from_projection(&projection, &DisplayWindow::default());
        let json = serde_json::to_string(&summary).unwrap();
        let back: ProjectionSummary = serde_json::from_str(&json).unwrap();
        assert_eq!(back.cheaper, summary.cheaper);
        assert_eq!(back.break_even, summary.break_even);
    }
}
