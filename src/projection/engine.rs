use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::ProjectionError;
use crate::models::{
    CumulativePoint, CumulativeSeries, DisplayWindow, LeadAcidParameters, LithiumParameters,
    MonthlyCost, MonthlyLedger, ProjectionConfig, ProjectionInputs, ProjectionParameters,
    Technology,
};

/// Both technologies projected over the same months from the same start date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projection {
    pub start_date: NaiveDate,
    pub horizon_months: u32,
    pub lead_acid_ledger: MonthlyLedger,
    pub lithium_ledger: MonthlyLedger,
    pub lead_acid: CumulativeSeries,
    pub lithium: CumulativeSeries,
}

impl Projection {
    pub fn ledger(&self, technology: Technology) -> &MonthlyLedger {
        match technology {
            Technology::LeadAcid => &self.lead_acid_ledger,
            Technology::Lithium => &self.lithium_ledger,
        }
    }

    pub fn series(&self, technology: Technology) -> &CumulativeSeries {
        match technology {
            Technology::LeadAcid => &self.lead_acid,
            Technology::Lithium => &self.lithium,
        }
    }

    /// Number of leading months that fall inside `window`.
    pub fn window_len(&self, window: &DisplayWindow) -> usize {
        self.lead_acid.within(window).len()
    }

    /// Calendar month of every record.
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.lead_acid.points.iter().map(|p| p.date)
    }
}

/// Calendar date `months` after `start_date`, clamped to the month's last day.
///
/// # Panics
///
/// Panics if the date falls outside chrono's representable range.
pub fn month_date(start_date: NaiveDate, months: u32) -> NaiveDate {
    start_date
        .checked_add_months(Months::new(months))
        .unwrap_or_else(|| panic!("{start_date} + {months} months is not a representable date"))
}

/// Check that every month of a `horizon_months` projection from
/// `start_date` has a calendar date.
pub fn validate_start_date(start_date: NaiveDate, horizon_months: u32) -> Result<(), ProjectionError> {
    let last = horizon_months.saturating_sub(1);
    match start_date.checked_add_months(Months::new(last)) {
        Some(_) => Ok(()),
        None => Err(ProjectionError::ValidationError(format!(
            "start_date: {start_date} + {last} months is past the last representable date"
        ))),
    }
}

/// Lay out one technology's costs month by month for `horizon_months` months.
///
/// Month `n` books a purchase when `n` is a multiple of the lifespan, a
/// maintenance visit when `n` is a multiple of the maintenance interval, a
/// salvage credit at every purchase except the first, and electricity always.
///
/// # Panics
///
/// Panics on a zero horizon or lifespan; callers validate inputs first.
pub fn build_monthly_ledger(
    params: &ProjectionParameters,
    horizon_months: u32,
    start_date: NaiveDate,
) -> MonthlyLedger {
    assert!(horizon_months > 0, "projection horizon must be at least one month");
    let lifespan = params.lifespan_months();
    assert!(lifespan > 0, "battery lifespan must be at least one month");

    let price = params.purchase_price();
    let maintenance = params.maintenance();
    let salvage_value = params.salvage_value();
    let electricity = params.monthly_electricity_cost();

    let entries: Vec<MonthlyCost> = (0..horizon_months)
        .map(|n| {
            let replacement_due = n % lifespan == 0;
            MonthlyCost {
                month: n,
                date: month_date(start_date, n),
                purchase: if replacement_due { price } else { 0.0 },
                maintenance: match maintenance {
                    Some((interval, cost)) if interval.is_due(n) => cost,
                    _ => 0.0,
                },
                salvage: if replacement_due && n != 0 && salvage_value != 0.0 {
                    -salvage_value
                } else {
                    0.0
                },
                electricity,
            }
        })
        .collect();

    let ledger = MonthlyLedger {
        technology: params.technology(),
        start_date,
        entries,
    };

    tracing::debug!(
        technology = %ledger.technology,
        months = ledger.len(),
        purchases = ledger.purchase_months().len(),
        maintenance_visits = ledger.maintenance_months().len(),
        "built monthly ledger"
    );

    ledger
}

/// Running total of each month's net cost.
pub fn to_cumulative_series(ledger: &MonthlyLedger) -> CumulativeSeries {
    let points = ledger
        .entries
        .iter()
        .scan(0.0, |running, entry| {
            *running += entry.total();
            Some(CumulativePoint {
                month: entry.month,
                date: entry.date,
                total: *running,
            })
        })
        .collect();

    CumulativeSeries {
        technology: ledger.technology,
        start_date: ledger.start_date,
        points,
    }
}

/// Project both technologies over the same horizon and date axis.
pub fn project(
    lead_acid: &LeadAcidParameters,
    lithium: &LithiumParameters,
    horizon_months: u32,
    start_date: NaiveDate,
) -> Projection {
    let lead_acid_ledger = build_monthly_ledger(
        &ProjectionParameters::LeadAcid(lead_acid.clone()),
        horizon_months,
        start_date,
    );
    let lithium_ledger = build_monthly_ledger(
        &ProjectionParameters::Lithium(lithium.clone()),
        horizon_months,
        start_date,
    );
    let lead_acid_series = to_cumulative_series(&lead_acid_ledger);
    let lithium_series = to_cumulative_series(&lithium_ledger);

    Projection {
        start_date,
        horizon_months,
        lead_acid_ledger,
        lithium_ledger,
        lead_acid: lead_acid_series,
        lithium: lithium_series,
    }
}

/// Recomputes a full projection from raw inputs on every call.
#[derive(Debug, Clone, Default)]
pub struct ProjectionEngine {
    config: ProjectionConfig,
}

impl ProjectionEngine {
    pub fn new(config: ProjectionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ProjectionConfig {
        &self.config
    }

    /// Validate `inputs`, convert them and project from `start_date`.
    pub fn run(
        &self,
        inputs: &ProjectionInputs,
        start_date: NaiveDate,
    ) -> Result<Projection, ProjectionError> {
        let (lead_acid, lithium) = inputs.to_parameters(&self.config)?;
        validate_start_date(start_date, self.config.horizon_months())?;
        Ok(project(
            &lead_acid,
            &lithium,
            self.config.horizon_months(),
            start_date,
        ))
    }
}
