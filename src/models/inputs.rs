use serde::{Deserialize, Serialize};

use super::config::{DisplayWindow, ProjectionConfig, MAX_DISPLAY_YEARS, MIN_DISPLAY_YEARS};
use super::interval::MonthInterval;
use super::params::{LeadAcidParameters, LithiumParameters};
use crate::error::ProjectionError;

const MIN_AMOUNT: f64 = 0.01;
const MIN_LIFESPAN_YEARS: u32 = 1;
const MAX_LIFESPAN_YEARS: u32 = 20;
const MIN_MAINTENANCE_INTERVAL_YEARS: f64 = 0.1;
const MIN_EFFICIENCY_FACTOR: f64 = -0.99;
const MAX_EFFICIENCY_FACTOR: f64 = 0.0;
const MIN_USAGE_KWH: f64 = 0.1;

/// A single problem found while checking user inputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationIssue {
    /// Dotted path of the offending field, e.g. `lead_acid.lifespan_years`
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LeadAcidInputs {
    pub price_usd: f64,
    pub lifespan_years: u32,
    /// Years between maintenance visits, in 0.1 steps
    pub maintenance_interval_years: f64,
    /// Per visit, in Turkish lira
    pub maintenance_cost_try: f64,
    pub salvage_value_usd: f64,
}

impl Default for LeadAcidInputs {
    fn default() -> Self {
        Self {
            price_usd: 1400.0,
            lifespan_years: 4,
            maintenance_interval_years: 1.0,
            maintenance_cost_try: 2000.0,
            salvage_value_usd: 150.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LithiumInputs {
    pub price_usd: f64,
    pub lifespan_years: u32,
    /// Energy use relative to lead-acid; -0.3 means 30% less
    pub efficiency_factor: f64,
}

impl Default for LithiumInputs {
    fn default() -> Self {
        Self {
            price_usd: 1600.0,
            lifespan_years: 8,
            efficiency_factor: -0.3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ElectricityInputs {
    pub price_try_per_kwh: f64,
    /// Monthly consumption of a machine running on lead-acid
    pub usage_kwh_per_month: f64,
}

impl Default for ElectricityInputs {
    fn default() -> Self {
        Self {
            price_try_per_kwh: 4.53,
            usage_kwh_per_month: 80.0,
        }
    }
}

/// Everything a user sets before a projection is run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectionInputs {
    pub lead_acid: LeadAcidInputs,
    pub lithium: LithiumInputs,
    pub electricity: ElectricityInputs,
    /// Years shown; the projection itself always spans the full horizon
    pub display_years: u32,
}

impl Default for ProjectionInputs {
    fn default() -> Self {
        Self {
            lead_acid: LeadAcidInputs::default(),
            lithium: LithiumInputs::default(),
            electricity: ElectricityInputs::default(),
            display_years: DisplayWindow::default().years(),
        }
    }
}

impl ProjectionInputs {
    /// Check every field against its accepted range and report all problems.
    pub fn validate_all(&self) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();
        let mut push = |field: &str, message: String| {
            issues.push(ValidationIssue {
                field: field.to_string(),
                message,
            });
        };

        let la = &self.lead_acid;
        if !at_least(la.price_usd, MIN_AMOUNT) {
            push("lead_acid.price_usd", min_message(la.price_usd, MIN_AMOUNT));
        }
        if !(MIN_LIFESPAN_YEARS..=MAX_LIFESPAN_YEARS).contains(&la.lifespan_years) {
            push("lead_acid.lifespan_years", lifespan_message(la.lifespan_years));
        }
        if !at_least(la.maintenance_interval_years, MIN_MAINTENANCE_INTERVAL_YEARS)
            || MonthInterval::from_years(la.maintenance_interval_years).is_none()
        {
            push(
                "lead_acid.maintenance_interval_years",
                min_message(la.maintenance_interval_years, MIN_MAINTENANCE_INTERVAL_YEARS),
            );
        }
        if !at_least(la.maintenance_cost_try, MIN_AMOUNT) {
            push(
                "lead_acid.maintenance_cost_try",
                min_message(la.maintenance_cost_try, MIN_AMOUNT),
            );
        }
        if !at_least(la.salvage_value_usd, MIN_AMOUNT) {
            push(
                "lead_acid.salvage_value_usd",
                min_message(la.salvage_value_usd, MIN_AMOUNT),
            );
        }

        let li = &self.lithium;
        if !at_least(li.price_usd, MIN_AMOUNT) {
            push("lithium.price_usd", min_message(li.price_usd, MIN_AMOUNT));
        }
        if !(MIN_LIFESPAN_YEARS..=MAX_LIFESPAN_YEARS).contains(&li.lifespan_years) {
            push("lithium.lifespan_years", lifespan_message(li.lifespan_years));
        }
        if !(MIN_EFFICIENCY_FACTOR..=MAX_EFFICIENCY_FACTOR).contains(&li.efficiency_factor) {
            push(
                "lithium.efficiency_factor",
                format!(
                    "must be between {MIN_EFFICIENCY_FACTOR} and {MAX_EFFICIENCY_FACTOR}, got {}",
                    li.efficiency_factor
                ),
            );
        }

        let el = &self.electricity;
        if !at_least(el.price_try_per_kwh, MIN_AMOUNT) {
            push(
                "electricity.price_try_per_kwh",
                min_message(el.price_try_per_kwh, MIN_AMOUNT),
            );
        }
        if !at_least(el.usage_kwh_per_month, MIN_USAGE_KWH) {
            push(
                "electricity.usage_kwh_per_month",
                min_message(el.usage_kwh_per_month, MIN_USAGE_KWH),
            );
        }

        if !(MIN_DISPLAY_YEARS..=MAX_DISPLAY_YEARS).contains(&self.display_years) {
            push(
                "display_years",
                format!(
                    "must be between {MIN_DISPLAY_YEARS} and {MAX_DISPLAY_YEARS}, got {}",
                    self.display_years
                ),
            );
        }

        issues
    }

    /// Validate inputs. Returns the first problem as `ProjectionError::ValidationError`.
    pub fn validate(&self) -> Result<(), ProjectionError> {
        match self.validate_all().into_iter().next() {
            Some(issue) => Err(ProjectionError::ValidationError(issue.to_string())),
            None => Ok(()),
        }
    }

    pub fn display_window(&self) -> Result<DisplayWindow, ProjectionError> {
        DisplayWindow::new(self.display_years)
    }

    /// Electricity cost per month for lead-acid, in the purchase currency.
    pub fn baseline_electricity_cost(&self, config: &ProjectionConfig) -> f64 {
        self.electricity.price_try_per_kwh
            * config.conversion_rate
            * self.electricity.usage_kwh_per_month
    }

    /// Convert validated inputs into engine parameters for both technologies.
    pub fn to_parameters(
        &self,
        config: &ProjectionConfig,
    ) -> Result<(LeadAcidParameters, LithiumParameters), ProjectionError> {
        config.validate()?;
        self.validate()?;

        let maintenance_interval = MonthInterval::from_years(
            self.lead_acid.maintenance_interval_years,
        )
        .ok_or_else(|| {
            ProjectionError::ValidationError(format!(
                "lead_acid.maintenance_interval_years: cannot express {} years in months",
                self.lead_acid.maintenance_interval_years
            ))
        })?;

        let electricity = self.baseline_electricity_cost(config);

        let lead_acid = LeadAcidParameters {
            purchase_price: self.lead_acid.price_usd,
            lifespan_months: self.lead_acid.lifespan_years * 12,
            maintenance_interval,
            maintenance_cost: self.lead_acid.maintenance_cost_try * config.conversion_rate,
            salvage_value: self.lead_acid.salvage_value_usd,
            monthly_electricity_cost: electricity,
        };
        let lithium = LithiumParameters {
            purchase_price: self.lithium.price_usd,
            lifespan_months: self.lithium.lifespan_years * 12,
            monthly_electricity_cost: electricity * (1.0 + self.lithium.efficiency_factor),
        };

        if lead_acid.salvage_value > lead_acid.purchase_price {
            tracing::warn!(
                salvage = lead_acid.salvage_value,
                price = lead_acid.purchase_price,
                "lead-acid salvage value exceeds purchase price"
            );
        }

        Ok((lead_acid, lithium))
    }
}

fn at_least(value: f64, min: f64) -> bool {
    value.is_finite() && value >= min
}

fn min_message(value: f64, min: f64) -> String {
    format!("must be at least {min}, got {value}")
}

fn lifespan_message(years: u32) -> String {
    format!("must be between {MIN_LIFESPAN_YEARS} and {MAX_LIFESPAN_YEARS} years, got {years}")
}
