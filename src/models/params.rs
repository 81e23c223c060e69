use serde::{Deserialize, Serialize};

use super::interval::MonthInterval;

/// Battery technology being costed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Technology {
    LeadAcid,
    Lithium,
}

impl Technology {
    /// Short identifier used in file columns and URLs.
    pub fn slug(&self) -> &'static str {
        match self {
            Technology::LeadAcid => "lead_acid",
            Technology::Lithium => "lithium",
        }
    }
}

impl std::fmt::Display for Technology {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Technology::LeadAcid => write!(f, "Lead-Acid"),
            Technology::Lithium => write!(f, "Lithium"),
        }
    }
}

impl std::str::FromStr for Technology {
    type Err = crate::error::ProjectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "lead-acid" | "lead_acid" | "leadacid" | "lead" | "pb" => Ok(Technology::LeadAcid),
            "lithium" | "li" | "li-ion" => Ok(Technology::Lithium),
            _ => Err(crate::error::ProjectionError::ParseError(format!(
                "Unknown battery technology: '{s}'"
            ))),
        }
    }
}

/// Cost parameters for a lead-acid battery, all in the purchase currency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeadAcidParameters {
    pub purchase_price: f64,
    /// Months between replacements
    pub lifespan_months: u32,
    pub maintenance_interval: MonthInterval,
    /// Cost of one maintenance event, already converted
    pub maintenance_cost: f64,
    /// Recovered at every replacement after the first purchase
    pub salvage_value: f64,
    pub monthly_electricity_cost: f64,
}

/// Cost parameters for a lithium battery, all in the purchase currency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LithiumParameters {
    pub purchase_price: f64,
    /// Months between replacements
    pub lifespan_months: u32,
    /// Baseline electricity cost already scaled by the efficiency factor
    pub monthly_electricity_cost: f64,
}

/// Parameters of one technology, as fed to the projection engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "technology", rename_all = "kebab-case")]
pub enum ProjectionParameters {
    LeadAcid(LeadAcidParameters),
    Lithium(LithiumParameters),
}

impl ProjectionParameters {
    pub fn technology(&self) -> Technology {
        match self {
            ProjectionParameters::LeadAcid(_) => Technology::LeadAcid,
            ProjectionParameters::Lithium(_) => Technology::Lithium,
        }
    }

    pub fn purchase_price(&self) -> f64 {
        match self {
            ProjectionParameters::LeadAcid(p) => p.purchase_price,
            ProjectionParameters::Lithium(p) => p.purchase_price,
        }
    }

    pub fn lifespan_months(&self) -> u32 {
        match self {
            ProjectionParameters::LeadAcid(p) => p.lifespan_months,
            ProjectionParameters::Lithium(p) => p.lifespan_months,
        }
    }

    /// Maintenance cadence and per-event cost, if the technology needs any.
    pub fn maintenance(&self) -> Option<(MonthInterval, f64)> {
        match self {
            ProjectionParameters::LeadAcid(p) => Some((p.maintenance_interval, p.maintenance_cost)),
            ProjectionParameters::Lithium(_) => None,
        }
    }

    /// Value recovered at each replacement; zero for lithium.
    pub fn salvage_value(&self) -> f64 {
        match self {
            ProjectionParameters::LeadAcid(p) => p.salvage_value,
            ProjectionParameters::Lithium(_) => 0.0,
        }
    }

    pub fn monthly_electricity_cost(&self) -> f64 {
        match self {
            ProjectionParameters::LeadAcid(p) => p.monthly_electricity_cost,
            ProjectionParameters::Lithium(p) => p.monthly_electricity_cost,
        }
    }
}

impl From<LeadAcidParameters> for ProjectionParameters {
    fn from(p: LeadAcidParameters) -> Self {
        ProjectionParameters::LeadAcid(p)
    }
}

impl From<LithiumParameters> for ProjectionParameters {
    fn from(p: LithiumParameters) -> Self {
        ProjectionParameters::Lithium(p)
    }
}
