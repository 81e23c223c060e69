use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::params::Technology;

/// Cost components booked in a single month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyCost {
    /// Months since the start date
    pub month: u32,
    pub date: NaiveDate,
    pub purchase: f64,
    pub maintenance: f64,
    /// Zero or negative: value recovered from the retired unit
    pub salvage: f64,
    pub electricity: f64,
}

impl MonthlyCost {
    /// Net cost of the month.
    pub fn total(&self) -> f64 {
        self.purchase + self.maintenance + self.salvage + self.electricity
    }

    pub fn is_replacement(&self) -> bool {
        self.month != 0 && self.purchase != 0.0
    }
}

/// Month-by-month cost breakdown for one technology.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyLedger {
    pub technology: Technology,
    pub start_date: NaiveDate,
    pub entries: Vec<MonthlyCost>,
}

impl MonthlyLedger {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, month: usize) -> Option<&MonthlyCost> {
        self.entries.get(month)
    }

    pub fn iter(&self) -> impl Iterator<Item = &MonthlyCost> {
        self.entries.iter()
    }

    /// Months in which a unit is bought.
    pub fn purchase_months(&self) -> Vec<u32> {
        self.months_where(|e| e.purchase != 0.0)
    }

    pub fn maintenance_months(&self) -> Vec<u32> {
        self.months_where(|e| e.maintenance != 0.0)
    }

    pub fn salvage_months(&self) -> Vec<u32> {
        self.months_where(|e| e.salvage != 0.0)
    }

    /// Sum of every month's net cost.
    pub fn total_cost(&self) -> f64 {
        self.entries.iter().map(MonthlyCost::total).sum()
    }

    fn months_where(&self, pred: impl Fn(&MonthlyCost) -> bool) -> Vec<u32> {
        self.entries
            .iter()
            .filter(|e| pred(e))
            .map(|e| e.month)
            .collect()
    }
}
