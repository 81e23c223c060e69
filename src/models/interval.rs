use serde::{Deserialize, Serialize};

/// Tenths of a year are the finest maintenance cadence the inputs accept.
const TENTHS_PER_YEAR: u32 = 10;
const MONTHS_PER_YEAR: u32 = 12;

/// A strictly positive, possibly fractional, number of months between
/// recurring events, stored as a reduced fraction `numerator / denominator`.
///
/// Month `n` is an event month when `n mod (numerator / denominator) == 0`,
/// which over integers is `n * denominator % numerator == 0`. Keeping the
/// interval rational avoids the float remainder noise of `n % 1.2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawInterval")]
pub struct MonthInterval {
    numerator: u32,
    denominator: u32,
}

#[derive(Deserialize)]
struct RawInterval {
    numerator: u32,
    denominator: u32,
}

impl TryFrom<RawInterval> for MonthInterval {
    type Error = String;

    fn try_from(raw: RawInterval) -> Result<Self, Self::Error> {
        if raw.numerator == 0 || raw.denominator == 0 {
            return Err(format!(
                "month interval {}/{} must be positive",
                raw.numerator, raw.denominator
            ));
        }
        Ok(Self::new(raw.numerator, raw.denominator))
    }
}

impl MonthInterval {
    /// Build an interval of `numerator / denominator` months.
    ///
    /// # Panics
    ///
    /// Panics if either part is zero; a zero-length cadence has no meaning.
    pub fn new(numerator: u32, denominator: u32) -> Self {
        assert!(numerator > 0, "month interval must be positive");
        assert!(denominator > 0, "month interval denominator must be positive");
        let g = gcd(numerator, denominator);
        Self {
            numerator: numerator / g,
            denominator: denominator / g,
        }
    }

    /// A whole number of months.
    pub fn from_months(months: u32) -> Self {
        Self::new(months, 1)
    }

    /// Convert a year count to months, rounded to the nearest tenth of a year.
    ///
    /// Returns `None` when the value is not finite, rounds to zero, or is
    /// too large to represent.
    pub fn from_years(years: f64) -> Option<Self> {
        if !years.is_finite() {
            return None;
        }
        let tenths = (years * TENTHS_PER_YEAR as f64).round();
        if tenths < 1.0 || tenths > (u32::MAX / MONTHS_PER_YEAR) as f64 {
            return None;
        }
        Some(Self::new(tenths as u32 * MONTHS_PER_YEAR, TENTHS_PER_YEAR))
    }

    pub fn numerator(&self) -> u32 {
        self.numerator
    }

    pub fn denominator(&self) -> u32 {
        self.denominator
    }

    /// Interval length in (possibly fractional) months.
    pub fn months(&self) -> f64 {
        self.numerator as f64 / self.denominator as f64
    }

    /// Whether an event falls on month `month`.
    pub fn is_due(&self, month: u32) -> bool {
        (month as u64 * self.denominator as u64) % self.numerator as u64 == 0
    }

    /// Number of event months in `[0, horizon_months)`.
    pub fn occurrences(&self, horizon_months: u32) -> usize {
        (0..horizon_months).filter(|&n| self.is_due(n)).count()
    }
}

impl std::fmt::Display for MonthInterval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.denominator == 1 {
            write!(f, "{} months", self.numerator)
        } else {
            write!(f, "{}/{} months", self.numerator, self.denominator)
        }
    }
}

fn gcd(mut a: u32, mut b: u32) -> u32 {
    while b != 0 {
        let r = a % b;
        a = b;
        b = r;
    }
    a
}
