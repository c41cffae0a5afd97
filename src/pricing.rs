//! Lesson pricing
//!
//! Prices are whole rubles. The rate table is fixed:
//! - group: 590 ₽ per hour
//! - individual: 790 ₽ per hour
//!
//! Input coming from the booking form is never rejected here. An unknown plan
//! is priced as a group lesson and a non-positive or unparseable hour count
//! becomes a single hour.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Group lesson rate, ₽ per hour
pub const GROUP_RATE: i64 = 590;
/// Individual lesson rate, ₽ per hour
pub const INDIVIDUAL_RATE: i64 = 790;

/// Smallest billable number of hours
pub const MIN_HOURS: i64 = 1;

/// A named pricing tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Plan {
    #[default]
    Group,
    Individual,
}

impl Plan {
    pub const ALL: [Plan; 2] = [Plan::Group, Plan::Individual];

    /// Hourly rate for this plan
    pub fn rate(self) -> i64 {
        match self {
            Self::Group => GROUP_RATE,
            Self::Individual => INDIVIDUAL_RATE,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Group => "group",
            Self::Individual => "individual",
        }
    }

    /// Parse a plan as submitted by a client.
    ///
    /// Anything that is not a recognized identifier, including a missing value,
    /// falls back to [`Plan::Group`].
    pub fn from_form(raw: Option<&str>) -> Self {
        raw.and_then(|s| s.parse().ok()).unwrap_or_default()
    }
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for strict plan parsing
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown plan: {0}")]
pub struct UnknownPlan(pub String);

impl FromStr for Plan {
    type Err = UnknownPlan;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "group" => Ok(Self::Group),
            "individual" => Ok(Self::Individual),
            other => Err(UnknownPlan(other.to_string())),
        }
    }
}

/// Clamp an hour count to the billable minimum
pub fn clamp_hours(hours: i64) -> i64 {
    hours.max(MIN_HOURS)
}

/// Coerce a raw form value into a billable hour count.
///
/// Missing, empty or non-integer input (including values outside `i64`)
/// yields [`MIN_HOURS`]. Surrounding whitespace is ignored.
pub fn coerce_hours(raw: Option<&str>) -> i64 {
    let parsed = raw
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .and_then(|s| s.parse::<i64>().ok())
        .unwrap_or(MIN_HOURS);

    clamp_hours(parsed)
}

/// Total price for a typed plan
pub fn price_for(plan: Plan, hours: i64) -> i64 {
    plan.rate().saturating_mul(clamp_hours(hours))
}

/// Total price for a plan identifier as received from a client
pub fn calculate_price(plan: &str, hours: i64) -> i64 {
    price_for(Plan::from_form(Some(plan)), hours)
}

/// A priced request, as shown by the live calculator
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Quote {
    pub plan: Plan,
    pub rate: i64,
    pub hours: i64,
    pub total: i64,
}

/// Price a raw (plan, hours) pair from a query string or form
pub fn quote(plan: Option<&str>, hours: Option<&str>) -> Quote {
    let plan = Plan::from_form(plan);
    let hours = coerce_hours(hours);

    Quote {
        plan,
        rate: plan.rate(),
        hours,
        total: price_for(plan, hours),
    }
}

/// One fixed-point pricing check, used by the `test` command
#[derive(Debug, Clone)]
pub struct PriceCheck {
    pub plan: &'static str,
    pub hours: i64,
    pub expected: i64,
}

impl PriceCheck {
    pub fn actual(&self) -> i64 {
        calculate_price(self.plan, self.hours)
    }

    pub fn passed(&self) -> bool {
        self.actual() == self.expected
    }
}

/// Reference prices every build must reproduce
pub fn reference_checks() -> Vec<PriceCheck> {
    vec![
        PriceCheck { plan: "group", hours: 1, expected: 590 },
        PriceCheck { plan: "individual", hours: 1, expected: 790 },
        PriceCheck { plan: "group", hours: 8, expected: 4720 },
        PriceCheck { plan: "individual", hours: 16, expected: 12640 },
        PriceCheck { plan: "group", hours: 0, expected: 590 },
        PriceCheck { plan: "individual", hours: -3, expected: 790 },
        PriceCheck { plan: "premium", hours: 2, expected: 1180 },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_prices() {
        assert_eq!(calculate_price("group", 1), 590);
        assert_eq!(calculate_price("individual", 1), 790);
        assert_eq!(calculate_price("group", 8), 4720);
        assert_eq!(calculate_price("individual", 16), 12640);
    }

    #[test]
    fn test_price_is_rate_times_hours() {
        for plan in Plan::ALL {
            for hours in 1..=40 {
                assert_eq!(calculate_price(plan.as_str(), hours), plan.rate() * hours);
            }
        }
    }

    #[test]
    fn test_non_positive_hours_bill_one_hour() {
        for plan in Plan::ALL {
            for hours in [0, -1, -16, i64::MIN] {
                assert_eq!(price_for(plan, hours), plan.rate());
            }
        }
    }

    #[test]
    fn test_unknown_plan_uses_group_rate() {
        for unknown in ["", "Group", "INDIVIDUAL", "premium", " group"] {
            for hours in [1, 3, 12] {
                assert_eq!(calculate_price(unknown, hours), GROUP_RATE * hours);
            }
        }
    }

    #[test]
    fn test_price_saturates() {
        assert_eq!(price_for(Plan::Individual, i64::MAX), i64::MAX);
    }

    #[test]
    fn test_coerce_hours() {
        assert_eq!(coerce_hours(None), 1);
        assert_eq!(coerce_hours(Some("")), 1);
        assert_eq!(coerce_hours(Some("   ")), 1);
        assert_eq!(coerce_hours(Some("abc")), 1);
        assert_eq!(coerce_hours(Some("2.5")), 1);
        assert_eq!(coerce_hours(Some("0")), 1);
        assert_eq!(coerce_hours(Some("-4")), 1);
        assert_eq!(coerce_hours(Some(" 3 ")), 3);
        assert_eq!(coerce_hours(Some("16")), 16);
        assert_eq!(coerce_hours(Some("99999999999999999999999")), 1);
    }

    #[test]
    fn test_plan_parsing() {
        assert_eq!("group".parse::<Plan>(), Ok(Plan::Group));
        assert_eq!("individual".parse::<Plan>(), Ok(Plan::Individual));
        assert!("vip".parse::<Plan>().is_err());

        assert_eq!(Plan::from_form(None), Plan::Group);
        assert_eq!(Plan::from_form(Some("individual")), Plan::Individual);
        assert_eq!(Plan::from_form(Some("vip")), Plan::Group);
    }

    #[test]
    fn test_quote() {
        let q = quote(Some("individual"), Some("0"));
        assert_eq!(q.plan, Plan::Individual);
        assert_eq!(q.rate, 790);
        assert_eq!(q.hours, 1);
        assert_eq!(q.total, 790);

        let q = quote(None, Some("8"));
        assert_eq!(q.plan, Plan::Group);
        assert_eq!(q.total, 4720);
    }

    #[test]
    fn test_reference_checks_pass() {
        for check in reference_checks() {
            assert!(check.passed(), "{} x {} expected {}", check.plan, check.hours, check.expected);
        }
    }
}
