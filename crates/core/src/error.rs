//! Errors produced by the resolution engine at read time.
//!
//! Configuration-time problems are reported as `RuleViolation` lists by
//! the validator in `rules`, never through this type.

use std::fmt;

use crate::weekday::WeekdaySet;

/// Errors that can occur while resolving delivery rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// A non-unconstrained weekday set produced no match within a 7-day
    /// scan. Unreachable for validated rules; fails loudly rather than
    /// loop or return a stale date.
    ScanExhausted { days: WeekdaySet },
    /// Date arithmetic stepped past the supported calendar range.
    DateOutOfRange { date: time::Date },
}

impl fmt::Display for ResolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolveError::ScanExhausted { days } => {
                write!(
                    f,
                    "no allowed day found in a 7-day scan (allowed: {})",
                    days.tokens().join(", ")
                )
            }
            ResolveError::DateOutOfRange { date } => {
                write!(f, "date arithmetic out of range past {}", date)
            }
        }
    }
}

impl std::error::Error for ResolveError {}
