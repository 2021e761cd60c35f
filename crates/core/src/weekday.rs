//! Weekday identity and the weekday constraint set.
//!
//! A `Weekday` is one of the seven calendar days, identified independently
//! of display locale. The boundary serialization is the lowercase French
//! day name ("lundi".."dimanche"); internal identity never depends on
//! spelling. Unknown tokens are rejected once, at the boundary.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use time::Date;

use crate::error::ResolveError;

/// One of the seven calendar days.
///
/// Ordering is Monday-first, matching the boundary convention of the
/// administrative forms that produce weekday lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Weekday {
    #[serde(rename = "lundi")]
    Monday,
    #[serde(rename = "mardi")]
    Tuesday,
    #[serde(rename = "mercredi")]
    Wednesday,
    #[serde(rename = "jeudi")]
    Thursday,
    #[serde(rename = "vendredi")]
    Friday,
    #[serde(rename = "samedi")]
    Saturday,
    #[serde(rename = "dimanche")]
    Sunday,
}

impl Weekday {
    /// All seven days, Monday first.
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    /// The lowercase French boundary token for this day.
    pub fn token(&self) -> &'static str {
        match self {
            Weekday::Monday => "lundi",
            Weekday::Tuesday => "mardi",
            Weekday::Wednesday => "mercredi",
            Weekday::Thursday => "jeudi",
            Weekday::Friday => "vendredi",
            Weekday::Saturday => "samedi",
            Weekday::Sunday => "dimanche",
        }
    }

    /// Parse a boundary token. Returns `None` for anything that is not
    /// one of the seven recognized identifiers (case-sensitive).
    pub fn parse(token: &str) -> Option<Weekday> {
        Weekday::ALL.iter().copied().find(|d| d.token() == token)
    }
}

impl From<time::Weekday> for Weekday {
    fn from(wd: time::Weekday) -> Self {
        match wd {
            time::Weekday::Monday => Weekday::Monday,
            time::Weekday::Tuesday => Weekday::Tuesday,
            time::Weekday::Wednesday => Weekday::Wednesday,
            time::Weekday::Thursday => Weekday::Thursday,
            time::Weekday::Friday => Weekday::Friday,
            time::Weekday::Saturday => Weekday::Saturday,
            time::Weekday::Sunday => Weekday::Sunday,
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// A set-valued predicate over the seven weekdays.
///
/// The empty set means "unconstrained": every day is allowed. This is the
/// convention of the rules records, where an administrator who ticks no
/// boxes has expressed no constraint.
///
/// Backed by a `BTreeSet` so iteration order (and therefore every
/// serialized or rendered form) is deterministic, Monday first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeekdaySet(BTreeSet<Weekday>);

impl WeekdaySet {
    /// The empty (unconstrained) set.
    pub fn new() -> Self {
        WeekdaySet(BTreeSet::new())
    }

    /// True when the set is empty, i.e. every day is allowed.
    pub fn is_unconstrained(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, day: Weekday) -> bool {
        self.0.contains(&day)
    }

    /// Insert a day. Returns false when the day was already present.
    pub fn insert(&mut self, day: Weekday) -> bool {
        self.0.insert(day)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate the days in Monday-first order.
    pub fn iter(&self) -> impl Iterator<Item = Weekday> + '_ {
        self.0.iter().copied()
    }

    /// The boundary tokens of the contained days, Monday-first.
    pub fn tokens(&self) -> Vec<String> {
        self.0.iter().map(|d| d.token().to_owned()).collect()
    }

    /// The first date on or after `date` whose weekday is allowed.
    ///
    /// An unconstrained set returns `date` unchanged. Otherwise the scan
    /// covers at most 7 calendar days, inclusive of `date`; a non-empty
    /// set always matches within that window, so `ScanExhausted` is a
    /// defensive failure that must never be papered over with a default
    /// date. Stepping past the calendar range yields `DateOutOfRange`.
    pub fn next_allowed_on_or_after(&self, date: Date) -> Result<Date, ResolveError> {
        if self.is_unconstrained() {
            return Ok(date);
        }
        let mut candidate = date;
        for _ in 0..7 {
            if self.contains(Weekday::from(candidate.weekday())) {
                return Ok(candidate);
            }
            candidate = candidate
                .next_day()
                .ok_or(ResolveError::DateOutOfRange { date: candidate })?;
        }
        Err(ResolveError::ScanExhausted { days: self.clone() })
    }
}

impl FromIterator<Weekday> for WeekdaySet {
    fn from_iter<I: IntoIterator<Item = Weekday>>(iter: I) -> Self {
        WeekdaySet(iter.into_iter().collect())
    }
}
