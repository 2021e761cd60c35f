//! Delivery rules: boundary document, exhaustive validator, typed model.
//!
//! `RulesDoc` is the serialized form produced by the administrative form
//! and stored by the Rules Store: weekday lists as lowercase French
//! tokens, the delivery time as `"HH:MM"`, integers wide enough that
//! out-of-range values survive deserialization and reach the validator.
//!
//! `RulesDoc::validate` is the single boundary parser. It is exhaustive,
//! never fail-fast: every violated field is collected so the form can
//! highlight every problem in one pass. On success it produces the
//! immutable `DeliveryRules` value consumed by the resolver; nothing
//! downstream re-validates.

use serde::{Deserialize, Serialize};
use time::Time;

use crate::weekday::{Weekday, WeekdaySet};

/// Per-supplier ordering/delivery constraints, as serialized at the
/// boundary. Field semantics:
///
/// - `order_days`: empty means every day is allowed.
/// - `order_deadline_hour`: hour-of-day cutoff for ordering today.
/// - `delivery_days`: empty means the delay-based fallback applies;
///   non-empty means deliveries occur only on those weekdays.
/// - `delivery_delay_days`: offset from order date to delivery date,
///   used only when `delivery_days` is empty.
/// - `special_rules`: advisory free text, never parsed by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RulesDoc {
    #[serde(default)]
    pub order_days: Vec<String>,
    pub order_deadline_hour: i64,
    #[serde(default)]
    pub delivery_days: Vec<String>,
    #[serde(default)]
    pub delivery_delay_days: i64,
    pub delivery_time: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub special_rules: Option<String>,
}

/// A single validation finding for one field of a rules document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleViolation {
    pub field: String,
    pub message: String,
}

impl RuleViolation {
    pub fn new(field: &str, message: impl Into<String>) -> Self {
        RuleViolation {
            field: field.to_owned(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for RuleViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validated, immutable delivery rules. Constructed only by
/// `RulesDoc::validate`; the resolver treats this as read-only input and
/// carries no state of its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryRules {
    pub order_days: WeekdaySet,
    pub order_deadline_hour: u8,
    pub delivery_days: WeekdaySet,
    pub delivery_delay_days: u32,
    pub delivery_time: Time,
    pub special_rules: Option<String>,
}

impl DeliveryRules {
    /// Serialize back to the boundary document form. Weekday lists come
    /// out Monday-first; round-tripping through `validate` yields an
    /// equal record.
    pub fn to_doc(&self) -> RulesDoc {
        RulesDoc {
            order_days: self.order_days.tokens(),
            order_deadline_hour: i64::from(self.order_deadline_hour),
            delivery_days: self.delivery_days.tokens(),
            delivery_delay_days: i64::from(self.delivery_delay_days),
            delivery_time: format!(
                "{:02}:{:02}",
                self.delivery_time.hour(),
                self.delivery_time.minute()
            ),
            special_rules: self.special_rules.clone(),
        }
    }
}

impl RulesDoc {
    /// Validate every field, collecting all violations.
    ///
    /// Run at configuration time (creation/update), never at resolution
    /// time. Returns the typed rules on success, or the full violation
    /// list -- never just the first problem.
    pub fn validate(&self) -> Result<DeliveryRules, Vec<RuleViolation>> {
        let mut violations = Vec::new();

        let order_days = parse_day_list("order_days", &self.order_days, &mut violations);
        let delivery_days = parse_day_list("delivery_days", &self.delivery_days, &mut violations);

        if !(0..=23).contains(&self.order_deadline_hour) {
            violations.push(RuleViolation::new(
                "order_deadline_hour",
                format!("must be between 0 and 23, got {}", self.order_deadline_hour),
            ));
        }

        let delivery_delay_days = if self.delivery_delay_days < 0 {
            violations.push(RuleViolation::new(
                "delivery_delay_days",
                format!("must not be negative, got {}", self.delivery_delay_days),
            ));
            None
        } else {
            match u32::try_from(self.delivery_delay_days) {
                Ok(v) => Some(v),
                Err(_) => {
                    violations.push(RuleViolation::new(
                        "delivery_delay_days",
                        format!(
                            "must not exceed {}, got {}",
                            u32::MAX,
                            self.delivery_delay_days
                        ),
                    ));
                    None
                }
            }
        };

        let delivery_time = parse_clock("delivery_time", &self.delivery_time, &mut violations);

        match (delivery_delay_days, delivery_time, violations.is_empty()) {
            (Some(delivery_delay_days), Some(delivery_time), true) => Ok(DeliveryRules {
                order_days,
                order_deadline_hour: self.order_deadline_hour as u8,
                delivery_days,
                delivery_delay_days,
                delivery_time,
                special_rules: self.special_rules.clone(),
            }),
            _ => Err(violations),
        }
    }
}

fn parse_day_list(
    field: &str,
    tokens: &[String],
    violations: &mut Vec<RuleViolation>,
) -> WeekdaySet {
    let mut set = WeekdaySet::new();
    for token in tokens {
        match Weekday::parse(token) {
            Some(day) => {
                if !set.insert(day) {
                    violations.push(RuleViolation::new(
                        field,
                        format!("duplicate day '{}'", token),
                    ));
                }
            }
            None => violations.push(RuleViolation::new(
                field,
                format!("unrecognized day '{}'", token),
            )),
        }
    }
    set
}

/// Parse a `"HH:MM"` clock string (two digits each, hour 0-23,
/// minute 0-59).
fn parse_clock(field: &str, raw: &str, violations: &mut Vec<RuleViolation>) -> Option<Time> {
    let parts = match raw.split_once(':') {
        Some((h, m)) if h.len() == 2 && m.len() == 2 => Some((h, m)),
        _ => None,
    };
    let (h, m) = match parts {
        Some(p) => p,
        None => {
            violations.push(RuleViolation::new(
                field,
                format!("'{}' does not match HH:MM", raw),
            ));
            return None;
        }
    };
    let hour: u8 = match h.parse() {
        Ok(v) => v,
        Err(_) => {
            violations.push(RuleViolation::new(
                field,
                format!("'{}' does not match HH:MM", raw),
            ));
            return None;
        }
    };
    let minute: u8 = match m.parse() {
        Ok(v) => v,
        Err(_) => {
            violations.push(RuleViolation::new(
                field,
                format!("'{}' does not match HH:MM", raw),
            ));
            return None;
        }
    };
    match Time::from_hms(hour, minute, 0) {
        Ok(t) => Some(t),
        Err(_) => {
            violations.push(RuleViolation::new(
                field,
                format!("hour must be 0-23 and minute 0-59, got '{}'", raw),
            ));
            None
        }
    }
}
