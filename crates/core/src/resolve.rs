//! The resolver: pure combination of a rules record and an instant.
//!
//! `resolve` is synchronous, deterministic and side-effect-free. It reads
//! only its two arguments, never mutates the rules, and is bounded by at
//! most two 7-day weekday scans, so it may be called concurrently by any
//! number of callers without locking.

use time::{Date, Duration, PrimitiveDateTime};

use crate::error::ResolveError;
use crate::explain::{self, DeliveryBranch, Trace};
use crate::rules::DeliveryRules;
use crate::weekday::Weekday;

/// The outcome of resolving one supplier's rules at one instant.
///
/// Ephemeral: computed per call, never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// Whether an order may be placed right now.
    pub can_order_now: bool,
    /// Today if `can_order_now`, else the next eligible order date.
    pub order_date: Date,
    /// Delivery date and time resulting from `order_date`.
    pub estimated_delivery: PrimitiveDateTime,
    /// Deterministic textual trace of the decision. Display-only.
    pub explanation: String,
}

impl Resolution {
    /// Boundary JSON form: ISO-8601 dates, minute-precision delivery.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "can_order_now": self.can_order_now,
            "order_date": explain::iso_date(self.order_date),
            "estimated_delivery_date": format!(
                "{}T{}",
                explain::iso_date(self.estimated_delivery.date()),
                explain::clock(self.estimated_delivery.time()),
            ),
            "explanation": self.explanation,
        })
    }
}

/// Resolve `rules` against the instant `now`.
///
/// `now` is already supplier-local; time-zone localization is the
/// caller's responsibility. Decision sequence:
///
/// 1. An order is allowed today when the order-day set is unconstrained
///    or contains today's weekday, and the current hour is strictly
///    before the deadline (an hour equal to the deadline is too late).
/// 2. Otherwise the order date is the next allowed order day after
///    today; future days are gated only by the weekday constraint, the
///    deadline only applies to today.
/// 3. A non-empty delivery-day set places delivery on the first allowed
///    weekday on or after the order date (same-day match accepted; the
///    delay field is ignored in this branch). An empty set falls back to
///    `order_date + delivery_delay_days`.
pub fn resolve(rules: &DeliveryRules, now: PrimitiveDateTime) -> Result<Resolution, ResolveError> {
    let today = now.date();
    let hour_now = now.hour();
    let weekday_today = Weekday::from(today.weekday());

    let order_allowed_today =
        rules.order_days.is_unconstrained() || rules.order_days.contains(weekday_today);
    let can_order_now = order_allowed_today && hour_now < rules.order_deadline_hour;

    let order_date = if can_order_now {
        today
    } else {
        let tomorrow = today
            .next_day()
            .ok_or(ResolveError::DateOutOfRange { date: today })?;
        rules.order_days.next_allowed_on_or_after(tomorrow)?
    };

    let (delivery_branch, delivery_date) = if !rules.delivery_days.is_unconstrained() {
        let date = rules.delivery_days.next_allowed_on_or_after(order_date)?;
        (DeliveryBranch::WeekdayScan, date)
    } else {
        let date = order_date
            .checked_add(Duration::days(i64::from(rules.delivery_delay_days)))
            .ok_or(ResolveError::DateOutOfRange { date: order_date })?;
        (DeliveryBranch::DelayOffset(rules.delivery_delay_days), date)
    };

    let estimated_delivery = PrimitiveDateTime::new(delivery_date, rules.delivery_time);

    let explanation = explain::render(&Trace {
        today,
        weekday_today,
        order_days_unconstrained: rules.order_days.is_unconstrained(),
        order_allowed_today,
        hour_now,
        order_deadline_hour: rules.order_deadline_hour,
        can_order_now,
        order_date,
        delivery_branch,
        delivery_date,
        delivery_time: rules.delivery_time,
    });

    Ok(Resolution {
        can_order_now,
        order_date,
        estimated_delivery,
        explanation,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::weekday::WeekdaySet;
    use time::macros::{date, datetime, time};

    fn rules(
        order_days: &[Weekday],
        deadline: u8,
        delivery_days: &[Weekday],
        delay: u32,
        delivery_time: time::Time,
    ) -> DeliveryRules {
        DeliveryRules {
            order_days: order_days.iter().copied().collect::<WeekdaySet>(),
            order_deadline_hour: deadline,
            delivery_days: delivery_days.iter().copied().collect::<WeekdaySet>(),
            delivery_delay_days: delay,
            delivery_time,
            special_rules: None,
        }
    }

    #[test]
    fn deadline_comparison_is_strict() {
        // 2026-08-19 is a Wednesday; deadline 11h.
        let r = rules(&[], 11, &[], 0, time!(12:00));

        let before = resolve(&r, datetime!(2026 - 08 - 19 10:59)).unwrap();
        assert!(before.can_order_now);

        let at = resolve(&r, datetime!(2026 - 08 - 19 11:00)).unwrap();
        assert!(!at.can_order_now, "hour equal to the deadline is too late");
        assert_eq!(at.order_date, date!(2026 - 08 - 20));
    }

    #[test]
    fn zero_delay_means_same_day_delivery() {
        let r = rules(&[], 23, &[], 0, time!(18:00));
        let res = resolve(&r, datetime!(2026 - 08 - 19 08:00)).unwrap();
        assert!(res.can_order_now);
        assert_eq!(res.estimated_delivery, datetime!(2026 - 08 - 19 18:00));
    }

    #[test]
    fn resolve_is_pure() {
        let r = rules(&[Weekday::Tuesday, Weekday::Friday], 11, &[], 1, time!(11:00));
        let now = datetime!(2026 - 08 - 19 09:00);
        let a = resolve(&r, now).unwrap();
        let b = resolve(&r, now).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.explanation, b.explanation);
    }

    #[test]
    fn rules_are_not_mutated() {
        let r = rules(&[Weekday::Monday], 9, &[Weekday::Thursday], 2, time!(07:30));
        let copy = r.clone();
        let _ = resolve(&r, datetime!(2026 - 08 - 19 12:00)).unwrap();
        assert_eq!(r, copy);
    }
}
