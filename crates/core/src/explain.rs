//! Explanation formatter: renders a resolution trace into a
//! human-readable string.
//!
//! The output is a fixed sequence of clauses describing the resolver's
//! steps. Identical inputs always produce an identical string; the text
//! is display-only and never parsed back.

use std::fmt::Write;

use time::{Date, Time};

use crate::weekday::Weekday;

/// Which delivery rule applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryBranch {
    /// `delivery_days` is non-empty: the delivery date is the first
    /// allowed weekday on or after the order date (same-day accepted).
    WeekdayScan,
    /// `delivery_days` is empty: the delivery date is the order date
    /// plus this many days.
    DelayOffset(u32),
}

/// The resolver's step-by-step trace, rendered by [`render`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trace {
    pub today: Date,
    pub weekday_today: Weekday,
    pub order_days_unconstrained: bool,
    pub order_allowed_today: bool,
    pub hour_now: u8,
    pub order_deadline_hour: u8,
    pub can_order_now: bool,
    pub order_date: Date,
    pub delivery_branch: DeliveryBranch,
    pub delivery_date: Date,
    pub delivery_time: Time,
}

/// Render the trace as a deterministic clause sequence, e.g.
/// `"samedi is an allowed order day; 10h is before the 11h deadline;
/// order placed 2026-08-22; delivery delay +1d => 2026-08-23 at 12:00"`.
pub fn render(trace: &Trace) -> String {
    let mut out = String::new();

    // Order-day eligibility for today.
    if trace.order_days_unconstrained {
        let _ = write!(out, "every day is an allowed order day");
    } else if trace.order_allowed_today {
        let _ = write!(out, "{} is an allowed order day", trace.weekday_today);
    } else {
        let _ = write!(out, "{} is not an allowed order day", trace.weekday_today);
    }

    // The deadline only gates today's eligibility, so it is only worth
    // mentioning when today was an allowed order day at all.
    if trace.order_allowed_today {
        if trace.hour_now < trace.order_deadline_hour {
            let _ = write!(
                out,
                "; {}h is before the {}h deadline",
                trace.hour_now, trace.order_deadline_hour
            );
        } else {
            let _ = write!(
                out,
                "; {}h is past the {}h deadline",
                trace.hour_now, trace.order_deadline_hour
            );
        }
    }

    if trace.can_order_now {
        let _ = write!(out, "; order placed {}", iso_date(trace.order_date));
    } else {
        let _ = write!(out, "; next order day is {}", iso_date(trace.order_date));
    }

    match trace.delivery_branch {
        DeliveryBranch::WeekdayScan => {
            let _ = write!(
                out,
                "; delivery days rule => {} at {}",
                iso_date(trace.delivery_date),
                clock(trace.delivery_time)
            );
        }
        DeliveryBranch::DelayOffset(days) => {
            let _ = write!(
                out,
                "; delivery delay +{}d => {} at {}",
                days,
                iso_date(trace.delivery_date),
                clock(trace.delivery_time)
            );
        }
    }

    out
}

/// ISO-8601 calendar date, e.g. `2026-08-22`.
pub(crate) fn iso_date(date: Date) -> String {
    format!(
        "{:04}-{:02}-{:02}",
        date.year(),
        u8::from(date.month()),
        date.day()
    )
}

/// `HH:MM` clock rendering, minute precision.
pub(crate) fn clock(time: Time) -> String {
    format!("{:02}:{:02}", time.hour(), time.minute())
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::{date, time};

    fn base_trace() -> Trace {
        Trace {
            today: date!(2026 - 08 - 22),
            weekday_today: Weekday::Saturday,
            order_days_unconstrained: false,
            order_allowed_today: true,
            hour_now: 10,
            order_deadline_hour: 11,
            can_order_now: true,
            order_date: date!(2026 - 08 - 22),
            delivery_branch: DeliveryBranch::DelayOffset(1),
            delivery_date: date!(2026 - 08 - 23),
            delivery_time: time!(12:00),
        }
    }

    #[test]
    fn renders_the_full_clause_sequence() {
        assert_eq!(
            render(&base_trace()),
            "samedi is an allowed order day; 10h is before the 11h deadline; \
             order placed 2026-08-22; delivery delay +1d => 2026-08-23 at 12:00"
        );
    }

    #[test]
    fn blocked_weekday_skips_the_deadline_clause() {
        let trace = Trace {
            order_allowed_today: false,
            can_order_now: false,
            order_date: date!(2026 - 08 - 25),
            weekday_today: Weekday::Monday,
            ..base_trace()
        };
        let text = render(&trace);
        assert!(text.starts_with("lundi is not an allowed order day; next order day is"));
        assert!(!text.contains("deadline"));
    }

    #[test]
    fn rendering_is_deterministic() {
        let trace = base_trace();
        assert_eq!(render(&trace), render(&trace));
    }
}
