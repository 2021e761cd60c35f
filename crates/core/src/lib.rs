//! commis-core: supplier delivery-rules resolution engine.
//!
//! Given a supplier's per-weekday ordering/delivery constraints and a
//! reference instant, determine whether an order may be placed now, when
//! the next opportunity to order is, and what delivery date/time results.
//!
//! # Public API
//!
//! Key types are re-exported at the crate root for convenience:
//!
//! - [`resolve()`] -- pure resolution of rules against an instant
//! - [`RulesDoc`] -- boundary document form of a rules record
//! - [`DeliveryRules`] -- validated, immutable rules record
//! - [`Resolution`] -- the per-call result, with its explanation trace
//! - [`RuleViolation`] -- one validation finding; the validator always
//!   reports the full list
//! - [`Weekday`] / [`WeekdaySet`] -- weekday identity and the
//!   empty-means-unconstrained day-set predicate

pub mod error;
pub mod explain;
pub mod resolve;
pub mod rules;
pub mod weekday;

pub use error::ResolveError;
pub use resolve::{resolve, Resolution};
pub use rules::{DeliveryRules, RuleViolation, RulesDoc};
pub use weekday::{Weekday, WeekdaySet};
