//! Growth deltas between the two most recent recorded days.
//!
//! # Responsibility
//! - Compute per-dimension percentage change with a zero-baseline guard.
//! - Select the dimension that most needs attention.
//!
//! # Invariants
//! - Deltas are rounded to two decimal places.
//! - The denominator is `max(previous, 1)`; this approximates a percentage
//!   change and inflates changes on small baselines.

pub mod delta;
