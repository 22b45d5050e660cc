//! Consistency audit over corpus metadata and declared goals.
//!
//! # Responsibility
//! - Flag documents whose front matter is missing or unusable.
//! - Flag skill-gap goals with no keyword evidence in the activity log.
//!
//! # Invariants
//! - Both passes always run; findings are concatenated metadata-first.
//! - Goal matching is shallow keyword presence, not semantic matching.
//! - The audit passes iff no findings are reported; warnings never fail it.

pub mod auditor;
pub mod goal_table;
pub mod keywords;
