//! Study progress derived from markdown checklists and the session log.
//!
//! # Responsibility
//! - Count open and completed `- [ ]` / `- [x]` items per course.
//! - Total recorded study minutes per course.
//!
//! # Invariants
//! - Documents without checklist items do not appear in the result.
//! - Nothing in this module writes to the corpus or the session log.

pub mod checklist;
pub mod study_time;
