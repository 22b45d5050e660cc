//! Domain model shared by scanning, scoring and auditing.
//!
//! # Responsibility
//! - Define the value types that cross component boundaries.
//! - Keep wire shapes (history JSON, findings) stable for external consumers.
//!
//! # Invariants
//! - Documents are immutable once read and re-read on every scan.
//! - Snapshot timestamps carry minute precision.

pub mod document;
pub mod finding;
pub mod score;
