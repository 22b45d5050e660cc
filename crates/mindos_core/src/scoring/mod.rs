//! Per-dimension score extraction and aggregation.
//!
//! # Responsibility
//! - Turn front-matter fields into numeric samples per radar dimension.
//! - Reduce samples to one score per dimension with a baseline fallback.
//!
//! # Invariants
//! - Output order follows the configured dimension list.
//! - Zero-sample dimensions score the baseline, never zero.

pub mod aggregator;
pub mod strategy;
