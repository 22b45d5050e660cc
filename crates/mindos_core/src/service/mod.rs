//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate corpus, scoring, history and audit components into use-case APIs.
//! - Keep CLI/dashboard callers decoupled from component wiring.

pub mod growth_engine;
