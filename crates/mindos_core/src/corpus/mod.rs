//! Read-only access to the note corpus.
//!
//! # Responsibility
//! - Discover documents under configured directories.
//! - Extract leading front-matter metadata from document content.
//!
//! # Invariants
//! - Nothing in this module writes to the corpus.

pub mod frontmatter;
pub mod walker;
