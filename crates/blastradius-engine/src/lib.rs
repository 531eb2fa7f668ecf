//! BlastRadius engine - Core business logic
//!
//! This crate implements the main business logic:
//! - Downstream impact graph walker
//! - Column diff aggregation over changed files
//! - Report assembly

pub mod aggregator;
pub mod assembler;
pub mod walker;

pub use aggregator::{ContentSource, DiffAggregator};
pub use assembler::assemble;
pub use walker::{ImpactWalker, WalkOutcome};
