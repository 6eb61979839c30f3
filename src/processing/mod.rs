//! Batch orchestration and downstream analysis of candidate records

pub mod batch;
pub mod query;
pub mod stats;
