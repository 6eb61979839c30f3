//! Output module
//! Export of candidate records, console formatting and the skills chart

pub mod exporter;
pub mod chart;
pub mod formatter;
