//! Scores a fixed set of software testing methods against five criteria,
//! ranks them, keeps a history of evaluations, and exports it as a spreadsheet.

pub mod config;
pub mod error;
pub mod evaluation;
pub mod export;
pub mod history;
pub mod telemetry;
