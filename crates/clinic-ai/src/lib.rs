//! Progress and readiness engine for structured clinical case-formulation workflows.
//!
//! The engine consumes a read-only [`ClinicalSnapshot`](workflows::formulation::ClinicalSnapshot)
//! and returns derived values only. Loading and saving the clinical record is left to the caller.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
