//! Final report assembly
//!
//! Narrative text comes from an external collaborator and is kept verbatim.
//! Every number in the report comes from the exact cohort statistics.

pub mod assembler;

pub use assembler::{FinalReport, ModelEstimate, OverriddenField, ReportAssembler};
