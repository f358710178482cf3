//! Algorithm implementations for dental epidemiological surveys
//!
//! This module contains per-patient scoring (tooth status decoding, DMF-T /
//! def-t computation, clinical flags, legacy text parsing), cohort
//! aggregation, and final report assembly.

pub mod cohort;
pub mod dental;
pub mod report;
