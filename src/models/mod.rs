//! Domain models for dental survey scoring
//!
//! This module contains the data types shared by the scoring pipeline:
//! tooth positions and statuses, clinical flags, patient records, index
//! results and cohort statistics.

pub mod cohort;
pub mod dental_index;
pub mod flags;
pub mod patient;
pub mod tooth;

// Re-export commonly used types
pub use cohort::{CategoryCount, CohortStatistics, FlagTotals, GenderCount, ProvinceCount};
pub use dental_index::{DentalIndexResult, IndexComponents};
pub use flags::{ClinicalFlags, FlagValue, TreatmentNeed};
pub use patient::{
    Demographics, Gender, PatientDentalRecord, PatientScore, RawClinicalFlags, RawDemographics,
    RawPatientRecord, ScoreSource, ToothChart,
};
pub use tooth::{Dentition, PermanentStatus, PrimaryStatus, ToothPosition, ToothStatus};
