//! DMF-T / def-t computation
//!
//! Both indices are raw counts over the recorded chart, not ratios over the
//! teeth examined. Teeth that are not recorded or carry an unknown code
//! contribute nothing.

use crate::models::dental_index::{DentalIndexResult, IndexComponents};
use crate::models::patient::{PatientDentalRecord, ToothChart};
use crate::models::tooth::{PermanentStatus, PrimaryStatus, ToothStatus};

/// Computes index values from classified tooth statuses
pub struct IndexCalculator;

impl IndexCalculator {
    /// Compute the index for one patient record
    #[must_use]
    pub fn compute(record: &PatientDentalRecord) -> DentalIndexResult {
        Self::compute_chart(&record.chart)
    }

    /// Compute the index for a chart
    #[must_use]
    pub fn compute_chart(chart: &ToothChart) -> DentalIndexResult {
        let mut permanent = IndexComponents::default();
        let mut primary = IndexComponents::default();

        for (_, status) in chart.iter() {
            match status {
                ToothStatus::Permanent(status) => add_permanent(&mut permanent, status),
                ToothStatus::Primary(status) => add_primary(&mut primary, status),
                ToothStatus::Other(_) | ToothStatus::NotRecorded => {}
            }
        }

        DentalIndexResult::from_components(permanent, primary)
    }
}

fn add_permanent(components: &mut IndexComponents, status: PermanentStatus) {
    match status {
        PermanentStatus::Decayed | PermanentStatus::FilledWithDecay => components.decayed += 1,
        PermanentStatus::MissingDueToDecay => components.missing += 1,
        PermanentStatus::FilledWithoutDecay => components.filled += 1,
        PermanentStatus::Healthy
        | PermanentStatus::MissingOther
        | PermanentStatus::Sealant
        | PermanentStatus::Prosthesis
        | PermanentStatus::Unerupted
        | PermanentStatus::Other => {}
    }
}

fn add_primary(components: &mut IndexComponents, status: PrimaryStatus) {
    match status {
        PrimaryStatus::Decayed | PrimaryStatus::FilledWithDecay => components.decayed += 1,
        PrimaryStatus::ExtractedDueToDecay => components.missing += 1,
        PrimaryStatus::FilledWithoutDecay => components.filled += 1,
        PrimaryStatus::Healthy => {}
    }
}
