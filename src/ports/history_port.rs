//! Outcome-history persistence port trait.

use std::path::Path;

use crate::domain::error::StakewalkError;
use crate::domain::sequence::{OutcomeEntry, StepRecord};

/// Load/save seam for exported histories. Only `step`, `pattern` and
/// `outcome` survive a round trip; derived columns are recomputed on load.
pub trait HistoryPort {
    fn load(&self, path: &Path) -> Result<Vec<OutcomeEntry>, StakewalkError>;

    fn save(&self, path: &Path, records: &[StepRecord]) -> Result<(), StakewalkError>;
}
