use std::fs;
use std::path::Path;

use tracing::info;

use crate::errors::RankerError;
use crate::models::candidate::CandidateRecord;

/// Reads the cleaned candidate file written by the preprocessing step.
pub fn load_candidates(path: &Path) -> Result<Vec<CandidateRecord>, RankerError> {
    let raw = fs::read_to_string(path).map_err(|e| {
        RankerError::Input(format!(
            "Unable to read candidates file {}: {e}",
            path.display()
        ))
    })?;
    let candidates: Vec<CandidateRecord> = serde_json::from_str(&raw)?;
    info!("Loaded {} candidates from {}", candidates.len(), path.display());
    Ok(candidates)
}

/// Splits records into consecutive batches of `batch_size`; only the last may be shorter.
pub fn batch_candidates(
    records: &[CandidateRecord],
    batch_size: usize,
) -> Result<Vec<&[CandidateRecord]>, RankerError> {
    if batch_size == 0 {
        return Err(RankerError::InvalidBatchSize(batch_size));
    }
    Ok(records.chunks(batch_size).collect())
}
