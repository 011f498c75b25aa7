// Phase 1: spreadsheet → cleaned candidate records.
// No LLM calls here; everything is deterministic and runs offline.

pub mod cleaner;
pub mod normalizer;
pub mod spreadsheet;
