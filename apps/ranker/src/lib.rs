//! Candidate ranking: spreadsheet cleaning and LLM-based relevance scoring.
//!
//! Phase 1 (`ingest`) turns a raw candidate sheet into flat JSON records.
//! Phase 2 (`ranking`) scores those records against a job description in
//! batches and returns the best matches.

pub mod config;
pub mod errors;
pub mod ingest;
pub mod llm_client;
pub mod models;
pub mod ranking;
pub mod telemetry;
