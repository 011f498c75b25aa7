// Phase 2: cleaned records → ranked candidates.
// All LLM calls go through llm_client; nothing here talks HTTP directly.

pub mod batcher;
pub mod orchestrator;
pub mod prompt_builder;
pub mod prompts;
pub mod response_parser;
