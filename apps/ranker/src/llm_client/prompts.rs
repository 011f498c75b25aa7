// Shared prompt fragments.
// Each module that needs LLM calls defines its own prompts.rs alongside it;
// this file holds only the pieces they have in common.

/// Output contract shared by every scoring prompt.
pub const SCORED_CANDIDATE_SCHEMA: &str = "[\n  {\"id\": \"candidate_id\", \"name\": \"candidate_name\", \
    \"score\": candidate_score, \"highlights\": [\"strength_1\", \"strength_2\"]}\n]";

/// System prompt fragment that enforces a bare JSON array.
pub const JSON_ARRAY_ONLY: &str = "Return ONLY a JSON array of candidate objects, \
    with no additional explanation or formatting. \
    Do not include any markdown formatting, no code fences, and no extra text.";
