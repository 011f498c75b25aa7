// All LLM prompt text for candidate ranking.
// Templates use `{placeholder}` markers filled by `prompt_builder::fill_template`.

/// Fixed reference role used as an implicit must-have prior.
pub const REFERENCE_JD_GOLANG: &str = "Reference Job Description 1 – GoLang Developer:\n\
    Summary: Due to the increasing cybersecurity threats, BCDR solutions have become essential. \
    This role requires developing high-load, scalable services, supporting production applications, \
    and writing clean, tested code. Requirements include 2+ years of GoLang experience, 5+ years \
    overall development experience, team spirit, and a strong academic background in computer science.";

/// Fixed reference role used as an implicit must-have prior.
pub const REFERENCE_JD_RAILS: &str = "Reference Job Description 2 – Full Stack Ruby on Rails Developer Engineer:\n\
    Must-haves: 3+ years of production-level Ruby on Rails experience, deep understanding of PostgreSQL, \
    at least 1+ year working with JavaScript/TypeScript, and expertise with automated testing (RSpec) and API integration. \
    Nice-to-haves: TailwindCSS, ViewComponent, and Stimulus. Candidates should have a strong grasp of design patterns, \
    domain-driven development, and effective debugging.";

/// System prompt for the rich variant. Replace: {schema}
pub const RICH_SYSTEM_TEMPLATE: &str = "You are an AI recruiter assistant. \
    Your job is to evaluate candidates based on their suitability for the position. \
    In your evaluation, use the context from both the reference job descriptions (above) \
    and the user-provided job description. Give high priority to the must-have skills and \
    requirements described in the reference texts, while letting the user description further \
    guide the final ranking. Return a JSON list of candidates with the following fields: \
    id, name, score (0-100), and highlights (a summary of strengths). \
    The JSON format should be as follows:\n{schema}";

/// Two graded few-shot outputs: one strong match, one marginal.
pub const RICH_FEW_SHOT_EXAMPLES: &str = r#"[
    {
        "id": "1",
        "name": "Candidate 1",
        "score": 90,
        "highlights": [
            "More than 5 years of experience in production-level Rails development and intermediate GoLang exposure.",
            "Expert in PostgreSQL performance tuning and automated testing.",
            "Exhibits strong team collaboration and problem-solving skills."
        ]
    },
    {
        "id": "2",
        "name": "Candidate 2",
        "score": 60,
        "highlights": [
            "Limited exposure to both GoLang and Rails applications.",
            "Basic understanding of relational databases and automated testing.",
            "Marginal alignment with the must-have requirements in the reference descriptions."
        ]
    }
]"#;

/// User prompt for the rich variant.
/// Replace: {reference_jd_1}, {reference_jd_2}, {job_description}, {examples}, {candidates}
pub const RICH_USER_TEMPLATE: &str = "Reference Job Descriptions:

{reference_jd_1}

{reference_jd_2}

User-Provided Job Description:
{job_description}


Examples:
{examples}

Candidates to Evaluate:
{candidates}

Return a structured JSON ranking these candidates.";

/// System prompt for the constrained fallback. Replace: {json_only}
pub const CONSTRAINED_SYSTEM_TEMPLATE: &str = "You are an AI technical recruiter. \
    You must evaluate candidates based solely on the job description provided. \
    {json_only} \
    Each candidate object must include the keys: 'id', 'name', 'score' (a numeric value), \
    and 'highlights' (an array of strings).";

/// Single terse example for the constrained fallback.
pub const CONSTRAINED_EXAMPLE: &str = r#"[
  {
    "id": "1",
    "name": "Candidate 1",
    "score": 90.2,
    "highlights": [
      "Strong in Ruby on Rails",
      "Good problem-solving skills"
    ]
  }
]"#;

/// User prompt for the constrained fallback.
/// Replace: {example}, {job_description}, {candidates}
pub const CONSTRAINED_USER_TEMPLATE: &str = "Example:
{example}

Job Description:
{job_description}

Candidates:
{candidates}

Return ONLY a valid JSON array structured as shown in the example above.";
