//! Prompt Builder: (job description, batch) → (system, user) message pair.
//!
//! Two styles. `Rich` grounds the model with reference roles and graded
//! examples; `Constrained` trades that grounding for strictly parseable output
//! and is only used after a rich response fails to parse.
//!
//! Only `Name` and `Skills` reach the model. Every other cleaned field stays local.

use std::fmt;

use crate::llm_client::prompts::{JSON_ARRAY_ONLY, SCORED_CANDIDATE_SCHEMA};
use crate::models::candidate::CandidateRecord;
use crate::ranking::prompts::{
    CONSTRAINED_EXAMPLE, CONSTRAINED_SYSTEM_TEMPLATE, CONSTRAINED_USER_TEMPLATE,
    REFERENCE_JD_GOLANG, REFERENCE_JD_RAILS, RICH_FEW_SHOT_EXAMPLES, RICH_SYSTEM_TEMPLATE,
    RICH_USER_TEMPLATE,
};

const MISSING_FIELD: &str = "N/A";

/// A system/user message pair ready for the completion client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub system: String,
    pub user: String,
}

/// Prompt strategies, tried in order by the orchestrator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptStyle {
    Rich,
    Constrained,
}

impl PromptStyle {
    /// Rich first, constrained as the single fallback.
    pub const DEFAULT_ORDER: [PromptStyle; 2] = [PromptStyle::Rich, PromptStyle::Constrained];

    pub fn build(self, job_description: &str, batch: &[CandidateRecord]) -> Prompt {
        match self {
            PromptStyle::Rich => build_rich_prompt(job_description, batch),
            PromptStyle::Constrained => build_constrained_prompt(job_description, batch),
        }
    }
}

impl fmt::Display for PromptStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PromptStyle::Rich => write!(f, "rich"),
            PromptStyle::Constrained => write!(f, "constrained"),
        }
    }
}

pub fn build_rich_prompt(job_description: &str, batch: &[CandidateRecord]) -> Prompt {
    let candidates = render_candidates(batch);
    Prompt {
        system: fill_template(RICH_SYSTEM_TEMPLATE, &[("schema", SCORED_CANDIDATE_SCHEMA)]),
        user: fill_template(
            RICH_USER_TEMPLATE,
            &[
                ("reference_jd_1", REFERENCE_JD_GOLANG),
                ("reference_jd_2", REFERENCE_JD_RAILS),
                ("job_description", job_description),
                ("examples", RICH_FEW_SHOT_EXAMPLES),
                ("candidates", &candidates),
            ],
        ),
    }
}

pub fn build_constrained_prompt(job_description: &str, batch: &[CandidateRecord]) -> Prompt {
    let candidates = render_candidates(batch);
    Prompt {
        system: fill_template(CONSTRAINED_SYSTEM_TEMPLATE, &[("json_only", JSON_ARRAY_ONLY)]),
        user: fill_template(
            CONSTRAINED_USER_TEMPLATE,
            &[
                ("example", CONSTRAINED_EXAMPLE),
                ("job_description", job_description),
                ("candidates", &candidates),
            ],
        ),
    }
}

/// One line per candidate: `Candidate <id>: Name: <name>, Skills: <skills>`.
///
/// `<id>` is the record's own `id` column when it has one, otherwise the
/// 1-based position inside the batch.
pub fn render_candidates(batch: &[CandidateRecord]) -> String {
    batch
        .iter()
        .enumerate()
        .map(|(i, candidate)| {
            let id = candidate
                .get_ignore_case("id")
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .unwrap_or_else(|| (i + 1).to_string());
            format!(
                "Candidate {id}: Name: {}, Skills: {}",
                field_or_missing(candidate, "name"),
                field_or_missing(candidate, "skills"),
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn field_or_missing<'a>(candidate: &'a CandidateRecord, field: &str) -> &'a str {
    candidate
        .get_ignore_case(field)
        .filter(|s| !s.is_empty())
        .unwrap_or(MISSING_FIELD)
}

/// Single-pass `{key}` substitution. Substituted values are never rescanned, so
/// a job description containing `{candidates}` stays literal.
pub fn fill_template(template: &str, vars: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let tail = &rest[start + 1..];
        let hit = vars.iter().find(|(key, _)| {
            tail.strip_prefix(key)
                .is_some_and(|after| after.starts_with('}'))
        });
        match hit {
            Some((key, value)) => {
                out.push_str(value);
                rest = &tail[key.len() + 1..];
            }
            None => {
                out.push('{');
                rest = tail;
            }
        }
    }

    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn batch() -> Vec<CandidateRecord> {
        vec![
            CandidateRecord::from_pairs([
                ("Name", "ana lopez"),
                ("Skills", "golang postgresql"),
                ("Summary", "secret internal note"),
            ]),
            CandidateRecord::from_pairs([("Name", "luis"), ("Skills", "")]),
        ]
    }

    #[test]
    fn test_render_candidates_surfaces_name_and_skills_only() {
        let rendered = render_candidates(&batch());
        assert_eq!(
            rendered,
            "Candidate 1: Name: ana lopez, Skills: golang postgresql\n\
             Candidate 2: Name: luis, Skills: N/A"
        );
        assert!(!rendered.contains("secret"));
    }

    #[test]
    fn test_render_candidates_prefers_record_id() {
        let records = vec![CandidateRecord::from_pairs([
            ("ID", "c-204"),
            ("Name", "ana"),
            ("Skills", "rails"),
        ])];
        assert_eq!(
            render_candidates(&records),
            "Candidate c-204: Name: ana, Skills: rails"
        );
    }

    #[test]
    fn test_rich_prompt_contains_references_examples_and_jd() {
        let prompt = build_rich_prompt("Senior Go engineer, remote", &batch());
        assert!(prompt.user.contains("GoLang Developer"));
        assert!(prompt.user.contains("Ruby on Rails Developer Engineer"));
        assert!(prompt.user.contains("User-Provided Job Description:\nSenior Go engineer, remote"));
        assert!(prompt.user.contains("\"score\": 60"));
        assert!(prompt.user.contains("Candidate 1: Name: ana lopez"));
        assert!(prompt.system.contains("\"highlights\": [\"strength_1\""));
        assert!(!prompt.system.contains("{schema}"));
    }

    #[test]
    fn test_constrained_prompt_forbids_fences_and_drops_references() {
        let prompt = build_constrained_prompt("Rails developer", &batch());
        assert!(prompt.system.contains("no code fences"));
        assert!(prompt.system.contains("'score' (a numeric value)"));
        assert!(prompt.user.contains("90.2"));
        assert!(prompt.user.contains("Job Description:\nRails developer"));
        assert!(!prompt.user.contains("Reference Job Description"));
        assert!(!prompt.user.contains("\"score\": 60"));
    }

    #[test]
    fn test_prompt_style_dispatch_and_order() {
        assert_eq!(
            PromptStyle::Rich.build("jd", &batch()),
            build_rich_prompt("jd", &batch())
        );
        assert_eq!(
            PromptStyle::Constrained.build("jd", &batch()),
            build_constrained_prompt("jd", &batch())
        );
        assert_eq!(
            PromptStyle::DEFAULT_ORDER,
            [PromptStyle::Rich, PromptStyle::Constrained]
        );
        assert_eq!(PromptStyle::Constrained.to_string(), "constrained");
    }

    #[test]
    fn test_fill_template_does_not_rescan_values() {
        let out = fill_template(
            "JD: {job_description} / {candidates} / {unknown}",
            &[("job_description", "use {candidates} {"), ("candidates", "C1")],
        );
        assert_eq!(out, "JD: use {candidates} { / C1 / {unknown}");
    }

    #[test]
    fn test_job_description_is_used_verbatim() {
        let jd = "  <b>Go</b> Developer!!  ";
        let prompt = build_constrained_prompt(jd, &[]);
        assert!(prompt.user.contains(jd));
    }
}
