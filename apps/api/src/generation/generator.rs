//! Resume Generation: turns raw candidate data into a canonical resume.
//!
//! Flow: format candidate data → fill prompt → content generator →
//!       shape check → SchemaNormalizer → GenerationOutcome.
//!
//! The generator is a black box. Whatever it returns, a JSON object always
//! normalizes into the full resume shape; anything else is a
//! [`GenerationFailure`]. There is no retry on a parsed-but-unusable answer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::generation::prompts::{
    fill_template, GENERATE_PROMPT_TEMPLATE, NO_JOB_DESCRIPTION, NO_TARGET_COMPANY, RESUME_SYSTEM,
    RESUME_TEMPERATURE, TAILOR_PROMPT_TEMPLATE,
};
use crate::llm_client::prompts::json_only;
use crate::llm_client::{ContentGenerator, LlmError};
use crate::models::resume::Resume;
use crate::schema::coerce::{
    as_map, kind_of, to_level, to_nonempty_text, to_text, to_text_list, DEFAULT_SKILL_LEVEL,
};
use crate::schema::{keys, keys::lookup, normalize, FallbackProfile};

const DEFAULT_SKILL_CATEGORY: &str = "general";
const UNKNOWN_NAME: &str = "Unknown";

// ────────────────────────────────────────────────────────────────────────────
// Errors
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum GenerationFailure {
    #[error("content generator failed: {0}")]
    Upstream(#[from] LlmError),

    #[error("content generator returned {0}, expected a JSON object")]
    NotAMapping(&'static str),
}

// ────────────────────────────────────────────────────────────────────────────
// Data models
// ────────────────────────────────────────────────────────────────────────────

/// Raw candidate data. Entries are loosely shaped JSON; aliases such as
/// `skill_name` or `graduation_year` are accepted.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GenerateRequest {
    #[serde(default)]
    pub user_profile: Value,
    #[serde(default)]
    pub skills: Vec<Value>,
    #[serde(default)]
    pub experience: Vec<Value>,
    #[serde(default)]
    pub education: Vec<Value>,
    #[serde(default)]
    pub projects: Option<Vec<Value>>,
    pub target_role: String,
    #[serde(default)]
    pub job_description: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TailorRequest {
    pub existing_resume: Value,
    pub job_description: String,
    pub target_role: String,
    #[serde(default)]
    pub target_company: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GenerationOutcome {
    pub resume_data: Resume,
    pub target_role: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_company: Option<String>,
    pub tailored: bool,
    pub generated_at: DateTime<Utc>,
}

// ────────────────────────────────────────────────────────────────────────────
// Pipelines
// ────────────────────────────────────────────────────────────────────────────

/// Generates a resume for `request.target_role` from raw candidate data.
///
/// Missing header/contact fields in the answer are filled from
/// `request.user_profile`.
pub async fn generate_structured_resume(
    generator: &dyn ContentGenerator,
    request: &GenerateRequest,
) -> Result<GenerationOutcome, GenerationFailure> {
    info!("Generating resume for role '{}'", request.target_role);

    let prompt = build_generate_prompt(request);
    let raw = call_generator(generator, &prompt).await?;

    let fallback = FallbackProfile::from_value(&request.user_profile);
    let resume_data = normalize(&raw, &fallback);
    info!(
        "Resume generated: {} skills, {} projects, {} experience entries",
        resume_data.skills.len(),
        resume_data.projects.len(),
        resume_data.experience.len()
    );

    Ok(GenerationOutcome {
        resume_data,
        target_role: request.target_role.clone(),
        target_company: None,
        tailored: false,
        generated_at: Utc::now(),
    })
}

/// Rewrites an existing resume for a job description.
///
/// The existing resume is normalized first; its header and contact act as
/// the fallback profile, so tailoring never loses contact details.
pub async fn tailor_resume(
    generator: &dyn ContentGenerator,
    request: &TailorRequest,
) -> Result<GenerationOutcome, GenerationFailure> {
    info!("Tailoring resume for role '{}'", request.target_role);

    let existing = normalize(
        as_map(Some(&request.existing_resume)),
        &FallbackProfile::default(),
    );
    let prompt = build_tailor_prompt(&existing, request);
    let raw = call_generator(generator, &prompt).await?;

    let resume_data = normalize(&raw, &FallbackProfile::from_resume(&existing));

    Ok(GenerationOutcome {
        resume_data,
        target_role: request.target_role.clone(),
        target_company: request
            .target_company
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::to_string),
        tailored: true,
        generated_at: Utc::now(),
    })
}

async fn call_generator(
    generator: &dyn ContentGenerator,
    prompt: &str,
) -> Result<Map<String, Value>, GenerationFailure> {
    let system = json_only(RESUME_SYSTEM);
    let answer = generator
        .generate(prompt, &system, RESUME_TEMPERATURE)
        .await
        .map_err(|e| {
            warn!("Content generator failed: {e}");
            GenerationFailure::Upstream(e)
        })?;

    match answer {
        Value::Object(map) => Ok(map),
        other => {
            let kind = kind_of(&other);
            warn!("Content generator returned {kind} instead of an object");
            Err(GenerationFailure::NotAMapping(kind))
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Prompt building
// ────────────────────────────────────────────────────────────────────────────

pub fn build_generate_prompt(request: &GenerateRequest) -> String {
    let profile = as_map(Some(&request.user_profile));
    let fallback = FallbackProfile::from_value(&request.user_profile);
    let name = if fallback.name.is_empty() {
        UNKNOWN_NAME.to_string()
    } else {
        fallback.name
    };
    let career_goal = to_nonempty_text(lookup(profile, keys::PROFILE_CAREER_GOAL))
        .unwrap_or_else(|| request.target_role.clone());
    let job_description = request
        .job_description
        .as_deref()
        .map(str::trim)
        .filter(|jd| !jd.is_empty())
        .unwrap_or(NO_JOB_DESCRIPTION);

    let skills = format_entries(&request.skills, format_skill);
    let projects = format_entries(request.projects.as_deref().unwrap_or_default(), format_project);
    let experience = format_entries(&request.experience, format_experience);
    let education = format_entries(&request.education, format_education);

    let skills = pretty(&skills);
    let projects = pretty(&projects);
    let experience = pretty(&experience);
    let education = pretty(&education);
    fill_template(
        GENERATE_PROMPT_TEMPLATE,
        &[
            ("target_role", request.target_role.as_str()),
            ("job_description", job_description),
            ("name", name.as_str()),
            ("email", fallback.email.as_str()),
            ("phone", fallback.phone.as_str()),
            ("address", fallback.address.as_str()),
            ("website", fallback.website.as_str()),
            ("linkedin", fallback.linkedin.as_str()),
            ("career_goal", career_goal.as_str()),
            ("skills_json", skills.as_str()),
            ("projects_json", projects.as_str()),
            ("experience_json", experience.as_str()),
            ("education_json", education.as_str()),
        ],
    )
}

pub fn build_tailor_prompt(existing: &Resume, request: &TailorRequest) -> String {
    let resume_json = serde_json::to_string_pretty(existing).unwrap_or_else(|_| "{}".to_string());
    let company = request
        .target_company
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .unwrap_or(NO_TARGET_COMPANY);

    fill_template(
        TAILOR_PROMPT_TEMPLATE,
        &[
            ("resume_json", resume_json.as_str()),
            ("target_role", request.target_role.as_str()),
            ("target_company", company),
            ("job_description", request.job_description.trim()),
        ],
    )
}

fn pretty(values: &[Value]) -> String {
    serde_json::to_string_pretty(values).unwrap_or_else(|_| "[]".to_string())
}

/// Formats candidate entries; entries that are not objects are skipped.
fn format_entries(entries: &[Value], format: fn(&Value) -> Option<Value>) -> Vec<Value> {
    let formatted: Vec<Value> = entries.iter().filter_map(format).collect();
    if formatted.len() < entries.len() {
        debug!(
            "Skipped {} unusable candidate entries",
            entries.len() - formatted.len()
        );
    }
    formatted
}

fn format_skill(entry: &Value) -> Option<Value> {
    match entry {
        Value::Object(map) => {
            let name = to_text(lookup(map, keys::SKILL_NAME));
            if name.is_empty() {
                return None;
            }
            Some(json!({
                "name": name,
                "level": to_level(lookup(map, keys::SKILL_LEVEL)),
                "category": to_nonempty_text(lookup(map, keys::SKILL_CATEGORY))
                    .unwrap_or_else(|| DEFAULT_SKILL_CATEGORY.to_string()),
            }))
        }
        Value::String(name) if !name.trim().is_empty() => Some(json!({
            "name": name.trim(),
            "level": DEFAULT_SKILL_LEVEL,
            "category": DEFAULT_SKILL_CATEGORY,
        })),
        _ => None,
    }
}

fn format_project(entry: &Value) -> Option<Value> {
    let map = entry.as_object()?;
    Some(json!({
        "title": to_text(lookup(map, keys::PROJECT_TITLE)),
        "description": to_text(lookup(map, keys::PROJECT_DESCRIPTION)),
        "technologies": to_text_list(lookup(map, keys::PROJECT_TECH_STACK), true),
        "highlights": to_text_list(lookup(map, keys::PROJECT_POINTS), false),
    }))
}

fn format_experience(entry: &Value) -> Option<Value> {
    let map = entry.as_object()?;
    Some(json!({
        "role": to_text(lookup(map, keys::EXPERIENCE_ROLE)),
        "company": to_text(lookup(map, keys::EXPERIENCE_COMPANY)),
        "location": to_text(lookup(map, keys::EXPERIENCE_LOCATION)),
        "duration": to_text(lookup(map, keys::EXPERIENCE_DURATION)),
        "points": to_text_list(lookup(map, keys::EXPERIENCE_POINTS), false),
    }))
}

fn format_education(entry: &Value) -> Option<Value> {
    let map = entry.as_object()?;
    Some(json!({
        "degree": to_text(lookup(map, keys::EDUCATION_DEGREE)),
        "institution": to_text(lookup(map, keys::EDUCATION_INSTITUTION)),
        "year": to_text(lookup(map, keys::EDUCATION_YEAR)),
        "details": to_text(lookup(map, keys::EDUCATION_DETAILS)),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::fake::ScriptedGenerator;

    fn request() -> GenerateRequest {
        GenerateRequest {
            user_profile: json!({
                "full_name": "Jane Doe",
                "email": "jane@x.com",
                "portfolio": "jane.dev"
            }),
            skills: vec![
                json!({"skill_name": "Rust", "level": 90}),
                json!({"name": "SQL"}),
                json!("Docker"),
                json!(42),
            ],
            experience: vec![json!({"title": "Engineer", "company": "Acme", "achievements": ["Shipped v2"]})],
            education: vec![json!({"degree": "BSc", "graduation_year": 2020, "gpa": "3.9"})],
            projects: Some(vec![json!({"name": "Ledger", "technologies": "Rust, Postgres"})]),
            target_role: "Backend Engineer".to_string(),
            job_description: None,
        }
    }

    // ── prompt building ─────────────────────────────────────────────────────

    #[test]
    fn test_generate_prompt_uses_profile_aliases() {
        let prompt = build_generate_prompt(&request());
        assert!(prompt.contains("- Full Name: Jane Doe"));
        assert!(prompt.contains("- Website: jane.dev"));
        assert!(prompt.contains("- Career Goal: Backend Engineer"));
        assert!(prompt.contains(NO_JOB_DESCRIPTION));
        assert!(!prompt.contains("{skills_json}"));
    }

    #[test]
    fn test_generate_prompt_formats_candidate_entries() {
        let prompt = build_generate_prompt(&request());
        assert!(prompt.contains("\"name\": \"Rust\""));
        assert!(prompt.contains("\"level\": 90"));
        // SQL has no level
        assert!(prompt.contains("\"level\": 50"));
        assert!(prompt.contains("\"category\": \"general\""));
        assert!(prompt.contains("\"name\": \"Docker\""));
        assert!(prompt.contains("\"year\": \"2020\""));
        assert!(prompt.contains("\"details\": \"3.9\""));
        assert!(prompt.contains("\"title\": \"Ledger\""));
        assert!(prompt.contains("\"Postgres\""));
        assert!(prompt.contains("\"role\": \"Engineer\""));
        assert!(prompt.contains("\"Shipped v2\""));
    }

    #[test]
    fn test_generate_prompt_unknown_name() {
        let mut req = request();
        req.user_profile = Value::Null;
        req.job_description = Some("Build payment APIs".to_string());
        let prompt = build_generate_prompt(&req);
        assert!(prompt.contains("- Full Name: Unknown"));
        assert!(prompt.contains("Build payment APIs"));
    }

    #[test]
    fn test_format_skill_drops_unusable_entries() {
        assert!(format_skill(&json!(42)).is_none());
        assert!(format_skill(&json!({"level": 80})).is_none());
        assert!(format_skill(&json!("  ")).is_none());
    }

    #[test]
    fn test_tailor_prompt_contains_resume_and_company_placeholder() {
        let existing = Resume::default();
        let req = TailorRequest {
            existing_resume: json!({}),
            job_description: " Rust services ".to_string(),
            target_role: "SRE".to_string(),
            target_company: Some("  ".to_string()),
        };
        let prompt = build_tailor_prompt(&existing, &req);
        assert!(prompt.contains("\"header\""));
        assert!(prompt.contains("Company: Not specified"));
        assert!(prompt.contains("Description: Rust services"));
    }

    #[test]
    fn test_generate_prompt_keeps_braces_in_job_description() {
        let mut req = request();
        req.job_description =
            Some("Must sign emails as {name} and list {skills_json}".to_string());
        let prompt = build_generate_prompt(&req);
        assert!(prompt.contains("Must sign emails as {name} and list {skills_json}"));
        assert!(prompt.contains("- Full Name: Jane Doe"));
    }

    #[test]
    fn test_tailor_prompt_keeps_braces_in_summary() {
        let existing = Resume {
            summary: "Owns {job_description} end to end".to_string(),
            ..Default::default()
        };
        let req = TailorRequest {
            existing_resume: json!({}),
            job_description: "Run the {target_company} platform".to_string(),
            target_role: "SRE".to_string(),
            target_company: Some("Acme".to_string()),
        };
        let prompt = build_tailor_prompt(&existing, &req);
        assert!(prompt.contains("Owns {job_description} end to end"));
        assert!(prompt.contains("Description: Run the {target_company} platform"));
        assert!(prompt.contains("Company: Acme"));
    }

    // ── generate ────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_generate_normalizes_answer_with_profile_fallback() {
        let generator = ScriptedGenerator::answering(json!({
            "header": {"name": "", "title": "Backend Engineer"},
            "skills": ["Rust", {"name": "SQL", "level": "85%"}],
            "projects": "not a list"
        }));
        let outcome = generate_structured_resume(&generator, &request())
            .await
            .unwrap();

        let resume = &outcome.resume_data;
        assert_eq!(resume.header.name, "Jane Doe");
        assert_eq!(resume.header.title, "Backend Engineer");
        assert_eq!(resume.contact.email, "jane@x.com");
        assert_eq!(resume.contact.website, "jane.dev");
        assert_eq!(resume.skills.len(), 2);
        assert_eq!(resume.skills[0].level, 70);
        assert_eq!(resume.skills[1].level, 85);
        assert!(resume.projects.is_empty());
        assert_eq!(outcome.target_role, "Backend Engineer");
        assert!(!outcome.tailored);
    }

    #[tokio::test]
    async fn test_generate_sends_system_prompt_and_temperature() {
        let generator = ScriptedGenerator::answering(json!({}));
        generate_structured_resume(&generator, &request())
            .await
            .unwrap();
        let calls = generator.calls();
        assert_eq!(calls.len(), 1);
        assert!((calls[0].temperature - 0.3).abs() < f32::EPSILON);
        assert!(calls[0].system.contains("RESUME JSON SCHEMA"));
        assert!(calls[0].system.contains("valid JSON only"));
    }

    #[tokio::test]
    async fn test_generate_rejects_non_object_answer() {
        let generator = ScriptedGenerator::answering(json!(["header"]));
        let err = generate_structured_resume(&generator, &request())
            .await
            .unwrap_err();
        assert!(matches!(err, GenerationFailure::NotAMapping("array")));
        // no retry on an unusable answer
        assert_eq!(generator.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_generate_surfaces_upstream_failure() {
        let generator = ScriptedGenerator::failing();
        let err = generate_structured_resume(&generator, &request())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            GenerationFailure::Upstream(LlmError::Api { status: 529, .. })
        ));
    }

    // ── tailor ──────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_tailor_keeps_existing_contact() {
        let generator = ScriptedGenerator::answering(json!({
            "header": {"title": "Site Reliability Engineer"},
            "summary": "Keeps systems up."
        }));
        let req = TailorRequest {
            existing_resume: json!({
                "header": {"name": "Jane Doe", "title": "Backend Engineer"},
                "contact": {"email": "jane@x.com", "phone": "555-0100"}
            }),
            job_description: "Own our on-call".to_string(),
            target_role: "SRE".to_string(),
            target_company: Some("Initech".to_string()),
        };
        let outcome = tailor_resume(&generator, &req).await.unwrap();
        let resume = &outcome.resume_data;
        assert_eq!(resume.header.name, "Jane Doe");
        assert_eq!(resume.header.title, "Site Reliability Engineer");
        assert_eq!(resume.contact.phone, "555-0100");
        assert_eq!(resume.summary, "Keeps systems up.");
        assert!(outcome.tailored);
        assert_eq!(outcome.target_company.as_deref(), Some("Initech"));

        let prompt = &generator.calls()[0].prompt;
        assert!(prompt.contains("jane@x.com"));
        assert!(prompt.contains("Company: Initech"));
    }
}
