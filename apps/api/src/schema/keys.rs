//! Ordered candidate keys for every field the normalizer reads.
//!
//! The first entry of each list is the canonical key; the rest are aliases
//! tried in priority order. Lookups never go beyond what is listed here.

use serde_json::{Map, Value};

// ── top level ───────────────────────────────────────────────────────────────

pub const HEADER: &[&str] = &["header"];
pub const CONTACT: &[&str] = &["contact"];
pub const SUMMARY: &[&str] = &["summary"];
pub const SKILLS: &[&str] = &["skills"];
pub const PROJECTS: &[&str] = &["projects"];
pub const EXPERIENCE: &[&str] = &["experience"];
pub const EDUCATION: &[&str] = &["education"];

/// Top-level fields every canonical document carries, in schema order.
pub const REQUIRED_TOP_LEVEL: &[&str] = &[
    "header",
    "contact",
    "summary",
    "skills",
    "projects",
    "experience",
    "education",
];

// ── header / contact ────────────────────────────────────────────────────────

pub const HEADER_NAME: &[&str] = &["name"];
pub const HEADER_TITLE: &[&str] = &["title"];

pub const CONTACT_PHONE: &[&str] = &["phone"];
pub const CONTACT_EMAIL: &[&str] = &["email"];
pub const CONTACT_ADDRESS: &[&str] = &["address", "location"];
pub const CONTACT_WEBSITE: &[&str] = &["website"];
pub const CONTACT_LINKEDIN: &[&str] = &["linkedin"];

// ── candidate profile (fallback values) ─────────────────────────────────────

pub const PROFILE_NAME: &[&str] = &["name", "full_name"];
pub const PROFILE_PHONE: &[&str] = &["phone"];
pub const PROFILE_EMAIL: &[&str] = &["email"];
pub const PROFILE_ADDRESS: &[&str] = &["location", "address"];
pub const PROFILE_WEBSITE: &[&str] = &["website", "portfolio"];
pub const PROFILE_LINKEDIN: &[&str] = &["linkedin"];
pub const PROFILE_CAREER_GOAL: &[&str] = &["career_goal"];

// ── list entries ────────────────────────────────────────────────────────────

pub const SKILL_NAME: &[&str] = &["name", "skill_name", "skill"];
pub const SKILL_LEVEL: &[&str] = &["level", "proficiency"];
pub const SKILL_CATEGORY: &[&str] = &["category"];

pub const PROJECT_TITLE: &[&str] = &["title", "name"];
pub const PROJECT_TECH_STACK: &[&str] = &["tech_stack", "technologies"];
pub const PROJECT_POINTS: &[&str] = &["points", "highlights", "achievements"];
pub const PROJECT_DESCRIPTION: &[&str] = &["description"];

pub const EXPERIENCE_ROLE: &[&str] = &["role", "title"];
pub const EXPERIENCE_COMPANY: &[&str] = &["company"];
pub const EXPERIENCE_LOCATION: &[&str] = &["location"];
pub const EXPERIENCE_DURATION: &[&str] = &["duration"];
pub const EXPERIENCE_POINTS: &[&str] = &["points", "achievements", "highlights"];

pub const EDUCATION_DEGREE: &[&str] = &["degree"];
pub const EDUCATION_INSTITUTION: &[&str] = &["institution"];
pub const EDUCATION_YEAR: &[&str] = &["year", "graduation_year"];
pub const EDUCATION_DETAILS: &[&str] = &["details", "gpa"];

/// Returns the value under the first candidate key that holds something usable.
///
/// A key holds nothing usable when it is missing, `null`, or a blank string.
/// Arrays count as usable even when empty.
pub fn lookup<'a>(map: &'a Map<String, Value>, candidates: &[&str]) -> Option<&'a Value> {
    candidates
        .iter()
        .filter_map(|key| map.get(*key))
        .find(|value| is_usable(value))
}

fn is_usable(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::String(s) => !s.trim().is_empty(),
        _ => true,
    }
}
