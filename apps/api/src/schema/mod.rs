//! Schema normalizer: coerces an untrusted, loosely shaped mapping into the
//! canonical [`Resume`] document.
//!
//! # Guarantees
//! - Total: every input mapping produces a document; malformed data degrades
//!   to defaults instead of failing.
//! - Deterministic and side-effect free.
//! - Canonical documents pass through unchanged given the same fallback.
//!
//! # Filtering
//! Skills whose name is empty are dropped. Projects, experience and education
//! entries are kept as long as they are objects, even when every field is
//! empty, so their count matches the input.

pub mod coerce;
pub mod keys;
pub mod profile;
pub mod validate;

use serde_json::{Map, Value};
use tracing::debug;

use crate::models::resume::{Contact, Education, Experience, Header, Project, Resume, Skill};
use coerce::{as_list, as_map, kind_of, to_level, to_text, to_text_list, BARE_SKILL_LEVEL};
use keys::lookup;

pub use profile::FallbackProfile;
pub use validate::{validate, ValidationReport};

/// Normalizes a raw mapping into a schema-conformant [`Resume`].
///
/// `fallback` supplies `header.name` and the contact fields when `raw` does
/// not. `header.title` is never defaulted.
pub fn normalize(raw: &Map<String, Value>, fallback: &FallbackProfile) -> Resume {
    let header = as_map(lookup(raw, keys::HEADER));
    let contact = as_map(lookup(raw, keys::CONTACT));

    let resume = Resume {
        header: Header {
            name: text_or(header, keys::HEADER_NAME, &fallback.name),
            title: to_text(lookup(header, keys::HEADER_TITLE)),
        },
        contact: Contact {
            phone: text_or(contact, keys::CONTACT_PHONE, &fallback.phone),
            email: text_or(contact, keys::CONTACT_EMAIL, &fallback.email),
            address: text_or(contact, keys::CONTACT_ADDRESS, &fallback.address),
            website: text_or(contact, keys::CONTACT_WEBSITE, &fallback.website),
            linkedin: text_or(contact, keys::CONTACT_LINKEDIN, &fallback.linkedin),
        },
        summary: match lookup(raw, keys::SUMMARY) {
            Some(Value::String(s)) => s.trim().to_string(),
            _ => String::new(),
        },
        skills: normalize_skills(as_list(lookup(raw, keys::SKILLS))),
        projects: objects(as_list(lookup(raw, keys::PROJECTS)), "projects")
            .map(normalize_project)
            .collect(),
        experience: objects(as_list(lookup(raw, keys::EXPERIENCE)), "experience")
            .map(normalize_experience)
            .collect(),
        education: objects(as_list(lookup(raw, keys::EDUCATION)), "education")
            .map(normalize_education)
            .collect(),
    };

    debug!(
        skills = resume.skills.len(),
        projects = resume.projects.len(),
        experience = resume.experience.len(),
        education = resume.education.len(),
        "normalized resume"
    );

    resume
}

/// The raw value under `candidates`, else the fallback value.
fn text_or(map: &Map<String, Value>, candidates: &[&str], fallback: &str) -> String {
    coerce::to_nonempty_text(lookup(map, candidates)).unwrap_or_else(|| fallback.trim().to_string())
}

/// Object entries of a list; anything else is skipped.
fn objects<'a>(
    items: &'a [Value],
    section: &'static str,
) -> impl Iterator<Item = &'a Map<String, Value>> + 'a {
    items.iter().filter_map(move |item| match item {
        Value::Object(map) => Some(map),
        other => {
            debug!("skipping {} entry in {section}", kind_of(other));
            None
        }
    })
}

fn normalize_skills(items: &[Value]) -> Vec<Skill> {
    items
        .iter()
        .filter_map(|item| {
            let skill = match item {
                Value::Object(map) => Skill {
                    name: to_text(lookup(map, keys::SKILL_NAME)),
                    level: to_level(lookup(map, keys::SKILL_LEVEL)),
                },
                Value::String(name) => Skill {
                    name: name.trim().to_string(),
                    level: BARE_SKILL_LEVEL,
                },
                _ => return None,
            };
            if skill.name.is_empty() {
                debug!("dropping skill with empty name");
                return None;
            }
            Some(skill)
        })
        .collect()
}

fn normalize_project(map: &Map<String, Value>) -> Project {
    Project {
        title: to_text(lookup(map, keys::PROJECT_TITLE)),
        tech_stack: to_text_list(lookup(map, keys::PROJECT_TECH_STACK), true),
        points: to_text_list(lookup(map, keys::PROJECT_POINTS), false),
    }
}

fn normalize_experience(map: &Map<String, Value>) -> Experience {
    Experience {
        role: to_text(lookup(map, keys::EXPERIENCE_ROLE)),
        company: to_text(lookup(map, keys::EXPERIENCE_COMPANY)),
        location: to_text(lookup(map, keys::EXPERIENCE_LOCATION)),
        duration: to_text(lookup(map, keys::EXPERIENCE_DURATION)),
        points: to_text_list(lookup(map, keys::EXPERIENCE_POINTS), false),
    }
}

fn normalize_education(map: &Map<String, Value>) -> Education {
    Education {
        degree: to_text(lookup(map, keys::EDUCATION_DEGREE)),
        institution: to_text(lookup(map, keys::EDUCATION_INSTITUTION)),
        year: to_text(lookup(map, keys::EDUCATION_YEAR)),
        details: to_text(lookup(map, keys::EDUCATION_DETAILS)),
    }
}
