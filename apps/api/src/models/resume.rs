//! The canonical resume document.
//!
//! Every field is always present once a document has passed through
//! `schema::normalize`. Lists are never null; strings default to empty.

use serde::{Deserialize, Serialize};

/// Upper bound (inclusive) of a skill's proficiency level.
pub const MAX_SKILL_LEVEL: u8 = 100;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resume {
    pub header: Header,
    pub contact: Contact,
    pub summary: String,
    /// Display order is relevance order, chosen upstream.
    pub skills: Vec<Skill>,
    pub projects: Vec<Project>,
    pub experience: Vec<Experience>,
    pub education: Vec<Education>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    pub name: String,
    /// Role-specific; never taken from the candidate profile.
    pub title: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub phone: String,
    pub email: String,
    pub address: String,
    pub website: String,
    pub linkedin: String,
}

impl Contact {
    /// Contact fields paired with their display label, in render order.
    pub fn labelled(&self) -> [(&'static str, &str); 5] {
        [
            ("phone", self.phone.as_str()),
            ("email", self.email.as_str()),
            ("address", self.address.as_str()),
            ("website", self.website.as_str()),
            ("linkedin", self.linkedin.as_str()),
        ]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skill {
    pub name: String,
    /// 0 to 100 inclusive.
    pub level: u8,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub title: String,
    pub tech_stack: Vec<String>,
    pub points: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Experience {
    pub role: String,
    pub company: String,
    pub location: String,
    pub duration: String,
    pub points: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Education {
    pub degree: String,
    pub institution: String,
    pub year: String,
    pub details: String,
}
