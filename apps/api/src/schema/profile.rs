//! Fallback values for header and contact fields, taken from the candidate's
//! known profile.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::resume::Resume;
use crate::schema::coerce::{as_map, to_text};
use crate::schema::keys::{self, lookup};

/// The candidate's known identity and contact details.
///
/// Built from an arbitrary mapping; unknown keys are ignored and every
/// field defaults to the empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FallbackProfile {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub website: String,
    pub linkedin: String,
}

impl FallbackProfile {
    /// Reads a profile mapping. `full_name`, `location` and `portfolio` are
    /// accepted as aliases; a non-object value yields an empty profile.
    pub fn from_value(value: &Value) -> Self {
        let map = as_map(Some(value));
        Self {
            name: to_text(lookup(map, keys::PROFILE_NAME)),
            phone: to_text(lookup(map, keys::PROFILE_PHONE)),
            email: to_text(lookup(map, keys::PROFILE_EMAIL)),
            address: to_text(lookup(map, keys::PROFILE_ADDRESS)),
            website: to_text(lookup(map, keys::PROFILE_WEBSITE)),
            linkedin: to_text(lookup(map, keys::PROFILE_LINKEDIN)),
        }
    }

    /// Uses an existing document's identity as the fallback, so a rewrite of
    /// that document keeps its header name and contact rows.
    pub fn from_resume(resume: &Resume) -> Self {
        Self {
            name: resume.header.name.clone(),
            phone: resume.contact.phone.clone(),
            email: resume.contact.email.clone(),
            address: resume.contact.address.clone(),
            website: resume.contact.website.clone(),
            linkedin: resume.contact.linkedin.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_value_reads_aliases() {
        let profile = FallbackProfile::from_value(&json!({
            "full_name": "Jane Doe",
            "location": "Berlin",
            "portfolio": "jane.dev",
            "email": "jane@x.com",
            "unrelated": true
        }));
        assert_eq!(profile.name, "Jane Doe");
        assert_eq!(profile.address, "Berlin");
        assert_eq!(profile.website, "jane.dev");
        assert_eq!(profile.email, "jane@x.com");
        assert_eq!(profile.phone, "");
    }

    #[test]
    fn test_location_preferred_over_address() {
        let profile = FallbackProfile::from_value(&json!({
            "address": "1 Main St",
            "location": "Berlin"
        }));
        assert_eq!(profile.address, "Berlin");
    }

    #[test]
    fn test_non_object_is_empty_profile() {
        assert_eq!(
            FallbackProfile::from_value(&json!(["jane"])),
            FallbackProfile::default()
        );
    }

    #[test]
    fn test_from_resume_copies_identity() {
        let mut resume = Resume::default();
        resume.header.name = "Jane".to_string();
        resume.header.title = "Engineer".to_string();
        resume.contact.linkedin = "in/jane".to_string();

        let profile = FallbackProfile::from_resume(&resume);
        assert_eq!(profile.name, "Jane");
        assert_eq!(profile.linkedin, "in/jane");
    }
}
