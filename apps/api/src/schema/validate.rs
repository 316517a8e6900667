use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::schema::keys::REQUIRED_TOP_LEVEL;

/// Advisory report of which top-level fields a document lacks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub valid: bool,
    pub missing_fields: Vec<String>,
    pub message: String,
}

/// Reports which of the seven required top-level fields are absent.
///
/// Only presence is checked; a field holding `null` or a wrong type counts as
/// present. A non-object document is missing every field. This is a
/// diagnostic, never a gate: normalization and rendering do not consult it.
pub fn validate(doc: &Value) -> ValidationReport {
    let missing_fields: Vec<String> = REQUIRED_TOP_LEVEL
        .iter()
        .filter(|field| doc.as_object().map_or(true, |m| !m.contains_key(**field)))
        .map(|field| field.to_string())
        .collect();

    let message = if missing_fields.is_empty() {
        "Valid resume data".to_string()
    } else {
        format!("Missing fields: {}", missing_fields.join(", "))
    };

    ValidationReport {
        valid: missing_fields.is_empty(),
        missing_fields,
        message,
    }
}
