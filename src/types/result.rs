//! Classification result and the JSON envelope printed on stdout.

use serde::{Deserialize, Serialize};

use super::Severity;
use crate::PetitionError;

/// Outcome of classifying one petition.
///
/// `label` and `department` are always equal; both are emitted because
/// downstream consumers read either name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriageResult {
    pub severity: Severity,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
}

impl TriageResult {
    /// Severity-only result.
    pub fn severity_only(severity: Severity) -> Self {
        Self {
            severity,
            label: None,
            department: None,
        }
    }

    /// Result with the top department label under both `label` and
    /// `department`.
    pub fn with_department(severity: Severity, department: impl Into<String>) -> Self {
        let department = department.into();
        Self {
            severity,
            label: Some(department.clone()),
            department: Some(department),
        }
    }
}

/// The single JSON object written to stdout per invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    pub success: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<TriageResult>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Envelope {
    pub fn success(result: TriageResult) -> Self {
        Self {
            success: true,
            result: Some(result),
            error: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            result: None,
            error: Some(message.into()),
        }
    }

    /// Process exit code for this outcome: 0 on success, 1 otherwise.
    pub fn exit_code(&self) -> u8 {
        if self.success { 0 } else { 1 }
    }

    /// Render as a single line of JSON.
    pub fn to_json(&self) -> String {
        // Only strings, bools and a unit enum are serialised here.
        serde_json::to_string(self).unwrap_or_else(|_| {
            r#"{"success":false,"error":"failed to serialise response"}"#.to_string()
        })
    }
}

impl From<crate::Result<TriageResult>> for Envelope {
    fn from(outcome: crate::Result<TriageResult>) -> Self {
        match outcome {
            Ok(result) => Self::success(result),
            Err(err) => Self::from(err),
        }
    }
}

impl From<PetitionError> for Envelope {
    fn from(err: PetitionError) -> Self {
        Self::failure(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_only_has_no_department_keys() {
        let json = serde_json::to_value(TriageResult::severity_only(Severity::Low)).unwrap();
        let keys: Vec<&String> = json.as_object().unwrap().keys().collect();
        assert_eq!(keys, ["severity"]);
        assert_eq!(json["severity"], "Low");
    }

    #[test]
    fn department_result_duplicates_label() {
        let result = TriageResult::with_department(Severity::High, "Electricity");
        assert_eq!(result.label, result.department);
        assert_eq!(
            serde_json::to_string(&result).unwrap(),
            r#"{"severity":"High","label":"Electricity","department":"Electricity"}"#
        );
    }

    #[test]
    fn success_envelope_shape() {
        let envelope = Envelope::success(TriageResult::severity_only(Severity::Medium));
        assert_eq!(
            envelope.to_json(),
            r#"{"success":true,"result":{"severity":"Medium"}}"#
        );
        assert_eq!(envelope.exit_code(), 0);
    }

    #[test]
    fn failure_envelope_shape() {
        let envelope = Envelope::from(PetitionError::MissingArgument);
        let json: serde_json::Value = serde_json::from_str(&envelope.to_json()).unwrap();
        assert_eq!(json["success"], false);
        assert!(json["error"].as_str().unwrap().contains("Missing required argument"));
        assert!(json.get("result").is_none());
        assert_eq!(envelope.exit_code(), 1);
    }
}
