use petition_classifier::{Envelope, PetitionError, Result};

#[test]
fn test_missing_argument_display() {
    let err = PetitionError::MissingArgument;
    assert_eq!(
        err.to_string(),
        "Missing required argument. Usage: classify-petition <base64_encoded_json>"
    );
}

#[test]
fn test_validation_display_is_bare_message() {
    let err = PetitionError::Validation("No query provided in the input".into());
    assert_eq!(err.to_string(), "No query provided in the input");
}

#[test]
fn test_api_error_display() {
    let err = PetitionError::Api {
        status: 500,
        message: "model crashed".into(),
    };
    assert_eq!(err.to_string(), "API error (500): model crashed");
}

#[test]
fn test_result_alias() {
    fn returns_error() -> Result<()> {
        Err(PetitionError::EmptyResponse)
    }
    assert!(returns_error().is_err());
}

#[test]
fn test_json_error_conversion() {
    fn parse() -> Result<serde_json::Value> {
        Ok(serde_json::from_str("{")?)
    }
    assert!(matches!(parse(), Err(PetitionError::Json(_))));
}

// ============================================================================
// API error classification
// ============================================================================

#[test]
fn api_class_errors() {
    assert!(
        PetitionError::Api {
            status: 503,
            message: "loading".into()
        }
        .is_api_error()
    );
    assert!(PetitionError::Http("connection reset".into()).is_api_error());
}

#[test]
fn non_api_errors() {
    assert!(!PetitionError::MissingArgument.is_api_error());
    assert!(!PetitionError::Decode("bad".into()).is_api_error());
    assert!(!PetitionError::MissingToken("HF_TOKEN".into()).is_api_error());
    assert!(!PetitionError::Unexpected("worker panicked".into()).is_api_error());
}

// ============================================================================
// Uniform rendering
// ============================================================================

#[test]
fn every_error_renders_as_failure_envelope() {
    let errors = [
        PetitionError::MissingArgument,
        PetitionError::Decode("invalid base64".into()),
        PetitionError::Validation("No query provided in the input".into()),
        PetitionError::Api {
            status: 500,
            message: "x".into(),
        },
        PetitionError::MissingToken("HF_TOKEN".into()),
        PetitionError::Unexpected("boom".into()),
    ];

    for err in errors {
        let message = err.to_string();
        let envelope = Envelope::from(err);
        assert!(!envelope.success);
        assert_eq!(envelope.exit_code(), 1);
        assert_eq!(envelope.error.as_deref(), Some(message.as_str()));
    }
}
