//! Decoding of the base64 JSON payload passed on the command line.
//!
//! The payload goes through three layers: base64 (standard alphabet,
//! padded; ASCII whitespace anywhere is skipped, so line-wrapped output of
//! `base64` is accepted), UTF-8, then JSON. Each layer fails with
//! [`PetitionError::Decode`]; a payload that decodes but carries no usable
//! query fails with [`PetitionError::Validation`].

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::types::PetitionRequest;
use crate::{PetitionError, Result};

/// Message for a payload whose `query` is missing or blank.
pub const NO_QUERY: &str = "No query provided in the input";

/// Message for a department request with an explicitly empty label list.
pub const NO_CATEGORIES: &str = "No categories provided in the input";

/// Decode and validate the command-line payload.
///
/// `None` means the argument was not given at all.
pub fn decode_payload(arg: Option<&str>) -> Result<PetitionRequest> {
    let arg = arg.ok_or(PetitionError::MissingArgument)?;
    let request = decode_request(arg)?;
    validate(&request)?;
    Ok(request)
}

/// Decode a payload without validating its content.
pub fn decode_request(arg: &str) -> Result<PetitionRequest> {
    let compact: String = arg.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    let bytes = STANDARD
        .decode(compact)
        .map_err(|e| PetitionError::Decode(format!("invalid base64: {e}")))?;

    let text = String::from_utf8(bytes)
        .map_err(|e| PetitionError::Decode(format!("invalid UTF-8: {e}")))?;

    serde_json::from_str(&text).map_err(|e| PetitionError::Decode(format!("invalid JSON: {e}")))
}

/// Check that the request can be classified.
pub fn validate(request: &PetitionRequest) -> Result<()> {
    if request.query_text().is_none() {
        return Err(PetitionError::Validation(NO_QUERY.to_string()));
    }

    if request.need_department
        && request
            .categories
            .as_ref()
            .is_some_and(|categories| categories.is_empty())
    {
        return Err(PetitionError::Validation(NO_CATEGORIES.to_string()));
    }

    Ok(())
}

/// Encode a JSON value the way callers are expected to build the argument.
pub fn encode_payload(payload: &serde_json::Value) -> String {
    STANDARD.encode(payload.to_string())
}
