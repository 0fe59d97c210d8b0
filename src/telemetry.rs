//! Telemetry metric name constants.
//!
//! Consumers install their own `metrics` recorder (e.g. prometheus, statsd);
//! without a recorder installed, all metric calls are no-ops. The
//! `classify-petition` binary installs none.
//!
//! # Common labels
//!
//! - `backend`: provider name ("huggingface" or "onnx")
//! - `operation`: which call: "severity" or "department"
//! - `status`: outcome: "ok" or "error"

/// Total backend classification calls.
///
/// Labels: `backend`, `operation`, `status` ("ok" | "error").
pub const REQUESTS_TOTAL: &str = "petition_classifier_requests_total";

/// Backend call duration in seconds.
///
/// Labels: `backend`, `operation`.
pub const REQUEST_DURATION_SECONDS: &str = "petition_classifier_request_duration_seconds";
