//! One invocation, start to finish.
//!
//! ```text
//! START ──config──▶ DECODE ──▶ CLASSIFY ──▶ EMIT_SUCCESS (exit 0)
//!   │                 │           │
//!   └─────────────────┴───────────┴───────▶ EMIT_ERROR   (exit 1)
//! ```
//!
//! START resolves configuration, which includes the token check for the
//! remote backend, so a missing token is reported before any input is
//! decoded or any model is loaded.

use std::sync::Arc;

use tracing::debug;

use crate::classifier::PetitionClassifier;
use crate::config::Config;
use crate::input;
use crate::providers::{ClassifyProvider, build_provider};
use crate::types::{Envelope, TriageResult};
use crate::Result;

/// Run one classification with the process environment.
pub async fn run(payload: Option<&str>, config: &Config) -> Result<TriageResult> {
    run_with_env(payload, config, |name| std::env::var(name).ok()).await
}

/// Run one classification with an explicit environment lookup.
pub async fn run_with_env<F>(payload: Option<&str>, config: &Config, env: F) -> Result<TriageResult>
where
    F: Fn(&str) -> Option<String>,
{
    let backend = config.backend_config_with(env)?;
    debug!(backend = ?backend.kind(), "configuration resolved");

    let request = input::decode_payload(payload)?;
    let provider = build_provider(&backend)?;

    classify(&request, provider, config).await
}

/// Decode and classify with an already constructed backend.
pub async fn run_with_provider(
    payload: Option<&str>,
    provider: Arc<dyn ClassifyProvider>,
    config: &Config,
) -> Result<TriageResult> {
    let request = input::decode_payload(payload)?;
    classify(&request, provider, config).await
}

async fn classify(
    request: &crate::types::PetitionRequest,
    provider: Arc<dyn ClassifyProvider>,
    config: &Config,
) -> Result<TriageResult> {
    PetitionClassifier::new(provider)
        .default_categories(config.default_categories().iter().cloned())
        .classify(request)
        .await
}

/// Run and wrap the outcome in the stdout envelope.
pub async fn execute(payload: Option<&str>, config: &Config) -> Envelope {
    Envelope::from(run(payload, config).await)
}
