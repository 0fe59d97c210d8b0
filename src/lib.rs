//! petition-classifier - zero-shot triage for citizen petitions
//!
//! Assigns a petition a severity (`High`, `Medium`, `Low`) and, on request,
//! the department it belongs to, by asking a zero-shot classifier to rank
//! candidate labels. The classifier is either the hosted HuggingFace
//! inference API or an ONNX NLI model run in-process (`local-inference`
//! feature).
//!
//! The `classify-petition` binary wraps this in a one-shot command: a base64
//! JSON payload in, one JSON envelope out.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use petition_classifier::{HuggingFaceClient, PetitionClassifier, PetitionRequest};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> petition_classifier::Result<()> {
//!     let client = HuggingFaceClient::new("hf_your_token")?;
//!     let classifier = PetitionClassifier::new(Arc::new(client));
//!
//!     let request = PetitionRequest::new("No electricity for 3 days").with_department();
//!     let result = classifier.classify(&request).await?;
//!
//!     println!("{} -> {:?}", result.severity, result.department);
//!     Ok(())
//! }
//! ```

pub mod classifier;
pub mod config;
pub mod driver;
pub mod error;
pub mod input;
pub mod model;
pub mod providers;
pub mod telemetry;
pub mod types;
mod version;

// Re-export main types at crate root
pub use classifier::PetitionClassifier;
pub use config::{BackendConfig, BackendKind, Config, ConfigOverrides};
pub use error::{PetitionError, Result};
pub use providers::ClassifyProvider;
#[cfg(feature = "huggingface")]
pub use providers::HuggingFaceClient;
pub use types::{
    DEFAULT_CATEGORIES, Envelope, PetitionRequest, Ranking, ScoredLabel, Severity, TriageResult,
};
pub use version::{GIT_BRANCH, GIT_SHA, PKG_VERSION, git_dirty, version_string};
