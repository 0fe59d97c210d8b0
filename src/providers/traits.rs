//! The classification backend seam.
//!
//! A backend ranks a fixed set of candidate labels against a piece of text.
//! Two implementations exist: [`HuggingFaceClient`](super::HuggingFaceClient)
//! calls the hosted inference API, and `OnnxZeroShotProvider` (feature
//! `local-inference`) runs an NLI model in-process. The classifier only
//! ever sees `Arc<dyn ClassifyProvider>`.
//!
//! # Example
//!
//! ```ignore
//! let ranking = provider.classify("Water supply cut", &["High", "Medium", "Low"]).await?;
//! let top = ranking.top().map(|l| l.label.as_str());
//! ```

use async_trait::async_trait;

use crate::Result;
use crate::types::Ranking;

/// Provider for zero-shot text classification.
#[async_trait]
pub trait ClassifyProvider: Send + Sync {
    /// Provider name for logging and metrics.
    fn name(&self) -> &str;

    /// Rank `labels` against `text`, highest confidence first.
    ///
    /// Implementations return `InvalidInput` for an empty label set.
    async fn classify(&self, text: &str, labels: &[&str]) -> Result<Ranking>;
}
