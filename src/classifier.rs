//! Petition triage: severity always, department on request.

use std::sync::Arc;
use std::time::Instant;

use tracing::debug;

use crate::providers::ClassifyProvider;
use crate::telemetry;
use crate::types::{DEFAULT_CATEGORIES, PetitionRequest, Ranking, Severity, TriageResult};
use crate::{PetitionError, Result};

/// Classification call being made, used for metrics and logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operation {
    Severity,
    Department,
}

impl Operation {
    fn as_str(&self) -> &'static str {
        match self {
            Self::Severity => "severity",
            Self::Department => "department",
        }
    }
}

/// Assembles a [`TriageResult`] from one or two backend calls.
///
/// Only the first entry of each ranking is used; ties are whatever the
/// backend's order says.
pub struct PetitionClassifier {
    provider: Arc<dyn ClassifyProvider>,
    default_categories: Vec<String>,
}

impl PetitionClassifier {
    /// Create a classifier using the built-in department taxonomy.
    pub fn new(provider: Arc<dyn ClassifyProvider>) -> Self {
        Self {
            provider,
            default_categories: DEFAULT_CATEGORIES.iter().map(|c| c.to_string()).collect(),
        }
    }

    /// Replace the department labels used when a request carries none.
    pub fn default_categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.default_categories = categories.into_iter().map(Into::into).collect();
        self
    }

    /// Classify a validated request.
    ///
    /// The department call, when requested, runs before the severity call.
    pub async fn classify(&self, request: &PetitionRequest) -> Result<TriageResult> {
        let text = request
            .query_text()
            .ok_or_else(|| PetitionError::Validation(crate::input::NO_QUERY.to_string()))?;

        let department = if request.need_department {
            let labels = request.category_labels(&self.default_categories);
            let ranking = self.rank(Operation::Department, text, &labels).await?;
            Some(top_label(&ranking)?.to_string())
        } else {
            None
        };

        let ranking = self
            .rank(Operation::Severity, text, &Severity::LABELS)
            .await?;
        let severity: Severity = top_label(&ranking)?.parse()?;

        Ok(match department {
            Some(department) => TriageResult::with_department(severity, department),
            None => TriageResult::severity_only(severity),
        })
    }

    async fn rank(&self, operation: Operation, text: &str, labels: &[&str]) -> Result<Ranking> {
        let backend = self.provider.name().to_owned();
        let start = Instant::now();

        let result = self.provider.classify(text, labels).await;

        let status = if result.is_ok() { "ok" } else { "error" };
        metrics::counter!(telemetry::REQUESTS_TOTAL,
            "backend" => backend.clone(),
            "operation" => operation.as_str(),
            "status" => status,
        )
        .increment(1);
        metrics::histogram!(telemetry::REQUEST_DURATION_SECONDS,
            "backend" => backend.clone(),
            "operation" => operation.as_str(),
        )
        .record(start.elapsed().as_secs_f64());

        match &result {
            Ok(ranking) => {
                if let Some(top) = ranking.top() {
                    debug!(
                        backend = %backend,
                        operation = operation.as_str(),
                        label = %top.label,
                        score = top.score,
                        "classified"
                    );
                }
            }
            Err(e) => debug!(backend = %backend, operation = operation.as_str(), error = %e, "backend call failed"),
        }

        result
    }
}

fn top_label(ranking: &Ranking) -> Result<&str> {
    ranking
        .top()
        .map(|l| l.label.as_str())
        .ok_or(PetitionError::EmptyResponse)
}
