//! The decoded classification request.

use serde::Deserialize;

/// Department taxonomy used when the request carries no `categories`.
pub const DEFAULT_CATEGORIES: [&str; 8] = [
    "Electricity",
    "Panchayat",
    "Police",
    "Health",
    "Education",
    "Transport",
    "Highways",
    "General",
];

/// A petition to classify, as carried in the base64 JSON payload.
///
/// Unknown fields are ignored. `categories: null` is the same as leaving
/// it out.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct PetitionRequest {
    /// Free-text petition body.
    #[serde(default)]
    pub query: Option<String>,

    /// Candidate department labels.
    #[serde(default)]
    pub categories: Option<Vec<String>>,

    /// Whether to also classify the department.
    #[serde(default)]
    pub need_department: bool,
}

impl PetitionRequest {
    /// Create a severity-only request for the given text.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: Some(query.into()),
            ..Default::default()
        }
    }

    /// Ask for a department classification as well.
    pub fn with_department(mut self) -> Self {
        self.need_department = true;
        self
    }

    /// Restrict department classification to the given labels.
    pub fn categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.categories = Some(categories.into_iter().map(Into::into).collect());
        self
    }

    /// The query text, if present and not blank.
    pub fn query_text(&self) -> Option<&str> {
        self.query.as_deref().filter(|q| !q.trim().is_empty())
    }

    /// Candidate department labels, falling back to `defaults` when the
    /// request did not provide any.
    pub fn category_labels<'a>(&'a self, defaults: &'a [String]) -> Vec<&'a str> {
        match &self.categories {
            Some(categories) => categories.iter().map(String::as_str).collect(),
            None => defaults.iter().map(String::as_str).collect(),
        }
    }
}
