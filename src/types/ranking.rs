//! Ranked output of a zero-shot classification call.

use serde::{Deserialize, Serialize};

/// A candidate label with its confidence score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredLabel {
    pub label: String,
    pub score: f32,
}

impl ScoredLabel {
    pub fn new(label: impl Into<String>, score: f32) -> Self {
        Self {
            label: label.into(),
            score,
        }
    }
}

/// Candidate labels ordered by confidence, highest first.
///
/// The order is whatever the backend produced; callers only ever read the
/// first entry and never re-rank.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Ranking {
    pub labels: Vec<ScoredLabel>,
}

impl Ranking {
    /// Wrap labels that are already in ranked order.
    pub fn from_ranked(labels: Vec<ScoredLabel>) -> Self {
        Self { labels }
    }

    /// Rank labels by descending score. Equal scores keep their input order.
    pub fn from_scores(labels: Vec<ScoredLabel>) -> Self {
        let mut labels = labels;
        labels.sort_by(|a, b| b.score.total_cmp(&a.score));
        Self { labels }
    }

    /// The top-ranked label, if any.
    pub fn top(&self) -> Option<&ScoredLabel> {
        self.labels.first()
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Score for a specific label.
    pub fn score_of(&self, label: &str) -> Option<f32> {
        self.labels
            .iter()
            .find(|l| l.label == label)
            .map(|l| l.score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_scores_sorts_descending() {
        let ranking = Ranking::from_scores(vec![
            ScoredLabel::new("Low", 0.1),
            ScoredLabel::new("High", 0.7),
            ScoredLabel::new("Medium", 0.2),
        ]);
        let order: Vec<&str> = ranking.labels.iter().map(|l| l.label.as_str()).collect();
        assert_eq!(order, ["High", "Medium", "Low"]);
    }

    #[test]
    fn from_scores_ties_keep_input_order() {
        let ranking = Ranking::from_scores(vec![
            ScoredLabel::new("Police", 0.5),
            ScoredLabel::new("Health", 0.5),
        ]);
        assert_eq!(ranking.top().unwrap().label, "Police");
    }

    #[test]
    fn from_ranked_preserves_backend_order() {
        // Even when scores disagree, the backend's order is authoritative.
        let ranking = Ranking::from_ranked(vec![
            ScoredLabel::new("Transport", 0.3),
            ScoredLabel::new("Highways", 0.4),
        ]);
        assert_eq!(ranking.top().unwrap().label, "Transport");
    }

    #[test]
    fn empty_ranking_has_no_top() {
        let ranking = Ranking::default();
        assert!(ranking.is_empty());
        assert!(ranking.top().is_none());
    }

    #[test]
    fn score_lookup() {
        let ranking = Ranking::from_ranked(vec![ScoredLabel::new("General", 0.9)]);
        assert_eq!(ranking.score_of("General"), Some(0.9));
        assert_eq!(ranking.score_of("Police"), None);
    }
}
