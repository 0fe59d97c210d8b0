//! Public types for the petition classifier.

mod ranking;
mod request;
mod result;
mod severity;

pub use ranking::{Ranking, ScoredLabel};
pub use request::{DEFAULT_CATEGORIES, PetitionRequest};
pub use result::{Envelope, TriageResult};
pub use severity::Severity;
