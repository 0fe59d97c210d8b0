//! Catalogue of local zero-shot models.

use std::path::PathBuf;

/// Token limit assumed for custom models when none is configured.
pub const DEFAULT_MAX_LENGTH: usize = 512;

/// Hypothesis template used when none is configured.
pub const DEFAULT_HYPOTHESIS_TEMPLATE: &str = "This example is {}.";

/// Supported local zero-shot models.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LocalZeroShotModel {
    /// ONNX export of facebook/bart-large-mnli (default).
    #[default]
    BartLargeMnli,
    /// cross-encoder/nli-deberta-v3-base.
    NliDebertaV3Base,
    /// cross-encoder/nli-deberta-v3-small. Faster, slightly less accurate.
    NliDebertaV3Small,
    /// Custom model from local paths.
    Custom {
        model_path: PathBuf,
        tokenizer_path: PathBuf,
        /// Position of the entailment class in the model's logits.
        entailment_index: usize,
        /// Maximum input length in tokens.
        max_length: usize,
    },
}

impl LocalZeroShotModel {
    /// Look up a built-in model by its short name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "bart-large-mnli" => Some(Self::BartLargeMnli),
            "nli-deberta-v3-base" => Some(Self::NliDebertaV3Base),
            "nli-deberta-v3-small" => Some(Self::NliDebertaV3Small),
            _ => None,
        }
    }

    /// Get the HuggingFace repo ID for this model.
    pub fn repo_id(&self) -> Option<&'static str> {
        match self {
            Self::BartLargeMnli => Some("Xenova/bart-large-mnli"),
            Self::NliDebertaV3Base => Some("cross-encoder/nli-deberta-v3-base"),
            Self::NliDebertaV3Small => Some("cross-encoder/nli-deberta-v3-small"),
            Self::Custom { .. } => None,
        }
    }

    /// Get the model name for display.
    pub fn name(&self) -> &str {
        match self {
            Self::BartLargeMnli => "bart-large-mnli",
            Self::NliDebertaV3Base => "nli-deberta-v3-base",
            Self::NliDebertaV3Small => "nli-deberta-v3-small",
            Self::Custom { model_path, .. } => model_path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("custom"),
        }
    }

    /// Index of the entailment logit.
    ///
    /// BART MNLI orders contradiction, neutral, entailment; the
    /// cross-encoders order contradiction, entailment, neutral.
    pub fn entailment_index(&self) -> usize {
        match self {
            Self::BartLargeMnli => 2,
            Self::NliDebertaV3Base | Self::NliDebertaV3Small => 1,
            Self::Custom {
                entailment_index, ..
            } => *entailment_index,
        }
    }

    /// Maximum number of tokens per (text, hypothesis) pair.
    ///
    /// Longer petitions have their text truncated, never the hypothesis.
    pub fn max_length(&self) -> usize {
        match self {
            Self::BartLargeMnli => 1024,
            Self::NliDebertaV3Base | Self::NliDebertaV3Small => 512,
            Self::Custom { max_length, .. } => *max_length,
        }
    }

    /// Whether the exported graph takes a `token_type_ids` input.
    pub fn uses_token_type_ids(&self) -> bool {
        matches!(self, Self::NliDebertaV3Base | Self::NliDebertaV3Small)
    }
}
