//! Local zero-shot classification via ONNX Runtime.
//!
//! Zero-shot ranking is built on an NLI cross-encoder: every candidate label
//! is slotted into a hypothesis template, the model scores each
//! (text, hypothesis) pair, and the entailment logits are softmaxed across
//! labels.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use ort::session::Session;
use ort::session::builder::GraphOptimizationLevel;
use tracing::{debug, info, warn};

use super::traits::ClassifyProvider;
use crate::config::LocalConfig;
use crate::model::{Device, LocalZeroShotModel};
use crate::types::{Ranking, ScoredLabel};
use crate::{PetitionError, Result};

/// Resolve model and tokenizer paths, downloading if needed.
fn resolve_paths(model: &LocalZeroShotModel, cache_dir: &Path) -> Result<(PathBuf, PathBuf)> {
    if let LocalZeroShotModel::Custom {
        model_path,
        tokenizer_path,
        ..
    } = model
    {
        return Ok((model_path.clone(), tokenizer_path.clone()));
    }

    let repo_id = model.repo_id().ok_or_else(|| {
        PetitionError::Configuration(format!("no download source for model '{}'", model.name()))
    })?;
    download_model(repo_id, cache_dir)
}

/// A loaded NLI session plus its tokenizer.
struct NliSession {
    session: Session,
    tokenizer: tokenizers::Tokenizer,
    entailment_index: usize,
    token_type_ids: bool,
}

impl NliSession {
    /// Raw logits for one premise-hypothesis pair.
    fn logits(&mut self, premise: &str, hypothesis: &str) -> Result<Vec<f32>> {
        use ort::value::TensorRef;

        let encoding = self
            .tokenizer
            .encode((premise, hypothesis), true)
            .map_err(|e| PetitionError::DataError(format!("Tokenization failed: {}", e)))?;

        let input_ids: Vec<i64> = encoding.get_ids().iter().map(|&id| id as i64).collect();
        let attention_mask: Vec<i64> = encoding
            .get_attention_mask()
            .iter()
            .map(|&m| m as i64)
            .collect();
        let type_ids: Vec<i64> = encoding.get_type_ids().iter().map(|&t| t as i64).collect();

        let shape = [1_usize, input_ids.len()];
        let tensor_err =
            |name: &str, e: ort::Error| PetitionError::DataError(format!("Failed to create {name} tensor: {e}"));

        let input_ids_tensor = TensorRef::from_array_view((shape, input_ids.as_slice()))
            .map_err(|e| tensor_err("input_ids", e))?;
        let attention_mask_tensor = TensorRef::from_array_view((shape, attention_mask.as_slice()))
            .map_err(|e| tensor_err("attention_mask", e))?;

        let outputs = if self.token_type_ids {
            let token_type_ids_tensor = TensorRef::from_array_view((shape, type_ids.as_slice()))
                .map_err(|e| tensor_err("token_type_ids", e))?;
            self.session
                .run(ort::inputs![
                    "input_ids" => input_ids_tensor,
                    "attention_mask" => attention_mask_tensor,
                    "token_type_ids" => token_type_ids_tensor,
                ])
                .map_err(|e| PetitionError::DataError(format!("ONNX inference failed: {}", e)))?
        } else {
            self.session
                .run(ort::inputs![
                    "input_ids" => input_ids_tensor,
                    "attention_mask" => attention_mask_tensor,
                ])
                .map_err(|e| PetitionError::DataError(format!("ONNX inference failed: {}", e)))?
        };

        let logits = outputs
            .get("logits")
            .ok_or_else(|| PetitionError::DataError("No logits output found".to_string()))?;

        // try_extract_tensor returns (&Shape, &[T]); batch size is 1
        let (_, logits_data) = logits.try_extract_tensor::<f32>().map_err(|e| {
            PetitionError::DataError(format!("Failed to extract logits: {}", e))
        })?;

        Ok(logits_data.to_vec())
    }

    fn entailment_logit(&mut self, premise: &str, hypothesis: &str) -> Result<f32> {
        let logits = self.logits(premise, hypothesis)?;
        logits.get(self.entailment_index).copied().ok_or_else(|| {
            PetitionError::DataError(format!(
                "entailment index {} out of range for {} logits",
                self.entailment_index,
                logits.len()
            ))
        })
    }
}

/// Local zero-shot provider using ONNX Runtime.
///
/// The session is loaded once in [`OnnxZeroShotProvider::new`] and shared
/// with the blocking worker that runs each classification.
pub struct OnnxZeroShotProvider {
    session: Arc<Mutex<NliSession>>,
    model: LocalZeroShotModel,
    hypothesis_template: String,
    device: Device,
}

impl OnnxZeroShotProvider {
    /// Load the configured model, downloading it if not cached locally.
    pub fn new(config: &LocalConfig) -> Result<Self> {
        let (model_path, tokenizer_path) = resolve_paths(&config.model, &config.cache_dir)?;

        info!(
            model = config.model.name(),
            device = config.device.name(),
            path = %model_path.display(),
            "loading local zero-shot model"
        );

        if !config.hypothesis_template.contains("{}") {
            warn!(
                template = %config.hypothesis_template,
                "hypothesis template has no {{}} placeholder, labels will be appended"
            );
        }

        let session = build_session(&model_path, &config.device)?;
        let tokenizer = load_tokenizer(&tokenizer_path, config.model.max_length())?;

        Ok(Self {
            session: Arc::new(Mutex::new(NliSession {
                session,
                tokenizer,
                entailment_index: config.model.entailment_index(),
                token_type_ids: config.model.uses_token_type_ids(),
            })),
            model: config.model.clone(),
            hypothesis_template: config.hypothesis_template.clone(),
            device: config.device,
        })
    }

    pub fn model(&self) -> &LocalZeroShotModel {
        &self.model
    }

    pub fn device(&self) -> Device {
        self.device
    }

    /// Rank `labels` against `text` on the calling thread.
    pub fn classify_blocking(&self, text: &str, labels: &[&str]) -> Result<Ranking> {
        classify_with(&self.session, &self.hypothesis_template, text, labels)
    }
}

fn classify_with(
    session: &Mutex<NliSession>,
    template: &str,
    text: &str,
    labels: &[&str],
) -> Result<Ranking> {
    if labels.is_empty() {
        return Err(PetitionError::InvalidInput(
            "at least one candidate label is required".to_string(),
        ));
    }

    let mut session = session
        .lock()
        .map_err(|_| PetitionError::Unexpected("inference session lock poisoned".to_string()))?;

    let mut entailment = Vec::with_capacity(labels.len());
    for label in labels {
        let hypothesis = hypothesis(template, label);
        entailment.push(session.entailment_logit(text, &hypothesis)?);
    }

    Ok(rank_entailment(labels, &entailment))
}

#[async_trait]
impl ClassifyProvider for OnnxZeroShotProvider {
    fn name(&self) -> &str {
        "onnx"
    }

    async fn classify(&self, text: &str, labels: &[&str]) -> Result<Ranking> {
        let session = Arc::clone(&self.session);
        let template = self.hypothesis_template.clone();
        let text = text.to_string();
        let labels: Vec<String> = labels.iter().map(|l| l.to_string()).collect();

        debug!(model = self.model.name(), labels = labels.len(), "running local zero-shot");

        tokio::task::spawn_blocking(move || {
            let labels: Vec<&str> = labels.iter().map(String::as_str).collect();
            classify_with(&session, &template, &text, &labels)
        })
        .await
        .map_err(|e| PetitionError::Unexpected(format!("inference worker failed: {e}")))?
    }
}

/// Slot a label into the hypothesis template.
///
/// Templates without a `{}` placeholder get the label appended.
fn hypothesis(template: &str, label: &str) -> String {
    if template.contains("{}") {
        template.replacen("{}", label, 1)
    } else {
        format!("{template} {label}")
    }
}

/// Softmax entailment logits across labels and rank the result.
fn rank_entailment(labels: &[&str], entailment_logits: &[f32]) -> Ranking {
    let probs = softmax(entailment_logits);
    Ranking::from_scores(
        labels
            .iter()
            .zip(probs)
            .map(|(label, score)| ScoredLabel::new(*label, score))
            .collect(),
    )
}

/// Softmax function.
fn softmax(logits: &[f32]) -> Vec<f32> {
    let max = logits.iter().cloned().fold(f32::NEG_INFINITY, f32::max);
    let exps: Vec<f32> = logits.iter().map(|x| (x - max).exp()).collect();
    let sum: f32 = exps.iter().sum();
    exps.iter().map(|x| x / sum).collect()
}

/// Load a tokenizer that truncates the petition text, never the
/// hypothesis, to fit `max_length` tokens.
fn load_tokenizer(path: &Path, max_length: usize) -> Result<tokenizers::Tokenizer> {
    use tokenizers::{TruncationParams, TruncationStrategy};

    let mut tokenizer = tokenizers::Tokenizer::from_file(path)
        .map_err(|e| PetitionError::Configuration(format!("Failed to load tokenizer: {}", e)))?;

    tokenizer
        .with_truncation(Some(TruncationParams {
            max_length,
            strategy: TruncationStrategy::OnlyFirst,
            ..Default::default()
        }))
        .map_err(|e| {
            PetitionError::Configuration(format!("Failed to configure truncation: {}", e))
        })?;

    Ok(tokenizer)
}

/// Build an ONNX session with the appropriate execution provider.
fn build_session(model_path: &Path, device: &Device) -> Result<Session> {
    let builder = Session::builder()
        .map_err(|e| PetitionError::Configuration(format!("Failed to create session builder: {}", e)))?
        .with_optimization_level(GraphOptimizationLevel::Level3)
        .map_err(|e| PetitionError::Configuration(format!("Failed to set optimization level: {}", e)))?;

    let builder = match device {
        Device::Cpu => builder,
        #[cfg(feature = "cuda")]
        Device::Cuda { device_id } => {
            use ort::execution_providers::CUDAExecutionProvider;
            builder
                .with_execution_providers([
                    CUDAExecutionProvider::default()
                        .with_device_id(*device_id as i32)
                        .build(),
                ])
                .map_err(|e| {
                    PetitionError::Configuration(format!("Failed to configure CUDA: {}", e))
                })?
        }
    };

    builder
        .commit_from_file(model_path)
        .map_err(|e| PetitionError::Configuration(format!("Failed to load ONNX model: {}", e)))
}

/// Download model and tokenizer from HuggingFace Hub into `cache_dir`.
fn download_model(repo_id: &str, cache_dir: &Path) -> Result<(PathBuf, PathBuf)> {
    use hf_hub::api::sync::ApiBuilder;

    let api = ApiBuilder::new()
        .with_cache_dir(cache_dir.to_path_buf())
        .with_progress(false)
        .build()
        .map_err(|e| {
            PetitionError::Configuration(format!("Failed to initialize HF Hub API: {}", e))
        })?;

    let repo = api.model(repo_id.to_string());

    let model_path = repo.get("onnx/model.onnx").map_err(|e| {
        PetitionError::Configuration(format!("Failed to download ONNX model: {}", e))
    })?;

    let tokenizer_path = repo.get("tokenizer.json").map_err(|e| {
        PetitionError::Configuration(format!("Failed to download tokenizer: {}", e))
    })?;

    Ok((model_path, tokenizer_path))
}
