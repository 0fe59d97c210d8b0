//! Classification backends.
//!
//! This module contains the remote HuggingFace client and, with the
//! `local-inference` feature, the in-process ONNX provider. Both implement
//! [`ClassifyProvider`]; [`build_provider`] picks one from resolved
//! configuration.

use std::sync::Arc;

use tracing::info;

use crate::config::BackendConfig;
use crate::Result;

#[cfg(feature = "huggingface")]
pub mod huggingface;
#[cfg(feature = "local-inference")]
pub mod onnx_zero_shot;
pub mod traits;

#[cfg(feature = "huggingface")]
pub use huggingface::HuggingFaceClient;
#[cfg(feature = "local-inference")]
pub use onnx_zero_shot::OnnxZeroShotProvider;
pub use traits::ClassifyProvider;

/// Construct the backend described by `config`.
///
/// For the local backend this loads the model, so it runs once per process.
pub fn build_provider(config: &BackendConfig) -> Result<Arc<dyn ClassifyProvider>> {
    match config {
        BackendConfig::Remote(remote) => {
            info!(model = %remote.model, base_url = %remote.base_url, "using remote backend");
            remote_provider(remote)
        }
        BackendConfig::Local(local) => local_provider(local),
    }
}

#[cfg(feature = "huggingface")]
fn remote_provider(config: &crate::config::RemoteConfig) -> Result<Arc<dyn ClassifyProvider>> {
    Ok(Arc::new(HuggingFaceClient::from_config(config)?))
}

#[cfg(not(feature = "huggingface"))]
fn remote_provider(_config: &crate::config::RemoteConfig) -> Result<Arc<dyn ClassifyProvider>> {
    Err(crate::PetitionError::Unsupported("huggingface"))
}

#[cfg(feature = "local-inference")]
fn local_provider(config: &crate::config::LocalConfig) -> Result<Arc<dyn ClassifyProvider>> {
    Ok(Arc::new(OnnxZeroShotProvider::new(config)?))
}

#[cfg(not(feature = "local-inference"))]
fn local_provider(_config: &crate::config::LocalConfig) -> Result<Arc<dyn ClassifyProvider>> {
    Err(crate::PetitionError::Unsupported("local-inference"))
}
