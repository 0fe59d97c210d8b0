//! Local model placement: which model, which device, where it is cached.

pub mod device;
pub mod source;

use std::path::PathBuf;

pub use device::Device;
pub use source::{DEFAULT_HYPOTHESIS_TEMPLATE, DEFAULT_MAX_LENGTH, LocalZeroShotModel};

/// Environment variable overriding the model cache directory.
pub const CACHE_DIR_ENV: &str = "PETITION_CLASSIFIER_CACHE_DIR";

/// Default directory for downloaded models.
///
/// `$PETITION_CLASSIFIER_CACHE_DIR`, else `<user cache>/petition-classifier/models`.
pub fn default_cache_dir() -> PathBuf {
    std::env::var(CACHE_DIR_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            dirs::cache_dir()
                .unwrap_or_else(|| PathBuf::from(".cache"))
                .join("petition-classifier")
                .join("models")
        })
}
