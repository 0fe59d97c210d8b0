//! Device configuration for local inference.

use std::fmt;
use std::str::FromStr;

use crate::PetitionError;

/// Compute device for local inference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Device {
    /// CPU execution (default).
    #[default]
    Cpu,

    /// CUDA GPU execution.
    #[cfg(feature = "cuda")]
    Cuda {
        /// GPU device ID (0-indexed).
        device_id: u32,
    },
}

impl Device {
    /// Get the device name for logging.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Cpu => "CPU",
            #[cfg(feature = "cuda")]
            Self::Cuda { .. } => "CUDA",
        }
    }
}

impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cpu => f.write_str("cpu"),
            #[cfg(feature = "cuda")]
            Self::Cuda { device_id } => write!(f, "cuda:{device_id}"),
        }
    }
}

/// Parses `cpu`, `cuda` or `cuda:N`.
///
/// CUDA devices are rejected unless the crate was built with `cuda`.
impl FromStr for Device {
    type Err = PetitionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_ascii_lowercase();
        if s == "cpu" {
            return Ok(Self::Cpu);
        }

        let Some(rest) = s.strip_prefix("cuda") else {
            return Err(PetitionError::Configuration(format!("unknown device '{s}'")));
        };

        let device_id = match rest.strip_prefix(':') {
            None if rest.is_empty() => 0,
            Some(id) => id
                .parse::<u32>()
                .map_err(|_| PetitionError::Configuration(format!("invalid CUDA device '{s}'")))?,
            None => return Err(PetitionError::Configuration(format!("unknown device '{s}'"))),
        };

        cuda_device(device_id)
    }
}

#[cfg(feature = "cuda")]
fn cuda_device(device_id: u32) -> Result<Device, PetitionError> {
    Ok(Device::Cuda { device_id })
}

#[cfg(not(feature = "cuda"))]
fn cuda_device(_device_id: u32) -> Result<Device, PetitionError> {
    Err(PetitionError::Unsupported("cuda"))
}
