//! Scoring device selection.
//!
//! Accepts an optional hint (`cpu`, `cuda`, `cuda:N`, `mps`/`metal`,
//! `auto`) and resolves it to a concrete [`Device`]. Hardware detection is
//! only available with the `candle` feature; without it auto-selection
//! falls back to the CPU and explicit accelerator hints are trusted.

use crate::error::{EvalError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Concrete device specifier handed to the scoring pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Device {
    Cpu,
    Cuda(usize),
    Mps,
}

impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Device::Cpu => write!(f, "cpu"),
            Device::Cuda(ordinal) => write!(f, "cuda:{}", ordinal),
            Device::Mps => write!(f, "mps"),
        }
    }
}

impl FromStr for Device {
    type Err = EvalError;

    fn from_str(s: &str) -> Result<Self> {
        let hint = s.trim().to_lowercase();
        match hint.as_str() {
            "cpu" => Ok(Device::Cpu),
            "cuda" | "gpu" => Ok(Device::Cuda(0)),
            "mps" | "metal" => Ok(Device::Mps),
            other => match other.strip_prefix("cuda:") {
                Some(ordinal) => ordinal
                    .parse()
                    .map(Device::Cuda)
                    .map_err(|_| EvalError::InvalidDevice(s.to_string())),
                None => Err(EvalError::InvalidDevice(s.to_string())),
            },
        }
    }
}

/// Resolve an optional device hint. `None` or `"auto"` auto-selects.
pub fn select_device(hint: Option<&str>) -> Result<Device> {
    let device = match hint.map(str::trim) {
        None | Some("") => auto_select(),
        Some(h) if h.eq_ignore_ascii_case("auto") => auto_select(),
        Some(h) => {
            let device: Device = h.parse()?;
            if !is_available(device) {
                return Err(EvalError::InvalidDevice(format!(
                    "{} (not available on this machine)",
                    h
                )));
            }
            device
        }
    };
    debug!(%device, "selected scoring device");
    Ok(device)
}

fn auto_select() -> Device {
    [Device::Cuda(0), Device::Mps]
        .into_iter()
        .find(|d| backend_reports(*d))
        .unwrap_or(Device::Cpu)
}

fn is_available(device: Device) -> bool {
    match device {
        Device::Cpu => true,
        _ if cfg!(feature = "candle") => backend_reports(device),
        _ => true,
    }
}

#[cfg(feature = "candle")]
fn backend_reports(device: Device) -> bool {
    match device {
        Device::Cpu => true,
        Device::Cuda(_) => candle_core::utils::cuda_is_available(),
        Device::Mps => candle_core::utils::metal_is_available(),
    }
}

#[cfg(not(feature = "candle"))]
fn backend_reports(device: Device) -> bool {
    matches!(device, Device::Cpu)
}
