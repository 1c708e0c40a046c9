//! Extraction configuration.
//!
//! [`ExtractionConfig`] carries the per-pipeline knobs: sniff window size,
//! decode deadline, normalization toggle. Defaults are sensible for library
//! use; the CLI loads overrides from a TOML file.

use crate::error::{ExtractError, Result};
use crate::sniff::{DEFAULT_SNIFF_LEN, MIN_SNIFF_LEN};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Configuration for a [`crate::Pipeline`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExtractionConfig {
    /// How many leading bytes the sniffer may examine. Clamped up to the
    /// fixed-offset minimum at load time.
    pub sniff_window: usize,

    /// Per-call decode deadline in milliseconds. `None` means no deadline.
    ///
    /// Cancellation is cooperative: a decoder that never yields is only
    /// reported as timed out once it returns.
    pub timeout_ms: Option<u64>,

    /// Whether to normalize decoder output (BOM strip, `\n` line endings).
    /// On by default; disable to see decoder output verbatim.
    pub normalize: bool,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            sniff_window: DEFAULT_SNIFF_LEN,
            timeout_ms: None,
            normalize: true,
        }
    }
}

impl ExtractionConfig {
    /// The decode deadline as a [`Duration`], if configured.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }

    /// Effective sniff window, never below [`MIN_SNIFF_LEN`].
    pub fn effective_sniff_window(&self) -> usize {
        self.sniff_window.max(MIN_SNIFF_LEN)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// `ExtractError::Io` if the file cannot be read, `Validation` if it is
    /// not valid TOML for this schema.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;
        toml::from_str(&raw).map_err(|e| ExtractError::Validation {
            message: format!("invalid config file '{}': {}", path.display(), e),
            source: Some(Box::new(e)),
        })
    }
}
