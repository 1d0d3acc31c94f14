//! Configuration types for pixel transform operations

use crate::error::{PixelOpsError, Result};
use crate::transforms::{BackgroundRemover, Inverter, PixelTransform, ThresholdMasker};
use serde::{Deserialize, Serialize};

/// Default RGB cutoff for dark background removal
pub const DEFAULT_BACKGROUND_THRESHOLD: u8 = 30;

/// Default brightness cutoff for threshold masking
pub const DEFAULT_BRIGHTNESS_THRESHOLD: u8 = 100;

/// Which per-pixel rule to apply
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TransformKind {
    /// Invert RGB of every pixel that is not fully transparent
    #[default]
    Invert,
    /// Make pixels with all channels below `threshold` transparent
    RemoveBackground { threshold: u8 },
    /// Make pixels with brightness not above `threshold` transparent white
    BrightnessMask { threshold: u8 },
}

impl TransformKind {
    /// Background removal with the default threshold
    #[must_use]
    pub fn remove_background() -> Self {
        Self::RemoveBackground {
            threshold: DEFAULT_BACKGROUND_THRESHOLD,
        }
    }

    /// Brightness masking with the default threshold
    #[must_use]
    pub fn brightness_mask() -> Self {
        Self::BrightnessMask {
            threshold: DEFAULT_BRIGHTNESS_THRESHOLD,
        }
    }

    /// Short name used in logs and metadata
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Invert => "invert",
            Self::RemoveBackground { .. } => "remove-background",
            Self::BrightnessMask { .. } => "mask",
        }
    }

    /// Threshold, for the transforms that take one
    #[must_use]
    pub fn threshold(&self) -> Option<u8> {
        match self {
            Self::Invert => None,
            Self::RemoveBackground { threshold } | Self::BrightnessMask { threshold } => {
                Some(*threshold)
            },
        }
    }

    /// Instantiate the transform
    #[must_use]
    pub fn build(&self) -> Box<dyn PixelTransform> {
        match *self {
            Self::Invert => Box::new(Inverter),
            Self::RemoveBackground { threshold } => Box::new(BackgroundRemover::new(threshold)),
            Self::BrightnessMask { threshold } => Box::new(ThresholdMasker::new(threshold)),
        }
    }
}

impl std::fmt::Display for TransformKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.threshold() {
            Some(threshold) => write!(f, "{} (threshold {})", self.name(), threshold),
            None => write!(f, "{}", self.name()),
        }
    }
}

/// Configuration for a transform run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransformConfig {
    /// Per-pixel rule
    pub kind: TransformKind,

    /// Emit detailed progress and timings
    pub verbose: bool,
}

impl Default for TransformConfig {
    fn default() -> Self {
        Self {
            kind: TransformKind::default(),
            verbose: false,
        }
    }
}

impl TransformConfig {
    /// Create a new configuration builder
    #[must_use]
    pub fn builder() -> TransformConfigBuilder {
        TransformConfigBuilder::default()
    }

    /// Configuration for a given transform with default options
    #[must_use]
    pub fn for_kind(kind: TransformKind) -> Self {
        Self {
            kind,
            ..Self::default()
        }
    }
}

/// Builder for `TransformConfig`
#[derive(Debug, Default)]
pub struct TransformConfigBuilder {
    config: TransformConfig,
    raw_threshold: Option<i64>,
}

impl TransformConfigBuilder {
    /// Set the transform kind
    #[must_use]
    pub fn kind(mut self, kind: TransformKind) -> Self {
        self.config.kind = kind;
        self
    }

    /// Set an untyped threshold value, checked against 0-255 in `build`
    ///
    /// Overrides the threshold carried by the kind. Ignored for `Invert`.
    #[must_use]
    pub fn threshold_value(mut self, threshold: i64) -> Self {
        self.raw_threshold = Some(threshold);
        self
    }

    /// Enable verbose progress output
    #[must_use]
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.config.verbose = verbose;
        self
    }

    /// Build and validate the configuration
    pub fn build(mut self) -> Result<TransformConfig> {
        if let Some(raw) = self.raw_threshold {
            let threshold = u8::try_from(raw).map_err(|_| {
                let recommended = match self.config.kind {
                    TransformKind::BrightnessMask { .. } => DEFAULT_BRIGHTNESS_THRESHOLD,
                    _ => DEFAULT_BACKGROUND_THRESHOLD,
                };
                PixelOpsError::config_value_error(
                    "threshold",
                    raw,
                    "0-255",
                    Some(i64::from(recommended)),
                )
            })?;

            self.config.kind = match self.config.kind {
                TransformKind::Invert => TransformKind::Invert,
                TransformKind::RemoveBackground { .. } => {
                    TransformKind::RemoveBackground { threshold }
                },
                TransformKind::BrightnessMask { .. } => TransformKind::BrightnessMask { threshold },
            };
        }

        Ok(self.config)
    }
}
