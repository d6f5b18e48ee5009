use serde::{Deserialize, Serialize};
use vm_core::BorderMode;

/// Orders above this would need more than `2^16` cache slots on one level.
pub const MAX_SUPPORTED_ORDER: usize = 16;

pub const DEFAULT_MAX_ORDER: usize = 8;

/// Settings for kernel-built derivative engines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DerivativeConfig {
    /// Border extrapolation used by every derivative filter.
    pub border: BorderMode<f32>,
    /// Highest derivative order a caller may request.
    pub max_order: usize,
}

impl Default for DerivativeConfig {
    fn default() -> Self {
        Self {
            border: BorderMode::Clamp,
            max_order: DEFAULT_MAX_ORDER,
        }
    }
}
