use serde::{Deserialize, Serialize};

use crate::chamfer::{ChamferMask, ChamferPreset};
use crate::consts::DEFAULT_BINARY_THRESHOLD;
use crate::error::{GeodistError, Result};

/// Which chamfer mask a run uses.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum ChamferSelection {
    Preset(ChamferPreset),
    /// Base weights ordered orthogonal, diagonal, then higher-order classes.
    Custom { rank: usize, weights: Vec<f64> },
}

impl Default for ChamferSelection {
    fn default() -> Self {
        Self::Preset(ChamferPreset::default())
    }
}

impl ChamferSelection {
    pub fn build(&self) -> Result<ChamferMask> {
        match self {
            Self::Preset(preset) => Ok(preset.mask()),
            Self::Custom { rank, weights } => ChamferMask::new(*rank, weights),
        }
    }

    /// Adapt the selection to a lattice of `rank`.
    ///
    /// A preset of the other rank is swapped for its counterpart. A custom
    /// mask is never rewritten and must already match.
    pub fn for_rank(&self, rank: usize) -> Result<ChamferSelection> {
        match self {
            Self::Preset(preset) => preset.for_rank(rank).map(Self::Preset).ok_or_else(|| {
                GeodistError::InvalidMask(format!("{preset} has no {rank}D counterpart"))
            }),
            Self::Custom { rank: r, .. } if *r != rank => Err(GeodistError::InvalidMask(
                format!("custom {r}D weights cannot be applied to a {rank}D lattice"),
            )),
            Self::Custom { .. } => Ok(self.clone()),
        }
    }
}

impl std::fmt::Display for ChamferSelection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Preset(preset) => write!(f, "{preset}"),
            Self::Custom { rank, weights } => write!(f, "Custom {rank}D {weights:?}"),
        }
    }
}

/// Numeric type of the distance map.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputKind {
    #[default]
    F32,
    F64,
    U8,
    U16,
    U32,
}

impl OutputKind {
    pub fn is_bounded(self) -> bool {
        matches!(self, Self::U8 | Self::U16 | Self::U32)
    }
}

impl std::fmt::Display for OutputKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::F32 => write!(f, "f32"),
            Self::F64 => write!(f, "f64"),
            Self::U8 => write!(f, "u8"),
            Self::U16 => write!(f, "u16"),
            Self::U32 => write!(f, "u32"),
        }
    }
}

/// Settings for a geodesic distance run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeodesicConfig {
    /// Divide distances by the orthogonal step weight.
    #[serde(default = "default_normalize")]
    pub normalize: bool,
    #[serde(default)]
    pub output: OutputKind,
    /// Binarization threshold for marker and mask images, in [0.0, 1.0].
    #[serde(default = "default_threshold")]
    pub threshold: f32,
    #[serde(default)]
    pub chamfer: ChamferSelection,
}

fn default_normalize() -> bool {
    true
}
fn default_threshold() -> f32 {
    DEFAULT_BINARY_THRESHOLD
}

impl Default for GeodesicConfig {
    fn default() -> Self {
        Self {
            normalize: true,
            output: OutputKind::default(),
            threshold: DEFAULT_BINARY_THRESHOLD,
            chamfer: ChamferSelection::default(),
        }
    }
}
