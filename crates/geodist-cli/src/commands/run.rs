use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use geodist_core::chamfer::{ChamferMask, ChamferPreset};
use geodist_core::config::{ChamferSelection, GeodesicConfig, OutputKind};
use geodist_core::distance::{geodesic_distance_dyn, DistanceStats, DistanceValue};
use geodist_core::error::GeodistError;
use geodist_core::io::{load_binary_image, stack_slices};
use ndarray::ArrayD;
use tracing::debug;

use super::mask::PresetArg;
use crate::summary::print_run_summary;

#[derive(Clone, Copy, ValueEnum)]
pub enum OutputArg {
    F32,
    F64,
    U8,
    U16,
    U32,
}

impl From<OutputArg> for OutputKind {
    fn from(arg: OutputArg) -> Self {
        match arg {
            OutputArg::F32 => OutputKind::F32,
            OutputArg::F64 => OutputKind::F64,
            OutputArg::U8 => OutputKind::U8,
            OutputArg::U16 => OutputKind::U16,
            OutputArg::U32 => OutputKind::U32,
        }
    }
}

#[derive(Args)]
pub struct RunArgs {
    /// Marker image; several files are stacked into a volume
    #[arg(long, required = true, num_args = 1..)]
    pub marker: Vec<PathBuf>,

    /// Mask image; several files are stacked into a volume
    #[arg(long, required = true, num_args = 1..)]
    pub mask: Vec<PathBuf>,

    /// Config file (TOML)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Chamfer preset
    #[arg(long, value_enum)]
    pub preset: Option<PresetArg>,

    /// Comma-separated custom weights (orthogonal, diagonal, ...)
    #[arg(long, conflicts_with = "preset")]
    pub weights: Option<String>,

    /// Numeric type of the distance map
    #[arg(long, value_enum)]
    pub output_type: Option<OutputArg>,

    /// Keep raw chamfer units instead of dividing by the orthogonal weight
    #[arg(long)]
    pub raw: bool,

    /// Binarization threshold for input images (0.0-1.0)
    #[arg(long)]
    pub threshold: Option<f32>,
}

pub fn run(args: &RunArgs) -> Result<()> {
    let mut config = build_config(args)?;

    let marker = load_volume(&args.marker, config.threshold)?;
    let mask = load_volume(&args.mask, config.threshold)?;
    config.chamfer = resolve_chamfer(args, &config, mask.ndim())?;
    debug!(?config, "Resolved configuration");
    let chamfer = config.chamfer.build().context("Invalid chamfer mask")?;

    let start = Instant::now();
    let stats = match compute_stats(&marker, &mask, &chamfer, &config) {
        Ok(stats) => stats,
        Err(err @ GeodistError::Overflow { .. }) => {
            return Err(anyhow::Error::new(err).context(format!(
                "Distances exceed the {} range, try a wider --output-type",
                config.output
            )));
        }
        Err(err) => {
            return Err(err).context(format!("Propagation failed for {} output", config.output));
        }
    };

    print_run_summary(&config, mask.shape(), &stats, start.elapsed());
    Ok(())
}

pub fn build_config(args: &RunArgs) -> Result<GeodesicConfig> {
    let mut config = if let Some(ref config_path) = args.config {
        let contents = std::fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config {}", config_path.display()))?;
        toml::from_str(&contents).context("Invalid geodesic config")?
    } else {
        GeodesicConfig::default()
    };

    if let Some(preset) = args.preset {
        config.chamfer = ChamferSelection::Preset(preset.into());
    }
    if let Some(ref weights_str) = args.weights {
        let weights: Vec<f64> = weights_str
            .split(',')
            .map(|s| s.trim().parse::<f64>())
            .collect::<std::result::Result<_, _>>()
            .context("Invalid weights format (expected e.g. '3,4' or '5,7,11')")?;
        let rank = if args.mask.len() > 1 { 3 } else { 2 };
        config.chamfer = ChamferSelection::Custom { rank, weights };
    }
    if let Some(output) = args.output_type {
        config.output = output.into();
    }
    if args.raw {
        config.normalize = false;
    }
    if let Some(threshold) = args.threshold {
        if !(0.0..=1.0).contains(&threshold) {
            anyhow::bail!("Threshold must be within 0.0-1.0, got {threshold}");
        }
        config.threshold = threshold;
    }

    Ok(config)
}

/// Pick the chamfer selection for a volume of `rank`.
///
/// An explicit `--preset` must match the volume. Otherwise a preset from the
/// config (or the default) is swapped for its counterpart of that rank.
pub fn resolve_chamfer(
    args: &RunArgs,
    config: &GeodesicConfig,
    rank: usize,
) -> Result<ChamferSelection> {
    if let Some(preset) = args.preset {
        let preset = ChamferPreset::from(preset);
        if preset.rank() != rank {
            anyhow::bail!(
                "Preset {preset} is {}D but the input is a {rank}D volume",
                preset.rank()
            );
        }
        return Ok(ChamferSelection::Preset(preset));
    }
    config
        .chamfer
        .for_rank(rank)
        .with_context(|| format!("No chamfer mask for a {rank}D volume"))
}

/// Load one image as a 2D array, or several as a stacked 3D volume.
pub fn load_volume(paths: &[PathBuf], threshold: f32) -> Result<ArrayD<bool>> {
    let load = |path: &Path| {
        load_binary_image(path, threshold)
            .with_context(|| format!("Failed to load {}", path.display()))
    };

    if let [single] = paths {
        return Ok(load(single.as_path())?.into_dyn());
    }
    let slices = paths
        .iter()
        .map(|p| load(p.as_path()))
        .collect::<Result<Vec<_>>>()?;
    Ok(stack_slices(&slices)?.into_dyn())
}

fn compute_stats(
    marker: &ArrayD<bool>,
    mask: &ArrayD<bool>,
    chamfer: &ChamferMask,
    config: &GeodesicConfig,
) -> std::result::Result<DistanceStats, GeodistError> {
    match config.output {
        OutputKind::F32 => stats_as::<f32>(marker, mask, chamfer, config.normalize),
        OutputKind::F64 => stats_as::<f64>(marker, mask, chamfer, config.normalize),
        OutputKind::U8 => stats_as::<u8>(marker, mask, chamfer, config.normalize),
        OutputKind::U16 => stats_as::<u16>(marker, mask, chamfer, config.normalize),
        OutputKind::U32 => stats_as::<u32>(marker, mask, chamfer, config.normalize),
    }
}

fn stats_as<T: DistanceValue>(
    marker: &ArrayD<bool>,
    mask: &ArrayD<bool>,
    chamfer: &ChamferMask,
    normalize: bool,
) -> std::result::Result<DistanceStats, GeodistError> {
    Ok(geodesic_distance_dyn::<T>(marker, mask, chamfer, normalize)?.stats())
}
