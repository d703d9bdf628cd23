use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Args;
use geodist_core::chamfer::{ChamferMask, ChamferPreset};
use geodist_core::config::OutputKind;
use geodist_core::consts::DEFAULT_BINARY_THRESHOLD;
use geodist_core::distance::{geodesic_distance_batch, DistanceStats, DistanceValue};
use geodist_core::error::GeodistError;
use geodist_core::io::load_binary_image;
use indicatif::{ProgressBar, ProgressStyle};
use ndarray::Array2;

use super::mask::PresetArg;
use super::run::OutputArg;
use crate::summary::print_batch_summary;

#[derive(Args)]
pub struct BatchArgs {
    /// Marker images, one propagation each
    #[arg(required = true)]
    pub markers: Vec<PathBuf>,

    /// Mask image shared by every marker
    #[arg(long)]
    pub mask: PathBuf,

    /// Chamfer preset (2D)
    #[arg(long, value_enum, default_value = "borgefors")]
    pub preset: PresetArg,

    /// Numeric type of the distance maps
    #[arg(long, value_enum, default_value = "f32")]
    pub output_type: OutputArg,

    /// Keep raw chamfer units
    #[arg(long)]
    pub raw: bool,

    /// Worker threads (defaults to one per core)
    #[arg(long)]
    pub threads: Option<usize>,
}

pub fn run(args: &BatchArgs) -> Result<()> {
    let preset = ChamferPreset::from(args.preset);
    if preset.rank() != 2 {
        anyhow::bail!("Batch mode works on 2D images; {preset} is a {}D preset", preset.rank());
    }
    let chamfer = preset.mask();
    let output = OutputKind::from(args.output_type);

    let mask = load_binary_image(&args.mask, DEFAULT_BINARY_THRESHOLD)
        .with_context(|| format!("Failed to load mask {}", args.mask.display()))?;

    let pb = ProgressBar::new(args.markers.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("Loading markers [{bar:40}] {pos}/{len}")?
            .progress_chars("=> "),
    );
    let mut markers = Vec::with_capacity(args.markers.len());
    for path in &args.markers {
        let marker = load_binary_image(path, DEFAULT_BINARY_THRESHOLD)
            .with_context(|| format!("Failed to load marker {}", path.display()))?;
        markers.push(marker);
        pb.inc(1);
    }
    pb.finish_and_clear();

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(threads) = args.threads {
        builder = builder.num_threads(threads);
    }
    let pool = builder.build().context("Failed to build thread pool")?;

    let start = Instant::now();
    let stats = pool
        .install(|| batch_stats(&markers, &mask, &chamfer, output, !args.raw))
        .with_context(|| format!("Batch propagation failed for {output} output"))?;

    print_batch_summary(&preset.to_string(), output, &args.markers, &stats, start.elapsed());
    Ok(())
}

fn batch_stats(
    markers: &[Array2<bool>],
    mask: &Array2<bool>,
    chamfer: &ChamferMask,
    output: OutputKind,
    normalize: bool,
) -> std::result::Result<Vec<DistanceStats>, GeodistError> {
    match output {
        OutputKind::F32 => stats_as::<f32>(markers, mask, chamfer, normalize),
        OutputKind::F64 => stats_as::<f64>(markers, mask, chamfer, normalize),
        OutputKind::U8 => stats_as::<u8>(markers, mask, chamfer, normalize),
        OutputKind::U16 => stats_as::<u16>(markers, mask, chamfer, normalize),
        OutputKind::U32 => stats_as::<u32>(markers, mask, chamfer, normalize),
    }
}

fn stats_as<T: DistanceValue>(
    markers: &[Array2<bool>],
    mask: &Array2<bool>,
    chamfer: &ChamferMask,
    normalize: bool,
) -> std::result::Result<Vec<DistanceStats>, GeodistError> {
    let maps = geodesic_distance_batch::<T, _, _>(markers, mask, chamfer, normalize)?;
    Ok(maps.iter().map(|map| map.stats()).collect())
}
