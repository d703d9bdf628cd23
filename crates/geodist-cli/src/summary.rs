use std::path::PathBuf;
use std::time::Duration;

use console::Style;
use geodist_core::chamfer::{ChamferMask, ChamferPreset};
use geodist_core::config::{GeodesicConfig, OutputKind};
use geodist_core::distance::DistanceStats;

struct Styles {
    title: Style,
    header: Style,
    label: Style,
    value: Style,
    method: Style,
    disabled: Style,
    path: Style,
}

impl Styles {
    fn new() -> Self {
        Self {
            title: Style::new().cyan().bold(),
            header: Style::new().cyan().bold(),
            label: Style::new().dim(),
            value: Style::new().bold().white(),
            method: Style::new().green(),
            disabled: Style::new().dim().yellow(),
            path: Style::new().underlined(),
        }
    }
}

fn print_title(s: &Styles, title: &str) {
    println!();
    println!("  {}", s.title.apply_to(title));
    println!("  {}", s.title.apply_to("\u{2550}".repeat(title.chars().count())));
    println!();
}

pub fn print_mask_table(preset: ChamferPreset, mask: &ChamferMask) {
    let s = Styles::new();
    print_title(&s, &preset.to_string());

    println!(
        "  {:<14}{}",
        s.label.apply_to("Rank"),
        s.value.apply_to(format!("{}D", mask.rank()))
    );
    println!(
        "  {:<14}{:?}",
        s.label.apply_to("Weights"),
        mask.weights()
    );
    println!(
        "  {:<14}{:?}",
        s.label.apply_to("Int weights"),
        mask.int_weights()
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Offsets"),
        s.value.apply_to(format!(
            "{} ({} forward, {} backward)",
            mask.offsets().len(),
            mask.forward_offsets().len(),
            mask.backward_offsets().len()
        ))
    );
    println!();

    println!("  {}", s.header.apply_to("Forward offsets"));
    for offset in mask.forward_offsets() {
        println!(
            "    {:<16}{:<10}{}",
            format!("{:?}", offset.delta),
            s.value.apply_to(offset.weight),
            s.label.apply_to(offset.int_weight)
        );
    }
    println!();
}

pub fn print_run_summary(
    config: &GeodesicConfig,
    shape: &[usize],
    stats: &DistanceStats,
    elapsed: Duration,
) {
    let s = Styles::new();
    print_title(&s, "Geodesic Distance");

    println!(
        "  {:<14}{}",
        s.label.apply_to("Chamfer"),
        s.method.apply_to(&config.chamfer)
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Output"),
        s.method.apply_to(config.output)
    );
    if config.normalize {
        println!(
            "  {:<14}{}",
            s.label.apply_to("Units"),
            s.value.apply_to("axis steps")
        );
    } else {
        println!(
            "  {:<14}{}",
            s.label.apply_to("Units"),
            s.disabled.apply_to("raw chamfer weights")
        );
    }
    println!(
        "  {:<14}{}",
        s.label.apply_to("Shape"),
        s.value.apply_to(format_shape(shape))
    );
    println!();

    println!("  {}", s.header.apply_to("Sites"));
    print_stats_rows(&s, stats, config.output);
    println!(
        "    {:<12}{}",
        s.label.apply_to("Elapsed"),
        s.value.apply_to(format!("{:.1?}", elapsed))
    );
    println!();
}

pub fn print_batch_summary(
    chamfer: &str,
    output: OutputKind,
    markers: &[PathBuf],
    stats: &[DistanceStats],
    elapsed: Duration,
) {
    let s = Styles::new();
    print_title(&s, "Geodesic Batch");

    println!(
        "  {:<14}{}",
        s.label.apply_to("Chamfer"),
        s.method.apply_to(chamfer)
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Output"),
        s.method.apply_to(output)
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Markers"),
        s.value.apply_to(markers.len())
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Elapsed"),
        s.value.apply_to(format!("{:.1?}", elapsed))
    );
    println!();

    println!(
        "  {:<32}{:>10}{:>12}{:>12}",
        s.header.apply_to("Marker"),
        s.header.apply_to("Reached"),
        s.header.apply_to("Unreached"),
        s.header.apply_to("Max")
    );
    for (path, st) in markers.iter().zip(stats) {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        println!(
            "  {:<32}{:>10}{:>12}{:>12}",
            s.path.apply_to(name),
            s.value.apply_to(st.reached),
            s.value.apply_to(st.unreached),
            s.value.apply_to(format_distance(st.max_distance, output))
        );
    }
    println!();
}

fn print_stats_rows(s: &Styles, stats: &DistanceStats, output: OutputKind) {
    println!(
        "    {:<12}{}",
        s.label.apply_to("Reached"),
        s.value.apply_to(stats.reached)
    );
    if stats.unreached == 0 {
        println!(
            "    {:<12}{}",
            s.label.apply_to("Unreached"),
            s.disabled.apply_to("none")
        );
    } else {
        println!(
            "    {:<12}{}",
            s.label.apply_to("Unreached"),
            s.value.apply_to(stats.unreached)
        );
    }
    println!(
        "    {:<12}{}",
        s.label.apply_to("Excluded"),
        s.value.apply_to(stats.excluded)
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Max"),
        s.value.apply_to(format_distance(stats.max_distance, output))
    );
}

fn format_distance(value: f64, output: OutputKind) -> String {
    if output.is_bounded() {
        format!("{value:.0}")
    } else {
        format!("{value:.3}")
    }
}

fn format_shape(shape: &[usize]) -> String {
    shape
        .iter()
        .map(|n| n.to_string())
        .collect::<Vec<_>>()
        .join(" x ")
}
