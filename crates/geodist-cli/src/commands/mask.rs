use anyhow::Result;
use clap::{Args, ValueEnum};
use geodist_core::chamfer::ChamferPreset;

use crate::summary::print_mask_table;

#[derive(Clone, Copy, ValueEnum)]
pub enum PresetArg {
    Chessboard,
    CityBlock,
    Borgefors,
    ChessKnight,
    Verwer,
    QuasiEuclidean,
    CityBlock3d,
    Chessboard3d,
    Borgefors3d,
    QuasiEuclidean3d,
    Svensson3d,
}

impl From<PresetArg> for ChamferPreset {
    fn from(arg: PresetArg) -> Self {
        match arg {
            PresetArg::Chessboard => ChamferPreset::Chessboard,
            PresetArg::CityBlock => ChamferPreset::CityBlock,
            PresetArg::Borgefors => ChamferPreset::Borgefors,
            PresetArg::ChessKnight => ChamferPreset::ChessKnight,
            PresetArg::Verwer => ChamferPreset::Verwer,
            PresetArg::QuasiEuclidean => ChamferPreset::QuasiEuclidean,
            PresetArg::CityBlock3d => ChamferPreset::CityBlock3D,
            PresetArg::Chessboard3d => ChamferPreset::Chessboard3D,
            PresetArg::Borgefors3d => ChamferPreset::Borgefors3D,
            PresetArg::QuasiEuclidean3d => ChamferPreset::QuasiEuclidean3D,
            PresetArg::Svensson3d => ChamferPreset::Svensson3D,
        }
    }
}

#[derive(Args)]
pub struct MaskArgs {
    /// Preset to describe
    #[arg(value_enum, default_value = "borgefors")]
    pub preset: PresetArg,
}

pub fn run(args: &MaskArgs) -> Result<()> {
    let preset = ChamferPreset::from(args.preset);
    print_mask_table(preset, &preset.mask());
    Ok(())
}
