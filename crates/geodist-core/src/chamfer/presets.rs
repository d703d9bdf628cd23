use serde::{Deserialize, Serialize};

use crate::consts::{
    BORGEFORS_2D_WEIGHTS, BORGEFORS_3D_WEIGHTS, CHESSKNIGHT_WEIGHTS, SVENSSON_WEIGHTS,
    VERWER_WEIGHTS,
};

use super::mask::ChamferMask;

/// Ready-made chamfer masks.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChamferPreset {
    /// 8-neighborhood, every step costs 1 (L-infinity distance).
    Chessboard,
    /// 4-neighborhood, every step costs 1 (L1 distance).
    CityBlock,
    /// 8-neighborhood with weights 3 and 4.
    #[default]
    Borgefors,
    /// 16-neighborhood with weights 5, 7 and 11.
    ChessKnight,
    /// 16-neighborhood with weights 12, 17 and 27.
    Verwer,
    /// 8-neighborhood with weights 1 and sqrt(2).
    QuasiEuclidean,
    /// 3D 6-neighborhood, every step costs 1.
    CityBlock3D,
    /// 3D 26-neighborhood, every step costs 1.
    Chessboard3D,
    /// 3D 26-neighborhood with weights 3, 4 and 5.
    Borgefors3D,
    /// 3D 26-neighborhood with weights 1, sqrt(2) and sqrt(3).
    QuasiEuclidean3D,
    /// 3D 26-neighborhood plus knight moves, weights 3, 4, 5 and 7.
    Svensson3D,
}

impl ChamferPreset {
    pub const ALL: [ChamferPreset; 11] = [
        Self::Chessboard,
        Self::CityBlock,
        Self::Borgefors,
        Self::ChessKnight,
        Self::Verwer,
        Self::QuasiEuclidean,
        Self::CityBlock3D,
        Self::Chessboard3D,
        Self::Borgefors3D,
        Self::QuasiEuclidean3D,
        Self::Svensson3D,
    ];

    /// Lattice dimensionality the preset applies to.
    pub fn rank(self) -> usize {
        match self {
            Self::Chessboard
            | Self::CityBlock
            | Self::Borgefors
            | Self::ChessKnight
            | Self::Verwer
            | Self::QuasiEuclidean => 2,
            _ => 3,
        }
    }

    /// The analogous preset for a lattice of `rank`, if there is one.
    ///
    /// Presets already of that rank map to themselves. Presets with knight
    /// moves have no counterpart of the other rank.
    pub fn for_rank(self, rank: usize) -> Option<ChamferPreset> {
        if self.rank() == rank {
            return Some(self);
        }
        match (self, rank) {
            (Self::Chessboard, 3) => Some(Self::Chessboard3D),
            (Self::CityBlock, 3) => Some(Self::CityBlock3D),
            (Self::Borgefors, 3) => Some(Self::Borgefors3D),
            (Self::QuasiEuclidean, 3) => Some(Self::QuasiEuclidean3D),
            (Self::Chessboard3D, 2) => Some(Self::Chessboard),
            (Self::CityBlock3D, 2) => Some(Self::CityBlock),
            (Self::Borgefors3D, 2) => Some(Self::Borgefors),
            (Self::QuasiEuclidean3D, 2) => Some(Self::QuasiEuclidean),
            _ => None,
        }
    }

    pub fn mask(self) -> ChamferMask {
        let sqrt2 = std::f64::consts::SQRT_2;
        let sqrt3 = 3f64.sqrt();
        match self {
            Self::Chessboard => ChamferMask::build(2, &[1.0, 1.0], &[1, 1]),
            Self::CityBlock => ChamferMask::build(2, &[1.0], &[1]),
            Self::Borgefors => ChamferMask::build(2, &BORGEFORS_2D_WEIGHTS, &[3, 4]),
            Self::ChessKnight => ChamferMask::build(2, &CHESSKNIGHT_WEIGHTS, &[5, 7, 11]),
            Self::Verwer => ChamferMask::build(2, &VERWER_WEIGHTS, &[12, 17, 27]),
            Self::QuasiEuclidean => ChamferMask::build(2, &[1.0, sqrt2], &[10, 14]),
            Self::CityBlock3D => ChamferMask::build(3, &[1.0], &[1]),
            Self::Chessboard3D => ChamferMask::build(3, &[1.0, 1.0, 1.0], &[1, 1, 1]),
            Self::Borgefors3D => ChamferMask::build(3, &BORGEFORS_3D_WEIGHTS, &[3, 4, 5]),
            Self::QuasiEuclidean3D => {
                ChamferMask::build(3, &[1.0, sqrt2, sqrt3], &[10, 14, 17])
            }
            Self::Svensson3D => ChamferMask::build(3, &SVENSSON_WEIGHTS, &[3, 4, 5, 7]),
        }
    }
}

impl std::fmt::Display for ChamferPreset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Chessboard => write!(f, "Chessboard (1,1)"),
            Self::CityBlock => write!(f, "City block (1)"),
            Self::Borgefors => write!(f, "Borgefors (3,4)"),
            Self::ChessKnight => write!(f, "Chess knight (5,7,11)"),
            Self::Verwer => write!(f, "Verwer (12,17,27)"),
            Self::QuasiEuclidean => write!(f, "Quasi-Euclidean (1,\u{221a}2)"),
            Self::CityBlock3D => write!(f, "City block 3D (1)"),
            Self::Chessboard3D => write!(f, "Chessboard 3D (1,1,1)"),
            Self::Borgefors3D => write!(f, "Borgefors 3D (3,4,5)"),
            Self::QuasiEuclidean3D => write!(f, "Quasi-Euclidean 3D (1,\u{221a}2,\u{221a}3)"),
            Self::Svensson3D => write!(f, "Svensson 3D (3,4,5,7)"),
        }
    }
}
