/// Scale applied to non-integral weight sets when deriving integer weights:
/// the orthogonal step becomes this many integer units.
pub const INTEGER_WEIGHT_SCALE: f64 = 10.0;

/// Largest offset component enumerated when building a chamfer mask.
pub const MAX_OFFSET_RADIUS: isize = 2;

/// Default binarization threshold for mask and marker images (fraction of full scale).
pub const DEFAULT_BINARY_THRESHOLD: f32 = 0.5;

/// Minimum number of markers in a batch before work is spread over the Rayon pool.
pub const PARALLEL_BATCH_THRESHOLD: usize = 2;

/// Borgefors 3-4 weights, the default 2D preset.
pub const BORGEFORS_2D_WEIGHTS: [f64; 2] = [3.0, 4.0];

/// Chess-knight 5-7-11 weights (5x5 neighborhood).
pub const CHESSKNIGHT_WEIGHTS: [f64; 3] = [5.0, 7.0, 11.0];

/// Verwer 12-17-27 weights (5x5 neighborhood).
pub const VERWER_WEIGHTS: [f64; 3] = [12.0, 17.0, 27.0];

/// Borgefors 3-4-5 weights, the default 3D preset.
pub const BORGEFORS_3D_WEIGHTS: [f64; 3] = [3.0, 4.0, 5.0];

/// Svensson 3-4-5-7 weights (3D neighborhood with knight moves).
pub const SVENSSON_WEIGHTS: [f64; 4] = [3.0, 4.0, 5.0, 7.0];
