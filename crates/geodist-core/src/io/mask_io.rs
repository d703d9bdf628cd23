use std::path::Path;

use image::{GrayImage, Luma};
use ndarray::{stack, Array2, Array3, ArrayView2, Axis};

use crate::error::{GeodistError, Result};

/// Load a grayscale image and binarize it: a pixel is `true` when its value,
/// scaled to [0.0, 1.0], exceeds `threshold`.
pub fn load_binary_image(path: &Path, threshold: f32) -> Result<Array2<bool>> {
    let img = image::open(path)?;
    let gray = img.to_luma16();
    let (w, h) = gray.dimensions();
    let mut data = Array2::from_elem((h as usize, w as usize), false);

    for row in 0..h as usize {
        for col in 0..w as usize {
            let pixel = gray.get_pixel(col as u32, row as u32);
            data[[row, col]] = pixel.0[0] as f32 / 65535.0 > threshold;
        }
    }

    Ok(data)
}

/// Save a binary array as an 8-bit PNG (true = white).
pub fn save_binary_png(data: &Array2<bool>, path: &Path) -> Result<()> {
    let (h, w) = data.dim();
    let mut img = GrayImage::new(w as u32, h as u32);
    for ((row, col), &v) in data.indexed_iter() {
        img.put_pixel(col as u32, row as u32, Luma([if v { 255 } else { 0 }]));
    }
    img.save_with_format(path, image::ImageFormat::Png)?;
    Ok(())
}

/// Stack equally-sized 2D slices into a volume with axes `(slice, row, col)`.
pub fn stack_slices(slices: &[Array2<bool>]) -> Result<Array3<bool>> {
    let first = slices.first().ok_or(GeodistError::EmptyStack)?;
    if let Some(bad) = slices.iter().find(|s| s.dim() != first.dim()) {
        return Err(GeodistError::DimensionMismatch {
            expected: first.shape().to_vec(),
            found: bad.shape().to_vec(),
        });
    }

    let views: Vec<ArrayView2<bool>> = slices.iter().map(|s| s.view()).collect();
    Ok(stack(Axis(0), &views)?)
}
