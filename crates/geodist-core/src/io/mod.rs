pub mod mask_io;

pub use mask_io::{load_binary_image, save_binary_png, stack_slices};
