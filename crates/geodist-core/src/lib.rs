pub mod chamfer;
pub mod config;
pub mod consts;
pub mod distance;
pub mod error;
pub mod io;
