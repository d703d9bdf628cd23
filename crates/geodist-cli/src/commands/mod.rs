pub mod batch;
pub mod config;
pub mod mask;
pub mod run;
