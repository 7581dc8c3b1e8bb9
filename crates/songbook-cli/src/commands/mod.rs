pub mod config;
pub mod entry;

pub use entry::{run_load, run_new, Output};
