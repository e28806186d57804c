//! Command-line front end for hyperparameter sweep dispatch
//!
//! Reads a sweep file, expands it into one cluster job per combination of
//! enabled axis values, and submits those jobs through `bsub` or `sbatch`.

pub mod commands;
pub mod logging;
pub mod storage;
pub mod util;

pub use logging::{default_log_dir, init_logging};
