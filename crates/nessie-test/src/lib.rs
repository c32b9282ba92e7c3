//! nessie-test - Regression test framework for the Nessie OCR crates
//!
//! This crate provides a small regression harness and builders for
//! synthetic press clips:
//!
//! - [`RegParams`] tracks indexed value / clip comparisons and reports
//!   every failure at [`RegParams::cleanup`]
//! - [`synth`] builds clips and regions from ASCII art
//!
//! # Usage
//!
//! ```ignore
//! use nessie_test::RegParams;
//!
//! let mut rp = RegParams::new("segment");
//! rp.compare_values(2.0, regions.len() as f64, 0.0);
//! assert!(rp.cleanup());
//! ```
//!
//! # Environment Variables
//!
//! - `REGTEST_MODE`: Set to "display" to dump intermediate clips as PNG
//!   files under `tests/regout`

mod error;
mod params;
pub mod synth;

pub use error::{TestError, TestResult};
pub use params::{RegParams, RegTestMode};

/// Get the path to the workspace root
fn workspace_root() -> String {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    // nessie-test is at crates/nessie-test, so go up two directories
    format!("{}/../..", manifest_dir)
}

/// Get the path to the regout (regression output) directory
pub fn regout_dir() -> String {
    format!("{}/tests/regout", workspace_root())
}
