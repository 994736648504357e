//! digits-test - Regression test framework for the digit classifier
//!
//! Provides the [`RegParams`] harness used by the `tests/*_reg.rs` files of
//! every crate, and [`synth`], a set of builders for synthetic scans (no
//! scanned sheets are checked into the repository). Two modes:
//!
//! - **Compare**: check computed values and images (default)
//! - **Display**: additionally write intermediate images to the regout
//!   directory for visual inspection
//!
//! # Usage
//!
//! ```ignore
//! use digits_test::RegParams;
//!
//! let mut rp = RegParams::new("segment");
//! rp.compare_values(2.0, boxes.len() as f64, 0.0);
//! assert!(rp.cleanup());
//! ```
//!
//! # Environment Variables
//!
//! - `REGTEST_MODE`: Set to "compare" or "display"

mod error;
mod params;
pub mod synth;

pub use error::{TestError, TestResult};
pub use params::{RegParams, RegTestMode};

/// Get the path to the workspace root
fn workspace_root() -> String {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    // digits-test is at crates/digits-test, so go up two directories
    format!("{}/../..", manifest_dir)
}

/// Get the path to the regout (regression output) directory
pub fn regout_dir() -> String {
    format!("{}/target/regout", workspace_root())
}
