//! pdilab-test - Regression test harness for pdilab
//!
//! Every `tests/*_reg.rs` file drives one [`RegParams`] through a sequence
//! of numbered checks and asserts on [`RegParams::cleanup`]. Three modes are
//! supported:
//!
//! - **Compare**: run the checks (default)
//! - **Display**: also dump intermediate images under `tests/regout`
//! - **Generate**: like display, for refreshing the dumps in bulk
//!
//! # Usage
//!
//! ```ignore
//! use pdilab_test::RegParams;
//!
//! let mut rp = RegParams::new("blur");
//! rp.compare_values(0.0, variance, 1e-9);
//! assert!(rp.cleanup());
//! ```
//!
//! # Environment Variables
//!
//! - `REGTEST_MODE`: Set to "generate", "compare", or "display"

mod error;
mod params;

pub use error::{TestError, TestResult};
pub use params::{RegParams, RegTestMode};

/// Get the path to the workspace root
fn workspace_root() -> String {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    // pdilab-test is at crates/pdilab-test, so go up two directories
    format!("{}/../..", manifest_dir)
}

/// Get the path to the regout (regression output) directory
pub fn regout_dir() -> String {
    format!("{}/tests/regout", workspace_root())
}
