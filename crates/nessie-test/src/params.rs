//! Regression test parameters and operations

use crate::error::{TestError, TestResult};
use crate::regout_dir;
use nessie_core::Clip;
use nessie_io::ImageFormat;
use std::fs;

/// Regression test mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RegTestMode {
    /// Compare values only (default)
    #[default]
    Compare,
    /// Also write intermediate clips for visual inspection
    Display,
}

impl RegTestMode {
    /// Parse mode from the `REGTEST_MODE` environment variable
    pub fn from_env() -> Self {
        match std::env::var("REGTEST_MODE")
            .unwrap_or_default()
            .to_lowercase()
            .as_str()
        {
            "display" => Self::Display,
            _ => Self::Compare,
        }
    }
}

/// Regression test parameters
///
/// This structure tracks the state of a regression test, including
/// the test name, current index, mode, and success status.
pub struct RegParams {
    /// Name of the test (e.g., "segment")
    pub test_name: String,
    /// Current test index (incremented before each check)
    index: usize,
    /// Test mode
    pub mode: RegTestMode,
    /// Overall success status
    success: bool,
    /// Recorded failures
    failures: Vec<String>,
}

impl RegParams {
    /// Create new regression test parameters
    ///
    /// The mode is taken from the `REGTEST_MODE` environment variable.
    pub fn new(test_name: &str) -> Self {
        let mode = RegTestMode::from_env();

        if mode == RegTestMode::Display {
            let _ = fs::create_dir_all(regout_dir());
        }

        eprintln!();
        eprintln!("////////////////////////////////////////////////");
        eprintln!("////////////////   {}_reg   ///////////////", test_name);
        eprintln!("////////////////////////////////////////////////");
        eprintln!("Mode: {:?}", mode);

        Self {
            test_name: test_name.to_string(),
            index: 0,
            mode,
            success: true,
            failures: Vec::new(),
        }
    }

    /// Get the current test index
    pub fn index(&self) -> usize {
        self.index
    }

    /// Check if in display mode
    pub fn display(&self) -> bool {
        self.mode == RegTestMode::Display
    }

    fn fail(&mut self, msg: String) {
        eprintln!("{}", msg);
        self.failures.push(msg);
        self.success = false;
    }

    /// Compare two floating-point values
    ///
    /// # Returns
    ///
    /// `true` if values match within `delta`, `false` otherwise.
    pub fn compare_values(&mut self, expected: f64, actual: f64, delta: f64) -> bool {
        self.index += 1;
        let diff = (expected - actual).abs();

        if diff > delta || diff.is_nan() {
            let msg = format!(
                "Failure in {}_reg: value comparison for index {}\n\
                 difference = {} but allowed delta = {}\n\
                 expected = {}, actual = {}",
                self.test_name, self.index, diff, delta, expected, actual
            );
            self.fail(msg);
            false
        } else {
            true
        }
    }

    /// Compare two clips for identical size, mode and pixels
    pub fn compare_clips(&mut self, clip1: &Clip, clip2: &Clip) -> bool {
        self.index += 1;

        if clip1.width() != clip2.width()
            || clip1.height() != clip2.height()
            || clip1.mode() != clip2.mode()
        {
            let msg = format!(
                "Failure in {}_reg: clip comparison for index {} - size or mode mismatch",
                self.test_name, self.index
            );
            self.fail(msg);
            return false;
        }

        for row in 0..clip1.height() {
            for column in 0..clip1.width() {
                if clip1.get(row, column) != clip2.get(row, column) {
                    let msg = format!(
                        "Failure in {}_reg: clip comparison for index {} - pixel mismatch at ({}, {})",
                        self.test_name, self.index, row, column
                    );
                    self.fail(msg);
                    return false;
                }
            }
        }

        true
    }

    /// Compare two binary data arrays
    pub fn compare_strings(&mut self, data1: &[u8], data2: &[u8]) -> bool {
        self.index += 1;

        if data1 != data2 {
            let msg = format!(
                "Failure in {}_reg: string comparison for index {}\n\
                 sizes: {} vs {}",
                self.test_name,
                self.index,
                data1.len(),
                data2.len()
            );
            self.fail(msg);
            false
        } else {
            true
        }
    }

    /// Write a clip to the regout directory in display mode
    ///
    /// Does nothing in compare mode.
    pub fn write_clip(&mut self, clip: &Clip, label: &str) -> TestResult<()> {
        if !self.display() {
            return Ok(());
        }
        let path = format!("{}/{}.{}.png", regout_dir(), self.test_name, label);
        nessie_io::write_clip(clip, &path, ImageFormat::Png).map_err(|e| {
            TestError::ImageWrite {
                path: path.clone(),
                message: e.to_string(),
            }
        })?;
        eprintln!("Wrote: {}", path);
        Ok(())
    }

    /// Clean up and report results
    ///
    /// # Returns
    ///
    /// `true` if all checks passed, `false` if any failed.
    pub fn cleanup(self) -> bool {
        if self.success {
            eprintln!("SUCCESS: {}_reg", self.test_name);
        } else {
            eprintln!("FAILURE: {}_reg", self.test_name);
            for failure in &self.failures {
                eprintln!("  {}", failure);
            }
        }
        eprintln!();

        self.success
    }

    /// Check if all checks have passed so far
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Get list of failures
    pub fn failures(&self) -> &[String] {
        &self.failures
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compare_values_within_delta() {
        let mut rp = RegParams::new("test");
        assert!(rp.compare_values(100.0, 100.5, 1.0));
        assert!(rp.is_success());
        assert_eq!(rp.index(), 1);
    }

    #[test]
    fn test_compare_values_failure() {
        let mut rp = RegParams::new("test");
        assert!(!rp.compare_values(100.0, 200.0, 0.0));
        assert!(!rp.is_success());
        assert_eq!(rp.failures().len(), 1);
    }

    #[test]
    fn test_compare_values_rejects_nan() {
        let mut rp = RegParams::new("test");
        assert!(!rp.compare_values(0.0, f64::NAN, 1.0));
    }

    #[test]
    fn test_compare_clips() {
        let a = Clip::from_rows(&[[1u8, 2], [3, 4]]).unwrap();
        let mut b = a.clone();
        let mut rp = RegParams::new("test");
        assert!(rp.compare_clips(&a, &b));
        b.set(1, 1, 9).unwrap();
        assert!(!rp.compare_clips(&a, &b));
    }
}
