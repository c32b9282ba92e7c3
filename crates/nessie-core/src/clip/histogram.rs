//! Clip histograms and pixel counts

use super::{Clip, ClipMode};

impl Clip {
    /// 256-bin intensity histogram.
    pub fn histogram(&self) -> [u32; 256] {
        let mut hist = [0u32; 256];
        for &v in &self.data {
            hist[v as usize] += 1;
        }
        hist
    }

    /// Number of ink pixels in a binary clip, 0 for grayscale clips.
    pub fn ink_count(&self) -> usize {
        match self.mode {
            ClipMode::Binary => self.data.iter().filter(|&&v| v != 0).count(),
            ClipMode::Grayscale => 0,
        }
    }

    /// Whether every value is 0 or 1.
    pub fn is_two_level(&self) -> bool {
        self.data.iter().all(|&v| v <= 1)
    }
}
