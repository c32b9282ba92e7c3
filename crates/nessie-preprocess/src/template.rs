//! Template filter for binary clips
//!
//! A template is a 3x3 hit-or-miss mask paired with a replacement value.
//! Wherever the mask matches the neighbourhood of a pixel, the pixel is
//! set to the replacement. The default bank removes isolated ink pixels
//! and one-pixel bumps and fills one-pixel holes and notches.
//!
//! Every pass matches against a snapshot of the previous pass, so the
//! result does not depend on scan order. Passes repeat until nothing
//! changes or the iteration cap is reached.
//!
//! The isolated-pixel template does not tell noise from print: a
//! one-pixel i-dot or period is erased before segmentation and never
//! reaches the accent merge. Clips printed small enough for that to matter
//! need a bank without it, see [`TemplateFilterOptions::with_templates`].

use crate::{PreprocessError, PreprocessResult};
use nessie_core::{Clip, ClipMode};

/// Element of a template mask
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TemplateElement {
    /// Position is ignored
    #[default]
    DontCare,
    /// Must be ink
    Ink,
    /// Must be background
    Background,
}

impl TemplateElement {
    #[inline]
    fn matches(self, ink: bool) -> bool {
        match self {
            TemplateElement::DontCare => true,
            TemplateElement::Ink => ink,
            TemplateElement::Background => !ink,
        }
    }
}

/// 3x3 hit-or-miss template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    elements: [TemplateElement; 9],
    replacement: u8,
}

impl Template {
    /// Create a template from a pattern string.
    ///
    /// The pattern has three rows of three characters, separated by `/`
    /// or newlines: `x` for ink, `o` for background, `.` for don't care.
    /// The center pixel takes the value `replacement` (0 or 1) on a match.
    ///
    /// # Example
    ///
    /// ```
    /// use nessie_preprocess::template::Template;
    ///
    /// let isolated = Template::from_string("ooo/oxo/ooo", 0).unwrap();
    /// assert_eq!(isolated.replacement(), 0);
    /// ```
    pub fn from_string(pattern: &str, replacement: u8) -> PreprocessResult<Self> {
        if replacement > 1 {
            return Err(PreprocessError::InvalidParameters(format!(
                "template replacement must be 0 or 1, got {}",
                replacement
            )));
        }

        let rows: Vec<&str> = pattern
            .split(['/', '\n'])
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .collect();
        if rows.len() != 3 || rows.iter().any(|r| r.chars().count() != 3) {
            return Err(PreprocessError::InvalidParameters(format!(
                "template must be 3x3, got {:?}",
                pattern
            )));
        }

        let mut elements = [TemplateElement::DontCare; 9];
        for (i, ch) in rows.iter().flat_map(|r| r.chars()).enumerate() {
            elements[i] = match ch {
                'x' => TemplateElement::Ink,
                'o' => TemplateElement::Background,
                '.' => TemplateElement::DontCare,
                other => {
                    return Err(PreprocessError::InvalidParameters(format!(
                        "unknown template character {:?}",
                        other
                    )));
                }
            };
        }

        Ok(Self {
            elements,
            replacement,
        })
    }

    /// Value written to the center pixel on a match.
    pub fn replacement(&self) -> u8 {
        self.replacement
    }

    /// Row-major mask elements.
    pub fn elements(&self) -> &[TemplateElement; 9] {
        &self.elements
    }

    /// Rotate by `quarter_turns` x 90 degrees clockwise.
    pub fn rotate_orth(&self, quarter_turns: u32) -> Self {
        let mut out = self.clone();
        for _ in 0..quarter_turns % 4 {
            let src = out.elements;
            for r in 0..3 {
                for c in 0..3 {
                    out.elements[r * 3 + c] = src[(2 - c) * 3 + r];
                }
            }
        }
        out
    }

    /// Whether the template matches the neighbourhood of `(row, column)`.
    ///
    /// Pixels outside the clip count as background.
    pub fn matches(&self, clip: &Clip, row: u32, column: u32) -> bool {
        self.elements.iter().enumerate().all(|(k, element)| {
            let r = i64::from(row) + (k / 3) as i64 - 1;
            let c = i64::from(column) + (k % 3) as i64 - 1;
            element.matches(clip.is_ink(r, c))
        })
    }
}

/// The standard cleanup bank.
///
/// The first template erases every isolated ink pixel, including
/// single-pixel dots and periods.
pub fn default_templates() -> Vec<Template> {
    let mut bank = Vec::with_capacity(10);
    let specs = [("ooo/oxo/ooo", 0u8), (".x./xox/.x.", 1)];
    for (pattern, value) in specs {
        if let Ok(t) = Template::from_string(pattern, value) {
            bank.push(t);
        }
    }
    for (pattern, value) in [("ooo/oxo/xxx", 0u8), ("xxx/xox/ooo", 1)] {
        if let Ok(t) = Template::from_string(pattern, value) {
            bank.extend((0..4).map(|q| t.rotate_orth(q)));
        }
    }
    bank
}

/// Options for the template filter
#[derive(Debug, Clone)]
pub struct TemplateFilterOptions {
    /// Template bank, evaluated in order (default: [`default_templates`])
    pub templates: Vec<Template>,
    /// Maximum number of passes (default: 8)
    pub max_iterations: u32,
}

impl Default for TemplateFilterOptions {
    fn default() -> Self {
        Self {
            templates: default_templates(),
            max_iterations: 8,
        }
    }
}

impl TemplateFilterOptions {
    /// Create new options with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the template bank
    pub fn with_templates(mut self, templates: Vec<Template>) -> Self {
        self.templates = templates;
        self
    }

    /// Set the pass cap
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Validate options
    pub fn validate(&self) -> PreprocessResult<()> {
        if self.max_iterations == 0 {
            return Err(PreprocessError::InvalidParameters(
                "max_iterations must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Outcome of [`apply_templates`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TemplateFilterOutcome {
    /// Passes run
    pub passes: u32,
    /// Pixel writes summed over all passes
    pub changed: usize,
    /// Whether the last pass changed nothing
    pub converged: bool,
}

/// Run the template bank over a binary clip in place.
///
/// # Errors
///
/// Returns [`PreprocessError::InvalidClip`] if the clip is not binary.
pub fn apply_templates(
    clip: &mut Clip,
    options: &TemplateFilterOptions,
) -> PreprocessResult<TemplateFilterOutcome> {
    options.validate()?;
    if clip.mode() != ClipMode::Binary {
        return Err(PreprocessError::InvalidClip(
            "template filter needs a binary clip".to_string(),
        ));
    }

    let mut outcome = TemplateFilterOutcome {
        passes: 0,
        changed: 0,
        converged: false,
    };

    while outcome.passes < options.max_iterations {
        let snapshot = clip.clone();
        let mut changed = 0usize;
        for row in 0..snapshot.height() {
            for column in 0..snapshot.width() {
                let current = snapshot.get_unchecked(row, column);
                let hit = options
                    .templates
                    .iter()
                    .find(|t| t.matches(&snapshot, row, column));
                if let Some(t) = hit
                    && t.replacement != current
                {
                    clip.set_unchecked(row, column, t.replacement);
                    changed += 1;
                }
            }
        }
        outcome.passes += 1;
        outcome.changed += changed;
        if changed == 0 {
            outcome.converged = true;
            break;
        }
    }

    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use nessie_test::synth::{binary_clip, to_ascii};

    fn run(rows: &[&str]) -> (Vec<String>, TemplateFilterOutcome) {
        let mut clip = binary_clip(rows).unwrap();
        let outcome = apply_templates(&mut clip, &TemplateFilterOptions::default()).unwrap();
        (to_ascii(&clip), outcome)
    }

    #[test]
    fn test_from_string_rejects_bad_patterns() {
        assert!(Template::from_string("oo/oxo/ooo", 0).is_err());
        assert!(Template::from_string("ooo/oyo/ooo", 0).is_err());
        assert!(Template::from_string("ooo/oxo/ooo", 2).is_err());
        assert!(Template::from_string("ooo\noxo\nooo", 1).is_ok());
    }

    #[test]
    fn test_rotate_orth() {
        let t = Template::from_string("ooo/oxo/xxx", 0).unwrap();
        let r = Template::from_string("xoo/xxo/xoo", 0).unwrap();
        assert_eq!(t.rotate_orth(1), r);
        assert_eq!(t.rotate_orth(4), t);
        assert_eq!(default_templates().len(), 10);
    }

    #[test]
    fn test_isolated_pixel_removed() {
        let (out, outcome) = run(&[".....", "..#..", "....."]);
        assert_eq!(out, vec![".....", ".....", "....."]);
        assert!(outcome.converged);
        assert_eq!(outcome.changed, 1);
    }

    #[test]
    fn test_hole_filled() {
        let (out, _) = run(&["###", "#.#", "###"]);
        assert_eq!(out, vec!["###", "###", "###"]);
    }

    #[test]
    fn test_bump_removed() {
        let (out, _) = run(&[".......", "...#...", ".#####."]);
        assert_eq!(out, vec![".......", ".......", ".#####."]);
    }

    #[test]
    fn test_solid_block_untouched() {
        let rows = ["......", ".####.", ".####.", ".####.", ".####.", "......"];
        let (out, outcome) = run(&rows);
        assert_eq!(out, rows.to_vec());
        assert_eq!(outcome.passes, 1);
    }

    #[test]
    fn test_iteration_cap() {
        let mut clip = binary_clip(&[".#.", "...", "..."]).unwrap();
        let opts = TemplateFilterOptions::new().with_max_iterations(1);
        let outcome = apply_templates(&mut clip, &opts).unwrap();
        assert_eq!(outcome.passes, 1);
        assert!(!outcome.converged);
        assert!(opts.clone().with_max_iterations(0).validate().is_err());
    }

    #[test]
    fn test_grayscale_clip_rejected() {
        let mut clip = nessie_core::Clip::from_rows(&[[0u8; 3]; 3]).unwrap();
        assert!(apply_templates(&mut clip, &TemplateFilterOptions::default()).is_err());
    }
}
