use std::f64::consts::PI;

use crate::StoryId;

/// Radius of the progress ring circle, matching the widget stylesheet.
pub const RING_RADIUS: f64 = 52.0;
/// Full stroke length of the ring circle.
pub const RING_CIRCUMFERENCE: f64 = 2.0 * PI * RING_RADIUS;

/// Stroke-dash offset that reveals `progress` percent of the ring:
/// 0% leaves the ring fully hidden, 100% fully revealed. Out-of-range
/// values are clamped before the offset is computed.
pub fn ring_stroke_offset(progress: f64) -> f64 {
    let clamped = progress.clamp(0.0, 100.0);
    RING_CIRCUMFERENCE - (clamped / 100.0) * RING_CIRCUMFERENCE
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppViewModel {
    pub preview: PreviewView,
    pub likes: Vec<LikeCountView>,
    pub notice: Option<String>,
    pub dirty: bool,
}

/// Render-ready projection of the preview widget.
#[derive(Debug, Clone, PartialEq)]
pub struct PreviewView {
    /// Pulse animation flag while a job is generating.
    pub generating: bool,
    pub ring_offset: f64,
    pub percent_text: String,
    pub status_text: String,
    /// Render the status text in the error color.
    pub error: bool,
    pub video_url: Option<String>,
}

impl Default for PreviewView {
    fn default() -> Self {
        Self {
            generating: false,
            ring_offset: RING_CIRCUMFERENCE,
            percent_text: "0%".to_owned(),
            status_text: String::new(),
            error: false,
            video_url: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LikeCountView {
    pub story_id: StoryId,
    pub likes: u64,
}

#[cfg(test)]
mod tests {
    use super::{ring_stroke_offset, RING_CIRCUMFERENCE};

    #[test]
    fn offset_matches_formula_across_range() {
        for progress in 0..=100 {
            let progress = f64::from(progress);
            let expected = RING_CIRCUMFERENCE * (1.0 - progress / 100.0);
            assert!((ring_stroke_offset(progress) - expected).abs() < 1e-9);
        }
    }

    #[test]
    fn offset_is_monotonically_decreasing() {
        let mut previous = ring_stroke_offset(0.0);
        for progress in 1..=100 {
            let offset = ring_stroke_offset(f64::from(progress));
            assert!(offset < previous);
            previous = offset;
        }
    }

    #[test]
    fn offset_endpoints_hide_and_reveal_the_ring() {
        assert!((ring_stroke_offset(0.0) - RING_CIRCUMFERENCE).abs() < 1e-9);
        assert!(ring_stroke_offset(100.0).abs() < 1e-9);
    }

    #[test]
    fn out_of_range_progress_is_clamped() {
        assert_eq!(ring_stroke_offset(-20.0), ring_stroke_offset(0.0));
        assert_eq!(ring_stroke_offset(150.0), ring_stroke_offset(100.0));
    }
}
