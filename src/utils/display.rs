//! Presentation helpers for the timer screen

use serde::{Deserialize, Serialize};

/// Format seconds as `MM:SS`; minutes are not wrapped at an hour
pub fn format_clock(total_seconds: u64) -> String {
    let minutes = total_seconds / 60;
    let seconds = total_seconds % 60;
    format!("{:02}:{:02}", minutes, seconds)
}

/// Flower image shown for the current progress
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrowthVisual {
    Seedling,
    Budding,
    Blossom,
}

impl GrowthVisual {
    /// Pick a visual from a progress fraction. The two middle quarters share
    /// the budding image.
    pub fn from_progress(progress: f64) -> Self {
        if progress < 0.25 {
            GrowthVisual::Seedling
        } else if progress < 0.75 {
            GrowthVisual::Budding
        } else {
            GrowthVisual::Blossom
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_pads_minutes_and_seconds() {
        assert_eq!(format_clock(0), "00:00");
        assert_eq!(format_clock(59), "00:59");
        assert_eq!(format_clock(61), "01:01");
        assert_eq!(format_clock(120 * 60), "120:00");
    }

    #[test]
    fn visual_bands() {
        assert_eq!(GrowthVisual::from_progress(0.0), GrowthVisual::Seedling);
        assert_eq!(GrowthVisual::from_progress(0.2499), GrowthVisual::Seedling);
        assert_eq!(GrowthVisual::from_progress(0.25), GrowthVisual::Budding);
        assert_eq!(GrowthVisual::from_progress(0.6), GrowthVisual::Budding);
        assert_eq!(GrowthVisual::from_progress(0.75), GrowthVisual::Blossom);
        assert_eq!(GrowthVisual::from_progress(1.0), GrowthVisual::Blossom);
    }
}
