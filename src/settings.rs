use serde::{Deserialize, Serialize};

pub const TEXT_SCALE_MIN: f64 = 0.8;
pub const TEXT_SCALE_MAX: f64 = 1.4;
pub const TEXT_SCALE_STEP: f64 = 0.1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub dark_mode: bool,
    pub text_scale: f64,
    pub text_width: Option<usize>,
    pub show_progress_indicator: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            dark_mode: true,
            text_scale: 1.0,
            text_width: None,
            show_progress_indicator: true,
        }
    }
}

impl Settings {
    pub fn merge(&mut self, other: Self) {
        self.dark_mode = other.dark_mode;
        self.text_scale = clamp_scale(other.text_scale);
        if other.text_width.is_some() {
            self.text_width = other.text_width;
        }
        self.show_progress_indicator = other.show_progress_indicator;
    }

    pub fn enlarge(&mut self) {
        self.text_scale = clamp_scale(self.text_scale + TEXT_SCALE_STEP);
    }

    pub fn shrink(&mut self) {
        self.text_scale = clamp_scale(self.text_scale - TEXT_SCALE_STEP);
    }
}

fn clamp_scale(scale: f64) -> f64 {
    // Round to one decimal so repeated steps never drift.
    let stepped = (scale / TEXT_SCALE_STEP).round() * TEXT_SCALE_STEP;
    stepped.clamp(TEXT_SCALE_MIN, TEXT_SCALE_MAX)
}
