//! Gradient shading: per-sample opacity derived from position.
use std::f32::consts::{PI, TAU};

use glam::Vec2;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::field::Sample;

/// Function mapping a sample position to an opacity multiplier.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum GradientMode {
    #[default]
    None,
    /// Fades out with distance from the field center.
    Radial,
    /// Sweeps around the canvas center.
    Angular,
    /// Concentric bands.
    Wave,
}

impl GradientMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            GradientMode::None => "none",
            GradientMode::Radial => "radial",
            GradientMode::Angular => "angular",
            GradientMode::Wave => "wave",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "none" => Some(GradientMode::None),
            "radial" => Some(GradientMode::Radial),
            "angular" => Some(GradientMode::Angular),
            "wave" => Some(GradientMode::Wave),
            _ => None,
        }
    }
}

/// Opacity in [0, 1] of `sample` on `canvas` under `mode`.
pub fn opacity(sample: &Sample, mode: GradientMode, canvas: Vec2) -> f32 {
    let value = match mode {
        GradientMode::None => return 1.0,
        GradientMode::Radial => {
            let max_r = (canvas * 0.5).length();
            if max_r > 0.0 {
                1.0 - sample.r / max_r
            } else {
                1.0
            }
        }
        GradientMode::Angular => {
            let d = sample.position - canvas * 0.5;
            (d.y.atan2(d.x) + PI) / TAU
        }
        GradientMode::Wave => ((sample.r * 0.1).sin() + 1.0) / 2.0,
    };
    value.clamp(0.0, 1.0)
}

/// 8-bit alpha channel for `opacity`.
#[inline]
pub fn alpha_byte(opacity: f32) -> u8 {
    (opacity.clamp(0.0, 1.0) * 255.0).round() as u8
}
