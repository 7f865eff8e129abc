//! Per-kind field formulas.
//!
//! Each formula maps a lattice point, expressed relative to the field center, to a raw
//! angle and magnitude. Rotation and spiral blending are applied by the sampler.
use std::f32::consts::{FRAC_PI_2, PI};

use glam::Vec2;

use crate::field::FieldKind;

/// Spatial frequency of the fluid angle term.
const FLUID_FREQUENCY: f32 = 0.05;

/// Geometry of one lattice point relative to the field center.
#[derive(Clone, Copy, Debug)]
pub struct FieldPoint {
    /// Nominal lattice position on the canvas.
    pub position: Vec2,
    /// Position fed to the phase terms of fluid and wind, moved with the field center.
    pub phase_position: Vec2,
    /// Offset from the field center.
    pub delta: Vec2,
    /// Length of `delta`.
    pub r: f32,
}

impl FieldPoint {
    pub fn new(position: Vec2, center: Vec2) -> Self {
        let delta = position - center;
        Self {
            position,
            phase_position: position,
            delta,
            r: delta.length(),
        }
    }

    /// Shifts the phase position against `shift`, so phase patterns follow a field
    /// center moved by `shift`.
    pub fn with_phase_shift(mut self, shift: Vec2) -> Self {
        self.phase_position = self.position - shift;
        self
    }

    /// Polar angle of `delta`.
    #[inline]
    pub fn theta(&self) -> f32 {
        self.delta.y.atan2(self.delta.x)
    }
}

/// Evaluates the unrotated `(angle, magnitude)` of `kind` at `point`.
///
/// Returns `None` for [`FieldKind::Unknown`].
pub fn evaluate(kind: &FieldKind, point: &FieldPoint, intensity: f32, seed: f32) -> Option<(f32, f32)> {
    let FieldPoint {
        phase_position: position,
        delta,
        r,
        ..
    } = *point;
    let theta = point.theta();
    let (dx, dy) = (delta.x, delta.y);

    let value = match kind {
        FieldKind::Magnetic => (theta + FRAC_PI_2, 5.0 + 0.02 * r * intensity),
        FieldKind::Fluid => {
            let angle = ((position.x * FLUID_FREQUENCY + seed).sin()
                + (position.y * FLUID_FREQUENCY + seed).cos())
                * PI;
            let magnitude = 5.0 + (0.01 * (position.x + position.y) + seed).sin() * 2.0 * intensity;
            (angle, magnitude)
        }
        FieldKind::Electric => (theta, (10.0 - (0.03 * r).min(8.0)) * intensity),
        FieldKind::Vortex => (theta + FRAC_PI_2, (5.0 + (0.05 * r).min(10.0)) * intensity),
        FieldKind::Sink => (theta + PI, (10.0 - (0.05 * r).min(9.0)) * intensity),
        FieldKind::Source => (theta, (10.0 - (0.05 * r).min(9.0)) * intensity),
        FieldKind::Saddle => {
            let angle = (dy * dy - dx * dx).atan2(2.0 * dx * dy);
            let magnitude = ((dx * dx - dy * dy).abs().sqrt() * 0.1).min(10.0) * intensity;
            (angle, magnitude)
        }
        FieldKind::Wind => (
            (0.1 * position.y + seed).sin() * 0.5,
            (5.0 + (0.1 * position.x + seed).cos() * 2.0) * intensity,
        ),
        FieldKind::Grid => (0.0, 5.0 * intensity),
        FieldKind::Unknown(_) => return None,
    };
    Some(value)
}

/// Spiral angle at `point`: polar angle plus a term growing with distance.
#[inline]
pub fn spiral_angle(point: &FieldPoint, spiral_intensity: f32) -> f32 {
    point.theta() + point.r * spiral_intensity * 0.1
}
