//! Parametric 2D vector fields sampled over a regular grid.
//!
//! A generation pass maps a [`GridSpec`], [`FieldParams`] and a canvas extent to an
//! ordered sequence of [`Sample`]s (row-major). See [`sampler::FieldSampler`].
use std::fmt;

use glam::Vec2;
use rand::Rng;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub mod kinds;
pub mod sampler;

pub use sampler::{generate, FieldSampler};

/// Magnitude assigned to samples whose field kind is not recognised.
pub const DEFAULT_MAGNITUDE: f32 = 5.0;

/// Lattice of sample positions.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridSpec {
    /// Number of rows, at least 2.
    pub rows: usize,
    /// Number of columns, at least 2.
    pub columns: usize,
    /// Multiplier applied to the nominal lattice spacing.
    pub spacing: f32,
}

impl Default for GridSpec {
    fn default() -> Self {
        Self {
            rows: 20,
            columns: 20,
            spacing: 1.0,
        }
    }
}

impl GridSpec {
    pub fn new(rows: usize, columns: usize) -> Self {
        Self {
            rows,
            columns,
            ..Default::default()
        }
    }

    pub fn with_spacing(mut self, spacing: f32) -> Self {
        self.spacing = spacing;
        self
    }

    /// Number of samples a pass over this grid produces.
    pub fn sample_count(&self) -> usize {
        self.rows * self.columns
    }

    /// Per-axis distance between neighbouring lattice points for `canvas`, before `spacing`.
    pub fn cell_extent(&self, canvas: Vec2) -> Vec2 {
        Vec2::new(
            canvas.x / (self.columns.max(2) - 1) as f32,
            canvas.y / (self.rows.max(2) - 1) as f32,
        )
    }

    pub fn validate(&self) -> Result<()> {
        if self.rows < 2 || self.columns < 2 {
            return Err(Error::InvalidConfig(format!(
                "grid must be at least 2x2, got {}x{}",
                self.rows, self.columns
            )));
        }
        if !self.spacing.is_finite() || self.spacing < 0.0 {
            return Err(Error::InvalidConfig("spacing must be >= 0".into()));
        }
        Ok(())
    }
}

/// Analytic formula family selecting angle and magnitude from position.
///
/// Names that do not match a known family are kept as [`FieldKind::Unknown`];
/// sampling such a field degrades to zero-angle marks and reports a warning.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "String", into = "String"))]
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum FieldKind {
    #[default]
    Magnetic,
    Fluid,
    Electric,
    Vortex,
    Sink,
    Source,
    Saddle,
    Wind,
    Grid,
    Unknown(String),
}

impl FieldKind {
    /// All recognised field kinds, in control-surface order.
    pub const ALL: [FieldKind; 9] = [
        FieldKind::Magnetic,
        FieldKind::Fluid,
        FieldKind::Electric,
        FieldKind::Vortex,
        FieldKind::Sink,
        FieldKind::Source,
        FieldKind::Saddle,
        FieldKind::Wind,
        FieldKind::Grid,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            FieldKind::Magnetic => "magnetic",
            FieldKind::Fluid => "fluid",
            FieldKind::Electric => "electric",
            FieldKind::Vortex => "vortex",
            FieldKind::Sink => "sink",
            FieldKind::Source => "source",
            FieldKind::Saddle => "saddle",
            FieldKind::Wind => "wind",
            FieldKind::Grid => "grid",
            FieldKind::Unknown(name) => name,
        }
    }

    /// Whether the formula includes a per-pass phase term.
    pub fn uses_phase(&self) -> bool {
        matches!(self, FieldKind::Fluid | FieldKind::Wind)
    }
}

impl From<&str> for FieldKind {
    fn from(value: &str) -> Self {
        match value {
            "magnetic" => FieldKind::Magnetic,
            "fluid" => FieldKind::Fluid,
            "electric" => FieldKind::Electric,
            "vortex" => FieldKind::Vortex,
            "sink" => FieldKind::Sink,
            "source" => FieldKind::Source,
            "saddle" => FieldKind::Saddle,
            "wind" => FieldKind::Wind,
            "grid" => FieldKind::Grid,
            other => FieldKind::Unknown(other.to_owned()),
        }
    }
}

impl From<String> for FieldKind {
    fn from(value: String) -> Self {
        match FieldKind::from(value.as_str()) {
            FieldKind::Unknown(_) => FieldKind::Unknown(value),
            known => known,
        }
    }
}

impl From<FieldKind> for String {
    fn from(value: FieldKind) -> Self {
        match value {
            FieldKind::Unknown(name) => name,
            known => known.as_str().to_owned(),
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parameters of a field. Any change invalidates previously generated samples.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Clone, Debug, PartialEq)]
pub struct FieldParams {
    pub kind: FieldKind,
    /// Rotation added to every sample angle, in degrees.
    pub rotation_degrees: f32,
    /// Field strength, > 0.
    pub intensity: f32,
    pub spiral_enabled: bool,
    /// Spiral strength in [0, 1].
    pub spiral_intensity: f32,
    /// Horizontal shift of the field center, percent of canvas width in [-50, 50].
    pub x_offset_percent: f32,
    /// Vertical shift of the field center, percent of canvas height in [-50, 50].
    pub y_offset_percent: f32,
}

impl Default for FieldParams {
    fn default() -> Self {
        Self {
            kind: FieldKind::Magnetic,
            rotation_degrees: 0.0,
            intensity: 1.0,
            spiral_enabled: true,
            spiral_intensity: 0.1,
            x_offset_percent: 0.0,
            y_offset_percent: 0.0,
        }
    }
}

impl FieldParams {
    /// Creates parameters for `kind` with spiral blending disabled.
    pub fn new(kind: FieldKind) -> Self {
        Self {
            kind,
            spiral_enabled: false,
            ..Default::default()
        }
    }

    pub fn with_rotation(mut self, degrees: f32) -> Self {
        self.rotation_degrees = degrees;
        self
    }

    pub fn with_intensity(mut self, intensity: f32) -> Self {
        self.intensity = intensity;
        self
    }

    pub fn with_spiral(mut self, intensity: f32) -> Self {
        self.spiral_enabled = true;
        self.spiral_intensity = intensity;
        self
    }

    pub fn without_spiral(mut self) -> Self {
        self.spiral_enabled = false;
        self
    }

    pub fn with_offsets(mut self, x_percent: f32, y_percent: f32) -> Self {
        self.x_offset_percent = x_percent;
        self.y_offset_percent = y_percent;
        self
    }

    /// Rotation in radians.
    pub fn rotation_radians(&self) -> f32 {
        self.rotation_degrees.to_radians()
    }

    /// Field center for `canvas`: the canvas center shifted by the percentage offsets.
    pub fn center(&self, canvas: Vec2) -> Vec2 {
        canvas * 0.5
            + Vec2::new(
                self.x_offset_percent / 100.0 * canvas.x,
                self.y_offset_percent / 100.0 * canvas.y,
            )
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.intensity.is_finite() && self.intensity > 0.0) {
            return Err(Error::InvalidConfig("intensity must be > 0".into()));
        }
        if !(0.0..=1.0).contains(&self.spiral_intensity) {
            return Err(Error::InvalidConfig(
                "spiral_intensity must be in [0, 1]".into(),
            ));
        }
        for (name, value) in [
            ("x_offset_percent", self.x_offset_percent),
            ("y_offset_percent", self.y_offset_percent),
        ] {
            if !(-50.0..=50.0).contains(&value) {
                return Err(Error::InvalidConfig(format!(
                    "{name} must be in [-50, 50], got {value}"
                )));
            }
        }
        Ok(())
    }
}

/// One grid point of a generated field.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sample {
    /// Position in working-canvas units.
    pub position: Vec2,
    /// Direction in radians.
    pub angle: f32,
    /// Length before shape-specific scaling.
    pub magnitude: f32,
    /// Distance from the field center.
    pub r: f32,
}

impl Sample {
    /// Unit direction of the sample.
    pub fn direction(&self) -> Vec2 {
        Vec2::from_angle(self.angle)
    }

    /// Tip of the mark for this sample once its magnitude is scaled by `vector_scale`.
    pub fn end_point(&self, vector_scale: f32) -> Vec2 {
        self.position + self.direction() * self.magnitude * vector_scale
    }
}

/// Draws a phase seed in [0, 1) for [`FieldSampler::generate_with_seed`].
pub fn draw_seed(rng: &mut dyn Rng) -> f32 {
    rand01(rng)
}

#[inline]
pub(crate) fn rand01(rng: &mut dyn Rng) -> f32 {
    // 24 mantissa bits so the result never rounds up to 1.0
    (rng.next_u32() >> 8) as f32 / (1u32 << 24) as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedRng {
        value: u32,
    }

    impl rand::TryRng for FixedRng {
        type Error = core::convert::Infallible;

        fn try_next_u32(&mut self) -> core::result::Result<u32, Self::Error> {
            Ok(self.value)
        }

        fn try_next_u64(&mut self) -> core::result::Result<u64, Self::Error> {
            Ok(self.value as u64)
        }

        fn try_fill_bytes(&mut self, dest: &mut [u8]) -> core::result::Result<(), Self::Error> {
            let bytes = self.value.to_le_bytes();
            for (i, b) in dest.iter_mut().enumerate() {
                *b = bytes[i % 4];
            }
            Ok(())
        }
    }

    #[test]
    fn rand01_stays_below_one() {
        for value in [0, 1, u32::MAX / 2, u32::MAX - 1, u32::MAX] {
            let mut rng = FixedRng { value };
            let seed = rand01(&mut rng);
            assert!((0.0..1.0).contains(&seed), "rand01({value}) = {seed}");
        }
    }

    #[test]
    fn field_kind_parses_known_names_and_keeps_unknown() {
        for kind in FieldKind::ALL {
            assert_eq!(FieldKind::from(kind.as_str()), kind);
        }
        assert_eq!(
            FieldKind::from("gravity"),
            FieldKind::Unknown("gravity".into())
        );
        assert_eq!(String::from(FieldKind::Unknown("x".into())), "x");
    }

    #[test]
    fn grid_validation_rejects_degenerate_grids() {
        assert!(GridSpec::new(2, 2).validate().is_ok());
        assert!(GridSpec::new(1, 5).validate().is_err());
        assert!(GridSpec::new(5, 5).with_spacing(-1.0).validate().is_err());
    }

    #[test]
    fn field_params_validation_checks_ranges() {
        assert!(FieldParams::default().validate().is_ok());
        assert!(FieldParams::default()
            .with_intensity(0.0)
            .validate()
            .is_err());
        assert!(FieldParams::default()
            .with_offsets(60.0, 0.0)
            .validate()
            .is_err());
    }

    #[test]
    fn center_is_shifted_by_percent_offsets() {
        let params = FieldParams::default().with_offsets(10.0, -50.0);
        let center = params.center(Vec2::new(600.0, 400.0));
        assert_eq!(center, Vec2::new(360.0, 0.0));
    }

    #[test]
    fn end_point_follows_angle_and_scale() {
        let sample = Sample {
            position: Vec2::new(10.0, 10.0),
            angle: 0.0,
            magnitude: 5.0,
            r: 0.0,
        };
        assert_eq!(sample.end_point(2.0), Vec2::new(20.0, 10.0));
    }
}
