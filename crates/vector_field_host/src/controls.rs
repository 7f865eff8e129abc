//! The control surface: every user-adjustable parameter, clamped to its range.
use serde::{Deserialize, Serialize};
use vector_field::prelude::*;

pub const MIN_GRID: usize = 2;
pub const MAX_GRID: usize = 200;
pub const ROTATION_RANGE: (f32, f32) = (0.0, 360.0);
pub const INTENSITY_RANGE: (f32, f32) = (0.1, 2.0);
pub const SPIRAL_RANGE: (f32, f32) = (0.0, 1.0);
pub const OFFSET_RANGE: (f32, f32) = (-50.0, 50.0);
pub const VECTOR_SCALE_RANGE: (f32, f32) = (0.1, 12.0);
pub const LINE_THICKNESS_RANGE: (f32, f32) = (0.1, 12.0);
pub const SPACING_RANGE: (f32, f32) = (0.5, 2.0);
pub const SHAPE_SIZE_RANGE: (f32, f32) = (0.1, 10.0);

/// What a parameter change invalidates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Invalidation {
    /// Nothing drawn changes.
    None,
    /// Samples stay valid; marks must be re-synthesised.
    Rerender,
    /// Samples must be regenerated.
    Regenerate,
}

/// Snapshot of all control-surface parameters.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Controls {
    pub grid: GridSpec,
    pub field: FieldParams,
    pub style: StyleParams,
    pub canvas_policy: CanvasPolicy,
    pub export_mode: ExportMode,
}

/// One edit of a named control.
#[derive(Clone, Debug, PartialEq)]
pub enum ControlChange {
    Rows(i64),
    Columns(i64),
    Spacing(f32),
    FieldKind(FieldKind),
    Rotation(f32),
    Intensity(f32),
    Spiral(bool),
    SpiralIntensity(f32),
    XOffset(f32),
    YOffset(f32),
    Shape(ShapeKind),
    ShapeSize(f32),
    VectorScale(f32),
    LineThickness(f32),
    Gradient(GradientMode),
    FillParent(bool),
    ExportMode(ExportMode),
}

impl ControlChange {
    /// What applying this change invalidates.
    pub fn invalidation(&self) -> Invalidation {
        match self {
            ControlChange::Rows(_)
            | ControlChange::Columns(_)
            | ControlChange::Spacing(_)
            | ControlChange::FieldKind(_)
            | ControlChange::Rotation(_)
            | ControlChange::Intensity(_)
            | ControlChange::Spiral(_)
            | ControlChange::SpiralIntensity(_)
            | ControlChange::XOffset(_)
            | ControlChange::YOffset(_)
            | ControlChange::FillParent(_) => Invalidation::Regenerate,
            ControlChange::Shape(_)
            | ControlChange::ShapeSize(_)
            | ControlChange::VectorScale(_)
            | ControlChange::LineThickness(_)
            | ControlChange::Gradient(_) => Invalidation::Rerender,
            ControlChange::ExportMode(_) => Invalidation::None,
        }
    }
}

impl Controls {
    /// Applies `change`, clamping numeric values into their ranges.
    pub fn apply(&mut self, change: ControlChange) -> Invalidation {
        let invalidation = change.invalidation();
        match change {
            ControlChange::Rows(v) => self.grid.rows = clamp_count(v),
            ControlChange::Columns(v) => self.grid.columns = clamp_count(v),
            ControlChange::Spacing(v) => self.grid.spacing = clamp(v, SPACING_RANGE),
            ControlChange::FieldKind(kind) => self.field.kind = kind,
            ControlChange::Rotation(v) => self.field.rotation_degrees = clamp(v, ROTATION_RANGE),
            ControlChange::Intensity(v) => self.field.intensity = clamp(v, INTENSITY_RANGE),
            ControlChange::Spiral(on) => self.field.spiral_enabled = on,
            ControlChange::SpiralIntensity(v) => {
                self.field.spiral_intensity = clamp(v, SPIRAL_RANGE)
            }
            ControlChange::XOffset(v) => self.field.x_offset_percent = clamp(v, OFFSET_RANGE),
            ControlChange::YOffset(v) => self.field.y_offset_percent = clamp(v, OFFSET_RANGE),
            ControlChange::Shape(shape) => self.style.shape = shape,
            ControlChange::ShapeSize(v) => self.style.shape_size = clamp(v, SHAPE_SIZE_RANGE),
            ControlChange::VectorScale(v) => {
                self.style.vector_scale = clamp(v, VECTOR_SCALE_RANGE)
            }
            ControlChange::LineThickness(v) => {
                self.style.line_thickness = clamp(v, LINE_THICKNESS_RANGE)
            }
            ControlChange::Gradient(mode) => self.style.gradient = mode,
            ControlChange::FillParent(on) => {
                self.canvas_policy = if on {
                    CanvasPolicy::Fill
                } else {
                    CanvasPolicy::Square
                }
            }
            ControlChange::ExportMode(mode) => self.export_mode = mode,
        }
        invalidation
    }

    /// Copy with every numeric control clamped into range.
    pub fn clamped(mut self) -> Self {
        self.grid.rows = clamp_count(self.grid.rows as i64);
        self.grid.columns = clamp_count(self.grid.columns as i64);
        self.grid.spacing = clamp(self.grid.spacing, SPACING_RANGE);
        self.field.rotation_degrees = clamp(self.field.rotation_degrees, ROTATION_RANGE);
        self.field.intensity = clamp(self.field.intensity, INTENSITY_RANGE);
        self.field.spiral_intensity = clamp(self.field.spiral_intensity, SPIRAL_RANGE);
        self.field.x_offset_percent = clamp(self.field.x_offset_percent, OFFSET_RANGE);
        self.field.y_offset_percent = clamp(self.field.y_offset_percent, OFFSET_RANGE);
        self.style.shape_size = clamp(self.style.shape_size, SHAPE_SIZE_RANGE);
        self.style.vector_scale = clamp(self.style.vector_scale, VECTOR_SCALE_RANGE);
        self.style.line_thickness = clamp(self.style.line_thickness, LINE_THICKNESS_RANGE);
        self
    }

    /// Restores every control to its default. The shape color is kept.
    pub fn reset(&mut self) {
        let color = self.style.color;
        *self = Self::default();
        self.style.color = color;
    }

    pub fn fill_parent(&self) -> bool {
        self.canvas_policy == CanvasPolicy::Fill
    }
}

fn clamp(value: f32, (min, max): (f32, f32)) -> f32 {
    if value.is_nan() {
        min
    } else {
        value.clamp(min, max)
    }
}

fn clamp_count(value: i64) -> usize {
    value.clamp(MIN_GRID as i64, MAX_GRID as i64) as usize
}
