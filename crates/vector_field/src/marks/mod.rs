//! Marks: the vector-graphics primitives drawn for each sample.
//!
//! - [`StyleParams`]: shape and styling options, orthogonal to the field parameters
//! - [`Mark`]: one emitted primitive (or composite)
//! - [`synth`]: turns samples into marks
//! - [`svg`]: [`Composition`] and SVG serialisation
use std::sync::Arc;

use glam::Vec2;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::error::{Error, Result};
use crate::shading::GradientMode;
use crate::shape::CustomShape;

pub mod svg;
pub mod synth;

pub use svg::Composition;
pub use synth::{render, MarkSynthesizer};

/// Shape drawn for every sample.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    #[default]
    Line,
    Dot,
    Arrow,
    Triangle,
    Custom,
}

impl ShapeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeKind::Line => "line",
            ShapeKind::Dot => "dot",
            ShapeKind::Arrow => "arrow",
            ShapeKind::Triangle => "triangle",
            ShapeKind::Custom => "custom",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "line" => Some(ShapeKind::Line),
            "dot" => Some(ShapeKind::Dot),
            "arrow" => Some(ShapeKind::Arrow),
            "triangle" => Some(ShapeKind::Triangle),
            "custom" => Some(ShapeKind::Custom),
            _ => None,
        }
    }

    /// Whether `line_thickness` has a visible effect.
    pub fn uses_line_thickness(&self) -> bool {
        matches!(self, ShapeKind::Line | ShapeKind::Arrow)
    }

    /// Whether `shape_size` has a visible effect.
    pub fn uses_shape_size(&self) -> bool {
        !matches!(self, ShapeKind::Line)
    }
}

/// Styling of marks. Changing style re-renders without regenerating samples.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Clone, Debug, PartialEq)]
pub struct StyleParams {
    pub shape: ShapeKind,
    pub color: Color,
    pub shape_size: f32,
    /// Multiplier applied to sample magnitudes.
    pub vector_scale: f32,
    pub line_thickness: f32,
    pub gradient: GradientMode,
}

impl Default for StyleParams {
    fn default() -> Self {
        Self {
            shape: ShapeKind::Line,
            color: Color::WHITE,
            shape_size: 1.0,
            vector_scale: 1.0,
            line_thickness: 1.0,
            gradient: GradientMode::None,
        }
    }
}

impl StyleParams {
    pub fn new(shape: ShapeKind) -> Self {
        Self {
            shape,
            ..Default::default()
        }
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn with_shape_size(mut self, shape_size: f32) -> Self {
        self.shape_size = shape_size;
        self
    }

    pub fn with_vector_scale(mut self, vector_scale: f32) -> Self {
        self.vector_scale = vector_scale;
        self
    }

    pub fn with_line_thickness(mut self, line_thickness: f32) -> Self {
        self.line_thickness = line_thickness;
        self
    }

    pub fn with_gradient(mut self, gradient: GradientMode) -> Self {
        self.gradient = gradient;
        self
    }

    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("shape_size", self.shape_size),
            ("vector_scale", self.vector_scale),
            ("line_thickness", self.line_thickness),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::InvalidConfig(format!("{name} must be >= 0")));
            }
        }
        Ok(())
    }
}

/// A custom shape instance placed at a sample.
#[derive(Clone, Debug, PartialEq)]
pub struct CustomPlacement {
    /// Center of the placed shape.
    pub anchor: Vec2,
    pub rotation_degrees: f32,
    /// Rendered width and height.
    pub size: Vec2,
    pub shape: Arc<CustomShape>,
    /// Mark color applied to recolorable paints, if the shape recolors.
    pub tint: Option<Color>,
}

/// One emitted vector-graphics primitive.
#[derive(Clone, Debug, PartialEq)]
pub enum Mark {
    Line {
        from: Vec2,
        to: Vec2,
        stroke: Color,
        width: f32,
    },
    Circle {
        center: Vec2,
        radius: f32,
        fill: Color,
    },
    /// Filled path; `data` holds SVG path commands.
    Path { data: String, fill: Color },
    Group(Vec<Mark>),
    Custom(CustomPlacement),
}

impl Mark {
    /// Whether this mark is, or contains, embedded custom artwork.
    pub fn is_custom(&self) -> bool {
        match self {
            Mark::Custom(_) => true,
            Mark::Group(children) => children.iter().any(Mark::is_custom),
            _ => false,
        }
    }
}
