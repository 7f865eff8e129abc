//! Custom shapes: externally supplied artwork normalised into a recolorable descriptor.
//!
//! A [`CustomShape`] is built once by [`ingest`] and then reused for every mark; it is
//! never re-parsed while rendering.
use std::fmt::Write as _;

use glam::Vec2;

use crate::color::Color;
use crate::marks::svg::{escape_attr, fmt_num};

pub mod ingest;

pub use ingest::{ingest, DEFAULT_VIEW_BOX};

/// Where a custom shape came from. Drives the recolor policy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Provenance {
    /// Artwork selected in the host document. Recolored to the mark color.
    Drawn,
    /// Markup pasted as text. Rendered with its authored colors.
    Pasted,
}

/// Fill or stroke of a drawable element.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Paint {
    /// Explicitly disabled; never recolored.
    None,
    /// Authored paint value, replaced by the mark color when recoloring.
    Color(String),
}

impl Paint {
    pub fn parse(value: &str) -> Self {
        match value.trim() {
            "none" => Paint::None,
            other => Paint::Color(other.to_owned()),
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Paint::None)
    }

    fn resolve(&self, tint: Option<Color>) -> String {
        match (self, tint) {
            (Paint::None, _) => "none".to_owned(),
            (Paint::Color(_), Some(color)) => color.to_hex_rgba(),
            (Paint::Color(authored), None) => authored.clone(),
        }
    }
}

/// One path-like element of a custom shape.
#[derive(Clone, Debug, PartialEq)]
pub struct Drawable {
    /// Path commands (`d` attribute).
    pub data: String,
    pub fill: Paint,
    pub stroke: Paint,
    pub stroke_width: Option<f32>,
}

/// Normalised, recolorable representation of custom artwork.
#[derive(Clone, Debug, PartialEq)]
pub struct CustomShape {
    /// View-box width and height, both > 0.
    pub view_box: Vec2,
    /// Drawable elements in document order.
    pub elements: Vec<Drawable>,
    pub provenance: Provenance,
}

impl CustomShape {
    /// Width over height of the view-box.
    pub fn aspect_ratio(&self) -> f32 {
        self.view_box.x / self.view_box.y
    }

    /// Whether marks using this shape take the mark color.
    pub fn recolors(&self) -> bool {
        self.provenance == Provenance::Drawn
    }

    /// Largest size with this shape's aspect ratio fitting a `base` x `base` box.
    pub fn fit_within(&self, base: f32) -> Vec2 {
        let aspect = self.aspect_ratio();
        if aspect >= 1.0 {
            Vec2::new(base, base / aspect)
        } else {
            Vec2::new(base * aspect, base)
        }
    }

    /// Writes the drawable elements as SVG, tinted with `tint` when given.
    pub fn write_body(&self, out: &mut String, tint: Option<Color>) {
        for element in &self.elements {
            let _ = write!(
                out,
                r#"<path d="{}" fill="{}" stroke="{}""#,
                escape_attr(&element.data),
                escape_attr(&element.fill.resolve(tint)),
                escape_attr(&element.stroke.resolve(tint)),
            );
            if let Some(width) = element.stroke_width {
                let _ = write!(out, r#" stroke-width="{}""#, fmt_num(width));
            }
            out.push_str("/>");
        }
    }
}
