#![forbid(unsafe_code)]
//! vector_field: Parametric 2D vector fields rendered as grids of styled marks and exported as SVG.
//!
//! Modules:
//! - field: grid sampling of magnetic, fluid, electric, vortex, sink, source, saddle, wind and grid fields
//! - shading: gradient opacity per sample
//! - marks: line/dot/arrow/triangle/custom mark synthesis and SVG serialisation
//! - shape: ingestion of custom SVG artwork into recolorable descriptors
//! - color: hex colors and complementary color derivation
//! - export: reprojection of the working canvas onto the host's target canvas
//! - events: observing generation passes
pub mod canvas;
pub mod color;
pub mod error;
pub mod events;
pub mod export;
pub mod field;
pub mod marks;
pub mod shading;
pub mod shape;

/// Convenient re-exports for common types. Import with `use vector_field::prelude::*;`.
pub mod prelude {
    pub use crate::canvas::{working_extent, CanvasContext, CanvasPolicy, WORKING_SIZE};
    pub use crate::color::{complement, Color};
    pub use crate::error::{Error, Result};
    pub use crate::events::{EventSink, FieldEvent, FieldEventKind, FnSink, MultiSink, VecSink};
    pub use crate::export::{reproject, Export, ExportMode};
    pub use crate::field::{generate, FieldKind, FieldParams, FieldSampler, GridSpec, Sample};
    pub use crate::marks::{
        render, Composition, CustomPlacement, Mark, MarkSynthesizer, ShapeKind, StyleParams,
    };
    pub use crate::shading::{opacity, GradientMode};
    pub use crate::shape::{ingest, CustomShape, Drawable, Paint, Provenance};
}
