//! Mark synthesis: one primitive per sample, positioned, oriented and shaded.
use std::f32::consts::FRAC_PI_6;
use std::fmt::Write as _;
use std::sync::Arc;

use glam::Vec2;

use crate::field::{GridSpec, Sample};
use crate::marks::svg::{fmt_num, Composition};
use crate::marks::{CustomPlacement, Mark, ShapeKind, StyleParams};
use crate::shading::{alpha_byte, opacity};
use crate::shape::CustomShape;

/// Builds marks for samples of one generation pass.
#[derive(Clone, Debug)]
pub struct MarkSynthesizer<'a> {
    pub style: &'a StyleParams,
    pub grid: GridSpec,
    /// Working canvas the samples were generated on.
    pub canvas: Vec2,
    /// Artwork for [`ShapeKind::Custom`].
    pub custom: Option<&'a Arc<CustomShape>>,
}

impl<'a> MarkSynthesizer<'a> {
    pub fn new(style: &'a StyleParams, grid: GridSpec, canvas: Vec2) -> Self {
        Self {
            style,
            grid,
            canvas,
            custom: None,
        }
    }

    pub fn with_custom_shape(mut self, shape: Option<&'a Arc<CustomShape>>) -> Self {
        self.custom = shape;
        self
    }

    /// Mark for `sample`, or `None` when the custom shape kind has no artwork loaded.
    pub fn emit(&self, sample: &Sample) -> Option<Mark> {
        let style = self.style;
        let start = sample.position;
        let end = sample.end_point(style.vector_scale);
        let color = style
            .color
            .with_alpha(alpha_byte(opacity(sample, style.gradient, self.canvas)));

        let mark = match style.shape {
            ShapeKind::Line => Mark::Line {
                from: start,
                to: end,
                stroke: color,
                width: style.line_thickness,
            },
            ShapeKind::Dot => Mark::Circle {
                center: end,
                radius: style.shape_size,
                fill: color,
            },
            ShapeKind::Arrow => {
                let segment = end - start;
                let heading = segment.y.atan2(segment.x);
                Mark::Group(vec![
                    Mark::Line {
                        from: start,
                        to: end,
                        stroke: color,
                        width: style.line_thickness,
                    },
                    Mark::Path {
                        data: wedge(end, heading, 2.0 * style.shape_size),
                        fill: color,
                    },
                ])
            }
            ShapeKind::Triangle => Mark::Path {
                data: wedge(end, sample.angle, 3.0 * style.shape_size),
                fill: color,
            },
            ShapeKind::Custom => {
                let shape = self.custom?;
                let base = self.cell_size() * style.shape_size;
                Mark::Custom(CustomPlacement {
                    anchor: end,
                    rotation_degrees: sample.angle.to_degrees(),
                    size: shape.fit_within(base),
                    shape: Arc::clone(shape),
                    tint: shape.recolors().then_some(color),
                })
            }
        };
        Some(mark)
    }

    /// Renders all `samples` into a composition on the working canvas.
    pub fn render(&self, samples: &[Sample]) -> Composition {
        let marks = samples.iter().filter_map(|s| self.emit(s)).collect();
        Composition::new(self.canvas, marks)
    }

    /// Side of the square a custom shape is fitted into at `shape_size` 1.
    pub fn cell_size(&self) -> f32 {
        let columns = self.grid.columns.max(1) as f32;
        let rows = self.grid.rows.max(1) as f32;
        (self.canvas.x / columns).min(self.canvas.y / rows)
    }
}

/// Renders `samples` with `style`, using `custom` for the custom shape kind.
pub fn render(
    samples: &[Sample],
    style: &StyleParams,
    grid: GridSpec,
    canvas: Vec2,
    custom: Option<&Arc<CustomShape>>,
) -> Composition {
    MarkSynthesizer::new(style, grid, canvas)
        .with_custom_shape(custom)
        .render(samples)
}

/// Closed triangle with its tip at `tip`, legs `length` long at ±30° behind `heading`.
fn wedge(tip: Vec2, heading: f32, length: f32) -> String {
    let left = tip - Vec2::from_angle(heading - FRAC_PI_6) * length;
    let right = tip - Vec2::from_angle(heading + FRAC_PI_6) * length;
    let mut d = String::new();
    let _ = write!(
        d,
        "M {} {} L {} {} L {} {} Z",
        fmt_num(tip.x),
        fmt_num(tip.y),
        fmt_num(left.x),
        fmt_num(left.y),
        fmt_num(right.x),
        fmt_num(right.y),
    );
    d
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use crate::shading::GradientMode;
    use crate::shape::{Drawable, Paint, Provenance};

    const CANVAS: Vec2 = Vec2::new(600.0, 600.0);

    fn sample(position: Vec2, angle: f32, magnitude: f32) -> Sample {
        Sample {
            position,
            angle,
            magnitude,
            r: (position - CANVAS * 0.5).length(),
        }
    }

    fn synth(style: &StyleParams) -> MarkSynthesizer<'_> {
        MarkSynthesizer::new(style, GridSpec::new(10, 20), CANVAS)
    }

    fn custom_shape(provenance: Provenance) -> Arc<CustomShape> {
        Arc::new(CustomShape {
            view_box: Vec2::new(100.0, 50.0),
            elements: vec![Drawable {
                data: "M0 0 L100 50".into(),
                fill: Paint::Color("#abcdef".into()),
                stroke: Paint::None,
                stroke_width: None,
            }],
            provenance,
        })
    }

    #[test]
    fn line_runs_from_sample_to_scaled_end() {
        let style = StyleParams::new(ShapeKind::Line)
            .with_vector_scale(2.0)
            .with_line_thickness(3.0)
            .with_color(Color::rgb(1, 2, 3));
        let mark = synth(&style)
            .emit(&sample(Vec2::new(10.0, 10.0), 0.0, 5.0))
            .unwrap();
        assert_eq!(
            mark,
            Mark::Line {
                from: Vec2::new(10.0, 10.0),
                to: Vec2::new(20.0, 10.0),
                stroke: Color::new(1, 2, 3, 255),
                width: 3.0,
            }
        );
    }

    #[test]
    fn dot_sits_at_end_point_with_shape_size_radius() {
        let style = StyleParams::new(ShapeKind::Dot).with_shape_size(4.0);
        let Some(Mark::Circle { center, radius, .. }) =
            synth(&style).emit(&sample(Vec2::ZERO, std::f32::consts::FRAC_PI_2, 5.0))
        else {
            panic!("expected circle");
        };
        assert!((center - Vec2::new(0.0, 5.0)).length() < 1e-5);
        assert_eq!(radius, 4.0);
    }

    #[test]
    fn arrow_is_segment_plus_head() {
        let style = StyleParams::new(ShapeKind::Arrow).with_shape_size(1.0);
        let Some(Mark::Group(parts)) = synth(&style).emit(&sample(Vec2::ZERO, 0.0, 10.0)) else {
            panic!("expected group");
        };
        assert_eq!(parts.len(), 2);
        assert!(matches!(parts[0], Mark::Line { .. }));
        let Mark::Path { data, .. } = &parts[1] else {
            panic!("expected head path");
        };
        // legs of length 2 at ±30° behind the tip (10, 0)
        assert_eq!(data, "M 10 0 L 8.268 1 L 8.268 -1 Z");
    }

    #[test]
    fn triangle_uses_three_times_shape_size() {
        let style = StyleParams::new(ShapeKind::Triangle).with_shape_size(2.0);
        let Some(Mark::Path { data, .. }) = synth(&style).emit(&sample(Vec2::ZERO, 0.0, 0.0))
        else {
            panic!("expected path");
        };
        assert_eq!(data, "M 0 0 L -5.196 3 L -5.196 -3 Z");
    }

    #[test]
    fn gradient_sets_alpha_channel() {
        let style = StyleParams::new(ShapeKind::Dot).with_gradient(GradientMode::Radial);
        let Some(Mark::Circle { fill, .. }) = synth(&style).emit(&sample(Vec2::ZERO, 0.0, 0.0))
        else {
            panic!("expected circle");
        };
        assert_eq!(fill.a, 0);
    }

    #[test]
    fn custom_without_artwork_emits_nothing() {
        let style = StyleParams::new(ShapeKind::Custom);
        assert!(synth(&style).emit(&sample(Vec2::ZERO, 0.0, 1.0)).is_none());
        assert!(synth(&style)
            .render(&[sample(Vec2::ZERO, 0.0, 1.0)])
            .is_empty());
    }

    #[test]
    fn custom_is_fitted_to_cell_and_rotated() {
        let style = StyleParams::new(ShapeKind::Custom).with_shape_size(2.0);
        let shape = custom_shape(Provenance::Drawn);
        let s = synth(&style).with_custom_shape(Some(&shape));
        // cell = min(600 / 20, 600 / 10) = 30, base = 60
        assert_eq!(s.cell_size(), 30.0);
        let Some(Mark::Custom(placement)) =
            s.emit(&sample(Vec2::new(100.0, 100.0), std::f32::consts::PI, 0.0))
        else {
            panic!("expected custom mark");
        };
        assert_eq!(placement.size, Vec2::new(60.0, 30.0));
        assert_eq!(placement.anchor, Vec2::new(100.0, 100.0));
        assert!((placement.rotation_degrees - 180.0).abs() < 1e-4);
        assert_eq!(placement.tint, Some(Color::WHITE));
    }

    #[test]
    fn pasted_custom_shapes_keep_authored_colors() {
        let style = StyleParams::new(ShapeKind::Custom);
        let shape = custom_shape(Provenance::Pasted);
        let Some(Mark::Custom(placement)) = synth(&style)
            .with_custom_shape(Some(&shape))
            .emit(&sample(Vec2::ZERO, 0.0, 0.0))
        else {
            panic!("expected custom mark");
        };
        assert_eq!(placement.tint, None);
    }

    #[test]
    fn render_keeps_sample_order() {
        let style = StyleParams::new(ShapeKind::Dot);
        let samples = [
            sample(Vec2::new(1.0, 0.0), 0.0, 0.0),
            sample(Vec2::new(2.0, 0.0), 0.0, 0.0),
        ];
        let comp = render(&samples, &style, GridSpec::new(2, 2), CANVAS, None);
        assert_eq!(comp.len(), 2);
        assert_eq!(comp.extent, CANVAS);
        assert!(matches!(comp.marks[1], Mark::Circle { center, .. } if center.x == 2.0));
    }
}
