//! Grid sampling of a parametric field.
use glam::Vec2;
use mint::Vector2;
use rand::Rng;
use tracing::{debug, warn};

use crate::events::{EventSink, FieldEvent, FieldEventKind};
use crate::field::kinds::{self, FieldPoint};
use crate::field::{rand01, FieldParams, GridSpec, Sample, DEFAULT_MAGNITUDE};

/// Samples a field over a grid.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FieldSampler {
    pub grid: GridSpec,
    pub params: FieldParams,
}

impl FieldSampler {
    pub fn new(grid: GridSpec, params: FieldParams) -> Self {
        Self { grid, params }
    }

    /// Generates samples for `canvas`, drawing the phase seed once from `rng`.
    pub fn generate(&self, canvas: Vector2<f32>, rng: &mut dyn Rng) -> Vec<Sample> {
        self.generate_with_seed(canvas, rand01(rng))
    }

    /// Generates samples for `canvas` with an explicit phase seed. Deterministic.
    pub fn generate_with_seed(&self, canvas: Vector2<f32>, seed: f32) -> Vec<Sample> {
        self.generate_with_events(canvas, seed, &mut ())
    }

    /// Like [`FieldSampler::generate_with_seed`], reporting progress and warnings to `sink`.
    pub fn generate_with_events(
        &self,
        canvas: Vector2<f32>,
        seed: f32,
        sink: &mut dyn EventSink,
    ) -> Vec<Sample> {
        let canvas = Vec2::from(canvas);
        let grid = &self.grid;
        let params = &self.params;

        if sink.wants(FieldEventKind::GenerationStarted) {
            sink.send(FieldEvent::GenerationStarted {
                grid: *grid,
                kind: params.kind.clone(),
                seed,
            });
        }

        let cell = grid.cell_extent(canvas) * grid.spacing;
        let center = params.center(canvas);
        let shift = center - canvas * 0.5;
        let rotation = params.rotation_radians();

        let mut unknown = false;
        let mut samples = Vec::with_capacity(grid.sample_count());
        for iy in 0..grid.rows {
            for ix in 0..grid.columns {
                let position = Vec2::new(ix as f32, iy as f32) * cell;
                let point = FieldPoint::new(position, center).with_phase_shift(shift);

                let (mut angle, magnitude) =
                    match kinds::evaluate(&params.kind, &point, params.intensity, seed) {
                        Some((angle, magnitude)) => (angle + rotation, magnitude),
                        None => {
                            unknown = true;
                            (0.0, DEFAULT_MAGNITUDE)
                        }
                    };

                if params.spiral_enabled {
                    let spiral = kinds::spiral_angle(&point, params.spiral_intensity);
                    angle = (angle + spiral) / 2.0;
                }

                samples.push(Sample {
                    position,
                    angle,
                    magnitude,
                    r: point.r,
                });
            }
        }

        if unknown {
            warn!("Unknown field type '{}'; using zero-angle samples.", params.kind);
            if sink.wants(FieldEventKind::Warning) {
                sink.send(FieldEvent::Warning {
                    context: format!("field:{}", params.kind),
                    message: format!("Unknown field type '{}'", params.kind),
                });
            }
        }

        debug!(
            "Generated {} samples for {} field on {}x{} canvas.",
            samples.len(),
            params.kind,
            canvas.x,
            canvas.y
        );
        if sink.wants(FieldEventKind::GenerationFinished) {
            sink.send(FieldEvent::GenerationFinished {
                sample_count: samples.len(),
            });
        }

        samples
    }
}

/// Generates samples for `grid` and `params` on `canvas` with an explicit phase seed.
pub fn generate(
    grid: &GridSpec,
    params: &FieldParams,
    canvas: Vector2<f32>,
    seed: f32,
) -> Vec<Sample> {
    FieldSampler::new(*grid, params.clone()).generate_with_seed(canvas, seed)
}
