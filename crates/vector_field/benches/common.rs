use std::time::Duration;

use criterion::{Criterion, Throughput};
use glam::Vec2;

pub const SAMPLE_SIZE: usize = 30;
pub const WARM_UP: Duration = Duration::from_millis(500);
pub const MEASUREMENT_TIME: Duration = Duration::from_secs(2);

/// Fixed phase seed so every run samples the same field.
pub const SEED: f32 = 0.5;

pub fn default_criterion() -> Criterion {
    Criterion::default()
        .configure_from_args()
        .sample_size(SAMPLE_SIZE)
        .warm_up_time(WARM_UP)
        .measurement_time(MEASUREMENT_TIME)
}

/// Throughput in samples (or marks) per iteration.
pub fn samples_throughput(count: usize) -> Throughput {
    Throughput::Elements(count.max(1) as u64)
}

/// Square working canvas.
pub fn working_canvas() -> Vec2 {
    Vec2::splat(vector_field::canvas::WORKING_SIZE)
}
