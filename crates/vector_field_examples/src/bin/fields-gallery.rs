use glam::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;
use vector_field::prelude::*;
use vector_field_examples::{init_tracing, render_composition_to_svg, RenderConfig};

fn main() -> anyhow::Result<()> {
    init_tracing();
    // One arrow grid per field kind, all on a square working canvas
    let canvas = Vec2::splat(WORKING_SIZE);
    let grid = GridSpec::new(20, 20);
    let style = StyleParams::new(ShapeKind::Arrow)
        .with_shape_size(1.5)
        .with_vector_scale(2.0);
    let rc = RenderConfig::new(Vec2::splat(800.0));
    let mut rng = StdRng::seed_from_u64(42);

    for kind in FieldKind::ALL {
        let sampler = FieldSampler::new(grid, FieldParams::new(kind.clone()));
        let samples = sampler.generate(canvas.into(), &mut rng);
        let composition = render(&samples, &style, grid, canvas, None);
        render_composition_to_svg(&composition, &rc, format!("fields-gallery-{kind}.svg"))?;
    }

    Ok(())
}
