use glam::Vec2;
use vector_field::prelude::*;
use vector_field_examples::{init_tracing, render_composition_to_svg, RenderConfig};

fn main() -> anyhow::Result<()> {
    init_tracing();
    let canvas = Vec2::splat(WORKING_SIZE);
    let grid = GridSpec::new(30, 30);
    let style = StyleParams::new(ShapeKind::Line).with_vector_scale(1.5);
    let rc = RenderConfig::new(canvas);

    // Compare three variants of the same vortex:
    // - plain, centered
    // - spiral blended in
    // - spiral with the center pushed to the upper left
    let variants = [
        ("plain", FieldParams::new(FieldKind::Vortex)),
        ("spiral", FieldParams::new(FieldKind::Vortex).with_spiral(0.6)),
        (
            "spiral-offset",
            FieldParams::new(FieldKind::Vortex)
                .with_spiral(0.6)
                .with_offsets(-25.0, -25.0),
        ),
    ];

    for (name, params) in variants {
        params.validate()?;
        let samples = generate(&grid, &params, canvas.into(), 0.0);
        let composition = render(&samples, &style, grid, canvas, None);
        render_composition_to_svg(&composition, &rc, format!("fields-vortex-{name}.svg"))?;
    }

    Ok(())
}
