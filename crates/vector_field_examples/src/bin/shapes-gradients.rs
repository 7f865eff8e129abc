use glam::Vec2;
use vector_field::prelude::*;
use vector_field_examples::{init_tracing, render_composition_to_svg, RenderConfig};

fn main() -> anyhow::Result<()> {
    init_tracing();
    let canvas = Vec2::splat(WORKING_SIZE);
    let grid = GridSpec::new(24, 24);
    let params = FieldParams::new(FieldKind::Source).with_rotation(30.0);
    let samples = FieldSampler::new(grid, params).generate_with_seed(canvas.into(), 0.25);
    let rc = RenderConfig::new(canvas).with_background(Color::rgb(0x10, 0x14, 0x20));

    let color = Color::from_hex("#7fd4ff")?;
    for shape in [
        ShapeKind::Line,
        ShapeKind::Dot,
        ShapeKind::Arrow,
        ShapeKind::Triangle,
    ] {
        for gradient in [
            GradientMode::None,
            GradientMode::Radial,
            GradientMode::Angular,
            GradientMode::Wave,
        ] {
            let style = StyleParams::new(shape)
                .with_color(color)
                .with_shape_size(2.0)
                .with_line_thickness(1.5)
                .with_gradient(gradient);
            let composition = render(&samples, &style, grid, canvas, None);
            render_composition_to_svg(
                &composition,
                &rc,
                format!("shapes-{}-{}.svg", shape.as_str(), gradient.as_str()),
            )?;
        }
    }

    Ok(())
}
