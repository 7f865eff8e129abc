use glam::Vec2;
use vector_field::prelude::*;
use vector_field_examples::{init_tracing, render_composition_to_svg, RenderConfig};

fn main() -> anyhow::Result<()> {
    init_tracing();
    // A 16:9 frame: the working canvas follows its aspect ratio
    let target = Vec2::new(1920.0, 1080.0);
    let context = CanvasContext::new(target);
    let canvas = context.working_extent();

    let grid = GridSpec::new(18, 32);
    let params = FieldParams::new(FieldKind::Saddle).with_spiral(0.3);
    let samples = FieldSampler::new(grid, params).generate_with_seed(canvas.into(), 0.1);
    let style = StyleParams::new(ShapeKind::Triangle).with_shape_size(2.0);
    let composition = render(&samples, &style, grid, canvas, None);

    for (name, mode) in [
        ("viewport", ExportMode::Viewport),
        ("rewrite", ExportMode::RewriteCoordinates),
    ] {
        let rc = RenderConfig::new(target)
            .with_background(context.background)
            .with_mode(mode);
        let export = render_composition_to_svg(&composition, &rc, format!("export-{name}.svg"))?;
        if let Some(scale) = export.scale {
            tracing::info!("Rewrote coordinates by {}x{}.", scale.x, scale.y);
        }
    }

    // Square working canvas stretched onto the same frame
    let square = context.with_policy(CanvasPolicy::Square).working_extent();
    let samples = FieldSampler::new(grid, FieldParams::new(FieldKind::Saddle))
        .generate_with_seed(square.into(), 0.1);
    let composition = render(&samples, &style, grid, square, None);
    let rc = RenderConfig::new(target).with_mode(ExportMode::RewriteCoordinates);
    render_composition_to_svg(&composition, &rc, "export-square-stretched.svg")?;

    Ok(())
}
