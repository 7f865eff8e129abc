use std::sync::Arc;

use glam::Vec2;
use vector_field::prelude::*;
use vector_field_examples::{init_tracing, render_composition_to_svg, RenderConfig};

const LEAF: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 24 12">
  <defs><clipPath id="c"><rect width="24" height="12"/></clipPath></defs>
  <path d="M0 6 Q12 -4 24 6 Q12 16 0 6 Z"/>
  <line x1="2" y1="6" x2="22" y2="6" stroke="#335533" stroke-width="0.8"/>
</svg>"##;

fn main() -> anyhow::Result<()> {
    init_tracing();
    let canvas = Vec2::splat(WORKING_SIZE);
    let grid = GridSpec::new(16, 16);
    let params = FieldParams::new(FieldKind::Wind).with_intensity(1.4);
    let samples = FieldSampler::new(grid, params).generate_with_seed(canvas.into(), 0.8);
    let style = StyleParams::new(ShapeKind::Custom)
        .with_color(Color::from_hex("#9be37a")?)
        .with_shape_size(0.9)
        .with_gradient(GradientMode::Radial);
    let rc = RenderConfig::new(canvas);

    // Drawn artwork follows the mark color, pasted artwork keeps its own paints
    for provenance in [Provenance::Drawn, Provenance::Pasted] {
        let shape = Arc::new(ingest(LEAF, provenance, None)?);
        let composition = render(&samples, &style, grid, canvas, Some(&shape));
        let name = match provenance {
            Provenance::Drawn => "drawn",
            Provenance::Pasted => "pasted",
        };
        render_composition_to_svg(&composition, &rc, format!("shapes-custom-{name}.svg"))?;
    }

    Ok(())
}
