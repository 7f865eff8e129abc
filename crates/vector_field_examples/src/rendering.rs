use std::fs;
use std::path::Path;
use std::sync::Once;

use glam::Vec2;
use tracing::info;
use tracing_subscriber::EnvFilter;
use vector_field::prelude::*;

static INIT: Once = Once::new();

/// Installs a `fmt` subscriber filtered by `RUST_LOG` (default `info`). Safe to call twice.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .try_init();
    });
}

/// Output settings for example renders.
#[derive(Clone, Debug)]
pub struct RenderConfig {
    /// Size of the written document.
    pub target: Vec2,
    pub background: Option<Color>,
    pub mode: ExportMode,
}

impl RenderConfig {
    pub fn new(target: Vec2) -> Self {
        Self {
            target,
            background: Some(vector_field::canvas::DEFAULT_BACKGROUND),
            mode: ExportMode::Viewport,
        }
    }

    pub fn with_background(mut self, background: impl Into<Option<Color>>) -> Self {
        self.background = background.into();
        self
    }

    pub fn with_mode(mut self, mode: ExportMode) -> Self {
        self.mode = mode;
        self
    }
}

/// Reprojects `composition` onto `rc.target` and writes it to `out_path`.
pub fn render_composition_to_svg(
    composition: &Composition,
    rc: &RenderConfig,
    out_path: impl AsRef<Path>,
) -> anyhow::Result<Export> {
    let export = reproject(composition, rc.target, rc.mode)?;
    write_export_to_svg(&export, rc.background, out_path)?;
    Ok(export)
}

/// Writes `export` to `out_path`, painting `background` behind the marks.
pub fn write_export_to_svg(
    export: &Export,
    background: Option<Color>,
    out_path: impl AsRef<Path>,
) -> anyhow::Result<()> {
    let out_path = out_path.as_ref();
    let svg = match background {
        Some(color) => with_background(&export.svg, color),
        None => export.svg.clone(),
    };
    fs::write(out_path, svg)?;
    info!(
        "Wrote {} ({}x{}).",
        out_path.display(),
        export.size.x,
        export.size.y
    );
    Ok(())
}

/// Inserts a full-size background rectangle as the first child of the root `<svg>`.
pub fn with_background(svg: &str, background: Color) -> String {
    let Some(root) = svg.find("<svg") else {
        return svg.to_owned();
    };
    let Some(close) = svg[root..].find('>') else {
        return svg.to_owned();
    };
    let at = root + close + 1;
    format!(
        r#"{}<rect width="100%" height="100%" fill="{}"/>{}"#,
        &svg[..at],
        background.to_hex(),
        &svg[at..]
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn background_is_first_child() {
        let svg = r#"<svg xmlns="http://www.w3.org/2000/svg" width="10" height="10"><circle/></svg>"#;
        let out = with_background(svg, Color::BLACK);
        assert_eq!(
            out,
            r##"<svg xmlns="http://www.w3.org/2000/svg" width="10" height="10"><rect width="100%" height="100%" fill="#000000"/><circle/></svg>"##
        );
    }

    #[test]
    fn markup_without_root_is_untouched() {
        assert_eq!(with_background("<g/>", Color::WHITE), "<g/>");
    }
}
