#![forbid(unsafe_code)]

mod rendering;

pub use rendering::{
    init_tracing, render_composition_to_svg, with_background, write_export_to_svg, RenderConfig,
};
