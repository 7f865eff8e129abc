use vector_field_examples::{init_tracing, with_background};
use vector_field_host::prelude::*;

const PRESETS: [&str; 2] = [
    r##"(
        name: "magnetic-lines",
    )"##,
    r##"(
        name: "fluid-dots",
        controls: (
            grid: (rows: 36, columns: 36, spacing: 1.0),
            field: (kind: "fluid", intensity: 1.6, spiral_enabled: false),
            style: (shape: dot, shape_size: 2.5, gradient: wave, color: "#ffd166"),
        ),
    )"##,
];

fn main() -> anyhow::Result<()> {
    init_tracing();
    let mut sent: Vec<PluginMessage> = Vec::new();
    let mut session = Session::with_seed(&mut sent, 3);

    for text in PRESETS {
        let preset = Preset::from_ron(text)?;
        let name = preset.name.clone();
        session.apply(Command::ApplyPreset(preset))?;
        let export = session.export()?;
        let background = session.canvas().background;
        std::fs::write(
            format!("preset-{name}.svg"),
            with_background(&export.svg, background),
        )?;
    }

    let snapshot = Preset::new("current", session.controls().clone());
    println!("{}", snapshot.to_ron()?);
    drop(session);
    println!("{} envelopes posted", sent.len());

    Ok(())
}
