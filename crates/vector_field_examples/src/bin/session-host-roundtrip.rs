use vector_field::prelude::Color;
use vector_field_examples::{init_tracing, with_background};
use vector_field_host::prelude::*;

const ARROWHEAD: &str = r#"<svg width="20" height="20"><polygon points="0,0 20,10 0,20 5,10"/></svg>"#;

fn main() -> anyhow::Result<()> {
    init_tracing();
    let bus = HostBus::new();
    let host = bus.host_sender();
    let mut session = Session::new(bus.link());

    // The host reports a selected frame
    host.send(HostMessage::from_json(
        r##"{"type":"frame-selected","width":1280,"height":720,"backgroundColor":"#f4efe6"}"##,
    )?)?;
    session.pump(&bus.inbound_rx);

    session.apply(Command::Set(ControlChange::FieldKind("electric".into())))?;
    session.apply(Command::Set(ControlChange::Rows(24)))?;
    session.apply(Command::Set(ControlChange::Columns(40)))?;

    // Ask for artwork; a second click while waiting is ignored
    session.apply(Command::RequestCustomShape)?;
    session.apply(Command::RequestCustomShape)?;
    for message in bus.drain_outbound() {
        println!("-> {}", message.to_json()?);
    }
    host.send(HostMessage::VectorSelected {
        svg: ARROWHEAD.into(),
        width: 20.0,
        height: 20.0,
    })?;
    session.pump(&bus.inbound_rx);

    session.apply(Command::Set(ControlChange::ShapeSize(0.8)))?;
    session.apply(Command::SetShapeColor(Color::from_hex("#c0392b")?))?;
    session.apply(Command::Export)?;

    for notice in session.take_notices() {
        println!("notice: {:?}: {}", notice.kind, notice.message);
    }
    for message in bus.drain_outbound() {
        if let PluginMessage::CreateSvg {
            svg,
            background_color,
            ..
        } = &message
        {
            let background = Color::from_hex(background_color)?;
            std::fs::write("session-host-roundtrip.svg", with_background(svg, background))?;
        }
        let json = message.to_json()?;
        println!("-> {}...", json.chars().take(120).collect::<String>());
    }

    session.apply(Command::Close)?;
    Ok(())
}
