//! The session: one canonical state snapshot, updated by a single dispatcher.
//!
//! Host notifications arrive through [`Session::dispatch`], user edits through
//! [`Session::apply`]. Each call runs to completion before the next one, so a late
//! or out-of-order host response simply overwrites the current state.
//!
//! Invalidation follows two rules: a change to the field, the grid or the working
//! canvas regenerates samples with a fresh phase seed; a change to the style only
//! re-synthesises marks from the existing samples.
use std::sync::Arc;

use crossbeam_channel::Receiver;
use glam::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info, warn};
use vector_field::canvas::DEFAULT_BACKGROUND;
use vector_field::field::draw_seed;
use vector_field::prelude::*;

use crate::bus::HostLink;
use crate::controls::{ControlChange, Controls, Invalidation};
use crate::error::{Error, Result};
use crate::presets::Preset;
use crate::protocol::{HostMessage, PluginMessage};

/// Whether a custom shape request is outstanding.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SelectionState {
    #[default]
    Idle,
    /// A request was sent and no response has arrived yet. Further requests are blocked.
    AwaitingVectorSelection,
}

/// Manually chosen values that win over host suggestions until cleared.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Overrides {
    pub shape_color: bool,
    pub background: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeKind {
    /// The host reported an error.
    HostError,
    /// The host sent something that could not be understood.
    Protocol,
    /// Custom shape markup could not be ingested.
    Ingestion,
    Export,
    /// Generation degraded, e.g. on an unknown field kind.
    Generation,
}

/// Message for the user. Notices never change state.
#[derive(Clone, Debug, PartialEq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

/// User-initiated commands.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    Set(ControlChange),
    /// Sets the shape color and pins it against host suggestions.
    SetShapeColor(Color),
    ClearShapeColor,
    /// Sets the background and pins it against host suggestions.
    SetBackground(Color),
    ClearBackground,
    /// Asks the host for the currently selected vector artwork.
    RequestCustomShape,
    /// Ingests pasted SVG markup as the custom shape.
    PasteCustomShape(String),
    ApplyPreset(Preset),
    /// Regenerates samples with a fresh phase seed.
    Regenerate,
    /// Restores default controls.
    Reset,
    Export,
    Close,
}

pub struct Session<L: HostLink> {
    controls: Controls,
    canvas: CanvasContext,
    /// Last background suggested by the host.
    host_background: Color,
    overrides: Overrides,
    custom_shape: Option<Arc<CustomShape>>,
    selection: SelectionState,
    samples: Vec<Sample>,
    phase: f32,
    surface: Option<Composition>,
    notices: Vec<Notice>,
    closed: bool,
    rng: StdRng,
    link: L,
}

impl<L: HostLink> Session<L> {
    /// Creates a session with default controls and a randomly seeded RNG.
    pub fn new(link: L) -> Self {
        Self::with_seed(link, rand::random())
    }

    /// Creates a session whose phase seeds come from `StdRng::seed_from_u64(seed)`.
    pub fn with_seed(link: L, seed: u64) -> Self {
        let mut session = Self {
            controls: Controls::default(),
            canvas: CanvasContext::default(),
            host_background: DEFAULT_BACKGROUND,
            overrides: Overrides::default(),
            custom_shape: None,
            selection: SelectionState::Idle,
            samples: Vec::new(),
            phase: 0.0,
            surface: None,
            notices: Vec::new(),
            closed: false,
            rng: StdRng::seed_from_u64(seed),
            link,
        };
        session.regenerate();
        session
    }

    pub fn controls(&self) -> &Controls {
        &self.controls
    }

    pub fn canvas(&self) -> &CanvasContext {
        &self.canvas
    }

    pub fn overrides(&self) -> Overrides {
        self.overrides
    }

    pub fn selection(&self) -> SelectionState {
        self.selection
    }

    pub fn custom_shape(&self) -> Option<&Arc<CustomShape>> {
        self.custom_shape.as_ref()
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// Phase seed of the current samples.
    pub fn phase(&self) -> f32 {
        self.phase
    }

    /// Last rendered composition, absent once the session is closed.
    pub fn surface(&self) -> Option<&Composition> {
        self.surface.as_ref()
    }

    pub fn working_extent(&self) -> Vec2 {
        self.canvas.working_extent()
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn link(&self) -> &L {
        &self.link
    }

    pub fn link_mut(&mut self) -> &mut L {
        &mut self.link
    }

    /// Notices raised since the last call.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    /// Handles one host notification.
    ///
    /// Only ingestion failures are returned as errors. Every problem is also recorded
    /// as a [`Notice`].
    pub fn dispatch(&mut self, message: HostMessage) -> Result<()> {
        if self.closed {
            debug!("Ignoring host message on a closed session.");
            return Ok(());
        }
        match message {
            HostMessage::FrameSelected {
                width,
                height,
                background_color,
            } => {
                self.frame_selected(Vec2::new(width, height), background_color.as_deref());
                Ok(())
            }
            HostMessage::NoFrameSelected => {
                self.no_frame_selected();
                Ok(())
            }
            HostMessage::VectorSelected { svg, width, height } => {
                self.vector_selected(&svg, Vec2::new(width, height))
            }
            HostMessage::VectorSelectionError { message } => {
                if self.selection == SelectionState::AwaitingVectorSelection {
                    self.selection = SelectionState::Idle;
                }
                self.notify(NoticeKind::HostError, message);
                Ok(())
            }
        }
    }

    /// Parses a JSON envelope and dispatches it. Malformed envelopes leave state unchanged.
    pub fn handle_json(&mut self, text: &str) -> Result<()> {
        match HostMessage::from_json(text) {
            Ok(message) => self.dispatch(message),
            Err(e) => {
                warn!("Discarding host envelope: {}", e);
                self.notify(NoticeKind::Protocol, e.to_string());
                Err(e)
            }
        }
    }

    /// Dispatches every pending message on `inbound`. Returns how many were handled.
    pub fn pump(&mut self, inbound: &Receiver<HostMessage>) -> usize {
        let mut handled = 0;
        for message in inbound.try_iter() {
            // failures are already recorded as notices
            let _ = self.dispatch(message);
            handled += 1;
        }
        handled
    }

    /// Applies one user command.
    pub fn apply(&mut self, command: Command) -> Result<()> {
        if self.closed {
            return match command {
                Command::Export => self.export().map(|_| ()),
                _ => {
                    debug!("Ignoring command on a closed session.");
                    Ok(())
                }
            };
        }
        match command {
            Command::Set(change) => {
                let invalidation = self.controls.apply(change);
                self.refresh(invalidation);
            }
            Command::SetShapeColor(color) => {
                self.overrides.shape_color = true;
                self.controls.style.color = color;
                self.refresh(Invalidation::Rerender);
            }
            Command::ClearShapeColor => {
                self.overrides.shape_color = false;
                self.controls.style.color = self.canvas.background.complement();
                self.refresh(Invalidation::Rerender);
            }
            Command::SetBackground(color) => {
                self.overrides.background = true;
                self.set_background(color);
            }
            Command::ClearBackground => {
                self.overrides.background = false;
                self.set_background(self.host_background);
            }
            Command::RequestCustomShape => self.request_custom_shape()?,
            Command::PasteCustomShape(markup) => {
                let shape = self.ingest(&markup, Provenance::Pasted, None)?;
                self.custom_shape = Some(Arc::new(shape));
                self.controls.style.shape = ShapeKind::Custom;
                self.refresh(Invalidation::Rerender);
            }
            Command::ApplyPreset(preset) => {
                info!("Applying preset '{}'.", preset.name);
                let color = self.controls.style.color;
                self.controls = preset.controls.clamped();
                if self.overrides.shape_color {
                    self.controls.style.color = color;
                }
                self.refresh(Invalidation::Regenerate);
            }
            Command::Regenerate => self.refresh(Invalidation::Regenerate),
            Command::Reset => {
                self.controls.reset();
                self.refresh(Invalidation::Regenerate);
            }
            Command::Export => {
                self.export()?;
            }
            Command::Close => {
                self.closed = true;
                self.surface = None;
                self.link.post(PluginMessage::ClosePlugin)?;
            }
        }
        Ok(())
    }

    /// Reprojects the current surface onto the target canvas and sends it to the host.
    pub fn export(&mut self) -> Result<Export> {
        let result = match &self.surface {
            Some(surface) => {
                reproject(surface, self.canvas.target, self.controls.export_mode).map_err(Error::from)
            }
            None => Err(Error::Field(vector_field::error::Error::ExportUnavailable(
                "nothing has been rendered".into(),
            ))),
        };
        let export = match result {
            Ok(export) => export,
            Err(e) => {
                warn!("Export failed: {}", e);
                self.notify(NoticeKind::Export, e.to_string());
                return Err(e);
            }
        };

        self.link.post(PluginMessage::CreateSvg {
            svg: export.svg.clone(),
            width: export.size.x,
            height: export.size.y,
            background_color: self.canvas.background.to_hex(),
            scale_x: export.scale.map(|s| s.x),
            scale_y: export.scale.map(|s| s.y),
            is_custom_shape: export.has_custom_shapes,
        })?;
        info!(
            "Exported {}x{} canvas ({:?}).",
            export.size.x, export.size.y, self.controls.export_mode
        );
        Ok(export)
    }

    fn frame_selected(&mut self, target: Vec2, background: Option<&str>) {
        if !(target.x > 0.0 && target.y > 0.0 && target.is_finite()) {
            warn!("Ignoring frame with size {}x{}.", target.x, target.y);
            self.notify(
                NoticeKind::Protocol,
                format!("frame has no usable size ({}x{})", target.x, target.y),
            );
            return;
        }

        let mut invalidation = self.set_target(target);
        match background.map(Color::from_hex) {
            Some(Ok(color)) => {
                self.host_background = color;
                if !self.overrides.background {
                    self.canvas.background = color;
                }
                if !self.overrides.shape_color {
                    self.controls.style.color = self.canvas.background.complement();
                }
                invalidation = invalidation.max(Invalidation::Rerender);
            }
            Some(Err(e)) => {
                warn!("Ignoring frame background: {}", e);
                self.notify(NoticeKind::Protocol, e.to_string());
            }
            None => {}
        }
        debug!("Frame selected: {}x{}.", target.x, target.y);
        self.refresh(invalidation);
    }

    fn no_frame_selected(&mut self) {
        let invalidation = self.set_target(Vec2::splat(WORKING_SIZE));
        self.host_background = DEFAULT_BACKGROUND;
        if !self.overrides.background {
            self.canvas.background = DEFAULT_BACKGROUND;
        }
        if !self.overrides.shape_color {
            self.controls.style.color = Color::WHITE;
        }
        debug!("No frame selected.");
        self.refresh(invalidation.max(Invalidation::Rerender));
    }

    fn vector_selected(&mut self, markup: &str, extent: Vec2) -> Result<()> {
        let awaiting = self.selection == SelectionState::AwaitingVectorSelection;
        self.selection = SelectionState::Idle;
        let fallback = (extent.x > 0.0 && extent.y > 0.0).then_some(extent);
        let shape = self.ingest(markup, Provenance::Drawn, fallback)?;
        self.custom_shape = Some(Arc::new(shape));
        if awaiting {
            self.controls.style.shape = ShapeKind::Custom;
        }
        self.refresh(Invalidation::Rerender);
        Ok(())
    }

    fn request_custom_shape(&mut self) -> Result<()> {
        if self.selection == SelectionState::AwaitingVectorSelection {
            debug!("Custom shape request already pending.");
            return Ok(());
        }
        self.link.post(PluginMessage::RequestVectorSelection)?;
        self.selection = SelectionState::AwaitingVectorSelection;
        Ok(())
    }

    fn ingest(
        &mut self,
        markup: &str,
        provenance: Provenance,
        fallback: Option<Vec2>,
    ) -> Result<CustomShape> {
        match ingest(markup, provenance, fallback) {
            Ok(shape) => {
                info!(
                    "Ingested {:?} custom shape with {} elements.",
                    provenance,
                    shape.elements.len()
                );
                Ok(shape)
            }
            Err(e) => {
                warn!("Keeping previous custom shape: {}", e);
                self.notify(NoticeKind::Ingestion, e.to_string());
                Err(e.into())
            }
        }
    }

    fn set_target(&mut self, target: Vec2) -> Invalidation {
        let before = self.canvas.working_extent();
        self.canvas.target = target;
        if self.canvas.working_extent() != before {
            Invalidation::Regenerate
        } else {
            Invalidation::None
        }
    }

    fn set_background(&mut self, color: Color) {
        self.canvas.background = color;
        if !self.overrides.shape_color {
            self.controls.style.color = color.complement();
        }
        self.refresh(Invalidation::Rerender);
    }

    fn refresh(&mut self, invalidation: Invalidation) {
        self.canvas.policy = self.controls.canvas_policy;
        match invalidation {
            Invalidation::None => {}
            Invalidation::Rerender => self.rerender(),
            Invalidation::Regenerate => self.regenerate(),
        }
    }

    fn regenerate(&mut self) {
        self.canvas.policy = self.controls.canvas_policy;
        let working = self.canvas.working_extent();
        let sampler = FieldSampler::new(self.controls.grid, self.controls.field.clone());
        self.phase = draw_seed(&mut self.rng);

        let mut sink = VecSink::new();
        self.samples = sampler.generate_with_events(working.into(), self.phase, &mut sink);
        for event in sink.into_inner() {
            if let FieldEvent::Warning { message, .. } = event {
                self.notify(NoticeKind::Generation, message);
            }
        }
        self.rerender();
    }

    fn rerender(&mut self) {
        let working = self.canvas.working_extent();
        self.surface = Some(render(
            &self.samples,
            &self.controls.style,
            self.controls.grid,
            working,
            self.custom_shape.as_ref(),
        ));
    }

    fn notify(&mut self, kind: NoticeKind, message: impl Into<String>) {
        self.notices.push(Notice {
            kind,
            message: message.into(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bus::HostBus;

    const TRIANGLE: &str =
        r##"<svg viewBox="0 0 10 10"><path d="M0 0 L10 5 L0 10 Z" fill="#000"/></svg>"##;

    fn session() -> Session<Vec<PluginMessage>> {
        Session::with_seed(Vec::new(), 7)
    }

    fn frame(width: f32, height: f32, background: Option<&str>) -> HostMessage {
        HostMessage::FrameSelected {
            width,
            height,
            background_color: background.map(str::to_owned),
        }
    }

    #[test]
    fn starts_rendered_with_defaults() {
        let s = session();
        assert_eq!(s.samples().len(), 400);
        assert_eq!(s.surface().map(Composition::len), Some(400));
        assert_eq!(s.working_extent(), Vec2::splat(600.0));
        assert_eq!(s.canvas().background, DEFAULT_BACKGROUND);
        assert!(s.link().is_empty());
    }

    #[test]
    fn same_seed_gives_same_samples() {
        assert_eq!(session().samples(), session().samples());
    }

    #[test]
    fn frame_selection_sets_target_and_suggests_colors() {
        let mut s = session();
        let phase = s.phase();
        s.dispatch(frame(1200.0, 600.0, Some("#202060"))).unwrap();
        assert_eq!(s.working_extent(), Vec2::new(600.0, 300.0));
        assert_ne!(s.phase(), phase);
        let background = Color::rgb(0x20, 0x20, 0x60);
        assert_eq!(s.canvas().background, background);
        assert_eq!(s.controls().style.color, background.complement());
    }

    #[test]
    fn same_frame_size_only_rerenders() {
        let mut s = session();
        s.dispatch(frame(900.0, 900.0, None)).unwrap();
        let phase = s.phase();
        s.dispatch(frame(300.0, 300.0, Some("#ffffff"))).unwrap();
        assert_eq!(s.phase(), phase);
    }

    #[test]
    fn manual_color_wins_until_cleared() {
        let mut s = session();
        let red = Color::rgb(255, 0, 0);
        s.apply(Command::SetShapeColor(red)).unwrap();
        s.dispatch(frame(100.0, 100.0, Some("#204060"))).unwrap();
        assert_eq!(s.controls().style.color, red);

        s.apply(Command::ClearShapeColor).unwrap();
        assert_eq!(
            s.controls().style.color,
            Color::rgb(0x20, 0x40, 0x60).complement()
        );
    }

    #[test]
    fn manual_background_wins_until_cleared() {
        let mut s = session();
        let paper = Color::rgb(0xf0, 0xf0, 0xe0);
        s.apply(Command::SetBackground(paper)).unwrap();
        s.dispatch(frame(100.0, 100.0, Some("#000000"))).unwrap();
        assert_eq!(s.canvas().background, paper);
        assert_eq!(s.controls().style.color, paper.complement());

        s.apply(Command::ClearBackground).unwrap();
        assert_eq!(s.canvas().background, Color::BLACK);
    }

    #[test]
    fn no_frame_restores_defaults() {
        let mut s = session();
        s.dispatch(frame(1200.0, 300.0, Some("#336699"))).unwrap();
        s.dispatch(HostMessage::NoFrameSelected).unwrap();
        assert_eq!(s.canvas().target, Vec2::splat(600.0));
        assert_eq!(s.canvas().background, DEFAULT_BACKGROUND);
        assert_eq!(s.controls().style.color, Color::WHITE);
    }

    #[test]
    fn unusable_frame_is_a_notice_and_changes_nothing() {
        let mut s = session();
        s.dispatch(frame(0.0, 100.0, Some("#000000"))).unwrap();
        assert_eq!(s.canvas().target, Vec2::splat(600.0));
        assert_eq!(s.canvas().background, DEFAULT_BACKGROUND);
        assert_eq!(s.take_notices()[0].kind, NoticeKind::Protocol);
    }

    #[test]
    fn custom_shape_request_is_gated_while_awaiting() {
        let mut s = session();
        s.apply(Command::RequestCustomShape).unwrap();
        s.apply(Command::RequestCustomShape).unwrap();
        assert_eq!(s.link(), &vec![PluginMessage::RequestVectorSelection]);
        assert_eq!(s.selection(), SelectionState::AwaitingVectorSelection);

        s.dispatch(HostMessage::VectorSelected {
            svg: TRIANGLE.into(),
            width: 10.0,
            height: 10.0,
        })
        .unwrap();
        assert_eq!(s.selection(), SelectionState::Idle);
        assert_eq!(s.controls().style.shape, ShapeKind::Custom);
        let shape = s.custom_shape().unwrap();
        assert_eq!(shape.provenance, Provenance::Drawn);
        assert!(s.surface().unwrap().has_custom_shapes());

        s.apply(Command::RequestCustomShape).unwrap();
        assert_eq!(s.link().len(), 2);
    }

    #[test]
    fn selection_error_clears_awaiting_and_notifies() {
        let mut s = session();
        s.apply(Command::RequestCustomShape).unwrap();
        s.dispatch(HostMessage::VectorSelectionError {
            message: "Select a vector".into(),
        })
        .unwrap();
        assert_eq!(s.selection(), SelectionState::Idle);
        assert_eq!(
            s.take_notices(),
            vec![Notice {
                kind: NoticeKind::HostError,
                message: "Select a vector".into(),
            }]
        );
    }

    #[test]
    fn failed_ingestion_keeps_previous_shape() {
        let mut s = session();
        s.apply(Command::PasteCustomShape(TRIANGLE.into())).unwrap();
        let before = s.custom_shape().cloned();

        let err = s.apply(Command::PasteCustomShape("<svg><g></svg>".into()));
        assert!(matches!(
            err,
            Err(Error::Field(vector_field::error::Error::MalformedMarkup(_)))
        ));
        assert_eq!(s.custom_shape().cloned(), before);
        assert_eq!(s.take_notices()[0].kind, NoticeKind::Ingestion);
    }

    #[test]
    fn truncated_markup_keeps_previous_shape() {
        let mut s = session();
        s.apply(Command::PasteCustomShape(TRIANGLE.into())).unwrap();
        let before = s.custom_shape().cloned();

        let err = s.apply(Command::PasteCustomShape(
            r#"<svg viewBox="0 0 10 10"><path d="M0 0 L1 1"/>"#.into(),
        ));
        assert!(matches!(
            err,
            Err(Error::Field(vector_field::error::Error::MalformedMarkup(_)))
        ));
        assert_eq!(s.custom_shape().cloned(), before);
        assert_eq!(s.controls().style.shape, ShapeKind::Custom);
    }

    #[test]
    fn export_flags_custom_shapes_only_when_placed() {
        let mut s = session();
        s.dispatch(frame(400.0, 400.0, None)).unwrap();
        s.apply(Command::Set(ControlChange::Shape(ShapeKind::Custom)))
            .unwrap();
        s.export().unwrap();
        let Some(PluginMessage::CreateSvg { is_custom_shape, .. }) = s.link().last().cloned()
        else {
            panic!("expected create-svg");
        };
        assert!(!is_custom_shape);

        s.apply(Command::PasteCustomShape(TRIANGLE.into())).unwrap();
        s.export().unwrap();
        let Some(PluginMessage::CreateSvg { is_custom_shape, .. }) = s.link().last().cloned()
        else {
            panic!("expected create-svg");
        };
        assert!(is_custom_shape);
    }

    #[test]
    fn pasted_shapes_keep_their_colors() {
        let mut s = session();
        s.apply(Command::PasteCustomShape(TRIANGLE.into())).unwrap();
        let shape = s.custom_shape().unwrap();
        assert_eq!(shape.provenance, Provenance::Pasted);
        assert!(!shape.recolors());
        assert_eq!(s.controls().style.shape, ShapeKind::Custom);
    }

    #[test]
    fn style_changes_keep_samples_field_changes_do_not() {
        let mut s = session();
        let samples = s.samples().to_vec();
        s.apply(Command::Set(ControlChange::Shape(ShapeKind::Arrow)))
            .unwrap();
        s.apply(Command::Set(ControlChange::Gradient(GradientMode::Radial)))
            .unwrap();
        assert_eq!(s.samples(), samples.as_slice());

        s.apply(Command::Set(ControlChange::Rows(5))).unwrap();
        assert_eq!(s.samples().len(), 100);
    }

    #[test]
    fn unknown_field_kind_raises_generation_notice() {
        let mut s = session();
        s.apply(Command::Set(ControlChange::FieldKind(FieldKind::from(
            "gravity",
        ))))
        .unwrap();
        assert_eq!(s.samples().len(), 400);
        let notices = s.take_notices();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].kind, NoticeKind::Generation);
    }

    #[test]
    fn viewport_export_posts_create_svg_without_scale() {
        let mut s = session();
        s.dispatch(frame(1200.0, 600.0, Some("#101010"))).unwrap();
        let export = s.export().unwrap();
        assert_eq!(export.size, Vec2::new(1200.0, 600.0));
        let Some(PluginMessage::CreateSvg {
            width,
            height,
            background_color,
            scale_x,
            scale_y,
            is_custom_shape,
            svg,
        }) = s.link().last().cloned()
        else {
            panic!("expected create-svg");
        };
        assert_eq!((width, height), (1200.0, 600.0));
        assert_eq!(background_color, "#101010");
        assert_eq!((scale_x, scale_y), (None, None));
        assert!(!is_custom_shape);
        assert!(svg.contains(r#"viewBox="0 0 600 300""#));
    }

    #[test]
    fn rewrite_export_carries_scale_factors() {
        let mut s = session();
        s.apply(Command::Set(ControlChange::FillParent(false)))
            .unwrap();
        s.apply(Command::Set(ControlChange::ExportMode(
            ExportMode::RewriteCoordinates,
        )))
        .unwrap();
        s.dispatch(frame(300.0, 600.0, None)).unwrap();
        assert_eq!(s.working_extent(), Vec2::splat(600.0));

        s.apply(Command::Export).unwrap();
        let Some(PluginMessage::CreateSvg {
            scale_x, scale_y, ..
        }) = s.link().last()
        else {
            panic!("expected create-svg");
        };
        assert_eq!((*scale_x, *scale_y), (Some(0.5), Some(1.0)));
    }

    #[test]
    fn close_posts_and_disables_export() {
        let mut s = session();
        s.apply(Command::Close).unwrap();
        assert!(s.is_closed());
        assert_eq!(s.link().last(), Some(&PluginMessage::ClosePlugin));
        assert!(matches!(
            s.apply(Command::Export),
            Err(Error::Field(vector_field::error::Error::ExportUnavailable(
                _
            )))
        ));
        assert_eq!(s.take_notices()[0].kind, NoticeKind::Export);
    }

    #[test]
    fn reset_restores_controls_but_keeps_manual_color() {
        let mut s = session();
        let teal = Color::rgb(0, 128, 128);
        s.apply(Command::SetShapeColor(teal)).unwrap();
        s.apply(Command::Set(ControlChange::Rows(3))).unwrap();
        s.apply(Command::Reset).unwrap();
        assert_eq!(s.controls().grid.rows, 20);
        assert_eq!(s.controls().style.color, teal);
        assert!(s.overrides().shape_color);
    }

    #[test]
    fn presets_replace_controls() {
        let mut s = session();
        let preset = Preset::from_ron(
            r#"(name: "sparse", controls: (grid: (rows: 4, columns: 6), style: (shape: dot)))"#,
        )
        .unwrap();
        s.apply(Command::ApplyPreset(preset)).unwrap();
        assert_eq!(s.samples().len(), 24);
        assert_eq!(s.controls().style.shape, ShapeKind::Dot);
    }

    #[test]
    fn malformed_json_leaves_state_unchanged() {
        let mut s = session();
        let target = s.canvas().target;
        assert!(s.handle_json(r#"{"type":"frame-selected","width":"wide"}"#).is_err());
        assert_eq!(s.canvas().target, target);
        assert_eq!(s.take_notices()[0].kind, NoticeKind::Protocol);

        s.handle_json(r#"{"type":"frame-selected","width":200,"height":100}"#)
            .unwrap();
        assert_eq!(s.canvas().target, Vec2::new(200.0, 100.0));
    }

    #[test]
    fn pump_drains_the_bus() {
        let bus = HostBus::new();
        let mut s = Session::with_seed(bus.link(), 1);
        let host = bus.host_sender();
        host.send(frame(800.0, 400.0, None)).unwrap();
        host.send(HostMessage::NoFrameSelected).unwrap();
        assert_eq!(s.pump(&bus.inbound_rx), 2);
        assert_eq!(s.canvas().target, Vec2::splat(600.0));

        s.apply(Command::RequestCustomShape).unwrap();
        assert_eq!(
            bus.drain_outbound(),
            vec![PluginMessage::RequestVectorSelection]
        );
    }
}
