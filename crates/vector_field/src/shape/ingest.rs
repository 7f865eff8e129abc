//! Parsing of SVG markup into a [`CustomShape`].
use std::fmt::Write as _;

use glam::Vec2;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use tracing::debug;

use crate::error::{Error, Result};
use crate::marks::svg::fmt_num;
use crate::shape::{CustomShape, Drawable, Paint, Provenance};

/// View-box used when the markup and the caller supply no usable extent.
pub const DEFAULT_VIEW_BOX: Vec2 = Vec2::new(100.0, 100.0);

/// Containers whose content is never drawn directly.
const NON_RENDERED: [&[u8]; 12] = [
    b"defs",
    b"clipPath",
    b"mask",
    b"symbol",
    b"pattern",
    b"marker",
    b"linearGradient",
    b"radialGradient",
    b"style",
    b"title",
    b"desc",
    b"metadata",
];

/// Parses `markup` into a [`CustomShape`] tagged with `provenance`.
///
/// The view-box comes from the `viewBox` attribute, then the root `width`/`height`,
/// then `fallback_extent`, then [`DEFAULT_VIEW_BOX`]. Fails with
/// [`Error::MalformedMarkup`] when the text is not well-formed XML, ends with open
/// elements, continues after the root `<svg>` closes, has no `<svg>` root, or
/// contains no path-like element.
pub fn ingest(
    markup: &str,
    provenance: Provenance,
    fallback_extent: Option<Vec2>,
) -> Result<CustomShape> {
    let mut reader = Reader::from_str(markup);
    reader.config_mut().trim_text(true);

    let mut collector = Collector::default();
    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => collector.open(&e, false)?,
            Ok(Event::Empty(e)) => collector.open(&e, true)?,
            Ok(Event::End(_)) => collector.close(),
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => {
                return Err(Error::MalformedMarkup(format!(
                    "at byte {}: {e}",
                    reader.buffer_position()
                )))
            }
        }
    }
    if collector.depth > 0 {
        return Err(Error::MalformedMarkup(format!(
            "{} unclosed element(s) at end of input",
            collector.depth
        )));
    }

    let Some(root) = collector.root else {
        return Err(Error::MalformedMarkup("no <svg> root element".into()));
    };
    if collector.elements.is_empty() {
        return Err(Error::MalformedMarkup("no drawable elements".into()));
    }

    let view_box = [root.view_box, root.size, fallback_extent]
        .into_iter()
        .flatten()
        .find(|v| v.x > 0.0 && v.y > 0.0 && v.is_finite())
        .unwrap_or(DEFAULT_VIEW_BOX);

    debug!(
        "Ingested custom shape with {} elements, view-box {}x{}.",
        collector.elements.len(),
        view_box.x,
        view_box.y
    );
    Ok(CustomShape {
        view_box,
        elements: collector.elements,
        provenance,
    })
}

#[derive(Default)]
struct RootInfo {
    view_box: Option<Vec2>,
    size: Option<Vec2>,
}

/// Paint state inherited from enclosing groups.
#[derive(Clone)]
struct Inherited {
    fill: Paint,
    stroke: Paint,
    stroke_width: Option<f32>,
}

impl Default for Inherited {
    fn default() -> Self {
        Self {
            fill: Paint::Color("#000000".into()),
            stroke: Paint::None,
            stroke_width: None,
        }
    }
}

#[derive(Default)]
struct Collector {
    root: Option<RootInfo>,
    styles: Vec<Inherited>,
    skip_depth: usize,
    /// Elements opened but not yet closed, root included.
    depth: usize,
    root_closed: bool,
    elements: Vec<Drawable>,
}

impl Collector {
    fn open(&mut self, e: &BytesStart<'_>, self_closing: bool) -> Result<()> {
        let local = e.local_name();
        let name = local.as_ref();
        if self.root_closed {
            return Err(Error::MalformedMarkup(format!(
                "<{}> after the root <svg> closed",
                String::from_utf8_lossy(name)
            )));
        }
        let attrs = Attributes::read(e)?;
        if !self_closing {
            self.depth += 1;
        }

        if self.root.is_none() {
            if name != b"svg" {
                return Err(Error::MalformedMarkup(format!(
                    "root element is <{}>, expected <svg>",
                    String::from_utf8_lossy(name)
                )));
            }
            self.root = Some(RootInfo {
                view_box: attrs.get("viewBox").and_then(parse_view_box),
                size: match (
                    attrs.get("width").and_then(parse_length),
                    attrs.get("height").and_then(parse_length),
                ) {
                    (Some(w), Some(h)) => Some(Vec2::new(w, h)),
                    _ => None,
                },
            });
            if self_closing {
                self.root_closed = true;
            } else {
                self.styles.push(attrs.inherit(&Inherited::default()));
            }
            return Ok(());
        }

        if self.skip_depth > 0 {
            if !self_closing {
                self.skip_depth += 1;
            }
            return Ok(());
        }
        if NON_RENDERED.contains(&name) {
            if !self_closing {
                self.skip_depth = 1;
            }
            return Ok(());
        }

        let style = attrs.inherit(self.styles.last().unwrap_or(&Inherited::default()));
        if let Some(data) = path_data(name, &attrs) {
            self.elements.push(Drawable {
                data,
                fill: style.fill.clone(),
                stroke: style.stroke.clone(),
                stroke_width: style.stroke_width,
            });
        }
        if !self_closing {
            self.styles.push(style);
        }
        Ok(())
    }

    fn close(&mut self) {
        self.depth = self.depth.saturating_sub(1);
        if self.depth == 0 {
            self.root_closed = true;
        }
        if self.skip_depth > 0 {
            self.skip_depth -= 1;
        } else {
            self.styles.pop();
        }
    }
}

/// Attributes of one element, with `style="k:v"` declarations folded in.
struct Attributes(Vec<(String, String)>);

impl Attributes {
    fn read(e: &BytesStart<'_>) -> Result<Self> {
        let mut pairs = Vec::new();
        for attr in e.attributes() {
            let attr = attr.map_err(|err| Error::MalformedMarkup(err.to_string()))?;
            let key = String::from_utf8_lossy(attr.key.local_name().as_ref()).into_owned();
            let value = attr
                .unescape_value()
                .map_err(|err| Error::MalformedMarkup(err.to_string()))?
                .into_owned();
            if key == "style" {
                for declaration in value.split(';') {
                    if let Some((k, v)) = declaration.split_once(':') {
                        pairs.push((k.trim().to_owned(), v.trim().to_owned()));
                    }
                }
            } else {
                pairs.push((key, value));
            }
        }
        Ok(Self(pairs))
    }

    /// Last value for `key`, so style declarations override presentation attributes.
    fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    fn number(&self, key: &str) -> f32 {
        self.get(key).and_then(parse_length).unwrap_or(0.0)
    }

    fn inherit(&self, parent: &Inherited) -> Inherited {
        Inherited {
            fill: self.get("fill").map(Paint::parse).unwrap_or_else(|| parent.fill.clone()),
            stroke: self
                .get("stroke")
                .map(Paint::parse)
                .unwrap_or_else(|| parent.stroke.clone()),
            stroke_width: self
                .get("stroke-width")
                .and_then(parse_length)
                .or(parent.stroke_width),
        }
    }
}

/// Path commands equivalent to a path-like element, if `name` is one.
fn path_data(name: &[u8], attrs: &Attributes) -> Option<String> {
    let mut d = String::new();
    match name {
        b"path" => {
            let data = attrs.get("d")?.trim();
            if data.is_empty() {
                return None;
            }
            d.push_str(data);
        }
        b"rect" => {
            let (x, y) = (attrs.number("x"), attrs.number("y"));
            let (w, h) = (attrs.number("width"), attrs.number("height"));
            if w <= 0.0 || h <= 0.0 {
                return None;
            }
            let _ = write!(
                d,
                "M {} {} H {} V {} H {} Z",
                fmt_num(x),
                fmt_num(y),
                fmt_num(x + w),
                fmt_num(y + h),
                fmt_num(x)
            );
        }
        b"circle" | b"ellipse" => {
            let (cx, cy) = (attrs.number("cx"), attrs.number("cy"));
            let (rx, ry) = if name == b"circle" {
                let r = attrs.number("r");
                (r, r)
            } else {
                (attrs.number("rx"), attrs.number("ry"))
            };
            if rx <= 0.0 || ry <= 0.0 {
                return None;
            }
            let (rx_s, ry_s) = (fmt_num(rx), fmt_num(ry));
            let _ = write!(
                d,
                "M {} {} A {rx_s} {ry_s} 0 1 0 {} {} A {rx_s} {ry_s} 0 1 0 {} {} Z",
                fmt_num(cx - rx),
                fmt_num(cy),
                fmt_num(cx + rx),
                fmt_num(cy),
                fmt_num(cx - rx),
                fmt_num(cy),
            );
        }
        b"line" => {
            let _ = write!(
                d,
                "M {} {} L {} {}",
                fmt_num(attrs.number("x1")),
                fmt_num(attrs.number("y1")),
                fmt_num(attrs.number("x2")),
                fmt_num(attrs.number("y2")),
            );
        }
        b"polyline" | b"polygon" => {
            let coords: Vec<f32> = attrs
                .get("points")?
                .split(|c: char| c == ',' || c.is_whitespace())
                .filter(|t| !t.is_empty())
                .map_while(|t| t.parse().ok())
                .collect();
            if coords.len() < 4 {
                return None;
            }
            for (i, pair) in coords.chunks_exact(2).enumerate() {
                let cmd = if i == 0 { "M" } else { " L" };
                let _ = write!(d, "{cmd} {} {}", fmt_num(pair[0]), fmt_num(pair[1]));
            }
            if name == b"polygon" {
                d.push_str(" Z");
            }
        }
        _ => return None,
    }
    Some(d)
}

fn parse_length(value: &str) -> Option<f32> {
    let value = value.trim();
    let value = value.strip_suffix("px").unwrap_or(value);
    value.trim().parse().ok()
}

fn parse_view_box(value: &str) -> Option<Vec2> {
    let parts: Vec<f32> = value
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|t| !t.is_empty())
        .map(str::parse::<f32>)
        .collect::<std::result::Result<Vec<_>, _>>()
        .ok()?;
    match parts.as_slice() {
        [_, _, w, h] => Some(Vec2::new(*w, *h)),
        _ => None,
    }
}
