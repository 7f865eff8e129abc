//! [`Composition`] and SVG serialisation of marks.
use std::fmt::Write as _;

use glam::Vec2;

use crate::marks::{CustomPlacement, Mark};

/// Rendered marks authored on a working canvas.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Composition {
    /// Working canvas width and height.
    pub extent: Vec2,
    pub marks: Vec<Mark>,
}

impl Composition {
    pub fn new(extent: Vec2, marks: Vec<Mark>) -> Self {
        Self { extent, marks }
    }

    pub fn len(&self) -> usize {
        self.marks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.marks.is_empty()
    }

    /// Whether any mark embeds custom artwork.
    pub fn has_custom_shapes(&self) -> bool {
        self.marks.iter().any(Mark::is_custom)
    }

    /// Standalone SVG document at the working canvas size.
    pub fn to_svg(&self) -> String {
        let mut out = String::new();
        write_document(&mut out, self.extent, self.extent, &self.marks);
        out
    }
}

/// Writes an `<svg>` document declaring `size` and viewing `view_box` from the origin.
pub fn write_document(out: &mut String, size: Vec2, view_box: Vec2, marks: &[Mark]) {
    let _ = write!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 {} {}">"#,
        fmt_num(size.x),
        fmt_num(size.y),
        fmt_num(view_box.x),
        fmt_num(view_box.y),
    );
    for mark in marks {
        write_mark(out, mark);
    }
    out.push_str("</svg>");
}

/// Appends the SVG markup of `mark` to `out`.
pub fn write_mark(out: &mut String, mark: &Mark) {
    match mark {
        Mark::Line {
            from,
            to,
            stroke,
            width,
        } => {
            let _ = write!(
                out,
                r#"<line x1="{}" y1="{}" x2="{}" y2="{}" stroke="{}" stroke-width="{}"/>"#,
                fmt_num(from.x),
                fmt_num(from.y),
                fmt_num(to.x),
                fmt_num(to.y),
                stroke.to_hex_rgba(),
                fmt_num(*width),
            );
        }
        Mark::Circle {
            center,
            radius,
            fill,
        } => {
            let _ = write!(
                out,
                r#"<circle cx="{}" cy="{}" r="{}" fill="{}"/>"#,
                fmt_num(center.x),
                fmt_num(center.y),
                fmt_num(*radius),
                fill.to_hex_rgba(),
            );
        }
        Mark::Path { data, fill } => {
            let _ = write!(
                out,
                r#"<path d="{}" fill="{}"/>"#,
                escape_attr(data),
                fill.to_hex_rgba()
            );
        }
        Mark::Group(children) => {
            out.push_str("<g>");
            for child in children {
                write_mark(out, child);
            }
            out.push_str("</g>");
        }
        Mark::Custom(placement) => write_custom(out, placement),
    }
}

/// Custom artwork is nested as an inner `<svg>` so its own view-box does the scaling.
fn write_custom(out: &mut String, placement: &CustomPlacement) {
    let CustomPlacement {
        anchor,
        rotation_degrees,
        size,
        shape,
        tint,
    } = placement;
    let _ = write!(
        out,
        r#"<g transform="translate({} {}) rotate({})"><svg x="{}" y="{}" width="{}" height="{}" viewBox="0 0 {} {}" overflow="visible">"#,
        fmt_num(anchor.x),
        fmt_num(anchor.y),
        fmt_num(*rotation_degrees),
        fmt_num(-size.x / 2.0),
        fmt_num(-size.y / 2.0),
        fmt_num(size.x),
        fmt_num(size.y),
        fmt_num(shape.view_box.x),
        fmt_num(shape.view_box.y),
    );
    shape.write_body(out, *tint);
    out.push_str("</svg></g>");
}

/// Formats a coordinate with at most three decimals and no trailing zeros.
pub fn fmt_num(value: f32) -> String {
    if !value.is_finite() {
        return "0".to_owned();
    }
    let mut s = format!("{value:.3}");
    if s.contains('.') {
        let trimmed = s.trim_end_matches('0').trim_end_matches('.').len();
        s.truncate(trimmed);
    }
    if s == "-0" {
        s.remove(0);
    }
    s
}

/// Escapes a value for use inside a double-quoted attribute.
pub fn escape_attr(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::color::Color;
    use crate::shape::{CustomShape, Drawable, Paint, Provenance};

    #[test]
    fn fmt_num_trims_and_rounds() {
        assert_eq!(fmt_num(1.0), "1");
        assert_eq!(fmt_num(0.5), "0.5");
        assert_eq!(fmt_num(1.23456), "1.235");
        assert_eq!(fmt_num(-0.0001), "0");
        assert_eq!(fmt_num(-12.5), "-12.5");
        assert_eq!(fmt_num(f32::NAN), "0");
    }

    #[test]
    fn escape_attr_handles_quotes() {
        assert_eq!(escape_attr(r#"a"b<c"#), "a&quot;b&lt;c");
    }

    #[test]
    fn writes_primitives() {
        let c = Color::rgb(255, 0, 0);
        let comp = Composition::new(
            Vec2::new(100.0, 50.0),
            vec![
                Mark::Line {
                    from: Vec2::ZERO,
                    to: Vec2::new(10.0, 5.0),
                    stroke: c,
                    width: 1.5,
                },
                Mark::Group(vec![Mark::Circle {
                    center: Vec2::new(3.0, 4.0),
                    radius: 2.0,
                    fill: c.with_alpha(0),
                }]),
            ],
        );
        let svg = comp.to_svg();
        assert!(svg.starts_with(r#"<svg xmlns="http://www.w3.org/2000/svg" width="100" height="50" viewBox="0 0 100 50">"#));
        assert!(svg.contains(r##"<line x1="0" y1="0" x2="10" y2="5" stroke="#ff0000ff" stroke-width="1.5"/>"##));
        assert!(svg.contains(r##"<g><circle cx="3" cy="4" r="2" fill="#ff000000"/></g>"##));
        assert!(svg.ends_with("</svg>"));
        assert!(!comp.has_custom_shapes());
    }

    #[test]
    fn custom_marks_nest_their_own_view_box() {
        let shape = Arc::new(CustomShape {
            view_box: Vec2::new(100.0, 50.0),
            elements: vec![Drawable {
                data: "M0 0 L1 1".into(),
                fill: Paint::Color("#123456".into()),
                stroke: Paint::None,
                stroke_width: None,
            }],
            provenance: Provenance::Pasted,
        });
        let mark = Mark::Custom(CustomPlacement {
            anchor: Vec2::new(50.0, 60.0),
            rotation_degrees: 90.0,
            size: Vec2::new(20.0, 10.0),
            shape,
            tint: None,
        });
        let mut out = String::new();
        write_mark(&mut out, &mark);
        assert!(out.starts_with(r#"<g transform="translate(50 60) rotate(90)"><svg x="-10" y="-5" width="20" height="10" viewBox="0 0 100 50""#));
        assert!(out.contains(r##"fill="#123456""##));
        assert!(Mark::Group(vec![mark]).is_custom());
    }
}
