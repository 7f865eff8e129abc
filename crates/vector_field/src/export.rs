//! Reprojection of a working-canvas composition onto the host's target canvas.
//!
//! [`ExportMode::Viewport`] declares the target size and lets the working-canvas
//! view-box do the scaling. [`ExportMode::RewriteCoordinates`] instead rewrites the
//! numeric coordinates of every primitive by the per-axis scale factors and views the
//! result in target units. Embedded custom artwork is never rewritten: only its anchor
//! moves, its size and contents stay intact.
use glam::Vec2;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::marks::svg::{fmt_num, write_document, Composition};
use crate::marks::{CustomPlacement, Mark};

/// How a composition is mapped onto the target canvas.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ExportMode {
    #[default]
    Viewport,
    RewriteCoordinates,
}

/// Markup ready to hand to the host.
#[derive(Clone, Debug, PartialEq)]
pub struct Export {
    pub svg: String,
    /// Declared size, equal to the target canvas.
    pub size: Vec2,
    /// Per-axis factors applied to primitive coordinates, in rewrite mode only.
    pub scale: Option<Vec2>,
    /// Whether the markup embeds custom artwork.
    pub has_custom_shapes: bool,
}

/// Maps `composition` onto a `target` sized canvas.
pub fn reproject(composition: &Composition, target: Vec2, mode: ExportMode) -> Result<Export> {
    let working = composition.extent;
    if !(working.x > 0.0 && working.y > 0.0) {
        return Err(Error::ExportUnavailable(format!(
            "working canvas has no area ({}x{})",
            working.x, working.y
        )));
    }
    if !(target.x > 0.0 && target.y > 0.0 && target.is_finite()) {
        return Err(Error::InvalidConfig(format!(
            "target canvas must be positive, got {}x{}",
            target.x, target.y
        )));
    }

    let mut svg = String::new();
    let scale = match mode {
        ExportMode::Viewport => {
            write_document(&mut svg, target, working, &composition.marks);
            None
        }
        ExportMode::RewriteCoordinates => {
            let scale = scale_factors(working, target);
            let marks: Vec<Mark> = composition
                .marks
                .iter()
                .map(|m| rescale_mark(m, scale))
                .collect();
            write_document(&mut svg, target, target, &marks);
            Some(scale)
        }
    };

    debug!(
        "Exported {} marks from {}x{} to {}x{} ({:?}).",
        composition.len(),
        working.x,
        working.y,
        target.x,
        target.y,
        mode
    );
    Ok(Export {
        svg,
        size: target,
        scale,
        has_custom_shapes: composition.has_custom_shapes(),
    })
}

/// Independent per-axis factors taking `working` coordinates to `target` coordinates.
pub fn scale_factors(working: Vec2, target: Vec2) -> Vec2 {
    target / working
}

/// Copy of `mark` with its coordinates scaled by `scale`.
///
/// Circles keep their radius. Custom artwork only has its anchor moved.
pub fn rescale_mark(mark: &Mark, scale: Vec2) -> Mark {
    match mark {
        Mark::Line {
            from,
            to,
            stroke,
            width,
        } => Mark::Line {
            from: *from * scale,
            to: *to * scale,
            stroke: *stroke,
            width: *width,
        },
        Mark::Circle {
            center,
            radius,
            fill,
        } => Mark::Circle {
            center: *center * scale,
            radius: *radius,
            fill: *fill,
        },
        Mark::Path { data, fill } => Mark::Path {
            data: rescale_path_data(data, scale),
            fill: *fill,
        },
        Mark::Group(children) => {
            Mark::Group(children.iter().map(|c| rescale_mark(c, scale)).collect())
        }
        Mark::Custom(placement) => Mark::Custom(CustomPlacement {
            anchor: placement.anchor * scale,
            ..placement.clone()
        }),
    }
}

/// Scales numeric tokens of path data, alternating x and y by token position.
///
/// Exact only for absolute commands whose arguments are coordinate pairs.
pub fn rescale_path_data(data: &str, scale: Vec2) -> String {
    let mut out = String::with_capacity(data.len());
    let mut index = 0usize;
    for token in PathTokens::new(data) {
        if !out.is_empty() {
            out.push(' ');
        }
        match token {
            PathToken::Command(c) => out.push(c),
            PathToken::Number(n) => {
                let factor = if index % 2 == 0 { scale.x } else { scale.y };
                out.push_str(&fmt_num(n * factor));
                index += 1;
            }
        }
    }
    out
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum PathToken {
    Command(char),
    Number(f32),
}

/// Lexer over SVG path data.
struct PathTokens<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> PathTokens<'a> {
    fn new(src: &'a str) -> Self {
        Self { src, pos: 0 }
    }

    fn number_end(&self, start: usize) -> usize {
        let bytes = self.src.as_bytes();
        let mut i = start;
        if i < bytes.len() && (bytes[i] == b'-' || bytes[i] == b'+') {
            i += 1;
        }
        let mut seen_dot = false;
        while i < bytes.len() {
            match bytes[i] {
                b'0'..=b'9' => i += 1,
                b'.' if !seen_dot => {
                    seen_dot = true;
                    i += 1;
                }
                b'e' | b'E' => {
                    let mut j = i + 1;
                    if j < bytes.len() && (bytes[j] == b'-' || bytes[j] == b'+') {
                        j += 1;
                    }
                    if j < bytes.len() && bytes[j].is_ascii_digit() {
                        i = j;
                        while i < bytes.len() && bytes[i].is_ascii_digit() {
                            i += 1;
                        }
                    }
                    break;
                }
                _ => break,
            }
        }
        i
    }
}

impl Iterator for PathTokens<'_> {
    type Item = PathToken;

    fn next(&mut self) -> Option<PathToken> {
        let bytes = self.src.as_bytes();
        while self.pos < bytes.len() {
            let b = bytes[self.pos];
            if b.is_ascii_whitespace() || b == b',' {
                self.pos += 1;
                continue;
            }
            if b.is_ascii_alphabetic() {
                self.pos += 1;
                return Some(PathToken::Command(b as char));
            }
            let end = self.number_end(self.pos);
            if end == self.pos {
                // stray byte, skip it
                self.pos += 1;
                continue;
            }
            let text = &self.src[self.pos..end];
            self.pos = end;
            if let Ok(n) = text.parse() {
                return Some(PathToken::Number(n));
            }
        }
        None
    }
}
