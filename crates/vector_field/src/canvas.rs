//! Working and target canvases.
use glam::Vec2;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::color::Color;

/// Longest side of the working canvas.
pub const WORKING_SIZE: f32 = 600.0;

/// Background assumed when the host reports none.
pub const DEFAULT_BACKGROUND: Color = Color::rgb(0x1e, 0x1e, 0x1e);

/// How the working canvas follows the target canvas.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CanvasPolicy {
    /// Keep the target's aspect ratio, longest side [`WORKING_SIZE`].
    #[default]
    Fill,
    /// Square working canvas of side [`WORKING_SIZE`].
    Square,
}

/// Canvas sizes and background of a session.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CanvasContext {
    /// Host-supplied real size.
    pub target: Vec2,
    pub background: Color,
    pub policy: CanvasPolicy,
}

impl Default for CanvasContext {
    fn default() -> Self {
        Self {
            target: Vec2::splat(WORKING_SIZE),
            background: DEFAULT_BACKGROUND,
            policy: CanvasPolicy::Fill,
        }
    }
}

impl CanvasContext {
    pub fn new(target: Vec2) -> Self {
        Self {
            target,
            ..Default::default()
        }
    }

    pub fn with_policy(mut self, policy: CanvasPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_background(mut self, background: Color) -> Self {
        self.background = background;
        self
    }

    /// Authoring size used for sampling and rendering.
    pub fn working_extent(&self) -> Vec2 {
        working_extent(self.target, self.policy)
    }
}

/// Working canvas for a `target` canvas under `policy`.
pub fn working_extent(target: Vec2, policy: CanvasPolicy) -> Vec2 {
    match policy {
        CanvasPolicy::Square => Vec2::splat(WORKING_SIZE),
        CanvasPolicy::Fill => {
            if !(target.x > 0.0 && target.y > 0.0 && target.is_finite()) {
                return Vec2::splat(WORKING_SIZE);
            }
            let aspect = target.x / target.y;
            if aspect > 1.0 {
                Vec2::new(WORKING_SIZE, WORKING_SIZE / aspect)
            } else {
                Vec2::new(WORKING_SIZE * aspect, WORKING_SIZE)
            }
        }
    }
}
