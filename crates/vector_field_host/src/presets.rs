//! Named control snapshots stored as RON.
//!
//! ```ron
//! (
//!     name: "vortex dots",
//!     controls: (
//!         grid: (rows: 30, columns: 30),
//!         field: (kind: "vortex", spiral_enabled: false),
//!         style: (shape: dot, color: "#ffcc00"),
//!     ),
//! )
//! ```
//!
//! Omitted fields take their defaults; out-of-range values are clamped on load.
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::controls::Controls;
use crate::error::{Error, Result};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Preset {
    pub name: String,
    #[serde(default)]
    pub controls: Controls,
}

impl Preset {
    pub fn new(name: impl Into<String>, controls: Controls) -> Self {
        Self {
            name: name.into(),
            controls,
        }
    }

    pub fn from_ron(text: &str) -> Result<Self> {
        let mut preset: Preset =
            ron::from_str(text).map_err(|e| Error::Preset(e.to_string()))?;
        preset.controls = preset.controls.clamped();
        Ok(preset)
    }

    pub fn to_ron(&self) -> Result<String> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .map_err(|e| Error::Preset(e.to_string()))
    }

    /// Reads a preset file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())
            .map_err(|e| Error::Field(vector_field::error::Error::Io(e)))?;
        Self::from_ron(&text)
    }
}
