//! JSON envelopes exchanged with the host application.
//!
//! Every envelope is an object tagged by `type` (kebab-case) with camelCase fields:
//!
//! ```json
//! {"type":"frame-selected","width":1200,"height":600,"backgroundColor":"#202020"}
//! {"type":"create-svg","svg":"<svg ...>","width":1200,"height":600,
//!  "backgroundColor":"#202020","isCustomShape":false}
//! ```
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Notifications sent by the host.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum HostMessage {
    /// A frame is selected; its size becomes the target canvas.
    #[serde(rename_all = "camelCase")]
    FrameSelected {
        width: f32,
        height: f32,
        #[serde(default)]
        background_color: Option<String>,
    },
    /// Selection cleared.
    NoFrameSelected,
    /// Response to a custom shape request, or an unsolicited selection change.
    VectorSelected { svg: String, width: f32, height: f32 },
    VectorSelectionError { message: String },
}

/// Messages sent to the host. Fire-and-forget.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum PluginMessage {
    RequestVectorSelection,
    #[serde(rename_all = "camelCase")]
    CreateSvg {
        svg: String,
        width: f32,
        height: f32,
        background_color: String,
        /// Present only when coordinates were rewritten.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        scale_x: Option<f32>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        scale_y: Option<f32>,
        is_custom_shape: bool,
    },
    ClosePlugin,
}

impl HostMessage {
    /// Parses one envelope. Unknown `type` values and missing fields are protocol errors.
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| Error::Protocol(e.to_string()))
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

impl PluginMessage {
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| Error::Protocol(e.to_string()))
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Envelope type tag.
    pub fn kind(&self) -> &'static str {
        match self {
            PluginMessage::RequestVectorSelection => "request-vector-selection",
            PluginMessage::CreateSvg { .. } => "create-svg",
            PluginMessage::ClosePlugin => "close-plugin",
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{json, Value};

    use super::*;

    #[test]
    fn parses_frame_selected_with_and_without_background() {
        let msg = HostMessage::from_json(
            r##"{"type":"frame-selected","width":1200,"height":600,"backgroundColor":"#202020"}"##,
        )
        .unwrap();
        assert_eq!(
            msg,
            HostMessage::FrameSelected {
                width: 1200.0,
                height: 600.0,
                background_color: Some("#202020".into()),
            }
        );

        let msg =
            HostMessage::from_json(r#"{"type":"frame-selected","width":10,"height":20}"#).unwrap();
        assert!(matches!(
            msg,
            HostMessage::FrameSelected {
                background_color: None,
                ..
            }
        ));
    }

    #[test]
    fn parses_unit_and_error_messages() {
        assert_eq!(
            HostMessage::from_json(r#"{"type":"no-frame-selected"}"#).unwrap(),
            HostMessage::NoFrameSelected
        );
        assert_eq!(
            HostMessage::from_json(r#"{"type":"vector-selection-error","message":"nothing"}"#)
                .unwrap(),
            HostMessage::VectorSelectionError {
                message: "nothing".into()
            }
        );
    }

    #[test]
    fn unknown_type_is_a_protocol_error() {
        let err = HostMessage::from_json(r#"{"type":"selection-moved"}"#).unwrap_err();
        assert!(matches!(err, Error::Protocol(_)));
        assert!(matches!(
            HostMessage::from_json("not json"),
            Err(Error::Protocol(_))
        ));
    }

    #[test]
    fn create_svg_omits_scale_in_viewport_mode() {
        let msg = PluginMessage::CreateSvg {
            svg: "<svg/>".into(),
            width: 300.0,
            height: 600.0,
            background_color: "#1e1e1e".into(),
            scale_x: None,
            scale_y: None,
            is_custom_shape: false,
        };
        let value: Value = serde_json::from_str(&msg.to_json().unwrap()).unwrap();
        assert_eq!(
            value,
            json!({
                "type": "create-svg",
                "svg": "<svg/>",
                "width": 300.0,
                "height": 600.0,
                "backgroundColor": "#1e1e1e",
                "isCustomShape": false,
            })
        );
    }

    #[test]
    fn create_svg_carries_scale_in_rewrite_mode() {
        let msg = PluginMessage::CreateSvg {
            svg: "<svg/>".into(),
            width: 300.0,
            height: 600.0,
            background_color: "#1e1e1e".into(),
            scale_x: Some(0.5),
            scale_y: Some(1.0),
            is_custom_shape: true,
        };
        let value: Value = serde_json::from_str(&msg.to_json().unwrap()).unwrap();
        assert_eq!(value["scaleX"], json!(0.5));
        assert_eq!(value["scaleY"], json!(1.0));
        assert_eq!(value["isCustomShape"], json!(true));
        assert_eq!(msg.kind(), "create-svg");
    }

    #[test]
    fn unit_plugin_messages_are_tagged() {
        assert_eq!(
            PluginMessage::ClosePlugin.to_json().unwrap(),
            r#"{"type":"close-plugin"}"#
        );
        assert_eq!(
            PluginMessage::RequestVectorSelection.to_json().unwrap(),
            r#"{"type":"request-vector-selection"}"#
        );
    }
}
