//! Wire shapes exchanged with the design platform: the node tree we send,
//! and the slice of a fetched file we read back for placement.

use serde::{Deserialize, Serialize};

use crate::spec::{Color, GradientStop, ShapeKind, TextAlign};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vector {
    pub x: f64,
    pub y: f64,
}

impl Vector {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum Paint {
    #[serde(rename = "SOLID")]
    Solid {
        color: Color,
        #[serde(skip_serializing_if = "Option::is_none")]
        opacity: Option<f64>,
    },
    #[serde(rename = "GRADIENT_LINEAR")]
    GradientLinear {
        #[serde(rename = "gradientHandlePositions")]
        handle_positions: Vec<Vector>,
        #[serde(rename = "gradientStops")]
        stops: Vec<GradientStop>,
    },
}

impl Paint {
    pub fn solid(color: Color) -> Self {
        Paint::Solid {
            color,
            opacity: None,
        }
    }
}

/// Top-level container for one banner.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameNode {
    #[serde(rename = "type")]
    pub node_type: &'static str,
    pub name: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub fills: Vec<Paint>,
    pub children: Vec<ChildNode>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ChildNode {
    Shape(ShapeNode),
    Text(TextLayer),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShapeNode {
    #[serde(rename = "type")]
    pub kind: ShapeKind,
    pub name: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub fills: Vec<Paint>,
    pub corner_radius: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextLayer {
    #[serde(rename = "type")]
    pub node_type: &'static str,
    pub name: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub characters: String,
    pub style: TextStyle,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TextStyle {
    pub font_family: String,
    pub font_size: f64,
    pub font_weight: f64,
    pub text_align_horizontal: TextAlign,
    pub fills: Vec<Paint>,
}

/// The part of `GET /files/{key}` used for placement.
#[derive(Debug, Default, Deserialize)]
pub struct FigmaFile {
    #[serde(default)]
    pub document: Option<DocumentNode>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentNode {
    #[serde(default)]
    pub children: Vec<DocumentNode>,
    #[serde(default)]
    pub absolute_bounding_box: Option<BoundingBox>,
}

impl DocumentNode {
    /// Right edge of this node, 0 when it has no bounding box.
    pub fn right_edge(&self) -> f64 {
        self.absolute_bounding_box
            .map(|bb| bb.x + bb.width)
            .unwrap_or(0.0)
    }
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct BoundingBox {
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub width: f64,
}
