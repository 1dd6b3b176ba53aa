use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::error::Result;
use crate::figma::nodes::{
    ChildNode, FigmaFile, FrameNode, Paint, ShapeNode, TextLayer, TextStyle, Vector,
};
use crate::figma::FigmaClient;
use crate::spec::{DesignSpec, Shape, TextNode};

/// Horizontal gap between an appended banner and existing content.
pub const FRAME_GAP: f64 = 40.0;

/// Inset subtracted from the frame width for texts that omit their own width.
pub const TEXT_INSET: f64 = 80.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublishedFile {
    pub file_key: String,
    pub url: String,
}

/// Turns design specs into frames and writes them to the design platform.
#[derive(Clone)]
pub struct Publisher {
    figma: FigmaClient,
    font_family: String,
    web_base: String,
}

impl Publisher {
    pub fn new(figma: FigmaClient, config: &Config) -> Self {
        Self {
            figma,
            font_family: config.font_family.clone(),
            web_base: config.figma_web_base.trim_end_matches('/').to_string(),
        }
    }

    /// Create a new document for the banner, or append it to `file_key`
    /// to the right of what is already there.
    ///
    /// A failed create or append aborts with the platform's error text.
    /// Nothing is rolled back.
    pub async fn publish(
        &self,
        token: &str,
        spec: &DesignSpec,
        file_key: Option<&str>,
    ) -> Result<PublishedFile> {
        let mut frame = build_frame(spec, &self.font_family);

        let file_key = match file_key {
            None => self.figma.create_file(token, &frame).await?,
            Some(key) => {
                if let Some(file) = self.figma.get_file(token, key).await? {
                    frame.x = next_frame_x(&file);
                }
                self.figma.append_nodes(token, key, &frame).await?;
                key.to_string()
            }
        };

        tracing::info!(file_key = %file_key, frame = %frame.name, x = frame.x, "banner published");

        Ok(PublishedFile {
            url: format!("{}/file/{}", self.web_base, file_key),
            file_key,
        })
    }
}

pub fn background_paint(spec: &DesignSpec) -> Paint {
    match spec.gradient_stops() {
        Some(stops) => Paint::GradientLinear {
            handle_positions: vec![
                Vector::new(0.0, 0.0),
                Vector::new(1.0, 1.0),
                Vector::new(0.0, 1.0),
            ],
            stops: stops.to_vec(),
        },
        None => Paint::solid(spec.background),
    }
}

/// Map a spec onto a frame at the origin. Shapes come first, then texts.
/// Every text is set in `font_family` whatever the spec asked for.
pub fn build_frame(spec: &DesignSpec, font_family: &str) -> FrameNode {
    let shapes = spec.shapes.iter().map(|s| ChildNode::Shape(shape_node(s)));
    let texts = spec
        .texts
        .iter()
        .map(|t| ChildNode::Text(text_layer(t, spec.width, font_family)));

    FrameNode {
        node_type: "FRAME",
        name: format!("Banner_{}x{}", spec.width, spec.height),
        x: 0.0,
        y: 0.0,
        width: spec.width,
        height: spec.height,
        fills: vec![background_paint(spec)],
        children: shapes.chain(texts).collect(),
    }
}

fn shape_node(shape: &Shape) -> ShapeNode {
    ShapeNode {
        kind: shape.kind.clone(),
        name: shape.name.clone(),
        x: shape.x,
        y: shape.y,
        width: shape.width,
        height: shape.height,
        fills: vec![Paint::Solid {
            color: shape.color,
            opacity: Some(shape.opacity),
        }],
        corner_radius: shape.corner_radius,
    }
}

fn text_layer(text: &TextNode, frame_width: f64, font_family: &str) -> TextLayer {
    if text.font != font_family {
        tracing::debug!(requested = %text.font, used = font_family, "replacing text font");
    }

    TextLayer {
        node_type: "TEXT",
        name: text.name.clone(),
        x: text.x,
        y: text.y,
        width: text.width.unwrap_or(frame_width - TEXT_INSET),
        characters: text.text.clone(),
        style: TextStyle {
            font_family: font_family.to_string(),
            font_size: text.size,
            font_weight: text.weight,
            text_align_horizontal: text.align.clone(),
            fills: vec![Paint::solid(text.color)],
        },
    }
}

/// X for a new frame: right edge of the first page's widest-reaching child,
/// plus [`FRAME_GAP`]. Only horizontal placement; `y` is left alone.
pub fn next_frame_x(file: &FigmaFile) -> f64 {
    let right_edge = file
        .document
        .as_ref()
        .and_then(|doc| doc.children.first())
        .and_then(|page| page.children.iter().map(|n| n.right_edge()).reduce(f64::max))
        .unwrap_or(0.0);

    right_edge + FRAME_GAP
}
