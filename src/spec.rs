use serde::{Deserialize, Deserializer, Serialize};

pub const DEFAULT_SIZE: f64 = 1080.0;
pub const DEFAULT_FONT: &str = "Inter";

/// Structured banner description produced by the model.
///
/// Every field is optional on the wire. A missing key and an explicit `null`
/// both take the default documented on the field. Nothing else is validated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignSpec {
    #[serde(default = "default_size", deserialize_with = "size_or_default")]
    pub width: f64,
    #[serde(default = "default_size", deserialize_with = "size_or_default")]
    pub height: f64,
    /// Solid fill used when no gradient is given.
    #[serde(default, deserialize_with = "nullable")]
    pub background: Color,
    /// An empty list is treated the same as no gradient.
    #[serde(default)]
    pub gradient: Option<Vec<GradientStop>>,
    #[serde(default, deserialize_with = "nullable")]
    pub shapes: Vec<Shape>,
    #[serde(default, deserialize_with = "nullable")]
    pub texts: Vec<TextNode>,
    #[serde(default, deserialize_with = "nullable")]
    pub design_brief: String,
}

impl DesignSpec {
    pub fn gradient_stops(&self) -> Option<&[GradientStop]> {
        self.gradient.as_deref().filter(|stops| !stops.is_empty())
    }
}

/// RGB channels in `[0, 1]`, optional alpha.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub a: Option<f64>,
}

impl Color {
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);

    pub const fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b, a: None }
    }
}

// Dark blue-gray.
impl Default for Color {
    fn default() -> Self {
        Color::rgb(0.1, 0.1, 0.2)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GradientStop {
    pub position: f64,
    pub color: Color,
}

/// Node type for a shape. Known types are matched case-insensitively;
/// anything else is passed through to the platform untouched.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ShapeKind {
    #[default]
    Rectangle,
    Ellipse,
    Line,
    Star,
    RegularPolygon,
    Vector,
    Other(String),
}

impl From<String> for ShapeKind {
    fn from(value: String) -> Self {
        match value.to_ascii_uppercase().as_str() {
            "RECTANGLE" => ShapeKind::Rectangle,
            "ELLIPSE" => ShapeKind::Ellipse,
            "LINE" => ShapeKind::Line,
            "STAR" => ShapeKind::Star,
            "REGULAR_POLYGON" => ShapeKind::RegularPolygon,
            "VECTOR" => ShapeKind::Vector,
            _ => ShapeKind::Other(value),
        }
    }
}

impl From<ShapeKind> for String {
    fn from(kind: ShapeKind) -> Self {
        match kind {
            ShapeKind::Rectangle => "RECTANGLE".to_string(),
            ShapeKind::Ellipse => "ELLIPSE".to_string(),
            ShapeKind::Line => "LINE".to_string(),
            ShapeKind::Star => "STAR".to_string(),
            ShapeKind::RegularPolygon => "REGULAR_POLYGON".to_string(),
            ShapeKind::Vector => "VECTOR".to_string(),
            ShapeKind::Other(other) => other,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    #[serde(default = "default_shape_name", deserialize_with = "shape_name_or_default")]
    pub name: String,
    #[serde(rename = "type", default, deserialize_with = "nullable")]
    pub kind: ShapeKind,
    #[serde(default, deserialize_with = "nullable")]
    pub x: f64,
    #[serde(default, deserialize_with = "nullable")]
    pub y: f64,
    #[serde(default = "default_shape_extent", deserialize_with = "extent_or_default")]
    pub width: f64,
    #[serde(default = "default_shape_extent", deserialize_with = "extent_or_default")]
    pub height: f64,
    #[serde(default = "white", deserialize_with = "white_or_default")]
    pub color: Color,
    #[serde(default = "one", deserialize_with = "one_or_default")]
    pub opacity: f64,
    #[serde(default, deserialize_with = "nullable")]
    pub corner_radius: f64,
}

/// Horizontal text alignment, same matching rules as [`ShapeKind`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
    Justified,
    Other(String),
}

impl From<String> for TextAlign {
    fn from(value: String) -> Self {
        match value.to_ascii_uppercase().as_str() {
            "LEFT" => TextAlign::Left,
            "CENTER" => TextAlign::Center,
            "RIGHT" => TextAlign::Right,
            "JUSTIFIED" => TextAlign::Justified,
            _ => TextAlign::Other(value),
        }
    }
}

impl From<TextAlign> for String {
    fn from(align: TextAlign) -> Self {
        match align {
            TextAlign::Left => "LEFT".to_string(),
            TextAlign::Center => "CENTER".to_string(),
            TextAlign::Right => "RIGHT".to_string(),
            TextAlign::Justified => "JUSTIFIED".to_string(),
            TextAlign::Other(other) => other,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextNode {
    #[serde(default = "default_text_name", deserialize_with = "text_name_or_default")]
    pub name: String,
    #[serde(default, deserialize_with = "nullable")]
    pub text: String,
    #[serde(default, deserialize_with = "nullable")]
    pub x: f64,
    #[serde(default, deserialize_with = "nullable")]
    pub y: f64,
    /// Falls back to the frame width minus 80 when absent.
    #[serde(default)]
    pub width: Option<f64>,
    #[serde(default = "default_text_size", deserialize_with = "text_size_or_default")]
    pub size: f64,
    #[serde(default = "default_text_weight", deserialize_with = "text_weight_or_default")]
    pub weight: f64,
    #[serde(default = "default_font", deserialize_with = "font_or_default")]
    pub font: String,
    #[serde(default, deserialize_with = "nullable")]
    pub align: TextAlign,
    #[serde(default = "white", deserialize_with = "white_or_default")]
    pub color: Color,
}

fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// `null` handling for fields whose default is not `T::default()`.
macro_rules! null_or {
    ($name:ident, $ty:ty, $default:ident) => {
        fn $name<'de, D>(deserializer: D) -> Result<$ty, D::Error>
        where
            D: Deserializer<'de>,
        {
            Ok(Option::<$ty>::deserialize(deserializer)?.unwrap_or_else($default))
        }
    };
}

null_or!(size_or_default, f64, default_size);
null_or!(shape_name_or_default, String, default_shape_name);
null_or!(text_name_or_default, String, default_text_name);
null_or!(extent_or_default, f64, default_shape_extent);
null_or!(text_size_or_default, f64, default_text_size);
null_or!(text_weight_or_default, f64, default_text_weight);
null_or!(font_or_default, String, default_font);
null_or!(white_or_default, Color, white);
null_or!(one_or_default, f64, one);

fn default_size() -> f64 {
    DEFAULT_SIZE
}

fn default_shape_name() -> String {
    "Shape".to_string()
}

fn default_text_name() -> String {
    "Text".to_string()
}

fn default_shape_extent() -> f64 {
    100.0
}

fn default_text_size() -> f64 {
    24.0
}

fn default_text_weight() -> f64 {
    400.0
}

fn default_font() -> String {
    DEFAULT_FONT.to_string()
}

fn white() -> Color {
    Color::WHITE
}

fn one() -> f64 {
    1.0
}
