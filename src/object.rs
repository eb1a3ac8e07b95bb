use macroquad::math::IVec2;

use crate::color::Rgba32Color;

/// Vertical text alignment inside an object's bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum VerticalAlignment {
    /// Default.
    #[default]
    Top,
    /// Centered.
    Center,
    /// Bottom.
    Bottom,
}

/// Horizontal text alignment inside an object's bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HorizontalAlignment {
    /// Default.
    #[default]
    Left,
    /// Centered.
    Center,
    /// Right.
    Right,
    /// Justified.
    Justified,
}

/// Style and content of a text object.
///
/// [`Default`] gives the values Tiled assumes when a field is left out of
/// the document.
#[derive(Debug, Clone, PartialEq)]
pub struct TextData {
    /// Displayed string.
    pub text: String,
    /// Text colour, opaque black by default.
    pub color: Rgba32Color,
    /// Font family name.
    pub font: String,
    /// Font size in pixels.
    pub point_size: i32,
    /// Vertical alignment.
    pub valign: VerticalAlignment,
    /// Horizontal alignment.
    pub halign: HorizontalAlignment,
    /// Word wrapping.
    pub wrap: bool,
    /// Kerning, on by default.
    pub kerning: bool,
    /// Bold.
    pub bold: bool,
    /// Italic.
    pub italic: bool,
    /// Underline.
    pub underline: bool,
    /// Strikethrough.
    pub strikethrough: bool,
}

impl Default for TextData {
    fn default() -> Self {
        TextData {
            text: String::new(),
            color: Rgba32Color::new(0, 0, 0, 0xFF),
            font: "sans-serif".to_owned(),
            point_size: 16,
            valign: VerticalAlignment::Top,
            halign: HorizontalAlignment::Left,
            wrap: false,
            kerning: true,
            bold: false,
            italic: false,
            underline: false,
            strikethrough: false,
        }
    }
}

/// Shape-specific payload of an [`Object`].
#[derive(Debug, Clone, PartialEq)]
pub enum ObjectKindData {
    /// Axis-aligned rectangle spanning the object's dimensions.
    Rectangle,
    /// Single point at the object's position.
    Point,
    /// Ellipse inscribed in the object's bounds.
    Ellipse,
    /// Closed polygon, points relative to the object's position.
    Polygon(Vec<IVec2>),
    /// Open polyline, points relative to the object's position.
    Polyline(Vec<IVec2>),
    /// Text box.
    Text(TextData),
    /// Tile placed as a free object, by global tile id.
    Sprite(u32),
}

/// Fieldless tag of [`ObjectKindData`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum ObjectKind {
    Rectangle,
    Point,
    Ellipse,
    Polygon,
    Polyline,
    Text,
    Sprite,
}

impl ObjectKindData {
    /// The tag of this payload.
    pub fn kind(&self) -> ObjectKind {
        match self {
            ObjectKindData::Rectangle => ObjectKind::Rectangle,
            ObjectKindData::Point => ObjectKind::Point,
            ObjectKindData::Ellipse => ObjectKind::Ellipse,
            ObjectKindData::Polygon(_) => ObjectKind::Polygon,
            ObjectKindData::Polyline(_) => ObjectKind::Polyline,
            ObjectKindData::Text(_) => ObjectKind::Text,
            ObjectKindData::Sprite(_) => ObjectKind::Sprite,
        }
    }
}

/// A freeform annotation from an object layer.
#[derive(Debug, Clone, PartialEq)]
pub struct Object {
    /// Unique id within the map.
    pub id: u32,
    /// Name given in the editor, may be empty.
    pub name: String,
    /// Free-form tag set in the editor.
    pub r#type: String,
    /// Pixel position.
    pub position: IVec2,
    /// Pixel size.
    pub dimensions: IVec2,
    /// Clockwise rotation in degrees.
    pub rotation: f64,
    /// Shape payload.
    pub kind_data: ObjectKindData,
}

impl Object {
    /// Which shape this object is.
    #[inline]
    pub fn kind(&self) -> ObjectKind {
        self.kind_data.kind()
    }

    /// Text payload, if this is a text object.
    pub fn text(&self) -> Option<&TextData> {
        match &self.kind_data {
            ObjectKindData::Text(text) => Some(text),
            _ => None,
        }
    }
}
