//! The declarative page description.
//!
//! Templates deserialize from the JSON shape stored by the invoice manager:
//!
//! ```json
//! {
//!   "pageSize": { "width": 595, "height": 842 },
//!   "elements": [
//!     { "type": "field", "x": 50, "y": 100, "width": 200, "height": 20,
//!       "fieldName": "{customer_name}", "text": "Customer", "fontSize": 12 }
//!   ],
//!   "fonts": [{ "family": "Helvetica", "url": "builtin:helvetica" }]
//! }
//! ```
//!
//! A full template row (`{ "id", "name", "content": { ... } }`) is accepted as well.

use crate::error::TemplateError;
use folio_types::{AssetRef, Color, FontFamily, Size, TemplateId};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

fn default_opacity() -> f32 {
    1.0
}

/// Geometry and presentation attributes shared by every element kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Frame {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub x: f32,
    pub y: f32,
    #[serde(default)]
    pub width: f32,
    #[serde(default)]
    pub height: f32,
    /// Degrees, clockwise. Carried through the model; placement ignores it.
    #[serde(default)]
    pub rotation: f32,
    #[serde(default = "default_opacity")]
    pub opacity: f32,
}

impl Frame {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            id: None,
            x,
            y,
            width,
            height,
            rotation: 0.0,
            opacity: 1.0,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// True when both width and height are strictly positive.
    pub fn has_area(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextElement {
    #[serde(flatten)]
    pub frame: Frame,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_family: Option<FontFamily>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f32>,
    #[serde(rename = "text", default)]
    pub literal_text: String,
}

/// A text element whose content comes from the data record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldElement {
    #[serde(flatten)]
    pub frame: Frame,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_family: Option<FontFamily>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f32>,
    /// Record key, optionally decorated as `{key}`.
    pub field_name: String,
    /// Shown when the record has no value for `field_name`.
    #[serde(rename = "text", default)]
    pub literal_text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageElement {
    #[serde(flatten)]
    pub frame: Frame,
    #[serde(default)]
    pub src: AssetRef,
}

/// Rectangles and lines share the same paint attributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShapeElement {
    #[serde(flatten)]
    pub frame: Frame,
    #[serde(
        default,
        deserialize_with = "optional_color",
        skip_serializing_if = "Option::is_none"
    )]
    pub fill: Option<Color>,
    #[serde(
        default,
        deserialize_with = "optional_color",
        skip_serializing_if = "Option::is_none"
    )]
    pub stroke: Option<Color>,
}

/// Empty strings, `"none"` and `"transparent"` mean "no paint".
fn optional_color<'de, D>(deserializer: D) -> Result<Option<Color>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Paint {
        Keyword(String),
        Color(Color),
    }

    match Option::<Paint>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Paint::Color(c)) => Ok(Some(c)),
        Some(Paint::Keyword(s)) => {
            let trimmed = s.trim();
            if trimmed.is_empty()
                || trimmed.eq_ignore_ascii_case("none")
                || trimmed.eq_ignore_ascii_case("transparent")
            {
                Ok(None)
            } else {
                Color::parse_hex(trimmed)
                    .map(Some)
                    .map_err(serde::de::Error::custom)
            }
        }
    }
}

/// One positioned item on the page. Declaration order is paint order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Element {
    Text(TextElement),
    Field(FieldElement),
    Image(ImageElement),
    Rectangle(ShapeElement),
    Line(ShapeElement),
}

impl Element {
    pub fn frame(&self) -> &Frame {
        match self {
            Element::Text(e) => &e.frame,
            Element::Field(e) => &e.frame,
            Element::Image(e) => &e.frame,
            Element::Rectangle(e) | Element::Line(e) => &e.frame,
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Element::Text(_) => "text",
            Element::Field(_) => "field",
            Element::Image(_) => "image",
            Element::Rectangle(_) => "rectangle",
            Element::Line(_) => "line",
        }
    }

    pub fn text(frame: Frame, text: impl Into<String>) -> Self {
        Element::Text(TextElement {
            frame,
            font_family: None,
            font_size: None,
            literal_text: text.into(),
        })
    }

    pub fn field(frame: Frame, field_name: impl Into<String>, fallback: impl Into<String>) -> Self {
        Element::Field(FieldElement {
            frame,
            font_family: None,
            font_size: None,
            field_name: field_name.into(),
            literal_text: fallback.into(),
        })
    }

    pub fn image(frame: Frame, src: impl Into<AssetRef>) -> Self {
        Element::Image(ImageElement {
            frame,
            src: src.into(),
        })
    }

    pub fn rectangle(frame: Frame, fill: Option<Color>, stroke: Option<Color>) -> Self {
        Element::Rectangle(ShapeElement {
            frame,
            fill,
            stroke,
        })
    }

    pub fn line(frame: Frame, stroke: Option<Color>) -> Self {
        Element::Line(ShapeElement {
            frame,
            fill: None,
            stroke,
        })
    }

    /// Sets font family and size on text-bearing elements; no-op otherwise.
    pub fn with_font(mut self, family: impl Into<FontFamily>, size: f32) -> Self {
        match &mut self {
            Element::Text(e) => {
                e.font_family = Some(family.into());
                e.font_size = Some(size);
            }
            Element::Field(e) => {
                e.font_family = Some(family.into());
                e.font_size = Some(size);
            }
            _ => {}
        }
        self
    }
}

/// A font family made available to the page, with the locator it was declared with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontRef {
    pub family: FontFamily,
    #[serde(default)]
    pub url: String,
}

impl FontRef {
    pub fn new(family: impl Into<FontFamily>, url: impl Into<String>) -> Self {
        Self {
            family: family.into(),
            url: url.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<TemplateId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub page_size: Size,
    #[serde(default)]
    pub elements: Vec<Element>,
    #[serde(default)]
    pub fonts: Vec<FontRef>,
}

impl Template {
    pub fn new(page_size: Size) -> Self {
        Self {
            id: None,
            name: None,
            page_size,
            elements: Vec::new(),
            fonts: Vec::new(),
        }
    }

    pub fn with_id(mut self, id: impl Into<TemplateId>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_element(mut self, element: Element) -> Self {
        self.elements.push(element);
        self
    }

    pub fn with_font(mut self, font: FontRef) -> Self {
        self.fonts.push(font);
        self
    }

    /// Parses either a bare template body or a stored template row with a `content` field.
    pub fn from_json_str(json: &str) -> Result<Self, TemplateError> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        Self::from_json_value(value)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, TemplateError> {
        let value: serde_json::Value = serde_json::from_reader(reader)?;
        Self::from_json_value(value)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, TemplateError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(std::io::BufReader::new(file))
    }

    pub fn from_json_value(mut value: serde_json::Value) -> Result<Self, TemplateError> {
        let content = value.get_mut("content").map(serde_json::Value::take);
        let mut template = match content {
            Some(content) => {
                let mut template: Template = serde_json::from_value(content)?;
                if template.id.is_none() {
                    template.id = value
                        .get("id")
                        .and_then(serde_json::Value::as_str)
                        .map(TemplateId::from);
                }
                if template.name.is_none() {
                    template.name = value
                        .get("name")
                        .and_then(serde_json::Value::as_str)
                        .map(str::to_string);
                }
                template
            }
            None => serde_json::from_value(value)?,
        };
        template.dedup_fonts();
        Ok(template)
    }

    /// Keeps the first declaration of each font family.
    fn dedup_fonts(&mut self) {
        let mut seen = HashSet::new();
        self.fonts.retain(|font| {
            let first = seen.insert(font.family.clone());
            if !first {
                log::debug!("Ignoring duplicate font declaration for '{}'", font.family);
            }
            first
        });
    }
}
