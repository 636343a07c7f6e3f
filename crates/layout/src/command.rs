//! Resolved drawing primitives.
//!
//! Coordinates are template page coordinates: origin at the top-left corner,
//! y growing downward. Converting to any other coordinate system is the
//! serializer's job.

use folio_types::{AssetRef, Color, FontFamily};

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Single-line text with its baseline origin at `(x, y)`.
    PlaceText {
        x: f32,
        y: f32,
        text: String,
        font: FontFamily,
        size: f32,
    },
    /// Image whose top-left corner is at `(x, y)`.
    PlaceImage {
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        asset: AssetRef,
    },
    FillRect {
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        color: Color,
    },
    StrokeRect {
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        color: Color,
    },
    StrokeLine {
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        color: Color,
    },
}

impl DrawCommand {
    pub fn name(&self) -> &'static str {
        match self {
            DrawCommand::PlaceText { .. } => "PlaceText",
            DrawCommand::PlaceImage { .. } => "PlaceImage",
            DrawCommand::FillRect { .. } => "FillRect",
            DrawCommand::StrokeRect { .. } => "StrokeRect",
            DrawCommand::StrokeLine { .. } => "StrokeLine",
        }
    }

    /// Every numeric operand, for finiteness checks.
    pub fn numbers(&self) -> Vec<f32> {
        match self {
            DrawCommand::PlaceText { x, y, size, .. } => vec![*x, *y, *size],
            DrawCommand::PlaceImage { x, y, w, h, .. }
            | DrawCommand::FillRect { x, y, w, h, .. }
            | DrawCommand::StrokeRect { x, y, w, h, .. } => vec![*x, *y, *w, *h],
            DrawCommand::StrokeLine { x1, y1, x2, y2, .. } => vec![*x1, *y1, *x2, *y2],
        }
    }
}
