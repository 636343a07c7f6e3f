//! Content stream encoding for drawing commands.

use crate::error::RenderError;
use crate::utils::{clamp_unit, encode_text, flip_y, fmt_num};
use folio_layout::{DrawCommand, FontTable, ImageTable};
use folio_types::Color;
use std::fmt::Write;

/// Translates drawing commands into content stream operators.
///
/// Each command is wrapped in its own `q … Q` pair so color state never
/// carries over to the next command. Font `i` in the table is addressed as
/// `/F{i+1}`, image `i` as `/Im{i+1}`.
pub(crate) struct ContentEncoder<'a> {
    page_height: f32,
    fonts: &'a FontTable,
    images: &'a ImageTable,
    out: String,
}

impl<'a> ContentEncoder<'a> {
    pub(crate) fn new(page_height: f32, fonts: &'a FontTable, images: &'a ImageTable) -> Self {
        Self {
            page_height,
            fonts,
            images,
            out: String::new(),
        }
    }

    pub(crate) fn encode(mut self, commands: &[DrawCommand]) -> Result<String, RenderError> {
        for command in commands {
            self.push(command)?;
        }
        Ok(self.out)
    }

    fn push(&mut self, command: &DrawCommand) -> Result<(), RenderError> {
        let h = self.page_height;
        self.out.push_str("q\n");
        match command {
            DrawCommand::PlaceText {
                x,
                y,
                text,
                font,
                size,
            } => {
                let index = self.fonts.index_of(font).ok_or_else(|| {
                    RenderError::invalid(format!("font '{}' is not in the font table", font))
                })?;
                self.line(format_args!(
                    "0 g BT /F{} {} Tf 1 0 0 1 {} {} Tm ({}) Tj ET",
                    index + 1,
                    fmt_num(*size),
                    fmt_num(*x),
                    fmt_num(flip_y(*y, h)),
                    encode_text(text)
                ));
            }
            DrawCommand::PlaceImage { x, y, w, h: ih, asset } => {
                let index = self.images.index_of(asset).ok_or_else(|| {
                    RenderError::invalid(format!("image '{}' is not in the image table", asset))
                })?;
                // Unit square scaled to the frame; the frame's bottom edge is at y + h.
                self.line(format_args!(
                    "{} 0 0 {} {} {} cm /Im{} Do",
                    fmt_num(*w),
                    fmt_num(*ih),
                    fmt_num(*x),
                    fmt_num(flip_y(*y + *ih, h)),
                    index + 1
                ));
            }
            DrawCommand::FillRect { x, y, w, h: rh, color } => {
                self.color(*color, "rg");
                self.line(format_args!(
                    "{} {} {} {} re f",
                    fmt_num(*x),
                    fmt_num(flip_y(*y, h)),
                    fmt_num(*w),
                    fmt_num(-*rh)
                ));
            }
            DrawCommand::StrokeRect { x, y, w, h: rh, color } => {
                self.color(*color, "RG");
                self.line(format_args!(
                    "{} {} {} {} re S",
                    fmt_num(*x),
                    fmt_num(flip_y(*y, h)),
                    fmt_num(*w),
                    fmt_num(-*rh)
                ));
            }
            DrawCommand::StrokeLine {
                x1,
                y1,
                x2,
                y2,
                color,
            } => {
                self.color(*color, "RG");
                self.line(format_args!(
                    "{} {} m {} {} l S",
                    fmt_num(*x1),
                    fmt_num(flip_y(*y1, h)),
                    fmt_num(*x2),
                    fmt_num(flip_y(*y2, h))
                ));
            }
        }
        self.out.push_str("Q\n");
        Ok(())
    }

    fn color(&mut self, color: Color, operator: &str) {
        let [r, g, b] = color.normalized();
        self.line(format_args!(
            "{} {} {} {}",
            fmt_num(clamp_unit(r)),
            fmt_num(clamp_unit(g)),
            fmt_num(clamp_unit(b)),
            operator
        ));
    }

    fn line(&mut self, args: std::fmt::Arguments<'_>) {
        // Writing into a String cannot fail.
        let _ = self.out.write_fmt(args);
        self.out.push('\n');
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_types::{AssetRef, FontFamily, ImageAsset};

    fn encode(commands: &[DrawCommand], fonts: &FontTable, images: &ImageTable) -> String {
        ContentEncoder::new(842.0, fonts, images).encode(commands).unwrap()
    }

    fn helvetica() -> FontTable {
        let mut fonts = FontTable::new();
        fonts.ensure_available(&FontFamily::new("Helvetica"));
        fonts
    }

    #[test]
    fn test_text_is_flipped_and_black() {
        let out = encode(
            &[DrawCommand::PlaceText {
                x: 50.0,
                y: 100.0,
                text: "Acme Co".into(),
                font: FontFamily::new("Helvetica"),
                size: 12.0,
            }],
            &helvetica(),
            &ImageTable::new(),
        );
        assert_eq!(out, "q\n0 g BT /F1 12 Tf 1 0 0 1 50 742 Tm (Acme Co) Tj ET\nQ\n");
    }

    #[test]
    fn test_rectangles_hang_down_from_flipped_top() {
        let commands = [
            DrawCommand::FillRect {
                x: 10.0,
                y: 20.0,
                w: 100.0,
                h: 30.0,
                color: Color::rgb(255, 0, 0),
            },
            DrawCommand::StrokeRect {
                x: 10.0,
                y: 20.0,
                w: 100.0,
                h: 30.0,
                color: Color::BLACK,
            },
        ];
        let out = encode(&commands, &FontTable::new(), &ImageTable::new());
        assert_eq!(
            out,
            "q\n1 0 0 rg\n10 822 100 -30 re f\nQ\nq\n0 0 0 RG\n10 822 100 -30 re S\nQ\n"
        );
    }

    #[test]
    fn test_line_endpoints() {
        let out = encode(
            &[DrawCommand::StrokeLine {
                x1: 0.0,
                y1: 0.0,
                x2: 595.0,
                y2: 842.0,
                color: Color::gray(128),
            }],
            &FontTable::new(),
            &ImageTable::new(),
        );
        assert!(out.contains("0.502 0.502 0.502 RG\n0 842 m 595 0 l S\n"));
    }

    #[test]
    fn test_image_placement() {
        let mut images = ImageTable::new();
        images.insert(AssetRef::new("logo.png"), ImageAsset::rgb8(1, 1, vec![0, 0, 0]));
        let out = encode(
            &[DrawCommand::PlaceImage {
                x: 50.0,
                y: 40.0,
                w: 120.0,
                h: 60.0,
                asset: AssetRef::new("logo.png"),
            }],
            &FontTable::new(),
            &images,
        );
        assert_eq!(out, "q\n120 0 0 60 50 742 cm /Im1 Do\nQ\n");
    }

    #[test]
    fn test_unknown_font_is_rejected() {
        let result = ContentEncoder::new(842.0, &FontTable::new(), &ImageTable::new()).encode(&[
            DrawCommand::PlaceText {
                x: 0.0,
                y: 0.0,
                text: "x".into(),
                font: FontFamily::new("Missing"),
                size: 10.0,
            },
        ]);
        assert!(matches!(result, Err(RenderError::InvalidDocumentSpec(_))));
    }
}
