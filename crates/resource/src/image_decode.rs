use folio_traits::AssetError;
use folio_types::{ImageAsset, ImageColorSpace, ImageEncoding};
use image::{ColorType, ImageFormat};
use std::sync::Arc;

/// Prepares fetched bytes for embedding.
///
/// JPEG files are passed through untouched (the PDF reader decodes them) as
/// long as they are grayscale or RGB; CMYK JPEGs are rejected. Every other
/// supported raster format is expanded to raw 8-bit samples, with any
/// non-opaque alpha channel split off into [`ImageAsset::alpha`].
pub fn decode_image(bytes: &[u8]) -> Result<ImageAsset, AssetError> {
    let format = image::guess_format(bytes)
        .map_err(|e| AssetError::InvalidFormat(format!("unrecognised image data: {}", e)))?;

    let jpeg_color_space = if format == ImageFormat::Jpeg {
        Some(jpeg_color_space(bytes)?)
    } else {
        None
    };

    let decoded = image::load_from_memory_with_format(bytes, format)
        .map_err(|e| AssetError::InvalidFormat(e.to_string()))?;

    let (width, height) = (decoded.width(), decoded.height());
    let color = decoded.color();
    let grayscale = matches!(color, ColorType::L8 | ColorType::La8 | ColorType::L16 | ColorType::La16);

    let asset = match jpeg_color_space {
        Some(color_space) => ImageAsset {
            width,
            height,
            color_space,
            encoding: ImageEncoding::Jpeg,
            data: Arc::new(bytes.to_vec()),
            alpha: None,
        },
        None if color.has_alpha() => {
            let (samples, alpha) = if grayscale {
                split_alpha(decoded.to_luma_alpha8().into_raw(), 1)
            } else {
                split_alpha(decoded.to_rgba8().into_raw(), 3)
            };
            let asset = if grayscale {
                ImageAsset::gray8(width, height, samples)
            } else {
                ImageAsset::rgb8(width, height, samples)
            };
            if alpha.iter().all(|&a| a == u8::MAX) {
                asset
            } else {
                asset.with_alpha(alpha)
            }
        }
        None if grayscale => ImageAsset::gray8(width, height, decoded.to_luma8().into_raw()),
        None => ImageAsset::rgb8(width, height, decoded.to_rgb8().into_raw()),
    };

    log::trace!(
        "Decoded {:?} image {}x{} as {:?}/{:?} (alpha: {})",
        format,
        width,
        height,
        asset.color_space,
        asset.encoding,
        asset.alpha.is_some()
    );

    if asset.is_consistent() {
        Ok(asset)
    } else {
        Err(AssetError::InvalidFormat(format!(
            "image has no drawable pixels ({}x{})",
            width, height
        )))
    }
}

/// Splits interleaved `components + 1` samples into color and alpha planes.
fn split_alpha(interleaved: Vec<u8>, components: usize) -> (Vec<u8>, Vec<u8>) {
    let stride = components + 1;
    let pixels = interleaved.len() / stride;
    let mut samples = Vec::with_capacity(pixels * components);
    let mut alpha = Vec::with_capacity(pixels);
    for pixel in interleaved.chunks_exact(stride) {
        samples.extend_from_slice(&pixel[..components]);
        alpha.push(pixel[components]);
    }
    (samples, alpha)
}

fn jpeg_color_space(bytes: &[u8]) -> Result<ImageColorSpace, AssetError> {
    match jpeg_components(bytes) {
        Some(1) => Ok(ImageColorSpace::DeviceGray),
        Some(3) => Ok(ImageColorSpace::DeviceRgb),
        Some(4) => Err(AssetError::InvalidFormat(
            "CMYK JPEG images are not supported".to_string(),
        )),
        Some(n) => Err(AssetError::InvalidFormat(format!(
            "JPEG with {} color components is not supported",
            n
        ))),
        None => Err(AssetError::InvalidFormat("JPEG has no frame header".to_string())),
    }
}

/// Component count from the first start-of-frame segment of a JPEG stream.
fn jpeg_components(bytes: &[u8]) -> Option<u8> {
    if !bytes.starts_with(&[0xFF, 0xD8]) {
        return None;
    }
    let mut pos = 2;
    loop {
        if *bytes.get(pos)? != 0xFF {
            return None;
        }
        // fill bytes
        while *bytes.get(pos + 1)? == 0xFF {
            pos += 1;
        }
        let marker = *bytes.get(pos + 1)?;
        let segment = pos + 2;
        match marker {
            0x01 | 0xD0..=0xD7 => {
                pos = segment;
                continue;
            }
            0xD9 | 0xDA => return None,
            _ => {}
        }
        let length = u16::from_be_bytes([*bytes.get(segment)?, *bytes.get(segment + 1)?]) as usize;
        if matches!(marker, 0xC0..=0xCF) && !matches!(marker, 0xC4 | 0xC8 | 0xCC) {
            // length(2) precision(1) height(2) width(2) components(1)
            return bytes.get(segment + 7).copied();
        }
        if length < 2 {
            return None;
        }
        pos = segment + length;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, Luma, LumaA, Rgb, Rgba};
    use std::io::Cursor;

    fn png_bytes(img: image::DynamicImage) -> Vec<u8> {
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, ImageFormat::Png).unwrap();
        out.into_inner()
    }

    fn jpeg_bytes(img: image::DynamicImage) -> Vec<u8> {
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, ImageFormat::Jpeg).unwrap();
        out.into_inner()
    }

    /// Offset of the component-count byte in the first SOF0 segment.
    fn sof_components_offset(bytes: &[u8]) -> usize {
        let sof = bytes.windows(2).position(|w| w == [0xFFu8, 0xC0]).unwrap();
        sof + 2 + 7
    }

    #[test]
    fn test_png_rgba_keeps_alpha_plane() {
        let img = ImageBuffer::from_pixel(2, 3, Rgba([10u8, 20, 30, 128]));
        let asset = decode_image(&png_bytes(img.into())).unwrap();

        assert_eq!((asset.width, asset.height), (2, 3));
        assert_eq!(asset.encoding, ImageEncoding::Raw);
        assert_eq!(asset.color_space, ImageColorSpace::DeviceRgb);
        assert_eq!(asset.data.len(), 2 * 3 * 3);
        assert_eq!(&asset.data[0..3], &[10, 20, 30]);
        let alpha = asset.alpha.expect("alpha plane");
        assert_eq!(alpha.as_slice(), &[128; 6]);
    }

    #[test]
    fn test_opaque_alpha_is_dropped() {
        let img = ImageBuffer::from_pixel(2, 2, Rgba([1u8, 2, 3, 255]));
        let asset = decode_image(&png_bytes(img.into())).unwrap();
        assert!(asset.alpha.is_none());
        assert_eq!(asset.data.len(), 12);
    }

    #[test]
    fn test_gray_alpha_png() {
        let img = ImageBuffer::from_fn(2, 1, |x, _| LumaA([50u8, if x == 0 { 0 } else { 255 }]));
        let asset = decode_image(&png_bytes(img.into())).unwrap();
        assert_eq!(asset.color_space, ImageColorSpace::DeviceGray);
        assert_eq!(asset.data.as_slice(), &[50, 50]);
        assert_eq!(asset.alpha.unwrap().as_slice(), &[0, 255]);
    }

    #[test]
    fn test_gray_png_stays_gray() {
        let img = ImageBuffer::from_pixel(4, 1, Luma([200u8]));
        let asset = decode_image(&png_bytes(img.into())).unwrap();

        assert_eq!(asset.color_space, ImageColorSpace::DeviceGray);
        assert_eq!(asset.data.as_slice(), &[200, 200, 200, 200]);
    }

    #[test]
    fn test_jpeg_is_passed_through() {
        let bytes = jpeg_bytes(ImageBuffer::from_pixel(8, 8, Rgb([255u8, 0, 0])).into());

        let asset = decode_image(&bytes).unwrap();
        assert_eq!(asset.encoding, ImageEncoding::Jpeg);
        assert_eq!(asset.color_space, ImageColorSpace::DeviceRgb);
        assert_eq!((asset.width, asset.height), (8, 8));
        assert_eq!(asset.data.as_slice(), bytes.as_slice());
    }

    #[test]
    fn test_jpeg_components_come_from_frame_header() {
        let rgb = jpeg_bytes(ImageBuffer::from_pixel(8, 8, Rgb([0u8, 128, 255])).into());
        let gray = jpeg_bytes(ImageBuffer::from_pixel(8, 8, Luma([90u8])).into());
        assert_eq!(jpeg_components(&rgb), Some(3));
        assert_eq!(jpeg_components(&gray), Some(1));
        assert_eq!(decode_image(&gray).unwrap().color_space, ImageColorSpace::DeviceGray);
        assert_eq!(jpeg_components(b"not a jpeg"), None);
    }

    #[test]
    fn test_cmyk_jpeg_is_rejected() {
        let mut bytes = jpeg_bytes(ImageBuffer::from_pixel(8, 8, Rgb([10u8, 20, 30])).into());
        let offset = sof_components_offset(&bytes);
        assert_eq!(bytes[offset], 3);
        bytes[offset] = 4;

        match decode_image(&bytes) {
            Err(AssetError::InvalidFormat(message)) => assert!(message.contains("CMYK")),
            other => panic!("expected InvalidFormat, got {:?}", other),
        }
    }

    #[test]
    fn test_garbage_is_invalid_format() {
        let result = decode_image(b"definitely not an image");
        assert!(matches!(result, Err(AssetError::InvalidFormat(_))));
    }
}
