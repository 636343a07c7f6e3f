use std::sync::Arc;

/// Color space of an image's samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageColorSpace {
    DeviceGray,
    DeviceRgb,
}

impl ImageColorSpace {
    pub fn components(self) -> usize {
        match self {
            ImageColorSpace::DeviceGray => 1,
            ImageColorSpace::DeviceRgb => 3,
        }
    }
}

/// How the sample bytes of an [`ImageAsset`] are encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageEncoding {
    /// Raw 8-bit samples, row-major, no padding.
    Raw,
    /// An unmodified baseline JPEG file.
    Jpeg,
}

/// An image ready to be placed on a page: pixel dimensions plus sample bytes.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageAsset {
    pub width: u32,
    pub height: u32,
    pub color_space: ImageColorSpace,
    pub encoding: ImageEncoding,
    pub data: Arc<Vec<u8>>,
    /// Raw 8-bit opacity samples, one per pixel, for images that carry alpha.
    pub alpha: Option<Arc<Vec<u8>>>,
}

impl ImageAsset {
    /// A raw 8-bit RGB image. `data` must hold `width * height * 3` bytes.
    pub fn rgb8(width: u32, height: u32, data: Vec<u8>) -> Self {
        Self {
            width,
            height,
            color_space: ImageColorSpace::DeviceRgb,
            encoding: ImageEncoding::Raw,
            data: Arc::new(data),
            alpha: None,
        }
    }

    /// A raw 8-bit grayscale image. `data` must hold `width * height` bytes.
    pub fn gray8(width: u32, height: u32, data: Vec<u8>) -> Self {
        Self {
            color_space: ImageColorSpace::DeviceGray,
            ..Self::rgb8(width, height, data)
        }
    }

    /// Attaches an opacity channel of `width * height` bytes.
    pub fn with_alpha(mut self, alpha: Vec<u8>) -> Self {
        self.alpha = Some(Arc::new(alpha));
        self
    }

    fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// True when the sample buffer matches the declared dimensions.
    ///
    /// JPEG payloads carry their own geometry and are only checked for being non-empty.
    pub fn is_consistent(&self) -> bool {
        if self.width == 0 || self.height == 0 || self.data.is_empty() {
            return false;
        }
        if self.alpha.as_ref().is_some_and(|a| a.len() != self.pixel_count()) {
            return false;
        }
        match self.encoding {
            ImageEncoding::Raw => self.data.len() == self.pixel_count() * self.color_space.components(),
            ImageEncoding::Jpeg => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_consistency() {
        assert!(ImageAsset::rgb8(2, 1, vec![0; 6]).is_consistent());
        assert!(!ImageAsset::rgb8(2, 2, vec![0; 6]).is_consistent());
        assert!(!ImageAsset::rgb8(0, 0, vec![]).is_consistent());
        assert!(ImageAsset::gray8(3, 1, vec![0; 3]).is_consistent());
    }

    #[test]
    fn test_alpha_must_cover_every_pixel() {
        let image = ImageAsset::rgb8(2, 1, vec![0; 6]);
        assert!(image.clone().with_alpha(vec![255, 0]).is_consistent());
        assert!(!image.with_alpha(vec![255; 6]).is_consistent());
    }
}
