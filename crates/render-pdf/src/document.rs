use crate::content::ContentEncoder;
use crate::error::RenderError;
use crate::utils::{fmt_num, pdf_name};
use crate::writer::PdfWriter;
use folio_layout::{DrawCommand, FontTable, ImageTable, PageLayout};
use folio_types::{ImageAsset, ImageColorSpace, ImageEncoding, Size};

const CATALOG_ID: usize = 1;
const PAGES_ID: usize = 2;
const PAGE_ID: usize = 3;

/// A finished PDF file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedDocument {
    bytes: Vec<u8>,
}

impl RenderedDocument {
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Length of the file in bytes.
    pub fn content_length(&self) -> usize {
        self.bytes.len()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

impl AsRef<[u8]> for RenderedDocument {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

/// Serializes a laid-out page.
pub fn serialize_page(page: &PageLayout) -> Result<RenderedDocument, RenderError> {
    serialize(page.page_size, &page.commands, &page.fonts, &page.images)
}

/// Encodes one page of drawing commands as a PDF 1.7 file.
///
/// Object ids are fixed: catalog 1, page tree 2, page 3, then fonts and
/// images in table order (each image with alpha followed by its soft
/// mask), then the content stream. The output depends only
/// on the inputs, so identical inputs give identical bytes.
///
/// # Errors
///
/// Returns [`RenderError::InvalidDocumentSpec`] if the page size is not
/// positive and finite, if a command has a non-finite coordinate, or if a
/// command references a font or image missing from the tables. Nothing is
/// returned on error.
pub fn serialize(
    page_size: Size,
    commands: &[DrawCommand],
    fonts: &FontTable,
    images: &ImageTable,
) -> Result<RenderedDocument, RenderError> {
    validate(page_size, commands, images)?;
    let content = ContentEncoder::new(page_size.height, fonts, images).encode(commands)?;

    let mut writer = PdfWriter::new();
    let catalog_id = writer.reserve();
    let pages_id = writer.reserve();
    let page_id = writer.reserve();
    debug_assert_eq!((catalog_id, pages_id, page_id), (CATALOG_ID, PAGES_ID, PAGE_ID));
    let font_ids: Vec<usize> = fonts.iter().map(|_| writer.reserve()).collect();
    let image_ids: Vec<(usize, Option<usize>)> = images
        .iter()
        .map(|(_, asset)| {
            let id = writer.reserve();
            let mask_id = asset.alpha.as_ref().map(|_| writer.reserve());
            (id, mask_id)
        })
        .collect();
    let content_id = writer.reserve();

    writer.write_object(
        catalog_id,
        format!("<< /Type /Catalog /Pages {} 0 R >>", pages_id).as_bytes(),
    )?;
    writer.write_object(
        pages_id,
        format!("<< /Type /Pages /Kids [{} 0 R] /Count 1 >>", page_id).as_bytes(),
    )?;
    let page = format!(
        "<< /Type /Page /Parent {} 0 R /MediaBox [0 0 {} {}] /Resources {} /Contents {} 0 R >>",
        pages_id,
        fmt_num(page_size.width),
        fmt_num(page_size.height),
        resources_dict(&font_ids, &image_ids),
        content_id
    );
    writer.write_object(page_id, page.as_bytes())?;

    for (font, id) in fonts.iter().zip(&font_ids) {
        let dict = format!(
            "<< /Type /Font /Subtype /Type1 /BaseFont {} /Encoding /WinAnsiEncoding >>",
            pdf_name(font.family.as_str())
        );
        writer.write_object(*id, dict.as_bytes())?;
    }
    for ((_, asset), (id, mask_id)) in images.iter().zip(&image_ids) {
        let mut dict = image_dict(asset);
        if let Some(mask_id) = mask_id {
            dict.push_str(&format!(" /SMask {} 0 R", mask_id));
        }
        writer.write_stream(*id, &dict, &asset.data)?;
        if let (Some(mask_id), Some(alpha)) = (mask_id, &asset.alpha) {
            writer.write_stream(*mask_id, &soft_mask_dict(asset), alpha)?;
        }
    }
    writer.write_stream(content_id, "", content.as_bytes())?;

    let bytes = writer.finish(catalog_id)?;
    log::debug!(
        "Serialized {} commands into {} bytes ({} fonts, {} images)",
        commands.len(),
        bytes.len(),
        font_ids.len(),
        image_ids.len()
    );
    Ok(RenderedDocument { bytes })
}

fn validate(page_size: Size, commands: &[DrawCommand], images: &ImageTable) -> Result<(), RenderError> {
    if !page_size.is_drawable() {
        return Err(RenderError::invalid(format!(
            "page size must be positive and finite, got {}x{}",
            page_size.width, page_size.height
        )));
    }
    for (i, command) in commands.iter().enumerate() {
        if command.numbers().iter().any(|n| !n.is_finite()) {
            return Err(RenderError::invalid(format!(
                "{} command #{} has a non-finite coordinate",
                command.name(),
                i
            )));
        }
    }
    for (reference, asset) in images.iter() {
        if !asset.is_consistent() {
            return Err(RenderError::invalid(format!(
                "image '{}' has {} bytes of data ({} of alpha) for {}x{} pixels",
                reference,
                asset.data.len(),
                asset.alpha.as_ref().map_or(0, |a| a.len()),
                asset.width,
                asset.height
            )));
        }
    }
    Ok(())
}

fn resources_dict(font_ids: &[usize], image_ids: &[(usize, Option<usize>)]) -> String {
    let mut dict = String::from("<<");
    if !font_ids.is_empty() {
        dict.push_str(" /Font <<");
        for (i, id) in font_ids.iter().enumerate() {
            dict.push_str(&format!(" /F{} {} 0 R", i + 1, id));
        }
        dict.push_str(" >>");
    }
    if !image_ids.is_empty() {
        dict.push_str(" /XObject <<");
        for (i, (id, _)) in image_ids.iter().enumerate() {
            dict.push_str(&format!(" /Im{} {} 0 R", i + 1, id));
        }
        dict.push_str(" >>");
    }
    dict.push_str(" >>");
    dict
}

fn image_dict(asset: &ImageAsset) -> String {
    let color_space = match asset.color_space {
        ImageColorSpace::DeviceGray => "DeviceGray",
        ImageColorSpace::DeviceRgb => "DeviceRGB",
    };
    let mut dict = format!(
        "/Type /XObject /Subtype /Image /Width {} /Height {} /ColorSpace /{} /BitsPerComponent 8",
        asset.width, asset.height, color_space
    );
    if asset.encoding == ImageEncoding::Jpeg {
        dict.push_str(" /Filter /DCTDecode");
    }
    dict
}

/// Uncompressed 8-bit opacity plane for an image's `/SMask`.
fn soft_mask_dict(asset: &ImageAsset) -> String {
    format!(
        "/Type /XObject /Subtype /Image /Width {} /Height {} /ColorSpace /DeviceGray /BitsPerComponent 8",
        asset.width, asset.height
    )
}
