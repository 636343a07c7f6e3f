use crate::command::DrawCommand;
use crate::config::LayoutConfig;
use crate::fonts::FontTable;
use crate::output::{PageLayout, SkipReason, SkippedElement};
use crate::resources::ImageTable;
use folio_resource::decode_image;
use folio_template::{
    DataRecord, Element, FieldResolver, Frame, ImageElement, ShapeElement, Template,
};
use folio_traits::{AssetError, AssetProvider, InMemoryAssetProvider};
use folio_types::{FontFamily, ImageAsset};
use std::sync::Arc;

/// Walks template elements in declaration order and emits drawing commands.
///
/// Layout never fails: elements it cannot draw are left out and reported in
/// [`PageLayout::skipped`]. Font and page-size problems are left for the
/// serializer to reject.
#[derive(Debug, Clone)]
pub struct LayoutEngine {
    resolver: FieldResolver,
    assets: Arc<dyn AssetProvider>,
    config: LayoutConfig,
}

impl Default for LayoutEngine {
    fn default() -> Self {
        Self::new(Arc::new(InMemoryAssetProvider::new()))
    }
}

impl LayoutEngine {
    pub fn new(assets: Arc<dyn AssetProvider>) -> Self {
        Self {
            resolver: FieldResolver::default(),
            assets,
            config: LayoutConfig::default(),
        }
    }

    pub fn with_resolver(mut self, resolver: FieldResolver) -> Self {
        self.resolver = resolver;
        self
    }

    pub fn with_config(mut self, config: LayoutConfig) -> Self {
        self.config = config;
        self
    }

    pub fn resolver(&self) -> &FieldResolver {
        &self.resolver
    }

    pub fn layout(&self, template: &Template, record: &DataRecord) -> PageLayout {
        let mut page = PageLayout {
            page_size: template.page_size,
            commands: Vec::with_capacity(template.elements.len()),
            fonts: FontTable::from_declared(&template.fonts),
            images: ImageTable::new(),
            skipped: Vec::new(),
        };

        for (index, element) in template.elements.iter().enumerate() {
            if let Err(reason) = self.layout_element(element, record, &mut page) {
                let frame = element.frame();
                log::trace!("Skipping {} element #{}: {}", element.kind_name(), index, reason);
                page.skipped.push(SkippedElement {
                    index,
                    id: frame.id.clone(),
                    kind: element.kind_name(),
                    reason,
                });
            }
        }

        log::debug!(
            "Laid out {} elements into {} commands ({} skipped, {} fonts, {} images)",
            template.elements.len(),
            page.commands.len(),
            page.skipped.len(),
            page.fonts.len(),
            page.images.len()
        );
        page
    }

    fn layout_element(
        &self,
        element: &Element,
        record: &DataRecord,
        page: &mut PageLayout,
    ) -> Result<(), SkipReason> {
        match element {
            Element::Text(text) => {
                self.place_text(
                    &text.frame,
                    text.literal_text.clone(),
                    text.font_family.as_ref(),
                    text.font_size,
                    page,
                );
                Ok(())
            }
            Element::Field(field) => {
                let text = self
                    .resolver
                    .resolve(&field.field_name, record, &field.literal_text);
                self.place_text(
                    &field.frame,
                    text,
                    field.font_family.as_ref(),
                    field.font_size,
                    page,
                );
                Ok(())
            }
            Element::Image(image) => self.place_image(image, page),
            Element::Rectangle(shape) => self.place_rectangle(shape, page),
            Element::Line(shape) => self.place_line(shape, page),
        }
    }

    fn place_text(
        &self,
        frame: &Frame,
        text: String,
        family: Option<&FontFamily>,
        size: Option<f32>,
        page: &mut PageLayout,
    ) {
        let font = family
            .cloned()
            .unwrap_or_else(|| self.config.default_font_family.clone());
        if !page.fonts.ensure_available(&font) {
            log::debug!("Font '{}' is neither declared nor standard", font);
        }
        page.commands.push(DrawCommand::PlaceText {
            x: frame.x,
            y: frame.y,
            text,
            font,
            size: size.unwrap_or(self.config.default_font_size),
        });
    }

    fn place_image(&self, image: &ImageElement, page: &mut PageLayout) -> Result<(), SkipReason> {
        let frame = &image.frame;
        if image.src.is_empty() {
            return Err(SkipReason::EmptySource);
        }
        if !frame.has_area() {
            return Err(SkipReason::NonPositiveSize {
                width: frame.width,
                height: frame.height,
            });
        }
        if !page.images.contains(&image.src) {
            let asset = self
                .fetch_image(image.src.as_str())
                .map_err(SkipReason::AssetUnavailable)?;
            page.images.insert(image.src.clone(), asset);
        }
        page.commands.push(DrawCommand::PlaceImage {
            x: frame.x,
            y: frame.y,
            w: frame.width,
            h: frame.height,
            asset: image.src.clone(),
        });
        Ok(())
    }

    fn fetch_image(&self, reference: &str) -> Result<ImageAsset, AssetError> {
        let bytes = self.assets.fetch(reference)?;
        decode_image(&bytes)
    }

    fn place_rectangle(&self, shape: &ShapeElement, page: &mut PageLayout) -> Result<(), SkipReason> {
        let frame = &shape.frame;
        if !frame.has_area() {
            return Err(SkipReason::NonPositiveSize {
                width: frame.width,
                height: frame.height,
            });
        }
        if shape.fill.is_none() && shape.stroke.is_none() {
            return Err(SkipReason::NoPaint);
        }
        // Fill first so the stroke stays visible on the edge.
        if let Some(color) = shape.fill {
            page.commands.push(DrawCommand::FillRect {
                x: frame.x,
                y: frame.y,
                w: frame.width,
                h: frame.height,
                color,
            });
        }
        if let Some(color) = shape.stroke {
            page.commands.push(DrawCommand::StrokeRect {
                x: frame.x,
                y: frame.y,
                w: frame.width,
                h: frame.height,
                color,
            });
        }
        Ok(())
    }

    fn place_line(&self, shape: &ShapeElement, page: &mut PageLayout) -> Result<(), SkipReason> {
        let frame = &shape.frame;
        let color = shape.stroke.ok_or(SkipReason::NoPaint)?;
        page.commands.push(DrawCommand::StrokeLine {
            x1: frame.x,
            y1: frame.y,
            x2: frame.x + frame.width,
            y2: frame.y + frame.height,
            color,
        });
        Ok(())
    }
}
