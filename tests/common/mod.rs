#![allow(dead_code)]

pub mod fixtures;
pub mod pdf_assertions;

use folio::{DataRecord, PipelineError, RenderOutput, RendererBuilder, Template};
use lopdf::Document as LopdfDocument;

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Wrapper around a generated PDF with helper methods
pub struct GeneratedPdf {
    pub bytes: Vec<u8>,
    pub doc: LopdfDocument,
    pub skipped: usize,
}

impl GeneratedPdf {
    pub fn from_output(output: RenderOutput) -> Result<Self, Box<dyn std::error::Error>> {
        let skipped = output.skipped.len();
        let bytes = output.document.into_bytes();
        let doc = LopdfDocument::load_mem(&bytes)?;
        Ok(Self { bytes, doc, skipped })
    }

    pub fn page_count(&self) -> usize {
        self.doc.get_pages().len()
    }

    /// The decoded content stream of the only page.
    pub fn content(&self) -> String {
        let page_id = *self.doc.get_pages().values().next().expect("document has no pages");
        let content = self.doc.get_page_content(page_id).expect("page has no content");
        String::from_utf8_lossy(&content).into_owned()
    }

    /// Save PDF to a file for manual debugging
    #[allow(dead_code)]
    pub fn save_for_debug(&self, name: &str) -> std::io::Result<()> {
        std::fs::write(format!("test_output_{}.pdf", name), &self.bytes)
    }
}

/// Render a JSON template against JSON data with the default renderer.
pub fn render_json(
    template: &serde_json::Value,
    data: &serde_json::Value,
) -> Result<GeneratedPdf, Box<dyn std::error::Error>> {
    init_logger();
    let template = Template::from_json_value(template.clone())?;
    let record = DataRecord::from_json(data)?;
    let output = RendererBuilder::new().build()?.render(&template, &record)?;
    GeneratedPdf::from_output(output)
}

pub fn render(template: &Template, record: &DataRecord) -> Result<RenderOutput, PipelineError> {
    init_logger();
    RendererBuilder::new().build()?.render(template, record)
}
