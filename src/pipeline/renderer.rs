// src/pipeline/renderer.rs
use crate::error::PipelineError;
use folio_executor::{Executor, ExecutorImpl};
use folio_layout::{LayoutEngine, PageLayout, SkippedElement};
use folio_render_pdf::{RenderedDocument, serialize_page};
use folio_template::{DataRecord, Template};
use std::fs;
use std::path::Path;
use std::sync::Arc;

/// The result of one render: the file plus every element that was left out.
#[derive(Debug, Clone)]
pub struct RenderOutput {
    pub document: RenderedDocument,
    pub skipped: Vec<SkippedElement>,
}

impl RenderOutput {
    pub fn bytes(&self) -> &[u8] {
        self.document.bytes()
    }
}

/// Lays out a template against data records and serializes the result.
///
/// Cheap to clone; clones share the layout engine.
#[derive(Clone)]
pub struct DocumentRenderer {
    engine: Arc<LayoutEngine>,
    executor: ExecutorImpl,
}

impl DocumentRenderer {
    pub(crate) fn new(engine: LayoutEngine, executor: ExecutorImpl) -> Self {
        Self {
            engine: Arc::new(engine),
            executor,
        }
    }

    pub fn layout(&self, template: &Template, record: &DataRecord) -> PageLayout {
        self.engine.layout(template, record)
    }

    /// Renders one record. Skipped elements are logged and returned with the document.
    pub fn render(&self, template: &Template, record: &DataRecord) -> Result<RenderOutput, PipelineError> {
        render_one(&self.engine, template, record)
    }

    pub fn render_to_file<P: AsRef<Path>>(
        &self,
        template: &Template,
        record: &DataRecord,
        path: P,
    ) -> Result<RenderOutput, PipelineError> {
        let output = self.render(template, record)?;
        fs::write(path.as_ref(), output.bytes())?;
        log::info!(
            "Wrote {} bytes to {}",
            output.document.content_length(),
            path.as_ref().display()
        );
        Ok(output)
    }

    /// Renders every record against the same template on the configured executor.
    ///
    /// Results come back in record order. A failure affects only its own record.
    pub fn render_batch(
        &self,
        template: &Template,
        records: Vec<DataRecord>,
    ) -> Vec<Result<RenderOutput, PipelineError>> {
        let template = Arc::new(template.clone());
        let engine = Arc::clone(&self.engine);
        log::debug!(
            "Rendering batch of {} records (parallelism {})",
            records.len(),
            self.executor.parallelism()
        );
        self.executor
            .execute_all(records, move |record| render_one(&engine, &template, &record))
    }
}

fn render_one(
    engine: &LayoutEngine,
    template: &Template,
    record: &DataRecord,
) -> Result<RenderOutput, PipelineError> {
    let page = engine.layout(template, record);
    report_skipped(template, &page.skipped);
    let document = serialize_page(&page)?;
    Ok(RenderOutput {
        document,
        skipped: page.skipped,
    })
}

fn report_skipped(template: &Template, skipped: &[SkippedElement]) {
    let name = template
        .id
        .as_ref()
        .map(|id| id.as_str())
        .or(template.name.as_deref())
        .unwrap_or("<unnamed>");
    for skip in skipped {
        let id = skip.id.as_deref().unwrap_or("-");
        if skip.reason.is_anomaly() {
            log::warn!(
                "Template '{}': skipped {} element #{} (id {}): {}",
                name,
                skip.kind,
                skip.index,
                id,
                skip.reason
            );
        } else {
            log::debug!(
                "Template '{}': {} element #{} (id {}) has nothing to paint",
                name,
                skip.kind,
                skip.index,
                id
            );
        }
    }
}
