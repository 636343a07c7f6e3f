//! Template-driven PDF rendering.
//!
//! A [`Template`] places text, field, image, rectangle and line elements at
//! absolute positions on a single page. [`DocumentRenderer`] fills the field
//! bindings from a [`DataRecord`], lays the elements out as drawing commands
//! and serializes them into a PDF file.
//!
//! ```no_run
//! use folio::{DataRecord, RendererBuilder, Template};
//!
//! # fn main() -> Result<(), folio::PipelineError> {
//! let template = Template::from_file("invoice.json")?;
//! let record = DataRecord::from_json_str(r#"{ "customer_name": "Acme Co" }"#)?;
//! let renderer = RendererBuilder::new().build()?;
//! renderer.render_to_file(&template, &record, "invoice.pdf")?;
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod invoice;
pub mod pipeline;

pub use error::PipelineError;
pub use invoice::{Invoice, InvoiceData, InvoiceStatus, LineItem, standard_invoice_template};
pub use pipeline::{DocumentRenderer, RenderConfig, RenderOutput, RendererBuilder};

pub use folio_executor::{ExecutorImpl, SyncExecutor};
#[cfg(feature = "rayon-executor")]
pub use folio_executor::RayonExecutor;
pub use folio_layout::{DrawCommand, PageLayout, SkipReason, SkippedElement};
pub use folio_render_pdf::{RenderError, RenderedDocument};
pub use folio_resource::FilesystemAssetProvider;
pub use folio_template::{DataRecord, Element, FieldResolver, Frame, Template, TemplateError, Value};
pub use folio_traits::{AssetError, AssetProvider, InMemoryAssetProvider};
pub use folio_types::{Color, Size};
