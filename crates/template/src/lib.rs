//! Template model and data binding for the folio renderer.
//!
//! - **`Template`** / **`Element`**: the declarative page description
//! - **`DataRecord`** / **`Value`**: the scalar data a template is filled with
//! - **`FieldResolver`**: turns `{field}` bindings into display text

mod error;
pub mod model;
pub mod record;
pub mod resolver;

pub use error::TemplateError;
pub use model::{
    Element, FieldElement, FontRef, Frame, ImageElement, ShapeElement, Template, TextElement,
};
pub use record::{DataRecord, Value};
pub use resolver::{FieldResolver, resolve, strip_decoration};
