//! FILENAME: core/xlsx-template/src/lib.rs
//! PURPOSE: Renders xlsx templates.
//! CONTEXT: Glue between `persistence` (load/save) and `template-engine`
//! (block expansion and cell rendering).
//!
//! ```no_run
//! use xlsx_template::XlsxTemplate;
//!
//! let mut template = XlsxTemplate::open("invoice_template.xlsx")?;
//! template.render_json(serde_json::json!({
//!     "customer": "Acme",
//!     "items": [{"name": "Widget", "price": 10}],
//! }))?;
//! template.save("invoice.xlsx")?;
//! # Ok::<(), xlsx_template::Error>(())
//! ```

mod error;
mod options;
mod template;

pub use error::{Error, Result};
pub use options::TemplateOptions;
pub use template::XlsxTemplate;

pub use engine::{CellValue, Grid};
pub use persistence::{Sheet, Workbook};
pub use template_engine::{Context, Environment, EnvironmentOptions, Value};
