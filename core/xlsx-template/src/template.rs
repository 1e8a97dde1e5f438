//! FILENAME: core/xlsx-template/src/template.rs
//! PURPOSE: Open a template workbook, render its sheets, save the output.
//! CONTEXT: Every selected sheet gets its own `SheetRenderer`, so the
//! deferred column contexts of one sheet never leak into another. A failed
//! render leaves the workbook partially rendered; load it again before
//! retrying.

use std::path::Path;

use persistence::{load_xlsx, save_xlsx, PersistenceError, Workbook};
use template_engine::{render_sheet, Context, Environment};

use crate::error::Result;
use crate::options::TemplateOptions;

#[derive(Debug, Clone)]
pub struct XlsxTemplate {
    workbook: Workbook,
    environment: Environment,
    options: TemplateOptions,
}

impl XlsxTemplate {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::open_with_options(path, TemplateOptions::default())
    }

    pub fn open_with_options(path: impl AsRef<Path>, options: TemplateOptions) -> Result<Self> {
        let path = path.as_ref();
        log::info!("[TEMPLATE] opening {}", path.display());
        let workbook = load_xlsx(path)?;
        Ok(Self::from_workbook_with_options(workbook, options))
    }

    pub fn from_workbook(workbook: Workbook) -> Self {
        Self::from_workbook_with_options(workbook, TemplateOptions::default())
    }

    pub fn from_workbook_with_options(workbook: Workbook, options: TemplateOptions) -> Self {
        XlsxTemplate {
            workbook,
            environment: Environment::with_options(options.environment.clone()),
            options,
        }
    }

    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    /// Evaluator used for every sheet; register custom filters here.
    pub fn environment_mut(&mut self) -> &mut Environment {
        &mut self.environment
    }

    pub fn options(&self) -> &TemplateOptions {
        &self.options
    }

    pub fn workbook(&self) -> &Workbook {
        &self.workbook
    }

    pub fn into_workbook(self) -> Workbook {
        self.workbook
    }

    /// Renders every selected sheet against `context`, in workbook order.
    pub fn render(&mut self, context: &Context) -> Result<()> {
        if let Some(names) = &self.options.sheets {
            if let Some(missing) = names.iter().find(|n| self.workbook.sheet(n).is_none()) {
                return Err(PersistenceError::SheetNotFound(missing.clone()).into());
            }
        }

        for sheet in &mut self.workbook.sheets {
            if !self.options.includes(&sheet.name) {
                log::debug!("[TEMPLATE] skipping sheet '{}'", sheet.name);
                continue;
            }
            log::info!("[TEMPLATE] rendering sheet '{}'", sheet.name);
            render_sheet(&mut sheet.grid, &self.environment, context)?;
        }
        Ok(())
    }

    /// Convenience for `render` with a JSON object as the top-level context.
    pub fn render_json(&mut self, context: serde_json::Value) -> Result<()> {
        self.render(&Context::from_json(context))
    }

    /// Renders a single sheet by name, ignoring the sheet selection.
    pub fn render_sheet(&mut self, name: &str, context: &Context) -> Result<()> {
        let sheet = self.workbook.require_sheet_mut(name)?;
        log::info!("[TEMPLATE] rendering sheet '{}'", name);
        render_sheet(&mut sheet.grid, &self.environment, context)?;
        Ok(())
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        save_xlsx(&self.workbook, path)?;
        log::info!("[TEMPLATE] saved {}", path.display());
        Ok(())
    }
}
