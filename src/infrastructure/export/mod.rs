//! Project export renderers
//!
//! Two binary formats are available:
//! - [`render_csv_archive`]: `project.csv`, `rooms.csv` and `furniture.csv` in a zip
//! - [`render_pdf_report`]: a paginated A4 report

mod csv_archive;
mod pdf_report;

pub use csv_archive::render_csv_archive;
pub use pdf_report::render_pdf_report;

use anyhow::Result;

use crate::application::ports::outbound::ExportRendererPort;
use crate::domain::aggregates::ProjectAggregate;

#[derive(Debug, Clone, Copy, Default)]
pub struct FileExportRenderer;

impl ExportRendererPort for FileExportRenderer {
    fn render_csv_archive(&self, aggregate: &ProjectAggregate) -> Result<Vec<u8>> {
        render_csv_archive(aggregate)
    }

    fn render_pdf_report(&self, aggregate: &ProjectAggregate) -> Result<Vec<u8>> {
        render_pdf_report(aggregate)
    }
}
