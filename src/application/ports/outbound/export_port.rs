//! Export ports - Binary renderers for project aggregates

use anyhow::Result;

use crate::domain::aggregates::ProjectAggregate;

/// Turns a project aggregate into downloadable artifacts
///
/// Rendering is synchronous and CPU-bound; callers run it off the async
/// executor.
#[cfg_attr(test, mockall::automock)]
pub trait ExportRendererPort: Send + Sync {
    /// `project.csv`, `rooms.csv` and `furniture.csv` in one zip archive
    fn render_csv_archive(&self, aggregate: &ProjectAggregate) -> Result<Vec<u8>>;

    /// A paginated A4 PDF report
    fn render_pdf_report(&self, aggregate: &ProjectAggregate) -> Result<Vec<u8>>;
}
