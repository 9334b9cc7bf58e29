//! Export Service - Read-only projections of a project aggregate
//!
//! Every export reads the project, its rooms and their furniture from one
//! storage snapshot. Binary renderers run on the blocking pool.

use std::sync::Arc;

use anyhow::Context;
use async_trait::async_trait;
use tracing::{debug, info, instrument};

use crate::application::dto::ProjectExportDto;
use crate::application::error::{ServiceError, ServiceResult};
use crate::application::ports::outbound::{ExportRendererPort, ProjectRepositoryPort};
use crate::domain::aggregates::{ProjectAggregate, ProjectSummary};
use crate::domain::value_objects::{ProjectId, UserId};

/// A rendered download
#[derive(Debug, Clone, PartialEq)]
pub struct ExportFile {
    pub file_name: String,
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

#[async_trait]
pub trait ExportService: Send + Sync {
    async fn export_json(&self, id: ProjectId, user: UserId) -> ServiceResult<ProjectExportDto>;

    /// Zip archive with `project.csv`, `rooms.csv` and `furniture.csv`
    async fn export_csv(&self, id: ProjectId, user: UserId) -> ServiceResult<ExportFile>;

    async fn export_pdf(&self, id: ProjectId, user: UserId) -> ServiceResult<ExportFile>;

    async fn generate_summary(&self, id: ProjectId, user: UserId) -> ServiceResult<ProjectSummary>;
}

pub struct ExportServiceImpl {
    projects: Arc<dyn ProjectRepositoryPort>,
    renderer: Arc<dyn ExportRendererPort>,
}

impl ExportServiceImpl {
    pub fn new(
        projects: Arc<dyn ProjectRepositoryPort>,
        renderer: Arc<dyn ExportRendererPort>,
    ) -> Self {
        Self { projects, renderer }
    }

    async fn owned_aggregate(&self, id: ProjectId, user: UserId) -> ServiceResult<ProjectAggregate> {
        match self.projects.load_aggregate(id).await? {
            Some(aggregate) if aggregate.project().is_owned_by(user) => Ok(aggregate),
            _ => Err(ServiceError::not_found("Project")),
        }
    }

    async fn render<F>(
        &self,
        aggregate: ProjectAggregate,
        what: &'static str,
        render: F,
    ) -> ServiceResult<Vec<u8>>
    where
        F: FnOnce(&dyn ExportRendererPort, &ProjectAggregate) -> anyhow::Result<Vec<u8>>
            + Send
            + 'static,
    {
        let renderer = Arc::clone(&self.renderer);
        let bytes = tokio::task::spawn_blocking(move || render(renderer.as_ref(), &aggregate))
            .await
            .with_context(|| format!("{what} renderer task failed"))?
            .with_context(|| format!("Failed to render {what}"))?;
        Ok(bytes)
    }
}

#[async_trait]
impl ExportService for ExportServiceImpl {
    #[instrument(skip(self))]
    async fn export_json(&self, id: ProjectId, user: UserId) -> ServiceResult<ProjectExportDto> {
        let aggregate = self.owned_aggregate(id, user).await?;
        debug!(project_id = %id, rooms = aggregate.rooms().len(), "Exporting project as JSON");
        Ok(ProjectExportDto::from(&aggregate))
    }

    #[instrument(skip(self))]
    async fn export_csv(&self, id: ProjectId, user: UserId) -> ServiceResult<ExportFile> {
        let aggregate = self.owned_aggregate(id, user).await?;
        let bytes = self
            .render(aggregate, "CSV archive", |r, a| r.render_csv_archive(a))
            .await?;
        info!(project_id = %id, size = bytes.len(), "Exported project as CSV archive");
        Ok(ExportFile {
            file_name: format!("export_{id}.zip"),
            content_type: "application/zip",
            bytes,
        })
    }

    #[instrument(skip(self))]
    async fn export_pdf(&self, id: ProjectId, user: UserId) -> ServiceResult<ExportFile> {
        let aggregate = self.owned_aggregate(id, user).await?;
        let bytes = self
            .render(aggregate, "PDF report", |r, a| r.render_pdf_report(a))
            .await?;
        info!(project_id = %id, size = bytes.len(), "Exported project as PDF");
        Ok(ExportFile {
            file_name: format!("project_{id}.pdf"),
            content_type: "application/pdf",
            bytes,
        })
    }

    #[instrument(skip(self))]
    async fn generate_summary(&self, id: ProjectId, user: UserId) -> ServiceResult<ProjectSummary> {
        let aggregate = self.owned_aggregate(id, user).await?;
        debug!(project_id = %id, "Generating project summary");
        Ok(aggregate.summary())
    }
}
