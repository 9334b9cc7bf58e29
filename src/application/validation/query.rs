use super::{choice, Violations};
use crate::application::dto::ListQueryDto;
use crate::application::error::ServiceResult;

const DEFAULT_PAGE: u32 = 1;
const DEFAULT_LIMIT: u32 = 10;
const MAX_LIMIT: u32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectSortKey {
    Name,
    CreatedAt,
    LastModifiedAt,
}

impl ProjectSortKey {
    const VALUES: &'static [&'static str] = &["name", "createdAt", "lastModifiedAt"];

    fn parse(value: &str) -> Option<Self> {
        match value {
            "name" => Some(ProjectSortKey::Name),
            "createdAt" => Some(ProjectSortKey::CreatedAt),
            "lastModifiedAt" => Some(ProjectSortKey::LastModifiedAt),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    const VALUES: &'static [&'static str] = &["asc", "desc"];

    fn parse(value: &str) -> Option<Self> {
        match value {
            "asc" => Some(SortOrder::Asc),
            "desc" => Some(SortOrder::Desc),
            _ => None,
        }
    }
}

/// One page of a user's projects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProjectListQuery {
    pub page: u32,
    pub limit: u32,
    pub sort_by: ProjectSortKey,
    pub order: SortOrder,
}

impl Default for ProjectListQuery {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
            sort_by: ProjectSortKey::LastModifiedAt,
            order: SortOrder::Desc,
        }
    }
}

impl ProjectListQuery {
    pub fn offset(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.limit)
    }
}

fn integer(v: &mut Violations, field: &str, value: Option<&str>, min: u32, max: u32) -> Option<u32> {
    let raw = value?;
    match raw.trim().parse::<u32>() {
        Ok(n) if (min..=max).contains(&n) => Some(n),
        _ => {
            v.push(field, format!("must be an integer between {min} and {max}"));
            None
        }
    }
}

pub fn validate_list_query(dto: &ListQueryDto) -> ServiceResult<ProjectListQuery> {
    let mut v = Violations::new();
    let defaults = ProjectListQuery::default();

    let query = ProjectListQuery {
        page: integer(&mut v, "page", dto.page.as_deref(), 1, u32::MAX).unwrap_or(defaults.page),
        limit: integer(&mut v, "limit", dto.limit.as_deref(), 1, MAX_LIMIT)
            .unwrap_or(defaults.limit),
        sort_by: choice(
            &mut v,
            "sortBy",
            dto.sort_by.as_deref(),
            false,
            ProjectSortKey::parse,
            ProjectSortKey::VALUES,
        )
        .unwrap_or(defaults.sort_by),
        order: choice(
            &mut v,
            "order",
            dto.order.as_deref(),
            false,
            SortOrder::parse,
            SortOrder::VALUES,
        )
        .unwrap_or(defaults.order),
    };

    v.finish(query)
}
