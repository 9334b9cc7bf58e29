//! Modification metadata carried by every mutable aggregate member

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::UserId;

/// Who created a record, who touched it last, and how often it changed
///
/// `created_*` never change after construction. Every mutation goes through
/// [`AuditInfo::touch`], which re-stamps the modification fields and bumps the
/// version used for optimistic concurrency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditInfo {
    pub created_at: DateTime<Utc>,
    pub created_by: UserId,
    pub last_modified_at: DateTime<Utc>,
    pub last_modified_by: UserId,
    pub version: u32,
}

impl AuditInfo {
    pub fn new(user: UserId, now: DateTime<Utc>) -> Self {
        Self {
            created_at: now,
            created_by: user,
            last_modified_at: now,
            last_modified_by: user,
            version: 1,
        }
    }

    pub fn touch(&mut self, user: UserId, now: DateTime<Utc>) {
        self.last_modified_at = now;
        self.last_modified_by = user;
        self.version += 1;
    }
}
