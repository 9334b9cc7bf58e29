//! Row encoding shared by the repositories

use anyhow::{Context, Result};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;

pub(super) fn encode<T: Serialize>(entity: &T) -> Result<String> {
    serde_json::to_string(entity).context("Failed to serialize document")
}

pub(super) fn decode<T: DeserializeOwned>(document: &str) -> Result<T> {
    serde_json::from_str(document).context("Stored document is corrupt")
}

/// Fixed-width UTC timestamp, so text order matches time order
pub(super) fn timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}
