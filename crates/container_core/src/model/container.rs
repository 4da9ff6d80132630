//! Container record model.
//!
//! # Responsibility
//! - Mirror the container record shape delivered by the remote listing.
//! - Provide the single well-formedness rule used by ingestion and views.
//! - Parse `createdTime` into a comparable instant.
//!
//! # Invariants
//! - Every field is optional on the wire, and a row that does not decode
//!   as a record is skipped; a malformed row never fails the whole payload.
//! - `validate()` is the only definition of a usable record.

use log::warn;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, OffsetDateTime, PrimitiveDateTime, Time};

/// One container as listed for the current user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainerRecord {
    /// Display name; required for matching and sorting.
    pub name: Option<String>,
    /// Serialized as `type` (runtime/IDE tag, e.g. `java`).
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub description: Option<String>,
    /// ISO-8601 creation timestamp.
    pub created_time: Option<String>,
    /// ISO-8601 last modification timestamp.
    pub last_modified_time: Option<String>,
    /// Nickname of the user who last edited the container.
    pub edit_user_nickname: Option<String>,
}

/// Well-formedness failures for [`ContainerRecord`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerValidationError {
    /// `name` is absent or null.
    MissingName,
    /// `name` is present but empty.
    EmptyName,
}

impl Display for ContainerValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingName => write!(f, "container name is missing"),
            Self::EmptyName => write!(f, "container name is empty"),
        }
    }
}

impl Error for ContainerValidationError {}

impl ContainerRecord {
    /// Creates a record with only a name set.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Returns a copy with `createdTime` replaced.
    pub fn with_created_time(mut self, created_time: impl Into<String>) -> Self {
        self.created_time = Some(created_time.into());
        self
    }

    /// Checks the well-formedness rule shared by ingestion and derivation.
    pub fn validate(&self) -> Result<(), ContainerValidationError> {
        match self.name.as_deref() {
            None => Err(ContainerValidationError::MissingName),
            Some("") => Err(ContainerValidationError::EmptyName),
            Some(_) => Ok(()),
        }
    }

    /// Returns the name when this record is usable for matching/sorting.
    pub fn usable_name(&self) -> Option<&str> {
        match self.validate() {
            Ok(()) => self.name.as_deref(),
            Err(_) => None,
        }
    }

    /// Parses `createdTime`; `None` when absent or unparseable.
    pub fn created_instant(&self) -> Option<OffsetDateTime> {
        self.created_time.as_deref().and_then(parse_timestamp)
    }
}

/// Parses an ISO-8601 timestamp as delivered by the container listing.
///
/// Accepted forms, tried in order:
/// - RFC 3339 with offset (`2023-01-02T00:00:00Z`, `...+09:00`).
/// - Local date-time without offset, seconds and fraction optional
///   (`2023-01-02T10:20`, `2023-01-02T10:20:30.123`), read as UTC.
/// - Calendar date only (`2023-01-02`), read as midnight UTC.
pub fn parse_timestamp(value: &str) -> Option<OffsetDateTime> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(parsed) = OffsetDateTime::parse(trimmed, &Rfc3339) {
        return Some(parsed);
    }

    let local = format_description!(
        "[year]-[month]-[day]T[hour]:[minute][optional [:[second][optional [.[subsecond]]]]]"
    );
    if let Ok(parsed) = PrimitiveDateTime::parse(trimmed, local) {
        return Some(parsed.assume_utc());
    }

    let date_only = format_description!("[year]-[month]-[day]");
    Date::parse(trimmed, date_only)
        .ok()
        .map(|date| date.with_time(Time::MIDNIGHT).assume_utc())
}

/// Which of the two disjoint listings a record belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    /// Containers owned by the viewer.
    Owned,
    /// Containers other users shared with the viewer.
    Shared,
}

impl Collection {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Owned => "owned",
            Self::Shared => "shared",
        }
    }
}

/// Load boundary payload: both listings in one response.
///
/// Missing or `null` arrays decode as empty listings. Elements that do not
/// decode as a record (`null`, wrong field types) are skipped one by one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerPayload {
    #[serde(rename = "ownContainers", default, deserialize_with = "owned_records")]
    pub owned: Vec<ContainerRecord>,
    #[serde(
        rename = "sharedContainers",
        default,
        deserialize_with = "shared_records"
    )]
    pub shared: Vec<ContainerRecord>,
}

impl ContainerPayload {
    pub fn new(owned: Vec<ContainerRecord>, shared: Vec<ContainerRecord>) -> Self {
        Self { owned, shared }
    }

    /// Returns the listing for one collection.
    pub fn records(&self, collection: Collection) -> &[ContainerRecord] {
        match collection {
            Collection::Owned => &self.owned,
            Collection::Shared => &self.shared,
        }
    }
}

fn owned_records<'de, D>(deserializer: D) -> Result<Vec<ContainerRecord>, D::Error>
where
    D: Deserializer<'de>,
{
    lenient_records(deserializer, Collection::Owned)
}

fn shared_records<'de, D>(deserializer: D) -> Result<Vec<ContainerRecord>, D::Error>
where
    D: Deserializer<'de>,
{
    lenient_records(deserializer, Collection::Shared)
}

fn lenient_records<'de, D>(
    deserializer: D,
    collection: Collection,
) -> Result<Vec<ContainerRecord>, D::Error>
where
    D: Deserializer<'de>,
{
    let rows = Option::<Vec<Value>>::deserialize(deserializer)?.unwrap_or_default();
    let received = rows.len();
    let records = rows
        .into_iter()
        .filter_map(|row| ContainerRecord::deserialize(row).ok())
        .collect::<Vec<_>>();

    let skipped = received - records.len();
    if skipped > 0 {
        warn!(
            "event=containers_decode module=model status=partial collection={} skipped={} kept={}",
            collection.as_str(),
            skipped,
            records.len()
        );
    }
    Ok(records)
}
