//! Query state driving view derivation.

use serde::{Deserialize, Serialize};

/// Ordering applied to a derived view.
///
/// Wire values match the sort selector: `ascending`, `descending`,
/// `timeAscending`, `timeDescending`. Any other value decodes as
/// [`SortOrder::Unrecognized`], which keeps the filtered order untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortOrder {
    /// Name, locale-style ascending.
    #[default]
    #[serde(rename = "ascending")]
    NameAscending,
    /// Name, locale-style descending.
    #[serde(rename = "descending")]
    NameDescending,
    /// `createdTime`, earliest first.
    #[serde(rename = "timeAscending")]
    TimeAscending,
    /// `createdTime`, latest first.
    #[serde(rename = "timeDescending")]
    TimeDescending,
    /// Selector value outside the known set; no reordering.
    #[serde(rename = "unrecognized")]
    #[serde(other)]
    Unrecognized,
}

impl SortOrder {
    /// All selectable orders, in selector display order.
    pub const SELECTABLE: [SortOrder; 4] = [
        SortOrder::NameAscending,
        SortOrder::NameDescending,
        SortOrder::TimeAscending,
        SortOrder::TimeDescending,
    ];

    /// Maps a raw selector value; unknown values map to `Unrecognized`.
    pub fn from_wire(value: &str) -> Self {
        match value.trim() {
            "ascending" => Self::NameAscending,
            "descending" => Self::NameDescending,
            "timeAscending" => Self::TimeAscending,
            "timeDescending" => Self::TimeDescending,
            _ => Self::Unrecognized,
        }
    }

    pub fn as_wire(self) -> &'static str {
        match self {
            Self::NameAscending => "ascending",
            Self::NameDescending => "descending",
            Self::TimeAscending => "timeAscending",
            Self::TimeDescending => "timeDescending",
            Self::Unrecognized => "unrecognized",
        }
    }

    /// Same key, opposite direction.
    pub fn reversed(self) -> Self {
        match self {
            Self::NameAscending => Self::NameDescending,
            Self::NameDescending => Self::NameAscending,
            Self::TimeAscending => Self::TimeDescending,
            Self::TimeDescending => Self::TimeAscending,
            Self::Unrecognized => Self::Unrecognized,
        }
    }
}

/// Search term and sort order pair.
///
/// Created with defaults (empty term, name ascending) and never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryState {
    pub search_term: String,
    pub sort_order: SortOrder,
}

impl QueryState {
    pub fn new(search_term: impl Into<String>, sort_order: SortOrder) -> Self {
        Self {
            search_term: search_term.into(),
            sort_order,
        }
    }
}
