use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

pub const DEFAULT_PAGE_SIZE: u32 = 15;
pub const MAX_PAGE_SIZE: u32 = 100;

/// Sort order for the pending-approval listing.
///
/// Wire values follow the query-string convention the dashboards send:
/// `-createdAt`, `createdAt`, `name`, `-name`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    NewestFirst,
    OldestFirst,
    NameAsc,
    NameDesc,
}

#[derive(Debug, Error, PartialEq)]
#[error("Unknown sort key: {0}")]
pub struct SortKeyError(pub String);

impl FromStr for SortKey {
    type Err = SortKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "-createdAt" => Ok(SortKey::NewestFirst),
            "createdAt" => Ok(SortKey::OldestFirst),
            "name" => Ok(SortKey::NameAsc),
            "-name" => Ok(SortKey::NameDesc),
            other => Err(SortKeyError(other.to_string())),
        }
    }
}

/// Validated listing parameters. Page numbers are 1-based.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingQuery {
    page: u32,
    limit: u32,
    pub sort: SortKey,
    pub search: Option<String>,
}

impl PendingQuery {
    pub fn new(page: u32, limit: u32, sort: SortKey, search: Option<String>) -> Self {
        let search = search
            .map(|term| term.trim().to_lowercase())
            .filter(|term| !term.is_empty());

        Self {
            page: page.max(1),
            limit: limit.clamp(1, MAX_PAGE_SIZE),
            sort,
            search,
        }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    pub fn offset(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.limit)
    }
}

impl Default for PendingQuery {
    fn default() -> Self {
        Self::new(1, DEFAULT_PAGE_SIZE, SortKey::default(), None)
    }
}

/// One page of results with the total count across all pages.
///
/// `total` is computed against the full filtered set, so it is stable no
/// matter which page or page size was requested.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
}

impl<T> Page<T> {
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            total: 0,
        }
    }
}
