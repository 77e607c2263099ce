use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// A bounded window request over an ordered collection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    /// Zero-based page index
    pub page: usize,

    /// Number of items per page
    pub size: usize,

    /// Optional sort override; stores fall back to their default order
    pub sort: Option<Sort>,
}

impl PageRequest {
    pub fn new(page: usize, size: usize) -> Self {
        Self {
            page,
            size,
            sort: None,
        }
    }

    pub fn with_sort(mut self, sort: Sort) -> Self {
        self.sort = Some(sort);
        self
    }

    /// Item offset of the first element of this page
    pub fn offset(&self) -> usize {
        self.page.saturating_mul(self.size)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(0, 20)
    }
}

/// One page of results plus total-count metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    /// Items within the requested window
    pub items: Vec<T>,

    /// Total number of items across all pages
    pub total_count: usize,

    /// Zero-based page index this window corresponds to
    pub page: usize,

    /// Requested page size
    pub size: usize,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total_count: usize, request: &PageRequest) -> Self {
        Self {
            items,
            total_count,
            page: request.page,
            size: request.size,
        }
    }

    /// Index of the last page for this total count and page size
    pub fn last_page(&self) -> usize {
        if self.size == 0 || self.total_count == 0 {
            0
        } else {
            (self.total_count - 1) / self.size
        }
    }

    /// Convert the item type, keeping the page metadata
    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total_count: self.total_count,
            page: self.page,
            size: self.size,
        }
    }

    /// Convert items with a fallible function, keeping the page metadata
    pub fn try_map<U, E, F: FnMut(T) -> Result<U, E>>(self, f: F) -> Result<Page<U>, E> {
        Ok(Page {
            items: self
                .items
                .into_iter()
                .map(f)
                .collect::<Result<Vec<_>, E>>()?,
            total_count: self.total_count,
            page: self.page,
            size: self.size,
        })
    }
}

/// Sortable record fields. Whitelisted so SQL backends never interpolate
/// client input into ORDER BY clauses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Timestamp,
    Systolic,
    Diastolic,
    Id,
}

impl SortField {
    /// Column name for SQL backends
    pub fn column(self) -> &'static str {
        match self {
            SortField::Timestamp => "timestamp",
            SortField::Systolic => "systolic",
            SortField::Diastolic => "diastolic",
            SortField::Id => "id",
        }
    }
}

/// Sort specification in `field,asc|desc` form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sort {
    pub field: SortField,
    pub ascending: bool,
}

impl Sort {
    pub fn ascending(field: SortField) -> Self {
        Self {
            field,
            ascending: true,
        }
    }

    pub fn descending(field: SortField) -> Self {
        Self {
            field,
            ascending: false,
        }
    }
}

/// Error for unparseable sort specifications
#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid sort specification: {0}")]
pub struct InvalidSort(pub String);

impl FromStr for Sort {
    type Err = InvalidSort;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (field, direction) = match s.split_once(',') {
            Some((field, direction)) => (field.trim(), direction.trim()),
            None => (s.trim(), "asc"),
        };

        let field = match field {
            "timestamp" => SortField::Timestamp,
            "systolic" => SortField::Systolic,
            "diastolic" => SortField::Diastolic,
            "id" => SortField::Id,
            _ => return Err(InvalidSort(s.to_string())),
        };

        let ascending = match direction {
            "asc" => true,
            "desc" => false,
            _ => return Err(InvalidSort(s.to_string())),
        };

        Ok(Sort { field, ascending })
    }
}
