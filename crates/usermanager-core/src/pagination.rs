//! Page-based pagination for list endpoints.
//!
//! Clients pass `page` (1-indexed) and `size` as query parameters:
//!
//! ```text
//! GET /api/users?page=2&size=20
//! ```
//!
//! Unlike a clamping strategy, out-of-range values are rejected with a
//! validation error so callers learn about the mistake:
//!
//! - `page` must be at least 1 (default: 1)
//! - `size` must be between 1 and [`MAX_PAGE_SIZE`] (default: [`DEFAULT_PAGE_SIZE`])

use serde::{Deserialize, Deserializer, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::envelope::FieldError;
use crate::errors::AppError;

pub const DEFAULT_PAGE_SIZE: i64 = 10;
pub const MAX_PAGE_SIZE: i64 = 100;

/// Deserializes an optional string into an optional i64.
///
/// Query parameters may arrive as empty strings (`?page=`), which are
/// treated as absent.
fn deserialize_optional_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if s.is_empty() => Ok(None),
        Some(s) => s.parse::<i64>().map(Some).map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

/// Query parameters for paginated listings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PaginationQuery {
    /// Page number (1-indexed, default: 1)
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub page: Option<i64>,
    /// Items per page (1-100, default: 10)
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub size: Option<i64>,
}

/// Validated page window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub page: i64,
    pub size: i64,
}

impl Page {
    /// Number of rows to skip. Saturates instead of overflowing; pages
    /// produced by [`PaginationQuery::validate`] never reach the limit.
    #[must_use]
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.size)
    }
}

impl PaginationQuery {
    pub fn new(page: i64, size: i64) -> Self {
        Self {
            page: Some(page),
            size: Some(size),
        }
    }

    /// Applies defaults and checks bounds.
    pub fn validate(&self) -> Result<Page, AppError> {
        let page = self.page.unwrap_or(1);
        let size = self.size.unwrap_or(DEFAULT_PAGE_SIZE);

        let mut details = Vec::new();
        if page < 1 {
            details.push(FieldError::new("page", "Page must be greater than or equal to 1"));
        }
        if size < 1 {
            details.push(FieldError::new("size", "Size must be greater than 0"));
        } else if size > MAX_PAGE_SIZE {
            details.push(FieldError::new(
                "size",
                format!("Size must not exceed {}", MAX_PAGE_SIZE),
            ));
        }

        if details.is_empty() && (page - 1).checked_mul(size).is_none() {
            details.push(FieldError::new("page", "Page is out of range"));
        }

        if details.is_empty() {
            Ok(Page { page, size })
        } else {
            Err(AppError::validation(details))
        }
    }
}

/// One page of results together with totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PaginatedResponse<T> {
    pub items: Vec<T>,
    /// Total number of items across all pages
    pub total: i64,
    pub page: i64,
    pub size: i64,
    pub total_pages: i64,
}

impl<T> PaginatedResponse<T> {
    pub fn new(items: Vec<T>, total: i64, page: Page) -> Self {
        let total_pages = if total == 0 {
            0
        } else {
            (total + page.size - 1) / page.size
        };

        Self {
            items,
            total,
            page: page.page,
            size: page.size,
            total_pages,
        }
    }

    /// Whether there are more items after this page.
    #[must_use]
    pub fn has_more(&self) -> bool {
        self.page < self.total_pages
    }
}
