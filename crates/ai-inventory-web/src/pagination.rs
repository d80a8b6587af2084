//! Page/size handling shared by both use-case endpoints

use crate::error::{ApiError, ApiResult};

/// Parse an optional integer query parameter
///
/// Absent means `default`; present but not an integer (including empty) is an error.
pub fn parse_int(name: &'static str, raw: Option<&str>, default: i64) -> ApiResult<i64> {
    match raw {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse::<i64>()
            .map_err(|_| ApiError::InvalidInteger {
                name,
                value: value.to_string(),
            }),
    }
}

/// Page window
///
/// Any `per_page` is accepted here; windows of size zero or less are empty.
/// Use [`Pagination::positive`] where a page count must be derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// 1-based page number; pages below 1 are empty
    pub page: i64,
    pub per_page: i64,
}

impl Pagination {
    pub fn new(page: i64, per_page: i64) -> Self {
        Self { page, per_page }
    }

    /// Window that also reports a page count; `per_page` must be at least 1
    ///
    /// `per_page_name` is the wire name used in error messages.
    pub fn positive(page: i64, per_page: i64, per_page_name: &'static str) -> ApiResult<Self> {
        if per_page < 1 {
            return Err(ApiError::NonPositive {
                name: per_page_name,
                value: per_page,
            });
        }
        Ok(Self::new(page, per_page))
    }

    /// Items `[(page-1)*per_page, (page-1)*per_page + per_page)`, clamped to the list
    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        if self.page < 1 || self.per_page < 1 {
            return &[];
        }
        let Some(start) = (self.page - 1)
            .checked_mul(self.per_page)
            .and_then(|s| usize::try_from(s).ok())
        else {
            return &[];
        };
        let start = start.min(items.len());
        let end = start
            .saturating_add(self.per_page as usize)
            .min(items.len());
        &items[start..end]
    }

    /// `ceil(total / per_page)`, or 0 for an empty window
    pub fn total_pages(&self, total: usize) -> usize {
        match usize::try_from(self.per_page) {
            Ok(per_page) if per_page > 0 => total.div_ceil(per_page),
            _ => 0,
        }
    }
}
