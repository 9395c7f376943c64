use async_trait::async_trait;
use serde::Serialize;

use quizboard_types::errors::ApplicationError;

/// A zero-based page of `limit` rows.
///
/// Offsets are not clamped: keeping `page` and `limit` non-negative is up to
/// whoever builds the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageWindow {
    pub page: i64,
    pub limit: i64,
}

impl PageWindow {
    pub fn new(page: i64, limit: i64) -> Self {
        Self { page, limit }
    }

    /// Like `new`, but `None` unless both values are non-negative and the
    /// next page's offset fits in an `i64`.
    pub fn checked(page: i64, limit: i64) -> Option<Self> {
        if page < 0 || limit < 0 {
            return None;
        }
        page.checked_add(1)?.checked_mul(limit)?;
        Some(Self::new(page, limit))
    }

    pub fn offset(&self) -> i64 {
        self.page * self.limit
    }

    /// Position of the first row of the following page.
    pub fn next_page_offset(&self) -> i64 {
        (self.page + 1) * self.limit
    }
}

/// An ordered listing that can tell whether a row exists at a position.
///
/// Implementors must use the same ordering and filter semantics as the
/// listing's page query, otherwise page boundaries drift apart.
#[async_trait]
pub trait PositionProbe<F: Sync + ?Sized>: Send + Sync {
    async fn exists_at(&self, filter: &F, position: i64) -> Result<bool, ApplicationError>;
}

/// Answers "is there a next page?" with a single lookahead probe instead of
/// counting the filtered listing.
pub struct PaginationOracle;

impl PaginationOracle {
    pub async fn has_next<F, P>(
        probe: &P,
        filter: &F,
        window: PageWindow,
    ) -> Result<bool, ApplicationError>
    where
        F: Sync + ?Sized,
        P: PositionProbe<F> + ?Sized,
    {
        probe.exists_at(filter, window.next_page_offset()).await
    }
}
