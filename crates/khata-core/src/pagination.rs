//! # Pagination
//!
//! Splits a document's table rows across fixed-size pages.
//!
//! ## Page Geometry
//! ```text
//! ┌──────────────────────────────┐  ─┬─
//! │          margin              │   │
//! │  ┌────────────────────────┐  │   │
//! │  │ header (full / cont.)  │  │   │
//! │  ├────────────────────────┤  │   │
//! │  │ row                    │  │   │
//! │  │ row        × max_rows  │  │  page_height
//! │  │ row                    │  │   │
//! │  ├────────────────────────┤  │   │
//! │  │ footer (full / cont.)  │  │   │
//! │  └────────────────────────┘  │   │
//! │          margin              │   │
//! └──────────────────────────────┘  ─┴─
//! ```
//!
//! Header and footer space is reserved on every page, whichever variant is
//! printed, so every page holds the same number of rows.
//!
//! ## Guarantees
//! - At least one page, even for zero rows
//! - Every row lands on exactly one page, in order
//! - No page holds more than `max_rows_per_page` rows

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::PaginationError;

// =============================================================================
// Configuration
// =============================================================================

/// Physical page layout, all values in millimetres.
///
/// The core applies no defaults; the calling application supplies values
/// matching its paper size (see [`PaginationConfig::a4_portrait`]).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PaginationConfig {
    pub page_height: f64,
    pub page_width: f64,
    pub margin: f64,
    pub estimated_header_height: f64,
    pub estimated_footer_height: f64,
    pub estimated_row_height: f64,
}

impl PaginationConfig {
    /// A4 portrait with room for 18 rows per page.
    pub const fn a4_portrait() -> Self {
        PaginationConfig {
            page_height: 297.0,
            page_width: 210.0,
            margin: 10.0,
            estimated_header_height: 70.0,
            estimated_footer_height: 60.0,
            estimated_row_height: 8.0,
        }
    }

    /// Checks that every dimension is a finite, positive number.
    pub fn validate(&self) -> Result<(), PaginationError> {
        let fields = [
            ("page_height", self.page_height),
            ("page_width", self.page_width),
            ("margin", self.margin),
            ("estimated_header_height", self.estimated_header_height),
            ("estimated_footer_height", self.estimated_footer_height),
            ("estimated_row_height", self.estimated_row_height),
        ];

        for (field, value) in fields {
            if !value.is_finite() || value <= 0.0 {
                return Err(PaginationError::NonPositive { field, value });
            }
        }

        Ok(())
    }

    /// Height left for table rows after margins, header and footer.
    pub fn row_area_height(&self) -> f64 {
        self.page_height
            - 2.0 * self.margin
            - self.estimated_header_height
            - self.estimated_footer_height
    }

    /// How many rows fit on one page.
    ///
    /// ## Errors
    /// - [`PaginationError::NonPositive`] for a bad dimension
    /// - [`PaginationError::InvalidPaginationConfig`] when not even one
    ///   row fits
    ///
    /// ## Example
    /// ```rust
    /// use khata_core::pagination::PaginationConfig;
    ///
    /// // (297 - 20 - 70 - 60) / 8 = 18.375 → 18
    /// assert_eq!(PaginationConfig::a4_portrait().max_rows_per_page().unwrap(), 18);
    /// ```
    pub fn max_rows_per_page(&self) -> Result<usize, PaginationError> {
        self.validate()?;

        let available = self.row_area_height();
        let rows = (available / self.estimated_row_height).floor();
        if rows < 1.0 {
            return Err(PaginationError::InvalidPaginationConfig {
                available_mm: available,
                row_height_mm: self.estimated_row_height,
            });
        }

        Ok(rows as usize)
    }
}

// =============================================================================
// Pages
// =============================================================================

/// Which header or footer template a page uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum BlockVariant {
    /// Complete block: parties on the first page, totals on the last.
    Full,
    /// Condensed "continued" block.
    Continuation,
}

/// One page of a paginated document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    /// 1-based.
    pub page_number: usize,
    pub total_pages: usize,
    pub is_first: bool,
    pub is_last: bool,
    pub header_variant: BlockVariant,
    pub footer_variant: BlockVariant,
    pub rows: Vec<T>,
}

impl<T> Page<T> {
    /// Converts the rows while keeping the page's position and variants.
    pub fn map_rows<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            page_number: self.page_number,
            total_pages: self.total_pages,
            is_first: self.is_first,
            is_last: self.is_last,
            header_variant: self.header_variant,
            footer_variant: self.footer_variant,
            rows: self.rows.into_iter().map(f).collect(),
        }
    }
}

// =============================================================================
// Paginate
// =============================================================================

/// Splits `rows` into pages sized by `config`.
///
/// ## Example
/// ```rust
/// use khata_core::pagination::{paginate, BlockVariant, PaginationConfig};
///
/// let rows: Vec<u32> = (0..40).collect();
/// let pages = paginate(&rows, &PaginationConfig::a4_portrait()).unwrap();
///
/// assert_eq!(pages.len(), 3); // 18 + 18 + 4
/// assert_eq!(pages[0].header_variant, BlockVariant::Full);
/// assert_eq!(pages[2].footer_variant, BlockVariant::Full);
/// ```
pub fn paginate<T: Clone>(rows: &[T], config: &PaginationConfig) -> Result<Vec<Page<T>>, PaginationError> {
    let max_rows = config.max_rows_per_page()?;
    paginate_with_limit(rows, max_rows)
}

/// Splits `rows` into pages of at most `max_rows_per_page` rows.
///
/// `0` is rejected with [`PaginationError::InvalidPaginationConfig`].
pub fn paginate_with_limit<T: Clone>(rows: &[T], max_rows_per_page: usize) -> Result<Vec<Page<T>>, PaginationError> {
    if max_rows_per_page == 0 {
        return Err(PaginationError::InvalidPaginationConfig {
            available_mm: 0.0,
            row_height_mm: 0.0,
        });
    }

    let total_pages = page_count(rows.len(), max_rows_per_page);

    let pages = (0..total_pages)
        .map(|index| {
            let start = index * max_rows_per_page;
            let end = usize::min(start + max_rows_per_page, rows.len());
            let is_first = index == 0;
            let is_last = index + 1 == total_pages;

            Page {
                page_number: index + 1,
                total_pages,
                is_first,
                is_last,
                header_variant: if is_first { BlockVariant::Full } else { BlockVariant::Continuation },
                footer_variant: if is_last { BlockVariant::Full } else { BlockVariant::Continuation },
                rows: rows[start..end].to_vec(),
            }
        })
        .collect();

    Ok(pages)
}

// `max(1, ceil(row_count / max_rows_per_page))`; callers reject a zero limit first
#[inline]
fn page_count(row_count: usize, max_rows_per_page: usize) -> usize {
    row_count.div_ceil(max_rows_per_page).max(1)
}

// =============================================================================
// Unit Tests
// =============================================================================
