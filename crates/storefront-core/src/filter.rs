//! User-controlled catalog criteria: sort key, price window, and stock flag.
//!
//! A [`FilterSpec`] lives for one view session. It starts at
//! [`FilterSpec::default`], is mutated by user interaction, and returns to the
//! defaults on [`FilterSpec::reset`]. It is never persisted.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Upper bound of the default price window (and of the price slider).
pub const DEFAULT_MAX_PRICE: Decimal = Decimal::ONE_THOUSAND;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FilterError {
    #[error("unknown sort key \"{0}\" (expected featured, price-asc, price-desc, title-asc or title-desc)")]
    UnknownSortKey(String),

    #[error("invalid price range [{min}, {max}]: {reason}")]
    InvalidPriceRange {
        min: Decimal,
        max: Decimal,
        reason: &'static str,
    },
}

/// Ordering applied after filtering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    /// Provider order, untouched.
    #[default]
    Featured,
    PriceAsc,
    PriceDesc,
    TitleAsc,
    TitleDesc,
}

impl SortKey {
    pub const ALL: [SortKey; 5] = [
        SortKey::Featured,
        SortKey::PriceAsc,
        SortKey::PriceDesc,
        SortKey::TitleAsc,
        SortKey::TitleDesc,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SortKey::Featured => "featured",
            SortKey::PriceAsc => "price-asc",
            SortKey::PriceDesc => "price-desc",
            SortKey::TitleAsc => "title-asc",
            SortKey::TitleDesc => "title-desc",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortKey::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| FilterError::UnknownSortKey(s.to_owned()))
    }
}

/// Inclusive price window `[min, max]`.
///
/// [`PriceRange::new`] enforces `0 <= min <= max`. The fields stay public so a
/// caller can still hand the engine an inverted window; the engine treats that
/// as an empty intersection rather than an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: Decimal,
    pub max: Decimal,
}

impl PriceRange {
    /// Builds a validated range.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::InvalidPriceRange`] if `min` is negative or
    /// `min > max`.
    pub fn new(min: Decimal, max: Decimal) -> Result<Self, FilterError> {
        if min < Decimal::ZERO {
            return Err(FilterError::InvalidPriceRange {
                min,
                max,
                reason: "minimum must not be negative",
            });
        }
        if min > max {
            return Err(FilterError::InvalidPriceRange {
                min,
                max,
                reason: "minimum exceeds maximum",
            });
        }
        Ok(Self { min, max })
    }

    /// A window that admits every non-negative price.
    #[must_use]
    pub fn unbounded() -> Self {
        Self {
            min: Decimal::ZERO,
            max: Decimal::MAX,
        }
    }

    #[must_use]
    pub fn contains(&self, price: Decimal) -> bool {
        price >= self.min && price <= self.max
    }
}

impl Default for PriceRange {
    fn default() -> Self {
        Self {
            min: Decimal::ZERO,
            max: DEFAULT_MAX_PRICE,
        }
    }
}

/// Catalog filter and sort criteria for one view session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSpec {
    pub sort_key: SortKey,
    pub price_range: PriceRange,
    pub only_in_stock: bool,
}

impl FilterSpec {
    /// A filter that excludes nothing and keeps provider order.
    #[must_use]
    pub fn identity() -> Self {
        Self {
            sort_key: SortKey::Featured,
            price_range: PriceRange::unbounded(),
            only_in_stock: false,
        }
    }

    /// Restores the session defaults (`featured`, `[0, 1000]`, all stock).
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Sets the price window the way the storefront slider does: negative
    /// bounds are raised to zero and swapped bounds are reordered.
    pub fn clamp_price_range(&mut self, min: Decimal, max: Decimal) {
        let min = min.max(Decimal::ZERO);
        let max = max.max(Decimal::ZERO);
        self.price_range = PriceRange {
            min: min.min(max),
            max: min.max(max),
        };
    }

    /// `true` when the user has narrowed the catalog beyond the defaults.
    /// The sort key does not count as a filter.
    #[must_use]
    pub fn has_active_filters(&self) -> bool {
        let default = PriceRange::default();
        self.price_range.min > default.min
            || self.price_range.max < default.max
            || self.only_in_stock
    }
}
