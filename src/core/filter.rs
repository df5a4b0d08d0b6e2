//! Category filter masks
//!
//! A category filter is a plain bitmask. Bit patterns are owned by the
//! application (see [`crate::tags`]); the engine only composes them.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, Not};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryFilter(u32);

impl CategoryFilter {
    /// Never output
    pub const NONE: CategoryFilter = CategoryFilter(0);
    /// Always output
    pub const ALL: CategoryFilter = CategoryFilter(u32::MAX);
    /// Filter a fresh channel starts with before its policy runs
    pub const DEFAULT: CategoryFilter = Self::ALL;

    #[inline]
    pub const fn from_bits(bits: u32) -> Self {
        CategoryFilter(bits)
    }

    #[inline]
    pub const fn bits(self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// True if any bit of `other` is also set in `self`
    #[inline]
    pub const fn intersects(self, other: CategoryFilter) -> bool {
        self.0 & other.0 != 0
    }

    /// `self | other`
    #[inline]
    #[must_use]
    pub const fn with(self, other: CategoryFilter) -> Self {
        CategoryFilter(self.0 | other.0)
    }

    /// `self & !other`
    #[inline]
    #[must_use]
    pub const fn without(self, other: CategoryFilter) -> Self {
        CategoryFilter(self.0 & !other.0)
    }
}

impl Default for CategoryFilter {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl From<u32> for CategoryFilter {
    fn from(bits: u32) -> Self {
        CategoryFilter(bits)
    }
}

impl From<CategoryFilter> for u32 {
    fn from(filter: CategoryFilter) -> Self {
        filter.0
    }
}

impl BitOr for CategoryFilter {
    type Output = CategoryFilter;

    fn bitor(self, rhs: CategoryFilter) -> CategoryFilter {
        self.with(rhs)
    }
}

impl BitOrAssign for CategoryFilter {
    fn bitor_assign(&mut self, rhs: CategoryFilter) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for CategoryFilter {
    type Output = CategoryFilter;

    fn bitand(self, rhs: CategoryFilter) -> CategoryFilter {
        CategoryFilter(self.0 & rhs.0)
    }
}

impl BitAndAssign for CategoryFilter {
    fn bitand_assign(&mut self, rhs: CategoryFilter) {
        self.0 &= rhs.0;
    }
}

impl Not for CategoryFilter {
    type Output = CategoryFilter;

    fn not(self) -> CategoryFilter {
        CategoryFilter(!self.0)
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::NONE => write!(f, "NONE"),
            Self::ALL => write!(f, "ALL"),
            CategoryFilter(bits) => write!(f, "{:#010x}", bits),
        }
    }
}
