//! The pass/suppress decision shared by every channel

use super::filter::CategoryFilter;
use super::level::{LevelSelection, LevelTag};

/// Decide whether a message tagged `category`/`level` gets through a channel
/// whose masks are `filter`/`selection`.
///
/// Both tests are bitwise: a message tagged with several categories passes if
/// any of them is enabled, and an all-zero category tag never passes.
#[inline]
pub const fn passes(
    category: CategoryFilter,
    level: LevelTag,
    filter: CategoryFilter,
    selection: LevelSelection,
) -> bool {
    category.intersects(filter) && selection.includes(level)
}

/// A channel's current masks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Masks {
    pub filter: CategoryFilter,
    pub level: LevelSelection,
}

impl Masks {
    pub const fn new(filter: CategoryFilter, level: LevelSelection) -> Self {
        Self { filter, level }
    }

    #[inline]
    pub const fn passes(&self, category: CategoryFilter, level: LevelTag) -> bool {
        passes(category, level, self.filter, self.level)
    }
}

impl Default for Masks {
    fn default() -> Self {
        Self::new(CategoryFilter::DEFAULT, LevelSelection::DEFAULT)
    }
}
