//! Category and level names
//!
//! The engine only composes masks; the bits themselves belong to the
//! application. This module holds the standard category set and the
//! name table the command-line toggler and config loader resolve tokens
//! through.

use crate::core::{CategoryFilter, LevelSelection, VerbosityLevel};

/// Standard application categories
pub mod category {
    use crate::core::CategoryFilter;

    pub const GFX: CategoryFilter = CategoryFilter::from_bits(0x0000_0001);
    pub const SCRIPT: CategoryFilter = CategoryFilter::from_bits(0x0000_0002);
    pub const SOUND: CategoryFilter = CategoryFilter::from_bits(0x0000_0004);
    pub const PHYSICS: CategoryFilter = CategoryFilter::from_bits(0x0000_0008);
    pub const IO: CategoryFilter = CategoryFilter::from_bits(0x0000_0010);
    pub const ANIM: CategoryFilter = CategoryFilter::from_bits(0x0000_0020);
    pub const LUA: CategoryFilter = CategoryFilter::from_bits(0x0000_0040);
    pub const ERROR: CategoryFilter = CategoryFilter::from_bits(0x0000_0080);
}

/// What a name resolves to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tag {
    Category(CategoryFilter),
    Level(LevelSelection),
}

#[derive(Debug, Clone)]
pub struct TagTable {
    entries: Vec<(String, Tag)>,
}

impl TagTable {
    /// A table with only the level tokens; add categories with [`Self::category`]
    pub fn levels_only() -> Self {
        let mut entries = vec![
            ("Off".to_string(), Tag::Level(LevelSelection::NONE)),
            ("Max".to_string(), Tag::Level(LevelSelection::ALL)),
        ];
        for n in 1..=5u8 {
            let level = match VerbosityLevel::new(n) {
                Ok(level) => level,
                Err(_) => continue,
            };
            entries.push((n.to_string(), Tag::Level(level.and_lower())));
            entries.push((format!("{}only", n), Tag::Level(level.only())));
        }
        Self { entries }
    }

    /// Level tokens plus GFX, SCRIPT, SOUND, PHYSICS, IO, ANIM, LUA and ERROR
    pub fn standard() -> Self {
        Self::levels_only()
            .category("GFX", category::GFX)
            .category("SCRIPT", category::SCRIPT)
            .category("SOUND", category::SOUND)
            .category("PHYSICS", category::PHYSICS)
            .category("IO", category::IO)
            .category("ANIM", category::ANIM)
            .category("LUA", category::LUA)
            .category("ERROR", category::ERROR)
    }

    #[must_use]
    pub fn category(mut self, name: impl Into<String>, bits: CategoryFilter) -> Self {
        self.entries.push((name.into(), Tag::Category(bits)));
        self
    }

    /// Exact, case-insensitive lookup
    pub fn lookup(&self, name: &str) -> Option<Tag> {
        self.entries
            .iter()
            .find(|(entry, _)| entry.eq_ignore_ascii_case(name))
            .map(|(_, tag)| *tag)
    }

    /// Longest entry that `input` starts with, ignoring case, and the
    /// number of bytes it covers
    pub fn match_prefix(&self, input: &str) -> Option<(Tag, usize)> {
        self.entries
            .iter()
            .filter(|(entry, _)| starts_with_ignore_case(input, entry))
            .max_by_key(|(entry, _)| entry.len())
            .map(|(entry, tag)| (*tag, entry.len()))
    }

    /// Category bits for a name, accepting `ALL` and `NONE`
    pub fn category_named(&self, name: &str) -> Option<CategoryFilter> {
        if name.eq_ignore_ascii_case("ALL") {
            return Some(CategoryFilter::ALL);
        }
        if name.eq_ignore_ascii_case("NONE") {
            return Some(CategoryFilter::NONE);
        }
        match self.lookup(name)? {
            Tag::Category(bits) => Some(bits),
            Tag::Level(_) => None,
        }
    }

    /// Level selection for a name such as `3`, `3only`, `Max` or `Off`
    pub fn level_named(&self, name: &str) -> Option<LevelSelection> {
        match self.lookup(name)? {
            Tag::Level(level) => Some(level),
            Tag::Category(_) => None,
        }
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }
}

impl Default for TagTable {
    fn default() -> Self {
        Self::standard()
    }
}

pub(crate) fn starts_with_ignore_case(input: &str, prefix: &str) -> bool {
    input.len() >= prefix.len()
        && input.is_char_boundary(prefix.len())
        && input[..prefix.len()].eq_ignore_ascii_case(prefix)
}
