//! Verbosity level definitions
//!
//! A verbosity level is an integer in `1..=5`. It is used two ways:
//!
//! - as the [`LevelTag`] of a single message: one bit, `1 << (level - 1)`
//! - as the [`LevelSelection`] of a channel: a mask of every level that passes,
//!   normally "this level and all lower" (`(1 << level) - 1`)
//!
//! A message passes when its tag bit is present in the channel's selection.

use super::error::{OutputError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Highest verbosity level
pub const HIGHEST_LEVEL: u8 = 5;

/// A validated level in `1..=5`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct VerbosityLevel(u8);

impl VerbosityLevel {
    pub const L1: VerbosityLevel = VerbosityLevel(1);
    pub const L2: VerbosityLevel = VerbosityLevel(2);
    pub const L3: VerbosityLevel = VerbosityLevel(3);
    pub const L4: VerbosityLevel = VerbosityLevel(4);
    pub const L5: VerbosityLevel = VerbosityLevel(5);

    /// Validate a raw level. Anything outside `1..=5` is a caller bug.
    pub fn new(level: impl Into<i64>) -> Result<Self> {
        let level = level.into();
        if (1..=HIGHEST_LEVEL as i64).contains(&level) {
            Ok(VerbosityLevel(level as u8))
        } else {
            Err(OutputError::level_out_of_range(level))
        }
    }

    #[inline]
    pub const fn get(self) -> u8 {
        self.0
    }

    /// Single-bit tag for a message emitted at this level
    #[inline]
    pub const fn tag(self) -> LevelTag {
        LevelTag(1 << (self.0 - 1))
    }

    /// Selection passing this level and every lower one
    #[inline]
    pub const fn and_lower(self) -> LevelSelection {
        LevelSelection((1 << self.0) - 1)
    }

    /// Selection passing exactly this level
    #[inline]
    pub const fn only(self) -> LevelSelection {
        LevelSelection(1 << (self.0 - 1))
    }
}

impl Default for VerbosityLevel {
    fn default() -> Self {
        Self::L1
    }
}

impl TryFrom<i64> for VerbosityLevel {
    type Error = OutputError;

    fn try_from(level: i64) -> Result<Self> {
        VerbosityLevel::new(level)
    }
}

impl From<VerbosityLevel> for u8 {
    fn from(level: VerbosityLevel) -> Self {
        level.0
    }
}

impl fmt::Display for VerbosityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "L{}", self.0)
    }
}

/// Level bit carried by one message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LevelTag(u32);

impl LevelTag {
    pub const LEVEL1: LevelTag = VerbosityLevel::L1.tag();
    pub const LEVEL2: LevelTag = VerbosityLevel::L2.tag();
    pub const LEVEL3: LevelTag = VerbosityLevel::L3.tag();
    pub const LEVEL4: LevelTag = VerbosityLevel::L4.tag();
    pub const LEVEL5: LevelTag = VerbosityLevel::L5.tag();
    /// Tag used when a call site does not name a level
    pub const DEFAULT: LevelTag = Self::LEVEL1;

    /// Build a tag from a raw level, failing on anything outside `1..=5`
    pub fn new(level: impl Into<i64>) -> Result<Self> {
        VerbosityLevel::new(level).map(VerbosityLevel::tag)
    }

    #[inline]
    pub const fn bits(self) -> u32 {
        self.0
    }
}

impl Default for LevelTag {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for LevelTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "L{}", self.0.trailing_zeros() + 1)
    }
}

/// Set of levels a channel lets through
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LevelSelection(u32);

impl LevelSelection {
    /// Never output
    pub const NONE: LevelSelection = LevelSelection(0);
    /// Output any level
    pub const ALL: LevelSelection = LevelSelection(u32::MAX);
    pub const LEVEL1_AND_LOWER: LevelSelection = VerbosityLevel::L1.and_lower();
    pub const LEVEL2_AND_LOWER: LevelSelection = VerbosityLevel::L2.and_lower();
    pub const LEVEL3_AND_LOWER: LevelSelection = VerbosityLevel::L3.and_lower();
    pub const LEVEL4_AND_LOWER: LevelSelection = VerbosityLevel::L4.and_lower();
    pub const LEVEL5_AND_LOWER: LevelSelection = VerbosityLevel::L5.and_lower();
    /// Selection a fresh channel starts with
    pub const DEFAULT: LevelSelection = Self::LEVEL1_AND_LOWER;

    /// Cumulative selection from a raw level, failing on anything outside `1..=5`
    pub fn up_to(level: impl Into<i64>) -> Result<Self> {
        VerbosityLevel::new(level).map(VerbosityLevel::and_lower)
    }

    /// Single-level selection from a raw level
    pub fn only(level: impl Into<i64>) -> Result<Self> {
        VerbosityLevel::new(level).map(VerbosityLevel::only)
    }

    #[inline]
    pub const fn from_bits(bits: u32) -> Self {
        LevelSelection(bits)
    }

    #[inline]
    pub const fn bits(self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn includes(self, tag: LevelTag) -> bool {
        self.0 & tag.0 != 0
    }
}

impl Default for LevelSelection {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for LevelSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::NONE => write!(f, "NONE"),
            Self::ALL => write!(f, "ALL"),
            LevelSelection(bits) => write!(f, "{:#07b}", bits),
        }
    }
}

/// Anything that names the level of one message
pub trait IntoLevelTag {
    fn into_level_tag(self) -> Result<LevelTag>;
}

/// Anything that names a channel's level selection
///
/// Raw integers and [`VerbosityLevel`] mean "this level and lower".
pub trait IntoLevelSelection {
    fn into_level_selection(self) -> Result<LevelSelection>;
}

impl IntoLevelTag for LevelTag {
    fn into_level_tag(self) -> Result<LevelTag> {
        Ok(self)
    }
}

impl IntoLevelTag for VerbosityLevel {
    fn into_level_tag(self) -> Result<LevelTag> {
        Ok(self.tag())
    }
}

impl IntoLevelSelection for LevelSelection {
    fn into_level_selection(self) -> Result<LevelSelection> {
        Ok(self)
    }
}

impl IntoLevelSelection for VerbosityLevel {
    fn into_level_selection(self) -> Result<LevelSelection> {
        Ok(self.and_lower())
    }
}

macro_rules! raw_level_conversions {
    ($($ty:ty),*) => {$(
        impl IntoLevelTag for $ty {
            fn into_level_tag(self) -> Result<LevelTag> {
                let level = i64::try_from(self).unwrap_or(i64::MAX);
                LevelTag::new(level)
            }
        }

        impl IntoLevelSelection for $ty {
            fn into_level_selection(self) -> Result<LevelSelection> {
                let level = i64::try_from(self).unwrap_or(i64::MAX);
                LevelSelection::up_to(level)
            }
        }
    )*};
}

raw_level_conversions!(i8, i16, i32, i64, u8, u16, u32, u64, usize);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_bits() {
        assert_eq!(LevelTag::LEVEL1.bits(), 0x01);
        assert_eq!(LevelTag::LEVEL2.bits(), 0x02);
        assert_eq!(LevelTag::LEVEL3.bits(), 0x04);
        assert_eq!(LevelTag::LEVEL4.bits(), 0x08);
        assert_eq!(LevelTag::LEVEL5.bits(), 0x10);
    }

    #[test]
    fn test_selection_bits() {
        assert_eq!(LevelSelection::LEVEL1_AND_LOWER.bits(), 0x01);
        assert_eq!(LevelSelection::LEVEL2_AND_LOWER.bits(), 0x03);
        assert_eq!(LevelSelection::LEVEL3_AND_LOWER.bits(), 0x07);
        assert_eq!(LevelSelection::LEVEL4_AND_LOWER.bits(), 0x0f);
        assert_eq!(LevelSelection::LEVEL5_AND_LOWER.bits(), 0x1f);
        assert_eq!(LevelSelection::only(3).unwrap().bits(), 0x04);
    }

    #[test]
    fn test_out_of_range_fails() {
        for bad in [0i64, 6, -1, 100] {
            assert!(matches!(
                VerbosityLevel::new(bad),
                Err(OutputError::LevelOutOfRange { level }) if level == bad
            ));
            assert!(LevelTag::new(bad).is_err());
            assert!(LevelSelection::up_to(bad).is_err());
        }
        assert!(u64::MAX.into_level_tag().is_err());
        assert!(6u8.into_level_selection().is_err());
    }

    #[test]
    fn test_raw_conversions() {
        assert_eq!(3i32.into_level_tag().unwrap(), LevelTag::LEVEL3);
        assert_eq!(
            3usize.into_level_selection().unwrap(),
            LevelSelection::LEVEL3_AND_LOWER
        );
        assert_eq!(
            VerbosityLevel::L2.into_level_selection().unwrap(),
            LevelSelection::LEVEL2_AND_LOWER
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(VerbosityLevel::L4.to_string(), "L4");
        assert_eq!(LevelTag::LEVEL5.to_string(), "L5");
        assert_eq!(LevelSelection::NONE.to_string(), "NONE");
        assert_eq!(LevelSelection::LEVEL3_AND_LOWER.to_string(), "0b00111");
    }

    #[test]
    fn test_serde() {
        let level: VerbosityLevel = serde_json::from_str("4").unwrap();
        assert_eq!(level, VerbosityLevel::L4);
        assert!(serde_json::from_str::<VerbosityLevel>("9").is_err());
        assert_eq!(serde_json::to_string(&level).unwrap(), "4");
    }
}
