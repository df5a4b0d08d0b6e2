//! Serde-backed channel configuration
//!
//! ```json
//! {
//!   "log_path": "game.log",
//!   "max_message_len": 200,
//!   "channels": {
//!     "Trace":  { "filter": ["GFX", "IO"], "level": "3" },
//!     "StdErr": { "filter": 128, "level": 2 }
//!   }
//! }
//! ```
//!
//! Filters are either raw bits or a list of category names; levels are a
//! number (that level and lower) or a level token such as `"2only"` or `"Max"`.

use crate::channels::ChannelSet;
use crate::core::{CategoryFilter, LevelSelection, OutputError, Result};
use crate::tags::TagTable;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub log_path: Option<PathBuf>,
    pub max_message_len: Option<usize>,
    pub channels: BTreeMap<String, ChannelConfig>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChannelConfig {
    pub filter: Option<FilterSpec>,
    pub level: Option<LevelSpec>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterSpec {
    Bits(u32),
    Names(Vec<String>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LevelSpec {
    Number(i64),
    Name(String),
}

impl OutputConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            OutputError::io_operation(
                "reading output config",
                format!("cannot read '{}'", path.display()),
                e,
            )
        })?;
        Self::from_json_str(&text)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl FilterSpec {
    pub fn resolve(&self, tags: &TagTable) -> Result<CategoryFilter> {
        match self {
            FilterSpec::Bits(bits) => Ok(CategoryFilter::from_bits(*bits)),
            FilterSpec::Names(names) => names.iter().try_fold(CategoryFilter::NONE, |acc, name| {
                tags.category_named(name).map(|bits| acc | bits).ok_or_else(|| {
                    OutputError::config("filter", format!("unknown category '{}'", name))
                })
            }),
        }
    }
}

impl LevelSpec {
    pub fn resolve(&self, tags: &TagTable) -> Result<LevelSelection> {
        match self {
            LevelSpec::Number(level) => LevelSelection::up_to(*level),
            LevelSpec::Name(name) => tags.level_named(name).ok_or_else(|| {
                OutputError::config("level", format!("unknown level token '{}'", name))
            }),
        }
    }
}

impl ChannelSet {
    /// Build a set from a config: path and length first, then per-channel masks
    pub fn from_config(config: &OutputConfig) -> Result<Self> {
        let mut builder = ChannelSet::builder();
        if let Some(path) = &config.log_path {
            builder = builder.log_path(path);
        }
        if let Some(len) = config.max_message_len {
            builder = builder.max_message_len(len);
        }
        let set = builder.build()?;
        set.apply_config(config)?;
        Ok(set)
    }

    /// Apply each channel's filter and level. Everything is resolved before
    /// any channel changes, so a bad entry leaves every mask as it was.
    pub fn apply_config(&self, config: &OutputConfig) -> Result<()> {
        let mut resolved = Vec::with_capacity(config.channels.len());
        for (name, channel_config) in &config.channels {
            let channel = self
                .channel(name)
                .ok_or_else(|| OutputError::unknown_channel(name.clone()))?;
            let filter = channel_config
                .filter
                .as_ref()
                .map(|spec| spec.resolve(self.tags()))
                .transpose()?;
            let level = channel_config
                .level
                .as_ref()
                .map(|spec| spec.resolve(self.tags()))
                .transpose()?;
            resolved.push((channel, filter, level));
        }

        for (channel, filter, level) in resolved {
            if let Some(filter) = filter {
                channel.set_filter(filter);
            }
            if let Some(level) = level {
                channel.set_level(level);
            }
        }
        Ok(())
    }
}
