//! Command-line toggles for channel masks
//!
//! Syntax: `-<Channel><On|Off|Level><Token>`, matched without regard to case.
//!
//! ```text
//! myapp -TraceOnGFX -TraceOnIO -LogLevel3 -StdOutOff -StdErrLevel2only
//! ```
//!
//! `On`/`Off` take a category name and add or remove it; `Level` takes a
//! level token. With no token, `On`/`Off` apply to every category and `Level`
//! selects every level. Text after the longest matching token is ignored, so
//! `-TraceOnGFXdetail` still enables GFX.
//!
//! Arguments that do not parse are skipped. Toggles aimed at a channel that
//! is compiled out of the build are accepted and have no effect.

use crate::channels::ChannelSet;
use crate::core::{CategoryFilter, ChannelControl, LevelSelection};
use crate::tags::{starts_with_ignore_case, Tag, TagTable};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleAction {
    On(CategoryFilter),
    Off(CategoryFilter),
    Level(LevelSelection),
}

/// One parsed argument
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toggle {
    pub channel: String,
    pub action: ToggleAction,
}

impl Toggle {
    pub fn apply(&self, channel: &dyn ChannelControl) {
        match self.action {
            ToggleAction::On(filter) => channel.add_filter(filter),
            ToggleAction::Off(filter) => channel.remove_filter(filter),
            ToggleAction::Level(level) => channel.set_level(level),
        }
    }
}

impl fmt::Display for Toggle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.action {
            ToggleAction::On(filter) => write!(f, "{} on {}", self.channel, filter),
            ToggleAction::Off(filter) => write!(f, "{} off {}", self.channel, filter),
            ToggleAction::Level(level) => write!(f, "{} level {}", self.channel, level),
        }
    }
}

#[derive(Clone, Copy)]
enum Function {
    Off,
    On,
    Level,
}

const FUNCTIONS: [(&str, Function); 3] = [
    ("Off", Function::Off),
    ("On", Function::On),
    ("Level", Function::Level),
];

/// Parse one argument against a list of channel names
pub fn parse_toggle<'n>(
    arg: &str,
    channel_names: impl IntoIterator<Item = &'n str>,
    tags: &TagTable,
) -> Option<Toggle> {
    let rest = arg.strip_prefix('-')?;

    let channel = channel_names
        .into_iter()
        .filter(|name| starts_with_ignore_case(rest, name))
        .max_by_key(|name| name.len())?;
    let rest = &rest[channel.len()..];

    let (function_name, function) = FUNCTIONS
        .iter()
        .find(|(name, _)| starts_with_ignore_case(rest, name))?;
    let rest = &rest[function_name.len()..];

    let tag = if rest.is_empty() {
        None
    } else {
        Some(tags.match_prefix(rest)?.0)
    };

    let action = match (function, tag) {
        (Function::On, None) => ToggleAction::On(CategoryFilter::ALL),
        (Function::Off, None) => ToggleAction::Off(CategoryFilter::ALL),
        (Function::Level, None) => ToggleAction::Level(LevelSelection::ALL),
        (Function::On, Some(Tag::Category(bits))) => ToggleAction::On(bits),
        (Function::Off, Some(Tag::Category(bits))) => ToggleAction::Off(bits),
        (Function::Level, Some(Tag::Level(level))) => ToggleAction::Level(level),
        _ => return None,
    };

    Some(Toggle {
        channel: channel.to_string(),
        action,
    })
}

/// Apply every recognised toggle in `args`, in order, returning those applied
///
/// # Example
/// ```no_run
/// use rust_spew_system::prelude::*;
///
/// let channels = ChannelSet::new().unwrap();
/// let applied = parse_command_line(std::env::args().skip(1), &channels);
/// for toggle in &applied {
///     println!("{}", toggle);
/// }
/// ```
pub fn parse_command_line<I, S>(args: I, channels: &ChannelSet) -> Vec<Toggle>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let controls = channels.channels();
    let mut applied = Vec::new();

    for arg in args {
        let names = controls.iter().map(|channel| channel.name());
        let Some(toggle) = parse_toggle(arg.as_ref(), names, channels.tags()) else {
            continue;
        };
        if let Some(channel) = channels.channel(&toggle.channel) {
            toggle.apply(channel);
            applied.push(toggle);
        }
    }

    applied
}
