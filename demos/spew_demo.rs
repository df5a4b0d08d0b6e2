//! Walk through every channel, the toggler, run-once and assertions.
//!
//! ```text
//! cargo run --example spew_demo -- -TraceOnGFX -TraceLevel3 -TraceOnIO
//! ```

use rust_spew_system::assertion::ChannelHandler;
use rust_spew_system::prelude::*;
use rust_spew_system::tags::category::{ANIM, GFX, IO, PHYSICS, SCRIPT};
use rust_spew_system::{emit, run_once, spew_assert};
use std::sync::Arc;

fn main() -> rust_spew_system::Result<()> {
    let channels = ChannelSet::new()?;

    for toggle in parse_command_line(std::env::args().skip(1), &channels) {
        emit!(channels.stdout(); "toggle: {}\n", toggle)?;
    }

    let trace = channels.trace();
    for level in 1..=5 {
        trace
            .stream(GFX, level)?
            .append("Trace] filter:GFX level:")
            .append(level)
            .append(" is on")
            .endl()?;
    }
    for level in 1..=5 {
        emit!(trace; IO, level; "Trace] filter:IO level:{} is on\n", level)?;
    }

    for _ in 0..10 {
        run_once!(line!(), u32 => emit!(channels.stdout(); "this only outputs once\n").ok());
    }

    channels.reset_to_defaults();
    emit!(channels.log(); "Log] default filter, default level\n")?;
    emit!(channels.log(); GFX; "Log] GFX filter, default {}\n", "level")?;
    emit!(channels.log(); SCRIPT, 3; "Log] SCRIPT filter, '{}' '{}'\n", "level", 3)?;
    emit!(channels.stderr(); "StdErr] off by default\n")?;
    emit!(channels.stdout(); GFX; "StdOut] GFX filter, default level\n")?;

    custom_channel_checks(&channels)?;

    let reporter = Arc::new(OutputChannel::new(EmptyPolicy::new("Asserts"))?);
    let console = shared(ConsoleSink::stderr());
    reporter.attach_sink(&console);
    AssertionChain::global().register(ChannelHandler::new(reporter));
    spew_assert!(channels.stdout().sink_count() == 2, "stdout has a single sink");

    let metrics = channels.stdout().metrics();
    emit!(
        channels.stdout();
        "\nstdout: {} delivered, {} suppressed\n",
        metrics.delivered(),
        metrics.suppressed()
    )?;
    Ok(())
}

/// Each `.` is a message that should appear and each `F` one that should not.
fn custom_channel_checks(channels: &ChannelSet) -> rust_spew_system::Result<()> {
    let custom = OutputChannel::new(EmptyPolicy::new("Custom"))?;
    let memory = MemorySink::new("memory");
    let buffer = memory.shared();
    custom.attach_sink(&buffer);
    custom.set_level(LevelSelection::ALL)?;

    custom.set_filter(IO);
    emit!(custom; GFX; "F")?;
    custom.set_filter(GFX | IO | SCRIPT);
    emit!(custom; GFX; ".")?;
    emit!(custom; ANIM; "F")?;
    custom.set_filter(CategoryFilter::ALL);
    for level in 1..=5 {
        emit!(custom; PHYSICS, level; ".")?;
    }
    custom.set_level(2)?;
    for level in 1..=5 {
        let mark = if level <= 2 { "." } else { "F" };
        emit!(custom; PHYSICS, level; "{}", mark)?;
    }

    let result = memory.contents();
    emit!(channels.stdout(); "filter tests on custom output: [{}] ", result)?;
    if result.contains('F') {
        emit!(channels.stdout(); "FAILED\n")
    } else {
        emit!(channels.stdout(); "passed\n")
    }
}
