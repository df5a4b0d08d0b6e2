//! Integration tests for the spew system
//!
//! These tests verify:
//! - File-backed Log channel delivery
//! - Ordered fan-out that survives failing and panicking sinks
//! - Reset to the policy's defaults
//! - Command-line toggles and JSON config against a full channel set
//! - Run-once guards and the assertion chain

use rust_spew_system::assertion::{AssertionChain, Prompt};
use rust_spew_system::prelude::*;
use rust_spew_system::tags::category::{ERROR, GFX, IO, SCRIPT, SOUND};
use rust_spew_system::{emit, run_once};
use std::fs;
use std::io::Write;
use std::sync::Arc;
use tempfile::TempDir;

fn channel_set(dir: &TempDir) -> ChannelSet {
    ChannelSet::builder()
        .log_path(dir.path().join("log.txt"))
        .build()
        .expect("Failed to build channel set")
}

struct PanickingSink;

impl Sink for PanickingSink {
    fn write(&mut self, _text: &str) -> rust_spew_system::Result<()> {
        panic!("sink exploded");
    }

    fn flush(&mut self) -> rust_spew_system::Result<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        "panicking"
    }
}

#[test]
fn test_log_channel_writes_file() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let set = channel_set(&temp_dir);
    if !set.log().is_compiled_in() {
        return;
    }

    emit!(set.log(); GFX; "first line\n").unwrap();
    set.log()
        .stream(IO, 1)
        .unwrap()
        .append("second ")
        .append("line")
        .endl()
        .unwrap();
    emit!(set.log(); SOUND, 2; "level 2 is off by default\n").unwrap();

    let content = fs::read_to_string(temp_dir.path().join("log.txt")).unwrap();
    assert_eq!(content, "first line\nsecond line\n");
}

#[test]
fn test_fan_out_order_survives_failures() {
    let channel = OutputChannel::new(EmptyPolicy::new("fan")).unwrap();

    let first = MemorySink::new("first");
    let broken = MemorySink::new("broken");
    broken.fail_writes(true);
    let panicking = shared(PanickingSink);
    let last = MemorySink::new("last");

    let handles = [first.shared(), broken.shared(), panicking, last.shared()];
    for handle in &handles {
        assert!(channel.attach_sink(handle));
    }
    assert_eq!(
        channel.sink_names(),
        vec!["first", "broken", "panicking", "last"]
    );

    let err = emit!(channel; ERROR; "disk full").unwrap_err();
    let failed: Vec<_> = err
        .sink_failures()
        .iter()
        .map(|f| (f.index, f.sink.as_str()))
        .collect();
    assert_eq!(failed, vec![(1, "broken"), (2, "panicking")]);
    assert!(err.to_string().contains("2 of the channel's sinks failed"));

    assert_eq!(first.contents(), "disk full");
    assert_eq!(last.contents(), "disk full");

    // The panicking sink's mutex must stay usable for the next message.
    broken.fail_writes(false);
    let err = emit!(channel; "again").unwrap_err();
    assert_eq!(err.sink_failures().len(), 1);
    assert_eq!(last.writes(), vec!["disk full", "again"]);
}

#[test]
fn test_sinks_are_not_owned() {
    let channel = OutputChannel::new(EmptyPolicy::new("weak")).unwrap();
    let kept = MemorySink::new("kept");
    let kept_handle = kept.shared();
    let dropped_handle = MemorySink::new("dropped").shared();

    channel.attach_sink(&kept_handle);
    channel.attach_sink(&dropped_handle);
    assert_eq!(channel.sink_count(), 2);

    drop(dropped_handle);
    assert_eq!(channel.sink_count(), 1);
    emit!(channel; "still delivered").unwrap();
    assert_eq!(kept.contents(), "still delivered");

    assert!(channel.detach_sink(&kept_handle));
    emit!(channel; "nowhere").unwrap();
    assert_eq!(kept.write_count(), 1);
}

#[test]
fn test_file_sink_shared_between_channels() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("shared.log");
    let file = shared(FileSink::create(&path).unwrap());

    let audio = OutputChannel::new(EmptyPolicy::new("Audio")).unwrap();
    let physics = OutputChannel::new(EmptyPolicy::new("Physics")).unwrap();
    audio.attach_sink(&file);
    physics.attach_sink(&file);

    emit!(audio; SOUND; "mixer up\n").unwrap();
    emit!(physics; "step 1\n").unwrap();
    drop(audio);
    emit!(physics; "step 2\n").unwrap();

    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "mixer up\nstep 1\nstep 2\n"
    );
}

#[test]
fn test_reset_restores_policy_defaults() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let set = channel_set(&temp_dir);

    set.stdout().set_filter(SCRIPT);
    set.stdout().remove_filter(SCRIPT);
    set.stdout().set_level(5).unwrap();
    set.stderr().add_filter(GFX | ERROR);
    set.stderr().set_level(LevelSelection::only(2).unwrap()).unwrap();

    set.stdout().reset_to_defaults();
    set.stderr().reset_to_defaults();

    assert_eq!(set.stdout().masks(), set.stdout().policy().default_masks());
    assert_eq!(set.stdout().filter(), CategoryFilter::ALL);
    assert_eq!(set.stderr().filter(), CategoryFilter::NONE);
    assert_eq!(set.stderr().level(), LevelSelection::LEVEL1_AND_LOWER);
}

#[test]
fn test_command_line_toggles() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let set = channel_set(&temp_dir);
    let memory = MemorySink::new("capture");
    let capture = memory.shared();
    set.stderr().attach_sink(&capture);

    let applied = parse_command_line(
        ["game.exe", "-StdErrOnERROR", "-StdErrLevel3", "-StdOutOff", "-volume=3"],
        &set,
    );
    assert_eq!(applied.len(), 3);
    assert_eq!(set.stdout().filter(), CategoryFilter::NONE);

    emit!(set.stderr(); ERROR, 3; "level 3 error\n").unwrap();
    emit!(set.stderr(); GFX, 1; "gfx stays off\n").unwrap();
    emit!(set.stderr(); ERROR, 4; "level 4 stays off\n").unwrap();
    assert_eq!(memory.contents(), "level 3 error\n");
}

#[test]
fn test_config_file_applies_to_set() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("spew.json");
    let mut file = fs::File::create(&config_path).unwrap();
    write!(
        file,
        r#"{{
            "log_path": {:?},
            "max_message_len": 12,
            "channels": {{ "StdErr": {{ "filter": ["IO", "ERROR"], "level": "2only" }} }}
        }}"#,
        temp_dir.path().join("from_config.txt")
    )
    .unwrap();
    drop(file);

    let config = OutputConfig::from_file(&config_path).unwrap();
    let set = ChannelSet::from_config(&config).unwrap();
    let memory = MemorySink::new("capture");
    let capture = memory.shared();
    set.stderr().attach_sink(&capture);

    emit!(set.stderr(); IO, 2; "0123456789abcdef").unwrap();
    emit!(set.stderr(); IO, 1; "level 1 is not selected").unwrap();
    assert_eq!(memory.contents(), "0123456789ab");
    assert_eq!(set.stderr().metrics().truncated(), 1);
    assert_eq!(set.stderr().metrics().suppressed(), 1);
}

#[test]
fn test_run_once_inside_loop() {
    let memory = MemorySink::new("once");
    let capture = memory.shared();
    let channel = OutputChannel::new(EmptyPolicy::new("once")).unwrap();
    channel.attach_sink(&capture);

    for _ in 0..10 {
        run_once!(line!(), u32 => emit!(channel; "this only outputs once\n").unwrap());
    }
    for item in [3, 1, 3, 2, 1] {
        run_once!(item, i32 => emit!(channel; "item {} has a problem\n", item).unwrap());
    }

    assert_eq!(
        memory.writes(),
        vec![
            "this only outputs once\n",
            "item 3 has a problem\n",
            "item 1 has a problem\n",
            "item 2 has a problem\n",
        ]
    );
}

#[test]
fn test_assertion_chain_scenarios() {
    let empty = AssertionChain::with_prompt(Prompt::new(&b"c\n"[..], std::io::sink()));
    assert!(!empty.invoke("x", 1, "a.rs"));

    let chain = AssertionChain::with_prompt(Prompt::new(&b"b\n"[..], std::io::sink()));
    let consulted = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let flag = Arc::clone(&consulted);
    chain.register(|_: &str, _: u32, _: &str| true);
    chain.register(move |_: &str, _: u32, _: &str| {
        flag.store(true, std::sync::atomic::Ordering::SeqCst);
        false
    });

    assert!(chain.invoke("x", 1, "a.rs"));
    assert!(!consulted.load(std::sync::atomic::Ordering::SeqCst));
}

#[test]
fn test_timestamped_file_sink() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("stamped.log");
    let file = shared(
        FileSink::append(&path)
            .unwrap()
            .with_timestamp_format(TimestampFormat::Unix),
    );
    let channel = OutputChannel::builder(EmptyPolicy::new("stamped"))
        .sink(&file)
        .build()
        .unwrap();

    emit!(channel; "hello\n").unwrap();

    let content = fs::read_to_string(&path).unwrap();
    let (stamp, rest) = content.split_once("] ").unwrap();
    assert!(stamp.trim_start_matches('[').parse::<i64>().is_ok());
    assert_eq!(rest, "hello\n");
}
