//! Assertion handler chain
//!
//! A failed check asks the chain whether to break. Handlers are consulted in
//! registration order and the first one returning `true` decides; if every
//! handler returns `false` the answer is "continue". With no handlers at all,
//! the chain falls back to an interactive prompt.
//!
//! Breaking is a panic carrying the message, file and line, which a debugger
//! can catch and which fails the current test.

use crate::core::{CategoryFilter, ChannelPolicy, OutputChannel};
use parking_lot::{Mutex, RwLock};
use std::io::{self, BufRead, BufReader, Write};
use std::sync::{Arc, OnceLock};

/// Decides what to do about one failed check. Return `true` to break.
pub trait AssertionHandler: Send + Sync {
    fn call(&self, message: &str, line: u32, file: &str) -> bool;
}

impl<F> AssertionHandler for F
where
    F: Fn(&str, u32, &str) -> bool + Send + Sync,
{
    fn call(&self, message: &str, line: u32, file: &str) -> bool {
        self(message, line, file)
    }
}

/// Reports failures through an output channel
pub struct ChannelHandler<P: ChannelPolicy> {
    channel: Arc<OutputChannel<P>>,
    category: CategoryFilter,
    break_on_failure: bool,
}

impl<P: ChannelPolicy> ChannelHandler<P> {
    /// Report every failure and let execution continue
    pub fn new(channel: Arc<OutputChannel<P>>) -> Self {
        Self {
            channel,
            category: CategoryFilter::ALL,
            break_on_failure: false,
        }
    }

    #[must_use]
    pub fn category(mut self, category: CategoryFilter) -> Self {
        self.category = category;
        self
    }

    /// Ask for a break after reporting
    #[must_use]
    pub fn break_on_failure(mut self, enabled: bool) -> Self {
        self.break_on_failure = enabled;
        self
    }
}

impl<P: ChannelPolicy> AssertionHandler for ChannelHandler<P> {
    fn call(&self, message: &str, line: u32, file: &str) -> bool {
        let reported = self.channel.emit_category(
            self.category,
            format_args!("assertion failed: '{}' in '{}' line {}\n", message, file, line),
        );
        if let Err(e) = reported {
            eprintln!(
                "[SPEW WARNING] Assertion report to '{}' failed: {}",
                self.channel.name(),
                e
            );
        }
        self.break_on_failure
    }
}

/// Interactive fallback: print the failure and read one answer
pub struct Prompt {
    io: Mutex<PromptIo>,
}

struct PromptIo {
    reader: Box<dyn BufRead + Send>,
    writer: Box<dyn Write + Send>,
}

impl Prompt {
    pub fn new(reader: impl BufRead + Send + 'static, writer: impl Write + Send + 'static) -> Self {
        Self {
            io: Mutex::new(PromptIo {
                reader: Box::new(reader),
                writer: Box::new(writer),
            }),
        }
    }

    /// Standard input and output
    pub fn stdio() -> Self {
        Self::new(BufReader::new(io::stdin()), io::stdout())
    }

    /// `true` if the answer starts with `b`. End of input, a read error or
    /// any other answer means continue.
    pub fn ask(&self, message: &str, line: u32, file: &str) -> bool {
        let mut io = self.io.lock();
        match io.ask(message, line, file) {
            Ok(answer) => answer,
            Err(e) => {
                eprintln!("[SPEW WARNING] Assertion prompt failed: {}", e);
                false
            }
        }
    }
}

impl PromptIo {
    fn ask(&mut self, message: &str, line: u32, file: &str) -> io::Result<bool> {
        write!(
            self.writer,
            "assertion: \n   '{}'\n   in '{}' line {}\n   (b) break, (c) continue: ",
            message, file, line
        )?;
        self.writer.flush()?;

        let mut answer = String::new();
        self.reader.read_line(&mut answer)?;
        Ok(matches!(answer.chars().next(), Some('b' | 'B')))
    }
}

/// Ordered handlers plus the prompt used when there are none
///
/// # Example
/// ```
/// use rust_spew_system::assertion::{AssertionChain, Prompt};
///
/// let chain = AssertionChain::with_prompt(Prompt::new(&b"c\n"[..], std::io::sink()));
/// assert!(!chain.invoke("x > 0", 10, "main.rs"));
///
/// chain.register(|message: &str, _line: u32, _file: &str| message.contains("fatal"));
/// assert!(chain.invoke("fatal: bad state", 11, "main.rs"));
/// assert!(!chain.invoke("minor", 12, "main.rs"));
/// ```
pub struct AssertionChain {
    handlers: RwLock<Vec<Arc<dyn AssertionHandler>>>,
    prompt: Prompt,
}

impl AssertionChain {
    /// Empty chain prompting on standard input and output
    pub fn new() -> Self {
        Self::with_prompt(Prompt::stdio())
    }

    pub fn with_prompt(prompt: Prompt) -> Self {
        Self {
            handlers: RwLock::new(Vec::new()),
            prompt,
        }
    }

    /// The chain consulted by [`spew_assert!`](crate::spew_assert)
    pub fn global() -> &'static AssertionChain {
        static GLOBAL: OnceLock<AssertionChain> = OnceLock::new();
        GLOBAL.get_or_init(AssertionChain::new)
    }

    pub fn register(&self, handler: impl AssertionHandler + 'static) {
        self.handlers.write().push(Arc::new(handler));
    }

    pub fn register_shared(&self, handler: Arc<dyn AssertionHandler>) {
        self.handlers.write().push(handler);
    }

    pub fn clear(&self) {
        self.handlers.write().clear();
    }

    pub fn len(&self) -> usize {
        self.handlers.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.read().is_empty()
    }

    /// Decide whether a failed check should break
    pub fn invoke(&self, message: &str, line: u32, file: &str) -> bool {
        // Handlers run without the lock held so they may register others.
        let handlers = self.handlers.read().clone();
        if handlers.is_empty() {
            return self.prompt.ask(message, line, file);
        }
        handlers
            .iter()
            .any(|handler| handler.call(message, line, file))
    }
}

impl Default for AssertionChain {
    fn default() -> Self {
        Self::new()
    }
}

/// Stop at a failed check
#[cold]
#[track_caller]
pub fn trigger_break(message: &str, line: u32, file: &str) -> ! {
    panic!("assertion break: '{}' in '{}' line {}", message, file, line)
}
