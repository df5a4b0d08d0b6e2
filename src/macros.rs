//! Output macros for ergonomic message formatting.
//!
//! `emit!` takes `format!`-style arguments and only formats them when the
//! channel would pass the message. For a channel compiled out of the build
//! the whole call, arguments included, is dead code.
//!
//! # Examples
//!
//! ```
//! use rust_spew_system::prelude::*;
//! use rust_spew_system::emit;
//! use rust_spew_system::tags::category::{GFX, SOUND};
//!
//! let channel = OutputChannel::new(EmptyPolicy::new("game")).unwrap();
//! let memory = MemorySink::new("memory");
//! let sink = memory.shared();
//! channel.attach_sink(&sink);
//! channel.set_filter(GFX);
//! channel.set_level(2).unwrap();
//!
//! // Category and level
//! emit!(channel; GFX, 2; "draw calls: {}\n", 118).unwrap();
//!
//! // Category only, level 1
//! emit!(channel; SOUND; "not enabled\n").unwrap();
//!
//! // Every category, level 1
//! emit!(channel; "frame {} done\n", 7).unwrap();
//!
//! assert_eq!(memory.contents(), "draw calls: 118\nframe 7 done\n");
//! ```

/// Emit a formatted message through a channel.
///
/// Forms, with `;` separating the channel, the tags and the format:
///
/// - `emit!(channel; category, level; "fmt", args..)`
/// - `emit!(channel; category; "fmt", args..)` at level 1
/// - `emit!(channel; "fmt", args..)` with every category bit, at level 1
///
/// Evaluates to the channel's `Result<()>`.
#[macro_export]
macro_rules! emit {
    ($channel:expr; $category:expr, $level:expr; $($arg:tt)+) => {{
        let channel = &$channel;
        if channel.is_compiled_in() {
            channel.emit($category, $level, format_args!($($arg)+))
        } else {
            $crate::Result::Ok(())
        }
    }};
    ($channel:expr; $category:expr; $($arg:tt)+) => {
        $crate::emit!($channel; $category, $crate::LevelTag::DEFAULT; $($arg)+)
    };
    ($channel:expr; $($arg:tt)+) => {
        $crate::emit!($channel; $crate::CategoryFilter::ALL, $crate::LevelTag::DEFAULT; $($arg)+)
    };
}

/// Run an expression at most once per key, from this call site only.
///
/// Each expansion declares its own guard, so two call sites using the same
/// key fire independently. Evaluates to whether the expression ran.
///
/// # Examples
///
/// ```
/// use rust_spew_system::run_once;
///
/// let mut shown = Vec::new();
/// for item in [4, 9, 4, 4, 9] {
///     run_once!(item, i32 => shown.push(item));
/// }
/// assert_eq!(shown, vec![4, 9]);
///
/// for _ in 0..10 {
///     run_once!(line!(), u32 => println!("this only outputs once"));
/// }
/// ```
#[macro_export]
macro_rules! run_once {
    ($key:expr, $key_type:ty => $action:expr) => {{
        static GUARD: $crate::OnceGuard<$key_type> = $crate::OnceGuard::new();
        GUARD.run_once($key, || {
            $action;
        })
    }};
}

/// Check a condition in debug builds, consulting the global
/// [`AssertionChain`](crate::AssertionChain) when it fails.
///
/// A `true` decision from the chain panics with the message and location.
/// In release builds the condition is never evaluated. A leading
/// `chain;` argument uses that chain instead of the global one.
///
/// # Examples
///
/// ```
/// use rust_spew_system::spew_assert;
/// use rust_spew_system::assertion::{AssertionChain, Prompt};
///
/// let chain = AssertionChain::with_prompt(Prompt::new(&b"c\n"[..], std::io::sink()));
/// let items = vec![1, 2, 3];
///
/// spew_assert!(chain; items.len() == 3, "three items expected");
/// spew_assert!(chain; items.is_empty(), "answered with continue");
/// ```
#[macro_export]
macro_rules! spew_assert {
    ($chain:expr; $cond:expr, $message:expr $(,)?) => {
        if cfg!(debug_assertions) && !($cond) {
            let message: &str = $message;
            if $chain.invoke(message, line!(), file!()) {
                $crate::assertion::trigger_break(message, line!(), file!());
            }
        }
    };
    ($cond:expr, $message:expr $(,)?) => {
        $crate::spew_assert!($crate::AssertionChain::global(); $cond, $message)
    };
}

/// Compile-time check.
///
/// ```
/// use rust_spew_system::spew_static_assert;
///
/// spew_static_assert!(std::mem::size_of::<u32>() == 4, "u32 is four bytes");
/// ```
#[macro_export]
macro_rules! spew_static_assert {
    ($cond:expr, $message:expr $(,)?) => {
        const _: () = assert!($cond, $message);
    };
}
