//! Diagnostics on stderr
//!
//! Stdout carries bytecode and rendered blocks, so every log line goes to
//! stderr as a bare `LEVEL message` without time or module path.
//!
//! ```rust
//! use abc::util::logger::{self, Verbosity};
//!
//! logger::install(Verbosity::from_flags(1, false));
//! tracing::debug!(fuel_used = 3, "reduction finished");
//! ```

use tracing_subscriber::filter::LevelFilter;

/// How much the command line wants to hear.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum Verbosity {
    /// Errors only.
    Quiet,
    /// Warnings and progress notes.
    #[default]
    Normal,
    /// Stuck terms, name resolution and run summaries.
    Debug,
    /// Every rewrite step as well.
    Trace,
}

impl Verbosity {
    /// `--quiet` wins over any number of `-v`.
    pub fn from_flags(
        verbose: u8,
        quiet: bool,
    ) -> Self {
        match (quiet, verbose) {
            (true, _) => Verbosity::Quiet,
            (false, 0) => Verbosity::Normal,
            (false, 1) => Verbosity::Debug,
            (false, _) => Verbosity::Trace,
        }
    }

    pub fn level_filter(self) -> LevelFilter {
        match self {
            Verbosity::Quiet => LevelFilter::ERROR,
            Verbosity::Normal => LevelFilter::INFO,
            Verbosity::Debug => LevelFilter::DEBUG,
            Verbosity::Trace => LevelFilter::TRACE,
        }
    }

    /// Whether the engine should log each step.
    pub fn traces_steps(self) -> bool {
        self == Verbosity::Trace
    }
}

/// Install the global subscriber. Returns `false` when one is already set,
/// which happens when tests install it more than once.
pub fn install(verbosity: Verbosity) -> bool {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(verbosity.level_filter())
        .without_time()
        .with_target(false)
        .with_ansi(false)
        .compact()
        .try_init()
        .is_ok()
}
