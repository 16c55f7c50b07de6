//! Fuel-bounded reduction engine
//!
//! The engine keeps three records: the continuation (`work`), the data
//! stack of values produced so far (`data`), and the trash (`kill`) of terms
//! that got stuck together with everything that was on the data stack at
//! that moment. One block at a time is taken off the continuation and asked
//! to rewrite against the data stack. A successful rewrite costs one unit of
//! fuel. A failed one moves the whole data stack and the block to the trash
//! and costs nothing. Nothing is ever lost: every sub-term comes back in
//! the result, packaged as trash, then the pending continuation, then the
//! data stack.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::rules::Step;
use super::stack::Stack;
use crate::block::{compose, Block};
use crate::reader::{NoResolver, Resolver};

/// Fuel used when nothing else is configured.
pub const DEFAULT_QUOTA: usize = 1000;

static NO_RESOLVER: NoResolver = NoResolver;

/// Reduction settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReduceConfig {
    /// Maximum number of rewrites per run
    #[serde(default = "default_quota")]
    pub quota: usize,
    /// Log every step at trace level
    #[serde(default)]
    pub trace: bool,
}

fn default_quota() -> usize {
    DEFAULT_QUOTA
}

impl Default for ReduceConfig {
    fn default() -> Self {
        Self {
            quota: DEFAULT_QUOTA,
            trace: false,
        }
    }
}

/// Counters of one reduction run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    /// Successful rewrites.
    pub fuel_used: usize,
    /// Terms that got stuck.
    pub stuck: usize,
    /// Whether the run stopped on an empty tank with work still pending.
    pub exhausted: bool,
    /// Tags met on the way.
    pub tags: usize,
}

/// Result of a reduction run.
#[derive(Debug, Clone)]
pub struct Outcome {
    /// Trash, then the remaining continuation, then the data stack.
    pub block: Block,
    /// Tags in the order they were met. They do not reappear in `block`.
    pub tags: Vec<Block>,
    /// Counters
    pub stats: Stats,
}

impl Outcome {
    /// Whether the run neither got stuck nor ran out of fuel.
    pub fn is_complete(&self) -> bool {
        !self.stats.exhausted && self.stats.stuck == 0
    }
}

/// Reduction engine for one block.
pub struct Reducer<'r> {
    pub(super) work: Stack,
    pub(super) data: Stack,
    pub(super) kill: Vec<Block>,
    pub(super) tags: Vec<Block>,
    pub(super) resolver: &'r dyn Resolver,
    stuck: usize,
    trace: bool,
}

impl std::fmt::Debug for Reducer<'_> {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        f.debug_struct("Reducer")
            .field("work", &self.work.len())
            .field("data", &self.data.len())
            .field("kill", &self.kill.len())
            .field("stuck", &self.stuck)
            .finish()
    }
}

impl Reducer<'static> {
    /// Engine with `init` as the whole continuation and no name resolution.
    pub fn new(init: Block) -> Self {
        Reducer::with_resolver(init, &NO_RESOLVER)
    }
}

impl<'r> Reducer<'r> {
    /// Engine that resolves names through `resolver`.
    pub fn with_resolver(
        init: Block,
        resolver: &'r dyn Resolver,
    ) -> Self {
        let mut work = Stack::new();
        if !init.is_id() {
            // rules rebuild values assuming normal form
            work.push(compose([init]));
        }
        Self {
            work,
            data: Stack::new(),
            kill: Vec::new(),
            tags: Vec::new(),
            resolver,
            stuck: 0,
            trace: false,
        }
    }

    /// Log every step at trace level.
    pub fn trace(
        mut self,
        enabled: bool,
    ) -> Self {
        self.trace = enabled;
        self
    }

    /// Move the data stack and `block` to the trash.
    pub(super) fn clear(
        &mut self,
        block: Block,
    ) {
        debug!(block = %block, arity = self.data.len(), "stuck");
        self.data.drain_into(&mut self.kill);
        self.kill.push(block);
        self.stuck += 1;
    }

    /// Rewrite until `quota` rewrites have happened or no work is left.
    pub fn run(
        mut self,
        quota: usize,
    ) -> Outcome {
        let mut fuel = quota;
        while fuel > 0 {
            let Some(block) = self.work.pop() else {
                break;
            };
            if self.trace {
                trace!(block = %block, arity = self.data.len(), fuel, "step");
            }
            match self.rewrite(&block) {
                Step::Progress => fuel -= 1,
                Step::Stuck => self.clear(block),
                Step::Aside => self.tags.push(block),
                Step::Quiet => {}
            }
        }
        let stats = Stats {
            fuel_used: quota - fuel,
            stuck: self.stuck,
            exhausted: fuel == 0 && !self.work.is_empty(),
            tags: self.tags.len(),
        };
        debug!(
            fuel_used = stats.fuel_used,
            stuck = stats.stuck,
            exhausted = stats.exhausted,
            "reduction finished"
        );
        Outcome {
            block: self.package(),
            tags: self.tags,
            stats,
        }
    }

    /// Trash in encounter order, then the continuation in program order,
    /// then the data stack bottom to top.
    fn package(&mut self) -> Block {
        let mut parts = std::mem::take(&mut self.kill);
        let mut work = std::mem::take(&mut self.work).into_vec();
        work.reverse();
        parts.append(&mut work);
        self.data.drain_into(&mut parts);
        compose(parts)
    }
}

/// Reduce `block` with at most `quota` rewrites. Never fails: terms that
/// cannot make progress come back inside the result.
pub fn reduce(
    block: Block,
    quota: usize,
) -> Block {
    Reducer::new(block).run(quota).block
}

/// Like [`reduce`], resolving names through `resolver`.
pub fn reduce_with(
    block: Block,
    quota: usize,
    resolver: &dyn Resolver,
) -> Block {
    Reducer::with_resolver(block, resolver).run(quota).block
}

/// Run with the settings in `config`.
pub fn reduce_config(
    block: Block,
    config: &ReduceConfig,
    resolver: &dyn Resolver,
) -> Outcome {
    Reducer::with_resolver(block, resolver)
        .trace(config.trace)
        .run(config.quota)
}
