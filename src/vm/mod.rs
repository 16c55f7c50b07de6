//! Reduction engine
//!
//! Rewrites blocks under a strict fuel budget. The engine is total: a term
//! whose rewrite cannot fire is recorded as stuck inside the result instead
//! of raising an error.

mod batch;
mod engine;
mod rules;
mod stack;

pub use batch::{reduce_batch, run_batch};
pub use engine::{
    reduce, reduce_config, reduce_with, Outcome, ReduceConfig, Reducer, Stats, DEFAULT_QUOTA,
};
pub use stack::Stack;

#[cfg(test)]
mod tests;
