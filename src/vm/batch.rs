//! Parallel reduction of independent blocks
//!
//! Blocks are immutable and each run owns its engine state, so separate
//! blocks reduce on separate threads with nothing shared but the resolver.

use rayon::prelude::*;

use super::engine::{Outcome, Reducer};
use crate::block::Block;
use crate::reader::{NoResolver, Resolver};

/// Reduce every block with the same quota. Results keep the input order.
pub fn reduce_batch(
    blocks: &[Block],
    quota: usize,
) -> Vec<Block> {
    run_batch(blocks, quota, &NoResolver)
        .into_iter()
        .map(|outcome| outcome.block)
        .collect()
}

/// Like [`reduce_batch`], returning full outcomes and resolving names.
pub fn run_batch(
    blocks: &[Block],
    quota: usize,
    resolver: &dyn Resolver,
) -> Vec<Outcome> {
    blocks
        .par_iter()
        .map(|block| Reducer::with_resolver(block.clone(), resolver).run(quota))
        .collect()
}
