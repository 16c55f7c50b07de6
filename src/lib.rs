//! ABC: a content-addressed, substructural block calculus
//!
//! Programs are blocks built from six combinators (`app`, `box`, `cat`,
//! `copy`, `drop`, `swap`), three markers that revoke copying, dropping or
//! reordering, two equality guards and a reserved `tag`. Blocks serialize
//! to a compact bytecode whose SHA-256 is a block's content address, and
//! reduce under a strict fuel budget. Reduction never fails: whatever cannot
//! make progress comes back inside the result.
//!
//! # Example
//!
//! ```
//! use abc::{reader, vm};
//!
//! let block = reader::parse("[copy] [drop] swap").unwrap();
//! let result = vm::reduce(block, 100);
//! assert_eq!(result.to_string(), "[drop] [copy]");
//! ```

#![doc(html_root_url = "https://docs.rs/abc-calculus")]
#![warn(rust_2018_idioms)]

// Public modules
pub mod block;
pub mod builder;
pub mod codec;
pub mod reader;
pub mod vm;

// Front ends
pub mod backends;

// Utility modules
pub mod util;

// Re-exports
pub use anyhow::{Context, Result};
pub use block::{compose, quote, Block, LinkHash, Prim};
pub use vm::{Outcome, ReduceConfig};

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::reader::Resolver;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Display name
pub const NAME: &str = "ABC block calculus";

/// Decode bytecode and reduce it.
pub fn reduce_bytes(
    bytes: &[u8],
    config: &ReduceConfig,
) -> Result<Outcome> {
    debug!(len = bytes.len(), "decoding bytecode");
    let block = codec::decode_bytes(bytes).context("Failed to decode bytecode")?;
    Ok(vm::reduce_config(block, config, &reader::NoResolver))
}

/// Decode a bytecode file and reduce it.
pub fn reduce_file(
    path: &Path,
    config: &ReduceConfig,
) -> Result<Outcome> {
    let bytes =
        fs::read(path).with_context(|| format!("Failed to read file: {}", path.display()))?;
    reduce_bytes(&bytes, config)
}

/// Parse text and reduce it. Names are resolved through `resolver` as the
/// engine meets them; one that cannot be resolved is left stuck.
pub fn eval_text(
    text: &str,
    config: &ReduceConfig,
    resolver: &dyn Resolver,
) -> Result<Outcome> {
    let block = reader::parse(text).context("Failed to read code")?;
    Ok(vm::reduce_config(block, config, resolver))
}
