//! Substructural capabilities
//!
//! A value is copyable, droppable and swappable unless a marker hides
//! somewhere inside it. Quotation does not hide a marker and a composition
//! is restricted when either half is, so a single marker poisons the whole
//! value it is reachable from:
//!
//! ```text
//! affine   (no copy) : nocopy
//! relevant (no drop) : nodrop
//! ordered  (no swap) : noswap
//! ```

use super::{Block, Prim};

/// Capability checked by the `copy`, `drop` and `swap` operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// May be duplicated.
    Copy,
    /// May be erased.
    Drop,
    /// May be reordered.
    Swap,
}

impl Capability {
    /// The marker that revokes this capability.
    pub fn marker(self) -> Prim {
        match self {
            Capability::Copy => Prim::NoCopy,
            Capability::Drop => Prim::NoDrop,
            Capability::Swap => Prim::NoSwap,
        }
    }
}

/// Whether `block` has `capability`.
pub fn has(
    block: &Block,
    capability: Capability,
) -> bool {
    let marker = capability.marker();
    let mut pending = vec![block];
    while let Some(block) = pending.pop() {
        match block {
            Block::Prim(prim) if *prim == marker => return false,
            Block::Quote(body) => pending.push(&**body),
            Block::Pair(fst, snd) => {
                pending.push(&**snd);
                pending.push(&**fst);
            }
            _ => {}
        }
    }
    true
}

/// `copy` may duplicate this block.
pub fn copyable(block: &Block) -> bool {
    has(block, Capability::Copy)
}

/// `drop` may erase this block.
pub fn droppable(block: &Block) -> bool {
    has(block, Capability::Drop)
}

/// `swap` may move this block.
pub fn swappable(block: &Block) -> bool {
    has(block, Capability::Swap)
}
