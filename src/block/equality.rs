//! Structural equality
//!
//! Two blocks are equal when they have the same shape, whatever their
//! sharing. Links compare by hash bytes and numbers by value.

use std::sync::Arc;

use super::Block;

/// Deep structural comparison.
///
/// The composition spine and quotation bodies are walked in place. A
/// return point is only remembered when a quotation heads a composition
/// and both sides still have a tail to compare, so comparing flat code,
/// nested quotations or shared subtrees does not allocate.
pub fn equal(
    lhs: &Block,
    rhs: &Block,
) -> bool {
    let mut pending: Vec<(&Block, &Block)> = Vec::new();
    let mut current = (lhs, rhs);
    loop {
        let same = match current {
            (Block::Quote(a), Block::Quote(b)) => {
                if Arc::ptr_eq(a, b) {
                    true
                } else {
                    current = (&**a, &**b);
                    continue;
                }
            }
            (Block::Pair(a1, a2), Block::Pair(b1, b2)) => {
                let tail = (&**a2, &**b2);
                if Arc::ptr_eq(a1, b1) {
                    current = tail;
                    continue;
                }
                match shallow(a1, b1) {
                    Some(true) => {
                        current = tail;
                        continue;
                    }
                    Some(false) => return false,
                    None => {
                        if !Arc::ptr_eq(a2, b2) {
                            pending.push(tail);
                        }
                        current = (&**a1, &**b1);
                        continue;
                    }
                }
            }
            (a, b) => leaf_equal(a, b),
        };
        if !same {
            return false;
        }
        match pending.pop() {
            Some(next) => current = next,
            None => return true,
        }
    }
}

/// Settle a comparison without descending, or `None` when both sides
/// have children of the same kind.
fn shallow(
    lhs: &Block,
    rhs: &Block,
) -> Option<bool> {
    match (lhs, rhs) {
        (Block::Quote(_), Block::Quote(_)) | (Block::Pair(..), Block::Pair(..)) => None,
        _ => Some(leaf_equal(lhs, rhs)),
    }
}

fn leaf_equal(
    lhs: &Block,
    rhs: &Block,
) -> bool {
    match (lhs, rhs) {
        (Block::Id, Block::Id) => true,
        (Block::Prim(a), Block::Prim(b)) => a == b,
        (Block::Link(a), Block::Link(b)) => a == b,
        (Block::Num(a), Block::Num(b)) => a == b,
        (Block::Var(a), Block::Var(b)) => a == b,
        _ => false,
    }
}
